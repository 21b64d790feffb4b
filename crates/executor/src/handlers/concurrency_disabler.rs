//! concurrency-disabler: hold this run until older runs have finished

use std::time::Duration;

use ghactions_concurrency::{
    AdmissionConfig, AdmissionController, DEFAULT_MAX_WAIT, DEFAULT_POLL_INTERVAL,
};
use ghactions_core::{Environment, Error, GitHubContext, Result, RunId, RunSource};
use tracing::debug;

use crate::Output;

/// Inputs of the concurrency-disabler action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisablerConfig {
    /// API token
    pub token: String,
    /// Admission parameters
    pub admission: AdmissionConfig,
}

impl DisablerConfig {
    /// Read inputs and context
    ///
    /// The branch filter is only set when `same-branch-only` is true.
    pub fn from_env(env: &Environment, ctx: &GitHubContext) -> Result<Self> {
        let token = env
            .input("github-token")
            .ok_or_else(|| Error::config("No github token provided"))?
            .to_string();
        let me = ctx
            .run_id
            .ok_or_else(|| Error::config("GITHUB_RUN_ID is not set"))?;

        let branch = if env.bool_input("same-branch-only") {
            Some(ctx.branch.clone())
        } else {
            None
        };

        let admission = AdmissionConfig::new(me)
            .poll_interval(parse_poll_interval(env.input("poll-interval")))
            .max_wait(parse_max_wait(env.input("continue-after-seconds")))
            .branch(branch)
            .ignore_errors(env.bool_input("ignore-errors"));

        Ok(DisablerConfig { token, admission })
    }

    /// The run waiting for its turn
    pub fn run_id(&self) -> RunId {
        self.admission.me
    }
}

/// `poll-interval` in seconds; zero or unparsable means the default
pub fn parse_poll_interval(raw: Option<&str>) -> Duration {
    match raw.and_then(|v| v.parse::<u64>().ok()) {
        Some(secs) if secs > 0 => Duration::from_secs(secs),
        _ => DEFAULT_POLL_INTERVAL,
    }
}

/// `continue-after-seconds`: `infinite` or negative waits forever
pub fn parse_max_wait(raw: Option<&str>) -> Option<Duration> {
    let raw = match raw {
        Some(raw) => raw,
        None => return Some(DEFAULT_MAX_WAIT),
    };
    if raw.eq_ignore_ascii_case("infinite") {
        return None;
    }
    match raw.parse::<i64>() {
        Ok(secs) if secs < 0 => None,
        Ok(secs) if secs > 0 => Some(Duration::from_secs(secs as u64)),
        _ => Some(DEFAULT_MAX_WAIT),
    }
}

/// Handle the ConcurrencyDisabler command.
pub async fn run<S>(config: &DisablerConfig, ctx: &GitHubContext, source: &S) -> Result<Output>
where
    S: RunSource + ?Sized,
{
    debug!("Repository: {}", ctx.repository());
    debug!("Branch: {}", ctx.branch);
    debug!("Run ID: {}", config.run_id());

    let admission = AdmissionController::new(config.admission.clone())
        .admit(source)
        .await?;
    debug!(outcome = %admission.outcome, polls = admission.polls, "admission finished");
    Ok(Output::Admission(admission))
}

//! pr-status: expose pull-request fields as step outputs

use ghactions_core::{ActionRunner, Environment, Error, GitHubApi, GitHubContext, Result};

use crate::Output;

/// Inputs of the pr-status action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrStatusConfig {
    /// API token
    pub token: String,
    /// Pull request to describe
    pub number: u64,
}

impl PrStatusConfig {
    /// Read inputs and context
    pub fn from_env(env: &Environment, ctx: &GitHubContext) -> Result<Self> {
        let token = env.required_input("github-token")?.to_string();
        let number = match env.input("pull-request-id") {
            Some(raw) => raw
                .parse::<u64>()
                .map_err(|_| Error::config(format!("invalid pull-request-id '{}'", raw)))?,
            None => ctx
                .pull_request_number()
                .ok_or_else(|| Error::config("no pull request in this event and no pull-request-id"))?,
        };
        Ok(PrStatusConfig { token, number })
    }
}

/// Handle the PrStatus command.
pub async fn run(
    config: &PrStatusConfig,
    api: &dyn GitHubApi,
    runner: &ActionRunner,
) -> Result<Output> {
    let fields = api.get_pull_request(config.number).await?;
    for (name, value) in &fields {
        runner.set_output_value(name, value)?;
    }
    Ok(Output::PullRequest(fields))
}

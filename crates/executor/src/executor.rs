//! The Executor - single entry point for every action
//!
//! The executor reads the workflow context, builds the per-action config
//! from the [`Environment`] snapshot and dispatches to the handler. The
//! GitHub API is reached through [`GitHubApi`]; a REST client is built on
//! demand unless one was injected with [`Executor::with_api`].

use std::sync::Arc;

use ghactions_core::{ActionRunner, Environment, GitHubApi, GitHubContext, Result};
use ghactions_github::GitHubClient;
use tracing::debug;

use crate::handlers::{
    add_labels, concurrency_disabler, conventional_commits, pr_status, setup_maven,
    AddLabelsConfig, CommitCheckConfig, DisablerConfig, MavenConfig, PrStatusConfig,
};
use crate::{Command, Output};

/// Dispatches [`Command`]s against the runner environment
///
/// ```ignore
/// use ghactions_core::Environment;
/// use ghactions_executor::{Command, Executor, Output};
///
/// let executor = Executor::new(Environment::from_process());
/// match executor.execute(Command::ConcurrencyDisabler).await? {
///     Output::Admission(a) => println!("{}", a.outcome),
///     _ => unreachable!(),
/// }
/// ```
#[derive(Clone)]
pub struct Executor {
    env: Environment,
    runner: ActionRunner,
    api: Option<Arc<dyn GitHubApi>>,
}

impl std::fmt::Debug for Executor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Executor")
            .field("runner", &self.runner)
            .field("api", &self.api.as_ref().map(|_| "<injected>"))
            .finish()
    }
}

impl Executor {
    /// Executor over an environment snapshot
    pub fn new(env: Environment) -> Self {
        let runner = ActionRunner::from_env(&env);
        Executor {
            env,
            runner,
            api: None,
        }
    }

    /// Use `api` instead of building a REST client
    pub fn with_api(mut self, api: Arc<dyn GitHubApi>) -> Self {
        self.api = Some(api);
        self
    }

    /// Environment snapshot in use
    pub fn env(&self) -> &Environment {
        &self.env
    }

    /// Run one action
    pub async fn execute(&self, command: Command) -> Result<Output> {
        debug!(command = %command, "executing");
        let ctx = GitHubContext::from_env(&self.env)?;

        match command {
            Command::ConcurrencyDisabler => {
                let config = DisablerConfig::from_env(&self.env, &ctx)?;
                let api = self.api(&config.token, &ctx)?;
                concurrency_disabler::run(&config, &ctx, api.as_ref()).await
            }
            Command::AddLabels => {
                let config = AddLabelsConfig::from_env(&self.env, &ctx)?;
                let api = self.api(&config.token, &ctx)?;
                add_labels::run(&config, api.as_ref(), &self.runner).await
            }
            Command::PrStatus => {
                let config = PrStatusConfig::from_env(&self.env, &ctx)?;
                let api = self.api(&config.token, &ctx)?;
                pr_status::run(&config, api.as_ref(), &self.runner).await
            }
            Command::ConventionalCommits => {
                let config = CommitCheckConfig::from_env(&self.env)?;
                let api = self.api(&config.token, &ctx)?;
                conventional_commits::run(&config, &ctx, api.as_ref()).await
            }
            Command::SetupMaven => {
                let config = MavenConfig::from_env(&self.env)?;
                setup_maven::run(&config, &self.runner).await
            }
        }
    }

    fn api(&self, token: &str, ctx: &GitHubContext) -> Result<Arc<dyn GitHubApi>> {
        if let Some(api) = &self.api {
            return Ok(Arc::clone(api));
        }
        ctx.require_repository()?;
        self.runner.set_secret(token);
        Ok(Arc::new(GitHubClient::from_context(token, ctx)?))
    }
}

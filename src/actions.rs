//! Typed entry point for running actions from Rust.
//!
//! [`GhActions`] wraps the [`Executor`] and its [`Command`]/[`Output`]
//! enums with one method per action. Each method:
//!
//! 1. Executes the matching [`Command`]
//! 2. Extracts the typed result from the [`Output`]

use std::sync::Arc;

use ghactions_concurrency::Admission;
use ghactions_core::{Environment, GitHubApi};
use ghactions_executor::{Command, CommitReport, Executor, Output};
use ghactions_toolcache::MavenInstall;
use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// Runs actions against one environment snapshot.
///
/// # Example
///
/// ```ignore
/// use ghactions::prelude::*;
///
/// let actions = GhActions::from_process();
/// let admission = actions.concurrency_disabler().await?;
/// println!("proceeding: {}", admission.outcome);
/// ```
#[derive(Debug, Clone)]
pub struct GhActions {
    executor: Executor,
}

impl GhActions {
    /// Use the environment of the current process.
    pub fn from_process() -> Self {
        Self::builder().env(Environment::from_process()).build()
    }

    /// Create a builder.
    pub fn builder() -> GhActionsBuilder {
        GhActionsBuilder::default()
    }

    /// Get the underlying executor.
    pub fn executor(&self) -> &Executor {
        &self.executor
    }

    /// Wait until older runs of the workflow have finished.
    pub async fn concurrency_disabler(&self) -> Result<Admission> {
        match self.executor.execute(Command::ConcurrencyDisabler).await? {
            Output::Admission(admission) => Ok(admission),
            other => Err(unexpected("admission", &other)),
        }
    }

    /// Add the configured labels; returns the labels now on the issue.
    pub async fn add_labels(&self) -> Result<Vec<String>> {
        match self.executor.execute(Command::AddLabels).await? {
            Output::Labels(labels) => Ok(labels),
            other => Err(unexpected("labels", &other)),
        }
    }

    /// Fetch the pull request and publish its fields.
    pub async fn pr_status(&self) -> Result<Map<String, Value>> {
        match self.executor.execute(Command::PrStatus).await? {
            Output::PullRequest(fields) => Ok(fields),
            other => Err(unexpected("pull request", &other)),
        }
    }

    /// Check commit messages.
    pub async fn conventional_commits(&self) -> Result<CommitReport> {
        match self.executor.execute(Command::ConventionalCommits).await? {
            Output::CommitCheck(report) => Ok(report),
            other => Err(unexpected("commit check", &other)),
        }
    }

    /// Install Maven.
    pub async fn setup_maven(&self) -> Result<MavenInstall> {
        match self.executor.execute(Command::SetupMaven).await? {
            Output::ToolInstalled(install) => Ok(install),
            other => Err(unexpected("tool install", &other)),
        }
    }
}

fn unexpected(expected: &'static str, output: &Output) -> Error {
    let actual = match output {
        Output::Admission(_) => "admission",
        Output::Labels(_) => "labels",
        Output::PullRequest(_) => "pull request",
        Output::CommitCheck(_) => "commit check",
        Output::ToolInstalled(_) => "tool install",
    };
    Error::UnexpectedOutput { expected, actual }
}

/// Builder for [`GhActions`].
#[derive(Default)]
pub struct GhActionsBuilder {
    env: Environment,
    api: Option<Arc<dyn GitHubApi>>,
}

impl GhActionsBuilder {
    /// Environment snapshot to read inputs and context from.
    pub fn env(mut self, env: Environment) -> Self {
        self.env = env;
        self
    }

    /// GitHub API to use instead of the REST client.
    pub fn api(mut self, api: Arc<dyn GitHubApi>) -> Self {
        self.api = Some(api);
        self
    }

    /// Build.
    pub fn build(self) -> GhActions {
        let executor = Executor::new(self.env);
        let executor = match self.api {
            Some(api) => executor.with_api(api),
            None => executor,
        };
        GhActions { executor }
    }
}

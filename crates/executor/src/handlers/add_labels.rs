//! add-labels: label the issue or pull request of the event

use ghactions_core::{ActionRunner, Environment, Error, GitHubApi, GitHubContext, Result};
use tracing::info;

use crate::Output;

/// Inputs of the add-labels action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddLabelsConfig {
    /// API token
    pub token: String,
    /// Labels to add; may be empty
    pub labels: Vec<String>,
    /// Target issue or pull request
    pub issue_number: u64,
}

impl AddLabelsConfig {
    /// Read inputs and context
    pub fn from_env(env: &Environment, ctx: &GitHubContext) -> Result<Self> {
        let token = env
            .input("github_token")
            .or_else(|| env.var("GITHUB_TOKEN"))
            .ok_or_else(|| Error::config("No github token provided"))?
            .to_string();

        let issue_number = match env.input("issue_number") {
            Some(raw) => raw
                .parse::<u64>()
                .map_err(|_| Error::config(format!("invalid issue_number '{}'", raw)))?,
            None => ctx
                .issue_number()
                .ok_or_else(|| Error::config("This is not a PR or commenting is disabled."))?,
        };

        Ok(AddLabelsConfig {
            token,
            labels: parse_labels(env.input("labels").unwrap_or_default()),
            issue_number,
        })
    }
}

/// One label per line, blanks dropped
pub fn parse_labels(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}

/// Handle the AddLabels command.
pub async fn run(
    config: &AddLabelsConfig,
    api: &dyn GitHubApi,
    runner: &ActionRunner,
) -> Result<Output> {
    if !config.labels.is_empty() {
        info!(
            "Adding labels {} to #{}",
            config.labels.join(", "),
            config.issue_number
        );
        api.add_labels(config.issue_number, &config.labels).await?;
    }

    let labels = api.list_labels(config.issue_number).await?;
    runner.set_output("labels", &labels.join(","))?;
    Ok(Output::Labels(labels))
}

//! conventional-commits: check commit messages and PR titles
//!
//! A message is valid when it is a merge or revert commit, or when its
//! header is `type(scope)!: subject` with an allowed type. Scope and `!`
//! are optional.

use ghactions_core::{Environment, Error, GitHubApi, GitHubContext, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{error, info};

use crate::Output;

/// Types accepted when `allowed-commit-types` is not set
pub const DEFAULT_TYPES: &[&str] = &[
    "fix", "feat", "build", "chore", "ci", "docs", "style", "refactor", "revert", "perf", "test",
];

const HELP: &str = "\
Commit messages must follow the Conventional Commits specification:

    <type>[optional scope]: <description>

Examples:
    feat(parser): add ability to parse arrays
    fix: prevent racing of requests

See https://www.conventionalcommits.org/";

static SCOPE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\(\S*?\)").expect("scope pattern is valid"));

/// Inputs of the conventional-commits action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitCheckConfig {
    /// API token
    pub token: String,
    /// Also check every commit of the pull request
    pub full_check: bool,
    /// Accepted commit types
    pub allowed_types: Vec<String>,
}

impl CommitCheckConfig {
    /// Read inputs
    pub fn from_env(env: &Environment) -> Result<Self> {
        let token = env.required_input("github-token")?.to_string();
        let allowed_types = match env.input("allowed-commit-types") {
            Some(raw) => raw
                .split(',')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string)
                .collect(),
            None => DEFAULT_TYPES.iter().map(|t| t.to_string()).collect(),
        };
        Ok(CommitCheckConfig {
            token,
            full_check: env.bool_input("full-check"),
            allowed_types,
        })
    }
}

/// Every message checked, split by verdict
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitReport {
    /// Messages that passed
    pub valid: Vec<String>,
    /// Messages that failed
    pub invalid: Vec<String>,
}

impl CommitReport {
    /// Whether every message passed
    pub fn passed(&self) -> bool {
        self.invalid.is_empty()
    }
}

/// Check one message against the allowed types
pub fn is_valid(message: &str, allowed: &[String]) -> bool {
    if message.starts_with("Merge ") || message.starts_with("Revert ") {
        return true;
    }
    let Some((header, _)) = message.split_once(':') else {
        return false;
    };
    let kind = SCOPE.replace(header, "").replace('!', "");
    allowed.iter().any(|t| *t == kind)
}

/// Check every message, logging a verdict per message
pub fn check(messages: &[String], allowed: &[String]) -> CommitReport {
    let mut report = CommitReport::default();
    for message in messages {
        if is_valid(message, allowed) {
            info!("🟢 {}", message);
            report.valid.push(message.clone());
        } else {
            error!("⛔ {}", message);
            report.invalid.push(message.clone());
        }
    }
    report
}

/// Messages to check for this event
async fn collect_messages(
    config: &CommitCheckConfig,
    ctx: &GitHubContext,
    api: &dyn GitHubApi,
) -> Result<Vec<String>> {
    if !ctx.is_pull_request() {
        return Ok(ctx.push_commit_messages());
    }

    let mut messages = Vec::new();
    if let Some(title) = ctx.pull_request_title() {
        messages.push(title);
    }
    if config.full_check {
        let number = ctx
            .pull_request_number()
            .ok_or_else(|| Error::config("pull request event without a number"))?;
        messages.extend(api.list_pull_request_commits(number).await?);
    }
    Ok(messages)
}

/// Handle the ConventionalCommits command.
pub async fn run(
    config: &CommitCheckConfig,
    ctx: &GitHubContext,
    api: &dyn GitHubApi,
) -> Result<Output> {
    let messages = collect_messages(config, ctx, api).await?;
    let report = check(&messages, &config.allowed_types);
    if !report.passed() {
        return Err(Error::Validation(HELP.to_string()));
    }
    info!("✨ All commit messages follow Conventional Commits");
    Ok(Output::CommitCheck(report))
}

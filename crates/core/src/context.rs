//! Workflow context: repository, run, branch and event payload

use std::path::Path;

use serde_json::Value;
use tracing::debug;

use crate::env::Environment;
use crate::error::{Error, Result};
use crate::types::RunId;

/// Default REST endpoint for github.com
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Branch used when neither `GITHUB_HEAD_REF` nor `GITHUB_REF` is set
pub const DEFAULT_BRANCH: &str = "main";

/// Context of the workflow run invoking the action
#[derive(Debug, Clone)]
pub struct GitHubContext {
    /// Repository owner (user or organization)
    pub owner: String,
    /// Repository name
    pub repo: String,
    /// ID of the invoking run, when provided by the runner
    pub run_id: Option<RunId>,
    /// Branch the run belongs to
    pub branch: String,
    /// REST API base URL without trailing slash
    pub api_url: String,
    /// Name of the triggering event (`push`, `pull_request`, ...)
    pub event_name: Option<String>,
    /// Parsed event payload; `Null` when the runner provided none
    pub payload: Value,
}

impl GitHubContext {
    /// Build the context from the runner environment
    ///
    /// Fails when `GITHUB_RUN_ID` is set but not a number, or when the
    /// event payload file exists but is not valid JSON.
    pub fn from_env(env: &Environment) -> Result<Self> {
        let payload = match env.var("GITHUB_EVENT_PATH") {
            Some(path) if Path::new(path).exists() => {
                let raw = std::fs::read_to_string(path)?;
                serde_json::from_str(&raw)?
            }
            Some(path) => {
                debug!("GITHUB_EVENT_PATH {} does not exist", path);
                Value::Null
            }
            None => Value::Null,
        };

        let (owner, repo) = match env.var("GITHUB_REPOSITORY").and_then(|r| r.split_once('/')) {
            Some((owner, repo)) => (owner.to_string(), repo.to_string()),
            None => (
                str_at(&payload, &["repository", "owner", "login"]).unwrap_or_default(),
                str_at(&payload, &["repository", "name"]).unwrap_or_default(),
            ),
        };

        let run_id = env
            .var("GITHUB_RUN_ID")
            .map(|raw| {
                raw.parse::<RunId>()
                    .map_err(|e| Error::config(format!("invalid GITHUB_RUN_ID '{}': {}", raw, e)))
            })
            .transpose()?;

        Ok(GitHubContext {
            owner,
            repo,
            run_id,
            branch: resolve_branch(env),
            api_url: env
                .var("GITHUB_API_URL")
                .unwrap_or(DEFAULT_API_URL)
                .trim_end_matches('/')
                .to_string(),
            event_name: env.var("GITHUB_EVENT_NAME").map(str::to_string),
            payload,
        })
    }

    /// `owner/repo`
    pub fn repository(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }

    /// Fail unless the repository coordinates are known
    pub fn require_repository(&self) -> Result<()> {
        if self.owner.is_empty() || self.repo.is_empty() {
            return Err(Error::config(
                "repository unknown: set GITHUB_REPOSITORY to owner/repo",
            ));
        }
        Ok(())
    }

    /// Issue or pull-request number of the triggering event
    pub fn issue_number(&self) -> Option<u64> {
        u64_at(&self.payload, &["issue", "number"]).or_else(|| self.pull_request_number())
    }

    /// Pull-request number of the triggering event
    pub fn pull_request_number(&self) -> Option<u64> {
        u64_at(&self.payload, &["pull_request", "number"])
            .or_else(|| u64_at(&self.payload, &["number"]))
    }

    /// Whether the event carries a pull request
    pub fn is_pull_request(&self) -> bool {
        self.payload
            .get("pull_request")
            .map(|pr| pr.is_object())
            .unwrap_or(false)
    }

    /// Title of the pull request in the payload
    pub fn pull_request_title(&self) -> Option<String> {
        str_at(&self.payload, &["pull_request", "title"])
    }

    /// Messages of the commits carried by a push payload
    pub fn push_commit_messages(&self) -> Vec<String> {
        self.payload
            .get("commits")
            .and_then(Value::as_array)
            .map(|commits| {
                commits
                    .iter()
                    .filter_map(|c| c.get("message").and_then(Value::as_str))
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// `GITHUB_HEAD_REF` for pull requests, else `GITHUB_REF` minus its
/// `refs/heads/` or `refs/tags/` prefix, else [`DEFAULT_BRANCH`]
fn resolve_branch(env: &Environment) -> String {
    if let Some(head) = env.var("GITHUB_HEAD_REF") {
        return head.to_string();
    }
    match env.var("GITHUB_REF") {
        Some(r) => r
            .strip_prefix("refs/heads/")
            .or_else(|| r.strip_prefix("refs/tags/"))
            .unwrap_or(r)
            .to_string(),
        None => DEFAULT_BRANCH.to_string(),
    }
}

fn value_at<'a>(value: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter().try_fold(value, |v, key| v.get(*key))
}

fn str_at(value: &Value, path: &[&str]) -> Option<String> {
    value_at(value, path)
        .and_then(Value::as_str)
        .map(str::to_string)
}

fn u64_at(value: &Value, path: &[&str]) -> Option<u64> {
    value_at(value, path).and_then(Value::as_u64)
}

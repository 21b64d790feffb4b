//! Capability traits consumed by the actions
//!
//! Actions never talk to the network directly; they receive one of these
//! capabilities. `ghactions-github` provides the REST implementation and
//! tests provide scripted fakes.

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::error::Result;
use crate::types::{RunId, RunRecord};

/// Source of workflow-run state for the wait queue
#[async_trait]
pub trait RunSource: Send + Sync {
    /// List every workflow run currently known for the repository
    async fn list_runs(&self) -> Result<Vec<RunRecord>>;

    /// Look up the current state of a single run
    async fn run_status(&self, id: RunId) -> Result<RunRecord>;
}

/// Issue and pull-request operations used by the label, PR-status and
/// commit-lint actions
#[async_trait]
pub trait GitHubApi: RunSource {
    /// Fetch a pull request as a raw JSON object
    async fn get_pull_request(&self, number: u64) -> Result<Map<String, Value>>;

    /// Commit messages of a pull request, oldest first
    async fn list_pull_request_commits(&self, number: u64) -> Result<Vec<String>>;

    /// Add labels to an issue or pull request
    async fn add_labels(&self, issue: u64, labels: &[String]) -> Result<()>;

    /// Names of the labels currently set on an issue or pull request
    async fn list_labels(&self, issue: u64) -> Result<Vec<String>>;
}

//! Response payloads of the REST endpoints in use
//!
//! Only the fields the actions read are modelled; serde ignores the rest.

use ghactions_core::{RunId, RunRecord, RunStatus};
use serde::Deserialize;

/// `GET /repos/{owner}/{repo}/actions/runs`
#[derive(Debug, Clone, Deserialize)]
pub struct WorkflowRunList {
    /// Total runs matching, across all pages
    #[serde(default)]
    pub total_count: u64,
    /// Runs on this page
    #[serde(default)]
    pub workflow_runs: Vec<WorkflowRun>,
}

/// One workflow run
#[derive(Debug, Clone, Deserialize)]
pub struct WorkflowRun {
    /// Run ID
    pub id: u64,
    /// Workflow name
    #[serde(default)]
    pub name: Option<String>,
    /// Branch the run was triggered for
    #[serde(default)]
    pub head_branch: Option<String>,
    /// `queued`, `in_progress`, `completed`, ...
    #[serde(default)]
    pub status: Option<String>,
    /// Set once completed: `success`, `failure`, `cancelled`, ...
    #[serde(default)]
    pub conclusion: Option<String>,
    /// Title shown in the UI
    #[serde(default)]
    pub display_title: Option<String>,
}

impl From<WorkflowRun> for RunRecord {
    fn from(run: WorkflowRun) -> Self {
        let display_name = run
            .display_title
            .or(run.name)
            .unwrap_or_else(|| run.id.to_string());
        RunRecord {
            id: RunId::new(run.id),
            branch: run.head_branch.unwrap_or_default(),
            status: run
                .status
                .as_deref()
                .map(RunStatus::parse)
                .unwrap_or(RunStatus::Other),
            display_name,
        }
    }
}

/// Label attached to an issue
#[derive(Debug, Clone, Deserialize)]
pub struct Label {
    /// Label name
    pub name: String,
}

/// Entry of `GET /repos/{owner}/{repo}/pulls/{n}/commits`
#[derive(Debug, Clone, Deserialize)]
pub struct PullRequestCommit {
    /// Git commit data
    pub commit: CommitDetail,
}

/// Git part of a commit entry
#[derive(Debug, Clone, Deserialize)]
pub struct CommitDetail {
    /// Full commit message
    pub message: String,
}

/// Error body returned by the API
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiMessage {
    #[serde(default)]
    pub message: Option<String>,
}

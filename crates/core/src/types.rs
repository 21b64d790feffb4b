//! Core types shared by every action
//!
//! This module defines the workflow-run types the concurrency gate works on:
//! - [`RunId`]: Platform-issued identifier of one workflow run
//! - [`RunStatus`]: Lifecycle status reported by the platform
//! - [`RunRecord`]: One row of a workflow-run listing

use serde::{Deserialize, Serialize};

/// Unique identifier for a workflow run
///
/// Run IDs are issued by GitHub in ascending order, so comparing two IDs
/// orders runs by creation time. That ordering is what the wait queue
/// uses as its FIFO.
///
/// # Examples
///
/// ```
/// use ghactions_core::types::RunId;
///
/// let older = RunId::new(41);
/// let newer = RunId::new(42);
/// assert!(older < newer);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RunId(u64);

impl RunId {
    /// Wrap a raw run number
    pub const fn new(id: u64) -> Self {
        RunId(id)
    }

    /// Raw run number
    pub const fn get(&self) -> u64 {
        self.0
    }
}

impl From<u64> for RunId {
    fn from(id: u64) -> Self {
        RunId(id)
    }
}

impl std::str::FromStr for RunId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<u64>().map(RunId)
    }
}

impl std::fmt::Display for RunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Workflow run status
///
/// GitHub reports more states than the gate cares about; anything that is
/// not explicitly listed deserializes to [`RunStatus::Other`] and counts as
/// still running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    /// Waiting for a runner
    Queued,
    /// Currently executing
    InProgress,
    /// Finished (any conclusion)
    Completed,
    /// Cancelled before completion
    Cancelled,
    /// Finished with a failure
    Failure,
    /// Any other platform status (waiting, requested, pending, ...)
    #[serde(other)]
    Other,
}

impl RunStatus {
    /// Parse a platform status string; unknown values map to `Other`
    pub fn parse(s: &str) -> Self {
        match s {
            "queued" => RunStatus::Queued,
            "in_progress" => RunStatus::InProgress,
            "completed" => RunStatus::Completed,
            "cancelled" => RunStatus::Cancelled,
            "failure" => RunStatus::Failure,
            _ => RunStatus::Other,
        }
    }

    /// Terminal runs no longer hold a place in the wait queue
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            RunStatus::Completed | RunStatus::Cancelled | RunStatus::Failure
        )
    }

    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            RunStatus::Queued => "queued",
            RunStatus::InProgress => "in_progress",
            RunStatus::Completed => "completed",
            RunStatus::Cancelled => "cancelled",
            RunStatus::Failure => "failure",
            RunStatus::Other => "other",
        }
    }
}

impl std::fmt::Display for RunStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One workflow run as seen in a listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunRecord {
    /// Run ID
    pub id: RunId,
    /// Head branch the run was triggered for
    pub branch: String,
    /// Current status
    pub status: RunStatus,
    /// Human readable title (commit message, PR title, ...)
    pub display_name: String,
}

impl RunRecord {
    /// Create a record
    pub fn new(
        id: impl Into<RunId>,
        branch: impl Into<String>,
        status: RunStatus,
        display_name: impl Into<String>,
    ) -> Self {
        RunRecord {
            id: id.into(),
            branch: branch.into(),
            status,
            display_name: display_name.into(),
        }
    }

    /// Whether the run still competes for a turn
    pub fn is_active(&self) -> bool {
        !self.status.is_terminal()
    }
}

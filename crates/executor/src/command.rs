//! Command and Output enums
//!
//! One [`Command`] per action. Handlers return an [`Output`] describing what
//! they did; the CLI only needs to know success or failure, tests inspect
//! the payload.

use ghactions_concurrency::Admission;
use ghactions_toolcache::MavenInstall;
use serde_json::{Map, Value};

use crate::handlers::conventional_commits::CommitReport;

/// Actions the executor can run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Wait for older runs of the workflow to finish
    ConcurrencyDisabler,
    /// Add labels to an issue or pull request
    AddLabels,
    /// Expose pull-request fields as step outputs
    PrStatus,
    /// Check commit messages against Conventional Commits
    ConventionalCommits,
    /// Install Apache Maven through the tool cache
    SetupMaven,
}

impl Command {
    /// Every command, in CLI order
    pub const ALL: [Command; 5] = [
        Command::ConcurrencyDisabler,
        Command::AddLabels,
        Command::PrStatus,
        Command::ConventionalCommits,
        Command::SetupMaven,
    ];

    /// CLI / action name
    pub fn name(&self) -> &'static str {
        match self {
            Command::ConcurrencyDisabler => "concurrency-disabler",
            Command::AddLabels => "add-labels",
            Command::PrStatus => "pr-status",
            Command::ConventionalCommits => "conventional-commits",
            Command::SetupMaven => "setup-maven",
        }
    }

    /// One-line description
    pub fn about(&self) -> &'static str {
        match self {
            Command::ConcurrencyDisabler => "Wait until older runs of this workflow have finished",
            Command::AddLabels => "Add labels to the current issue or pull request",
            Command::PrStatus => "Expose the fields of a pull request as step outputs",
            Command::ConventionalCommits => "Check commit messages follow Conventional Commits",
            Command::SetupMaven => "Install Apache Maven and add it to PATH",
        }
    }

    /// Look up a command by name
    pub fn from_name(name: &str) -> Option<Command> {
        Command::ALL.into_iter().find(|c| c.name() == name)
    }
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Result of a successful command
#[derive(Debug, Clone)]
pub enum Output {
    /// concurrency-disabler: how the run was admitted
    Admission(Admission),
    /// add-labels: labels on the issue afterwards
    Labels(Vec<String>),
    /// pr-status: the pull request fields
    PullRequest(Map<String, Value>),
    /// conventional-commits: every message checked
    CommitCheck(CommitReport),
    /// setup-maven: where Maven lives
    ToolInstalled(MavenInstall),
}

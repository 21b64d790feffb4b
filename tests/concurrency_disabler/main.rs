//! Concurrency Disabler Test Suite
//!
//! End-to-end behaviour of the concurrency gate through the public facade,
//! driven by a scripted GitHub and a paused tokio clock.
//!
//! ## Key Verification Points
//!
//! 1. The head of the queue (or a lone run) proceeds without sleeping
//! 2. Waiting ends when older runs reach a terminal state
//! 3. The max wait bounds the number of polls
//! 4. Replaying a script yields the same position reports
//! 5. A run deleted while waiting leaves the queue
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test --test concurrency_disabler
//! ```

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use async_trait::async_trait;
use ghactions::prelude::*;
use ghactions::ghactions_core::{Error as ActionError, Result as ActionResult};
use parking_lot::Mutex;
use serde_json::{Map, Value};

// Test modules
pub mod admission;
pub mod facade;

// =============================================================================
// SHARED TEST UTILITIES
// =============================================================================

/// GitHub whose run statuses follow a script.
///
/// Each lookup of a run consumes the next scripted status; the last one
/// repeats. Runs without a script keep the status from the listing.
/// Deleted runs stay in the listing but answer 404 on lookup.
#[derive(Default)]
pub struct ScriptedGitHub {
    pub listing: Vec<RunRecord>,
    pub deleted: Vec<RunId>,
    pub fail_listing: bool,
    pub scripts: Mutex<HashMap<RunId, VecDeque<RunStatus>>>,
    pub lookups: Mutex<Vec<RunId>>,
}

impl ScriptedGitHub {
    pub fn new(runs: &[(u64, RunStatus)]) -> Self {
        ScriptedGitHub {
            listing: runs
                .iter()
                .map(|(id, status)| RunRecord::new(*id, "main", *status, format!("CI #{}", id)))
                .collect(),
            ..Default::default()
        }
    }

    pub fn script(self, id: u64, statuses: &[RunStatus]) -> Self {
        self.scripts
            .lock()
            .insert(RunId::new(id), statuses.iter().copied().collect());
        self
    }

    pub fn deleted(mut self, id: u64) -> Self {
        self.deleted.push(RunId::new(id));
        self
    }

    pub fn lookup_count(&self) -> usize {
        self.lookups.lock().len()
    }
}

#[async_trait]
impl RunSource for ScriptedGitHub {
    async fn list_runs(&self) -> ActionResult<Vec<RunRecord>> {
        if self.fail_listing {
            return Err(ActionError::Transport("connection reset".into()));
        }
        Ok(self.listing.clone())
    }

    async fn run_status(&self, id: RunId) -> ActionResult<RunRecord> {
        self.lookups.lock().push(id);
        let listed = self
            .listing
            .iter()
            .filter(|r| !self.deleted.contains(&r.id))
            .find(|r| r.id == id)
            .cloned()
            .ok_or_else(|| ActionError::Api {
                status: 404,
                message: "Not Found".into(),
            })?;
        let mut scripts = self.scripts.lock();
        let status = match scripts.get_mut(&id) {
            Some(seq) if seq.len() > 1 => seq.pop_front(),
            Some(seq) => seq.front().copied(),
            None => None,
        };
        Ok(RunRecord {
            status: status.unwrap_or(listed.status),
            ..listed
        })
    }
}

#[async_trait]
impl GitHubApi for ScriptedGitHub {
    async fn get_pull_request(&self, _number: u64) -> ActionResult<Map<String, Value>> {
        Ok(Map::new())
    }

    async fn list_pull_request_commits(&self, _number: u64) -> ActionResult<Vec<String>> {
        Ok(Vec::new())
    }

    async fn add_labels(&self, _issue: u64, _labels: &[String]) -> ActionResult<()> {
        Ok(())
    }

    async fn list_labels(&self, _issue: u64) -> ActionResult<Vec<String>> {
        Ok(Vec::new())
    }
}

/// Environment of run `run_id` with the given extra inputs.
pub fn runner_env(run_id: u64, inputs: &[(&str, &str)]) -> Environment {
    inputs.iter().fold(
        Environment::default()
            .with_var("GITHUB_REPOSITORY", "octo/hello")
            .with_var("GITHUB_REF", "refs/heads/main")
            .with_var("GITHUB_RUN_ID", run_id.to_string())
            .with_input("github-token", "test-token"),
        |env, (name, value)| env.with_input(name, value.to_string()),
    )
}

/// Facade over a scripted GitHub.
pub fn actions(env: Environment, github: &Arc<ScriptedGitHub>) -> GhActions {
    GhActions::builder().env(env).api(github.clone()).build()
}

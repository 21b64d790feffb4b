//! In-memory GitHub used by the dispatch tests.

use std::collections::HashMap;

use async_trait::async_trait;
use ghactions_core::{Error, GitHubApi, Result, RunId, RunRecord, RunSource, RunStatus};
use parking_lot::Mutex;
use serde_json::{Map, Value};

#[derive(Default)]
pub struct FakeGitHub {
    pub runs: Mutex<Vec<RunRecord>>,
    pub pull_requests: HashMap<u64, Map<String, Value>>,
    pub commits: HashMap<u64, Vec<String>>,
    pub labels: Mutex<HashMap<u64, Vec<String>>>,
    pub fail_listing: bool,
}

impl FakeGitHub {
    pub fn with_runs(runs: &[(u64, &str, RunStatus)]) -> Self {
        FakeGitHub {
            runs: Mutex::new(
                runs.iter()
                    .map(|(id, branch, status)| {
                        RunRecord::new(*id, *branch, *status, format!("CI #{}", id))
                    })
                    .collect(),
            ),
            ..Default::default()
        }
    }

    /// Change the status reported for a run
    pub fn set_status(&self, id: u64, status: RunStatus) {
        for run in self.runs.lock().iter_mut() {
            if run.id == RunId::new(id) {
                run.status = status;
            }
        }
    }
}

fn not_found() -> Error {
    Error::Api {
        status: 404,
        message: "Not Found".into(),
    }
}

#[async_trait]
impl RunSource for FakeGitHub {
    async fn list_runs(&self) -> Result<Vec<RunRecord>> {
        if self.fail_listing {
            return Err(Error::Api {
                status: 401,
                message: "Bad credentials".into(),
            });
        }
        Ok(self.runs.lock().clone())
    }

    async fn run_status(&self, id: RunId) -> Result<RunRecord> {
        self.runs
            .lock()
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or_else(not_found)
    }
}

#[async_trait]
impl GitHubApi for FakeGitHub {
    async fn get_pull_request(&self, number: u64) -> Result<Map<String, Value>> {
        self.pull_requests.get(&number).cloned().ok_or_else(not_found)
    }

    async fn list_pull_request_commits(&self, number: u64) -> Result<Vec<String>> {
        Ok(self.commits.get(&number).cloned().unwrap_or_default())
    }

    async fn add_labels(&self, issue: u64, labels: &[String]) -> Result<()> {
        let mut all = self.labels.lock();
        let current = all.entry(issue).or_default();
        for label in labels {
            if !current.contains(label) {
                current.push(label.clone());
            }
        }
        Ok(())
    }

    async fn list_labels(&self, issue: u64) -> Result<Vec<String>> {
        Ok(self.labels.lock().get(&issue).cloned().unwrap_or_default())
    }
}

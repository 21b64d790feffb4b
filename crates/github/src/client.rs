//! REST client for the repository the action runs in
//!
//! Every call is scoped to one `owner/repo`. Non-success responses become
//! [`GitHubError::Api`] carrying the `message` field of the error body.

use std::time::Duration;

use async_trait::async_trait;
use ghactions_core::{GitHubApi, GitHubContext, RunId, RunRecord, RunSource};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::{json, Map, Value};
use tracing::debug;

use crate::error::{GitHubError, Result};
use crate::models::{ApiMessage, Label, PullRequestCommit, WorkflowRun, WorkflowRunList};

/// Media type requested from the API
pub const ACCEPT_JSON: &str = "application/vnd.github+json";

/// REST API version pinned by the client
pub const API_VERSION: &str = "2022-11-28";

/// Runs requested per page when listing
pub const RUNS_PER_PAGE: usize = 100;

/// Upper bound on listing pages
pub const MAX_RUN_PAGES: usize = 10;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const USER_AGENT: &str = concat!("ghactions/", env!("CARGO_PKG_VERSION"));

/// GitHub REST client bound to one repository
#[derive(Debug, Clone)]
pub struct GitHubClient {
    http: reqwest::Client,
    api_url: String,
    owner: String,
    repo: String,
}

impl GitHubClient {
    /// Create a client
    ///
    /// # Arguments
    /// * `token` - token sent as `Authorization: Bearer`
    /// * `api_url` - REST base URL, e.g. `https://api.github.com`
    /// * `owner` / `repo` - repository every call is scoped to
    pub fn new(
        token: &str,
        api_url: impl Into<String>,
        owner: impl Into<String>,
        repo: impl Into<String>,
    ) -> Result<Self> {
        let http = reqwest::Client::builder()
            .default_headers(default_headers(token)?)
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(GitHubClient {
            http,
            api_url: api_url.into().trim_end_matches('/').to_string(),
            owner: owner.into(),
            repo: repo.into(),
        })
    }

    /// Create a client for the repository of the workflow context
    pub fn from_context(token: &str, ctx: &GitHubContext) -> Result<Self> {
        Self::new(token, ctx.api_url.clone(), ctx.owner.clone(), ctx.repo.clone())
    }

    /// `{api_url}/repos/{owner}/{repo}{path}`
    pub fn repo_url(&self, path: &str) -> String {
        format!("{}/repos/{}/{}{}", self.api_url, self.owner, self.repo, path)
    }

    /// All workflow runs of the repository, newest first
    pub async fn workflow_runs(&self) -> Result<Vec<WorkflowRun>> {
        let url = self.repo_url("/actions/runs");
        let mut runs = Vec::new();
        for page in 1..=MAX_RUN_PAGES {
            let response = self
                .http
                .get(&url)
                .query(&[("per_page", RUNS_PER_PAGE), ("page", page)])
                .send()
                .await?;
            let list: WorkflowRunList = json_body(response).await?;
            let received = list.workflow_runs.len();
            runs.extend(list.workflow_runs);
            debug!(page, received, total = list.total_count, "listed workflow runs");
            if received < RUNS_PER_PAGE || runs.len() as u64 >= list.total_count {
                break;
            }
        }
        Ok(runs)
    }

    /// One workflow run
    pub async fn workflow_run(&self, id: RunId) -> Result<WorkflowRun> {
        self.get_json(&self.repo_url(&format!("/actions/runs/{}", id)))
            .await
    }

    /// A pull request as a raw JSON object
    pub async fn pull_request(&self, number: u64) -> Result<Map<String, Value>> {
        self.get_json(&self.repo_url(&format!("/pulls/{}", number)))
            .await
    }

    /// Commits of a pull request
    pub async fn pull_request_commits(&self, number: u64) -> Result<Vec<PullRequestCommit>> {
        self.get_json(&self.repo_url(&format!("/pulls/{}/commits", number)))
            .await
    }

    /// Add labels to an issue; returns the issue's labels afterwards
    pub async fn add_issue_labels(&self, issue: u64, labels: &[String]) -> Result<Vec<Label>> {
        let url = self.repo_url(&format!("/issues/{}/labels", issue));
        debug!("Request: POST {} {:?}", url, labels);
        let response = self
            .http
            .post(&url)
            .json(&json!({ "labels": labels }))
            .send()
            .await?;
        json_body(response).await
    }

    /// Labels currently set on an issue
    pub async fn issue_labels(&self, issue: u64) -> Result<Vec<Label>> {
        self.get_json(&self.repo_url(&format!("/issues/{}/labels", issue)))
            .await
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        debug!("Request: GET {}", url);
        let response = self.http.get(url).send().await?;
        json_body(response).await
    }
}

fn default_headers(token: &str) -> Result<HeaderMap> {
    let mut auth = HeaderValue::from_str(&format!("Bearer {}", token))
        .map_err(|e| GitHubError::InvalidToken(e.to_string()))?;
    auth.set_sensitive(true);

    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, auth);
    headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_JSON));
    headers.insert("X-GitHub-Api-Version", HeaderValue::from_static(API_VERSION));
    Ok(headers)
}

async fn json_body<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json().await?);
    }
    let body = response.text().await.unwrap_or_default();
    Err(GitHubError::Api {
        status: status.as_u16(),
        message: error_message(status, &body),
    })
}

/// `message` of a JSON error body, else the status reason
fn error_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<ApiMessage>(body)
        .ok()
        .and_then(|m| m.message)
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("unexpected status")
                .to_string()
        })
}

#[async_trait]
impl RunSource for GitHubClient {
    async fn list_runs(&self) -> ghactions_core::Result<Vec<RunRecord>> {
        let runs = self.workflow_runs().await?;
        Ok(runs.into_iter().map(RunRecord::from).collect())
    }

    async fn run_status(&self, id: RunId) -> ghactions_core::Result<RunRecord> {
        Ok(self.workflow_run(id).await?.into())
    }
}

#[async_trait]
impl GitHubApi for GitHubClient {
    async fn get_pull_request(&self, number: u64) -> ghactions_core::Result<Map<String, Value>> {
        Ok(self.pull_request(number).await?)
    }

    async fn list_pull_request_commits(&self, number: u64) -> ghactions_core::Result<Vec<String>> {
        let commits = self.pull_request_commits(number).await?;
        Ok(commits.into_iter().map(|c| c.commit.message).collect())
    }

    async fn add_labels(&self, issue: u64, labels: &[String]) -> ghactions_core::Result<()> {
        self.add_issue_labels(issue, labels).await?;
        Ok(())
    }

    async fn list_labels(&self, issue: u64) -> ghactions_core::Result<Vec<String>> {
        let labels = self.issue_labels(issue).await?;
        Ok(labels.into_iter().map(|l| l.name).collect())
    }
}

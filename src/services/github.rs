use crate::config::Config;
use crate::models::{CreatedIssue, IssueRequest};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value as JsonValue;

const USER_AGENT: &str = concat!("tag_watch/", env!("CARGO_PKG_VERSION"));
const GITHUB_API_VERSION: &str = "2022-11-28";

/// Files issues on a repository. One call, one issue, no retries.
#[async_trait]
pub trait IssueCreator: Send + Sync {
    async fn create_issue(&self, request: &IssueRequest) -> Result<CreatedIssue, GitHubError>;
}

#[derive(Clone)]
pub struct GitHubClient {
    http: reqwest::Client,
    api_url: String,
    token: String,
}

impl GitHubClient {
    pub fn new(config: &Config) -> Result<Self, GitHubError> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            http,
            api_url: config.github_api_url.clone(),
            token: config.github_token.clone(),
        })
    }

    fn issues_url(&self, owner: &str, repo: &str) -> String {
        format!("{}/repos/{owner}/{repo}/issues", self.api_url)
    }
}

#[async_trait]
impl IssueCreator for GitHubClient {
    async fn create_issue(&self, request: &IssueRequest) -> Result<CreatedIssue, GitHubError> {
        let url = self.issues_url(&request.owner, &request.repo);

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.token)
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", GITHUB_API_VERSION)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<JsonValue>(&text)
                .ok()
                .and_then(|v| v["message"].as_str().map(|s| s.to_string()))
                .unwrap_or(text);

            return Err(GitHubError::Api { status, message });
        }

        let issue: CreatedIssue = response
            .json()
            .await
            .map_err(|e| GitHubError::InvalidResponse(e.to_string()))?;

        log::info!(
            "Issue #{} created successfully in {}/{}: {}",
            issue.number,
            request.owner,
            request.repo,
            issue.html_url
        );

        Ok(issue)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum GitHubError {
    #[error("GitHub API request timed out")]
    Timeout,
    #[error("GitHub API request failed: {0}")]
    Request(reqwest::Error),
    #[error("GitHub API returned {status}: {message}")]
    Api { status: StatusCode, message: String },
    #[error("Unexpected GitHub API response: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for GitHubError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            GitHubError::Timeout
        } else {
            GitHubError::Request(e)
        }
    }
}

use crate::github::error::{FetchError, PostError};
use crate::github::issues::{self, Issue};
use anyhow::Context;
use reqwest::StatusCode;
use serde::Serialize;

const USER_AGENT: &str = "issue-followup";
const ACCEPT: &str = "application/vnd.github+json";

/// Request body for `POST /repos/{owner}/{repo}/issues/{number}/comments`
#[derive(Serialize, Debug)]
struct CommentRequest<'a> {
    body: &'a str,
}

/// Minimal GitHub REST client covering the two issue operations the bot needs
pub struct GitHubClient {
    client: reqwest::Client,
    base_url: String,
    /// Sent even when empty so a missing token fails on the first call
    token: String,
}

impl GitHubClient {
    pub fn new(base_url: &str, token: Option<&str>) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .build()
            .context("Failed to create HTTP client")?;
        if token.is_none() {
            tracing::warn!("GITHUB_TOKEN not set, GitHub will reject the empty token");
        }
        Ok(GitHubClient {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.unwrap_or_default().to_string(),
        })
    }

    fn issue_url(&self, owner: &str, repo: &str, number: u64) -> String {
        format!("{}/repos/{}/{}/issues/{}", self.base_url, owner, repo, number)
    }

    fn request(&self, method: reqwest::Method, url: &str) -> reqwest::RequestBuilder {
        self.client
            .request(method, url)
            .header("Accept", ACCEPT)
            .header("User-Agent", USER_AGENT)
            .bearer_auth(&self.token)
    }

    /// Fetches the title and body of an issue.
    pub async fn get_issue(&self, owner: &str, repo: &str, number: u64) -> Result<Issue, FetchError> {
        let url = self.issue_url(owner, repo, number);
        tracing::debug!(%url, "fetching issue");

        let response = self
            .request(reqwest::Method::GET, &url)
            .send()
            .await
            .map_err(FetchError::Network)?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound {
                owner: owner.to_string(),
                repo: repo.to_string(),
                number,
            });
        }
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(FetchError::Unauthorized(status));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Api { status, body });
        }

        let issue_json = response
            .json::<serde_json::Value>()
            .await
            .map_err(|e| FetchError::InvalidResponse(e.to_string()))?;
        issues::parse_issue(&issue_json)
    }

    /// Creates a new comment on an issue.
    pub async fn create_comment(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        body: &str,
    ) -> Result<(), PostError> {
        let url = format!("{}/comments", self.issue_url(owner, repo, number));
        tracing::debug!(%url, "posting comment");

        let response = self
            .request(reqwest::Method::POST, &url)
            .json(&CommentRequest { body })
            .send()
            .await
            .map_err(PostError::Network)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PostError::Api { status, body });
        }
        Ok(())
    }
}

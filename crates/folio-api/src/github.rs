use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error};

pub const GITHUB_API_BASE: &str = "https://api.github.com";

/// Per-request bound; the API itself never times out on its own.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Error, Debug)]
pub enum GitHubError {
    #[error("API request failed: {0}")]
    RequestFailed(String),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Account not found: {0}")]
    NotFound(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("JSON parsing failed: {0}")]
    ParseError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GitHubError>;

/// Anonymous client for the public repository listing endpoint.
pub struct GitHubClient {
    client: reqwest::Client,
    base_url: String,
}

impl GitHubClient {
    pub fn new() -> Result<Self> {
        Self::with_base_url(GITHUB_API_BASE.to_string(), DEFAULT_TIMEOUT_SECS)
    }

    /// For GitHub Enterprise or testing against a mock server
    pub fn with_base_url(base_url: String, timeout_secs: u64) -> Result<Self> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::USER_AGENT,
            reqwest::header::HeaderValue::from_static("folio/0.1.0"),
        );
        headers.insert(
            reqwest::header::ACCEPT,
            reqwest::header::HeaderValue::from_static("application/vnd.github+json"),
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// List an account's public repositories, most recently updated first
    pub async fn list_user_repos(&self, account: &str, per_page: u32) -> Result<Vec<GitHubRepo>> {
        let url = format!("{}/users/{}/repos", self.base_url, account);
        debug!("Listing repositories for {} (per_page={})", account, per_page);

        let response = self
            .client
            .get(&url)
            .query(&[("sort", "updated"), ("per_page", &per_page.to_string())])
            .send()
            .await?;

        let status = response.status();

        if status == 404 {
            return Err(GitHubError::NotFound(account.to_string()));
        }

        // GitHub answers an exhausted anonymous quota with 403
        if status == 403 || status == 429 {
            return Err(GitHubError::RateLimitExceeded);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("GitHub API error for {}: {} - {}", account, status, body);
            return Err(GitHubError::RequestFailed(format!(
                "Status {}: {}",
                status, body
            )));
        }

        let body = response.text().await?;
        let repos: Vec<GitHubRepo> = serde_json::from_str(&body)?;
        debug!("Got {} repositories for {}", repos.len(), account);
        Ok(repos)
    }
}

/// Repository as returned by `GET /users/{account}/repos`.
///
/// Only the fields folio reads are modelled; serde ignores the rest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubRepo {
    pub id: u64,
    pub name: String,
    pub description: Option<String>,
    pub language: Option<String>,
    #[serde(default)]
    pub topics: Option<Vec<String>>,
    #[serde(default)]
    pub fork: bool,
    #[serde(default)]
    pub stargazers_count: u32,
    pub html_url: String,
    pub homepage: Option<String>,
    /// Kept as the raw ISO-8601 string; parsed during normalization
    pub updated_at: String,
    pub owner: GitHubOwner,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubOwner {
    pub login: String,
}

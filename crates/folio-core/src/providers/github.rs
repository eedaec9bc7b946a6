// GitHub source - bridges the API client with the RepositorySource trait
use async_trait::async_trait;
use folio_api::{GitHubClient, GitHubRepo};

use crate::{aggregator::RepositorySource, config::GitHubConfig, Error, Result};

/// Wrapper around GitHubClient that implements RepositorySource
pub struct GitHubSource {
    client: GitHubClient,
}

impl GitHubSource {
    pub fn new(client: GitHubClient) -> Self {
        Self { client }
    }

    pub fn from_config(config: &GitHubConfig) -> Result<Self> {
        let client = GitHubClient::with_base_url(config.api_url.clone(), config.timeout_secs)
            .map_err(|e| Error::ApiError(e.to_string()))?;
        Ok(Self::new(client))
    }
}

#[async_trait]
impl RepositorySource for GitHubSource {
    async fn list_repositories(&self, account: &str, page_size: u32) -> Result<Vec<GitHubRepo>> {
        self.client
            .list_user_repos(account, page_size)
            .await
            .map_err(|e| Error::ApiError(e.to_string()))
    }
}

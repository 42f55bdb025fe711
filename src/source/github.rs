//! GitHub contents-API client

use reqwest::header;
use std::time::Duration;

use super::{ContentSource, RemoteFile, SourceError};
use crate::config::ContentConfig;

const GITHUB_API: &str = "https://api.github.com";

/// Identifying marker on every outbound request; anonymous clients get
/// rejected by the API.
const USER_AGENT: &str = concat!("pressroom/", env!("CARGO_PKG_VERSION"));

/// Client for a repository of Markdown posts hosted on GitHub
pub struct GithubClient {
    http: reqwest::Client,
    api_base: String,
    repo: String,
    branch: Option<String>,
    dir: String,
}

impl GithubClient {
    /// Create a client for the configured repository
    pub fn new(config: &ContentConfig) -> Result<Self, SourceError> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.request_timeout))
            .build()?;

        Ok(Self {
            http,
            api_base: GITHUB_API.to_string(),
            repo: config.repo.clone(),
            branch: config.branch.clone(),
            dir: config.dir.trim_matches('/').to_string(),
        })
    }

    /// Point the client at a different API host (for testing)
    pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = base.into();
        self
    }

    fn listing_url(&self) -> String {
        format!("{}/repos/{}/contents/{}", self.api_base, self.repo, self.dir)
    }
}

impl ContentSource for GithubClient {
    async fn list_files(&self) -> Result<Vec<RemoteFile>, SourceError> {
        let url = self.listing_url();
        let mut request = self
            .http
            .get(&url)
            .header(header::ACCEPT, "application/vnd.github+json");
        if let Some(branch) = &self.branch {
            request = request.query(&[("ref", branch)]);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status { status, url });
        }

        Ok(response.json().await?)
    }

    async fn fetch_body(&self, download_url: &str) -> Result<String, SourceError> {
        let response = self.http.get(download_url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status {
                status,
                url: download_url.to_string(),
            });
        }

        Ok(response.text().await?)
    }
}

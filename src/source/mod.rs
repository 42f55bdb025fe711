//! Remote content source access

mod github;

pub use github::GithubClient;

use serde::Deserialize;
use std::future::Future;
use thiserror::Error;

/// One entry of the content source listing
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteFile {
    /// Filename, the stable identifier of the document
    pub name: String,

    /// Content hash, compared for equality only
    pub sha: String,

    /// Raw-content URL; absent for directory entries
    pub download_url: Option<String>,

    /// Canonical browser link to the document
    pub html_url: String,
}

/// Failure reaching the content source
///
/// A listing failure means "no new information", never "the source is
/// empty"; callers degrade to whatever they already have.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("request to content source failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("content source returned {status} for {url}")]
    Status {
        status: reqwest::StatusCode,
        url: String,
    },
}

/// Read access to the remote repository of posts
///
/// No retries at this layer; the next scheduled refresh is the retry.
pub trait ContentSource: Send + Sync {
    /// List the files currently present at the source.
    fn list_files(&self) -> impl Future<Output = Result<Vec<RemoteFile>, SourceError>> + Send;

    /// Download the raw text of one file.
    fn fetch_body(
        &self,
        download_url: &str,
    ) -> impl Future<Output = Result<String, SourceError>> + Send;
}

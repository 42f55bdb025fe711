//! In-memory cache of insights posts, synchronized from the content source
//!
//! The cache refreshes itself at most once per `refresh_interval` and
//! compares content fingerprints against the source listing so unchanged
//! files are never downloaded twice. Every transport failure degrades to
//! serving whatever is already cached; readers never see an error from a
//! refresh.

use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::{Mutex, RwLock};
use tokio::time::Instant;

use crate::config::SiteConfig;
use crate::content::{
    excerpt_from_body, title_from_filename, FrontMatter, MarkdownRenderer, Post,
    DEFAULT_CATEGORY, UNKNOWN_DATE,
};
use crate::source::{ContentSource, RemoteFile};

/// Lookup outcome for a single post
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LookupError {
    /// The requested name could escape the content namespace
    #[error("invalid post name")]
    InvalidKey,

    /// No cached post under that name after a refresh attempt
    #[error("no such post")]
    NotFound,
}

struct CacheState {
    posts: HashMap<String, Post>,
    /// Time of the most recent listing attempt, success or failure.
    /// Updated once per attempt, never per file fetch.
    last_checked: Option<Instant>,
}

/// Post cache with incremental synchronization
pub struct PostCache<S> {
    source: S,
    state: RwLock<CacheState>,
    /// Single-slot gate so concurrent requests in one refresh window
    /// observe the same refresh instead of issuing duplicate listings.
    refresh_gate: Mutex<()>,
    refresh_interval: Duration,
    renderer: MarkdownRenderer,
    default_author: String,
    excerpt_length: usize,
}

impl<S: ContentSource> PostCache<S> {
    /// Create an empty cache over the given content source
    pub fn new(source: S, config: &SiteConfig) -> Self {
        Self {
            source,
            state: RwLock::new(CacheState {
                posts: HashMap::new(),
                last_checked: None,
            }),
            refresh_gate: Mutex::new(()),
            refresh_interval: Duration::from_secs(config.content.refresh_interval),
            renderer: MarkdownRenderer::new(),
            default_author: config.author.clone(),
            excerpt_length: config.content.excerpt_length,
        }
    }

    /// Current posts, newest declared date first
    ///
    /// Triggers a refresh when one is due; a failed refresh is silent and
    /// the previous snapshot is returned unchanged. Ordering is plain
    /// string comparison on the declared date, so posts carrying the
    /// unknown-date sentinel sort wherever that comparison puts them.
    pub async fn snapshot(&self) -> Vec<Post> {
        self.refresh_if_due().await;

        let state = self.state.read().await;
        let mut posts: Vec<Post> = state.posts.values().cloned().collect();
        posts.sort_by(|a, b| b.date.cmp(&a.date));
        posts
    }

    /// Look up a single post by filename
    ///
    /// The name is rejected before any lookup or network call if it could
    /// climb out of the content namespace; collaborators also use these
    /// keys as file-serving paths.
    pub async fn get(&self, filename: &str) -> Result<Post, LookupError> {
        if !is_safe_key(filename) {
            return Err(LookupError::InvalidKey);
        }

        self.refresh_if_due().await;

        let state = self.state.read().await;
        state
            .posts
            .get(filename)
            .cloned()
            .ok_or(LookupError::NotFound)
    }

    /// Refresh the cache from the source when the listing check is due
    async fn refresh_if_due(&self) {
        if !self.is_due().await {
            return;
        }

        let _gate = self.refresh_gate.lock().await;
        // Another request may have finished the refresh while we waited.
        if !self.is_due().await {
            return;
        }

        let listing = self.source.list_files().await;

        // The attempt counts against the interval whether it succeeded or
        // not, so a failing source is not hammered on every request.
        self.state.write().await.last_checked = Some(Instant::now());

        let listing = match listing {
            Ok(listing) => listing,
            Err(err) => {
                tracing::warn!("content listing failed: {}", err);
                return;
            }
        };

        let known: HashMap<String, String> = {
            let state = self.state.read().await;
            state
                .posts
                .iter()
                .map(|(name, post)| (name.clone(), post.fingerprint.clone()))
                .collect()
        };

        for entry in listing.into_iter().filter(is_content_file) {
            if known.get(&entry.name).map(String::as_str) == Some(entry.sha.as_str()) {
                continue;
            }
            let Some(download_url) = entry.download_url.as_deref() else {
                continue;
            };

            let raw = match self.source.fetch_body(download_url).await {
                Ok(raw) => raw,
                Err(err) => {
                    // Skip this entry only; any prior cached version stays.
                    tracing::warn!(file = %entry.name, "fetch failed: {}", err);
                    continue;
                }
            };

            match self.build_post(&entry, &raw) {
                Ok(post) => {
                    self.state.write().await.posts.insert(entry.name.clone(), post);
                }
                Err(err) => {
                    tracing::warn!(file = %entry.name, "render failed: {}", err);
                }
            }
        }
    }

    async fn is_due(&self) -> bool {
        let state = self.state.read().await;
        state.posts.is_empty()
            || state
                .last_checked
                .map_or(true, |checked| checked.elapsed() >= self.refresh_interval)
    }

    /// Assemble a post from a fetched document, defaulting absent metadata
    fn build_post(&self, entry: &RemoteFile, raw: &str) -> anyhow::Result<Post> {
        let (fm, body) = FrontMatter::parse(raw);
        let content = self.renderer.render(body)?;

        Ok(Post {
            filename: entry.name.clone(),
            fingerprint: entry.sha.clone(),
            title: fm.title.unwrap_or_else(|| title_from_filename(&entry.name)),
            date: fm.date.unwrap_or_else(|| UNKNOWN_DATE.to_string()),
            category: fm.category.unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
            author: fm.author.unwrap_or_else(|| self.default_author.clone()),
            excerpt: fm
                .excerpt
                .unwrap_or_else(|| excerpt_from_body(body, self.excerpt_length)),
            content,
            source_url: entry.html_url.clone(),
        })
    }
}

/// Listing filter: Markdown files only, the repository README excluded
fn is_content_file(entry: &RemoteFile) -> bool {
    let name = entry.name.to_ascii_lowercase();
    name.ends_with(".md") && name != "readme.md"
}

/// A post key doubles as a path for collaborators, so parent-path segments
/// and absolute prefixes are rejected outright.
fn is_safe_key(name: &str) -> bool {
    if name.is_empty() || name.starts_with('/') || name.starts_with('\\') {
        return false;
    }
    !name.split(['/', '\\']).any(|segment| segment == "..")
}

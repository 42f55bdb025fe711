//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub author: String,
    pub url: String,

    // Insights content source
    pub content: ContentConfig,

    // HTTP server
    pub server: ServerConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Cyberburgs".to_string(),
            description: "Enterprise engineering, straight talk.".to_string(),
            author: "Cyberburgs Team".to_string(),
            url: "https://cyberburgs.com".to_string(),
            content: ContentConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }
}

/// Remote repository the insights posts are pulled from
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    /// Repository in `owner/repo` form
    pub repo: String,

    /// Branch to read from (repository default when unset)
    pub branch: Option<String>,

    /// Directory inside the repository holding the posts ("" = root)
    pub dir: String,

    /// Seconds between listing checks against the repository
    pub refresh_interval: u64,

    /// Per-request timeout in seconds
    pub request_timeout: u64,

    /// Characters of body used for a generated excerpt
    pub excerpt_length: usize,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            repo: "cyberburgs/insights".to_string(),
            branch: None,
            dir: String::new(),
            refresh_interval: 60,
            request_timeout: 10,
            excerpt_length: 150,
        }
    }
}

/// Listener configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1".to_string(),
            port: 8000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SiteConfig::default();
        assert_eq!(config.content.refresh_interval, 60);
        assert_eq!(config.content.excerpt_length, 150);
        assert_eq!(config.server.port, 8000);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config: SiteConfig = serde_yaml::from_str(
            r#"
title: Example
content:
  repo: example/posts
  branch: main
"#,
        )
        .unwrap();
        assert_eq!(config.title, "Example");
        assert_eq!(config.content.repo, "example/posts");
        assert_eq!(config.content.branch.as_deref(), Some("main"));
        assert_eq!(config.content.refresh_interval, 60);
        assert_eq!(config.server.bind, "127.0.0.1");
    }
}

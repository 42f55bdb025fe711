//! Cached insights post model

use serde::Serialize;

/// Sentinel for posts whose front matter declares no date.
///
/// It takes part in the same string ordering as real dates; posts carrying
/// it sort wherever plain comparison puts them.
pub const UNKNOWN_DATE: &str = "Unknown date";

/// Default category when the front matter declares none.
pub const DEFAULT_CATEGORY: &str = "General";

/// One cached insights post
///
/// `fingerprint` is the content hash reported by the source listing; for a
/// given `filename` it uniquely determines every other field.
#[derive(Debug, Clone, Serialize)]
pub struct Post {
    /// Source filename, the cache key
    pub filename: String,

    /// Opaque content hash from the source listing
    pub fingerprint: String,

    /// Post title
    pub title: String,

    /// Declared date, kept as the raw front-matter string
    pub date: String,

    /// Category label
    pub category: String,

    /// Author name
    pub author: String,

    /// Short teaser shown on the index page
    pub excerpt: String,

    /// Rendered HTML body
    pub content: String,

    /// Canonical link to the document at the source
    pub source_url: String,
}

/// Title fallback: the filename with its extension stripped.
pub fn title_from_filename(filename: &str) -> String {
    match filename.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem.to_string(),
        _ => filename.to_string(),
    }
}

/// Excerpt fallback: the first `length` characters of the body plus an
/// ellipsis. Truncation is by characters, not bytes.
pub fn excerpt_from_body(body: &str, length: usize) -> String {
    let body = body.trim_start();
    if body.chars().count() <= length {
        return body.to_string();
    }
    let truncated: String = body.chars().take(length).collect();
    format!("{}…", truncated.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_from_filename() {
        assert_eq!(title_from_filename("zero-trust.md"), "zero-trust");
        assert_eq!(title_from_filename("no-extension"), "no-extension");
        assert_eq!(title_from_filename(".hidden"), ".hidden");
    }

    #[test]
    fn test_excerpt_short_body_kept_whole() {
        assert_eq!(excerpt_from_body("short body", 150), "short body");
    }

    #[test]
    fn test_excerpt_truncated_with_ellipsis() {
        let body = "a".repeat(200);
        let excerpt = excerpt_from_body(&body, 150);
        assert_eq!(excerpt.chars().count(), 151);
        assert!(excerpt.ends_with('…'));
    }

    #[test]
    fn test_excerpt_counts_characters_not_bytes() {
        let body = "é".repeat(10);
        assert_eq!(excerpt_from_body(&body, 4), format!("{}…", "é".repeat(4)));
    }
}

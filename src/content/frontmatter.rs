//! Front-matter parsing

use std::collections::HashMap;

/// Front-matter data from an insights post
///
/// A document may open with a `---` line, a block of `key: value` lines and
/// a closing `---` line. Recognized keys land in typed fields; everything
/// else is kept in `extra`. Duplicate keys: last occurrence wins.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrontMatter {
    pub title: Option<String>,
    pub date: Option<String>,
    pub category: Option<String>,
    pub author: Option<String>,
    pub excerpt: Option<String>,

    /// Additional custom fields
    pub extra: HashMap<String, String>,
}

impl FrontMatter {
    /// Parse front-matter from content string
    ///
    /// Returns `(front_matter, body)`. A document without a leading
    /// delimiter, or with an unclosed block, yields empty front matter and
    /// the whole input as the body. This never fails; the worst case is
    /// that no metadata is extracted.
    pub fn parse(input: &str) -> (Self, &str) {
        let Some(after_open) = strip_delimiter_line(input) else {
            return (Self::default(), input);
        };

        // Find the closing delimiter line, tracking the byte offset so the
        // body can be returned as a slice of the original input.
        let mut offset = 0;
        let mut close = None;
        for line in after_open.split_inclusive('\n') {
            if is_delimiter_line(line) {
                close = Some((offset, offset + line.len()));
                break;
            }
            offset += line.len();
        }

        let Some((block_end, body_start)) = close else {
            return (Self::default(), input);
        };

        let mut fm = Self::default();
        for line in after_open[..block_end].lines() {
            // Lines without a separator are ignored, not an error.
            if let Some((key, value)) = line.split_once(':') {
                fm.set(key.trim(), value.trim());
            }
        }

        let body = after_open[body_start..].trim_start_matches(['\r', '\n']);
        (fm, body)
    }

    fn set(&mut self, key: &str, value: &str) {
        match key {
            "title" => self.title = Some(value.to_string()),
            "date" => self.date = Some(value.to_string()),
            "category" => self.category = Some(value.to_string()),
            "author" => self.author = Some(value.to_string()),
            "excerpt" => self.excerpt = Some(value.to_string()),
            _ => {
                self.extra.insert(key.to_string(), value.to_string());
            }
        }
    }
}

/// Strip the opening delimiter if `input` starts with a `---` line.
fn strip_delimiter_line(input: &str) -> Option<&str> {
    let (first, rest) = input.split_once('\n')?;
    is_delimiter_line(first).then_some(rest)
}

fn is_delimiter_line(line: &str) -> bool {
    line.trim_end() == "---"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_frontmatter() {
        let content = "---\ntitle: Hello\ndate: 2024-01-01\n---\nBody text";
        let (fm, body) = FrontMatter::parse(content);
        assert_eq!(fm.title.as_deref(), Some("Hello"));
        assert_eq!(fm.date.as_deref(), Some("2024-01-01"));
        assert_eq!(body, "Body text");
    }

    #[test]
    fn test_no_leading_delimiter() {
        let content = "Just a document\nwith no metadata block.";
        let (fm, body) = FrontMatter::parse(content);
        assert_eq!(fm, FrontMatter::default());
        assert_eq!(body, content);
    }

    #[test]
    fn test_unclosed_block_treated_as_body() {
        let content = "---\ntitle: Dangling\nno closing line here";
        let (fm, body) = FrontMatter::parse(content);
        assert_eq!(fm, FrontMatter::default());
        assert_eq!(body, content);
    }

    #[test]
    fn test_keys_and_values_are_trimmed() {
        let content = "---\n  title :   Spaced Out  \ncategory:Platform\n---\n\nBody";
        let (fm, body) = FrontMatter::parse(content);
        assert_eq!(fm.title.as_deref(), Some("Spaced Out"));
        assert_eq!(fm.category.as_deref(), Some("Platform"));
        assert_eq!(body, "Body");
    }

    #[test]
    fn test_duplicate_key_last_wins() {
        let content = "---\ntitle: First\ntitle: Second\n---\nBody";
        let (fm, _) = FrontMatter::parse(content);
        assert_eq!(fm.title.as_deref(), Some("Second"));
    }

    #[test]
    fn test_lines_without_separator_ignored() {
        let content = "---\ntitle: Kept\nthis line has no separator\ndate: 2024-06-01\n---\nBody";
        let (fm, body) = FrontMatter::parse(content);
        assert_eq!(fm.title.as_deref(), Some("Kept"));
        assert_eq!(fm.date.as_deref(), Some("2024-06-01"));
        assert_eq!(body, "Body");
    }

    #[test]
    fn test_unknown_keys_kept_in_extra() {
        let content = "---\ntitle: Post\nhero_image: /img/x.png\n---\nBody";
        let (fm, _) = FrontMatter::parse(content);
        assert_eq!(fm.extra.get("hero_image").map(String::as_str), Some("/img/x.png"));
    }

    #[test]
    fn test_crlf_line_endings() {
        let content = "---\r\ntitle: Windows\r\n---\r\nBody text\r\n";
        let (fm, body) = FrontMatter::parse(content);
        assert_eq!(fm.title.as_deref(), Some("Windows"));
        assert_eq!(body, "Body text\r\n");
    }

    #[test]
    fn test_value_with_colon_kept_whole() {
        let content = "---\ntitle: Rust: the good parts\n---\nBody";
        let (fm, _) = FrontMatter::parse(content);
        assert_eq!(fm.title.as_deref(), Some("Rust: the good parts"));
    }
}

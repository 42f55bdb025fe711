//! Embedded site templates using the Tera template engine
//!
//! Every template ships inside the binary; there is no theme directory to
//! deploy next to the executable.

use anyhow::Result;
use std::collections::HashMap;
use tera::{Context, Tera};

/// Template renderer with all site templates loaded
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with the embedded templates
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("site/layout.html")),
            ("home.html", include_str!("site/home.html")),
            ("about.html", include_str!("site/about.html")),
            ("services.html", include_str!("site/services.html")),
            ("projects.html", include_str!("site/projects.html")),
            ("contact.html", include_str!("site/contact.html")),
            ("insights.html", include_str!("site/insights.html")),
            ("insight.html", include_str!("site/insight.html")),
            ("not_found.html", include_str!("site/not_found.html")),
        ])?;

        tera.register_filter("truncate_chars", truncate_chars_filter);

        Ok(Self { tera })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }
}

/// Tera filter: truncate by character count
fn truncate_chars_filter(
    value: &tera::Value,
    args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("truncate_chars", "value", String, value);
    let length = match args.get("length") {
        Some(val) => tera::try_get_value!("truncate_chars", "length", usize, val),
        None => 150,
    };

    if s.chars().count() <= length {
        Ok(tera::Value::String(s))
    } else {
        let truncated: String = s.chars().take(length).collect();
        Ok(tera::Value::String(format!("{}…", truncated.trim_end())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::content::Post;

    fn sample_post() -> Post {
        Post {
            filename: "zero-trust.md".to_string(),
            fingerprint: "abc123".to_string(),
            title: "Zero Trust in Practice".to_string(),
            date: "2024-06-01".to_string(),
            category: "Security".to_string(),
            author: "Casey".to_string(),
            excerpt: "What zero trust actually changes day to day.".to_string(),
            content: "<p>Full <strong>post</strong> body.</p>".to_string(),
            source_url: "https://github.com/cyberburgs/insights/blob/main/zero-trust.md"
                .to_string(),
        }
    }

    #[test]
    fn test_all_templates_compile() {
        TemplateRenderer::new().unwrap();
    }

    #[test]
    fn test_render_insights_index() {
        let renderer = TemplateRenderer::new().unwrap();
        let mut context = Context::new();
        context.insert("site", &SiteConfig::default());
        context.insert("posts", &vec![sample_post()]);

        let html = renderer.render("insights.html", &context).unwrap();
        assert!(html.contains("Zero Trust in Practice"));
        assert!(html.contains("/insights/zero-trust.md"));
        assert!(html.contains("2024-06-01"));
    }

    #[test]
    fn test_render_insight_detail_marks_content_safe() {
        let renderer = TemplateRenderer::new().unwrap();
        let mut context = Context::new();
        context.insert("site", &SiteConfig::default());
        context.insert("post", &sample_post());

        let html = renderer.render("insight.html", &context).unwrap();
        assert!(html.contains("<strong>post</strong>"));
        assert!(html.contains("View on GitHub"));
    }

    #[test]
    fn test_post_metadata_is_escaped() {
        let renderer = TemplateRenderer::new().unwrap();
        let mut post = sample_post();
        post.title = "<script>alert(1)</script>".to_string();

        let mut context = Context::new();
        context.insert("site", &SiteConfig::default());
        context.insert("post", &post);

        let html = renderer.render("insight.html", &context).unwrap();
        assert!(!html.contains("<script>alert(1)</script>"));
    }

    #[test]
    fn test_truncate_chars_filter() {
        let renderer = TemplateRenderer::new().unwrap();
        let mut context = Context::new();
        context.insert("site", &SiteConfig::default());
        let mut post = sample_post();
        post.excerpt = "x".repeat(500);
        context.insert("posts", &vec![post]);

        let html = renderer.render("insights.html", &context).unwrap();
        assert!(!html.contains(&"x".repeat(400)));
    }
}

//! Discussion-backed comments widget.

use crate::{config::CommentsConfig, utils::xml::escape_xml};
use std::fmt::Write;

const CLIENT_SCRIPT: &str = "https://giscus.app/client.js";

/// Embed script when configured, otherwise a notice naming the missing keys.
pub fn render_comments(config: &CommentsConfig) -> String {
    let missing = config.missing_keys();
    if !missing.is_empty() {
        return format!(
            concat!(
                r#"<section class="comments comments-unconfigured">"#,
                "<h3>Comments Not Configured</h3>",
                "<p>To enable comments, fill in the <code>[comments]</code> section of <code>willow.toml</code> ",
                "with the repository and discussion category identifiers.</p>",
                r#"<p class="missing">Missing values: {}</p></section>"#
            ),
            missing.join(", ")
        );
    }

    let mut out = String::from(r#"<section class="comments">"#);
    let _ = write!(out, r#"<script src="{CLIENT_SCRIPT}""#);
    for (name, value) in [
        ("data-repo", config.repo.as_str()),
        ("data-repo-id", config.repo_id.as_str()),
        ("data-category", config.category.as_str()),
        ("data-category-id", config.category_id.as_str()),
        ("data-mapping", config.mapping.as_str()),
        ("data-strict", "0"),
        ("data-reactions-enabled", "1"),
        ("data-emit-metadata", "0"),
        ("data-input-position", "bottom"),
        ("data-theme", config.theme.as_str()),
        ("data-lang", config.lang.as_str()),
        ("data-loading", "lazy"),
        ("crossorigin", "anonymous"),
    ] {
        let _ = write!(out, r#" {name}="{}""#, escape_xml(value.trim()));
    }
    out.push_str(" async></script></section>");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configured() -> CommentsConfig {
        CommentsConfig {
            repo: "owner/blog".into(),
            repo_id: "R_1".into(),
            category: "Announcements".into(),
            category_id: "DIC_1".into(),
            ..CommentsConfig::default()
        }
    }

    #[test]
    fn test_unconfigured_lists_missing_keys() {
        let mut config = configured();
        config.repo_id = "  ".into();
        config.category_id.clear();

        let html = render_comments(&config);
        assert!(html.contains("Comments Not Configured"));
        assert!(html.contains("Missing values: repo_id, category_id"));
        assert!(!html.contains("<script"));
    }

    #[test]
    fn test_configured_embeds_script() {
        let html = render_comments(&configured());
        assert!(html.contains(r#"<script src="https://giscus.app/client.js""#));
        assert!(html.contains(r#"data-repo="owner/blog""#));
        assert!(html.contains(r#"data-category-id="DIC_1""#));
        assert!(html.contains(r#"data-mapping="pathname""#));
        assert!(html.contains(r#"data-theme="preferred_color_scheme""#));
    }
}

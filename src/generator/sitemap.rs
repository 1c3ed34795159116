//! Sitemap generation.
//!
//! Lists every page and post for search engine indexing. Pages come first
//! (home with priority `1.0`, the rest `0.7`), then posts newest first with
//! priority `0.8`.
//!
//! # Sitemap Format
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
//!   <url>
//!     <loc>https://example.com</loc>
//!     <priority>1.0</priority>
//!   </url>
//!   <url>
//!     <loc>https://example.com/posts/hello</loc>
//!     <lastmod>2025-01-01</lastmod>
//!     <priority>0.8</priority>
//!   </url>
//! </urlset>
//! ```

use crate::{
    cms::{PageNode, PostNode},
    config::SiteConfig,
    log,
    post::projection::post_url,
    utils::{date::DateTimeUtc, xml::escape_xml},
};
use anyhow::{Context, Result};
use std::{fs, path::Path};

// ============================================================================
// Constants
// ============================================================================

/// XML namespace for sitemap
const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

const HOME_PRIORITY: &str = "1.0";
const PAGE_PRIORITY: &str = "0.7";
const POST_PRIORITY: &str = "0.8";

// ============================================================================
// Sitemap Implementation
// ============================================================================

/// Sitemap data structure
#[derive(Debug)]
pub struct Sitemap {
    /// List of URL entries
    urls: Vec<UrlEntry>,
}

/// Single URL entry in the sitemap
#[derive(Debug, PartialEq)]
struct UrlEntry {
    /// Full URL location
    loc: String,
    /// Last modification date (YYYY-MM-DD format)
    lastmod: Option<String>,
    priority: &'static str,
}

impl Sitemap {
    /// Build the sitemap. `posts` must be newest first; `today` stands in
    /// for posts without a parseable date.
    pub fn build(config: &SiteConfig, pages: &[PageNode], posts: &[PostNode], today: DateTimeUtc) -> Self {
        let pages = pages.iter().map(|page| UrlEntry {
            loc: config.base.url_for(&page.url()),
            lastmod: None,
            priority: if page.is_home() { HOME_PRIORITY } else { PAGE_PRIORITY },
        });

        let posts = posts.iter().map(|post| UrlEntry {
            loc: config.base.url_for(&post_url(post)),
            lastmod: Some(
                post.date
                    .as_deref()
                    .and_then(DateTimeUtc::parse)
                    .unwrap_or(today)
                    .to_ymd(),
            ),
            priority: POST_PRIORITY,
        });

        Self {
            urls: pages.chain(posts).collect(),
        }
    }

    /// Generate sitemap XML string.
    pub fn into_xml(self) -> String {
        let mut xml = String::with_capacity(128 + self.urls.len() * 128);

        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        xml.push('\n');
        xml.push_str(&format!(r#"<urlset xmlns="{SITEMAP_NS}">"#));
        xml.push('\n');

        for entry in self.urls {
            xml.push_str("  <url>\n");
            xml.push_str(&format!("    <loc>{}</loc>\n", escape_xml(&entry.loc)));
            if let Some(lastmod) = entry.lastmod {
                xml.push_str(&format!("    <lastmod>{lastmod}</lastmod>\n"));
            }
            xml.push_str(&format!("    <priority>{}</priority>\n", entry.priority));
            xml.push_str("  </url>\n");
        }

        xml.push_str("</urlset>\n");
        xml
    }

    /// Write sitemap to output file.
    pub fn write(self, path: &Path) -> Result<()> {
        let xml = self.into_xml();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, xml).with_context(|| format!("Failed to write sitemap to {}", path.display()))?;

        log!("sitemap"; "{}", path.file_name().unwrap_or_default().to_string_lossy());
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

//! `[feed]` and `[sitemap]` section configuration.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[feed]` section - RSS feed settings.
///
/// # Example
/// ```toml
/// [feed]
/// enable = true
/// path = "/feed.xml"
/// page_size = 50
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct FeedConfig {
    /// Serve and build the feed.
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub enable: bool,

    /// Route path of the feed.
    #[serde(default = "defaults::feed::path")]
    #[educe(Default = defaults::feed::path())]
    pub path: String,

    /// Posts fetched per cursor page while collecting.
    #[serde(default = "defaults::feed::page_size")]
    #[educe(Default = defaults::feed::page_size())]
    pub page_size: usize,
}

/// `[sitemap]` section.
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SitemapConfig {
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub enable: bool,

    #[serde(default = "defaults::sitemap::path")]
    #[educe(Default = defaults::sitemap::path())]
    pub path: String,
}

#[cfg(test)]
mod tests {
    use super::super::SiteConfig;

    #[test]
    fn test_feed_config() {
        let config = r#"
            [feed]
            path = "/rss.xml"
            page_size = 10

            [sitemap]
            enable = false
        "#;
        let config: SiteConfig = toml::from_str(config).unwrap();

        assert!(config.feed.enable);
        assert_eq!(config.feed.path, "/rss.xml");
        assert_eq!(config.feed.page_size, 10);
        assert!(!config.sitemap.enable);
        assert_eq!(config.sitemap.path, "/sitemap.xml");
    }

    #[test]
    fn test_feed_defaults() {
        let config: SiteConfig = toml::from_str("").unwrap();
        assert_eq!(config.feed.path, "/feed.xml");
        assert_eq!(config.feed.page_size, 50);
        assert!(config.sitemap.enable);
    }
}

//! `[base]` section configuration.
//!
//! Contains basic site information used by pages, the feed and the sitemap.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[base]` section in willow.toml - basic site metadata.
///
/// # Example
/// ```toml
/// [base]
/// title = "Willow Notes"
/// description = "Notes from everyday learning"
/// url = "https://notes.example.com"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct BaseConfig {
    /// Site title, used in the page shell and feed channel.
    #[serde(default = "defaults::base::title")]
    #[educe(Default = defaults::base::title())]
    pub title: String,

    /// Site description for the feed channel.
    #[serde(default = "defaults::base::description")]
    #[educe(Default = defaults::base::description())]
    pub description: String,

    /// Absolute site URL, prefix of every feed and sitemap link.
    #[serde(default = "defaults::base::url")]
    #[educe(Default = defaults::base::url())]
    pub url: String,

    /// Feed language code.
    #[serde(default = "defaults::base::language")]
    #[educe(Default = defaults::base::language())]
    pub language: String,

    /// Copyright notice for the footer.
    #[serde(default)]
    pub copyright: String,
}

impl BaseConfig {
    /// Absolute URL for a site path. `/` maps to the bare site URL.
    pub fn url_for(&self, path: &str) -> String {
        let base = self.url.trim_end_matches('/');
        match path.trim_start_matches('/') {
            "" => base.to_owned(),
            rest => format!("{base}/{rest}"),
        }
    }
}

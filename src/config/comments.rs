//! `[comments]` section configuration.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// Discussion-backed comments widget.
///
/// All four identifiers are required for the widget to load; with any of
/// them missing the post page shows a setup notice instead.
///
/// # Example
/// ```toml
/// [comments]
/// repo = "owner/blog"
/// repo_id = "R_kgDO..."
/// category = "Announcements"
/// category_id = "DIC_kwDO..."
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct CommentsConfig {
    #[serde(default)]
    pub repo: String,

    #[serde(default)]
    pub repo_id: String,

    #[serde(default)]
    pub category: String,

    #[serde(default)]
    pub category_id: String,

    /// How a page maps to a discussion.
    #[serde(default = "defaults::comments::mapping")]
    #[educe(Default = defaults::comments::mapping())]
    pub mapping: String,

    #[serde(default = "defaults::comments::theme")]
    #[educe(Default = defaults::comments::theme())]
    pub theme: String,

    #[serde(default = "defaults::comments::lang")]
    #[educe(Default = defaults::comments::lang())]
    pub lang: String,
}

impl CommentsConfig {
    /// Names of the required keys that are empty.
    pub fn missing_keys(&self) -> Vec<&'static str> {
        [
            ("repo", &self.repo),
            ("repo_id", &self.repo_id),
            ("category", &self.category),
            ("category_id", &self.category_id),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(key, _)| key)
        .collect()
    }
}

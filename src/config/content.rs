//! `[content]` and `[listing]` section configuration.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// `[content]` section - where content documents live.
///
/// # Example
/// ```toml
/// [content]
/// dir = "content"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct ContentConfig {
    /// Content directory, relative to the project root.
    #[serde(default = "defaults::content::dir")]
    #[educe(Default = defaults::content::dir())]
    pub dir: PathBuf,
}

/// `[listing]` section - `/posts` pagination.
///
/// # Example
/// ```toml
/// [listing]
/// per_page = 6
/// step = 6
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct ListingConfig {
    /// Posts shown before "load more".
    #[serde(default = "defaults::listing::per_page")]
    #[educe(Default = defaults::listing::per_page())]
    pub per_page: usize,

    /// Posts added per "load more".
    #[serde(default = "defaults::listing::step")]
    #[educe(Default = defaults::listing::step())]
    pub step: usize,
}

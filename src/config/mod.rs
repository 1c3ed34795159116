//! Site configuration management for `willow.toml`.
//!
//! # Sections
//!
//! | Section      | Purpose                                       |
//! |--------------|-----------------------------------------------|
//! | `[base]`     | Site metadata (title, description, url)       |
//! | `[content]`  | Content directory                             |
//! | `[listing]`  | `/posts` page size and "load more" step       |
//! | `[feed]`     | RSS route and collection page size            |
//! | `[sitemap]`  | Sitemap route                                 |
//! | `[serve]`    | HTTP server (interface, port, revalidate)     |
//! | `[build]`    | Static export (output, clean)                 |
//! | `[comments]` | Comments widget identifiers                   |
//! | `[extra]`    | User-defined custom fields                    |
//!
//! # Example
//!
//! ```toml
//! [base]
//! title = "Willow Notes"
//! url = "https://notes.example.com"
//!
//! [listing]
//! per_page = 6
//!
//! [serve]
//! port = 5277
//!
//! [extra]
//! analytics_id = "UA-12345"
//! ```

mod base;
mod build;
mod comments;
mod content;
pub mod defaults;
mod error;
mod feed;
mod serve;

use base::BaseConfig;
use build::BuildConfig;
pub use comments::CommentsConfig;
use content::{ContentConfig, ListingConfig};
use feed::{FeedConfig, SitemapConfig};
use serve::ServeConfig;

pub use error::ConfigError;

use crate::cli::{Cli, Commands};
use crate::post::pagination::Pagination;
use anyhow::{Result, bail};
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// Root Configuration
// ============================================================================

/// Root configuration structure representing willow.toml
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    /// Absolute path to the config file (set after loading)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Absolute project root (set after loading)
    #[serde(skip)]
    pub root: PathBuf,

    /// Basic site information
    #[serde(default)]
    pub base: BaseConfig,

    /// Content location
    #[serde(default)]
    pub content: ContentConfig,

    /// `/posts` listing pagination
    #[serde(default)]
    pub listing: ListingConfig,

    /// RSS feed settings
    #[serde(default)]
    pub feed: FeedConfig,

    /// Sitemap settings
    #[serde(default)]
    pub sitemap: SitemapConfig,

    /// HTTP server settings
    #[serde(default)]
    pub serve: ServeConfig,

    /// Static export settings
    #[serde(default)]
    pub build: BuildConfig,

    /// Comments widget
    #[serde(default)]
    pub comments: CommentsConfig,

    /// User-defined extra fields
    #[serde(default)]
    pub extra: HashMap<String, toml::Value>,
}

impl SiteConfig {
    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: SiteConfig = toml::from_str(content).map_err(ConfigError::Toml)?;
        Ok(config)
    }

    /// Load configuration from file path
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        Self::from_str(&content)
    }

    /// Content directory (absolute after `update_with_cli`)
    pub fn content_dir(&self) -> &Path {
        &self.content.dir
    }

    /// Output directory (absolute after `update_with_cli`)
    pub fn output_dir(&self) -> &Path {
        &self.build.output
    }

    /// Fresh pagination for the `/posts` listing.
    pub fn listing_pagination(&self) -> Pagination {
        Pagination::new(self.listing.per_page, self.listing.step)
    }

    /// Update configuration with CLI arguments
    pub fn update_with_cli(&mut self, cli: &Cli) {
        let root = cli.root.clone().unwrap_or_else(|| PathBuf::from("./"));
        Self::update_option(&mut self.content.dir, cli.content.as_ref());

        match &cli.command {
            Commands::Serve {
                interface,
                port,
                base_url,
            } => {
                Self::update_option(&mut self.serve.interface, interface.as_ref());
                Self::update_option(&mut self.serve.port, port.as_ref());
                Self::update_option(&mut self.base.url, base_url.as_ref());
            }
            Commands::Build {
                clean,
                base_url,
                output,
            } => {
                Self::update_option(&mut self.build.clean, clean.as_ref());
                Self::update_option(&mut self.base.url, base_url.as_ref());
                Self::update_option(&mut self.build.output, output.as_ref());
            }
        }

        self.update_path_with_root(&root, &cli.config);
    }

    /// Update config option if CLI value is provided
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    /// Resolve all paths relative to root and normalize to absolute paths
    fn update_path_with_root(&mut self, root: &Path, config: &Path) {
        let root = Self::normalize_path(root);
        self.config_path = Self::normalize_path(&root.join(config));
        self.content.dir = Self::normalize_path(&root.join(&self.content.dir));
        self.build.output = Self::normalize_path(&root.join(&self.build.output));
        self.root = root;
    }

    /// Normalize a path to absolute, using canonicalize if the path exists
    fn normalize_path(path: &Path) -> PathBuf {
        path.canonicalize().unwrap_or_else(|_| {
            // For non-existent paths, manually make them absolute
            if path.is_absolute() {
                path.to_path_buf()
            } else {
                std::env::current_dir()
                    .map(|cwd| cwd.join(path))
                    .unwrap_or_else(|_| path.to_path_buf())
            }
        })
    }

    /// Validate configuration before serving or building
    pub fn validate(&self) -> Result<()> {
        if !self.base.url.starts_with("http") {
            bail!(ConfigError::Validation(
                "[base.url] must start with http:// or https://".into()
            ));
        }

        if self.listing.per_page == 0 || self.listing.step == 0 {
            bail!(ConfigError::Validation(
                "[listing.per_page] and [listing.step] must be greater than 0".into()
            ));
        }

        if self.feed.page_size == 0 {
            bail!(ConfigError::Validation(
                "[feed.page_size] must be greater than 0".into()
            ));
        }

        for (field, path) in [("[feed.path]", &self.feed.path), ("[sitemap.path]", &self.sitemap.path)] {
            if !path.starts_with('/') {
                bail!(ConfigError::Validation(format!("{field} must start with `/`")));
            }
        }

        if !self.content.dir.is_dir() {
            bail!(ConfigError::Validation(format!(
                "[content.dir] `{}` not found",
                self.content.dir.display()
            )));
        }

        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

//! RSS feed generation.
//!
//! One item per post, newest first. Items always carry title, link, guid
//! and pubDate; description, author and hero image are added when present.
//! Hero images are written as a plain `<image>` element holding the URL.

use super::FeedError;
use crate::{cms::PostNode, config::SiteConfig, log, post::projection::post_url, utils::date::DateTimeUtc};
use anyhow::{Context, Result};
use rss::{
    ChannelBuilder, GuidBuilder, Item, ItemBuilder,
    extension::{Extension, ExtensionBuilder, ExtensionMap},
    validation::Validate,
};
use std::{collections::BTreeMap, fs, path::Path};

// ============================================================================
// RssFeed Implementation
// ============================================================================

/// RSS feed builder
pub struct RssFeed<'a> {
    config: &'a SiteConfig,
    posts: &'a [PostNode],
    /// Used for `lastBuildDate` and for posts without a date.
    now: DateTimeUtc,
}

impl<'a> RssFeed<'a> {
    /// `posts` must be newest first.
    pub const fn build(config: &'a SiteConfig, posts: &'a [PostNode], now: DateTimeUtc) -> Self {
        Self { config, posts, now }
    }

    /// Generate RSS XML string
    pub fn into_xml(self) -> Result<String, FeedError> {
        let items: Vec<_> = self
            .posts
            .iter()
            .map(|post| post_to_rss_item(post, self.config, self.now))
            .collect();

        let base = &self.config.base;
        let channel = ChannelBuilder::default()
            .title(base.title.clone())
            .link(base.url_for("/"))
            .description(base.description.clone())
            .language(Some(base.language.clone()))
            .last_build_date(Some(self.now.to_rfc2822()))
            .items(items)
            .build();

        channel.validate().map_err(|e| FeedError::Invalid(e.to_string()))?;
        Ok(channel.to_string())
    }

    /// Write RSS feed to file
    pub fn write(self, path: &Path) -> Result<()> {
        let xml = self.into_xml()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, xml).with_context(|| format!("Failed to write feed to {}", path.display()))?;

        log!("rss"; "{}", path.file_name().unwrap_or_default().to_string_lossy());
        Ok(())
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Convert a post to an RSS item.
fn post_to_rss_item(post: &PostNode, config: &SiteConfig, now: DateTimeUtc) -> Item {
    let link = config.base.url_for(&post_url(post));
    let pub_date = post
        .date
        .as_deref()
        .and_then(DateTimeUtc::parse)
        .unwrap_or(now)
        .to_rfc2822();
    let author = post
        .author
        .as_ref()
        .and_then(|author| author.name.clone())
        .filter(|name| !name.is_empty());
    let image = post.hero_img.as_deref().map(|src| absolute_url(config, src));

    ItemBuilder::default()
        .title(Some(post.title.clone()))
        .link(Some(link.clone()))
        .guid(Some(GuidBuilder::default().permalink(true).value(link).build()))
        .pub_date(Some(pub_date))
        .description(item_description(post))
        .author(author)
        .extensions(image.map(|src| image_extension(&src)).unwrap_or_default())
        .build()
}

/// Plain-string excerpts verbatim, structured excerpts as their JSON.
fn item_description(post: &PostNode) -> Option<String> {
    let excerpt = post.excerpt.as_ref()?;
    let description = match excerpt.as_plain_str() {
        Some(text) => text.to_owned(),
        None if excerpt.raw().get("children").is_some() => excerpt.to_json_string(),
        None => return None,
    };
    Some(description).filter(|d| !d.is_empty())
}

/// Site-relative URLs get the base URL prepended.
fn absolute_url(config: &SiteConfig, src: &str) -> String {
    if src.starts_with('/') {
        config.base.url_for(src)
    } else {
        src.to_owned()
    }
}

/// `<image>https://...</image>`, written under its bare name.
fn image_extension(src: &str) -> ExtensionMap {
    let image: Extension = ExtensionBuilder::default()
        .name("image".to_owned())
        .value(Some(src.to_owned()))
        .build();

    let mut elements = BTreeMap::new();
    elements.insert("image".to_owned(), vec![image]);

    let mut map = ExtensionMap::new();
    map.insert(String::new(), elements);
    map
}

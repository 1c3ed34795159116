//! Page blocks.
//!
//! A page is an ordered list of blocks, each tagged by `_template`:
//!
//! ```json
//! { "_template": "recent", "title": "Editor's Pick", "post1": "hello.json", "showTags": true }
//! ```
//!
//! Unknown templates decode to [`Block::Unknown`] and render nothing.

use super::TagColor;
use crate::post::resolve::PostRef;
use crate::richtext::RichText;
use serde::{Deserialize, Deserializer};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "_template", rename_all = "snake_case")]
pub enum Block {
    Hero(HeroBlock),
    Content(ContentBlock),
    Featured(FeaturedBlock),
    Recent(RecentBlock),
    BlogGrid(BlogGridBlock),
    Categories(CategoriesBlock),
    Rss(RssBlock),
    Newsletter(NewsletterBlock),
    Image(ImageBlock),
    Callout(CalloutBlock),
    #[serde(other)]
    Unknown,
}

/// Decode a `blocks` array leniently: `null` entries are dropped and any
/// entry that does not fit its template becomes [`Block::Unknown`].
pub fn deserialize_blocks<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Block>, D::Error> {
    let values = Option::<Vec<serde_json::Value>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(values
        .into_iter()
        .filter(|value| !value.is_null())
        .map(|value| serde_json::from_value(value).unwrap_or(Block::Unknown))
        .collect())
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HeroBlock {
    pub headline: Option<String>,
    pub tagline: Option<String>,
    pub image: Option<ImageRef>,
    pub actions: Vec<Action>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Action {
    pub label: String,
    pub link: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ImageRef {
    pub src: Option<String>,
    pub alt: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ContentBlock {
    pub body: Option<RichText>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FeaturedBlock {
    pub title: Option<String>,
    pub description: Option<String>,
    pub button_text: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RecentBlock {
    pub title: Option<String>,
    pub description: Option<String>,
    pub post1: Option<PostRef>,
    pub post2: Option<PostRef>,
    pub post3: Option<PostRef>,
    pub show_tags: bool,
}

impl RecentBlock {
    /// Selected references in slot order, empty slots skipped.
    pub fn post_refs(&self) -> impl Iterator<Item = &PostRef> {
        [&self.post1, &self.post2, &self.post3]
            .into_iter()
            .flatten()
            .filter(|post_ref| !post_ref.is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BlogGridBlock {
    pub title: Option<String>,
    pub description: Option<String>,
    pub posts_per_page: Option<usize>,
    pub show_categories: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CategoriesBlock {
    pub title: Option<String>,
    #[serde(deserialize_with = "deserialize_color")]
    pub badge_color: TagColor,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RssBlock {
    pub title: Option<String>,
    pub description: Option<String>,
    pub button_text: Option<String>,
    /// Feed URL shown to the reader.
    pub placeholder: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NewsletterBlock {
    pub title: Option<String>,
    pub description: Option<String>,
    pub button_text: Option<String>,
    pub placeholder: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ImageBlock {
    pub image: Option<ImageRef>,
    pub caption: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CalloutBlock {
    pub text: Option<String>,
    pub url: Option<String>,
}

fn deserialize_color<'de, D: Deserializer<'de>>(deserializer: D) -> Result<TagColor, D::Error> {
    let name = Option::<String>::deserialize(deserializer)?;
    Ok(TagColor::parse(name.as_deref()))
}

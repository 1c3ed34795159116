//! Post projection: raw CMS post to display-ready view.

use crate::cms::{PostNode, TagRef};
use crate::richtext::RichText;
use crate::utils::date::DateTimeUtc;
use serde::Serialize;

/// Average reading speed used for estimates.
pub const WORDS_PER_MINUTE: usize = 200;

/// Fallback author name.
pub const ANONYMOUS: &str = "Anonymous";

/// Which field a reading-time estimate is based on.
///
/// Post pages and most cards count the body; related posts and the
/// featured card only have the excerpt at hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadingBasis {
    Body,
    Excerpt,
}

/// `max(1, round(words / 200))`, counting whitespace-separated tokens of the
/// JSON-serialized rich text. A missing field counts as an empty string.
pub fn reading_minutes(text: Option<&RichText>) -> u32 {
    let json = text.map_or_else(|| "\"\"".to_owned(), RichText::to_json_string);
    let words = json.split_whitespace().count();
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let minutes = (words as f64 / WORDS_PER_MINUTE as f64).round() as u32;
    minutes.max(1)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorView {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

/// Display-ready post.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostView {
    pub id: String,
    pub title: String,
    /// `/posts/<breadcrumbs>`
    pub url: String,
    /// `MMM dd, yyyy`, or empty when the date does not parse.
    pub published: String,
    /// Milliseconds since epoch, for sorting.
    #[serde(skip)]
    pub timestamp: Option<i64>,
    pub author: AuthorView,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hero_img: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<RichText>,
    /// Non-empty tags, in post order.
    pub tags: Vec<TagRef>,
    pub reading_mins: u32,
}

impl PostView {
    pub fn project(post: &PostNode, basis: ReadingBasis) -> Self {
        let date = post.date.as_deref().and_then(DateTimeUtc::parse);
        let author = post.author.as_ref();

        Self {
            id: post.id.clone(),
            title: post.title.clone(),
            url: post_url(post),
            published: date.map(DateTimeUtc::to_display).unwrap_or_default(),
            timestamp: date.map(DateTimeUtc::timestamp_millis),
            author: AuthorView {
                name: author
                    .and_then(|a| a.name.clone())
                    .filter(|name| !name.is_empty())
                    .unwrap_or_else(|| ANONYMOUS.to_owned()),
                avatar: author.and_then(|a| a.avatar.clone()).filter(|src| !src.is_empty()),
            },
            hero_img: post.hero_img.clone(),
            excerpt: post.excerpt.clone(),
            tags: post.tags.iter().filter(|tag| !tag.name.is_empty()).cloned().collect(),
            reading_mins: match basis {
                ReadingBasis::Body => reading_minutes(post.body.as_ref()),
                ReadingBasis::Excerpt => reading_minutes(post.excerpt.as_ref()),
            },
        }
    }

    pub fn tag_names(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(|tag| tag.name.as_str())
    }

    pub fn has_tag(&self, name: &str) -> bool {
        self.tag_names().any(|tag| tag == name)
    }

    /// Serialized excerpt, as matched by search. Empty when absent.
    pub fn excerpt_json(&self) -> String {
        self.excerpt.as_ref().map(RichText::to_json_string).unwrap_or_default()
    }
}

/// `/posts/` followed by the breadcrumbs.
pub fn post_url(post: &PostNode) -> String {
    format!("/posts/{}", post.sys.breadcrumbs.join("/"))
}

/// Project a newest-first post list.
pub fn project_all(posts: &[PostNode], basis: ReadingBasis) -> Vec<PostView> {
    posts.iter().map(|post| PostView::project(post, basis)).collect()
}

//! Filesystem-backed content source.
//!
//! Reads JSON documents from a content directory:
//!
//! ```text
//! content/
//! ├── posts/**/*.json
//! ├── pages/**/*.json
//! └── tags/*.json
//! ```
//!
//! Everything is loaded eagerly into memory; queries then slice the loaded
//! collections. Missing collection directories are treated as empty.

use super::block::{Block, deserialize_blocks};
use super::{
    Author, Connection, ContentSource, DocumentSys, PageNode, PageRequest, PostNode, SourceError, TagColor,
    TagNode, TagRef, paginate,
};
use crate::richtext::RichText;
use crate::utils::date::DateTimeUtc;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::cmp::Ordering;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const POSTS_DIR: &str = "posts";
const PAGES_DIR: &str = "pages";
const TAGS_DIR: &str = "tags";

// ============================================================================
// On-disk shapes
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPost {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    date: Option<String>,
    #[serde(default)]
    author: Option<Author>,
    #[serde(default)]
    tags: Option<Vec<Option<RawTagRef>>>,
    #[serde(default)]
    hero_img: Option<String>,
    #[serde(default)]
    excerpt: Option<RichText>,
    #[serde(default, alias = "_body")]
    body: Option<RichText>,
}

/// `"rust"`, `"tags/rust.json"` or `{ "tag": "rust" }`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawTagRef {
    Plain(String),
    Nested { tag: String },
}

impl RawTagRef {
    fn as_str(&self) -> &str {
        match self {
            Self::Plain(reference) | Self::Nested { tag: reference } => reference,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawTag {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    color: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawPage {
    #[serde(default)]
    title: Option<String>,
    #[serde(default, deserialize_with = "deserialize_blocks")]
    blocks: Vec<Block>,
}

// ============================================================================
// FsSource
// ============================================================================

/// Content loaded from a directory of JSON documents.
#[derive(Debug, Clone, Default)]
pub struct FsSource {
    /// Oldest first.
    posts: Vec<PostNode>,
    tags: Vec<TagNode>,
    pages: Vec<PageNode>,
}

impl FsSource {
    /// Load every collection under `dir`.
    pub fn load(dir: &Path) -> Result<Self, SourceError> {
        if !dir.is_dir() {
            return Err(SourceError::MissingDir(dir.to_path_buf()));
        }

        let tags: Vec<TagNode> = read_collection::<RawTag>(&dir.join(TAGS_DIR))?
            .into_iter()
            .map(|(sys, raw)| TagNode {
                name: raw.name.unwrap_or_default(),
                description: raw.description.filter(|d| !d.is_empty()),
                color: TagColor::parse(raw.color.as_deref()),
                sys,
            })
            .collect();

        let mut posts: Vec<PostNode> = read_collection::<RawPost>(&dir.join(POSTS_DIR))?
            .into_iter()
            .map(|(sys, raw)| build_post(sys, raw, &tags))
            .collect();
        posts.sort_by(compare_by_date);

        let pages = read_collection::<RawPage>(&dir.join(PAGES_DIR))?
            .into_iter()
            .map(|(sys, raw)| PageNode {
                title: raw.title,
                blocks: raw.blocks,
                sys,
            })
            .collect();

        Ok(Self { posts, tags, pages })
    }

    /// Build a source from already-constructed documents.
    ///
    /// Posts are re-sorted oldest first.
    #[cfg(test)]
    pub fn from_parts(mut posts: Vec<PostNode>, tags: Vec<TagNode>, pages: Vec<PageNode>) -> Self {
        posts.sort_by(compare_by_date);
        Self { posts, tags, pages }
    }

    pub fn post_count(&self) -> usize {
        self.posts.len()
    }
}

impl ContentSource for FsSource {
    fn posts(&self, request: &PageRequest) -> Result<Connection<PostNode>, SourceError> {
        paginate(&self.posts, request, |post| post.sys.relative_path.clone())
    }

    fn tags(&self) -> Result<Vec<TagNode>, SourceError> {
        Ok(self.tags.clone())
    }

    fn pages(&self) -> Result<Vec<PageNode>, SourceError> {
        Ok(self.pages.clone())
    }
}

/// Oldest first; undated posts sort before dated ones, ties by path.
fn compare_by_date(a: &PostNode, b: &PostNode) -> Ordering {
    let parsed = |post: &PostNode| post.date.as_deref().and_then(DateTimeUtc::parse);
    parsed(a)
        .cmp(&parsed(b))
        .then_with(|| a.sys.relative_path.cmp(&b.sys.relative_path))
}

fn build_post(sys: DocumentSys, raw: RawPost, tags: &[TagNode]) -> PostNode {
    let tag_refs = raw
        .tags
        .unwrap_or_default()
        .iter()
        .flatten()
        .map(|reference| resolve_tag(tags, reference.as_str()))
        .collect();

    PostNode {
        id: raw
            .id
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| format!("content/{POSTS_DIR}/{}", sys.relative_path)),
        title: raw.title.unwrap_or_default(),
        date: raw.date,
        author: raw.author,
        tags: tag_refs,
        hero_img: raw.hero_img.filter(|src| !src.is_empty()),
        excerpt: raw.excerpt,
        body: raw.body,
        sys,
    }
}

/// Resolve a tag reference by name, relative path or file stem.
fn resolve_tag(tags: &[TagNode], reference: &str) -> TagRef {
    let reference = reference.trim();
    let path = reference.strip_prefix("content/").unwrap_or(reference);
    let path = path.strip_prefix("tags/").unwrap_or(path);

    tags.iter()
        .find(|tag| tag.name == reference || tag.sys.relative_path == path || tag.sys.stem() == path)
        .map(|tag| TagRef {
            name: tag.name.clone(),
            color: tag.color,
        })
        .unwrap_or_else(|| TagRef {
            name: reference.to_owned(),
            color: TagColor::Default,
        })
}

/// Read every `*.json` file below `dir`, sorted by path.
fn read_collection<T: DeserializeOwned>(dir: &Path) -> Result<Vec<(DocumentSys, T)>, SourceError> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut documents = Vec::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry?;
        let path = entry.path();
        if !entry.file_type().is_file() || path.extension().is_none_or(|ext| ext != "json") {
            continue;
        }

        let content = fs::read_to_string(path).map_err(|err| SourceError::Io(path.to_path_buf(), err))?;
        let raw = serde_json::from_str(&content).map_err(|err| SourceError::Json(path.to_path_buf(), err))?;
        documents.push((DocumentSys::from_relative_path(&relative_path(dir, path)), raw));
    }
    Ok(documents)
}

/// `/`-separated path of `path` below `base`.
fn relative_path(base: &Path, path: &Path) -> String {
    path.strip_prefix(base)
        .map(PathBuf::from)
        .unwrap_or_else(|_| path.to_path_buf())
        .components()
        .map(|component| component.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

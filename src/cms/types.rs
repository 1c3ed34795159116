//! Content document types.
//!
//! These mirror what the CMS returns for each collection after reference
//! resolution. The raw on-disk shapes live in [`super::fs`].

use super::block::Block;
use crate::richtext::RichText;
use serde::{Deserialize, Serialize};

/// Path information attached to every document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DocumentSys {
    /// Path inside the collection directory, e.g. `2024/hello.json`.
    pub relative_path: String,
    /// Path segments without the extension, e.g. `["2024", "hello"]`.
    pub breadcrumbs: Vec<String>,
}

impl DocumentSys {
    /// Build from a `/`-separated path relative to the collection root.
    pub fn from_relative_path(relative_path: &str) -> Self {
        let stem = relative_path
            .rsplit_once('.')
            .filter(|(_, ext)| !ext.contains('/'))
            .map_or(relative_path, |(stem, _)| stem);

        Self {
            relative_path: relative_path.to_owned(),
            breadcrumbs: stem
                .split('/')
                .filter(|segment| !segment.is_empty())
                .map(str::to_owned)
                .collect(),
        }
    }

    /// File name without directories or extension.
    pub fn stem(&self) -> &str {
        self.breadcrumbs.last().map_or("", String::as_str)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
}

/// Tag colour, used for the badge style.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TagColor {
    #[default]
    Default,
    Blue,
    Green,
    Red,
    Yellow,
    Purple,
    Pink,
    Indigo,
}

impl TagColor {
    /// Parse a colour name. Unknown or missing names fall back to `Default`.
    pub fn parse(name: Option<&str>) -> Self {
        match name.map(str::trim).map(str::to_ascii_lowercase).as_deref() {
            Some("blue") => Self::Blue,
            Some("green") => Self::Green,
            Some("red") => Self::Red,
            Some("yellow") => Self::Yellow,
            Some("purple") => Self::Purple,
            Some("pink") => Self::Pink,
            Some("indigo") => Self::Indigo,
            _ => Self::Default,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Blue => "blue",
            Self::Green => "green",
            Self::Red => "red",
            Self::Yellow => "yellow",
            Self::Purple => "purple",
            Self::Pink => "pink",
            Self::Indigo => "indigo",
        }
    }
}

/// A tag document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TagNode {
    pub name: String,
    pub description: Option<String>,
    pub color: TagColor,
    pub sys: DocumentSys,
}

/// A resolved tag reference on a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagRef {
    pub name: String,
    pub color: TagColor,
}

/// A post document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PostNode {
    pub id: String,
    pub title: String,
    /// Raw date string as stored; parsed on projection.
    pub date: Option<String>,
    pub author: Option<Author>,
    pub tags: Vec<TagRef>,
    pub hero_img: Option<String>,
    pub excerpt: Option<RichText>,
    pub body: Option<RichText>,
    pub sys: DocumentSys,
}

/// A page document made of blocks.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageNode {
    pub title: Option<String>,
    pub blocks: Vec<Block>,
    pub sys: DocumentSys,
}

impl PageNode {
    /// Route path; the `home` document is served at `/`.
    pub fn url(&self) -> String {
        match self.sys.breadcrumbs.as_slice() {
            [only] if only == "home" => "/".to_owned(),
            [] => "/".to_owned(),
            crumbs => format!("/{}", crumbs.join("/")),
        }
    }

    pub fn is_home(&self) -> bool {
        self.url() == "/"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sys_from_relative_path() {
        let sys = DocumentSys::from_relative_path("2024/hello.json");
        assert_eq!(sys.relative_path, "2024/hello.json");
        assert_eq!(sys.breadcrumbs, ["2024", "hello"]);
        assert_eq!(sys.stem(), "hello");
    }

    #[test]
    fn test_sys_without_extension() {
        let sys = DocumentSys::from_relative_path("notes/v1.2/readme");
        assert_eq!(sys.breadcrumbs, ["notes", "v1.2", "readme"]);
    }

    #[test]
    fn test_tag_color_parse() {
        assert_eq!(TagColor::parse(Some("blue")), TagColor::Blue);
        assert_eq!(TagColor::parse(Some(" Indigo ")), TagColor::Indigo);
        assert_eq!(TagColor::parse(Some("chartreuse")), TagColor::Default);
        assert_eq!(TagColor::parse(None), TagColor::Default);
        assert_eq!(TagColor::Purple.as_str(), "purple");
    }

    #[test]
    fn test_page_url() {
        let page = |path: &str| PageNode {
            sys: DocumentSys::from_relative_path(path),
            ..PageNode::default()
        };
        assert_eq!(page("home.json").url(), "/");
        assert!(page("home.json").is_home());
        assert_eq!(page("about.json").url(), "/about");
        assert_eq!(page("company/team.json").url(), "/company/team");
    }
}

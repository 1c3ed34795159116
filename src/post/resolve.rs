//! Post references.
//!
//! Blocks point at posts either with a bare string (`"hello.json"`,
//! `"content/posts/hello.json"`) or with an object carrying an `id`. Both
//! normalize to [`PostRef`].

use crate::cms::PostNode;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawPostRef {
    Key(String),
    Object {
        #[serde(default)]
        id: String,
    },
}

/// A normalized reference to a post.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "RawPostRef")]
pub struct PostRef(String);

impl From<RawPostRef> for PostRef {
    fn from(raw: RawPostRef) -> Self {
        match raw {
            RawPostRef::Key(key) | RawPostRef::Object { id: key } => Self(key.trim().to_owned()),
        }
    }
}

impl PostRef {
    #[cfg(test)]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether this reference points at `post`.
    ///
    /// Matches the id, the relative path, the `content/posts/` path, or any
    /// reference ending with the relative path.
    pub fn matches(&self, post: &PostNode) -> bool {
        let key = self.as_str();
        let relative = post.sys.relative_path.as_str();
        if key.is_empty() {
            return false;
        }

        key == post.id
            || key == relative
            || key.strip_prefix("content/posts/") == Some(relative)
            || (!relative.is_empty() && key.ends_with(relative))
    }
}

/// First post matched by `post_ref`.
pub fn resolve_post_ref<'a>(post_ref: &PostRef, posts: &'a [PostNode]) -> Option<&'a PostNode> {
    posts.iter().find(|post| post_ref.matches(post))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cms::DocumentSys;

    fn post(id: &str, path: &str) -> PostNode {
        PostNode {
            id: id.into(),
            sys: DocumentSys::from_relative_path(path),
            ..PostNode::default()
        }
    }

    #[test]
    fn test_deserialize_string_and_object() {
        let from_str: PostRef = serde_json::from_str(r#"" hello.json ""#).unwrap();
        assert_eq!(from_str.as_str(), "hello.json");

        let from_obj: PostRef = serde_json::from_str(r#"{ "id": "content/posts/hello.json" }"#).unwrap();
        assert_eq!(from_obj.as_str(), "content/posts/hello.json");

        let empty: PostRef = serde_json::from_str("{}").unwrap();
        assert!(empty.is_empty());
    }

    #[test]
    fn test_match_rules() {
        let target = post("abc-123", "2024/hello.json");

        assert!(PostRef::new("abc-123").matches(&target));
        assert!(PostRef::new("2024/hello.json").matches(&target));
        assert!(PostRef::new("content/posts/2024/hello.json").matches(&target));
        assert!(PostRef::new("/srv/site/content/posts/2024/hello.json").matches(&target));
        assert!(!PostRef::new("hello").matches(&target));
        assert!(!PostRef::new("").matches(&target));
    }

    #[test]
    fn test_suffix_match_is_fuzzy() {
        // a short relative path matches any reference ending with it
        let short = post("x", "hello.json");
        assert!(PostRef::new("content/posts/2024/hello.json").matches(&short));
    }

    #[test]
    fn test_resolve_first_match() {
        let posts = vec![post("a", "a.json"), post("b", "b.json")];
        assert_eq!(resolve_post_ref(&PostRef::new("b.json"), &posts).map(|p| p.id.as_str()), Some("b"));
        assert!(resolve_post_ref(&PostRef::new("c.json"), &posts).is_none());
    }
}

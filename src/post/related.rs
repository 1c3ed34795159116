//! Related posts: other posts sharing at least one tag.

use super::projection::{PostView, ReadingBasis};
use crate::cms::PostNode;

pub const MAX_RELATED: usize = 3;

/// Up to [`MAX_RELATED`] posts sharing a tag with `current`.
///
/// `newest_first` must already be sorted; its order is kept.
pub fn related_posts(current: &PostNode, newest_first: &[PostNode]) -> Vec<PostView> {
    let shares_tag = |other: &PostNode| {
        other
            .tags
            .iter()
            .filter(|tag| !tag.name.is_empty())
            .any(|tag| current.tags.iter().any(|own| own.name == tag.name))
    };

    newest_first
        .iter()
        .filter(|other| other.id != current.id && shares_tag(other))
        .take(MAX_RELATED)
        .map(|other| PostView::project(other, ReadingBasis::Excerpt))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cms::{DocumentSys, TagColor, TagRef};

    fn post(id: &str, tags: &[&str]) -> PostNode {
        PostNode {
            id: id.into(),
            title: id.into(),
            tags: tags
                .iter()
                .map(|name| TagRef {
                    name: (*name).into(),
                    color: TagColor::Default,
                })
                .collect(),
            sys: DocumentSys::from_relative_path(&format!("{id}.json")),
            ..PostNode::default()
        }
    }

    fn ids(views: &[PostView]) -> Vec<&str> {
        views.iter().map(|v| v.id.as_str()).collect()
    }

    #[test]
    fn test_shared_tags_only() {
        let posts = vec![post("a", &["rust"]), post("b", &["go"]), post("c", &["go", "rust"]), post("d", &[])];
        let related = related_posts(&posts[0], &posts);
        assert_eq!(ids(&related), ["c"]);
    }

    #[test]
    fn test_limit_and_order() {
        let posts: Vec<_> = ["p1", "p2", "p3", "p4", "p5"].iter().map(|id| post(id, &["x"])).collect();
        let related = related_posts(&posts[2], &posts);
        assert_eq!(ids(&related), ["p1", "p2", "p4"]);
    }

    #[test]
    fn test_untagged_post_has_no_related() {
        let posts = vec![post("a", &[]), post("b", &["x"])];
        assert!(related_posts(&posts[0], &posts).is_empty());
    }

    #[test]
    fn test_empty_tag_names_do_not_match() {
        let posts = vec![post("a", &[""]), post("b", &[""])];
        assert!(related_posts(&posts[0], &posts).is_empty());
    }
}

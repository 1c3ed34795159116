//! Tag filter and text search over projected posts.
//!
//! Two stages, applied in order:
//!
//! 1. tag: exact, case-sensitive membership in the post's tag names
//! 2. search: case-insensitive substring of title, any tag name, or the
//!    serialized excerpt; skipped when the query is blank
//!
//! Both stages preserve input order and only ever remove posts.

use super::projection::PostView;

/// Keep posts carrying `tag`. `None` keeps everything.
pub fn filter_by_tag<'a>(posts: &[&'a PostView], tag: Option<&str>) -> Vec<&'a PostView> {
    match tag {
        Some(tag) => posts.iter().copied().filter(|post| post.has_tag(tag)).collect(),
        None => posts.to_vec(),
    }
}

/// Keep posts matching `query`. A blank query keeps everything.
pub fn search<'a>(posts: &[&'a PostView], query: &str) -> Vec<&'a PostView> {
    if query.trim().is_empty() {
        return posts.to_vec();
    }

    let needle = query.to_lowercase();
    posts
        .iter()
        .copied()
        .filter(|post| matches_query(post, &needle))
        .collect()
}

/// Both stages.
pub fn filter_posts<'a>(posts: &'a [PostView], tag: Option<&str>, query: &str) -> Vec<&'a PostView> {
    let all: Vec<_> = posts.iter().collect();
    search(&filter_by_tag(&all, tag), query)
}

/// `needle` must already be lowercased.
fn matches_query(post: &PostView, needle: &str) -> bool {
    post.title.to_lowercase().contains(needle)
        || post.tag_names().any(|tag| tag.to_lowercase().contains(needle))
        || post.excerpt_json().to_lowercase().contains(needle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cms::{TagColor, TagRef};
    use crate::richtext::RichText;
    use serde_json::json;

    fn post(title: &str, tags: &[&str], excerpt: Option<&str>) -> PostView {
        PostView {
            id: title.to_lowercase(),
            title: title.into(),
            url: format!("/posts/{}", title.to_lowercase()),
            published: String::new(),
            timestamp: None,
            author: crate::post::projection::AuthorView {
                name: "Anonymous".into(),
                avatar: None,
            },
            hero_img: None,
            excerpt: excerpt.map(|text| RichText::from_value(json!(text))),
            tags: tags
                .iter()
                .map(|name| TagRef {
                    name: (*name).into(),
                    color: TagColor::Default,
                })
                .collect(),
            reading_mins: 1,
        }
    }

    fn titles(posts: &[&PostView]) -> Vec<String> {
        posts.iter().map(|post| post.title.clone()).collect()
    }

    fn corpus() -> Vec<PostView> {
        vec![
            post("Go Basics", &["go"], Some("Goroutines and channels")),
            post("Rust Tips", &["rust"], Some("Ownership explained")),
            post("Async Rust", &["rust", "async"], None),
            post("Tooling", &["Go"], Some("Build systems")),
        ]
    }

    #[test]
    fn test_filter_by_tag_example() {
        let posts = vec![post("Go Basics", &["go"], None), post("Rust Tips", &["rust"], None)];
        assert_eq!(titles(&filter_posts(&posts, Some("go"), "")), ["Go Basics"]);
    }

    #[test]
    fn test_tag_filter_is_case_sensitive() {
        let posts = corpus();
        assert_eq!(titles(&filter_posts(&posts, Some("go"), "")), ["Go Basics"]);
        assert_eq!(titles(&filter_posts(&posts, Some("Go"), "")), ["Tooling"]);
        assert!(filter_posts(&posts, Some("missing"), "").is_empty());
    }

    #[test]
    fn test_search_title_tags_and_excerpt() {
        let posts = corpus();
        assert_eq!(titles(&filter_posts(&posts, None, "RUST")), ["Rust Tips", "Async Rust"]);
        assert_eq!(titles(&filter_posts(&posts, None, "asy")), ["Async Rust"]);
        assert_eq!(titles(&filter_posts(&posts, None, "ownership")), ["Rust Tips"]);
    }

    #[test]
    fn test_search_after_tag() {
        let posts = corpus();
        assert_eq!(titles(&filter_posts(&posts, Some("rust"), "async")), ["Async Rust"]);
        assert!(filter_posts(&posts, Some("go"), "ownership").is_empty());
    }

    #[test]
    fn test_blank_query_returns_tag_filtered_list() {
        let posts = corpus();
        let all: Vec<_> = posts.iter().collect();
        let tagged = filter_by_tag(&all, Some("rust"));
        assert_eq!(search(&tagged, "   "), tagged);
        assert_eq!(filter_posts(&posts, None, "").len(), posts.len());
    }

    #[test]
    fn test_result_is_ordered_subset() {
        let posts = corpus();
        for (tag, query) in [(None, "o"), (Some("rust"), "t"), (Some("go"), "zzz"), (None, "")] {
            let result = filter_posts(&posts, tag, query);
            let mut cursor = posts.iter();
            for kept in result {
                assert!(cursor.any(|post| post == kept), "not an ordered subset");
            }
        }
    }
}

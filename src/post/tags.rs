//! Tag index with post counts.

use crate::cms::{PostNode, TagColor, TagNode};
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagSummary {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub color: TagColor,
    pub count: usize,
}

/// Every named tag with its post count, most used first, ties by name.
pub fn tag_index(tags: &[TagNode], posts: &[PostNode]) -> Vec<TagSummary> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for post in posts {
        for tag in &post.tags {
            *counts.entry(tag.name.as_str()).or_default() += 1;
        }
    }

    let mut index: Vec<_> = tags
        .iter()
        .filter(|tag| !tag.name.is_empty())
        .map(|tag| TagSummary {
            name: tag.name.clone(),
            description: tag.description.clone(),
            color: tag.color,
            count: counts.get(tag.name.as_str()).copied().unwrap_or(0),
        })
        .collect();

    index.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
    index
}

/// Named tags sorted by name, for filter bars and the categories strip.
pub fn tags_by_name(tags: &[TagNode]) -> Vec<&TagNode> {
    let mut sorted: Vec<_> = tags.iter().filter(|tag| !tag.name.is_empty()).collect();
    sorted.sort_by(|a, b| a.name.cmp(&b.name));
    sorted
}

//! Table of contents extraction.
//!
//! Walks a rich-text tree in document order (pre-order, depth first) and
//! emits one [`HeadingEntry`] per non-empty heading.
//!
//! Ids are not deduplicated: two headings with the same text share an id.

pub mod spy;

use crate::richtext::Node;
use crate::utils::slug::slugify_heading;
use serde::Serialize;

/// A table of contents entry derived from a heading node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeadingEntry {
    /// Anchor id, see [`slugify_heading`].
    pub id: String,
    /// Concatenated plain text of the heading.
    pub text: String,
    /// 1 ..= 6
    pub level: u8,
}

/// Extract headings from a document root in document order.
pub fn extract_headings(root: &Node) -> Vec<HeadingEntry> {
    let mut entries = Vec::new();
    visit(root, &mut entries);
    entries
}

fn visit(node: &Node, entries: &mut Vec<HeadingEntry>) {
    if let Node::Heading { level, .. } = node {
        let text = node.plain_text();
        if !text.trim().is_empty() {
            entries.push(HeadingEntry {
                id: slugify_heading(&text),
                text,
                level: *level,
            });
        }
    }

    for child in node.children() {
        visit(child, entries);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::richtext::RichText;
    use serde_json::{Value, json};

    fn headings(value: Value) -> Vec<HeadingEntry> {
        extract_headings(RichText::from_value(value).root())
    }

    fn entry(id: &str, text: &str, level: u8) -> HeadingEntry {
        HeadingEntry {
            id: id.into(),
            text: text.into(),
            level,
        }
    }

    #[test]
    fn test_single_heading() {
        let result = headings(json!({
            "type": "h2",
            "children": [{ "type": "text", "text": "Hello World!" }]
        }));
        assert_eq!(result, vec![entry("hello-world", "Hello World!", 2)]);
    }

    #[test]
    fn test_document_order() {
        let result = headings(json!({
            "type": "root",
            "children": [
                { "type": "h1", "children": [{ "type": "text", "text": "Intro" }] },
                { "type": "p", "children": [{ "type": "text", "text": "body" }] },
                { "type": "h2", "children": [{ "type": "text", "text": "Setup" }] },
                { "type": "blockquote", "children": [
                    { "type": "h3", "children": [{ "type": "text", "text": "Nested" }] }
                ]},
                { "type": "h2", "children": [{ "type": "text", "text": "Usage" }] }
            ]
        }));
        assert_eq!(
            result,
            vec![
                entry("intro", "Intro", 1),
                entry("setup", "Setup", 2),
                entry("nested", "Nested", 3),
                entry("usage", "Usage", 2),
            ]
        );
    }

    #[test]
    fn test_text_concatenates_descendants_ignoring_marks() {
        let result = headings(json!({
            "type": "root",
            "children": [{ "type": "h3", "children": [
                { "type": "text", "text": "Using " },
                { "type": "text", "text": "async", "code": true },
                { "type": "a", "url": "#", "children": [{ "type": "text", "text": " in Rust" }] }
            ]}]
        }));
        assert_eq!(result, vec![entry("using-async-in-rust", "Using async in Rust", 3)]);
    }

    #[test]
    fn test_empty_headings_skipped() {
        let result = headings(json!({
            "type": "root",
            "children": [
                { "type": "h2", "children": [] },
                { "type": "h2" },
                { "type": "h2", "children": [{ "type": "text", "text": "   " }] },
                { "type": "h2", "children": [{ "type": "img", "url": "/a.png" }] }
            ]
        }));
        assert!(result.is_empty());
    }

    #[test]
    fn test_null_and_missing_children_tolerated() {
        let result = headings(json!({
            "type": "root",
            "children": [
                null,
                { "type": "p", "children": null },
                { "type": "h4", "children": [null, { "type": "text", "text": "Kept" }] },
                { "children": [{ "type": "h5", "children": [{ "type": "text", "text": "Deep" }] }] }
            ]
        }));
        assert_eq!(result, vec![entry("kept", "Kept", 4), entry("deep", "Deep", 5)]);
    }

    #[test]
    fn test_duplicate_ids_kept() {
        let result = headings(json!({
            "type": "root",
            "children": [
                { "type": "h2", "children": [{ "type": "text", "text": "Notes" }] },
                { "type": "h2", "children": [{ "type": "text", "text": "notes!" }] }
            ]
        }));
        assert_eq!(result.len(), 2);
        assert_eq!(result[0].id, result[1].id);
    }

    #[test]
    fn test_null_document() {
        assert!(headings(Value::Null).is_empty());
    }

    #[test]
    fn test_extraction_is_deterministic() {
        let doc = json!({
            "type": "root",
            "children": [
                { "type": "h1", "children": [{ "type": "text", "text": "A" }] },
                { "type": "ul", "children": [{ "type": "li", "children": [
                    { "type": "h6", "children": [{ "type": "text", "text": "B c" }] }
                ]}]}
            ]
        });
        let first = headings(doc.clone());
        let second = headings(doc);
        assert_eq!(first, second);
        for heading in &first {
            assert_eq!(slugify_heading(&heading.text), heading.id);
        }
    }
}

//! Rich-text document tree.
//!
//! The CMS stores formatted content as a JSON tree:
//!
//! ```json
//! { "type": "root", "children": [
//!     { "type": "h2", "children": [{ "type": "text", "text": "Hello" }] },
//!     { "type": "p",  "children": [{ "type": "text", "text": "World", "bold": true }] }
//! ]}
//! ```
//!
//! Decoding is tolerant: `null` nodes, missing `children` and unknown node
//! types never fail, they are skipped or kept as [`Node::Other`]. The raw
//! JSON is kept alongside the decoded tree because search and reading-time
//! estimation work on its serialized form.

pub mod html;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

// ============================================================================
// Node
// ============================================================================

/// Inline formatting flags carried by text nodes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Marks {
    pub bold: bool,
    pub italic: bool,
    pub code: bool,
    pub underline: bool,
    pub strikethrough: bool,
}

/// A decoded rich-text node.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Root { children: Vec<Node> },
    Text { text: String, marks: Marks },
    /// `h1` ..= `h6`
    Heading { level: u8, children: Vec<Node> },
    Paragraph { children: Vec<Node> },
    List { ordered: bool, children: Vec<Node> },
    ListItem { children: Vec<Node> },
    Blockquote { children: Vec<Node> },
    Link { url: String, children: Vec<Node> },
    CodeBlock { lang: Option<String>, value: String },
    Image { url: String, alt: String },
    Break,
    Rule,
    /// Custom component (`mdxJsxFlowElement` / `mdxJsxTextElement`).
    Embed { name: String, props: Value, children: Vec<Node> },
    /// Anything else; children are still walked.
    Other { kind: String, children: Vec<Node> },
}

impl Node {
    /// Decode a node, returning `None` for `null` and non-object values.
    pub fn from_value(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;
        let kind = obj.get("type").and_then(Value::as_str).unwrap_or_default();
        let children = || children_of(value);
        let str_field = |key: &str| {
            obj.get(key)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_owned()
        };
        let flag = |key: &str| obj.get(key).and_then(Value::as_bool).unwrap_or(false);

        let node = match kind {
            "root" => Self::Root { children: children() },
            "text" => Self::Text {
                text: str_field("text"),
                marks: Marks {
                    bold: flag("bold"),
                    italic: flag("italic"),
                    code: flag("code"),
                    underline: flag("underline"),
                    strikethrough: flag("strikethrough"),
                },
            },
            "p" => Self::Paragraph { children: children() },
            "ul" | "ol" => Self::List {
                ordered: kind == "ol",
                children: children(),
            },
            "li" => Self::ListItem { children: children() },
            "blockquote" => Self::Blockquote { children: children() },
            "a" => Self::Link {
                url: str_field("url"),
                children: children(),
            },
            "code_block" => Self::CodeBlock {
                lang: obj
                    .get("lang")
                    .and_then(Value::as_str)
                    .filter(|lang| !lang.is_empty())
                    .map(str::to_owned),
                value: str_field("value"),
            },
            "img" => Self::Image {
                url: str_field("url"),
                alt: str_field("alt"),
            },
            "break" => Self::Break,
            "hr" => Self::Rule,
            "mdxJsxFlowElement" | "mdxJsxTextElement" => Self::Embed {
                name: str_field("name"),
                props: obj.get("props").cloned().unwrap_or(Value::Null),
                children: children(),
            },
            _ => match heading_level(kind) {
                Some(level) => Self::Heading {
                    level,
                    children: children(),
                },
                None => Self::Other {
                    kind: kind.to_owned(),
                    children: children(),
                },
            },
        };
        Some(node)
    }

    /// Child nodes; leaves return an empty slice.
    pub fn children(&self) -> &[Node] {
        match self {
            Self::Root { children }
            | Self::Heading { children, .. }
            | Self::Paragraph { children }
            | Self::List { children, .. }
            | Self::ListItem { children }
            | Self::Blockquote { children }
            | Self::Link { children, .. }
            | Self::Embed { children, .. }
            | Self::Other { children, .. } => children,
            Self::Text { .. } | Self::CodeBlock { .. } | Self::Image { .. } | Self::Break | Self::Rule => &[],
        }
    }

    /// Concatenated text of every descendant text node, marks ignored.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Self::Text { text, .. } => out.push_str(text),
            _ => self.children().iter().for_each(|child| child.collect_text(out)),
        }
    }
}

/// `"h1"` ..= `"h6"` to its level.
fn heading_level(kind: &str) -> Option<u8> {
    match kind.as_bytes() {
        [b'h', digit @ b'1'..=b'6'] => Some(digit - b'0'),
        _ => None,
    }
}

/// Decode the `children` array of a raw node, skipping `null` entries.
fn children_of(value: &Value) -> Vec<Node> {
    value
        .get("children")
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(Node::from_value).collect())
        .unwrap_or_default()
}

// ============================================================================
// RichText
// ============================================================================

/// A rich-text field: raw JSON plus its decoded tree.
///
/// A bare string is accepted too and becomes a single paragraph.
#[derive(Debug, Clone, PartialEq)]
pub struct RichText {
    raw: Value,
    root: Node,
}

impl Default for RichText {
    fn default() -> Self {
        Self::from_value(Value::Null)
    }
}

impl RichText {
    pub fn from_value(raw: Value) -> Self {
        let root = match &raw {
            Value::String(text) => Node::Root {
                children: vec![Node::Paragraph {
                    children: vec![Node::Text {
                        text: text.clone(),
                        marks: Marks::default(),
                    }],
                }],
            },
            other => Node::from_value(other)
                .map(|node| match node {
                    Node::Root { .. } => node,
                    node => Node::Root { children: vec![node] },
                })
                .unwrap_or(Node::Root { children: Vec::new() }),
        };
        Self { raw, root }
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn raw(&self) -> &Value {
        &self.raw
    }

    /// Serialized JSON form, used for search matching and word counts.
    pub fn to_json_string(&self) -> String {
        self.raw.to_string()
    }

    /// Raw string content when the field was stored as a plain string.
    pub fn as_plain_str(&self) -> Option<&str> {
        self.raw.as_str()
    }

    pub fn is_empty(&self) -> bool {
        self.root.children().is_empty()
    }
}

impl<'de> Deserialize<'de> for RichText {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(Self::from_value)
    }
}

impl Serialize for RichText {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.raw.serialize(serializer)
    }
}

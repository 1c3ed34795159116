//! Rich-text to HTML.
//!
//! Headings get an `id` computed the same way the table of contents computes
//! it, so every TOC link has a matching anchor.
//!
//! Embedded components render by name:
//!
//! | Name               | Props                                                  |
//! |--------------------|--------------------------------------------------------|
//! | `BlockQuote`       | `children` (rich text), `authorName`                   |
//! | `DateTime`         | `format`: `iso`, `utc`, `local`                        |
//! | `NewsletterSignup` | `children`, `placeholder`, `buttonText`, `disclaimer`  |
//! | `video`            | `url`, `autoPlay`, `loop`                              |
//! | `mermaid`          | `value`                                                |
//!
//! Code blocks tagged `mermaid` render as diagrams too. Any other component
//! keeps a `data-embed` wrapper around its children.

use super::{Marks, Node, RichText};
use crate::utils::{date::DateTimeUtc, slug::slugify_heading, xml::escape_xml};
use serde_json::Value;
use std::fmt::Write;

/// Class picked up by the client-side diagram renderer.
pub const MERMAID_CLASS: &str = "mermaid";

/// Render a node tree to an HTML fragment.
pub fn render(node: &Node) -> String {
    let mut out = String::with_capacity(1024);
    write_node(&mut out, node);
    out
}

fn write_children(out: &mut String, node: &Node) {
    for child in node.children() {
        write_node(out, child);
    }
}

fn write_wrapped(out: &mut String, tag: &str, node: &Node) {
    let _ = write!(out, "<{tag}>");
    write_children(out, node);
    let _ = write!(out, "</{tag}>");
}

fn write_node(out: &mut String, node: &Node) {
    match node {
        Node::Root { .. } => write_children(out, node),
        Node::Text { text, marks } => write_text(out, text, *marks),
        Node::Heading { level, .. } => {
            let text = node.plain_text();
            if text.trim().is_empty() {
                let _ = write!(out, "<h{level}>");
            } else {
                let _ = write!(out, r#"<h{level} id="{}">"#, slugify_heading(&text));
            }
            write_children(out, node);
            let _ = write!(out, "</h{level}>");
        }
        Node::Paragraph { .. } => write_wrapped(out, "p", node),
        Node::List { ordered, .. } => write_wrapped(out, if *ordered { "ol" } else { "ul" }, node),
        Node::ListItem { .. } => write_wrapped(out, "li", node),
        Node::Blockquote { .. } => write_wrapped(out, "blockquote", node),
        Node::Link { url, .. } => {
            let _ = write!(out, r#"<a href="{}">"#, escape_xml(url));
            write_children(out, node);
            out.push_str("</a>");
        }
        Node::CodeBlock { lang, value } if lang.as_deref() == Some("mermaid") => write_mermaid(out, value),
        Node::CodeBlock { lang, value } => {
            match lang {
                Some(lang) => {
                    let _ = write!(out, r#"<pre><code class="language-{}">"#, escape_xml(lang));
                }
                None => out.push_str("<pre><code>"),
            }
            out.push_str(&escape_xml(value));
            out.push_str("</code></pre>");
        }
        Node::Image { url, alt } => {
            let _ = write!(
                out,
                r#"<img src="{}" alt="{}" loading="lazy">"#,
                escape_xml(url),
                escape_xml(alt)
            );
        }
        Node::Break => out.push_str("<br>"),
        Node::Rule => out.push_str("<hr>"),
        Node::Embed { name, props, .. } => write_embed(out, name, props, node),
        // `lic` (list item content) and unknown wrappers render their children only
        Node::Other { .. } => write_children(out, node),
    }
}

fn write_embed(out: &mut String, name: &str, props: &Value, node: &Node) {
    match name {
        "BlockQuote" => {
            out.push_str("<div><blockquote>");
            write_rich_prop(out, props, "children");
            out.push_str(&escape_xml(prop_str(props, "authorName")));
            out.push_str("</blockquote></div>");
        }
        "DateTime" => {
            let format = props.get("format").and_then(Value::as_str);
            let _ = write!(out, "<span>{}</span>", DateTimeUtc::now().to_embed_format(format));
        }
        "NewsletterSignup" => {
            out.push_str(r#"<div class="newsletter-signup"><div class="intro">"#);
            write_rich_prop(out, props, "children");
            let _ = write!(
                out,
                concat!(
                    r#"</div><form><label for="email-address" class="sr-only">Email address</label>"#,
                    r#"<input id="email-address" name="email-address" type="email" autocomplete="email" required placeholder="{}">"#,
                    r#"<button type="submit">{}</button></form>"#
                ),
                escape_xml(prop_str(props, "placeholder")),
                escape_xml(prop_str(props, "buttonText"))
            );
            if props.get("disclaimer").is_some_and(|d| !d.is_null()) {
                out.push_str(r#"<div class="disclaimer">"#);
                write_rich_prop(out, props, "disclaimer");
                out.push_str("</div>");
            }
            out.push_str("</div>");
        }
        "video" => {
            let url = prop_str(props, "url");
            if url.is_empty() {
                return;
            }
            let flag = |key: &str| props.get(key).and_then(Value::as_bool).unwrap_or(false);
            let _ = write!(out, r#"<div class="video"><video src="{}" controls playsinline"#, escape_xml(url));
            if flag("autoPlay") {
                // browsers only autoplay muted video
                out.push_str(" autoplay muted");
            }
            if flag("loop") {
                out.push_str(" loop");
            }
            out.push_str("></video></div>");
        }
        "mermaid" => write_mermaid(out, prop_str(props, "value")),
        _ => {
            let _ = write!(out, r#"<div data-embed="{}">"#, escape_xml(name));
            write_children(out, node);
            out.push_str("</div>");
        }
    }
}

fn write_mermaid(out: &mut String, source: &str) {
    let _ = write!(
        out,
        r#"<div class="diagram"><pre class="{MERMAID_CLASS}">{}</pre></div>"#,
        escape_xml(source)
    );
}

fn prop_str<'a>(props: &'a Value, key: &str) -> &'a str {
    props.get(key).and_then(Value::as_str).unwrap_or_default()
}

/// A prop holding a rich-text document, rendered in place.
fn write_rich_prop(out: &mut String, props: &Value, key: &str) {
    if let Some(value) = props.get(key).filter(|value| !value.is_null()) {
        write_node(out, RichText::from_value(value.clone()).root());
    }
}

fn write_text(out: &mut String, text: &str, marks: Marks) {
    let tags = [
        (marks.bold, "strong"),
        (marks.italic, "em"),
        (marks.underline, "u"),
        (marks.strikethrough, "s"),
        (marks.code, "code"),
    ];
    for (on, tag) in tags {
        if on {
            let _ = write!(out, "<{tag}>");
        }
    }
    out.push_str(&escape_xml(text));
    for (on, tag) in tags.iter().rev() {
        if *on {
            let _ = write!(out, "</{tag}>");
        }
    }
}

//! Post page: header, hero, table of contents, body, related posts and
//! comments.

use super::{CardOptions, RenderContext, comments::render_comments, post_card, post_meta, tag_badge};
use crate::{
    cms::PostNode,
    post::{ReadingBasis, PostView, related::related_posts},
    richtext::html,
    toc::{HeadingEntry, extract_headings, spy::SCROLL_OFFSET},
    utils::xml::escape_xml,
};
use std::fmt::Write;

/// Scroll-spy script (embedded at compile time)
const SPY_SCRIPT: &str = include_str!("../embed/toc-spy.js");

/// Diagram renderer, only loaded by posts that contain a diagram
const MERMAID_SCRIPT: &str = include_str!("../embed/mermaid.js");

/// Indent per heading level in the table of contents, in px.
const TOC_INDENT: u8 = 12;

pub fn render_post(ctx: &RenderContext<'_>, post: &PostNode) -> String {
    let view = PostView::project(post, ReadingBasis::Body);
    let headings = post
        .body
        .as_ref()
        .map(|body| extract_headings(body.root()))
        .unwrap_or_default();

    let mut out = String::with_capacity(8192);
    out.push_str(r#"<article class="post">"#);
    header(&mut out, &view);
    if !headings.is_empty() {
        table_of_contents(&mut out, &headings);
    }
    out.push_str(r#"<div id="content" class="prose">"#);
    let body = post.body.as_ref().map(|body| html::render(body.root())).unwrap_or_default();
    out.push_str(&body);
    out.push_str("</div></article>");
    if body.contains(&format!(r#"<pre class="{}">"#, html::MERMAID_CLASS)) {
        let _ = write!(out, r#"<script type="module">{MERMAID_SCRIPT}</script>"#);
    }

    let related = related_posts(post, ctx.posts);
    if !related.is_empty() {
        out.push_str(r#"<section class="related"><h2>Related Articles</h2><div class="post-list">"#);
        for view in &related {
            post_card(
                &mut out,
                view,
                CardOptions {
                    show_tags: true,
                    show_excerpt: false,
                },
            );
        }
        out.push_str("</div></section>");
    }

    out.push_str(&render_comments(&ctx.config.comments));
    out
}

fn header(out: &mut String, view: &PostView) {
    let _ = write!(out, "<header><h1>{}</h1>", escape_xml(&view.title));
    post_meta(out, view);
    if !view.tags.is_empty() {
        out.push_str(r#"<div class="tags">"#);
        for tag in &view.tags {
            tag_badge(out, &tag.name, tag.color);
        }
        out.push_str("</div>");
    }
    if let Some(src) = &view.hero_img {
        let _ = write!(
            out,
            r#"<img class="hero" src="{}" alt="{}">"#,
            escape_xml(src),
            escape_xml(&view.title)
        );
    }
    out.push_str("</header>");
}

fn table_of_contents(out: &mut String, headings: &[HeadingEntry]) {
    out.push_str(r#"<nav class="toc" aria-label="Table of contents"><h2>On this page</h2>"#);
    for heading in headings {
        let _ = write!(
            out,
            r##"<a href="#{}" data-level="{}" style="padding-left: {}px">{}</a>"##,
            escape_xml(&heading.id),
            heading.level,
            u16::from(heading.level.saturating_sub(1)) * u16::from(TOC_INDENT),
            escape_xml(&heading.text)
        );
    }
    #[allow(clippy::literal_string_with_formatting_args)]
    // Template placeholder, not a format arg
    let script = SPY_SCRIPT.replace("{offset}", &SCROLL_OFFSET.to_string());
    let _ = write!(out, "</nav><script>{script}</script>");
}

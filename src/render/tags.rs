//! `/tags` index.

use super::{RenderContext, tag_href};
use crate::{post::tags::tag_index, utils::xml::escape_xml};
use std::fmt::Write;

pub fn render_tags(ctx: &RenderContext<'_>) -> String {
    let summaries = tag_index(ctx.tags, ctx.posts);

    let mut out = String::from(
        r#"<section class="tag-index"><h1>All Tags</h1><p>Browse all topics and categories</p>"#,
    );
    if summaries.is_empty() {
        out.push_str(r#"<p class="empty">No tags found.</p></section>"#);
        return out;
    }

    out.push_str(r#"<div class="tag-grid">"#);
    for tag in &summaries {
        let _ = write!(
            out,
            r#"<a class="tag-card" href="{}"><span class="tag tag-{}">{}</span><span class="count">{} {}</span>"#,
            escape_xml(&tag_href(&tag.name)),
            tag.color.as_str(),
            escape_xml(&tag.name),
            tag.count,
            if tag.count == 1 { "post" } else { "posts" }
        );
        if let Some(description) = &tag.description {
            let _ = write!(out, "<p>{}</p>", escape_xml(description));
        }
        out.push_str("</a>");
    }
    out.push_str("</div></section>");
    out
}

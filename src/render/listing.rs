//! `/posts` listing: search form, tag filter bar, cards and "load more".
//!
//! The view-filter state comes from the query string, so every control is
//! a plain link or a GET form.

use super::{CardOptions, POSTS_PATH, RenderContext, post_card};
use crate::{
    cms::TagNode,
    post::{
        ReadingBasis,
        pagination::{ListingPage, ListingState},
        projection::project_all,
        tags::tags_by_name,
    },
    utils::xml::escape_xml,
};
use std::fmt::Write;

const SEARCH_PLACEHOLDER: &str = "Search posts by title, tag, or excerpt...";
const NO_POSTS: &str = "No posts found. Try adjusting your search or filters.";

pub fn render_listing(ctx: &RenderContext<'_>) -> String {
    let state = ListingState::from_query(ctx.query, ctx.config.listing_pagination());
    let views = project_all(ctx.posts, ReadingBasis::Body);
    let page = state.apply(&views);

    let mut out = String::with_capacity(4096);
    out.push_str(r#"<section class="listing">"#);
    search_form(&mut out, &state, POSTS_PATH);
    filter_bar(&mut out, &state, &tags_by_name(ctx.tags), POSTS_PATH, "All Posts");
    if state.has_filters() {
        let mut cleared = state.clone();
        cleared.clear_filters();
        let _ = write!(
            out,
            r#"<a class="clear-filters" href="{}">Clear filters</a>"#,
            escape_xml(&cleared.href(POSTS_PATH))
        );
    }
    post_grid(&mut out, &state, &page, POSTS_PATH, "Load More Articles");
    out.push_str("</section>");
    out
}

/// GET form carrying the selected tag alongside the query.
pub(super) fn search_form(out: &mut String, state: &ListingState, base: &str) {
    let _ = write!(out, r#"<form class="search" action="{}" method="get">"#, escape_xml(base));
    if let Some(tag) = &state.selected_tag {
        let _ = write!(out, r#"<input type="hidden" name="tag" value="{}">"#, escape_xml(tag));
    }
    let _ = write!(
        out,
        r#"<input type="search" name="q" value="{}" placeholder="{SEARCH_PLACEHOLDER}"><button type="submit">Search</button></form>"#,
        escape_xml(&state.search_query)
    );
}

/// "All" link followed by one toggle link per tag.
pub(super) fn filter_bar(out: &mut String, state: &ListingState, tags: &[&TagNode], base: &str, all_label: &str) {
    let active = |selected: bool| if selected { r#" class="active""# } else { "" };

    let _ = write!(
        out,
        r#"<nav class="tag-filter"><a href="{}"{}>{all_label}</a>"#,
        escape_xml(base),
        active(state.selected_tag.is_none())
    );
    for tag in tags {
        let _ = write!(
            out,
            r#"<a href="{}"{}>{}</a>"#,
            escape_xml(&state.toggle_tag_href(base, &tag.name)),
            active(state.selected_tag.as_deref() == Some(tag.name.as_str())),
            escape_xml(&tag.name)
        );
    }
    out.push_str("</nav>");
}

/// Visible cards, then "load more" or the empty message.
pub(super) fn post_grid(out: &mut String, state: &ListingState, page: &ListingPage<'_>, base: &str, more_label: &str) {
    out.push_str(r#"<div class="post-list">"#);
    for post in &page.visible {
        post_card(
            out,
            post,
            CardOptions {
                show_tags: true,
                show_excerpt: true,
            },
        );
    }
    out.push_str("</div>");

    if page.has_more {
        let _ = write!(
            out,
            r#"<a class="load-more" href="{}">{more_label}</a>"#,
            escape_xml(&state.load_more_href(base))
        );
    }
    if page.total == 0 {
        let _ = write!(out, r#"<p class="empty">{NO_POSTS}</p>"#);
    }
}

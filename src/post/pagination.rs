//! "Load more" pagination and the listing's view-filter state.
//!
//! The visible slice is always a prefix of the filtered list. The HTTP
//! surface is stateless, so the state round-trips through the query string:
//!
//! ```text
//! /posts?tag=rust&q=async&count=8
//! ```

use super::filter::filter_posts;
use super::projection::PostView;
use std::fmt::Write;

/// Posts shown on `/posts` before any "load more".
pub const LISTING_INITIAL: usize = 4;
/// Posts added per "load more" on `/posts`.
pub const LISTING_STEP: usize = 4;
/// Blog grid page size when the block does not set one.
pub const BLOG_GRID_DEFAULT: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    initial: usize,
    step: usize,
    displayed: usize,
}

impl Pagination {
    /// Both values are clamped to at least 1.
    pub fn new(initial: usize, step: usize) -> Self {
        let initial = initial.max(1);
        Self {
            initial,
            step: step.max(1),
            displayed: initial,
        }
    }

    /// Restore a displayed count, never below the initial count.
    #[must_use]
    pub fn with_displayed(mut self, displayed: usize) -> Self {
        self.displayed = displayed.max(self.initial);
        self
    }

    pub fn load_more(&mut self) {
        self.displayed = self.displayed.saturating_add(self.step);
    }

    pub fn reset(&mut self) {
        self.displayed = self.initial;
    }

    pub const fn displayed(&self) -> usize {
        self.displayed
    }

    pub const fn initial(&self) -> usize {
        self.initial
    }

    pub const fn has_more(&self, len: usize) -> bool {
        self.displayed < len
    }

    /// The prefix `[0, displayed)`.
    pub fn visible<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        &items[..self.displayed.min(items.len())]
    }
}

/// Search query, selected tag and displayed count for a listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingState {
    pub search_query: String,
    pub selected_tag: Option<String>,
    pub pagination: Pagination,
}

/// Result of applying a [`ListingState`] to a post list.
#[derive(Debug)]
pub struct ListingPage<'a> {
    pub visible: Vec<&'a PostView>,
    /// Size of the filtered list.
    pub total: usize,
    pub has_more: bool,
}

impl ListingState {
    pub fn new(pagination: Pagination) -> Self {
        Self {
            search_query: String::new(),
            selected_tag: None,
            pagination,
        }
    }

    /// Parse `tag`, `q` and `count` from a raw query string.
    ///
    /// Unknown keys and unparsable counts are ignored.
    pub fn from_query(query: &str, pagination: Pagination) -> Self {
        let mut state = Self::new(pagination);
        for (key, value) in parse_query(query) {
            match key.as_str() {
                "tag" if !value.is_empty() => state.selected_tag = Some(value),
                "q" => state.search_query = value,
                "count" => {
                    if let Ok(count) = value.parse() {
                        state.pagination = state.pagination.with_displayed(count);
                    }
                }
                _ => {}
            }
        }
        state
    }

    /// Filter, then take the visible prefix.
    pub fn apply<'a>(&self, posts: &'a [PostView]) -> ListingPage<'a> {
        let filtered = filter_posts(posts, self.selected_tag.as_deref(), &self.search_query);
        let total = filtered.len();
        let visible = self.pagination.visible(&filtered).to_vec();
        ListingPage {
            visible,
            total,
            has_more: self.pagination.has_more(total),
        }
    }

    pub fn has_filters(&self) -> bool {
        self.selected_tag.is_some() || !self.search_query.trim().is_empty()
    }

    /// Drop the query and tag and restore the initial count.
    pub fn clear_filters(&mut self) {
        self.search_query.clear();
        self.selected_tag = None;
        self.pagination.reset();
    }

    /// Link showing one more page with the same filters.
    pub fn load_more_href(&self, base: &str) -> String {
        let mut next = self.clone();
        next.pagination.load_more();
        next.href(base)
    }

    /// Link selecting `tag`, or clearing it when it is already selected.
    pub fn toggle_tag_href(&self, base: &str, tag: &str) -> String {
        if self.selected_tag.as_deref() == Some(tag) {
            base.to_owned()
        } else {
            format!("{base}?tag={}", urlencoding::encode(tag))
        }
    }

    /// Link reproducing this state.
    pub fn href(&self, base: &str) -> String {
        let mut params = Vec::new();
        if let Some(tag) = &self.selected_tag {
            params.push(format!("tag={}", urlencoding::encode(tag)));
        }
        if !self.search_query.is_empty() {
            params.push(format!("q={}", urlencoding::encode(&self.search_query)));
        }
        if self.pagination.displayed() != self.pagination.initial() {
            params.push(format!("count={}", self.pagination.displayed()));
        }

        let mut href = base.to_owned();
        if !params.is_empty() {
            let _ = write!(href, "?{}", params.join("&"));
        }
        href
    }
}

/// Decode `a=1&b=two+words` into key/value pairs.
pub fn parse_query(query: &str) -> Vec<(String, String)> {
    let decode = |raw: &str| {
        let raw = raw.replace('+', " ");
        urlencoding::decode(&raw).map_or(raw.clone(), |s| s.into_owned())
    };

    query
        .trim_start_matches('?')
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| match pair.split_once('=') {
            Some((key, value)) => (decode(key), decode(value)),
            None => (decode(pair), String::new()),
        })
        .collect()
}

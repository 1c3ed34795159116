//! HTML rendering.
//!
//! Every view takes a [`RenderContext`] holding the site config, the
//! newest-first post list, the tags and pages, and the current request.
//! Views return HTML strings; [`render_route`] wraps them in the site shell.
//!
//! ```text
//! /                 ──► home page blocks
//! /posts            ──► listing (tag, q, count from the query string)
//! /posts/<crumbs>   ──► post
//! /tags             ──► tag index
//! /<crumbs>         ──► page blocks
//! ```

pub mod blocks;
mod comments;
pub mod listing;
pub mod post;
mod tags;

use crate::{
    cms::{ContentSource, PageNode, PostNode, TagColor, TagNode},
    config::SiteConfig,
    generator::{FeedError, collect_all_posts},
    post::projection::PostView,
    richtext::html,
    utils::xml::escape_xml,
};
use regex::{Captures, Regex};
use std::{fmt::Write, sync::LazyLock};

/// Site shell (embedded at compile time)
const LAYOUT_TEMPLATE: &str = include_str!("../embed/layout.html");

/// `{name}` placeholder in the site shell.
static RE_PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\{([a-z_]+)\}").unwrap());

/// Base path of the listing view.
pub const POSTS_PATH: &str = "/posts";

// ============================================================================
// Site Content
// ============================================================================

/// Everything the HTML views read, fetched once per request or build.
#[derive(Debug, Clone, Default)]
pub struct SiteContent {
    /// Newest first.
    pub posts: Vec<PostNode>,
    pub tags: Vec<TagNode>,
    pub pages: Vec<PageNode>,
}

impl SiteContent {
    pub fn load<S: ContentSource + ?Sized>(source: &S, page_size: usize) -> Result<Self, FeedError> {
        Ok(Self {
            posts: collect_all_posts(source, page_size)?,
            tags: source.tags()?,
            pages: source.pages()?,
        })
    }

    pub fn context<'a>(&'a self, config: &'a SiteConfig) -> RenderContext<'a> {
        RenderContext::new(config, &self.posts, &self.tags, &self.pages)
    }
}

// ============================================================================
// Render Context
// ============================================================================

/// Everything a view may read while rendering one request.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub config: &'a SiteConfig,
    /// Newest first.
    pub posts: &'a [PostNode],
    pub tags: &'a [TagNode],
    pub pages: &'a [PageNode],
    /// Request path without the query string.
    pub path: &'a str,
    /// Raw query string, without the leading `?`.
    pub query: &'a str,
}

impl<'a> RenderContext<'a> {
    pub fn new(config: &'a SiteConfig, posts: &'a [PostNode], tags: &'a [TagNode], pages: &'a [PageNode]) -> Self {
        Self {
            config,
            posts,
            tags,
            pages,
            path: "/",
            query: "",
        }
    }

    /// Same content, different request.
    #[must_use]
    pub fn at(self, path: &'a str, query: &'a str) -> Self {
        Self { path, query, ..self }
    }

    /// Post whose breadcrumbs join to `crumbs`.
    pub fn find_post(&self, crumbs: &str) -> Option<&'a PostNode> {
        self.posts
            .iter()
            .find(|post| post.sys.breadcrumbs.join("/") == crumbs)
    }

    /// Page served at `path`.
    pub fn find_page(&self, path: &str) -> Option<&'a PageNode> {
        self.pages.iter().find(|page| page.url() == path)
    }
}

// ============================================================================
// Routing
// ============================================================================

/// HTML routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route<'a> {
    Posts,
    /// Post breadcrumbs joined with `/`.
    Post(&'a str),
    Tags,
    /// Page route path, `/` for home.
    Page(&'a str),
}

impl<'a> Route<'a> {
    /// Classify a request path (no query string).
    pub fn parse(path: &'a str) -> Self {
        let trimmed = path.trim_matches('/');
        match trimmed {
            "posts" => Self::Posts,
            "tags" => Self::Tags,
            "" => Self::Page("/"),
            _ => match trimmed.strip_prefix("posts/") {
                Some(crumbs) => Self::Post(crumbs),
                None => Self::Page(path.trim_end_matches('/')),
            },
        }
    }
}

/// Render a full HTML document, or `None` when nothing lives at the route.
pub fn render_route(ctx: &RenderContext<'_>, route: Route<'_>) -> Option<String> {
    let config = ctx.config;
    match route {
        Route::Posts => Some(shell(config, "Posts", &listing::render_listing(ctx))),
        Route::Tags => Some(shell(config, "All Tags", &tags::render_tags(ctx))),
        Route::Post(crumbs) => {
            let post = ctx.find_post(crumbs)?;
            Some(shell(config, &post.title, &post::render_post(ctx, post)))
        }
        Route::Page(path) => {
            let page = ctx.find_page(path)?;
            let title = page.title.as_deref().unwrap_or(&config.base.title);
            Some(shell(config, title, &blocks::render_blocks(ctx, &page.blocks)))
        }
    }
}

// ============================================================================
// Shell
// ============================================================================

/// Wrap a `<main>` fragment in the site layout.
pub fn shell(config: &SiteConfig, title: &str, main: &str) -> String {
    let base = &config.base;
    let title = if title == base.title {
        base.title.clone()
    } else {
        format!("{title} | {}", base.title)
    };

    let mut nav = format!(r#"<li><a href="{POSTS_PATH}">Posts</a></li><li><a href="/tags">Tags</a></li>"#);
    let mut feed_link = String::new();
    if config.feed.enable {
        let _ = write!(nav, r#"<li><a href="{}">RSS</a></li>"#, escape_xml(&config.feed.path));
        feed_link = format!(
            r#"<link rel="alternate" type="application/rss+xml" title="{}" href="{}">"#,
            escape_xml(&base.title),
            escape_xml(&config.feed.path)
        );
    }

    let footer = if base.copyright.is_empty() {
        format!("&copy; {}", escape_xml(&base.title))
    } else {
        escape_xml(&base.copyright).into_owned()
    };

    let lang = escape_xml(&base.language);
    let title = escape_xml(&title);
    let description = escape_xml(&base.description);
    let site_title = escape_xml(&base.title);

    // One pass over the template: substituted text is never scanned again,
    // so a title like `{main}` stays literal.
    RE_PLACEHOLDER
        .replace_all(LAYOUT_TEMPLATE, |caps: &Captures| {
            match &caps[1] {
                "lang" => &*lang,
                "title" => &*title,
                "description" => &*description,
                "feed_link" => feed_link.as_str(),
                "site_title" => &*site_title,
                "nav" => nav.as_str(),
                "footer" => footer.as_str(),
                "main" => main,
                _ => &caps[0],
            }
            .to_owned()
        })
        .into_owned()
}

// ============================================================================
// Shared Fragments
// ============================================================================

/// `/posts?tag=<name>`
pub fn tag_href(name: &str) -> String {
    format!("{POSTS_PATH}?tag={}", urlencoding::encode(name))
}

/// Tag link styled by colour.
pub fn tag_badge(out: &mut String, name: &str, color: TagColor) {
    let _ = write!(
        out,
        r#"<a class="tag tag-{}" href="{}">{}</a>"#,
        color.as_str(),
        escape_xml(&tag_href(name)),
        escape_xml(name)
    );
}

/// Card options for [`post_card`].
#[derive(Debug, Clone, Copy, Default)]
pub struct CardOptions {
    pub show_tags: bool,
    pub show_excerpt: bool,
}

/// Post summary card used by listings and blocks.
pub fn post_card(out: &mut String, post: &PostView, options: CardOptions) {
    let url = escape_xml(&post.url);
    let title = escape_xml(&post.title);

    out.push_str(r#"<article class="post-card">"#);
    if let Some(src) = &post.hero_img {
        let _ = write!(
            out,
            r#"<a class="card-image" href="{url}"><img src="{}" alt="{title}" loading="lazy"></a>"#,
            escape_xml(src)
        );
    }
    if options.show_tags && !post.tags.is_empty() {
        out.push_str(r#"<div class="tags">"#);
        for tag in &post.tags {
            tag_badge(out, &tag.name, tag.color);
        }
        out.push_str("</div>");
    }
    let _ = write!(out, r#"<h3><a href="{url}">{title}</a></h3>"#);
    if options.show_excerpt
        && let Some(excerpt) = &post.excerpt
    {
        let _ = write!(out, r#"<div class="excerpt">{}</div>"#, html::render(excerpt.root()));
    }
    post_meta(out, post);
    let _ = write!(out, r#"<a class="read-more" href="{url}">Read more</a></article>"#);
}

/// Author, date and reading time line.
pub fn post_meta(out: &mut String, post: &PostView) {
    out.push_str(r#"<p class="meta">"#);
    if let Some(avatar) = &post.author.avatar {
        let _ = write!(
            out,
            r#"<img class="avatar" src="{}" alt="{}">"#,
            escape_xml(avatar),
            escape_xml(&post.author.name)
        );
    }
    let _ = write!(out, r#"<span class="author">{}</span>"#, escape_xml(&post.author.name));
    if !post.published.is_empty() {
        let _ = write!(out, "<time>{}</time>", post.published);
    }
    let _ = write!(out, r#"<span class="reading-time">{} min read</span></p>"#, post.reading_mins);
}

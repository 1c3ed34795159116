//! Page block rendering.
//!
//! Post-backed blocks (`featured`, `recent`, `blog_grid`, `categories`)
//! render nothing when there is nothing to show.

use super::{
    CardOptions, RenderContext,
    listing::{filter_bar, post_grid},
    post_card, tag_badge,
};
use crate::{
    cms::block::{
        Block, BlogGridBlock, CalloutBlock, CategoriesBlock, ContentBlock, FeaturedBlock, HeroBlock, ImageBlock,
        NewsletterBlock, RecentBlock, RssBlock,
    },
    post::{
        PostView, ReadingBasis,
        pagination::{BLOG_GRID_DEFAULT, ListingState, Pagination},
        projection::project_all,
        resolve::resolve_post_ref,
        tags::tags_by_name,
    },
    richtext::html,
    utils::xml::escape_xml,
};
use std::fmt::Write;

/// Render blocks in order.
pub fn render_blocks(ctx: &RenderContext<'_>, blocks: &[Block]) -> String {
    blocks.iter().map(|block| render_block(ctx, block)).collect()
}

pub fn render_block(ctx: &RenderContext<'_>, block: &Block) -> String {
    match block {
        Block::Hero(data) => hero(data),
        Block::Content(data) => content(data),
        Block::Featured(data) => featured(ctx, data),
        Block::Recent(data) => recent(ctx, data),
        Block::BlogGrid(data) => blog_grid(ctx, data),
        Block::Categories(data) => categories(ctx, data),
        Block::Rss(data) => rss(ctx, data),
        Block::Newsletter(data) => newsletter(ctx, data),
        Block::Image(data) => image(data),
        Block::Callout(data) => callout(data),
        Block::Unknown => String::new(),
    }
}

/// `<section class="block block-{template}">`
fn open(out: &mut String, template: &str) {
    let _ = write!(out, r#"<section class="block block-{template}">"#);
}

/// Optional heading and description.
fn heading(out: &mut String, title: &str, description: Option<&str>) {
    let _ = write!(out, "<h2>{}</h2>", escape_xml(title));
    if let Some(description) = description.filter(|d| !d.is_empty()) {
        let _ = write!(out, r#"<p class="description">{}</p>"#, escape_xml(description));
    }
}

fn hero(data: &HeroBlock) -> String {
    let mut out = String::new();
    open(&mut out, "hero");
    if let Some(headline) = &data.headline {
        let _ = write!(out, "<h1>{}</h1>", escape_xml(headline));
    }
    if let Some(tagline) = &data.tagline {
        let _ = write!(out, r#"<p class="tagline">{}</p>"#, escape_xml(tagline));
    }
    if !data.actions.is_empty() {
        out.push_str(r#"<div class="actions">"#);
        for action in &data.actions {
            let _ = write!(
                out,
                r#"<a href="{}">{}</a>"#,
                escape_xml(&action.link),
                escape_xml(&action.label)
            );
        }
        out.push_str("</div>");
    }
    if let Some(image) = &data.image
        && let Some(src) = &image.src
    {
        let _ = write!(
            out,
            r#"<img src="{}" alt="{}">"#,
            escape_xml(src),
            escape_xml(image.alt.as_deref().unwrap_or_default())
        );
    }
    out.push_str("</section>");
    out
}

fn content(data: &ContentBlock) -> String {
    let Some(body) = data.body.as_ref().filter(|body| !body.is_empty()) else {
        return String::new();
    };
    let mut out = String::new();
    open(&mut out, "content");
    let _ = write!(out, r#"<div class="prose">{}</div></section>"#, html::render(body.root()));
    out
}

/// Newest post, with the excerpt shown only when stored as plain text.
fn featured(ctx: &RenderContext<'_>, data: &FeaturedBlock) -> String {
    let Some(post) = ctx.posts.first() else {
        return String::new();
    };
    let view = PostView::project(post, ReadingBasis::Excerpt);
    let url = escape_xml(&view.url);

    let mut out = String::new();
    open(&mut out, "featured");
    heading(&mut out, data.title.as_deref().unwrap_or("Featured"), data.description.as_deref());
    out.push_str(r#"<article class="featured-card">"#);
    let _ = write!(out, r#"<h3><a href="{url}">{}</a></h3>"#, escape_xml(&view.title));

    let mut meta = vec![escape_xml(&view.published).into_owned(), escape_xml(&view.author.name).into_owned()];
    meta.retain(|part| !part.is_empty());
    meta.push(format!("{} min read", view.reading_mins));
    let _ = write!(out, r#"<p class="meta">{}</p>"#, meta.join(" &bull; "));

    if let Some(excerpt) = post.excerpt.as_ref().and_then(|e| e.as_plain_str()) {
        let _ = write!(out, r#"<p class="excerpt">{}</p>"#, escape_xml(excerpt));
    }
    let _ = write!(
        out,
        r#"<a class="button" href="{url}">{}</a>"#,
        escape_xml(data.button_text.as_deref().unwrap_or("Read More"))
    );
    if let Some(src) = &view.hero_img {
        let _ = write!(
            out,
            r#"<a href="{url}"><img src="{}" alt="{}"></a>"#,
            escape_xml(src),
            escape_xml(&view.title)
        );
    }
    out.push_str("</article></section>");
    out
}

/// Up to three hand-picked posts; references that match nothing are skipped.
fn recent(ctx: &RenderContext<'_>, data: &RecentBlock) -> String {
    let picked: Vec<_> = data
        .post_refs()
        .filter_map(|post_ref| resolve_post_ref(post_ref, ctx.posts))
        .map(|post| PostView::project(post, ReadingBasis::Body))
        .collect();
    if picked.is_empty() {
        return String::new();
    }

    let mut out = String::new();
    open(&mut out, "recent");
    heading(&mut out, data.title.as_deref().unwrap_or("Recent Articles"), data.description.as_deref());
    out.push_str(r#"<div class="post-list">"#);
    for view in &picked {
        post_card(
            &mut out,
            view,
            CardOptions {
                show_tags: data.show_tags,
                show_excerpt: false,
            },
        );
    }
    out.push_str("</div></section>");
    out
}

/// Filterable grid; state comes from the query string of the hosting page.
fn blog_grid(ctx: &RenderContext<'_>, data: &BlogGridBlock) -> String {
    if ctx.posts.is_empty() {
        return String::new();
    }
    // 0 is treated as unset
    let per_page = data.posts_per_page.filter(|n| *n > 0).unwrap_or(BLOG_GRID_DEFAULT);
    let state = ListingState::from_query(ctx.query, Pagination::new(per_page, per_page));
    let views = project_all(ctx.posts, ReadingBasis::Body);
    let page = state.apply(&views);

    let mut out = String::new();
    open(&mut out, "blog_grid");
    heading(&mut out, data.title.as_deref().unwrap_or("All Articles"), data.description.as_deref());
    if data.show_categories {
        filter_bar(&mut out, &state, &tags_by_name(ctx.tags), ctx.path, "All");
    }
    post_grid(&mut out, &state, &page, ctx.path, "Load More");
    out.push_str("</section>");
    out
}

/// Every tag, sorted by name, in the block's badge colour.
fn categories(ctx: &RenderContext<'_>, data: &CategoriesBlock) -> String {
    let tags = tags_by_name(ctx.tags);
    if ctx.posts.is_empty() || tags.is_empty() {
        return String::new();
    }

    let mut out = String::new();
    open(&mut out, "categories");
    if let Some(title) = &data.title {
        let _ = write!(out, "<h2>{}</h2>", escape_xml(title));
    }
    out.push_str(r#"<div class="tags">"#);
    for tag in tags {
        tag_badge(&mut out, &tag.name, data.badge_color);
    }
    out.push_str("</div></section>");
    out
}

fn rss(ctx: &RenderContext<'_>, data: &RssBlock) -> String {
    let config = ctx.config;
    if !config.feed.enable {
        return String::new();
    }
    let feed = data
        .placeholder
        .as_deref()
        .filter(|p| !p.is_empty())
        .unwrap_or(&config.feed.path);
    let feed_url = if feed.starts_with("http") {
        feed.to_owned()
    } else {
        config.base.url_for(feed)
    };

    let mut out = String::new();
    open(&mut out, "rss");
    heading(
        &mut out,
        data.title.as_deref().unwrap_or("Subscribe to RSS Feed"),
        Some(data.description.as_deref().unwrap_or(
            "Get the latest posts delivered via RSS feed. No ads, no algorithms, just content.",
        )),
    );
    let feed_url = escape_xml(&feed_url);
    let _ = write!(
        out,
        r#"<input type="text" readonly value="{feed_url}"><a class="button" href="{feed_url}" data-copy="{feed_url}">{}</a></section>"#,
        escape_xml(data.button_text.as_deref().unwrap_or("Copy Feed URL"))
    );
    out
}

fn newsletter(ctx: &RenderContext<'_>, data: &NewsletterBlock) -> String {
    let default_title = format!("Subscribe to {}", ctx.config.base.title);

    let mut out = String::new();
    open(&mut out, "newsletter");
    heading(
        &mut out,
        data.title.as_deref().unwrap_or(&default_title),
        data.description.as_deref(),
    );
    let _ = write!(
        out,
        r#"<form class="newsletter" method="get" onsubmit="return false"><input type="email" name="email" required placeholder="{}" aria-label="Email address"><button type="submit">{}</button></form></section>"#,
        escape_xml(data.placeholder.as_deref().unwrap_or("you@company.com")),
        escape_xml(data.button_text.as_deref().unwrap_or("Sign up"))
    );
    out
}

fn image(data: &ImageBlock) -> String {
    let Some(image) = &data.image else {
        return String::new();
    };
    let Some(src) = &image.src else {
        return String::new();
    };

    let mut out = String::new();
    open(&mut out, "image");
    let _ = write!(
        out,
        r#"<figure><img src="{}" alt="{}" loading="lazy">"#,
        escape_xml(src),
        escape_xml(image.alt.as_deref().unwrap_or("Image"))
    );
    if let Some(caption) = &data.caption {
        let _ = write!(out, "<figcaption>{}</figcaption>", escape_xml(caption));
    }
    out.push_str("</figure></section>");
    out
}

fn callout(data: &CalloutBlock) -> String {
    let Some(text) = data.text.as_deref().filter(|t| !t.is_empty()) else {
        return String::new();
    };

    let mut out = String::new();
    open(&mut out, "callout");
    match &data.url {
        Some(url) => {
            let _ = write!(out, r#"<a href="{}">{}</a>"#, escape_xml(url), escape_xml(text));
        }
        None => {
            let _ = write!(out, "<p>{}</p>", escape_xml(text));
        }
    }
    out.push_str("</section>");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cms::{DocumentSys, PostNode, TagColor, TagNode, TagRef};
    use crate::config::SiteConfig;
    use crate::richtext::RichText;
    use serde_json::json;

    fn post(path: &str, tag: &str) -> PostNode {
        PostNode {
            id: format!("content/posts/{path}"),
            title: format!("Post {path}"),
            date: Some("2024-03-01".into()),
            tags: vec![TagRef {
                name: tag.into(),
                color: TagColor::Green,
            }],
            excerpt: Some(RichText::from_value(json!("Plain excerpt"))),
            sys: DocumentSys::from_relative_path(path),
            ..PostNode::default()
        }
    }

    fn tag(name: &str) -> TagNode {
        TagNode {
            name: name.into(),
            description: None,
            color: TagColor::Default,
            sys: DocumentSys::from_relative_path(&format!("{name}.json")),
        }
    }

    fn blocks(value: serde_json::Value) -> Vec<Block> {
        crate::cms::block::deserialize_blocks(value).unwrap()
    }

    fn render(posts: &[PostNode], tags: &[TagNode], query: &str, value: serde_json::Value) -> String {
        let config = SiteConfig::default();
        let ctx = RenderContext::new(&config, posts, tags, &[]).at("/blog", query);
        render_blocks(&ctx, &blocks(value))
    }

    #[test]
    fn test_post_backed_blocks_empty_without_posts() {
        let html = render(
            &[],
            &[],
            "",
            json!([
                { "_template": "featured" },
                { "_template": "recent", "post1": "a.json" },
                { "_template": "blog_grid" },
                { "_template": "categories" }
            ]),
        );
        assert!(html.is_empty());
    }

    #[test]
    fn test_unknown_block_renders_nothing() {
        assert!(render(&[], &[], "", json!([{ "_template": "carousel" }])).is_empty());
    }

    #[test]
    fn test_featured_uses_newest_post() {
        let posts = [post("new.json", "go"), post("old.json", "go")];
        let html = render(&posts, &[], "", json!([{ "_template": "featured" }]));

        assert!(html.contains("<h2>Featured</h2>"));
        assert!(html.contains("Post new.json"));
        assert!(!html.contains("Post old.json"));
        assert!(html.contains("Mar 01, 2024 &bull; Anonymous &bull; 1 min read"));
        assert!(html.contains(r#"<p class="excerpt">Plain excerpt</p>"#));
        assert!(html.contains(">Read More</a>"));
    }

    #[test]
    fn test_recent_resolves_and_skips() {
        let posts = [post("2024/a.json", "go"), post("b.json", "rust")];
        let html = render(
            &posts,
            &[],
            "",
            json!([{
                "_template": "recent",
                "post1": { "id": "content/posts/2024/a.json" },
                "post2": "missing.json",
                "post3": "b.json",
                "showTags": true
            }]),
        );

        assert!(html.contains("<h2>Recent Articles</h2>"));
        assert_eq!(html.matches(r#"<article class="post-card">"#).count(), 2);
        assert!(html.contains("tag-green"));
    }

    #[test]
    fn test_blog_grid_pagination() {
        let posts: Vec<_> = (0..5).map(|n| post(&format!("p{n}.json"), "go")).collect();
        let html = render(&posts, &[tag("go")], "", json!([{ "_template": "blog_grid", "showCategories": true }]));

        assert!(html.contains("<h2>All Articles</h2>"));
        assert_eq!(html.matches(r#"<article class="post-card">"#).count(), 3);
        assert!(html.contains(r#"href="/blog?count=6""#));
        assert!(html.contains(r#"<a href="/blog?tag=go">go</a>"#));

        let html = render(&posts, &[], "", json!([{ "_template": "blog_grid", "postsPerPage": 10 }]));
        assert_eq!(html.matches(r#"<article class="post-card">"#).count(), 5);
        assert!(!html.contains("load-more"));
    }

    #[test]
    fn test_blog_grid_zero_per_page_uses_default() {
        let posts: Vec<_> = (0..5).map(|n| post(&format!("p{n}.json"), "go")).collect();
        let html = render(&posts, &[], "", json!([{ "_template": "blog_grid", "postsPerPage": 0 }]));
        assert_eq!(html.matches(r#"<article class="post-card">"#).count(), BLOG_GRID_DEFAULT);
        assert!(html.contains(r#"href="/blog?count=6""#));
    }

    #[test]
    fn test_categories_sorted_with_badge_color() {
        let html = render(
            &[post("a.json", "go")],
            &[tag("rust"), tag("go")],
            "",
            json!([{ "_template": "categories", "badgeColor": "purple" }]),
        );
        let go = html.find(">go<").unwrap();
        let rust = html.find(">rust<").unwrap();
        assert!(go < rust);
        assert_eq!(html.matches("tag-purple").count(), 2);
    }

    #[test]
    fn test_rss_block_defaults() {
        let html = render(&[], &[], "", json!([{ "_template": "rss" }]));
        assert!(html.contains("Subscribe to RSS Feed"));
        assert!(html.contains(r#"value="http://localhost:5277/feed.xml""#));
        assert!(html.contains("Copy Feed URL"));
    }

    #[test]
    fn test_static_blocks() {
        let html = render(
            &[],
            &[],
            "",
            json!([
                { "_template": "hero", "headline": "Hi & welcome", "actions": [{ "label": "Read", "link": "/posts" }] },
                { "_template": "callout", "text": "New post", "url": "/posts/new" },
                { "_template": "image", "image": { "src": "/a.png" }, "caption": "A" },
                { "_template": "newsletter" },
                { "_template": "content", "body": "Some text" }
            ]),
        );

        assert!(html.contains("<h1>Hi &amp; welcome</h1>"));
        assert!(html.contains(r#"<a href="/posts">Read</a>"#));
        assert!(html.contains(r#"<a href="/posts/new">New post</a>"#));
        assert!(html.contains(r#"alt="Image""#));
        assert!(html.contains("<figcaption>A</figcaption>"));
        assert!(html.contains(r#"placeholder="you@company.com""#));
        assert!(html.contains("Subscribe to Willow Notes"));
        assert!(html.contains("<p>Some text</p>"));
    }
}

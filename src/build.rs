//! Static export.
//!
//! Renders every route once, with an empty query string, and writes it as
//! `<route>/index.html` under the output directory.
//!
//! # Architecture
//!
//! ```text
//! build_site()
//!     │
//!     ├── FsSource::load() ──► SiteContent (posts newest first)
//!     │
//!     ├── routes() ──► par_iter ──► render_route ──► <output>/<route>/index.html
//!     │
//!     └── feed.xml / sitemap.xml (when enabled)
//! ```

use crate::{
    cms::fs::FsSource,
    config::SiteConfig,
    generator::{rss::RssFeed, sitemap::Sitemap},
    log,
    post::projection::post_url,
    render::{POSTS_PATH, Route, SiteContent, render_route},
    utils::date::DateTimeUtc,
};
use anyhow::{Context, Result, anyhow};
use rayon::prelude::*;
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Render the whole site into `config.build.output`.
///
/// If `config.build.clean` is true, clears the entire output directory first.
pub fn build_site(config: &SiteConfig) -> Result<()> {
    let output = config.output_dir();
    if config.build.clean && output.exists() {
        fs::remove_dir_all(output)
            .with_context(|| format!("Failed to clean output directory {}", output.display()))?;
    }
    fs::create_dir_all(output)
        .with_context(|| format!("Failed to create output directory {}", output.display()))?;

    let source = FsSource::load(config.content_dir())
        .with_context(|| format!("Failed to load content from {}", config.content_dir().display()))?;
    let content = SiteContent::load(&source, config.feed.page_size)?;
    let ctx = content.context(config);

    let routes = routes(&content);
    log!("build"; "rendering {} routes...", routes.len());

    routes.par_iter().try_for_each(|path| {
        let html = render_route(&ctx.at(path, ""), Route::parse(path))
            .ok_or_else(|| anyhow!("Nothing to render at `{path}`"))?;
        write_file(&route_file(output, path), &html)
    })?;

    let now = DateTimeUtc::now();
    if config.feed.enable {
        RssFeed::build(config, &content.posts, now).write(&output_file(output, &config.feed.path))?;
    }
    if config.sitemap.enable {
        Sitemap::build(config, &content.pages, &content.posts, now)
            .write(&output_file(output, &config.sitemap.path))?;
    }

    log!("build"; "{} posts, {} pages → {}", content.posts.len(), content.pages.len(), output.display());
    Ok(())
}

/// Every HTML route the content defines.
fn routes(content: &SiteContent) -> Vec<String> {
    let mut routes = vec![POSTS_PATH.to_owned(), "/tags".to_owned()];
    routes.extend(content.pages.iter().map(|page| page.url()));
    routes.extend(content.posts.iter().map(post_url));
    routes
}

/// `/` → `index.html`, `/posts/a` → `posts/a/index.html`
fn route_file(output: &Path, route: &str) -> PathBuf {
    let relative = route.trim_matches('/');
    if relative.is_empty() {
        output.join("index.html")
    } else {
        output.join(relative).join("index.html")
    }
}

/// Non-HTML route (feed, sitemap) written as-is.
fn output_file(output: &Path, route: &str) -> PathBuf {
    output.join(route.trim_start_matches('/'))
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))
}

// ============================================================================
// Tests
// ============================================================================

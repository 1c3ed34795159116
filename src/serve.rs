//! Blog HTTP server.
//!
//! Every route is rendered on request from a revalidating content snapshot,
//! built on `tiny_http`:
//!
//! - HTML views (home, listing, posts, tags, pages)
//! - RSS feed and sitemap at their configured paths
//! - Content re-read once the snapshot is older than `[serve.revalidate]`
//! - Graceful shutdown on Ctrl+C
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐        ┌──────────────────┐
//! │   Main Thread   │ get()  │ Snapshot<FsSource>│
//! │  (HTTP Server)  │ ─────► │  reload if stale │
//! └────────┬────────┘        └──────────────────┘
//!          │
//!          ▼
//!   feed / sitemap / render_route
//! ```

use crate::{
    cms::{ContentSource, fs::FsSource, snapshot::Snapshot},
    config::SiteConfig,
    generator::{FeedError, collect_all_posts, rss::RssFeed, sitemap::Sitemap},
    log, logger,
    render::{Route, SiteContent, render_route},
    utils::date::DateTimeUtc,
};
use anyhow::{Context, Result};
use std::{borrow::Cow, io::Cursor, net::SocketAddr, sync::Arc, time::Duration};
use tiny_http::{Header, Method, Request, Response, Server, StatusCode};

/// Try binding to port, retry with incremented port if in use
const MAX_PORT_RETRIES: u16 = 10;

const HTML_TYPE: &str = "text/html; charset=utf-8";
const XML_TYPE: &str = "application/xml; charset=utf-8";
const TEXT_TYPE: &str = "text/plain; charset=utf-8";

/// Feed and sitemap responses may be cached by shared caches.
const XML_CACHE_CONTROL: &str = "public, s-maxage=3600, stale-while-revalidate=86400";

// ============================================================================
// Server Entry Point
// ============================================================================

/// Start the blog server.
///
/// This function:
/// 1. Loads the first content snapshot (fatal on failure)
/// 2. Binds to the configured interface and port (with auto-retry on port conflict)
/// 3. Sets up Ctrl+C handler for graceful shutdown
/// 4. Enters the main request handling loop
///
/// The server blocks until Ctrl+C is received.
pub fn serve_site(config: &'static SiteConfig) -> Result<()> {
    let snapshot = load_snapshot(config)?;
    log!(
        "content";
        "{} posts loaded from {}, revalidating every {}s",
        snapshot.get().post_count(),
        config.content_dir().display(),
        snapshot.max_age().as_secs()
    );

    let interface: std::net::IpAddr = config.serve.interface.parse()?;
    let (server, addr) = try_bind_port(interface, config.serve.port, MAX_PORT_RETRIES)?;
    let server = Arc::new(server);

    // Set up Ctrl+C handler for graceful shutdown
    let server_for_signal = Arc::clone(&server);
    ctrlc::set_handler(move || {
        log!("serve"; "shutting down...");
        server_for_signal.unblock();
    })
    .context("Failed to set Ctrl+C handler")?;

    log!("serve"; "http://{}", addr);

    for request in server.incoming_requests() {
        if let Err(e) = handle_request(request, config, &snapshot) {
            log!("serve"; "request error: {e}");
        }
    }

    Ok(())
}

/// Content snapshot re-read from the content directory once stale.
fn load_snapshot(config: &SiteConfig) -> Result<Snapshot<FsSource>> {
    let dir = config.content_dir().to_path_buf();
    let max_age = Duration::from_secs(config.serve.revalidate);
    Snapshot::new(max_age, move || FsSource::load(&dir))
        .with_context(|| format!("Failed to load content from {}", config.content_dir().display()))
}

/// Try to bind to a port, retrying with incremented port numbers if in use.
fn try_bind_port(
    interface: std::net::IpAddr,
    base_port: u16,
    max_retries: u16,
) -> Result<(Server, SocketAddr)> {
    let mut last_error = None;
    for offset in 0..max_retries {
        let port = base_port.saturating_add(offset);
        let addr = SocketAddr::new(interface, port);

        match Server::http(addr) {
            Ok(server) => {
                if offset > 0 {
                    log!("serve"; "port {} in use, using {} instead", base_port, port);
                }
                return Ok((server, addr));
            }
            Err(e) => last_error = Some(e),
        }
    }

    Err(anyhow::anyhow!(
        "Failed to bind after {} attempts (ports {}-{}): {}",
        max_retries,
        base_port,
        base_port.saturating_add(max_retries.saturating_sub(1)),
        last_error.map(|e| e.to_string()).unwrap_or_default()
    ))
}

// ============================================================================
// Request Handling
// ============================================================================

/// A rendered response, before it is handed to `tiny_http`.
#[derive(Debug, PartialEq, Eq)]
struct Reply {
    status: u16,
    content_type: &'static str,
    cache_control: Option<&'static str>,
    body: String,
}

impl Reply {
    fn html(body: String) -> Self {
        Self {
            status: 200,
            content_type: HTML_TYPE,
            cache_control: None,
            body,
        }
    }

    fn xml(body: String) -> Self {
        Self {
            status: 200,
            content_type: XML_TYPE,
            cache_control: Some(XML_CACHE_CONTROL),
            body,
        }
    }

    fn text(status: u16, body: &str) -> Self {
        Self {
            status,
            content_type: TEXT_TYPE,
            cache_control: None,
            body: body.to_owned(),
        }
    }

    fn not_found() -> Self {
        Self::text(404, "404 Not Found")
    }
}

/// Handle a single HTTP request.
fn handle_request(request: Request, config: &SiteConfig, snapshot: &Snapshot<FsSource>) -> Result<()> {
    let method = request.method().clone();
    let url = request.url().to_owned();

    let reply = if matches!(method, Method::Get | Method::Head) {
        respond(config, &*snapshot.get(), &url)
    } else {
        Reply::text(405, "405 Method Not Allowed")
    };
    log!("serve"; "{} {} {} {}", logger::now(), method, reply.status, url);

    let len = reply.body.len();
    let mut headers = vec![Header::from_bytes("Content-Type", reply.content_type).unwrap()];
    if let Some(cache) = reply.cache_control {
        headers.push(Header::from_bytes("Cache-Control", cache).unwrap());
    }
    let response = Response::new(
        StatusCode(reply.status),
        headers,
        Cursor::new(reply.body),
        Some(len),
        None,
    );
    request.respond(response)?;
    Ok(())
}

/// Route a request URL to a reply.
///
/// Resolution order:
/// 1. Feed path (when enabled) → RSS
/// 2. Sitemap path (when enabled) → sitemap
/// 3. HTML route → rendered page
/// 4. Nothing found → 404
fn respond<S: ContentSource + ?Sized>(config: &SiteConfig, source: &S, url: &str) -> Reply {
    let (path, query) = split_url(url);

    if config.feed.enable && path == config.feed.path {
        return match render_feed(config, source) {
            Ok(xml) => Reply::xml(xml),
            Err(err) => {
                log!("error"; "feed: {err}");
                Reply::text(500, "Error generating RSS feed")
            }
        };
    }

    if config.sitemap.enable && path == config.sitemap.path {
        return match render_sitemap(config, source) {
            Ok(xml) => Reply::xml(xml),
            Err(err) => {
                log!("error"; "sitemap: {err}");
                Reply::text(500, "Error generating sitemap")
            }
        };
    }

    let content = match SiteContent::load(source, config.feed.page_size) {
        Ok(content) => content,
        Err(err) => {
            log!("error"; "content: {err}");
            return Reply::text(500, "Error loading content");
        }
    };
    let ctx = content.context(config).at(&path, query);
    render_route(&ctx, Route::parse(&path)).map_or_else(Reply::not_found, Reply::html)
}

fn render_feed<S: ContentSource + ?Sized>(config: &SiteConfig, source: &S) -> Result<String, FeedError> {
    let posts = collect_all_posts(source, config.feed.page_size)?;
    RssFeed::build(config, &posts, DateTimeUtc::now()).into_xml()
}

fn render_sitemap<S: ContentSource + ?Sized>(config: &SiteConfig, source: &S) -> Result<String, FeedError> {
    let pages = source.pages()?;
    let posts = collect_all_posts(source, config.feed.page_size)?;
    Ok(Sitemap::build(config, &pages, &posts, DateTimeUtc::now()).into_xml())
}

/// Split a request URL into its decoded path and raw query string.
fn split_url(url: &str) -> (Cow<'_, str>, &str) {
    let (path, query) = url.split_once('?').unwrap_or((url, ""));
    // Decode URL-encoded characters (e.g., %20 → space)
    let path = urlencoding::decode(path).unwrap_or(Cow::Borrowed(path));
    (path, query)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cms::{Connection, DocumentSys, PageNode, PageRequest, PostNode, SourceError, TagNode};

    fn post(path: &str, date: &str) -> PostNode {
        PostNode {
            id: path.into(),
            title: format!("Title of {path}"),
            date: Some(date.into()),
            sys: DocumentSys::from_relative_path(path),
            ..PostNode::default()
        }
    }

    fn source() -> FsSource {
        FsSource::from_parts(
            vec![post("hello.json", "2024-03-01"), post("2023/old.json", "2023-01-01")],
            Vec::new(),
            vec![PageNode {
                title: Some("About".into()),
                sys: DocumentSys::from_relative_path("about.json"),
                ..PageNode::default()
            }],
        )
    }

    /// Every post query fails, as an unreachable content store would.
    struct Unavailable;

    impl ContentSource for Unavailable {
        fn posts(&self, _: &PageRequest) -> Result<Connection<PostNode>, SourceError> {
            Err(SourceError::MissingDir("content".into()))
        }

        fn tags(&self) -> Result<Vec<TagNode>, SourceError> {
            Ok(Vec::new())
        }

        fn pages(&self) -> Result<Vec<PageNode>, SourceError> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn test_split_url() {
        assert_eq!(split_url("/posts?tag=rust&q=a"), (Cow::Borrowed("/posts"), "tag=rust&q=a"));
        assert_eq!(split_url("/posts"), (Cow::Borrowed("/posts"), ""));
        assert_eq!(split_url("/about%20us?"), (Cow::Borrowed("/about us"), ""));
    }

    #[test]
    fn test_feed_reply() {
        let config = SiteConfig::default();
        let reply = respond(&config, &source(), "/feed.xml");

        assert_eq!(reply.status, 200);
        assert_eq!(reply.content_type, XML_TYPE);
        assert_eq!(reply.cache_control, Some(XML_CACHE_CONTROL));
        assert!(reply.body.contains("<rss"));
        let newer = reply.body.find("Title of hello.json").unwrap();
        let older = reply.body.find("Title of 2023/old.json").unwrap();
        assert!(newer < older);
    }

    #[test]
    fn test_feed_disabled_is_not_found() {
        let mut config = SiteConfig::default();
        config.feed.enable = false;
        assert_eq!(respond(&config, &source(), "/feed.xml"), Reply::not_found());
    }

    #[test]
    fn test_sitemap_reply() {
        let config = SiteConfig::default();
        let reply = respond(&config, &source(), "/sitemap.xml");

        assert_eq!(reply.status, 200);
        assert!(reply.body.contains("/posts/2023/old</loc>"));
        assert!(reply.body.contains("/about</loc>"));
    }

    #[test]
    fn test_html_routes() {
        let config = SiteConfig::default();
        let source = source();

        let post = respond(&config, &source, "/posts/2023/old");
        assert_eq!(post.status, 200);
        assert_eq!(post.content_type, HTML_TYPE);
        assert!(post.body.contains("Title of 2023/old.json"));

        let listing = respond(&config, &source, "/posts?q=hello");
        assert!(listing.body.contains("Title of hello.json"));
        assert!(!listing.body.contains("Title of 2023/old.json"));

        assert_eq!(respond(&config, &source, "/about").status, 200);
        assert_eq!(respond(&config, &source, "/tags").status, 200);
    }

    #[test]
    fn test_feed_source_failure() {
        let config = SiteConfig::default();
        let reply = respond(&config, &Unavailable, "/feed.xml");

        assert_eq!(reply, Reply::text(500, "Error generating RSS feed"));
        assert_eq!(reply.content_type, TEXT_TYPE);
        assert!(reply.cache_control.is_none());
        assert!(!reply.body.contains('<'));
    }

    #[test]
    fn test_sitemap_source_failure() {
        let config = SiteConfig::default();
        let reply = respond(&config, &Unavailable, "/sitemap.xml");

        assert_eq!(reply.status, 500);
        assert_eq!(reply.content_type, TEXT_TYPE);
        assert_eq!(reply.body, "Error generating sitemap");
    }

    #[test]
    fn test_html_source_failure() {
        let config = SiteConfig::default();
        for url in ["/posts", "/posts/2023/old", "/"] {
            let reply = respond(&config, &Unavailable, url);
            assert_eq!(reply, Reply::text(500, "Error loading content"), "{url}");
        }
    }

    #[test]
    fn test_unknown_route_is_not_found() {
        let config = SiteConfig::default();
        let source = source();
        assert_eq!(respond(&config, &source, "/posts/missing"), Reply::not_found());
        // no home document
        assert_eq!(respond(&config, &source, "/"), Reply::not_found());
    }
}

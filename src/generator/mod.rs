//! Feed and sitemap generation.
//!
//! Both outputs need every post, newest first. The content source only
//! hands out cursor pages, so [`collect_all_posts`] walks backwards from the
//! newest post:
//!
//! ```text
//! last: 1                 ──► [p9]
//! before p9, page_size    ──► [p7, p8]   appended reversed: p8, p7
//! before p7, page_size    ──► [p5, p6]   appended reversed: p6, p5
//! ...until has_previous_page is false or a page comes back empty
//! ```

pub mod rss;
pub mod sitemap;

use crate::cms::{Connection, ContentSource, PageRequest, PostNode, SourceError};
use thiserror::Error;

/// Errors raised while collecting or rendering feeds.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("Failed to fetch posts")]
    Source(#[from] SourceError),

    #[error("Cursor `{0}` did not advance")]
    StalledCursor(String),

    #[error("RSS validation failed: {0}")]
    Invalid(String),
}

/// Fetch every post, newest first, one cursor page at a time.
pub fn collect_all_posts<S>(source: &S, page_size: usize) -> Result<Vec<PostNode>, FeedError>
where
    S: ContentSource + ?Sized,
{
    let Connection { edges, mut page_info } = source.posts(&PageRequest::last(1))?;
    let mut posts: Vec<PostNode> = edges.into_iter().rev().map(|edge| edge.node).collect();

    while page_info.has_previous_page {
        let Some(cursor) = page_info.start_cursor.take() else {
            break;
        };

        let page = source.posts(&PageRequest::before(cursor.as_str(), page_size.max(1)))?;
        if page.edges.is_empty() {
            break;
        }
        if page.page_info.start_cursor.as_deref() == Some(cursor.as_str()) {
            return Err(FeedError::StalledCursor(cursor));
        }

        posts.extend(page.edges.into_iter().rev().map(|edge| edge.node));
        page_info = page.page_info;
    }

    Ok(posts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cms::fs::FsSource;
    use crate::cms::{DocumentSys, Edge, PageInfo, PageNode, TagNode};
    use std::cell::RefCell;

    fn post(n: usize) -> PostNode {
        PostNode {
            id: format!("p{n}"),
            title: format!("Post {n}"),
            date: Some(format!("2024-01-{:02}", n + 1)),
            sys: DocumentSys::from_relative_path(&format!("p{n}.json")),
            ..PostNode::default()
        }
    }

    fn source(count: usize) -> FsSource {
        FsSource::from_parts((0..count).map(post).collect(), Vec::new(), Vec::new())
    }

    fn ids(posts: &[PostNode]) -> Vec<&str> {
        posts.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn test_collect_newest_first() {
        let posts = collect_all_posts(&source(7), 2).unwrap();
        assert_eq!(ids(&posts), ["p6", "p5", "p4", "p3", "p2", "p1", "p0"]);
    }

    #[test]
    fn test_collect_page_size_independent() {
        for size in [1, 3, 50] {
            let posts = collect_all_posts(&source(5), size).unwrap();
            assert_eq!(ids(&posts), ["p4", "p3", "p2", "p1", "p0"]);
        }
    }

    #[test]
    fn test_collect_empty_and_single() {
        assert!(collect_all_posts(&source(0), 10).unwrap().is_empty());
        assert_eq!(ids(&collect_all_posts(&source(1), 10).unwrap()), ["p0"]);
    }

    /// Records requests and replays a scripted connection.
    struct Scripted {
        requests: RefCell<Vec<PageRequest>>,
        respond: fn(&PageRequest) -> Result<Connection<PostNode>, SourceError>,
    }

    impl ContentSource for Scripted {
        fn posts(&self, request: &PageRequest) -> Result<Connection<PostNode>, SourceError> {
            self.requests.borrow_mut().push(request.clone());
            (self.respond)(request)
        }

        fn tags(&self) -> Result<Vec<TagNode>, SourceError> {
            Ok(Vec::new())
        }

        fn pages(&self) -> Result<Vec<PageNode>, SourceError> {
            Ok(Vec::new())
        }
    }

    fn stuck_page() -> Connection<PostNode> {
        Connection {
            edges: vec![Edge {
                cursor: "c".into(),
                node: post(0),
            }],
            page_info: PageInfo {
                has_previous_page: true,
                has_next_page: false,
                start_cursor: Some("c".into()),
                end_cursor: Some("c".into()),
            },
        }
    }

    #[test]
    fn test_stalled_cursor_is_error() {
        let source = Scripted {
            requests: RefCell::new(Vec::new()),
            respond: |_| Ok(stuck_page()),
        };
        let err = collect_all_posts(&source, 10).unwrap_err();
        assert!(matches!(err, FeedError::StalledCursor(c) if c == "c"));
        assert_eq!(source.requests.borrow().len(), 2);
    }

    #[test]
    fn test_empty_page_stops() {
        let source = Scripted {
            requests: RefCell::new(Vec::new()),
            respond: |request| match request {
                PageRequest { before: None, .. } => Ok(stuck_page()),
                _ => Ok(Connection {
                    edges: Vec::new(),
                    page_info: PageInfo::default(),
                }),
            },
        };
        let posts = collect_all_posts(&source, 10).unwrap();
        assert_eq!(ids(&posts), ["p0"]);
        assert_eq!(source.requests.borrow()[1], PageRequest::before("c", 10));
    }

    #[test]
    fn test_fetch_error_propagates() {
        let source = Scripted {
            requests: RefCell::new(Vec::new()),
            respond: |_| Err(SourceError::UnknownCursor("x".into())),
        };
        assert!(matches!(collect_all_posts(&source, 10), Err(FeedError::Source(_))));
    }
}

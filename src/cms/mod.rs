//! Content source abstraction.
//!
//! The site reads its content through [`ContentSource`], a query capability
//! shaped like a GraphQL connection API: posts come back one page at a time
//! with cursors, tags and pages come back whole.
//!
//! ```text
//! ContentSource ──► Connection { edges: [Edge { cursor, node }], page_info }
//!      ▲
//!      ├── FsSource         JSON documents under `content/`
//!      └── Arc<S>           handed out by the server's revalidating `Snapshot`
//! ```

pub mod block;
mod error;
pub mod fs;
pub mod snapshot;
pub mod types;

pub use error::SourceError;
pub use types::{Author, DocumentSys, PageNode, PostNode, TagColor, TagNode, TagRef};

// ============================================================================
// Connection
// ============================================================================

/// One item of a connection, with the cursor pointing at it.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge<T> {
    pub cursor: String,
    pub node: T,
}

/// Cursor bookkeeping for a page of results.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageInfo {
    pub has_previous_page: bool,
    pub has_next_page: bool,
    /// Cursor of the first edge in this page.
    pub start_cursor: Option<String>,
    /// Cursor of the last edge in this page.
    pub end_cursor: Option<String>,
}

/// A page of results, ordered oldest to newest.
#[derive(Debug, Clone, PartialEq)]
pub struct Connection<T> {
    pub edges: Vec<Edge<T>>,
    pub page_info: PageInfo,
}

/// Which slice of a collection to fetch: the `last` items of the
/// collection, or the `last` items right before the `before` cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub last: usize,
    pub before: Option<String>,
}

impl PageRequest {
    pub const fn last(count: usize) -> Self {
        Self { last: count, before: None }
    }

    pub fn before(cursor: impl Into<String>, count: usize) -> Self {
        Self {
            last: count,
            before: Some(cursor.into()),
        }
    }
}

// ============================================================================
// ContentSource
// ============================================================================

/// Read-only query capability over site content.
///
/// Posts are ordered by date, oldest first, like a `sort: date` query.
pub trait ContentSource {
    /// Fetch one page of posts.
    fn posts(&self, request: &PageRequest) -> Result<Connection<PostNode>, SourceError>;

    /// All tag documents.
    fn tags(&self) -> Result<Vec<TagNode>, SourceError>;

    /// All page documents.
    fn pages(&self) -> Result<Vec<PageNode>, SourceError>;
}

impl<S: ContentSource + ?Sized> ContentSource for std::sync::Arc<S> {
    fn posts(&self, request: &PageRequest) -> Result<Connection<PostNode>, SourceError> {
        (**self).posts(request)
    }

    fn tags(&self) -> Result<Vec<TagNode>, SourceError> {
        (**self).tags()
    }

    fn pages(&self) -> Result<Vec<PageNode>, SourceError> {
        (**self).pages()
    }
}

/// Slice an ordered collection according to a [`PageRequest`].
///
/// `cursor_of` must be unique per item. An unknown cursor is an error rather
/// than an empty page so callers never silently lose content.
pub fn paginate<T, F>(items: &[T], request: &PageRequest, cursor_of: F) -> Result<Connection<T>, SourceError>
where
    T: Clone,
    F: Fn(&T) -> String,
{
    let position = |cursor: &str| {
        items
            .iter()
            .position(|item| cursor_of(item) == cursor)
            .ok_or_else(|| SourceError::UnknownCursor(cursor.to_owned()))
    };

    let end = match &request.before {
        Some(cursor) => position(cursor)?,
        None => items.len(),
    };
    let start = end.saturating_sub(request.last);

    let edges: Vec<_> = items[start..end]
        .iter()
        .map(|item| Edge {
            cursor: cursor_of(item),
            node: item.clone(),
        })
        .collect();

    let page_info = PageInfo {
        has_previous_page: start > 0,
        has_next_page: end < items.len(),
        start_cursor: edges.first().map(|edge| edge.cursor.clone()),
        end_cursor: edges.last().map(|edge| edge.cursor.clone()),
    };

    Ok(Connection { edges, page_info })
}

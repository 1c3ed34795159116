//! Post discovery: projection, filtering, pagination, related posts,
//! reference resolution and the tag index.
//!
//! Everything here is pure and works on posts already fetched from a
//! [`ContentSource`](crate::cms::ContentSource).

pub mod filter;
pub mod pagination;
pub mod projection;
pub mod related;
pub mod resolve;
pub mod tags;

pub use projection::{PostView, ReadingBasis};

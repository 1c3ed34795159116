//! XML text escaping shared by the feed, sitemap and HTML writers.

use std::borrow::Cow;

/// Escape the five XML special characters: `& < > " '`.
#[inline]
pub fn escape_xml(s: &str) -> Cow<'_, str> {
    quick_xml::escape::escape(s)
}

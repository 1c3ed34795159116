//! Active heading tracking (scroll-spy).
//!
//! Given the page's heading entries and where each heading sits on the page,
//! the active heading is the last one (in document order) whose top edge is
//! at or above `scroll_y + offset`. Above the first heading nothing is
//! active.
//!
//! Evaluation is stateless apart from remembering the last answer, so it is
//! safe to run on every scroll tick.
//!
//! The page runs this rule in the browser (`embed/toc-spy.js`); the model
//! below is compiled for tests only.

#[cfg(test)]
use super::HeadingEntry;

/// Visual offset (px) applied to the scroll position, matching the sticky
/// header height.
pub const SCROLL_OFFSET: f64 = 100.0;

/// Index of the active heading, if any.
///
/// `top_of` maps a heading id to the element's top offset in page
/// coordinates; `None` means the element is not in the layout and the
/// heading is ignored.
#[cfg(test)]
pub fn active_index<F>(headings: &[HeadingEntry], scroll_y: f64, offset: f64, top_of: F) -> Option<usize>
where
    F: Fn(&str) -> Option<f64>,
{
    let threshold = scroll_y + offset;
    headings
        .iter()
        .rposition(|heading| top_of(&heading.id).is_some_and(|top| top <= threshold))
}

/// Scroll-spy state for one mounted table of contents.
#[cfg(test)]
#[derive(Debug, Clone)]
pub struct ScrollSpy {
    headings: Vec<HeadingEntry>,
    offset: f64,
    active: Option<usize>,
}

#[cfg(test)]
impl ScrollSpy {
    pub fn new(headings: Vec<HeadingEntry>) -> Self {
        Self::with_offset(headings, SCROLL_OFFSET)
    }

    pub fn with_offset(headings: Vec<HeadingEntry>, offset: f64) -> Self {
        Self {
            headings,
            offset,
            active: None,
        }
    }

    /// Re-evaluate for a scroll position and return the active heading.
    pub fn update<F>(&mut self, scroll_y: f64, top_of: F) -> Option<&HeadingEntry>
    where
        F: Fn(&str) -> Option<f64>,
    {
        self.active = active_index(&self.headings, scroll_y, self.offset, top_of);
        self.active()
    }

    pub fn active(&self) -> Option<&HeadingEntry> {
        self.active.and_then(|index| self.headings.get(index))
    }

    pub fn headings(&self) -> &[HeadingEntry] {
        &self.headings
    }
}

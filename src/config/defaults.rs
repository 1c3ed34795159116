//! Default values for configuration fields.
//!
//! These functions are used by serde for default deserialization.

// ============================================================================
// Common Defaults
// ============================================================================

pub fn r#true() -> bool {
    true
}

pub fn r#false() -> bool {
    false
}

// ============================================================================
// [base] Section Defaults
// ============================================================================

pub mod base {
    pub fn title() -> String {
        "Willow Notes".into()
    }

    pub fn description() -> String {
        "Personal reflections and notes from everyday learning.".into()
    }

    pub fn url() -> String {
        "http://localhost:5277".into()
    }

    pub fn language() -> String {
        "en-us".into()
    }
}

// ============================================================================
// [content] Section Defaults
// ============================================================================

pub mod content {
    use std::path::PathBuf;

    pub fn dir() -> PathBuf {
        "content".into()
    }
}

// ============================================================================
// [listing] Section Defaults
// ============================================================================

pub mod listing {
    use crate::post::pagination::{LISTING_INITIAL, LISTING_STEP};

    pub fn per_page() -> usize {
        LISTING_INITIAL
    }

    pub fn step() -> usize {
        LISTING_STEP
    }
}

// ============================================================================
// [feed] / [sitemap] Section Defaults
// ============================================================================

pub mod feed {
    pub fn path() -> String {
        "/feed.xml".into()
    }

    pub fn page_size() -> usize {
        50
    }
}

pub mod sitemap {
    pub fn path() -> String {
        "/sitemap.xml".into()
    }
}

// ============================================================================
// [serve] Section Defaults
// ============================================================================

pub mod serve {
    pub fn interface() -> String {
        "127.0.0.1".into()
    }

    pub fn port() -> u16 {
        5277
    }

    pub fn revalidate() -> u64 {
        300
    }
}

// ============================================================================
// [build] Section Defaults
// ============================================================================

pub mod build {
    use std::path::PathBuf;

    pub fn output() -> PathBuf {
        "public".into()
    }
}

// ============================================================================
// [comments] Section Defaults
// ============================================================================

pub mod comments {
    pub fn mapping() -> String {
        "pathname".into()
    }

    pub fn theme() -> String {
        "preferred_color_scheme".into()
    }

    pub fn lang() -> String {
        "en".into()
    }
}

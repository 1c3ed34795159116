//! Anchor slugification for headings.
//!
//! Heading ids are derived from the heading's plain text:
//! lowercase, collapse every run of non `[a-z0-9]` characters into one
//! hyphen, then trim hyphens from both ends.

use regex::Regex;
use std::sync::LazyLock;

/// Any run of characters outside the anchor alphabet.
static RE_NON_ANCHOR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^a-z0-9]+").unwrap());

/// Convert heading text to an anchor id.
///
/// The result only contains `[a-z0-9-]`, never starts or ends with a hyphen
/// and never contains two hyphens in a row, so it is a fixed point:
/// `slugify_heading(&slugify_heading(x)) == slugify_heading(x)`.
///
/// Non-ASCII letters are treated as separators, so `"Café"` becomes `"caf"`.
pub fn slugify_heading(text: &str) -> String {
    let lower = text.to_lowercase();
    RE_NON_ANCHOR
        .replace_all(&lower, "-")
        .trim_matches('-')
        .to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify_heading("Hello World!"), "hello-world");
    }

    #[test]
    fn test_slugify_collapses_runs() {
        assert_eq!(slugify_heading("a  --  b"), "a-b");
        assert_eq!(slugify_heading("Rust & Go: a comparison"), "rust-go-a-comparison");
    }

    #[test]
    fn test_slugify_trims_hyphens() {
        assert_eq!(slugify_heading("  (Intro)  "), "intro");
        assert_eq!(slugify_heading("--already--"), "already");
    }

    #[test]
    fn test_slugify_keeps_digits() {
        assert_eq!(slugify_heading("Step 2: Install v1.2"), "step-2-install-v1-2");
    }

    #[test]
    fn test_slugify_non_ascii_is_separator() {
        assert_eq!(slugify_heading("Café au lait"), "caf-au-lait");
        assert_eq!(slugify_heading("你好"), "");
    }

    #[test]
    fn test_slugify_empty() {
        assert_eq!(slugify_heading(""), "");
        assert_eq!(slugify_heading("!!!"), "");
    }

    #[test]
    fn test_slugify_idempotent() {
        let inputs = [
            "Hello World!",
            "  Leading and trailing  ",
            "MiXeD CaSe 123",
            "a--b",
            "Ünïcödé Heading",
            "already-a-slug",
            "",
        ];
        for input in inputs {
            let once = slugify_heading(input);
            assert_eq!(slugify_heading(&once), once, "not idempotent for {input:?}");
        }
    }
}

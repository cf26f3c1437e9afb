//! Shared utility functions for markdown rendering.

use std::sync::LazyLock;

use pulldown_cmark::HeadingLevel;
use regex::Regex;

static ANCHOR_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<a\b[^>]*>|</a>").unwrap());

/// Strip anchor tags from an HTML fragment, keeping their inner content.
///
/// Used on link text and table of contents entries so rendered output never
/// nests anchors.
///
/// # Examples
///
/// ```
/// use mdwiki_renderer::remove_links;
///
/// assert_eq!(remove_links(r#"See <a href="/x">docs</a>"#), "See docs");
/// ```
#[must_use]
pub fn remove_links(html: &str) -> String {
    ANCHOR_TAG_RE.replace_all(html, "").into_owned()
}

/// Convert heading level enum to number (1-6).
#[must_use]
pub(crate) fn heading_level_to_num(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

/// Code fence long enough that no backtick run inside `content` closes it.
#[must_use]
pub(crate) fn code_fence(content: &str) -> String {
    let longest_run = content
        .split(|c| c != '`')
        .map(str::len)
        .max()
        .unwrap_or(0);
    "`".repeat(longest_run.max(2) + 1)
}

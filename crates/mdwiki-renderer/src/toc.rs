//! Table of contents generation.
//!
//! Headings are captured from the parsed event stream together with their
//! source span. The span gives the raw heading text that slugs are computed
//! from, so anchors in the table of contents match the ids assigned while
//! rendering the page.

use std::ops::Range;

use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag, TagEnd};

use crate::renderer::MarkdownRenderer;
use crate::slug::SlugRegistry;
use crate::util::{heading_level_to_num, remove_links};

/// Inline events of one heading with the source span they cover.
pub(crate) struct HeadingCapture<'a> {
    pub(crate) level: HeadingLevel,
    pub(crate) events: Vec<Event<'a>>,
    span: Option<Range<usize>>,
}

impl<'a> HeadingCapture<'a> {
    /// Consume events up to and including the heading's end tag.
    pub(crate) fn collect<I>(level: HeadingLevel, iter: &mut I) -> Self
    where
        I: Iterator<Item = (Event<'a>, Range<usize>)>,
    {
        let mut capture = Self {
            level,
            events: Vec::new(),
            span: None,
        };
        for (event, range) in iter.by_ref() {
            if matches!(event, Event::End(TagEnd::Heading(_))) {
                break;
            }
            capture.span = Some(match capture.span.take() {
                Some(span) => span.start.min(range.start)..span.end.max(range.end),
                None => range,
            });
            capture.events.push(event);
        }
        capture
    }

    /// Heading text as written in the source, without the `#` markers.
    pub(crate) fn raw_text<'s>(&self, source: &'s str) -> &'s str {
        self.span
            .clone()
            .and_then(|span| source.get(span))
            .unwrap_or("")
    }

    /// Heading content as inline HTML with anchor tags removed.
    fn inline_html(&self) -> String {
        let html = MarkdownRenderer::new()
            .render(self.events.iter().cloned())
            .html;
        remove_links(&html).replace('\n', " ")
    }
}

/// All headings of `source` in document order.
pub(crate) fn collect_headings(source: &str, options: Options) -> Vec<HeadingCapture<'_>> {
    let mut headings = Vec::new();
    let mut iter = Parser::new_ext(source, options).into_offset_iter();
    while let Some((event, _)) = iter.next() {
        if let Event::Start(Tag::Heading { level, .. }) = event {
            headings.push(HeadingCapture::collect(level, &mut iter));
        }
    }
    headings
}

/// Build the table of contents of `source` as a nested Markdown list.
///
/// With `skip_first`, the first heading of the document is left out when it
/// is a level 1 heading. Returns `None` when the document yields at most one
/// slug, counting a skipped heading.
pub(crate) fn toc_markdown(source: &str, options: Options, skip_first: bool) -> Option<String> {
    let mut slugs = SlugRegistry::new();
    let mut skip_first = skip_first;
    let mut lines = Vec::new();

    for heading in collect_headings(source, options) {
        let slug = slugs.slug(heading.raw_text(source));
        let level = heading_level_to_num(heading.level);

        if skip_first {
            skip_first = false;
            if level == 1 {
                continue;
            }
        }

        let indent = "  ".repeat(usize::from(level - 1));
        lines.push(format!("{indent}- [{}](#{slug})", heading.inline_html()));
    }

    if slugs.len() <= 1 {
        return None;
    }
    Some(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn options() -> Options {
        MarkdownRenderer::parser_options()
    }

    #[test]
    fn test_single_heading_has_no_toc() {
        assert_eq!(toc_markdown("# Only\n\nText.", options(), true), None);
        assert_eq!(toc_markdown("# Only\n\nText.", options(), false), None);
        assert_eq!(toc_markdown("No headings at all.", options(), false), None);
    }

    #[test]
    fn test_indentation_and_order() {
        let source = "# Title\n\n## Install\n\n### From source\n\n## Usage";
        assert_eq!(
            toc_markdown(source, options(), false).unwrap(),
            "- [Title](#title)\n  - [Install](#install)\n    - [From source](#from-source)\n  - [Usage](#usage)"
        );
    }

    #[test]
    fn test_skip_first_level_one() {
        let source = "# Title\n\n## Install\n\n## Usage";
        assert_eq!(
            toc_markdown(source, options(), true).unwrap(),
            "  - [Install](#install)\n  - [Usage](#usage)"
        );
    }

    #[test]
    fn test_skip_first_only_applies_to_first_heading() {
        // The first heading is level 2, so nothing is skipped, not even the
        // later level 1 heading.
        let source = "## Intro\n\n# Title\n\n## Usage";
        assert_eq!(
            toc_markdown(source, options(), true).unwrap(),
            "  - [Intro](#intro)\n- [Title](#title)\n  - [Usage](#usage)"
        );
    }

    #[test]
    fn test_skipped_heading_counts_towards_threshold() {
        let source = "# Title\n\n## Only section";
        assert_eq!(
            toc_markdown(source, options(), true).unwrap(),
            "  - [Only section](#only-section)"
        );
    }

    #[test]
    fn test_duplicate_headings_get_suffixes() {
        let source = "## FAQ\n\n## FAQ\n\n## FAQ";
        assert_eq!(
            toc_markdown(source, options(), false).unwrap(),
            "  - [FAQ](#faq)\n  - [FAQ](#faq-1)\n  - [FAQ](#faq-2)"
        );
    }

    #[test]
    fn test_identical_headings_need_two_slugs() {
        // Two identical headings still register two distinct slugs.
        assert!(toc_markdown("## A\n\n## A", options(), false).is_some());
    }

    #[test]
    fn test_heading_links_are_stripped() {
        let source = "## See [the guide](guide.md)\n\n## Other";
        let toc = toc_markdown(source, options(), false).unwrap();
        assert!(toc.starts_with("  - [See the guide](#see-the-guideguidemd)"));
    }

    #[test]
    fn test_inline_formatting_kept() {
        let source = "## Install `npm`\n\n## *Fast* start";
        assert_eq!(
            toc_markdown(source, options(), false).unwrap(),
            "  - [Install <code>npm</code>](#install-npm)\n  - [<em>Fast</em> start](#fast-start)"
        );
    }

    #[test]
    fn test_raw_text_uses_source_span() {
        let source = "## Hello *World* ##\n";
        let headings = collect_headings(source, options());
        assert_eq!(headings.len(), 1);
        assert_eq!(headings[0].raw_text(source), "Hello *World*");
    }

    #[test]
    fn test_empty_heading() {
        let source = "##\n\n## Next";
        let headings = collect_headings(source, options());
        assert_eq!(headings.len(), 2);
        assert_eq!(headings[0].raw_text(source), "");
    }
}

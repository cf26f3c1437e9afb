//! Search result page building.
//!
//! Results are written as Markdown, one link per hit followed by a quoted
//! plain-text excerpt of the document, and then rendered like any page.

use std::fmt::Write;
use std::sync::LazyLock;

use pulldown_cmark::{Event, Options, Parser, TagEnd};
use regex::Regex;

/// Maximum number of hits shown on a result page.
pub const SEARCH_RESULTS_MAX: usize = 10;

/// Maximum excerpt length in characters.
pub const SEARCH_EXTRACT_LENGTH: usize = 400;

/// Body of a result page without hits.
pub const NO_RESULTS: &str = "No results.";

/// Marker appended to truncated excerpts.
const ELLIPSIS: &str = " [...]";

static DIRECTIVE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\[\[(toc|itoc|index)\]\]").unwrap());

/// Summary line for a result page.
///
/// # Examples
///
/// ```
/// use mdwiki_renderer::search::summary;
///
/// assert_eq!(summary(3, 3), "Search results (3)");
/// assert_eq!(summary(15, 10), "Search results (first 10 of 15)");
/// ```
#[must_use]
pub fn summary(total: usize, shown: usize) -> String {
    if shown < total {
        format!("Search results (first {shown} of {total})")
    } else {
        format!("Search results ({total})")
    }
}

/// Plain-text excerpt of a Markdown document.
///
/// Markup and backticks are removed, whitespace runs collapse to one space
/// and directive tokens are escaped so the excerpt cannot expand them. Text
/// longer than [`SEARCH_EXTRACT_LENGTH`] characters is cut and marked with
/// ` [...]`.
#[must_use]
pub fn excerpt(markdown: &str) -> String {
    let text = strip_markdown(markdown).replace('`', "");
    let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
    let text = escape_directives(&text);

    if text.chars().count() > SEARCH_EXTRACT_LENGTH {
        let mut cut: String = text.chars().take(SEARCH_EXTRACT_LENGTH).collect();
        cut.push_str(ELLIPSIS);
        cut
    } else {
        text
    }
}

/// Text content of a Markdown document.
///
/// Keeps text, inline code and image alt text; drops raw HTML. Block
/// boundaries become spaces.
fn strip_markdown(markdown: &str) -> String {
    let mut text = String::with_capacity(markdown.len());
    let options = Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS;

    for event in Parser::new_ext(markdown, options) {
        match event {
            Event::Text(t) | Event::Code(t) => text.push_str(&t),
            Event::SoftBreak | Event::HardBreak | Event::Rule => text.push(' '),
            Event::End(
                TagEnd::Paragraph
                | TagEnd::Heading(_)
                | TagEnd::Item
                | TagEnd::CodeBlock
                | TagEnd::TableCell
                | TagEnd::BlockQuote(_),
            ) => text.push(' '),
            _ => {}
        }
    }
    text
}

/// Escape directive tokens so they render literally.
fn escape_directives(text: &str) -> String {
    DIRECTIVE_RE
        .replace_all(text, "&#91;&#91;$1]]")
        .into_owned()
}

/// Append one result entry for `reference` to `out`.
pub(crate) fn push_result(out: &mut String, reference: &str, content: &str) {
    let target = if reference.chars().any(char::is_whitespace) {
        format!("<{reference}>")
    } else {
        reference.to_owned()
    };
    let _ = write!(out, "[{reference}]({target})\n> {}\n\n", excerpt(content));
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_summary() {
        assert_eq!(summary(0, 0), "Search results (0)");
        assert_eq!(summary(10, 10), "Search results (10)");
        assert_eq!(summary(15, 10), "Search results (first 10 of 15)");
    }

    #[test]
    fn test_excerpt_strips_markup() {
        let markdown = "# Title\n\nSome **bold** and `code` with a [link](x.md).\n\n- one\n- two\n\n<div>raw</div>\n";
        assert_eq!(
            excerpt(markdown),
            "Title Some bold and code with a link. one two"
        );
    }

    #[test]
    fn test_excerpt_keeps_image_alt() {
        assert_eq!(excerpt("See ![the diagram](d.png) here"), "See the diagram here");
    }

    #[test]
    fn test_excerpt_collapses_whitespace() {
        assert_eq!(excerpt("a\tb\n\n\n   c  "), "a b c");
    }

    #[test]
    fn test_excerpt_removes_backticks_in_code_blocks() {
        assert_eq!(excerpt("```\nlet s = `x`;\n```"), "let s = x;");
    }

    #[test]
    fn test_excerpt_escapes_directives() {
        assert_eq!(
            excerpt("[[index]] and [[TOC]] and [[itoc]]"),
            "&#91;&#91;index]] and &#91;&#91;TOC]] and &#91;&#91;itoc]]"
        );
        assert_eq!(excerpt("[[other]]"), "[[other]]");
    }

    #[test]
    fn test_excerpt_truncates() {
        let long = "word ".repeat(100);
        let result = excerpt(&long);
        assert!(result.ends_with(" [...]"));
        assert_eq!(result.chars().count(), SEARCH_EXTRACT_LENGTH + ELLIPSIS.len());
    }

    #[test]
    fn test_excerpt_exact_length_not_truncated() {
        let text = "x".repeat(SEARCH_EXTRACT_LENGTH);
        assert_eq!(excerpt(&text), text);
    }

    #[test]
    fn test_excerpt_truncates_by_characters() {
        let text = "é".repeat(SEARCH_EXTRACT_LENGTH + 1);
        let result = excerpt(&text);
        assert_eq!(
            result,
            format!("{}{ELLIPSIS}", "é".repeat(SEARCH_EXTRACT_LENGTH))
        );
    }

    #[test]
    fn test_push_result() {
        let mut out = String::new();
        push_result(&mut out, "guide.md", "# Guide\n\nHello.");
        assert_eq!(out, "[guide.md](guide.md)\n> Guide Hello.\n\n");
    }

    #[test]
    fn test_push_result_reference_with_spaces() {
        let mut out = String::new();
        push_result(&mut out, "my notes.md", "Text");
        assert_eq!(out, "[my notes.md](<my notes.md>)\n> Text\n\n");
    }
}

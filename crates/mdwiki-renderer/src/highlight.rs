//! Syntax highlighting for fenced code blocks.
//!
//! Uses syntect's bundled syntax definitions and emits class-based spans
//! (`<span class="hl-keyword hl-rust">`) so themes live in the stylesheet.

use std::sync::LazyLock;

use syntect::html::{ClassStyle, ClassedHTMLGenerator};
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

static SYNTAX_SET: LazyLock<SyntaxSet> = LazyLock::new(SyntaxSet::load_defaults_newlines);

/// CSS class prefix for highlighted tokens.
const CLASS_STYLE: ClassStyle = ClassStyle::SpacedPrefixed { prefix: "hl-" };

/// Error returned when a code block cannot be highlighted.
#[derive(Debug, thiserror::Error)]
pub enum HighlightError {
    /// No syntax definition matches the language tag.
    #[error("Unsupported language for highlighting: {0}")]
    UnsupportedLanguage(String),
    /// The syntax definition failed while parsing the code.
    #[error("Highlighting failed: {0}")]
    Syntect(#[from] syntect::Error),
}

/// Highlight `code` as `language`, returning inner HTML for a `<code>` element.
///
/// The language matches a file extension first, then a case-insensitive
/// syntax name.
///
/// # Errors
///
/// Returns [`HighlightError::UnsupportedLanguage`] when no syntax matches the
/// tag, or [`HighlightError::Syntect`] when parsing fails.
pub fn highlight(language: &str, code: &str) -> Result<String, HighlightError> {
    let syntax = SYNTAX_SET
        .find_syntax_by_token(language)
        .ok_or_else(|| HighlightError::UnsupportedLanguage(language.to_owned()))?;

    let mut generator =
        ClassedHTMLGenerator::new_with_class_style(syntax, &SYNTAX_SET, CLASS_STYLE);
    for line in LinesWithEndings::from(code) {
        generator.parse_html_for_line_which_includes_newline(line)?;
    }
    Ok(generator.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_highlight_rust() {
        let html = highlight("rust", "fn main() {}\n").unwrap();
        assert!(html.contains("hl-rust"));
        assert!(html.contains("main"));
        assert!(html.contains("<span"));
    }

    #[test]
    fn test_highlight_by_extension() {
        assert!(highlight("rs", "fn f() {}\n").unwrap().contains("hl-rust"));
        let html = highlight("py", "print('hi')\n").unwrap();
        assert!(html.contains("hl-python"));
    }

    #[test]
    fn test_highlight_escapes_markup() {
        let html = highlight("rust", "let s = \"<b>\";\n").unwrap();
        assert!(html.contains("&lt;b&gt;"));
        assert!(!html.contains("<b>"));
    }

    #[test]
    fn test_unsupported_language() {
        let err = highlight("nosuchlang", "x").unwrap_err();
        assert!(matches!(err, HighlightError::UnsupportedLanguage(ref l) if l == "nosuchlang"));
        assert_eq!(
            err.to_string(),
            "Unsupported language for highlighting: nosuchlang"
        );
    }
}

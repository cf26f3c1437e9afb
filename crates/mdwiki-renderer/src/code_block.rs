//! Code block processor trait for extensible code block handling.
//!
//! Processors are registered with the renderer and checked in order when a
//! fenced code block is encountered. The first processor returning a
//! non-`PassThrough` result wins; otherwise the block is syntax highlighted.
//!
//! # Example
//!
//! ```
//! use mdwiki_renderer::{CodeBlockProcessor, ProcessResult};
//!
//! struct GraphvizProcessor;
//!
//! impl CodeBlockProcessor for GraphvizProcessor {
//!     fn process(&mut self, language: &str, source: &str) -> ProcessResult {
//!         if language == "dot" {
//!             ProcessResult::Inline(format!(r#"<div class="graphviz">{source}</div>"#))
//!         } else {
//!             ProcessResult::PassThrough
//!         }
//!     }
//! }
//! ```

/// Result of processing a code block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProcessResult {
    /// Replace the code block with this HTML.
    Inline(String),

    /// Render as a regular, syntax highlighted code block.
    PassThrough,
}

/// Trait for processing special code blocks.
pub trait CodeBlockProcessor {
    /// Process a code block and return the result.
    ///
    /// # Arguments
    ///
    /// * `language` - Language identifier from the fence info string
    /// * `source` - Raw content of the code block
    fn process(&mut self, language: &str, source: &str) -> ProcessResult;
}

/// Emits `mermaid` blocks verbatim for client-side diagram rendering.
///
/// The source is wrapped in `<p class="mermaid">` without escaping or
/// highlighting; only the trailing newline of the fence body is dropped.
#[derive(Clone, Copy, Debug, Default)]
pub struct MermaidProcessor;

impl CodeBlockProcessor for MermaidProcessor {
    fn process(&mut self, language: &str, source: &str) -> ProcessResult {
        if language != "mermaid" {
            return ProcessResult::PassThrough;
        }
        let source = source.strip_suffix('\n').unwrap_or(source);
        ProcessResult::Inline(format!(r#"<p class="mermaid">{source}</p>"#))
    }
}

/// Extract the language tag from a fence info string.
///
/// The language is the first whitespace-separated word; anything after it
/// (attributes, titles) is ignored.
#[must_use]
pub(crate) fn fence_language(info: &str) -> Option<String> {
    info.split_whitespace().next().map(str::to_owned)
}

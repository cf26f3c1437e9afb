//! Markdown wiki renderer.
//!
//! This crate turns wiki pages written in Markdown into HTML. The entry point is
//! [`Renderer`], which reads files, builds search result pages and a site index
//! from an [`Indexer`], and funnels everything through a single Markdown to HTML
//! conversion.
//!
//! # Architecture
//!
//! - [`MarkdownRenderer`]: streaming HTML writer over `pulldown-cmark` events.
//!   Handles syntax highlighting, link rewriting for static export and
//!   click-to-enlarge images. Special code blocks are delegated to
//!   [`CodeBlockProcessor`]s such as [`MermaidProcessor`].
//! - A pre-pass over the parsed document assigns heading ids and expands the
//!   line-initial wiki directives `[[toc]]`, `[[itoc]]` and `[[index]]`.
//! - [`Renderer`]: the wiki-level operations (`render_file`, `render_code`,
//!   `render_search`, `render_index`, `render_table_of_contents`).
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use mdwiki_renderer::{IndexError, Indexer, RenderOptions, Renderer, SearchHit};
//!
//! struct EmptyIndex;
//!
//! impl Indexer for EmptyIndex {
//!     fn search(&self, _query: &str) -> Result<Vec<SearchHit>, IndexError> {
//!         Ok(Vec::new())
//!     }
//!     fn get_content(&self, reference: &str) -> Result<String, IndexError> {
//!         Err(IndexError::NotFound(reference.to_owned()))
//!     }
//!     fn get_files(&self) -> Result<Vec<String>, IndexError> {
//!         Ok(Vec::new())
//!     }
//! }
//!
//! let renderer = Renderer::new(Arc::new(EmptyIndex), RenderOptions::default());
//! let html = renderer.render_markdown("# Hello\n\n**Bold** text").unwrap();
//! assert!(html.contains("<strong>Bold</strong>"));
//! ```

mod code_block;
mod directive;
mod error;
pub mod highlight;
mod href;
mod html;
mod indexer;
#[cfg(any(test, feature = "mock"))]
mod mock;
pub mod nav;
mod renderer;
pub mod search;
pub mod slug;
mod state;
mod toc;
mod util;
mod wiki;

pub use code_block::{CodeBlockProcessor, MermaidProcessor, ProcessResult};
pub use directive::WikiDirective;
pub use error::RenderError;
pub use href::{format_href, normalize_path};
pub use indexer::{IndexError, Indexer, SearchHit};
#[cfg(any(test, feature = "mock"))]
pub use mock::MockIndexer;
pub use renderer::{MarkdownRenderer, RenderResult};
pub use state::escape_html;
pub use util::remove_links;
pub use wiki::{RenderOptions, Renderer};

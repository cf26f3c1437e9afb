//! Wiki page rendering.
//!
//! [`Renderer`] is the entry point for turning wiki content into HTML. Every
//! operation builds or reads Markdown and funnels it through
//! [`Renderer::render_markdown`], which assigns heading ids, expands
//! directives and writes HTML.

use std::path::Path;
use std::sync::Arc;

use crate::code_block::MermaidProcessor;
use crate::directive::{self, WikiDirective};
use crate::error::RenderError;
use crate::href::extname;
use crate::indexer::Indexer;
use crate::renderer::MarkdownRenderer;
use crate::search::{self, NO_RESULTS, SEARCH_RESULTS_MAX};
use crate::util::code_fence;
use crate::{nav, toc};

/// Rendering options fixed for the lifetime of a [`Renderer`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Prefix for page URLs in the site index.
    pub base_path: String,
    /// Rewrite internal links to `.html` targets for static export.
    pub export: bool,
}

impl RenderOptions {
    /// Create options with the given base path and export mode.
    #[must_use]
    pub fn new(base_path: impl Into<String>, export: bool) -> Self {
        Self {
            base_path: base_path.into(),
            export,
        }
    }
}

/// Renders wiki pages, search results and the site index to HTML.
///
/// # Example
///
/// ```ignore
/// let mut renderer = Renderer::new(indexer, RenderOptions::default());
/// let page = renderer.render_file(Path::new("docs/guide.md")).await?;
/// let results = renderer.render_search("install").await?;
/// println!("{}", renderer.search_summary().unwrap_or_default());
/// ```
pub struct Renderer {
    indexer: Arc<dyn Indexer>,
    options: RenderOptions,
    search_summary: Option<String>,
}

impl Renderer {
    /// Create a renderer backed by `indexer`.
    #[must_use]
    pub fn new(indexer: Arc<dyn Indexer>, options: RenderOptions) -> Self {
        Self {
            indexer,
            options,
            search_summary: None,
        }
    }

    /// Rendering options.
    #[must_use]
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Summary of the last [`render_search`](Self::render_search) call.
    #[must_use]
    pub fn search_summary(&self) -> Option<&str> {
        self.search_summary.as_deref()
    }

    /// Read a file as text without rendering it.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::FileNotFound`] or [`RenderError::Io`] when the
    /// file cannot be read.
    pub async fn render_raw(&self, path: &Path) -> Result<String, RenderError> {
        tokio::fs::read_to_string(path)
            .await
            .map_err(|e| RenderError::from_io(e, path))
    }

    /// Render a Markdown file with an inline table of contents appended.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be read or a directive fails.
    pub async fn render_file(&self, path: &Path) -> Result<String, RenderError> {
        let mut content = self.render_raw(path).await?;
        content.push('\n');
        content.push_str(WikiDirective::InlineToc.token());
        self.render_markdown(&content)
    }

    /// Render a source file as a highlighted code block.
    ///
    /// The file extension is used as the language.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be read.
    pub async fn render_code(&self, path: &Path) -> Result<String, RenderError> {
        let content = self.render_raw(path).await?;
        let language = path
            .file_name()
            .and_then(|name| name.to_str())
            .map_or("", |name| extname(name).trim_start_matches('.'));
        let fence = code_fence(&content);
        let newline = if content.ends_with('\n') { "" } else { "\n" };
        self.render_markdown(&format!("{fence}{language}\n{content}{newline}{fence}"))
    }

    /// Render the result page for `query`.
    ///
    /// At most [`SEARCH_RESULTS_MAX`] hits are shown. The summary line is
    /// available from [`search_summary`](Self::search_summary) afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Index`] when searching or reading a hit fails.
    #[allow(clippy::unused_async)]
    pub async fn render_search(&mut self, query: &str) -> Result<String, RenderError> {
        let hits = self.indexer.search(query)?;
        let total = hits.len();
        let shown = &hits[..total.min(SEARCH_RESULTS_MAX)];
        tracing::debug!(query, total, shown = shown.len(), "Rendering search results");

        let mut markdown = String::new();
        for hit in shown {
            let content = self.indexer.get_content(&hit.reference)?;
            search::push_result(&mut markdown, &hit.reference, &content);
        }
        if shown.is_empty() {
            markdown.push_str(NO_RESULTS);
        }

        self.search_summary = Some(search::summary(total, shown.len()));
        self.render_markdown(&markdown)
    }

    /// Render the index of all pages known to the indexer.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Index`] when the file list is unavailable.
    #[allow(clippy::unused_async)]
    pub async fn render_index(&self) -> Result<String, RenderError> {
        self.index_html()
    }

    /// Render the table of contents of `content`.
    ///
    /// Returns an empty string when the document has fewer than two
    /// headings. With `skip_first`, a level 1 heading at the very start of
    /// the document is left out.
    ///
    /// # Errors
    ///
    /// Propagates errors from rendering the list.
    pub fn render_table_of_contents(
        &self,
        content: &str,
        skip_first: bool,
    ) -> Result<String, RenderError> {
        let options = MarkdownRenderer::parser_options();
        match toc::toc_markdown(content, options, skip_first) {
            Some(markdown) => self.render_markdown(&markdown),
            None => Ok(String::new()),
        }
    }

    /// Convert Markdown to HTML, expanding wiki directives.
    ///
    /// # Errors
    ///
    /// Returns an error when expanding `[[index]]` fails.
    pub fn render_markdown(&self, markdown: &str) -> Result<String, RenderError> {
        let options = MarkdownRenderer::parser_options();
        let events = directive::expand(markdown, options, |directive| {
            self.expand_directive(directive, markdown)
        })?;
        Ok(self.markdown_renderer().render(events.into_iter()).html)
    }

    fn markdown_renderer(&self) -> MarkdownRenderer {
        MarkdownRenderer::new()
            .with_export(self.options.export)
            .with_processor(MermaidProcessor)
    }

    fn expand_directive(
        &self,
        directive: WikiDirective,
        source: &str,
    ) -> Result<String, RenderError> {
        tracing::debug!(%directive, "Expanding directive");
        match directive {
            WikiDirective::Toc => self.render_table_of_contents(source, true),
            WikiDirective::InlineToc => {
                let toc = self.render_table_of_contents(source, false)?;
                if toc.is_empty() {
                    Ok(toc)
                } else {
                    Ok(format!(r#"<div id="_toc">{toc}</div>"#))
                }
            }
            WikiDirective::Index => self.index_html(),
        }
    }

    fn index_html(&self) -> Result<String, RenderError> {
        let files = self.indexer.get_files()?;
        let tree = nav::build_tree(&files, &self.options.base_path);
        self.render_markdown(&nav::render_nav_markdown(&tree))
    }
}

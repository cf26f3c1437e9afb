//! Streaming HTML renderer over `pulldown-cmark` events.

use std::fmt::Write;

use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag, TagEnd};

use crate::code_block::{CodeBlockProcessor, ProcessResult, fence_language};
use crate::html;
use crate::state::{CodeBlockState, HeadingState, PendingImage, TableState, escape_html};
use crate::util::{heading_level_to_num, remove_links};

/// Result of rendering markdown.
#[derive(Clone, Debug)]
pub struct RenderResult {
    /// Rendered HTML content.
    pub html: String,
}

/// Markdown to HTML renderer.
///
/// Walks parser events and writes HTML, delegating special code blocks to
/// registered [`CodeBlockProcessor`]s.
///
/// # Code Block Processors
///
/// Custom code block processing can be added via [`with_processor`](Self::with_processor).
/// Processors are checked in order; the first returning a non-`PassThrough` result wins.
pub struct MarkdownRenderer {
    output: String,
    code: CodeBlockState,
    table: TableState,
    heading: HeadingState,
    pending_image: Option<PendingImage>,
    processors: Vec<Box<dyn CodeBlockProcessor>>,
    /// Depth of open links; anchor markup inside link text is dropped.
    link_depth: usize,
    export: bool,
}

impl MarkdownRenderer {
    /// Create a new renderer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            output: String::with_capacity(4096),
            code: CodeBlockState::default(),
            table: TableState::default(),
            heading: HeadingState::default(),
            pending_image: None,
            processors: Vec::new(),
            link_depth: 0,
            export: false,
        }
    }

    /// Rewrite internal link targets for static export.
    ///
    /// See [`format_href`](crate::format_href) for which targets change.
    #[must_use]
    pub fn with_export(mut self, export: bool) -> Self {
        self.export = export;
        self
    }

    /// Add a code block processor.
    ///
    /// Processors are checked in order when a fenced code block is encountered.
    #[must_use]
    pub fn with_processor<P: CodeBlockProcessor + 'static>(mut self, processor: P) -> Self {
        self.processors.push(Box::new(processor));
        self
    }

    /// Parser options for wiki pages.
    ///
    /// GitHub Flavored Markdown (tables, strikethrough, task lists) and
    /// typographic quotes and dashes are always on.
    #[must_use]
    pub fn parser_options() -> Options {
        Options::ENABLE_TABLES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_GFM
            | Options::ENABLE_SMART_PUNCTUATION
    }

    /// Render markdown text directly with [`parser_options`](Self::parser_options).
    ///
    /// Wiki directives are not expanded here; use
    /// [`Renderer::render_markdown`](crate::Renderer::render_markdown) for that.
    pub fn render_markdown(&mut self, markdown: &str) -> RenderResult {
        self.render(Parser::new_ext(markdown, Self::parser_options()))
    }

    /// Push content to output or heading buffer based on context.
    fn push_inline(&mut self, content: &str) {
        if self.pending_image.is_some() {
            // Image alt text is plain; markup inside it is dropped.
            return;
        }
        if self.heading.is_active() {
            self.heading.push_html(content);
        } else {
            self.output.push_str(content);
        }
    }

    /// Render markdown events and return the result.
    pub fn render<'a, I>(&mut self, events: I) -> RenderResult
    where
        I: Iterator<Item = Event<'a>>,
    {
        for event in events {
            self.process_event(event);
        }

        RenderResult {
            html: std::mem::take(&mut self.output),
        }
    }

    fn process_event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start_tag(tag),
            Event::End(tag) => self.end_tag(tag),
            Event::Text(text) => self.text(&text),
            Event::Code(code) => self.inline_code(&code),
            Event::Html(html) => self.output.push_str(&html),
            Event::InlineHtml(html) => self.inline_html(&html),
            Event::SoftBreak => self.soft_break(),
            Event::HardBreak => self.push_inline("<br>"),
            Event::Rule => self.output.push_str("<hr>"),
            Event::TaskListMarker(checked) => self.task_list_marker(checked),
            Event::FootnoteReference(_) | Event::InlineMath(_) | Event::DisplayMath(_) => {
                // Not supported
            }
        }
    }

    #[allow(clippy::too_many_lines)]
    fn start_tag(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph => {
                if !self.code.is_active() {
                    self.output.push_str("<p>");
                }
            }
            Tag::Heading { level, id, .. } => {
                // Opening tag is written in end_tag once the id is known.
                self.heading
                    .start(heading_level_to_num(level), id.map(|id| id.to_string()));
            }
            Tag::BlockQuote(_) => self.output.push_str("<blockquote>"),
            Tag::CodeBlock(kind) => {
                let lang = match kind {
                    CodeBlockKind::Fenced(ref info) => fence_language(info),
                    CodeBlockKind::Indented => None,
                };
                self.code.start(lang);
            }
            Tag::List(start) => match start {
                Some(1) => self.output.push_str("<ol>"),
                Some(n) => {
                    let _ = write!(self.output, r#"<ol start="{n}">"#);
                }
                None => self.output.push_str("<ul>"),
            },
            Tag::Item => self.output.push_str("<li>"),
            Tag::FootnoteDefinition(_) | Tag::HtmlBlock | Tag::MetadataBlock(_) => {}
            Tag::DefinitionList => self.output.push_str("<dl>"),
            Tag::DefinitionListTitle => self.output.push_str("<dt>"),
            Tag::DefinitionListDefinition => self.output.push_str("<dd>"),
            Tag::Table(alignments) => {
                self.table.start(alignments);
                self.output.push_str("<table>");
            }
            Tag::TableHead => {
                self.table.start_head();
                self.output.push_str("<thead><tr>");
            }
            Tag::TableRow => {
                self.table.start_row();
                self.output.push_str("<tr>");
            }
            Tag::TableCell => {
                let align = self.table.current_alignment_style();
                let tag = if self.table.is_in_head() { "th" } else { "td" };
                let _ = write!(self.output, "<{tag}{align}>");
            }
            Tag::Emphasis => self.push_inline("<em>"),
            Tag::Strong => self.push_inline("<strong>"),
            Tag::Strikethrough => self.push_inline("<s>"),
            Tag::Link {
                dest_url, title, ..
            } => {
                self.link_depth += 1;
                let link_tag = html::link_start(&dest_url, &title, self.export);
                self.push_inline(&link_tag);
            }
            Tag::Image {
                dest_url, title, ..
            } => {
                // Alt text is collected from the nested events.
                self.pending_image = Some(PendingImage {
                    src: dest_url.to_string(),
                    title: title.to_string(),
                    alt: String::new(),
                });
            }
            Tag::Superscript => self.push_inline("<sup>"),
            Tag::Subscript => self.push_inline("<sub>"),
        }
    }

    fn end_tag(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph => {
                if !self.code.is_active() {
                    self.output.push_str("</p>");
                }
            }
            TagEnd::Heading(_) => {
                if let Some((level, id, html)) = self.heading.complete() {
                    let _ = write!(
                        self.output,
                        r#"<h{level} id="{}">{}</h{level}>"#,
                        escape_html(&id),
                        html.trim()
                    );
                }
            }
            TagEnd::BlockQuote(_) => self.output.push_str("</blockquote>"),
            TagEnd::CodeBlock => self.end_code_block(),
            TagEnd::List(ordered) => {
                self.output
                    .push_str(if ordered { "</ol>" } else { "</ul>" });
            }
            TagEnd::Item => self.output.push_str("</li>"),
            TagEnd::FootnoteDefinition | TagEnd::HtmlBlock | TagEnd::MetadataBlock(_) => {}
            TagEnd::Image => {
                if let Some(image) = self.pending_image.take() {
                    let mut rendered = String::new();
                    html::image(
                        &image.src,
                        &image.alt,
                        &image.title,
                        self.link_depth > 0,
                        &mut rendered,
                    );
                    self.push_inline(&rendered);
                }
            }
            TagEnd::DefinitionList => self.output.push_str("</dl>"),
            TagEnd::DefinitionListTitle => self.output.push_str("</dt>"),
            TagEnd::DefinitionListDefinition => self.output.push_str("</dd>"),
            TagEnd::Table => self.output.push_str("</tbody></table>"),
            TagEnd::TableHead => {
                self.output.push_str("</tr></thead><tbody>");
                self.table.end_head();
            }
            TagEnd::TableRow => self.output.push_str("</tr>"),
            TagEnd::TableCell => {
                self.output.push_str(if self.table.is_in_head() {
                    "</th>"
                } else {
                    "</td>"
                });
                self.table.next_cell();
            }
            TagEnd::Emphasis => self.push_inline("</em>"),
            TagEnd::Strong => self.push_inline("</strong>"),
            TagEnd::Strikethrough => self.push_inline("</s>"),
            TagEnd::Link => {
                self.link_depth = self.link_depth.saturating_sub(1);
                self.push_inline("</a>");
            }
            TagEnd::Superscript => self.push_inline("</sup>"),
            TagEnd::Subscript => self.push_inline("</sub>"),
        }
    }

    fn end_code_block(&mut self) {
        let (lang, content) = self.code.end();

        // Try processors in order, fall back to highlighted code block
        let processed = lang.as_deref().and_then(|lang| {
            self.processors
                .iter_mut()
                .find_map(|processor| match processor.process(lang, &content) {
                    ProcessResult::Inline(html) => Some(html),
                    ProcessResult::PassThrough => None,
                })
        });

        match processed {
            Some(html) => self.output.push_str(&html),
            None => html::code_block(lang.as_deref(), &content, &mut self.output),
        }
    }

    fn text(&mut self, text: &str) {
        if self.code.is_active() {
            self.code.push_str(text);
        } else if let Some(image) = self.pending_image.as_mut() {
            image.alt.push_str(text);
        } else if self.heading.is_active() {
            self.heading.push_text(text);
            self.heading.push_html(&escape_html(text));
        } else {
            self.output.push_str(&escape_html(text));
        }
    }

    fn inline_code(&mut self, code: &str) {
        if let Some(image) = self.pending_image.as_mut() {
            image.alt.push_str(code);
            return;
        }
        if self.heading.is_active() {
            self.heading.push_text(code);
        }
        self.push_inline(&format!("<code>{}</code>", escape_html(code)));
    }

    fn inline_html(&mut self, html: &str) {
        if self.link_depth > 0 {
            let stripped = remove_links(html);
            self.push_inline(&stripped);
        } else {
            self.push_inline(html);
        }
    }

    fn soft_break(&mut self) {
        if self.code.is_active() {
            self.code.push_str("\n");
        } else if let Some(image) = self.pending_image.as_mut() {
            image.alt.push(' ');
        } else {
            self.push_inline("\n");
        }
    }

    fn task_list_marker(&mut self, checked: bool) {
        if checked {
            self.output
                .push_str(r#"<input type="checkbox" checked disabled> "#);
        } else {
            self.output.push_str(r#"<input type="checkbox" disabled> "#);
        }
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MermaidProcessor;

    fn render_html(markdown: &str) -> String {
        MarkdownRenderer::new().render_markdown(markdown).html
    }

    fn render_export(markdown: &str) -> String {
        MarkdownRenderer::new()
            .with_export(true)
            .render_markdown(markdown)
            .html
    }

    #[test]
    fn test_html_basic_paragraph() {
        assert_eq!(render_html("Hello, world!"), "<p>Hello, world!</p>");
    }

    #[test]
    fn test_html_heading_with_id() {
        assert_eq!(
            render_html("## Section Title"),
            r#"<h2 id="section-title">Section Title</h2>"#
        );
    }

    #[test]
    fn test_duplicate_heading_ids() {
        let html = render_html("## FAQ\n\n## FAQ");
        assert!(html.contains(r#"<h2 id="faq">FAQ</h2>"#));
        assert!(html.contains(r#"<h2 id="faq-1">FAQ</h2>"#));
    }

    #[test]
    fn test_heading_with_inline_code() {
        let html = render_html("## Install `npm`");
        assert_eq!(
            html,
            r#"<h2 id="install-npm">Install <code>npm</code></h2>"#
        );
    }

    #[test]
    fn test_html_code_block_highlighted() {
        let html = render_html("```rust\nfn main() {}\n```");
        assert!(html.contains(r#"class="language-rust""#));
        assert!(html.contains("hl-rust"));
    }

    #[test]
    fn test_html_code_block_unknown_language() {
        let html = render_html("```nosuchlang\na < b\n```");
        assert_eq!(
            html,
            "<pre><code class=\"language-nosuchlang\">a &lt; b\n</code></pre>"
        );
    }

    #[test]
    fn test_indented_code_block() {
        let html = render_html("    plain text\n");
        assert_eq!(html, "<pre><code>plain text\n</code></pre>");
    }

    #[test]
    fn test_mermaid_processor() {
        let html = MarkdownRenderer::new()
            .with_processor(MermaidProcessor)
            .render_markdown("```mermaid\ngraph TD; A-->B;\n```")
            .html;
        assert_eq!(html, r#"<p class="mermaid">graph TD; A-->B;</p>"#);
    }

    #[test]
    fn test_mermaid_without_processor_is_code() {
        let html = render_html("```mermaid\ngraph TD;\n```");
        assert!(html.starts_with(r#"<pre><code class="language-mermaid">"#));
    }

    #[test]
    fn test_html_blockquote() {
        assert_eq!(render_html("> Note"), "<blockquote><p>Note</p></blockquote>");
    }

    #[test]
    fn test_html_image_wrapped_in_link() {
        assert_eq!(
            render_html("![Alt text](image.png)"),
            r#"<p><a href="image.png" target="_new"><img src="image.png" alt="Alt text"></a></p>"#
        );
    }

    #[test]
    fn test_html_image_alt_with_formatting() {
        let html = render_html("![An *important* `diagram`](d.svg)");
        assert!(html.contains(r#"alt="An important diagram""#));
    }

    #[test]
    fn test_html_link() {
        assert_eq!(
            render_html("[Guide](guide.md)"),
            r#"<p><a href="guide.md">Guide</a></p>"#
        );
    }

    #[test]
    fn test_html_link_export() {
        assert_eq!(
            render_export("[Guide](guide.md) and [Docs](docs/setup.md)"),
            r#"<p><a href="guide.html">Guide</a> and <a href="docs/setup.md">Docs</a></p>"#
        );
    }

    #[test]
    fn test_html_link_strips_nested_anchors() {
        let html = render_html(r#"[see <a href="/x">this</a>](page.md)"#);
        assert_eq!(html, r#"<p><a href="page.md">see this</a></p>"#);
    }

    #[test]
    fn test_image_inside_link_not_wrapped() {
        let html = render_html("[![badge](b.svg)](https://ci.example.com)");
        assert_eq!(
            html,
            r#"<p><a href="https://ci.example.com"><img src="b.svg" alt="badge"></a></p>"#
        );
        assert_eq!(html.matches("<a ").count(), 1);
    }

    #[test]
    fn test_image_after_link_still_wrapped() {
        let html = render_html("[CI](https://ci.example.com) ![logo](l.png)");
        assert_eq!(
            html,
            r#"<p><a href="https://ci.example.com">CI</a> <a href="l.png" target="_new"><img src="l.png" alt="logo"></a></p>"#
        );
    }

    #[test]
    fn test_inline_html_outside_link_untouched() {
        let html = render_html(r#"A <a href="/x">raw</a> link"#);
        assert_eq!(html, r#"<p>A <a href="/x">raw</a> link</p>"#);
    }

    #[test]
    fn test_html_table() {
        let html = render_html("| A | B |\n|:--|--:|\n| 1 | 2 |");
        assert!(html.contains("<table>"));
        assert!(html.contains("<thead>"));
        assert!(html.contains(r#"<th style="text-align:left">"#));
        assert!(html.contains(r#"<td style="text-align:right">"#));
        assert!(html.contains("</tbody></table>"));
    }

    #[test]
    fn test_emphasis() {
        let html = render_html("*italic* and **bold**");
        assert!(html.contains("<em>italic</em>"));
        assert!(html.contains("<strong>bold</strong>"));
    }

    #[test]
    fn test_strikethrough() {
        assert!(render_html("~~deleted~~").contains("<s>deleted</s>"));
    }

    #[test]
    fn test_smart_punctuation() {
        assert_eq!(
            render_html("\"Quoted\" -- it's"),
            "<p>\u{201c}Quoted\u{201d} \u{2013} it\u{2019}s</p>"
        );
    }

    #[test]
    fn test_lists() {
        let html = render_html("- Item 1\n- Item 2");
        assert_eq!(html, "<ul><li>Item 1</li><li>Item 2</li></ul>");

        let html = render_html("3. Third\n4. Fourth");
        assert!(html.starts_with(r#"<ol start="3">"#));
        assert!(html.ends_with("</ol>"));
    }

    #[test]
    fn test_task_list_html() {
        let html = render_html("- [ ] Unchecked\n- [x] Checked");
        assert!(html.contains(r#"<input type="checkbox" disabled>"#));
        assert!(html.contains(r#"<input type="checkbox" checked disabled>"#));
    }

    #[test]
    fn test_hard_break_and_rule() {
        let html = render_html("line one  \nline two\n\n---");
        assert_eq!(html, "<p>line one<br>line two</p><hr>");
    }

    #[test]
    fn test_parser_options() {
        let options = MarkdownRenderer::parser_options();
        assert!(options.contains(Options::ENABLE_TABLES));
        assert!(options.contains(Options::ENABLE_TASKLISTS));
        assert!(options.contains(Options::ENABLE_SMART_PUNCTUATION));
        assert!(!options.contains(Options::ENABLE_FOOTNOTES));
    }

    #[test]
    fn test_default_renderer() {
        let parser = Parser::new("Hello");
        let result = MarkdownRenderer::default().render(parser);
        assert_eq!(result.html, "<p>Hello</p>");
    }
}

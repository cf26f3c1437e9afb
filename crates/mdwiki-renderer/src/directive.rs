//! Wiki directives and the pre-pass that expands them.
//!
//! A directive is one of the tokens `[[toc]]`, `[[itoc]]` or `[[index]]` at
//! the start of a line inside a paragraph. The pre-pass runs over the parsed
//! event stream before HTML rendering and
//! - assigns every heading an id slugged from its raw source text,
//! - replaces directive tokens with the HTML they expand to.
//!
//! Tokens are matched against the source text, not the parsed text, so an
//! entity-escaped token such as `&#91;&#91;index]]` never expands.

use std::fmt;
use std::ops::Range;

use pulldown_cmark::{CowStr, Event, Options, Parser, Tag, TagEnd};

use crate::error::RenderError;
use crate::slug::SlugRegistry;
use crate::toc::HeadingCapture;

/// Line-initial wiki directive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WikiDirective {
    /// `[[toc]]`: table of contents without the page title.
    Toc,
    /// `[[itoc]]`: full table of contents wrapped in `<div id="_toc">`.
    InlineToc,
    /// `[[index]]`: index of all pages.
    Index,
}

impl WikiDirective {
    /// All directives.
    pub const ALL: [Self; 3] = [Self::Toc, Self::InlineToc, Self::Index];

    /// Token as written in documents (lower case).
    #[must_use]
    pub fn token(self) -> &'static str {
        match self {
            Self::Toc => "[[toc]]",
            Self::InlineToc => "[[itoc]]",
            Self::Index => "[[index]]",
        }
    }

    /// Directive whose token starts `text`, ignoring ASCII case.
    ///
    /// # Examples
    ///
    /// ```
    /// use mdwiki_renderer::WikiDirective;
    ///
    /// assert_eq!(WikiDirective::match_prefix("[[TOC]] rest"), Some(WikiDirective::Toc));
    /// assert_eq!(WikiDirective::match_prefix("see [[toc]]"), None);
    /// ```
    #[must_use]
    pub fn match_prefix(text: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|directive| {
            let token = directive.token();
            text.get(..token.len())
                .is_some_and(|prefix| prefix.eq_ignore_ascii_case(token))
        })
    }
}

impl fmt::Display for WikiDirective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Parse `source` into events with heading ids assigned and directives
/// replaced by the HTML `resolve` returns for them.
///
/// A paragraph holding nothing but directives is emitted without its `<p>`
/// wrapper.
///
/// # Errors
///
/// Returns the first error produced by `resolve`.
pub(crate) fn expand<'a, F>(
    source: &'a str,
    options: Options,
    mut resolve: F,
) -> Result<Vec<Event<'a>>, RenderError>
where
    F: FnMut(WikiDirective) -> Result<String, RenderError>,
{
    let mut slugs = SlugRegistry::new();
    let mut events = Vec::new();
    let mut iter = Parser::new_ext(source, options).into_offset_iter();

    while let Some((event, _)) = iter.next() {
        match event {
            Event::Start(Tag::Heading {
                level,
                classes,
                attrs,
                ..
            }) => {
                let heading = HeadingCapture::collect(level, &mut iter);
                let id = slugs.slug(heading.raw_text(source));
                events.push(Event::Start(Tag::Heading {
                    level,
                    id: Some(CowStr::from(id)),
                    classes,
                    attrs,
                }));
                events.extend(heading.events);
                events.push(Event::End(TagEnd::Heading(level)));
            }
            Event::Start(Tag::Paragraph) => {
                let mut inner = Vec::new();
                for (event, range) in iter.by_ref() {
                    if matches!(event, Event::End(TagEnd::Paragraph)) {
                        break;
                    }
                    inner.push((event, range));
                }
                expand_paragraph(source, inner, &mut resolve, &mut events)?;
            }
            other => events.push(other),
        }
    }

    Ok(events)
}

/// Expand directives in one paragraph and append it to `out`.
fn expand_paragraph<'a, F>(
    source: &'a str,
    inner: Vec<(Event<'a>, Range<usize>)>,
    resolve: &mut F,
    out: &mut Vec<Event<'a>>,
) -> Result<(), RenderError>
where
    F: FnMut(WikiDirective) -> Result<String, RenderError>,
{
    let mut events = Vec::with_capacity(inner.len());
    let mut line_start = true;
    // Source offset up to which text belongs to an expanded token.
    let mut consumed = 0;
    let mut expanded = false;
    let mut has_content = false;

    for (event, range) in inner {
        match event {
            Event::Text(text) => {
                if range.end <= consumed {
                    continue;
                }
                let text = if range.start < consumed {
                    remainder(source, &text, range.start, consumed)
                } else if line_start
                    && let Some(directive) = WikiDirective::match_prefix(&source[range.start..])
                {
                    events.push(Event::Html(CowStr::from(resolve(directive)?)));
                    expanded = true;
                    consumed = range.start + directive.token().len();
                    line_start = false;
                    if range.end <= consumed {
                        continue;
                    }
                    remainder(source, &text, range.start, consumed)
                } else {
                    text
                };
                line_start = false;
                if !text.trim().is_empty() {
                    has_content = true;
                }
                events.push(Event::Text(text));
            }
            Event::SoftBreak | Event::HardBreak => {
                line_start = true;
                events.push(event);
            }
            other => {
                line_start = false;
                has_content = true;
                events.push(other);
            }
        }
    }

    if expanded && !has_content {
        out.extend(events.into_iter().filter(|e| matches!(e, Event::Html(_))));
    } else {
        out.push(Event::Start(Tag::Paragraph));
        out.extend(events);
        out.push(Event::End(TagEnd::Paragraph));
    }
    Ok(())
}

/// Part of a text fragment starting at `start` that lies after `consumed`.
fn remainder<'a>(source: &str, text: &CowStr<'a>, start: usize, consumed: usize) -> CowStr<'a> {
    let prefix = source.get(start..consumed).unwrap_or("");
    match text.strip_prefix(prefix) {
        Some(rest) => CowStr::from(rest.to_owned()),
        None => text.clone(),
    }
}

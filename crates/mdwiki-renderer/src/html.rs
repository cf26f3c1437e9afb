//! HTML output for elements with wiki-specific rendering.
//!
//! Produces:
//! - `<pre><code class="language-*">` with highlighted spans for code blocks
//! - `<a target="_new"><img></a>` so images open full size in a new tab
//! - `<a href>` with export-aware link targets

use std::fmt::Write;

use crate::highlight;
use crate::href::format_href;
use crate::state::escape_html;

/// Language tag that disables highlighting.
const NO_HIGHLIGHT: &str = "no-highlight";

/// Render a code block, highlighting it when the language is known.
///
/// Unknown languages are logged and rendered as escaped plain text.
pub(crate) fn code_block(lang: Option<&str>, content: &str, out: &mut String) {
    let Some(lang) = lang.filter(|l| !l.is_empty() && *l != NO_HIGHLIGHT) else {
        let _ = write!(out, "<pre><code>{}</code></pre>", escape_html(content));
        return;
    };

    let body = match highlight::highlight(lang, content) {
        Ok(html) => html,
        Err(e) => {
            tracing::warn!(language = %lang, error = %e, "Rendering code block without highlighting");
            escape_html(content)
        }
    };
    let _ = write!(
        out,
        r#"<pre><code class="language-{}">{body}</code></pre>"#,
        escape_html(lang)
    );
}

/// Render an image wrapped in a link to its own source.
///
/// Inside link text (`linked`) only the `<img>` is written, so anchors
/// never nest.
pub(crate) fn image(src: &str, alt: &str, title: &str, linked: bool, out: &mut String) {
    let src = escape_html(src);
    let title_attr = if title.is_empty() {
        String::new()
    } else {
        format!(r#" title="{}""#, escape_html(title))
    };
    let img = format!(r#"<img src="{src}"{title_attr} alt="{}">"#, escape_html(alt));
    if linked {
        out.push_str(&img);
    } else {
        let _ = write!(out, r#"<a href="{src}" target="_new">{img}</a>"#);
    }
}

/// Render the opening tag of a link.
pub(crate) fn link_start(href: &str, title: &str, export: bool) -> String {
    let href = format_href(href, export);
    if title.is_empty() {
        format!(r#"<a href="{}">"#, escape_html(&href))
    } else {
        format!(
            r#"<a href="{}" title="{}">"#,
            escape_html(&href),
            escape_html(title)
        )
    }
}

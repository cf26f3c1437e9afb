//! Site index navigation tree.
//!
//! [`build_tree`] nests the flat file list from the indexer by directory and
//! [`render_nav_markdown`] turns the tree into a nested Markdown bullet list:
//!
//! ```text
//! - [Getting Started](/getting-started.md)
//! - Domain
//!   - [Billing](/domain/billing.md)
//! ```

use std::cmp::Ordering;
use std::fmt::Write;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use crate::href::{basename, extname, join, normalize_path};

/// Bytes escaped in index URL segments.
///
/// Everything `encodeURIComponent` escapes, plus parentheses so a segment
/// can never close the Markdown link around it.
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'');

/// Node of the navigation tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NavNode {
    /// A page, with its file name and absolute, percent-encoded URL.
    File { name: String, url: String },
    /// A directory and the entries inside it.
    Dir { name: String, children: Vec<NavNode> },
}

impl NavNode {
    /// File or directory name as found in the path.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::File { name, .. } | Self::Dir { name, .. } => name,
        }
    }

    /// Name shown in the index.
    ///
    /// File names lose their extension; both kinds are humanized.
    #[must_use]
    pub fn title(&self) -> String {
        match self {
            Self::File { name, .. } => humanize(basename(name, extname(name))),
            Self::Dir { name, .. } => humanize(name),
        }
    }
}

/// Build the navigation tree for `files`.
///
/// Paths are normalized first; a leading `.` component is ignored. Each file
/// URL is `base_path` joined with the relative path, rooted at `/`. A path
/// listed twice keeps its last URL.
#[must_use]
pub fn build_tree<S: AsRef<str>>(files: &[S], base_path: &str) -> Vec<NavNode> {
    let paths: Vec<String> = files.iter().map(|f| normalize_path(f.as_ref())).collect();
    let entries: Vec<Entry<'_>> = paths
        .iter()
        .filter_map(|path| {
            let components: Vec<&str> = path
                .split('/')
                .enumerate()
                .filter(|&(i, part)| !part.is_empty() && !(i == 0 && part == "."))
                .map(|(_, part)| part)
                .collect();
            (!components.is_empty()).then(|| Entry {
                components,
                url: file_url(base_path, path),
            })
        })
        .collect();

    let refs: Vec<&Entry<'_>> = entries.iter().collect();
    build_level(&refs, 0)
}

/// A file path split into components, with its URL.
struct Entry<'p> {
    components: Vec<&'p str>,
    url: String,
}

/// Nodes for the entries below one directory, `depth` components deep.
///
/// Files come first in input order, then directories in order of first
/// appearance.
fn build_level(entries: &[&Entry<'_>], depth: usize) -> Vec<NavNode> {
    let mut nodes: Vec<NavNode> = Vec::new();
    let mut dirs: Vec<(&str, Vec<&Entry<'_>>)> = Vec::new();

    for &entry in entries {
        let Some(&name) = entry.components.get(depth) else {
            continue;
        };
        if entry.components.len() == depth + 1 {
            let node = NavNode::File {
                name: name.to_owned(),
                url: entry.url.clone(),
            };
            match nodes.iter().position(|existing| existing.name() == name) {
                Some(idx) => nodes[idx] = node,
                None => nodes.push(node),
            }
        } else {
            match dirs.iter().position(|(dir, _)| *dir == name) {
                Some(idx) => dirs[idx].1.push(entry),
                None => dirs.push((name, vec![entry])),
            }
        }
    }

    nodes.extend(dirs.into_iter().map(|(name, children)| NavNode::Dir {
        name: name.to_owned(),
        children: build_level(&children, depth + 1),
    }));
    nodes
}

/// Absolute URL for a file, with every segment percent-encoded.
fn file_url(base_path: &str, path: &str) -> String {
    let joined = join(base_path, path);
    let mut url = String::with_capacity(joined.len() + 1);
    for segment in joined.trim_start_matches('/').split('/') {
        url.push('/');
        url.extend(utf8_percent_encode(segment, SEGMENT));
    }
    url
}

/// Render the tree as a nested Markdown list.
///
/// At every level files come before directories, each kind ordered by
/// [`compare_names`].
#[must_use]
pub fn render_nav_markdown(nodes: &[NavNode]) -> String {
    let mut out = String::new();
    write_level(nodes, 0, &mut out);
    out
}

fn write_level(nodes: &[NavNode], depth: usize, out: &mut String) {
    let mut sorted: Vec<&NavNode> = nodes.iter().collect();
    sorted.sort_by(|a, b| compare_entries(a, b));

    let indent = "  ".repeat(depth);
    for node in sorted {
        match node {
            NavNode::File { url, .. } => {
                let _ = writeln!(out, "{indent}- [{}]({url})", node.title());
            }
            NavNode::Dir { children, .. } => {
                let _ = writeln!(out, "{indent}- {}", node.title());
                write_level(children, depth + 1, out);
            }
        }
    }
}

fn compare_entries(a: &NavNode, b: &NavNode) -> Ordering {
    match (a, b) {
        (NavNode::File { .. }, NavNode::Dir { .. }) => Ordering::Less,
        (NavNode::Dir { .. }, NavNode::File { .. }) => Ordering::Greater,
        _ => compare_names(a.name(), b.name()),
    }
}

/// Case-insensitive name order; on ties lower case sorts first.
#[must_use]
pub fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| b.cmp(a))
}

/// Turn a file or directory name into display text.
///
/// Splits camelCase words, treats `-` and `_` as spaces, collapses
/// whitespace and capitalizes every word.
///
/// # Examples
///
/// ```
/// use mdwiki_renderer::nav::humanize;
///
/// assert_eq!(humanize("getting-started"), "Getting Started");
/// assert_eq!(humanize("apiReference_v2"), "Api Reference V2");
/// ```
#[must_use]
pub fn humanize(name: &str) -> String {
    let mut spaced = String::with_capacity(name.len() + 4);
    let mut prev: Option<char> = None;
    for c in name.chars() {
        if c.is_uppercase() && prev.is_some_and(|p| p.is_lowercase() || p.is_ascii_digit()) {
            spaced.push(' ');
        }
        spaced.push(if c == '-' || c == '_' { ' ' } else { c });
        prev = Some(c);
    }

    spaced
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}

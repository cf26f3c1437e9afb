//! Link target rewriting for static export.
//!
//! Paths are handled with POSIX semantics on plain strings so the output does
//! not depend on the host platform.

use std::borrow::Cow;

/// Rewrite a link target for the current output mode.
///
/// Targets are returned unchanged when export mode is off, when they are
/// fragment-only (`#section`), or when they are considered external: not
/// rooted at `/` and with a directory part other than `.`. Remaining targets
/// get their extension replaced by `.html`.
///
/// # Examples
///
/// ```
/// use mdwiki_renderer::format_href;
///
/// assert_eq!(format_href("guide.md", true), "guide.html");
/// assert_eq!(format_href("/docs/setup.md", true), "/docs/setup.html");
/// assert_eq!(format_href("docs/setup.md", true), "docs/setup.md");
/// assert_eq!(format_href("#intro", true), "#intro");
/// assert_eq!(format_href("guide.md", false), "guide.md");
/// ```
#[must_use]
pub fn format_href(href: &str, export: bool) -> Cow<'_, str> {
    let is_external = !href.starts_with('/') && dirname(href) != ".";
    let is_hash = href.starts_with('#');

    if !export || is_external || is_hash {
        return Cow::Borrowed(href);
    }

    let ext = extname(href);
    let dir = dirname(href);
    let base = basename(href, ext);
    Cow::Owned(normalize_path(&join(dir, &format!("{base}.html"))))
}

/// Normalize path separators to single forward slashes.
///
/// Backslashes become slashes, repeated slashes collapse, and a trailing
/// slash is removed (except for the root `/`). Dot segments are kept.
///
/// # Examples
///
/// ```
/// use mdwiki_renderer::normalize_path;
///
/// assert_eq!(normalize_path(r"docs\guide\setup.md"), "docs/guide/setup.md");
/// assert_eq!(normalize_path("docs//guide/"), "docs/guide");
/// ```
#[must_use]
pub fn normalize_path(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    for c in path.chars() {
        let c = if c == '\\' { '/' } else { c };
        if c == '/' && out.ends_with('/') {
            continue;
        }
        out.push(c);
    }
    if out.len() > 1 && out.ends_with('/') {
        out.pop();
    }
    out
}

/// Directory part of a path (`"."` when there is none).
pub(crate) fn dirname(path: &str) -> &str {
    let bytes = path.as_bytes();
    let Some(&first) = bytes.first() else {
        return ".";
    };
    let has_root = first == b'/';

    // Trailing slashes belong to the last segment, not the directory.
    let mut end = None;
    let mut matched_slash = true;
    for (i, &b) in bytes.iter().enumerate().skip(1).rev() {
        if b == b'/' {
            if !matched_slash {
                end = Some(i);
                break;
            }
        } else {
            matched_slash = false;
        }
    }

    match end {
        None if has_root => "/",
        None => ".",
        Some(1) if has_root => "//",
        Some(end) => &path[..end],
    }
}

/// Last path segment, with `ext` removed when it is a proper suffix.
pub(crate) fn basename<'a>(path: &'a str, ext: &str) -> &'a str {
    let trimmed = path.trim_end_matches('/');
    let name = trimmed.rsplit('/').next().unwrap_or(trimmed);
    if !ext.is_empty() && name != ext {
        name.strip_suffix(ext).unwrap_or(name)
    } else {
        name
    }
}

/// Extension of the last path segment including the dot.
///
/// Leading dots (`.bashrc`) do not start an extension.
pub(crate) fn extname(path: &str) -> &str {
    let name = basename(path, "");
    if name.chars().all(|c| c == '.') {
        return "";
    }
    match name.rfind('.') {
        Some(0) | None => "",
        Some(idx) => &name[idx..],
    }
}

/// Join two paths and resolve `.` and `..` segments.
pub(crate) fn join(base: &str, path: &str) -> String {
    let joined = match (base.is_empty(), path.is_empty()) {
        (true, true) => return ".".to_owned(),
        (true, false) => path.to_owned(),
        (false, true) => base.to_owned(),
        (false, false) => format!("{base}/{path}"),
    };
    normalize_segments(&joined)
}

/// Resolve `.` and `..` segments, keeping a leading `/` and a trailing slash.
fn normalize_segments(path: &str) -> String {
    if path.is_empty() {
        return ".".to_owned();
    }
    let absolute = path.starts_with('/');
    let trailing = path.ends_with('/');

    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if segments.last().is_some_and(|s| *s != "..") {
                    segments.pop();
                } else if !absolute {
                    segments.push("..");
                }
            }
            _ => segments.push(segment),
        }
    }

    let mut out = segments.join("/");
    if absolute {
        out.insert(0, '/');
    }
    if out.is_empty() {
        return ".".to_owned();
    }
    if trailing && !out.ends_with('/') {
        out.push('/');
    }
    out
}

//! Heading anchor slugs.
//!
//! [`slugify`] turns heading text into a URL fragment. [`SlugRegistry`] makes
//! slugs unique within one pass over a document by suffixing collisions with
//! `-1`, `-2`, and so on. A registry is scoped to a single pass: create a new
//! one for every table of contents or page render.

use std::collections::HashMap;

/// Characters removed from slugs besides the general punctuation blocks.
const STRIPPED_ASCII: &str = "\\'!\"#$%&()*+,./:;<=>?@[]^`{|}~";

/// Whether `c` is dropped from slugs.
fn is_stripped(c: char) -> bool {
    matches!(c, '\u{2000}'..='\u{206F}' | '\u{2E00}'..='\u{2E7F}') || STRIPPED_ASCII.contains(c)
}

/// Convert heading text to a slug without uniqueness bookkeeping.
///
/// Lower-cases and trims the text, removes punctuation and symbols, and
/// replaces whitespace runs with single dashes.
///
/// # Examples
///
/// ```
/// use mdwiki_renderer::slug::slugify;
///
/// assert_eq!(slugify("Hello World"), "hello-world");
/// assert_eq!(slugify("What's New?"), "whats-new");
/// ```
#[must_use]
pub fn slugify(text: &str) -> String {
    let lowered = text.to_lowercase();
    let mut slug = String::with_capacity(lowered.len());
    let mut in_whitespace = false;

    for c in lowered.trim().chars() {
        if is_stripped(c) {
            continue;
        }
        if c.is_whitespace() {
            if !in_whitespace {
                slug.push('-');
                in_whitespace = true;
            }
            continue;
        }
        in_whitespace = false;
        slug.push(c);
    }

    slug
}

/// Registry of slugs handed out during one pass over a document.
///
/// Maps every issued slug to the collision counter of slugs derived from it.
#[derive(Debug, Default)]
pub struct SlugRegistry {
    seen: HashMap<String, usize>,
}

impl SlugRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Compute a unique slug for `text` and register it.
    pub fn slug(&mut self, text: &str) -> String {
        let base = slugify(text);
        let mut slug = base.clone();

        if self.seen.contains_key(&slug) {
            loop {
                let counter = self.seen.entry(base.clone()).or_default();
                *counter += 1;
                slug = format!("{base}-{counter}");
                if !self.seen.contains_key(&slug) {
                    break;
                }
            }
        }

        self.seen.insert(slug.clone(), 0);
        slug
    }

    /// Number of distinct slugs registered.
    #[must_use]
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    /// Whether no slug has been registered yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Hello World"), "hello-world");
        assert_eq!(slugify("What's New?"), "whats-new");
        assert_eq!(slugify("  Spaces  "), "spaces");
        assert_eq!(slugify("Multiple   Spaces"), "multiple-spaces");
        assert_eq!(slugify("kebab-case"), "kebab-case");
        assert_eq!(slugify("snake_case"), "snake_case");
    }

    #[test]
    fn test_slugify_removes_symbols_between_words() {
        assert_eq!(slugify("Cats & Dogs"), "cats-dogs");
        assert_eq!(slugify("Install `npm`"), "install-npm");
        assert_eq!(slugify("[Docs](http://example.com)"), "docshttpexamplecom");
    }

    #[test]
    fn test_slugify_removes_general_punctuation() {
        assert_eq!(slugify("Wait\u{2026} what\u{2019}s this"), "wait-whats-this");
    }

    #[test]
    fn test_slugify_keeps_non_ascii_letters() {
        assert_eq!(slugify("Über Größe"), "über-größe");
    }

    #[test]
    fn test_registry_suffixes_collisions() {
        let mut registry = SlugRegistry::new();
        assert_eq!(registry.slug("FAQ"), "faq");
        assert_eq!(registry.slug("FAQ"), "faq-1");
        assert_eq!(registry.slug("FAQ"), "faq-2");
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn test_registry_skips_taken_suffix() {
        let mut registry = SlugRegistry::new();
        assert_eq!(registry.slug("faq-1"), "faq-1");
        assert_eq!(registry.slug("faq"), "faq");
        assert_eq!(registry.slug("faq"), "faq-2");
    }

    #[test]
    fn test_registry_starts_empty() {
        let registry = SlugRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
    }
}

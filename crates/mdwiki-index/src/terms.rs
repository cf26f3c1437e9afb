//! Term extraction for search scoring.

use std::collections::HashMap;

/// Lower-cased alphanumeric terms of `text`.
pub(crate) fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|term| !term.is_empty())
        .map(str::to_lowercase)
}

/// Number of occurrences of every term in `text`.
pub(crate) fn term_counts(text: &str) -> HashMap<String, usize> {
    let mut counts = HashMap::new();
    for term in tokenize(text) {
        *counts.entry(term).or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize() {
        let terms: Vec<String> = tokenize("Hello, World! foo_bar v2.0").collect();
        assert_eq!(terms, vec!["hello", "world", "foo", "bar", "v2", "0"]);
    }

    #[test]
    fn test_tokenize_unicode() {
        let terms: Vec<String> = tokenize("Größe über").collect();
        assert_eq!(terms, vec!["größe", "über"]);
    }

    #[test]
    fn test_term_counts() {
        let counts = term_counts("a b A c a");
        assert_eq!(counts.get("a"), Some(&3));
        assert_eq!(counts.get("b"), Some(&1));
        assert_eq!(counts.get("d"), None);
    }
}

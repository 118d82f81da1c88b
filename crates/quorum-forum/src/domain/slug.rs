//! URL slug value object.

use std::fmt;

use serde::Serialize;
use unicode_normalization::UnicodeNormalization;

/// A URL-safe identifier derived from a question title.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Slug(String);

impl Slug {
    /// Wraps an existing slug verbatim.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Derives a slug from free text. The text is NFKD-decomposed so accented
    /// letters keep their base letter; ASCII letters and digits are kept and
    /// lower-cased, whitespace, `-` and `_` runs become a single `-`, and
    /// everything else is dropped. The result is empty when the text has no
    /// letter or digit.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        let mut slug = String::with_capacity(text.len());
        let mut pending_dash = false;

        for ch in text.nfkd() {
            if ch.is_ascii_alphanumeric() {
                if pending_dash && !slug.is_empty() {
                    slug.push('-');
                }
                pending_dash = false;
                slug.push(ch.to_ascii_lowercase());
            } else if ch.is_whitespace() || ch == '-' || ch == '_' {
                pending_dash = true;
            }
        }

        Self(slug)
    }

    /// Returns the slug text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_text_lowercases_and_joins_words() {
        assert_eq!(Slug::from_text("Example question title").as_str(), "example-question-title");
    }

    #[test]
    fn test_from_text_collapses_separators_and_drops_punctuation() {
        assert_eq!(Slug::from_text("  What's  new -- in Rust?  ").as_str(), "whats-new-in-rust");
    }

    #[test]
    fn test_from_text_transliterates_accented_letters() {
        assert_eq!(Slug::from_text("Café com leite").as_str(), "cafe-com-leite");
        assert_eq!(Slug::from_text("Ação ÑANDÚ").as_str(), "acao-nandu");
    }

    #[test]
    fn test_from_text_drops_characters_without_ascii_base() {
        assert_eq!(Slug::from_text("Straße 日本").as_str(), "strae");
    }

    #[test]
    fn test_from_text_of_punctuation_only_is_empty() {
        assert!(Slug::from_text("???").as_str().is_empty());
    }
}

//! PHP keywords the scanner needs to recognize.
//!
//! This is not the full PHP keyword list: only `function`, which starts a declaration, and `use`, which turns a
//! following `function` into an import.
//!
//! ## Notes
//! - Lookup via [`from_str`] is **case-insensitive**, as PHP keywords are.
//!
//! ## Examples
//! ```rust
//! use phpunit_core::vocab::keywords::{self, KeywordId};
//!
//! assert_eq!(keywords::from_str("FUNCTION"), Some(KeywordId::Function));
//! assert_eq!(keywords::from_str("describe"), None);
//! ```

/// Stable identifier for a recognized keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordId {
    Function,
    Use,
}

/// Metadata for a keyword.
#[derive(Debug, Clone, Copy)]
pub struct KeywordInfo {
    pub id: KeywordId,
    pub canonical: &'static str,
}

/// Registry of recognized keywords.
pub const KEYWORDS: &[KeywordInfo] = &[
    KeywordInfo {
        id: KeywordId::Function,
        canonical: "function",
    },
    KeywordInfo {
        id: KeywordId::Use,
        canonical: "use",
    },
];

/// Canonical (lowercase) spelling.
pub fn as_str(id: KeywordId) -> &'static str {
    info_for(id).canonical
}

/// Full metadata.
pub fn info_for(id: KeywordId) -> &'static KeywordInfo {
    KEYWORDS.iter().find(|k| k.id == id).unwrap_or(&KEYWORDS[0])
}

/// Lookup by spelling, ignoring ASCII case.
pub fn from_str(s: &str) -> Option<KeywordId> {
    KEYWORDS.iter().find(|k| k.canonical.eq_ignore_ascii_case(s)).map(|k| k.id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_insensitive_lookup() {
        assert_eq!(from_str("function"), Some(KeywordId::Function));
        assert_eq!(from_str("Function"), Some(KeywordId::Function));
        assert_eq!(from_str("USE"), Some(KeywordId::Use));
    }

    #[test]
    fn test_unknown_words() {
        assert_eq!(from_str("it"), None);
        assert_eq!(from_str("test"), None);
        assert_eq!(from_str("functions"), None);
        assert_eq!(from_str("fn"), None);
    }

    #[test]
    fn test_canonical_spelling() {
        assert_eq!(as_str(KeywordId::Use), "use");
    }
}

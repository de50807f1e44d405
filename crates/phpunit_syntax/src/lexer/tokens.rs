//! Token types for the PHP scanner.
//!
//! ## Notes
//! - Tokens are deliberately coarse: string contents are kept, but operators collapse into `Punct` except the few
//!   that matter for call detection (`->`, `?->`, `::`).
//! - Inline HTML outside `<?php ... ?>` is a single token.

use crate::span::Span;
use phpunit_core::vocab::keywords::{self, KeywordId};

/// Kind of token produced by the scanner.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // ========== Keywords and names ==========
    Keyword(KeywordId),
    Ident(String),
    /// `$name` (without the `$`)
    Variable(String),

    // ========== Literals ==========
    /// Quoted string contents, escapes left as written
    String(String),
    /// Heredoc/nowdoc body
    Heredoc(String),
    Number,

    // ========== Operators ==========
    /// `->` or `?->`
    Arrow,
    /// `::`
    DoubleColon,
    Punct(char),

    // ========== Mode switches ==========
    InlineHtml,
    OpenTag,
    CloseTag,
}

/// A token with its kind and source span.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    /// Construct a new token.
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Whether this token is the given keyword.
    pub fn is_keyword(&self, id: KeywordId) -> bool {
        matches!(self.kind, TokenKind::Keyword(k) if k == id)
    }

    /// Whether this token is the given punctuation character.
    pub fn is_punct(&self, c: char) -> bool {
        matches!(self.kind, TokenKind::Punct(p) if p == c)
    }

    /// Whether this token can be a declared name (identifiers, and keywords PHP allows as method names).
    pub fn is_name(&self) -> bool {
        matches!(self.kind, TokenKind::Ident(_) | TokenKind::Keyword(_))
    }
}

/// Resolve an identifier spelling to a keyword id, if recognized.
pub fn keyword_id(name: &str) -> Option<KeywordId> {
    keywords::from_str(name)
}

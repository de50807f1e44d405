//! Scanner for PHP source.
//!
//! Handles tokenization including:
//! - Inline HTML outside `<?php ... ?>` (a single token per run)
//! - Line (`//`, `#`) and block (`/* */`) comments, which produce no tokens
//! - Single-quoted, double-quoted and backtick strings, including `{$...}` interpolation
//! - Heredoc and nowdoc bodies
//! - Identifiers, recognized keywords and `$variables`
//!
//! ## Module Structure
//!
//! - `tokens` - Token types (TokenKind, Token)
//! - `strings` - Quoted string and heredoc scanning

mod strings;
pub mod tokens;

pub use tokens::{Token, TokenKind, keyword_id};

use crate::diagnostics::SyntaxError;
use crate::span::Span;

// ============================================================================
// LEXER STATE
// ----------------------------------------------------------------------------
// [Inline HTML] → see `<?php` / `<?=` → [Inside code]
//                                            ↓
//                                           see `?>` → [Inline HTML]
// ============================================================================

/// Scanner for PHP source code.
///
/// Converts source text into a flat stream of tokens. Comments and whitespace are dropped.
pub struct Lexer<'a> {
    source: &'a str,
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
    current_pos: usize,
    /// Whether we are between an open tag and a close tag
    in_code: bool,
    tokens: Vec<Token>,
    errors: Vec<SyntaxError>,
}

impl<'a> Lexer<'a> {
    /// Create a new scanner for the given source code.
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.char_indices().peekable(),
            current_pos: 0,
            in_code: false,
            tokens: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Tokenize the entire source code.
    ///
    /// Returns the tokens on success, or every error encountered.
    pub fn tokenize(self) -> Result<Vec<Token>, Vec<SyntaxError>> {
        let (tokens, errors) = self.tokenize_lossy();
        if errors.is_empty() { Ok(tokens) } else { Err(errors) }
    }

    /// Tokenize the entire source code, keeping the tokens produced before and after any error.
    ///
    /// ## Notes
    /// - An unterminated construct consumes the rest of the buffer, so tokens after it are never produced.
    pub fn tokenize_lossy(mut self) -> (Vec<Token>, Vec<SyntaxError>) {
        while !self.is_at_end() {
            if self.in_code {
                self.scan_token();
            } else {
                self.scan_inline_html();
            }
        }
        (self.tokens, self.errors)
    }

    // ========================================================================
    // Core character handling
    // ========================================================================

    fn is_at_end(&mut self) -> bool {
        self.chars.peek().is_none()
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().map(|(_, c)| *c)
    }

    fn peek_next(&self) -> Option<char> {
        let mut iter = self.source[self.current_pos..].chars();
        iter.next(); // skip current
        iter.next()
    }

    fn advance(&mut self) -> Option<char> {
        if let Some((pos, c)) = self.chars.next() {
            self.current_pos = pos + c.len_utf8();
            Some(c)
        } else {
            None
        }
    }

    fn match_char(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Remaining, unconsumed source.
    fn rest(&self) -> &'a str {
        &self.source[self.current_pos..]
    }

    /// Consume `n` characters.
    fn advance_by(&mut self, n: usize) {
        for _ in 0..n {
            if self.advance().is_none() {
                break;
            }
        }
    }

    fn add_token(&mut self, kind: TokenKind, start: usize) {
        self.tokens.push(Token::new(kind, Span::new(start, self.current_pos)));
    }

    // ========================================================================
    // Inline HTML
    // ========================================================================

    fn scan_inline_html(&mut self) {
        let start = self.current_pos;
        let Some(offset) = find_open_tag(self.rest()) else {
            // No more PHP: the remainder is markup
            while self.advance().is_some() {}
            self.add_token(TokenKind::InlineHtml, start);
            return;
        };

        if offset > 0 {
            while self.current_pos < start + offset {
                self.advance();
            }
            self.add_token(TokenKind::InlineHtml, start);
        }

        let tag_start = self.current_pos;
        let tag_len = if self.rest().starts_with("<?=") { 3 } else { 5 };
        self.advance_by(tag_len);
        self.add_token(TokenKind::OpenTag, tag_start);
        self.in_code = true;
    }

    // ========================================================================
    // Main scanning dispatch
    // ========================================================================

    fn scan_token(&mut self) {
        while let Some(c) = self.peek() {
            if c.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }

        let start = self.current_pos;

        let Some(c) = self.advance() else {
            return;
        };

        match c {
            // Comments
            '#' => {
                if self.peek() == Some('[') {
                    // PHP 8 attribute: `#[Test]` is code, not a comment
                    self.add_token(TokenKind::Punct('#'), start);
                } else {
                    self.skip_line_comment();
                }
            }
            '/' => {
                if self.match_char('/') {
                    self.skip_line_comment();
                } else if self.match_char('*') {
                    self.skip_block_comment(start);
                } else {
                    self.add_token(TokenKind::Punct('/'), start);
                }
            }

            // Close tag / nullsafe arrow
            '?' => {
                if self.peek() == Some('>') {
                    self.advance();
                    self.add_token(TokenKind::CloseTag, start);
                    self.in_code = false;
                } else if self.peek() == Some('-') && self.peek_next() == Some('>') {
                    self.advance_by(2);
                    self.add_token(TokenKind::Arrow, start);
                } else {
                    self.add_token(TokenKind::Punct('?'), start);
                }
            }
            '-' => {
                if self.match_char('>') {
                    self.add_token(TokenKind::Arrow, start);
                } else {
                    self.add_token(TokenKind::Punct('-'), start);
                }
            }
            ':' => {
                if self.match_char(':') {
                    self.add_token(TokenKind::DoubleColon, start);
                } else {
                    self.add_token(TokenKind::Punct(':'), start);
                }
            }

            // Strings
            '\'' | '"' | '`' => self.scan_quoted(start, c),
            '<' if self.rest().starts_with("<<") => {
                if !self.scan_heredoc(start) {
                    self.add_token(TokenKind::Punct('<'), start);
                }
            }

            // Variables
            '$' => {
                if self.peek().is_some_and(is_ident_start) {
                    let name_start = self.current_pos;
                    self.consume_ident_tail();
                    let name = self.source[name_start..self.current_pos].to_string();
                    self.add_token(TokenKind::Variable(name), start);
                } else {
                    self.add_token(TokenKind::Punct('$'), start);
                }
            }

            // Numbers
            '0'..='9' => {
                while let Some(c) = self.peek() {
                    if c.is_ascii_alphanumeric() || c == '_' || c == '.' {
                        self.advance();
                    } else {
                        break;
                    }
                }
                self.add_token(TokenKind::Number, start);
            }

            // Identifiers and keywords
            _ if is_ident_start(c) => self.scan_identifier(start),

            _ => self.add_token(TokenKind::Punct(c), start),
        }
    }

    // ========================================================================
    // Comments
    // ========================================================================

    /// Skip to the end of the line, stopping before a `?>` close tag.
    fn skip_line_comment(&mut self) {
        while let Some(c) = self.peek() {
            if c == '\n' || self.rest().starts_with("?>") {
                break;
            }
            self.advance();
        }
    }

    fn skip_block_comment(&mut self, start: usize) {
        loop {
            match self.advance() {
                Some('*') if self.peek() == Some('/') => {
                    self.advance();
                    return;
                }
                Some(_) => {}
                None => {
                    self.errors.push(SyntaxError::UnterminatedComment {
                        at: Span::new(start, start + 2).into(),
                    });
                    return;
                }
            }
        }
    }

    // ========================================================================
    // Identifier scanning
    // ========================================================================

    fn consume_ident_tail(&mut self) {
        while let Some(c) = self.peek() {
            if is_ident_continue(c) {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn scan_identifier(&mut self, start: usize) {
        self.consume_ident_tail();

        let spelling = &self.source[start..self.current_pos];
        if let Some(id) = keyword_id(spelling) {
            self.add_token(TokenKind::Keyword(id), start);
        } else {
            self.add_token(TokenKind::Ident(spelling.to_string()), start);
        }
    }
}

// ============================================================================
// Helper functions
// ============================================================================

/// Check if a character can start a PHP identifier (`[a-zA-Z_\x80-\xff]`).
fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || !c.is_ascii()
}

/// Check if a character can continue a PHP identifier.
fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || !c.is_ascii()
}

/// Byte offset of the next `<?php` (any case, followed by whitespace or end) or `<?=` in `text`.
fn find_open_tag(text: &str) -> Option<usize> {
    let mut search_from = 0;
    while let Some(found) = text[search_from..].find("<?") {
        let at = search_from + found;
        let after = &text[at + 2..];
        if after.starts_with('=') {
            return Some(at);
        }
        if after.len() >= 3 && after.is_char_boundary(3) && after[..3].eq_ignore_ascii_case("php") {
            let terminated = after[3..].chars().next().is_none_or(char::is_whitespace);
            if terminated {
                return Some(at);
            }
        }
        search_from = at + 2;
    }
    None
}

/// Convenience function to tokenize a source string.
///
/// This is a shorthand for `Lexer::new(source).tokenize()`.
#[tracing::instrument(skip_all, fields(source_len = source.len()))]
pub fn lex(source: &str) -> Result<Vec<Token>, Vec<SyntaxError>> {
    Lexer::new(source).tokenize()
}

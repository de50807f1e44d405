//! String and heredoc scanning.

use super::{Lexer, TokenKind, is_ident_continue, is_ident_start};
use crate::diagnostics::SyntaxError;
use crate::span::Span;

impl<'a> Lexer<'a> {
    /// Scan a `'...'`, `"..."` or `` `...` `` literal whose opening quote was just consumed.
    ///
    /// ## Notes
    /// - Backslash escapes are skipped in every quote style.
    /// - In double-quoted and backtick strings, `{$...}` interpolation is skipped as a balanced block so quotes
    ///   inside it (`"{$row["id"]}"`) do not end the literal.
    pub(super) fn scan_quoted(&mut self, start: usize, quote: char) {
        let content_start = self.current_pos;
        let interpolates = quote != '\'';

        loop {
            let Some(c) = self.peek() else {
                self.errors.push(SyntaxError::UnterminatedString {
                    at: Span::new(start, content_start).into(),
                });
                return;
            };

            if c == quote {
                let content = self.source[content_start..self.current_pos].to_string();
                self.advance();
                self.add_token(TokenKind::String(content), start);
                return;
            }

            self.advance();
            if c == '\\' {
                self.advance();
            } else if interpolates && c == '{' && self.peek() == Some('$') {
                self.skip_interpolation();
            }
        }
    }

    /// Skip a `{$ ... }` block inside an interpolating string, with the `{` already consumed.
    fn skip_interpolation(&mut self) {
        let mut depth = 1usize;
        while let Some(c) = self.advance() {
            match c {
                '{' => depth += 1,
                '}' => {
                    depth -= 1;
                    if depth == 0 {
                        return;
                    }
                }
                '\'' | '"' => {
                    // Nested literal inside the expression, e.g. an array key
                    while let Some(inner) = self.advance() {
                        if inner == '\\' {
                            self.advance();
                        } else if inner == c {
                            break;
                        }
                    }
                }
                _ => {}
            }
        }
    }

    /// Scan a heredoc/nowdoc whose first `<` was just consumed.
    ///
    /// ## Returns
    /// - `true` if a heredoc header was recognized (the body is consumed, even if unterminated).
    /// - `false` if the text is not a heredoc; nothing beyond the first `<` is consumed.
    pub(super) fn scan_heredoc(&mut self, start: usize) -> bool {
        let Some((header_len, label)) = heredoc_header(self.rest()) else {
            return false;
        };

        let header_chars = self.rest()[..header_len].chars().count();
        self.advance_by(header_chars);
        let body_start = self.current_pos;

        loop {
            let line = self.rest().split_inclusive('\n').next().unwrap_or("");
            if line.is_empty() {
                self.errors.push(SyntaxError::UnterminatedHeredoc {
                    label,
                    at: Span::new(start, body_start).into(),
                });
                return true;
            }

            let indent = line.len() - line.trim_start_matches([' ', '\t']).len();
            let trimmed = &line[indent..];
            let closes = trimmed.starts_with(label.as_str())
                && !trimmed[label.len()..].chars().next().is_some_and(is_ident_continue);

            if closes {
                let body = self.source[body_start..self.current_pos].to_string();
                let closing_chars = line[..indent + label.len()].chars().count();
                self.advance_by(closing_chars);
                self.add_token(TokenKind::Heredoc(body), start);
                return true;
            }

            let line_chars = line.chars().count();
            self.advance_by(line_chars);
        }
    }
}

/// Parse a heredoc header following the first `<`: `<<` + optional blanks + `ID`, `"ID"` or `'ID'` + newline.
///
/// ## Returns
/// - `Some((header_len, label))` where `header_len` is the header's byte length including the newline.
fn heredoc_header(text: &str) -> Option<(usize, String)> {
    let after = text.strip_prefix("<<")?;
    let after_blanks = after.trim_start_matches([' ', '\t']);

    let (quote, after_quote) = match after_blanks.chars().next()? {
        q @ ('"' | '\'') => (Some(q), &after_blanks[1..]),
        _ => (None, after_blanks),
    };

    let first = after_quote.chars().next()?;
    if !is_ident_start(first) {
        return None;
    }
    let label_len = after_quote
        .char_indices()
        .find(|(_, c)| !is_ident_continue(*c))
        .map(|(i, _)| i)
        .unwrap_or(after_quote.len());
    let label = &after_quote[..label_len];
    let mut rest = &after_quote[label_len..];

    if let Some(q) = quote {
        rest = rest.strip_prefix(q)?;
    }

    let newline_len = if rest.starts_with("\r\n") {
        2
    } else if rest.starts_with('\n') {
        1
    } else {
        return None;
    };

    let header_len = text.len() - rest.len() + newline_len;
    Some((header_len, label.to_string()))
}

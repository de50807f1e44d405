//! Function-name regions: where each named function or method is declared.
//!
//! ## Notes
//! - Regions are returned in source order, so the nearest declaration before an offset is the last region whose
//!   start is below it.
//! - Anonymous functions (`function () {}`, `fn () =>`) have no name and produce no region.
//! - `$object->function` and `Foo::function` are member accesses, not declarations.
//! - `use function Foo\bar;` imports a function; it declares nothing.

use phpunit_core::vocab::keywords::KeywordId;

use crate::lexer::{Lexer, Token, TokenKind};
use crate::span::Span;

/// A declared function or method name and where it is spelled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionName {
    pub name: String,
    pub span: Span,
}

/// Collect every named function/method declaration in `source`.
///
/// Scanning is tolerant: an unterminated string or comment ends the scan but keeps the names found before it.
#[tracing::instrument(skip_all, fields(source_len = source.len()))]
pub fn function_names(source: &str) -> Vec<FunctionName> {
    let (tokens, errors) = Lexer::new(source).tokenize_lossy();
    if !errors.is_empty() {
        tracing::debug!(error_count = errors.len(), "scan stopped early; using partial token stream");
    }
    names_from_tokens(source, &tokens)
}

/// Byte spans of every named function/method declaration in `source`, in source order.
pub fn function_name_regions(source: &str) -> Vec<Span> {
    function_names(source).into_iter().map(|f| f.span).collect()
}

fn names_from_tokens(source: &str, tokens: &[Token]) -> Vec<FunctionName> {
    let mut names = Vec::new();

    for (i, token) in tokens.iter().enumerate() {
        if !token.is_keyword(KeywordId::Function) {
            continue;
        }
        let previous = i.checked_sub(1).map(|p| &tokens[p]);
        let is_member_access = previous.is_some_and(|t| matches!(t.kind, TokenKind::Arrow | TokenKind::DoubleColon));
        let is_import = previous.is_some_and(|t| t.is_keyword(KeywordId::Use));
        if is_member_access || is_import {
            continue;
        }

        // `function &byRef()` returns by reference; the name follows the `&`
        let mut next = i + 1;
        if tokens.get(next).is_some_and(|t| t.is_punct('&')) {
            next += 1;
        }

        let Some(name_token) = tokens.get(next) else {
            continue;
        };
        if !name_token.is_name() {
            continue;
        }
        if let Some(name) = name_token.span.text(source) {
            names.push(FunctionName {
                name: name.to_string(),
                span: name_token.span,
            });
        }
    }

    names
}

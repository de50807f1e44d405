//! Scanner diagnostics.

use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

use crate::span::Span;

/// Error produced while scanning PHP source.
///
/// ## Notes
/// - All variants point at the **start** of the construct that never closed.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum SyntaxError {
    #[error("unterminated string literal")]
    #[diagnostic(code(phpunit_syntax::unterminated_string), help("close the string with a matching quote"))]
    UnterminatedString {
        #[label("string starts here")]
        at: SourceSpan,
    },

    #[error("unterminated block comment")]
    #[diagnostic(code(phpunit_syntax::unterminated_comment), help("close the comment with `*/`"))]
    UnterminatedComment {
        #[label("comment starts here")]
        at: SourceSpan,
    },

    #[error("unterminated heredoc `{label}`")]
    #[diagnostic(
        code(phpunit_syntax::unterminated_heredoc),
        help("end the heredoc with a line starting with `{label}`")
    )]
    UnterminatedHeredoc {
        label: String,
        #[label("heredoc starts here")]
        at: SourceSpan,
    },
}

impl SyntaxError {
    /// Source range the error points at.
    pub fn span(&self) -> Span {
        match self {
            SyntaxError::UnterminatedString { at }
            | SyntaxError::UnterminatedComment { at }
            | SyntaxError::UnterminatedHeredoc { at, .. } => Span::from(*at),
        }
    }
}

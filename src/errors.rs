//! Error types for the runner library.
//!
//! Every failure the runner can report is a [`RunnerError`]. The CLI turns them into user-facing messages; the
//! session protocol turns them into `{"ok": false}` responses.

use std::io;
use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Errors that stop a command before or during dispatch.
///
/// ## Notes
/// - A missing config file or binary is **not** an error: resolution falls back silently (see `resolver`).
/// - "Run last" with nothing recorded is not an error either; it is a no-op.
#[derive(Debug, Error, Diagnostic)]
pub enum RunnerError {
    #[error("Could not determine the current test.")]
    #[diagnostic(
        code(phpunit_runner::no_test_under_cursor),
        help("place the cursor inside a test method or below an it()/test() call")
    )]
    NoTestUnderCursor,

    #[error("failed to read {}: {source}", path.display())]
    #[diagnostic(code(phpunit_runner::read_source))]
    ReadSource {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid settings file {}: {source}", path.display())]
    #[diagnostic(code(phpunit_runner::settings), help("settings are a JSON object, e.g. {{\"shell\": \"fish\"}}"))]
    Settings {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid cursor position `{0}`")]
    #[diagnostic(code(phpunit_runner::cursor), help("use LINE or LINE:COLUMN, both starting at 1"))]
    InvalidCursor(String),

    #[error("unknown command `{0}`")]
    #[diagnostic(code(phpunit_runner::unknown_command))]
    UnknownCommand(String),

    #[error("`{0}` does not build a test command")]
    #[diagnostic(code(phpunit_runner::not_runnable))]
    NotRunnable(&'static str),

    #[error("failed to launch `{program}`: {source}")]
    #[diagnostic(code(phpunit_runner::launch))]
    Launch {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("I/O error: {0}")]
    #[diagnostic(code(phpunit_runner::io))]
    Io(#[from] io::Error),
}

/// Result type for runner operations.
pub type RunnerResult<T> = Result<T, RunnerError>;

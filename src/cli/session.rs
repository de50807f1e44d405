//! `phpunit-runner session`: one JSON request per stdin line, one JSON response per stdout line.
//!
//! ```text
//! > {"command": "run_single", "file": "/p/tests/UserTest.php", "line": 12, "buffer": "<?php ..."}
//! < {"ok":true,"command":"cd /p && /p/vendor/bin/phpunit /p/tests/UserTest.php --filter '/::testLogin$/'"}
//! > {"command": "run_last", "file": "/p/app/User.php"}
//! < {"ok":true,"command":"cd /p && /p/vendor/bin/phpunit /p/tests/UserTest.php --filter '/::testLogin$/'"}
//! > {"command": "matching", "file": "/p/app/User.php"}
//! < {"ok":true,"command":null,"matches":["/p/tests/UserTest.php"]}
//! > not json
//! < {"ok":false,"error":"invalid request: expected ident at line 1 column 2"}
//! ```
//!
//! ## Notes
//! - `command` uses the snake_case names (`run_file`, `dusk_single`, ...).
//! - The cursor is `offset` (bytes) or `line` with optional `column` (1-based); it defaults to the end of the buffer.
//! - Malformed lines get an error response and the loop continues. EOF ends the session.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use phpunit_core::vocab::commands;
use serde::{Deserialize, Serialize};

use crate::cursor::{Cursor, LineColumn};
use crate::dispatch::{Dispatcher, dispatcher_for};
use crate::errors::{RunnerError, RunnerResult};
use crate::session::{Outcome, Request, Session};
use crate::settings::Settings;

use super::{CliError, CliResult, ExitCode};

/// A request line as sent by the editor.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WireRequest {
    pub command: String,
    pub file: PathBuf,
    #[serde(default)]
    pub buffer: Option<String>,
    #[serde(default)]
    pub offset: Option<usize>,
    #[serde(default)]
    pub line: Option<usize>,
    #[serde(default)]
    pub column: Option<usize>,
}

impl WireRequest {
    /// Validate into a session [`Request`].
    pub fn into_request(self) -> RunnerResult<Request> {
        let id =
            commands::from_session_name(&self.command).ok_or_else(|| RunnerError::UnknownCommand(self.command.clone()))?;

        let cursor = match (self.offset, self.line, self.column) {
            (Some(_), Some(_), _) | (Some(_), None, Some(_)) => {
                return Err(RunnerError::InvalidCursor("give either offset or line/column".to_string()));
            }
            (Some(offset), None, None) => Cursor::Offset(offset),
            (None, Some(line), column) => {
                if line == 0 || column == Some(0) {
                    return Err(RunnerError::InvalidCursor(LineColumn { line, column }.to_string()));
                }
                Cursor::LineColumn(LineColumn { line, column })
            }
            (None, None, Some(column)) => {
                return Err(RunnerError::InvalidCursor(format!("column {column} without line")));
            }
            (None, None, None) => Cursor::End,
        };

        let mut request = Request::new(id, self.file).with_cursor(cursor);
        if let Some(buffer) = self.buffer {
            request = request.with_buffer(buffer);
        }
        Ok(request)
    }
}

/// A response line.
#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum WireResponse {
    Ok {
        ok: bool,
        command: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        matches: Option<Vec<PathBuf>>,
    },
    Err {
        ok: bool,
        error: String,
    },
}

impl WireResponse {
    fn from_outcome(outcome: Outcome) -> Self {
        let (command, matches) = match outcome {
            Outcome::Dispatched { command, .. } => (Some(command), None),
            Outcome::Skipped => (None, None),
            Outcome::Matches(paths) => (None, Some(paths)),
        };
        WireResponse::Ok {
            ok: true,
            command,
            matches,
        }
    }

    fn error(message: impl Into<String>) -> Self {
        WireResponse::Err {
            ok: false,
            error: message.into(),
        }
    }
}

/// Handle one request line.
///
/// The line is raw bytes so that invalid UTF-8 becomes an error response rather than an I/O failure.
pub fn respond<D: Dispatcher>(session: &mut Session<D>, line: &[u8]) -> WireResponse {
    let request = match serde_json::from_slice::<WireRequest>(line) {
        Ok(wire) => wire.into_request(),
        Err(err) => return WireResponse::error(format!("invalid request: {err}")),
    };
    match request.and_then(|request| session.handle(&request)) {
        Ok(outcome) => WireResponse::from_outcome(outcome),
        Err(err) => {
            tracing::debug!(%err, "request failed");
            WireResponse::error(err.to_string())
        }
    }
}

/// Serve requests from `input` until EOF, writing responses to `output`.
///
/// Blank lines are ignored.
pub fn serve<D, R, W>(session: &mut Session<D>, mut input: R, mut output: W) -> io::Result<()>
where
    D: Dispatcher,
    R: BufRead,
    W: Write,
{
    let mut line = Vec::new();
    loop {
        line.clear();
        if input.read_until(b'\n', &mut line)? == 0 {
            return Ok(());
        }
        if line.iter().all(u8::is_ascii_whitespace) {
            continue;
        }
        let response = respond(session, &line);
        serde_json::to_writer(&mut output, &response)?;
        writeln!(output)?;
        output.flush()?;
    }
}

/// `phpunit-runner session` over the process's stdin and stdout.
pub fn serve_stdio(settings: Settings) -> CliResult<ExitCode> {
    let dispatcher = dispatcher_for(&settings, true);
    let mut session = Session::new(settings, dispatcher);
    tracing::debug!("session started");

    let stdin = io::stdin();
    let stdout = io::stdout();
    serve(&mut session, stdin.lock(), stdout.lock())
        .map_err(|e| CliError::failure(format!("Error in session I/O: {e}")))?;
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::dispatch::PrintDispatcher;
    use phpunit_core::vocab::commands::CommandId;

    fn wire(json: &str) -> RunnerResult<Request> {
        serde_json::from_str::<WireRequest>(json).unwrap().into_request()
    }

    #[test]
    fn test_wire_request_offset() {
        let request = wire(r#"{"command": "run_single", "file": "/p/ATest.php", "offset": 12}"#).unwrap();
        assert_eq!(request.command, CommandId::RunSingle);
        assert_eq!(request.cursor, Cursor::Offset(12));
    }

    #[test]
    fn test_wire_request_line_column() {
        let request = wire(r#"{"command": "dusk_single", "file": "/p/ATest.php", "line": 4, "column": 2}"#).unwrap();
        assert_eq!(
            request.cursor,
            Cursor::LineColumn(LineColumn {
                line: 4,
                column: Some(2)
            })
        );
    }

    #[test]
    fn test_wire_request_rejects_mixed_cursor() {
        let err = wire(r#"{"command": "run_single", "file": "a", "offset": 1, "line": 1}"#).unwrap_err();
        assert!(matches!(err, RunnerError::InvalidCursor(_)));
        let err = wire(r#"{"command": "run_single", "file": "a", "line": 0}"#).unwrap_err();
        assert!(matches!(err, RunnerError::InvalidCursor(_)));
    }

    #[test]
    fn test_wire_request_unknown_command() {
        let err = wire(r#"{"command": "run-single", "file": "a"}"#).unwrap_err();
        assert_eq!(err.to_string(), "unknown command `run-single`");
    }

    #[test]
    fn test_response_shapes() {
        let ok = serde_json::to_string(&WireResponse::from_outcome(Outcome::Skipped)).unwrap();
        assert_eq!(ok, r#"{"ok":true,"command":null}"#);

        let err = serde_json::to_string(&WireResponse::error("nope")).unwrap();
        assert_eq!(err, r#"{"ok":false,"error":"nope"}"#);

        let matches = WireResponse::from_outcome(Outcome::Matches(vec![PathBuf::from("/p/ATest.php")]));
        assert_eq!(
            serde_json::to_string(&matches).unwrap(),
            r#"{"ok":true,"command":null,"matches":["/p/ATest.php"]}"#
        );
    }

    #[test]
    fn test_serve_keeps_going_after_bad_line() {
        let mut session = Session::new(Settings::default(), PrintDispatcher::new(io::sink()));
        let input = "garbage\n\n{\"command\": \"run_last\", \"file\": \"/nowhere/User.php\"}\n";
        let mut output = Vec::new();
        serve(&mut session, input.as_bytes(), &mut output).unwrap();

        let text = String::from_utf8(output).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with(r#"{"ok":false,"error":"invalid request: "#));
        assert_eq!(lines[1], r#"{"ok":true,"command":null}"#);
    }

    #[test]
    fn test_serve_answers_invalid_utf8_line() {
        let mut session = Session::new(Settings::default(), PrintDispatcher::new(io::sink()));
        let mut input = b"{\"command\": \"run_last\", \"file\": \"/nowhere/\xff.php\"}\n".to_vec();
        input.extend_from_slice(b"\xff\n{\"command\": \"run_last\", \"file\": \"/nowhere/User.php\"}");
        let mut output = Vec::new();
        serve(&mut session, input.as_slice(), &mut output).unwrap();

        let text = String::from_utf8(output).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with(r#"{"ok":false,"error":"invalid request: "#));
        assert!(lines[1].starts_with(r#"{"ok":false,"error":"invalid request: "#));
        // The last line has no trailing newline and is still answered
        assert_eq!(lines[2], r#"{"ok":true,"command":null}"#);
    }
}

//! CLI module for phpunit-runner
//!
//! This module provides the command-line interface editors bind keys to.
//!
//! ## Commands
//!
//! - `run-file <file>` - Run every test in the file
//! - `run-all <file>` - Run the whole suite of the file's project
//! - `run-single <file> --at LINE[:COL]` - Run the test under the cursor
//! - `run-last <file>` - Run the test under the cursor, or repeat the last command
//! - `run-dir <file>` - Run the tests in the file's directory
//! - `dusk-single`, `dusk-all`, `dusk-dir` - The same for Laravel Dusk
//! - `matching <file>` - Print the class/test counterpart of a file
//! - `session` - Serve JSON requests on stdin, remembering the last command
//!
//! ## Modules
//!
//! - `commands` - Command implementations
//! - `session` - The JSON-lines request loop
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;
pub mod session;

use std::fmt;
use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand};
use miette::Diagnostic;
use phpunit_core::vocab::commands::{CommandId, info_for};
use phpunit_core::vocab::shells::{self, ShellId};
use phpunit_core::vocab::terminals::{self, TerminalId};

use crate::cursor::{Cursor, LineColumn};
use crate::errors::RunnerError;
use crate::version::RUNNER_VERSION;

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    /// Create a new CLI error with a message and exit code.
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<RunnerError> for CliError {
    fn from(err: RunnerError) -> Self {
        let mut message = format!("Error: {err}");
        if let Some(help) = err.help() {
            message.push_str(&format!("\n  help: {help}"));
        }
        Self::failure(message)
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Run the PHPUnit, Pest or Dusk test under the cursor
#[derive(Parser, Debug)]
#[command(name = "phpunit-runner")]
#[command(version = RUNNER_VERSION)]
#[command(about = "Run the PHPUnit, Pest or Dusk test under the cursor", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Settings file (default: $PHPUNIT_RUNNER_SETTINGS, then <config dir>/phpunit-runner/settings.json)
    #[arg(long, value_name = "PATH", global = true)]
    pub settings: Option<PathBuf>,

    /// Shell dialect commands are written for: bash or fish
    #[arg(long, value_name = "SHELL", value_parser = parse_shell_flag, global = true)]
    pub shell: Option<ShellId>,

    /// Where to run commands: Term, iTerm, inline or print
    #[arg(long, value_name = "TERMINAL", value_parser = parse_terminal_flag, global = true)]
    pub terminal: Option<TerminalId>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    #[command(about = summary(CommandId::RunFile))]
    RunFile(TargetArgs),
    #[command(about = summary(CommandId::RunAll))]
    RunAll(TargetArgs),
    #[command(about = summary(CommandId::RunSingle))]
    RunSingle(TargetArgs),
    #[command(about = summary(CommandId::RunLast))]
    RunLast(TargetArgs),
    #[command(about = summary(CommandId::RunDir))]
    RunDir(TargetArgs),
    #[command(about = summary(CommandId::DuskSingle))]
    DuskSingle(TargetArgs),
    #[command(about = summary(CommandId::DuskAll))]
    DuskAll(TargetArgs),
    #[command(about = summary(CommandId::DuskDir))]
    DuskDir(TargetArgs),
    #[command(about = summary(CommandId::Matching))]
    Matching(TargetArgs),
    /// Serve JSON requests from stdin, one per line
    Session,
}

fn summary(id: CommandId) -> &'static str {
    info_for(id).summary
}

/// The file (and cursor) a command acts on.
#[derive(Args, Debug, Clone)]
pub struct TargetArgs {
    /// File shown in the editor
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Cursor position, 1-based
    #[arg(long, value_name = "LINE[:COLUMN]", conflicts_with = "offset")]
    pub at: Option<LineColumn>,

    /// Cursor position as a byte offset
    #[arg(long, value_name = "BYTES")]
    pub offset: Option<usize>,

    /// Read the (possibly unsaved) buffer from stdin instead of the file
    #[arg(long)]
    pub stdin: bool,
}

impl TargetArgs {
    /// Cursor from `--at` / `--offset`, defaulting to the end of the buffer.
    pub fn cursor(&self) -> Cursor {
        match (self.at, self.offset) {
            (Some(at), _) => Cursor::LineColumn(at),
            (None, Some(offset)) => Cursor::Offset(offset),
            (None, None) => Cursor::End,
        }
    }
}

impl Command {
    /// The command id and target for everything but `session`.
    pub fn target(&self) -> Option<(CommandId, &TargetArgs)> {
        let pair = match self {
            Command::RunFile(args) => (CommandId::RunFile, args),
            Command::RunAll(args) => (CommandId::RunAll, args),
            Command::RunSingle(args) => (CommandId::RunSingle, args),
            Command::RunLast(args) => (CommandId::RunLast, args),
            Command::RunDir(args) => (CommandId::RunDir, args),
            Command::DuskSingle(args) => (CommandId::DuskSingle, args),
            Command::DuskAll(args) => (CommandId::DuskAll, args),
            Command::DuskDir(args) => (CommandId::DuskDir, args),
            Command::Matching(args) => (CommandId::Matching, args),
            Command::Session => return None,
        };
        Some(pair)
    }
}

fn parse_shell_flag(s: &str) -> Result<ShellId, String> {
    shells::from_str(s).ok_or_else(|| format!("unknown shell `{s}` (expected bash or fish)"))
}

fn parse_terminal_flag(s: &str) -> Result<TerminalId, String> {
    terminals::from_str(s).ok_or_else(|| format!("unknown terminal `{s}` (expected Term, iTerm, inline or print)"))
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. All command
/// implementations return `CliResult` and errors are handled here.
pub fn run() {
    let cli = Cli::parse();

    match execute(cli) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Execute the CLI command and return result.
fn execute(cli: Cli) -> CliResult<ExitCode> {
    let settings = commands::load_settings(&cli)?;

    match cli.command.target() {
        Some((id, args)) => commands::run_command(settings, id, args),
        None => session::serve_stdio(settings),
    }
}

// ============================================================================
// Tests
// ============================================================================

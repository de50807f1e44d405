//! User-visible command vocabulary.
//!
//! Every command an editor can bind to a key has one entry here. The CLI uses the kebab-case `canonical` spelling as
//! its subcommand name; the session protocol uses the snake_case `session_name`.
//!
//! ## Examples
//! ```rust
//! use phpunit_core::vocab::commands::{self, CommandId};
//!
//! assert_eq!(commands::from_session_name("run_single"), Some(CommandId::RunSingle));
//! assert_eq!(commands::as_str(CommandId::RunSingle), "run-single");
//! ```

/// Stable identifier for a user-visible command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandId {
    RunFile,
    RunAll,
    RunSingle,
    RunLast,
    RunDir,
    DuskSingle,
    DuskAll,
    DuskDir,
    Matching,
}

/// Which program a command hands the tests to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RunnerKind {
    /// The resolved PHPUnit/Pest binary
    Suite,
    /// `php artisan dusk`
    Dusk,
    /// Runs nothing itself (`run-last` delegates, `matching` searches)
    None,
}

/// Metadata for a command.
///
/// ## Notes
/// - `needs_cursor` marks commands that locate the test under the cursor and fail without one.
#[derive(Debug, Clone, Copy)]
pub struct CommandInfo {
    pub id: CommandId,
    pub canonical: &'static str,
    pub session_name: &'static str,
    pub runner: RunnerKind,
    pub needs_cursor: bool,
    pub summary: &'static str,
}

/// Registry of all commands.
pub const COMMANDS: &[CommandInfo] = &[
    info(CommandId::RunFile, "run-file", "run_file", RunnerKind::Suite, false, "Run every test in the current file"),
    info(CommandId::RunAll, "run-all", "run_all", RunnerKind::Suite, false, "Run the whole test suite"),
    info(
        CommandId::RunSingle,
        "run-single",
        "run_single",
        RunnerKind::Suite,
        true,
        "Run the test under the cursor",
    ),
    info(
        CommandId::RunLast,
        "run-last",
        "run_last",
        RunnerKind::None,
        false,
        "Run the test under the cursor in a test file, otherwise repeat the last command",
    ),
    info(
        CommandId::RunDir,
        "run-dir",
        "run_dir",
        RunnerKind::Suite,
        false,
        "Run every test in the current file's directory",
    ),
    info(
        CommandId::DuskSingle,
        "dusk-single",
        "dusk_single",
        RunnerKind::Dusk,
        true,
        "Run the Dusk browser test under the cursor",
    ),
    info(CommandId::DuskAll, "dusk-all", "dusk_all", RunnerKind::Dusk, false, "Run all Dusk browser tests"),
    info(
        CommandId::DuskDir,
        "dusk-dir",
        "dusk_dir",
        RunnerKind::Dusk,
        false,
        "Run the Dusk browser tests in the current file's directory",
    ),
    info(
        CommandId::Matching,
        "matching",
        "matching",
        RunnerKind::None,
        false,
        "Find the test for a source file, or the source file for a test",
    ),
];

/// Canonical (CLI) spelling.
pub fn as_str(id: CommandId) -> &'static str {
    info_for(id).canonical
}

/// Session protocol spelling.
pub fn session_name(id: CommandId) -> &'static str {
    info_for(id).session_name
}

/// Full metadata.
pub fn info_for(id: CommandId) -> &'static CommandInfo {
    COMMANDS.iter().find(|c| c.id == id).unwrap_or(&COMMANDS[0])
}

/// Lookup by canonical spelling.
pub fn from_str(s: &str) -> Option<CommandId> {
    COMMANDS.iter().find(|c| c.canonical == s).map(|c| c.id)
}

/// Lookup by session protocol spelling.
pub fn from_session_name(s: &str) -> Option<CommandId> {
    COMMANDS.iter().find(|c| c.session_name == s).map(|c| c.id)
}

// --- helpers -----------------------------------------------------------------

const fn info(
    id: CommandId,
    canonical: &'static str,
    session_name: &'static str,
    runner: RunnerKind,
    needs_cursor: bool,
    summary: &'static str,
) -> CommandInfo {
    CommandInfo {
        id,
        canonical,
        session_name,
        runner,
        needs_cursor,
        summary,
    }
}

//! Shell command assembly.
//!
//! Every command has the shape `cd <root><connector><program> <args...>`, where the connector comes from the shell
//! dialect (` && ` for bash, `; and ` for fish). Each word is quoted for that dialect.
//!
//! ## Examples
//! ```rust
//! use phpunit_core::vocab::shells::ShellId;
//! use phpunit_runner::command::CommandLine;
//!
//! let line = CommandLine::new("/srv/app", ["vendor/bin/phpunit", "tests/User Test.php"]);
//! assert_eq!(line.render(ShellId::Bash), "cd /srv/app && vendor/bin/phpunit 'tests/User Test.php'");
//! ```

use std::path::{Path, PathBuf};

use phpunit_core::vocab::commands::{self, CommandId, RunnerKind};
use phpunit_core::vocab::runners::{CHANGE_DIR, DUSK_COMMAND, FILTER_FLAG, method_filter};
use phpunit_core::vocab::shells::{self, ShellId};

use crate::errors::{RunnerError, RunnerResult};
use crate::locator::{LocatedTest, TestStyle};
use crate::resolver::{self, ConfigRoot, TestBinary};

/// Quote `word` so `shell` reads it back unchanged.
///
/// ## Notes
/// - Words made only of `[A-Za-z0-9@%+=:,./_-]` are left bare; the empty word becomes `''`.
/// - Bash closes and reopens the quotes around a `'` (`'it'\''s'`). Fish understands `\'` and `\\` inside single
///   quotes, so both are escaped in place.
pub fn shell_quote(word: &str, shell: ShellId) -> String {
    if word.is_empty() {
        return "''".to_string();
    }
    if word.chars().all(is_safe_char) {
        return word.to_string();
    }

    let mut quoted = String::with_capacity(word.len() + 2);
    quoted.push('\'');
    for c in word.chars() {
        match (c, shell) {
            ('\'', ShellId::Bash) => quoted.push_str(r"'\''"),
            ('\'', ShellId::Fish) => quoted.push_str(r"\'"),
            ('\\', ShellId::Fish) => quoted.push_str(r"\\"),
            _ => quoted.push(c),
        }
    }
    quoted.push('\'');
    quoted
}

fn is_safe_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || "@%+=:,./_-".contains(c)
}

/// A command to run from a directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    /// Directory to `cd` into first (the config root)
    pub dir: PathBuf,
    /// Program followed by its arguments, unquoted
    pub words: Vec<String>,
}

impl CommandLine {
    pub fn new<I, S>(dir: impl Into<PathBuf>, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            dir: dir.into(),
            words: words.into_iter().map(Into::into).collect(),
        }
    }

    /// Render as a single shell string for `shell`.
    pub fn render(&self, shell: ShellId) -> String {
        let dir = shell_quote(&self.dir.to_string_lossy(), shell);
        let words: Vec<String> = self.words.iter().map(|w| shell_quote(w, shell)).collect();
        format!("{CHANGE_DIR} {dir}{}{}", shells::connector(shell), words.join(" "))
    }
}

/// Everything known about the file a command acts on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    /// The file being tested, absolute
    pub file: PathBuf,
    pub root: ConfigRoot,
    pub binary: TestBinary,
}

impl Target {
    /// Resolve the config root and test binary for `file`.
    pub fn resolve(file: &Path) -> Self {
        let file = std::path::absolute(file).unwrap_or_else(|_| file.to_path_buf());
        let root = resolver::find_config_root(&file);
        let binary = resolver::find_test_binary(&root.path);
        Self { file, root, binary }
    }

    /// Directory holding the file.
    pub fn dir(&self) -> &Path {
        self.file.parent().unwrap_or(&self.file)
    }

    fn file_word(&self) -> String {
        self.file.to_string_lossy().into_owned()
    }

    fn dir_word(&self) -> String {
        self.dir().to_string_lossy().into_owned()
    }
}

/// Build the command line for a runnable command.
///
/// ## Parameters
/// - `id`: the command; `run-last` and `matching` build nothing and are rejected.
/// - `target`: the file, root and binary.
/// - `located`: the test under the cursor, required by `run-single` and `dusk-single`.
///
/// ## Errors
/// - [`RunnerError::NoTestUnderCursor`] when a single-test command has no located test.
/// - [`RunnerError::NotRunnable`] for commands that do not run tests directly.
pub fn plan(id: CommandId, target: &Target, located: Option<&LocatedTest>) -> RunnerResult<CommandLine> {
    let info = commands::info_for(id);
    let mut words: Vec<String> = match info.runner {
        RunnerKind::Suite => vec![target.binary.to_string()],
        RunnerKind::Dusk => DUSK_COMMAND.iter().map(|w| w.to_string()).collect(),
        RunnerKind::None => return Err(RunnerError::NotRunnable(info.canonical)),
    };

    match id {
        CommandId::RunFile => words.push(target.file_word()),
        CommandId::RunDir | CommandId::DuskDir => words.push(target.dir_word()),
        CommandId::RunAll | CommandId::DuskAll => {}
        CommandId::RunSingle | CommandId::DuskSingle => {
            let test = located.ok_or(RunnerError::NoTestUnderCursor)?;
            // Dusk filters by the raw method name
            let filter = match info.runner {
                RunnerKind::Dusk => test.name.clone(),
                _ => suite_filter(test),
            };
            words.extend([target.file_word(), FILTER_FLAG.to_string(), filter]);
        }
        CommandId::RunLast | CommandId::Matching => return Err(RunnerError::NotRunnable(info.canonical)),
    }

    Ok(CommandLine {
        dir: target.root.path.clone(),
        words,
    })
}

/// `--filter` value for the suite runner: the description for Pest, an anchored method filter for PHPUnit.
fn suite_filter(test: &LocatedTest) -> String {
    match test.style {
        TestStyle::Descriptive => test.name.clone(),
        TestStyle::Conventional => method_filter(&test.name),
    }
}

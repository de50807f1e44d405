//! Runner settings: shell dialect, terminal application and window title.
//!
//! Settings are layered, later layers winning:
//! 1. defaults (`bash`, Terminal.app, `PHPUnit Tests`);
//! 2. a JSON settings file;
//! 3. environment variables ([`SHELL_ENV`], [`TERMINAL_ENV`]);
//! 4. command-line flags (applied by the CLI through the `with_*` builders).
//!
//! ## Notes
//! - The settings file is `--settings <PATH>`, else `$PHPUNIT_RUNNER_SETTINGS`, else
//!   `<config dir>/phpunit-runner/settings.json` when it exists.
//! - Unrecognized shell or terminal names fall back to the defaults with a warning. Only `fish` changes the command
//!   connector.

use std::fs;
use std::path::{Path, PathBuf};

use phpunit_core::vocab::shells::{self, ShellId};
use phpunit_core::vocab::terminals::{self, TerminalId};
use serde::Deserialize;

use crate::errors::{RunnerError, RunnerResult};

/// Environment variable naming the settings file.
pub const SETTINGS_ENV: &str = "PHPUNIT_RUNNER_SETTINGS";
/// Environment variable overriding the shell dialect.
pub const SHELL_ENV: &str = "PHPUNIT_RUNNER_SHELL";
/// Environment variable overriding the terminal application.
pub const TERMINAL_ENV: &str = "PHPUNIT_RUNNER_TERMINAL";

const APP_DIR: &str = "phpunit-runner";
const SETTINGS_FILE: &str = "settings.json";
const DEFAULT_WINDOW_TITLE: &str = "PHPUnit Tests";

/// Settings file contents. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SettingsFile {
    #[serde(alias = "phpunit-sublime-shell")]
    shell: Option<String>,
    #[serde(alias = "phpunit-sublime-terminal")]
    terminal: Option<String>,
    window_title: Option<String>,
}

/// Resolved runner settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Dialect commands are rendered for
    pub shell: ShellId,
    /// Where commands are dispatched
    pub terminal: TerminalId,
    /// Title of the Terminal.app window
    pub window_title: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            shell: ShellId::default(),
            terminal: TerminalId::default(),
            window_title: DEFAULT_WINDOW_TITLE.to_string(),
        }
    }
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the shell dialect
    pub fn with_shell(mut self, shell: ShellId) -> Self {
        self.shell = shell;
        self
    }

    /// Set the terminal application
    pub fn with_terminal(mut self, terminal: TerminalId) -> Self {
        self.terminal = terminal;
        self
    }

    /// Set the Terminal.app window title
    pub fn with_window_title(mut self, title: impl Into<String>) -> Self {
        self.window_title = title.into();
        self
    }

    /// Default settings file location, `<config dir>/phpunit-runner/settings.json`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(SETTINGS_FILE))
    }

    /// Read a settings file over the defaults.
    pub fn load(path: &Path) -> RunnerResult<Self> {
        let text = fs::read_to_string(path).map_err(|source| RunnerError::ReadSource {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text, path)
    }

    /// Parse settings JSON over the defaults. `path` is only used in errors.
    pub fn from_json(text: &str, path: &Path) -> RunnerResult<Self> {
        let file: SettingsFile = serde_json::from_str(text).map_err(|source| RunnerError::Settings {
            path: path.to_path_buf(),
            source,
        })?;

        let mut settings = Self::default();
        if let Some(shell) = file.shell {
            settings.shell = parse_shell(&shell);
        }
        if let Some(terminal) = file.terminal {
            settings.terminal = parse_terminal(&terminal);
        }
        if let Some(title) = file.window_title {
            settings.window_title = title;
        }
        Ok(settings)
    }

    /// Apply environment overrides, reading variables through `lookup`.
    pub fn with_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(shell) = lookup(SHELL_ENV) {
            self.shell = parse_shell(&shell);
        }
        if let Some(terminal) = lookup(TERMINAL_ENV) {
            self.terminal = parse_terminal(&terminal);
        }
        self
    }

    /// Load the settings file (if any) and apply environment overrides.
    ///
    /// ## Parameters
    /// - `explicit`: a `--settings` path; it must exist.
    /// - `lookup`: environment access, `|k| std::env::var(k).ok()` outside tests.
    ///
    /// ## Errors
    /// - An explicit or `$PHPUNIT_RUNNER_SETTINGS` file that cannot be read or parsed.
    /// - A default-location file that exists but cannot be parsed.
    pub fn discover(explicit: Option<&Path>, lookup: impl Fn(&str) -> Option<String>) -> RunnerResult<Self> {
        let named = explicit
            .map(Path::to_path_buf)
            .or_else(|| lookup(SETTINGS_ENV).map(PathBuf::from));

        let base = match named {
            Some(path) => Self::load(&path)?,
            None => match Self::default_path().filter(|p| p.is_file()) {
                Some(path) => Self::load(&path)?,
                None => Self::default(),
            },
        };

        let settings = base.with_env(lookup);
        tracing::debug!(?settings, "resolved settings");
        Ok(settings)
    }
}

/// Parse a shell name, falling back to bash.
pub fn parse_shell(name: &str) -> ShellId {
    shells::from_str(name).unwrap_or_else(|| {
        tracing::warn!(shell = name, "unknown shell; using {}", shells::as_str(ShellId::default()));
        ShellId::default()
    })
}

/// Parse a terminal name, falling back to Terminal.app.
pub fn parse_terminal(name: &str) -> TerminalId {
    terminals::from_str(name).unwrap_or_else(|| {
        tracing::warn!(terminal = name, "unknown terminal; using {}", terminals::as_str(TerminalId::default()));
        TerminalId::default()
    })
}

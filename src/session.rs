//! Session state: runs commands and remembers the last one.
//!
//! A [`Session`] lives as long as its process. The CLI creates one per invocation; `phpunit-runner session` keeps
//! one alive across requests so "run last" can replay.

use std::fs;
use std::path::{Path, PathBuf};

use phpunit_core::vocab::commands::{self, CommandId};
use phpunit_core::vocab::project::is_test_file_name;

use crate::command::{self, Target};
use crate::cursor::Cursor;
use crate::dispatch::{DispatchStatus, Dispatcher};
use crate::errors::{RunnerError, RunnerResult};
use crate::locator;
use crate::matching;
use crate::resolver;
use crate::settings::Settings;

/// One command invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub command: CommandId,
    /// File the editor is showing
    pub file: PathBuf,
    /// Unsaved buffer text; the file is read from disk when absent
    pub buffer: Option<String>,
    pub cursor: Cursor,
}

impl Request {
    pub fn new(command: CommandId, file: impl Into<PathBuf>) -> Self {
        Self {
            command,
            file: file.into(),
            buffer: None,
            cursor: Cursor::End,
        }
    }

    pub fn with_buffer(mut self, buffer: impl Into<String>) -> Self {
        self.buffer = Some(buffer.into());
        self
    }

    pub fn with_cursor(mut self, cursor: Cursor) -> Self {
        self.cursor = cursor;
        self
    }

    fn source(&self) -> RunnerResult<String> {
        match &self.buffer {
            Some(buffer) => Ok(buffer.clone()),
            None => fs::read_to_string(&self.file).map_err(|source| RunnerError::ReadSource {
                path: self.file.clone(),
                source,
            }),
        }
    }

    fn file_is_test(&self) -> bool {
        self.file
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(is_test_file_name)
    }
}

/// What a request did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A command line was built and dispatched
    Dispatched { command: String, status: DispatchStatus },
    /// Nothing to do (run last with no history)
    Skipped,
    /// Counterpart files for `matching`
    Matches(Vec<PathBuf>),
}

/// Runs commands and owns the last-command slot.
#[derive(Debug)]
pub struct Session<D: Dispatcher> {
    settings: Settings,
    dispatcher: D,
    last_command: Option<String>,
}

impl<D: Dispatcher> Session<D> {
    pub fn new(settings: Settings, dispatcher: D) -> Self {
        Self {
            settings,
            dispatcher,
            last_command: None,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// The most recently dispatched command line.
    pub fn last_command(&self) -> Option<&str> {
        self.last_command.as_deref()
    }

    /// Run one request.
    ///
    /// ## Errors
    /// - [`RunnerError::NoTestUnderCursor`] for single-test commands with nothing under the cursor.
    /// - [`RunnerError::ReadSource`] when the buffer is absent and the file cannot be read.
    /// - Dispatch failures ([`RunnerError::Launch`]). The last command is recorded even then.
    #[tracing::instrument(skip(self, request), fields(command = commands::as_str(request.command), file = %request.file.display()))]
    pub fn handle(&mut self, request: &Request) -> RunnerResult<Outcome> {
        match request.command {
            CommandId::Matching => Ok(Outcome::Matches(find_counterparts(&request.file))),
            // Name-only check: `/proj/Tests/Helpers.php` replays rather than running single
            CommandId::RunLast if request.file_is_test() => self.run(CommandId::RunSingle, request),
            CommandId::RunLast => match self.last_command.clone() {
                Some(command) => self.dispatch(command),
                None => {
                    tracing::debug!("no previous command to repeat");
                    Ok(Outcome::Skipped)
                }
            },
            id => self.run(id, request),
        }
    }

    fn run(&mut self, id: CommandId, request: &Request) -> RunnerResult<Outcome> {
        let located = if commands::info_for(id).needs_cursor {
            let source = request.source()?;
            let offset = request.cursor.to_offset(&source);
            let located = locator::locate(&source, offset).ok_or(RunnerError::NoTestUnderCursor)?;
            tracing::debug!(test = %located.name, framework = ?located.style.framework(), "located test");
            Some(located)
        } else {
            None
        };

        let target = Target::resolve(&request.file);
        let line = command::plan(id, &target, located.as_ref())?;
        self.dispatch(line.render(self.settings.shell))
    }

    fn dispatch(&mut self, command: String) -> RunnerResult<Outcome> {
        self.last_command = Some(command.clone());
        let status = self.dispatcher.dispatch(&command)?;
        Ok(Outcome::Dispatched { command, status })
    }
}

/// Files matching the counterpart of `file`, searched from its project root.
fn find_counterparts(file: &Path) -> Vec<PathBuf> {
    let Some(target) = matching::target_for(file) else {
        return Vec::new();
    };
    let root = resolver::find_config_root(file);
    let search_dir = if root.found {
        root.path
    } else {
        let file = std::path::absolute(file).unwrap_or_else(|_| file.to_path_buf());
        file.parent().map(Path::to_path_buf).unwrap_or(file)
    };
    matching::find_matches(&search_dir, &target)
}

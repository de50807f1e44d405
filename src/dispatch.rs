//! Command dispatch: hand a rendered shell command to something that runs it.
//!
//! | Terminal  | Dispatcher                | Waits? |
//! |-----------|---------------------------|--------|
//! | `Term`    | [`OsascriptDispatcher`]   | no     |
//! | `iTerm`   | [`OsascriptDispatcher`]   | no     |
//! | `inline`  | [`InlineDispatcher`]      | yes    |
//! | `print`   | [`PrintDispatcher`]       | n/a    |
//!
//! ## Notes
//! - `osascript` dispatch is fire-and-forget: no exit status is captured. Finished children are reaped on the next
//!   dispatch so a long session does not collect zombies.
//! - AppleScript sources are compiled into the binary and fed to `osascript -` on stdin.

use std::io::{self, Write};
use std::process::{Child, Command, Stdio};

use phpunit_core::vocab::shells::{self, ShellId};
use phpunit_core::vocab::terminals::TerminalId;

use crate::errors::{RunnerError, RunnerResult};
use crate::settings::Settings;

const OSASCRIPT: &str = "osascript";
const RUN_COMMAND_SCRIPT: &str = include_str!("../assets/run_command.applescript");
const OPEN_ITERM_SCRIPT: &str = include_str!("../assets/open_iterm.applescript");

/// What happened to a dispatched command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchStatus {
    /// Handed to another application; outcome unknown
    Detached,
    /// Ran in the foreground and exited with this code (`-1` when killed by a signal)
    Exited(i32),
    /// Written out, not run
    Printed,
}

/// Something that runs a shell command line.
pub trait Dispatcher {
    fn dispatch(&mut self, command: &str) -> RunnerResult<DispatchStatus>;
}

impl<D: Dispatcher + ?Sized> Dispatcher for Box<D> {
    fn dispatch(&mut self, command: &str) -> RunnerResult<DispatchStatus> {
        (**self).dispatch(command)
    }
}

/// macOS terminal application driven through AppleScript.
#[derive(Debug)]
pub struct OsascriptDispatcher {
    program: &'static str,
    app: TerminalApp,
    window_title: String,
    children: Vec<Child>,
}

/// Which AppleScript to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalApp {
    /// Terminal.app, reusing the window with the configured title
    Terminal,
    /// iTerm2, writing into the current session
    ITerm,
}

impl OsascriptDispatcher {
    pub fn new(app: TerminalApp, window_title: impl Into<String>) -> Self {
        Self {
            program: OSASCRIPT,
            app,
            window_title: window_title.into(),
            children: Vec::new(),
        }
    }

    /// Script source and its arguments after the command.
    fn script(&self) -> (&'static str, Vec<&str>) {
        match self.app {
            TerminalApp::Terminal => (RUN_COMMAND_SCRIPT, vec![self.window_title.as_str()]),
            TerminalApp::ITerm => (OPEN_ITERM_SCRIPT, Vec::new()),
        }
    }

    fn reap(&mut self) {
        self.children.retain_mut(|child| matches!(child.try_wait(), Ok(None)));
    }
}

impl Dispatcher for OsascriptDispatcher {
    fn dispatch(&mut self, command: &str) -> RunnerResult<DispatchStatus> {
        self.reap();
        let (script, extra_args) = self.script();
        tracing::info!(app = ?self.app, command, "dispatching to terminal");

        let mut child = Command::new(self.program)
            .arg("-")
            .arg(command)
            .args(extra_args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .spawn()
            .map_err(|source| RunnerError::Launch {
                program: self.program.to_string(),
                source,
            })?;

        // Tracked before writing so a failed write still gets reaped
        let stdin = child.stdin.take();
        self.children.push(child);

        // Dropping stdin closes it, which tells osascript the script is complete
        if let Some(mut stdin) = stdin {
            stdin.write_all(script.as_bytes())?;
        }
        Ok(DispatchStatus::Detached)
    }
}

/// Run the command in the foreground with `bash -c` or `fish -c`.
#[derive(Debug, Clone)]
pub struct InlineDispatcher {
    shell: ShellId,
    stdout_to_stderr: bool,
}

impl InlineDispatcher {
    pub fn new(shell: ShellId) -> Self {
        Self {
            shell,
            stdout_to_stderr: false,
        }
    }

    /// Send the test run's stdout to our stderr, keeping our stdout for protocol output.
    pub fn with_stdout_to_stderr(mut self, redirect: bool) -> Self {
        self.stdout_to_stderr = redirect;
        self
    }
}

impl Dispatcher for InlineDispatcher {
    fn dispatch(&mut self, command: &str) -> RunnerResult<DispatchStatus> {
        let program = shells::program(self.shell);
        tracing::info!(program, command, "running inline");

        let mut cmd = Command::new(program);
        cmd.arg("-c").arg(command);
        if self.stdout_to_stderr {
            // stdin and stdout carry the session protocol
            cmd.stdin(Stdio::null()).stdout(Stdio::from(io::stderr()));
        }

        let status = cmd.status().map_err(|source| RunnerError::Launch {
            program: program.to_string(),
            source,
        })?;
        Ok(DispatchStatus::Exited(status.code().unwrap_or(-1)))
    }
}

/// Write the command line instead of running it.
#[derive(Debug)]
pub struct PrintDispatcher<W: Write> {
    out: W,
}

impl<W: Write> PrintDispatcher<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Dispatcher for PrintDispatcher<W> {
    fn dispatch(&mut self, command: &str) -> RunnerResult<DispatchStatus> {
        writeln!(self.out, "{command}")?;
        self.out.flush()?;
        Ok(DispatchStatus::Printed)
    }
}

/// Build the dispatcher the settings ask for.
///
/// ## Parameters
/// - `settings`: terminal, shell and window title.
/// - `protocol_stdout`: `true` when stdout carries protocol responses; inline runs then write to stderr and print
///   dispatch writes nowhere (the response already carries the command).
pub fn dispatcher_for(settings: &Settings, protocol_stdout: bool) -> Box<dyn Dispatcher> {
    match settings.terminal {
        TerminalId::Terminal => Box::new(OsascriptDispatcher::new(TerminalApp::Terminal, &settings.window_title)),
        TerminalId::ITerm => Box::new(OsascriptDispatcher::new(TerminalApp::ITerm, &settings.window_title)),
        TerminalId::Inline => {
            Box::new(InlineDispatcher::new(settings.shell).with_stdout_to_stderr(protocol_stdout))
        }
        TerminalId::Print if protocol_stdout => Box::new(PrintDispatcher::new(io::sink())),
        TerminalId::Print => Box::new(PrintDispatcher::new(io::stdout())),
    }
}

//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.

use std::env;
use std::io::{self, Read};

use phpunit_core::vocab::commands::CommandId;

use crate::dispatch::{DispatchStatus, dispatcher_for};
use crate::session::{Outcome, Request, Session};
use crate::settings::Settings;

use super::{Cli, CliError, CliResult, ExitCode, TargetArgs};

/// Resolve settings: file, then environment, then command-line flags.
pub fn load_settings(cli: &Cli) -> CliResult<Settings> {
    let mut settings = Settings::discover(cli.settings.as_deref(), |key| env::var(key).ok())?;
    if let Some(shell) = cli.shell {
        settings = settings.with_shell(shell);
    }
    if let Some(terminal) = cli.terminal {
        settings = settings.with_terminal(terminal);
    }
    Ok(settings)
}

/// Build the session request for a subcommand, reading the buffer from stdin when asked.
pub fn build_request(id: CommandId, args: &TargetArgs) -> CliResult<Request> {
    let mut request = Request::new(id, args.file.clone()).with_cursor(args.cursor());
    if args.stdin {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|e| CliError::failure(format!("Error reading buffer from stdin: {e}")))?;
        request = request.with_buffer(buffer);
    }
    Ok(request)
}

/// Run one command in a fresh session.
pub fn run_command(settings: Settings, id: CommandId, args: &TargetArgs) -> CliResult<ExitCode> {
    let request = build_request(id, args)?;
    let dispatcher = dispatcher_for(&settings, false);
    let mut session = Session::new(settings, dispatcher);

    match session.handle(&request)? {
        Outcome::Dispatched { status, .. } => Ok(exit_code_for(status)),
        Outcome::Skipped => Ok(ExitCode::SUCCESS),
        Outcome::Matches(paths) => {
            if paths.is_empty() {
                return Err(CliError::failure(format!(
                    "No matching file found for {}",
                    request.file.display()
                )));
            }
            for path in paths {
                println!("{}", path.display());
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Foreground runs pass their exit code through; detached and printed runs succeed.
pub fn exit_code_for(status: DispatchStatus) -> ExitCode {
    match status {
        DispatchStatus::Exited(code) => ExitCode(code),
        DispatchStatus::Detached | DispatchStatus::Printed => ExitCode::SUCCESS,
    }
}

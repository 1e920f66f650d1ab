//! Maps parsed arguments to exactly one terminal run mode and executes it.
use std::io::Write;

use tracing::warn;

use super::{
    args::{render_usage, validate_stream_invocation, LaunchArgs, LaunchCommand},
    profile::ResolvedProfile,
};
use crate::{
    commands::{find_command, CommandLog, CommandTableEntry},
    lib::errors::{LaunchError, VALIDATION_FAILURE_EXIT_CODE},
    runner::AppRunner,
    session::StreamConnectInfo,
    settings::Settings,
};

/// The single terminal state selected for an invocation.
#[derive(Debug)]
pub enum RunMode {
    Main {
        settings: Settings,
        exit_app_on_stream_exit: bool,
    },
    Stream(StreamConnectInfo),
    ListHosts {
        nicknames: Vec<String>,
    },
    /// `argv[0]` is the command name; the rest is forwarded untouched.
    External {
        entry: CommandTableEntry,
        argv: Vec<String>,
    },
    Help {
        command: String,
    },
}

impl RunMode {
    pub const fn name(&self) -> &'static str {
        match self {
            RunMode::Main { .. } => "main",
            RunMode::Stream(_) => "stream",
            RunMode::ListHosts { .. } => "list",
            RunMode::External { .. } => "external",
            RunMode::Help { .. } => "help",
        }
    }

    pub fn detail(&self) -> Option<&str> {
        match self {
            RunMode::Stream(info) => Some(info.nickname()),
            RunMode::External { entry, .. } => Some(entry.name),
            RunMode::Help { command } => Some(command),
            RunMode::Main { .. } | RunMode::ListHosts { .. } => None,
        }
    }
}

/// Select the run mode. Only `stream` validates the stream options.
pub fn route(
    args: LaunchArgs,
    resolved: ResolvedProfile,
    commands: &[CommandTableEntry],
) -> Result<RunMode, LaunchError> {
    let LaunchArgs {
        exit_app_on_stream_exit,
        stream,
        command,
        ..
    } = args;

    match command {
        None => Ok(RunMode::Main {
            settings: resolved.into_active(),
            exit_app_on_stream_exit,
        }),
        Some(LaunchCommand::List) => Ok(RunMode::ListHosts {
            nicknames: resolved
                .base()
                .registered_hosts()
                .iter()
                .map(|host| host.nickname.clone())
                .collect(),
        }),
        Some(LaunchCommand::Stream(target)) => {
            let request = validate_stream_invocation(&stream, &target)?;
            let connect_info = StreamConnectInfo::assemble(request, resolved.into_active())?;
            Ok(RunMode::Stream(connect_info))
        }
        Some(LaunchCommand::External(argv)) => {
            let name = argv.first().cloned().unwrap_or_default();
            Ok(match find_command(commands, &name) {
                Some(entry) => RunMode::External {
                    entry: *entry,
                    argv,
                },
                None => RunMode::Help { command: name },
            })
        }
    }
}

/// Run `mode` to completion and return the process exit code.
pub fn execute(
    mode: RunMode,
    runner: &mut dyn AppRunner,
    commands: &[CommandTableEntry],
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> i32 {
    match mode {
        RunMode::Main {
            settings,
            exit_app_on_stream_exit,
        } => runner.run_main(settings, exit_app_on_stream_exit),
        RunMode::Stream(connect_info) => runner.run_stream(connect_info),
        RunMode::ListHosts { nicknames } => print_hosts(out, &nicknames),
        RunMode::External { entry, argv } => (entry.handler)(&CommandLog::new(entry.name), &argv),
        RunMode::Help { command } => {
            let diagnostic = LaunchError::UnrecognizedCommand { name: command };
            if let Err(error) = writeln!(err, "{diagnostic}") {
                warn!(target: "remoteplay::cli", error = %error, "Failed to print diagnostic");
            }
            if let Err(error) = write!(out, "{}", render_usage(commands)) {
                warn!(target: "remoteplay::cli", error = %error, "Failed to print usage");
            }
            VALIDATION_FAILURE_EXIT_CODE
        }
    }
}

fn print_hosts(out: &mut dyn Write, nicknames: &[String]) -> i32 {
    for nickname in nicknames {
        if let Err(error) = writeln!(out, "Host: {nickname}") {
            warn!(target: "remoteplay::cli", error = %error, "Failed to print host list");
            return VALIDATION_FAILURE_EXIT_CODE;
        }
    }
    0
}

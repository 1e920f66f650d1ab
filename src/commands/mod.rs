//! Static table of external subcommands and the log sink handed to them.
use std::fmt::Display;

use tracing::{debug, error, info};

pub mod discover;
pub mod protocol;
pub mod wakeup;

/// Handler signature shared by every external command.
///
/// `argv[0]` is the command name; the return value is the process exit code.
pub type CommandHandler = fn(&CommandLog, &[String]) -> i32;

/// One registered external command.
#[derive(Debug, Clone, Copy)]
pub struct CommandTableEntry {
    pub name: &'static str,
    /// One-line description shown in the usage text.
    pub about: &'static str,
    pub handler: CommandHandler,
}

/// Commands available next to `stream` and `list`.
pub const EXTERNAL_COMMANDS: &[CommandTableEntry] = &[
    CommandTableEntry {
        name: "discover",
        about: "Search the local network for consoles",
        handler: discover::run,
    },
    CommandTableEntry {
        name: "wakeup",
        about: "Wake a registered console from standby",
        handler: wakeup::run,
    },
];

pub fn find_command<'a>(
    commands: &'a [CommandTableEntry],
    name: &str,
) -> Option<&'a CommandTableEntry> {
    commands.iter().find(|entry| entry.name == name)
}

/// Log sink created fresh for each external command invocation.
///
/// Verbose messages are dropped unless enabled.
#[derive(Debug, Clone)]
pub struct CommandLog {
    command: String,
    verbose: bool,
}

impl CommandLog {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            verbose: false,
        }
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    pub fn verbose(&self, message: impl Display) {
        if self.verbose {
            debug!(target: "remoteplay::command", command = %self.command, "{message}");
        }
    }

    pub fn info(&self, message: impl Display) {
        info!(target: "remoteplay::command", command = %self.command, "{message}");
    }

    pub fn error(&self, message: impl Display) {
        error!(target: "remoteplay::command", command = %self.command, "{message}");
    }
}

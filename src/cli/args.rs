//! CLI argument definitions and `stream` option validation.
use std::ffi::OsString;

use clap::{error::ErrorKind, Args, CommandFactory, FromArgMatches, Parser, Subcommand};

use crate::{
    commands::CommandTableEntry,
    lib::errors::LaunchError,
    session::{DisplayMode, LoginPasscode, StreamRequest},
};

/// Command-line arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "remoteplay",
    author,
    version,
    about = "Launch the remote-play frontend, stream straight to a console, or run a console utility",
    long_about = None,
    disable_help_subcommand = true
)]
pub struct LaunchArgs {
    /// Configuration profile.
    #[arg(long, global = true, value_name = "PROFILE")]
    pub profile: Option<String>,
    /// Exit the application when the stream session ends.
    #[arg(long, global = true, default_value_t = false)]
    pub exit_app_on_stream_exit: bool,
    #[command(flatten)]
    pub stream: StreamOptions,
    /// Command to run; without one the main window opens.
    #[command(subcommand)]
    pub command: Option<LaunchCommand>,
}

/// Options consumed by the `stream` command and ignored by every other one.
#[derive(Debug, Clone, Default, Args)]
pub struct StreamOptions {
    /// Registration key (at most 16 bytes) instead of the stored registration.
    #[arg(long = "registkey", global = true, value_name = "REGISTKEY")]
    pub regist_key: Option<String>,
    /// Morning token as 32 hex digits instead of the stored registration.
    #[arg(long, global = true, value_name = "MORNING")]
    pub morning: Option<String>,
    /// Start in fullscreen, keeping the aspect ratio (black bars where needed).
    #[arg(long, global = true, default_value_t = false)]
    pub fullscreen: bool,
    /// Enable DualSense haptics and adaptive triggers (PS5, USB only).
    #[arg(long, global = true, default_value_t = false)]
    pub dualsense: bool,
    /// Start in fullscreen, zoomed to fill the screen (edges are cut off).
    #[arg(long, global = true, default_value_t = false)]
    pub zoom: bool,
    /// Start in fullscreen, stretched to fill the screen (distorts the image).
    #[arg(long, global = true, default_value_t = false)]
    pub stretch: bool,
    /// Console login passcode to send automatically (4 digits).
    #[arg(long, global = true, value_name = "PASSCODE")]
    pub passcode: Option<String>,
}

/// Top-level commands.
#[derive(Debug, Clone, Subcommand)]
pub enum LaunchCommand {
    /// Stream directly from a registered console.
    Stream(StreamTargetArgs),
    /// Print the nicknames of registered consoles.
    List,
    /// Any other name; resolved against the external command table.
    #[command(external_subcommand)]
    External(Vec<String>),
}

/// Positional arguments of `stream`.
#[derive(Debug, Clone, Default, Args)]
pub struct StreamTargetArgs {
    /// Nickname of the registered console (see `list`).
    pub nickname: Option<String>,
    /// Address to connect to.
    pub host: Option<String>,
}

/// Build the clap command, listing the external commands in the help text.
pub fn build_cli(commands: &[CommandTableEntry]) -> clap::Command {
    let cli = LaunchArgs::command();
    if commands.is_empty() {
        return cli;
    }

    let width = commands
        .iter()
        .map(|entry| entry.name.len())
        .max()
        .unwrap_or_default();
    let mut listing = String::from("External commands:\n");
    for entry in commands {
        listing.push_str(&format!(
            "  {name:<width$}  {about}\n",
            name = entry.name,
            about = entry.about
        ));
    }
    cli.after_help(listing)
}

/// Parse `argv` (including the binary name) into `LaunchArgs`.
pub fn parse_launch_args<I, T>(
    argv: I,
    commands: &[CommandTableEntry],
) -> Result<LaunchArgs, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let matches = build_cli(commands).try_get_matches_from(argv)?;
    LaunchArgs::from_arg_matches(&matches)
}

/// `--help`/`--version` succeed; every other parse failure is a usage error.
pub fn parse_error_exit_code(err: &clap::Error) -> i32 {
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
        _ => 1,
    }
}

/// Full usage text, as printed for the help terminal state.
pub fn render_usage(commands: &[CommandTableEntry]) -> String {
    build_cli(commands).render_help().to_string()
}

/// Validate the `stream` options and positional target.
///
/// Display mode and passcode are checked before the target so that option
/// mistakes are reported even when the target is missing too.
pub fn validate_stream_invocation(
    options: &StreamOptions,
    target: &StreamTargetArgs,
) -> Result<StreamRequest, LaunchError> {
    let display_mode = DisplayMode::from_flags(options.fullscreen, options.zoom, options.stretch)?;
    let passcode = LoginPasscode::parse(options.passcode.as_deref())?;

    let nickname = non_empty(target.nickname.as_deref()).ok_or(LaunchError::MissingStreamTarget)?;
    let host = non_empty(target.host.as_deref()).ok_or(LaunchError::MissingStreamTarget)?;

    Ok(StreamRequest {
        nickname,
        host,
        regist_key: options.regist_key.clone(),
        morning: options.morning.clone(),
        passcode,
        display_mode,
        dualsense: options.dualsense,
    })
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

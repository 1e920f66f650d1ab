//! CLI entrypoint module structure.
use std::io::Write;

use tracing::warn;

use crate::{
    commands::CommandTableEntry,
    lib::{
        errors::LaunchError,
        telemetry::{emit_run_mode, RunModeTelemetry},
    },
    runner::AppRunner,
    settings::SettingsStore,
};

pub mod args;
pub mod profile;
pub mod router;

pub use args::{
    build_cli, parse_error_exit_code, parse_launch_args, render_usage,
    validate_stream_invocation, LaunchArgs, LaunchCommand, StreamOptions, StreamTargetArgs,
};
pub use profile::{display_name_for, resolve_profile, ResolvedProfile, APP_DISPLAY_NAME};
pub use router::{execute, route, RunMode};

/// Resolve the profile, route, and run one invocation; returns the exit code.
///
/// Launch errors print one diagnostic line on `err` and nothing is launched.
pub fn run_launch(
    args: LaunchArgs,
    store: &dyn SettingsStore,
    runner: &mut dyn AppRunner,
    commands: &[CommandTableEntry],
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> i32 {
    match select_run_mode(args, store, commands) {
        Ok(mode) => execute(mode, runner, commands, out, err),
        Err(error) => report_launch_error(err, &error),
    }
}

fn select_run_mode(
    args: LaunchArgs,
    store: &dyn SettingsStore,
    commands: &[CommandTableEntry],
) -> Result<RunMode, LaunchError> {
    let resolved = resolve_profile(store, args.profile.as_deref())?;
    let profile = resolved.profile_name().to_string();
    let display_name = resolved.display_name();

    let mode = route(args, resolved, commands)?;
    emit_run_mode(&RunModeTelemetry {
        mode: mode.name(),
        profile: &profile,
        display_name: &display_name,
        detail: mode.detail(),
    });
    Ok(mode)
}

fn report_launch_error(err: &mut dyn Write, error: &LaunchError) -> i32 {
    warn!(target: "remoteplay::cli", error = %error, "Invocation rejected");
    let _ = writeln!(err, "{error}");
    error.exit_code()
}

//! Telemetry initialization and launch-decision logging.

use anyhow::Result;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

/// Initialize `tracing` and format developer logs on stderr.
///
/// Stdout stays reserved for command output such as `list`.
pub fn init_tracing() -> Result<()> {
    if tracing::dispatcher::has_been_set() {
        return Ok(());
    }

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow::anyhow!("failed to initialize tracing: {err}"))
}

/// Payload describing the run mode chosen for this invocation.
#[derive(Debug, Serialize)]
pub struct RunModeTelemetry<'a> {
    pub mode: &'static str,
    pub profile: &'a str,
    pub display_name: &'a str,
    pub detail: Option<&'a str>,
}

/// Emit the routing decision to `tracing`.
pub fn emit_run_mode(telemetry: &RunModeTelemetry<'_>) {
    info!(
        target: "remoteplay::cli",
        mode = telemetry.mode,
        profile = telemetry.profile,
        display_name = telemetry.display_name,
        detail = telemetry.detail.unwrap_or(""),
        "Selected run mode"
    );
}

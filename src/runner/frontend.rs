//! Runner that hands the launch over to the session frontend executable.
use std::{
    env, io,
    path::{Path, PathBuf},
    process::Stdio,
};

use anyhow::{anyhow, Context, Result};
use tokio::{
    io::AsyncWriteExt,
    process::{ChildStdin, Command},
};
use tracing::{error, info, warn};

use super::{handoff::Handoff, AppRunner};
use crate::{
    cli::display_name_for,
    lib::errors::VALIDATION_FAILURE_EXIT_CODE,
    session::StreamConnectInfo,
    settings::Settings,
};

/// Environment variable overriding the frontend executable.
pub const FRONTEND_ENV: &str = "REMOTEPLAY_FRONTEND";
/// Environment variable carrying the window display name to the frontend.
pub const DISPLAY_NAME_ENV: &str = "REMOTEPLAY_DISPLAY_NAME";

/// Spawns the frontend, pipes the hand-off document on stdin, and forwards its exit code.
#[derive(Debug, Clone, Default)]
pub struct FrontendRunner {
    program_override: Option<PathBuf>,
}

impl FrontendRunner {
    pub fn new(program_override: Option<PathBuf>) -> Self {
        Self { program_override }
    }

    /// Prefer `REMOTEPLAY_FRONTEND` if set; otherwise each profile's `[frontend] program`.
    pub fn from_env() -> Self {
        let program_override = env::var_os(FRONTEND_ENV)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from);
        Self::new(program_override)
    }

    fn resolve_program(&self, settings: &Settings) -> Result<PathBuf> {
        self.program_override
            .clone()
            .or_else(|| settings.frontend().program.clone())
            .ok_or_else(|| {
                anyhow!(
                    "no frontend configured: set {FRONTEND_ENV} or `[frontend] program` in {}",
                    settings.source_path().display()
                )
            })
    }

    fn launch(&self, settings: &Settings, handoff: &Handoff) -> i32 {
        match self.try_launch(settings, handoff) {
            Ok(code) => code,
            Err(err) => {
                error!(
                    target: "remoteplay::runner",
                    mode = handoff.mode(),
                    error = %format!("{err:#}"),
                    "Failed to run frontend"
                );
                eprintln!("{err:#}");
                VALIDATION_FAILURE_EXIT_CODE
            }
        }
    }

    fn try_launch(&self, settings: &Settings, handoff: &Handoff) -> Result<i32> {
        let program = self.resolve_program(settings)?;
        let display_name = display_name_for(settings.current_profile());
        let payload = serde_json::to_vec(handoff).context("failed to encode frontend hand-off")?;

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .context("failed to start runner runtime")?;
        runtime.block_on(run_frontend(
            &program,
            handoff.mode(),
            &display_name,
            &payload,
        ))
    }
}

impl AppRunner for FrontendRunner {
    fn run_main(&mut self, settings: Settings, exit_app_on_stream_exit: bool) -> i32 {
        let handoff = Handoff::main(&settings, exit_app_on_stream_exit);
        self.launch(&settings, &handoff)
    }

    fn run_stream(&mut self, connect_info: StreamConnectInfo) -> i32 {
        let handoff = Handoff::stream(&connect_info);
        self.launch(connect_info.settings(), &handoff)
    }
}

/// Build the frontend command line for `mode`.
pub fn build_frontend_command(program: &Path, mode: &str, display_name: &str) -> Command {
    let mut command = Command::new(program);
    command.kill_on_drop(true);
    command.arg("--mode").arg(mode);
    command.env(DISPLAY_NAME_ENV, display_name);
    command
        .stdin(Stdio::piped())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit());
    command
}

async fn run_frontend(
    program: &Path,
    mode: &'static str,
    display_name: &str,
    payload: &[u8],
) -> Result<i32> {
    let mut child = build_frontend_command(program, mode, display_name)
        .spawn()
        .with_context(|| format!("failed to start frontend {}", program.display()))?;
    info!(
        target: "remoteplay::runner",
        program = %program.display(),
        mode = mode,
        display_name = display_name,
        "Started frontend"
    );

    if let Some(stdin) = child.stdin.take() {
        match send_handoff(stdin, payload).await {
            Ok(()) => {}
            // The frontend closed stdin without reading; its exit code still decides.
            Err(err) if err.kind() == io::ErrorKind::BrokenPipe => {
                warn!(
                    target: "remoteplay::runner",
                    mode = mode,
                    error = %err,
                    "Frontend closed stdin before reading the hand-off"
                );
            }
            Err(err) => return Err(err).context("failed to send hand-off to frontend"),
        }
    }

    let status = child
        .wait()
        .await
        .with_context(|| format!("failed to wait for frontend {}", program.display()))?;
    info!(
        target: "remoteplay::runner",
        mode = mode,
        exit_code = status.code(),
        "Frontend exited"
    );
    Ok(status.code().unwrap_or(VALIDATION_FAILURE_EXIT_CODE))
}

/// Write the hand-off and close the pipe so the frontend sees end-of-file.
async fn send_handoff(mut stdin: ChildStdin, payload: &[u8]) -> io::Result<()> {
    stdin.write_all(payload).await?;
    stdin.shutdown().await
}

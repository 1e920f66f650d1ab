//! Application runner boundary: takes a fully validated run mode and returns an exit code.
mod frontend;
mod handoff;

pub use frontend::{build_frontend_command, FrontendRunner, DISPLAY_NAME_ENV, FRONTEND_ENV};
pub use handoff::Handoff;

use crate::{session::StreamConnectInfo, settings::Settings};

/// Drives one window/session to completion.
///
/// Implementations own whatever concurrency they need; callers make a single
/// blocking call and forward the returned exit code unchanged.
pub trait AppRunner {
    /// Open the main window bound to `settings`.
    fn run_main(&mut self, settings: Settings, exit_app_on_stream_exit: bool) -> i32;

    /// Open a window that connects straight to the described session.
    fn run_stream(&mut self, connect_info: StreamConnectInfo) -> i32;
}

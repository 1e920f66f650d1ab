use serde::Serialize;

use crate::{session::StreamConnectInfo, settings::Settings};

/// JSON document piped to the frontend on stdin.
#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Handoff {
    Main {
        profile: String,
        settings_path: String,
        exit_app_on_stream_exit: bool,
    },
    Stream {
        profile: String,
        settings_path: String,
        target: &'static str,
        host: String,
        nickname: String,
        /// Hex-encoded, always 16 bytes.
        regist_key: String,
        /// Hex-encoded, always 16 bytes.
        morning: String,
        passcode: Option<String>,
        display_mode: &'static str,
        dualsense: bool,
    },
}

impl Handoff {
    pub fn main(settings: &Settings, exit_app_on_stream_exit: bool) -> Self {
        Handoff::Main {
            profile: settings.profile().to_string(),
            settings_path: settings.source_path().display().to_string(),
            exit_app_on_stream_exit,
        }
    }

    pub fn stream(info: &StreamConnectInfo) -> Self {
        Handoff::Stream {
            profile: info.settings().profile().to_string(),
            settings_path: info.settings().source_path().display().to_string(),
            target: info.target().as_str(),
            host: info.host().to_string(),
            nickname: info.nickname().to_string(),
            regist_key: info.regist_key().to_hex(),
            morning: info.morning().to_hex(),
            passcode: info.passcode().map(|code| code.as_str().to_string()),
            display_mode: info.display_mode().as_str(),
            dualsense: info.dualsense(),
        }
    }

    pub const fn mode(&self) -> &'static str {
        match self {
            Handoff::Main { .. } => "main",
            Handoff::Stream { .. } => "stream",
        }
    }
}

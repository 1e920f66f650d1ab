//! Connection descriptor handed to the frontend for a direct-to-stream launch.
use std::fmt;

use tracing::debug;

use crate::{lib::errors::LaunchError, settings::Settings};

pub mod credentials;

pub use credentials::{ConsoleTarget, HostMac, MorningToken, RegistKey, CREDENTIAL_LEN};

const PASSCODE_LEN: usize = 4;

/// Window presentation policy for the stream window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayMode {
    #[default]
    Normal,
    /// Fullscreen, aspect ratio kept, letterboxed.
    Fullscreen,
    /// Fullscreen, aspect ratio kept, edges cropped.
    Zoom,
    /// Fullscreen, aspect ratio distorted to fill.
    Stretch,
}

impl DisplayMode {
    /// At most one of the three fullscreen flags may be set.
    pub fn from_flags(fullscreen: bool, zoom: bool, stretch: bool) -> Result<Self, LaunchError> {
        match (fullscreen, zoom, stretch) {
            (false, false, false) => Ok(DisplayMode::Normal),
            (true, false, false) => Ok(DisplayMode::Fullscreen),
            (false, true, false) => Ok(DisplayMode::Zoom),
            (false, false, true) => Ok(DisplayMode::Stretch),
            _ => Err(LaunchError::ConflictingDisplayMode),
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            DisplayMode::Normal => "normal",
            DisplayMode::Fullscreen => "fullscreen",
            DisplayMode::Zoom => "zoom",
            DisplayMode::Stretch => "stretch",
        }
    }
}

/// Console login passcode: exactly four decimal digits.
#[derive(Clone, PartialEq, Eq)]
pub struct LoginPasscode(String);

impl LoginPasscode {
    /// `None` and the empty string both mean "no passcode".
    pub fn parse(value: Option<&str>) -> Result<Option<Self>, LaunchError> {
        let Some(value) = value.filter(|value| !value.is_empty()) else {
            return Ok(None);
        };

        let length = value.chars().count();
        if length != PASSCODE_LEN || !value.chars().all(|c| c.is_ascii_digit()) {
            return Err(LaunchError::InvalidPasscode { length });
        }
        Ok(Some(Self(value.to_string())))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for LoginPasscode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("LoginPasscode(****)")
    }
}

/// Validated `stream` invocation, before credentials are resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamRequest {
    pub nickname: String,
    pub host: String,
    pub regist_key: Option<String>,
    pub morning: Option<String>,
    pub passcode: Option<LoginPasscode>,
    pub display_mode: DisplayMode,
    pub dualsense: bool,
}

/// Immutable description of one streaming session.
#[derive(Debug, Clone)]
pub struct StreamConnectInfo {
    settings: Settings,
    target: ConsoleTarget,
    host: String,
    nickname: String,
    regist_key: RegistKey,
    morning: MorningToken,
    passcode: Option<LoginPasscode>,
    display_mode: DisplayMode,
    dualsense: bool,
}

impl StreamConnectInfo {
    /// Resolve credentials for `request` and build the descriptor.
    ///
    /// Credentials come from the `--registkey`/`--morning` flags when either is
    /// given; otherwise from the host registered under the requested nickname.
    pub fn assemble(request: StreamRequest, settings: Settings) -> Result<Self, LaunchError> {
        let (target, regist_key, morning) =
            if request.regist_key.is_some() || request.morning.is_some() {
                let regist_key = regist_key_from_flag(request.regist_key.as_deref())?;
                let morning = morning_from_flag(request.morning.as_deref())?;
                (ConsoleTarget::default(), regist_key, morning)
            } else {
                let host = settings.registered_host(&request.nickname).ok_or_else(|| {
                    LaunchError::UnknownHost {
                        nickname: request.nickname.clone(),
                        profile: profile_label(settings.profile()).to_string(),
                    }
                })?;
                (host.target, host.regist_key, host.morning)
            };

        debug!(
            target: "remoteplay::cli",
            nickname = %request.nickname,
            host = %request.host,
            console_target = %target,
            display_mode = request.display_mode.as_str(),
            "Assembled stream connect info"
        );

        Ok(Self {
            settings,
            target,
            host: request.host,
            nickname: request.nickname,
            regist_key,
            morning,
            passcode: request.passcode,
            display_mode: request.display_mode,
            dualsense: request.dualsense,
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn target(&self) -> ConsoleTarget {
        self.target
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn nickname(&self) -> &str {
        &self.nickname
    }

    pub fn regist_key(&self) -> &RegistKey {
        &self.regist_key
    }

    pub fn morning(&self) -> &MorningToken {
        &self.morning
    }

    pub fn passcode(&self) -> Option<&LoginPasscode> {
        self.passcode.as_ref()
    }

    pub fn display_mode(&self) -> DisplayMode {
        self.display_mode
    }

    pub fn dualsense(&self) -> bool {
        self.dualsense
    }
}

/// Human-readable profile name (empty = "default").
pub fn profile_label(profile: &str) -> &str {
    if profile.is_empty() {
        "default"
    } else {
        profile
    }
}

/// The flag value's raw bytes, zero-padded to 16.
fn regist_key_from_flag(value: Option<&str>) -> Result<RegistKey, LaunchError> {
    let bytes = value.unwrap_or_default().as_bytes();
    RegistKey::from_prefix(bytes).ok_or(LaunchError::InvalidRegistKey {
        length: bytes.len(),
    })
}

fn morning_from_flag(value: Option<&str>) -> Result<MorningToken, LaunchError> {
    MorningToken::from_hex(value.unwrap_or_default()).map_err(|err| LaunchError::InvalidMorning {
        reason: err.to_string(),
    })
}

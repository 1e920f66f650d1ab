use std::{io, path::PathBuf};

use config::ConfigError as ConfigLoaderError;
use thiserror::Error;

/// Exit code used for every failure detected before anything is launched.
pub const VALIDATION_FAILURE_EXIT_CODE: i32 = 1;

/// Errors that can occur while loading or updating a settings document.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// No settings directory could be determined.
    #[error("Could not determine the settings directory; set REMOTEPLAY_CONFIG_DIR")]
    MissingRoot,
    /// Failed to build (read) the settings file.
    #[error("Failed to read settings file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: ConfigLoaderError,
    },
    /// Failed to deserialize TOML into a struct.
    #[error("Failed to parse settings file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ConfigLoaderError,
    },
    /// Required field is missing.
    #[error("Settings file {path} is missing `{field}` ({message})")]
    MissingField {
        path: PathBuf,
        field: &'static str,
        message: String,
    },
    /// Field failed validation.
    #[error("Settings file {path} has invalid `{field}`: {message}")]
    InvalidField {
        path: PathBuf,
        field: &'static str,
        message: String,
    },
    /// The document could not be re-read for an in-place update.
    #[error("Failed to parse settings file {path} for update: {source}")]
    Document {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("Failed to serialize settings file {path}: {source}")]
    Serialize {
        path: PathBuf,
        #[source]
        source: toml::ser::Error,
    },
    #[error("Failed to write settings file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl SettingsError {
    /// Helper to wrap `config::ConfigError` as a read failure.
    pub fn from_read_error(path: PathBuf, source: ConfigLoaderError) -> Self {
        Self::FileRead { path, source }
    }

    /// Helper to wrap `config::ConfigError` as a parse failure.
    pub fn from_parse_error(path: PathBuf, source: ConfigLoaderError) -> Self {
        Self::Parse { path, source }
    }
}

/// Failures detected while resolving, validating, or routing an invocation.
///
/// Every variant is fatal to the invocation and maps to exit code 1.
#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("Must choose between fullscreen, zoom or stretch option")]
    ConflictingDisplayMode,
    #[error("Login passcode must be 4 digits (entered {length} characters)")]
    InvalidPasscode { length: usize },
    #[error("Unrecognized command `{name}`")]
    UnrecognizedCommand { name: String },
    #[error("The stream command needs a host nickname and an address")]
    MissingStreamTarget,
    #[error("No registered host named `{nickname}` in profile `{profile}`; use `list` to see registered hosts")]
    UnknownHost { nickname: String, profile: String },
    #[error("Registration key is too long (expected at most 16 bytes, got {length})")]
    InvalidRegistKey { length: usize },
    #[error("Morning token must be 32 hex digits: {reason}")]
    InvalidMorning { reason: String },
    #[error("Invalid profile name `{name}`: {reason}")]
    InvalidProfileName { name: String, reason: &'static str },
    #[error(transparent)]
    Settings(#[from] SettingsError),
}

impl LaunchError {
    pub const fn exit_code(&self) -> i32 {
        VALIDATION_FAILURE_EXIT_CODE
    }
}

//! Settings directory layout and profile-name checks.

use std::{
    env,
    ffi::OsString,
    path::{Path, PathBuf},
};

use crate::lib::errors::{LaunchError, SettingsError};

/// Environment variable overriding the settings root directory.
pub const CONFIG_DIR_ENV: &str = "REMOTEPLAY_CONFIG_DIR";
/// Directory name created under the platform configuration directory.
const APP_DIR_NAME: &str = "remoteplay";
/// Settings document of the default (unnamed) profile.
const DEFAULT_SETTINGS_FILE: &str = "settings.toml";
/// Directory holding one document per named profile.
const PROFILES_DIR: &str = "profiles";
const PROFILE_NAME_MAX_LEN: usize = 64;

/// Resolve the settings root directory.
///
/// Resolution order:
/// 1. `$REMOTEPLAY_CONFIG_DIR` when set and non-empty.
/// 2. `<platform config dir>/remoteplay` otherwise.
pub fn resolve_settings_root() -> Result<PathBuf, SettingsError> {
    resolve_settings_root_from(env::var_os(CONFIG_DIR_ENV), dirs::config_dir())
}

fn resolve_settings_root_from(
    override_dir: Option<OsString>,
    platform_dir: Option<PathBuf>,
) -> Result<PathBuf, SettingsError> {
    if let Some(dir) = override_dir.filter(|value| !value.is_empty()) {
        return Ok(PathBuf::from(dir));
    }

    platform_dir
        .map(|dir| dir.join(APP_DIR_NAME))
        .ok_or(SettingsError::MissingRoot)
}

/// Path of the settings document for `profile` (empty = default profile).
pub fn profile_settings_path(root: &Path, profile: &str) -> PathBuf {
    if profile.is_empty() {
        root.join(DEFAULT_SETTINGS_FILE)
    } else {
        root.join(PROFILES_DIR).join(format!("{profile}.toml"))
    }
}

/// Profile names double as file stems, so they must stay inside the profiles directory.
pub fn validate_profile_name(name: &str) -> Result<(), LaunchError> {
    let reject = |reason: &'static str| {
        Err(LaunchError::InvalidProfileName {
            name: name.to_string(),
            reason,
        })
    };

    if name.chars().count() > PROFILE_NAME_MAX_LEN {
        return reject("must be at most 64 characters");
    }
    if name.contains(|c| c == '/' || c == '\\') {
        return reject("must not contain path separators");
    }
    if name == "." || name.contains("..") {
        return reject("must not contain `..`");
    }
    if name.chars().any(char::is_control) {
        return reject("must not contain control characters");
    }
    Ok(())
}

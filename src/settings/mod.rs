//! Profile-scoped settings documents and the file-backed store that loads them.
use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use tracing::error;

use crate::lib::{
    errors::SettingsError,
    paths::{profile_settings_path, resolve_settings_root},
};

pub mod frontend;
pub mod hosts;
mod telemetry;

pub use frontend::{parse_frontend_section, FrontendSection, RawFrontendSection};
pub use hosts::{parse_registered_hosts, RawRegisteredHost, RegisteredHost};

/// Key of the default document that records the last used profile.
const CURRENT_PROFILE_KEY: &str = "current_profile";

/// One loaded settings context, bound to a single profile.
#[derive(Debug, Clone)]
pub struct Settings {
    profile: String,
    current_profile: String,
    frontend: FrontendSection,
    registered_hosts: Vec<RegisteredHost>,
    source_path: PathBuf,
}

impl Settings {
    /// Build a context that is not backed by a file.
    pub fn new(
        profile: impl Into<String>,
        current_profile: impl Into<String>,
        registered_hosts: Vec<RegisteredHost>,
    ) -> Self {
        Self {
            profile: profile.into(),
            current_profile: current_profile.into(),
            frontend: FrontendSection::default(),
            registered_hosts,
            source_path: PathBuf::new(),
        }
    }

    /// Profile this context is bound to (empty = default profile).
    pub fn profile(&self) -> &str {
        &self.profile
    }

    /// Profile recorded as current in the default document.
    pub fn current_profile(&self) -> &str {
        &self.current_profile
    }

    pub fn registered_hosts(&self) -> &[RegisteredHost] {
        &self.registered_hosts
    }

    pub fn registered_host(&self, nickname: &str) -> Option<&RegisteredHost> {
        self.registered_hosts
            .iter()
            .find(|host| host.nickname == nickname)
    }

    pub fn frontend(&self) -> &FrontendSection {
        &self.frontend
    }

    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    pub fn with_frontend(mut self, frontend: FrontendSection) -> Self {
        self.frontend = frontend;
        self
    }

    pub(crate) fn with_current_profile(mut self, profile: &str) -> Self {
        self.current_profile = profile.to_string();
        self
    }
}

/// Persistent store that hands out settings contexts by profile name.
pub trait SettingsStore {
    /// Load the context for `profile` (empty = default profile).
    fn load_profile(&self, profile: &str) -> Result<Settings, SettingsError>;

    /// Record `profile` as the current profile in the default document.
    fn record_current_profile(&self, profile: &str) -> Result<(), SettingsError>;
}

/// TOML documents under one root directory: `settings.toml` plus `profiles/<name>.toml`.
#[derive(Debug, Clone)]
pub struct FileSettingsStore {
    root: PathBuf,
}

#[derive(Debug, Deserialize, Default)]
struct RawSettingsDocument {
    current_profile: Option<String>,
    frontend: Option<RawFrontendSection>,
    registered_hosts: Option<Vec<RawRegisteredHost>>,
}

impl FileSettingsStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Prefer `REMOTEPLAY_CONFIG_DIR` if set; otherwise the platform config directory.
    pub fn from_env_or_default() -> Result<Self, SettingsError> {
        let root = resolve_settings_root()?;
        telemetry::log_root(&root);
        Ok(Self::new(root))
    }

    fn read_document(&self, path: &Path) -> Result<RawSettingsDocument, SettingsError> {
        let builder = config::Config::builder()
            .add_source(config::File::from(path.to_path_buf()).required(false));
        let document = builder.build().map_err(|err| {
            let error = SettingsError::from_read_error(path.to_path_buf(), err);
            error!(
                target: "remoteplay::settings",
                path = %path.display(),
                reason = %error,
                "Failed to read settings file"
            );
            error
        })?;

        document.try_deserialize().map_err(|err| {
            let error = SettingsError::from_parse_error(path.to_path_buf(), err);
            error!(
                target: "remoteplay::settings",
                path = %path.display(),
                reason = %error,
                "Failed to parse settings file"
            );
            error
        })
    }
}

impl SettingsStore for FileSettingsStore {
    fn load_profile(&self, profile: &str) -> Result<Settings, SettingsError> {
        let default_path = profile_settings_path(&self.root, "");
        let default_document = self.read_document(&default_path)?;
        let current_profile = default_document.current_profile.clone().unwrap_or_default();

        let (path, document) = if profile.is_empty() {
            (default_path, default_document)
        } else {
            let path = profile_settings_path(&self.root, profile);
            let document = self.read_document(&path)?;
            (path, document)
        };

        let settings = Settings {
            profile: profile.to_string(),
            current_profile,
            frontend: parse_frontend_section(document.frontend, &path)?,
            registered_hosts: parse_registered_hosts(document.registered_hosts, &path)?,
            source_path: path,
        };
        telemetry::log_loaded(&settings);
        Ok(settings)
    }

    fn record_current_profile(&self, profile: &str) -> Result<(), SettingsError> {
        let path = profile_settings_path(&self.root, "");
        let mut table = match fs::read_to_string(&path) {
            Ok(content) => content
                .parse::<toml::Table>()
                .map_err(|source| SettingsError::Document {
                    path: path.clone(),
                    source,
                })?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => toml::Table::new(),
            Err(source) => return Err(SettingsError::Write { path, source }),
        };

        if profile.is_empty() {
            table.remove(CURRENT_PROFILE_KEY);
        } else {
            table.insert(
                CURRENT_PROFILE_KEY.to_string(),
                toml::Value::String(profile.to_string()),
            );
        }

        let serialized = toml::to_string(&table).map_err(|source| SettingsError::Serialize {
            path: path.clone(),
            source,
        })?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| SettingsError::Write {
                path: path.clone(),
                source,
            })?;
        }
        fs::write(&path, serialized).map_err(|source| SettingsError::Write {
            path: path.clone(),
            source,
        })?;

        telemetry::log_current_profile_recorded(&path, profile);
        Ok(())
    }
}

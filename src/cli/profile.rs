//! Active settings-profile resolution.
use tracing::warn;

use crate::{
    lib::{errors::LaunchError, paths::validate_profile_name},
    settings::{Settings, SettingsStore},
};

/// Application name shown in window titles.
pub const APP_DISPLAY_NAME: &str = "remoteplay";

/// Which settings context is active for this invocation.
#[derive(Debug, Clone)]
pub enum ResolvedProfile {
    /// `--profile` was given; its context is both base and active.
    Explicit { active: Settings },
    /// No `--profile`: the default context plus the context of the profile it
    /// records as last used.
    LastUsed { base: Settings, active: Settings },
}

impl ResolvedProfile {
    /// Context every launch mode runs against.
    pub fn active(&self) -> &Settings {
        match self {
            ResolvedProfile::Explicit { active } | ResolvedProfile::LastUsed { active, .. } => {
                active
            }
        }
    }

    pub fn into_active(self) -> Settings {
        match self {
            ResolvedProfile::Explicit { active } | ResolvedProfile::LastUsed { active, .. } => {
                active
            }
        }
    }

    /// Context loaded first: the explicit profile, or the default profile.
    pub fn base(&self) -> &Settings {
        match self {
            ResolvedProfile::Explicit { active } => active,
            ResolvedProfile::LastUsed { base, .. } => base,
        }
    }

    pub fn profile_name(&self) -> &str {
        self.active().current_profile()
    }

    /// `remoteplay`, or `remoteplay:<profile>` when a named profile is active.
    pub fn display_name(&self) -> String {
        display_name_for(self.profile_name())
    }
}

pub fn display_name_for(profile: &str) -> String {
    if profile.is_empty() {
        APP_DISPLAY_NAME.to_string()
    } else {
        format!("{APP_DISPLAY_NAME}:{profile}")
    }
}

/// Resolve the active context from an optional `--profile` value.
pub fn resolve_profile(
    store: &dyn SettingsStore,
    explicit: Option<&str>,
) -> Result<ResolvedProfile, LaunchError> {
    match explicit {
        Some(profile) => {
            validate_profile_name(profile)?;
            if let Err(err) = store.record_current_profile(profile) {
                warn!(
                    target: "remoteplay::settings",
                    profile = profile,
                    error = %err,
                    "Failed to record current profile"
                );
            }
            let active = store.load_profile(profile)?.with_current_profile(profile);
            Ok(ResolvedProfile::Explicit { active })
        }
        None => {
            let base = store.load_profile("")?;
            let last_used = base.current_profile().to_string();
            validate_profile_name(&last_used)?;
            let active = store.load_profile(&last_used)?;
            Ok(ResolvedProfile::LastUsed { base, active })
        }
    }
}

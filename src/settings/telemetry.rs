use std::path::Path;

use tracing::{debug, info};

use super::Settings;
use crate::lib::paths::CONFIG_DIR_ENV;

pub fn log_root(root: &Path) {
    debug!(
        target: "remoteplay::settings",
        root = %root.display(),
        env = CONFIG_DIR_ENV,
        "Resolved settings directory"
    );
}

pub fn log_loaded(settings: &Settings) {
    debug!(
        target: "remoteplay::settings",
        path = %settings.source_path().display(),
        profile = settings.profile(),
        current_profile = settings.current_profile(),
        registered_hosts = settings.registered_hosts().len(),
        "Settings loaded"
    );
}

pub fn log_current_profile_recorded(path: &Path, profile: &str) {
    info!(
        target: "remoteplay::settings",
        path = %path.display(),
        profile = profile,
        "Recorded current profile"
    );
}

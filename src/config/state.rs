// Application state module
// Shared, read-only runtime state handed to every connection task

use std::path::PathBuf;

use super::types::Config;

/// Application state
pub struct AppState {
    pub config: Config,

    /// Site root as a path, resolved once at startup
    pub root: PathBuf,

    // Cached config values for fast access on the request path
    pub access_log: bool,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            config: config.clone(),
            root: PathBuf::from(&config.site.root),
            access_log: config.logging.access_log,
        }
    }
}

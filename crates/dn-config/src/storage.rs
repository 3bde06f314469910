//! Session persistence configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const SESSION_FILE_NAME: &str = "session.json";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Path of the persisted session file. Empty means `~/.dailyneeds/session.json`.
    #[serde(default)]
    pub session_path: String,
}

impl StorageConfig {
    /// Resolve the session file path, falling back to the home directory.
    ///
    /// Returns `None` only when no path is configured and the home directory
    /// cannot be determined.
    #[must_use]
    pub fn resolved_session_path(&self) -> Option<PathBuf> {
        if !self.session_path.trim().is_empty() {
            return Some(PathBuf::from(self.session_path.trim()));
        }
        dirs::home_dir().map(|home| home.join(".dailyneeds").join(SESSION_FILE_NAME))
    }
}

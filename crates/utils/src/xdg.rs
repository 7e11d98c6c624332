use envdoctor_core::{ENVDOCTOR_STATE_DIR_VAR, REPORT_FILENAME};
use std::env;
use std::path::PathBuf;

/// XDG Base Directory paths for envdoctor
pub struct XdgPaths;

impl XdgPaths {
    /// Get XDG_STATE_HOME/envdoctor or fallback
    ///
    /// `ENVDOCTOR_STATE_DIR` takes precedence when set.
    pub fn state_dir() -> PathBuf {
        if let Ok(dir) = env::var(ENVDOCTOR_STATE_DIR_VAR) {
            return PathBuf::from(dir);
        }

        env::var("XDG_STATE_HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| {
                dirs::home_dir()
                    .map(|home| home.join(".local/state"))
                    .unwrap_or_else(|| PathBuf::from(".local/state"))
            })
            .join("envdoctor")
    }

    /// Get the path of the persisted scan report
    pub fn report_file() -> PathBuf {
        Self::state_dir().join(REPORT_FILENAME)
    }
}

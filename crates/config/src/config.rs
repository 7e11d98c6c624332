//! Centralized configuration for envdoctor
//!
//! `Config` is the single source of truth for runtime settings. It is
//! immutable after construction and is shared across components as
//! `Arc<Config>`.

use envdoctor_core::{
    DEFAULT_CACHE_CAPACITY, DEFAULT_CACHE_TTL_MS, DEFAULT_COMMAND_TIMEOUT_MS,
    DEFAULT_INSTALL_TIMEOUT_MS, REPORT_FILENAME,
};
use envdoctor_utils::XdgPaths;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Immutable configuration for one envdoctor invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Project directory being diagnosed
    pub working_directory: PathBuf,

    /// Runtime configuration settings
    pub runtime_settings: RuntimeSettings,
}

/// Settings that affect how envdoctor runs commands and stores state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeSettings {
    /// Maximum number of memoized command results
    pub cache_capacity: usize,

    /// How long a memoized command result stays fresh
    pub cache_ttl: Duration,

    /// Timeout for probe commands
    pub command_timeout: Duration,

    /// Timeout for package installs run by remediations
    pub install_timeout: Duration,

    /// Directory holding the persisted report
    pub state_dir: PathBuf,

    /// Whether verbose logging was requested
    pub verbose: bool,
}

impl Config {
    pub fn new(working_directory: PathBuf, runtime_settings: RuntimeSettings) -> Self {
        Self {
            working_directory,
            runtime_settings,
        }
    }

    pub fn working_dir(&self) -> &Path {
        &self.working_directory
    }

    /// Location of the persisted scan report
    pub fn report_path(&self) -> PathBuf {
        self.runtime_settings.state_dir.join(REPORT_FILENAME)
    }
}

impl Default for RuntimeSettings {
    fn default() -> Self {
        Self {
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            cache_ttl: Duration::from_millis(DEFAULT_CACHE_TTL_MS),
            command_timeout: Duration::from_millis(DEFAULT_COMMAND_TIMEOUT_MS),
            install_timeout: Duration::from_millis(DEFAULT_INSTALL_TIMEOUT_MS),
            state_dir: XdgPaths::state_dir(),
            verbose: false,
        }
    }
}

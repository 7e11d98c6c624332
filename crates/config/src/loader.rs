//! Configuration loader for envdoctor
//!
//! Resolves settings in three layers: built-in defaults, then `ENVDOCTOR_*`
//! environment variables, then explicit overrides from the command line.

use crate::config::{Config, RuntimeSettings};
use envdoctor_core::{
    Error, Result, ENVDOCTOR_CACHE_CAPACITY_VAR, ENVDOCTOR_CACHE_TTL_VAR,
    ENVDOCTOR_COMMAND_TIMEOUT_VAR, ENVDOCTOR_INSTALL_TIMEOUT_VAR, ENVDOCTOR_STATE_DIR_VAR,
};
use std::collections::HashMap;
use std::env;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Builder that assembles an immutable [`Config`]
#[derive(Debug, Default)]
pub struct ConfigLoader {
    /// Optional directory to diagnose (defaults to current directory)
    directory: Option<PathBuf>,
    verbose: bool,
    /// Environment snapshot; `None` reads the process environment
    environment: Option<HashMap<String, String>>,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the project directory
    pub fn directory(mut self, dir: PathBuf) -> Self {
        self.directory = Some(dir);
        self
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Resolve environment variables from this map instead of the process
    pub fn environment(mut self, vars: HashMap<String, String>) -> Self {
        self.environment = Some(vars);
        self
    }

    /// Load the configuration
    pub fn load(self) -> Result<Arc<Config>> {
        let working_dir = match self.directory.clone() {
            Some(dir) => dir,
            None => env::current_dir()
                .map_err(|e| Error::configuration(format!("failed to determine working directory: {e}")))?,
        };

        let mut settings = RuntimeSettings::default();

        if let Some(capacity) = self.parse_var::<usize>(ENVDOCTOR_CACHE_CAPACITY_VAR)? {
            if capacity == 0 {
                return Err(Error::configuration(format!(
                    "{ENVDOCTOR_CACHE_CAPACITY_VAR} must be greater than 0"
                )));
            }
            settings.cache_capacity = capacity;
        }
        if let Some(ms) = self.parse_var::<u64>(ENVDOCTOR_CACHE_TTL_VAR)? {
            settings.cache_ttl = Duration::from_millis(ms);
        }
        if let Some(ms) = self.parse_var::<u64>(ENVDOCTOR_COMMAND_TIMEOUT_VAR)? {
            settings.command_timeout = Duration::from_millis(ms);
        }
        if let Some(ms) = self.parse_var::<u64>(ENVDOCTOR_INSTALL_TIMEOUT_VAR)? {
            settings.install_timeout = Duration::from_millis(ms);
        }
        if let Some(dir) = self.var(ENVDOCTOR_STATE_DIR_VAR) {
            settings.state_dir = PathBuf::from(dir);
        }

        settings.verbose = self.verbose;

        tracing::debug!(
            working_dir = %working_dir.display(),
            cache_capacity = settings.cache_capacity,
            cache_ttl_ms = settings.cache_ttl.as_millis() as u64,
            state_dir = %settings.state_dir.display(),
            "configuration loaded"
        );

        Ok(Arc::new(Config::new(working_dir, settings)))
    }

    fn var(&self, name: &str) -> Option<String> {
        let value = match &self.environment {
            Some(vars) => vars.get(name).cloned(),
            None => env::var(name).ok(),
        }?;
        let trimmed = value.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }

    fn parse_var<T: std::str::FromStr>(&self, name: &str) -> Result<Option<T>> {
        match self.var(name) {
            Some(raw) => raw.parse::<T>().map(Some).map_err(|_| {
                Error::configuration(format!("{name} must be a non-negative integer (got '{raw}')"))
            }),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults_with_empty_environment() {
        let config = ConfigLoader::new()
            .directory(PathBuf::from("/project"))
            .environment(HashMap::new())
            .load()
            .unwrap();

        assert_eq!(config.working_directory, PathBuf::from("/project"));
        assert_eq!(config.runtime_settings.cache_capacity, 50);
        assert_eq!(config.runtime_settings.cache_ttl, Duration::from_millis(5000));
    }

    #[test]
    fn test_environment_overrides_defaults() {
        let config = ConfigLoader::new()
            .directory(PathBuf::from("/project"))
            .verbose(true)
            .environment(vars(&[
                (ENVDOCTOR_CACHE_CAPACITY_VAR, "8"),
                (ENVDOCTOR_CACHE_TTL_VAR, "250"),
                (ENVDOCTOR_COMMAND_TIMEOUT_VAR, "1000"),
                (ENVDOCTOR_INSTALL_TIMEOUT_VAR, "2000"),
                (ENVDOCTOR_STATE_DIR_VAR, "/tmp/envdoctor-state"),
            ]))
            .load()
            .unwrap();

        let settings = &config.runtime_settings;
        assert_eq!(settings.cache_capacity, 8);
        assert_eq!(settings.cache_ttl, Duration::from_millis(250));
        assert_eq!(settings.command_timeout, Duration::from_secs(1));
        assert_eq!(settings.install_timeout, Duration::from_secs(2));
        assert_eq!(settings.state_dir, PathBuf::from("/tmp/envdoctor-state"));
        assert!(settings.verbose);
        assert_eq!(
            config.report_path(),
            PathBuf::from("/tmp/envdoctor-state/report.json")
        );
    }

    #[test]
    fn test_zero_capacity_is_configuration_error() {
        let result = ConfigLoader::new()
            .directory(PathBuf::from("/project"))
            .environment(vars(&[(ENVDOCTOR_CACHE_CAPACITY_VAR, "0")]))
            .load();

        assert!(matches!(result, Err(Error::Configuration { .. })));
    }

    #[test]
    fn test_invalid_number_is_configuration_error() {
        let result = ConfigLoader::new()
            .directory(PathBuf::from("/project"))
            .environment(vars(&[(ENVDOCTOR_CACHE_TTL_VAR, "five seconds")]))
            .load();

        match result {
            Err(Error::Configuration { message }) => {
                assert!(message.contains(ENVDOCTOR_CACHE_TTL_VAR));
            }
            other => panic!("expected configuration error, got {other:?}"),
        }
    }

    #[test]
    fn test_blank_values_are_ignored() {
        let config = ConfigLoader::new()
            .directory(PathBuf::from("/project"))
            .environment(vars(&[(ENVDOCTOR_CACHE_CAPACITY_VAR, "  ")]))
            .load()
            .unwrap();

        assert_eq!(config.runtime_settings.cache_capacity, 50);
    }

    #[test]
    #[serial]
    fn test_reads_process_environment() {
        let temp_dir = TempDir::new().unwrap();
        let previous = env::var(ENVDOCTOR_STATE_DIR_VAR).ok();
        env::set_var(ENVDOCTOR_STATE_DIR_VAR, temp_dir.path());

        let config = ConfigLoader::new()
            .directory(PathBuf::from("/project"))
            .load()
            .unwrap();

        match previous {
            Some(value) => env::set_var(ENVDOCTOR_STATE_DIR_VAR, value),
            None => env::remove_var(ENVDOCTOR_STATE_DIR_VAR),
        }

        assert_eq!(config.runtime_settings.state_dir, temp_dir.path());
    }
}

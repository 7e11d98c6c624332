/// Constants used throughout the envdoctor codebase
// Project layout
pub const PACKAGE_JSON: &str = "package.json";
pub const NODE_MODULES_DIR: &str = "node_modules";
pub const NVMRC_FILE: &str = ".nvmrc";
pub const NPM_LOCKFILE: &str = "package-lock.json";
pub const YARN_LOCKFILE: &str = "yarn.lock";
pub const PNPM_LOCKFILE: &str = "pnpm-lock.yaml";

// node-gyp build cache, relative to the project root
pub const NODE_GYP_BIN: &str = "node_modules/.bin/node-gyp";
pub const NODE_GYP_CACHE_DIR: &str = "node_modules/.cache/node-gyp";
pub const NODE_GYP_VERSION_MARKER: &str = ".node-version";

// Environment variable names
pub const ENVDOCTOR_LOG_VAR: &str = "ENVDOCTOR_LOG";
pub const ENVDOCTOR_STATE_DIR_VAR: &str = "ENVDOCTOR_STATE_DIR";
pub const ENVDOCTOR_CACHE_CAPACITY_VAR: &str = "ENVDOCTOR_CACHE_CAPACITY";
pub const ENVDOCTOR_CACHE_TTL_VAR: &str = "ENVDOCTOR_CACHE_TTL_MS";
pub const ENVDOCTOR_COMMAND_TIMEOUT_VAR: &str = "ENVDOCTOR_COMMAND_TIMEOUT_MS";
pub const ENVDOCTOR_INSTALL_TIMEOUT_VAR: &str = "ENVDOCTOR_INSTALL_TIMEOUT_MS";

// Defaults
pub const DEFAULT_CACHE_CAPACITY: usize = 50;
pub const DEFAULT_CACHE_TTL_MS: u64 = 5_000;
pub const DEFAULT_COMMAND_TIMEOUT_MS: u64 = 30_000;
pub const DEFAULT_INSTALL_TIMEOUT_MS: u64 = 600_000;
pub const REPORT_FILENAME: &str = "report.json";

/// Exit code reported for a command that ran past its timeout
pub const TIMEOUT_EXIT_CODE: i32 = 124;

/// Exit code the shell reports when a command is not on `PATH`
pub const COMMAND_NOT_FOUND_EXIT_CODE: i32 = 127;

/// Placeholder for versions and values that could not be determined
pub const UNKNOWN_VERSION: &str = "unknown";

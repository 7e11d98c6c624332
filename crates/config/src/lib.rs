//! Configuration management for envdoctor
//!
//! Settings are resolved once at startup from built-in defaults, environment
//! variables and command-line overrides, then shared read-only.

pub mod config;
pub mod loader;

pub use config::{Config, RuntimeSettings};
pub use loader::ConfigLoader;

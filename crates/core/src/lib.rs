//! Core domain types, errors, and constants for `envdoctor`.
//!
//! Every other crate in the workspace builds on these definitions:
//!
//! - **`errors`**: the `Error` enum and `Result` alias shared by scanner,
//!   fixer and CLI.
//! - **`types`**: `Issue`, `Severity`, `EnvironmentInfo`, `ScanReport` and
//!   `RemediationOutcome`, serialized in the same JSON shape the report file
//!   uses.
//! - **`constants`**: file names, environment variable names and defaults.

pub mod constants;
pub mod errors;
pub mod types;

pub use self::{
    constants::*,
    errors::{Error, Result},
    types::*,
};

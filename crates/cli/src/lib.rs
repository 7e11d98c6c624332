//! The `envdoctor` command-line front end

pub mod commands;
pub mod display;
mod execute;
pub mod prompt;
pub mod report;

pub use commands::Commands;
pub use prompt::StdinPrompter;
pub use report::ReportStore;

use clap::Subcommand;

pub mod doctor;
pub mod fix;
pub mod report;
pub mod reset;
pub mod scan;

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Run a full diagnostic and show a color-coded report
    Scan,

    /// Apply fixes for the issues found by the last scan
    Fix {
        /// Apply every available fix without asking (for CI)
        #[arg(long)]
        all: bool,
    },

    /// Show the last saved scan report
    Report,

    /// Remove saved reports and other envdoctor state
    Reset,

    /// Say hello
    Doctor,
}

use crate::display::{display_issues, display_suggestions};
use crate::report::ReportStore;
use crossterm::style::Stylize;
use envdoctor_config::Config;
use envdoctor_core::{Result, ScanReport};
use envdoctor_exec::{CommandRunner, SystemCommandRunner};
use envdoctor_scanner::Scanner;
use std::sync::Arc;

pub async fn execute(config: Arc<Config>) -> Result<()> {
    println!("{}", "Running environment scan...".blue());

    let report = run_scan(&config, Arc::new(SystemCommandRunner::new())).await?;
    println!(
        "{}",
        format!("Scan completed with {} issues found", report.issues.len()).green()
    );
    ReportStore::from_config(&config).save(&report)?;

    display_issues(&report.issues);
    display_suggestions(&report.suggestions);
    Ok(())
}

/// Scan the configured project with the built-in probes
pub(crate) async fn run_scan(config: &Config, runner: Arc<dyn CommandRunner>) -> Result<ScanReport> {
    Scanner::from_config(config, runner)?.scan().await
}

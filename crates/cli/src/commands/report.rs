use crate::display::display_report;
use crate::report::ReportStore;
use crossterm::style::Stylize;
use envdoctor_config::Config;
use envdoctor_core::Result;
use std::sync::Arc;

pub fn execute(config: Arc<Config>) -> Result<()> {
    println!("{}", "Displaying last scan report...".yellow());

    match ReportStore::from_config(&config).load()? {
        Some(report) => display_report(&report),
        None => println!("{}", "No previous scan report found.".yellow()),
    }
    Ok(())
}

use crate::report::ReportStore;
use crossterm::style::Stylize;
use envdoctor_config::Config;
use envdoctor_core::Result;
use std::sync::Arc;

pub fn execute(config: Arc<Config>) -> Result<()> {
    println!("{}", "Resetting envdoctor state...".red());

    let store = ReportStore::from_config(&config);
    if store.clear()? {
        tracing::info!(state_dir = %store.state_dir().display(), "state directory removed");
        println!("{}", "State cleared successfully!".green());
    } else {
        println!("{}", "Nothing to clear.".green());
    }
    Ok(())
}

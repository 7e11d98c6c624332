use crate::display::display_dispatch;
use crate::prompt::StdinPrompter;
use crate::report::ReportStore;
use crossterm::style::Stylize;
use envdoctor_config::Config;
use envdoctor_core::Result;
use envdoctor_exec::{CommandRunner, SystemCommandRunner};
use envdoctor_fixer::{
    confirm_fixes, AutoApprove, Prompter, RemediationDispatcher, RemediationSettings,
    RemediationTable,
};
use envdoctor_scanner::HostInfo;
use std::sync::Arc;

pub async fn execute(config: Arc<Config>, all: bool) -> Result<()> {
    println!("{}", "Applying fixes...".green());

    let store = ReportStore::from_config(&config);
    let runner: Arc<dyn CommandRunner> = Arc::new(SystemCommandRunner::new());

    let report = match store.load_for(&config.working_directory)? {
        Some(report) => report,
        None => {
            println!("{}", "No previous scan found for this project. Running scan first...".yellow());
            let report = super::scan::run_scan(&config, Arc::clone(&runner)).await?;
            store.save(&report)?;
            report
        }
    };

    if report.issues.is_empty() {
        println!("{}", "No issues found. Environment is healthy!".green());
        return Ok(());
    }

    let prompter: &dyn Prompter = if all { &AutoApprove } else { &StdinPrompter };
    let issues = confirm_fixes(report.issues, prompter)?;

    let settings = RemediationSettings {
        working_dir: config.working_directory.clone(),
        runner,
        host: Arc::new(HostInfo::capture()),
        command_timeout: config.runtime_settings.command_timeout,
        install_timeout: config.runtime_settings.install_timeout,
    };
    let dispatcher = RemediationDispatcher::new(Arc::new(RemediationTable::standard()), settings);
    let outcome = dispatcher.dispatch(&issues).await;

    display_dispatch(&outcome);
    Ok(())
}

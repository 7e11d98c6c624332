use crossterm::style::Stylize;
use envdoctor_core::{Issue, IssueKind, ScanReport, Suggestion};
use envdoctor_fixer::DispatchReport;

/// One bullet line for an issue, colored by its kind
pub fn format_issue(issue: &Issue) -> String {
    let bullet = match issue.kind {
        IssueKind::Error => "•".red(),
        IssueKind::Warning => "•".yellow(),
        IssueKind::Info => "•".blue(),
    };
    let mut line = format!("  {bullet} {}", issue.message);
    if issue.fix_available {
        line.push_str(&format!(" {}", "(fix available)".green()));
    }
    line
}

pub fn format_suggestion(suggestion: &Suggestion) -> String {
    let mut line = format!(
        "  {} {}: {}",
        "•".cyan(),
        suggestion.title,
        suggestion.description
    );
    if let Some(command) = &suggestion.command {
        line.push_str(&format!(" {}", format!("`{command}`").dark_grey()));
    }
    line
}

pub fn display_issues(issues: &[Issue]) {
    if issues.is_empty() {
        return;
    }
    println!("\n{}", "Issues found:".bold());
    for issue in issues {
        println!("{}", format_issue(issue));
    }
}

pub fn display_suggestions(suggestions: &[Suggestion]) {
    if suggestions.is_empty() {
        return;
    }
    println!("\n{}", "Suggestions:".bold());
    for suggestion in suggestions {
        println!("{}", format_suggestion(suggestion));
    }
}

/// Full rendering of a stored report, environment header included
pub fn display_report(report: &ScanReport) {
    let env = &report.environment;
    println!(
        "\n{}",
        format!("Scan performed on: {}", report.timestamp.to_rfc3339()).blue()
    );
    println!(
        "{}",
        format!("Project: {}", report.working_directory.display()).blue()
    );
    println!("{}", format!("OS: {} ({})", env.os, env.arch).blue());
    println!("{}", format!("Node.js: {}", env.node_version).blue());
    println!("{}", format!("npm: {}", env.npm_version).blue());

    if report.issues.is_empty() {
        println!("\n{}", "No issues found. Environment is healthy!".green());
    } else {
        display_issues(&report.issues);
    }
    display_suggestions(&report.suggestions);
}

/// Print every outcome followed by the success/failure tally
pub fn display_dispatch(report: &DispatchReport) {
    for id in &report.skipped {
        println!("{}", format!("- {id}: no automatic fix available").dark_grey());
    }
    for outcome in report.outcomes() {
        if outcome.success {
            println!("{}", format!("✓ {}", outcome.message).green());
        } else {
            println!("{}", format!("✗ {}", outcome.message).red());
        }
    }
    println!(
        "\n{}",
        format!(
            "Fix Summary: {} succeeded, {} failed",
            report.succeeded_count(),
            report.failed_count()
        )
        .blue()
    );
}

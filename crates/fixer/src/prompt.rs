//! Interactive confirmation before dispatch

use envdoctor_core::{Issue, Result};

/// Asks whether a fixable issue should be remediated
pub trait Prompter {
    fn confirm(&self, issue: &Issue) -> Result<bool>;
}

/// Approves every fix; used for `fix --all`
#[derive(Debug, Default, Clone, Copy)]
pub struct AutoApprove;

impl Prompter for AutoApprove {
    fn confirm(&self, _issue: &Issue) -> Result<bool> {
        Ok(true)
    }
}

/// Drop fixable issues the user declines.
///
/// Issues without a fix are kept without asking so the dispatcher can report
/// them as skipped.
pub fn confirm_fixes(issues: Vec<Issue>, prompter: &dyn Prompter) -> Result<Vec<Issue>> {
    let mut approved = Vec::with_capacity(issues.len());
    for issue in issues {
        if !issue.fix_available || prompter.confirm(&issue)? {
            approved.push(issue);
        } else {
            tracing::info!(issue_id = %issue.id, "fix declined");
        }
    }
    Ok(approved)
}

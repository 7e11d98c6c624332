//! Severity-ordered remediation dispatch
//!
//! One dispatch run walks a de-duplicated issue list from the most to the
//! least severe issue. Each identity is attempted at most once, faults inside
//! a procedure become failed outcomes, and the run always reaches the end of
//! the list.

use crate::procedure::{RemediationContext, RemediationSettings};
use crate::table::RemediationTable;
use envdoctor_core::{Issue, RemediationOutcome};
use envdoctor_utils::tracing::{remediation_completed, remediation_span};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;
use tracing::Instrument;

/// Outcomes produced while remediating one issue
#[derive(Debug, Clone)]
pub struct OutcomeGroup {
    pub issue_id: String,
    pub outcomes: Vec<Arc<RemediationOutcome>>,
}

impl OutcomeGroup {
    /// True only when every step of the remediation succeeded
    pub fn succeeded(&self) -> bool {
        !self.outcomes.is_empty() && self.outcomes.iter().all(|outcome| outcome.success)
    }
}

/// Result of a dispatch run
#[derive(Debug, Clone, Default)]
pub struct DispatchReport {
    pub groups: Vec<OutcomeGroup>,
    /// Identities skipped because no fix is available
    pub skipped: Vec<String>,
}

impl DispatchReport {
    pub fn succeeded_count(&self) -> usize {
        self.groups.iter().filter(|group| group.succeeded()).count()
    }

    pub fn failed_count(&self) -> usize {
        self.groups.len() - self.succeeded_count()
    }

    /// Every outcome in dispatch order
    pub fn outcomes(&self) -> impl Iterator<Item = &Arc<RemediationOutcome>> {
        self.groups.iter().flat_map(|group| group.outcomes.iter())
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty() && self.skipped.is_empty()
    }
}

#[derive(Debug)]
pub struct RemediationDispatcher {
    table: Arc<RemediationTable>,
    settings: RemediationSettings,
}

impl RemediationDispatcher {
    pub fn new(table: Arc<RemediationTable>, settings: RemediationSettings) -> Self {
        Self { table, settings }
    }

    pub async fn dispatch(&self, issues: &[Issue]) -> DispatchReport {
        let mut ordered: Vec<&Issue> = issues.iter().collect();
        // Stable, so equal severities keep their input order
        ordered.sort_by(|a, b| b.severity.cmp(&a.severity));

        let mut report = DispatchReport::default();
        let mut attempted: HashSet<&str> = HashSet::new();
        let mut recorded: Vec<Arc<RemediationOutcome>> = Vec::new();

        for issue in ordered {
            if !issue.fix_available {
                tracing::info!(issue_id = %issue.id, "no fix available, skipping");
                report.skipped.push(issue.id.clone());
                continue;
            }
            if !attempted.insert(issue.id.as_str()) {
                tracing::debug!(issue_id = %issue.id, "already attempted in this run");
                continue;
            }

            let produced = self
                .remediate(issue)
                .instrument(remediation_span(&issue.id))
                .await;

            let mut outcomes = Vec::with_capacity(produced.len());
            for outcome in produced {
                if recorded.iter().any(|seen| Arc::ptr_eq(seen, &outcome)) {
                    continue;
                }
                recorded.push(Arc::clone(&outcome));
                outcomes.push(outcome);
            }

            report.groups.push(OutcomeGroup {
                issue_id: issue.id.clone(),
                outcomes,
            });
        }

        tracing::info!(
            attempted = report.groups.len(),
            succeeded = report.succeeded_count(),
            skipped = report.skipped.len(),
            "dispatch finished"
        );
        report
    }

    async fn remediate(&self, issue: &Issue) -> Vec<Arc<RemediationOutcome>> {
        let resolution = self.table.resolve(issue);
        let Some(procedure) = self.table.procedure(&resolution) else {
            tracing::warn!(issue_id = %issue.id, "no remediation implemented");
            return vec![Arc::new(RemediationOutcome::failed(
                &issue.id,
                format!("No remediation implemented for {}", issue.id),
            ))];
        };

        tracing::debug!(procedure = procedure.name(), resolution = ?resolution, "applying remediation");
        let start = Instant::now();
        let ctx = RemediationContext::new(issue.clone(), self.settings.clone());

        let outcomes = match procedure.remediate(&ctx).await {
            Ok(outcomes) if outcomes.is_empty() => vec![Arc::new(RemediationOutcome::failed(
                &issue.id,
                format!("Remediation for {} produced no result", issue.id),
            ))],
            Ok(outcomes) => outcomes,
            Err(e) => vec![Arc::new(RemediationOutcome::failed(
                &issue.id,
                format!("Remediation for {} failed: {e}", issue.id),
            ))],
        };

        remediation_completed(
            &issue.id,
            start.elapsed().as_millis() as u64,
            outcomes.iter().all(|outcome| outcome.success),
        );
        outcomes
    }
}

#[cfg(test)]
mod tests;

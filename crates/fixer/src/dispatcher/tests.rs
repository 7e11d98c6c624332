//! Tests for the remediation dispatcher

use super::*;
use crate::category::IssueCategory;
use crate::procedure::RemediationProcedure;
use crate::procedures::test_support::{settings, touch};
use crate::table::RemediationTableBuilder;
use async_trait::async_trait;
use envdoctor_core::{Error, Result, Severity};
use envdoctor_exec::testing::ScriptedRunner;
use envdoctor_scanner::HostInfo;
use parking_lot::Mutex;
use tempfile::TempDir;

/// Records which issues it was asked to fix
#[derive(Default)]
struct Recorder {
    calls: Mutex<Vec<String>>,
}

#[async_trait]
impl RemediationProcedure for Recorder {
    fn name(&self) -> &'static str {
        "recorder"
    }

    async fn remediate(&self, ctx: &RemediationContext) -> Result<Vec<Arc<RemediationOutcome>>> {
        self.calls.lock().push(ctx.issue_id().to_string());
        Ok(vec![Arc::new(ctx.succeeded("recorded"))])
    }
}

/// Always fails with an error
struct Exploding;

#[async_trait]
impl RemediationProcedure for Exploding {
    fn name(&self) -> &'static str {
        "exploding"
    }

    async fn remediate(&self, ctx: &RemediationContext) -> Result<Vec<Arc<RemediationOutcome>>> {
        Err(Error::remediation(ctx.issue_id(), "disk on fire"))
    }
}

/// Hands out the same outcome instance every time
struct Shared {
    outcome: Arc<RemediationOutcome>,
}

#[async_trait]
impl RemediationProcedure for Shared {
    fn name(&self) -> &'static str {
        "shared"
    }

    async fn remediate(&self, _ctx: &RemediationContext) -> Result<Vec<Arc<RemediationOutcome>>> {
        Ok(vec![Arc::clone(&self.outcome), Arc::clone(&self.outcome)])
    }
}

fn fixable(id: &str, severity: Severity) -> Issue {
    Issue::warning(id, severity, id).with_fix()
}

fn dispatcher_with(dir: &std::path::Path, table: RemediationTable) -> RemediationDispatcher {
    RemediationDispatcher::new(
        Arc::new(table),
        settings(dir, Arc::new(ScriptedRunner::new()), HostInfo::new("linux", "x86_64")),
    )
}

fn recording_table(recorder: Arc<Recorder>) -> RemediationTable {
    let mut builder = RemediationTableBuilder::standard();
    for category in IssueCategory::ALL {
        builder = builder.procedure(category, recorder.clone());
    }
    builder.build()
}

fn group_ids(report: &DispatchReport) -> Vec<&str> {
    report.groups.iter().map(|g| g.issue_id.as_str()).collect()
}

#[tokio::test]
async fn test_dispatch_follows_severity_then_input_order() {
    let temp_dir = TempDir::new().unwrap();
    let recorder = Arc::new(Recorder::default());
    let dispatcher = dispatcher_with(temp_dir.path(), recording_table(recorder.clone()));
    let issues = vec![
        fixable("missing-make", Severity::Low),
        fixable("missing-lockfile", Severity::High),
        fixable("npm-version-outdated", Severity::Critical),
        fixable("missing-python3", Severity::High),
    ];

    let report = dispatcher.dispatch(&issues).await;

    assert_eq!(
        *recorder.calls.lock(),
        vec![
            "npm-version-outdated",
            "missing-lockfile",
            "missing-python3",
            "missing-make"
        ]
    );
    assert_eq!(group_ids(&report), *recorder.calls.lock());
    assert_eq!(report.succeeded_count(), 4);
}

#[tokio::test]
async fn test_each_identity_attempted_at_most_once() {
    let temp_dir = TempDir::new().unwrap();
    let recorder = Arc::new(Recorder::default());
    let dispatcher = dispatcher_with(temp_dir.path(), recording_table(recorder.clone()));
    let issues = vec![
        fixable("missing-lockfile", Severity::Medium),
        fixable("missing-lockfile", Severity::High),
    ];

    let report = dispatcher.dispatch(&issues).await;

    assert_eq!(*recorder.calls.lock(), vec!["missing-lockfile"]);
    assert_eq!(report.groups.len(), 1);
}

#[tokio::test]
async fn test_unfixable_issues_are_skipped() {
    let temp_dir = TempDir::new().unwrap();
    let recorder = Arc::new(Recorder::default());
    let dispatcher = dispatcher_with(temp_dir.path(), recording_table(recorder.clone()));
    let issues = vec![
        Issue::error("missing-node", Severity::Critical, "no node"),
        fixable("missing-lockfile", Severity::Medium),
    ];

    let report = dispatcher.dispatch(&issues).await;

    assert_eq!(report.skipped, vec!["missing-node"]);
    assert_eq!(group_ids(&report), vec!["missing-lockfile"]);
    assert_eq!(*recorder.calls.lock(), vec!["missing-lockfile"]);
}

#[tokio::test]
async fn test_procedure_error_is_contained() {
    let temp_dir = TempDir::new().unwrap();
    let recorder = Arc::new(Recorder::default());
    let table = RemediationTableBuilder::standard()
        .procedure(IssueCategory::MissingBuildTool, Arc::new(Exploding))
        .procedure(IssueCategory::MissingDependencies, recorder.clone())
        .build();
    let dispatcher = dispatcher_with(temp_dir.path(), table);
    let issues = vec![
        fixable("missing-make", Severity::High),
        fixable("missing-lockfile", Severity::Medium),
    ];

    let report = dispatcher.dispatch(&issues).await;

    assert_eq!(group_ids(&report), vec!["missing-make", "missing-lockfile"]);
    let failed = &report.groups[0];
    assert!(!failed.succeeded());
    assert!(failed.outcomes[0].message.contains("missing-make"));
    assert!(failed.outcomes[0].message.contains("disk on fire"));
    assert!(report.groups[1].succeeded());
    assert_eq!(report.failed_count(), 1);
}

#[tokio::test]
async fn test_unrecognized_issue_gets_failed_outcome() {
    let temp_dir = TempDir::new().unwrap();
    let dispatcher = dispatcher_with(temp_dir.path(), RemediationTable::standard());
    let issues = vec![fixable("mystery", Severity::Low)];

    let report = dispatcher.dispatch(&issues).await;

    assert_eq!(report.groups.len(), 1);
    assert!(!report.groups[0].succeeded());
    assert_eq!(
        report.groups[0].outcomes[0].message,
        "No remediation implemented for mystery"
    );
}

#[tokio::test]
async fn test_same_outcome_instance_recorded_once() {
    let temp_dir = TempDir::new().unwrap();
    let outcome = Arc::new(RemediationOutcome::succeeded("shared", "shared"));
    let table = RemediationTableBuilder::standard()
        .procedure(
            IssueCategory::MissingBuildTool,
            Arc::new(Shared {
                outcome: outcome.clone(),
            }),
        )
        .build();
    let dispatcher = dispatcher_with(temp_dir.path(), table);
    let issues = vec![
        fixable("missing-make", Severity::High),
        fixable("missing-python3", Severity::High),
    ];

    let report = dispatcher.dispatch(&issues).await;

    assert_eq!(report.outcomes().count(), 1);
    assert!(Arc::ptr_eq(&report.groups[0].outcomes[0], &outcome));
    assert!(report.groups[1].outcomes.is_empty());
}

#[tokio::test]
async fn test_missing_node_modules_end_to_end() {
    let temp_dir = TempDir::new().unwrap();
    touch(temp_dir.path(), "package.json");
    touch(temp_dir.path(), "package-lock.json");
    let runner = Arc::new(ScriptedRunner::new().on_success("npm install", "added 120 packages"));
    let dispatcher = RemediationDispatcher::new(
        Arc::new(RemediationTable::standard()),
        settings(temp_dir.path(), runner.clone(), HostInfo::new("linux", "x86_64")),
    );
    let issues = vec![Issue::error(
        "missing-node-modules",
        Severity::Critical,
        "node_modules directory is missing. Run npm install.",
    )
    .with_fix()];

    let report = dispatcher.dispatch(&issues).await;

    let group = &report.groups[0];
    assert_eq!(group.outcomes.len(), 2);
    assert_eq!(group.outcomes[0].fixed_steps, vec!["package-lock-removed"]);
    assert_eq!(group.outcomes[1].fixed_steps, vec!["dependencies-installed"]);
    assert!(group.succeeded());
    assert!(!temp_dir.path().join("package-lock.json").exists());
    assert_eq!(runner.call_count("npm install"), 1);
}

#[tokio::test]
async fn test_missing_node_modules_failed_install_fails_group() {
    let temp_dir = TempDir::new().unwrap();
    let runner = Arc::new(ScriptedRunner::new().on_failure("npm install", "EACCES", 243));
    let dispatcher = RemediationDispatcher::new(
        Arc::new(RemediationTable::standard()),
        settings(temp_dir.path(), runner, HostInfo::new("linux", "x86_64")),
    );
    let issues = vec![fixable("missing-node-modules", Severity::Critical)];

    let report = dispatcher.dispatch(&issues).await;

    let group = &report.groups[0];
    assert!(group.outcomes[0].success);
    assert!(!group.outcomes[1].success);
    assert!(!group.succeeded());
}

#[tokio::test]
async fn test_fix_command_fallback() {
    let temp_dir = TempDir::new().unwrap();
    let runner = Arc::new(ScriptedRunner::new().on_success("npm dedupe", "ok"));
    let dispatcher = RemediationDispatcher::new(
        Arc::new(RemediationTable::standard()),
        settings(temp_dir.path(), runner.clone(), HostInfo::new("linux", "x86_64")),
    );
    let issues = vec![Issue::warning("duplicate-react", Severity::Medium, "two reacts")
        .with_fix_command("npm dedupe")];

    let report = dispatcher.dispatch(&issues).await;

    assert!(report.groups[0].succeeded());
    assert_eq!(runner.call_count("npm dedupe"), 1);
}

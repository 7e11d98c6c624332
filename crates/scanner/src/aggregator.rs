//! Concurrent probe execution with deterministic merge order

use crate::probe::{Probe, ProbeContext};
use crate::probes::{DependencyProbe, NativeProbe, SystemProbe, ToolchainProbe};
use envdoctor_core::{EnvironmentInfo, Error, Issue, Result, Severity};
use envdoctor_utils::tracing::probe_span;
use std::sync::Arc;
use std::time::Instant;
use tracing::Instrument;

/// Merged output of every probe, before de-duplication
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Aggregation {
    pub environment: EnvironmentInfo,
    pub issues: Vec<Issue>,
}

/// Runs a fixed, ordered list of probes
pub struct ProbeAggregator {
    probes: Vec<Arc<dyn Probe>>,
}

impl std::fmt::Debug for ProbeAggregator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.probes.iter().map(|probe| probe.name()).collect();
        f.debug_struct("ProbeAggregator")
            .field("probes", &names)
            .finish()
    }
}

impl Default for ProbeAggregator {
    fn default() -> Self {
        Self::new(vec![
            Arc::new(SystemProbe),
            Arc::new(ToolchainProbe::default()),
            Arc::new(DependencyProbe),
            Arc::new(NativeProbe),
        ])
    }
}

impl ProbeAggregator {
    /// Probes are merged in the order given here
    pub fn new(probes: Vec<Arc<dyn Probe>>) -> Self {
        Self { probes }
    }

    /// Run every probe concurrently and merge their findings.
    ///
    /// Issues appear grouped by probe in declaration order, each probe's
    /// issues in the order it produced them, regardless of which probe
    /// finished first. A probe that returns `Err` contributes a
    /// `<name>-probe-failed` issue instead. A probe task that panics fails the
    /// whole aggregation.
    pub async fn run_all(&self, ctx: Arc<ProbeContext>) -> Result<Aggregation> {
        let handles: Vec<_> = self
            .probes
            .iter()
            .map(|probe| {
                let probe = Arc::clone(probe);
                let ctx = Arc::clone(&ctx);
                let name = probe.name();
                let handle = tokio::spawn(
                    async move {
                        let start = Instant::now();
                        let result = probe.run(&ctx).await;
                        tracing::debug!(
                            duration_ms = start.elapsed().as_millis() as u64,
                            ok = result.is_ok(),
                            "probe finished"
                        );
                        result
                    }
                    .instrument(probe_span(name)),
                );
                (name, handle)
            })
            .collect();

        let mut environment = None;
        let mut issues = Vec::new();

        for (name, handle) in handles {
            match handle.await {
                Ok(Ok(report)) => {
                    if environment.is_none() {
                        environment = report.environment;
                    }
                    issues.extend(report.issues);
                }
                Ok(Err(e)) => {
                    tracing::warn!(probe = name, error = %e, "probe failed");
                    issues.push(Issue::error(
                        format!("{name}-probe-failed"),
                        Severity::Low,
                        format!("The {name} check could not complete: {e}"),
                    ));
                }
                Err(e) => {
                    tracing::error!(probe = name, error = %e, "probe task aborted");
                    return Err(Error::probe_aborted(name, e.to_string()));
                }
            }
        }

        Ok(Aggregation {
            environment: environment.unwrap_or_default(),
            issues,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::ProbeReport;
    use crate::probes::test_support::{context, ids, linux};
    use async_trait::async_trait;
    use envdoctor_exec::testing::ScriptedRunner;
    use std::time::Duration;
    use tempfile::TempDir;

    struct FakeProbe {
        name: &'static str,
        delay: Duration,
        outcome: fn() -> Result<ProbeReport>,
    }

    #[async_trait]
    impl Probe for FakeProbe {
        fn name(&self) -> &'static str {
            self.name
        }

        async fn run(&self, _ctx: &ProbeContext) -> Result<ProbeReport> {
            tokio::time::sleep(self.delay).await;
            (self.outcome)()
        }
    }

    fn fake(name: &'static str, delay_ms: u64, outcome: fn() -> Result<ProbeReport>) -> Arc<dyn Probe> {
        Arc::new(FakeProbe {
            name,
            delay: Duration::from_millis(delay_ms),
            outcome,
        })
    }

    fn ctx(dir: &std::path::Path) -> Arc<ProbeContext> {
        Arc::new(context(dir, ScriptedRunner::new(), linux()))
    }

    fn first() -> Result<ProbeReport> {
        Ok(ProbeReport::issues(vec![
            Issue::warning("a1", Severity::Low, "a1"),
            Issue::warning("a2", Severity::Low, "a2"),
        ]))
    }

    fn second() -> Result<ProbeReport> {
        Ok(ProbeReport::issues(vec![Issue::warning("b1", Severity::High, "b1")]))
    }

    fn third() -> Result<ProbeReport> {
        Ok(ProbeReport::issues(vec![Issue::warning("c1", Severity::Medium, "c1")]))
    }

    #[tokio::test]
    async fn test_merge_order_ignores_completion_order() {
        let temp_dir = TempDir::new().unwrap();
        // Slowest probe declared first
        let aggregator = ProbeAggregator::new(vec![
            fake("first", 60, first),
            fake("second", 30, second),
            fake("third", 0, third),
        ]);

        let aggregation = aggregator.run_all(ctx(temp_dir.path())).await.unwrap();

        assert_eq!(ids(&aggregation.issues), vec!["a1", "a2", "b1", "c1"]);
    }

    #[tokio::test]
    async fn test_failed_probe_is_downgraded_to_issue() {
        let temp_dir = TempDir::new().unwrap();
        let aggregator = ProbeAggregator::new(vec![
            fake("first", 0, first),
            fake("broken", 0, || Err(Error::configuration("boom"))),
            fake("third", 0, third),
        ]);

        let aggregation = aggregator.run_all(ctx(temp_dir.path())).await.unwrap();

        assert_eq!(
            ids(&aggregation.issues),
            vec!["a1", "a2", "broken-probe-failed", "c1"]
        );
        let failed = &aggregation.issues[2];
        assert_eq!(failed.severity, Severity::Low);
        assert!(!failed.fix_available);
        assert!(failed.message.contains("boom"));
    }

    #[tokio::test]
    async fn test_panicking_probe_aborts_aggregation() {
        let temp_dir = TempDir::new().unwrap();
        let aggregator = ProbeAggregator::new(vec![
            fake("first", 0, first),
            fake("exploding", 0, || panic!("probe exploded")),
        ]);

        let result = aggregator.run_all(ctx(temp_dir.path())).await;

        match result {
            Err(Error::ProbeAborted { probe, .. }) => assert_eq!(probe, "exploding"),
            other => panic!("expected probe abort, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_environment_defaults_without_system_probe() {
        let temp_dir = TempDir::new().unwrap();
        let aggregator = ProbeAggregator::new(vec![fake("first", 0, first)]);

        let aggregation = aggregator.run_all(ctx(temp_dir.path())).await.unwrap();

        assert_eq!(aggregation.environment, EnvironmentInfo::default());
    }

    #[tokio::test]
    async fn test_default_probe_order() {
        let names: Vec<&str> = ProbeAggregator::default()
            .probes
            .iter()
            .map(|probe| probe.name())
            .collect();

        assert_eq!(names, vec!["system", "toolchain", "dependency", "native"]);
    }
}

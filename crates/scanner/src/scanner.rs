use crate::aggregator::ProbeAggregator;
use crate::dedupe::dedupe;
use crate::host::HostInfo;
use crate::probe::ProbeContext;
use crate::suggestions::generate_suggestions;
use chrono::Utc;
use envdoctor_config::Config;
use envdoctor_core::{Result, ScanReport};
use envdoctor_exec::{CommandMemoizer, CommandRunner};
use envdoctor_utils::tracing::scan_span;
use std::sync::Arc;
use std::time::Instant;
use tracing::Instrument;

/// Runs a complete scan: probes, de-duplication and suggestions
#[derive(Debug)]
pub struct Scanner {
    aggregator: ProbeAggregator,
    context: Arc<ProbeContext>,
}

impl Scanner {
    pub fn new(context: ProbeContext, aggregator: ProbeAggregator) -> Self {
        Self {
            aggregator,
            context: Arc::new(context),
        }
    }

    /// Scanner for the configured project with the built-in probes
    pub fn from_config(config: &Config, runner: Arc<dyn CommandRunner>) -> Result<Self> {
        let settings = &config.runtime_settings;
        let memoizer = CommandMemoizer::new(runner, settings.cache_capacity, settings.cache_ttl)?;
        let context = ProbeContext::new(
            config.working_directory.clone(),
            Arc::new(memoizer),
            Arc::new(HostInfo::capture()),
            settings.command_timeout,
        );
        Ok(Self::new(context, ProbeAggregator::default()))
    }

    pub fn context(&self) -> &ProbeContext {
        &self.context
    }

    pub async fn scan(&self) -> Result<ScanReport> {
        let span = scan_span(&self.context.working_dir);
        async {
            let start = Instant::now();
            let aggregation = self.aggregator.run_all(Arc::clone(&self.context)).await?;
            let raw_count = aggregation.issues.len();
            let issues = dedupe(aggregation.issues);
            let suggestions = generate_suggestions(&issues, &aggregation.environment);

            let stats = self.context.memoizer.stats();
            tracing::info!(
                issues = issues.len(),
                duplicates = raw_count - issues.len(),
                cache_hits = stats.hits,
                cache_misses = stats.misses,
                duration_ms = start.elapsed().as_millis() as u64,
                "scan completed"
            );

            Ok(ScanReport {
                timestamp: Utc::now(),
                working_directory: self.context.working_dir.clone(),
                environment: aggregation.environment,
                issues,
                suggestions,
            })
        }
        .instrument(span)
        .await
    }
}

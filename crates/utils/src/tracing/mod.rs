use envdoctor_core::ENVDOCTOR_LOG_VAR;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

// Re-export tracing macros for convenience
pub use tracing::{debug, error, info, instrument, span, trace, warn, Level, Span};

/// Initialize the tracing system
///
/// The filter comes from `ENVDOCTOR_LOG` (standard `EnvFilter` syntax); when
/// unset it is `debug` with `verbose`, `info` otherwise. Events go to stderr so
/// stdout stays reserved for the report.
pub fn init(verbose: bool) -> Result<(), Box<dyn std::error::Error + Send + Sync + 'static>> {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_env(ENVDOCTOR_LOG_VAR)
        .or_else(|_| EnvFilter::try_new(default_level))?;

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(is_tty())
        .compact()
        .with_target(verbose)
        .with_thread_ids(false)
        .with_level(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}

/// Check if we're running in a TTY environment
fn is_tty() -> bool {
    std::io::IsTerminal::is_terminal(&std::io::stderr())
}

/// Create a span covering a whole scan
pub fn scan_span(working_dir: &std::path::Path) -> Span {
    span!(Level::INFO, "scan", working_dir = %working_dir.display())
}

/// Create a span covering one probe
pub fn probe_span(probe: &str) -> Span {
    span!(Level::DEBUG, "probe", probe = %probe)
}

/// Create a span for a remediation attempt
pub fn remediation_span(issue_id: &str) -> Span {
    span!(Level::INFO, "remediation", issue_id = %issue_id)
}

/// Emit a structured event for memoizer lookups
pub fn cache_event(command: &str, hit: bool) {
    if hit {
        debug!(command = %command, "cache_hit");
    } else {
        debug!(command = %command, "cache_miss");
    }
}

/// Emit a structured event when a remediation finishes
pub fn remediation_completed(issue_id: &str, duration_ms: u64, success: bool) {
    if success {
        info!(
            issue_id = %issue_id,
            duration_ms = %duration_ms,
            "remediation_completed"
        );
    } else {
        warn!(
            issue_id = %issue_id,
            duration_ms = %duration_ms,
            "remediation_failed"
        );
    }
}

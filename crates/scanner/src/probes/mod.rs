//! The built-in probes, in the order their findings are merged

mod dependency;
mod native;
mod system;
mod toolchain;

pub use dependency::DependencyProbe;
pub use native::NativeProbe;
pub use system::SystemProbe;
pub use toolchain::ToolchainProbe;

use crate::probe::ProbeContext;
use envdoctor_core::{Error, Issue, Result, Severity, PACKAGE_JSON};
use envdoctor_utils::fs::{path_exists, read_json};
use serde_json::Value;

/// The project's `package.json`, if it has one
pub(crate) fn read_package_json(ctx: &ProbeContext) -> Result<Option<Value>> {
    let path = ctx.project_path(PACKAGE_JSON);
    if !path_exists(&path) {
        return Ok(None);
    }
    read_json(&path).map(Some)
}

/// Finding recorded when one check inside a probe faults. The probe keeps
/// the rest of its findings.
pub(crate) fn check_failed(id: &str, subject: &str, error: &Error) -> Issue {
    tracing::debug!(check = id, error = %error, "probe check failed");
    Issue::error(
        format!("{id}-check-failed"),
        Severity::Low,
        format!("Failed to check {subject}: {error}"),
    )
}

/// String field under an object field, e.g. `engines.node`
pub(crate) fn nested_str<'a>(value: &'a Value, section: &str, key: &str) -> Option<&'a str> {
    value.get(section)?.get(key)?.as_str()
}

use super::steps::build_tools_install_command;
use crate::procedure::{RemediationContext, RemediationProcedure};
use async_trait::async_trait;
use envdoctor_core::{RemediationOutcome, Result};
use std::sync::Arc;

/// Points the user at the install command for missing compiler tooling.
/// Nothing is installed automatically.
#[derive(Debug, Default)]
pub struct BuildToolSuggestion;

#[async_trait]
impl RemediationProcedure for BuildToolSuggestion {
    fn name(&self) -> &'static str {
        "build-tool-suggestion"
    }

    async fn remediate(&self, ctx: &RemediationContext) -> Result<Vec<Arc<RemediationOutcome>>> {
        let outcome = match build_tools_install_command(ctx).await {
            Some(command) => ctx
                .succeeded(format!("To install required build tools, run: {command}"))
                .with_fixed_step("build-tools-install-suggested"),
            None if ctx.host().is_windows() => ctx
                .failed("No supported package manager found. Install Visual Studio Build Tools manually from https://visualstudio.microsoft.com/visual-cpp-build-tools/")
                .with_failed_step("manual-install-required"),
            None => ctx
                .failed("No supported package manager found. Please install python3, make, and g++ manually.")
                .with_failed_step("unsupported-package-manager"),
        };
        Ok(vec![Arc::new(outcome)])
    }
}

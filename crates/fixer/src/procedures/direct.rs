use crate::procedure::{RemediationContext, RemediationProcedure};
use async_trait::async_trait;
use envdoctor_core::{Error, RemediationOutcome, Result};
use std::sync::Arc;

/// Runs the fix command carried by the issue itself
#[derive(Debug, Default)]
pub struct DirectCommand;

#[async_trait]
impl RemediationProcedure for DirectCommand {
    fn name(&self) -> &'static str {
        "direct-command"
    }

    async fn remediate(&self, ctx: &RemediationContext) -> Result<Vec<Arc<RemediationOutcome>>> {
        let command = ctx
            .issue
            .fix_command
            .as_deref()
            .ok_or_else(|| Error::remediation(ctx.issue_id(), "issue has no fix command"))?;

        let output = ctx.run_install(command).await?;
        let outcome = if output.success() {
            ctx.succeeded(format!("Ran `{command}`"))
                .with_fixed_step("fix-command-executed")
        } else {
            ctx.failed(format!(
                "Failed to execute fix command `{command}` (exit code {}): {}",
                output.exit_code,
                output.stderr.trim()
            ))
            .with_failed_step("fix-command-failed")
        };
        Ok(vec![Arc::new(outcome)])
    }
}

use super::steps::{clear_dependency_cache, reinstall, InstallOptions, PackageManager};
use crate::procedure::{RemediationContext, RemediationProcedure};
use async_trait::async_trait;
use envdoctor_core::{RemediationOutcome, Result};
use std::sync::Arc;

/// Clear the installed tree, then install again
pub(crate) async fn clear_and_reinstall(
    ctx: &RemediationContext,
    options: InstallOptions,
) -> Result<Vec<Arc<RemediationOutcome>>> {
    // Detect before cleanup removes package-lock.json
    let manager = PackageManager::detect(ctx.working_dir());

    let cleared = clear_dependency_cache(ctx);
    if !cleared.success {
        return Ok(vec![Arc::new(cleared)]);
    }
    let installed = reinstall(ctx, manager, options).await?;

    Ok(vec![Arc::new(cleared), Arc::new(installed)])
}

/// Fix for a missing, corrupt or drifted dependency tree
#[derive(Debug, Default)]
pub struct Reinstall;

#[async_trait]
impl RemediationProcedure for Reinstall {
    fn name(&self) -> &'static str {
        "reinstall"
    }

    async fn remediate(&self, ctx: &RemediationContext) -> Result<Vec<Arc<RemediationOutcome>>> {
        clear_and_reinstall(ctx, InstallOptions::default()).await
    }
}

/// Fix for optional dependencies built for the wrong platform
#[derive(Debug, Default)]
pub struct PlatformReinstall;

#[async_trait]
impl RemediationProcedure for PlatformReinstall {
    fn name(&self) -> &'static str {
        "platform-reinstall"
    }

    async fn remediate(&self, ctx: &RemediationContext) -> Result<Vec<Arc<RemediationOutcome>>> {
        clear_and_reinstall(ctx, InstallOptions::forced_without_optional()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::procedures::test_support::{context, touch};
    use envdoctor_exec::testing::ScriptedRunner;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_reinstall_clears_then_installs_with_detected_manager() {
        let temp_dir = TempDir::new().unwrap();
        touch(temp_dir.path(), "node_modules/left-pad/index.js");
        touch(temp_dir.path(), "package-lock.json");
        touch(temp_dir.path(), "yarn.lock");
        let runner = Arc::new(ScriptedRunner::new().on_success("yarn install", "done"));
        let ctx = context(temp_dir.path(), runner.clone(), "yarn-dependency-drift");

        let outcomes = Reinstall.remediate(&ctx).await.unwrap();

        assert_eq!(outcomes.len(), 2);
        assert!(outcomes[0].success);
        assert_eq!(
            outcomes[0].fixed_steps,
            vec!["node_modules-removed", "package-lock-removed"]
        );
        assert!(outcomes[1].success);
        assert_eq!(outcomes[1].issue_id, "yarn-dependency-drift");
        assert!(!temp_dir.path().join("node_modules").exists());
        assert!(temp_dir.path().join("yarn.lock").exists());
        assert_eq!(runner.call_count("yarn install"), 1);
    }

    #[tokio::test]
    async fn test_failed_install_is_failed_outcome() {
        let temp_dir = TempDir::new().unwrap();
        let runner = Arc::new(ScriptedRunner::new().on_failure("npm install", "ERESOLVE", 1));
        let ctx = context(temp_dir.path(), runner, "npm-dependency-drift");

        let outcomes = Reinstall.remediate(&ctx).await.unwrap();

        assert!(outcomes[0].success);
        assert!(outcomes[0].fixed_steps.is_empty());
        assert!(!outcomes[1].success);
        assert_eq!(outcomes[1].failed_steps, vec!["install-failed"]);
        assert!(outcomes[1].message.contains("ERESOLVE"));
    }

    #[tokio::test]
    async fn test_platform_reinstall_forces_and_skips_optional() {
        let temp_dir = TempDir::new().unwrap();
        touch(temp_dir.path(), "node_modules/fsevents/package.json");
        let runner = Arc::new(
            ScriptedRunner::new().on_success("npm install --force --omit=optional", "ok"),
        );
        let ctx = context(temp_dir.path(), runner.clone(), "fsevents-non-macos");

        let outcomes = PlatformReinstall.remediate(&ctx).await.unwrap();

        assert!(outcomes.iter().all(|o| o.success));
        assert_eq!(runner.call_count("npm install --force --omit=optional"), 1);
    }

    #[tokio::test]
    async fn test_spawn_failure_propagates() {
        let temp_dir = TempDir::new().unwrap();
        let runner = Arc::new(ScriptedRunner::new().on_spawn_failure("npm install", "no shell"));
        let ctx = context(temp_dir.path(), runner, "missing-node-modules");

        assert!(Reinstall.remediate(&ctx).await.is_err());
    }
}

use super::dependencies::clear_and_reinstall;
use super::steps::InstallOptions;
use crate::procedure::{RemediationContext, RemediationProcedure};
use async_trait::async_trait;
use envdoctor_core::{RemediationOutcome, Result, NVMRC_FILE};
use envdoctor_utils::fs::path_exists;
use std::sync::Arc;

/// Fix for Node or npm versions that do not match the project.
///
/// The installed tree is rebuilt for whatever toolchain is active, and the
/// final outcome tells the user how to switch to the required one.
#[derive(Debug, Default)]
pub struct ToolchainRealign;

impl ToolchainRealign {
    fn version_manager_hint(ctx: &RemediationContext) -> String {
        if ctx.issue_id().starts_with("npm-") {
            return "Upgrade npm with `npm install -g npm@latest`".to_string();
        }
        if ctx.host().is_windows() {
            return "Switch Node.js versions with nvm-windows: `nvm install lts && nvm use lts`"
                .to_string();
        }
        if path_exists(&ctx.project_path(NVMRC_FILE)) {
            "Switch to the version pinned in .nvmrc with `nvm install && nvm use`".to_string()
        } else {
            "Switch to a current LTS release with `nvm install --lts && nvm use --lts`".to_string()
        }
    }
}

#[async_trait]
impl RemediationProcedure for ToolchainRealign {
    fn name(&self) -> &'static str {
        "toolchain-realign"
    }

    async fn remediate(&self, ctx: &RemediationContext) -> Result<Vec<Arc<RemediationOutcome>>> {
        let mut outcomes = clear_and_reinstall(ctx, InstallOptions::default()).await?;
        outcomes.push(Arc::new(
            ctx.succeeded(Self::version_manager_hint(ctx))
                .with_fixed_step("version-manager-suggested"),
        ));
        Ok(outcomes)
    }
}

/// Advice for hosts with several Node.js binaries. The project is left as is.
#[derive(Debug, Default)]
pub struct InstallationConflictHint;

#[async_trait]
impl RemediationProcedure for InstallationConflictHint {
    fn name(&self) -> &'static str {
        "installation-conflict-hint"
    }

    async fn remediate(&self, ctx: &RemediationContext) -> Result<Vec<Arc<RemediationOutcome>>> {
        let hint = if ctx.host().is_windows() {
            "Keep a single Node.js install: remove the extra entries from PATH or manage versions with nvm-windows"
        } else {
            "Keep a single Node.js install: remove the extra entries from PATH or manage versions with nvm"
        };
        Ok(vec![Arc::new(
            ctx.succeeded(hint).with_fixed_step("path-cleanup-suggested"),
        )])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::procedures::test_support::{context, touch};
    use envdoctor_exec::testing::ScriptedRunner;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_reinstall_then_hint() {
        let temp_dir = TempDir::new().unwrap();
        touch(temp_dir.path(), ".nvmrc");
        let runner = Arc::new(ScriptedRunner::new().on_success("npm install", "ok"));
        let ctx = context(temp_dir.path(), runner, "node-version-mismatch");

        let outcomes = ToolchainRealign.remediate(&ctx).await.unwrap();

        assert_eq!(outcomes.len(), 3);
        assert!(outcomes.iter().all(|o| o.success));
        assert!(outcomes[2].message.contains(".nvmrc"));
    }

    #[tokio::test]
    async fn test_npm_issues_get_npm_hint() {
        let temp_dir = TempDir::new().unwrap();
        let runner = Arc::new(ScriptedRunner::new().on_success("npm install", "ok"));
        let ctx = context(temp_dir.path(), runner, "npm-version-outdated");

        let outcomes = ToolchainRealign.remediate(&ctx).await.unwrap();

        assert!(outcomes[2].message.contains("npm install -g npm@latest"));
    }

    #[tokio::test]
    async fn test_conflict_hint_leaves_project_alone() {
        let temp_dir = TempDir::new().unwrap();
        touch(temp_dir.path(), "node_modules/lodash/package.json");
        touch(temp_dir.path(), "package-lock.json");
        let runner = Arc::new(ScriptedRunner::new());
        let ctx = context(temp_dir.path(), runner.clone(), "multiple-node-installations");

        let outcomes = InstallationConflictHint.remediate(&ctx).await.unwrap();

        assert_eq!(outcomes.len(), 1);
        assert!(outcomes[0].success);
        assert_eq!(outcomes[0].fixed_steps, vec!["path-cleanup-suggested"]);
        assert!(temp_dir.path().join("node_modules/lodash/package.json").exists());
        assert!(temp_dir.path().join("package-lock.json").exists());
        assert_eq!(runner.total_calls(), 0);
    }
}

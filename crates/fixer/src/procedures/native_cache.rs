use super::steps::{clear_dependency_cache, clear_gyp_cache, reinstall, InstallOptions, PackageManager};
use crate::procedure::{RemediationContext, RemediationProcedure};
use async_trait::async_trait;
use envdoctor_core::{RemediationOutcome, Result};
use std::sync::Arc;

/// Fix for native addons built against another Node version
#[derive(Debug, Default)]
pub struct NativeCacheRebuild;

#[async_trait]
impl RemediationProcedure for NativeCacheRebuild {
    fn name(&self) -> &'static str {
        "native-cache-rebuild"
    }

    async fn remediate(&self, ctx: &RemediationContext) -> Result<Vec<Arc<RemediationOutcome>>> {
        let manager = PackageManager::detect(ctx.working_dir());

        let gyp = clear_gyp_cache(ctx).await;
        if !gyp.success {
            return Ok(vec![Arc::new(gyp)]);
        }
        let cleared = clear_dependency_cache(ctx);
        if !cleared.success {
            return Ok(vec![Arc::new(gyp), Arc::new(cleared)]);
        }
        let installed = reinstall(ctx, manager, InstallOptions::default()).await?;

        Ok(vec![Arc::new(gyp), Arc::new(cleared), Arc::new(installed)])
    }
}

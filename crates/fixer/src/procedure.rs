use async_trait::async_trait;
use envdoctor_core::{Issue, RemediationOutcome, Result};
use envdoctor_exec::{CommandOutput, CommandRunner};
use envdoctor_scanner::HostInfo;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

/// Settings shared by every remediation in a dispatch run
#[derive(Clone)]
pub struct RemediationSettings {
    pub working_dir: PathBuf,
    pub runner: Arc<dyn CommandRunner>,
    pub host: Arc<HostInfo>,
    /// Timeout for quick lookups such as `which brew`
    pub command_timeout: Duration,
    /// Timeout for package installs and fix commands
    pub install_timeout: Duration,
}

impl std::fmt::Debug for RemediationSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemediationSettings")
            .field("working_dir", &self.working_dir)
            .field("host", &self.host)
            .field("command_timeout", &self.command_timeout)
            .field("install_timeout", &self.install_timeout)
            .finish_non_exhaustive()
    }
}

/// Everything a procedure needs to remediate one issue
#[derive(Debug, Clone)]
pub struct RemediationContext {
    pub issue: Issue,
    pub settings: RemediationSettings,
}

impl RemediationContext {
    pub fn new(issue: Issue, settings: RemediationSettings) -> Self {
        Self { issue, settings }
    }

    pub fn issue_id(&self) -> &str {
        &self.issue.id
    }

    pub fn working_dir(&self) -> &Path {
        &self.settings.working_dir
    }

    pub fn host(&self) -> &HostInfo {
        &self.settings.host
    }

    /// Path inside the project directory
    pub fn project_path(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.settings.working_dir.join(relative)
    }

    /// Run a long-running command (install, fix command) in the project
    pub async fn run_install(&self, command: &str) -> Result<CommandOutput> {
        tracing::info!(command = %command, "running remediation command");
        self.settings
            .runner
            .run(command, Some(&self.settings.working_dir), self.settings.install_timeout)
            .await
    }

    /// Run a quick host lookup
    pub async fn run_lookup(&self, command: &str) -> Result<CommandOutput> {
        self.settings
            .runner
            .run(command, None, self.settings.command_timeout)
            .await
    }

    pub fn succeeded(&self, message: impl Into<String>) -> RemediationOutcome {
        RemediationOutcome::succeeded(self.issue_id(), message)
    }

    pub fn failed(&self, message: impl Into<String>) -> RemediationOutcome {
        RemediationOutcome::failed(self.issue_id(), message)
    }
}

/// A scripted remediation for one family of issues
///
/// Steps run sequentially. Each step reports its own outcome; an `Err` is
/// only returned when the procedure cannot continue at all.
#[async_trait]
pub trait RemediationProcedure: Send + Sync {
    fn name(&self) -> &'static str;

    async fn remediate(&self, ctx: &RemediationContext) -> Result<Vec<Arc<RemediationOutcome>>>;
}

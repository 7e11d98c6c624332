use crate::host::HostInfo;
use async_trait::async_trait;
use envdoctor_core::{EnvironmentInfo, Issue, Result};
use envdoctor_exec::{CommandMemoizer, MemoizedResult};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

/// What one probe found
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProbeReport {
    pub issues: Vec<Issue>,
    /// Only the system probe fills this in
    pub environment: Option<EnvironmentInfo>,
}

impl ProbeReport {
    pub fn issues(issues: Vec<Issue>) -> Self {
        Self {
            issues,
            environment: None,
        }
    }
}

/// Shared inputs for every probe in a scan
#[derive(Debug, Clone)]
pub struct ProbeContext {
    pub working_dir: PathBuf,
    pub memoizer: Arc<CommandMemoizer>,
    pub host: Arc<HostInfo>,
    pub command_timeout: Duration,
}

impl ProbeContext {
    pub fn new(
        working_dir: PathBuf,
        memoizer: Arc<CommandMemoizer>,
        host: Arc<HostInfo>,
        command_timeout: Duration,
    ) -> Self {
        Self {
            working_dir,
            memoizer,
            host,
            command_timeout,
        }
    }

    /// Path inside the project directory
    pub fn project_path(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.working_dir.join(relative)
    }

    /// Run a host-level command such as `node --version`
    pub async fn run(&self, command: &str) -> Result<Arc<MemoizedResult>> {
        self.memoizer
            .execute(command, None, self.command_timeout)
            .await
    }

    /// Run a command inside the project directory
    pub async fn run_in_project(&self, command: &str) -> Result<Arc<MemoizedResult>> {
        self.memoizer
            .execute(command, Some(&self.working_dir), self.command_timeout)
            .await
    }

    /// First line of a successful `--version` style command, `None` if the
    /// command failed
    pub async fn tool_version(&self, command: &str) -> Result<Option<String>> {
        let result = self.run(command).await?;
        if !result.success() {
            return Ok(None);
        }
        Ok(result
            .stdout
            .lines()
            .next()
            .map(|line| line.trim().to_string())
            .filter(|line| !line.is_empty()))
    }

    pub async fn node_version(&self) -> Result<Option<String>> {
        self.tool_version("node --version").await
    }

    pub async fn npm_version(&self) -> Result<Option<String>> {
        self.tool_version("npm --version").await
    }
}

/// One independent check of the host or the project
///
/// Probes only read. Whatever they cannot determine is reported as an issue
/// or left out; an `Err` is reserved for faults that stop the probe as a whole.
#[async_trait]
pub trait Probe: Send + Sync {
    /// Short name used in logs and in `<name>-probe-failed` issues
    fn name(&self) -> &'static str;

    async fn run(&self, ctx: &ProbeContext) -> Result<ProbeReport>;
}

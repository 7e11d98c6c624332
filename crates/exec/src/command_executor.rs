use async_trait::async_trait;
use envdoctor_core::{Error, Result, TIMEOUT_EXIT_CODE};
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

/// Captured result of running an external command.
///
/// A non-zero exit, a command missing from `PATH`, or a timeout are all
/// represented here as data; they are not errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// Output of a command that ran past its deadline and was killed
    pub fn timed_out(timeout: Duration) -> Self {
        Self {
            stdout: String::new(),
            stderr: format!("command timed out after {}ms", timeout.as_millis()),
            exit_code: TIMEOUT_EXIT_CODE,
        }
    }
}

/// Trait for executing external commands
///
/// Production code uses [`SystemCommandRunner`]; tests swap in
/// [`crate::testing::ScriptedRunner`].
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run a shell command line.
    ///
    /// Returns `Err` only when the command interpreter itself cannot be
    /// started.
    async fn run(&self, command: &str, cwd: Option<&Path>, timeout: Duration)
        -> Result<CommandOutput>;
}

/// Production implementation that executes real commands through the shell
#[derive(Debug, Default, Clone)]
pub struct SystemCommandRunner;

impl SystemCommandRunner {
    pub fn new() -> Self {
        Self
    }

    fn shell_command(command: &str) -> Command {
        #[cfg(windows)]
        {
            let mut cmd = Command::new("cmd");
            cmd.arg("/C").arg(command);
            cmd
        }
        #[cfg(not(windows))]
        {
            let mut cmd = Command::new("sh");
            cmd.arg("-c").arg(command);
            cmd
        }
    }
}

#[async_trait]
impl CommandRunner for SystemCommandRunner {
    async fn run(
        &self,
        command: &str,
        cwd: Option<&Path>,
        timeout: Duration,
    ) -> Result<CommandOutput> {
        let mut cmd = Self::shell_command(command);
        if let Some(dir) = cwd {
            cmd.current_dir(dir);
        }
        cmd.stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        tracing::trace!(command = %command, "spawning command");

        let child = cmd.spawn().map_err(|e| {
            Error::command_execution(command, format!("failed to spawn command interpreter: {e}"), None)
        })?;

        // Dropping the future on timeout drops the child, which kills it
        match tokio::time::timeout(timeout, child.wait_with_output()).await {
            Ok(Ok(output)) => Ok(CommandOutput {
                stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
                exit_code: output.status.code().unwrap_or(1),
            }),
            Ok(Err(e)) => Ok(CommandOutput {
                stdout: String::new(),
                stderr: format!("failed to collect command output: {e}"),
                exit_code: 1,
            }),
            Err(_) => {
                tracing::warn!(command = %command, timeout_ms = %timeout.as_millis(), "command timed out");
                Ok(CommandOutput::timed_out(timeout))
            }
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const TIMEOUT: Duration = Duration::from_secs(10);

    #[tokio::test]
    async fn test_captures_stdout_and_exit_code() {
        let runner = SystemCommandRunner::new();
        let output = runner.run("echo hello", None, TIMEOUT).await.unwrap();

        assert!(output.success());
        assert_eq!(output.stdout.trim(), "hello");
    }

    #[tokio::test]
    async fn test_non_zero_exit_is_data() {
        let runner = SystemCommandRunner::new();
        let output = runner
            .run("echo broken >&2; exit 3", None, TIMEOUT)
            .await
            .unwrap();

        assert_eq!(output.exit_code, 3);
        assert_eq!(output.stderr.trim(), "broken");
    }

    #[tokio::test]
    async fn test_missing_binary_is_data() {
        let runner = SystemCommandRunner::new();
        let output = runner
            .run("definitely-not-a-real-binary-envdoctor --version", None, TIMEOUT)
            .await
            .unwrap();

        assert!(!output.success());
        assert!(!output.stderr.is_empty());
    }

    #[tokio::test]
    async fn test_runs_in_working_directory() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("marker.txt"), "here").unwrap();

        let runner = SystemCommandRunner::new();
        let output = runner
            .run("cat marker.txt", Some(temp_dir.path()), TIMEOUT)
            .await
            .unwrap();

        assert_eq!(output.stdout, "here");
    }

    #[tokio::test]
    async fn test_timeout_becomes_failed_result() {
        let runner = SystemCommandRunner::new();
        let output = runner
            .run("sleep 5", None, Duration::from_millis(100))
            .await
            .unwrap();

        assert_eq!(output.exit_code, TIMEOUT_EXIT_CODE);
        assert!(output.stderr.contains("timed out"));
    }

    #[tokio::test]
    async fn test_missing_working_directory_is_spawn_error() {
        let runner = SystemCommandRunner::new();
        let result = runner
            .run("echo hi", Some(Path::new("/definitely/not/a/dir")), TIMEOUT)
            .await;

        assert!(matches!(result, Err(Error::CommandExecution { .. })));
    }
}

//! Scripted command runner for tests
//!
//! Probes and remediations are exercised against canned command output so
//! tests never depend on what is installed on the host.

use crate::command_executor::{CommandOutput, CommandRunner};
use async_trait::async_trait;
use envdoctor_core::{Error, Result, COMMAND_NOT_FOUND_EXIT_CODE};
use parking_lot::Mutex;
use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Exit code returned for commands that have no scripted response
pub const NOT_FOUND_EXIT_CODE: i32 = COMMAND_NOT_FOUND_EXIT_CODE;

#[derive(Debug, Clone)]
enum Scripted {
    Output(CommandOutput),
    SpawnFailure(String),
}

/// One recorded invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub command: String,
    pub cwd: Option<PathBuf>,
}

/// Command runner that replays scripted responses
///
/// Each command string has a queue of responses. Responses are consumed in
/// order; the last one repeats once the queue is down to a single entry.
/// Commands with no script behave like a binary missing from `PATH`.
#[derive(Debug, Default)]
pub struct ScriptedRunner {
    responses: Mutex<HashMap<String, VecDeque<Scripted>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script a successful command with the given stdout
    pub fn on_success(self, command: &str, stdout: &str) -> Self {
        self.on_output(command, stdout, "", 0)
    }

    /// Script a failing command with the given stderr and exit code
    pub fn on_failure(self, command: &str, stderr: &str, exit_code: i32) -> Self {
        self.on_output(command, "", stderr, exit_code)
    }

    pub fn on_output(self, command: &str, stdout: &str, stderr: &str, exit_code: i32) -> Self {
        self.push(
            command,
            Scripted::Output(CommandOutput {
                stdout: stdout.to_string(),
                stderr: stderr.to_string(),
                exit_code,
            }),
        );
        self
    }

    /// Script a command whose interpreter cannot be started
    pub fn on_spawn_failure(self, command: &str, message: &str) -> Self {
        self.push(command, Scripted::SpawnFailure(message.to_string()));
        self
    }

    fn push(&self, command: &str, response: Scripted) {
        self.responses
            .lock()
            .entry(command.to_string())
            .or_default()
            .push_back(response);
    }

    /// Every call made so far, in order
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().clone()
    }

    /// Number of times `command` was run
    pub fn call_count(&self, command: &str) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|call| call.command == command)
            .count()
    }

    /// Total number of calls across all commands
    pub fn total_calls(&self) -> usize {
        self.calls.lock().len()
    }

    fn next_response(&self, command: &str) -> Option<Scripted> {
        let mut responses = self.responses.lock();
        let queue = responses.get_mut(command)?;
        if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        }
    }
}

#[async_trait]
impl CommandRunner for ScriptedRunner {
    async fn run(
        &self,
        command: &str,
        cwd: Option<&Path>,
        _timeout: Duration,
    ) -> Result<CommandOutput> {
        self.calls.lock().push(RecordedCall {
            command: command.to_string(),
            cwd: cwd.map(Path::to_path_buf),
        });

        match self.next_response(command) {
            Some(Scripted::Output(output)) => Ok(output),
            Some(Scripted::SpawnFailure(message)) => {
                Err(Error::command_execution(command, message, None))
            }
            None => Ok(CommandOutput {
                stdout: String::new(),
                stderr: format!("{command}: command not found"),
                exit_code: NOT_FOUND_EXIT_CODE,
            }),
        }
    }
}

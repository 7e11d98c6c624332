use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// How urgently an issue needs attention. Ordered `Low < Medium < High < Critical`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Broad classification of a finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueKind {
    Error,
    Warning,
    Info,
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IssueKind::Error => f.write_str("error"),
            IssueKind::Warning => f.write_str("warning"),
            IssueKind::Info => f.write_str("info"),
        }
    }
}

/// A single detected environment problem.
///
/// The `id` is the issue's identity: probes reuse the same id for the same
/// condition, so collections can be de-duplicated and remediations looked up
/// by it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: IssueKind,
    pub message: String,
    pub severity: Severity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fix_command: Option<String>,
    pub fix_available: bool,
}

impl Issue {
    /// Create an issue with no fix available
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        kind: IssueKind,
        severity: Severity,
        message: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            message: message.into(),
            severity,
            file: None,
            fix_command: None,
            fix_available: false,
        }
    }

    #[must_use]
    pub fn error(id: impl Into<String>, severity: Severity, message: impl Into<String>) -> Self {
        Self::new(id, IssueKind::Error, severity, message)
    }

    #[must_use]
    pub fn warning(id: impl Into<String>, severity: Severity, message: impl Into<String>) -> Self {
        Self::new(id, IssueKind::Warning, severity, message)
    }

    /// Mark the issue as having an automated remediation
    #[must_use]
    pub fn with_fix(mut self) -> Self {
        self.fix_available = true;
        self
    }

    /// Attach the file the issue was found in
    #[must_use]
    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    /// Attach a shell command that fixes the issue directly
    #[must_use]
    pub fn with_fix_command(mut self, command: impl Into<String>) -> Self {
        self.fix_command = Some(command.into());
        self.fix_available = true;
        self
    }
}

/// Snapshot of the host and toolchain the scan ran against
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentInfo {
    pub node_version: String,
    pub npm_version: String,
    pub os: String,
    pub arch: String,
    pub shell: String,
    #[serde(rename = "isWSL")]
    pub is_wsl: bool,
    pub is_docker: bool,
    #[serde(rename = "isCI")]
    pub is_ci: bool,
    #[serde(default)]
    pub is_termux: bool,
}

impl Default for EnvironmentInfo {
    fn default() -> Self {
        Self {
            node_version: crate::UNKNOWN_VERSION.to_string(),
            npm_version: crate::UNKNOWN_VERSION.to_string(),
            os: std::env::consts::OS.to_string(),
            arch: std::env::consts::ARCH.to_string(),
            shell: crate::UNKNOWN_VERSION.to_string(),
            is_wsl: false,
            is_docker: false,
            is_ci: false,
            is_termux: false,
        }
    }
}

/// A follow-up recommendation derived from the issue set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    /// 0-100
    pub confidence: u8,
}

/// Everything one scan produced; this is what gets persisted between runs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanReport {
    pub timestamp: DateTime<Utc>,
    /// Project directory the scan ran against
    #[serde(default)]
    pub working_directory: PathBuf,
    pub environment: EnvironmentInfo,
    pub issues: Vec<Issue>,
    pub suggestions: Vec<Suggestion>,
}

/// Result of one remediation step (or of a whole single-step remediation)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemediationOutcome {
    pub issue_id: String,
    pub success: bool,
    pub message: String,
    pub fixed_steps: Vec<String>,
    pub failed_steps: Vec<String>,
}

impl RemediationOutcome {
    #[must_use]
    pub fn succeeded(issue_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            issue_id: issue_id.into(),
            success: true,
            message: message.into(),
            fixed_steps: Vec::new(),
            failed_steps: Vec::new(),
        }
    }

    #[must_use]
    pub fn failed(issue_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            issue_id: issue_id.into(),
            success: false,
            message: message.into(),
            fixed_steps: Vec::new(),
            failed_steps: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_fixed_step(mut self, step: impl Into<String>) -> Self {
        self.fixed_steps.push(step.into());
        self
    }

    #[must_use]
    pub fn with_failed_step(mut self, step: impl Into<String>) -> Self {
        self.failed_steps.push(step.into());
        self
    }
}

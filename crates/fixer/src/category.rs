use std::fmt;

/// Remediation family an issue identity belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IssueCategory {
    /// Installed tree missing, corrupt or out of sync with the lockfile
    MissingDependencies,
    /// Node or npm version does not match what the project needs
    ToolchainMismatch,
    /// More than one Node.js binary reachable on this host
    InstallationConflict,
    /// A compiler or build helper is not installed
    MissingBuildTool,
    /// An optional dependency built for another platform got installed
    WrongPlatformOptional,
    /// The node-gyp build cache was produced by another Node version
    NativeBuildCache,
}

impl IssueCategory {
    pub const ALL: [IssueCategory; 6] = [
        IssueCategory::MissingDependencies,
        IssueCategory::ToolchainMismatch,
        IssueCategory::InstallationConflict,
        IssueCategory::MissingBuildTool,
        IssueCategory::WrongPlatformOptional,
        IssueCategory::NativeBuildCache,
    ];

    /// Best-effort classification of identities missing from the table
    pub fn from_id_substring(id: &str) -> Option<Self> {
        if id.contains("dependency") || id.contains("node-modules") {
            Some(IssueCategory::MissingDependencies)
        } else if id.contains("node-gyp") {
            Some(IssueCategory::NativeBuildCache)
        } else if id.contains("build") || id.contains("tool") {
            Some(IssueCategory::MissingBuildTool)
        } else {
            None
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            IssueCategory::MissingDependencies => "missing-dependencies",
            IssueCategory::ToolchainMismatch => "toolchain-mismatch",
            IssueCategory::InstallationConflict => "installation-conflict",
            IssueCategory::MissingBuildTool => "missing-build-tool",
            IssueCategory::WrongPlatformOptional => "wrong-platform-optional",
            IssueCategory::NativeBuildCache => "native-build-cache",
        }
    }
}

impl fmt::Display for IssueCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How an issue will be remediated
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Procedure(IssueCategory),
    /// Run the issue's own fix command
    DirectCommand(String),
    Unrecognized,
}

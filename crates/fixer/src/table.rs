//! Immutable mapping from issue identities to remediation procedures

use crate::category::{IssueCategory, Resolution};
use crate::procedure::RemediationProcedure;
use crate::procedures::{standard_procedure, DirectCommand};
use envdoctor_core::Issue;
use std::collections::HashMap;
use std::sync::Arc;

/// Identities with a known remediation family
const STANDARD_IDENTITIES: &[(&str, IssueCategory)] = &[
    ("missing-node-modules", IssueCategory::MissingDependencies),
    ("corrupted-node-modules", IssueCategory::MissingDependencies),
    ("missing-lockfile", IssueCategory::MissingDependencies),
    ("npm-dependency-drift", IssueCategory::MissingDependencies),
    ("yarn-dependency-drift", IssueCategory::MissingDependencies),
    ("pnpm-dependency-drift", IssueCategory::MissingDependencies),
    ("node-version-mismatch", IssueCategory::ToolchainMismatch),
    ("node-engine-mismatch", IssueCategory::ToolchainMismatch),
    ("npm-engine-mismatch", IssueCategory::ToolchainMismatch),
    ("node-version-outdated", IssueCategory::ToolchainMismatch),
    ("npm-version-outdated", IssueCategory::ToolchainMismatch),
    ("multiple-node-installations", IssueCategory::InstallationConflict),
    ("missing-python3", IssueCategory::MissingBuildTool),
    ("missing-make", IssueCategory::MissingBuildTool),
    ("missing-g++", IssueCategory::MissingBuildTool),
    ("missing-vs-build-tools", IssueCategory::MissingBuildTool),
    ("fsevents-non-macos", IssueCategory::WrongPlatformOptional),
    ("rollup-android-arm64-issue", IssueCategory::WrongPlatformOptional),
    ("node-gyp-cache-issue", IssueCategory::NativeBuildCache),
    ("node-gyp-lockfile-error", IssueCategory::NativeBuildCache),
];

/// Lookup table consulted by the dispatcher
///
/// Built once and never mutated; share it behind an `Arc`.
pub struct RemediationTable {
    identities: HashMap<String, IssueCategory>,
    procedures: HashMap<IssueCategory, Arc<dyn RemediationProcedure>>,
    direct: Arc<dyn RemediationProcedure>,
}

impl std::fmt::Debug for RemediationTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemediationTable")
            .field("identities", &self.identities.len())
            .field("procedures", &self.procedures.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

impl Default for RemediationTable {
    fn default() -> Self {
        RemediationTableBuilder::standard().build()
    }
}

impl RemediationTable {
    pub fn standard() -> Self {
        Self::default()
    }

    /// Classify an issue.
    ///
    /// Exact identities come first, then the substring rules, then the
    /// issue's own fix command.
    pub fn resolve(&self, issue: &Issue) -> Resolution {
        if let Some(category) = self.identities.get(&issue.id) {
            return Resolution::Procedure(*category);
        }
        if let Some(category) = IssueCategory::from_id_substring(&issue.id) {
            return Resolution::Procedure(category);
        }
        match issue.fix_command.as_deref() {
            Some(command) if !command.trim().is_empty() => {
                Resolution::DirectCommand(command.to_string())
            }
            _ => Resolution::Unrecognized,
        }
    }

    /// The procedure that carries out a resolution
    pub fn procedure(&self, resolution: &Resolution) -> Option<Arc<dyn RemediationProcedure>> {
        match resolution {
            Resolution::Procedure(category) => self.procedures.get(category).cloned(),
            Resolution::DirectCommand(_) => Some(Arc::clone(&self.direct)),
            Resolution::Unrecognized => None,
        }
    }

    pub fn category_of(&self, id: &str) -> Option<IssueCategory> {
        self.identities.get(id).copied()
    }
}

/// Assembles a [`RemediationTable`]
pub struct RemediationTableBuilder {
    identities: HashMap<String, IssueCategory>,
    procedures: HashMap<IssueCategory, Arc<dyn RemediationProcedure>>,
    direct: Arc<dyn RemediationProcedure>,
}

impl RemediationTableBuilder {
    /// No identities and no category procedures
    pub fn empty() -> Self {
        Self {
            identities: HashMap::new(),
            procedures: HashMap::new(),
            direct: Arc::new(DirectCommand),
        }
    }

    /// The built-in identities and procedures
    pub fn standard() -> Self {
        let mut builder = Self::empty();
        for (id, category) in STANDARD_IDENTITIES {
            builder = builder.identity(*id, *category);
        }
        for category in IssueCategory::ALL {
            builder = builder.procedure(category, standard_procedure(category));
        }
        builder
    }

    pub fn identity(mut self, id: impl Into<String>, category: IssueCategory) -> Self {
        self.identities.insert(id.into(), category);
        self
    }

    pub fn procedure(
        mut self,
        category: IssueCategory,
        procedure: Arc<dyn RemediationProcedure>,
    ) -> Self {
        self.procedures.insert(category, procedure);
        self
    }

    pub fn direct_procedure(mut self, procedure: Arc<dyn RemediationProcedure>) -> Self {
        self.direct = procedure;
        self
    }

    pub fn build(self) -> RemediationTable {
        RemediationTable {
            identities: self.identities,
            procedures: self.procedures,
            direct: self.direct,
        }
    }
}

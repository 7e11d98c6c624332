//! Built-in remediation procedures, one per issue family

mod build_tools;
mod dependencies;
mod direct;
mod native_cache;
pub mod steps;
mod toolchain;

pub use build_tools::BuildToolSuggestion;
pub use dependencies::{PlatformReinstall, Reinstall};
pub use direct::DirectCommand;
pub use native_cache::NativeCacheRebuild;
pub use toolchain::{InstallationConflictHint, ToolchainRealign};

use crate::category::IssueCategory;
use crate::procedure::RemediationProcedure;
use std::sync::Arc;

/// The procedure each category uses by default
pub fn standard_procedure(category: IssueCategory) -> Arc<dyn RemediationProcedure> {
    match category {
        IssueCategory::MissingDependencies => Arc::new(Reinstall),
        IssueCategory::ToolchainMismatch => Arc::new(ToolchainRealign),
        IssueCategory::InstallationConflict => Arc::new(InstallationConflictHint),
        IssueCategory::MissingBuildTool => Arc::new(BuildToolSuggestion),
        IssueCategory::WrongPlatformOptional => Arc::new(PlatformReinstall),
        IssueCategory::NativeBuildCache => Arc::new(NativeCacheRebuild),
    }
}

//! Remediation for envdoctor issues
//!
//! Issues are classified into remediation families through an immutable
//! [`RemediationTable`], then applied by the [`RemediationDispatcher`] in
//! severity order with at most one attempt per issue identity.

pub mod category;
pub mod dispatcher;
pub mod procedure;
pub mod procedures;
pub mod prompt;
pub mod table;

pub use category::{IssueCategory, Resolution};
pub use dispatcher::{DispatchReport, OutcomeGroup, RemediationDispatcher};
pub use procedure::{RemediationContext, RemediationProcedure, RemediationSettings};
pub use prompt::{confirm_fixes, AutoApprove, Prompter};
pub use table::{RemediationTable, RemediationTableBuilder};

//! Shared utilities for envdoctor
//!
//! Small helpers used across the workspace: logging setup, XDG state paths,
//! atomic file writes and the file-system checks probes and remediations rely
//! on.

pub mod atomic_file;
pub mod fs;
pub mod tracing;
pub mod xdg;

pub use atomic_file::*;
pub use xdg::*;

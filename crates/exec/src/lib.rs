//! External command execution for envdoctor
//!
//! This crate runs shell commands on behalf of probes and remediations and
//! memoizes probe results so repeated invocations inside a short window do not
//! spawn the same process again.

pub mod clock;
pub mod command_executor;
pub mod memoizer;
pub mod testing;

pub use clock::{Clock, ManualClock, SystemClock};
pub use command_executor::*;
pub use memoizer::{CommandKey, CommandMemoizer, MemoizedResult, MemoizerStats};

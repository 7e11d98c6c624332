//! Environment scanning for envdoctor
//!
//! A scan runs a fixed set of [`Probe`]s concurrently against the host and the
//! project directory, merges their findings in probe order, collapses
//! duplicate issue identities and derives follow-up suggestions.

pub mod aggregator;
pub mod dedupe;
pub mod host;
pub mod probe;
pub mod probes;
pub mod scanner;
pub mod suggestions;
pub mod version;

pub use aggregator::{Aggregation, ProbeAggregator};
pub use dedupe::dedupe;
pub use host::HostInfo;
pub use probe::{Probe, ProbeContext, ProbeReport};
pub use scanner::Scanner;
pub use suggestions::generate_suggestions;

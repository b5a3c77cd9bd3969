//! Run Monitoring Module
//!
//! Counters and timing collected while workflows execute.
//!
//! # Components
//!
//! - [`WorkflowStats`]: Per-workflow outcome counters
//! - [`RunSummary`]: One pass over the selected workflows
//! - [`WatchReport`]: Result of a cancelled watch loop

pub mod stats;

pub use stats::{RunSummary, WatchReport, WorkflowStats};

//! Workflow Execution Module
//!
//! Resolves workflow definitions into runnable processors and drives them,
//! either once or on a repeating watch interval.
//!
//! # Architecture
//!
//! - [`engine`]: Run orchestrator owning the shared caches
//! - [`processor`]: Dispatch on the workflow type tag
//! - [`copy`]: Source tree walk for "Copy" workflows
//! - [`cancel`]: Cooperative stop signal for the watch loop

pub mod cancel;
pub mod copy;
pub mod engine;
pub mod processor;

pub use cancel::CancelToken;
pub use copy::{discover, CopyWorkflow, DiscoveredEntry};
pub use engine::{run_once, watch, Transformer};
pub use processor::WorkflowProcessor;

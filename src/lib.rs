//! Transformer - Repository Tree Transformation Engine
//!
//! Copies a source directory tree into a destination tree, pushing every
//! entry through a configurable chain of transforms: regex selection,
//! modification-time skipping, path rewriting, and finally a write or a
//! symlink. Workflows run once or on a repeating watch interval.
//!
//! # Architecture
//!
//! - [`workflow`]: Configuration model, loading and validation
//! - [`transform`]: Transform steps and the chain that runs them
//! - [`execution`]: Workflow drivers and the run orchestrator
//! - [`cache`]: Regex and destination-directory caches shared across a run
//! - [`monitoring`]: Per-workflow counters and run summaries
//!
//! # Example
//!
//! ```rust,no_run
//! use transformer::{load_config, run_once};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("transformer.yaml")?;
//!     let summary = run_once(config)?;
//!     println!("{}", summary.report());
//!     Ok(())
//! }
//! ```

pub mod cache;
pub mod error;
pub mod execution;
pub mod monitoring;
pub mod transform;
pub mod workflow;

// Re-export commonly used types
pub use error::{Error, Result};
pub use execution::{run_once, watch, CancelToken, Transformer};
pub use monitoring::{RunSummary, WatchReport};
pub use workflow::{load_config, Config, TransformSpec, WorkflowDef};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = "Transformer";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_version() {
        assert!(!VERSION.is_empty());
        assert!(VERSION.contains('.'));
    }

    #[test]
    fn test_app_name() {
        assert_eq!(APP_NAME, "Transformer");
    }

    #[test]
    fn test_module_exports_workflow() {
        let wf = WorkflowDef::new("docs", "src", "dst").with_transform(TransformSpec::new("Read"));
        assert_eq!(wf.kind, "Copy");
        assert_eq!(wf.transforms.len(), 1);
    }

    #[test]
    fn test_empty_config_runs() {
        let summary = run_once(Config::default()).unwrap();
        assert!(summary.workflows.is_empty());
    }
}

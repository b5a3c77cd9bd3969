//! Transform Module
//!
//! The per-file pipeline: a [`TransformContext`] flows through a
//! [`Chain`] of [`Step`]s until one of them stops it or fails.
//!
//! - [`context`]: Per-file mutable state
//! - [`step`]: Step variants and the continue/stop contract
//! - [`select`]: Include/exclude filtering and [`LastMatch`]
//! - [`rename`]: Destination rewriting from captures
//! - [`file_ops`]: Read, ModTime, Write, Symlink and Ignore
//! - [`chain`]: Ordered step execution

pub mod chain;
pub mod context;
pub mod file_ops;
pub mod rename;
pub mod select;
pub mod step;

pub use chain::Chain;
pub use context::TransformContext;
pub use rename::RenameStep;
pub use select::{LastMatch, SelectStep};
pub use step::{Flow, Outcome, Step, StepEnv};

//! Workflow Definition Module
//!
//! Provides data structures and utilities for loading, parsing and
//! validating workflow configuration.
//!
//! # Structure
//!
//! - [`model`]: Configuration data structures (Config, WorkflowDef, TransformSpec)
//! - [`kind`]: Closed workflow and transform type sets
//! - [`parser`]: YAML/JSON loading
//! - [`validator`]: Load-time validation rules

pub mod kind;
pub mod model;
pub mod parser;
pub mod validator;

pub use kind::{TransformKind, WorkflowKind};
pub use model::{Config, TransformSpec, WorkflowDef};
pub use parser::{load_config, parse_config, ConfigFormat};
pub use validator::validate_config;

//! Error types for the transformer engine.
//!
//! Every failure aborts the smallest enclosing unit and propagates up:
//! a step failure aborts its chain, a chain failure aborts its workflow
//! and a workflow failure aborts the whole run.

use std::io;
use std::path::{Path, PathBuf};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Failed to read config file '{}': {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse config file '{}': {message}", path.display())]
    ConfigParse { path: PathBuf, message: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Workflow '{workflow}': unknown workflow type '{tag}'")]
    UnknownWorkflowType { workflow: String, tag: String },

    #[error("Workflow '{workflow}': unknown transform '{tag}'")]
    UnknownTransformType { workflow: String, tag: String },

    #[error("Path '{}' is not under root '{}'", path.display(), root.display())]
    OutsideRoot { path: PathBuf, root: PathBuf },

    #[error("Cannot resolve absolute path for '{}': {source}", path.display())]
    AbsolutePath {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("I/O error on '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("File system walk error: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Invalid pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Rename of '{}' has no preceding Select match", path.display())]
    MissingMatch { path: PathBuf },

    #[error("Cannot rename '{}': path is not valid UTF-8", path.display())]
    NonUtf8Path { path: PathBuf },
}

impl Error {
    /// Wraps an I/O error together with the path it happened on.
    pub fn io(path: impl AsRef<Path>, source: io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}

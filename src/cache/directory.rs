//! Destination directory cache.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use crate::error::{Error, Result};

/// Remembers which destination directories already exist.
///
/// Each directory is created at most once per run no matter how many files
/// land in it. New directories are owner-only (`0700`) on unix.
#[derive(Debug, Default)]
pub struct DirectoryCache {
    ensured: HashSet<PathBuf>,
    creations: usize,
}

impl DirectoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes sure the parent directory of `dest_path` exists.
    ///
    /// Returns `true` if this call issued the directory creation.
    pub fn ensure_parent(&mut self, dest_path: &Path) -> Result<bool> {
        let Some(dir) = dest_path.parent() else {
            return Ok(false);
        };

        if self.ensured.contains(dir) {
            return Ok(false);
        }

        create_private_dir(dir)?;
        self.creations += 1;
        debug!("Ensured directory: {}", dir.display());

        self.ensured.insert(dir.to_path_buf());
        Ok(true)
    }

    /// Returns true if `dir` has already been ensured during this run.
    pub fn contains(&self, dir: &Path) -> bool {
        self.ensured.contains(dir)
    }

    /// Number of directory creation calls issued so far.
    pub fn creations(&self) -> usize {
        self.creations
    }
}

fn create_private_dir(dir: &Path) -> Result<()> {
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o700);
    }

    builder.create(dir).map_err(|e| Error::io(dir, e))
}

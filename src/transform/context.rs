//! Per-file transform state.

use std::borrow::Cow;
use std::fs::Metadata;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Mutable state threaded through one chain execution.
///
/// A context is built for exactly one discovered entry and is never shared
/// across files or workflows.
#[derive(Debug)]
pub struct TransformContext {
    /// Absolute path of the source entry
    pub original_path: PathBuf,

    /// Path relative to the workflow's source root (`.` for the root itself)
    pub relative_path: PathBuf,

    /// Candidate destination, initially `dest_root/relative_path`
    pub output_path: PathBuf,

    /// File content, filled by Read and consumed by Write
    pub content: Vec<u8>,

    /// Source metadata as returned by `lstat`
    pub metadata: Metadata,
}

impl TransformContext {
    /// Builds the context for `path`, which must live under `src_root`.
    pub fn new(src_root: &Path, dest_root: &Path, path: &Path, metadata: Metadata) -> Result<Self> {
        let relative = path.strip_prefix(src_root).map_err(|_| Error::OutsideRoot {
            path: path.to_path_buf(),
            root: src_root.to_path_buf(),
        })?;

        let relative_path = if relative.as_os_str().is_empty() {
            PathBuf::from(".")
        } else {
            relative.to_path_buf()
        };

        Ok(Self {
            original_path: path.to_path_buf(),
            output_path: dest_root.join(&relative_path),
            relative_path,
            content: Vec::new(),
            metadata,
        })
    }

    /// The relative path as text, which is what patterns are matched against.
    pub fn relative_str(&self) -> Cow<'_, str> {
        self.relative_path.to_string_lossy()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_context_paths() {
        let temp_dir = tempdir().unwrap();
        let src = temp_dir.path().join("src");
        fs::create_dir_all(src.join("docs")).unwrap();
        let file = src.join("docs/a.md");
        fs::write(&file, "# a").unwrap();

        let meta = fs::symlink_metadata(&file).unwrap();
        let ctx = TransformContext::new(&src, Path::new("/out"), &file, meta).unwrap();

        assert_eq!(ctx.original_path, file);
        assert_eq!(ctx.relative_path, PathBuf::from("docs/a.md"));
        assert_eq!(ctx.output_path, PathBuf::from("/out/docs/a.md"));
        assert_eq!(ctx.relative_str(), "docs/a.md");
        assert!(ctx.content.is_empty());
    }

    #[test]
    fn test_context_for_root() {
        let temp_dir = tempdir().unwrap();
        let meta = fs::symlink_metadata(temp_dir.path()).unwrap();

        let ctx =
            TransformContext::new(temp_dir.path(), Path::new("/out"), temp_dir.path(), meta)
                .unwrap();

        assert_eq!(ctx.relative_path, PathBuf::from("."));
        assert!(ctx.metadata.is_dir());
    }

    #[test]
    fn test_context_outside_root() {
        let temp_dir = tempdir().unwrap();
        let meta = fs::symlink_metadata(temp_dir.path()).unwrap();

        let err = TransformContext::new(
            Path::new("/somewhere/else"),
            Path::new("/out"),
            temp_dir.path(),
            meta,
        )
        .unwrap_err();

        assert!(matches!(err, Error::OutsideRoot { .. }));
    }
}

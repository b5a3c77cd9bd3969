//! Destination rewriting from Select captures.

use std::path::{Component, Path, PathBuf};

use log::debug;

use super::context::TransformContext;
use super::select::LastMatch;
use super::step::Flow;
use crate::error::{Error, Result};

/// Rewrites the destination path with a `$n` group-substitution template.
#[derive(Debug, Clone)]
pub struct RenameStep {
    template: String,
    dest_root: PathBuf,
}

impl RenameStep {
    pub fn new(template: impl Into<String>, dest_root: impl Into<PathBuf>) -> Self {
        Self {
            template: template.into(),
            dest_root: dest_root.into(),
        }
    }

    /// Replaces every match of the last Select matcher in the relative path
    /// with the template and joins the result under the destination root.
    ///
    /// An empty template leaves the destination untouched. A non-empty
    /// template without a preceding Select fails with [`Error::MissingMatch`],
    /// and a relative path that is not UTF-8 fails with [`Error::NonUtf8Path`].
    pub fn process(&self, ctx: &mut TransformContext, last: Option<&LastMatch>) -> Result<Flow> {
        if self.template.is_empty() {
            return Ok(Flow::Continue);
        }

        let last = last.ok_or_else(|| Error::MissingMatch {
            path: ctx.original_path.clone(),
        })?;

        let relative = ctx.relative_path.to_str().ok_or_else(|| Error::NonUtf8Path {
            path: ctx.original_path.clone(),
        })?;
        let renamed = last.matcher().replace_all(relative, self.template.as_str());
        let dest_path = join_under(&self.dest_root, Path::new(renamed.as_ref()))?;

        debug!("Renaming {} to {}", relative, dest_path.display());
        ctx.output_path = dest_path;

        Ok(Flow::Continue)
    }
}

/// Joins `relative` under `root`, never leaving it.
///
/// Root and prefix components of `relative` are dropped and `.` and `..`
/// are resolved lexically. Climbing above `root` fails with
/// [`Error::OutsideRoot`].
fn join_under(root: &Path, relative: &Path) -> Result<PathBuf> {
    let mut parts: Vec<&std::ffi::OsStr> = Vec::new();

    for component in relative.components() {
        match component {
            Component::Normal(part) => parts.push(part),
            Component::ParentDir => {
                if parts.pop().is_none() {
                    return Err(Error::OutsideRoot {
                        path: relative.to_path_buf(),
                        root: root.to_path_buf(),
                    });
                }
            }
            Component::RootDir | Component::Prefix(_) | Component::CurDir => {}
        }
    }

    Ok(parts.iter().fold(root.to_path_buf(), |path, part| path.join(part)))
}

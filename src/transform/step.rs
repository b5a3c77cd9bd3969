//! Transform step variants and their continue/stop contract.

use super::context::TransformContext;
use super::file_ops;
use super::rename::RenameStep;
use super::select::{LastMatch, SelectStep};
use crate::cache::RunCaches;
use crate::error::{Error, Result};
use crate::workflow::{TransformKind, TransformSpec, WorkflowDef};

/// What a step tells the chain driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Run the next step
    Continue,
    /// End the chain for this entry
    Stop(Outcome),
}

/// How a chain ended for one entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Filtered out, skipped or not applicable (directories, fresh destinations)
    Stopped,
    /// Destination file written
    Written,
    /// Destination symlink created
    Linked,
    /// Every step continued; nothing terminal ran
    Completed,
}

/// Run-scoped resources lent to steps.
pub struct StepEnv<'a> {
    pub caches: &'a mut RunCaches,
    /// Write and Symlink log instead of touching the disk
    pub dry_run: bool,
}

impl<'a> StepEnv<'a> {
    pub fn new(caches: &'a mut RunCaches, dry_run: bool) -> Self {
        Self { caches, dry_run }
    }
}

/// One resolved transform step.
#[derive(Debug, Clone)]
pub enum Step {
    Ignore,
    Read,
    Select(SelectStep),
    ModTime,
    Rename(RenameStep),
    Write,
    Symlink,
}

impl Step {
    /// Resolves a transform spec into a step for the given workflow.
    pub fn from_spec(spec: &TransformSpec, wf: &WorkflowDef) -> Result<Self> {
        let kind: TransformKind = spec.kind.parse().map_err(|_| Error::UnknownTransformType {
            workflow: wf.name.clone(),
            tag: spec.kind.clone(),
        })?;

        Ok(match kind {
            TransformKind::Ignore => Self::Ignore,
            TransformKind::Read => Self::Read,
            TransformKind::Select => Self::Select(SelectStep::new(
                spec.include_regex.clone(),
                spec.exclude_regex.clone(),
            )),
            TransformKind::ModTime => Self::ModTime,
            TransformKind::Rename => Self::Rename(RenameStep::new(
                spec.rewrite_dest.clone(),
                wf.dest_repository.clone(),
            )),
            TransformKind::Write => Self::Write,
            TransformKind::Symlink => Self::Symlink,
        })
    }

    pub fn kind(&self) -> TransformKind {
        match self {
            Self::Ignore => TransformKind::Ignore,
            Self::Read => TransformKind::Read,
            Self::Select(_) => TransformKind::Select,
            Self::ModTime => TransformKind::ModTime,
            Self::Rename(_) => TransformKind::Rename,
            Self::Write => TransformKind::Write,
            Self::Symlink => TransformKind::Symlink,
        }
    }

    /// Runs the step against `ctx`.
    ///
    /// `last_match` carries the result of the most recent Select in the
    /// chain: Select replaces it, Rename reads it.
    pub fn process(
        &self,
        ctx: &mut TransformContext,
        env: &mut StepEnv<'_>,
        last_match: &mut Option<LastMatch>,
    ) -> Result<Flow> {
        match self {
            Self::Ignore => Ok(file_ops::ignore(ctx)),
            Self::Read => file_ops::read(ctx),
            Self::Select(select) => {
                let (flow, tested) = select.process(ctx, &mut env.caches.regexes)?;
                if tested.is_some() {
                    *last_match = tested;
                }
                Ok(flow)
            }
            Self::ModTime => Ok(file_ops::mod_time(ctx)),
            Self::Rename(rename) => rename.process(ctx, last_match.as_ref()),
            Self::Write => file_ops::write(ctx, env),
            Self::Symlink => Ok(file_ops::symlink(ctx, env)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_spec_resolves_every_kind() {
        let wf = WorkflowDef::new("wf", "src", "dst");

        for tag in ["Ignore", "Read", "Select", "ModTime", "Rename", "Write", "Symlink"] {
            let step = Step::from_spec(&TransformSpec::new(tag), &wf).unwrap();
            assert_eq!(step.kind().as_str(), tag);
        }
    }

    #[test]
    fn test_from_spec_unknown_kind() {
        let wf = WorkflowDef::new("wf", "src", "dst");
        let err = Step::from_spec(&TransformSpec::new("Zip"), &wf).unwrap_err();

        assert!(matches!(err, Error::UnknownTransformType { ref workflow, .. } if workflow == "wf"));
    }
}

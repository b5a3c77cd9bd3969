//! Copy Workflow Driver
//!
//! Walks a workflow's source tree and pushes every discovered entry,
//! directories included, through the workflow's chain.

use std::fs::Metadata;
use std::path::{Path, PathBuf};
use std::time::Instant;

use log::{debug, info};
use walkdir::WalkDir;

use crate::error::{Error, Result};
use crate::monitoring::WorkflowStats;
use crate::transform::{Chain, StepEnv, TransformContext};
use crate::workflow::WorkflowDef;

/// One filesystem entry found by the walk.
#[derive(Debug)]
pub struct DiscoveredEntry {
    pub path: PathBuf,
    /// `lstat` metadata; symlinks are not followed
    pub metadata: Metadata,
}

/// Walks `root` recursively, in file-name order, and collects every entry.
///
/// The root itself is the first entry. Collection completes before any
/// entry is processed, so destinations created under the source tree are
/// not picked up by the same pass.
pub fn discover(root: &Path) -> Result<Vec<DiscoveredEntry>> {
    WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .map(|entry| {
            let entry = entry?;
            let metadata = entry.metadata()?;
            Ok(DiscoveredEntry {
                path: entry.into_path(),
                metadata,
            })
        })
        .collect()
}

/// A resolved "Copy" workflow.
#[derive(Debug, Clone)]
pub struct CopyWorkflow {
    name: String,
    disabled: bool,
    src_root: PathBuf,
    dest_root: PathBuf,
    chain: Chain,
}

impl CopyWorkflow {
    /// Resolves the workflow's transforms into a chain.
    pub fn from_def(def: &WorkflowDef) -> Result<Self> {
        Ok(Self {
            name: def.name.clone(),
            disabled: def.disabled,
            src_root: def.src_repository.clone(),
            dest_root: def.dest_repository.clone(),
            chain: Chain::from_workflow(def)?,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Runs every discovered entry through the chain.
    ///
    /// A disabled workflow returns empty statistics without touching the
    /// filesystem. The first failure aborts the workflow.
    pub fn process(&self, env: &mut StepEnv<'_>) -> Result<WorkflowStats> {
        let mut stats = WorkflowStats::new(&self.name);

        if self.disabled {
            debug!("Skipping disabled workflow '{}'", self.name);
            return Ok(stats);
        }

        let started = Instant::now();
        let src_root = std::path::absolute(&self.src_root).map_err(|source| Error::AbsolutePath {
            path: self.src_root.clone(),
            source,
        })?;

        info!(
            "Running workflow '{}': {} -> {}",
            self.name,
            src_root.display(),
            self.dest_root.display()
        );

        let entries = discover(&src_root)?;
        debug!("Discovered {} entries under {}", entries.len(), src_root.display());

        for entry in entries {
            let mut ctx =
                TransformContext::new(&src_root, &self.dest_root, &entry.path, entry.metadata)?;
            let outcome = self.chain.run(&mut ctx, env)?;
            stats.record(outcome);
        }

        stats.elapsed = started.elapsed();
        info!(
            "Workflow '{}' finished: {} entries, {} written, {} linked",
            self.name, stats.entries, stats.written, stats.linked
        );

        Ok(stats)
    }
}

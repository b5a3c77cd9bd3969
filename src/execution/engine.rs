//! Run Orchestrator
//!
//! Drives workflows one at a time, in configured order:
//! - Run-once: every workflow, first failure aborts the run
//! - Watch: the workflows with a given name, repeated on a fixed interval
//!   until a [`CancelToken`] is cancelled
//!
//! The regex and directory caches live here and are shared by every
//! workflow and every watch cycle of one orchestrator.

use std::time::{Duration, Instant};

use log::{info, warn};

use super::cancel::CancelToken;
use super::processor::WorkflowProcessor;
use crate::cache::RunCaches;
use crate::error::Result;
use crate::monitoring::{RunSummary, WatchReport};
use crate::transform::StepEnv;
use crate::workflow::Config;

/// Workflow orchestrator.
///
/// # Example
///
/// ```rust,no_run
/// use transformer::execution::Transformer;
/// use transformer::load_config;
///
/// fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = load_config("transformer.yaml")?;
///     let mut transformer = Transformer::new(config);
///     let summary = transformer.run_once()?;
///     println!("{} files written", summary.total_written());
///     Ok(())
/// }
/// ```
pub struct Transformer {
    config: Config,
    caches: RunCaches,
    dry_run: bool,
}

impl Transformer {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            caches: RunCaches::new(),
            dry_run: false,
        }
    }

    /// Enables or disables dry run mode.
    pub fn set_dry_run(&mut self, dry_run: bool) {
        self.dry_run = dry_run;
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn caches(&self) -> &RunCaches {
        &self.caches
    }

    /// Runs every configured workflow once, in declared order.
    pub fn run_once(&mut self) -> Result<RunSummary> {
        self.run_selected(|_| true)
    }

    /// Runs the workflows named `name` every `period` until `cancel` fires.
    ///
    /// A cycle always runs to completion; cancellation is checked while
    /// sleeping between cycles. Any workflow failure ends the loop with
    /// that error.
    pub fn watch(
        &mut self,
        period: Duration,
        name: &str,
        cancel: &CancelToken,
    ) -> Result<WatchReport> {
        if self.config.workflows_named(name).next().is_none() {
            warn!("No workflow named '{}'; watch cycles will do nothing", name);
        }

        let mut report = WatchReport::default();

        loop {
            let summary = self.run_selected(|wf_name| wf_name == name)?;
            report.cycles += 1;
            report.last = Some(summary);

            if cancel.sleep(period) {
                info!("Watch stopped after {} cycles", report.cycles);
                return Ok(report);
            }
        }
    }

    fn run_selected(&mut self, select: impl Fn(&str) -> bool) -> Result<RunSummary> {
        let started = Instant::now();
        let mut summary = RunSummary::new();

        if self.dry_run {
            info!("Mode: DRY RUN (nothing will be written)");
        }

        for def in self.config.workflows.iter().filter(|wf| select(&wf.name)) {
            let processor = WorkflowProcessor::from_def(def)?;
            let mut env = StepEnv::new(&mut self.caches, self.dry_run);
            summary.push(processor.process(&mut env)?);
        }

        summary.elapsed = started.elapsed();
        if self.config.verbose {
            info!("Completed in {:?}", summary.elapsed);
        }

        Ok(summary)
    }
}

/// Runs every workflow in `config` once.
pub fn run_once(config: Config) -> Result<RunSummary> {
    Transformer::new(config).run_once()
}

/// Runs the workflows named `name` every `period_seconds`, forever.
///
/// Only returns on failure; use [`Transformer::watch`] with a
/// [`CancelToken`] for a loop that can be stopped.
pub fn watch(config: Config, period_seconds: u64, name: &str) -> Result<WatchReport> {
    Transformer::new(config).watch(Duration::from_secs(period_seconds), name, &CancelToken::new())
}

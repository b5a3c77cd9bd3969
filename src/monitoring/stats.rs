//! Run Statistics
//!
//! Counts how each discovered entry left its chain and how long each
//! workflow took, for the end-of-run report.

use std::time::Duration;

use chrono::{DateTime, Local};

use crate::transform::Outcome;

/// Counters for one workflow execution.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowStats {
    /// Name of the workflow
    pub name: String,
    /// Entries discovered by the walk (directories included)
    pub entries: usize,
    /// Files written
    pub written: usize,
    /// Symlinks created
    pub linked: usize,
    /// Entries stopped before any terminal step
    pub stopped: usize,
    /// Entries that ran through every step without a terminal one
    pub completed: usize,
    /// Wall-clock time spent
    pub elapsed: Duration,
}

impl WorkflowStats {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: 0,
            written: 0,
            linked: 0,
            stopped: 0,
            completed: 0,
            elapsed: Duration::ZERO,
        }
    }

    /// Records how one entry's chain ended.
    pub fn record(&mut self, outcome: Outcome) {
        self.entries += 1;
        match outcome {
            Outcome::Written => self.written += 1,
            Outcome::Linked => self.linked += 1,
            Outcome::Stopped => self.stopped += 1,
            Outcome::Completed => self.completed += 1,
        }
    }
}

/// Statistics for one pass over the selected workflows.
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// When the pass started
    pub started_at: DateTime<Local>,
    /// Per-workflow counters, in execution order
    pub workflows: Vec<WorkflowStats>,
    /// Total wall-clock time
    pub elapsed: Duration,
}

impl RunSummary {
    pub fn new() -> Self {
        Self {
            started_at: Local::now(),
            workflows: Vec::new(),
            elapsed: Duration::ZERO,
        }
    }

    pub fn push(&mut self, stats: WorkflowStats) {
        self.workflows.push(stats);
    }

    pub fn total_entries(&self) -> usize {
        self.workflows.iter().map(|wf| wf.entries).sum()
    }

    pub fn total_written(&self) -> usize {
        self.workflows.iter().map(|wf| wf.written).sum()
    }

    pub fn total_linked(&self) -> usize {
        self.workflows.iter().map(|wf| wf.linked).sum()
    }

    /// Renders a plain-text table of the run.
    pub fn report(&self) -> String {
        let mut output = format!(
            "\nRun started {}:\n\n",
            self.started_at.format("%Y-%m-%d %H:%M:%S")
        );

        let name_width = self
            .workflows
            .iter()
            .map(|wf| wf.name.len())
            .max()
            .unwrap_or(0)
            .max(8);

        output.push_str(&format!(
            "  {:<width$}  {:>7}  {:>7}  {:>6}  {:>7}  {:>10}\n",
            "workflow",
            "entries",
            "written",
            "linked",
            "stopped",
            "time",
            width = name_width
        ));

        for wf in &self.workflows {
            output.push_str(&format!(
                "  {:<width$}  {:>7}  {:>7}  {:>6}  {:>7}  {:>10}\n",
                wf.name,
                wf.entries,
                wf.written,
                wf.linked,
                wf.stopped,
                format!("{:.2?}", wf.elapsed),
                width = name_width
            ));
        }

        output.push_str(&format!("\nTotal: {:.2?}\n", self.elapsed));
        output
    }
}

impl Default for RunSummary {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of a cancelled watch loop.
#[derive(Debug, Clone, Default)]
pub struct WatchReport {
    /// Number of completed cycles
    pub cycles: usize,
    /// Summary of the final cycle
    pub last: Option<RunSummary>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_outcomes() {
        let mut stats = WorkflowStats::new("docs");
        stats.record(Outcome::Written);
        stats.record(Outcome::Written);
        stats.record(Outcome::Stopped);
        stats.record(Outcome::Linked);
        stats.record(Outcome::Completed);

        assert_eq!(stats.entries, 5);
        assert_eq!(stats.written, 2);
        assert_eq!(stats.stopped, 1);
        assert_eq!(stats.linked, 1);
        assert_eq!(stats.completed, 1);
    }

    #[test]
    fn test_summary_totals() {
        let mut summary = RunSummary::new();

        let mut a = WorkflowStats::new("a");
        a.record(Outcome::Written);
        let mut b = WorkflowStats::new("b");
        b.record(Outcome::Written);
        b.record(Outcome::Linked);

        summary.push(a);
        summary.push(b);

        assert_eq!(summary.total_entries(), 3);
        assert_eq!(summary.total_written(), 2);
        assert_eq!(summary.total_linked(), 1);
    }

    #[test]
    fn test_report_lists_workflows() {
        let mut summary = RunSummary::new();
        summary.push(WorkflowStats::new("documentation"));
        summary.push(WorkflowStats::new("assets"));

        let report = summary.report();
        assert!(report.contains("documentation"));
        assert!(report.contains("assets"));
        assert!(report.contains("Total:"));
    }

    #[test]
    fn test_empty_summary() {
        let summary = RunSummary::default();
        assert_eq!(summary.total_entries(), 0);
        assert!(summary.report().contains("workflow"));
    }
}

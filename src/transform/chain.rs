//! Chain driver: runs a workflow's ordered steps against one context.

use super::context::TransformContext;
use super::select::LastMatch;
use super::step::{Flow, Outcome, Step, StepEnv};
use crate::error::Result;
use crate::workflow::WorkflowDef;

/// A workflow's resolved, ordered step list.
#[derive(Debug, Clone, Default)]
pub struct Chain {
    steps: Vec<Step>,
}

impl Chain {
    pub fn new(steps: Vec<Step>) -> Self {
        Self { steps }
    }

    /// Resolves every transform of a workflow definition.
    pub fn from_workflow(wf: &WorkflowDef) -> Result<Self> {
        let steps = wf
            .transforms
            .iter()
            .map(|spec| Step::from_spec(spec, wf))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { steps })
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Runs the steps in order, stopping at the first `Stop` or error.
    pub fn run(&self, ctx: &mut TransformContext, env: &mut StepEnv<'_>) -> Result<Outcome> {
        let mut last_match: Option<LastMatch> = None;

        for step in &self.steps {
            if let Flow::Stop(outcome) = step.process(ctx, env, &mut last_match)? {
                return Ok(outcome);
            }
        }

        Ok(Outcome::Completed)
    }
}

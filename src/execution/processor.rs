//! Workflow type dispatch.

use super::copy::CopyWorkflow;
use crate::error::{Error, Result};
use crate::monitoring::WorkflowStats;
use crate::transform::StepEnv;
use crate::workflow::{WorkflowDef, WorkflowKind};

/// A workflow definition resolved to its concrete processor.
#[derive(Debug, Clone)]
pub enum WorkflowProcessor {
    Copy(CopyWorkflow),
}

impl WorkflowProcessor {
    /// Resolves the definition's type tag and transforms.
    pub fn from_def(def: &WorkflowDef) -> Result<Self> {
        match def.kind.parse::<WorkflowKind>() {
            Ok(WorkflowKind::Copy) => Ok(Self::Copy(CopyWorkflow::from_def(def)?)),
            Err(()) => Err(Error::UnknownWorkflowType {
                workflow: def.name.clone(),
                tag: def.kind.clone(),
            }),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Copy(wf) => wf.name(),
        }
    }

    pub fn process(&self, env: &mut StepEnv<'_>) -> Result<WorkflowStats> {
        match self {
            Self::Copy(wf) => wf.process(env),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflow::TransformSpec;

    #[test]
    fn test_resolves_copy() {
        let def = WorkflowDef::new("docs", "src", "dst").with_transform(TransformSpec::new("Read"));
        let processor = WorkflowProcessor::from_def(&def).unwrap();

        assert!(matches!(processor, WorkflowProcessor::Copy(_)));
        assert_eq!(processor.name(), "docs");
    }

    #[test]
    fn test_unknown_workflow_type() {
        let mut def = WorkflowDef::new("docs", "src", "dst");
        def.kind = "Sync".to_string();

        let err = WorkflowProcessor::from_def(&def).unwrap_err();
        assert!(matches!(err, Error::UnknownWorkflowType { ref tag, .. } if tag == "Sync"));
    }

    #[test]
    fn test_unknown_transform_in_workflow() {
        let def = WorkflowDef::new("docs", "src", "dst").with_transform(TransformSpec::new("Gzip"));

        let err = WorkflowProcessor::from_def(&def).unwrap_err();
        assert!(matches!(err, Error::UnknownTransformType { .. }));
    }
}

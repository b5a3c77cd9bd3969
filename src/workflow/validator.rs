//! Configuration Validation
//!
//! Runs once after parsing and before anything touches the filesystem:
//! - Type tag resolution (unknown workflow/transform types are fatal)
//! - Source roots must be set; an empty destination only warns
//! - Rename templates need an earlier Select to draw captures from
//! - Unreachable steps and shared workflow names are reported as warnings

use std::collections::HashSet;

use log::{debug, info, warn};

use super::kind::{TransformKind, WorkflowKind};
use super::model::{Config, WorkflowDef};
use crate::error::{Error, Result};

/// Validation problems that make a configuration unusable.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    EmptySourceRoot(String),
    RenameWithoutSelect { workflow: String, index: usize },
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptySourceRoot(wf) => write!(f, "Workflow '{}' has no src_repository", wf),
            Self::RenameWithoutSelect { workflow, index } => write!(
                f,
                "Workflow '{}': Rename at position {} has a rewrite_dest but no earlier Select with patterns",
                workflow, index
            ),
        }
    }
}

/// Resolves every type tag in a workflow.
///
/// Unknown tags are reported before any other problem so that a typo in
/// a tag never hides behind a secondary error.
fn check_type_tags(wf: &WorkflowDef) -> Result<()> {
    if wf.kind.parse::<WorkflowKind>().is_err() {
        return Err(Error::UnknownWorkflowType {
            workflow: wf.name.clone(),
            tag: wf.kind.clone(),
        });
    }

    for spec in &wf.transforms {
        if spec.kind.parse::<TransformKind>().is_err() {
            return Err(Error::UnknownTransformType {
                workflow: wf.name.clone(),
                tag: spec.kind.clone(),
            });
        }
    }

    Ok(())
}

/// Validates a single workflow whose tags already resolved.
fn validate_workflow(wf: &WorkflowDef) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if wf.src_repository.as_os_str().is_empty() {
        errors.push(ValidationError::EmptySourceRoot(wf.name.clone()));
    }

    if wf.dest_repository.as_os_str().is_empty() {
        warn!(
            "Workflow '{}' has no dest_repository; output goes under the current directory",
            wf.name
        );
    }

    let mut seen_select = false;
    let mut terminal_at: Option<usize> = None;

    for (index, spec) in wf.transforms.iter().enumerate() {
        let Ok(kind) = spec.kind.parse::<TransformKind>() else {
            continue;
        };

        if let Some(at) = terminal_at {
            warn!(
                "Workflow '{}': {} at position {} is unreachable after the terminal step at position {}",
                wf.name, kind, index, at
            );
        }

        match kind {
            TransformKind::Select if spec.has_patterns() => seen_select = true,
            TransformKind::Rename if !spec.rewrite_dest.is_empty() && !seen_select => {
                errors.push(ValidationError::RenameWithoutSelect {
                    workflow: wf.name.clone(),
                    index,
                });
            }
            _ => {}
        }

        if kind.is_terminal() && terminal_at.is_none() {
            terminal_at = Some(index);
        }
    }

    if wf.disabled {
        debug!("Workflow '{}' is disabled", wf.name);
    }

    errors
}

/// Validates the whole configuration.
///
/// Returns [`Error::UnknownWorkflowType`] or [`Error::UnknownTransformType`]
/// for the first unresolvable tag, otherwise collects all structural
/// problems into a single [`Error::InvalidConfig`].
pub fn validate_config(config: &Config) -> Result<()> {
    info!("Validating configuration with {} workflows", config.workflows.len());

    for wf in &config.workflows {
        check_type_tags(wf)?;
    }

    let mut seen_names: HashSet<&str> = HashSet::new();
    for wf in &config.workflows {
        if !seen_names.insert(wf.name.as_str()) {
            warn!(
                "Workflow name '{}' is used more than once; watch mode runs every match",
                wf.name
            );
        }
    }

    let all_errors: Vec<ValidationError> =
        config.workflows.iter().flat_map(validate_workflow).collect();

    if !all_errors.is_empty() {
        let error_messages: Vec<String> = all_errors.iter().map(|e| e.to_string()).collect();
        return Err(Error::InvalidConfig(error_messages.join("\n")));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflow::model::TransformSpec;

    fn copy_workflow() -> WorkflowDef {
        WorkflowDef::new("copy", "src", "dst")
            .with_transform(TransformSpec::new("Read"))
            .with_transform(TransformSpec::new("Write"))
    }

    #[test]
    fn test_valid_config() {
        let config = Config::from_workflows(vec![copy_workflow()]);
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_empty_config_is_valid() {
        assert!(validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn test_unknown_workflow_type() {
        let mut wf = copy_workflow();
        wf.kind = "Move".to_string();

        let err = validate_config(&Config::from_workflows(vec![wf])).unwrap_err();
        assert!(matches!(err, Error::UnknownWorkflowType { ref tag, .. } if tag == "Move"));
    }

    #[test]
    fn test_unknown_transform_type() {
        let wf = copy_workflow().with_transform(TransformSpec::new("Compress"));

        let err = validate_config(&Config::from_workflows(vec![wf])).unwrap_err();
        assert!(matches!(err, Error::UnknownTransformType { ref tag, .. } if tag == "Compress"));
    }

    #[test]
    fn test_unknown_tag_reported_before_structure() {
        let wf = WorkflowDef::new("broken", "", "").with_transform(TransformSpec::new("Nope"));

        let err = validate_config(&Config::from_workflows(vec![wf])).unwrap_err();
        assert!(matches!(err, Error::UnknownTransformType { .. }));
    }

    #[test]
    fn test_empty_source_root() {
        let wf = WorkflowDef::new("rootless", "", "out");
        let errors = validate_workflow(&wf);

        assert_eq!(errors, vec![ValidationError::EmptySourceRoot("rootless".to_string())]);
    }

    #[test]
    fn test_empty_destination_root_is_allowed() {
        let wf = WorkflowDef::new("here", "src", "");

        assert!(validate_workflow(&wf).is_empty());
        assert!(validate_config(&Config::from_workflows(vec![wf])).is_ok());
    }

    #[test]
    fn test_rename_without_select() {
        let wf = WorkflowDef::new("rename", "src", "dst")
            .with_transform(TransformSpec::new("Read"))
            .with_transform(TransformSpec::new("Rename").with_rewrite("$1.txt"))
            .with_transform(TransformSpec::new("Write"));

        let errors = validate_workflow(&wf);
        assert_eq!(
            errors,
            vec![ValidationError::RenameWithoutSelect {
                workflow: "rename".to_string(),
                index: 1
            }]
        );
    }

    #[test]
    fn test_rename_after_patternless_select() {
        let wf = WorkflowDef::new("rename", "src", "dst")
            .with_transform(TransformSpec::new("Select"))
            .with_transform(TransformSpec::new("Rename").with_rewrite("$1.txt"));

        assert_eq!(validate_workflow(&wf).len(), 1);
    }

    #[test]
    fn test_rename_after_select_ok() {
        let wf = WorkflowDef::new("rename", "src", "dst")
            .with_transform(TransformSpec::new("Select").with_include(r"^(.+)\.md$"))
            .with_transform(TransformSpec::new("Rename").with_rewrite("$1.txt"))
            .with_transform(TransformSpec::new("Write"));

        assert!(validate_workflow(&wf).is_empty());
    }

    #[test]
    fn test_rename_without_template_needs_no_select() {
        let wf = WorkflowDef::new("rename", "src", "dst")
            .with_transform(TransformSpec::new("Rename"))
            .with_transform(TransformSpec::new("Write"));

        assert!(validate_workflow(&wf).is_empty());
    }

    #[test]
    fn test_invalid_config_collects_messages() {
        let config = Config::from_workflows(vec![
            WorkflowDef::new("first", "", "dst"),
            WorkflowDef::new("second", "src", ""),
        ]);

        let err = validate_config(&config).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("'first' has no src_repository"));
        assert!(message.contains("'second' has no dest_repository"));
    }

    #[test]
    fn test_validation_error_display() {
        let err = ValidationError::EmptySourceRoot("docs".to_string());
        assert_eq!(err.to_string(), "Workflow 'docs' has no src_repository");

        let err = ValidationError::RenameWithoutSelect {
            workflow: "docs".to_string(),
            index: 3,
        };
        assert!(err.to_string().contains("position 3"));
    }
}

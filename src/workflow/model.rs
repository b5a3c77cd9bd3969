//! Configuration Data Model
//!
//! Strict `serde` models for the configuration file. Unrecognized fields
//! are rejected at load time.
//!
//! # Example YAML Format
//!
//! ```yaml
//! verbose: true
//! workflows:
//!   - type: Copy
//!     name: docs
//!     description: Sync markdown docs into the site tree
//!     src_repository: ./repo/docs
//!     dest_repository: ./site/content
//!     transforms:
//!       - type: Select
//!         include_regex:
//!           - '^(.+)\.md$'
//!       - type: ModTime
//!       - type: Read
//!       - type: Rename
//!         rewrite_dest: '$1/index.md'
//!       - type: Write
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Top level configuration: the ordered workflow list and verbosity flag.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Enables duration reporting and is OR-ed with the CLI `--verbose` flag
    #[serde(default)]
    pub verbose: bool,

    /// Workflows, executed in declared order
    #[serde(default)]
    pub workflows: Vec<WorkflowDef>,
}

impl Config {
    /// Creates a configuration from a list of workflows.
    pub fn from_workflows(workflows: Vec<WorkflowDef>) -> Self {
        Self {
            verbose: false,
            workflows,
        }
    }

    /// Returns every workflow whose name equals `name`, in list order.
    pub fn workflows_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a WorkflowDef> {
        self.workflows.iter().filter(move |wf| wf.name == name)
    }
}

/// One configured unit mapping a source tree to a destination tree.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct WorkflowDef {
    /// Workflow type tag (currently only "Copy")
    #[serde(rename = "type")]
    pub kind: String,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub disabled: bool,

    #[serde(default)]
    pub src_repository: PathBuf,

    #[serde(default)]
    pub dest_repository: PathBuf,

    /// Ordered per-file pipeline
    #[serde(default)]
    pub transforms: Vec<TransformSpec>,
}

impl WorkflowDef {
    /// Creates an enabled "Copy" workflow with no transforms.
    ///
    /// # Example
    ///
    /// ```
    /// use transformer::workflow::{TransformSpec, WorkflowDef};
    ///
    /// let wf = WorkflowDef::new("docs", "repo/docs", "site/docs")
    ///     .with_transform(TransformSpec::new("Read"))
    ///     .with_transform(TransformSpec::new("Write"));
    /// assert_eq!(wf.transforms.len(), 2);
    /// ```
    pub fn new(
        name: impl Into<String>,
        src: impl Into<PathBuf>,
        dest: impl Into<PathBuf>,
    ) -> Self {
        Self {
            kind: "Copy".to_string(),
            name: name.into(),
            description: String::new(),
            disabled: false,
            src_repository: src.into(),
            dest_repository: dest.into(),
            transforms: Vec::new(),
        }
    }

    /// Appends a transform to the pipeline.
    pub fn with_transform(mut self, transform: TransformSpec) -> Self {
        self.transforms.push(transform);
        self
    }

    /// Marks the workflow disabled.
    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }
}

/// One declarative step in a workflow's pipeline.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct TransformSpec {
    /// Transform type tag: Read, Write, Select, ModTime, Rename, Symlink or Ignore
    #[serde(rename = "type")]
    pub kind: String,

    #[serde(default)]
    pub include_regex: Vec<String>,

    #[serde(default)]
    pub exclude_regex: Vec<String>,

    /// Destination template using `$n` group substitution
    #[serde(default)]
    pub rewrite_dest: String,
}

impl TransformSpec {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            include_regex: Vec::new(),
            exclude_regex: Vec::new(),
            rewrite_dest: String::new(),
        }
    }

    pub fn with_include(mut self, pattern: impl Into<String>) -> Self {
        self.include_regex.push(pattern.into());
        self
    }

    pub fn with_exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclude_regex.push(pattern.into());
        self
    }

    pub fn with_rewrite(mut self, template: impl Into<String>) -> Self {
        self.rewrite_dest = template.into();
        self
    }

    /// Returns true if this spec carries at least one pattern.
    pub fn has_patterns(&self) -> bool {
        !self.include_regex.is_empty() || !self.exclude_regex.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workflow_builder() {
        let wf = WorkflowDef::new("copy", "src", "dst")
            .with_transform(TransformSpec::new("Read"))
            .with_transform(TransformSpec::new("Write"));

        assert_eq!(wf.kind, "Copy");
        assert_eq!(wf.name, "copy");
        assert!(!wf.disabled);
        assert_eq!(wf.src_repository, PathBuf::from("src"));
        assert_eq!(wf.transforms.len(), 2);
        assert_eq!(wf.transforms[1].kind, "Write");
    }

    #[test]
    fn test_transform_builder() {
        let spec = TransformSpec::new("Select")
            .with_include(r"\.md$")
            .with_exclude("^drafts/")
            .with_rewrite("$1");

        assert_eq!(spec.include_regex, vec![r"\.md$"]);
        assert_eq!(spec.exclude_regex, vec!["^drafts/"]);
        assert_eq!(spec.rewrite_dest, "$1");
        assert!(spec.has_patterns());
        assert!(!TransformSpec::new("Read").has_patterns());
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let yaml = "workflows:\n  - type: Copy\n    transforms:\n      - type: Read\n";
        let config: Config = serde_yaml::from_str(yaml).unwrap();

        assert!(!config.verbose);
        let wf = &config.workflows[0];
        assert_eq!(wf.name, "");
        assert!(!wf.disabled);
        assert!(wf.transforms[0].include_regex.is_empty());
        assert_eq!(wf.transforms[0].rewrite_dest, "");
    }

    #[test]
    fn test_unknown_field_rejected() {
        let yaml = "verbose: true\nworkflows: []\nparallel: 4\n";
        assert!(serde_yaml::from_str::<Config>(yaml).is_err());

        let yaml = "workflows:\n  - type: Copy\n    transforms:\n      - type: Read\n        pattern: x\n";
        assert!(serde_yaml::from_str::<Config>(yaml).is_err());
    }

    #[test]
    fn test_transform_type_required() {
        let yaml = "workflows:\n  - type: Copy\n    transforms:\n      - include_regex: ['x']\n";
        assert!(serde_yaml::from_str::<Config>(yaml).is_err());
    }

    #[test]
    fn test_workflows_named() {
        let config = Config::from_workflows(vec![
            WorkflowDef::new("a", "s1", "d1"),
            WorkflowDef::new("b", "s2", "d2"),
            WorkflowDef::new("a", "s3", "d3"),
        ]);

        let matches: Vec<_> = config.workflows_named("a").collect();
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[1].src_repository, PathBuf::from("s3"));
        assert_eq!(config.workflows_named("missing").count(), 0);
    }
}

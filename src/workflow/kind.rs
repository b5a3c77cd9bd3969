//! Type Tags
//!
//! Closed sets of workflow and transform types. Configuration files carry
//! these as strings; they are resolved here once, at load time.

use std::fmt;
use std::str::FromStr;

/// Supported workflow types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowKind {
    /// Walk a source tree and push each entry through the transform chain
    Copy,
}

impl FromStr for WorkflowKind {
    type Err = ();

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag {
            "Copy" => Ok(Self::Copy),
            _ => Err(()),
        }
    }
}

/// Supported transform types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformKind {
    Ignore,
    Read,
    Select,
    ModTime,
    Rename,
    Write,
    Symlink,
}

impl TransformKind {
    /// Returns true for steps that always end the chain.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Write | Self::Symlink)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ignore => "Ignore",
            Self::Read => "Read",
            Self::Select => "Select",
            Self::ModTime => "ModTime",
            Self::Rename => "Rename",
            Self::Write => "Write",
            Self::Symlink => "Symlink",
        }
    }
}

impl FromStr for TransformKind {
    type Err = ();

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag {
            "Ignore" => Ok(Self::Ignore),
            "Read" => Ok(Self::Read),
            "Select" => Ok(Self::Select),
            "ModTime" => Ok(Self::ModTime),
            "Rename" => Ok(Self::Rename),
            "Write" => Ok(Self::Write),
            "Symlink" => Ok(Self::Symlink),
            _ => Err(()),
        }
    }
}

impl fmt::Display for TransformKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transform_tags_roundtrip() {
        for tag in ["Ignore", "Read", "Select", "ModTime", "Rename", "Write", "Symlink"] {
            let kind: TransformKind = tag.parse().unwrap();
            assert_eq!(kind.to_string(), tag);
        }
    }

    #[test]
    fn test_tags_are_case_sensitive() {
        assert!("read".parse::<TransformKind>().is_err());
        assert!("copy".parse::<WorkflowKind>().is_err());
        assert_eq!("Copy".parse::<WorkflowKind>(), Ok(WorkflowKind::Copy));
    }

    #[test]
    fn test_terminal_kinds() {
        assert!(TransformKind::Write.is_terminal());
        assert!(TransformKind::Symlink.is_terminal());
        assert!(!TransformKind::Read.is_terminal());
        assert!(!TransformKind::Ignore.is_terminal());
    }
}

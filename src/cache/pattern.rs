//! Compiled pattern cache.

use std::collections::HashMap;
use std::sync::Arc;

use log::debug;
use regex::Regex;

use crate::error::{Error, Result};

/// Pattern string to compiled matcher, kept for the lifetime of a run.
///
/// Each distinct pattern is compiled at most once; later lookups hand out
/// the same `Arc<Regex>`.
#[derive(Debug, Default)]
pub struct RegexCache {
    compiled: HashMap<String, Arc<Regex>>,
}

impl RegexCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the compiled matcher for `pattern`, compiling it on first use.
    pub fn compile(&mut self, pattern: &str) -> Result<Arc<Regex>> {
        if let Some(regex) = self.compiled.get(pattern) {
            return Ok(Arc::clone(regex));
        }

        let regex = Regex::new(pattern).map_err(|source| Error::Pattern {
            pattern: pattern.to_string(),
            source,
        })?;
        debug!("Compiled pattern: {}", pattern);

        let regex = Arc::new(regex);
        self.compiled.insert(pattern.to_string(), Arc::clone(&regex));
        Ok(regex)
    }

    /// Number of distinct patterns compiled so far.
    pub fn len(&self) -> usize {
        self.compiled.len()
    }

    pub fn is_empty(&self) -> bool {
        self.compiled.is_empty()
    }
}

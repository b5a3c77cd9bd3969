//! Pattern selection and the match value it hands to later steps.

use std::sync::Arc;

use log::debug;
use regex::Regex;

use super::context::TransformContext;
use super::step::{Flow, Outcome};
use crate::cache::RegexCache;
use crate::error::Result;

/// Result of the last pattern a Select step tested.
///
/// `captures` is only present when that pattern actually matched the
/// relative path.
#[derive(Debug, Clone)]
pub struct LastMatch {
    matcher: Arc<Regex>,
    captures: Option<Vec<Option<String>>>,
}

impl LastMatch {
    fn evaluate(matcher: Arc<Regex>, text: &str) -> Self {
        let captures = matcher.captures(text).map(|caps| {
            caps.iter()
                .map(|group| group.map(|m| m.as_str().to_string()))
                .collect()
        });

        Self { matcher, captures }
    }

    pub fn matcher(&self) -> &Regex {
        &self.matcher
    }

    pub fn is_match(&self) -> bool {
        self.captures.is_some()
    }

    /// Capture group `index`, if the pattern matched and the group took part.
    pub fn group(&self, index: usize) -> Option<&str> {
        self.captures.as_ref()?.get(index)?.as_deref()
    }
}

/// Include/exclude filter over the relative path.
#[derive(Debug, Clone, Default)]
pub struct SelectStep {
    include: Vec<String>,
    exclude: Vec<String>,
}

impl SelectStep {
    pub fn new(include: Vec<String>, exclude: Vec<String>) -> Self {
        Self { include, exclude }
    }

    /// Applies the filter.
    ///
    /// Include patterns are tried first (first match wins), then exclude
    /// patterns. The returned [`LastMatch`] describes the last pattern
    /// tested and is `None` only when the step has no patterns at all.
    pub fn process(
        &self,
        ctx: &TransformContext,
        regexes: &mut RegexCache,
    ) -> Result<(Flow, Option<LastMatch>)> {
        let path = ctx.relative_str();
        let mut last = None;

        if !self.include.is_empty() && !match_any(&self.include, &path, regexes, &mut last)? {
            debug!("Not included: {}", path);
            return Ok((Flow::Stop(Outcome::Stopped), last));
        }

        if !self.exclude.is_empty() && match_any(&self.exclude, &path, regexes, &mut last)? {
            debug!("Excluded: {}", path);
            return Ok((Flow::Stop(Outcome::Stopped), last));
        }

        Ok((Flow::Continue, last))
    }
}

fn match_any(
    patterns: &[String],
    path: &str,
    regexes: &mut RegexCache,
    last: &mut Option<LastMatch>,
) -> Result<bool> {
    for pattern in patterns {
        let tested = LastMatch::evaluate(regexes.compile(pattern)?, path);
        let matched = tested.is_match();
        *last = Some(tested);

        if matched {
            return Ok(true);
        }
    }

    Ok(false)
}

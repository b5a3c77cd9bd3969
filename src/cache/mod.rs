//! Run-Scoped Caches
//!
//! Memoization shared by every workflow of a run. Both caches are owned
//! by the orchestrator and lent to transform steps by `&mut` reference;
//! they are never reset mid-run.
//!
//! - [`RegexCache`]: pattern string to compiled matcher
//! - [`DirectoryCache`]: destination directories already created

pub mod directory;
pub mod pattern;

pub use directory::DirectoryCache;
pub use pattern::RegexCache;

/// The caches owned by one run.
#[derive(Debug, Default)]
pub struct RunCaches {
    pub regexes: RegexCache,
    pub directories: DirectoryCache,
}

impl RunCaches {
    pub fn new() -> Self {
        Self::default()
    }
}

//! Versions: the (previous, current) pair reported by version tracking

use std::fmt;

/// Previous and current version observed across two application runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Versions {
    previous: i32,
    current: i32,
}

impl Versions {
    /// Create a version pair
    pub fn new(previous: i32, current: i32) -> Self {
        Self { previous, current }
    }

    /// A pair that reports no change
    pub fn unchanged(current: i32) -> Self {
        Self::new(current, current)
    }

    /// Version stored by the previous run
    pub fn previous(&self) -> i32 {
        self.previous
    }

    /// Version of the current run
    pub fn current(&self) -> i32 {
        self.current
    }

    /// True if the version went up since the previous run
    pub fn is_updated(&self) -> bool {
        self.previous < self.current
    }
}

impl fmt::Display for Versions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.previous, self.current)
    }
}

//! Wall-clock budget shared by one diff invocation and all of its sub-diffs.

use std::time::{Duration, Instant};

/// An absolute point in time after which bisection stops looking for a
/// minimal edit script.
///
/// A deadline is fixed when the top-level diff starts and is only ever read
/// afterwards; every sub-diff sees the same instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deadline {
    at: Option<Instant>,
}

impl Deadline {
    /// A deadline that never expires. Bisection always runs to completion.
    pub fn never() -> Self {
        Self { at: None }
    }

    /// A deadline at a fixed instant.
    pub fn at(instant: Instant) -> Self {
        Self { at: Some(instant) }
    }

    /// A deadline `budget` from now.
    ///
    /// Saturates to [`Deadline::never`] if the addition overflows.
    pub fn after(budget: Duration) -> Self {
        Self {
            at: Instant::now().checked_add(budget),
        }
    }

    /// The instant this deadline fires, if any.
    pub fn instant(&self) -> Option<Instant> {
        self.at
    }

    /// True once the deadline has passed.
    pub fn is_expired(&self) -> bool {
        match self.at {
            Some(at) => Instant::now() >= at,
            None => false,
        }
    }
}

impl Default for Deadline {
    fn default() -> Self {
        Self::never()
    }
}

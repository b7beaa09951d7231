//! Newtype wrappers and type aliases for domain concepts.
//!
//! Task identifiers get a newtype so they cannot be confused with times or
//! priorities. Plain quantities (times, priorities) stay type aliases.

use std::fmt;

use serde::Serialize;

/// Task identifier, unique within a catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TaskId(pub u32);

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Simulated time in abstract ticks.
pub type Time = u64;

/// Scheduling priority. Lower values are more eligible.
pub type Priority = i64;

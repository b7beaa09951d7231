//! First-come-first-served.

use super::SchedPolicy;

/// Runs tasks in arrival order, each to completion.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstComeFirstServed;

impl SchedPolicy for FirstComeFirstServed {
    fn name(&self) -> &'static str {
        "fcfs"
    }

    fn preemptive(&self) -> bool {
        false
    }
}

//! Shortest job first (non-preemptive).

use super::SchedPolicy;
use crate::task::TaskRuntime;
use crate::working_set::WorkingSet;

/// Keeps the ready queue sorted by duration; a started task is never
/// preempted, even by a shorter arrival.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShortestJobFirst;

impl SchedPolicy for ShortestJobFirst {
    fn name(&self) -> &'static str {
        "sjf"
    }

    fn preemptive(&self) -> bool {
        false
    }

    fn admit(&self, working: &mut WorkingSet, task: TaskRuntime) {
        // Equal durations stay in arrival order.
        let duration = task.duration_left;
        working.insert_before(task, |queued| queued.duration_left > duration);
    }
}

//! Round robin.

use super::SchedPolicy;
use crate::event::EventQueue;
use crate::task::TaskRuntime;
use crate::types::Time;
use crate::working_set::WorkingSet;

/// FIFO ready queue with per-task quanta. A preempted task rejoins the tail
/// behind anything that arrived while it ran. Every slice is its own record.
#[derive(Debug, Clone, Copy, Default)]
pub struct RoundRobin;

impl SchedPolicy for RoundRobin {
    fn name(&self) -> &'static str {
        "rr"
    }

    fn release_last(&self, working: &mut WorkingSet) {
        if let Some(id) = working.running() {
            working.move_to_back(id);
        }
        working.clear_running();
    }

    fn run_length(&self, task: &TaskRuntime, _now: Time, _events: &EventQueue) -> Time {
        assert!(task.quantum > 0, "task {} has a zero quantum", task.id);
        task.duration_left.min(task.quantum)
    }
}

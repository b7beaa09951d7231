//! Dynamic priority with aging.

use super::SchedPolicy;
use crate::event::EventQueue;
use crate::plan::{ExecutionRecord, Plan};
use crate::task::TaskRuntime;
use crate::types::{Priority, TaskId, Time};
use crate::working_set::WorkingSet;

/// Added to a task's priority value each time it is given a slice.
pub const RUN_PENALTY: Priority = 3;

/// Taken off every waiting task's priority value at each decision point.
pub const AGING_STEP: Priority = 1;

/// Runs the task with the lowest priority value for at most one quantum.
///
/// Running makes a task less eligible (its value grows by [`RUN_PENALTY`]),
/// waiting makes it more eligible (its value shrinks by [`AGING_STEP`] per
/// decision point, never below zero).
#[derive(Debug, Clone, Copy, Default)]
pub struct DynamicPriority;

impl SchedPolicy for DynamicPriority {
    fn name(&self) -> &'static str {
        "priority"
    }

    fn select_next(&self, working: &WorkingSet) -> Option<TaskId> {
        working.iter().min_by_key(|t| (t.priority, t.id)).map(|t| t.id)
    }

    fn run_length(&self, task: &TaskRuntime, _now: Time, _events: &EventQueue) -> Time {
        assert!(task.quantum > 0, "task {} has a zero quantum", task.id);
        task.duration_left.min(task.quantum)
    }

    fn record(&self, plan: &mut Plan, task: &mut TaskRuntime, start: Time, end: Time) {
        task.priority = task.priority.saturating_add(RUN_PENALTY);
        plan.push(ExecutionRecord::new(task.id, start, end, task.priority));
    }

    fn ages(&self) -> bool {
        true
    }

    fn age(&self, working: &mut WorkingSet) {
        working.age_waiting(AGING_STEP);
    }
}

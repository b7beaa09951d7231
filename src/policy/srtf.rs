//! Shortest remaining time first.

use super::SchedPolicy;
use crate::event::EventQueue;
use crate::plan::{ExecutionRecord, Plan};
use crate::task::TaskRuntime;
use crate::types::{TaskId, Time};
use crate::working_set::WorkingSet;

/// Runs the task with the least work left, reconsidering at every arrival.
///
/// Slices end at the next arrival so a newcomer can preempt on the instant
/// it shows up. When the same task keeps the processor across such a
/// boundary its slices are merged into one record.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShortestRemainingTimeFirst;

impl SchedPolicy for ShortestRemainingTimeFirst {
    fn name(&self) -> &'static str {
        "srtf"
    }

    fn select_next(&self, working: &WorkingSet) -> Option<TaskId> {
        // min_by_key keeps the first of equal elements.
        working.iter().min_by_key(|t| t.duration_left).map(|t| t.id)
    }

    fn run_length(&self, task: &TaskRuntime, now: Time, events: &EventQueue) -> Time {
        match events.next_arrival_at() {
            Some(at) => task.duration_left.min(at.saturating_sub(now)),
            None => task.duration_left,
        }
    }

    fn record(&self, plan: &mut Plan, task: &mut TaskRuntime, start: Time, end: Time) {
        if !plan.extend_last(task.id, start, end) {
            plan.push(ExecutionRecord::new(task.id, start, end, task.priority));
        }
    }
}

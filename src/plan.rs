//! Execution plan: the timeline a simulation produces.
//!
//! Every stretch of time a task spends on the processor is an
//! [`ExecutionRecord`]; records are kept in chronological order.

use serde::Serialize;

use crate::types::{Priority, TaskId, Time};

/// One contiguous run of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ExecutionRecord {
    pub task: TaskId,
    pub start_at: Time,
    pub end_at: Time,
    /// Task priority when the run was recorded.
    pub priority: Priority,
}

impl ExecutionRecord {
    pub fn new(task: TaskId, start_at: Time, end_at: Time, priority: Priority) -> Self {
        debug_assert!(start_at <= end_at);
        ExecutionRecord {
            task,
            start_at,
            end_at,
            priority,
        }
    }

    pub fn len(&self) -> Time {
        self.end_at - self.start_at
    }

    pub fn is_empty(&self) -> bool {
        self.start_at == self.end_at
    }
}

/// Chronological sequence of execution records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Plan {
    records: Vec<ExecutionRecord>,
}

impl Plan {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, record: ExecutionRecord) {
        debug_assert!(
            self.records
                .last()
                .map_or(true, |last| last.end_at <= record.start_at),
            "records must be appended in chronological order"
        );
        self.records.push(record);
    }

    /// Extend the last record to `end_at` if it belongs to `task` and ends
    /// exactly at `start_at`. Returns false when nothing was merged.
    pub(crate) fn extend_last(&mut self, task: TaskId, start_at: Time, end_at: Time) -> bool {
        match self.records.last_mut() {
            Some(last) if last.task == task && last.end_at == start_at => {
                last.end_at = end_at;
                true
            }
            _ => false,
        }
    }

    pub fn records(&self) -> &[ExecutionRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ExecutionRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Total processor time given to a task.
    pub fn total_runtime(&self, task: TaskId) -> Time {
        self.records
            .iter()
            .filter(|r| r.task == task)
            .map(ExecutionRecord::len)
            .sum()
    }

    /// Number of records belonging to a task.
    pub fn slice_count(&self, task: TaskId) -> usize {
        self.records.iter().filter(|r| r.task == task).count()
    }

    /// End of the last record, or 0 for an empty plan.
    pub fn makespan(&self) -> Time {
        self.records.last().map_or(0, |r| r.end_at)
    }
}

impl<'a> IntoIterator for &'a Plan {
    type Item = &'a ExecutionRecord;
    type IntoIter = std::slice::Iter<'a, ExecutionRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

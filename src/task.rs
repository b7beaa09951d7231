//! Task model for the simulator.
//!
//! A [`TaskDef`] is the immutable description handed in by the caller; a
//! [`TaskRuntime`] is the mutable state a task carries from arrival until it
//! finishes.

use serde::Serialize;

use crate::types::{Priority, TaskId, Time};

/// Definition of a task for catalog creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskDef {
    pub id: TaskId,
    /// When the task becomes ready.
    pub arrive_at: Time,
    /// Total processor time the task needs.
    pub duration: Time,
    pub priority: Priority,
    /// Slice bound for quantum-based policies.
    pub quantum: Time,
}

/// A task that has arrived and not yet finished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRuntime {
    pub id: TaskId,
    /// Remaining processor time. Only ever decreases.
    pub duration_left: Time,
    /// Current priority; dynamic-priority scheduling rewrites it.
    pub priority: Priority,
    pub quantum: Time,
}

impl TaskRuntime {
    /// Create the runtime state of a freshly arrived task.
    pub fn new(def: &TaskDef) -> Self {
        TaskRuntime {
            id: def.id,
            duration_left: def.duration,
            priority: def.priority,
            quantum: def.quantum,
        }
    }

    /// Charge `ran` ticks of processor time to the task.
    pub fn consume(&mut self, ran: Time) {
        assert!(
            ran <= self.duration_left,
            "task {} ran {ran} ticks with only {} left",
            self.id,
            self.duration_left
        );
        self.duration_left -= ran;
    }

    pub fn is_done(&self) -> bool {
        self.duration_left == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn def() -> TaskDef {
        TaskDef {
            id: TaskId(7),
            arrive_at: 3,
            duration: 5,
            priority: 2,
            quantum: 2,
        }
    }

    #[test]
    fn test_runtime_starts_from_definition() {
        let rt = TaskRuntime::new(&def());
        assert_eq!(rt.id, TaskId(7));
        assert_eq!(rt.duration_left, 5);
        assert_eq!(rt.priority, 2);
        assert_eq!(rt.quantum, 2);
        assert!(!rt.is_done());
    }

    #[test]
    fn test_consume_down_to_zero() {
        let mut rt = TaskRuntime::new(&def());
        rt.consume(2);
        assert_eq!(rt.duration_left, 3);
        rt.consume(3);
        assert!(rt.is_done());
    }

    #[test]
    #[should_panic(expected = "ran 6 ticks")]
    fn test_consume_past_remaining_panics() {
        let mut rt = TaskRuntime::new(&def());
        rt.consume(6);
    }
}

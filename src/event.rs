//! Pending-event queue.
//!
//! Events are ordered by timestamp; a monotonically increasing sequence
//! number breaks ties so that events registered earlier for the same instant
//! are dispatched first.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::types::{TaskId, Time};

/// A simulation event, ordered by timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub at: Time,
    /// Tiebreaker for events at the same time (lower = earlier).
    seq: u64,
    pub kind: EventKind,
}

impl Ord for Event {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.at
            .cmp(&other.at)
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

impl PartialOrd for Event {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// A task enters the working set.
    Arrival { task: TaskId },
    /// The running task's slice ends with work left.
    Interrupt,
    /// The running task's slice ends with no work left.
    Completion,
}

impl EventKind {
    /// Interrupts and completions are the instants where the engine picks
    /// the next task to run.
    pub fn is_decision(self) -> bool {
        matches!(self, EventKind::Interrupt | EventKind::Completion)
    }
}

/// Time-ordered queue of pending events.
#[derive(Debug, Default)]
pub struct EventQueue {
    heap: BinaryHeap<Reverse<Event>>,
    seq: u64,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an event. It fires after every event already registered for
    /// the same or an earlier time.
    pub fn schedule(&mut self, at: Time, kind: EventKind) {
        self.heap.push(Reverse(Event {
            at,
            seq: self.seq,
            kind,
        }));
        self.seq += 1;
    }

    /// Remove and return the earliest event.
    pub fn pop_earliest(&mut self) -> Option<Event> {
        self.heap.pop().map(|Reverse(event)| event)
    }

    /// Time of the earliest pending event.
    pub fn peek_time(&self) -> Option<Time> {
        self.heap.peek().map(|Reverse(event)| event.at)
    }

    /// Time of the earliest pending arrival.
    pub fn next_arrival_at(&self) -> Option<Time> {
        self.heap
            .iter()
            .filter(|Reverse(e)| matches!(e.kind, EventKind::Arrival { .. }))
            .map(|Reverse(e)| e.at)
            .min()
    }

    /// Whether an interrupt or completion is pending at exactly `at`.
    pub fn has_decision_at(&self, at: Time) -> bool {
        self.heap
            .iter()
            .any(|Reverse(e)| e.at == at && e.kind.is_decision())
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

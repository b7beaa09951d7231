//! Working set: tasks that have arrived and not yet finished.
//!
//! Runtime state is keyed by task id; a separate queue of ids carries the
//! ready-queue order policies select from. The running task is an id, never
//! a reference into the queue, so reordering or removal cannot leave it
//! dangling.

use std::collections::{BTreeMap, VecDeque};

use crate::task::TaskRuntime;
use crate::types::{Priority, TaskId};

#[derive(Debug, Default)]
pub struct WorkingSet {
    /// Ready-queue order of every task in the set, the running one included.
    order: VecDeque<TaskId>,
    tasks: BTreeMap<TaskId, TaskRuntime>,
    running: Option<TaskId>,
}

impl WorkingSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a task at the tail of the queue.
    ///
    /// # Panics
    /// Panics if a task with the same id is already present.
    pub fn push_back(&mut self, task: TaskRuntime) {
        let pos = self.order.len();
        self.insert_at(pos, task);
    }

    /// Insert a task before the first queued task for which `goes_before`
    /// returns true, or at the tail if there is none.
    pub fn insert_before<F>(&mut self, task: TaskRuntime, goes_before: F)
    where
        F: Fn(&TaskRuntime) -> bool,
    {
        let pos = self
            .order
            .iter()
            .position(|id| goes_before(&self.tasks[id]))
            .unwrap_or(self.order.len());
        self.insert_at(pos, task);
    }

    fn insert_at(&mut self, pos: usize, task: TaskRuntime) {
        let id = task.id;
        let dup = self.tasks.insert(id, task);
        assert!(dup.is_none(), "task {id} is already in the working set");
        self.order.insert(pos, id);
    }

    /// Remove a task, clearing the running marker if it pointed at it.
    pub fn remove(&mut self, id: TaskId) -> Option<TaskRuntime> {
        let task = self.tasks.remove(&id)?;
        self.order.retain(|&queued| queued != id);
        if self.running == Some(id) {
            self.running = None;
        }
        Some(task)
    }

    /// Move a task to the tail of the queue. Returns true if found.
    pub fn move_to_back(&mut self, id: TaskId) -> bool {
        match self.order.iter().position(|&queued| queued == id) {
            Some(pos) => {
                self.order.remove(pos);
                self.order.push_back(id);
                true
            }
            None => false,
        }
    }

    pub fn get(&self, id: TaskId) -> Option<&TaskRuntime> {
        self.tasks.get(&id)
    }

    pub fn get_mut(&mut self, id: TaskId) -> Option<&mut TaskRuntime> {
        self.tasks.get_mut(&id)
    }

    /// Id of the task at the head of the queue.
    pub fn head(&self) -> Option<TaskId> {
        self.order.front().copied()
    }

    /// Tasks in queue order.
    pub fn iter(&self) -> impl Iterator<Item = &TaskRuntime> + '_ {
        self.order.iter().map(|id| &self.tasks[id])
    }

    /// Ids in queue order.
    pub fn ids(&self) -> Vec<TaskId> {
        self.order.iter().copied().collect()
    }

    pub fn running(&self) -> Option<TaskId> {
        self.running
    }

    pub fn nothing_running(&self) -> bool {
        self.running.is_none()
    }

    /// Mark a task as the one occupying the processor.
    ///
    /// # Panics
    /// Panics if the task is not in the set.
    pub fn set_running(&mut self, id: TaskId) {
        assert!(
            self.tasks.contains_key(&id),
            "cannot run task {id}: not in the working set"
        );
        self.running = Some(id);
    }

    pub fn clear_running(&mut self) {
        self.running = None;
    }

    /// Lower the priority value of every waiting task by `step`, floored at
    /// zero. The running task is left untouched.
    pub fn age_waiting(&mut self, step: Priority) -> usize {
        let running = self.running;
        let mut aged = 0;
        for task in self.tasks.values_mut().filter(|t| Some(t.id) != running) {
            task.priority = task.priority.saturating_sub(step).max(0);
            aged += 1;
        }
        aged
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

//! Task catalog and builder API.

use std::collections::HashMap;

use crate::task::TaskDef;
use crate::types::{Priority, TaskId, Time};

/// The fixed set of tasks a simulation runs over, in arrival order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    tasks: Vec<TaskDef>,
    index: HashMap<TaskId, usize>,
}

/// Builder for constructing catalogs.
pub struct CatalogBuilder {
    tasks: Vec<TaskDef>,
    next_id: TaskId,
}

impl Catalog {
    /// Wrap tasks that are already ordered by arrival (ties in input order).
    ///
    /// # Panics
    /// Panics on duplicate ids or on tasks out of arrival order.
    pub fn new(tasks: Vec<TaskDef>) -> Self {
        let mut index = HashMap::with_capacity(tasks.len());
        for (pos, def) in tasks.iter().enumerate() {
            let dup = index.insert(def.id, pos);
            assert!(dup.is_none(), "duplicate task id {}", def.id);
        }
        assert!(
            tasks.windows(2).all(|w| w[0].arrive_at <= w[1].arrive_at),
            "catalog tasks must be ordered by arrival"
        );
        Catalog { tasks, index }
    }

    pub fn builder() -> CatalogBuilder {
        CatalogBuilder {
            tasks: Vec::new(),
            next_id: TaskId(1),
        }
    }

    /// Look up a task by id.
    pub fn get(&self, id: TaskId) -> Option<&TaskDef> {
        self.index.get(&id).map(|&pos| &self.tasks[pos])
    }

    /// All tasks in arrival order.
    pub fn tasks(&self) -> &[TaskDef] {
        &self.tasks
    }

    /// Latest instant any schedule can still be busy: the makespan of a
    /// processor that never idles while work is waiting. `None` when that
    /// instant does not fit in [`Time`].
    pub fn horizon(&self) -> Option<Time> {
        self.tasks.iter().try_fold(0 as Time, |busy_until, def| {
            busy_until.max(def.arrive_at).checked_add(def.duration)
        })
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

impl CatalogBuilder {
    /// Add a task with a full TaskDef.
    pub fn task(mut self, def: TaskDef) -> Self {
        self.next_id = TaskId(def.id.0 + 1);
        self.tasks.push(def);
        self
    }

    /// Convenience: add a task with auto-assigned id.
    pub fn add_task(
        mut self,
        arrive_at: Time,
        duration: Time,
        priority: Priority,
        quantum: Time,
    ) -> Self {
        let id = self.next_id;
        self.next_id = TaskId(id.0 + 1);
        self.tasks.push(TaskDef {
            id,
            arrive_at,
            duration,
            priority,
            quantum,
        });
        self
    }

    /// Build the catalog, ordering tasks by arrival. Tasks arriving at the
    /// same instant keep the order they were added in.
    pub fn build(mut self) -> Catalog {
        self.tasks.sort_by_key(|def| def.arrive_at);
        Catalog::new(self.tasks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_assigns_ids_and_sorts_stably() {
        let catalog = Catalog::builder()
            .add_task(4, 1, 0, 1)
            .add_task(0, 2, 0, 1)
            .add_task(4, 3, 0, 1)
            .build();

        let order: Vec<u32> = catalog.tasks().iter().map(|t| t.id.0).collect();
        assert_eq!(order, vec![2, 1, 3]);
        assert_eq!(catalog.get(TaskId(3)).map(|t| t.duration), Some(3));
        assert!(catalog.get(TaskId(9)).is_none());
    }

    #[test]
    fn test_explicit_task_continues_numbering() {
        let catalog = Catalog::builder()
            .task(TaskDef {
                id: TaskId(10),
                arrive_at: 0,
                duration: 1,
                priority: 0,
                quantum: 1,
            })
            .add_task(1, 1, 0, 1)
            .build();
        assert!(catalog.get(TaskId(11)).is_some());
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn test_horizon_accounts_for_queueing_and_idle_gaps() {
        assert_eq!(Catalog::default().horizon(), Some(0));

        let catalog = Catalog::builder()
            .add_task(0, 4, 0, 1)
            .add_task(1, 3, 0, 1)
            .add_task(20, 2, 0, 1)
            .build();
        assert_eq!(catalog.horizon(), Some(22));

        let catalog = Catalog::builder()
            .add_task(Time::MAX - 5, 3, 0, 1)
            .add_task(Time::MAX - 5, 3, 0, 1)
            .build();
        assert_eq!(catalog.horizon(), None);
    }

    #[test]
    #[should_panic(expected = "duplicate task id")]
    fn test_duplicate_ids_rejected() {
        let def = TaskDef {
            id: TaskId(1),
            arrive_at: 0,
            duration: 1,
            priority: 0,
            quantum: 1,
        };
        Catalog::new(vec![def.clone(), def]);
    }
}

//! Per-task and whole-plan statistics.

use std::fmt;

use serde::Serialize;

use crate::catalog::Catalog;
use crate::plan::Plan;
use crate::types::{TaskId, Time};

/// Timing of one task over a plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskStats {
    pub id: TaskId,
    pub arrive_at: Time,
    pub first_run: Time,
    pub completed_at: Time,
    /// Completion minus arrival.
    pub turnaround: Time,
    /// Turnaround minus the task's own duration.
    pub waiting: Time,
    /// First run minus arrival.
    pub response: Time,
    pub slices: usize,
}

/// Summary of a whole plan.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanStats {
    pub tasks: Vec<TaskStats>,
    pub makespan: Time,
    /// Adjacent records that belong to different tasks.
    pub context_switches: usize,
    pub avg_turnaround: f64,
    pub avg_waiting: f64,
    pub avg_response: f64,
}

impl PlanStats {
    /// Tasks that never appear in the plan are skipped.
    pub fn compute(catalog: &Catalog, plan: &Plan) -> PlanStats {
        let mut tasks: Vec<TaskStats> = catalog
            .tasks()
            .iter()
            .filter_map(|def| {
                let mut records = plan.iter().filter(|r| r.task == def.id);
                let first = records.next()?;
                let completed_at = records.last().map_or(first.end_at, |r| r.end_at);
                let turnaround = completed_at - def.arrive_at;
                Some(TaskStats {
                    id: def.id,
                    arrive_at: def.arrive_at,
                    first_run: first.start_at,
                    completed_at,
                    turnaround,
                    waiting: turnaround.saturating_sub(def.duration),
                    response: first.start_at - def.arrive_at,
                    slices: plan.slice_count(def.id),
                })
            })
            .collect();
        tasks.sort_by_key(|t| t.id);

        let context_switches = plan
            .records()
            .windows(2)
            .filter(|w| w[0].task != w[1].task)
            .count();

        let avg = |f: fn(&TaskStats) -> Time| -> f64 {
            if tasks.is_empty() {
                0.0
            } else {
                tasks.iter().map(f).sum::<Time>() as f64 / tasks.len() as f64
            }
        };

        PlanStats {
            makespan: plan.makespan(),
            context_switches,
            avg_turnaround: avg(|t| t.turnaround),
            avg_waiting: avg(|t| t.waiting),
            avg_response: avg(|t| t.response),
            tasks,
        }
    }
}

impl fmt::Display for PlanStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:>6} {:>8} {:>8} {:>10} {:>8} {:>8} {:>6}",
            "task", "arrive", "done", "turnaround", "waiting", "response", "slices"
        )?;
        for t in &self.tasks {
            writeln!(
                f,
                "{:>6} {:>8} {:>8} {:>10} {:>8} {:>8} {:>6}",
                t.id.0, t.arrive_at, t.completed_at, t.turnaround, t.waiting, t.response, t.slices
            )?;
        }
        writeln!(
            f,
            "makespan={} switches={} avg_turnaround={:.2} avg_waiting={:.2} avg_response={:.2}",
            self.makespan,
            self.context_switches,
            self.avg_turnaround,
            self.avg_waiting,
            self.avg_response
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::Policy;

    #[test]
    fn test_round_robin_stats() {
        let catalog = Catalog::builder()
            .add_task(0, 5, 0, 2)
            .add_task(1, 4, 0, 2)
            .build();
        // 1:0-2, 2:2-4, 1:4-6, 2:6-8, 1:8-9
        let plan = Policy::RoundRobin.simulate(&catalog);
        let stats = PlanStats::compute(&catalog, &plan);

        assert_eq!(stats.makespan, 9);
        assert_eq!(stats.context_switches, 4);
        assert_eq!(
            stats.tasks[0],
            TaskStats {
                id: TaskId(1),
                arrive_at: 0,
                first_run: 0,
                completed_at: 9,
                turnaround: 9,
                waiting: 4,
                response: 0,
                slices: 3,
            }
        );
        assert_eq!(stats.tasks[1].turnaround, 7);
        assert_eq!(stats.tasks[1].waiting, 3);
        assert_eq!(stats.tasks[1].response, 1);
        assert!((stats.avg_turnaround - 8.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_plan() {
        let stats = PlanStats::compute(&Catalog::default(), &Plan::new());
        assert!(stats.tasks.is_empty());
        assert_eq!(stats.avg_waiting, 0.0);
    }
}

//! Scheduling policies.
//!
//! The engine drives every policy through the [`SchedPolicy`] hooks. The
//! defaults describe a FIFO ready queue whose head runs to completion; each
//! policy overrides only the hooks where it differs.

mod dynamic_priority;
mod fcfs;
mod round_robin;
mod sjf;
mod srtf;

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::catalog::Catalog;
use crate::engine::Simulator;
use crate::event::EventQueue;
use crate::plan::{ExecutionRecord, Plan};
use crate::task::TaskRuntime;
use crate::types::{TaskId, Time};
use crate::working_set::WorkingSet;

pub use dynamic_priority::{DynamicPriority, AGING_STEP, RUN_PENALTY};
pub use fcfs::FirstComeFirstServed;
pub use round_robin::RoundRobin;
pub use sjf::ShortestJobFirst;
pub use srtf::ShortestRemainingTimeFirst;

/// Scheduling policy hooks invoked by the engine.
pub trait SchedPolicy {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Whether a selected task may be stopped before it finishes. A
    /// non-preemptive policy always runs the selected task to completion and
    /// never consults `release_last`, `run_length` or `record`.
    fn preemptive(&self) -> bool {
        true
    }

    /// Place a newly arrived task in the working set.
    fn admit(&self, working: &mut WorkingSet, task: TaskRuntime) {
        working.push_back(task);
    }

    /// Deal with the task whose slice just ended, before the next selection.
    fn release_last(&self, working: &mut WorkingSet) {
        working.clear_running();
    }

    /// Choose the next task to run. Only called on a non-empty working set.
    fn select_next(&self, working: &WorkingSet) -> Option<TaskId> {
        working.head()
    }

    /// How long `task` may run from `now` before the next decision point.
    fn run_length(&self, task: &TaskRuntime, _now: Time, _events: &EventQueue) -> Time {
        task.duration_left
    }

    /// Write the slice `[start, end)` of `task` into the plan.
    fn record(&self, plan: &mut Plan, task: &mut TaskRuntime, start: Time, end: Time) {
        plan.push(ExecutionRecord::new(task.id, start, end, task.priority));
    }

    /// Whether waiting tasks age at decision points.
    fn ages(&self) -> bool {
        false
    }

    /// Apply one aging step to the waiting tasks.
    fn age(&self, _working: &mut WorkingSet) {}
}

/// Runtime policy selector, numbered as in the input format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Policy {
    Fcfs = 1,
    Sjf = 2,
    Srtf = 3,
    RoundRobin = 4,
    DynamicPriority = 5,
}

impl Policy {
    pub const ALL: [Policy; 5] = [
        Policy::Fcfs,
        Policy::Sjf,
        Policy::Srtf,
        Policy::RoundRobin,
        Policy::DynamicPriority,
    ];

    /// Numeric selector used by the input format.
    pub fn selector(self) -> u8 {
        self as u8
    }

    pub fn from_selector(selector: i64) -> Option<Policy> {
        Self::ALL
            .into_iter()
            .find(|p| i64::from(p.selector()) == selector)
    }

    /// Whether run lengths are bounded by the task quantum.
    pub fn uses_quantum(self) -> bool {
        matches!(self, Policy::RoundRobin | Policy::DynamicPriority)
    }

    pub fn name(self) -> &'static str {
        match self {
            Policy::Fcfs => "fcfs",
            Policy::Sjf => "sjf",
            Policy::Srtf => "srtf",
            Policy::RoundRobin => "rr",
            Policy::DynamicPriority => "priority",
        }
    }

    /// Simulate `catalog` under this policy.
    pub fn simulate(self, catalog: &Catalog) -> Plan {
        match self {
            Policy::Fcfs => Simulator::new(FirstComeFirstServed).run(catalog),
            Policy::Sjf => Simulator::new(ShortestJobFirst).run(catalog),
            Policy::Srtf => Simulator::new(ShortestRemainingTimeFirst).run(catalog),
            Policy::RoundRobin => Simulator::new(RoundRobin).run(catalog),
            Policy::DynamicPriority => Simulator::new(DynamicPriority).run(catalog),
        }
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Policy {
    type Err = String;

    /// Accepts the numeric selector or a policy name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(selector) = s.parse::<i64>() {
            return Policy::from_selector(selector)
                .ok_or_else(|| format!("unsupported policy selector {selector} (expected 1-5)"));
        }
        match s.to_ascii_lowercase().as_str() {
            "fcfs" => Ok(Policy::Fcfs),
            "sjf" => Ok(Policy::Sjf),
            "srtf" => Ok(Policy::Srtf),
            "rr" | "round-robin" => Ok(Policy::RoundRobin),
            "priority" | "dynamic-priority" => Ok(Policy::DynamicPriority),
            other => Err(format!(
                "unknown policy {other:?}; expected 1-5 or one of fcfs, sjf, srtf, rr, priority"
            )),
        }
    }
}

//! schedsim - Deterministic discrete-event simulator for CPU scheduling policies.
//!
//! Given a fixed set of tasks, the simulator produces the exact timeline of
//! which task holds the (single) processor at every moment under one of five
//! policies: first-come-first-served, shortest job first, shortest remaining
//! time first, round robin and dynamic priority.
//!
//! # Architecture
//!
//! - **Catalog**: the immutable task list, ordered by arrival
//! - **Events**: time-ordered queue of arrivals, interrupts and completions
//! - **Working set**: arrived-but-unfinished tasks and the running marker
//! - **Engine**: dispatch loop driving the policy hooks
//! - **Policies**: selection, run-length and recording rules per policy
//! - **Plan**: the resulting chronological execution records
//!
//! # Usage
//!
//! ```rust
//! use schedsim::*;
//!
//! let catalog = Catalog::builder()
//!     .add_task(0, 7, 0, 1)
//!     .add_task(2, 4, 0, 1)
//!     .build();
//!
//! let plan = Simulator::new(ShortestRemainingTimeFirst).run(&catalog);
//! assert_eq!(format_plan(&plan), "1/1/0/2/0\n2/2/2/6/0\n3/1/6/11/0\n");
//! ```

pub mod catalog;
pub mod engine;
pub mod event;
pub mod fmt;
pub mod input;
pub mod judge;
pub mod output;
pub mod plan;
pub mod policy;
pub mod stats;
pub mod task;
pub mod types;
pub mod working_set;

// Re-export the main public types for convenience.
pub use catalog::{Catalog, CatalogBuilder};
pub use engine::{sim_clock, Simulator};
pub use event::{Event, EventKind, EventQueue};
pub use fmt::{FmtTime, SimFormat};
pub use input::{parse_input, read_input, Input, ParseError};
pub use judge::{check_case, check_dir, CheckResult, CheckedCase};
pub use output::{format_plan, render_gantt, write_json, write_plan};
pub use plan::{ExecutionRecord, Plan};
pub use policy::{
    DynamicPriority, FirstComeFirstServed, Policy, RoundRobin, SchedPolicy, ShortestJobFirst,
    ShortestRemainingTimeFirst,
};
pub use stats::{PlanStats, TaskStats};
pub use task::{TaskDef, TaskRuntime};
pub use types::{Priority, TaskId, Time};
pub use working_set::WorkingSet;

#![allow(dead_code)]

use std::collections::BTreeMap;

use schedsim::{Catalog, Plan, Policy, Priority, SimFormat, TaskDef, TaskId, Time};

/// Initialize tracing from `RUST_LOG`.
///
/// `try_init()` is idempotent: first call in the process succeeds,
/// subsequent calls are silently ignored.
pub fn setup_test() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .event_format(SimFormat)
        .try_init();
}

/// Build a catalog from `(id, arrive_at, duration, priority, quantum)` rows.
pub fn catalog(rows: &[(u32, Time, Time, Priority, Time)]) -> Catalog {
    rows.iter()
        .fold(Catalog::builder(), |b, &(id, arrive_at, duration, priority, quantum)| {
            b.task(TaskDef {
                id: TaskId(id),
                arrive_at,
                duration,
                priority,
                quantum,
            })
        })
        .build()
}

/// `(task, start, end)` of every record.
pub fn spans(plan: &Plan) -> Vec<(u32, Time, Time)> {
    plan.iter().map(|r| (r.task.0, r.start_at, r.end_at)).collect()
}

/// `(task, start, end, priority)` of every record.
pub fn records(plan: &Plan) -> Vec<(u32, Time, Time, Priority)> {
    plan.iter()
        .map(|r| (r.task.0, r.start_at, r.end_at, r.priority))
        .collect()
}

/// Run `policy` over `catalog` and check the invariants every plan must
/// satisfy, regardless of policy.
pub fn simulate_checked(policy: Policy, catalog: &Catalog) -> Plan {
    setup_test();
    let plan = policy.simulate(catalog);
    assert_plan_invariants(policy, catalog, &plan);
    plan
}

pub fn assert_plan_invariants(policy: Policy, catalog: &Catalog, plan: &Plan) {
    // Every task gets exactly its duration.
    for def in catalog.tasks() {
        assert_eq!(
            plan.total_runtime(def.id),
            def.duration,
            "{policy}: task {} runtime",
            def.id
        );
        assert!(
            plan.slice_count(def.id) > 0,
            "{policy}: task {} never ran",
            def.id
        );
    }

    // Chronological, non-overlapping, never before arrival.
    for pair in plan.records().windows(2) {
        assert!(
            pair[0].end_at <= pair[1].start_at,
            "{policy}: {:?} overlaps {:?}",
            pair[0],
            pair[1]
        );
    }
    for r in plan {
        let def = catalog.get(r.task).expect("record for a known task");
        assert!(r.start_at >= def.arrive_at, "{policy}: {r:?} runs before arrival");
        assert!(
            r.start_at < r.end_at || def.duration == 0,
            "{policy}: empty record {r:?}"
        );
    }

    // Work conserving: the processor only idles when nothing is waiting.
    let completion: BTreeMap<TaskId, Time> =
        plan.iter().map(|r| (r.task, r.end_at)).collect();
    let mut prev_end = 0;
    for r in plan {
        if r.start_at > prev_end {
            for def in catalog.tasks() {
                if def.arrive_at < r.start_at {
                    assert!(
                        completion[&def.id] <= prev_end,
                        "{policy}: idle over [{prev_end}, {}) while task {} waited",
                        r.start_at,
                        def.id
                    );
                }
            }
        }
        prev_end = r.end_at;
    }
}

mod common;

use common::{catalog, records, simulate_checked};
use schedsim::{DynamicPriority, Policy, Simulator};

#[test]
fn test_penalty_and_aging() {
    let tasks = catalog(&[(1, 0, 4, 1, 2), (2, 1, 3, 2, 2)]);
    let plan = simulate_checked(Policy::DynamicPriority, &tasks);
    assert_eq!(
        records(&plan),
        vec![(1, 0, 2, 4), (2, 2, 4, 4), (1, 4, 6, 6), (2, 6, 7, 6)]
    );
}

#[test]
fn test_running_task_is_penalized_every_slice() {
    let tasks = catalog(&[(1, 0, 4, 0, 2)]);
    let plan = simulate_checked(Policy::DynamicPriority, &tasks);
    assert_eq!(records(&plan), vec![(1, 0, 2, 3), (1, 2, 4, 6)]);
}

#[test]
fn test_arrival_at_decision_instant_is_not_aged() {
    let tasks = catalog(&[(1, 0, 2, 0, 2), (2, 2, 2, 5, 2)]);
    let plan = simulate_checked(Policy::DynamicPriority, &tasks);
    assert_eq!(records(&plan), vec![(1, 0, 2, 3), (2, 2, 4, 8)]);
}

#[test]
fn test_aging_stops_at_zero() {
    let tasks = catalog(&[(1, 0, 4, 0, 2), (2, 1, 1, 0, 1)]);
    let plan = simulate_checked(Policy::DynamicPriority, &tasks);
    assert_eq!(
        records(&plan),
        vec![(1, 0, 2, 3), (2, 2, 3, 3), (1, 3, 5, 5)]
    );
}

#[test]
fn test_equal_priorities_break_by_id() {
    let tasks = catalog(&[(1, 0, 2, 9, 2), (2, 1, 1, 4, 1), (3, 1, 1, 4, 1)]);
    let plan = simulate_checked(Policy::DynamicPriority, &tasks);
    assert_eq!(
        records(&plan),
        vec![(1, 0, 2, 12), (2, 2, 3, 6), (3, 3, 4, 5)]
    );
}

#[test]
fn test_simulator_matches_policy_dispatch() {
    let tasks = catalog(&[(1, 0, 5, 2, 2), (2, 1, 3, 0, 1), (3, 4, 2, 1, 3)]);
    let via_enum = simulate_checked(Policy::DynamicPriority, &tasks);
    let direct = Simulator::new(DynamicPriority).run(&tasks);
    assert_eq!(via_enum, direct);
}

#[test]
fn test_extreme_priorities_saturate() {
    let tasks = catalog(&[(1, 0, 4, i64::MAX, 2)]);
    let plan = simulate_checked(Policy::DynamicPriority, &tasks);
    assert_eq!(
        records(&plan),
        vec![(1, 0, 2, i64::MAX), (1, 2, 4, i64::MAX)]
    );

    let tasks = catalog(&[(1, 0, 4, 0, 2), (2, 1, 1, i64::MIN, 1)]);
    let plan = simulate_checked(Policy::DynamicPriority, &tasks);
    assert_eq!(
        records(&plan),
        vec![(1, 0, 2, 3), (2, 2, 3, 3), (1, 3, 5, 5)]
    );
}

#[test]
fn test_parsed_extremes_simulate() {
    let input = schedsim::parse_input("5\n1/0/4/0/2\n2/1/1/-9223372036854775808/1\n").unwrap();
    let plan = simulate_checked(input.policy, &input.catalog);
    assert_eq!(plan.len(), 3);
}

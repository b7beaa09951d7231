//! Event-driven simulation engine.
//!
//! This is the core of the simulator. It seeds the event queue with one
//! arrival per task, then pops events in time order and drives the policy
//! hooks through arrival, interrupt and completion transitions until the
//! queue drains.
//!
//! Simultaneous events are resolved by registration order: arrivals are
//! registered up front, so every arrival at time `T` is admitted before an
//! interrupt or completion at `T` is decided. Policies that age waiting tasks
//! get one aging pass at `T`, run before any event at `T`, so tasks arriving
//! at `T` are never aged on the instant they arrive.

use std::cell::Cell;

use tracing::{debug, info, trace};

use crate::catalog::Catalog;
use crate::event::{Event, EventKind, EventQueue};
use crate::plan::{ExecutionRecord, Plan};
use crate::policy::SchedPolicy;
use crate::task::TaskRuntime;
use crate::types::{TaskId, Time};
use crate::working_set::WorkingSet;

thread_local! {
    static SIM_CLOCK: Cell<Time> = const { Cell::new(0) };
}

/// Simulated time of the event being handled on this thread.
///
/// Read by the log formatter; only meaningful while a run is in progress.
pub fn sim_clock() -> Time {
    SIM_CLOCK.with(|c| c.get())
}

/// Update the simulated clock thread-local. Called by the engine before it
/// logs so the formatter has access.
pub fn set_sim_clock(now: Time) {
    SIM_CLOCK.with(|c| c.set(now));
}

/// Mutable state of one run. Nothing survives between runs.
struct SimState<'a> {
    catalog: &'a Catalog,
    events: EventQueue,
    working: WorkingSet,
    plan: Plan,
    /// Timestamp of the last aging pass.
    aged_at: Option<Time>,
}

impl<'a> SimState<'a> {
    fn new(catalog: &'a Catalog) -> Self {
        SimState {
            catalog,
            events: EventQueue::new(),
            working: WorkingSet::new(),
            plan: Plan::new(),
            aged_at: None,
        }
    }
}

/// The main simulator.
#[derive(Debug, Clone, Default)]
pub struct Simulator<P: SchedPolicy> {
    policy: P,
}

impl<P: SchedPolicy> Simulator<P> {
    pub fn new(policy: P) -> Self {
        Simulator { policy }
    }

    /// Run the catalog to completion and return the plan.
    ///
    /// The catalog must be ordered by arrival; tasks arriving at the same
    /// instant are admitted in catalog order.
    ///
    /// # Panics
    /// Panics if the catalog's [`Catalog::horizon`] does not fit in [`Time`].
    pub fn run(&self, catalog: &Catalog) -> Plan {
        assert!(
            catalog.horizon().is_some(),
            "catalog work runs past the end of simulated time"
        );
        let mut state = SimState::new(catalog);

        for def in catalog.tasks() {
            state
                .events
                .schedule(def.arrive_at, EventKind::Arrival { task: def.id });
        }

        while let Some(event) = self.next_event(&mut state) {
            set_sim_clock(event.at);
            trace!(kind = ?event.kind, pending = state.events.len(), "event");

            match event.kind {
                EventKind::Arrival { task } => self.on_arrival(task, event.at, &mut state),
                EventKind::Interrupt => self.on_interrupt(event.at, &mut state),
                EventKind::Completion => self.on_completion(event.at, &mut state),
            }
        }

        assert!(
            state.working.is_empty(),
            "event queue drained with unfinished tasks {:?}",
            state.working.ids()
        );

        info!(
            policy = self.policy.name(),
            tasks = catalog.len(),
            records = state.plan.len(),
            makespan = state.plan.makespan(),
            "simulation complete"
        );
        state.plan
    }

    /// Pop the next event, running the aging pass first when the event's
    /// timestamp carries a decision that has not been aged for yet.
    fn next_event(&self, state: &mut SimState<'_>) -> Option<Event> {
        let at = state.events.peek_time()?;
        if self.policy.ages() && state.aged_at != Some(at) && state.events.has_decision_at(at) {
            set_sim_clock(at);
            self.policy.age(&mut state.working);
            state.aged_at = Some(at);
            debug!(waiting = state.working.len(), "aging");
        }
        state.events.pop_earliest()
    }

    fn on_arrival(&self, id: TaskId, now: Time, state: &mut SimState<'_>) {
        let def = state
            .catalog
            .get(id)
            .unwrap_or_else(|| panic!("arrival of task {id} missing from the catalog"));
        self.policy
            .admit(&mut state.working, TaskRuntime::new(def));
        debug!(task = id.0, ready = state.working.len(), "arrival");

        if state.working.nothing_running() {
            self.on_interrupt(now, state);
        }
    }

    fn on_completion(&self, now: Time, state: &mut SimState<'_>) {
        let id = state
            .working
            .running()
            .expect("completion event with nothing running");
        let task = state.working.remove(id);
        assert!(
            task.as_ref().is_some_and(TaskRuntime::is_done),
            "task {id} completed with work left"
        );
        debug!(task = id.0, "completion");

        self.on_interrupt(now, state);
    }

    /// Decision point: pick what runs next.
    fn on_interrupt(&self, now: Time, state: &mut SimState<'_>) {
        if self.policy.preemptive() {
            self.dispatch_slice(now, state);
        } else {
            self.dispatch_to_completion(now, state);
        }
    }

    /// Run the selected task for all of its remaining work.
    fn dispatch_to_completion(&self, now: Time, state: &mut SimState<'_>) {
        if state.working.is_empty() {
            state.working.clear_running();
            debug!("idle");
            return;
        }

        let id = self.select(state);
        state.working.set_running(id);
        let task = state
            .working
            .get_mut(id)
            .expect("selected task is in the working set");

        let ran = task.duration_left;
        let end = now + ran;
        state
            .plan
            .push(ExecutionRecord::new(id, now, end, task.priority));
        task.consume(ran);
        state.events.schedule(end, EventKind::Completion);
        debug!(task = id.0, start = now, end, "run to completion");
    }

    /// Run the selected task for one policy-bounded slice.
    fn dispatch_slice(&self, now: Time, state: &mut SimState<'_>) {
        self.policy.release_last(&mut state.working);
        if state.working.is_empty() {
            debug!("idle");
            return;
        }

        let id = self.select(state);
        state.working.set_running(id);
        let task = state
            .working
            .get_mut(id)
            .expect("selected task is in the working set");

        let ran = self.policy.run_length(task, now, &state.events);
        let end = now + ran;
        task.consume(ran);

        // An empty slice of an unfinished task only defers the decision.
        if ran > 0 || task.is_done() {
            self.policy.record(&mut state.plan, task, now, end);
        }

        let kind = if task.is_done() {
            EventKind::Completion
        } else {
            EventKind::Interrupt
        };
        debug!(
            task = id.0,
            start = now,
            end,
            left = task.duration_left,
            priority = task.priority,
            "slice"
        );
        state.events.schedule(end, kind);
    }

    fn select(&self, state: &SimState<'_>) -> TaskId {
        let id = self
            .policy
            .select_next(&state.working)
            .expect("selection on a non-empty working set");
        assert!(
            state.working.get(id).is_some(),
            "policy {} selected task {id} outside the working set",
            self.policy.name()
        );
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::{FirstComeFirstServed, RoundRobin};

    #[test]
    fn test_empty_catalog_yields_empty_plan() {
        let plan = Simulator::new(FirstComeFirstServed).run(&Catalog::default());
        assert!(plan.is_empty());
    }

    #[test]
    fn test_idle_gap_between_arrivals() {
        let catalog = Catalog::builder()
            .add_task(0, 2, 0, 1)
            .add_task(5, 1, 0, 1)
            .build();
        let plan = Simulator::new(FirstComeFirstServed).run(&catalog);
        assert_eq!(
            plan.records(),
            &[
                ExecutionRecord::new(TaskId(1), 0, 2, 0),
                ExecutionRecord::new(TaskId(2), 5, 6, 0),
            ]
        );
    }

    #[test]
    fn test_simulator_is_reusable() {
        let catalog = Catalog::builder()
            .add_task(0, 5, 0, 2)
            .add_task(1, 3, 0, 2)
            .build();
        let sim = Simulator::new(RoundRobin);
        assert_eq!(sim.run(&catalog), sim.run(&catalog));
    }

    #[test]
    fn test_clock_tracks_last_event() {
        let catalog = Catalog::builder().add_task(3, 4, 0, 1).build();
        Simulator::new(FirstComeFirstServed).run(&catalog);
        assert_eq!(sim_clock(), 7);
    }

    #[test]
    #[should_panic(expected = "past the end of simulated time")]
    fn test_unrepresentable_horizon_panics() {
        let catalog = Catalog::builder()
            .add_task(0, Time::MAX, 0, 1)
            .add_task(0, 1, 0, 1)
            .build();
        Simulator::new(FirstComeFirstServed).run(&catalog);
    }
}

//! End-to-end runs of small server/customer systems with known outcomes.

use queuesim_core::{EntityState, Event, EventKind, Fixed, Requester};
use queuesim_engine::{
    random_requests, Dispatcher, RunConfig, RunError, SimConfig, StopReason, Transition,
};
use queuesim_queue::EventQueue;
use queuesim_test_utils::{fixed_resources, one_shot_requesters, CountingTiming};
use tracing_test::traced_test;

fn entered(sim: &Dispatcher, state: EntityState) -> Vec<(String, f64)> {
    sim.transitions()
        .iter()
        .filter(|t| t.from.is_some() && t.to == state)
        .map(|t| (t.entity.to_string(), t.time))
        .collect()
}

fn history(sim: &Dispatcher, name: &str) -> Vec<(Option<EntityState>, EntityState, f64)> {
    sim.transitions()
        .iter()
        .filter(|t| t.entity.as_str() == name)
        .map(|t: &Transition| (t.from, t.to, t.time))
        .collect()
}

// ─── single service ──────────────────────────────────────────────

#[test]
fn one_resource_one_requester() {
    let mut sim = Dispatcher::new(SimConfig {
        free: fixed_resources(&["elke"], 2.0),
        waiting: one_shot_requesters(&["paul"]),
        ..SimConfig::default()
    })
    .unwrap();
    let report = sim.run(RunConfig::until(10.0)).unwrap();

    assert_eq!(report.stop, StopReason::Drained);
    assert_eq!(report.steps, 3);
    assert_eq!(report.clock, 2.0);
    assert!(sim.events().is_empty());

    use EntityState::*;
    assert_eq!(
        history(&sim, "paul"),
        [
            (None, Waiting, 0.0),
            (Some(Waiting), InService, 0.0),
            (Some(InService), Satisfied, 2.0),
        ]
    );
    assert_eq!(
        history(&sim, "elke"),
        [
            (None, Free, 0.0),
            (Some(Free), Busy, 0.0),
            (Some(Busy), Free, 2.0),
        ]
    );

    let tl = sim.timeline();
    assert_eq!(tl.len(), 2);
    assert_eq!(tl.rows()[0].get("paul"), Some('X'));
    assert_eq!(tl.rows()[1].get("paul"), Some('.'));
    assert_eq!(tl.rows()[1].get("elke"), Some('.'));
}

// ─── contention ──────────────────────────────────────────────────

#[test]
fn three_requesters_share_one_resource_in_turn() {
    let mut sim = Dispatcher::new(SimConfig {
        free: fixed_resources(&["elke"], 2.0),
        waiting: one_shot_requesters(&["peter", "paul", "harry"]),
        ..SimConfig::default()
    })
    .unwrap();
    let report = sim.run(RunConfig::until(100.0)).unwrap();

    assert_eq!(report.stop, StopReason::Drained);
    assert_eq!(
        entered(&sim, EntityState::InService),
        [
            ("peter".to_string(), 0.0),
            ("paul".to_string(), 2.0),
            ("harry".to_string(), 4.0),
        ]
    );
    assert_eq!(report.clock, 6.0);
    assert_eq!(report.metrics.deferrals, 6);
    assert_eq!(report.metrics.deferral_delay, 6.0);
    assert_eq!(report.metrics.max_lookahead, 2);
    assert!(report.metrics.compacted >= 2);
    assert!(sim.check_exclusive());
}

#[test]
fn deferred_request_is_served_when_resource_frees() {
    // Every blocked attempt must be served at the finish time that
    // released the resource it eventually gets.
    let mut sim = Dispatcher::new(SimConfig {
        free: fixed_resources(&["car1", "car2"], 3.0),
        waiting: one_shot_requesters(&["h1", "h2", "h3", "h4", "h5"]),
        ..SimConfig::default()
    })
    .unwrap();
    sim.run(RunConfig::until(100.0)).unwrap();

    let mut times: Vec<f64> = entered(&sim, EntityState::InService)
        .into_iter()
        .map(|(_, t)| t)
        .collect();
    times.sort_by(|a, b| a.partial_cmp(b).unwrap());
    assert_eq!(times, [0.0, 0.0, 3.0, 3.0, 6.0]);
    let frees: Vec<f64> = entered(&sim, EntityState::Free)
        .into_iter()
        .map(|(_, t)| t)
        .collect();
    for t in &times[2..] {
        assert!(frees.contains(t), "served at {t} without a release");
    }
}

// ─── think time ──────────────────────────────────────────────────

#[test]
fn think_time_follow_up_shows_waiting() {
    let mut sim = Dispatcher::new(SimConfig {
        free: fixed_resources(&["elke"], 10.0),
        waiting: vec![Requester::new("paul", Fixed(5.0))],
        ..SimConfig::default()
    })
    .unwrap();
    let report = sim.run(RunConfig::until(15.0)).unwrap();

    assert_eq!(report.stop, StopReason::TimeBudget);
    assert_eq!(report.clock, 15.0);
    let tl = sim.timeline();
    let last = tl.rows().last().unwrap();
    assert_eq!(last.time, 15.0);
    assert_eq!(last.get("paul"), Some('?'));
    assert_eq!(tl.row_at(10.0).and_then(|r| r.get("paul")), Some('.'));

    // The follow-up attempt comes a re-think offset later.
    let next = sim.events().peek(0).unwrap();
    assert_eq!(next.kind(), EventKind::TryRequest);
    assert!((next.time() - 15.01).abs() < 1e-9);

    sim.run(RunConfig::until(15.5)).unwrap();
    assert_eq!(sim.state_of("paul"), Some(EntityState::InService));
}

#[test]
fn think_time_is_drawn_once_per_service() {
    let timing = CountingTiming::new(4.0);
    let calls = timing.counter();
    let mut sim = Dispatcher::new(SimConfig {
        free: fixed_resources(&["elke"], 1.0),
        waiting: vec![Requester::new("paul", timing)],
        ..SimConfig::default()
    })
    .unwrap();
    sim.run(RunConfig::until(20.0)).unwrap();
    let finished = entered(&sim, EntityState::Satisfied).len();
    assert!(finished >= 3);
    assert_eq!(calls.load(std::sync::atomic::Ordering::Relaxed), finished);
}

// ─── budgets and seeds ───────────────────────────────────────────

#[test]
fn step_budget_counts_dispatches() {
    let mut sim = Dispatcher::new(SimConfig {
        free: fixed_resources(&["elke"], 2.0),
        waiting: one_shot_requesters(&["peter", "paul"]),
        ..SimConfig::default()
    })
    .unwrap();
    let report = sim.run(RunConfig::steps(2)).unwrap();
    assert_eq!(report.stop, StopReason::StepBudget);
    assert_eq!(report.steps, 2);
    let again = sim.run(RunConfig::steps(100)).unwrap();
    assert_eq!(again.stop, StopReason::Drained);
    assert_eq!(again.metrics.dispatched, report.steps + again.steps);
}

#[test]
fn seeded_requests_are_served_at_their_time() {
    let mut sim = Dispatcher::new(SimConfig {
        free: fixed_resources(&["car1"], 2.0),
        satisfied: one_shot_requesters(&["h1", "h2"]),
        ..SimConfig::default()
    })
    .unwrap();
    let seeds: EventQueue = [
        Event::request_service(1.0, "h1"),
        Event::request_service(1.5, "h2"),
    ]
    .into_iter()
    .collect();
    let report = sim.run(RunConfig::until(48.0).with_seeds(seeds)).unwrap();

    assert_eq!(report.stop, StopReason::Drained);
    assert_eq!(
        entered(&sim, EntityState::Waiting),
        [("h1".to_string(), 1.0), ("h2".to_string(), 1.5)]
    );
    assert_eq!(
        entered(&sim, EntityState::InService),
        [("h1".to_string(), 1.0), ("h2".to_string(), 3.0)]
    );
}

#[test]
fn random_fires_all_get_extinguished() {
    let houses: Vec<String> = (1..=8).map(|i| format!("house{i}")).collect();
    let names: Vec<&str> = houses.iter().map(String::as_str).collect();
    let mut sim = Dispatcher::new(SimConfig {
        free: fixed_resources(&["car1", "car2", "car3"], 2.0),
        satisfied: one_shot_requesters(&names),
        ..SimConfig::default()
    })
    .unwrap();
    let seeds = random_requests(names.iter().copied(), 48.0, 11);
    let report = sim.run(RunConfig::until(48.0).with_seeds(seeds)).unwrap();

    // Fires start before 48 but may still be burning at the end.
    assert!(matches!(
        report.stop,
        StopReason::Drained | StopReason::TimeBudget
    ));
    assert_eq!(entered(&sim, EntityState::Waiting).len(), 8);
    assert!(sim.check_exclusive());
}

#[test]
fn invalid_end_time_is_rejected() {
    let mut sim = Dispatcher::new(SimConfig::default()).unwrap();
    assert!(matches!(
        sim.run(RunConfig::until(f64::NAN)),
        Err(RunError::Config(_))
    ));
}

#[test]
fn stall_ends_run_gracefully() {
    let mut sim = Dispatcher::new(SimConfig {
        busy: fixed_resources(&["stuck"], 1.0),
        waiting: one_shot_requesters(&["paul", "peter"]),
        ..SimConfig::default()
    })
    .unwrap();
    let report = sim.run(RunConfig::until(10.0)).unwrap();
    assert_eq!(report.stop, StopReason::Stalled);
    assert_eq!(report.steps, 0);
    assert_eq!(report.metrics.deferrals, 2);
}

// ─── logging ─────────────────────────────────────────────────────

#[traced_test]
#[test]
fn run_logs_start_and_stop() {
    let mut sim = Dispatcher::new(SimConfig {
        free: fixed_resources(&["elke"], 2.0),
        waiting: one_shot_requesters(&["paul"]),
        ..SimConfig::default()
    })
    .unwrap();
    sim.run(RunConfig::until(5.0)).unwrap();
    assert!(logs_contain("run start"));
    assert!(logs_contain("run stop"));
    assert!(logs_contain("dispatched"));
}

#[traced_test]
#[test]
fn stall_is_logged_as_warning() {
    let mut sim = Dispatcher::new(SimConfig {
        busy: fixed_resources(&["stuck"], 1.0),
        waiting: one_shot_requesters(&["paul"]),
        ..SimConfig::default()
    })
    .unwrap();
    sim.run(RunConfig::until(1.0)).unwrap();
    assert!(logs_contain("every pending event is blocked"));
}

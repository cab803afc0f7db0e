//! Property-based tests for prune invariants.
//!
//! These tests use proptest to verify invariants hold across
//! randomly generated schedules and cutoffs.

use std::collections::BTreeSet;

use proptest::prelude::*;

use timetrim_core::{
    MemorySchedule, Route, RouteId, ScheduleGraph, ServiceDate, ServicePeriod, Stop, StopId, Trip,
    TripId,
};
use timetrim_prune::{NoopReporter, PrunePolicy, Pruner};
use timetrim_test_utils::{ScheduleBuilder, assert_conserved, assert_no_new_violations};

/// A schedule graph that iterates everything in reverse.
struct Reversed<'a>(&'a MemorySchedule);

impl ScheduleGraph for Reversed<'_> {
    fn service_periods(&self) -> impl Iterator<Item = &ServicePeriod> {
        self.0.service_periods().collect::<Vec<_>>().into_iter().rev()
    }

    fn trips(&self) -> impl Iterator<Item = &Trip> {
        self.0.trips().collect::<Vec<_>>().into_iter().rev()
    }

    fn routes(&self) -> impl Iterator<Item = &Route> {
        self.0.routes().collect::<Vec<_>>().into_iter().rev()
    }

    fn stops(&self) -> impl Iterator<Item = &Stop> {
        self.0.stops().collect::<Vec<_>>().into_iter().rev()
    }

    fn service_period(&self, id: &timetrim_core::ServiceId) -> Option<&ServicePeriod> {
        self.0.service_period(id)
    }

    fn trip(&self, id: &TripId) -> Option<&Trip> {
        self.0.trip(id)
    }

    fn route(&self, id: &RouteId) -> Option<&Route> {
        self.0.route(id)
    }

    fn stop(&self, id: &StopId) -> Option<&Stop> {
        self.0.stop(id)
    }

    fn route_trips(&self, route: &RouteId) -> impl Iterator<Item = &TripId> {
        self.0.route_trips(route).collect::<Vec<_>>().into_iter().rev()
    }

    fn stop_trips(&self, stop: &StopId) -> impl Iterator<Item = &TripId> {
        self.0.stop_trips(stop).collect::<Vec<_>>().into_iter().rev()
    }
}

/// Generates a date between 2016 and 2022.
fn arb_date() -> impl Strategy<Value = u32> {
    (2016u32..=2022, 1u32..=12, 1u32..=28).prop_map(|(y, m, d)| y * 10_000 + m * 100 + d)
}

/// Generates a cutoff inside the default policy bounds.
fn arb_cutoff() -> impl Strategy<Value = ServiceDate> {
    (2017i32..=2021, 1u32..=12, 1u32..=28)
        .prop_map(|(y, m, d)| ServiceDate::from_ymd(y, m, d).unwrap())
}

/// Generates a schedule of up to 5 services, 4 routes, 6 stops and 12
/// trips. Service index 5 is never created, so some trips dangle.
fn arb_schedule() -> impl Strategy<Value = MemorySchedule> {
    (
        prop::collection::vec(arb_date(), 1..=5),
        1usize..=4,
        0usize..=6,
        prop::collection::vec(
            (0usize..=5, 0usize..4, prop::collection::vec(0usize..6, 0..4)),
            0..12,
        ),
    )
        .prop_map(|(ends, routes, stops, trips)| {
            let mut b = ScheduleBuilder::new();
            for (i, end) in ends.iter().enumerate() {
                b = b.service(&format!("S{i}"), 20_160_101.min(*end), *end);
            }
            for r in 0..routes {
                b = b.route(&format!("R{r}"));
            }
            for s in 0..stops {
                b = b.stop(&format!("P{s}"));
            }
            for (i, (service, route, calls)) in trips.iter().enumerate() {
                let trip = format!("T{i}");
                b = b.trip(&trip, &format!("S{service}"), &format!("R{}", route % routes));
                let calls: Vec<String> = calls
                    .iter()
                    .filter(|s| **s < stops)
                    .map(|s| format!("P{s}"))
                    .collect();
                let calls: Vec<&str> = calls.iter().map(String::as_str).collect();
                b = b.stop_times(&trip, &calls);
            }
            b.build()
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_expiry_is_strict(schedule in arb_schedule(), cutoff in arb_cutoff()) {
        let plan = Pruner::new(PrunePolicy::default())
            .plan(&schedule, cutoff, &mut NoopReporter)
            .unwrap();
        for period in schedule.service_periods() {
            prop_assert_eq!(plan.services.contains(&period.id), period.end_date < cutoff);
        }
    }

    #[test]
    fn prop_cascade_closure(schedule in arb_schedule(), cutoff in arb_cutoff()) {
        let before = schedule.clone();
        let mut after = schedule;
        Pruner::new(PrunePolicy::default())
            .prune(&mut after, cutoff, &mut NoopReporter)
            .unwrap();

        for trip in after.trips() {
            if let Some(period) = before.service_period_of(trip) {
                prop_assert!(period.end_date >= cutoff);
            }
        }
        assert_no_new_violations(&before, &after);
    }

    #[test]
    fn prop_route_and_stop_eligibility(
        schedule in arb_schedule(),
        cutoff in arb_cutoff(),
        prune_orphans in any::<bool>(),
    ) {
        let policy = PrunePolicy { prune_orphans, ..PrunePolicy::default() };
        let plan = Pruner::new(policy)
            .plan(&schedule, cutoff, &mut NoopReporter)
            .unwrap();

        for route in schedule.routes() {
            let trips: Vec<_> = schedule.route_trips(&route.id).collect();
            let all_gone = trips.iter().all(|t| plan.trips.contains(*t));
            let expected = if trips.is_empty() { prune_orphans } else { all_gone };
            prop_assert_eq!(plan.routes.contains(&route.id), expected);
        }
        for stop in schedule.stops() {
            let trips: Vec<_> = schedule.stop_trips(&stop.id).collect();
            let all_gone = trips.iter().all(|t| plan.trips.contains(*t));
            let expected = if trips.is_empty() { prune_orphans } else { all_gone };
            prop_assert_eq!(plan.stops.contains(&stop.id), expected);
        }
    }

    #[test]
    fn prop_idempotent(
        schedule in arb_schedule(),
        cutoff in arb_cutoff(),
        prune_orphans in any::<bool>(),
    ) {
        let pruner = Pruner::new(PrunePolicy { prune_orphans, ..PrunePolicy::default() });
        let mut once = schedule;
        pruner.prune(&mut once, cutoff, &mut NoopReporter).unwrap();

        let mut twice = once.clone();
        let report = pruner.prune(&mut twice, cutoff, &mut NoopReporter).unwrap();

        prop_assert_eq!(&once, &twice);
        prop_assert_eq!(report.total_removed(), 0);
    }

    #[test]
    fn prop_conservation(schedule in arb_schedule(), cutoff in arb_cutoff()) {
        let mut schedule = schedule;
        let report = Pruner::new(PrunePolicy::default())
            .prune(&mut schedule, cutoff, &mut NoopReporter)
            .unwrap();
        assert_conserved(&report);
    }

    #[test]
    fn prop_iteration_order_does_not_matter(schedule in arb_schedule(), cutoff in arb_cutoff()) {
        let pruner = Pruner::new(PrunePolicy::default());
        let forward = pruner.plan(&schedule, cutoff, &mut NoopReporter).unwrap();
        let backward = pruner
            .plan(&Reversed(&schedule), cutoff, &mut NoopReporter)
            .unwrap();
        prop_assert_eq!(forward, backward);
    }
}

#[test]
fn removed_trips_never_leave_their_route_dangling() {
    // A route loses its last trip only together with the route itself.
    let schedule = ScheduleBuilder::new()
        .service("S", 20_160_101, 20_161_231)
        .route("R")
        .trip("T1", "S", "R")
        .trip("T2", "S", "R")
        .build();
    let plan = Pruner::new(PrunePolicy::default())
        .plan(
            &schedule,
            ServiceDate::from_yyyymmdd(20_170_101).unwrap(),
            &mut NoopReporter,
        )
        .unwrap();
    let routes: BTreeSet<_> = plan.routes.iter().map(RouteId::as_str).collect();
    assert_eq!(routes, BTreeSet::from(["R"]));
}

//! Custom assertion helpers for schedule tests.

use std::collections::BTreeSet;

use timetrim_core::integrity;
use timetrim_core::{ScheduleGraph, ServiceDate};
use timetrim_prune::PruneReport;

/// Asserts that `after` has no dangling reference that `before` lacked.
///
/// # Panics
///
/// Panics listing the new violations.
pub fn assert_no_new_violations<B: ScheduleGraph, A: ScheduleGraph>(before: &B, after: &A) {
    let existing: BTreeSet<_> = integrity::check(before).into_iter().collect();
    let introduced: Vec<_> = integrity::check(after)
        .into_iter()
        .filter(|v| !existing.contains(v))
        .collect();
    assert!(
        introduced.is_empty(),
        "prune introduced integrity violations: {introduced:?}"
    );
}

/// Asserts that no surviving trip runs under a service ending before `cutoff`.
///
/// # Panics
///
/// Panics naming the first offending trip.
pub fn assert_no_expired_trips<G: ScheduleGraph>(graph: &G, cutoff: ServiceDate) {
    for trip in graph.trips() {
        if let Some(period) = graph.service_period_of(trip) {
            assert!(
                period.end_date >= cutoff,
                "trip {} survived with expired service {} (ends {})",
                trip.id,
                period.id,
                period.end_date
            );
        }
    }
}

/// Asserts that every entity kind in `report` balances.
///
/// # Panics
///
/// Panics if `total_before != removed + total_after` for any kind.
pub fn assert_conserved(report: &PruneReport) {
    for (name, entity) in [
        ("service_periods", &report.service_periods),
        ("trips", &report.trips),
        ("routes", &report.routes),
        ("stops", &report.stops),
    ] {
        assert!(
            entity.is_conserved(),
            "{name}: {} before != {} removed + {} after",
            entity.total_before,
            entity.removed_count(),
            entity.total_after
        );
    }
}

/// Collects a graph's ids of one kind as plain strings, sorted.
pub fn ids<'a, T: AsRef<str> + 'a>(items: impl IntoIterator<Item = &'a T>) -> Vec<String> {
    let mut out: Vec<String> = items
        .into_iter()
        .map(|id| id.as_ref().to_string())
        .collect();
    out.sort();
    out
}

//! Cascade computation: trips, routes and stops made unreachable by expiry.
//!
//! Three read-only passes over the pre-mutation graph:
//!
//! 1. a trip is removed iff its service id is in the expired set;
//! 2. a route is removed iff every trip of the route is removed;
//! 3. a stop is removed iff every trip calling at the stop is removed.
//!
//! Passes 2 and 3 test membership in the set produced by pass 1, never the
//! live graph, so the result does not depend on iteration order. A route or
//! stop with no trips at all satisfies "every trip is removed" vacuously;
//! whether that removes it is [`PrunePolicy::prune_orphans`].

use std::collections::{BTreeSet, HashSet};

use timetrim_core::{RouteId, ScheduleGraph, ServiceId, StopId, TripId};

use crate::policy::PrunePolicy;

/// The dependents of an expired service set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CascadeSets {
    /// Trips running under an expired service.
    pub trips: BTreeSet<TripId>,
    /// Routes whose trips are all removed.
    pub routes: BTreeSet<RouteId>,
    /// Stops whose trips are all removed.
    pub stops: BTreeSet<StopId>,
}

/// Computes cascade removals from an expired service set.
#[derive(Debug, Clone, Copy)]
pub struct CascadePruner {
    prune_orphans: bool,
}

impl CascadePruner {
    /// Creates a pruner. `prune_orphans` decides whether routes and stops
    /// with no trips at all are removed.
    #[must_use]
    pub const fn new(prune_orphans: bool) -> Self {
        Self { prune_orphans }
    }

    /// Creates a pruner following `policy`.
    #[must_use]
    pub const fn from_policy(policy: &PrunePolicy) -> Self {
        Self::new(policy.prune_orphans)
    }

    /// Computes every trip, route and stop that becomes unreachable once
    /// `expired` services are gone.
    ///
    /// A trip whose service id the graph does not know is kept: only
    /// explicit expiry triggers removal.
    #[must_use]
    pub fn compute_cascade<G: ScheduleGraph>(
        &self,
        graph: &G,
        expired: &BTreeSet<ServiceId>,
    ) -> CascadeSets {
        let trips = Self::expired_trips(graph, expired);

        let routes = graph
            .routes()
            .filter(|route| self.all_removed(graph.route_trips(&route.id), &trips))
            .map(|route| route.id.clone())
            .collect();

        let stops = graph
            .stops()
            .filter(|stop| self.all_removed(graph.stop_trips(&stop.id), &trips))
            .map(|stop| stop.id.clone())
            .collect();

        log_shared_routes(graph, &routes);

        CascadeSets {
            trips,
            routes,
            stops,
        }
    }

    fn expired_trips<G: ScheduleGraph>(graph: &G, expired: &BTreeSet<ServiceId>) -> BTreeSet<TripId> {
        let mut dangling = 0_usize;
        let trips = graph
            .trips()
            .filter(|trip| {
                if graph.service_period_of(trip).is_none() {
                    dangling += 1;
                    tracing::debug!(
                        trip_id = %trip.id,
                        service_id = %trip.service_id,
                        "trip references unknown service; keeping"
                    );
                }
                expired.contains(&trip.service_id)
            })
            .map(|trip| trip.id.clone())
            .collect();

        if dangling > 0 {
            tracing::warn!(
                trips = dangling,
                "trips reference unknown service periods and were kept"
            );
        }
        trips
    }

    fn all_removed<'a>(
        &self,
        trips: impl Iterator<Item = &'a TripId>,
        removed: &BTreeSet<TripId>,
    ) -> bool {
        let mut any = false;
        for trip in trips {
            if !removed.contains(trip) {
                return false;
            }
            any = true;
        }
        any || self.prune_orphans
    }
}

fn log_shared_routes<G: ScheduleGraph>(graph: &G, removed: &BTreeSet<RouteId>) {
    if !tracing::enabled!(tracing::Level::DEBUG) {
        return;
    }
    for route in graph.routes().filter(|r| !removed.contains(&r.id)) {
        let services: HashSet<&ServiceId> = graph
            .route_trips(&route.id)
            .filter_map(|id| graph.trip(id))
            .map(|trip| &trip.service_id)
            .collect();
        if services.len() > 1 {
            tracing::debug!(
                route_id = %route.id,
                services = services.len(),
                "route kept with multiple service periods"
            );
        }
    }
}

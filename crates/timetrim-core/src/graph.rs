//! Capability traits for the schedule graph.
//!
//! The graph is owned by whatever store loaded it. Components receive only
//! the capability they need:
//!
//! | Trait | Operations | Who Gets It |
//! |-------|------------|-------------|
//! | [`ScheduleGraph`] | iterate, lookup, derived trip sets | evaluators, pruners, inspection |
//! | [`ScheduleGraphMut`] | `remove_*` | the deletion applier only |
//!
//! Decision code takes `&G` and therefore cannot remove anything while it
//! iterates; removal takes `&mut G` and can only start once every shared
//! borrow from the decision phase has ended.

use serde::{Deserialize, Serialize};

use crate::id::{RouteId, ServiceId, StopId, TripId};
use crate::model::{EntityKind, Route, ServicePeriod, Stop, Trip};

/// Number of entities of each kind held by a graph.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityCounts {
    /// Service period count.
    pub service_periods: usize,
    /// Trip count.
    pub trips: usize,
    /// Route count.
    pub routes: usize,
    /// Stop count.
    pub stops: usize,
}

impl EntityCounts {
    /// Returns the count for one entity kind.
    #[must_use]
    pub const fn get(&self, kind: EntityKind) -> usize {
        match kind {
            EntityKind::ServicePeriod => self.service_periods,
            EntityKind::Trip => self.trips,
            EntityKind::Route => self.routes,
            EntityKind::Stop => self.stops,
        }
    }
}

/// Read access to a schedule graph.
///
/// Iteration order is up to the implementation; nothing that consumes this
/// trait may depend on it.
pub trait ScheduleGraph {
    /// Iterates all service periods.
    fn service_periods(&self) -> impl Iterator<Item = &ServicePeriod>;

    /// Iterates all trips.
    fn trips(&self) -> impl Iterator<Item = &Trip>;

    /// Iterates all routes.
    fn routes(&self) -> impl Iterator<Item = &Route>;

    /// Iterates all stops.
    fn stops(&self) -> impl Iterator<Item = &Stop>;

    /// Looks up a service period.
    fn service_period(&self, id: &ServiceId) -> Option<&ServicePeriod>;

    /// Looks up a trip.
    fn trip(&self, id: &TripId) -> Option<&Trip>;

    /// Looks up a route.
    fn route(&self, id: &RouteId) -> Option<&Route>;

    /// Looks up a stop.
    fn stop(&self, id: &StopId) -> Option<&Stop>;

    /// Iterates the ids of trips that belong to `route`.
    fn route_trips(&self, route: &RouteId) -> impl Iterator<Item = &TripId>;

    /// Iterates the ids of trips that call at `stop`, each id at most once.
    fn stop_trips(&self, stop: &StopId) -> impl Iterator<Item = &TripId>;

    /// Resolves the service period a trip runs under.
    ///
    /// Returns `None` when the trip references a service the graph does not
    /// hold.
    fn service_period_of(&self, trip: &Trip) -> Option<&ServicePeriod> {
        self.service_period(&trip.service_id)
    }

    /// Counts the entities of each kind.
    fn counts(&self) -> EntityCounts {
        EntityCounts {
            service_periods: self.service_periods().count(),
            trips: self.trips().count(),
            routes: self.routes().count(),
            stops: self.stops().count(),
        }
    }
}

/// Removal access to a schedule graph.
///
/// Every removal is tolerant of a missing id: it returns `false` instead of
/// failing so that a partially applied batch can be applied again.
pub trait ScheduleGraphMut: ScheduleGraph {
    /// Removes a service period. Returns true if it was present.
    fn remove_service(&mut self, id: &ServiceId) -> bool;

    /// Removes a trip and its stop-times. Returns true if it was present.
    fn remove_trip(&mut self, id: &TripId) -> bool;

    /// Removes a route. Returns true if it was present.
    fn remove_route(&mut self, id: &RouteId) -> bool;

    /// Removes a stop and any stop-times calling at it. Returns true if it
    /// was present.
    fn remove_stop(&mut self, id: &StopId) -> bool;
}

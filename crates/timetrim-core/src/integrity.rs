//! Referential integrity checks.
//!
//! A surviving trip must reference a service period and a route that exist,
//! and every trip a stop reports must itself exist. [`check`] lists every
//! dangling reference in a graph; a prune must never add to that list.

use std::fmt;

use serde::Serialize;

use crate::graph::ScheduleGraph;
use crate::id::{RouteId, ServiceId, StopId, TripId};

/// A reference from one entity to another that does not exist.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IntegrityViolation {
    /// A trip runs under a service period the graph does not hold.
    TripMissingService {
        /// The referencing trip.
        trip_id: TripId,
        /// The missing service.
        service_id: ServiceId,
    },
    /// A trip belongs to a route the graph does not hold.
    TripMissingRoute {
        /// The referencing trip.
        trip_id: TripId,
        /// The missing route.
        route_id: RouteId,
    },
    /// A stop is served by a trip the graph does not hold.
    StopMissingTrip {
        /// The stop.
        stop_id: StopId,
        /// The missing trip.
        trip_id: TripId,
    },
}

impl fmt::Display for IntegrityViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TripMissingService {
                trip_id,
                service_id,
            } => write!(f, "trip {trip_id} references missing service {service_id}"),
            Self::TripMissingRoute { trip_id, route_id } => {
                write!(f, "trip {trip_id} references missing route {route_id}")
            }
            Self::StopMissingTrip { stop_id, trip_id } => {
                write!(f, "stop {stop_id} is served by missing trip {trip_id}")
            }
        }
    }
}

/// Lists every dangling reference in `graph`, sorted.
#[must_use]
pub fn check<G: ScheduleGraph>(graph: &G) -> Vec<IntegrityViolation> {
    let mut violations = Vec::new();

    for trip in graph.trips() {
        if graph.service_period_of(trip).is_none() {
            violations.push(IntegrityViolation::TripMissingService {
                trip_id: trip.id.clone(),
                service_id: trip.service_id.clone(),
            });
        }
        if graph.route(&trip.route_id).is_none() {
            violations.push(IntegrityViolation::TripMissingRoute {
                trip_id: trip.id.clone(),
                route_id: trip.route_id.clone(),
            });
        }
    }

    for stop in graph.stops() {
        for trip_id in graph.stop_trips(&stop.id) {
            if graph.trip(trip_id).is_none() {
                violations.push(IntegrityViolation::StopMissingTrip {
                    stop_id: stop.id.clone(),
                    trip_id: trip_id.clone(),
                });
            }
        }
    }

    violations.sort();
    violations
}

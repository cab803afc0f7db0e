//! Test graph implementations with operation tracing.
//!
//! Provides a schedule graph that records every removal for test assertions.

use timetrim_core::{
    MemorySchedule, Route, RouteId, ScheduleGraph, ScheduleGraphMut, ServiceId, ServicePeriod,
    Stop, StopId, Trip, TripId,
};

/// Record of a removal for test assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphOp {
    /// `remove_service` call.
    RemoveService {
        /// Requested id.
        id: String,
        /// Whether the entity was present.
        found: bool,
    },
    /// `remove_trip` call.
    RemoveTrip {
        /// Requested id.
        id: String,
        /// Whether the entity was present.
        found: bool,
    },
    /// `remove_route` call.
    RemoveRoute {
        /// Requested id.
        id: String,
        /// Whether the entity was present.
        found: bool,
    },
    /// `remove_stop` call.
    RemoveStop {
        /// Requested id.
        id: String,
        /// Whether the entity was present.
        found: bool,
    },
}

impl GraphOp {
    /// Short name of the operation: `service`, `trip`, `route` or `stop`.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::RemoveService { .. } => "service",
            Self::RemoveTrip { .. } => "trip",
            Self::RemoveRoute { .. } => "route",
            Self::RemoveStop { .. } => "stop",
        }
    }
}

/// In-memory schedule with removal tracing.
///
/// Reads delegate to the wrapped [`MemorySchedule`]; removals are applied and
/// recorded in call order.
#[derive(Debug, Clone, Default)]
pub struct TracingSchedule {
    inner: MemorySchedule,
    operations: Vec<GraphOp>,
}

impl TracingSchedule {
    /// Wraps a schedule.
    pub fn new(inner: MemorySchedule) -> Self {
        Self {
            inner,
            operations: Vec::new(),
        }
    }

    /// Returns all recorded removals.
    pub fn operations(&self) -> &[GraphOp] {
        &self.operations
    }

    /// Returns the kind of each recorded removal with consecutive repeats
    /// collapsed, e.g. `["stop", "trip", "route", "service"]`.
    pub fn removal_phases(&self) -> Vec<&'static str> {
        let mut phases: Vec<&'static str> = self.operations.iter().map(GraphOp::kind).collect();
        phases.dedup();
        phases
    }

    /// Returns the wrapped schedule.
    pub fn inner(&self) -> &MemorySchedule {
        &self.inner
    }

    /// Unwraps the schedule.
    pub fn into_inner(self) -> MemorySchedule {
        self.inner
    }
}

impl ScheduleGraph for TracingSchedule {
    fn service_periods(&self) -> impl Iterator<Item = &ServicePeriod> {
        self.inner.service_periods()
    }

    fn trips(&self) -> impl Iterator<Item = &Trip> {
        self.inner.trips()
    }

    fn routes(&self) -> impl Iterator<Item = &Route> {
        self.inner.routes()
    }

    fn stops(&self) -> impl Iterator<Item = &Stop> {
        self.inner.stops()
    }

    fn service_period(&self, id: &ServiceId) -> Option<&ServicePeriod> {
        self.inner.service_period(id)
    }

    fn trip(&self, id: &TripId) -> Option<&Trip> {
        self.inner.trip(id)
    }

    fn route(&self, id: &RouteId) -> Option<&Route> {
        self.inner.route(id)
    }

    fn stop(&self, id: &StopId) -> Option<&Stop> {
        self.inner.stop(id)
    }

    fn route_trips(&self, route: &RouteId) -> impl Iterator<Item = &TripId> {
        self.inner.route_trips(route)
    }

    fn stop_trips(&self, stop: &StopId) -> impl Iterator<Item = &TripId> {
        self.inner.stop_trips(stop)
    }
}

impl ScheduleGraphMut for TracingSchedule {
    fn remove_service(&mut self, id: &ServiceId) -> bool {
        let found = self.inner.remove_service(id);
        self.operations.push(GraphOp::RemoveService {
            id: id.to_string(),
            found,
        });
        found
    }

    fn remove_trip(&mut self, id: &TripId) -> bool {
        let found = self.inner.remove_trip(id);
        self.operations.push(GraphOp::RemoveTrip {
            id: id.to_string(),
            found,
        });
        found
    }

    fn remove_route(&mut self, id: &RouteId) -> bool {
        let found = self.inner.remove_route(id);
        self.operations.push(GraphOp::RemoveRoute {
            id: id.to_string(),
            found,
        });
        found
    }

    fn remove_stop(&mut self, id: &StopId) -> bool {
        let found = self.inner.remove_stop(id);
        self.operations.push(GraphOp::RemoveStop {
            id: id.to_string(),
            found,
        });
        found
    }
}

//! In-memory schedule store.

use std::collections::{BTreeMap, BTreeSet};

use crate::graph::{ScheduleGraph, ScheduleGraphMut};
use crate::id::{RouteId, ServiceId, StopId, TripId};
use crate::model::{Route, ServicePeriod, Stop, StopTime, Trip};

/// A fully materialized schedule held in ordered maps.
///
/// Route->trips and stop->trips indices are maintained on every insert and
/// removal, so the derived relationships are always answered from current
/// state.
///
/// # Known limitation
///
/// Ids are map keys: inserting an entity whose id is already present
/// replaces the earlier one (last write wins). The replaced value is
/// returned so loaders can detect duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemorySchedule {
    services: BTreeMap<ServiceId, ServicePeriod>,
    trips: BTreeMap<TripId, Trip>,
    routes: BTreeMap<RouteId, Route>,
    stops: BTreeMap<StopId, Stop>,
    stop_times: Vec<StopTime>,
    route_index: BTreeMap<RouteId, BTreeSet<TripId>>,
    stop_index: BTreeMap<StopId, BTreeSet<TripId>>,
}

impl MemorySchedule {
    /// Creates an empty schedule.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a service period, returning the one it replaced.
    pub fn insert_service(&mut self, period: ServicePeriod) -> Option<ServicePeriod> {
        self.services.insert(period.id.clone(), period)
    }

    /// Inserts a trip, returning the one it replaced.
    pub fn insert_trip(&mut self, trip: Trip) -> Option<Trip> {
        let (id, route) = (trip.id.clone(), trip.route_id.clone());
        let replaced = self.trips.insert(id.clone(), trip);
        if let Some(old) = &replaced {
            if old.route_id != route {
                Self::unindex(&mut self.route_index, &old.route_id, &id);
            }
        }
        self.route_index.entry(route).or_default().insert(id);
        replaced
    }

    /// Inserts a route, returning the one it replaced.
    pub fn insert_route(&mut self, route: Route) -> Option<Route> {
        self.routes.insert(route.id.clone(), route)
    }

    /// Inserts a stop, returning the one it replaced.
    pub fn insert_stop(&mut self, stop: Stop) -> Option<Stop> {
        self.stops.insert(stop.id.clone(), stop)
    }

    /// Adds a stop-time.
    pub fn insert_stop_time(&mut self, stop_time: StopTime) {
        self.stop_index
            .entry(stop_time.stop_id.clone())
            .or_default()
            .insert(stop_time.trip_id.clone());
        self.stop_times.push(stop_time);
    }

    /// Returns all stop-times in insertion order.
    #[must_use]
    pub fn stop_times(&self) -> &[StopTime] {
        &self.stop_times
    }

    /// Returns the stop-times of one trip ordered by stop sequence.
    #[must_use]
    pub fn stop_times_for_trip(&self, trip: &TripId) -> Vec<&StopTime> {
        let mut times: Vec<_> = self
            .stop_times
            .iter()
            .filter(|st| &st.trip_id == trip)
            .collect();
        times.sort_by_key(|st| st.stop_sequence);
        times
    }

    fn unindex<K: Ord>(index: &mut BTreeMap<K, BTreeSet<TripId>>, key: &K, trip: &TripId) {
        if let Some(trips) = index.get_mut(key) {
            trips.remove(trip);
            if trips.is_empty() {
                index.remove(key);
            }
        }
    }
}

impl ScheduleGraph for MemorySchedule {
    fn service_periods(&self) -> impl Iterator<Item = &ServicePeriod> {
        self.services.values()
    }

    fn trips(&self) -> impl Iterator<Item = &Trip> {
        self.trips.values()
    }

    fn routes(&self) -> impl Iterator<Item = &Route> {
        self.routes.values()
    }

    fn stops(&self) -> impl Iterator<Item = &Stop> {
        self.stops.values()
    }

    fn service_period(&self, id: &ServiceId) -> Option<&ServicePeriod> {
        self.services.get(id)
    }

    fn trip(&self, id: &TripId) -> Option<&Trip> {
        self.trips.get(id)
    }

    fn route(&self, id: &RouteId) -> Option<&Route> {
        self.routes.get(id)
    }

    fn stop(&self, id: &StopId) -> Option<&Stop> {
        self.stops.get(id)
    }

    fn route_trips(&self, route: &RouteId) -> impl Iterator<Item = &TripId> {
        self.route_index.get(route).into_iter().flatten()
    }

    fn stop_trips(&self, stop: &StopId) -> impl Iterator<Item = &TripId> {
        self.stop_index.get(stop).into_iter().flatten()
    }
}

impl ScheduleGraphMut for MemorySchedule {
    fn remove_service(&mut self, id: &ServiceId) -> bool {
        self.services.remove(id).is_some()
    }

    fn remove_trip(&mut self, id: &TripId) -> bool {
        let Some(trip) = self.trips.remove(id) else {
            return false;
        };
        Self::unindex(&mut self.route_index, &trip.route_id, id);

        let mut touched = BTreeSet::new();
        self.stop_times.retain(|st| {
            if &st.trip_id == id {
                touched.insert(st.stop_id.clone());
                false
            } else {
                true
            }
        });
        for stop in &touched {
            Self::unindex(&mut self.stop_index, stop, id);
        }
        true
    }

    fn remove_route(&mut self, id: &RouteId) -> bool {
        self.routes.remove(id).is_some()
    }

    fn remove_stop(&mut self, id: &StopId) -> bool {
        if self.stops.remove(id).is_none() {
            return false;
        }
        self.stop_index.remove(id);
        self.stop_times.retain(|st| &st.stop_id != id);
        true
    }
}

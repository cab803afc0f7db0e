//! Stop inspection: which trips, routes and service periods touch a stop.

use serde::Serialize;

use crate::date::ServiceDate;
use crate::error::{Error, Result};
use crate::graph::ScheduleGraph;
use crate::id::StopId;
use crate::model::{Route, ServicePeriod, Stop, Trip};

/// One trip calling at the inspected stop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StopTripInfo {
    /// The trip.
    pub trip: Trip,
    /// Its service period, if the graph holds it.
    pub service_period: Option<ServicePeriod>,
    /// Its route, if the graph holds it.
    pub route: Option<Route>,
}

/// Everything known about a stop's service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StopInfo {
    /// The inspected stop.
    pub stop: Stop,
    /// The date trips were filtered on, if any.
    pub active_on: Option<ServiceDate>,
    /// Trips serving the stop (restricted to active ones when filtering).
    pub trips: Vec<StopTripInfo>,
    /// Trips skipped because their service was not active on the date.
    pub inactive_trips: usize,
}

/// Collects the trips, service periods and routes touching `stop_id`.
///
/// With `active_on` set, only trips whose service period is active on that
/// date are listed and the rest are counted in
/// [`StopInfo::inactive_trips`]. A trip whose service period is missing is
/// never active.
///
/// # Errors
///
/// Returns [`Error::NotFound`] if the stop does not exist.
pub fn stop_info<G: ScheduleGraph>(
    graph: &G,
    stop_id: &StopId,
    active_on: Option<ServiceDate>,
) -> Result<StopInfo> {
    let stop = graph
        .stop(stop_id)
        .ok_or_else(|| Error::not_found("stop", stop_id))?;

    let mut trips = Vec::new();
    let mut inactive_trips = 0;
    for trip_id in graph.stop_trips(stop_id) {
        let Some(trip) = graph.trip(trip_id) else {
            continue;
        };
        let service_period = graph.service_period_of(trip);
        if let Some(date) = active_on {
            if !service_period.is_some_and(|p| p.is_active_on(date)) {
                inactive_trips += 1;
                continue;
            }
        }
        trips.push(StopTripInfo {
            trip: trip.clone(),
            service_period: service_period.cloned(),
            route: graph.route(&trip.route_id).cloned(),
        });
    }

    Ok(StopInfo {
        stop: stop.clone(),
        active_on,
        trips,
        inactive_trips,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::{RouteId, ServiceId, TripId};
    use crate::memory::MemorySchedule;
    use crate::model::StopTime;

    fn date(v: u32) -> ServiceDate {
        ServiceDate::from_yyyymmdd(v).unwrap()
    }

    fn schedule() -> MemorySchedule {
        let mut s = MemorySchedule::new();
        s.insert_service(ServicePeriod::new(
            ServiceId::new_unchecked("WINTER"),
            date(20_170_101),
            date(20_170_331),
        ));
        s.insert_service(ServicePeriod::new(
            ServiceId::new_unchecked("SUMMER"),
            date(20_170_601),
            date(20_170_831),
        ));
        s.insert_route(Route::new(RouteId::new_unchecked("R1")));
        s.insert_stop(Stop::new(StopId::new_unchecked("P1")));
        for (trip, service) in [("T1", "WINTER"), ("T2", "SUMMER")] {
            s.insert_trip(Trip::new(
                TripId::new_unchecked(trip),
                ServiceId::new_unchecked(service),
                RouteId::new_unchecked("R1"),
            ));
            s.insert_stop_time(StopTime::new(
                TripId::new_unchecked(trip),
                StopId::new_unchecked("P1"),
                1,
            ));
        }
        s
    }

    #[test]
    fn lists_all_trips_without_a_date() {
        let info = stop_info(&schedule(), &StopId::new_unchecked("P1"), None).unwrap();
        assert_eq!(info.trips.len(), 2);
        assert_eq!(info.inactive_trips, 0);
        assert!(info.trips.iter().all(|t| t.route.is_some()));
    }

    #[test]
    fn filters_by_active_date() {
        let info = stop_info(
            &schedule(),
            &StopId::new_unchecked("P1"),
            Some(date(20_170_701)),
        )
        .unwrap();
        assert_eq!(info.trips.len(), 1);
        assert_eq!(info.trips[0].trip.id.as_str(), "T2");
        assert_eq!(info.inactive_trips, 1);
    }

    #[test]
    fn unknown_stop_is_not_found() {
        let err = stop_info(&schedule(), &StopId::new_unchecked("P9"), None).unwrap_err();
        assert!(matches!(err, Error::NotFound { entity: "stop", .. }));
    }
}

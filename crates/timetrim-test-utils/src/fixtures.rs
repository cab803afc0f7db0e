//! Pre-built schedule fixtures for common test scenarios.
//!
//! Provides a builder with terse string ids and factory functions for the
//! scenarios most tests start from.

use timetrim_core::{
    MemorySchedule, Route, RouteId, ServiceDate, ServiceId, ServicePeriod, Stop, StopId, StopTime,
    Trip, TripId,
};

/// Parses a `YYYYMMDD` literal.
///
/// # Panics
///
/// Panics if `value` is not a calendar date.
pub fn date(value: u32) -> ServiceDate {
    ServiceDate::from_yyyymmdd(value).expect("fixture date should be valid")
}

/// Fluent builder for small schedules.
///
/// ```rust
/// use timetrim_core::ScheduleGraph;
/// use timetrim_test_utils::ScheduleBuilder;
///
/// let schedule = ScheduleBuilder::new()
///     .service("S1", 20_170_101, 20_171_231)
///     .route("R1")
///     .stop("P1")
///     .trip("T1", "S1", "R1")
///     .stop_times("T1", &["P1"])
///     .build();
/// assert_eq!(schedule.counts().trips, 1);
/// ```
#[derive(Debug, Default)]
pub struct ScheduleBuilder {
    schedule: MemorySchedule,
}

impl ScheduleBuilder {
    /// Starts an empty schedule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a service period.
    #[must_use]
    pub fn service(mut self, id: &str, start: u32, end: u32) -> Self {
        self.schedule.insert_service(ServicePeriod::new(
            ServiceId::new(id).expect("fixture id"),
            date(start),
            date(end),
        ));
        self
    }

    /// Adds an unnamed route.
    #[must_use]
    pub fn route(mut self, id: &str) -> Self {
        self.schedule
            .insert_route(Route::new(RouteId::new(id).expect("fixture id")));
        self
    }

    /// Adds a route with a short name.
    #[must_use]
    pub fn named_route(mut self, id: &str, short_name: &str) -> Self {
        let mut route = Route::new(RouteId::new(id).expect("fixture id"));
        route.short_name = Some(short_name.to_string());
        self.schedule.insert_route(route);
        self
    }

    /// Adds an unnamed stop.
    #[must_use]
    pub fn stop(mut self, id: &str) -> Self {
        self.schedule
            .insert_stop(Stop::new(StopId::new(id).expect("fixture id")));
        self
    }

    /// Adds a trip.
    #[must_use]
    pub fn trip(mut self, id: &str, service: &str, route: &str) -> Self {
        self.schedule.insert_trip(Trip::new(
            TripId::new(id).expect("fixture id"),
            ServiceId::new(service).expect("fixture id"),
            RouteId::new(route).expect("fixture id"),
        ));
        self
    }

    /// Adds stop-times for `trip` calling at `stops` in order.
    #[must_use]
    pub fn stop_times(mut self, trip: &str, stops: &[&str]) -> Self {
        for (seq, stop) in (1..).zip(stops) {
            self.schedule.insert_stop_time(StopTime::new(
                TripId::new(trip).expect("fixture id"),
                StopId::new(*stop).expect("fixture id"),
                seq,
            ));
        }
        self
    }

    /// Finishes the schedule.
    pub fn build(self) -> MemorySchedule {
        self.schedule
    }
}

/// Factory for common schedules.
pub struct ScheduleFactory;

impl ScheduleFactory {
    /// The canonical expiry scenario.
    ///
    /// - `S1` ends `20161231`, `S2` ends `20180101`
    /// - `T1` runs under `S1` on `R1`; `T2` runs under `S2` on `R2`
    /// - `R3` has no trips
    /// - `P1` is served only by `T1`; `P2` by `T1` and `T2`
    ///
    /// With a `20170101` cutoff: `S1`, `T1`, `R1`, `R3` and `P1` go; `S2`,
    /// `T2`, `R2` and `P2` stay.
    pub fn canonical() -> MemorySchedule {
        ScheduleBuilder::new()
            .service("S1", 20_160_101, 20_161_231)
            .service("S2", 20_170_101, 20_180_101)
            .named_route("R1", "1")
            .named_route("R2", "2")
            .route("R3")
            .stop("P1")
            .stop("P2")
            .trip("T1", "S1", "R1")
            .trip("T2", "S2", "R2")
            .stop_times("T1", &["P1", "P2"])
            .stop_times("T2", &["P2"])
            .build()
    }

    /// A route whose trips span one expired and one live service.
    ///
    /// `MIXED` has `T_OLD` (service `OLD`, ends `20161231`) and `T_NEW`
    /// (service `NEW`, ends `20191231`), both calling at `SHARED`; `T_OLD`
    /// also calls at `OLD_ONLY`.
    pub fn mixed_route() -> MemorySchedule {
        ScheduleBuilder::new()
            .service("OLD", 20_160_101, 20_161_231)
            .service("NEW", 20_170_101, 20_191_231)
            .route("MIXED")
            .stop("SHARED")
            .stop("OLD_ONLY")
            .trip("T_OLD", "OLD", "MIXED")
            .trip("T_NEW", "NEW", "MIXED")
            .stop_times("T_OLD", &["OLD_ONLY", "SHARED"])
            .stop_times("T_NEW", &["SHARED"])
            .build()
    }
}

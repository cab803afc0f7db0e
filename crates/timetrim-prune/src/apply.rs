//! Applies a removal plan to a graph.

use std::fmt::Display;

use timetrim_core::{EntityKind, RouteId, ScheduleGraphMut, ServiceId, StopId, TripId};

use crate::error::NotFoundWarning;
use crate::plan::RemovalPlan;

/// What a single application of a plan actually removed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplyOutcome {
    /// Service periods removed.
    pub services: Vec<ServiceId>,
    /// Trips removed.
    pub trips: Vec<TripId>,
    /// Routes removed.
    pub routes: Vec<RouteId>,
    /// Stops removed.
    pub stops: Vec<StopId>,
    /// Planned ids that were already absent.
    pub warnings: Vec<NotFoundWarning>,
}

impl ApplyOutcome {
    /// Number of entities of one kind that were removed.
    #[must_use]
    pub fn removed(&self, kind: EntityKind) -> usize {
        match kind {
            EntityKind::ServicePeriod => self.services.len(),
            EntityKind::Trip => self.trips.len(),
            EntityKind::Route => self.routes.len(),
            EntityKind::Stop => self.stops.len(),
        }
    }
}

/// Removes planned entities, dependents before dependencies.
///
/// Order is stops, trips, routes, service periods. At every intermediate
/// point no remaining trip references a removed route or service period.
///
/// Application is idempotent: an id that is already absent produces a
/// [`NotFoundWarning`] and the batch continues.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeletionApplier;

impl DeletionApplier {
    /// Creates an applier.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Applies `plan` to `graph`.
    pub fn apply<G: ScheduleGraphMut>(&self, graph: &mut G, plan: &RemovalPlan) -> ApplyOutcome {
        let mut outcome = ApplyOutcome::default();

        outcome.stops = remove_all(EntityKind::Stop, &plan.stops, &mut outcome.warnings, |id| {
            graph.remove_stop(id)
        });
        outcome.trips = remove_all(EntityKind::Trip, &plan.trips, &mut outcome.warnings, |id| {
            graph.remove_trip(id)
        });
        outcome.routes = remove_all(EntityKind::Route, &plan.routes, &mut outcome.warnings, |id| {
            graph.remove_route(id)
        });
        outcome.services = remove_all(
            EntityKind::ServicePeriod,
            &plan.services,
            &mut outcome.warnings,
            |id| graph.remove_service(id),
        );

        outcome
    }
}

fn remove_all<'a, I>(
    entity: EntityKind,
    ids: impl IntoIterator<Item = &'a I>,
    warnings: &mut Vec<NotFoundWarning>,
    mut remove: impl FnMut(&I) -> bool,
) -> Vec<I>
where
    I: Clone + Display + 'a,
{
    let mut removed = Vec::new();
    for id in ids {
        if remove(id) {
            removed.push(id.clone());
        } else {
            tracing::warn!(entity = %entity, id = %id, "planned removal not found; skipping");
            crate::metrics::record_not_found(entity);
            warnings.push(NotFoundWarning {
                entity,
                id: id.to_string(),
            });
        }
    }
    removed
}

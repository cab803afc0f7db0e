//! The prune pipeline: evaluate, cascade, apply.

use std::time::Instant;

use serde::Serialize;

use timetrim_core::observability::prune_span;
use timetrim_core::{
    EntityCounts, EntityKind, ScheduleGraph, ScheduleGraphMut, ServiceDate,
};

use crate::apply::{ApplyOutcome, DeletionApplier};
use crate::cascade::CascadePruner;
use crate::cutoff::CutoffEvaluator;
use crate::error::{NotFoundWarning, PruneError, Result};
use crate::plan::RemovalPlan;
use crate::policy::PrunePolicy;
use crate::report::{EntitySummary, Reporter, Stage, StageEvent, TracingReporter};

/// Before/after accounting for one entity kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityReport {
    /// Entities present before the prune.
    pub total_before: usize,
    /// Ids actually removed.
    pub removed_ids: Vec<String>,
    /// Entities present after the prune.
    pub total_after: usize,
}

impl EntityReport {
    /// Number of entities removed.
    #[must_use]
    pub fn removed_count(&self) -> usize {
        self.removed_ids.len()
    }

    /// Returns true if `total_before == removed + total_after`.
    #[must_use]
    pub fn is_conserved(&self) -> bool {
        self.total_before == self.removed_count() + self.total_after
    }
}

/// Outcome of a prune.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PruneReport {
    /// The cutoff that was applied.
    pub cutoff: ServiceDate,
    /// Service period accounting.
    pub service_periods: EntityReport,
    /// Trip accounting.
    pub trips: EntityReport,
    /// Route accounting.
    pub routes: EntityReport,
    /// Stop accounting.
    pub stops: EntityReport,
    /// Planned removals that found nothing to remove.
    pub warnings: Vec<NotFoundWarning>,
}

impl PruneReport {
    /// Returns the accounting for one entity kind.
    #[must_use]
    pub fn entity(&self, kind: EntityKind) -> &EntityReport {
        match kind {
            EntityKind::ServicePeriod => &self.service_periods,
            EntityKind::Trip => &self.trips,
            EntityKind::Route => &self.routes,
            EntityKind::Stop => &self.stops,
        }
    }

    /// Total entities removed across all kinds.
    #[must_use]
    pub fn total_removed(&self) -> usize {
        ALL_KINDS
            .iter()
            .map(|kind| self.entity(*kind).removed_count())
            .sum()
    }

    /// Returns true if every entity kind balances.
    #[must_use]
    pub fn is_conserved(&self) -> bool {
        ALL_KINDS.iter().all(|kind| self.entity(*kind).is_conserved())
    }
}

/// Entity kinds in removal order.
const ALL_KINDS: [EntityKind; 4] = [
    EntityKind::Stop,
    EntityKind::Trip,
    EntityKind::Route,
    EntityKind::ServicePeriod,
];

/// Runs the prune pipeline under a policy.
///
/// Every decision is computed from `&G` into a [`RemovalPlan`] before the
/// graph is borrowed mutably; the applier then removes exactly that plan.
///
/// # Example
///
/// ```rust
/// use timetrim_core::{MemorySchedule, ServiceDate};
/// use timetrim_prune::{NoopReporter, PrunePolicy, Pruner};
///
/// let mut schedule = MemorySchedule::new();
/// let cutoff = ServiceDate::from_yyyymmdd(20_170_101)?;
///
/// let pruner = Pruner::new(PrunePolicy::default());
/// let plan = pruner.plan(&schedule, cutoff, &mut NoopReporter)?;
/// assert!(plan.is_empty());
///
/// let report = pruner.prune(&mut schedule, cutoff, &mut NoopReporter)?;
/// assert!(report.is_conserved());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Pruner {
    policy: PrunePolicy,
    list_removed: bool,
}

impl Pruner {
    /// Creates a pruner.
    #[must_use]
    pub const fn new(policy: PrunePolicy) -> Self {
        Self {
            policy,
            list_removed: false,
        }
    }

    /// Includes per-entity summaries in stage events.
    #[must_use]
    pub const fn with_list_removed(mut self, list_removed: bool) -> Self {
        self.list_removed = list_removed;
        self
    }

    /// Returns the policy in use.
    #[must_use]
    pub const fn policy(&self) -> &PrunePolicy {
        &self.policy
    }

    /// Computes what a prune at `cutoff` would remove, without removing it.
    ///
    /// Emits an `Expire` event for service periods and `Cascade` events for
    /// trips, routes and stops.
    ///
    /// # Errors
    ///
    /// Returns [`PruneError::Validation`] if the policy is invalid or the
    /// cutoff is out of range.
    pub fn plan<G: ScheduleGraph>(
        &self,
        graph: &G,
        cutoff: ServiceDate,
        reporter: &mut dyn Reporter,
    ) -> Result<RemovalPlan> {
        if let Some(message) = self.policy.validate() {
            return Err(PruneError::validation(message));
        }

        let evaluator = CutoffEvaluator::new(&self.policy);
        let services = evaluator.compute_expired_services(graph.service_periods(), cutoff)?;
        let before = graph.counts();

        let cascade = CascadePruner::from_policy(&self.policy).compute_cascade(graph, &services);
        let plan = RemovalPlan {
            services,
            trips: cascade.trips,
            routes: cascade.routes,
            stops: cascade.stops,
        };

        let stages = [
            (Stage::Expire, EntityKind::ServicePeriod),
            (Stage::Cascade, EntityKind::Trip),
            (Stage::Cascade, EntityKind::Route),
            (Stage::Cascade, EntityKind::Stop),
        ];
        for (stage, entity) in stages {
            let total = before.get(entity);
            let removed = plan.count(entity);
            reporter.report(&StageEvent {
                stage,
                entity,
                total,
                removed,
                remaining: total.saturating_sub(removed),
                removed_entities: self
                    .list_removed
                    .then(|| summarize(graph, &plan, entity)),
            });
        }

        Ok(plan)
    }

    /// Prunes `graph` at `cutoff`.
    ///
    /// Emits the [`Pruner::plan`] events followed by one `Apply` event per
    /// entity kind in removal order.
    ///
    /// # Errors
    ///
    /// Returns [`PruneError::Validation`] if the policy is invalid or the
    /// cutoff is out of range. The graph is untouched in that case.
    pub fn prune<G: ScheduleGraphMut>(
        &self,
        graph: &mut G,
        cutoff: ServiceDate,
        reporter: &mut dyn Reporter,
    ) -> Result<PruneReport> {
        let span = prune_span("prune", &cutoff.to_string());
        let _guard = span.enter();
        let start = Instant::now();

        let before = graph.counts();
        let plan = self.plan(&*graph, cutoff, reporter)?;
        let outcome = DeletionApplier::new().apply(graph, &plan);
        let after = graph.counts();

        for entity in ALL_KINDS {
            let removed = outcome.removed(entity);
            crate::metrics::record_removed(entity, removed);
            reporter.report(&StageEvent {
                stage: Stage::Apply,
                entity,
                total: before.get(entity),
                removed,
                remaining: after.get(entity),
                removed_entities: None,
            });
        }

        let report = build_report(cutoff, before, after, outcome);
        let duration_secs = start.elapsed().as_secs_f64();
        crate::metrics::record_run(duration_secs);
        tracing::info!(
            removed = report.total_removed(),
            warnings = report.warnings.len(),
            duration_secs,
            "prune completed"
        );

        Ok(report)
    }
}

/// Prunes `graph` at `cutoff` with the default policy, logging each stage.
///
/// # Errors
///
/// Returns [`PruneError::Validation`] if the cutoff is outside the default
/// bounds.
pub fn prune<G: ScheduleGraphMut>(graph: &mut G, cutoff: ServiceDate) -> Result<PruneReport> {
    Pruner::new(PrunePolicy::default()).prune(graph, cutoff, &mut TracingReporter)
}

fn build_report(
    cutoff: ServiceDate,
    before: EntityCounts,
    after: EntityCounts,
    outcome: ApplyOutcome,
) -> PruneReport {
    let entity = |kind: EntityKind, removed_ids: Vec<String>| EntityReport {
        total_before: before.get(kind),
        removed_ids,
        total_after: after.get(kind),
    };
    PruneReport {
        cutoff,
        service_periods: entity(
            EntityKind::ServicePeriod,
            outcome.services.iter().map(ToString::to_string).collect(),
        ),
        trips: entity(
            EntityKind::Trip,
            outcome.trips.iter().map(ToString::to_string).collect(),
        ),
        routes: entity(
            EntityKind::Route,
            outcome.routes.iter().map(ToString::to_string).collect(),
        ),
        stops: entity(
            EntityKind::Stop,
            outcome.stops.iter().map(ToString::to_string).collect(),
        ),
        warnings: outcome.warnings,
    }
}

fn summarize<G: ScheduleGraph>(
    graph: &G,
    plan: &RemovalPlan,
    entity: EntityKind,
) -> Vec<EntitySummary> {
    match entity {
        EntityKind::ServicePeriod => plan
            .services
            .iter()
            .map(|id| EntitySummary {
                id: id.to_string(),
                label: graph
                    .service_period(id)
                    .map(|p| format!("{}-{}", p.start_date, p.end_date)),
            })
            .collect(),
        EntityKind::Trip => plan
            .trips
            .iter()
            .map(|id| EntitySummary {
                id: id.to_string(),
                label: graph
                    .trip(id)
                    .map(|t| format!("route {}, service {}", t.route_id, t.service_id)),
            })
            .collect(),
        EntityKind::Route => plan
            .routes
            .iter()
            .map(|id| EntitySummary {
                id: id.to_string(),
                label: graph.route(id).and_then(timetrim_core::Route::label),
            })
            .collect(),
        EntityKind::Stop => plan
            .stops
            .iter()
            .map(|id| EntitySummary {
                id: id.to_string(),
                label: graph.stop(id).and_then(|s| s.name.clone()),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::NoopReporter;
    use timetrim_core::{
        MemorySchedule, Route, RouteId, ServiceId, ServicePeriod, Stop, StopId, StopTime, Trip,
        TripId,
    };

    #[derive(Default)]
    struct Collect(Vec<StageEvent>);

    impl Reporter for Collect {
        fn report(&mut self, event: &StageEvent) {
            self.0.push(event.clone());
        }
    }

    fn date(v: u32) -> ServiceDate {
        ServiceDate::from_yyyymmdd(v).unwrap()
    }

    fn schedule() -> MemorySchedule {
        let mut s = MemorySchedule::new();
        s.insert_service(ServicePeriod::new(
            ServiceId::new_unchecked("S1"),
            date(20_160_101),
            date(20_161_231),
        ));
        let mut route = Route::new(RouteId::new_unchecked("R1"));
        route.short_name = Some("1".into());
        s.insert_route(route);
        s.insert_stop(Stop {
            id: StopId::new_unchecked("P1"),
            name: Some("Depot".into()),
        });
        s.insert_trip(Trip::new(
            TripId::new_unchecked("T1"),
            ServiceId::new_unchecked("S1"),
            RouteId::new_unchecked("R1"),
        ));
        s.insert_stop_time(StopTime::new(
            TripId::new_unchecked("T1"),
            StopId::new_unchecked("P1"),
            1,
        ));
        s
    }

    #[test]
    fn events_cover_every_stage_in_order() {
        let mut s = schedule();
        let mut events = Collect::default();
        Pruner::new(PrunePolicy::default())
            .prune(&mut s, date(20_170_101), &mut events)
            .unwrap();

        let order: Vec<_> = events.0.iter().map(|e| (e.stage, e.entity)).collect();
        assert_eq!(
            order,
            [
                (Stage::Expire, EntityKind::ServicePeriod),
                (Stage::Cascade, EntityKind::Trip),
                (Stage::Cascade, EntityKind::Route),
                (Stage::Cascade, EntityKind::Stop),
                (Stage::Apply, EntityKind::Stop),
                (Stage::Apply, EntityKind::Trip),
                (Stage::Apply, EntityKind::Route),
                (Stage::Apply, EntityKind::ServicePeriod),
            ]
        );
        assert!(events.0.iter().all(|e| e.removed == 1 && e.remaining == 0));
    }

    #[test]
    fn list_removed_adds_labels() {
        let s = schedule();
        let mut events = Collect::default();
        Pruner::new(PrunePolicy::default())
            .with_list_removed(true)
            .plan(&s, date(20_170_101), &mut events)
            .unwrap();

        let labels: Vec<_> = events
            .0
            .iter()
            .map(|e| e.removed_entities.as_ref().unwrap()[0].label.clone())
            .collect();
        assert_eq!(
            labels,
            [
                Some("20160101-20161231".to_string()),
                Some("route R1, service S1".to_string()),
                Some("1".to_string()),
                Some("Depot".to_string()),
            ]
        );
    }

    #[test]
    fn invalid_policy_fails_before_mutation() {
        let mut s = schedule();
        let before = s.clone();
        let policy = PrunePolicy::new(date(20_220_101), date(20_170_101), true);
        let err = Pruner::new(policy)
            .prune(&mut s, date(20_180_101), &mut NoopReporter)
            .unwrap_err();
        assert!(matches!(err, PruneError::Validation { .. }));
        assert_eq!(s, before);
    }

    #[test]
    fn default_prune_reports_conservation() {
        let mut s = schedule();
        let report = prune(&mut s, date(20_170_101)).unwrap();
        assert!(report.is_conserved());
        assert_eq!(report.total_removed(), 4);
        assert_eq!(report.trips.removed_ids, ["T1"]);
        assert!(report.warnings.is_empty());
    }
}

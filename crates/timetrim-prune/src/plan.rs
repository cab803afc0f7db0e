//! The removal plan: every decision of a prune, made before any removal.

use std::collections::BTreeSet;

use serde::Serialize;

use timetrim_core::{EntityKind, RouteId, ServiceId, StopId, TripId};

/// Ids to remove, per entity kind.
///
/// A plan owns its ids and borrows nothing from the graph it was computed
/// from, so holding one never blocks mutation of that graph.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RemovalPlan {
    /// Expired service periods.
    pub services: BTreeSet<ServiceId>,
    /// Trips running under an expired service period.
    pub trips: BTreeSet<TripId>,
    /// Routes left without trips.
    pub routes: BTreeSet<RouteId>,
    /// Stops left without trips.
    pub stops: BTreeSet<StopId>,
}

impl RemovalPlan {
    /// Returns true if the plan removes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
            && self.trips.is_empty()
            && self.routes.is_empty()
            && self.stops.is_empty()
    }

    /// Total number of entities the plan removes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.services.len() + self.trips.len() + self.routes.len() + self.stops.len()
    }

    /// Number of entities of one kind the plan removes.
    #[must_use]
    pub fn count(&self, kind: EntityKind) -> usize {
        match kind {
            EntityKind::ServicePeriod => self.services.len(),
            EntityKind::Trip => self.trips.len(),
            EntityKind::Route => self.routes.len(),
            EntityKind::Stop => self.stops.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_per_kind() {
        let mut plan = RemovalPlan::default();
        assert!(plan.is_empty());

        plan.trips.insert(TripId::new_unchecked("T1"));
        plan.trips.insert(TripId::new_unchecked("T2"));
        plan.stops.insert(StopId::new_unchecked("P1"));

        assert!(!plan.is_empty());
        assert_eq!(plan.len(), 3);
        assert_eq!(plan.count(EntityKind::Trip), 2);
        assert_eq!(plan.count(EntityKind::Route), 0);
    }
}

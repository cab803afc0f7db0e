//! Stage reporting.
//!
//! Each pipeline stage emits a [`StageEvent`] to a caller-supplied
//! [`Reporter`]. Reporters observe; they cannot alter what is removed or in
//! which order, so swapping one for [`NoopReporter`] leaves the resulting
//! graph unchanged.

use std::fmt;

use serde::Serialize;

use timetrim_core::EntityKind;

/// Pipeline stage that produced an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Service periods were evaluated against the cutoff.
    Expire,
    /// Dependent trips, routes and stops were computed.
    Cascade,
    /// Removals were applied to the graph.
    Apply,
}

impl Stage {
    /// Returns the stage name used in logs.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Expire => "expire",
            Self::Cascade => "cascade",
            Self::Apply => "apply",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A removed (or to-be-removed) entity, described for people.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntitySummary {
    /// Entity id.
    pub id: String,
    /// Human-readable description, e.g. a route name or a date range.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl fmt::Display for EntitySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.label {
            Some(label) => write!(f, "{} ({label})", self.id),
            None => f.write_str(&self.id),
        }
    }
}

/// Counts for one entity kind at the end of one stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StageEvent {
    /// The stage that finished.
    pub stage: Stage,
    /// The entity kind being counted.
    pub entity: EntityKind,
    /// Entities of this kind before the prune.
    pub total: usize,
    /// Entities removed (or selected for removal, before `Apply`).
    pub removed: usize,
    /// Entities left.
    pub remaining: usize,
    /// Removed entities, when listing was requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub removed_entities: Option<Vec<EntitySummary>>,
}

/// Receives stage events.
pub trait Reporter {
    /// Called once per entity kind at the end of each stage.
    fn report(&mut self, event: &StageEvent);
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopReporter;

impl Reporter for NoopReporter {
    fn report(&mut self, _event: &StageEvent) {}
}

/// Writes events as structured `tracing` logs.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn report(&mut self, event: &StageEvent) {
        tracing::info!(
            stage = %event.stage,
            entity = %event.entity,
            total = event.total,
            removed = event.removed,
            remaining = event.remaining,
            "prune stage completed"
        );
        for summary in event.removed_entities.iter().flatten() {
            tracing::info!(
                stage = %event.stage,
                entity = %event.entity,
                id = %summary.id,
                label = summary.label.as_deref().unwrap_or(""),
                "removing"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event() -> StageEvent {
        StageEvent {
            stage: Stage::Cascade,
            entity: EntityKind::Route,
            total: 3,
            removed: 2,
            remaining: 1,
            removed_entities: Some(vec![
                EntitySummary {
                    id: "R1".into(),
                    label: Some("1 Crosstown".into()),
                },
                EntitySummary {
                    id: "R3".into(),
                    label: None,
                },
            ]),
        }
    }

    #[test]
    fn reporters_accept_events() {
        NoopReporter.report(&event());
        TracingReporter.report(&event());
    }

    #[test]
    fn summaries_display_with_labels() {
        let e = event();
        let rendered: Vec<_> = e
            .removed_entities
            .unwrap()
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(rendered, ["R1 (1 Crosstown)", "R3"]);
    }

    #[test]
    fn events_serialize_with_snake_case_tags() {
        let json = serde_json::to_value(event()).unwrap();
        assert_eq!(json["stage"], "cascade");
        assert_eq!(json["entity"], "route");
        assert_eq!(json["removedEntities"][1]["id"], "R3");
    }
}

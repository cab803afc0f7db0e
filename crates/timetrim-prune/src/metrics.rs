//! Prune metrics.
//!
//! Complements the structured logging emitted by each stage. Nothing is
//! recorded unless the host installs a `metrics` recorder.

use metrics::{counter, describe_counter, describe_histogram, histogram};

use timetrim_core::EntityKind;

/// Entities removed counter.
pub const ENTITIES_REMOVED: &str = "timetrim_prune_entities_removed_total";

/// Planned removals that found nothing to remove.
pub const NOT_FOUND: &str = "timetrim_prune_not_found_total";

/// Prune run duration histogram.
pub const RUN_DURATION: &str = "timetrim_prune_run_duration_seconds";

/// Registers all prune metric descriptions.
///
/// Call this once at application startup after initializing the metrics recorder.
pub fn register_metrics() {
    describe_counter!(ENTITIES_REMOVED, "Total entities removed by prune");
    describe_counter!(NOT_FOUND, "Planned removals whose entity was already absent");
    describe_histogram!(RUN_DURATION, "Duration of prune runs in seconds");
}

/// Records removals for one entity kind.
pub fn record_removed(entity: EntityKind, count: usize) {
    counter!(ENTITIES_REMOVED, "entity" => entity.as_str()).increment(u64::try_from(count).unwrap_or(u64::MAX));
}

/// Records a planned removal that found nothing.
pub fn record_not_found(entity: EntityKind) {
    counter!(NOT_FOUND, "entity" => entity.as_str()).increment(1);
}

/// Records the duration of a completed prune.
pub fn record_run(duration_secs: f64) {
    histogram!(RUN_DURATION).record(duration_secs);
}

//! Reporter that keeps every event.

use timetrim_core::EntityKind;
use timetrim_prune::{Reporter, Stage, StageEvent};

/// Collects stage events for later assertion.
#[derive(Debug, Clone, Default)]
pub struct RecordingReporter {
    events: Vec<StageEvent>,
}

impl RecordingReporter {
    /// Creates an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all recorded events in emission order.
    pub fn events(&self) -> &[StageEvent] {
        &self.events
    }

    /// Returns the event for one stage and entity kind, if emitted.
    pub fn find(&self, stage: Stage, entity: EntityKind) -> Option<&StageEvent> {
        self.events
            .iter()
            .find(|e| e.stage == stage && e.entity == entity)
    }
}

impl Reporter for RecordingReporter {
    fn report(&mut self, event: &StageEvent) {
        self.events.push(event.clone());
    }
}

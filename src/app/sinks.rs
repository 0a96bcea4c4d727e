use crate::domain::model::GameEvent;
use crate::domain::ports::EventSink;

/// Logs every event through `tracing`.
#[derive(Debug, Default, Clone)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit(&mut self, event: &GameEvent) {
        match event {
            GameEvent::GameOver { .. } | GameEvent::Bankrupt { .. } => {
                tracing::info!("{:?}", event)
            }
            _ => tracing::debug!("{:?}", event),
        }
    }
}

/// Keeps every event in order. Used by tests and replays.
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    events: Vec<GameEvent>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn take(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &GameEvent) {
        self.events.push(event.clone());
    }
}

/// Discards everything.
#[derive(Debug, Default, Clone)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&mut self, _event: &GameEvent) {}
}

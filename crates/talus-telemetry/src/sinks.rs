//! Pluggable event sinks.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::events::{EventKind, SimulationEvent};

/// Trait for event consumers.
pub trait EventSink: Send {
    /// Process a single event.
    fn handle(&mut self, event: &SimulationEvent);

    /// Called when the run ends.
    fn finalize(&mut self) {}

    /// Returns a human-readable name for this sink.
    fn name(&self) -> &str;
}

/// Collects events into a shared `Vec`.
///
/// Clones share storage, so a clone kept outside the bus can inspect
/// what the boxed sink received.
#[derive(Clone, Default)]
pub struct VecSink {
    events: Arc<Mutex<Vec<SimulationEvent>>>,
}

impl VecSink {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<SimulationEvent>> {
        self.events.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Snapshot of the collected events.
    pub fn events(&self) -> Vec<SimulationEvent> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl EventSink for VecSink {
    fn handle(&mut self, event: &SimulationEvent) {
        self.lock().push(event.clone());
    }

    fn name(&self) -> &str {
        "vec_sink"
    }
}

/// Logs events through `tracing`.
pub struct TracingSink {
    level: tracing::Level,
}

impl TracingSink {
    /// Creates a new tracing sink at the given log level.
    pub fn new(level: tracing::Level) -> Self {
        Self { level }
    }
}

impl Default for TracingSink {
    fn default() -> Self {
        Self::new(tracing::Level::DEBUG)
    }
}

impl EventSink for TracingSink {
    fn handle(&mut self, event: &SimulationEvent) {
        // Per-pass fine-search events are noisy; keep them at trace.
        if matches!(event.kind, EventKind::FineSearch { .. }) {
            tracing::trace!(step = event.step, event = ?event.kind, "contact_event");
            return;
        }
        if self.level == tracing::Level::ERROR {
            tracing::error!(step = event.step, event = ?event.kind, "contact_event");
        } else if self.level == tracing::Level::WARN {
            tracing::warn!(step = event.step, event = ?event.kind, "contact_event");
        } else if self.level == tracing::Level::INFO {
            tracing::info!(step = event.step, event = ?event.kind, "contact_event");
        } else if self.level == tracing::Level::DEBUG {
            tracing::debug!(step = event.step, event = ?event.kind, "contact_event");
        } else {
            tracing::trace!(step = event.step, event = ?event.kind, "contact_event");
        }
    }

    fn name(&self) -> &str {
        "tracing_sink"
    }
}

//! Step event types.
//!
//! Lightweight value types emitted at fixed points of each engine step.

use serde::{Deserialize, Serialize};

/// An event emitted by the engine or its driver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationEvent {
    /// Step number (0-indexed).
    pub step: u64,
    pub kind: EventKind,
}

/// Event payload variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventKind {
    /// Step started.
    StepBegin {
        /// Simulated time at the start of the step (seconds).
        sim_time: f64,
    },

    /// One fine-search pass completed.
    FineSearch {
        /// Pair category name.
        category: String,
        /// Pairs erased for moving out of the neighborhood.
        pruned: usize,
        /// Candidates newly tracked.
        admitted: usize,
        /// Pairs tracked after the pass.
        tracked: usize,
    },

    /// Contact force pass completed.
    ContactForces {
        pairs_evaluated: usize,
        pairs_in_contact: usize,
        /// Largest overlap (m).
        max_overlap: f64,
    },

    /// Kinetic energy after integration.
    Energy {
        /// Translational plus rotational kinetic energy (J).
        kinetic: f64,
    },

    /// Step completed.
    StepEnd {
        /// Wall-clock time for the step (seconds).
        wall_time: f64,
    },

    /// Custom event for extensibility.
    Custom {
        label: String,
        /// JSON-encoded payload.
        payload: String,
    },
}

impl SimulationEvent {
    pub fn new(step: u64, kind: EventKind) -> Self {
        Self { step, kind }
    }

    /// Custom event carrying `payload` encoded as JSON.
    pub fn custom<T: Serialize>(
        step: u64,
        label: impl Into<String>,
        payload: &T,
    ) -> serde_json::Result<Self> {
        Ok(Self::new(
            step,
            EventKind::Custom {
                label: label.into(),
                payload: serde_json::to_string(payload)?,
            },
        ))
    }

    /// Short name of the payload variant.
    pub fn kind_name(&self) -> &'static str {
        match self.kind {
            EventKind::StepBegin { .. } => "step_begin",
            EventKind::FineSearch { .. } => "fine_search",
            EventKind::ContactForces { .. } => "contact_forces",
            EventKind::Energy { .. } => "energy",
            EventKind::StepEnd { .. } => "step_end",
            EventKind::Custom { .. } => "custom",
        }
    }
}

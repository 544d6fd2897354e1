//! # talus-telemetry
//!
//! Event bus for contact-engine telemetry. Emits structured events
//! (step timing, fine-search counts, contact forces, energy) that are
//! consumed by pluggable sinks.

pub mod bus;
pub mod events;
pub mod sinks;

pub use bus::EventBus;
pub use events::{EventKind, SimulationEvent};
pub use sinks::{EventSink, TracingSink, VecSink};

//! # talus-types
//!
//! Shared types, identifiers, error types, and physical constants
//! for the Talus discrete-element contact engine.
//!
//! This crate has zero domain logic — it defines the vocabulary
//! that all other Talus crates share.

pub mod constants;
pub mod error;
pub mod ids;

pub use error::{TalusError, TalusResult};
pub use ids::{MaterialId, ParticleId};

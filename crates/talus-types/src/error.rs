//! Error types for the Talus engine.
//!
//! All crates return `TalusResult<T>` from fallible operations.
//! None of these errors is retryable: any of them invalidates the
//! force balance of the step in which it occurs.

use thiserror::Error;

use crate::ids::{MaterialId, ParticleId};

/// Unified error type for the Talus engine.
#[derive(Debug, Error)]
pub enum TalusError {
    /// Contact-law selection or engine parameter is invalid.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Material parameter is out of valid range.
    #[error("Invalid material parameter: {0}")]
    InvalidMaterial(String),

    /// A particle references a material with no table entry.
    #[error("Unknown {0}")]
    UnknownMaterial(MaterialId),

    /// A candidate or tracked pair references a particle absent from the
    /// container. Signals broad-phase/registry desynchronization.
    #[error("Particle {id} missing from container (category: {category})")]
    MissingParticle {
        id: ParticleId,
        category: String,
    },

    /// Zero or negative radius, mass or stiffness met mid-computation.
    #[error("Numerical degeneracy: {0}")]
    NumericalDegeneracy(String),

    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization failure.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Convenience alias for `Result<T, TalusError>`.
pub type TalusResult<T> = Result<T, TalusError>;

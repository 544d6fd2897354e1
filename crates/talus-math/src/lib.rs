//! # talus-math
//!
//! Numeric primitives for the Talus contact engine.
//!
//! Provides:
//! - Re-exports of `glam` double-precision types (`DVec3`)
//! - Mean and reduced-quantity helpers used by effective material properties
//! - The JKR contact-radius root finder

pub mod means;
pub mod roots;

// Re-export glam types as the canonical math types for Talus.
pub use glam::DVec3;

pub use means::{harmonic_mean, reduced};
pub use roots::JkrRadiusSolver;

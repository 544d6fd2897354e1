//! # talus-material
//!
//! Particle material parameters and the effective-properties table.
//!
//! ## Design
//!
//! [`MaterialProperties`] holds measurable per-material quantities
//! (Young's modulus, Poisson ratio, restitution, friction, surface
//! energy). The [`MaterialDatabase`] assigns each registered material a
//! [`MaterialId`](talus_types::MaterialId).
//!
//! Contact laws never read per-material values directly. At setup the
//! database is reduced once into an [`EffectivePropertiesTable`] holding
//! one [`EffectiveProperties`] entry per ordered material pair, shared
//! read-only by every contact of that combination.

pub mod database;
pub mod effective;
pub mod properties;

pub use database::MaterialDatabase;
pub use effective::{EffectiveProperties, EffectivePropertiesTable};
pub use properties::MaterialProperties;

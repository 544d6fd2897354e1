//! Strongly-typed identifiers for engine entities.
//!
//! Newtype wrappers prevent accidental mixing of particle ids
//! with container slots or material indices.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable, globally unique particle id.
///
/// Survives exchange between ranks and reallocation of the particle
/// container, so contact history is keyed by it rather than by slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ParticleId(pub u64);

/// Index into the material database and the effective-properties table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MaterialId(pub u16);

impl MaterialId {
    /// Returns the raw index as `usize` for table indexing.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl From<u64> for ParticleId {
    fn from(val: u64) -> Self {
        Self(val)
    }
}

impl From<u16> for MaterialId {
    fn from(val: u16) -> Self {
        Self(val)
    }
}

impl fmt::Display for ParticleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl fmt::Display for MaterialId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "material {}", self.0)
    }
}

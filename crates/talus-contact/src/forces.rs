//! Caller-owned force and torque buffers.

use talus_math::DVec3;
use talus_types::{TalusError, TalusResult};

/// Per-particle force and torque accumulators, indexed by container slot.
///
/// The engine only ever adds into these; zeroing between steps is the
/// caller's job.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ForceBuffers {
    pub force: Vec<DVec3>,
    pub torque: Vec<DVec3>,
}

impl ForceBuffers {
    /// Zeroed buffers for `n` particles.
    pub fn zeros(n: usize) -> Self {
        Self {
            force: vec![DVec3::ZERO; n],
            torque: vec![DVec3::ZERO; n],
        }
    }

    /// Zeroes every entry, resizing to `n`.
    pub fn reset(&mut self, n: usize) {
        self.force.clear();
        self.force.resize(n, DVec3::ZERO);
        self.torque.clear();
        self.torque.resize(n, DVec3::ZERO);
    }

    pub fn len(&self) -> usize {
        self.force.len()
    }

    pub fn is_empty(&self) -> bool {
        self.force.is_empty()
    }

    #[inline]
    pub fn add(&mut self, slot: usize, force: DVec3, torque: DVec3) {
        self.force[slot] += force;
        self.torque[slot] += torque;
    }

    /// Adds `other` entry-wise into `self`.
    pub fn merge(&mut self, other: &ForceBuffers) {
        for (a, b) in self.force.iter_mut().zip(&other.force) {
            *a += *b;
        }
        for (a, b) in self.torque.iter_mut().zip(&other.torque) {
            *a += *b;
        }
    }

    /// Fails unless both buffers hold at least `n` entries.
    pub fn ensure_capacity(&self, n: usize) -> TalusResult<()> {
        if self.force.len() < n || self.torque.len() < n {
            return Err(TalusError::InvalidConfig(format!(
                "force buffers hold {}/{} entries, container has {n} particles",
                self.force.len(),
                self.torque.len()
            )));
        }
        Ok(())
    }

    /// Sum of all forces; zero for an isolated system.
    pub fn net_force(&self) -> DVec3 {
        self.force.iter().copied().sum()
    }
}

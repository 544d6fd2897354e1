//! Broad-phase seam.
//!
//! Candidate generation is external to the contact core: a spatial index
//! (background grid, hash, tree) proposes *candidate* pairs per category,
//! and fine search decides which of them are actually tracked.

use std::collections::BTreeMap;

use talus_math::DVec3;
use talus_types::{ParticleId, TalusResult};

use crate::category::PairCategory;
use crate::particle::ParticleContainer;

/// Owner id → candidate partner ids.
pub type CandidateLists = BTreeMap<ParticleId, Vec<ParticleId>>;

/// Candidates for one (category, periodic offset) fine-search pass.
#[derive(Debug, Clone)]
pub struct CandidateSet {
    pub category: PairCategory,
    /// Offset subtracted from partner positions. Ignored for
    /// non-periodic categories.
    pub periodic_offset: DVec3,
    pub pairs: CandidateLists,
}

impl CandidateSet {
    pub fn new(category: PairCategory) -> Self {
        Self {
            category,
            periodic_offset: DVec3::ZERO,
            pairs: CandidateLists::new(),
        }
    }

    pub fn periodic(category: PairCategory, periodic_offset: DVec3) -> Self {
        Self {
            category,
            periodic_offset,
            pairs: CandidateLists::new(),
        }
    }

    /// Adds a candidate pair.
    pub fn push(&mut self, owner: ParticleId, partner: ParticleId) {
        self.pairs.entry(owner).or_default().push(partner);
    }

    /// Number of candidate pairs.
    pub fn len(&self) -> usize {
        self.pairs.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.values().all(Vec::is_empty)
    }
}

/// Trait for broad-phase candidate generators.
///
/// Implementations may refresh their candidates at a coarser cadence than
/// the force step; fine search tolerates stale candidate lists as long as
/// the neighborhood margin covers the motion in between.
pub trait BroadPhase: Send {
    /// Rebuild the acceleration structure from current positions.
    fn update(&mut self, particles: &ParticleContainer) -> TalusResult<()>;

    /// Candidate sets, at most one per (category, offset).
    fn candidates(&self) -> Vec<CandidateSet>;

    /// Returns the broad phase strategy name.
    fn name(&self) -> &str;
}

/// Broad phase that never proposes candidates.
pub struct NullBroadPhase;

impl BroadPhase for NullBroadPhase {
    fn update(&mut self, _particles: &ParticleContainer) -> TalusResult<()> {
        Ok(())
    }

    fn candidates(&self) -> Vec<CandidateSet> {
        Vec::new()
    }

    fn name(&self) -> &str {
        "null_broad_phase"
    }
}

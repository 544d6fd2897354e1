//! Fine search — exact distance validation of candidate pairs.
//!
//! Runs once per (category, periodic offset) per step, in two passes:
//!
//! 1. **Prune** every tracked pair admitted under this offset whose
//!    squared centre distance now exceeds the threshold.
//! 2. **Admit** every candidate not yet tracked whose squared distance is
//!    strictly below the threshold, with zero history.
//!
//! Distances are never square-rooted: the threshold is already squared.

use serde::{Deserialize, Serialize};
use talus_math::DVec3;
use talus_types::{TalusError, TalusResult};

use crate::broad::CandidateLists;
use crate::category::PairCategory;
use crate::particle::ParticleContainer;
use crate::registry::PairRegistry;

/// Counters from one fine-search pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FineSearchStats {
    pub category: PairCategory,
    /// Tracked pairs whose distance was recomputed.
    pub visited: usize,
    /// Tracked pairs erased for exceeding the threshold.
    pub pruned: usize,
    /// Candidates newly inserted.
    pub admitted: usize,
    /// Pairs tracked in the category after the pass.
    pub tracked: usize,
}

/// Prunes and admits pairs of `category` under `periodic_offset`.
///
/// For non-periodic categories the offset is ignored and treated as zero.
/// Any pair or candidate referencing a particle missing from `particles`
/// aborts the pass with [`TalusError::MissingParticle`].
pub fn fine_search(
    registry: &mut PairRegistry,
    category: PairCategory,
    particles: &ParticleContainer,
    candidates: &CandidateLists,
    neighborhood_threshold: f64,
    periodic_offset: DVec3,
) -> TalusResult<FineSearchStats> {
    if !(neighborhood_threshold > 0.0 && neighborhood_threshold.is_finite()) {
        return Err(TalusError::InvalidConfig(format!(
            "neighborhood threshold must be positive and finite, got {neighborhood_threshold}"
        )));
    }

    let offset = if category.is_periodic() {
        periodic_offset
    } else {
        if periodic_offset != DVec3::ZERO {
            tracing::warn!(
                %category,
                ?periodic_offset,
                "ignoring periodic offset for non-periodic category"
            );
        }
        DVec3::ZERO
    };

    // Prune
    let mut visited = 0;
    let pruned = registry.try_retain(category, |owner, partner, pair| {
        if !pair.has_offset(offset) {
            return Ok(true);
        }
        visited += 1;
        let (_, one) = particles.lookup(owner, category)?;
        let (_, two) = particles.lookup(partner, category)?;
        let square_distance = one.position.distance_squared(two.position - offset);
        Ok(square_distance <= neighborhood_threshold)
    })?;

    // Admit
    let mut admitted = 0;
    for (&owner, partners) in candidates {
        if partners.is_empty() {
            continue;
        }
        let (_, one) = particles.lookup(owner, category)?;

        for &partner in partners {
            if partner == owner && !category.is_periodic() {
                tracing::trace!(%category, %owner, "skipping self candidate");
                continue;
            }
            let (_, two) = particles.lookup(partner, category)?;
            if registry.contains(category, owner, partner) {
                continue;
            }
            let square_distance = one.position.distance_squared(two.position - offset);
            if square_distance < neighborhood_threshold
                && registry.upsert_with_offset(category, owner, partner, offset)
            {
                admitted += 1;
            }
        }
    }

    let stats = FineSearchStats {
        category,
        visited,
        pruned,
        admitted,
        tracked: registry.len(category),
    };
    tracing::debug!(
        %category,
        visited = stats.visited,
        pruned = stats.pruned,
        admitted = stats.admitted,
        tracked = stats.tracked,
        "fine search"
    );
    Ok(stats)
}

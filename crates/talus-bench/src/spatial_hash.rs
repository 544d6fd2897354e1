//! Spatial hash broad phase.
//!
//! Bins particles into a uniform grid and proposes pairs from the same
//! or adjacent cells. With a periodic box length along x, particles are
//! also matched against the images of particles near the far boundary.

use std::collections::HashMap;

use talus_contact::{BroadPhase, CandidateSet, PairCategory, ParticleContainer};
use talus_math::DVec3;
use talus_types::{ParticleId, TalusError, TalusResult};

type CellKey = (i64, i64, i64);

/// Uniform-grid broad phase.
///
/// Cell size should be at least the neighborhood distance, so every pair
/// inside the fine-search threshold lies in adjacent cells.
pub struct SpatialHash {
    cell_size: f64,
    inv_cell_size: f64,
    /// Periodic box length along x. Positions are expected in `[0, L)`.
    periodic_length: Option<f64>,
    grid: HashMap<CellKey, Vec<ParticleId>>,
    /// (id, position) of particles in insertion order.
    entries: Vec<(ParticleId, DVec3)>,
}

impl SpatialHash {
    pub fn new(cell_size: f64) -> Self {
        let cell_size = cell_size.max(1e-12);
        Self {
            cell_size,
            inv_cell_size: 1.0 / cell_size,
            periodic_length: None,
            grid: HashMap::new(),
            entries: Vec::new(),
        }
    }

    /// Enables periodic images along x with box length `length`.
    pub fn with_periodic_x(mut self, length: f64) -> TalusResult<Self> {
        if !(length > 2.0 * self.cell_size && length.is_finite()) {
            return Err(TalusError::InvalidConfig(format!(
                "periodic length {length} must exceed two cells ({})",
                2.0 * self.cell_size
            )));
        }
        self.periodic_length = Some(length);
        Ok(self)
    }

    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    fn cell_key(&self, p: DVec3) -> CellKey {
        let c = (p * self.inv_cell_size).floor();
        (c.x as i64, c.y as i64, c.z as i64)
    }

    /// Ids in the 27 cells around `p`.
    fn neighbors(&self, p: DVec3) -> impl Iterator<Item = ParticleId> + '_ {
        let (cx, cy, cz) = self.cell_key(p);
        (-1..=1_i64)
            .flat_map(move |dx| {
                (-1..=1_i64).flat_map(move |dy| {
                    (-1..=1_i64).map(move |dz| (cx + dx, cy + dy, cz + dz))
                })
            })
            .filter_map(|key| self.grid.get(&key))
            .flatten()
            .copied()
    }
}

impl BroadPhase for SpatialHash {
    fn update(&mut self, particles: &ParticleContainer) -> TalusResult<()> {
        self.grid.clear();
        self.entries.clear();
        for p in particles.iter() {
            if !p.position.is_finite() {
                return Err(TalusError::NumericalDegeneracy(format!(
                    "particle {} has non-finite position",
                    p.id()
                )));
            }
            self.grid.entry(self.cell_key(p.position)).or_default().push(p.id());
            self.entries.push((p.id(), p.position));
        }
        tracing::trace!(
            particles = self.entries.len(),
            cells = self.grid.len(),
            "spatial hash rebuilt"
        );
        Ok(())
    }

    fn candidates(&self) -> Vec<CandidateSet> {
        let mut local = CandidateSet::new(PairCategory::LocalLocal);
        for &(id, position) in &self.entries {
            for other in self.neighbors(position) {
                if id < other {
                    local.push(id, other);
                }
            }
        }

        let mut sets = vec![local];
        if let Some(length) = self.periodic_length {
            // Partner b is seen at b − offset, i.e. shifted to below x = 0.
            let offset = DVec3::new(length, 0.0, 0.0);
            let mut periodic = CandidateSet::periodic(PairCategory::LocalLocalPeriodic, offset);
            for &(partner, position) in &self.entries {
                let image = position - offset;
                if image.x < -self.cell_size {
                    continue;
                }
                for owner in self.neighbors(image) {
                    periodic.push(owner, partner);
                }
            }
            sets.push(periodic);
        }
        sets
    }

    fn name(&self) -> &str {
        "spatial_hash"
    }
}

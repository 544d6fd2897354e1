//! Contact force engine.
//!
//! Drives fine search and the force model over every category and adds
//! the resulting forces and torques into caller-owned buffers.
//!
//! Evaluation is staged: every pair is evaluated first, and histories
//! and buffers are only written once all pairs have succeeded, so a
//! failed step leaves both untouched.

use std::time::Instant;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use talus_material::EffectivePropertiesTable;
use talus_math::DVec3;
use talus_types::{ParticleId, TalusResult};

use crate::broad::{CandidateLists, CandidateSet};
use crate::category::{Accumulation, PairCategory};
use crate::config::ContactModelConfig;
use crate::fine_search::{fine_search, FineSearchStats};
use crate::forces::ForceBuffers;
use crate::model::{ContactForceModel, ContactOutcome};
use crate::pair::ContactPair;
use crate::particle::ParticleContainer;
use crate::registry::{PairRegistry, PartnerMap};

/// Summary of one force pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ForceSummary {
    /// Tracked pairs evaluated.
    pub pairs_evaluated: usize,
    /// Pairs whose surfaces were in contact.
    pub pairs_in_contact: usize,
    /// Largest overlap among contacting pairs (m).
    pub max_overlap: f64,
}

impl ForceSummary {
    fn record(&mut self, outcome: &ContactOutcome) {
        self.pairs_evaluated += 1;
        if outcome.force.in_contact {
            self.pairs_in_contact += 1;
            self.max_overlap = self.max_overlap.max(outcome.force.overlap);
        }
    }
}

/// Report from [`ContactForceEngine::step`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StepReport {
    /// One entry per fine-search pass.
    pub search: Vec<FineSearchStats>,
    pub forces: ForceSummary,
    /// Wall time of the step (ms).
    pub wall_time_ms: f64,
}

impl StepReport {
    /// Pairs tracked after the step, across categories.
    pub fn tracked(&self) -> usize {
        let mut seen = [false; 5];
        let mut total = 0;
        for stats in self.search.iter().rev() {
            let index = stats.category.index();
            if !seen[index] {
                seen[index] = true;
                total += stats.tracked;
            }
        }
        total
    }

    pub fn admitted(&self) -> usize {
        self.search.iter().map(|s| s.admitted).sum()
    }

    pub fn pruned(&self) -> usize {
        self.search.iter().map(|s| s.pruned).sum()
    }
}

/// One evaluated pair waiting to be committed.
#[derive(Debug, Clone, Copy)]
struct StagedContact {
    slot_a: usize,
    slot_b: usize,
    accumulation: Accumulation,
    outcome: ContactOutcome,
}

impl StagedContact {
    fn accumulate(&self, buffers: &mut ForceBuffers) {
        let force = &self.outcome.force;
        match self.accumulation {
            Accumulation::Both => {
                buffers.add(self.slot_a, force.force_on_a(), force.torque_on_a());
                buffers.add(self.slot_b, force.force_on_b(), force.torque_on_b());
            }
            Accumulation::OwnerOnly => {
                buffers.add(self.slot_a, force.force_on_a(), force.torque_on_a());
            }
            Accumulation::PartnerOnly => {
                buffers.add(self.slot_b, force.force_on_b(), force.torque_on_b());
            }
        }
    }
}

/// Contact engine for one rank: owns the pair registry and the resolved
/// force model.
#[derive(Debug)]
pub struct ContactForceEngine {
    model: ContactForceModel,
    table: EffectivePropertiesTable,
    registry: PairRegistry,
}

impl ContactForceEngine {
    /// Validates the configuration and the effective-properties table and
    /// binds the law pair.
    pub fn new(config: ContactModelConfig, table: EffectivePropertiesTable) -> TalusResult<Self> {
        table.validate()?;
        let model = ContactForceModel::new(&config)?;
        tracing::info!(
            kernel = model.name(),
            materials = table.material_count(),
            "contact force engine ready"
        );
        Ok(Self {
            model,
            table,
            registry: PairRegistry::new(),
        })
    }

    pub fn config(&self) -> &ContactModelConfig {
        self.model.config()
    }

    pub fn model(&self) -> &ContactForceModel {
        &self.model
    }

    pub fn table(&self) -> &EffectivePropertiesTable {
        &self.table
    }

    pub fn registry(&self) -> &PairRegistry {
        &self.registry
    }

    /// Mutable registry access, for hosts migrating pairs between ranks.
    pub fn registry_mut(&mut self) -> &mut PairRegistry {
        &mut self.registry
    }

    /// Squared fine-search threshold for the particles in `particles`.
    pub fn neighborhood_threshold(&self, particles: &ParticleContainer) -> f64 {
        self.config().neighborhood_threshold(particles.max_radius())
    }

    /// Runs fine search for every category.
    ///
    /// Non-periodic categories get one pass with zero offset. Periodic
    /// categories get one pass per distinct offset among `candidates` and
    /// among their tracked pairs, so pairs whose candidates disappeared
    /// are still pruned.
    pub fn update_contacts(
        &mut self,
        particles: &ParticleContainer,
        candidates: &[CandidateSet],
        neighborhood_threshold: f64,
    ) -> TalusResult<Vec<FineSearchStats>> {
        let mut stats = Vec::new();

        for category in PairCategory::ALL {
            for (offset, lists) in self.search_passes(category, candidates) {
                stats.push(fine_search(
                    &mut self.registry,
                    category,
                    particles,
                    &lists,
                    neighborhood_threshold,
                    offset,
                )?);
            }
        }
        Ok(stats)
    }

    /// Groups candidate sets of `category` into (offset, candidates)
    /// passes.
    fn search_passes(
        &self,
        category: PairCategory,
        candidates: &[CandidateSet],
    ) -> Vec<(DVec3, CandidateLists)> {
        let mut passes: Vec<(DVec3, CandidateLists)> = Vec::new();
        let pass_for = |passes: &mut Vec<(DVec3, CandidateLists)>, offset: DVec3| -> usize {
            match passes.iter().position(|(o, _)| *o == offset) {
                Some(index) => index,
                None => {
                    passes.push((offset, CandidateLists::new()));
                    passes.len() - 1
                }
            }
        };

        if !category.is_periodic() {
            pass_for(&mut passes, DVec3::ZERO);
        } else {
            for offset in self.registry.offsets(category) {
                pass_for(&mut passes, offset);
            }
        }

        for set in candidates.iter().filter(|s| s.category == category) {
            let offset = if category.is_periodic() {
                set.periodic_offset
            } else {
                DVec3::ZERO
            };
            let index = pass_for(&mut passes, offset);
            let lists = &mut passes[index].1;
            for (&owner, partners) in &set.pairs {
                lists.entry(owner).or_default().extend(partners.iter().copied());
            }
        }
        passes
    }

    /// Evaluates every tracked pair and adds the contributions into
    /// `buffers`, in deterministic registry order.
    pub fn compute_forces(
        &mut self,
        particles: &ParticleContainer,
        dt: f64,
        buffers: &mut ForceBuffers,
    ) -> TalusResult<ForceSummary> {
        buffers.ensure_capacity(particles.len())?;

        let mut staged = Vec::with_capacity(PairCategory::ALL.len());
        for category in PairCategory::ALL {
            let contacts = self
                .registry
                .iter(category)
                .map(|(owner, partner, pair)| {
                    self.evaluate_pair(category, owner, partner, pair, particles, dt)
                })
                .collect::<TalusResult<Vec<_>>>()?;
            staged.push(contacts);
        }

        for contacts in &staged {
            for contact in contacts {
                contact.accumulate(buffers);
            }
        }
        let summary = self.commit_histories(&staged);
        tracing::debug!(
            evaluated = summary.pairs_evaluated,
            in_contact = summary.pairs_in_contact,
            max_overlap = summary.max_overlap,
            "contact forces"
        );
        Ok(summary)
    }

    /// Parallel [`compute_forces`](Self::compute_forces).
    ///
    /// Owners are evaluated on the rayon pool; each worker accumulates
    /// into private buffers that are reduced before being added into
    /// `buffers`. Results match the sequential path up to summation order.
    pub fn compute_forces_parallel(
        &mut self,
        particles: &ParticleContainer,
        dt: f64,
        buffers: &mut ForceBuffers,
    ) -> TalusResult<ForceSummary> {
        buffers.ensure_capacity(particles.len())?;
        let n = buffers.len();

        let mut staged = Vec::with_capacity(PairCategory::ALL.len());
        for category in PairCategory::ALL {
            let owners: Vec<(&ParticleId, &PartnerMap)> =
                self.registry.category_map(category).iter().collect();
            let per_owner = owners
                .par_iter()
                .map(|&(&owner, partners)| {
                    partners
                        .iter()
                        .map(|(&partner, pair)| {
                            self.evaluate_pair(category, owner, partner, pair, particles, dt)
                        })
                        .collect::<TalusResult<Vec<_>>>()
                })
                .collect::<TalusResult<Vec<_>>>()?;
            staged.push(per_owner.into_iter().flatten().collect::<Vec<_>>());
        }

        let private = staged
            .par_iter()
            .flat_map(|contacts| contacts.par_iter())
            .fold(
                || ForceBuffers::zeros(n),
                |mut local, contact| {
                    contact.accumulate(&mut local);
                    local
                },
            )
            .reduce(
                || ForceBuffers::zeros(n),
                |mut a, b| {
                    a.merge(&b);
                    a
                },
            );
        buffers.merge(&private);

        let summary = self.commit_histories(&staged);
        tracing::debug!(
            evaluated = summary.pairs_evaluated,
            in_contact = summary.pairs_in_contact,
            max_overlap = summary.max_overlap,
            threads = rayon::current_num_threads(),
            "contact forces (parallel)"
        );
        Ok(summary)
    }

    /// Fine search followed by the force pass, with the threshold derived
    /// from the largest particle.
    ///
    /// On an empty rank the step is a no-op unless a pair is tracked or
    /// proposed, which is reported as [`MissingParticle`].
    ///
    /// [`MissingParticle`]: talus_types::TalusError::MissingParticle
    pub fn step(
        &mut self,
        particles: &ParticleContainer,
        candidates: &[CandidateSet],
        dt: f64,
        buffers: &mut ForceBuffers,
    ) -> TalusResult<StepReport> {
        let start = Instant::now();
        if particles.is_empty() {
            // Anything tracked or proposed names a particle this rank lacks.
            for category in PairCategory::ALL {
                if let Some((owner, _, _)) = self.registry.iter(category).next() {
                    particles.lookup(owner, category)?;
                }
            }
            for set in candidates {
                if let Some((&owner, _)) = set.pairs.iter().find(|(_, p)| !p.is_empty()) {
                    particles.lookup(owner, set.category)?;
                }
            }
            return Ok(StepReport::default());
        }
        let threshold = self.neighborhood_threshold(particles);
        let search = self.update_contacts(particles, candidates, threshold)?;
        let forces = self.compute_forces(particles, dt, buffers)?;
        Ok(StepReport {
            search,
            forces,
            wall_time_ms: start.elapsed().as_secs_f64() * 1000.0,
        })
    }

    fn evaluate_pair(
        &self,
        category: PairCategory,
        owner: ParticleId,
        partner: ParticleId,
        pair: &ContactPair,
        particles: &ParticleContainer,
        dt: f64,
    ) -> TalusResult<StagedContact> {
        let (slot_a, a) = particles.lookup(owner, category)?;
        let (slot_b, b) = particles.lookup(partner, category)?;
        let props = self.table.get(a.material, b.material)?;
        let outcome = self
            .model
            .evaluate(&pair.history, a, b, pair.periodic_offset, props, dt)?;
        Ok(StagedContact {
            slot_a,
            slot_b,
            accumulation: category.accumulation(),
            outcome,
        })
    }

    /// Writes staged histories back, in the order they were evaluated.
    fn commit_histories(&mut self, staged: &[Vec<StagedContact>]) -> ForceSummary {
        let mut summary = ForceSummary::default();
        for (category, contacts) in PairCategory::ALL.into_iter().zip(staged) {
            for ((_, _, pair), contact) in self.registry.iter_mut(category).zip(contacts) {
                pair.history = contact.outcome.history;
                summary.record(&contact.outcome);
            }
        }
        summary
    }
}

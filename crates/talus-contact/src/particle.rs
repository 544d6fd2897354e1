//! Particle state and the per-rank particle container.
//!
//! Particles are owned by the host simulation; the contact engine only
//! reads them. The container maps stable ids to dense slots, and output
//! force/torque buffers are indexed by slot.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use talus_math::DVec3;
use talus_types::{MaterialId, ParticleId, TalusError, TalusResult};

use crate::category::PairCategory;

/// Kinematic and physical state of one spherical particle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    /// Stable id, unique across ranks. Fixed at construction so the
    /// container's id → slot map stays valid.
    id: ParticleId,
    /// Centre position (m).
    pub position: DVec3,
    /// Linear velocity (m/s).
    pub velocity: DVec3,
    /// Angular velocity (rad/s).
    pub angular_velocity: DVec3,
    /// Radius (m).
    pub radius: f64,
    /// Mass (kg).
    pub mass: f64,
    /// Material tag indexing the effective-properties table.
    pub material: MaterialId,
}

impl Particle {
    /// Creates a particle at rest.
    pub fn new(
        id: ParticleId,
        position: DVec3,
        radius: f64,
        mass: f64,
        material: MaterialId,
    ) -> Self {
        Self {
            id,
            position,
            velocity: DVec3::ZERO,
            angular_velocity: DVec3::ZERO,
            radius,
            mass,
            material,
        }
    }

    pub fn id(&self) -> ParticleId {
        self.id
    }

    pub fn with_velocity(mut self, velocity: DVec3) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_angular_velocity(mut self, angular_velocity: DVec3) -> Self {
        self.angular_velocity = angular_velocity;
        self
    }

    /// Moment of inertia of a solid sphere, `2/5 m r²`.
    pub fn moment_of_inertia(&self) -> f64 {
        0.4 * self.mass * self.radius * self.radius
    }
}

/// Id → particle map for one rank, holding both local and ghost particles.
#[derive(Debug, Clone, Default)]
pub struct ParticleContainer {
    particles: Vec<Particle>,
    slots: HashMap<ParticleId, usize>,
}

impl ParticleContainer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a container, rejecting duplicate ids.
    pub fn from_particles(particles: impl IntoIterator<Item = Particle>) -> TalusResult<Self> {
        let mut container = Self::new();
        for p in particles {
            container.insert(p)?;
        }
        Ok(container)
    }

    /// Inserts a particle and returns its slot.
    pub fn insert(&mut self, particle: Particle) -> TalusResult<usize> {
        if self.slots.contains_key(&particle.id) {
            return Err(TalusError::InvalidConfig(format!(
                "duplicate particle id {}",
                particle.id
            )));
        }
        let slot = self.particles.len();
        self.slots.insert(particle.id, slot);
        self.particles.push(particle);
        Ok(slot)
    }

    pub fn get(&self, id: ParticleId) -> Option<&Particle> {
        self.slots.get(&id).map(|&slot| &self.particles[slot])
    }

    /// Mutable access to one particle. The id cannot be reassigned.
    pub fn get_mut(&mut self, id: ParticleId) -> Option<&mut Particle> {
        self.slots.get(&id).map(|&slot| &mut self.particles[slot])
    }

    /// Looks up a particle referenced by a pair of `category`.
    ///
    /// A miss means the broad phase or the registry is out of sync with
    /// this rank's particles, and is reported as a precondition error.
    #[inline]
    pub fn lookup(
        &self,
        id: ParticleId,
        category: PairCategory,
    ) -> TalusResult<(usize, &Particle)> {
        match self.slots.get(&id) {
            Some(&slot) => Ok((slot, &self.particles[slot])),
            None => Err(TalusError::MissingParticle {
                id,
                category: category.name().to_string(),
            }),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    /// Mutable access for the integrator, in slot order. Ids and slots
    /// cannot change.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Particle> {
        self.particles.iter_mut()
    }

    /// Largest radius in the container, or zero when empty.
    pub fn max_radius(&self) -> f64 {
        self.particles.iter().map(|p| p.radius).fold(0.0, f64::max)
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}

//! Contact geometry and relative velocity of a particle pair.

use talus_math::{reduced, DVec3};
use talus_types::constants::EPSILON;
use talus_types::{TalusError, TalusResult};

use crate::particle::Particle;

/// Geometry and relative motion of A with respect to B at the contact.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactKinematics {
    /// Unit vector from A's centre to B's shifted centre.
    pub normal: DVec3,
    /// Centre distance.
    pub distance: f64,
    /// `rA + rB − distance`. Negative for a gap.
    pub overlap: f64,
    pub radius_a: f64,
    pub radius_b: f64,
    /// `R* = rA·rB/(rA + rB)`.
    pub effective_radius: f64,
    /// `m* = mA·mB/(mA + mB)`.
    pub effective_mass: f64,
    /// Separation rate `−v·n`, positive while the centres move apart.
    pub normal_velocity: f64,
    /// Tangential part of the contact-point velocity.
    pub tangential_velocity: DVec3,
    /// `ωA − ωB`.
    pub relative_angular_velocity: DVec3,
}

impl ContactKinematics {
    /// Kinematics of `a` against `b` seen at `b.position − periodic_offset`.
    pub fn new(a: &Particle, b: &Particle, periodic_offset: DVec3) -> TalusResult<Self> {
        for p in [a, b] {
            if !(p.radius > 0.0 && p.radius.is_finite()) {
                return Err(TalusError::NumericalDegeneracy(format!(
                    "particle {} has radius {}",
                    p.id(), p.radius
                )));
            }
            if !(p.mass > 0.0 && p.mass.is_finite()) {
                return Err(TalusError::NumericalDegeneracy(format!(
                    "particle {} has mass {}",
                    p.id(), p.mass
                )));
            }
        }

        let branch = b.position - periodic_offset - a.position;
        let distance = branch.length();
        if !(distance > EPSILON) {
            return Err(TalusError::NumericalDegeneracy(format!(
                "coincident centres for particles {} and {}",
                a.id(), b.id()
            )));
        }
        let normal = branch / distance;

        let velocity = a.velocity - b.velocity
            + (a.radius * a.angular_velocity + b.radius * b.angular_velocity).cross(normal);
        let along = velocity.dot(normal);

        Ok(Self {
            normal,
            distance,
            overlap: a.radius + b.radius - distance,
            radius_a: a.radius,
            radius_b: b.radius,
            effective_radius: reduced(a.radius, b.radius),
            effective_mass: reduced(a.mass, b.mass),
            normal_velocity: -along,
            tangential_velocity: velocity - along * normal,
            relative_angular_velocity: a.angular_velocity - b.angular_velocity,
        })
    }

    /// Gap between the surfaces, `−overlap`.
    #[inline]
    pub fn gap(&self) -> f64 {
        -self.overlap
    }
}

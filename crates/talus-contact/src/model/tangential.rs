//! Tangential spring-dashpot with Coulomb sliding.

use talus_math::DVec3;
use talus_types::constants::EPSILON;

use super::kinematics::ContactKinematics;

/// What happens to the stored displacement once the Coulomb limit is hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlidingPolicy {
    /// Force rescaled to the limit; displacement set to `−F/kt`.
    RescaleBoth,
    /// Force clipped; displacement keeps accumulating.
    ClipForce,
    /// Force clipped; displacement set to `−(F + ct·vt)/kt`.
    ClipOverlap,
}

/// Tangential spring of one contact for one step.
#[derive(Debug, Clone, Copy)]
pub struct TangentialSpring {
    pub stiffness: f64,
    pub damping: f64,
    pub policy: SlidingPolicy,
}

/// Tangential force on A and the displacement to carry forward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TangentialResponse {
    pub force: DVec3,
    pub overlap: DVec3,
    pub sliding: bool,
}

impl TangentialSpring {
    /// Advances the displacement by one step and evaluates the force,
    /// limited to `limit` in magnitude.
    pub fn update(
        &self,
        previous: DVec3,
        kinematics: &ContactKinematics,
        limit: f64,
        dt: f64,
    ) -> TangentialResponse {
        let vt = kinematics.tangential_velocity;
        let overlap = rotate_into_plane(previous, kinematics.normal) + vt * dt;
        let force = -self.stiffness * overlap - self.damping * vt;

        let magnitude = force.length();
        let limit = limit.max(0.0);
        if magnitude <= limit || magnitude <= EPSILON {
            return TangentialResponse {
                force,
                overlap,
                sliding: false,
            };
        }

        let clipped = force * (limit / magnitude);
        let overlap = match self.policy {
            SlidingPolicy::RescaleBoth => -clipped / self.stiffness,
            SlidingPolicy::ClipForce => overlap,
            SlidingPolicy::ClipOverlap => -(clipped + self.damping * vt) / self.stiffness,
        };
        TangentialResponse {
            force: clipped,
            overlap,
            sliding: true,
        }
    }
}

/// Projects `displacement` onto the plane normal to `normal`, keeping its
/// length. A displacement parallel to `normal` is dropped.
pub fn rotate_into_plane(displacement: DVec3, normal: DVec3) -> DVec3 {
    let length_sq = displacement.length_squared();
    if length_sq <= EPSILON * EPSILON {
        return DVec3::ZERO;
    }
    let projected = displacement - displacement.dot(normal) * normal;
    let projected_sq = projected.length_squared();
    if projected_sq <= EPSILON * EPSILON {
        return DVec3::ZERO;
    }
    projected * (length_sq / projected_sq).sqrt()
}

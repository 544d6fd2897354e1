//! Rolling-resistance laws.

use talus_material::EffectiveProperties;
use talus_math::DVec3;
use talus_types::constants::EPSILON;

use super::kinematics::ContactKinematics;
use crate::config::RollingResistanceLaw;

/// A rolling-resistance law: torque on A opposing relative rotation.
pub trait RollingLaw: Send + Sync + 'static {
    const LAW: RollingResistanceLaw;

    /// Torque on A given the magnitude of the normal contact force.
    fn torque(
        &self,
        kinematics: &ContactKinematics,
        props: &EffectiveProperties,
        normal_load: f64,
    ) -> DVec3;
}

/// No rolling resistance.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoRolling;

impl RollingLaw for NoRolling {
    const LAW: RollingResistanceLaw = RollingResistanceLaw::None;

    fn torque(&self, _: &ContactKinematics, _: &EffectiveProperties, _: f64) -> DVec3 {
        DVec3::ZERO
    }
}

/// `M = −μr·R*·F·ω̂r`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConstantRolling;

impl RollingLaw for ConstantRolling {
    const LAW: RollingResistanceLaw = RollingResistanceLaw::Constant;

    fn torque(
        &self,
        kinematics: &ContactKinematics,
        props: &EffectiveProperties,
        normal_load: f64,
    ) -> DVec3 {
        let Some(direction) = rotation_direction(kinematics.relative_angular_velocity) else {
            return DVec3::ZERO;
        };
        -props.rolling_friction * kinematics.effective_radius * normal_load * direction
    }
}

/// `M = −ηr·R*·F·|R*(ωr × n)|·ω̂r`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ViscousRolling;

impl RollingLaw for ViscousRolling {
    const LAW: RollingResistanceLaw = RollingResistanceLaw::Viscous;

    fn torque(
        &self,
        kinematics: &ContactKinematics,
        props: &EffectiveProperties,
        normal_load: f64,
    ) -> DVec3 {
        let omega = kinematics.relative_angular_velocity;
        let Some(direction) = rotation_direction(omega) else {
            return DVec3::ZERO;
        };
        let radius = kinematics.effective_radius;
        let rolling_speed = (radius * omega.cross(kinematics.normal)).length();
        -props.rolling_viscous_damping * radius * normal_load * rolling_speed * direction
    }
}

fn rotation_direction(omega: DVec3) -> Option<DVec3> {
    let length = omega.length();
    (length > EPSILON).then(|| omega / length)
}

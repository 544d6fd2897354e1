//! Normal-force laws.
//!
//! Every law reports its repulsive contact part and its adhesive part
//! separately. The contact part vanishes at zero overlap; adhesion is
//! the only force a law may exert across a gap.

use std::f64::consts::PI;

use talus_material::EffectiveProperties;
use talus_math::JkrRadiusSolver;
use talus_types::TalusResult;

use super::kinematics::ContactKinematics;
use super::tangential::SlidingPolicy;
use crate::config::{ContactModelConfig, NormalForceLaw};
use crate::pair::ContactHistory;

/// `√(5/6)`, scaling Hertzian damping.
const HERTZ_DAMPING_FACTOR: f64 = 0.912_870_929_175_276_8;

/// Normal response of one contact for one step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LawResponse {
    /// Whether the surfaces are in (possibly adhesive) contact. Tangential
    /// and rolling state only survive while this holds.
    pub in_contact: bool,
    /// Repulsive contact force along the normal, damping included.
    pub normal_force: f64,
    /// Adhesive force along the normal, `≤ 0`.
    pub adhesive_force: f64,
    /// Normal load entering the Coulomb limit `μ·load`.
    pub coulomb_load: f64,
    pub tangential_stiffness: f64,
    pub tangential_damping: f64,
    pub sliding: SlidingPolicy,
    /// Contact radius to carry forward (JKR only).
    pub contact_radius: f64,
}

impl LawResponse {
    /// No contact and, optionally, a bare adhesive pull.
    pub fn separated(adhesive_force: f64) -> Self {
        Self {
            in_contact: false,
            normal_force: 0.0,
            adhesive_force,
            coulomb_load: 0.0,
            tangential_stiffness: 0.0,
            tangential_damping: 0.0,
            sliding: SlidingPolicy::ClipOverlap,
            contact_radius: 0.0,
        }
    }
}

/// A normal-force law.
pub trait NormalLaw: Send + Sync + 'static {
    const LAW: NormalForceLaw;

    fn from_config(config: &ContactModelConfig) -> Self;

    fn respond(
        &self,
        kinematics: &ContactKinematics,
        props: &EffectiveProperties,
        history: &ContactHistory,
    ) -> TalusResult<LawResponse>;
}

/// `F = k·δ − c·vn`.
#[inline]
pub fn linear_normal_force(
    stiffness: f64,
    damping: f64,
    overlap: f64,
    normal_velocity: f64,
) -> f64 {
    stiffness * overlap - damping * normal_velocity
}

/// Elastic Hertz force `4/3·E*·√R*·δ^1.5`; zero for `δ ≤ 0`.
#[inline]
pub fn hertz_normal_force(effective_modulus: f64, effective_radius: f64, overlap: f64) -> f64 {
    if overlap <= 0.0 {
        return 0.0;
    }
    4.0 / 3.0 * effective_modulus * effective_radius.sqrt() * overlap.powf(1.5)
}

/// Hertz stiffness `sn = 2E*√(R*δ)`, `st = 8G*√(R*δ)`.
fn hertz_stiffness(kinematics: &ContactKinematics, props: &EffectiveProperties) -> (f64, f64) {
    let root = (kinematics.effective_radius * kinematics.overlap).sqrt();
    (2.0 * props.youngs_modulus * root, 8.0 * props.shear_modulus * root)
}

/// `−2√(5/6)·β·√(s·m*)`.
fn hertz_damping(
    stiffness: f64,
    kinematics: &ContactKinematics,
    props: &EffectiveProperties,
) -> f64 {
    let mass = kinematics.effective_mass;
    -2.0 * HERTZ_DAMPING_FACTOR * props.damping_ratio * (stiffness * mass).sqrt()
}

/// Hertz contact part shared by the Hertzian laws. `None` for `δ ≤ 0`.
fn hertz_contact(
    kinematics: &ContactKinematics,
    props: &EffectiveProperties,
    sliding: SlidingPolicy,
) -> Option<LawResponse> {
    if kinematics.overlap <= 0.0 {
        return None;
    }
    let (sn, st) = hertz_stiffness(kinematics, props);
    let damping = hertz_damping(sn, kinematics, props);
    let normal_force = 2.0 / 3.0 * sn * kinematics.overlap - damping * kinematics.normal_velocity;
    Some(LawResponse {
        in_contact: true,
        normal_force,
        adhesive_force: 0.0,
        coulomb_load: normal_force.abs(),
        tangential_stiffness: st,
        tangential_damping: hertz_damping(st, kinematics, props),
        sliding,
        contact_radius: 0.0,
    })
}

// ─── Linear ──────────────────────────────────────────────────

/// Linear spring-dashpot calibrated to Hertz at a characteristic velocity.
#[derive(Debug, Clone, Copy)]
pub struct Linear {
    pub characteristic_velocity: f64,
}

impl Linear {
    /// `kn = 16/15·√R*·E*·(15/16·m*·vc²/(√R*·E*))^(1/5)`.
    pub fn normal_stiffness(
        &self,
        kinematics: &ContactKinematics,
        props: &EffectiveProperties,
    ) -> f64 {
        let scale = kinematics.effective_radius.sqrt() * props.youngs_modulus;
        let vc = self.characteristic_velocity;
        16.0 / 15.0 * scale * (15.0 / 16.0 * kinematics.effective_mass * vc * vc / scale).powf(0.2)
    }
}

impl NormalLaw for Linear {
    const LAW: NormalForceLaw = NormalForceLaw::Linear;

    fn from_config(config: &ContactModelConfig) -> Self {
        Self {
            characteristic_velocity: config.characteristic_velocity,
        }
    }

    fn respond(
        &self,
        kinematics: &ContactKinematics,
        props: &EffectiveProperties,
        _history: &ContactHistory,
    ) -> TalusResult<LawResponse> {
        if kinematics.overlap <= 0.0 {
            return Ok(LawResponse::separated(0.0));
        }
        let mass = kinematics.effective_mass;
        let beta = props.damping_ratio;

        let kn = self.normal_stiffness(kinematics, props);
        let cn = -2.0 * beta * (mass * kn).sqrt();
        let kt = talus_types::constants::LINEAR_TANGENTIAL_STIFFNESS_RATIO * kn;
        let ct = -2.0 * beta * (mass * kt).sqrt();

        let normal_force =
            linear_normal_force(kn, cn, kinematics.overlap, kinematics.normal_velocity);
        Ok(LawResponse {
            in_contact: true,
            normal_force,
            adhesive_force: 0.0,
            coulomb_load: normal_force.abs(),
            tangential_stiffness: kt,
            tangential_damping: ct,
            sliding: SlidingPolicy::ClipOverlap,
            contact_radius: 0.0,
        })
    }
}

// ─── Hertz family ────────────────────────────────────────────

/// Hertz-Mindlin with force and displacement rescaled on sliding.
#[derive(Debug, Clone, Copy, Default)]
pub struct Hertz;

impl NormalLaw for Hertz {
    const LAW: NormalForceLaw = NormalForceLaw::Hertz;

    fn from_config(_: &ContactModelConfig) -> Self {
        Self
    }

    fn respond(
        &self,
        kinematics: &ContactKinematics,
        props: &EffectiveProperties,
        _history: &ContactHistory,
    ) -> TalusResult<LawResponse> {
        Ok(hertz_contact(kinematics, props, SlidingPolicy::RescaleBoth)
            .unwrap_or_else(|| LawResponse::separated(0.0)))
    }
}

/// Hertz-Mindlin, tangential force clipped at the Coulomb limit.
#[derive(Debug, Clone, Copy, Default)]
pub struct HertzMindlinLimitForce;

impl NormalLaw for HertzMindlinLimitForce {
    const LAW: NormalForceLaw = NormalForceLaw::HertzMindlinLimitForce;

    fn from_config(_: &ContactModelConfig) -> Self {
        Self
    }

    fn respond(
        &self,
        kinematics: &ContactKinematics,
        props: &EffectiveProperties,
        _history: &ContactHistory,
    ) -> TalusResult<LawResponse> {
        Ok(hertz_contact(kinematics, props, SlidingPolicy::ClipForce)
            .unwrap_or_else(|| LawResponse::separated(0.0)))
    }
}

/// Hertz-Mindlin, tangential displacement clipped at the Coulomb limit.
#[derive(Debug, Clone, Copy, Default)]
pub struct HertzMindlinLimitOverlap;

impl NormalLaw for HertzMindlinLimitOverlap {
    const LAW: NormalForceLaw = NormalForceLaw::HertzMindlinLimitOverlap;

    fn from_config(_: &ContactModelConfig) -> Self {
        Self
    }

    fn respond(
        &self,
        kinematics: &ContactKinematics,
        props: &EffectiveProperties,
        _history: &ContactHistory,
    ) -> TalusResult<LawResponse> {
        Ok(hertz_contact(kinematics, props, SlidingPolicy::ClipOverlap)
            .unwrap_or_else(|| LawResponse::separated(0.0)))
    }
}

// ─── Adhesive laws ───────────────────────────────────────────

/// Hertz with Johnson–Kendall–Roberts adhesion.
///
/// The neck forms on first touch and persists into negative overlap
/// until the critical overlap, after which the pair snaps apart.
#[derive(Debug, Clone, Copy, Default)]
pub struct HertzJkr;

impl HertzJkr {
    /// Full JKR force `4E*a³/(3R*) − √(8πwE*a³)` at contact radius `a`.
    pub fn jkr_force(
        props: &EffectiveProperties,
        effective_radius: f64,
        contact_radius: f64,
    ) -> f64 {
        let e = props.youngs_modulus;
        let a3 = contact_radius.powi(3);
        let adhesion = (8.0 * PI * props.work_of_adhesion * e * a3).sqrt();
        4.0 * e * a3 / (3.0 * effective_radius) - adhesion
    }
}

impl NormalLaw for HertzJkr {
    const LAW: NormalForceLaw = NormalForceLaw::HertzJkr;

    fn from_config(_: &ContactModelConfig) -> Self {
        Self
    }

    fn respond(
        &self,
        kinematics: &ContactKinematics,
        props: &EffectiveProperties,
        history: &ContactHistory,
    ) -> TalusResult<LawResponse> {
        let overlap = kinematics.overlap;
        let neck_formed = history.contact_radius > 0.0;
        if overlap <= 0.0 && !neck_formed {
            return Ok(LawResponse::separated(0.0));
        }

        let radius = kinematics.effective_radius;
        let w = props.work_of_adhesion;
        let solver = JkrRadiusSolver::new(radius, props.youngs_modulus, w);
        let contact_radius = match solver.solve(overlap, history.contact_radius) {
            Some(a) if a > 0.0 => a,
            _ => return Ok(LawResponse::separated(0.0)),
        };

        let (normal_force, hertz_elastic) = if overlap > 0.0 {
            let (sn, _) = hertz_stiffness(kinematics, props);
            let elastic = 2.0 / 3.0 * sn * overlap;
            (elastic - hertz_damping(sn, kinematics, props) * kinematics.normal_velocity, elastic)
        } else {
            (0.0, 0.0)
        };
        let adhesive_force = if w > 0.0 {
            Self::jkr_force(props, radius, contact_radius) - hertz_elastic
        } else {
            0.0
        };

        let pull_off = 1.5 * PI * w * radius;
        let kt = 8.0 * props.shear_modulus * contact_radius;
        Ok(LawResponse {
            in_contact: true,
            normal_force,
            adhesive_force,
            coulomb_load: (normal_force + adhesive_force + 2.0 * pull_off).abs(),
            tangential_stiffness: kt,
            tangential_damping: hertz_damping(kt, kinematics, props),
            sliding: SlidingPolicy::ClipOverlap,
            contact_radius,
        })
    }
}

/// Hertz with Derjaguin–Muller–Toporov adhesion: a constant pull
/// `−2πwR*` while the gap is at or below the cut-off.
#[derive(Debug, Clone, Copy)]
pub struct HertzDmt {
    pub cutoff: f64,
}

impl HertzDmt {
    /// Adhesive term at `gap`; exactly zero beyond the cut-off.
    pub fn adhesive_force(
        &self,
        props: &EffectiveProperties,
        effective_radius: f64,
        gap: f64,
    ) -> f64 {
        let w = props.work_of_adhesion;
        if w > 0.0 && gap <= self.cutoff {
            -2.0 * PI * w * effective_radius
        } else {
            0.0
        }
    }
}

impl NormalLaw for HertzDmt {
    const LAW: NormalForceLaw = NormalForceLaw::HertzDmt;

    fn from_config(config: &ContactModelConfig) -> Self {
        Self {
            cutoff: config.dmt_cutoff,
        }
    }

    fn respond(
        &self,
        kinematics: &ContactKinematics,
        props: &EffectiveProperties,
        _history: &ContactHistory,
    ) -> TalusResult<LawResponse> {
        let adhesive_force =
            self.adhesive_force(props, kinematics.effective_radius, kinematics.gap());
        Ok(match hertz_contact(kinematics, props, SlidingPolicy::ClipOverlap) {
            Some(response) => LawResponse {
                adhesive_force,
                ..response
            },
            None => LawResponse::separated(adhesive_force),
        })
    }
}

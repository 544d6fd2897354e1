//! Contact force model.
//!
//! A pure function of (history, particle A, particle B, periodic offset,
//! effective properties, timestep) producing the contact force and the
//! history to store. The normal-force law and the rolling-resistance law
//! are bound once at construction into a monomorphized [`Kernel`], so the
//! per-pair path never branches on the law selection.

pub mod kinematics;
pub mod normal;
pub mod rolling;
pub mod tangential;

use talus_material::EffectiveProperties;
use talus_math::DVec3;
use talus_types::{TalusError, TalusResult};

use crate::config::{ContactModelConfig, NormalForceLaw, RollingResistanceLaw};
use crate::pair::ContactHistory;
use crate::particle::Particle;

pub use kinematics::ContactKinematics;
pub use normal::{
    hertz_normal_force, linear_normal_force, Hertz, HertzDmt, HertzJkr, HertzMindlinLimitForce,
    HertzMindlinLimitOverlap, LawResponse, Linear, NormalLaw,
};
pub use rolling::{ConstantRolling, NoRolling, RollingLaw, ViscousRolling};
pub use tangential::{rotate_into_plane, SlidingPolicy, TangentialResponse, TangentialSpring};

/// Force exchanged by one pair in one step.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ContactForce {
    /// Unit normal from A towards B.
    pub normal: DVec3,
    /// Overlap `δ` at evaluation.
    pub overlap: f64,
    /// Repulsive contact force magnitude along the normal. Zero at `δ = 0`.
    pub normal_force: f64,
    /// Adhesive force along the normal, `≤ 0`.
    pub adhesive_force: f64,
    /// Tangential force on A.
    pub tangential_force: DVec3,
    /// Rolling-resistance torque on A.
    pub rolling_torque: DVec3,
    pub in_contact: bool,
    radius_a: f64,
    radius_b: f64,
}

impl ContactForce {
    /// Total force on A.
    pub fn force_on_a(&self) -> DVec3 {
        -(self.normal_force + self.adhesive_force) * self.normal + self.tangential_force
    }

    /// Total force on B, `−force_on_a`.
    pub fn force_on_b(&self) -> DVec3 {
        -self.force_on_a()
    }

    /// Lever-arm torque of the contact force about A plus rolling torque.
    pub fn torque_on_a(&self) -> DVec3 {
        (self.radius_a * self.normal).cross(self.force_on_a()) + self.rolling_torque
    }

    /// Lever-arm torque of the contact force about B minus rolling torque.
    pub fn torque_on_b(&self) -> DVec3 {
        (-self.radius_b * self.normal).cross(self.force_on_b()) - self.rolling_torque
    }
}

/// Force and history produced by one evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactOutcome {
    pub force: ContactForce,
    pub history: ContactHistory,
}

/// A resolved normal × rolling law pair.
pub trait ContactKernel: Send + Sync {
    fn evaluate(
        &self,
        history: &ContactHistory,
        a: &Particle,
        b: &Particle,
        periodic_offset: DVec3,
        props: &EffectiveProperties,
        dt: f64,
    ) -> TalusResult<ContactOutcome>;

    /// Returns the kernel name, `<normal>+<rolling>`.
    fn name(&self) -> &str;
}

/// Kernel specialised on one normal law and one rolling law.
pub struct Kernel<N: NormalLaw, R: RollingLaw> {
    normal: N,
    rolling: R,
    name: String,
}

impl<N: NormalLaw, R: RollingLaw> Kernel<N, R> {
    pub fn new(normal: N, rolling: R) -> Self {
        Self {
            normal,
            rolling,
            name: format!("{}+{}", N::LAW, R::LAW),
        }
    }
}

impl<N: NormalLaw, R: RollingLaw> ContactKernel for Kernel<N, R> {
    fn evaluate(
        &self,
        history: &ContactHistory,
        a: &Particle,
        b: &Particle,
        periodic_offset: DVec3,
        props: &EffectiveProperties,
        dt: f64,
    ) -> TalusResult<ContactOutcome> {
        let kinematics = ContactKinematics::new(a, b, periodic_offset)?;
        let response = self.normal.respond(&kinematics, props, history)?;

        let mut force = ContactForce {
            normal: kinematics.normal,
            overlap: kinematics.overlap,
            normal_force: response.normal_force,
            adhesive_force: response.adhesive_force,
            tangential_force: DVec3::ZERO,
            rolling_torque: DVec3::ZERO,
            in_contact: response.in_contact,
            radius_a: kinematics.radius_a,
            radius_b: kinematics.radius_b,
        };

        // Contact ended: keep only the adhesive pull and drop all history.
        if !response.in_contact {
            return Ok(ContactOutcome {
                force,
                history: ContactHistory::default(),
            });
        }

        let stiffness = response.tangential_stiffness;
        if !(stiffness > 0.0 && stiffness.is_finite()) {
            return Err(TalusError::NumericalDegeneracy(format!(
                "tangential stiffness {stiffness} for particles {} and {}",
                a.id(), b.id()
            )));
        }
        let spring = TangentialSpring {
            stiffness,
            damping: response.tangential_damping,
            policy: response.sliding,
        };
        let tangential = spring.update(
            history.tangential_overlap,
            &kinematics,
            props.friction * response.coulomb_load,
            dt,
        );
        force.tangential_force = tangential.force;

        if kinematics.overlap > 0.0 {
            force.rolling_torque =
                self.rolling.torque(&kinematics, props, response.normal_force.abs());
        }

        Ok(ContactOutcome {
            force,
            history: ContactHistory {
                tangential_overlap: tangential.overlap,
                rolling_torque: force.rolling_torque,
                contact_radius: response.contact_radius,
            },
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Contact force model bound to one law pair.
pub struct ContactForceModel {
    config: ContactModelConfig,
    kernel: Box<dyn ContactKernel>,
}

impl ContactForceModel {
    /// Validates `config` and resolves its law pair.
    pub fn new(config: &ContactModelConfig) -> TalusResult<Self> {
        config.validate()?;
        let kernel = match config.normal_law {
            NormalForceLaw::Linear => bind(Linear::from_config(config), config.rolling_law),
            NormalForceLaw::Hertz => bind(Hertz::from_config(config), config.rolling_law),
            NormalForceLaw::HertzMindlinLimitForce => {
                bind(HertzMindlinLimitForce::from_config(config), config.rolling_law)
            }
            NormalForceLaw::HertzMindlinLimitOverlap => {
                bind(HertzMindlinLimitOverlap::from_config(config), config.rolling_law)
            }
            NormalForceLaw::HertzJkr => bind(HertzJkr::from_config(config), config.rolling_law),
            NormalForceLaw::HertzDmt => bind(HertzDmt::from_config(config), config.rolling_law),
        };
        Ok(Self {
            config: config.clone(),
            kernel,
        })
    }

    /// Evaluates one pair. `b` is seen at `b.position − periodic_offset`.
    pub fn evaluate(
        &self,
        history: &ContactHistory,
        a: &Particle,
        b: &Particle,
        periodic_offset: DVec3,
        props: &EffectiveProperties,
        dt: f64,
    ) -> TalusResult<ContactOutcome> {
        if !(dt > 0.0 && dt.is_finite()) {
            return Err(TalusError::InvalidConfig(format!("timestep must be positive, got {dt}")));
        }
        self.kernel.evaluate(history, a, b, periodic_offset, props, dt)
    }

    pub fn config(&self) -> &ContactModelConfig {
        &self.config
    }

    pub fn normal_law(&self) -> NormalForceLaw {
        self.config.normal_law
    }

    pub fn rolling_law(&self) -> RollingResistanceLaw {
        self.config.rolling_law
    }

    /// Returns the resolved kernel name.
    pub fn name(&self) -> &str {
        self.kernel.name()
    }
}

impl std::fmt::Debug for ContactForceModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContactForceModel")
            .field("kernel", &self.kernel.name())
            .finish()
    }
}

fn bind<N: NormalLaw>(normal: N, rolling: RollingResistanceLaw) -> Box<dyn ContactKernel> {
    match rolling {
        RollingResistanceLaw::None => Box::new(Kernel::new(normal, NoRolling)),
        RollingResistanceLaw::Constant => Box::new(Kernel::new(normal, ConstantRolling)),
        RollingResistanceLaw::Viscous => Box::new(Kernel::new(normal, ViscousRolling)),
    }
}

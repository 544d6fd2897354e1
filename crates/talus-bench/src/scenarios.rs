//! Benchmark scenarios — particles, materials and contact config for each
//! test case.
//!
//! Three canonical scenarios:
//! 1. **Head-on** — two glass beads colliding along x
//! 2. **Periodic chain** — a ring of beads colliding across a periodic
//!    boundary
//! 3. **Adhesive pair** — two cohesive silica grains pulled apart

use serde::{Deserialize, Serialize};

use talus_contact::{ContactModelConfig, NormalForceLaw, Particle, RollingResistanceLaw};
use talus_material::MaterialDatabase;
use talus_math::DVec3;
use talus_types::{MaterialId, ParticleId, TalusError, TalusResult};

/// Which scenario to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioKind {
    HeadOn,
    PeriodicChain,
    AdhesivePair,
}

impl ScenarioKind {
    pub fn all() -> &'static [ScenarioKind] {
        &[
            ScenarioKind::HeadOn,
            ScenarioKind::PeriodicChain,
            ScenarioKind::AdhesivePair,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            ScenarioKind::HeadOn => "head_on",
            ScenarioKind::PeriodicChain => "periodic_chain",
            ScenarioKind::AdhesivePair => "adhesive_pair",
        }
    }

    /// Parses a scenario name.
    pub fn from_name(name: &str) -> Option<ScenarioKind> {
        Self::all().iter().copied().find(|k| k.name() == name)
    }
}

/// A fully specified scenario.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub kind: ScenarioKind,
    pub particles: Vec<Particle>,
    pub materials: MaterialDatabase,
    pub config: ContactModelConfig,
    /// Number of timesteps to simulate.
    pub timesteps: u32,
    /// Timestep size (seconds).
    pub dt: f64,
    /// Periodic box length along x, if any.
    pub periodic_length: Option<f64>,
    /// Use the rayon force path.
    pub parallel: bool,
}

/// Id and sphere mass of a preset material.
fn preset(materials: &MaterialDatabase, name: &str, radius: f64) -> TalusResult<(MaterialId, f64)> {
    let id = materials
        .id_of(name)
        .ok_or_else(|| TalusError::InvalidMaterial(format!("missing preset '{name}'")))?;
    let props = materials.get(id).ok_or(TalusError::UnknownMaterial(id))?;
    Ok((id, props.sphere_mass(radius)))
}

impl Scenario {
    /// Two 1 mm glass beads approaching at 1 m/s relative speed, a
    /// micrometre apart.
    ///
    /// The contact lasts a few microseconds; the timestep resolves it
    /// with several hundred steps.
    pub fn head_on() -> TalusResult<Self> {
        let materials = MaterialDatabase::with_defaults();
        let radius = 1.0e-3;
        let (glass, mass) = preset(&materials, "glass_beads", radius)?;
        let gap = 1.0e-6;

        let particles = vec![
            Particle::new(ParticleId(0), DVec3::ZERO, radius, mass, glass)
                .with_velocity(DVec3::new(0.5, 0.0, 0.0)),
            Particle::new(
                ParticleId(1),
                DVec3::new(2.0 * radius + gap, 0.0, 0.0),
                radius,
                mass,
                glass,
            )
            .with_velocity(DVec3::new(-0.5, 0.0, 0.0)),
        ];

        Ok(Self {
            kind: ScenarioKind::HeadOn,
            particles,
            materials,
            config: ContactModelConfig::default(),
            timesteps: 2000,
            dt: 1.0e-8,
            periodic_length: None,
            parallel: false,
        })
    }

    /// Eight glass beads on a periodic ring along x, neighbours a
    /// micrometre apart and alternately approaching, so one of the four
    /// collisions happens across the boundary.
    pub fn periodic_chain() -> TalusResult<Self> {
        let materials = MaterialDatabase::with_defaults();
        let radius = 1.0e-3;
        let (glass, mass) = preset(&materials, "glass_beads", radius)?;
        let spacing = 2.0 * radius + 1.0e-6;
        let count = 8_u64;

        let particles = (0..count)
            .map(|i| {
                let sign = if i % 2 == 0 { -1.0 } else { 1.0 };
                Particle::new(
                    ParticleId(i),
                    DVec3::new((i as f64 + 0.5) * spacing, 0.0, 0.0),
                    radius,
                    mass,
                    glass,
                )
                .with_velocity(DVec3::new(0.05 * sign, 0.002 * sign, 0.0))
            })
            .collect();

        Ok(Self {
            kind: ScenarioKind::PeriodicChain,
            particles,
            materials,
            config: ContactModelConfig::with_laws(
                NormalForceLaw::Hertz,
                RollingResistanceLaw::Constant,
            ),
            timesteps: 2000,
            dt: 1.0e-7,
            periodic_length: Some(count as f64 * spacing),
            parallel: false,
        })
    }

    /// Two 100 µm silica grains near their zero-load JKR overlap, pulled
    /// apart fast enough to break the neck.
    pub fn adhesive_pair() -> TalusResult<Self> {
        let materials = MaterialDatabase::with_defaults();
        let radius = 1.0e-4;
        let (silica, mass) = preset(&materials, "silica_powder", radius)?;
        let overlap = 5.0e-7;

        let particles = vec![
            Particle::new(ParticleId(0), DVec3::ZERO, radius, mass, silica)
                .with_velocity(DVec3::new(-0.2, 0.0, 0.0))
                .with_angular_velocity(DVec3::new(0.0, 0.0, 50.0)),
            Particle::new(
                ParticleId(1),
                DVec3::new(2.0 * radius - overlap, 0.0, 0.0),
                radius,
                mass,
                silica,
            )
            .with_velocity(DVec3::new(0.2, 0.0, 0.0)),
        ];

        Ok(Self {
            kind: ScenarioKind::AdhesivePair,
            particles,
            materials,
            config: ContactModelConfig::adhesive(),
            timesteps: 2000,
            dt: 1.0e-7,
            periodic_length: None,
            parallel: false,
        })
    }

    /// Create a scenario by kind.
    pub fn from_kind(kind: ScenarioKind) -> TalusResult<Self> {
        match kind {
            ScenarioKind::HeadOn => Self::head_on(),
            ScenarioKind::PeriodicChain => Self::periodic_chain(),
            ScenarioKind::AdhesivePair => Self::adhesive_pair(),
        }
    }

    /// Replace the contact configuration.
    pub fn with_config(mut self, config: ContactModelConfig) -> Self {
        self.config = config;
        self
    }

    /// Select the rayon force path.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

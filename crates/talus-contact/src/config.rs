//! Contact model configuration.
//!
//! The normal-force law and the rolling-resistance law are chosen once,
//! validated, and bound into a resolved kernel by
//! [`ContactForceModel::new`](crate::model::ContactForceModel::new).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use talus_types::constants::{
    DEFAULT_CHARACTERISTIC_VELOCITY, DEFAULT_DMT_CUTOFF, DEFAULT_NEIGHBORHOOD_MARGIN,
};
use talus_types::{TalusError, TalusResult};

/// Normal-force law.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NormalForceLaw {
    /// Linear spring-dashpot.
    Linear,
    /// Hertz with full sliding rescale.
    Hertz,
    /// Hertz-Mindlin, tangential force clipped at the Coulomb limit.
    HertzMindlinLimitForce,
    /// Hertz-Mindlin, tangential displacement clipped at the Coulomb limit.
    HertzMindlinLimitOverlap,
    /// Hertz with JKR adhesion.
    HertzJkr,
    /// Hertz with DMT adhesion.
    HertzDmt,
}

impl NormalForceLaw {
    pub const ALL: [NormalForceLaw; 6] = [
        NormalForceLaw::Linear,
        NormalForceLaw::Hertz,
        NormalForceLaw::HertzMindlinLimitForce,
        NormalForceLaw::HertzMindlinLimitOverlap,
        NormalForceLaw::HertzJkr,
        NormalForceLaw::HertzDmt,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::Hertz => "hertz",
            Self::HertzMindlinLimitForce => "hertz_mindlin_limit_force",
            Self::HertzMindlinLimitOverlap => "hertz_mindlin_limit_overlap",
            Self::HertzJkr => "hertz_jkr",
            Self::HertzDmt => "hertz_dmt",
        }
    }

    /// Whether the law produces an attractive term.
    pub fn is_adhesive(self) -> bool {
        matches!(self, Self::HertzJkr | Self::HertzDmt)
    }
}

impl fmt::Display for NormalForceLaw {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for NormalForceLaw {
    type Err = TalusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|law| law.name() == s)
            .ok_or_else(|| TalusError::InvalidConfig(format!("unknown normal force law '{s}'")))
    }
}

/// Rolling-resistance law.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RollingResistanceLaw {
    #[default]
    None,
    /// Constant-magnitude torque opposing relative rotation.
    Constant,
    /// Torque proportional to the relative rolling velocity.
    Viscous,
}

impl RollingResistanceLaw {
    pub const ALL: [RollingResistanceLaw; 3] = [
        RollingResistanceLaw::None,
        RollingResistanceLaw::Constant,
        RollingResistanceLaw::Viscous,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Constant => "constant",
            Self::Viscous => "viscous",
        }
    }
}

impl fmt::Display for RollingResistanceLaw {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RollingResistanceLaw {
    type Err = TalusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL.into_iter().find(|law| law.name() == s).ok_or_else(|| {
            TalusError::InvalidConfig(format!("unknown rolling resistance law '{s}'"))
        })
    }
}

/// Configuration for the contact model and fine search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactModelConfig {
    /// Normal-force law.
    pub normal_law: NormalForceLaw,

    /// Rolling-resistance law.
    pub rolling_law: RollingResistanceLaw,

    /// Largest gap (m) at which the DMT attractive term still acts.
    pub dmt_cutoff: f64,

    /// Characteristic impact velocity (m/s) calibrating the linear
    /// spring stiffness.
    pub characteristic_velocity: f64,

    /// Neighborhood factor. Pairs are tracked while their centre
    /// distance is below `margin * largest_diameter`.
    pub neighborhood_margin: f64,
}

impl Default for ContactModelConfig {
    fn default() -> Self {
        Self {
            normal_law: NormalForceLaw::HertzMindlinLimitOverlap,
            rolling_law: RollingResistanceLaw::Constant,
            dmt_cutoff: DEFAULT_DMT_CUTOFF,
            characteristic_velocity: DEFAULT_CHARACTERISTIC_VELOCITY,
            neighborhood_margin: DEFAULT_NEIGHBORHOOD_MARGIN,
        }
    }
}

impl ContactModelConfig {
    /// Cohesive powders: JKR adhesion with viscous rolling resistance.
    pub fn adhesive() -> Self {
        Self {
            normal_law: NormalForceLaw::HertzJkr,
            rolling_law: RollingResistanceLaw::Viscous,
            ..Default::default()
        }
    }

    /// Config for a specific law pair, other fields default.
    pub fn with_laws(normal_law: NormalForceLaw, rolling_law: RollingResistanceLaw) -> Self {
        Self {
            normal_law,
            rolling_law,
            ..Default::default()
        }
    }

    /// Rejects parameters the selected laws cannot run with.
    pub fn validate(&self) -> TalusResult<()> {
        if !(self.neighborhood_margin.is_finite() && self.neighborhood_margin >= 1.0) {
            return Err(TalusError::InvalidConfig(format!(
                "neighborhood_margin must be finite and >= 1, got {}",
                self.neighborhood_margin
            )));
        }
        if !self.dmt_cutoff.is_finite() || !self.characteristic_velocity.is_finite() {
            return Err(TalusError::InvalidConfig(
                "dmt_cutoff and characteristic_velocity must be finite".into(),
            ));
        }
        if self.normal_law == NormalForceLaw::HertzDmt && self.dmt_cutoff <= 0.0 {
            return Err(TalusError::InvalidConfig(format!(
                "hertz_dmt requires a positive dmt_cutoff, got {}",
                self.dmt_cutoff
            )));
        }
        if self.normal_law == NormalForceLaw::Linear && self.characteristic_velocity <= 0.0 {
            return Err(TalusError::InvalidConfig(format!(
                "linear requires a positive characteristic_velocity, got {}",
                self.characteristic_velocity
            )));
        }
        Ok(())
    }

    /// Squared fine-search threshold for particles no larger than
    /// `max_radius`.
    pub fn neighborhood_threshold(&self, max_radius: f64) -> f64 {
        let distance = self.neighborhood_margin * 2.0 * max_radius;
        distance * distance
    }

    /// Parses a TOML config and validates it.
    pub fn from_toml_str(source: &str) -> TalusResult<Self> {
        let config: Self =
            toml::from_str(source).map_err(|e| TalusError::Serialization(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Serializes to TOML.
    pub fn to_toml_string(&self) -> TalusResult<String> {
        toml::to_string(self).map_err(|e| TalusError::Serialization(e.to_string()))
    }
}

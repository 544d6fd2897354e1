//! Physical particle material properties.

use serde::{Deserialize, Serialize};
use talus_types::{TalusError, TalusResult};

/// Physical properties of a particle material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialProperties {
    /// Human-readable name (e.g., "glass_beads").
    pub name: String,

    /// Bulk density (kg/m³). Used by scenario builders to derive masses.
    pub density: f64,

    /// Young's modulus (Pa).
    pub youngs_modulus: f64,

    /// Poisson ratio, in (-1, 0.5].
    pub poisson_ratio: f64,

    /// Coefficient of restitution, in (0, 1].
    pub restitution: f64,

    /// Coulomb sliding friction coefficient.
    pub friction: f64,

    /// Rolling friction coefficient (constant rolling resistance).
    #[serde(default)]
    pub rolling_friction: f64,

    /// Rolling viscous damping coefficient (s/m).
    #[serde(default)]
    pub rolling_viscous_damping: f64,

    /// Surface energy (J/m²). Zero disables adhesion.
    #[serde(default)]
    pub surface_energy: f64,
}

impl MaterialProperties {
    /// Shear modulus `E / (2(1 + ν))`.
    pub fn shear_modulus(&self) -> f64 {
        self.youngs_modulus / (2.0 * (1.0 + self.poisson_ratio))
    }

    /// Mass of a sphere of `radius` made of this material.
    pub fn sphere_mass(&self, radius: f64) -> f64 {
        self.density * 4.0 / 3.0 * std::f64::consts::PI * radius.powi(3)
    }

    /// Checks every parameter against its physical range.
    pub fn validate(&self) -> TalusResult<()> {
        let fail = |what: &str| {
            Err(TalusError::InvalidMaterial(format!(
                "'{}': {what}",
                self.name
            )))
        };

        if !(self.density > 0.0) {
            return fail("density must be positive");
        }
        if !(self.youngs_modulus > 0.0) {
            return fail("Young's modulus must be positive");
        }
        if !(self.poisson_ratio > -1.0 && self.poisson_ratio <= 0.5) {
            return fail("Poisson ratio must lie in (-1, 0.5]");
        }
        if !(self.restitution > 0.0 && self.restitution <= 1.0) {
            return fail("restitution must lie in (0, 1]");
        }
        if !(self.friction >= 0.0) {
            return fail("friction must be non-negative");
        }
        if !(self.rolling_friction >= 0.0) {
            return fail("rolling friction must be non-negative");
        }
        if !(self.rolling_viscous_damping >= 0.0) {
            return fail("rolling viscous damping must be non-negative");
        }
        if !(self.surface_energy >= 0.0) {
            return fail("surface energy must be non-negative");
        }
        Ok(())
    }
}

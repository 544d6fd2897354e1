//! Effective (pairwise) contact properties.
//!
//! Contact laws operate on combined properties of the two materials
//! meeting at a contact. These are reduced once at setup, never per
//! contact, and stored for every ordered material pair.

use serde::{Deserialize, Serialize};
use talus_math::harmonic_mean;
use talus_types::{MaterialId, TalusError, TalusResult};

use crate::database::MaterialDatabase;
use crate::properties::MaterialProperties;

/// Combined contact properties for one ordered pair of materials.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EffectiveProperties {
    /// Effective Young's modulus `E*` (Pa).
    pub youngs_modulus: f64,
    /// Effective shear modulus `G*` (Pa).
    pub shear_modulus: f64,
    /// Effective coefficient of restitution.
    pub restitution: f64,
    /// Damping parameter `β = ln e / √(ln² e + π²)`, in [-1, 0].
    pub damping_ratio: f64,
    /// Effective sliding friction coefficient.
    pub friction: f64,
    /// Effective rolling friction coefficient.
    pub rolling_friction: f64,
    /// Effective rolling viscous damping coefficient.
    pub rolling_viscous_damping: f64,
    /// Work of adhesion `w` (J/m²).
    pub work_of_adhesion: f64,
}

impl EffectiveProperties {
    /// Combines two materials.
    pub fn combine(a: &MaterialProperties, b: &MaterialProperties) -> TalusResult<Self> {
        let (ea, eb) = (a.youngs_modulus, b.youngs_modulus);
        let (na, nb) = (a.poisson_ratio, b.poisson_ratio);

        let youngs_modulus = ea * eb / (eb * (1.0 - na * na) + ea * (1.0 - nb * nb));
        let shear_modulus =
            ea * eb / (2.0 * (eb * (2.0 - na) * (1.0 + na) + ea * (2.0 - nb) * (1.0 + nb)));
        let restitution = harmonic_mean(a.restitution, b.restitution);
        let log_e = restitution.ln();
        let damping_ratio = log_e / (log_e * log_e + std::f64::consts::PI.powi(2)).sqrt();
        let work_of_adhesion = a.surface_energy + b.surface_energy
            - (a.surface_energy.sqrt() - b.surface_energy.sqrt()).powi(2);

        let props = Self {
            youngs_modulus,
            shear_modulus,
            restitution,
            damping_ratio,
            friction: harmonic_mean(a.friction, b.friction),
            rolling_friction: harmonic_mean(a.rolling_friction, b.rolling_friction),
            rolling_viscous_damping: harmonic_mean(
                a.rolling_viscous_damping,
                b.rolling_viscous_damping,
            ),
            work_of_adhesion,
        };
        props.validate().map_err(|e| match e {
            TalusError::InvalidMaterial(msg) => {
                TalusError::InvalidMaterial(format!("'{}' / '{}': {msg}", a.name, b.name))
            }
            other => other,
        })?;
        Ok(props)
    }

    /// Rejects non-positive stiffness and non-finite entries.
    pub fn validate(&self) -> TalusResult<()> {
        if !(self.youngs_modulus > 0.0 && self.youngs_modulus.is_finite()) {
            return Err(TalusError::InvalidMaterial(
                "effective Young's modulus must be positive".into(),
            ));
        }
        if !(self.shear_modulus > 0.0 && self.shear_modulus.is_finite()) {
            return Err(TalusError::InvalidMaterial(
                "effective shear modulus must be positive".into(),
            ));
        }
        if !(self.damping_ratio <= 0.0 && self.damping_ratio >= -1.0) {
            return Err(TalusError::InvalidMaterial(
                "damping ratio must lie in [-1, 0]".into(),
            ));
        }
        if !(self.friction >= 0.0
            && self.rolling_friction >= 0.0
            && self.rolling_viscous_damping >= 0.0)
        {
            return Err(TalusError::InvalidMaterial(
                "friction coefficients must be non-negative".into(),
            ));
        }
        if !(self.work_of_adhesion >= 0.0) {
            return Err(TalusError::InvalidMaterial(
                "work of adhesion must be non-negative".into(),
            ));
        }
        Ok(())
    }
}

/// Dense `n × n` table of [`EffectiveProperties`] indexed by material ids.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectivePropertiesTable {
    material_count: usize,
    entries: Vec<EffectiveProperties>,
}

impl EffectivePropertiesTable {
    /// Reduces every ordered material pair of `db`.
    pub fn from_database(db: &MaterialDatabase) -> TalusResult<Self> {
        if db.is_empty() {
            return Err(TalusError::InvalidMaterial(
                "cannot build an effective-properties table without materials".into(),
            ));
        }

        let n = db.len();
        let mut entries = Vec::with_capacity(n * n);
        for (_, a) in db.iter() {
            for (_, b) in db.iter() {
                entries.push(EffectiveProperties::combine(a, b)?);
            }
        }

        tracing::debug!(materials = n, entries = entries.len(), "effective properties table built");

        Ok(Self {
            material_count: n,
            entries,
        })
    }

    /// Builds a table from precomputed entries laid out row-major.
    ///
    /// Every entry is validated, so a table can never hold a
    /// non-positive stiffness.
    pub fn from_entries(
        material_count: usize,
        entries: Vec<EffectiveProperties>,
    ) -> TalusResult<Self> {
        if material_count == 0 || entries.len() != material_count * material_count {
            return Err(TalusError::InvalidMaterial(format!(
                "expected {} entries for {} materials, got {}",
                material_count * material_count,
                material_count,
                entries.len()
            )));
        }
        for entry in &entries {
            entry.validate()?;
        }
        Ok(Self {
            material_count,
            entries,
        })
    }

    /// Table holding a single material combined with itself.
    pub fn uniform(props: EffectiveProperties) -> TalusResult<Self> {
        Self::from_entries(1, vec![props])
    }

    /// Entry for the ordered pair `(a, b)`.
    #[inline]
    pub fn get(&self, a: MaterialId, b: MaterialId) -> TalusResult<&EffectiveProperties> {
        if a.index() >= self.material_count {
            return Err(TalusError::UnknownMaterial(a));
        }
        if b.index() >= self.material_count {
            return Err(TalusError::UnknownMaterial(b));
        }
        Ok(&self.entries[a.index() * self.material_count + b.index()])
    }

    pub fn material_count(&self) -> usize {
        self.material_count
    }

    /// Re-checks shape and every entry. Tables read from disk skip the
    /// constructors, so consumers validate before use.
    pub fn validate(&self) -> TalusResult<()> {
        let expected = self.material_count * self.material_count;
        if self.material_count == 0 || self.entries.len() != expected {
            return Err(TalusError::InvalidMaterial(format!(
                "table for {} materials holds {} entries",
                self.material_count,
                self.entries.len()
            )));
        }
        self.entries.iter().try_for_each(EffectiveProperties::validate)
    }
}

//! Material database with physically-grounded particle presets.

use std::collections::HashMap;

use talus_types::{MaterialId, TalusError, TalusResult};

use crate::properties::MaterialProperties;

/// An indexed collection of particle materials.
///
/// Materials receive dense [`MaterialId`]s in registration order; the
/// effective-properties table is laid out over the same indices.
#[derive(Debug, Clone, Default)]
pub struct MaterialDatabase {
    materials: Vec<MaterialProperties>,
    by_name: HashMap<String, MaterialId>,
}

impl MaterialDatabase {
    /// Creates a database with the built-in presets.
    pub fn with_defaults() -> Self {
        let mut db = Self::empty();
        for props in [glass_beads(), steel_shot(), alumina(), polystyrene(), silica_powder()] {
            // Presets are known-valid and uniquely named.
            let id = MaterialId(db.materials.len() as u16);
            db.by_name.insert(props.name.clone(), id);
            db.materials.push(props);
        }
        db
    }

    /// Creates an empty database.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Validates and registers a material, returning its id.
    ///
    /// Registering a name twice replaces the properties but keeps the id.
    pub fn register(&mut self, props: MaterialProperties) -> TalusResult<MaterialId> {
        props.validate()?;

        if let Some(&id) = self.by_name.get(&props.name) {
            self.materials[id.index()] = props;
            return Ok(id);
        }

        if self.materials.len() > u16::MAX as usize {
            return Err(TalusError::InvalidMaterial(
                "material database is full".into(),
            ));
        }

        let id = MaterialId(self.materials.len() as u16);
        self.by_name.insert(props.name.clone(), id);
        self.materials.push(props);
        Ok(id)
    }

    /// Looks up a material by id.
    pub fn get(&self, id: MaterialId) -> Option<&MaterialProperties> {
        self.materials.get(id.index())
    }

    /// Looks up a material id by name.
    pub fn id_of(&self, name: &str) -> Option<MaterialId> {
        self.by_name.get(name).copied()
    }

    /// Iterates materials in id order.
    pub fn iter(&self) -> impl Iterator<Item = (MaterialId, &MaterialProperties)> {
        self.materials
            .iter()
            .enumerate()
            .map(|(i, props)| (MaterialId(i as u16), props))
    }

    /// Returns all registered material names in id order.
    pub fn names(&self) -> Vec<&str> {
        self.materials.iter().map(|m| m.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}

// ─── Built-in Particle Presets ────────────────────────────────────────

/// Soda-lime glass beads, the usual DEM calibration material.
fn glass_beads() -> MaterialProperties {
    MaterialProperties {
        name: "glass_beads".into(),
        density: 2500.0,
        youngs_modulus: 6.3e10,
        poisson_ratio: 0.22,
        restitution: 0.95,
        friction: 0.3,
        rolling_friction: 0.01,
        rolling_viscous_damping: 0.0,
        surface_energy: 0.0,
    }
}

/// Steel shot.
fn steel_shot() -> MaterialProperties {
    MaterialProperties {
        name: "steel_shot".into(),
        density: 7800.0,
        youngs_modulus: 2.0e11,
        poisson_ratio: 0.29,
        restitution: 0.9,
        friction: 0.25,
        rolling_friction: 0.005,
        rolling_viscous_damping: 0.0,
        surface_energy: 0.0,
    }
}

/// Sintered alumina spheres.
fn alumina() -> MaterialProperties {
    MaterialProperties {
        name: "alumina".into(),
        density: 3900.0,
        youngs_modulus: 3.7e11,
        poisson_ratio: 0.22,
        restitution: 0.85,
        friction: 0.4,
        rolling_friction: 0.02,
        rolling_viscous_damping: 0.0,
        surface_energy: 0.0,
    }
}

/// Polystyrene beads. Soft and lossy.
fn polystyrene() -> MaterialProperties {
    MaterialProperties {
        name: "polystyrene".into(),
        density: 1050.0,
        youngs_modulus: 3.4e9,
        poisson_ratio: 0.34,
        restitution: 0.7,
        friction: 0.45,
        rolling_friction: 0.05,
        rolling_viscous_damping: 0.1,
        surface_energy: 0.0,
    }
}

/// Fine cohesive silica powder for the adhesive laws.
fn silica_powder() -> MaterialProperties {
    MaterialProperties {
        name: "silica_powder".into(),
        density: 2200.0,
        youngs_modulus: 1.0e7,
        poisson_ratio: 0.17,
        restitution: 0.5,
        friction: 0.5,
        rolling_friction: 0.1,
        rolling_viscous_damping: 0.2,
        surface_energy: 0.05,
    }
}

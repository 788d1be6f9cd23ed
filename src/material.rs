use crate::constants::AVOGADRO;
use crate::error::ConfigError;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Immutable description of a production-target material.
///
/// Channel simulators only read atomic number, mass number and density;
/// the radiation length additionally enters the electromagnetic-shower
/// channels (bremsstrahlung, resonant annihilation) through the areal atom
/// density of one radiation length of material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Element symbol, e.g. "W"
    pub name: String,
    /// Atomic number Z
    pub z: f64,
    /// Mass number A (grams per mole)
    pub a: f64,
    /// Density [g/cm^3]
    pub density: f64,
    /// Radiation length [g/cm^2]
    pub radiation_length: f64,
}

/// Built-in single-element target materials keyed by symbol.
static MATERIALS: Lazy<HashMap<&'static str, Material>> = Lazy::new(|| {
    let mut m = HashMap::new();
    let mut insert = |name: &'static str, z: f64, a: f64, density: f64, x0: f64| {
        m.insert(
            name,
            Material {
                name: name.to_string(),
                z,
                a,
                density,
                radiation_length: x0,
            },
        );
    };
    insert("Be", 4.0, 9.012, 1.848, 65.19);
    insert("C", 6.0, 12.011, 2.21, 42.70);
    insert("Al", 13.0, 26.982, 2.699, 24.01);
    insert("Ar", 18.0, 39.948, 1.396, 19.55);
    insert("Fe", 26.0, 55.845, 7.874, 13.84);
    insert("Cu", 29.0, 63.546, 8.96, 12.86);
    insert("W", 74.0, 183.84, 19.3, 6.76);
    insert("Pb", 82.0, 207.2, 11.35, 6.37);
    m
});

impl Material {
    /// Look up a built-in material by element symbol.
    pub fn named(name: &str) -> Result<Self, ConfigError> {
        MATERIALS
            .get(name)
            .cloned()
            .ok_or_else(|| ConfigError::UnknownMaterial(name.to_string()))
    }

    /// Areal atom density of a slab of the given depth [atoms/cm^2].
    pub fn atoms_per_area(&self, depth_cm: f64) -> f64 {
        depth_cm * self.density * AVOGADRO / self.a
    }

    /// Areal atom density of one radiation length of material [atoms/cm^2].
    pub fn radiation_length_atoms_per_area(&self) -> f64 {
        self.radiation_length * AVOGADRO / self.a
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_lookup() {
        let w = Material::named("W").unwrap();
        assert_eq!(w.z, 74.0);
        assert!(w.density > 19.0);
        assert!(Material::named("Unobtainium").is_err());
    }

    #[test]
    fn areal_densities() {
        let be = Material::named("Be").unwrap();
        // 10 cm of beryllium
        let n = be.atoms_per_area(10.0);
        let expected = 10.0 * 1.848 * AVOGADRO / 9.012;
        assert!((n - expected).abs() / expected < 1e-12);
        // one radiation length is X0 / rho cm deep
        let n_x0 = be.radiation_length_atoms_per_area();
        assert!((n_x0 - be.atoms_per_area(be.radiation_length / be.density)).abs() / n_x0 < 1e-12);
    }
}

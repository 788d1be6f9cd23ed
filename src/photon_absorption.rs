use crate::constants::{AVOGADRO, HBARC};
use crate::error::ConfigError;
use crate::material::Material;
use crate::utilities::interpolate_log_log;
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Photon energy grid of the attenuation tables [MeV].
const ENERGY_GRID: [f64; 14] = [
    0.01, 0.02, 0.05, 0.1, 0.2, 0.5, 1.0, 2.0, 5.0, 10.0, 50.0, 100.0, 1000.0, 10000.0,
];

/// Total photon mass attenuation coefficients mu/rho [cm^2/g] on [`ENERGY_GRID`],
/// tabulated from standard photon attenuation data for the built-in materials.
static MU_OVER_RHO: Lazy<HashMap<&'static str, [f64; 14]>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert(
        "Be",
        [
            0.6466, 0.2251, 0.1554, 0.1328, 0.1089, 0.0773, 0.0565, 0.0394, 0.0235, 0.0157,
            0.00747, 0.00655, 0.00584, 0.00576,
        ],
    );
    m.insert(
        "C",
        [
            2.373, 0.4438, 0.1871, 0.1514, 0.1229, 0.0870, 0.0636, 0.0444, 0.0270, 0.0196, 0.0108,
            0.0102, 0.0099, 0.0098,
        ],
    );
    m.insert(
        "Al",
        [
            26.23, 3.441, 0.3681, 0.1704, 0.1223, 0.0844, 0.0614, 0.0432, 0.0284, 0.0232, 0.0188,
            0.0188, 0.0192, 0.0194,
        ],
    );
    m.insert(
        "Ar",
        [
            62.66, 8.629, 0.8181, 0.2011, 0.1247, 0.0867, 0.0636, 0.0447, 0.0307, 0.0266, 0.0245,
            0.0248, 0.0258, 0.0261,
        ],
    );
    m.insert(
        "Fe",
        [
            170.6, 25.68, 1.958, 0.3717, 0.1460, 0.0840, 0.0600, 0.0425, 0.0314, 0.0299, 0.0314,
            0.0330, 0.0344, 0.0348,
        ],
    );
    m.insert(
        "Cu",
        [
            215.9, 33.79, 2.613, 0.4584, 0.1559, 0.0836, 0.0589, 0.0420, 0.0318, 0.0310, 0.0337,
            0.0357, 0.0375, 0.0379,
        ],
    );
    m.insert(
        "W",
        [
            96.91, 65.73, 5.949, 4.438, 0.7844, 0.1378, 0.0662, 0.0438, 0.0405, 0.0465, 0.0731,
            0.0862, 0.0969, 0.0995,
        ],
    );
    m.insert(
        "Pb",
        [
            130.6, 86.36, 8.041, 5.549, 0.9985, 0.1614, 0.0708, 0.0461, 0.0427, 0.0497, 0.0787,
            0.0931, 0.1050, 0.1080,
        ],
    );
    m
});

/// Total photon absorption cross section per atom of a target material,
/// evaluated by log-log interpolation of tabulated attenuation data.
#[derive(Debug, Clone)]
pub struct AbsCrossSection {
    energies: Vec<f64>,
    /// Cross section per atom [cm^2] on the energy grid
    sigma_cm2: Vec<f64>,
}

impl AbsCrossSection {
    /// Build the per-atom absorption cross section for a material.
    pub fn for_material(material: &Material) -> Result<Self, ConfigError> {
        let mu = MU_OVER_RHO
            .get(material.name.as_str())
            .ok_or_else(|| ConfigError::UnknownMaterial(material.name.clone()))?;
        let atoms_per_gram = AVOGADRO / material.a;
        Ok(AbsCrossSection {
            energies: ENERGY_GRID.to_vec(),
            sigma_cm2: mu.iter().map(|x| x / atoms_per_gram).collect(),
        })
    }

    /// Cross section per atom at the given photon energy [cm^2].
    pub fn sigma_cm2(&self, energy: f64) -> f64 {
        interpolate_log_log(&self.energies, &self.sigma_cm2, energy)
    }

    /// Cross section per atom at the given photon energy [MeV^-2].
    pub fn sigma_mev(&self, energy: f64) -> f64 {
        self.sigma_cm2(energy) / (HBARC * HBARC)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tungsten_cross_section_scale() {
        let w = Material::named("W").unwrap();
        let xs = AbsCrossSection::for_material(&w).unwrap();
        // mu/rho = 0.0662 cm^2/g at 1 MeV corresponds to about 2e-23 cm^2/atom
        let s = xs.sigma_cm2(1.0);
        assert!(s > 1.5e-23 && s < 2.5e-23, "sigma = {}", s);
        // grid point reproduces the table exactly
        let expected = 0.0662 * 183.84 / AVOGADRO;
        assert!((s - expected).abs() / expected < 1e-12);
    }

    #[test]
    fn interpolation_between_grid_points() {
        let fe = Material::named("Fe").unwrap();
        let xs = AbsCrossSection::for_material(&fe).unwrap();
        let lo = xs.sigma_cm2(1.0);
        let hi = xs.sigma_cm2(2.0);
        let mid = xs.sigma_cm2(1.5);
        assert!(mid < lo && mid > hi);
    }

    #[test]
    fn natural_units_bridge() {
        let pb = Material::named("Pb").unwrap();
        let xs = AbsCrossSection::for_material(&pb).unwrap();
        let e = 5.0;
        assert!((xs.sigma_mev(e) * HBARC * HBARC - xs.sigma_cm2(e)).abs() < 1e-40);
    }
}

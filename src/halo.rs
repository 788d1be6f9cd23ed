//! Galactic dark-matter halo velocity distribution and differential flux.

use crate::constants::C_LIGHT;
use crate::utilities::heaviside;
use nalgebra::Vector3;
use once_cell::sync::Lazy;
use rand::Rng;
use rand_distr::{Distribution, Normal};
use special::Error;
use std::f64::consts::{PI, SQRT_2};

/// Local dark-matter density [keV cm⁻³].
pub const RHO_CHI: f64 = 0.4e6;
/// Galactic escape velocity [cm s⁻¹].
pub const V_ESC: f64 = 544.0e6;
/// Velocity dispersion of the halo [cm s⁻¹].
pub const V_0: f64 = 220.0e6;
/// Earth velocity through the halo [cm s⁻¹].
pub const V_E: f64 = 244.0e6;

/// Normalization of the escape-truncated Maxwellian.
static N_ESC: Lazy<f64> = Lazy::new(|| {
    let x = V_ESC / V_0;
    x.error() - 2.0 * x * (-x * x).exp() * PI.sqrt()
});

/// Halo velocity profile, `v` in cm s⁻¹.
pub fn velocity_profile(v: f64) -> f64 {
    let shifted = (v + V_E) / V_0;
    (-shifted * shifted).exp() / (*N_ESC * PI.powf(1.5) * V_0.powi(3))
}

/// Draw one lab-frame dark-matter speed [cm s⁻¹].
///
/// Galactic-frame velocity components are Gaussian with dispersion
/// `V_0`/√2, rejected above the escape speed, then shifted by the Earth
/// velocity.
pub fn sample_speed<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    let normal = Normal::new(0.0, V_0 / SQRT_2).unwrap();
    loop {
        let galactic = Vector3::new(
            normal.sample(rng),
            normal.sample(rng),
            normal.sample(rng),
        );
        if galactic.norm() >= V_ESC {
            continue;
        }
        return (galactic - Vector3::new(0.0, 0.0, V_E)).norm();
    }
}

/// Differential dark-matter flux [cm⁻² s⁻¹] per unit dimensionless
/// velocity, for `v` in units of c and mass in keV. Velocities whose
/// lab-frame speed falls more than one dispersion below escape are cut.
pub fn dm_flux(v: f64, mass_kev: f64) -> f64 {
    heaviside(C_LIGHT * v + V_0 - V_ESC, 1.0)
        * 4.0
        * PI
        * C_LIGHT
        * (RHO_CHI / mass_kev)
        * (C_LIGHT * v).powi(3)
        * velocity_profile(C_LIGHT * v)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn normalization_is_positive() {
        assert!(*N_ESC > 0.0 && *N_ESC < 1.0);
    }

    #[test]
    fn profile_falls_with_velocity() {
        assert!(velocity_profile(1.0e6) > velocity_profile(3.0e8));
        assert!(velocity_profile(5.0e8) > 0.0);
    }

    #[test]
    fn flux_cut_below_threshold() {
        // threshold sits at (V_ESC - V_0)/c of the dimensionless velocity
        let v_cut = (V_ESC - V_0) / C_LIGHT;
        assert_eq!(dm_flux(0.5 * v_cut, 1.0e3), 0.0);
        assert!(dm_flux(2.0 * v_cut, 1.0e3) > 0.0);
    }

    #[test]
    fn flux_scales_inversely_with_mass() {
        let v = 0.05;
        assert_relative_eq!(
            dm_flux(v, 2.0e3),
            0.5 * dm_flux(v, 1.0e3),
            max_relative = 1e-12
        );
    }

    #[test]
    fn sampled_speeds_stay_bound_to_the_halo() {
        use rand::rngs::StdRng;
        use rand::SeedableRng;
        let mut rng = StdRng::seed_from_u64(77);
        let draws: Vec<f64> = (0..300).map(|_| sample_speed(&mut rng)).collect();
        for &v in &draws {
            assert!(v > 0.0 && v < V_ESC + V_E);
        }
        let mean = draws.iter().sum::<f64>() / draws.len() as f64;
        // boosted Maxwellian mean sits between the dispersion and escape speed
        assert!(mean > V_0 && mean < V_ESC);
    }
}

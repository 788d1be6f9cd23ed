//! Production cross sections for the electromagnetic channels.
//!
//! All cross sections are per target atom in natural units (MeV powers);
//! screening enters through the Tsai radiation logarithms of the target
//! nucleus. Differential forms are clamped to zero outside the physical
//! phase space so that uniform Monte Carlo sampling over a rectangular
//! window stays well defined.

use crate::constants::{ALPHA, M_E};
use special::Gamma;
use std::f64::consts::PI;

/// Tsai radiation logarithms, Z^2 ln(184 Z^-1/3) + Z ln(1194 Z^-2/3).
fn screening_chi(z: f64) -> f64 {
    z * z * (184.15 * z.powf(-1.0 / 3.0)).ln() + z * (1194.0 * z.powf(-2.0 / 3.0)).ln()
}

/// Total Primakoff conversion cross section gamma + N -> a + N in the
/// complete-screening limit [MeV^-2]. `g` is the photon coupling [MeV^-1].
pub fn primakoff_sigma(energy: f64, g: f64, ma: f64, z: f64) -> f64 {
    if energy <= ma {
        return 0.0;
    }
    let beta = (1.0 - (ma / energy).powi(2)).max(0.0).sqrt();
    ALPHA * g * g / 4.0 * screening_chi(z) * beta
}

/// Differential Compton-like cross section d sigma / d E_a for
/// gamma + e -> a + e on the Z electrons of the target atom [MeV^-3].
///
/// The spin-averaged squared amplitude follows the crossing structure of
/// Compton scattering with one photon vertex replaced by the electron
/// coupling `g` and mass corrections in the boson mass. Outside the
/// kinematically allowed lab energy window the result is zero.
pub fn compton_dsigma_dea(ea: f64, egamma: f64, g: f64, ma: f64, z: f64) -> f64 {
    let s = 2.0 * M_E * egamma + M_E * M_E;
    if s <= (M_E + ma) * (M_E + ma) {
        return 0.0;
    }
    let sqrt_s = s.sqrt();
    // lab energy window from the CM kinematics
    let ea_cm = (s + ma * ma - M_E * M_E) / (2.0 * sqrt_s);
    let pa_cm = (ea_cm * ea_cm - ma * ma).max(0.0).sqrt();
    let beta_cm = egamma / (egamma + M_E);
    let gamma_cm = (egamma + M_E) / sqrt_s;
    let ea_min = gamma_cm * (ea_cm - beta_cm * pa_cm);
    let ea_max = gamma_cm * (ea_cm + beta_cm * pa_cm);
    if ea < ea_min || ea > ea_max {
        return 0.0;
    }

    let a = s - M_E * M_E;
    let b = ma * ma - 2.0 * M_E * ea;
    let inv_sum = 1.0 / a + 1.0 / b;
    let msq = 8.0 * PI * ALPHA * g * g
        * (-(a / b + b / a) + 2.0 * ma * ma * inv_sum - ma.powi(4) * inv_sum * inv_sum);
    z * 2.0 * M_E * msq.max(0.0) / (16.0 * PI * a * a)
}

/// Differential bremsstrahlung cross section d sigma / d E_a for
/// e + N -> e + N + a in the Weizsacker-Williams approximation [MeV^-3].
pub fn brem_dsigma_dea(ea: f64, ee: f64, g: f64, ma: f64, z: f64) -> f64 {
    if ea <= 0.0 || ea >= ee || ea < ma {
        return 0.0;
    }
    let x = ea / ee;
    let u_tilde = ma * ma * (1.0 - x) / x + M_E * M_E * x;
    ALPHA * g * g / (4.0 * PI) * screening_chi(z) / ee * x * (1.0 + (1.0 - x) * (1.0 - x))
        / u_tilde
}

/// Differential associated-production cross section d sigma / d cos(theta*)
/// for e+ e- -> gamma + a on the Z electrons of the target atom [MeV^-2].
/// `ep_lab` is the lab positron energy on a target electron at rest.
pub fn associated_dsigma_dcos_cm(cos_cm: f64, ep_lab: f64, ma: f64, g: f64, z: f64) -> f64 {
    let s = 2.0 * M_E * (ep_lab + M_E);
    if s <= ma * ma {
        return 0.0;
    }
    // t and u channel electron exchange, collinear peaks cut off by the
    // electron mass
    let denom = 1.0 - cos_cm * cos_cm + 4.0 * M_E * M_E / s;
    z * PI * ALPHA * g * g / (2.0 * s) * (s - ma * ma) / s * (1.0 + cos_cm * cos_cm) / denom
}

/// Energy-integrated resonant annihilation cross section e+ e- -> a,
/// pi g^2 / (4 m_e) [MeV^-1].
pub fn resonance_peak(g: f64) -> f64 {
    PI * g * g / (4.0 * M_E)
}

/// Probability density for an electron injected at energy `ei` to be found
/// at energy `ef` after `t` radiation lengths of shower development,
/// following the analytic track-length distribution.
pub fn track_length_prob(ei: f64, ef: f64, t: f64) -> f64 {
    if ef >= ei || ef <= 0.0 {
        return 0.0;
    }
    let b = 4.0 / 3.0;
    ((ei / ef).ln().powf(b * t - 1.0) / (ei * (b * t).gamma())).abs()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn primakoff_threshold_and_scaling() {
        assert_eq!(primakoff_sigma(5.0, 1e-6, 10.0, 74.0), 0.0);
        let s1 = primakoff_sigma(100.0, 1e-6, 1.0, 74.0);
        let s2 = primakoff_sigma(100.0, 2e-6, 1.0, 74.0);
        assert!(s1 > 0.0);
        assert_relative_eq!(s2 / s1, 4.0, max_relative = 1e-12);
    }

    #[test]
    fn compton_vanishes_outside_lab_window() {
        let (egamma, g, ma, z) = (200.0, 1e-4, 10.0, 74.0);
        // far below the minimum lab energy of the boson
        assert_eq!(compton_dsigma_dea(15.0, egamma, g, ma, z), 0.0);
        // above the beam energy
        assert_eq!(compton_dsigma_dea(250.0, egamma, g, ma, z), 0.0);
        // mid-window is physical and positive
        let mid = compton_dsigma_dea(150.0, egamma, g, ma, z);
        assert!(mid > 0.0);
    }

    #[test]
    fn compton_below_threshold_is_zero() {
        // s < (m_e + ma)^2
        assert_eq!(compton_dsigma_dea(1.0, 1.0, 1e-4, 10.0, 74.0), 0.0);
    }

    #[test]
    fn brem_spectrum_shape() {
        let (ee, g, ma, z) = (1000.0, 1e-4, 20.0, 74.0);
        assert_eq!(brem_dsigma_dea(ee, ee, g, ma, z), 0.0);
        assert_eq!(brem_dsigma_dea(ma / 2.0, ee, g, ma, z), 0.0);
        // for ma well above m_e the spectrum is peaked toward x -> 1
        let low = brem_dsigma_dea(100.0, ee, g, ma, z);
        let high = brem_dsigma_dea(900.0, ee, g, ma, z);
        assert!(high > low);
    }

    #[test]
    fn associated_production_is_finite_at_endpoints() {
        let (ep, ma, g, z) = (500.0, 5.0, 1e-4, 74.0);
        let edge = associated_dsigma_dcos_cm(1.0, ep, ma, g, z);
        let center = associated_dsigma_dcos_cm(0.0, ep, ma, g, z);
        assert!(edge.is_finite() && edge > 0.0);
        // collinear enhancement
        assert!(edge > center);
    }

    #[test]
    fn track_length_distribution() {
        // energy can only be lost
        assert_eq!(track_length_prob(10.0, 20.0, 1.0), 0.0);
        // b t = 1 collapses the power and the gamma function
        let t = 3.0 / 4.0;
        assert_relative_eq!(track_length_prob(10.0, 5.0, t), 0.1, max_relative = 1e-12);
    }
}

use crate::constants::M_E;
use std::f64::consts::PI;

/// Rest-frame width for decay to two photons, g^2 m^3 / (64 pi).
/// `g` is the photon coupling [MeV^-1], `m` the boson mass [MeV].
pub fn width_gg(g: f64, m: f64) -> f64 {
    g * g * m * m * m / (64.0 * PI)
}

/// Rest-frame width for decay to an electron pair,
/// g^2 m / (8 pi) * sqrt(1 - 4 m_e^2 / m^2).
/// Below threshold (m < 2 m_e) the channel is closed and the width is zero.
pub fn width_ee(g: f64, m: f64) -> f64 {
    let ratio = 2.0 * M_E / m;
    if ratio >= 1.0 {
        return 0.0;
    }
    g * g * m / (8.0 * PI) * (1.0 - ratio * ratio).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn diphoton_width_scaling() {
        let w = width_gg(1e-6, 10.0);
        assert_relative_eq!(width_gg(2e-6, 10.0), 4.0 * w, max_relative = 1e-12);
        assert_relative_eq!(width_gg(1e-6, 20.0), 8.0 * w, max_relative = 1e-12);
    }

    #[test]
    fn electron_width_threshold() {
        assert_eq!(width_ee(1e-4, 1.0), 0.0);
        assert_eq!(width_ee(1e-4, 2.0 * M_E), 0.0);
        assert!(width_ee(1e-4, 1.1) > 0.0);
    }

    #[test]
    fn electron_width_high_mass_limit() {
        // far above threshold the phase-space factor approaches unity
        let g = 1e-4;
        let m = 500.0;
        assert_relative_eq!(
            width_ee(g, m),
            g * g * m / (8.0 * PI),
            max_relative = 1e-4
        );
    }
}

//! Analytic solar axion fluxes.

/// Energy of the monoenergetic ⁵⁷Fe solar line [keV].
pub const FE57_LINE_KEV: f64 = 14.4;

/// Monoenergetic ⁵⁷Fe solar flux at 14.4 keV [cm⁻² s⁻¹] for an effective
/// nucleon coupling `gp`.
pub fn fe57_solar_flux(gp: f64) -> f64 {
    4.56e23 * gp * gp
}

/// Differential solar Primakoff flux [cm⁻² s⁻¹ keV⁻¹].
///
/// `ea_kev` in keV, `gagamma_gev` in GeV⁻¹. Vanishes quadratically at
/// zero energy.
pub fn primakoff_solar_flux(ea_kev: f64, gagamma_gev: f64) -> f64 {
    if ea_kev <= 0.0 {
        return 0.0;
    }
    let g8 = gagamma_gev * 1e8;
    let x = ea_kev / 1.103;
    g8 * g8 * (5.95e14 / 1.103) * x.powi(3) / (x.exp() - 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn iron_line_scales_with_coupling_squared() {
        assert_relative_eq!(
            fe57_solar_flux(2e-6),
            4.0 * fe57_solar_flux(1e-6),
            max_relative = 1e-12
        );
    }

    #[test]
    fn primakoff_spectrum_shape() {
        assert_eq!(primakoff_solar_flux(0.0, 1e-10), 0.0);
        let low = primakoff_solar_flux(1.0, 1e-10);
        let peak = primakoff_solar_flux(3.3, 1e-10);
        let tail = primakoff_solar_flux(30.0, 1e-10);
        assert!(peak > low);
        assert!(peak > tail);
        // well below the peak the spectrum rises as E³/(e^x - 1)
        assert!(low > 0.0 && tail > 0.0);
    }

    #[test]
    fn primakoff_scales_with_coupling_squared() {
        assert_relative_eq!(
            primakoff_solar_flux(5.0, 2e-10),
            4.0 * primakoff_solar_flux(5.0, 1e-10),
            max_relative = 1e-12
        );
    }
}

// Physical constants in MeV-based natural units.
//
// Energies, masses and decay widths are MeV throughout the crate; lengths at
// the geometry boundary are meters (detector baselines) or centimeters
// (target depths), bridged by the hbar*c constants below.

/// Electron mass [MeV]
pub const M_E: f64 = 0.510_998_95;

/// Muon mass [MeV]
pub const M_MU: f64 = 105.658_374_5;

/// Charged pion mass [MeV]
pub const M_PI: f64 = 139.570_39;

/// Neutral pion mass [MeV]
pub const M_PI0: f64 = 134.976_8;

/// Charged kaon mass [MeV]
pub const M_K: f64 = 493.677;

/// Fine structure constant
pub const ALPHA: f64 = 7.297_352_569_3e-3;

/// Fermi coupling constant [MeV^-2]
pub const G_F: f64 = 1.166_378_7e-11;

/// CKM matrix element |V_ud|
pub const V_UD: f64 = 0.974_17;

/// CKM matrix element |V_us|
pub const V_US: f64 = 0.224_3;

/// Pion decay constant [MeV]
pub const F_PI: f64 = 130.2;

/// Kaon decay constant [MeV]
pub const F_K: f64 = 155.7;

/// Total decay width of the charged pion [MeV] (tau = 26.033 ns)
pub const PION_WIDTH: f64 = 2.528_4e-14;

/// Total decay width of the charged kaon [MeV] (tau = 12.380 ns)
pub const KAON_WIDTH: f64 = 5.317e-14;

/// hbar*c [MeV cm]; squares convert cross sections from MeV^-2 to cm^2
pub const HBARC: f64 = 1.973_269_804e-11;

/// hbar*c [MeV m]; divides meter-valued path lengths into inverse MeV
pub const HBARC_M: f64 = 1.973_269_804e-13;

/// Avogadro constant [mol^-1]
pub const AVOGADRO: f64 = 6.022_140_76e23;

/// Speed of light [cm/s], for halo velocity distributions
pub const C_LIGHT: f64 = 2.997_924_58e10;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_bridges_are_consistent() {
        // 1 m expressed in inverse MeV, times hbar*c in MeV m, is 1 m again
        let one_meter_inv_mev = 1.0 / HBARC_M;
        assert!((one_meter_inv_mev * HBARC_M - 1.0).abs() < 1e-12);
        // cm and m bridges differ by exactly 1e2
        assert!((HBARC / HBARC_M - 100.0).abs() < 1e-9);
    }

    #[test]
    fn meson_widths_match_lifetimes() {
        // Gamma = hbar / tau with hbar = 6.582e-22 MeV s
        let hbar_mev_s = 6.582_119_569e-22;
        assert!((PION_WIDTH - hbar_mev_s / 2.6033e-8).abs() / PION_WIDTH < 1e-3);
        assert!((KAON_WIDTH - hbar_mev_s / 1.238e-8).abs() / KAON_WIDTH < 1e-3);
    }
}

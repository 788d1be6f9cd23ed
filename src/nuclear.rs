use crate::constants::ALPHA;
use crate::decay::width_ee;
use crate::detector::{Detector, DetectorVolume};
use crate::flux::{DetectorWeights, FluxSample, FluxSpectrum};
use crate::propagation;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Isoscalar nuclear magnetic moment entering the multipole branching ratio.
const MU_0: f64 = 0.88;
/// Isovector nuclear magnetic moment.
const MU_1: f64 = 4.71;

/// Multipole parameters of a nuclear transition.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransitionMultipole {
    /// Angular momentum of the transition
    pub j: f64,
    /// E/M multipole mixing ratio
    pub delta: f64,
    /// Isospin mixing parameter
    pub beta: f64,
    /// Nuclear-structure ratio
    pub eta: f64,
}

impl Default for TransitionMultipole {
    fn default() -> Self {
        TransitionMultipole {
            j: 1.0,
            delta: 0.0,
            beta: 1.0,
            eta: 0.5,
        }
    }
}

/// Boson emission in nuclear de-excitation.
///
/// Deterministic: each input transition line (energy, rate) maps to one
/// sample with the analytic axion-to-photon multipole branching ratio. The
/// nucleon couplings set the production rate; decay in flight is driven by
/// the electron coupling, so post-hoc rescaling acts on `gae` and the
/// produced flux itself is not rescaled.
#[derive(Debug, Clone)]
pub struct NuclearFlux {
    /// Boson mass [MeV]
    pub ma: f64,
    /// Electron coupling driving decay in flight
    pub gae: f64,
    /// Isoscalar nucleon coupling
    pub gann0: f64,
    /// Isovector nucleon coupling
    pub gann1: f64,
    pub detector: Detector,
    pub is_isotropic: bool,
    pub multipole: TransitionMultipole,
    transition_rates: Vec<(f64, f64)>,
}

impl NuclearFlux {
    /// `transition_rates` holds (transition energy [MeV], rate [1/s]) lines.
    pub fn new(
        transition_rates: Vec<(f64, f64)>,
        ma: f64,
        gae: f64,
        gann0: f64,
        gann1: f64,
        detector: Detector,
    ) -> Self {
        NuclearFlux {
            ma,
            gae,
            gann0,
            gann1,
            detector,
            is_isotropic: true,
            multipole: TransitionMultipole::default(),
            transition_rates,
        }
    }

    pub fn decay_width(&self) -> f64 {
        width_ee(self.gae, self.ma)
    }

    /// Branching ratio of boson emission relative to the gamma transition.
    pub fn branching_ratio(&self, energy: f64) -> f64 {
        let m = &self.multipole;
        let momentum_ratio = (energy * energy - self.ma * self.ma).max(0.0).sqrt() / energy;
        (m.j / (m.j + 1.0)) / (1.0 + m.delta * m.delta) / PI / ALPHA
            * momentum_ratio.powf(2.0 * m.j + 1.0)
            * ((self.gann0 * m.beta + self.gann1)
                / ((MU_0 - 0.5) * m.beta + (MU_1 - m.eta)))
                .powi(2)
    }

    pub fn simulate(&self) -> FluxSpectrum {
        let mut flux = FluxSpectrum::with_capacity(self.ma, self.transition_rates.len());
        for &(energy, rate) in &self.transition_rates {
            if energy < self.ma {
                continue;
            }
            flux.push(FluxSample::new(energy, rate * self.branching_ratio(energy)));
        }
        flux
    }

    fn width_and_rescale(&self, new_coupling: Option<f64>) -> (f64, f64) {
        match new_coupling {
            Some(g) => (width_ee(g, self.ma), (g / self.gae).powi(2)),
            None => (width_ee(self.gae, self.ma), 1.0),
        }
    }

    pub fn propagate(&self, spectrum: &FluxSpectrum, new_coupling: Option<f64>) -> DetectorWeights {
        let (width, rescale) = self.width_and_rescale(new_coupling);
        let mut weights = propagation::propagate(spectrum, &self.detector, width, rescale);
        if self.is_isotropic {
            weights.scale(self.detector.geometric_acceptance());
        }
        weights
    }

    pub fn propagate_volume(
        &self,
        spectrum: &FluxSpectrum,
        volume: &DetectorVolume,
        new_coupling: Option<f64>,
    ) -> DetectorWeights {
        let (width, rescale) = self.width_and_rescale(new_coupling);
        propagation::propagate_volume(spectrum, volume, width, rescale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn channel(ma: f64) -> NuclearFlux {
        let detector = Detector::new(4.0, 0.2, 0.04).unwrap();
        NuclearFlux::new(vec![(0.0144, 1e22)], ma, 1e-6, 1e-3, 1e-3, detector)
    }

    #[test]
    fn one_sample_per_transition_line() {
        let ch = channel(1e-5);
        let flux = ch.simulate();
        assert_eq!(flux.len(), 1);
        let s = flux.samples()[0];
        assert_relative_eq!(s.energy, 0.0144, max_relative = 1e-12);
        assert_relative_eq!(
            s.weight,
            1e22 * ch.branching_ratio(0.0144),
            max_relative = 1e-12
        );
    }

    #[test]
    fn heavy_boson_skips_the_line() {
        assert!(channel(0.1).simulate().is_empty());
    }

    #[test]
    fn branching_vanishes_at_threshold() {
        let ch = channel(0.0144);
        assert_eq!(ch.branching_ratio(0.0144), 0.0);
    }

    #[test]
    fn branching_scales_with_nucleon_couplings() {
        let ch1 = channel(1e-5);
        let mut ch2 = channel(1e-5);
        ch2.gann0 *= 2.0;
        ch2.gann1 *= 2.0;
        assert_relative_eq!(
            ch2.branching_ratio(0.0144),
            4.0 * ch1.branching_ratio(0.0144),
            max_relative = 1e-12
        );
    }
}

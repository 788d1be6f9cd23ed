use crate::constants::{HBARC, M_E};
use crate::cross_sections::{resonance_peak, track_length_prob};
use crate::decay::width_ee;
use crate::detector::{Detector, DetectorVolume};
use crate::flux::{DetectorWeights, FluxSample, FluxSpectrum};
use crate::material::Material;
use crate::propagation;
use crate::utilities::interpolate_flux;
use rand::Rng;

/// Range of shower depths, in radiation lengths, sampled for the
/// track-length convolution.
const MAX_SHOWER_DEPTH: f64 = 5.0;

/// Resonant production e+ e- -> a on target electrons.
///
/// Production only happens at the single resonant positron energy
/// E_res = m_a^2 / (2 m_e) - m_e. The positron flux is convolved with the
/// shower track-length probability of degrading from its injection energy
/// down to E_res, yielding one aggregate monochromatic sample at the boson
/// energy m_a^2 / (2 m_e).
#[derive(Debug, Clone)]
pub struct ResonanceFlux {
    /// Boson mass [MeV]
    pub ma: f64,
    /// Electron coupling
    pub ge: f64,
    pub target: Material,
    pub detector: Detector,
    pub n_samples: usize,
    pub is_isotropic: bool,
    positron_energies: Vec<f64>,
    positron_weights: Vec<f64>,
}

impl ResonanceFlux {
    /// `positron_flux` holds (energy [MeV], dN/dE weight) lines, used as an
    /// interpolated differential spectrum.
    pub fn new(
        positron_flux: Vec<(f64, f64)>,
        ma: f64,
        ge: f64,
        target: Material,
        detector: Detector,
        n_samples: usize,
    ) -> Self {
        let mut lines = positron_flux;
        lines.sort_by(|a, b| a.0.total_cmp(&b.0));
        let (positron_energies, positron_weights) = lines.into_iter().unzip();
        ResonanceFlux {
            ma,
            ge,
            target,
            detector,
            n_samples,
            is_isotropic: true,
            positron_energies,
            positron_weights,
        }
    }

    pub fn decay_width(&self) -> f64 {
        width_ee(self.ge, self.ma)
    }

    /// Resonant positron energy for the configured boson mass [MeV].
    pub fn resonant_energy(&self) -> f64 {
        -M_E + self.ma * self.ma / (2.0 * M_E)
    }

    fn positron_flux_dn_de(&self, energy: f64) -> f64 {
        interpolate_flux(&self.positron_energies, &self.positron_weights, energy)
    }

    pub fn simulate<R: Rng + ?Sized>(&self, rng: &mut R) -> FluxSpectrum {
        let mut flux = FluxSpectrum::new(self.ma);
        let e_res = self.resonant_energy();
        // boson energy e_res + m_e must sit above the mass, the resonance
        // above the electron mass and inside the flux coverage
        if e_res + M_E < self.ma || e_res < M_E {
            return flux;
        }
        let e_max = match self.positron_energies.last() {
            Some(&e) if e_res < e => e,
            _ => return flux,
        };

        let mc_vol = MAX_SHOWER_DEPTH * (e_max - e_res);
        let mut attenuated = 0.0;
        for _ in 0..self.n_samples {
            let e = rng.gen_range(e_res..e_max);
            let t = rng.gen_range(0.0..MAX_SHOWER_DEPTH);
            attenuated += self.positron_flux_dn_de(e) * track_length_prob(e, e_res, t);
        }
        attenuated *= mc_vol / self.n_samples as f64;

        let area_density = self.target.radiation_length_atoms_per_area() * HBARC * HBARC;
        let weight = self.target.z * area_density * resonance_peak(self.ge) * attenuated;
        flux.push(FluxSample::new(self.ma * self.ma / (2.0 * M_E), weight));
        flux
    }

    fn width_and_rescale(&self, new_coupling: Option<f64>) -> (f64, f64) {
        match new_coupling {
            Some(g) => (width_ee(g, self.ma), (g / self.ge).powi(2)),
            None => (width_ee(self.ge, self.ma), 1.0),
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

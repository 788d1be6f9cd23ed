use crate::constants::HBARC;
use crate::cross_sections::brem_dsigma_dea;
use crate::decay::width_ee;
use crate::detector::{Detector, DetectorVolume};
use crate::flux::{DetectorWeights, FluxSample, FluxSpectrum};
use crate::material::Material;
use crate::propagation;
use rand::Rng;

/// Boson bremsstrahlung e + N -> e + N + a from a lepton flux degrading in
/// the target.
///
/// The effective target thickness is one radiation length expressed as an
/// areal atom density; each lepton line radiates with the Weizsacker-
/// Williams differential cross section over [m_a, E_max] with
/// E_max = E (1 - (m_a/E)^2).
#[derive(Debug, Clone)]
pub struct BremFlux {
    /// Boson mass [MeV]
    pub ma: f64,
    /// Electron coupling
    pub ge: f64,
    pub target: Material,
    pub detector: Detector,
    pub n_samples: usize,
    pub is_isotropic: bool,
    lepton_flux: Vec<(f64, f64)>,
}

impl BremFlux {
    /// `lepton_flux` holds (energy [MeV], weight) lines of the combined
    /// electron and positron population entering the target.
    pub fn new(
        lepton_flux: Vec<(f64, f64)>,
        ma: f64,
        ge: f64,
        target: Material,
        detector: Detector,
        n_samples: usize,
    ) -> Self {
        BremFlux {
            ma,
            ge,
            target,
            detector,
            n_samples,
            is_isotropic: true,
            lepton_flux,
        }
    }

    pub fn decay_width(&self) -> f64 {
        width_ee(self.ge, self.ma)
    }

    pub fn simulate<R: Rng + ?Sized>(&self, rng: &mut R) -> FluxSpectrum {
        let mut flux =
            FluxSpectrum::with_capacity(self.ma, self.lepton_flux.len() * self.n_samples);
        let area_density = self.target.radiation_length_atoms_per_area() * HBARC * HBARC;
        for &(energy, weight) in &self.lepton_flux {
            if energy <= self.ma {
                continue;
            }
            let ea_max = energy * (1.0 - (self.ma / energy).powi(2));
            if ea_max <= self.ma {
                continue;
            }
            let mc_vol = (ea_max - self.ma) / self.n_samples as f64;
            for _ in 0..self.n_samples {
                let ea = rng.gen_range(self.ma..ea_max);
                let diff_br = area_density
                    * mc_vol
                    * brem_dsigma_dea(ea, energy, self.ge, self.ma, self.target.z);
                flux.push(FluxSample::new(ea, weight * diff_br));
            }
        }
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

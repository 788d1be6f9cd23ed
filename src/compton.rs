use crate::constants::M_E;
use crate::cross_sections::compton_dsigma_dea;
use crate::decay::width_ee;
use crate::detector::{Detector, DetectorVolume};
use crate::error::ConfigError;
use crate::flux::{DetectorWeights, FluxSample, FluxSpectrum};
use crate::material::Material;
use crate::photon_absorption::AbsCrossSection;
use crate::propagation;
use rand::Rng;

/// Compton-like production gamma + e -> a + e on the target electrons.
///
/// For each photon line the product energy is sampled uniformly over
/// [m_a, E_gamma] and weighted by the Monte Carlo volume times the
/// differential cross section, normalized against the total photon
/// absorption cross section at the line energy.
#[derive(Debug, Clone)]
pub struct ComptonFlux {
    /// Boson mass [MeV]
    pub ma: f64,
    /// Electron coupling
    pub ge: f64,
    pub target: Material,
    pub detector: Detector,
    pub n_samples: usize,
    pub is_isotropic: bool,
    photon_flux: Vec<(f64, f64)>,
    photon_xs: AbsCrossSection,
}

impl ComptonFlux {
    pub fn new(
        photon_flux: Vec<(f64, f64)>,
        ma: f64,
        ge: f64,
        target: Material,
        detector: Detector,
        n_samples: usize,
    ) -> Result<Self, ConfigError> {
        let photon_xs = AbsCrossSection::for_material(&target)?;
        Ok(ComptonFlux {
            ma,
            ge,
            target,
            detector,
            n_samples,
            is_isotropic: true,
            photon_flux,
            photon_xs,
        })
    }

    pub fn decay_width(&self) -> f64 {
        width_ee(self.ge, self.ma)
    }

    pub fn simulate<R: Rng + ?Sized>(&self, rng: &mut R) -> FluxSpectrum {
        let mut flux =
            FluxSpectrum::with_capacity(self.ma, self.photon_flux.len() * self.n_samples);
        for &(energy, weight) in &self.photon_flux {
            let s = 2.0 * M_E * energy + M_E * M_E;
            if s <= (M_E + self.ma) * (M_E + self.ma) {
                continue;
            }
            let mc_vol = (energy - self.ma) / self.n_samples as f64;
            let abs_xs = self.photon_xs.sigma_mev(energy);
            for _ in 0..self.n_samples {
                let ea = rng.gen_range(self.ma..energy);
                let diff_br =
                    mc_vol * compton_dsigma_dea(ea, energy, self.ge, self.ma, self.target.z)
                        / abs_xs;
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

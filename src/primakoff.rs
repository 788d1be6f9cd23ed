use crate::cross_sections::primakoff_sigma;
use crate::decay::width_gg;
use crate::detector::{Detector, DetectorVolume};
use crate::error::ConfigError;
use crate::flux::{DetectorWeights, FluxSample, FluxSpectrum};
use crate::material::Material;
use crate::photon_absorption::AbsCrossSection;
use crate::propagation;

/// Primakoff conversion of a photon flux on the target nucleus,
/// gamma + N -> a + N, with isotropic re-emission.
///
/// Each input photon line converts deterministically with branching ratio
/// sigma_Primakoff / sigma_absorption at the line energy; no sampling is
/// involved and the boson inherits the photon energy.
#[derive(Debug, Clone)]
pub struct PrimakoffFlux {
    /// Boson mass [MeV]
    pub ma: f64,
    /// Photon coupling [MeV^-1]
    pub gagamma: f64,
    pub target: Material,
    pub detector: Detector,
    photon_flux: Vec<(f64, f64)>,
    photon_xs: AbsCrossSection,
}

impl PrimakoffFlux {
    /// `photon_flux` holds (energy [MeV], weight) lines of the source
    /// photon population.
    pub fn new(
        photon_flux: Vec<(f64, f64)>,
        ma: f64,
        gagamma: f64,
        target: Material,
        detector: Detector,
    ) -> Result<Self, ConfigError> {
        let photon_xs = AbsCrossSection::for_material(&target)?;
        Ok(PrimakoffFlux {
            ma,
            gagamma,
            target,
            detector,
            photon_flux,
            photon_xs,
        })
    }

    pub fn decay_width(&self) -> f64 {
        width_gg(self.gagamma, self.ma)
    }

    pub fn simulate(&self) -> FluxSpectrum {
        let mut flux = FluxSpectrum::with_capacity(self.ma, self.photon_flux.len());
        for &(energy, weight) in &self.photon_flux {
            if energy < self.ma {
                continue;
            }
            let xs = primakoff_sigma(energy, self.gagamma, self.ma, self.target.z);
            let br = xs / self.photon_xs.sigma_mev(energy);
            flux.push(FluxSample::new(energy, weight * br));
        }
        flux
    }

    fn width_and_rescale(&self, new_coupling: Option<f64>) -> (f64, f64) {
        match new_coupling {
            Some(g) => (width_gg(g, self.ma), (g / self.gagamma).powi(2)),
            None => (width_gg(self.gagamma, self.ma), 1.0),
        }
    }

    /// Point-geometry propagation with the isotropic face acceptance folded
    /// into both weight arrays.
    pub fn propagate(&self, spectrum: &FluxSpectrum, new_coupling: Option<f64>) -> DetectorWeights {
        let (width, rescale) = self.width_and_rescale(new_coupling);
        let mut weights = propagation::propagate(spectrum, &self.detector, width, rescale);
        weights.scale(self.detector.geometric_acceptance());
        weights
    }

    /// Volume-integral propagation; the decay side folds its own geometry,
    /// the scatter side keeps the bare point survival.
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

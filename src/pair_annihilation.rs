use crate::constants::{HBARC, M_E};
use crate::cross_sections::associated_dsigma_dcos_cm;
use crate::decay::width_ee;
use crate::detector::{Detector, DetectorVolume};
use crate::flux::{DetectorWeights, FluxSample, FluxSpectrum};
use crate::kinematics::boost_to_lab;
use crate::material::Material;
use crate::propagation;
use rand::Rng;

/// Associated production e+ e- -> gamma + a from a positron flux stopping
/// on atomic electrons.
///
/// The CM emission cosine is sampled uniformly and boosted to the lab with
/// an explicit Jacobian for the cosine-to-energy transformation.
#[derive(Debug, Clone)]
pub struct PairAnnihilationFlux {
    /// Boson mass [MeV]
    pub ma: f64,
    /// Electron coupling
    pub ge: f64,
    pub target: Material,
    pub detector: Detector,
    pub n_samples: usize,
    pub is_isotropic: bool,
    positron_flux: Vec<(f64, f64)>,
}

impl PairAnnihilationFlux {
    pub fn new(
        positron_flux: Vec<(f64, f64)>,
        ma: f64,
        ge: f64,
        target: Material,
        detector: Detector,
        n_samples: usize,
    ) -> Self {
        PairAnnihilationFlux {
            ma,
            ge,
            target,
            detector,
            n_samples,
            is_isotropic: true,
            positron_flux,
        }
    }

    pub fn decay_width(&self) -> f64 {
        width_ee(self.ge, self.ma)
    }

    pub fn simulate<R: Rng + ?Sized>(&self, rng: &mut R) -> FluxSpectrum {
        let mut flux =
            FluxSpectrum::with_capacity(self.ma, self.positron_flux.len() * self.n_samples);
        let area_density = self.target.radiation_length_atoms_per_area() * HBARC * HBARC;
        let mc_volume = 2.0 / self.n_samples as f64;
        for &(ep_lab, weight) in &self.positron_flux {
            if ep_lab < ((self.ma * self.ma - M_E * M_E) / (2.0 * M_E)).max(M_E) {
                continue;
            }
            // CM energy of the boson in the massless-pair approximation;
            // below this point the emission momentum is imaginary
            let ea_cm_sq = M_E * (ep_lab + M_E) / 2.0;
            if ea_cm_sq < self.ma * self.ma {
                continue;
            }
            let ea_cm = ea_cm_sq.sqrt();
            let pa_cm = (ea_cm_sq - self.ma * self.ma).sqrt();
            let beta = (ep_lab * ep_lab - M_E * M_E).sqrt() / (M_E + ep_lab);

            for _ in 0..self.n_samples {
                let cos_cm = rng.gen_range(-1.0..1.0);
                let cm_wgt = area_density
                    * associated_dsigma_dcos_cm(cos_cm, ep_lab, self.ma, self.ge, self.target.z);
                let jacobian = 2.0f64.powf(1.5) * (1.0 + cos_cm).sqrt();
                let (ea_lab, _) = boost_to_lab(ea_cm, pa_cm * cos_cm, beta);
                flux.push(FluxSample::new(
                    ea_lab,
                    weight * jacobian * cm_wgt * mc_volume,
                ));
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

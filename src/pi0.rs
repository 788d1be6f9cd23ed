//! Neutral-pion mixing channel pi0 -> a (gamma gamma mixing portal).
//!
//! The boson inherits the two-body decay kinematics of the pion rest frame:
//! a fixed CM energy, boosted along each input pion momentum. The relative
//! branching against pi0 -> gamma gamma carries the coupling dependence.

use crate::constants::M_PI0;
use crate::detector::{Detector, DetectorVolume};
use crate::flux::{DetectorWeights, FluxSample, FluxSpectrum};
use crate::kinematics::boost_to_lab;
use crate::propagation;
use log::debug;
use rand::Rng;

/// Axion production through pi0 mixing.
#[derive(Debug, Clone)]
pub struct Pi0Flux {
    pub ma: f64,
    pub g: f64,
    /// Total pi0 production rate the momentum lines are normalized to
    pub pi0_rate: f64,
    pub detector: Detector,
    pub n_samples: usize,
    pub is_isotropic: bool,
}

impl Pi0Flux {
    pub fn new(
        ma: f64,
        g: f64,
        pi0_rate: f64,
        detector: Detector,
        n_samples: usize,
        is_isotropic: bool,
    ) -> Self {
        Pi0Flux {
            ma,
            g,
            pi0_rate,
            detector,
            n_samples,
            is_isotropic,
        }
    }

    /// Branching relative to pi0 -> gamma gamma.
    pub fn branching_ratio(&self) -> f64 {
        if self.ma > M_PI0 {
            return 0.0;
        }
        2.0 * self.g * self.g * (1.0 - (self.ma / M_PI0).powi(2)).powi(3)
    }

    fn cm_kinematics(&self) -> (f64, f64) {
        let p_cm = (M_PI0 * M_PI0 - self.ma * self.ma) / (2.0 * M_PI0);
        let e_cm = (p_cm * p_cm + self.ma * self.ma).sqrt();
        (p_cm, e_cm)
    }

    /// Boost one boson per pi0 momentum line, cutting on lab energy and
    /// polar angle. Each line carries an equal share of the pi0 rate.
    pub fn simulate_flux<R: Rng + ?Sized>(
        &self,
        momenta: &[f64],
        energy_cut: f64,
        angle_cut: f64,
        rng: &mut R,
    ) -> FluxSpectrum {
        let mut flux = FluxSpectrum::with_capacity(self.ma, momenta.len());
        if self.ma > M_PI0 {
            debug!("pi0 channel closed: ma = {} above {}", self.ma, M_PI0);
            return flux;
        }
        let (p_cm, e_cm) = self.cm_kinematics();
        let line_weight = self.pi0_rate * self.branching_ratio() / momenta.len() as f64;
        for &p in momenta {
            let beta = p / (p * p + M_PI0 * M_PI0).sqrt();
            let cos_cm = rng.gen_range(-1.0..1.0);
            let (e_lab, pz_lab) = boost_to_lab(e_cm, p_cm * cos_cm, beta);
            let p_lab = (e_lab * e_lab - self.ma * self.ma).max(0.0).sqrt();
            if p_lab == 0.0 {
                continue;
            }
            let angle_lab = (pz_lab / p_lab).clamp(-1.0, 1.0).acos();
            if e_lab < energy_cut || angle_lab > angle_cut {
                continue;
            }
            flux.push(FluxSample::with_angle(e_lab, angle_lab, line_weight));
        }
        flux
    }

    /// Bulk rest-frame flux: a monochromatic line at the CM energy.
    pub fn simulate(&self) -> FluxSpectrum {
        let mut flux = FluxSpectrum::with_capacity(self.ma, self.n_samples);
        if self.ma > M_PI0 {
            return flux;
        }
        let (_, e_cm) = self.cm_kinematics();
        let weight = self.pi0_rate * self.branching_ratio() / self.n_samples as f64;
        for _ in 0..self.n_samples {
            flux.push(FluxSample::new(e_cm, weight));
        }
        flux
    }

    fn width_and_rescale(&self, new_coupling: Option<f64>) -> (f64, f64) {
        match new_coupling {
            Some(g) => (0.0, (g / self.g).powi(2)),
            None => (0.0, 1.0),
        }
    }

    /// Stable over the baseline; the far-field acceptance applies only in
    /// the isotropic geometry.
    pub fn propagate(
        &self,
        spectrum: &FluxSpectrum,
        new_coupling: Option<f64>,
    ) -> DetectorWeights {
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
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn channel(ma: f64) -> Pi0Flux {
        let detector = Detector::new(20.0, 1.0, 2.0).unwrap();
        Pi0Flux::new(ma, 1e-3, 0.0259, detector, 100, true)
    }

    #[test]
    fn branching_scales_with_coupling_squared() {
        let mut ch = channel(10.0);
        let b1 = ch.branching_ratio();
        ch.g *= 3.0;
        assert_relative_eq!(ch.branching_ratio(), 9.0 * b1, max_relative = 1e-12);
    }

    #[test]
    fn heavy_boson_yields_nothing() {
        let ch = channel(200.0);
        assert_eq!(ch.branching_ratio(), 0.0);
        assert!(ch.simulate().is_empty());
        let flux = ch.simulate_flux(&[1000.0], 0.0, std::f64::consts::PI, &mut StdRng::seed_from_u64(3));
        assert!(flux.is_empty());
    }

    #[test]
    fn bulk_flux_is_monochromatic() {
        let ch = channel(10.0);
        let flux = ch.simulate();
        assert_eq!(flux.len(), 100);
        let p_cm = (M_PI0 * M_PI0 - 100.0) / (2.0 * M_PI0);
        let e_cm = (p_cm * p_cm + 100.0).sqrt();
        let per_line = ch.pi0_rate * ch.branching_ratio() / 100.0;
        for s in flux.iter() {
            assert_relative_eq!(s.energy, e_cm, max_relative = 1e-12);
            assert_relative_eq!(s.weight, per_line, max_relative = 1e-12);
        }
        assert_relative_eq!(
            flux.total_flux(),
            ch.pi0_rate * ch.branching_ratio(),
            max_relative = 1e-10
        );
    }

    #[test]
    fn boosted_flux_respects_cuts() {
        let ch = channel(10.0);
        let mut rng = StdRng::seed_from_u64(17);
        let momenta = [500.0, 1000.0, 2000.0, 4000.0];
        let open = ch.simulate_flux(&momenta, 0.0, std::f64::consts::PI, &mut rng);
        assert_eq!(open.len(), momenta.len());
        for s in open.iter() {
            assert!(s.energy >= ch.ma);
            let angle = s.angle.unwrap();
            assert!((0.0..=std::f64::consts::PI).contains(&angle));
        }
        let mut rng = StdRng::seed_from_u64(17);
        let cut = ch.simulate_flux(&momenta, 1e9, std::f64::consts::PI, &mut rng);
        assert!(cut.is_empty());
    }

    #[test]
    fn propagation_applies_acceptance_only_when_isotropic() {
        let mut ch = channel(10.0);
        let flux = ch.simulate();
        let accept = ch.detector.geometric_acceptance();
        let iso = ch.propagate(&flux, None);
        ch.is_isotropic = false;
        let beam = ch.propagate(&flux, None);
        for i in 0..flux.len() {
            assert_eq!(iso.decay[i], 0.0);
            assert_eq!(beam.decay[i], 0.0);
            assert_relative_eq!(iso.scatter[i], accept * beam.scatter[i], max_relative = 1e-12);
        }
    }
}

//! Charged-meson three-body decay channels M -> l nu a.
//!
//! Two geometries share the Dalitz machinery of [`ThreeBodyDecay`]: the
//! beam channel tracks a decay vertex along the beamline between target and
//! dump and cuts on the solid angle subtended by the detector from that
//! vertex; the isotropic channel assumes point-like emission with a
//! lab-frame Jacobian and leaves acceptance to the far-field factor.

use crate::detector::{Detector, DetectorVolume};
use crate::error::ConfigError;
use crate::flux::{DetectorWeights, FluxSample, FluxSpectrum};
use crate::kinematics::{boost_to_lab, decay_position, lab_decay_length, max_decay_quantile};
use crate::matrix_element::ThreeBodyDecay;
use crate::meson::{BosonRep, MesonKind};
use crate::propagation;
use crate::utilities::heaviside;
use log::debug;
use rand::Rng;
use std::f64::consts::PI;

/// Flux plus the per-meson-line vertex bookkeeping of the beam channel.
#[derive(Debug, Clone, Default)]
pub struct MesonDecayEvents {
    pub flux: FluxSpectrum,
    /// Sampled decay vertex of each input meson line [m]
    pub decay_positions: Vec<f64>,
    /// Detector solid-angle cosine seen from each vertex
    pub acceptance_cosines: Vec<f64>,
}

/// Beam-geometry three-body decay channel.
///
/// Mesons decay in flight between the production target and the beam dump;
/// each line gets one sampled vertex, and product kinematics are drawn in
/// the meson rest frame with the cosine window narrowed to the detector
/// acceptance from that vertex.
#[derive(Debug, Clone)]
pub struct MesonThreeBodyFlux {
    pub decay: ThreeBodyDecay,
    pub detector: Detector,
    /// Absorber wall position truncating decay vertices [m]
    pub dump_distance: f64,
    /// Downstream threshold on the lab product energy [MeV]
    pub energy_cut: f64,
    pub cut_on_solid_angle: bool,
    pub n_samples: usize,
    meson_flux: Vec<(f64, f64, f64)>,
}

impl MesonThreeBodyFlux {
    /// `meson_flux` holds (momentum [MeV], production angle, weight) lines;
    /// the production angle is carried through untouched.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        meson_flux: Vec<(f64, f64, f64)>,
        ma: f64,
        coupling: f64,
        meson: MesonKind,
        rep: BosonRep,
        m_lepton: f64,
        detector: Detector,
        n_samples: usize,
    ) -> Self {
        MesonThreeBodyFlux {
            decay: ThreeBodyDecay::new(meson, rep, m_lepton, ma, coupling),
            detector,
            dump_distance: 50.0,
            energy_cut: 140.0,
            cut_on_solid_angle: true,
            n_samples,
            meson_flux,
        }
    }

    /// String-tag construction path; unknown tags are fatal.
    #[allow(clippy::too_many_arguments)]
    pub fn from_tags(
        meson_flux: Vec<(f64, f64, f64)>,
        ma: f64,
        coupling: f64,
        meson_tag: &str,
        rep_tag: &str,
        m_lepton: f64,
        detector: Detector,
        n_samples: usize,
    ) -> Result<Self, ConfigError> {
        let meson: MesonKind = meson_tag.parse()?;
        let rep: BosonRep = rep_tag.parse()?;
        Ok(Self::new(
            meson_flux, ma, coupling, meson, rep, m_lepton, detector, n_samples,
        ))
    }

    pub fn total_branching(&self) -> f64 {
        self.decay.total_branching()
    }

    pub fn simulate<R: Rng + ?Sized>(&self, rng: &mut R) -> FluxSpectrum {
        self.simulate_events(rng).flux
    }

    /// Full simulation output including vertex positions and acceptance
    /// cosines, one entry per input meson line.
    pub fn simulate_events<R: Rng + ?Sized>(&self, rng: &mut R) -> MesonDecayEvents {
        let mut events = MesonDecayEvents {
            flux: FluxSpectrum::with_capacity(
                self.decay.ma,
                self.meson_flux.len() * self.n_samples,
            ),
            decay_positions: Vec::with_capacity(self.meson_flux.len()),
            acceptance_cosines: Vec::with_capacity(self.meson_flux.len()),
        };
        if !self.decay.is_open() {
            debug!(
                "three-body decay closed: ma = {} above {} - {}",
                self.decay.ma,
                self.decay.meson.mass(),
                self.decay.m_lepton
            );
            return events;
        }
        let mm = self.decay.meson.mass();
        let width = self.decay.meson.total_width();
        for &(p, _, wgt) in &self.meson_flux {
            let lambda = lab_decay_length(p, mm, width);
            let umax = max_decay_quantile(lambda, self.dump_distance).min(1.0);
            let u = rng.gen_range(0.0..umax);
            let vertex = decay_position(u, lambda);
            let sa_cos = self.detector.acceptance_cos(vertex);
            events.decay_positions.push(vertex);
            events.acceptance_cosines.push(sa_cos);
            self.decay_line(&mut events.flux, rng, p, wgt, sa_cos);
        }
        events
    }

    fn decay_line<R: Rng + ?Sized>(
        &self,
        flux: &mut FluxSpectrum,
        rng: &mut R,
        meson_p: f64,
        meson_wgt: f64,
        solid_angle_cosine: f64,
    ) {
        let ma = self.decay.ma;
        let mm = self.decay.meson.mass();
        let width = self.decay.meson.total_width();
        let ea_max = self.decay.ea_max();

        let beta = meson_p / (meson_p * meson_p + mm * mm).sqrt();
        let boost = 1.0 / (1.0 - beta * beta).sqrt();
        // the cosine window widens in the rest frame by roughly the boost
        let min_cm_cos = (boost * solid_angle_cosine.acos()).min(PI).cos();
        let mc_vol = (ea_max - ma) * (1.0 - min_cm_cos);

        for _ in 0..self.n_samples {
            let ea = rng.gen_range(ma..ea_max);
            let pa = (ea * ea - ma * ma).sqrt();
            let cos_cm = rng.gen_range(min_cm_cos..1.0);
            let (e_lab, pz_lab) = boost_to_lab(ea, pa * cos_cm, beta);
            let p_lab = (e_lab * e_lab - ma * ma).max(0.0).sqrt();
            if p_lab == 0.0 {
                continue;
            }
            let cos_lab = (pz_lab / p_lab).clamp(-1.0, 1.0);
            if self.cut_on_solid_angle && cos_lab < solid_angle_cosine {
                continue;
            }
            let weight = meson_wgt * mc_vol * self.decay.dgamma_dea(ea) / width
                / self.n_samples as f64
                * heaviside(e_lab - self.energy_cut, 1.0);
            flux.push(FluxSample::with_angle(e_lab, cos_lab.acos(), weight));
        }
    }

    fn width_and_rescale(&self, new_coupling: Option<f64>) -> (f64, f64) {
        match new_coupling {
            Some(g) => (0.0, (g / self.decay.coupling).powi(2)),
            None => (0.0, 1.0),
        }
    }

    /// Beam products are treated as stable over the baseline: no decay
    /// weight, full survival, no far-field acceptance factor.
    pub fn propagate(
        &self,
        spectrum: &FluxSpectrum,
        new_coupling: Option<f64>,
    ) -> DetectorWeights {
        let (width, rescale) = self.width_and_rescale(new_coupling);
        propagation::propagate(spectrum, &self.detector, width, rescale)
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

/// Isotropic three-body decay channel for stopped or slow mesons.
#[derive(Debug, Clone)]
pub struct MesonThreeBodyIsotropicFlux {
    pub decay: ThreeBodyDecay,
    pub detector: Detector,
    pub n_samples: usize,
    meson_flux: Vec<(f64, f64)>,
}

impl MesonThreeBodyIsotropicFlux {
    /// `meson_flux` holds (momentum [MeV], weight) lines.
    pub fn new(
        meson_flux: Vec<(f64, f64)>,
        ma: f64,
        coupling: f64,
        meson: MesonKind,
        rep: BosonRep,
        m_lepton: f64,
        detector: Detector,
        n_samples: usize,
    ) -> Self {
        MesonThreeBodyIsotropicFlux {
            decay: ThreeBodyDecay::new(meson, rep, m_lepton, ma, coupling),
            detector,
            n_samples,
            meson_flux,
        }
    }

    pub fn total_branching(&self) -> f64 {
        self.decay.total_branching()
    }

    /// Rest-frame differential branching sampler: (CM energy, weight) pairs
    /// normalized against the meson total width.
    pub fn differential_branching<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<(f64, f64)> {
        if !self.decay.is_open() {
            return Vec::new();
        }
        let ma = self.decay.ma;
        let ea_max = self.decay.ea_max();
        let width = self.decay.meson.total_width();
        let mc_vol = ea_max - ma;
        (0..self.n_samples)
            .map(|_| {
                let ea = rng.gen_range(ma..ea_max);
                (ea, mc_vol * self.decay.dgamma_dea(ea) / width / self.n_samples as f64)
            })
            .collect()
    }

    pub fn simulate<R: Rng + ?Sized>(&self, rng: &mut R) -> FluxSpectrum {
        let ma = self.decay.ma;
        let mut flux =
            FluxSpectrum::with_capacity(ma, self.meson_flux.len() * self.n_samples);
        if !self.decay.is_open() {
            return flux;
        }
        let mm = self.decay.meson.mass();
        let width = self.decay.meson.total_width();
        let ea_max = self.decay.ea_max();
        let mc_vol = ea_max - ma;

        for &(p, wgt) in &self.meson_flux {
            let beta = p / (p * p + mm * mm).sqrt();
            for _ in 0..self.n_samples {
                let ea = rng.gen_range(ma..ea_max);
                let pa = (ea * ea - ma * ma).sqrt();
                if pa == 0.0 {
                    continue;
                }
                let cos_cm = rng.gen_range(-1.0..1.0);
                let (e_lab, _) = boost_to_lab(ea, pa * cos_cm, beta);
                // Jacobian of d2Gamma/(dEa dOmega) from rest frame to lab
                let jacobian = (e_lab * e_lab - ma * ma).max(0.0).sqrt() / pa;
                let weight = jacobian * wgt * mc_vol * self.decay.dgamma_dea(ea) / width
                    / self.n_samples as f64;
                flux.push(FluxSample::new(e_lab, weight));
            }
        }
        flux
    }

    fn width_and_rescale(&self, new_coupling: Option<f64>) -> (f64, f64) {
        match new_coupling {
            Some(g) => (0.0, (g / self.decay.coupling).powi(2)),
            None => (0.0, 1.0),
        }
    }

    /// Stable over the baseline, far-field acceptance applied.
    pub fn propagate(
        &self,
        spectrum: &FluxSpectrum,
        new_coupling: Option<f64>,
    ) -> DetectorWeights {
        let (width, rescale) = self.width_and_rescale(new_coupling);
        let mut weights = propagation::propagate(spectrum, &self.detector, width, rescale);
        weights.scale(self.detector.geometric_acceptance());
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
    use crate::constants::M_MU;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn beam_channel(ma: f64) -> MesonThreeBodyFlux {
        let detector = Detector::new(541.0, 12.0, 36.0).unwrap();
        let flux = vec![(1000.0, 0.05, 1e10), (5000.0, 0.01, 5e9)];
        MesonThreeBodyFlux::new(
            flux,
            ma,
            1e-4,
            MesonKind::ChargedKaon,
            BosonRep::Scalar,
            M_MU,
            detector,
            10,
        )
    }

    #[test]
    fn closed_decay_produces_nothing() {
        let heavy = beam_channel(400.0);
        assert!(!heavy.decay.is_open());
        let events = heavy.simulate_events(&mut StdRng::seed_from_u64(4));
        assert!(events.flux.is_empty());
        assert!(events.decay_positions.is_empty());
    }

    #[test]
    fn vertices_stay_upstream_of_the_dump() {
        let ch = beam_channel(10.0);
        let events = ch.simulate_events(&mut StdRng::seed_from_u64(8));
        assert_eq!(events.decay_positions.len(), 2);
        assert_eq!(events.acceptance_cosines.len(), 2);
        for &x in &events.decay_positions {
            assert!(x >= 0.0 && x <= ch.dump_distance);
        }
        for &c in &events.acceptance_cosines {
            assert!(c > 0.0 && c < 1.0);
        }
    }

    #[test]
    fn samples_respect_mass_and_cut_geometry() {
        let mut ch = beam_channel(10.0);
        ch.energy_cut = 0.0;
        let events = ch.simulate_events(&mut StdRng::seed_from_u64(12));
        assert!(!events.flux.is_empty());
        for s in events.flux.iter() {
            assert!(s.energy >= ch.decay.ma);
            assert!(s.weight >= 0.0 && s.weight.is_finite());
            let angle = s.angle.unwrap();
            assert!((0.0..=PI).contains(&angle));
        }
    }

    #[test]
    fn energy_threshold_zeroes_the_weights() {
        let mut ch = beam_channel(10.0);
        ch.energy_cut = 1e9;
        let flux = ch.simulate(&mut StdRng::seed_from_u64(12));
        assert_eq!(flux.total_flux(), 0.0);
    }

    #[test]
    fn beam_propagation_is_decayless() {
        let ch = beam_channel(10.0);
        let flux = ch.simulate(&mut StdRng::seed_from_u64(30));
        let w = ch.propagate(&flux, None);
        assert_eq!(w.len(), flux.len());
        assert!(w.decay.iter().all(|&d| d == 0.0));
        for (i, s) in flux.iter().enumerate() {
            assert_eq!(w.scatter[i], s.weight);
        }
        let rescaled = ch.propagate(&flux, Some(2.0 * ch.decay.coupling));
        assert!(rescaled.decay.iter().all(|&d| d == 0.0));
        assert_relative_eq!(
            rescaled.total_scatter(),
            4.0 * w.total_scatter(),
            max_relative = 1e-12
        );
    }

    #[test]
    fn isotropic_channel_counts_and_acceptance() {
        let detector = Detector::new(20.0, 2.0, 2.0).unwrap();
        let ch = MesonThreeBodyIsotropicFlux::new(
            vec![(0.0, 0.0259)],
            5.0,
            1e-4,
            MesonKind::ChargedPion,
            BosonRep::Pseudoscalar,
            M_MU,
            detector,
            15,
        );
        let flux = ch.simulate(&mut StdRng::seed_from_u64(19));
        assert_eq!(flux.len(), 15);
        let w = ch.propagate(&flux, None);
        let accept = detector.geometric_acceptance();
        for (i, s) in flux.iter().enumerate() {
            assert_eq!(w.decay[i], 0.0);
            assert!((w.scatter[i] - accept * s.weight).abs() <= 1e-15 * s.weight.abs());
        }
    }

    #[test]
    fn differential_branching_integrates_to_total() {
        let detector = Detector::new(20.0, 2.0, 2.0).unwrap();
        let ch = MesonThreeBodyIsotropicFlux::new(
            vec![(0.0, 1.0)],
            5.0,
            1e-4,
            MesonKind::ChargedPion,
            BosonRep::Pseudoscalar,
            M_MU,
            detector,
            400,
        );
        let mc: f64 = ch
            .differential_branching(&mut StdRng::seed_from_u64(40))
            .iter()
            .map(|(_, w)| w)
            .sum();
        let exact = ch.total_branching();
        assert!(exact > 0.0);
        // Monte Carlo estimate of the branching integral
        assert!((mc - exact).abs() / exact < 0.25, "mc = {mc}, exact = {exact}");
    }
}

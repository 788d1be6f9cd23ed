//! Relativistic propagation of a weighted boson spectrum to the detector.
//!
//! Every sample is boosted by its lab energy: the mean decay length is
//! hbar c p / (Gamma m), survival to the detector face goes as
//! exp(-baseline / lambda) and decay inside the fiducial length as
//! 1 - exp(-length / lambda). A non-positive width denotes a stable
//! particle, which survives with probability one and never decays.

use crate::detector::{Detector, DetectorVolume};
use crate::flux::{DetectorWeights, FluxSpectrum};
use crate::kinematics::{lab_decay_length, momentum, velocity};
use log::debug;
use std::f64::consts::PI;

/// Velocity floor below which a sample is treated as never reaching the
/// detector; both weights clamp to zero instead of going through the
/// exponentials.
const VELOCITY_FLOOR: f64 = 1.0e-10;

/// Point-geometry propagation: survival over the baseline, decay over the
/// fiducial length, both along the line of sight.
///
/// `rescale` multiplies both weights and carries the quadratic coupling
/// rescaling when a spectrum generated at a reference coupling is evaluated
/// at another.
pub fn propagate(
    spectrum: &FluxSpectrum,
    detector: &Detector,
    decay_width: f64,
    rescale: f64,
) -> DetectorWeights {
    debug!(
        "propagating {} samples (width = {:e} MeV) over {} m",
        spectrum.len(),
        decay_width,
        detector.distance
    );
    let mass = spectrum.mass();
    let mut weights = DetectorWeights::with_capacity(spectrum.len());
    for sample in spectrum.iter() {
        let v = velocity(sample.energy, mass);
        if v <= VELOCITY_FLOOR {
            weights.decay.push(0.0);
            weights.scatter.push(0.0);
            continue;
        }
        let lambda = lab_decay_length(momentum(sample.energy, mass), mass, decay_width);
        let survival = (-detector.distance / lambda).exp();
        let decay = 1.0 - (-detector.length / lambda).exp();
        weights.decay.push(rescale * sample.weight * survival * decay);
        weights.scatter.push(rescale * sample.weight * survival);
    }
    weights
}

/// Volume-integral propagation for isotropic spectra.
///
/// The decay weight integrates the decay density over the fiducial cylinder,
/// exp(-x / lambda) / (lambda 4 pi x^2) per volume element at distance x
/// from the source, which folds the solid angle of each element into the
/// weight. The scatter weight deliberately keeps the point-geometry survival
/// over the baseline with no face acceptance: the two sides of the output
/// rest on different geometric assumptions, and callers comparing them must
/// account for that.
pub fn propagate_volume(
    spectrum: &FluxSpectrum,
    volume: &DetectorVolume,
    decay_width: f64,
    rescale: f64,
) -> DetectorWeights {
    debug!(
        "volume-propagating {} samples (width = {:e} MeV)",
        spectrum.len(),
        decay_width
    );
    let mass = spectrum.mass();
    let detector = volume.detector();
    let mut weights = DetectorWeights::with_capacity(spectrum.len());
    for sample in spectrum.iter() {
        let v = velocity(sample.energy, mass);
        if v <= VELOCITY_FLOOR {
            weights.decay.push(0.0);
            weights.scatter.push(0.0);
            continue;
        }
        let lambda = lab_decay_length(momentum(sample.energy, mass), mass, decay_width);
        let survival = (-detector.distance / lambda).exp();
        let integral = if lambda.is_finite() {
            volume.integrate(|point| {
                let x = point.norm();
                (-x / lambda).exp() / (lambda * 4.0 * PI * x * x)
            })
        } else {
            0.0
        };
        weights.decay.push(rescale * sample.weight * integral);
        weights.scatter.push(rescale * sample.weight * survival);
    }
    weights
}

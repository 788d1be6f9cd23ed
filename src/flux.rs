use crate::bremsstrahlung::BremFlux;
use crate::compton::ComptonFlux;
use crate::detector::DetectorVolume;
use crate::meson_three_body::{MesonThreeBodyFlux, MesonThreeBodyIsotropicFlux};
use crate::nuclear::NuclearFlux;
use crate::pair_annihilation::PairAnnihilationFlux;
use crate::pi0::Pi0Flux;
use crate::primakoff::PrimakoffFlux;
use crate::resonance::ResonanceFlux;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// One weighted Monte Carlo boson sample.
///
/// The angle is the lab polar angle to the beam axis and is only carried by
/// channels that track emission directions; isotropic channels leave it
/// unset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FluxSample {
    /// Lab energy [MeV]
    pub energy: f64,
    /// Lab polar angle [rad]
    pub angle: Option<f64>,
    /// Flux weight in the channel's normalization (per primary, per second,
    /// or per decay, depending on the input spectrum)
    pub weight: f64,
}

impl FluxSample {
    pub fn new(energy: f64, weight: f64) -> Self {
        FluxSample {
            energy,
            angle: None,
            weight,
        }
    }

    pub fn with_angle(energy: f64, angle: f64, weight: f64) -> Self {
        FluxSample {
            energy,
            angle: Some(angle),
            weight,
        }
    }
}

/// Weighted boson spectrum produced by one channel simulation.
///
/// Every sample satisfies energy >= mass; kinematically forbidden
/// configurations are skipped during generation rather than stored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FluxSpectrum {
    /// Boson mass [MeV]
    mass: f64,
    samples: Vec<FluxSample>,
}

impl FluxSpectrum {
    pub fn new(mass: f64) -> Self {
        FluxSpectrum {
            mass,
            samples: Vec::new(),
        }
    }

    pub fn with_capacity(mass: f64, capacity: usize) -> Self {
        FluxSpectrum {
            mass,
            samples: Vec::with_capacity(capacity),
        }
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn push(&mut self, sample: FluxSample) {
        self.samples.push(sample);
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> &[FluxSample] {
        &self.samples
    }

    pub fn iter(&self) -> impl Iterator<Item = &FluxSample> {
        self.samples.iter()
    }

    pub fn energies(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.energy).collect()
    }

    pub fn weights(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.weight).collect()
    }

    pub fn angles(&self) -> Vec<Option<f64>> {
        self.samples.iter().map(|s| s.angle).collect()
    }

    /// Sum of all sample weights.
    pub fn total_flux(&self) -> f64 {
        self.samples.iter().map(|s| s.weight).sum()
    }

    /// Flux-weighted mean energy, or zero for an empty spectrum.
    pub fn mean_energy(&self) -> f64 {
        let total = self.total_flux();
        if total == 0.0 {
            return 0.0;
        }
        self.samples.iter().map(|s| s.energy * s.weight).sum::<f64>() / total
    }
}

/// Per-sample weights after propagation to the detector: the expected decay
/// count inside the fiducial volume and the flux surviving to the detector
/// and available for scattering.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DetectorWeights {
    pub decay: Vec<f64>,
    pub scatter: Vec<f64>,
}

impl DetectorWeights {
    pub fn with_capacity(capacity: usize) -> Self {
        DetectorWeights {
            decay: Vec::with_capacity(capacity),
            scatter: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.decay.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decay.is_empty()
    }

    pub fn total_decay(&self) -> f64 {
        self.decay.iter().sum()
    }

    pub fn total_scatter(&self) -> f64 {
        self.scatter.iter().sum()
    }

    /// Multiply both weight arrays in place, e.g. by a geometric acceptance.
    pub fn scale(&mut self, factor: f64) {
        for w in &mut self.decay {
            *w *= factor;
        }
        for w in &mut self.scatter {
            *w *= factor;
        }
    }
}

/// The closed set of production channels.
///
/// Wrapping a channel config in this enum gives it the shared surface:
/// draw a weighted spectrum, then turn it into detector weights through
/// the propagation engine. The meson decay channel contributes two arms,
/// one per geometry.
#[derive(Debug, Clone)]
pub enum ProductionChannel {
    Primakoff(PrimakoffFlux),
    Compton(ComptonFlux),
    Bremsstrahlung(BremFlux),
    Resonance(ResonanceFlux),
    PairAnnihilation(PairAnnihilationFlux),
    Nuclear(NuclearFlux),
    MesonThreeBody(MesonThreeBodyFlux),
    MesonThreeBodyIsotropic(MesonThreeBodyIsotropicFlux),
    Pi0(Pi0Flux),
}

impl ProductionChannel {
    /// Draw a fresh spectrum. Deterministic channels ignore the generator.
    pub fn simulate<R: Rng + ?Sized>(&self, rng: &mut R) -> FluxSpectrum {
        match self {
            ProductionChannel::Primakoff(c) => c.simulate(),
            ProductionChannel::Compton(c) => c.simulate(rng),
            ProductionChannel::Bremsstrahlung(c) => c.simulate(rng),
            ProductionChannel::Resonance(c) => c.simulate(rng),
            ProductionChannel::PairAnnihilation(c) => c.simulate(rng),
            ProductionChannel::Nuclear(c) => c.simulate(),
            ProductionChannel::MesonThreeBody(c) => c.simulate(rng),
            ProductionChannel::MesonThreeBodyIsotropic(c) => c.simulate(rng),
            ProductionChannel::Pi0(c) => c.simulate(),
        }
    }

    /// Decay width at the channel's reference coupling. Meson decay and pi0
    /// products are treated as stable over the baseline.
    pub fn decay_width(&self) -> f64 {
        match self {
            ProductionChannel::Primakoff(c) => c.decay_width(),
            ProductionChannel::Compton(c) => c.decay_width(),
            ProductionChannel::Bremsstrahlung(c) => c.decay_width(),
            ProductionChannel::Resonance(c) => c.decay_width(),
            ProductionChannel::PairAnnihilation(c) => c.decay_width(),
            ProductionChannel::Nuclear(c) => c.decay_width(),
            ProductionChannel::MesonThreeBody(_)
            | ProductionChannel::MesonThreeBodyIsotropic(_)
            | ProductionChannel::Pi0(_) => 0.0,
        }
    }

    /// Whether the far-field 1/(4 pi d^2) acceptance applies.
    pub fn is_isotropic(&self) -> bool {
        match self {
            ProductionChannel::Primakoff(_) => true,
            ProductionChannel::Compton(c) => c.is_isotropic,
            ProductionChannel::Bremsstrahlung(c) => c.is_isotropic,
            ProductionChannel::Resonance(c) => c.is_isotropic,
            ProductionChannel::PairAnnihilation(c) => c.is_isotropic,
            ProductionChannel::Nuclear(c) => c.is_isotropic,
            ProductionChannel::MesonThreeBody(_) => false,
            ProductionChannel::MesonThreeBodyIsotropic(_) => true,
            ProductionChannel::Pi0(c) => c.is_isotropic,
        }
    }

    /// Coupling the quadratic weight rescaling in `propagate` is taken
    /// relative to.
    pub fn reference_coupling(&self) -> f64 {
        match self {
            ProductionChannel::Primakoff(c) => c.gagamma,
            ProductionChannel::Compton(c) => c.ge,
            ProductionChannel::Bremsstrahlung(c) => c.ge,
            ProductionChannel::Resonance(c) => c.ge,
            ProductionChannel::PairAnnihilation(c) => c.ge,
            ProductionChannel::Nuclear(c) => c.gae,
            ProductionChannel::MesonThreeBody(c) => c.decay.coupling,
            ProductionChannel::MesonThreeBodyIsotropic(c) => c.decay.coupling,
            ProductionChannel::Pi0(c) => c.g,
        }
    }

    pub fn propagate(
        &self,
        spectrum: &FluxSpectrum,
        new_coupling: Option<f64>,
    ) -> DetectorWeights {
        match self {
            ProductionChannel::Primakoff(c) => c.propagate(spectrum, new_coupling),
            ProductionChannel::Compton(c) => c.propagate(spectrum, new_coupling),
            ProductionChannel::Bremsstrahlung(c) => c.propagate(spectrum, new_coupling),
            ProductionChannel::Resonance(c) => c.propagate(spectrum, new_coupling),
            ProductionChannel::PairAnnihilation(c) => c.propagate(spectrum, new_coupling),
            ProductionChannel::Nuclear(c) => c.propagate(spectrum, new_coupling),
            ProductionChannel::MesonThreeBody(c) => c.propagate(spectrum, new_coupling),
            ProductionChannel::MesonThreeBodyIsotropic(c) => {
                c.propagate(spectrum, new_coupling)
            }
            ProductionChannel::Pi0(c) => c.propagate(spectrum, new_coupling),
        }
    }

    pub fn propagate_volume(
        &self,
        spectrum: &FluxSpectrum,
        volume: &DetectorVolume,
        new_coupling: Option<f64>,
    ) -> DetectorWeights {
        match self {
            ProductionChannel::Primakoff(c) => {
                c.propagate_volume(spectrum, volume, new_coupling)
            }
            ProductionChannel::Compton(c) => c.propagate_volume(spectrum, volume, new_coupling),
            ProductionChannel::Bremsstrahlung(c) => {
                c.propagate_volume(spectrum, volume, new_coupling)
            }
            ProductionChannel::Resonance(c) => {
                c.propagate_volume(spectrum, volume, new_coupling)
            }
            ProductionChannel::PairAnnihilation(c) => {
                c.propagate_volume(spectrum, volume, new_coupling)
            }
            ProductionChannel::Nuclear(c) => c.propagate_volume(spectrum, volume, new_coupling),
            ProductionChannel::MesonThreeBody(c) => {
                c.propagate_volume(spectrum, volume, new_coupling)
            }
            ProductionChannel::MesonThreeBodyIsotropic(c) => {
                c.propagate_volume(spectrum, volume, new_coupling)
            }
            ProductionChannel::Pi0(c) => c.propagate_volume(spectrum, volume, new_coupling),
        }
    }
}

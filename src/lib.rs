//! Weighted Monte Carlo generation of axion-like-particle and dark-matter
//! fluxes from beam and astrophysical sources, with relativistic propagation
//! of the produced spectra to a downstream detector.
//!
//! Each production channel turns a tabulated input flux into a weighted
//! [`FluxSpectrum`]; the shared propagation engine converts a spectrum into
//! per-sample decay and scattering weights at the detector.

// Core data model and engine modules, re-exported for library usage
pub mod constants;
pub mod cross_sections;
pub mod decay;
mod detector;
mod error;
mod flux;
pub mod halo;
pub mod kinematics;
mod material;
mod matrix_element;
mod meson;
mod photon_absorption;
pub mod propagation;
pub mod qcd_axion;
pub mod solar;
pub mod utilities;

// Production channels
mod bremsstrahlung;
mod compton;
mod meson_three_body;
mod nuclear;
mod pair_annihilation;
mod pi0;
mod primakoff;
mod resonance;

pub use bremsstrahlung::BremFlux;
pub use compton::ComptonFlux;
pub use detector::{Detector, DetectorVolume};
pub use error::ConfigError;
pub use flux::{DetectorWeights, FluxSample, FluxSpectrum, ProductionChannel};
pub use material::Material;
pub use matrix_element::ThreeBodyDecay;
pub use meson::{BosonRep, MesonKind};
pub use meson_three_body::{MesonDecayEvents, MesonThreeBodyFlux, MesonThreeBodyIsotropicFlux};
pub use nuclear::{NuclearFlux, TransitionMultipole};
pub use pair_annihilation::PairAnnihilationFlux;
pub use photon_absorption::AbsCrossSection;
pub use pi0::Pi0Flux;
pub use primakoff::PrimakoffFlux;
pub use resonance::ResonanceFlux;

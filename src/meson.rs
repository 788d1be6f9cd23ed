use crate::constants::{F_K, F_PI, KAON_WIDTH, M_K, M_PI, PION_WIDTH, V_UD, V_US};
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Parent meson of the three-body decay M -> l nu a.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MesonKind {
    ChargedPion,
    ChargedKaon,
}

impl MesonKind {
    /// Meson mass [MeV].
    pub fn mass(&self) -> f64 {
        match self {
            MesonKind::ChargedPion => M_PI,
            MesonKind::ChargedKaon => M_K,
        }
    }

    /// CKM element of the quark current.
    pub fn ckm(&self) -> f64 {
        match self {
            MesonKind::ChargedPion => V_UD,
            MesonKind::ChargedKaon => V_US,
        }
    }

    /// Decay constant f_M [MeV].
    pub fn decay_constant(&self) -> f64 {
        match self {
            MesonKind::ChargedPion => F_PI,
            MesonKind::ChargedKaon => F_K,
        }
    }

    /// Total rest-frame width [MeV].
    pub fn total_width(&self) -> f64 {
        match self {
            MesonKind::ChargedPion => PION_WIDTH,
            MesonKind::ChargedKaon => KAON_WIDTH,
        }
    }
}

impl FromStr for MesonKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pion" => Ok(MesonKind::ChargedPion),
            "kaon" => Ok(MesonKind::ChargedKaon),
            other => Err(ConfigError::UnknownMeson(other.to_string())),
        }
    }
}

impl fmt::Display for MesonKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MesonKind::ChargedPion => write!(f, "pion"),
            MesonKind::ChargedKaon => write!(f, "kaon"),
        }
    }
}

/// Lorentz representation of the new boson radiated in M -> l nu a.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BosonRep {
    Pseudoscalar,
    Scalar,
    Vector,
    QuasiVector,
}

impl FromStr for BosonRep {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "P" => Ok(BosonRep::Pseudoscalar),
            "S" => Ok(BosonRep::Scalar),
            "V" => Ok(BosonRep::Vector),
            "QV" => Ok(BosonRep::QuasiVector),
            other => Err(ConfigError::UnknownRepresentation(other.to_string())),
        }
    }
}

impl fmt::Display for BosonRep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BosonRep::Pseudoscalar => write!(f, "P"),
            BosonRep::Scalar => write!(f, "S"),
            BosonRep::Vector => write!(f, "V"),
            BosonRep::QuasiVector => write!(f, "QV"),
        }
    }
}

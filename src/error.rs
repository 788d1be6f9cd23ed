use thiserror::Error;

/// Errors raised while assembling a flux configuration.
///
/// Only structural misconfiguration is fatal. Kinematically forbidden inputs
/// (sub-threshold lines, closed phase space) are never errors: the affected
/// lines simply contribute no samples.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unknown meson type: '{0}' (expected 'pion' or 'kaon')")]
    UnknownMeson(String),

    #[error("Unknown boson representation: '{0}' (expected 'P', 'S', 'V' or 'QV')")]
    UnknownRepresentation(String),

    #[error("Unknown material: '{0}'")]
    UnknownMaterial(String),

    #[error("Invalid detector geometry: {0}")]
    InvalidGeometry(String),
}

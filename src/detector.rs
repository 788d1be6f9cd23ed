use crate::error::ConfigError;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Downstream detector geometry.
///
/// The production point sits at the origin with the beam along +z. All
/// lengths are in meters, the face area in square meters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Detector {
    /// Distance from the production point to the detector front face [m]
    pub distance: f64,
    /// Longitudinal depth of the fiducial volume [m]
    pub length: f64,
    /// Area of the front face [m^2]
    pub area: f64,
}

impl Detector {
    pub fn new(distance: f64, length: f64, area: f64) -> Result<Self, ConfigError> {
        if distance <= 0.0 || length <= 0.0 || area <= 0.0 {
            return Err(ConfigError::InvalidGeometry(format!(
                "distance, length and area must be positive (got {}, {}, {})",
                distance, length, area
            )));
        }
        Ok(Detector {
            distance,
            length,
            area,
        })
    }

    /// Fraction of an isotropic flux that crosses the front face, area / (4 pi d^2).
    pub fn geometric_acceptance(&self) -> f64 {
        self.area / (4.0 * PI * self.distance * self.distance)
    }

    /// Radius of the front face assuming a circular cross section [m].
    pub fn radius(&self) -> f64 {
        (self.area / PI).sqrt()
    }

    /// Half-angle subtended by the front face from the production point.
    pub fn half_angle(&self) -> f64 {
        (self.radius() / self.distance).atan()
    }

    /// Cosine of the half-angle subtended by the detector as seen from a point
    /// on the beam axis at longitudinal position `z` upstream of the face.
    pub fn acceptance_cos(&self, z: f64) -> f64 {
        (self.length / (self.distance - z) / 2.0).atan().cos()
    }
}

/// Cylindrical fiducial volume used for the volume-integrated decay
/// probability. The cylinder axis lies on the beam axis, the front face at
/// `detector.distance`.
#[derive(Debug, Clone)]
pub struct DetectorVolume {
    detector: Detector,
    /// Grid cells per dimension for the midpoint quadrature
    cells: usize,
}

impl DetectorVolume {
    pub fn new(detector: Detector) -> Self {
        DetectorVolume {
            detector,
            cells: 60,
        }
    }

    pub fn with_cells(detector: Detector, cells: usize) -> Self {
        DetectorVolume { detector, cells }
    }

    pub fn detector(&self) -> &Detector {
        &self.detector
    }

    /// Integrate `f` over the fiducial cylinder by the midpoint rule.
    ///
    /// The integrand receives the position of each grid cell relative to the
    /// production point. Azimuthal symmetry about the beam axis is assumed,
    /// so the grid spans (z, rho) and each cell carries the ring volume
    /// 2 pi rho drho dz.
    pub fn integrate<F>(&self, f: F) -> f64
    where
        F: Fn(&Vector3<f64>) -> f64,
    {
        let n = self.cells;
        let radius = self.detector.radius();
        let dz = self.detector.length / n as f64;
        let drho = radius / n as f64;
        let mut total = 0.0;
        for i in 0..n {
            let z = self.detector.distance + (i as f64 + 0.5) * dz;
            for j in 0..n {
                let rho = (j as f64 + 0.5) * drho;
                let point = Vector3::new(rho, 0.0, z);
                total += f(&point) * 2.0 * PI * rho * drho * dz;
            }
        }
        total
    }

    /// Total fiducial volume [m^3].
    pub fn volume(&self) -> f64 {
        self.detector.area * self.detector.length
    }
}

use serde::{Deserialize, Serialize};

/// Misalignment of a single projection in a tilt series, together with the
/// tilt angle it was recorded at.
///
/// Angles are in degrees; the translation is in raw-image pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionAlignment {
    pub tilt_angle: f64,
    pub tx: f64,
    pub ty: f64,
    pub rotation: f64,
    pub magnification: f64,
}

impl ProjectionAlignment {
    /// A perfectly aligned projection at `tilt_angle`.
    pub fn untransformed(tilt_angle: f64) -> Self {
        Self {
            tilt_angle,
            tx: 0.0,
            ty: 0.0,
            rotation: 0.0,
            magnification: 1.0,
        }
    }
}

impl Default for ProjectionAlignment {
    fn default() -> Self {
        Self::untransformed(0.0)
    }
}

/// Geometry shared by all projections of a tilt series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TiltGeometry {
    /// Edge length of the (square) raw projection images in pixels.
    pub dimension: f64,
    /// Factor between particle coordinates and raw-image pixels.
    pub binning: u32,
}

impl TiltGeometry {
    pub fn new(dimension: f64, binning: u32) -> Self {
        Self { dimension, binning }
    }
}

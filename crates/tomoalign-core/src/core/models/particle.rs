use serde::{Deserialize, Serialize};

/// Position and orientation of a sub-tomogram particle.
///
/// The position is expressed in binned tomogram voxels; the orientation is a
/// ZXZ Euler triple in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ParticlePose {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub phi: f64,
    pub the: f64,
    pub psi: f64,
}

impl ParticlePose {
    pub fn new(x: f64, y: f64, z: f64, phi: f64, the: f64, psi: f64) -> Self {
        Self {
            x,
            y,
            z,
            phi,
            the,
            psi,
        }
    }

    /// A particle at `(x, y, z)` with no rotation.
    pub fn at(x: f64, y: f64, z: f64) -> Self {
        Self::new(x, y, z, 0.0, 0.0, 0.0)
    }
}

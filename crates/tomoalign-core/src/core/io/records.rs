use crate::core::transform::point::Positioned;
use crate::core::transform::projection::ProjectionResult;
use nalgebra::Point3;
use serde::{Deserialize, Serialize};

/// A bare 3D coordinate, one row of a point table (`x,y,z`).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PointRecord {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Positioned for PointRecord {
    fn position(&self) -> Point3<f64> {
        Point3::new(self.x, self.y, self.z)
    }

    fn set_position(&mut self, position: Point3<f64>) {
        self.x = position.x;
        self.y = position.y;
        self.z = position.z;
    }
}

impl From<Point3<f64>> for PointRecord {
    fn from(p: Point3<f64>) -> Self {
        Self {
            x: p.x,
            y: p.y,
            z: p.z,
        }
    }
}

impl From<PointRecord> for Point3<f64> {
    fn from(r: PointRecord) -> Self {
        Point3::new(r.x, r.y, r.z)
    }
}

/// One particle seen in one projection, flattened for tabular output.
///
/// `m00` through `m22` hold the template matrix in row-major order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectedRecord {
    pub particle: usize,
    pub projection: usize,
    pub raw_x: f64,
    pub raw_y: f64,
    pub aligned_x: f64,
    pub aligned_y: f64,
    pub m00: f64,
    pub m01: f64,
    pub m02: f64,
    pub m10: f64,
    pub m11: f64,
    pub m12: f64,
    pub m20: f64,
    pub m21: f64,
    pub m22: f64,
}

impl ProjectedRecord {
    pub fn new(particle: usize, projection: usize, result: &ProjectionResult) -> Self {
        let m = &result.template_matrix;
        Self {
            particle,
            projection,
            raw_x: result.raw_position.x,
            raw_y: result.raw_position.y,
            aligned_x: result.aligned_position.x,
            aligned_y: result.aligned_position.y,
            m00: m[(0, 0)],
            m01: m[(0, 1)],
            m02: m[(0, 2)],
            m10: m[(1, 0)],
            m11: m[(1, 1)],
            m12: m[(1, 2)],
            m20: m[(2, 0)],
            m21: m[(2, 1)],
            m22: m[(2, 2)],
        }
    }
}

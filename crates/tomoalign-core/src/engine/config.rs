use crate::core::models::alignment::{ProjectionAlignment, TiltGeometry};
use crate::core::models::cell::PeriodicCell;
use crate::core::transform::matrix::{
    generate_rotation_matrix, matrix_3d_to_4x4, matrix_magnify_3d, matrix_rotate_3d_x,
    matrix_rotate_3d_y, matrix_rotate_3d_z, matrix_translate_3d,
};
use nalgebra::Matrix4;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
    #[error("Invalid value for '{parameter}': {reason}")]
    InvalidValue {
        parameter: &'static str,
        reason: String,
    },
}

/// A tilt series: its shared geometry and the misalignment of every
/// projection, in acquisition order.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectionConfig {
    pub geometry: TiltGeometry,
    pub projections: Vec<ProjectionAlignment>,
}

#[derive(Default)]
pub struct ProjectionConfigBuilder {
    dimension: Option<f64>,
    binning: Option<u32>,
    projections: Vec<ProjectionAlignment>,
}

impl ProjectionConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dimension(mut self, dimension: f64) -> Self {
        self.dimension = Some(dimension);
        self
    }
    pub fn binning(mut self, binning: u32) -> Self {
        self.binning = Some(binning);
        self
    }
    pub fn projections(mut self, projections: Vec<ProjectionAlignment>) -> Self {
        self.projections = projections;
        self
    }
    pub fn add_projection(mut self, projection: ProjectionAlignment) -> Self {
        self.projections.push(projection);
        self
    }
    /// Adds one perfectly aligned projection per tilt angle.
    pub fn tilt_angles(mut self, angles: impl IntoIterator<Item = f64>) -> Self {
        self.projections
            .extend(angles.into_iter().map(ProjectionAlignment::untransformed));
        self
    }

    /// Binning defaults to 1.
    ///
    /// Unlike [`combine_trans_projection`](crate::core::transform::projection::combine_trans_projection),
    /// which takes any geometry, a tilt series built here must have a finite
    /// positive dimension and a non-zero binning.
    pub fn build(self) -> Result<ProjectionConfig, ConfigError> {
        let dimension = self
            .dimension
            .ok_or(ConfigError::MissingParameter("dimension"))?;
        if !dimension.is_finite() || dimension <= 0.0 {
            return Err(ConfigError::InvalidValue {
                parameter: "dimension",
                reason: format!("must be a positive number of pixels, got {}", dimension),
            });
        }
        let binning = self.binning.unwrap_or(1);
        if binning == 0 {
            return Err(ConfigError::InvalidValue {
                parameter: "binning",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.projections.is_empty() {
            return Err(ConfigError::MissingParameter("projections"));
        }
        Ok(ProjectionConfig {
            geometry: TiltGeometry::new(dimension, binning),
            projections: self.projections,
        })
    }
}

/// One elementary transformation of a point set. Angles are in degrees.
#[derive(Debug, Clone, PartialEq)]
pub enum TransformStep {
    RotateX(f64),
    RotateY(f64),
    RotateZ(f64),
    Euler { phi: f64, the: f64, psi: f64 },
    Magnify(f64),
    Translate { tx: f64, ty: f64, tz: f64 },
    Matrix(Matrix4<f64>),
}

impl TransformStep {
    pub fn to_matrix(&self) -> Matrix4<f64> {
        match *self {
            TransformStep::RotateX(deg) => matrix_3d_to_4x4(&matrix_rotate_3d_x(deg)),
            TransformStep::RotateY(deg) => matrix_3d_to_4x4(&matrix_rotate_3d_y(deg)),
            TransformStep::RotateZ(deg) => matrix_3d_to_4x4(&matrix_rotate_3d_z(deg)),
            TransformStep::Euler { phi, the, psi } => {
                matrix_3d_to_4x4(&generate_rotation_matrix(phi, the, psi))
            }
            TransformStep::Magnify(factor) => matrix_3d_to_4x4(&matrix_magnify_3d(factor)),
            TransformStep::Translate { tx, ty, tz } => matrix_translate_3d(tx, ty, tz),
            TransformStep::Matrix(m) => m,
        }
    }
}

/// An ordered list of steps applied to a point set, plus an optional
/// periodic cell the results are wrapped into.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TransformConfig {
    pub steps: Vec<TransformStep>,
    pub cell: Option<PeriodicCell>,
}

impl TransformConfig {
    pub fn new(steps: Vec<TransformStep>) -> Self {
        Self { steps, cell: None }
    }

    pub fn with_cell(mut self, cell: PeriodicCell) -> Self {
        self.cell = Some(cell);
        self
    }

    /// Multiplies the steps into a single matrix in which the first listed
    /// step is applied first. An empty list yields the identity.
    pub fn compose(&self) -> Matrix4<f64> {
        self.steps
            .iter()
            .fold(Matrix4::identity(), |acc, step| step.to_matrix() * acc)
    }
}

//! Affine transformation matrices and their application to points.
//!
//! Every builder returns a plain `nalgebra` matrix so that callers compose
//! transformations with ordinary matrix multiplication. Composition follows
//! the column-vector convention: in `rotate * magnify * translate` the
//! translation is applied first and the rotation last.
//!
//! Angles are in degrees and the rotation builders encode the *inverse* of the
//! requested rotation, which is what alignment code needs when undoing a
//! measured orientation.

pub mod matrix;
pub mod point;
pub mod projection;

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransformError {
    #[error("Dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch { expected: String, found: String },
}

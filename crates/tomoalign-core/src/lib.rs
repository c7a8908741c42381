//! # tomoalign Core Library
//!
//! Affine transformation matrices, resampling and projection-alignment
//! composition for electron-tomography particle alignment.
//!
//! ## Architectural Philosophy
//!
//! The library keeps the same three-layer split throughout:
//!
//! - **[`core`]: The Foundation.** Stateless matrix builders, the resamplers
//!   and their spline interpolation, the projection-alignment composer, value
//!   models (`ParticlePose`, `ProjectionAlignment`) and CSV I/O.
//!
//! - **[`engine`]: The Plumbing.** Validated configuration assembled through
//!   builders, and callback-based progress reporting.
//!
//! - **[`workflows`]: The Public API.** Batch procedures such as projecting a
//!   particle list through a whole tilt series, or moving a point set through
//!   a chain of transformations.
//!
//! ## Conventions
//!
//! Angles are in degrees and every rotation builder encodes the *inverse*
//! rotation (trigonometric arguments use `-angle`). Matrices compose by plain
//! multiplication, rightmost applied first.

pub mod core;
pub mod engine;
pub mod workflows;

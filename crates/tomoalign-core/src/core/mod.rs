//! # Core Module
//!
//! The computational building blocks of tomoalign.
//!
//! - **Transformations** ([`transform`]) - Matrix builders, application to
//!   points, and the projection-alignment composer
//! - **Resampling** ([`resample`]) - Volumes and images pulled through a
//!   matrix with order-3 interpolation
//! - **Interpolation** ([`interpolation`]) - Cubic B-spline coefficients and
//!   sampling under an explicit boundary policy
//! - **Models** ([`models`]) - Particle poses, projection misalignment, tilt
//!   geometry and periodic cells
//! - **File I/O** ([`io`]) - CSV tables of particles, projections and points
//!
//! Everything here is a pure function of its inputs; nothing keeps state
//! between calls.

pub mod interpolation;
pub mod io;
pub mod models;
pub mod resample;
pub mod transform;

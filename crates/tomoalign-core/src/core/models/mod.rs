//! # Core Models Module
//!
//! Plain value types describing the inputs of the alignment computations:
//!
//! - [`particle`] - Particle position and ZXZ orientation
//! - [`alignment`] - Per-projection misalignment and tilt-series geometry
//! - [`cell`] - Periodic box for wrapping transformed coordinates
//!
//! All models derive `serde` traits so they can be read directly from CSV
//! tables by [`crate::core::io`].

pub mod alignment;
pub mod cell;
pub mod particle;

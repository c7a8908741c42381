//! # Workflows Module
//!
//! Batch entry points that tie the configuration types of [`crate::engine`]
//! to the computations in [`crate::core`].
//!
//! - **Projection Workflow** ([`project`]) - Every particle of a list seen
//!   through every projection of a tilt series.
//! - **Transformation Workflow** ([`transform`]) - A composed chain of
//!   rotations, magnifications and translations applied to a point set.
//!
//! Workflows report through a [`crate::engine::progress::ProgressReporter`]
//! and log through `tracing`; they never fail once given a valid
//! configuration.

pub mod project;
pub mod transform;

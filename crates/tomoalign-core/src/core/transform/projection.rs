use super::matrix::{
    generate_rotation_matrix, matrix_magnify_2d, matrix_magnify_3d, matrix_rotate_2d,
    matrix_rotate_3d_z, matrix_translate_2d,
};
use crate::core::models::alignment::{ProjectionAlignment, TiltGeometry};
use crate::core::models::particle::ParticlePose;
use nalgebra::{Matrix3, Point2, Vector3};
use std::f64::consts::PI;

/// Everything needed to compare a template against one particle in one
/// projection with a single round of interpolation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectionResult {
    /// Inverse of the 2D projection alignment; maps centered aligned-image
    /// coordinates back onto centered raw-image coordinates.
    pub align_transformation: Matrix3<f64>,
    /// Particle position in the raw (unaligned) projection, in pixels.
    pub raw_position: Point2<f64>,
    /// Particle position in the aligned projection, in pixels.
    pub aligned_position: Point2<f64>,
    /// Rotation and magnification a template must go through to match the
    /// particle as it appears in this projection.
    pub template_matrix: Matrix3<f64>,
}

/// Combines the projection misalignment, particle pose and tilt geometry.
///
/// The tilt axis is assumed to run along y and the raw images to be square
/// with edge length `dim`. Particle coordinates are multiplied by `binning`
/// before projecting. A singular alignment (e.g. `mag == 0`) produces a
/// non-finite `align_transformation` and raw position instead of an error.
#[allow(clippy::too_many_arguments)]
pub fn combine_trans_projection(
    tx: f64,
    ty: f64,
    rot: f64,
    mag: f64,
    x: f64,
    y: f64,
    z: f64,
    phi: f64,
    the: f64,
    psi: f64,
    tiltangle: f64,
    dim: f64,
    binning: u32,
) -> ProjectionResult {
    let forward = matrix_rotate_2d(rot) * matrix_magnify_2d(mag) * matrix_translate_2d(tx, ty);
    let align_transformation = forward
        .try_inverse()
        .unwrap_or_else(|| Matrix3::from_element(f64::NAN));

    let binning = binning as f64;
    let x = x * binning;
    let y = y * binning;
    let z = z * binning;

    let half = dim / 2.0;
    let (sin_tilt, cos_tilt) = (tiltangle * PI / 180.0).sin_cos();
    let aligned_y = y;
    let aligned_x = (cos_tilt * (x - half) - sin_tilt * (z - half)) + half;

    let raw = align_transformation * Vector3::new(aligned_x - half, aligned_y - half, 1.0);

    let template_matrix = generate_rotation_matrix(0.0, tiltangle, 0.0)
        * generate_rotation_matrix(phi, the, psi)
        * matrix_rotate_3d_z(rot)
        * matrix_magnify_3d(mag);

    ProjectionResult {
        align_transformation,
        raw_position: Point2::new(raw.x + half, raw.y + half),
        aligned_position: Point2::new(aligned_x, aligned_y),
        template_matrix,
    }
}

/// Struct-based form of [`combine_trans_projection`].
pub fn project_particle(
    pose: &ParticlePose,
    alignment: &ProjectionAlignment,
    geometry: &TiltGeometry,
) -> ProjectionResult {
    combine_trans_projection(
        alignment.tx,
        alignment.ty,
        alignment.rotation,
        alignment.magnification,
        pose.x,
        pose.y,
        pose.z,
        pose.phi,
        pose.the,
        pose.psi,
        alignment.tilt_angle,
        geometry.dimension,
        geometry.binning,
    )
}

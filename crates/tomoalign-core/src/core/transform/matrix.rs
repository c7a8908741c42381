use super::TransformError;
use nalgebra::{Matrix3, Matrix4, SMatrix};
use std::f64::consts::PI;

/// Converts an angle in degrees to the radians of the rotation that undoes it.
#[inline]
fn undo_radians(deg: f64) -> f64 {
    -deg * PI / 180.0
}

/// Creates a 3x3 rotation matrix for a `deg` turn around the x axis.
///
/// The matrix encodes the inverse rotation: callers pass the angle they want
/// undone, so `matrix_rotate_3d_x(90.0)` maps `(0, 1, 0)` onto `(0, 0, -1)`.
pub fn matrix_rotate_3d_x(deg: f64) -> Matrix3<f64> {
    let rad = undo_radians(deg);
    let (s, c) = rad.sin_cos();
    Matrix3::new(
        1.0, 0.0, 0.0, //
        0.0, c, -s, //
        0.0, s, c,
    )
}

/// Creates a 3x3 rotation matrix for a `deg` turn around the y axis.
pub fn matrix_rotate_3d_y(deg: f64) -> Matrix3<f64> {
    let rad = undo_radians(deg);
    let (s, c) = rad.sin_cos();
    Matrix3::new(
        c, 0.0, s, //
        0.0, 1.0, 0.0, //
        -s, 0.0, c,
    )
}

/// Creates a 3x3 rotation matrix for a `deg` turn around the z axis.
pub fn matrix_rotate_3d_z(deg: f64) -> Matrix3<f64> {
    let rad = undo_radians(deg);
    let (s, c) = rad.sin_cos();
    Matrix3::new(
        c, -s, 0.0, //
        s, c, 0.0, //
        0.0, 0.0, 1.0,
    )
}

/// Creates a 4x4 homogeneous matrix for a 3D translation.
pub fn matrix_translate_3d(tx: f64, ty: f64, tz: f64) -> Matrix4<f64> {
    Matrix4::new(
        1.0, 0.0, 0.0, tx, //
        0.0, 1.0, 0.0, ty, //
        0.0, 0.0, 1.0, tz, //
        0.0, 0.0, 0.0, 1.0,
    )
}

/// Creates a 3x3 matrix scaling every axis by `f`.
pub fn matrix_magnify_3d(f: f64) -> Matrix3<f64> {
    Matrix3::from_diagonal_element(f)
}

/// Creates a homogeneous 2D rotation matrix (`[[R, 0], [0, 1]]`) undoing a
/// `deg` turn in the image plane.
pub fn matrix_rotate_2d(deg: f64) -> Matrix3<f64> {
    let alpha = undo_radians(deg);
    let (s, c) = alpha.sin_cos();
    Matrix3::new(
        c, s, 0.0, //
        -s, c, 0.0, //
        0.0, 0.0, 1.0,
    )
}

/// Creates a homogeneous 2D matrix scaling both image axes by `f`.
pub fn matrix_magnify_2d(f: f64) -> Matrix3<f64> {
    Matrix3::new(
        f, 0.0, 0.0, //
        0.0, f, 0.0, //
        0.0, 0.0, 1.0,
    )
}

/// Creates a homogeneous 2D translation matrix.
pub fn matrix_translate_2d(tx: f64, ty: f64) -> Matrix3<f64> {
    Matrix3::new(
        1.0, 0.0, tx, //
        0.0, 1.0, ty, //
        0.0, 0.0, 1.0,
    )
}

/// Lifts a homogeneous 2D affine matrix into a 3D one.
///
/// The new z axis is inserted with unit scale and no coupling to x or y; the
/// 2D translation column becomes the x/y part of the 3D translation column.
pub fn matrix_2d_to_3d(matrix: &Matrix3<f64>) -> Matrix4<f64> {
    let m = matrix;
    Matrix4::new(
        m[(0, 0)], m[(0, 1)], 0.0, m[(0, 2)], //
        m[(1, 0)], m[(1, 1)], 0.0, m[(1, 2)], //
        0.0, 0.0, 1.0, 0.0, //
        m[(2, 0)], m[(2, 1)], 0.0, m[(2, 2)],
    )
}

/// Embeds a 3x3 linear matrix into a 4x4 homogeneous matrix without translation.
pub fn matrix_3d_to_4x4(matrix: &Matrix3<f64>) -> Matrix4<f64> {
    matrix.to_homogeneous()
}

/// Extracts the linear (top-left 3x3) block of a 4x4 homogeneous matrix.
pub fn matrix_4x4_to_3d(matrix: &Matrix4<f64>) -> Matrix3<f64> {
    matrix.fixed_view::<3, 3>(0, 0).into_owned()
}

/// Creates the 3x3 rotation matrix for the ZXZ Euler angles `(phi, the, psi)`.
///
/// All three angles are negated before use, so the result is the inverse of
/// the rotation they describe. The nine entries are written out in closed
/// form; composing three axis rotations does not reproduce the same signs.
pub fn generate_rotation_matrix(phi: f64, the: f64, psi: f64) -> Matrix3<f64> {
    let phi = -phi * PI / 180.0;
    let the = -the * PI / 180.0;
    let psi = -psi * PI / 180.0;

    let (sin_alpha, cos_alpha) = phi.sin_cos();
    let (sin_beta, cos_beta) = the.sin_cos();
    let (sin_gamma, cos_gamma) = psi.sin_cos();

    Matrix3::new(
        cos_alpha * cos_gamma - cos_beta * sin_alpha * sin_gamma,
        -cos_alpha * sin_gamma - cos_beta * sin_alpha * cos_gamma,
        sin_beta * sin_alpha,
        sin_alpha * cos_gamma + cos_beta * cos_alpha * sin_gamma,
        -sin_alpha * sin_gamma + cos_beta * cos_alpha * cos_gamma,
        -sin_beta * cos_alpha,
        sin_beta * sin_gamma,
        sin_beta * cos_gamma,
        cos_beta,
    )
}

/// Builds a statically sized matrix from row-major nested rows.
///
/// # Errors
///
/// Returns [`TransformError::DimensionMismatch`] if the number of rows or the
/// length of any row differs from `R` x `C`.
pub fn matrix_from_rows<const R: usize, const C: usize, Row: AsRef<[f64]>>(
    rows: &[Row],
) -> Result<SMatrix<f64, R, C>, TransformError> {
    let expected = format!("{}x{}", R, C);
    if rows.len() != R {
        return Err(TransformError::DimensionMismatch {
            expected,
            found: format!("{} rows", rows.len()),
        });
    }
    if let Some((index, row)) = rows
        .iter()
        .enumerate()
        .find(|(_, row)| row.as_ref().len() != C)
    {
        return Err(TransformError::DimensionMismatch {
            expected,
            found: format!("row {} with {} columns", index, row.as_ref().len()),
        });
    }
    Ok(SMatrix::from_fn(|r, c| rows[r].as_ref()[c]))
}

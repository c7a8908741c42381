//! Resampling of volumes and images through transformation matrices.
//!
//! Every output cell takes the input value at the coordinate obtained by
//! applying the matrix to that cell's own coordinate (a pull mapping), using
//! order-3 spline interpolation. Two origin conventions exist and are kept
//! as separate functions:
//!
//! - corner origin ([`matrix_apply_to_3d_4x4`]): index `(0, 0, 0)` is the
//!   origin and the full homogeneous matrix, translation included, is used;
//! - center origin ([`matrix_apply_to_3d_3x3`], [`matrix_apply_to_2d`]):
//!   coordinates are shifted by `-shape / 2` before the matrix and by
//!   `+shape / 2` after it, so rotations pivot about the middle of the array.

use crate::core::interpolation::InterpolationOptions;
use crate::core::interpolation::spline::SplineInterpolator;
use crate::core::transform::TransformError;
use nalgebra::{DMatrix, Matrix3, Matrix4, SMatrix, Vector3, Vector4};
use ndarray::{Array2, Array3, ArrayBase, ArrayD, ArrayViewD, Data, Ix2, Ix3, Zip};

/// Where the coordinate origin of a resampling grid sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridOrigin {
    /// Index zero on every axis.
    Corner,
    /// `shape / 2` on every axis.
    Center,
}

/// Resamples `vol` through a 4x4 homogeneous matrix with the origin at index
/// `(0, 0, 0)`, using the default boundary policy.
pub fn matrix_apply_to_3d_4x4<S>(vol: &ArrayBase<S, Ix3>, matrix: &Matrix4<f64>) -> Array3<f64>
where
    S: Data<Elem = f64>,
{
    matrix_apply_to_3d_4x4_with(vol, matrix, &InterpolationOptions::default())
}

pub fn matrix_apply_to_3d_4x4_with<S>(
    vol: &ArrayBase<S, Ix3>,
    matrix: &Matrix4<f64>,
    options: &InterpolationOptions,
) -> Array3<f64>
where
    S: Data<Elem = f64>,
{
    let interpolator = SplineInterpolator::new(vol, options);
    fill_volume(vol.dim(), |(i, j, k)| {
        let p = matrix * Vector4::new(i as f64, j as f64, k as f64, 1.0);
        interpolator.sample([p.x, p.y, p.z])
    })
}

/// Resamples `vol` through a 3x3 linear matrix pivoting about the volume
/// center, using the default boundary policy.
pub fn matrix_apply_to_3d_3x3<S>(vol: &ArrayBase<S, Ix3>, matrix: &Matrix3<f64>) -> Array3<f64>
where
    S: Data<Elem = f64>,
{
    matrix_apply_to_3d_3x3_with(vol, matrix, &InterpolationOptions::default())
}

pub fn matrix_apply_to_3d_3x3_with<S>(
    vol: &ArrayBase<S, Ix3>,
    matrix: &Matrix3<f64>,
    options: &InterpolationOptions,
) -> Array3<f64>
where
    S: Data<Elem = f64>,
{
    let (nx, ny, nz) = vol.dim();
    let center = Vector3::new(nx as f64 / 2.0, ny as f64 / 2.0, nz as f64 / 2.0);
    let interpolator = SplineInterpolator::new(vol, options);
    fill_volume((nx, ny, nz), |(i, j, k)| {
        let centered = Vector3::new(i as f64, j as f64, k as f64) - center;
        let p = matrix * centered + center;
        interpolator.sample([p.x, p.y, p.z])
    })
}

/// Resamples a 2D image through a homogeneous 3x3 (2D affine) matrix pivoting
/// about the image center, using the default boundary policy.
pub fn matrix_apply_to_2d<S>(data: &ArrayBase<S, Ix2>, matrix: &Matrix3<f64>) -> Array2<f64>
where
    S: Data<Elem = f64>,
{
    matrix_apply_to_2d_with(data, matrix, &InterpolationOptions::default())
}

pub fn matrix_apply_to_2d_with<S>(
    data: &ArrayBase<S, Ix2>,
    matrix: &Matrix3<f64>,
    options: &InterpolationOptions,
) -> Array2<f64>
where
    S: Data<Elem = f64>,
{
    let (nx, ny) = data.dim();
    let (cx, cy) = (nx as f64 / 2.0, ny as f64 / 2.0);
    let interpolator = SplineInterpolator::new(data, options);
    fill_image((nx, ny), |(i, j)| {
        let p = matrix * Vector3::new(i as f64 - cx, j as f64 - cy, 1.0);
        interpolator.sample([p.x + cx, p.y + cy])
    })
}

/// Resamples an array whose dimensionality is only known at runtime.
///
/// Accepted combinations are a 3D array with a 4x4 matrix ([`GridOrigin::Corner`])
/// or a 3x3 matrix ([`GridOrigin::Center`]), and a 2D array with a 3x3
/// matrix ([`GridOrigin::Center`]).
///
/// # Errors
///
/// Returns [`TransformError::DimensionMismatch`] for any other combination.
pub fn resample_dyn(
    array: ArrayViewD<'_, f64>,
    matrix: &DMatrix<f64>,
    origin: GridOrigin,
    options: &InterpolationOptions,
) -> Result<ArrayD<f64>, TransformError> {
    let ndim = array.ndim();
    match (ndim, origin) {
        (3, GridOrigin::Corner) => {
            let m: Matrix4<f64> = fixed_from_dynamic(matrix)?;
            let vol = array
                .into_dimensionality::<Ix3>()
                .map_err(|e| shape_mismatch("3D array", e))?;
            Ok(matrix_apply_to_3d_4x4_with(&vol, &m, options).into_dyn())
        }
        (3, GridOrigin::Center) => {
            let m: Matrix3<f64> = fixed_from_dynamic(matrix)?;
            let vol = array
                .into_dimensionality::<Ix3>()
                .map_err(|e| shape_mismatch("3D array", e))?;
            Ok(matrix_apply_to_3d_3x3_with(&vol, &m, options).into_dyn())
        }
        (2, GridOrigin::Center) => {
            let m: Matrix3<f64> = fixed_from_dynamic(matrix)?;
            let image = array
                .into_dimensionality::<Ix2>()
                .map_err(|e| shape_mismatch("2D array", e))?;
            Ok(matrix_apply_to_2d_with(&image, &m, options).into_dyn())
        }
        (2, GridOrigin::Corner) => Err(TransformError::DimensionMismatch {
            expected: "3D array for corner-origin resampling".to_string(),
            found: "2D array".to_string(),
        }),
        (n, _) => Err(TransformError::DimensionMismatch {
            expected: "2D or 3D array".to_string(),
            found: format!("{}D array", n),
        }),
    }
}

fn fixed_from_dynamic<const R: usize, const C: usize>(
    matrix: &DMatrix<f64>,
) -> Result<SMatrix<f64, R, C>, TransformError> {
    if matrix.shape() != (R, C) {
        return Err(TransformError::DimensionMismatch {
            expected: format!("{}x{} matrix", R, C),
            found: format!("{}x{} matrix", matrix.nrows(), matrix.ncols()),
        });
    }
    Ok(SMatrix::from_fn(|r, c| matrix[(r, c)]))
}

fn shape_mismatch(expected: &str, error: ndarray::ShapeError) -> TransformError {
    TransformError::DimensionMismatch {
        expected: expected.to_string(),
        found: error.to_string(),
    }
}

fn fill_volume<F>(shape: (usize, usize, usize), sample: F) -> Array3<f64>
where
    F: Fn((usize, usize, usize)) -> f64 + Sync + Send,
{
    let mut out = Array3::zeros(shape);
    let zip = Zip::indexed(&mut out);

    #[cfg(not(feature = "parallel"))]
    zip.for_each(|index, value| *value = sample(index));

    #[cfg(feature = "parallel")]
    zip.par_for_each(|index, value| *value = sample(index));

    out
}

fn fill_image<F>(shape: (usize, usize), sample: F) -> Array2<f64>
where
    F: Fn((usize, usize)) -> f64 + Sync + Send,
{
    let mut out = Array2::zeros(shape);
    let zip = Zip::indexed(&mut out);

    #[cfg(not(feature = "parallel"))]
    zip.for_each(|index, value| *value = sample(index));

    #[cfg(feature = "parallel")]
    zip.par_for_each(|index, value| *value = sample(index));

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::interpolation::BoundaryMode;
    use crate::core::transform::matrix::{
        matrix_3d_to_4x4, matrix_rotate_2d, matrix_rotate_3d_z, matrix_translate_2d,
        matrix_translate_3d,
    };
    use ndarray::{Array, IxDyn};

    const TOLERANCE: f64 = 1e-9;

    fn test_volume() -> Array3<f64> {
        Array3::from_shape_fn((6, 5, 4), |(i, j, k)| {
            ((i * 31 + j * 17 + k * 7) % 11) as f64 - 3.0
        })
    }

    fn test_image() -> Array2<f64> {
        Array2::from_shape_fn((6, 6), |(i, j)| ((i * 13 + j * 5) % 7) as f64)
    }

    fn assert_arrays_close<D: ndarray::Dimension>(a: &Array<f64, D>, b: &Array<f64, D>) {
        assert_eq!(a.shape(), b.shape());
        for (x, y) in a.iter().zip(b.iter()) {
            assert!((x - y).abs() < TOLERANCE, "{} != {}", x, y);
        }
    }

    #[test]
    fn centered_identity_reproduces_volume() {
        let vol = test_volume();
        let out = matrix_apply_to_3d_3x3(&vol, &Matrix3::identity());
        assert_arrays_close(&out, &vol);
    }

    #[test]
    fn corner_identity_reproduces_volume() {
        let vol = test_volume();
        let out = matrix_apply_to_3d_4x4(&vol, &Matrix4::identity());
        assert_arrays_close(&out, &vol);
    }

    #[test]
    fn centered_identity_reproduces_image() {
        let image = test_image();
        let out = matrix_apply_to_2d(&image, &Matrix3::identity());
        assert_arrays_close(&out, &image);
    }

    #[test]
    fn output_keeps_input_shape() {
        let vol = Array3::<f64>::zeros((3, 7, 2));
        let out = matrix_apply_to_3d_3x3(&vol, &matrix_rotate_3d_z(30.0));
        assert_eq!(out.dim(), (3, 7, 2));
    }

    #[test]
    fn corner_translation_shifts_content_by_whole_voxels() {
        let vol = test_volume();
        let out = matrix_apply_to_3d_4x4(&vol, &matrix_translate_3d(1.0, 2.0, -1.0));
        let (nx, ny, nz) = vol.dim();
        for ((i, j, k), &v) in out.indexed_iter() {
            let src = (i as isize + 1, j as isize + 2, k as isize - 1);
            let inside = src.0 < nx as isize && src.1 < ny as isize && src.2 >= 0 && src.2 < nz as isize;
            if inside {
                let expected = vol[[src.0 as usize, src.1 as usize, src.2 as usize]];
                assert!((v - expected).abs() < TOLERANCE);
            } else {
                assert_eq!(v, 0.0);
            }
        }
    }

    #[test]
    fn nearest_boundary_never_uses_the_fill_value() {
        let vol = Array3::from_elem((4, 4, 4), 2.0);
        let options = InterpolationOptions::with_boundary(BoundaryMode::Nearest);
        let out = matrix_apply_to_3d_4x4_with(&vol, &matrix_translate_3d(10.0, 0.0, 0.0), &options);
        assert!(out.iter().all(|v| (v - 2.0).abs() < TOLERANCE));
    }

    #[test]
    fn constant_boundary_uses_configured_fill_value() {
        let vol = Array3::from_elem((4, 4, 4), 2.0);
        let options = InterpolationOptions::with_boundary(BoundaryMode::Constant(-7.0));
        let out = matrix_apply_to_3d_4x4_with(&vol, &matrix_translate_3d(10.0, 0.0, 0.0), &options);
        assert!(out.iter().all(|&v| v == -7.0));
    }

    #[test]
    fn centered_z_rotation_by_180_degrees_flips_about_the_center() {
        // Center of a 6-wide axis is 3.0, so (i, j) maps onto (6 - i, 6 - j).
        let vol = Array3::from_shape_fn((6, 6, 1), |(i, j, _)| (i * 6 + j) as f64);
        let out = matrix_apply_to_3d_3x3_with(
            &vol,
            &matrix_rotate_3d_z(180.0),
            &InterpolationOptions::with_boundary(BoundaryMode::Constant(-1.0)),
        );
        for ((i, j, _), &v) in out.indexed_iter() {
            if i == 0 || j == 0 {
                assert_eq!(v, -1.0);
            } else {
                assert!((v - vol[[6 - i, 6 - j, 0]]).abs() < 1e-6);
            }
        }
    }

    #[test]
    fn centered_2d_rotation_by_90_degrees_turns_the_image() {
        let image = Array2::from_shape_fn((5, 5), |(i, j)| (i * 5 + j) as f64);
        let out = matrix_apply_to_2d(&image, &matrix_rotate_2d(90.0));
        // rotate_2d(90) maps centered (u, v) to (-v, u); center is 2.5.
        for ((i, j), &v) in out.indexed_iter() {
            let si = 2.5 - (j as f64 - 2.5);
            let sj = 2.5 + (i as f64 - 2.5);
            if (0.0..=4.0).contains(&si) && (0.0..=4.0).contains(&sj) {
                let expected = image[[si as usize, sj as usize]];
                assert!((v - expected).abs() < 1e-6);
            }
        }
    }

    #[test]
    fn centered_2d_translation_shifts_the_image() {
        let image = test_image();
        let out = matrix_apply_to_2d(&image, &matrix_translate_2d(1.0, 0.0));
        for ((i, j), &v) in out.indexed_iter() {
            if i + 1 < 6 {
                assert!((v - image[[i + 1, j]]).abs() < TOLERANCE);
            } else {
                assert_eq!(v, 0.0);
            }
        }
    }

    #[test]
    fn resample_dyn_dispatches_corner_volume() {
        let vol = test_volume();
        let m = matrix_3d_to_4x4(&Matrix3::identity());
        let dynamic = DMatrix::from_fn(4, 4, |r, c| m[(r, c)]);
        let out = resample_dyn(
            vol.view().into_dyn(),
            &dynamic,
            GridOrigin::Corner,
            &InterpolationOptions::default(),
        )
        .unwrap();
        assert_arrays_close(&out, &vol.clone().into_dyn());
    }

    #[test]
    fn resample_dyn_dispatches_centered_image() {
        let image = test_image();
        let out = resample_dyn(
            image.view().into_dyn(),
            &DMatrix::identity(3, 3),
            GridOrigin::Center,
            &InterpolationOptions::default(),
        )
        .unwrap();
        assert_eq!(out.shape(), &[6, 6]);
    }

    #[test]
    fn resample_dyn_rejects_4x4_matrix_for_image() {
        let image = test_image();
        let err = resample_dyn(
            image.view().into_dyn(),
            &DMatrix::identity(4, 4),
            GridOrigin::Center,
            &InterpolationOptions::default(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            TransformError::DimensionMismatch {
                expected: "3x3 matrix".to_string(),
                found: "4x4 matrix".to_string(),
            }
        );
    }

    #[test]
    fn resample_dyn_rejects_3x3_matrix_for_corner_volume() {
        let vol = test_volume();
        let result = resample_dyn(
            vol.view().into_dyn(),
            &DMatrix::identity(3, 3),
            GridOrigin::Corner,
            &InterpolationOptions::default(),
        );
        assert!(matches!(result, Err(TransformError::DimensionMismatch { .. })));
    }

    #[test]
    fn resample_dyn_rejects_unsupported_dimensionality() {
        let line = Array::<f64, _>::zeros(IxDyn(&[5]));
        let result = resample_dyn(
            line.view(),
            &DMatrix::identity(2, 2),
            GridOrigin::Center,
            &InterpolationOptions::default(),
        );
        assert!(matches!(result, Err(TransformError::DimensionMismatch { .. })));

        let image = test_image();
        let result = resample_dyn(
            image.view().into_dyn(),
            &DMatrix::identity(3, 3),
            GridOrigin::Corner,
            &InterpolationOptions::default(),
        );
        assert!(matches!(result, Err(TransformError::DimensionMismatch { .. })));
    }
}

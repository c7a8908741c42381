use crate::core::models::cell::PeriodicCell;
use nalgebra::{Matrix3, Matrix4, Point2, Point3};

/// Anything carrying a mutable 3D coordinate.
///
/// This is the only capability the transformation code needs from a
/// structure hierarchy: atoms, particles or bare points all qualify.
pub trait Positioned {
    fn position(&self) -> Point3<f64>;
    fn set_position(&mut self, position: Point3<f64>);
}

impl Positioned for Point3<f64> {
    fn position(&self) -> Point3<f64> {
        *self
    }

    fn set_position(&mut self, position: Point3<f64>) {
        *self = position;
    }
}

/// Applies a 4x4 homogeneous matrix to a 3D point.
///
/// The homogeneous coordinate of the result is dropped without dividing by
/// it, so projective matrices are treated as affine.
pub fn matrix_apply_to_point_3d(point: &Point3<f64>, matrix: &Matrix4<f64>) -> Point3<f64> {
    let h = matrix * point.to_homogeneous();
    Point3::new(h.x, h.y, h.z)
}

/// Applies a 3x3 homogeneous 2D matrix to a 2D point.
pub fn matrix_apply_to_point_2d(point: &Point2<f64>, matrix: &Matrix3<f64>) -> Point2<f64> {
    let h = matrix * point.to_homogeneous();
    Point2::new(h.x, h.y)
}

/// Moves every item by `matrix`, optionally wrapping the result into `cell`.
///
/// # Return
///
/// The number of items that were transformed.
pub fn transform_positions<'a, T, I>(
    items: I,
    matrix: &Matrix4<f64>,
    cell: Option<&PeriodicCell>,
) -> usize
where
    T: Positioned + 'a,
    I: IntoIterator<Item = &'a mut T>,
{
    let mut count = 0;
    for item in items {
        let mut moved = matrix_apply_to_point_3d(&item.position(), matrix);
        if let Some(cell) = cell {
            moved = cell.wrap(&moved);
        }
        item.set_position(moved);
        count += 1;
    }
    count
}

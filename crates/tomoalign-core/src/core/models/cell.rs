use nalgebra::Point3;
use serde::{Deserialize, Serialize};

/// An orthorhombic periodic box used to wrap coordinates after a transformation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PeriodicCell {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl PeriodicCell {
    pub fn new(a: f64, b: f64, c: f64) -> Self {
        Self { a, b, c }
    }

    /// Wraps `point` into the cell with floored modulo on every axis.
    ///
    /// The result takes the sign of the cell length, so for positive lengths
    /// every coordinate ends up in `[0, length)`. A zero length yields NaN.
    pub fn wrap(&self, point: &Point3<f64>) -> Point3<f64> {
        Point3::new(
            floored_mod(point.x, self.a),
            floored_mod(point.y, self.b),
            floored_mod(point.z, self.c),
        )
    }
}

#[inline]
fn floored_mod(value: f64, modulus: f64) -> f64 {
    let r = value % modulus;
    if r != 0.0 && (r < 0.0) != (modulus < 0.0) {
        // a tiny negative remainder can round up onto the far edge
        let wrapped = r + modulus;
        if wrapped == modulus { 0.0 } else { wrapped }
    } else {
        r
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_keeps_points_inside_the_cell_unchanged() {
        let cell = PeriodicCell::new(10.0, 20.0, 30.0);
        let p = Point3::new(1.0, 2.0, 3.0);
        assert_eq!(cell.wrap(&p), p);
    }

    #[test]
    fn wrap_folds_negative_and_overflowing_coordinates() {
        let cell = PeriodicCell::new(10.0, 10.0, 10.0);
        let wrapped = cell.wrap(&Point3::new(-1.0, 25.0, 10.0));
        assert_eq!(wrapped, Point3::new(9.0, 5.0, 0.0));
    }

    #[test]
    fn wrap_follows_sign_of_negative_cell_length() {
        let cell = PeriodicCell::new(-4.0, 4.0, 4.0);
        let wrapped = cell.wrap(&Point3::new(5.0, 5.0, 5.0));
        assert_eq!(wrapped.x, -3.0);
        assert_eq!(wrapped.y, 1.0);
    }

    #[test]
    fn wrap_never_lands_on_the_far_edge() {
        let cell = PeriodicCell::new(10.0, 10.0, 10.0);
        let wrapped = cell.wrap(&Point3::new(-1e-17, -1e-300, 0.0));
        assert!(wrapped.x >= 0.0 && wrapped.x < 10.0);
        assert!(wrapped.y >= 0.0 && wrapped.y < 10.0);
        assert_eq!(wrapped.x, 0.0);
    }

    #[test]
    fn wrap_with_zero_length_yields_nan() {
        let cell = PeriodicCell::new(0.0, 1.0, 1.0);
        assert!(cell.wrap(&Point3::new(1.0, 0.5, 0.5)).x.is_nan());
    }
}

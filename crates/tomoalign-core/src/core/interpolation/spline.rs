use super::{BoundaryMode, InterpolationOptions};
use ndarray::{Array, ArrayBase, Axis, Data, Dimension, Ix2, Ix3};

/// Pole of the cubic B-spline prefilter.
const POLE: f64 = -0.267_949_192_431_122_7; // sqrt(3) - 2

/// Relative precision used to truncate the causal initialisation sum.
const INIT_TOLERANCE: f64 = 1e-15;

/// Slack allowed on the grid extent before a coordinate counts as outside.
const EDGE_TOLERANCE: f64 = 1e-9;

/// A cubic B-spline fitted to a dense grid, ready to be sampled at real-valued
/// coordinates.
#[derive(Debug, Clone)]
pub struct SplineInterpolator<D: Dimension> {
    coefficients: Array<f64, D>,
    boundary: BoundaryMode,
}

impl<D: Dimension> SplineInterpolator<D> {
    /// Computes the spline coefficients of `data`.
    pub fn new<S>(data: &ArrayBase<S, D>, options: &InterpolationOptions) -> Self
    where
        S: Data<Elem = f64>,
    {
        Self {
            coefficients: spline_coefficients(data),
            boundary: options.boundary,
        }
    }

    /// Resolves a coordinate on one axis, or `None` when it falls outside the
    /// grid under a constant-fill policy.
    fn resolve(&self, x: f64, n: usize) -> Option<f64> {
        if n == 0 || !x.is_finite() {
            return None;
        }
        let last = (n - 1) as f64;
        match self.boundary {
            BoundaryMode::Constant(_) => {
                if x < -EDGE_TOLERANCE || x > last + EDGE_TOLERANCE {
                    None
                } else {
                    Some(x.clamp(0.0, last))
                }
            }
            BoundaryMode::Nearest => Some(x.clamp(0.0, last)),
            BoundaryMode::Mirror => Some(mirror_coordinate(x, n)),
        }
    }

    fn fill_value(&self) -> f64 {
        match self.boundary {
            BoundaryMode::Constant(value) => value,
            _ => 0.0,
        }
    }
}

impl SplineInterpolator<Ix2> {
    /// Samples the spline at `(row, column)`.
    pub fn sample(&self, coord: [f64; 2]) -> f64 {
        let (n0, n1) = self.coefficients.dim();
        let (Some(x0), Some(x1)) = (self.resolve(coord[0], n0), self.resolve(coord[1], n1)) else {
            return self.fill_value();
        };
        let s0 = Stencil::at(x0, n0);
        let s1 = Stencil::at(x1, n1);

        let mut value = 0.0;
        for (&i, &wi) in s0.indices.iter().zip(&s0.weights) {
            let mut row = 0.0;
            for (&j, &wj) in s1.indices.iter().zip(&s1.weights) {
                row += wj * self.coefficients[[i, j]];
            }
            value += wi * row;
        }
        value
    }
}

impl SplineInterpolator<Ix3> {
    /// Samples the spline at `(x, y, z)` in array index order.
    pub fn sample(&self, coord: [f64; 3]) -> f64 {
        let (n0, n1, n2) = self.coefficients.dim();
        let (Some(x0), Some(x1), Some(x2)) = (
            self.resolve(coord[0], n0),
            self.resolve(coord[1], n1),
            self.resolve(coord[2], n2),
        ) else {
            return self.fill_value();
        };
        let s0 = Stencil::at(x0, n0);
        let s1 = Stencil::at(x1, n1);
        let s2 = Stencil::at(x2, n2);

        let mut value = 0.0;
        for (&i, &wi) in s0.indices.iter().zip(&s0.weights) {
            let mut plane = 0.0;
            for (&j, &wj) in s1.indices.iter().zip(&s1.weights) {
                let mut row = 0.0;
                for (&k, &wk) in s2.indices.iter().zip(&s2.weights) {
                    row += wk * self.coefficients[[i, j, k]];
                }
                plane += wj * row;
            }
            value += wi * plane;
        }
        value
    }
}

/// The four coefficient indices and basis weights contributing along one axis.
#[derive(Debug, Clone, Copy)]
struct Stencil {
    indices: [usize; 4],
    weights: [f64; 4],
}

impl Stencil {
    fn at(x: f64, n: usize) -> Self {
        let base = x.floor();
        let t = x - base;
        let base = base as isize;

        let t2 = t * t;
        let t3 = t2 * t;
        let one_minus = 1.0 - t;
        let weights = [
            one_minus * one_minus * one_minus / 6.0,
            (4.0 - 6.0 * t2 + 3.0 * t3) / 6.0,
            (1.0 + 3.0 * t + 3.0 * t2 - 3.0 * t3) / 6.0,
            t3 / 6.0,
        ];
        let indices = [
            mirror_index(base - 1, n),
            mirror_index(base, n),
            mirror_index(base + 1, n),
            mirror_index(base + 2, n),
        ];
        Self { indices, weights }
    }
}

/// Maps an integer index onto `[0, n)` by whole-sample mirror symmetry.
fn mirror_index(i: isize, n: usize) -> usize {
    if n <= 1 {
        return 0;
    }
    let period = 2 * (n as isize - 1);
    let folded = i.rem_euclid(period);
    if folded >= n as isize {
        (period - folded) as usize
    } else {
        folded as usize
    }
}

/// Maps a real coordinate onto `[0, n - 1]` by whole-sample mirror symmetry.
fn mirror_coordinate(x: f64, n: usize) -> f64 {
    if n <= 1 {
        return 0.0;
    }
    let last = (n - 1) as f64;
    let period = 2.0 * last;
    let folded = x.rem_euclid(period);
    if folded > last { period - folded } else { folded }
}

/// Computes cubic B-spline coefficients for every axis of `data`.
///
/// Prefiltering uses mirror-symmetric boundary conditions regardless of the
/// sampling boundary policy.
pub fn spline_coefficients<S, D>(data: &ArrayBase<S, D>) -> Array<f64, D>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    let mut coefficients = data.to_owned();
    let mut buffer = Vec::new();
    for axis in 0..coefficients.ndim() {
        for mut lane in coefficients.lanes_mut(Axis(axis)) {
            buffer.clear();
            buffer.extend(lane.iter().copied());
            prefilter_1d(&mut buffer);
            lane.iter_mut()
                .zip(&buffer)
                .for_each(|(dst, &src)| *dst = src);
        }
    }
    coefficients
}

/// In-place recursive cubic B-spline prefilter on a single line of samples.
pub fn prefilter_1d(c: &mut [f64]) {
    let n = c.len();
    if n < 2 {
        return;
    }
    let z = POLE;
    let gain = (1.0 - z) * (1.0 - 1.0 / z);
    c.iter_mut().for_each(|v| *v *= gain);

    c[0] = causal_initial_coefficient(c, z);
    for i in 1..n {
        c[i] += z * c[i - 1];
    }

    c[n - 1] = (z / (z * z - 1.0)) * (z * c[n - 2] + c[n - 1]);
    for i in (0..n - 1).rev() {
        c[i] = z * (c[i + 1] - c[i]);
    }
}

fn causal_initial_coefficient(c: &[f64], z: f64) -> f64 {
    let n = c.len();
    let horizon = (INIT_TOLERANCE.ln() / z.abs().ln()).ceil() as usize;

    if horizon < n {
        let mut zn = z;
        let mut sum = c[0];
        for &v in &c[1..horizon] {
            sum += zn * v;
            zn *= z;
        }
        sum
    } else {
        let iz = 1.0 / z;
        let mut zn = z;
        let mut z2n = z.powi(n as i32 - 1);
        let mut sum = c[0] + z2n * c[n - 1];
        z2n *= z2n * iz;
        for &v in &c[1..n - 1] {
            sum += (zn + z2n) * v;
            zn *= z;
            z2n *= iz;
        }
        sum / (1.0 - zn * zn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array2, Array3, array};

    const TOLERANCE: f64 = 1e-9;

    fn spline_value_at_knot(c: &[f64], i: usize) -> f64 {
        let n = c.len();
        let at = |k: isize| c[mirror_index(k, n)];
        let i = i as isize;
        (at(i - 1) + 4.0 * at(i) + at(i + 1)) / 6.0
    }

    #[test]
    fn prefilter_inverts_the_b_spline_kernel_on_short_lines() {
        let data = [1.0, -2.0, 3.5, 0.25, 7.0];
        let mut c = data;
        prefilter_1d(&mut c);
        for (i, &expected) in data.iter().enumerate() {
            assert!((spline_value_at_knot(&c, i) - expected).abs() < TOLERANCE);
        }
    }

    #[test]
    fn prefilter_inverts_the_b_spline_kernel_on_long_lines() {
        let data: Vec<f64> = (0..100).map(|i| ((i as f64) * 0.37).sin() * 10.0).collect();
        let mut c = data.clone();
        prefilter_1d(&mut c);
        for (i, &expected) in data.iter().enumerate() {
            assert!((spline_value_at_knot(&c, i) - expected).abs() < TOLERANCE);
        }
    }

    #[test]
    fn prefilter_leaves_constant_lines_constant() {
        let mut c = vec![3.0; 8];
        prefilter_1d(&mut c);
        assert!(c.iter().all(|v| (v - 3.0).abs() < TOLERANCE));
    }

    #[test]
    fn prefilter_ignores_single_samples() {
        let mut c = vec![42.0];
        prefilter_1d(&mut c);
        assert_eq!(c, vec![42.0]);
    }

    #[test]
    fn mirror_index_reflects_about_edges() {
        assert_eq!(mirror_index(-1, 5), 1);
        assert_eq!(mirror_index(-2, 5), 2);
        assert_eq!(mirror_index(5, 5), 3);
        assert_eq!(mirror_index(8, 5), 0);
        assert_eq!(mirror_index(3, 1), 0);
    }

    #[test]
    fn mirror_coordinate_reflects_real_positions() {
        assert!((mirror_coordinate(-0.5, 4) - 0.5).abs() < TOLERANCE);
        assert!((mirror_coordinate(3.5, 4) - 2.5).abs() < TOLERANCE);
        assert!((mirror_coordinate(6.0, 4) - 0.0).abs() < TOLERANCE);
    }

    #[test]
    fn sampling_at_grid_points_reproduces_2d_input() {
        let data = array![[1.0, 2.0, 0.0], [4.0, -1.0, 3.0], [0.5, 2.5, 9.0], [6.0, 1.0, 2.0]];
        let interpolator = SplineInterpolator::new(&data, &InterpolationOptions::default());
        for ((i, j), &v) in data.indexed_iter() {
            assert!((interpolator.sample([i as f64, j as f64]) - v).abs() < TOLERANCE);
        }
    }

    #[test]
    fn sampling_at_grid_points_reproduces_3d_input() {
        let data = Array3::from_shape_fn((4, 3, 5), |(i, j, k)| {
            (i * 7 + j * 3 + k) as f64 * 0.5 - (k * k) as f64
        });
        let interpolator = SplineInterpolator::new(&data, &InterpolationOptions::default());
        for ((i, j, k), &v) in data.indexed_iter() {
            let sampled = interpolator.sample([i as f64, j as f64, k as f64]);
            assert!((sampled - v).abs() < TOLERANCE);
        }
    }

    #[test]
    fn cubic_spline_reproduces_linear_ramps_between_samples() {
        let data = Array2::from_shape_fn((40, 40), |(i, j)| 2.0 * i as f64 - j as f64);
        let interpolator = SplineInterpolator::new(&data, &InterpolationOptions::default());
        let v = interpolator.sample([20.5, 19.25]);
        assert!((v - 21.75).abs() < 1e-6);
    }

    #[test]
    fn constant_boundary_fills_outside_samples() {
        let data = Array2::from_elem((3, 3), 5.0);
        let options = InterpolationOptions::with_boundary(BoundaryMode::Constant(-1.0));
        let interpolator = SplineInterpolator::new(&data, &options);
        assert_eq!(interpolator.sample([-0.5, 1.0]), -1.0);
        assert_eq!(interpolator.sample([1.0, 2.5]), -1.0);
        assert!((interpolator.sample([1.0, 1.0]) - 5.0).abs() < TOLERANCE);
    }

    #[test]
    fn nearest_boundary_clamps_to_edge_values() {
        let data = array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]];
        let options = InterpolationOptions::with_boundary(BoundaryMode::Nearest);
        let interpolator = SplineInterpolator::new(&data, &options);
        assert!((interpolator.sample([-3.0, 0.0]) - 1.0).abs() < TOLERANCE);
        assert!((interpolator.sample([1.0, 10.0]) - 6.0).abs() < TOLERANCE);
    }

    #[test]
    fn mirror_boundary_reflects_values() {
        let data = array![[1.0, 2.0, 4.0, 8.0]];
        let options = InterpolationOptions::with_boundary(BoundaryMode::Mirror);
        let interpolator = SplineInterpolator::new(&data, &options);
        assert!((interpolator.sample([0.0, -1.0]) - 2.0).abs() < TOLERANCE);
        assert!((interpolator.sample([0.0, 4.0]) - 4.0).abs() < TOLERANCE);
    }

    #[test]
    fn non_finite_coordinates_return_fill_value() {
        let data = Array2::from_elem((2, 2), 1.0);
        let interpolator = SplineInterpolator::new(&data, &InterpolationOptions::default());
        assert_eq!(interpolator.sample([f64::NAN, 0.0]), 0.0);
    }
}

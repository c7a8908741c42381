//! Order-3 (cubic B-spline) interpolation on dense 2D and 3D grids.
//!
//! Samples are taken from spline coefficients computed once per input array,
//! so values at integer grid positions reproduce the input. What happens for
//! coordinates outside `[0, n - 1]` is chosen explicitly with
//! [`BoundaryMode`].

pub mod spline;

/// Policy for sample coordinates that fall outside the input grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BoundaryMode {
    /// Every sample outside the grid takes this fixed value.
    Constant(f64),
    /// Coordinates are clamped to the nearest edge sample.
    Nearest,
    /// Coordinates are reflected about the edge samples (`d c b | a b c d | c b a`).
    Mirror,
}

impl Default for BoundaryMode {
    fn default() -> Self {
        BoundaryMode::Constant(0.0)
    }
}

/// Settings shared by all resamplers.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InterpolationOptions {
    pub boundary: BoundaryMode,
}

impl InterpolationOptions {
    pub fn with_boundary(boundary: BoundaryMode) -> Self {
        Self { boundary }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_boundary_is_zero_fill() {
        assert_eq!(BoundaryMode::default(), BoundaryMode::Constant(0.0));
        assert_eq!(
            InterpolationOptions::default().boundary,
            BoundaryMode::Constant(0.0)
        );
    }
}

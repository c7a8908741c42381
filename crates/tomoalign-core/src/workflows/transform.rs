use crate::core::transform::point::{Positioned, transform_positions};
use crate::engine::config::TransformConfig;
use crate::engine::progress::ProgressReporter;
use nalgebra::Matrix4;
use tracing::{info, instrument, warn};

#[derive(Debug, Clone, PartialEq)]
pub struct TransformOutcome {
    /// The composed matrix that was applied.
    pub matrix: Matrix4<f64>,
    pub transformed: usize,
}

/// Applies the composed transformation of `config` to every item in place.
#[instrument(skip_all, name = "transform_workflow", fields(items = items.len(), steps = config.steps.len()))]
pub fn run<T: Positioned>(
    items: &mut [T],
    config: &TransformConfig,
    reporter: &ProgressReporter,
) -> TransformOutcome {
    let matrix = config.compose();
    info!(
        "Applying {} transformation step(s) to {} point(s).",
        config.steps.len(),
        items.len()
    );
    if matrix.determinant() == 0.0 {
        warn!("Composed transformation is singular; points will collapse onto a lower-dimensional subspace.");
    }
    if let Some(cell) = &config.cell {
        info!(
            "Wrapping results into periodic cell ({}, {}, {}).",
            cell.a, cell.b, cell.c
        );
    }

    reporter.start("Transforming points", items.len() as u64);
    let transformed = transform_positions(items.iter_mut(), &matrix, config.cell.as_ref());
    reporter.advance(transformed as u64);
    reporter.finish();

    TransformOutcome {
        matrix,
        transformed,
    }
}

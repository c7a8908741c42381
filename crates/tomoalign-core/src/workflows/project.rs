use crate::core::io::records::ProjectedRecord;
use crate::core::models::particle::ParticlePose;
use crate::core::transform::projection::{ProjectionResult, project_particle};
use crate::engine::config::ProjectionConfig;
use crate::engine::progress::ProgressReporter;
use tracing::{debug, info, instrument, warn};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// One particle as seen in one projection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectedParticle {
    pub particle_index: usize,
    pub projection_index: usize,
    pub result: ProjectionResult,
}

impl ProjectedParticle {
    pub fn to_record(&self) -> ProjectedRecord {
        ProjectedRecord::new(self.particle_index, self.projection_index, &self.result)
    }
}

/// Projects every particle through every projection of the tilt series.
///
/// Results are ordered by particle, then by projection.
#[instrument(skip_all, name = "projection_workflow", fields(particles = particles.len(), projections = config.projections.len()))]
pub fn run(
    particles: &[ParticlePose],
    config: &ProjectionConfig,
    reporter: &ProgressReporter,
) -> Vec<ProjectedParticle> {
    info!(
        "Projecting {} particle(s) through {} projection(s) (dimension {}, binning {}).",
        particles.len(),
        config.projections.len(),
        config.geometry.dimension,
        config.geometry.binning
    );
    reporter.start("Projecting particles", particles.len() as u64);

    #[cfg(not(feature = "parallel"))]
    let iterator = particles.iter().enumerate();

    #[cfg(feature = "parallel")]
    let iterator = particles.par_iter().enumerate();

    let per_particle: Vec<Vec<ProjectedParticle>> = iterator
        .map(|(particle_index, pose)| {
            let projected: Vec<ProjectedParticle> = config
                .projections
                .iter()
                .enumerate()
                .map(|(projection_index, alignment)| ProjectedParticle {
                    particle_index,
                    projection_index,
                    result: project_particle(pose, alignment, &config.geometry),
                })
                .collect();
            reporter.advance(1);
            projected
        })
        .collect();

    let results: Vec<ProjectedParticle> = per_particle.into_iter().flatten().collect();
    reporter.finish();

    let non_finite = results
        .iter()
        .filter(|p| !(p.result.raw_position.x.is_finite() && p.result.raw_position.y.is_finite()))
        .count();
    if non_finite > 0 {
        warn!(
            "{} of {} projected position(s) are not finite; check for zero magnification.",
            non_finite,
            results.len()
        );
    }
    debug!("Produced {} projected particle record(s).", results.len());
    results
}

use crate::cli::ProjectArgs;
use crate::config::PartialProjectionConfig;
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use tomoalign::{
    core::io::{
        records::ProjectedRecord,
        table::{ParticleFile, ProjectedParticleFile},
        traits::RecordFile,
    },
    engine::progress::ProgressReporter,
    workflows,
};
use tracing::{info, warn};

pub async fn run(args: ProjectArgs, quiet: bool) -> Result<()> {
    let partial_config = match &args.config {
        Some(path) => PartialProjectionConfig::from_file(path)?,
        None => PartialProjectionConfig::default(),
    };
    info!("Merging configuration from file and CLI arguments...");
    let config = partial_config.merge_with_cli(&args)?;

    info!("Loading particles from {:?}", &args.particles);
    let particles =
        ParticleFile::read_from_path(&args.particles).map_err(|e| CliError::Table {
            path: args.particles.clone(),
            source: e,
        })?;

    if particles.is_empty() {
        warn!("Particle table {:?} contains no rows.", &args.particles);
    }

    let progress_handler = if quiet {
        CliProgressHandler::hidden()
    } else {
        CliProgressHandler::new()
    };
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    let projected =
        tokio::task::block_in_place(|| workflows::project::run(&particles, &config, &reporter));

    let records: Vec<ProjectedRecord> = projected.iter().map(|p| p.to_record()).collect();
    info!("Writing {} record(s) to {:?}", records.len(), &args.output);
    ProjectedParticleFile::write_to_path(&records, &args.output).map_err(|e| {
        CliError::Table {
            path: args.output.clone(),
            source: e,
        }
    })?;

    println!(
        "✓ Projected {} particle(s) through {} projection(s) into: {}",
        particles.len(),
        config.projections.len(),
        args.output.display()
    );
    Ok(())
}

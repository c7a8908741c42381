use crate::cli::TransformArgs;
use crate::config::PartialTransformConfig;
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use tomoalign::{
    core::io::{table::PointFile, traits::RecordFile},
    engine::progress::ProgressReporter,
    workflows,
};
use tracing::{debug, info};

pub async fn run(args: TransformArgs, quiet: bool) -> Result<()> {
    let partial_config = PartialTransformConfig::from_file(&args.config)?;
    info!("Merging configuration from file and CLI arguments...");
    let config = partial_config.merge_with_cli(&args)?;

    info!("Loading points from {:?}", &args.input);
    let mut points = PointFile::read_from_path(&args.input).map_err(|e| CliError::Table {
        path: args.input.clone(),
        source: e,
    })?;

    let progress_handler = if quiet {
        CliProgressHandler::hidden()
    } else {
        CliProgressHandler::new()
    };
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    let outcome =
        tokio::task::block_in_place(|| workflows::transform::run(&mut points, &config, &reporter));
    debug!("Applied matrix:{}", outcome.matrix);

    PointFile::write_to_path(&points, &args.output).map_err(|e| CliError::Table {
        path: args.output.clone(),
        source: e,
    })?;

    println!(
        "✓ Transformed {} point(s) into: {}",
        outcome.transformed,
        args.output.display()
    );
    Ok(())
}

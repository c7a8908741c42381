use crate::cli::Cli;
use crate::error::{CliError, Result};
use std::fs::File;
use std::path::Path;
use tracing::Subscriber;
use tracing_subscriber::{
    filter::LevelFilter,
    fmt::{
        self,
        format::{DefaultFields, FmtSpan, Format, Full},
    },
    prelude::*,
    registry::LookupSpan,
};

/// Logging switches taken from the global command-line flags.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogOptions<'a> {
    pub verbosity: u8,
    pub quiet: bool,
    pub file: Option<&'a Path>,
}

impl<'a> LogOptions<'a> {
    pub fn from_cli(cli: &'a Cli) -> Self {
        Self {
            verbosity: cli.verbose,
            quiet: cli.quiet,
            file: cli.log_file.as_deref(),
        }
    }

    /// `-q` keeps errors only; each `-v` lowers the threshold one level from WARN.
    pub fn level(&self) -> LevelFilter {
        if self.quiet {
            return LevelFilter::ERROR;
        }
        match self.verbosity {
            0 => LevelFilter::WARN,
            1 => LevelFilter::INFO,
            2 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        }
    }
}

/// Plain-text layer for the log file. Workflow spans are closed with their
/// busy and idle times, so a log file doubles as a timing record of a run.
fn file_layer<S>(file: File) -> fmt::Layer<S, DefaultFields, Format<Full>, File>
where
    S: Subscriber + for<'span> LookupSpan<'span>,
{
    fmt::layer()
        .with_writer(file)
        .with_ansi(false)
        .with_thread_ids(true)
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
}

/// Installs the global subscriber: compact output on stderr, plus the file
/// layer when a log file is requested.
pub fn setup_logging(options: LogOptions<'_>) -> Result<()> {
    let console = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .with_target(false)
        .compact();

    let file = options
        .file
        .map(File::create)
        .transpose()
        .map_err(CliError::Io)?;

    tracing_subscriber::registry()
        .with(options.level())
        .with(console)
        .with(file.map(file_layer))
        .init();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use serial_test::serial;
    use std::path::PathBuf;
    use std::sync::Once;
    use tracing::{debug, info, info_span, warn};

    static INIT: Once = Once::new();

    fn ensure_global_logger_is_set() {
        INIT.call_once(|| {
            let options = LogOptions {
                verbosity: 3,
                ..LogOptions::default()
            };
            setup_logging(options).expect("Failed to set up global logger for tests");
        });
    }

    fn level_for(verbosity: u8, quiet: bool) -> LevelFilter {
        LogOptions {
            verbosity,
            quiet,
            file: None,
        }
        .level()
    }

    #[test]
    fn verbosity_maps_to_levels() {
        assert_eq!(level_for(0, false), LevelFilter::WARN);
        assert_eq!(level_for(1, false), LevelFilter::INFO);
        assert_eq!(level_for(2, false), LevelFilter::DEBUG);
        assert_eq!(level_for(7, false), LevelFilter::TRACE);
        assert_eq!(level_for(0, true), LevelFilter::ERROR);
    }

    #[test]
    fn options_are_read_from_global_flags() {
        let cli = Cli::parse_from([
            "tomoalign",
            "-vv",
            "--log-file",
            "run.log",
            "matrix",
            "rotate-z",
            "30",
        ]);
        let options = LogOptions::from_cli(&cli);
        assert_eq!(options.level(), LevelFilter::DEBUG);
        assert_eq!(options.file, Some(Path::new("run.log")));
    }

    #[test]
    #[serial]
    fn global_logger_accepts_events_inside_spans() {
        ensure_global_logger_is_set();

        let span = info_span!("projection_workflow", particles = 2);
        let _guard = span.enter();
        warn!("Particle 1 has a non-finite raw position.");
        info!("Projected 2 particles.");
        debug!("Composed 3 transformation steps.");
    }

    #[test]
    #[serial]
    fn file_layer_records_events_and_span_timings() {
        let temp_dir = tempfile::tempdir().unwrap();
        let log_path = temp_dir.path().join("run.log");

        let file = File::create(&log_path).unwrap();
        let subscriber = tracing_subscriber::registry().with(file_layer(file));

        tracing::subscriber::with_default(subscriber, || {
            let span = info_span!("transform_workflow", points = 3);
            let _guard = span.enter();
            debug!("Composed 3 transformation steps.");
        });

        let content = std::fs::read_to_string(log_path).unwrap();
        assert!(content.contains("Composed 3 transformation steps."));
        assert!(content.contains("DEBUG"));
        assert!(content.contains("ThreadId"));
        assert!(content.contains("transform_workflow"));
        assert!(content.contains("close"));
    }

    #[test]
    #[serial]
    fn invalid_log_file_path_propagates_error() {
        let invalid_path = PathBuf::from("/");

        if cfg!(unix) && invalid_path.is_dir() {
            let options = LogOptions {
                file: Some(invalid_path.as_path()),
                ..LogOptions::default()
            };
            assert!(matches!(setup_logging(options), Err(CliError::Io(_))));
        }
    }
}

use std::path::PathBuf;
use thiserror::Error;
use tomoalign::core::io::table::CsvError;
use tomoalign::core::transform::TransformError;
use tomoalign::engine::config::ConfigError;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Transform(#[from] TransformError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to parse file '{path}': {source}", path = path.display())]
    FileParsing {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("Failed to access table '{path}': {source}", path = path.display())]
    Table {
        path: PathBuf,
        #[source]
        source: CsvError,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

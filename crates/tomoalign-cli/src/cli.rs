use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "tomoalign CLI - transformation matrices and projection alignment for electron-tomography particle alignment.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Set the number of threads for parallel computation.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Project a particle list through every projection of a tilt series.
    Project(ProjectArgs),
    /// Move a point set through a chain of rotations, magnifications and translations.
    Transform(TransformArgs),
    /// Print a single transformation matrix.
    Matrix(MatrixArgs),
}

/// Arguments for the `project` subcommand.
#[derive(Args, Debug)]
pub struct ProjectArgs {
    /// Path to the particle table (CSV with columns x,y,z,phi,the,psi).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub particles: PathBuf,

    /// Path for the output table of projected particles.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,

    /// Path to a tilt-series configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Override the raw projection edge length in pixels.
    #[arg(long, value_name = "FLOAT")]
    pub dimension: Option<f64>,

    /// Override the binning factor between particle coordinates and raw pixels.
    #[arg(long, value_name = "INT")]
    pub binning: Option<u32>,

    /// Projection table (CSV with columns tilt_angle,tx,ty,rotation,magnification).
    /// Replaces every projection defined in the config file.
    #[arg(long, value_name = "PATH")]
    pub projections: Option<PathBuf>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S geometry.binning=4
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Arguments for the `transform` subcommand.
#[derive(Args, Debug)]
pub struct TransformArgs {
    /// Path to the input point table (CSV with columns x,y,z).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Path for the transformed point table.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,

    /// Path to the transformation configuration file in TOML format.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub config: PathBuf,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S cell.a=120.0
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Arguments for the `matrix` subcommand.
#[derive(Args, Debug)]
pub struct MatrixArgs {
    #[command(subcommand)]
    pub kind: MatrixKind,

    /// Print the 4x4 homogeneous form instead of the 3x3 matrix.
    #[arg(long, global = true)]
    pub homogeneous: bool,

    /// Number of decimal places to print.
    #[arg(long, global = true, default_value_t = 6, value_name = "INT")]
    pub precision: usize,
}

/// Available matrix builders. Angles are in degrees.
#[derive(Subcommand, Debug, Clone, Copy)]
pub enum MatrixKind {
    /// ZXZ Euler rotation.
    Euler {
        #[arg(long, allow_hyphen_values = true, default_value_t = 0.0)]
        phi: f64,
        #[arg(long, allow_hyphen_values = true, default_value_t = 0.0)]
        the: f64,
        #[arg(long, allow_hyphen_values = true, default_value_t = 0.0)]
        psi: f64,
    },
    /// Rotation about the x axis.
    RotateX {
        #[arg(allow_hyphen_values = true)]
        degrees: f64,
    },
    /// Rotation about the y axis.
    RotateY {
        #[arg(allow_hyphen_values = true)]
        degrees: f64,
    },
    /// Rotation about the z axis.
    RotateZ {
        #[arg(allow_hyphen_values = true)]
        degrees: f64,
    },
    /// Isotropic magnification.
    Magnify {
        #[arg(allow_hyphen_values = true)]
        factor: f64,
    },
}

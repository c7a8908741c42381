use crate::cli::{ProjectArgs, TransformArgs};
use crate::error::{CliError, Result};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tomoalign::core::io::table::ProjectionFile;
use tomoalign::core::io::traits::RecordFile;
use tomoalign::core::models::alignment::ProjectionAlignment;
use tomoalign::core::models::cell::PeriodicCell;
use tomoalign::core::transform::matrix::{matrix_3d_to_4x4, matrix_from_rows};
use tomoalign::engine::config as core_config;
use tracing::debug;

fn read_toml<T: DeserializeOwned>(path: &Path) -> Result<T> {
    debug!("Loading configuration from file: {:?}", path);
    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content).map_err(|e| CliError::FileParsing {
        path: path.to_path_buf(),
        source: e.into(),
    })
}

fn parse_set_value<T: FromStr>(key: &str, value: &str, kind: &str) -> Result<T> {
    value.trim().parse().map_err(|_| {
        CliError::Config(format!("Invalid {} value for {}: {}", kind, key, value))
    })
}

fn split_set_value(kv_pair: &str) -> Result<(&str, &str)> {
    kv_pair.split_once('=').ok_or_else(|| {
        CliError::Config(format!(
            "Invalid --set format: '{}'. Expected KEY=VALUE.",
            kv_pair
        ))
    })
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialGeometryConfig {
    dimension: Option<f64>,
    binning: Option<u32>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
struct PartialProjection {
    #[serde(rename = "tilt-angle")]
    tilt_angle: f64,
    tx: Option<f64>,
    ty: Option<f64>,
    rotation: Option<f64>,
    magnification: Option<f64>,
}

impl From<PartialProjection> for ProjectionAlignment {
    fn from(p: PartialProjection) -> Self {
        let untransformed = ProjectionAlignment::untransformed(p.tilt_angle);
        Self {
            tilt_angle: p.tilt_angle,
            tx: p.tx.unwrap_or(untransformed.tx),
            ty: p.ty.unwrap_or(untransformed.ty),
            rotation: p.rotation.unwrap_or(untransformed.rotation),
            magnification: p.magnification.unwrap_or(untransformed.magnification),
        }
    }
}

/// Tilt-series settings as read from a TOML file.
///
/// Projections are collected in this order: rows of `projections-file`, then
/// `[[projections]]` tables, then one untransformed projection per entry of
/// `tilt-angles`.
#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct PartialProjectionConfig {
    geometry: Option<PartialGeometryConfig>,
    #[serde(rename = "projections-file")]
    projections_file: Option<PathBuf>,
    projections: Option<Vec<PartialProjection>>,
    #[serde(rename = "tilt-angles")]
    tilt_angles: Option<Vec<f64>>,
    /// Directory relative `projections-file` paths are resolved against.
    #[serde(skip)]
    base_dir: Option<PathBuf>,
}

impl PartialProjectionConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let mut config: Self = read_toml(path)?;
        config.base_dir = path.parent().map(Path::to_path_buf);
        Ok(config)
    }

    pub fn merge_with_cli(mut self, args: &ProjectArgs) -> Result<core_config::ProjectionConfig> {
        self.apply_set_values(&args.set_values)?;

        let geometry = self.geometry.take().unwrap_or_default();
        let mut builder = core_config::ProjectionConfigBuilder::new();
        if let Some(dimension) = args.dimension.or(geometry.dimension) {
            builder = builder.dimension(dimension);
        }
        if let Some(binning) = args.binning.or(geometry.binning) {
            builder = builder.binning(binning);
        }

        if let Some(path) = &args.projections {
            debug!("Projection table from the command line replaces the config file's projections.");
            builder = builder.projections(load_projection_table(path)?);
        } else {
            if let Some(path) = &self.projections_file {
                let path = match &self.base_dir {
                    Some(dir) if path.is_relative() => dir.join(path),
                    _ => path.clone(),
                };
                builder = builder.projections(load_projection_table(&path)?);
            }
            for projection in self.projections.take().unwrap_or_default() {
                builder = builder.add_projection(projection.into());
            }
            builder = builder.tilt_angles(self.tilt_angles.take().unwrap_or_default());
        }

        Ok(builder.build()?)
    }

    fn apply_set_values(&mut self, set_values: &[String]) -> Result<()> {
        for kv_pair in set_values {
            let (key, value_str) = split_set_value(kv_pair)?;
            match key {
                "geometry.dimension" => {
                    self.geometry.get_or_insert_with(Default::default).dimension =
                        Some(parse_set_value(key, value_str, "float")?);
                }
                "geometry.binning" => {
                    self.geometry.get_or_insert_with(Default::default).binning =
                        Some(parse_set_value(key, value_str, "integer")?);
                }
                "projections-file" => {
                    self.projections_file = Some(PathBuf::from(value_str));
                    // Paths given on the command line are taken as-is.
                    self.base_dir = None;
                }
                _ => {
                    return Err(CliError::Config(format!(
                        "Unsupported configuration key for --set: '{}'",
                        key
                    )));
                }
            }
        }
        Ok(())
    }
}

fn load_projection_table(path: &Path) -> Result<Vec<ProjectionAlignment>> {
    debug!("Loading projection table from {:?}", path);
    ProjectionFile::read_from_path(path).map_err(|e| CliError::Table {
        path: path.to_path_buf(),
        source: e,
    })
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialCellConfig {
    a: Option<f64>,
    b: Option<f64>,
    c: Option<f64>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "kebab-case", tag = "type", deny_unknown_fields)]
enum PartialTransformStep {
    RotateX { degrees: f64 },
    RotateY { degrees: f64 },
    RotateZ { degrees: f64 },
    Euler { phi: f64, the: f64, psi: f64 },
    Magnify { factor: f64 },
    Translate { offset: [f64; 3] },
    Matrix { rows: Vec<Vec<f64>> },
}

impl TryFrom<PartialTransformStep> for core_config::TransformStep {
    type Error = CliError;

    fn try_from(p: PartialTransformStep) -> Result<Self> {
        use core_config::TransformStep as Step;
        Ok(match p {
            PartialTransformStep::RotateX { degrees } => Step::RotateX(degrees),
            PartialTransformStep::RotateY { degrees } => Step::RotateY(degrees),
            PartialTransformStep::RotateZ { degrees } => Step::RotateZ(degrees),
            PartialTransformStep::Euler { phi, the, psi } => Step::Euler { phi, the, psi },
            PartialTransformStep::Magnify { factor } => Step::Magnify(factor),
            PartialTransformStep::Translate { offset: [tx, ty, tz] } => {
                Step::Translate { tx, ty, tz }
            }
            PartialTransformStep::Matrix { rows } if rows.len() == 3 => {
                Step::Matrix(matrix_3d_to_4x4(&matrix_from_rows::<3, 3, _>(rows.as_slice())?))
            }
            PartialTransformStep::Matrix { rows } => {
                Step::Matrix(matrix_from_rows::<4, 4, _>(rows.as_slice())?)
            }
        })
    }
}

/// Point-set transformation settings as read from a TOML file.
#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct PartialTransformConfig {
    cell: Option<PartialCellConfig>,
    steps: Option<Vec<PartialTransformStep>>,
}

impl PartialTransformConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        read_toml(path)
    }

    pub fn merge_with_cli(mut self, args: &TransformArgs) -> Result<core_config::TransformConfig> {
        self.apply_set_values(&args.set_values)?;

        let steps = self
            .steps
            .take()
            .unwrap_or_default()
            .into_iter()
            .map(core_config::TransformStep::try_from)
            .collect::<Result<Vec<_>>>()?;
        let mut config = core_config::TransformConfig::new(steps);

        if let Some(cell) = self.cell.take() {
            let require = |value: Option<f64>, axis: &str| {
                value.ok_or_else(|| {
                    CliError::Config(format!("`cell` requires a length for axis `{}`", axis))
                })
            };
            config = config.with_cell(PeriodicCell::new(
                require(cell.a, "a")?,
                require(cell.b, "b")?,
                require(cell.c, "c")?,
            ));
        }
        Ok(config)
    }

    fn apply_set_values(&mut self, set_values: &[String]) -> Result<()> {
        for kv_pair in set_values {
            let (key, value_str) = split_set_value(kv_pair)?;
            let length = || -> Result<f64> { parse_set_value(key, value_str, "float") };
            match key {
                "cell.a" => self.cell.get_or_insert_with(Default::default).a = Some(length()?),
                "cell.b" => self.cell.get_or_insert_with(Default::default).b = Some(length()?),
                "cell.c" => self.cell.get_or_insert_with(Default::default).c = Some(length()?),
                _ => {
                    return Err(CliError::Config(format!(
                        "Unsupported configuration key for --set: '{}'",
                        key
                    )));
                }
            }
        }
        Ok(())
    }
}

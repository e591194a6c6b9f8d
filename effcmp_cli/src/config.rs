use anyhow::{Context, Result, bail};
use serde::{Deserialize, Deserializer};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Which axes are drawn with a logarithmic scale.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogScale {
    #[default]
    None,
    X,
    Y,
    Xy,
}

impl LogScale {
    pub const fn x(self) -> bool {
        matches!(self, Self::X | Self::Xy)
    }

    pub const fn y(self) -> bool {
        matches!(self, Self::Y | Self::Xy)
    }
}

fn scalar_to_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Scalar {
        Text(String),
        Integer(i64),
        Float(f64),
    }

    Ok(match Scalar::deserialize(deserializer)? {
        Scalar::Text(text) => text,
        Scalar::Integer(integer) => integer.to_string(),
        Scalar::Float(float) => float.to_string(),
    })
}

fn default_sample() -> String {
    "ttbar".to_owned()
}

fn default_mu() -> String {
    "200".to_owned()
}

fn default_output() -> PathBuf {
    PathBuf::from(".")
}

/// Settings shared by all plots.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Common {
    #[serde(default = "default_sample")]
    pub sample: String,
    #[serde(default = "default_mu", deserialize_with = "scalar_to_string")]
    pub mu: String,
    #[serde(default = "default_output")]
    pub output: PathBuf,
}

impl Default for Common {
    fn default() -> Self {
        Self {
            sample: default_sample(),
            mu: default_mu(),
            output: default_output(),
        }
    }
}

/// An input file and its legend entry.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileDescription {
    pub filename: PathBuf,
    pub legend: String,
}

/// Options of a single comparison plot.
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlotConfig {
    pub histo_path: String,
    #[serde(default)]
    pub log: LogScale,
    #[serde(default)]
    pub y_min: Option<f64>,
    #[serde(default)]
    pub y_max: Option<f64>,
    #[serde(default)]
    pub ratio_y_range: Option<[f64; 2]>,
    #[serde(default)]
    pub normalize: bool,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub x_label: Option<String>,
    #[serde(default)]
    pub y_label: Option<String>,
}

impl PlotConfig {
    /// Returns the last component of the histogram path, used as name of the output files.
    pub fn name(&self) -> &str {
        self.histo_path
            .rsplit('/')
            .find(|component| !component.is_empty())
            .unwrap_or(&self.histo_path)
    }
}

/// Contents of a configuration file.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub common: Common,
    pub files: Vec<FileDescription>,
    pub plots: Vec<PlotConfig>,
}

impl Config {
    /// Reads and validates the configuration in `path`. Relative paths of input files and of the
    /// output directory are resolved against the directory containing `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let file =
            File::open(path).with_context(|| format!("unable to open '{}'", path.display()))?;
        let mut config: Self = serde_yaml::from_reader(BufReader::new(file))
            .with_context(|| format!("unable to parse configuration '{}'", path.display()))?;

        let base = path.parent().unwrap_or_else(|| Path::new(""));
        config.resolve(base);
        config.validate()?;

        Ok(config)
    }

    fn resolve(&mut self, base: &Path) {
        for file in &mut self.files {
            if file.filename.is_relative() {
                file.filename = base.join(&file.filename);
            }
        }

        if self.common.output.is_relative() {
            self.common.output = base.join(&self.common.output);
        }
    }

    fn validate(&self) -> Result<()> {
        if self.files.is_empty() {
            bail!("at least one input file is required");
        }

        if self.plots.is_empty() {
            bail!("at least one plot is required");
        }

        for file in &self.files {
            if !file.filename.exists() {
                bail!("'{}' does not exist", file.filename.display());
            }
        }

        for plot in &self.plots {
            if let Some([lo, hi]) = plot.ratio_y_range {
                if lo >= hi {
                    bail!(
                        "ratio range [{lo}, {hi}] of '{}' is empty",
                        plot.histo_path
                    );
                }
            }
        }

        Ok(())
    }
}

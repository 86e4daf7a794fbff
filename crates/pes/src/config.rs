//! Configuration settings for a pes run

use std::{
    fmt::{Debug, Display},
    fs::read_to_string,
    path::{Path, PathBuf},
};

use serde::Deserialize;

use crate::error::PesError;

#[cfg(test)]
mod tests;

#[derive(Deserialize, Debug, PartialEq, Default)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    /// Whether or not to draw the surface and fit plots. Defaults to true.
    plot: Option<bool>,

    /// The directory to write the plots to. Defaults to the current
    /// directory.
    outdir: Option<String>,

    /// The width of each plot in pixels.
    width: Option<u32>,

    /// The height of each plot in pixels.
    height: Option<u32>,

    /// The elevation in degrees of the viewpoint for the surface plot.
    pitch: Option<f64>,

    /// The azimuth in degrees of the viewpoint for the surface plot.
    yaw: Option<f64>,
}

/// Construct a full `Config` using [Config::load] on a TOML file or start from
/// [Config::default] and use the builder methods
#[derive(Clone, Deserialize, PartialEq, Debug)]
#[serde(from = "RawConfig")]
pub struct Config {
    /// whether to draw any plots at all
    pub plot: bool,

    /// where the plots are written
    pub outdir: PathBuf,

    /// plot width in pixels
    pub width: u32,

    /// plot height in pixels
    pub height: u32,

    /// surface plot elevation in degrees
    pub pitch: f64,

    /// surface plot azimuth in degrees
    pub yaw: f64,
}

impl Default for Config {
    /// Plots on, written to the current directory at 1200×800, with the
    /// surface viewed from 35° above at an azimuth of 300°
    fn default() -> Self {
        Self {
            plot: true,
            outdir: PathBuf::from("."),
            width: 1200,
            height: 800,
            pitch: 35.0,
            yaw: 300.0,
        }
    }
}

impl From<RawConfig> for Config {
    fn from(rc: RawConfig) -> Self {
        let def = Self::default();
        Self {
            plot: rc.plot.unwrap_or(def.plot),
            outdir: rc.outdir.map(PathBuf::from).unwrap_or(def.outdir),
            width: rc.width.unwrap_or(def.width),
            height: rc.height.unwrap_or(def.height),
            pitch: rc.pitch.unwrap_or(def.pitch),
            yaw: rc.yaw.unwrap_or(def.yaw),
        }
    }
}

impl Config {
    pub fn plot(mut self, b: bool) -> Self {
        self.plot = b;
        self
    }

    pub fn outdir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.outdir = dir.into();
        self
    }

    /// load a [Config] from the TOML file specified by `filename`
    pub fn load<P>(filename: P) -> Result<Self, PesError>
    where
        P: AsRef<Path> + Debug,
    {
        let contents = read_to_string(&filename).map_err(|e| {
            PesError::Config(format!(
                "failed to read config file {filename:?}: {e}"
            ))
        })?;
        let ret: Self = toml::from_str(&contents).map_err(|e| {
            PesError::Config(format!(
                "failed to deserialize config file {filename:?}: {e}"
            ))
        })?;

        ret.validate()?;

        Ok(ret)
    }

    /// check that the plot dimensions are usable and the view angles are
    /// finite
    fn validate(&self) -> Result<(), PesError> {
        if self.width == 0 || self.height == 0 {
            return Err(PesError::Config(format!(
                "plot size must be positive, got {}×{}",
                self.width, self.height
            )));
        }
        if !self.pitch.is_finite() || !self.yaw.is_finite() {
            return Err(PesError::Config(
                "pitch and yaw must be finite".to_owned(),
            ));
        }
        Ok(())
    }
}

impl Display for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let Config {
            plot,
            outdir,
            width,
            height,
            pitch,
            yaw,
        } = self;
        write!(
            f,
            "
Configuration Options:
plot = {plot}
outdir = {}
width = {width}
height = {height}
pitch = {pitch}
yaw = {yaw}
",
            outdir.display()
        )
    }
}

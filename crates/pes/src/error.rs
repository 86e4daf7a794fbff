use std::{error::Error, fmt::Display};

use gauss::ReadError;
use polyfit::FitError;

use crate::slice::Axis;

#[derive(Debug)]
pub enum PesError {
    /// a malformed file name or a missing or unreadable energy
    Parse(ReadError),

    /// a bad input directory, an empty one, or a bad config file
    Config(String),

    /// too few points along `axis` for a quadratic fit
    InsufficientData {
        axis: Axis,
        found: usize,
        need: usize,
    },

    /// a singular fit or a curvature that gives no real frequency
    Numerical(String),

    /// failure to draw or save a plot
    Plot(String),
}

impl Display for PesError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PesError::Parse(e) => write!(f, "parse error: {e}"),
            PesError::Config(s) => write!(f, "configuration error: {s}"),
            PesError::InsufficientData { axis, found, need } => write!(
                f,
                "insufficient data: found {found} points along the {axis} \
                 through the equilibrium geometry, but a quadratic fit \
                 needs {need}"
            ),
            PesError::Numerical(s) => write!(f, "numerical error: {s}"),
            PesError::Plot(s) => write!(f, "failed to plot {s}"),
        }
    }
}

impl Error for PesError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            PesError::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ReadError> for PesError {
    fn from(e: ReadError) -> Self {
        Self::Parse(e)
    }
}

impl From<FitError> for PesError {
    fn from(e: FitError) -> Self {
        Self::Numerical(e.to_string())
    }
}

//! Geometry samples from Gaussian output files. Each file holds one
//! single-point energy of a triatomic molecule, and the bond length and bond
//! angle of that point are encoded in the file's name.

use std::{
    error::Error,
    ffi::OsStr,
    fmt::Display,
    fs::File,
    io::{BufReader, ErrorKind},
    path::Path,
};

pub mod name;
pub mod output;


pub use name::{FileName, Layout};
pub use output::read_energy;

/// One point on the potential energy surface: bond length in Å, bond angle
/// in degrees, and energy in Hartree
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sample {
    pub length: f64,
    pub angle: f64,
    pub energy: f64,
}

impl Display for Sample {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "r = {} Å, θ = {}°, E = {:.10} Eₕ",
            self.length, self.angle, self.energy
        )
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum ReadError {
    /// the file name does not follow one of the [Layout]s. the second field
    /// says what was wrong with it
    BadName(String, String),
    FileNotFound(String),
    ReadFile(String, ErrorKind),
    EnergyNotFound(String),
    EnergyParseError(String),
}

impl ReadError {
    /// the name of the file that caused the error
    pub fn file(&self) -> &str {
        match self {
            ReadError::BadName(f, _)
            | ReadError::FileNotFound(f)
            | ReadError::ReadFile(f, _)
            | ReadError::EnergyNotFound(f)
            | ReadError::EnergyParseError(f) => f,
        }
    }
}

impl Display for ReadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReadError::BadName(file, why) => {
                write!(f, "malformed file name `{file}`: {why}")
            }
            ReadError::FileNotFound(file) => {
                write!(f, "file `{file}` not found")
            }
            ReadError::ReadFile(file, kind) => {
                write!(f, "failed to read `{file}`: {kind}")
            }
            ReadError::EnergyNotFound(file) => {
                write!(f, "no `SCF Done` line in `{file}`")
            }
            ReadError::EnergyParseError(file) => {
                write!(f, "failed to parse the SCF energy in `{file}`")
            }
        }
    }
}

impl Error for ReadError {}

/// Load a [Sample] from the Gaussian output file at `path`. The geometry comes
/// from the file name (see [FileName]) and the energy from the last `SCF Done`
/// line in its contents. The file is closed before this returns.
pub fn load_file(path: impl AsRef<Path>) -> Result<Sample, ReadError> {
    let path = path.as_ref();
    let name = path.file_name().and_then(OsStr::to_str).ok_or_else(|| {
        ReadError::BadName(
            path.display().to_string(),
            "not valid UTF-8".to_owned(),
        )
    })?;
    let FileName { length, angle, .. } = FileName::parse(name)?;
    let energy = {
        let f = File::open(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => ReadError::FileNotFound(name.to_owned()),
            kind => ReadError::ReadFile(name.to_owned(), kind),
        })?;
        read_energy(BufReader::new(f), name)?
    };
    let sample = Sample {
        length,
        angle,
        energy,
    };
    log::debug!("loaded {name}: {sample}");
    Ok(sample)
}

//! One-dimensional cuts through the surface at the equilibrium geometry

use std::fmt::Display;

use gauss::Sample;
use polyfit::Polynomial;

use crate::{consts::Constants, equil::Equilibrium, error::PesError};

/// the most points taken into a [Slice]
pub const MAX_POINTS: usize = 5;

/// the fewest points a [Slice] can be fit with
pub const MIN_POINTS: usize = 3;

/// The coordinate varied along a [Slice]. The other one is held at its
/// equilibrium value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    /// bond length, giving the symmetric stretch
    Length,
    /// bond angle, giving the symmetric bend
    Angle,
}

impl Axis {
    /// the short name used in plot titles and file names
    pub fn label(self) -> &'static str {
        match self {
            Axis::Length => "r",
            Axis::Angle => "Theta",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            Axis::Length => "Angstrom",
            Axis::Angle => "Degrees",
        }
    }

    /// the factor converting this coordinate from file units (Å or degrees)
    /// to SI units (m or rad)
    pub fn to_si(self, consts: &Constants) -> f64 {
        match self {
            Axis::Length => consts.angstrom,
            Axis::Angle => consts.degree,
        }
    }

    /// The harmonic wavenumber in cm⁻¹ for a quadratic coefficient `a` in SI
    /// units (J/m² or J/rad²), ν = √(2a / m) / 2πc. The effective mass m is
    /// 2 mᵤ for the stretch and r²·mᵤ/2 for the bend, where r is
    /// `eq_length` in m.
    pub fn wavenumber(
        self,
        a: f64,
        eq_length: f64,
        consts: &Constants,
    ) -> Result<f64, PesError> {
        if !(a > 0.0) {
            return Err(PesError::Numerical(format!(
                "curvature {a:e} along the {self} is not positive, so there \
                 is no real vibrational frequency"
            )));
        }
        let mass = match self {
            Axis::Length => 2.0 * consts.amu,
            Axis::Angle => eq_length * eq_length * 0.5 * consts.amu,
        };
        let nu =
            (2.0 * a / mass).sqrt() / (2.0 * std::f64::consts::PI * consts.c);
        if !nu.is_finite() {
            return Err(PesError::Numerical(format!(
                "non-finite frequency along the {self} with r = {eq_length:e} m"
            )));
        }
        Ok(nu)
    }
}

impl Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Axis::Length => write!(f, "bond length"),
            Axis::Angle => write!(f, "bond angle"),
        }
    }
}

/// Up to [MAX_POINTS] pairs of (coordinate, energy) in file units around the
/// equilibrium geometry, in order of increasing energy
#[derive(Clone, Debug, PartialEq)]
pub struct Slice {
    pub axis: Axis,
    pub points: Vec<(f64, f64)>,
}

impl Slice {
    /// Collect the [MAX_POINTS] lowest-energy samples whose other coordinate
    /// is exactly equal to its value in `eq`, lowest first. The sort is
    /// stable, so samples with equal energies keep their order in `samples`.
    /// Both coordinates come from parsing the same file name fields, so exact
    /// comparison is safe.
    pub fn along(axis: Axis, samples: &[Sample], eq: &Equilibrium) -> Self {
        let mut points: Vec<_> = samples
            .iter()
            .filter(|s| match axis {
                Axis::Length => s.angle == eq.angle,
                Axis::Angle => s.length == eq.length,
            })
            .map(|s| match axis {
                Axis::Length => (s.length, s.energy),
                Axis::Angle => (s.angle, s.energy),
            })
            .collect();
        points.sort_by(|a, b| a.1.total_cmp(&b.1));
        points.truncate(MAX_POINTS);
        if points.len() < MAX_POINTS {
            log::warn!(
                "only {} points along the {axis} through the equilibrium",
                points.len()
            );
        }
        Self { axis, points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn xs(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.0).collect()
    }

    pub fn ys(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.1).collect()
    }

    /// make sure there are enough points for a quadratic fit
    pub fn check(&self) -> Result<(), PesError> {
        if self.len() < MIN_POINTS {
            return Err(PesError::InsufficientData {
                axis: self.axis,
                found: self.len(),
                need: MIN_POINTS,
            });
        }
        Ok(())
    }

    /// fit a quadratic to the points in file units
    pub fn fit(&self) -> Result<Polynomial, PesError> {
        self.check()?;
        Ok(polyfit::quadratic(&self.xs(), &self.ys())?)
    }
}

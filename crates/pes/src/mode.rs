use polyfit::Polynomial;

use crate::{
    consts::Constants,
    error::PesError,
    slice::{Axis, Slice},
};

/// A harmonic normal mode derived from a [Slice]
#[derive(Clone, Debug, PartialEq)]
pub struct NormalMode {
    pub axis: Axis,
    /// the quadratic fit in SI units
    pub fit: Polynomial,
    /// in cm⁻¹
    pub wavenumber: f64,
}

impl NormalMode {
    /// Convert `slice` to SI units and refit it. A fit in file units can't be
    /// rescaled afterwards because the quadratic coefficient picks up the
    /// square of the coordinate conversion. `eq_length` is the equilibrium
    /// bond length in Å and only matters for the bend.
    pub fn compute(
        slice: &Slice,
        eq_length: f64,
        consts: &Constants,
    ) -> Result<Self, PesError> {
        slice.check()?;
        let to_si = slice.axis.to_si(consts);
        let (xs, ys): (Vec<f64>, Vec<f64>) = slice
            .points
            .iter()
            .map(|&(x, e)| (x * to_si, e * consts.hartree))
            .unzip();
        let fit = polyfit::quadratic(&xs, &ys)?;
        let wavenumber = slice.axis.wavenumber(
            fit.leading(),
            eq_length * consts.angstrom,
            consts,
        )?;
        log::info!(
            "{} mode: a = {:.6e}, ν = {wavenumber:.1} cm-1",
            slice.axis,
            fit.leading()
        );
        Ok(Self {
            axis: slice.axis,
            fit,
            wavenumber,
        })
    }
}

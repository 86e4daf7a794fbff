//! Harmonic vibrational frequencies of a triatomic molecule from a scan of its
//! potential energy surface over bond length and bond angle

use std::path::Path;

pub mod config;
pub mod consts;
pub mod equil;
pub mod error;
pub mod mode;
pub mod plot;
pub mod report;
pub mod sample;
pub mod slice;

#[cfg(test)]
mod tests;

pub use config::Config;
pub use error::PesError;
pub use gauss::Sample;

use consts::CONSTS;
use equil::Equilibrium;
use mode::NormalMode;
use report::Summary;
use sample::{load_dir, Surface};
use slice::{Axis, Slice};

/// Load every output file in `dir`, locate the equilibrium geometry, and
/// compute the symmetric stretching and bending frequencies from quadratic
/// fits along each coordinate through it. Plots are drawn along the way if
/// `config.plot` is set.
pub fn run(
    dir: impl AsRef<Path>,
    config: &Config,
) -> Result<Summary, PesError> {
    let Surface { molecule, samples } = load_dir(dir)?;
    let equilibrium = Equilibrium::locate(&samples)?;

    if config.plot {
        plot::surface(&samples, &molecule, config)?;
    }

    let r = Slice::along(Axis::Length, &samples, &equilibrium);
    let theta = Slice::along(Axis::Angle, &samples, &equilibrium);
    r.check()?;
    theta.check()?;

    if config.plot {
        for slice in [&r, &theta] {
            let fit = slice.fit()?;
            plot::fit(slice, &fit, &molecule, config)?;
        }
    }

    let stretch = NormalMode::compute(&r, equilibrium.length, &CONSTS)?;
    let bend = NormalMode::compute(&theta, equilibrium.length, &CONSTS)?;

    Ok(Summary {
        molecule,
        equilibrium,
        stretch,
        bend,
    })
}

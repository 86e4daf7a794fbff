use std::fmt::Display;

use gauss::Sample;

use crate::error::PesError;

/// The minimum-energy geometry on a surface
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Equilibrium {
    /// bond length in Å
    pub length: f64,
    /// bond angle in degrees
    pub angle: f64,
    /// energy in Hartree
    pub energy: f64,
}

impl Equilibrium {
    /// Find the lowest-energy entry of `samples`. The sort is stable, so when
    /// several samples share the lowest energy the one that comes first in
    /// `samples` wins.
    pub fn locate(samples: &[Sample]) -> Result<Self, PesError> {
        let mut sorted = samples.to_vec();
        sorted.sort_by(|a, b| a.energy.total_cmp(&b.energy));
        let Some(&Sample {
            length,
            angle,
            energy,
        }) = sorted.first()
        else {
            return Err(PesError::Config("no geometries loaded".to_owned()));
        };
        let ret = Self {
            length,
            angle,
            energy,
        };
        log::info!("equilibrium geometry: {ret}");
        Ok(ret)
    }
}

impl Display for Equilibrium {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "r = {} Å, θ = {}°, E = {:.10} Eₕ",
            self.length, self.angle, self.energy
        )
    }
}

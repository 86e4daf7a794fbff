use std::io::BufRead;

use crate::ReadError;

/// marks a converged self-consistent-field energy in Gaussian output
pub const SCF_DONE: &str = "SCF Done";

/// the 0-based whitespace-separated field holding the energy on an `SCF Done`
/// line:
///
/// ```text
///  SCF Done:  E(RB3LYP) =  -76.4089617313     A.U. after   10 cycles
/// ```
pub const ENERGY_FIELD: usize = 4;

/// Read the SCF energy from the Gaussian output in `r`. Every `SCF Done` line
/// replaces the energy read so far, so the last one in the file is returned.
/// `name` is only used in errors.
pub fn read_energy(r: impl BufRead, name: &str) -> Result<f64, ReadError> {
    let mut energy = None;
    let mut count = 0;
    for line in r.lines() {
        let line =
            line.map_err(|e| ReadError::ReadFile(name.to_owned(), e.kind()))?;
        if line.contains(SCF_DONE) {
            log::trace!("{name}: {}", line.trim());
            energy = Some(parse_energy(&line, ENERGY_FIELD, name)?);
            count += 1;
        }
    }
    if count > 1 {
        log::warn!("{name} contains {count} SCF Done lines, using the last");
    }
    energy.ok_or_else(|| ReadError::EnergyNotFound(name.to_owned()))
}

fn parse_energy(line: &str, nth: usize, name: &str) -> Result<f64, ReadError> {
    line.split_whitespace()
        .nth(nth)
        .and_then(|s| s.parse::<f64>().ok())
        .filter(|e| e.is_finite())
        .ok_or_else(|| ReadError::EnergyParseError(name.to_owned()))
}

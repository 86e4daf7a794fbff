use std::f64::consts::PI;

/// Unit conversions and physical constants used to turn the curvature of a
/// fit in file units into a harmonic wavenumber. These are fixed; the only
/// instance in use is [CONSTS].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Constants {
    /// joules per Hartree
    pub hartree: f64,

    /// atomic mass unit in kg
    pub amu: f64,

    /// metres per Å
    pub angstrom: f64,

    /// radians per degree
    pub degree: f64,

    /// speed of light in cm/s, so that frequencies come out in cm⁻¹
    pub c: f64,
}

pub const CONSTS: Constants = Constants {
    hartree: 4.3597e-18,
    amu: 1.6605e-27,
    angstrom: 1e-10,
    degree: PI / 180.0,
    c: 2.9979e10,
};

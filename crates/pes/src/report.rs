use std::io::Write;

use crate::{equil::Equilibrium, mode::NormalMode};

const RULE: &str =
    "-------------------------------------------------------------";

/// The results of a run
#[derive(Clone, Debug, PartialEq)]
pub struct Summary {
    pub molecule: String,
    pub equilibrium: Equilibrium,
    pub stretch: NormalMode,
    pub bend: NormalMode,
}

impl Summary {
    /// write the equilibrium geometry table followed by the two frequencies,
    /// rounded to 0.1 cm⁻¹
    pub fn write<W: Write>(&self, w: &mut W) -> std::io::Result<()> {
        let Equilibrium {
            length,
            angle,
            energy,
        } = self.equilibrium;
        writeln!(w)?;
        writeln!(w, "Equilibrium geometry for {}:", self.molecule)?;
        writeln!(
            w,
            "{:<20} {:<20} {:<20}",
            "r / Angstroms", "Theta / Degrees", "Energy / Hartrees"
        )?;
        writeln!(w, "{RULE}")?;
        writeln!(w, "    {length:<20}  {angle:<15}  {energy:<15}")?;
        writeln!(w, "{RULE}")?;
        writeln!(w)?;
        writeln!(
            w,
            "Symmetric stretch: v1 = {:.1} cm-1",
            self.stretch.wavenumber
        )?;
        writeln!(w, "Symmetric bend: v2 = {:.1} cm-1", self.bend.wavenumber)?;
        writeln!(w)?;
        Ok(())
    }
}

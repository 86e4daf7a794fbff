//! The positional schema for geometry-encoding file names. Indices are
//! 0-based byte offsets:
//!
//! ```text
//! H2O.r0.96theta104.5.out
//! ^^^^^                     [0, 5)   prefix; the first 3 are the molecule
//!      ^^^^                 [5, 9)   bond length in Å
//!          ^^^^^            [9, 14)  separator
//!               ^^^^^       [14, 19) bond angle in degrees (Long)
//!                    ^^^^   suffix
//! ```
//!
//! A 22-character name is [Layout::Short] and carries a 4-character angle in
//! [14, 18). A 23-character name is [Layout::Long]. Any other length is
//! rejected.

use std::ops::Range;

use crate::ReadError;

/// the bond length field
pub const LENGTH_FIELD: Range<usize> = 5..9;

/// the start of the bond angle field. its width depends on the [Layout]
pub const ANGLE_START: usize = 14;

/// the number of leading characters naming the molecule
pub const MOLECULE_LEN: usize = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Layout {
    /// 22 characters with a 4-character angle like `90.0`
    Short,
    /// 23 characters with a 5-character angle like `104.5`
    Long,
}

impl Layout {
    pub fn from_len(len: usize) -> Option<Self> {
        match len {
            22 => Some(Self::Short),
            23 => Some(Self::Long),
            _ => None,
        }
    }

    /// the total length of a file name in this layout
    pub fn name_len(self) -> usize {
        match self {
            Layout::Short => 22,
            Layout::Long => 23,
        }
    }

    pub fn angle_width(self) -> usize {
        match self {
            Layout::Short => 4,
            Layout::Long => 5,
        }
    }

    pub fn angle_field(self) -> Range<usize> {
        ANGLE_START..ANGLE_START + self.angle_width()
    }
}

/// The geometry encoded in a file name
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FileName {
    pub length: f64,
    pub angle: f64,
    pub layout: Layout,
}

impl FileName {
    pub fn parse(name: &str) -> Result<Self, ReadError> {
        let bad = |why: String| ReadError::BadName(name.to_owned(), why);
        if !name.is_ascii() {
            return Err(bad("contains non-ASCII characters".to_owned()));
        }
        let layout = Layout::from_len(name.len()).ok_or_else(|| {
            bad(format!(
                "expected {} or {} characters, found {}",
                Layout::Short.name_len(),
                Layout::Long.name_len(),
                name.len()
            ))
        })?;
        let field = |range: Range<usize>, what: &str| {
            let s = &name[range];
            match s.parse::<f64>() {
                Ok(v) if v.is_finite() => Ok(v),
                _ => Err(bad(format!("{what} field `{s}` is not a number"))),
            }
        };
        Ok(Self {
            length: field(LENGTH_FIELD, "bond length")?,
            angle: field(layout.angle_field(), "bond angle")?,
            layout,
        })
    }

    /// Build a file name in `self.layout` from the given pieces. `prefix` and
    /// `sep` should be 5 characters long and `suffix` 4 for the result to
    /// parse back into `self`.
    pub fn encode(&self, prefix: &str, sep: &str, suffix: &str) -> String {
        format!(
            "{prefix}{:.2}{sep}{:>w$.1}{suffix}",
            self.length,
            self.angle,
            w = self.layout.angle_width(),
        )
    }
}

/// the molecule named by the first [MOLECULE_LEN] characters of `name`, or
/// all of `name` if it is shorter than that
pub fn molecule(name: &str) -> String {
    name.chars().take(MOLECULE_LEN).collect()
}

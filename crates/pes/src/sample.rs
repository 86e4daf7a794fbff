use std::path::Path;

use gauss::{name::molecule, Sample};

use crate::error::PesError;

/// Every [Sample] loaded from one directory, in the lexicographic order of
/// their file names, along with the molecule they describe
#[derive(Clone, Debug, PartialEq)]
pub struct Surface {
    pub molecule: String,
    pub samples: Vec<Sample>,
}

/// Load a [Surface] from the regular files in `dir`. Each file is opened,
/// read, and closed before the next, and the first failure aborts the whole
/// load. The molecule is named by the start of the first file name.
pub fn load_dir(dir: impl AsRef<Path>) -> Result<Surface, PesError> {
    let dir = dir.as_ref();
    let entries = std::fs::read_dir(dir).map_err(|e| {
        PesError::Config(format!(
            "failed to read directory {}: {e}",
            dir.display()
        ))
    })?;
    let mut paths = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| {
            PesError::Config(format!(
                "failed to read entry in {}: {e}",
                dir.display()
            ))
        })?;
        let path = entry.path();
        if path.is_file() {
            paths.push(path);
        } else {
            log::debug!("skipping {}", path.display());
        }
    }
    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    let Some(first) = paths.first() else {
        return Err(PesError::Config(format!(
            "no geometries loaded from {}",
            dir.display()
        )));
    };
    let molecule =
        molecule(&first.file_name().unwrap_or_default().to_string_lossy());

    let samples = paths
        .iter()
        .map(gauss::load_file)
        .collect::<Result<Vec<_>, _>>()?;
    log::info!(
        "loaded {} geometries of {molecule} from {}",
        samples.len(),
        dir.display()
    );

    Ok(Surface { molecule, samples })
}

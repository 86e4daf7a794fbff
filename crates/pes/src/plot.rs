//! SVG plots of the full surface and of the quadratic fits through the
//! equilibrium geometry

use std::{
    error::Error,
    path::{Path, PathBuf},
};

use gauss::Sample;
use plotters::prelude::*;
use polyfit::Polynomial;
use rustc_hash::FxHashMap;

use crate::{config::Config, error::PesError, slice::Slice};

/// the number of segments in a drawn fit curve
const STEPS: usize = 100;

type DrawResult = Result<(), Box<dyn Error>>;

/// One quadrilateral or triangle of the surface: its corners as (length,
/// energy, angle) and the mean energy of the corners
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Cell {
    pub(crate) corners: Vec<(f64, f64, f64)>,
    pub(crate) energy: f64,
}

/// Draw the surface in `samples` to `<molecule>_PE_surface.svg` in
/// `config.outdir` and return the path written
pub fn surface(
    samples: &[Sample],
    molecule: &str,
    config: &Config,
) -> Result<PathBuf, PesError> {
    let path = config.outdir.join(format!("{molecule}_PE_surface.svg"));
    draw_surface(&path, samples, molecule, config)
        .map_err(|e| PesError::Plot(format!("{}: {e}", path.display())))?;
    log::info!("wrote {}", path.display());
    Ok(path)
}

/// Draw the points of `slice` along with the file-unit `fit` through them to
/// `<molecule>_fit_<label>.svg` in `config.outdir` and return the path
/// written
pub fn fit(
    slice: &Slice,
    fit: &Polynomial,
    molecule: &str,
    config: &Config,
) -> Result<PathBuf, PesError> {
    let path = config
        .outdir
        .join(format!("{molecule}_fit_{}.svg", slice.axis.label()));
    draw_fit(&path, slice, fit, config)
        .map_err(|e| PesError::Plot(format!("{}: {e}", path.display())))?;
    log::info!("wrote {}", path.display());
    Ok(path)
}

fn draw_surface(
    path: &Path,
    samples: &[Sample],
    molecule: &str,
    config: &Config,
) -> DrawResult {
    let (x0, x1) = pad(extent(samples.iter().map(|s| s.length)));
    let (y0, y1) = pad(extent(samples.iter().map(|s| s.energy)));
    let (z0, z1) = pad(extent(samples.iter().map(|s| s.angle)));

    let root = SVGBackend::new(path, (config.width, config.height))
        .into_drawing_area();
    root.fill(&WHITE)?;

    // plotters puts y up, so energy goes on y and the angle on z
    let mut chart = ChartBuilder::on(&root)
        .caption(format!("{molecule} PE Surface"), ("sans-serif", 24))
        .margin(20)
        .build_cartesian_3d(x0..x1, y0..y1, z0..z1)?;
    chart.with_projection(|mut pb| {
        pb.pitch = config.pitch.to_radians();
        pb.yaw = config.yaw.to_radians();
        pb.scale = 0.8;
        pb.into_matrix()
    });
    chart
        .configure_axes()
        .x_formatter(&|x: &f64| format!("r = {x:.2} Å"))
        .y_formatter(&|y: &f64| format!("{y:.5} Eₕ"))
        .z_formatter(&|z: &f64| format!("θ = {z:.1}°"))
        .draw()?;

    let range = y1 - y0;
    chart.draw_series(cells(samples).into_iter().map(|cell| {
        let color = coolwarm((cell.energy - y0) / range);
        Polygon::new(cell.corners, color.mix(0.9).filled())
    }))?;
    chart.draw_series(samples.iter().map(|s| {
        Circle::new((s.length, s.energy, s.angle), 3, BLACK.filled())
    }))?;

    root.present()?;
    Ok(())
}

fn draw_fit(
    path: &Path,
    slice: &Slice,
    fit: &Polynomial,
    config: &Config,
) -> DrawResult {
    let (lo, hi) = extent(slice.points.iter().map(|p| p.0));
    let curve: Vec<(f64, f64)> = (0..=STEPS)
        .map(|i| {
            let x = lo + (hi - lo) * i as f64 / STEPS as f64;
            (x, fit.eval(x))
        })
        .collect();
    let (x0, x1) = pad((lo, hi));
    let (y0, y1) = pad(extent(
        slice.points.iter().chain(&curve).map(|p| p.1),
    ));

    let root = SVGBackend::new(path, (config.width, config.height))
        .into_drawing_area();
    root.fill(&WHITE)?;

    let label = slice.axis.label();
    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!("Quadratic fit for small oscillations of {label}"),
            ("sans-serif", 24),
        )
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(120)
        .build_cartesian_2d(x0..x1, y0..y1)?;
    chart
        .configure_mesh()
        .x_desc(format!("{label} / {}", slice.axis.unit()))
        .y_desc("Energy / Hartrees")
        .y_label_formatter(&|y: &f64| format!("{y:e}"))
        .draw()?;

    chart.draw_series(LineSeries::new(curve, &RED))?;
    chart.draw_series(slice.points.iter().map(|&p| Cross::new(p, 6, BLACK)))?;

    root.present()?;
    Ok(())
}

/// Split the samples into the cells of the (length, angle) grid they lie on.
/// A cell with all four corners sampled is a quadrilateral and one with only
/// three is a triangle, so an irregular scan still gets a surface. Cells with
/// fewer corners are left out. Repeated geometries keep the first energy
/// seen.
pub(crate) fn cells(samples: &[Sample]) -> Vec<Cell> {
    let key = |length: f64, angle: f64| (length.to_bits(), angle.to_bits());
    let mut energies = FxHashMap::default();
    for s in samples {
        energies.entry(key(s.length, s.angle)).or_insert(s.energy);
    }
    let axis = |f: fn(&Sample) -> f64| {
        let mut v: Vec<f64> = samples.iter().map(f).collect();
        v.sort_by(f64::total_cmp);
        v.dedup();
        v
    };
    let lengths = axis(|s| s.length);
    let angles = axis(|s| s.angle);

    let mut ret = Vec::new();
    for r in lengths.windows(2) {
        for t in angles.windows(2) {
            let corners: Vec<_> =
                [(r[0], t[0]), (r[1], t[0]), (r[1], t[1]), (r[0], t[1])]
                    .into_iter()
                    .filter_map(|(l, a)| {
                        energies.get(&key(l, a)).map(|&e| (l, e, a))
                    })
                    .collect();
            if corners.len() < 3 {
                continue;
            }
            let energy =
                corners.iter().map(|c| c.1).sum::<f64>() / corners.len() as f64;
            ret.push(Cell { corners, energy });
        }
    }
    ret
}

/// the smallest and largest values in `vals`
fn extent(vals: impl Iterator<Item = f64>) -> (f64, f64) {
    vals.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    })
}

/// widen `(lo, hi)` by 5% on each side, or by an arbitrary amount when it is
/// empty, so plotters always gets a non-empty range
fn pad((lo, hi): (f64, f64)) -> (f64, f64) {
    let pad = if hi > lo {
        0.05 * (hi - lo)
    } else {
        0.5 * lo.abs().max(1e-6)
    };
    (lo - pad, hi + pad)
}

/// a diverging blue-grey-red color map over t ∈ [0, 1]
pub(crate) fn coolwarm(t: f64) -> RGBColor {
    const COOL: [f64; 3] = [59.0, 76.0, 192.0];
    const MID: [f64; 3] = [221.0, 221.0, 221.0];
    const WARM: [f64; 3] = [180.0, 4.0, 38.0];
    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.5 };
    let (a, b, u) = if t < 0.5 {
        (COOL, MID, 2.0 * t)
    } else {
        (MID, WARM, 2.0 * t - 1.0)
    };
    let lerp = |i: usize| (a[i] + (b[i] - a[i]) * u).round() as u8;
    RGBColor(lerp(0), lerp(1), lerp(2))
}

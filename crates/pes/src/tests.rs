use std::{io::Write, path::Path};

use approx::assert_relative_eq;
use gauss::ReadError;
use polyfit::Polynomial;
use tempfile::tempdir;
use test_case::test_case;

use crate::{
    consts::CONSTS,
    equil::Equilibrium,
    error::PesError,
    mode::NormalMode,
    plot::{cells, coolwarm},
    report::Summary,
    run,
    sample::load_dir,
    slice::{Axis, MAX_POINTS, Slice},
    Config, Sample,
};

const R0: f64 = 0.96;
const THETA0: f64 = 104.5;
const E0: f64 = -76.4;
/// Hartree/Å²
const KR: f64 = 0.5;
/// Hartree/degree²
const KT: f64 = 2e-5;

fn energy(r: f64, theta: f64) -> f64 {
    E0 + KR * (r - R0) * (r - R0) + KT * (theta - THETA0) * (theta - THETA0)
}

fn sample(length: f64, angle: f64, energy: f64) -> Sample {
    Sample {
        length,
        angle,
        energy,
    }
}

/// write one Gaussian-like output file per combination of `lengths` and
/// `angles` into `dir`, with energies from `energy`
fn write_scan(
    dir: &Path,
    lengths: &[&str],
    angles: &[&str],
    energy: impl Fn(f64, f64) -> f64,
) -> std::io::Result<()> {
    for r in lengths {
        for t in angles {
            let e = energy(r.parse().unwrap(), t.parse().unwrap());
            let path = dir.join(format!("H2O.r{r}theta{t}.out"));
            let mut f = std::fs::File::create(path)?;
            writeln!(f, " SCF Done:  E(RB3LYP) =  -75.0000000000     A.U.")?;
            writeln!(f, " SCF Done:  E(RB3LYP) =  {e:.10}     A.U. after")?;
            writeln!(f, " Normal termination of Gaussian 09.")?;
        }
    }
    Ok(())
}

fn write_grid(
    dir: &Path,
    lengths: &[&str],
    angles: &[&str],
) -> std::io::Result<()> {
    write_scan(dir, lengths, angles, energy)
}

const LENGTHS: [&str; 3] = ["0.95", "0.96", "0.97"];
const ANGLES: [&str; 3] = ["103.5", "104.5", "105.5"];

#[test]
fn equilibrium() {
    let samples = [
        sample(0.95, 104.5, -76.1),
        sample(0.96, 104.5, -76.3),
        sample(0.97, 104.5, -76.2),
    ];
    let got = Equilibrium::locate(&samples).unwrap();
    assert_eq!(
        got,
        Equilibrium {
            length: 0.96,
            angle: 104.5,
            energy: -76.3
        }
    );
}

#[test]
fn equilibrium_tie_goes_to_first() {
    let samples = [
        sample(0.95, 104.5, -76.1),
        sample(0.97, 103.5, -76.3),
        sample(0.96, 104.5, -76.3),
    ];
    let got = Equilibrium::locate(&samples).unwrap();
    assert_eq!((got.length, got.angle), (0.97, 103.5));
}

#[test]
fn equilibrium_empty() {
    let got = Equilibrium::locate(&[]).unwrap_err();
    assert!(matches!(got, PesError::Config(_)), "{got:?}");
}

#[test]
fn slice_caps_and_filters() {
    let eq = Equilibrium {
        length: 0.96,
        angle: 104.5,
        energy: -76.4,
    };
    let mut samples = Vec::new();
    for i in 0..8 {
        let r = 0.92 + 0.01 * i as f64;
        samples.push(sample(r, 104.5, -76.0 - i as f64));
        samples.push(sample(r, 103.5, -77.0));
    }
    let got = Slice::along(Axis::Length, &samples, &eq);
    assert_eq!(got.len(), MAX_POINTS);
    // energy falls with i, so the last five at 104.5° come out lowest first
    let want: Vec<_> = samples
        .iter()
        .filter(|s| s.angle == 104.5)
        .rev()
        .take(MAX_POINTS)
        .map(|s| (s.length, s.energy))
        .collect();
    assert_eq!(got.points, want);
}

#[test]
fn slice_keeps_neighbours() {
    let morse = |r: f64| 0.2 * (1.0 - (-2.2 * (r - R0)).exp()).powi(2);
    let mut samples = Vec::new();
    for i in 0..=10 {
        let r = 0.76 + 0.04 * i as f64;
        for t in [103.5, 104.5, 105.5] {
            let e = E0 + morse(r) + KT * (t - THETA0) * (t - THETA0);
            samples.push(sample(r, t, e));
        }
    }
    let eq = Equilibrium::locate(&samples).unwrap();
    assert_relative_eq!(eq.length, R0, epsilon = 1e-12);
    assert_eq!(eq.angle, THETA0);

    let got = Slice::along(Axis::Length, &samples, &eq);
    assert_eq!(got.len(), MAX_POINTS);
    assert_eq!(got.points[0], (eq.length, eq.energy));
    // the outer wall is softer, so each outer point beats its inner partner
    let want = [0.96, 1.0, 0.92, 1.04, 0.88];
    for (&(r, _), want) in got.points.iter().zip(want) {
        assert_relative_eq!(r, want, epsilon = 1e-12);
    }
}

#[test]
fn slice_along_angle() {
    let eq = Equilibrium {
        length: 0.96,
        angle: 104.5,
        energy: -76.4,
    };
    let samples = [
        sample(0.96, 103.5, -76.39),
        sample(0.95, 104.5, -76.38),
        sample(0.96, 104.5, -76.4),
        sample(0.96, 105.5, -76.39),
    ];
    let got = Slice::along(Axis::Angle, &samples, &eq);
    assert_eq!(
        got.points,
        vec![(104.5, -76.4), (103.5, -76.39), (105.5, -76.39)]
    );
    assert!(got.check().is_ok());
}

#[test]
fn slice_too_short() {
    let slice = Slice {
        axis: Axis::Angle,
        points: vec![(103.5, -76.39), (104.5, -76.4)],
    };
    let got = slice.check().unwrap_err();
    assert!(
        matches!(
            got,
            PesError::InsufficientData {
                axis: Axis::Angle,
                found: 2,
                need: 3
            }
        ),
        "{got:?}"
    );
    assert!(slice.fit().is_err());
    assert!(NormalMode::compute(&slice, R0, &CONSTS).is_err());
}

#[test_case(Axis::Length ; "stretch")]
#[test_case(Axis::Angle ; "bend")]
fn wavenumber_scales_with_sqrt_curvature(axis: Axis) {
    let r = R0 * CONSTS.angstrom;
    let a = 250.0;
    let nu = axis.wavenumber(a, r, &CONSTS).unwrap();
    let nu2 = axis.wavenumber(2.0 * a, r, &CONSTS).unwrap();
    assert_relative_eq!(nu2 / nu, 2f64.sqrt(), max_relative = 1e-12);
}

#[test]
fn stretch_wavenumber() {
    let a = 500.0;
    let got = Axis::Length.wavenumber(a, 1e-10, &CONSTS).unwrap();
    let want = (1.0 / (2.0 * std::f64::consts::PI * 2.9979e10))
        * (2.0 * a / (2.0 * 1.6605e-27)).sqrt();
    assert_relative_eq!(got, want, max_relative = 1e-12);
    assert_relative_eq!(got, 2913.2, max_relative = 1e-4);
}

#[test_case(0.0 ; "flat")]
#[test_case(-3.0 ; "maximum")]
#[test_case(f64::NAN ; "nan")]
fn no_real_frequency(a: f64) {
    let got = Axis::Length.wavenumber(a, 1e-10, &CONSTS).unwrap_err();
    assert!(matches!(got, PesError::Numerical(_)), "{got:?}");
}

#[test]
fn stretch_mode() {
    let slice = Slice {
        axis: Axis::Length,
        points: LENGTHS
            .iter()
            .map(|r| {
                let r = r.parse().unwrap();
                (r, energy(r, THETA0))
            })
            .collect(),
    };
    let got = NormalMode::compute(&slice, R0, &CONSTS).unwrap();
    let a = KR * CONSTS.hartree / (CONSTS.angstrom * CONSTS.angstrom);
    assert_relative_eq!(got.fit.leading(), a, max_relative = 1e-6);
    let want = Axis::Length.wavenumber(a, R0 * 1e-10, &CONSTS).unwrap();
    assert_relative_eq!(got.wavenumber, want, max_relative = 1e-6);

    // the fit in file units has the unconverted curvature
    let fit = slice.fit().unwrap();
    assert_relative_eq!(fit.leading(), KR, max_relative = 1e-6);
}

#[test]
fn bend_mode() {
    let slice = Slice {
        axis: Axis::Angle,
        points: ANGLES
            .iter()
            .map(|t| {
                let t = t.parse().unwrap();
                (t, energy(R0, t))
            })
            .collect(),
    };
    let got = NormalMode::compute(&slice, R0, &CONSTS).unwrap();
    let a = KT * CONSTS.hartree / (CONSTS.degree * CONSTS.degree);
    assert_relative_eq!(got.fit.leading(), a, max_relative = 1e-6);
    let r = R0 * 1e-10;
    let want = (2.0 * a / (r * r * 0.5 * 1.6605e-27)).sqrt()
        / (2.0 * std::f64::consts::PI * 2.9979e10);
    assert_relative_eq!(got.wavenumber, want, max_relative = 1e-6);
}

#[test]
fn inverted_mode() {
    let slice = Slice {
        axis: Axis::Length,
        points: vec![(0.95, -76.5), (0.96, -76.4), (0.97, -76.5)],
    };
    let got = NormalMode::compute(&slice, R0, &CONSTS).unwrap_err();
    assert!(matches!(got, PesError::Numerical(_)), "{got:?}");
}

#[test]
fn three_point_stretch() -> std::io::Result<()> {
    let dir = tempdir()?;
    write_grid(dir.path(), &LENGTHS, &["104.5"])?;
    let surface = load_dir(dir.path()).unwrap();
    assert_eq!(surface.molecule, "H2O");
    assert_eq!(surface.samples.len(), 3);

    let eq = Equilibrium::locate(&surface.samples).unwrap();
    assert_eq!(eq.length, 0.96);
    let r = Slice::along(Axis::Length, &surface.samples, &eq);
    let mode = NormalMode::compute(&r, eq.length, &CONSTS).unwrap();
    assert!(mode.wavenumber > 0.0);

    // a fourth file without an energy spoils the whole directory
    std::fs::write(
        dir.path().join("H2O.r0.98theta104.5.out"),
        " Error termination via Lnk1e in l502.exe\n",
    )?;
    let got = load_dir(dir.path()).unwrap_err();
    assert!(
        matches!(
            got,
            PesError::Parse(ReadError::EnergyNotFound(ref f))
                if f == "H2O.r0.98theta104.5.out"
        ),
        "{got:?}"
    );
    Ok(())
}

#[test]
fn load_order() -> std::io::Result<()> {
    let dir = tempdir()?;
    write_grid(dir.path(), &["0.97", "0.95", "0.96"], &["104.5"])?;
    std::fs::create_dir(dir.path().join("plots"))?;
    let got = load_dir(dir.path()).unwrap();
    let lengths: Vec<_> = got.samples.iter().map(|s| s.length).collect();
    assert_eq!(lengths, vec![0.95, 0.96, 0.97]);
    Ok(())
}

#[test]
fn empty_dir() {
    let dir = tempdir().unwrap();
    let got = load_dir(dir.path()).unwrap_err();
    assert!(matches!(got, PesError::Config(_)), "{got:?}");
    assert!(got.to_string().contains("no geometries loaded"), "{got}");
}

#[test]
fn full_run() -> std::io::Result<()> {
    let dir = tempdir()?;
    write_grid(dir.path(), &LENGTHS, &ANGLES)?;
    let got = run(dir.path(), &Config::default().plot(false)).unwrap();
    assert_eq!(got.molecule, "H2O");
    assert_eq!(
        got.equilibrium,
        Equilibrium {
            length: R0,
            angle: THETA0,
            energy: E0
        }
    );
    assert!(got.stretch.wavenumber > 0.0);
    assert!(got.bend.wavenumber > 0.0);
    Ok(())
}

#[test]
fn full_run_plots() -> std::io::Result<()> {
    let dir = tempdir()?;
    let out = tempdir()?;
    write_grid(dir.path(), &LENGTHS, &ANGLES)?;
    let config = Config::default().outdir(out.path());
    run(dir.path(), &config).unwrap();
    for name in ["H2O_PE_surface.svg", "H2O_fit_r.svg", "H2O_fit_Theta.svg"] {
        let svg = std::fs::read_to_string(out.path().join(name))?;
        assert!(svg.contains("<svg"), "{name}");
    }
    Ok(())
}

#[test]
fn wide_grid() -> std::io::Result<()> {
    // a cubic term skews the stretch, but the quadratic fit through the five
    // points centred on the minimum still recovers KR exactly
    let skewed = |r: f64, t: f64| energy(r, t) - 2.0 * (r - R0).powi(3);
    let lengths = ["0.90", "0.92", "0.94", "0.96", "0.98", "1.00", "1.02"];
    let angles =
        ["101.5", "102.5", "103.5", "104.5", "105.5", "106.5", "107.5"];
    let dir = tempdir()?;
    write_scan(dir.path(), &lengths, &angles, skewed)?;
    let got = run(dir.path(), &Config::default().plot(false)).unwrap();
    assert_eq!((got.equilibrium.length, got.equilibrium.angle), (R0, THETA0));

    let two_pi_c = 2.0 * std::f64::consts::PI * 2.9979e10;
    let a = KR * 4.3597e-18 / 1e-20;
    let v1 = (2.0 * a / (2.0 * 1.6605e-27)).sqrt() / two_pi_c;
    assert_relative_eq!(got.stretch.wavenumber, v1, max_relative = 1e-5);
    assert_relative_eq!(got.stretch.wavenumber, 1923.52, max_relative = 1e-5);

    let rad = std::f64::consts::PI / 180.0;
    let a = KT * 4.3597e-18 / (rad * rad);
    let mass = 0.96e-10 * 0.96e-10 * 0.5 * 1.6605e-27;
    let v2 = (2.0 * a / mass).sqrt() / two_pi_c;
    assert_relative_eq!(got.bend.wavenumber, v2, max_relative = 1e-5);
    assert_relative_eq!(got.bend.wavenumber, 1452.14, max_relative = 1e-5);
    Ok(())
}

#[test]
fn one_dimensional_scan() -> std::io::Result<()> {
    let dir = tempdir()?;
    write_grid(dir.path(), &LENGTHS, &["104.5"])?;
    let got = run(dir.path(), &Config::default().plot(false)).unwrap_err();
    assert!(
        matches!(
            got,
            PesError::InsufficientData {
                axis: Axis::Angle,
                found: 1,
                ..
            }
        ),
        "{got:?}"
    );
    Ok(())
}

#[test]
fn surface_cells() {
    let mut samples = Vec::new();
    for r in [0.95, 0.96, 0.97] {
        for t in [103.5, 104.5, 105.5] {
            samples.push(sample(r, t, energy(r, t)));
        }
    }
    assert_eq!(cells(&samples).len(), 4);

    // dropping a corner of the grid leaves a triangle in its cell
    samples.pop();
    let got = cells(&samples);
    assert_eq!(got.len(), 4);
    let sizes: Vec<_> = got.iter().map(|c| c.corners.len()).collect();
    assert_eq!(sizes, vec![4, 4, 4, 3]);
    for cell in &got {
        let n = cell.corners.len() as f64;
        let mean = cell.corners.iter().map(|c| c.1).sum::<f64>() / n;
        assert_relative_eq!(cell.energy, mean);
    }

    // with the middle point missing too, the cells around it keep three
    // corners each
    samples.remove(4);
    let sizes: Vec<_> =
        cells(&samples).iter().map(|c| c.corners.len()).collect();
    assert_eq!(sizes, vec![3, 3, 3]);
}

#[test]
fn color_map() {
    assert_eq!(coolwarm(0.0), plotters::style::RGBColor(59, 76, 192));
    assert_eq!(coolwarm(0.5), plotters::style::RGBColor(221, 221, 221));
    assert_eq!(coolwarm(1.0), plotters::style::RGBColor(180, 4, 38));
    assert_eq!(coolwarm(7.0), coolwarm(1.0));
}

#[test]
fn summary() {
    let mode = |axis, wavenumber| NormalMode {
        axis,
        fit: Polynomial::new(vec![1.0, 0.0, 0.0]),
        wavenumber,
    };
    let summary = Summary {
        molecule: "H2O".to_owned(),
        equilibrium: Equilibrium {
            length: 0.96,
            angle: 104.5,
            energy: -76.4,
        },
        stretch: mode(Axis::Length, 3657.23),
        bend: mode(Axis::Angle, 1594.96),
    };
    let mut buf = Vec::new();
    summary.write(&mut buf).unwrap();
    let got = String::from_utf8(buf).unwrap();
    let lines: Vec<_> = got.lines().map(str::trim_end).collect();
    assert_eq!(lines[1], "Equilibrium geometry for H2O:");
    assert_eq!(
        lines[2],
        format!(
            "r / Angstroms{}Theta / Degrees{}Energy / Hartrees",
            " ".repeat(8),
            " ".repeat(6)
        )
    );
    assert_eq!(lines[3], "-".repeat(61));
    assert_eq!(
        lines[4],
        format!("    0.96{}104.5{}-76.4", " ".repeat(18), " ".repeat(12))
    );
    assert_eq!(lines[7], "Symmetric stretch: v1 = 3657.2 cm-1");
    assert_eq!(lines[8], "Symmetric bend: v2 = 1595.0 cm-1");
}

//! One-dimensional polynomial least squares.

use na::Cholesky;
use nalgebra as na;
use std::fmt::Display;


pub type Dmat = na::DMatrix<f64>;
pub type Dvec = na::DVector<f64>;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum FitError {
    /// fewer data points than unknown coefficients
    TooFewPoints { need: usize, got: usize },
    LengthMismatch { xs: usize, ys: usize },
    /// the normal equations have no unique solution, usually because too few
    /// of the abscissae are distinct
    Singular,
}

impl Display for FitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FitError::TooFewPoints { need, got } => write!(
                f,
                "need at least {need} points for the fit, but only {got} \
                 were given"
            ),
            FitError::LengthMismatch { xs, ys } => {
                write!(f, "got {xs} x values but {ys} y values")
            }
            FitError::Singular => {
                write!(f, "singular fit: x values are not distinct enough")
            }
        }
    }
}

impl std::error::Error for FitError {}

/// A polynomial with its coefficients stored highest degree first, so a
/// quadratic `a·x² + b·x + c` is `[a, b, c]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Polynomial {
    pub coeffs: Vec<f64>,
}

impl Polynomial {
    pub fn new(coeffs: Vec<f64>) -> Self {
        Self { coeffs }
    }

    pub fn degree(&self) -> usize {
        self.coeffs.len().saturating_sub(1)
    }

    /// the coefficient of the highest power of x
    pub fn leading(&self) -> f64 {
        self.coeffs.first().copied().unwrap_or(0.0)
    }

    /// evaluate the polynomial at `x` using Horner's rule
    pub fn eval(&self, x: f64) -> f64 {
        self.coeffs.iter().fold(0.0, |acc, c| acc * x + c)
    }

    /// sum of squared residuals of `self` against the points in `xs` and `ys`
    pub fn residuals(&self, xs: &[f64], ys: &[f64]) -> f64 {
        xs.iter()
            .zip(ys)
            .map(|(&x, &y)| {
                let r = self.eval(x) - y;
                r * r
            })
            .sum()
    }
}

impl Display for Polynomial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let n = self.degree();
        for (i, c) in self.coeffs.iter().enumerate() {
            if i > 0 {
                write!(f, " + ")?;
            }
            match n - i {
                0 => write!(f, "{c:.8e}")?,
                1 => write!(f, "{c:.8e}·x")?,
                p => write!(f, "{c:.8e}·x^{p}")?,
            }
        }
        Ok(())
    }
}

/// shorthand for [fit] with `degree` 2
pub fn quadratic(xs: &[f64], ys: &[f64]) -> Result<Polynomial, FitError> {
    fit(xs, ys, 2)
}

/// Determine the [ordinary least
/// squares](https://en.wikipedia.org/wiki/Ordinary_least_squares) polynomial
/// of degree `degree` through the points described by `xs` and `ys`.
///
/// The abscissae are mapped onto [-1, 1] before building the design matrix
/// and the coefficients are transformed back afterwards. Without this, inputs
/// in SI units (bond lengths of order 1e-10 m) give a XᵀX whose entries span
/// forty orders of magnitude.
pub fn fit(
    xs: &[f64],
    ys: &[f64],
    degree: usize,
) -> Result<Polynomial, FitError> {
    if xs.len() != ys.len() {
        return Err(FitError::LengthMismatch {
            xs: xs.len(),
            ys: ys.len(),
        });
    }
    let nunk = degree + 1;
    if xs.len() < nunk {
        return Err(FitError::TooFewPoints {
            need: nunk,
            got: xs.len(),
        });
    }
    if distinct(xs) < nunk {
        return Err(FitError::Singular);
    }

    let lo = xs.iter().copied().fold(f64::INFINITY, f64::min);
    let hi = xs.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let mid = 0.5 * (lo + hi);
    let half = 0.5 * (hi - lo);
    if !(half > 0.0 && half.is_finite()) {
        return Err(FitError::Singular);
    }

    // column k holds t^k, so the solution comes out lowest degree first
    let ndisps = xs.len();
    let mut x = Dmat::repeat(ndisps, nunk, 1.0);
    for (i, xi) in xs.iter().enumerate() {
        let t = (xi - mid) / half;
        for k in 1..nunk {
            x[(i, k)] = x[(i, k - 1)] * t;
        }
    }
    let y = Dvec::from_column_slice(ys);
    let xt = x.transpose();
    let xtx = &xt * &x;
    let beta = solve_least_squares(xtx, &xt, &y)?;

    let mut coeffs = unscale(beta.as_slice(), mid, half);
    if coeffs.iter().any(|c| !c.is_finite()) {
        return Err(FitError::Singular);
    }
    coeffs.reverse();
    let poly = Polynomial::new(coeffs);
    log::debug!(
        "fit {poly} to {ndisps} points, sum of squared residuals = {:.6e}",
        poly.residuals(xs, ys)
    );
    Ok(poly)
}

/// number of bitwise-distinct values in `xs`
fn distinct(xs: &[f64]) -> usize {
    let mut v: Vec<u64> = xs.iter().map(|x| x.to_bits()).collect();
    v.sort_unstable();
    v.dedup();
    v.len()
}

/// Convert the coefficients `beta` (lowest degree first) of a polynomial in t
/// = (x - mid) / half into the coefficients of the same polynomial in x, also
/// lowest degree first. Expanding tᵏ binomially gives the coefficient of xⁱ as
/// Σₖ βₖ C(k, i) (-mid)ᵏ⁻ⁱ / halfᵏ.
fn unscale(beta: &[f64], mid: f64, half: f64) -> Vec<f64> {
    let n = beta.len();
    let mut ret = vec![0.0; n];
    for (k, b) in beta.iter().enumerate() {
        let scaled = b / half.powi(k as i32);
        let mut binom = 1.0;
        for (i, r) in ret.iter_mut().enumerate().take(k + 1) {
            if i > 0 {
                binom = binom * (k + 1 - i) as f64 / i as f64;
            }
            *r += scaled * binom * (-mid).powi((k - i) as i32);
        }
    }
    ret
}

/// Solve the [ordinary least
/// squares](https://en.wikipedia.org/wiki/Ordinary_least_squares) problem β =
/// (XᵀX)⁻¹Xᵀy for β. First try to solve the equations using the Cholesky
/// decomposition using forward and backward substitution as described
/// [here](https://en.wikipedia.org/wiki/Numerical_methods_for_linear_least_squares#Inverting_the_matrix_of_the_normal_equations).
/// If the Cholesky decomposition fails, fall back on the LU decomposition and
/// inverting XᵀX directly.
fn solve_least_squares(
    xtx: Dmat,
    xt: &Dmat,
    y: &Dvec,
) -> Result<Dvec, FitError> {
    let xty = xt * y;
    if let Some(chol) = Cholesky::new(xtx.clone()) {
        let l = chol.l();
        let z = l.solve_lower_triangular(&xty).ok_or(FitError::Singular)?;
        let r = l.transpose();
        return r.solve_upper_triangular(&z).ok_or(FitError::Singular);
    }
    log::debug!(
        "Cholesky decomposition failed in solve_least_squares, trying LU"
    );
    let inv = na::LU::new(xtx)
        .try_inverse()
        .ok_or(FitError::Singular)?;
    Ok(inv * xty)
}

//! Log-log linear interpolation over tabulated, strictly increasing abscissae.
//!
//! Power spectra are close to power laws locally, so interpolating
//! `ln y` linearly in `ln x` is accurate even on coarse tables. Queries
//! outside the tabulated range are a hard error, never an extrapolation.

use crate::error::AppError;

/// Interpolate `y(x)` in log-log space.
///
/// Requires `xs` strictly increasing and all values positive; `ys` must be
/// positive as well (they are log-transformed).
pub fn interp_loglog(x: f64, xs: &[f64], ys: &[f64]) -> Result<f64, AppError> {
    if xs.len() != ys.len() || xs.len() < 2 {
        return Err(AppError::numeric(
            "interpolation table needs at least 2 aligned rows",
        ));
    }
    if !(x.is_finite() && x > 0.0) {
        return Err(AppError::domain(format!(
            "interpolation abscissa must be finite and positive, got {x}"
        )));
    }
    let (first, last) = (xs[0], xs[xs.len() - 1]);
    if x < first || x > last {
        return Err(AppError::domain(format!(
            "value {x:.6e} outside tabulated range [{first:.6e}, {last:.6e}]"
        )));
    }

    // Binary search for the bracketing pair.
    let idx = match xs.binary_search_by(|probe| probe.partial_cmp(&x).unwrap_or(std::cmp::Ordering::Less)) {
        Ok(i) => return Ok(ys[i]),
        Err(i) => i,
    };
    let (x0, x1) = (xs[idx - 1], xs[idx]);
    let (y0, y1) = (ys[idx - 1], ys[idx]);
    if !(y0 > 0.0 && y1 > 0.0) {
        return Err(AppError::numeric(
            "log-log interpolation requires positive ordinates",
        ));
    }

    let t = (x.ln() - x0.ln()) / (x1.ln() - x0.ln());
    Ok((y0.ln() + t * (y1.ln() - y0.ln())).exp())
}

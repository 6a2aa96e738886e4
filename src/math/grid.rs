//! Sweep grid generation.
//!
//! Both sweeps are deterministic passes over a fixed-length grid:
//! wavenumbers are log-spaced, separations are linearly spaced. Grids are
//! built once at run start and never reordered, so `output[i]` always
//! corresponds to `input[i]`.

use crate::error::AppError;

/// Generate `points` log-spaced values between `min` and `max` (inclusive).
pub fn log_space(min: f64, max: f64, points: usize) -> Result<Vec<f64>, AppError> {
    if !(min.is_finite() && max.is_finite() && min > 0.0 && max > 0.0 && max > min) {
        return Err(AppError::config(format!(
            "invalid log grid: min={min}, max={max} (must be finite, >0, and max>min)"
        )));
    }
    if points < 2 {
        return Err(AppError::config("log grid needs at least 2 points"));
    }

    let ln_min = min.ln();
    let ln_max = max.ln();
    let step = (ln_max - ln_min) / (points as f64 - 1.0);

    let mut out = Vec::with_capacity(points);
    for i in 0..points {
        out.push((ln_min + step * i as f64).exp());
    }
    // exp/ln does not round-trip exactly; pin both endpoints so grid edges
    // match user-supplied bounds (and tabulated ranges) bit for bit.
    out[0] = min;
    out[points - 1] = max;
    Ok(out)
}

/// Generate `points` linearly spaced values between `min` and `max` (inclusive).
pub fn lin_space(min: f64, max: f64, points: usize) -> Result<Vec<f64>, AppError> {
    if !(min.is_finite() && max.is_finite() && max > min) {
        return Err(AppError::config(format!(
            "invalid linear grid: min={min}, max={max} (must be finite and max>min)"
        )));
    }
    if points < 2 {
        return Err(AppError::config("linear grid needs at least 2 points"));
    }

    let step = (max - min) / (points as f64 - 1.0);
    let mut out = Vec::with_capacity(points);
    for i in 0..points {
        out.push(min + step * i as f64);
    }
    out[points - 1] = max;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_space_includes_endpoints() {
        let v = log_space(1e-3, 1.0, 100).unwrap();
        assert_eq!(v.len(), 100);
        assert!((v[0] - 1e-3).abs() < 1e-15);
        assert!((v[99] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn log_space_is_geometric() {
        let v = log_space(1e-3, 1.0, 100).unwrap();
        let ratio = v[1] / v[0];
        for w in v.windows(2) {
            assert!((w[1] / w[0] - ratio).abs() < 1e-9);
        }
    }

    #[test]
    fn lin_space_includes_endpoints() {
        let v = lin_space(1.0, 100.0, 50).unwrap();
        assert_eq!(v.len(), 50);
        assert!((v[0] - 1.0).abs() < 1e-12);
        assert!((v[49] - 100.0).abs() < 1e-12);
        let step = v[1] - v[0];
        for w in v.windows(2) {
            assert!((w[1] - w[0] - step).abs() < 1e-9);
        }
    }

    #[test]
    fn endpoints_are_exact_bit_for_bit() {
        // exp(ln(3e-3)) rounds down to 2.999...e-3; the grid edges must still
        // equal the requested bounds so queries against a source tabulated on
        // exactly [3e-3, 1] stay in range.
        let v = log_space(3e-3, 1.0, 100).unwrap();
        assert_eq!(v[0], 3e-3);
        assert_eq!(v[99], 1.0);
        let w = lin_space(0.1, 73.4, 50).unwrap();
        assert_eq!(w[49], 73.4);
    }

    #[test]
    fn rejects_degenerate_ranges() {
        assert!(log_space(0.0, 1.0, 10).is_err());
        assert!(log_space(1.0, 1.0, 10).is_err());
        assert!(lin_space(5.0, 1.0, 10).is_err());
        assert!(lin_space(1.0, 2.0, 1).is_err());
    }
}

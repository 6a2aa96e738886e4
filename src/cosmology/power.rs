//! Linear matter power spectrum and field variance σ(R).
//!
//! The built-in method evaluates the Eisenstein-Hu transfer function,
//! normalizes it to the parameter set's σ8 and scales it with the linear
//! growth factor. The `camb` method defers to a precomputed table loaded
//! from `data_dir` (see `io::pk_table`).

use std::f64::consts::PI;

use integrate::adaptive_quadrature;

use crate::cosmology::{Cosmology, check_redshift};
use crate::domain::{PkMethod, linearity_label};
use crate::error::AppError;
use crate::io::pk_table::PkTable;

/// Wavenumber domain (h/Mpc) of the analytic spectrum. Queries outside it
/// are rejected rather than extrapolated.
pub const K_DOMAIN: (f64, f64) = (1e-5, 1e3);

impl Cosmology {
    /// Unchecked linear spectrum in (Mpc/h)³; total for k > 0.
    ///
    /// Used by the quadratures below, which control their own k ranges.
    pub(crate) fn pk_lin_unchecked(&self, k: f64, redshift: f64) -> f64 {
        let growth = self.dd(redshift);
        self.pk_norm() * k.powf(self.parameters().n_spec) * self.transfer().t_k(k).powi(2)
            * growth
            * growth
    }

    /// Linear Eisenstein-Hu power spectrum P(k, z) in (Mpc/h)³.
    pub fn pk_eisenstein_hu(&self, k: f64, redshift: f64) -> Result<f64, AppError> {
        check_redshift(redshift)?;
        check_wavenumber(k)?;
        let pk = self.pk_lin_unchecked(k, redshift);
        if !pk.is_finite() {
            return Err(AppError::numeric(format!(
                "non-finite power spectrum at k = {k:.6e} h/Mpc"
            )));
        }
        Ok(pk)
    }

    /// Power spectrum for the given computation method.
    ///
    /// The built-in transfer function is linear-theory only: requesting
    /// nonlinear output with it is an explicit error, not a silent fallback.
    /// The `camb` method selects the matching (linear or nonlinear) table.
    pub fn pk(
        &self,
        k: f64,
        method: PkMethod,
        nonlinear: bool,
        redshift: f64,
    ) -> Result<f64, AppError> {
        let source = PkSource::new(self, method, nonlinear, redshift)?;
        source.pk(k)
    }

    /// RMS linear density fluctuation in a top-hat sphere of radius `r` Mpc/h.
    pub fn sigma_r(&self, r: f64, redshift: f64) -> Result<f64, AppError> {
        check_redshift(redshift)?;
        if !(r.is_finite() && r > 0.0) {
            return Err(AppError::domain(format!(
                "smoothing radius must be finite and positive, got {r}"
            )));
        }

        // sigma^2(R) = 1/(2 pi^2) Int dln k  k^3 P(k) W^2(kR)
        let integrand = |ln_k: f64| {
            let k = ln_k.exp();
            k.powi(3) * self.pk_lin_unchecked(k, redshift) * top_hat_window(k * r).powi(2)
                / (2.0 * PI * PI)
        };
        let sigma2 = adaptive_quadrature::adaptive_simpson_method(
            integrand,
            K_DOMAIN.0.ln(),
            K_DOMAIN.1.ln(),
            1e-7,
            1e-10,
        )
        .map_err(|e| AppError::numeric(format!("sigma(R) quadrature failed: {e:?}")))?;

        if !(sigma2.is_finite() && sigma2 > 0.0) {
            return Err(AppError::numeric(format!(
                "sigma(R) quadrature returned a non-positive variance at R = {r}"
            )));
        }
        Ok(sigma2.sqrt())
    }

    /// Logarithmic slope d ln sigma^-1 / d ln R, by central difference.
    pub fn dln_sigma_inv_dln_r(&self, r: f64, redshift: f64) -> Result<f64, AppError> {
        const H: f64 = 0.02;
        let lo = self.sigma_r(r * (-H).exp(), redshift)?;
        let hi = self.sigma_r(r * H.exp(), redshift)?;
        Ok((lo.ln() - hi.ln()) / (2.0 * H))
    }
}

/// Fourier-space top-hat window W(x) = 3 (sin x - x cos x) / x^3.
fn top_hat_window(x: f64) -> f64 {
    if x < 1e-4 {
        // Series expansion avoids catastrophic cancellation at small x.
        return 1.0 - x * x / 10.0;
    }
    3.0 * (x.sin() - x * x.cos()) / (x * x * x)
}

pub(crate) fn check_wavenumber(k: f64) -> Result<(), AppError> {
    if !(k.is_finite() && k > 0.0) {
        return Err(AppError::domain(format!(
            "wavenumber must be finite and positive, got {k}"
        )));
    }
    if k < K_DOMAIN.0 || k > K_DOMAIN.1 {
        return Err(AppError::domain(format!(
            "wavenumber {k:.6e} h/Mpc outside the valid domain [{:.0e}, {:.0e}]",
            K_DOMAIN.0, K_DOMAIN.1
        )));
    }
    Ok(())
}

/// A resolved, strongly-typed spectrum source.
///
/// Resolving method + flags once up front means a sweep pays the table load
/// a single time and every per-point query is a pure evaluation.
pub enum PkSource<'a> {
    /// Built-in Eisenstein-Hu linear spectrum at a fixed redshift.
    Analytic { cosmo: &'a Cosmology, redshift: f64 },
    /// Interpolated tabulated spectrum (already at its redshift).
    Table(PkTable),
}

impl<'a> PkSource<'a> {
    pub fn new(
        cosmo: &'a Cosmology,
        method: PkMethod,
        nonlinear: bool,
        redshift: f64,
    ) -> Result<Self, AppError> {
        check_redshift(redshift)?;
        match method {
            PkMethod::EisensteinHu => {
                if nonlinear {
                    return Err(AppError::domain(format!(
                        "the {} method is linear-theory only; use --method camb with a {} table for nonlinear output",
                        method.display_name(),
                        linearity_label(true)
                    )));
                }
                Ok(PkSource::Analytic { cosmo, redshift })
            }
            PkMethod::Camb => Ok(PkSource::Table(PkTable::load(
                cosmo.paths(),
                method,
                nonlinear,
                redshift,
            )?)),
        }
    }

    /// Evaluate P(k); out-of-domain wavenumbers are an explicit error.
    pub fn pk(&self, k: f64) -> Result<f64, AppError> {
        match self {
            PkSource::Analytic { cosmo, redshift } => cosmo.pk_eisenstein_hu(k, *redshift),
            PkSource::Table(table) => table.pk(k),
        }
    }

    /// The k-range (h/Mpc) over which this source is defined.
    pub fn k_domain(&self) -> (f64, f64) {
        match self {
            PkSource::Analytic { .. } => K_DOMAIN,
            PkSource::Table(table) => table.k_range(),
        }
    }
}

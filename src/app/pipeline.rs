//! The compute pipeline behind the CLI commands.
//!
//! Keeping this separate from terminal/printing code makes the sweeps and
//! evaluations directly testable.

use crate::cosmology::{Cosmology, PkSource, xi_dm};
use crate::domain::{SizeFunctionConfig, SpectrumConfig};
use crate::error::AppError;
use crate::math::{lin_space, log_space};

/// Result of a `cosmo spectrum` run. Grids are index-aligned with their
/// values (`pk[i]` belongs to `k[i]`, `xi[i]` to `r[i]`).
#[derive(Debug, Clone)]
pub struct SpectrumOutput {
    pub k: Vec<f64>,
    pub pk: Vec<f64>,
    pub r: Vec<f64>,
    pub xi: Vec<f64>,
}

/// Result of a `cosmo size-function` run, including the thresholds that
/// went into the evaluation.
#[derive(Debug, Clone)]
pub struct SizeFunctionOutput {
    pub delta_v: f64,
    pub delta_c: f64,
    pub value: f64,
}

/// Run both sweeps for the configured model.
///
/// The spectrum source is resolved once; table-backed methods therefore
/// load and validate their file a single time per run.
pub fn run_spectrum(config: &SpectrumConfig) -> Result<SpectrumOutput, AppError> {
    let cosmo = Cosmology::from_model(config.model, config.paths.clone())?;
    let source = PkSource::new(&cosmo, config.method, config.nonlinear, config.redshift)?;

    let k = log_space(config.k_min, config.k_max, config.k_points)?;
    let r = lin_space(config.r_min, config.r_max, config.r_points)?;

    let mut pk = Vec::with_capacity(k.len());
    for &kk in &k {
        pk.push(source.pk(kk)?);
    }

    let mut xi = Vec::with_capacity(r.len());
    for &rr in &r {
        xi.push(xi_dm(&source, rr)?);
    }

    Ok(SpectrumOutput { k, pk, r, xi })
}

/// Evaluate the void size function for the configured scenario.
///
/// The density thresholds are derived from the cosmology at
/// `threshold_redshift` and returned alongside the result.
pub fn run_size_function(config: &SizeFunctionConfig) -> Result<SizeFunctionOutput, AppError> {
    let cosmo = Cosmology::from_model(config.model, config.paths.clone())?;

    let delta_v = cosmo.deltav_l();
    let delta_c = cosmo.deltac(config.threshold_redshift)?;
    let value = cosmo.size_function(
        config.radius,
        config.redshift,
        delta_v,
        delta_c,
        config.sf_model,
    )?;

    Ok(SizeFunctionOutput {
        delta_v,
        delta_c,
        value,
    })
}

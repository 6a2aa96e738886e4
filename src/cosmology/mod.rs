//! The `Cosmology` value object and its background-expansion quantities.
//!
//! A `Cosmology` is immutable once constructed: every query method is a pure
//! function of the fixed parameter set and the call arguments. Construction
//! takes the explicit `Paths` configuration (used by the tabulated-spectrum
//! method) instead of any process-global directory state.
//!
//! Responsibilities are split across submodules:
//!
//! - `transfer`: Eisenstein & Hu (1998) transfer function
//! - `power`: linear power spectrum, σ(R), and the typed spectrum source
//! - `correlation`: two-point correlation function ξ(r)
//! - `size_function`: excursion-set void size functions

pub mod correlation;
pub mod power;
pub mod size_function;
pub mod transfer;

pub use correlation::xi_dm;
pub use power::PkSource;

use crate::domain::{CosmologicalModel, CosmologicalParameters, Paths};
use crate::error::AppError;

use libm::log10;
use transfer::EhTransfer;

/// A fixed cosmology with precomputed transfer-function constants and
/// power-spectrum normalization.
#[derive(Debug, Clone)]
pub struct Cosmology {
    params: CosmologicalParameters,
    paths: Paths,
    transfer: EhTransfer,
    /// Amplitude fixing σ(8 Mpc/h, z=0) to the parameter set's σ8.
    pk_norm: f64,
}

impl Cosmology {
    /// Construct with the built-in default parameter set.
    pub fn new(paths: Paths) -> Result<Self, AppError> {
        Self::with_parameters(CosmologicalParameters::default(), paths)
    }

    /// Construct from a named preset.
    pub fn from_model(model: CosmologicalModel, paths: Paths) -> Result<Self, AppError> {
        Self::with_parameters(model.parameters(), paths)
    }

    /// Construct from an explicit parameter set.
    pub fn with_parameters(params: CosmologicalParameters, paths: Paths) -> Result<Self, AppError> {
        if !(params.omega_matter > 0.0) {
            return Err(AppError::domain("Omega_matter must be > 0"));
        }
        if !(params.omega_baryon > 0.0 && params.omega_baryon < params.omega_matter) {
            return Err(AppError::domain(
                "Omega_baryon must be > 0 and smaller than Omega_matter",
            ));
        }
        if !(params.hh > 0.0) {
            return Err(AppError::domain("h must be > 0"));
        }
        if !(params.sigma8 > 0.0) {
            return Err(AppError::domain("sigma8 must be > 0"));
        }

        let transfer = EhTransfer::new(&params);
        let mut cosmo = Self {
            params,
            paths,
            transfer,
            pk_norm: 1.0,
        };
        // Normalize once at construction so queries stay cheap and pure.
        let sigma8_unnorm = cosmo.sigma_r(8.0, 0.0)?;
        if !(sigma8_unnorm.is_finite() && sigma8_unnorm > 0.0) {
            return Err(AppError::numeric(
                "power-spectrum normalization produced a non-positive sigma8",
            ));
        }
        cosmo.pk_norm = (params.sigma8 / sigma8_unnorm).powi(2);
        Ok(cosmo)
    }

    pub fn parameters(&self) -> &CosmologicalParameters {
        &self.params
    }

    pub fn paths(&self) -> &Paths {
        &self.paths
    }

    pub(crate) fn transfer(&self) -> &EhTransfer {
        &self.transfer
    }

    pub(crate) fn pk_norm(&self) -> f64 {
        self.pk_norm
    }

    /// CPL dark-energy density evolution (see e.g. Bassett & Hlozek 2010).
    fn f_de(&self, redshift: f64) -> f64 {
        let z = redshift;
        (1.0 + z).powf(3.0 * (1.0 + self.params.w0 + self.params.wa))
            * (-3.0 * self.params.wa * z / (1.0 + z)).exp()
    }

    /// Square of the normalized Hubble rate, E²(z) = (H(z)/H0)².
    pub fn e2(&self, redshift: f64) -> f64 {
        let z = redshift;
        self.params.omega_matter * (1.0 + z).powi(3)
            + self.params.omega_de * self.f_de(z)
            + self.params.omega_k * (1.0 + z).powi(2)
            + self.params.omega_radiation * (1.0 + z).powi(4)
    }

    /// Matter density parameter at the given redshift.
    pub fn omega_m_z(&self, redshift: f64) -> f64 {
        self.params.omega_matter * (1.0 + redshift).powi(3) / self.e2(redshift)
    }

    /// Growth suppression factor g(z) (Carroll, Press & Turner 1992).
    ///
    /// Uses the flat-universe approximation ΩΛ(z) ≈ 1 - Ωm(z), as the
    /// original library does.
    fn gg(&self, redshift: f64) -> f64 {
        let om = self.omega_m_z(redshift);
        let ol = 1.0 - om;
        2.5 * om / (om.powf(4.0 / 7.0) - ol + (1.0 + 0.5 * om) * (1.0 + ol / 70.0))
    }

    /// Linear growth factor D(z), normalized so D(0) = 1.
    pub fn dd(&self, redshift: f64) -> f64 {
        1.0 / (1.0 + redshift) * self.gg(redshift) / self.gg(0.0)
    }

    /// Linear overdensity collapse threshold δc at the given redshift.
    pub fn deltac(&self, redshift: f64) -> Result<f64, AppError> {
        check_redshift(redshift)?;
        Ok(1.686 * (1.0 + 0.012299 * log10(self.omega_m_z(redshift))))
    }

    /// Nonlinear shell-crossing underdensity of a void, δv_NL ≈ -0.795.
    pub fn deltav_nl(&self) -> f64 {
        deltav_nonlinear(self.deltav_l())
    }

    /// Linear-theory underdensity threshold δv_L ≈ -2.71.
    ///
    /// Obtained from the shell-crossing value δv_NL = -0.795 through the
    /// 1.594-exponent linear/nonlinear mapping.
    pub fn deltav_l(&self) -> f64 {
        const DELTAV_NL_SHELL_CROSSING: f64 = -0.795;
        1.594 * (1.0 - (1.0 + DELTAV_NL_SHELL_CROSSING).powf(-1.0 / 1.594))
    }
}

/// Map a linear underdensity onto its nonlinear counterpart.
pub(crate) fn deltav_nonlinear(deltav_l: f64) -> f64 {
    (1.0 - deltav_l / 1.594).powf(-1.594) - 1.0
}

/// Queries are defined for z >= 0 only.
pub(crate) fn check_redshift(redshift: f64) -> Result<(), AppError> {
    if !(redshift.is_finite() && redshift >= 0.0) {
        return Err(AppError::domain(format!(
            "redshift must be finite and >= 0, got {redshift}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_cosmology() -> Cosmology {
        Cosmology::new(Paths::default()).unwrap()
    }

    #[test]
    fn default_construction_never_fails() {
        let cosmo = default_cosmology();
        assert!(cosmo.pk_norm().is_finite() && cosmo.pk_norm() > 0.0);
    }

    #[test]
    fn all_presets_construct() {
        for model in CosmologicalModel::ALL {
            assert!(Cosmology::from_model(model, Paths::default()).is_ok());
        }
    }

    #[test]
    fn rejects_unphysical_parameters() {
        let mut params = CosmologicalParameters::default();
        params.omega_matter = 0.0;
        assert!(Cosmology::with_parameters(params, Paths::default()).is_err());
    }

    #[test]
    fn normalized_hubble_rate_is_one_today() {
        let cosmo = default_cosmology();
        assert!((cosmo.e2(0.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn omega_m_interpolates_between_today_and_matter_domination() {
        let cosmo = default_cosmology();
        assert!((cosmo.omega_m_z(0.0) - 0.27).abs() < 1e-12);
        // At high redshift matter dominates.
        assert!(cosmo.omega_m_z(20.0) > 0.99);
    }

    #[test]
    fn growth_factor_is_normalized_and_decreasing() {
        let cosmo = default_cosmology();
        assert!((cosmo.dd(0.0) - 1.0).abs() < 1e-12);
        assert!(cosmo.dd(0.5) < 1.0);
        assert!(cosmo.dd(1.0) < cosmo.dd(0.5));
        // Deep in matter domination D(z)(1+z) tends to g(z)/g(0) with
        // g(z) -> ~0.994, i.e. about 1.32 for these parameters.
        let ratio = cosmo.dd(9.0) * 10.0;
        let expected = cosmo.gg(9.0) / cosmo.gg(0.0);
        assert!((ratio - expected).abs() < 1e-12);
        assert!(ratio > 1.25 && ratio < 1.40, "ratio = {ratio}");
    }

    #[test]
    fn collapse_threshold_matches_reference_value() {
        let cosmo = default_cosmology();
        // 1.686*(1 + 0.012299*log10(0.27))
        let expected = 1.686 * (1.0 + 0.012299 * 0.27f64.log10());
        assert!((cosmo.deltac(0.0).unwrap() - expected).abs() < 1e-12);
        // In matter domination deltac tends to the EdS value 1.686.
        assert!((cosmo.deltac(20.0).unwrap() - 1.686).abs() < 1e-3);
    }

    #[test]
    fn deltac_rejects_negative_redshift() {
        let cosmo = default_cosmology();
        assert_eq!(cosmo.deltac(-0.5).unwrap_err().exit_code(), 3);
    }

    #[test]
    fn void_thresholds_match_shell_crossing_values() {
        let cosmo = default_cosmology();
        assert!((cosmo.deltav_l() + 2.717).abs() < 5e-3);
        assert!((cosmo.deltav_nl() + 0.795).abs() < 1e-3);
        // The linear/nonlinear mapping round-trips.
        assert!((deltav_nonlinear(cosmo.deltav_l()) - cosmo.deltav_nl()).abs() < 1e-12);
    }
}

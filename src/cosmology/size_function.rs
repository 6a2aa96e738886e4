//! Theoretical size function of cosmic voids.
//!
//! Excursion-set void abundance (Sheth & van de Weygaert 2004): the
//! multiplicity function f(sigma) counts the fraction of trajectories that
//! first cross the underdensity barrier del_v while staying below the
//! overdensity barrier del_c, and
//!
//! ```text
//! dn/dln R = f(sigma) / V(R) * dln sigma^-1 / dln R
//! ```
//!
//! The three conventions differ only in how the input (observed) radius maps
//! onto the linear-theory radius and which volume divides the counts: voids
//! expand by (1+del_v_NL)^(-1/3) ~ 1.7 while going nonlinear; `svdw` keeps
//! the linear volume (the model's well-known volume overcounting), `vdn`
//! conserves volume, `linear` skips the expansion entirely.
//!
//! Both thresholds are call arguments: this function never recomputes them
//! internally, so the caller stays in control of the threshold conventions.

use std::f64::consts::PI;

use crate::cosmology::{Cosmology, check_redshift, deltav_nonlinear};
use crate::domain::SizeFunctionModel;
use crate::error::AppError;

impl Cosmology {
    /// Void size function dn/dlnR in (h/Mpc)³ at the given effective radius
    /// (Mpc/h) and redshift.
    ///
    /// `del_v` is the linear underdensity threshold (negative), `del_c` the
    /// linear overdensity threshold (positive); both must be supplied
    /// explicitly.
    pub fn size_function(
        &self,
        radius: f64,
        redshift: f64,
        del_v: f64,
        del_c: f64,
        model: SizeFunctionModel,
    ) -> Result<f64, AppError> {
        check_redshift(redshift)?;
        if !(radius.is_finite() && radius > 0.0) {
            return Err(AppError::domain(format!(
                "void radius must be finite and positive, got {radius}"
            )));
        }
        if !(del_v.is_finite() && del_v < 0.0) {
            return Err(AppError::domain(format!(
                "underdensity threshold del_v must be negative, got {del_v}"
            )));
        }
        if !(del_c.is_finite() && del_c > 0.0) {
            return Err(AppError::domain(format!(
                "overdensity threshold del_c must be positive, got {del_c}"
            )));
        }

        // Nonlinear expansion factor implied by the supplied threshold.
        let expansion = (1.0 + deltav_nonlinear(del_v)).powf(-1.0 / 3.0);

        // (linear-theory radius, radius whose volume divides the counts)
        let (r_lin, r_vol) = match model {
            SizeFunctionModel::Linear => (radius, radius),
            SizeFunctionModel::Svdw => (radius / expansion, radius / expansion),
            SizeFunctionModel::Vdn => (radius / expansion, radius),
        };

        let sigma = self.sigma_r(r_lin, redshift)?;
        let slope = self.dln_sigma_inv_dln_r(r_lin, redshift)?;
        let volume = 4.0 / 3.0 * PI * r_vol.powi(3);

        let dn = f_ln_sigma(sigma, del_v, del_c) / volume * slope;
        if !dn.is_finite() {
            return Err(AppError::numeric(format!(
                "non-finite size function at R = {radius} Mpc/h, z = {redshift}"
            )));
        }
        Ok(dn)
    }
}

/// SvdW multiplicity function f(sigma).
///
/// Below x = D/|del_v| * sigma = 0.276 the infinite sine series is replaced
/// by its closed-form low-sigma limit; above it four terms are enough for
/// sub-percent accuracy (SvdW 2004, eq. 4).
fn f_ln_sigma(sigma: f64, del_v: f64, del_c: f64) -> f64 {
    let dv = del_v.abs();
    let d_ratio = dv / (del_c + dv);
    let x = d_ratio / dv * sigma;

    if x <= 0.276 {
        (2.0 / PI).sqrt() * (dv / sigma) * (-dv * dv / (2.0 * sigma * sigma)).exp()
    } else {
        let mut sum = 0.0;
        for j in 1..=4u32 {
            let jpi = j as f64 * PI;
            sum += (-(jpi * x).powi(2) / 2.0).exp() * jpi * x * x * (jpi * d_ratio).sin();
        }
        2.0 * sum
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Paths;

    fn default_cosmology() -> Cosmology {
        Cosmology::new(Paths::default()).unwrap()
    }

    fn thresholds(cosmo: &Cosmology) -> (f64, f64) {
        (cosmo.deltav_l(), cosmo.deltac(0.0).unwrap())
    }

    #[test]
    fn example_scenario_yields_a_small_positive_density() {
        let cosmo = default_cosmology();
        let (del_v, del_c) = thresholds(&cosmo);
        let dn = cosmo
            .size_function(10.0, 0.0, del_v, del_c, SizeFunctionModel::Svdw)
            .unwrap();
        assert!(dn > 0.0 && dn.is_finite());
        // Order of magnitude: far less than one void per (Mpc/h)^3.
        assert!(dn < 1e-2, "dn/dlnR = {dn}");
    }

    #[test]
    fn vdn_is_the_volume_rescaled_svdw() {
        let cosmo = default_cosmology();
        let (del_v, del_c) = thresholds(&cosmo);
        let svdw = cosmo
            .size_function(10.0, 0.0, del_v, del_c, SizeFunctionModel::Svdw)
            .unwrap();
        let vdn = cosmo
            .size_function(10.0, 0.0, del_v, del_c, SizeFunctionModel::Vdn)
            .unwrap();
        let expansion = (1.0 + deltav_nonlinear(del_v)).powf(-1.0 / 3.0);
        assert!((svdw / vdn - expansion.powi(3)).abs() < 1e-9);
        assert!(vdn < svdw);
    }

    #[test]
    fn abundance_drops_steeply_with_radius() {
        let cosmo = default_cosmology();
        let (del_v, del_c) = thresholds(&cosmo);
        let at = |r| {
            cosmo
                .size_function(r, 0.0, del_v, del_c, SizeFunctionModel::Svdw)
                .unwrap()
        };
        assert!(at(5.0) > at(10.0));
        assert!(at(10.0) > at(20.0));
    }

    #[test]
    fn threshold_signs_are_enforced() {
        let cosmo = default_cosmology();
        let (del_v, del_c) = thresholds(&cosmo);
        assert!(
            cosmo
                .size_function(10.0, 0.0, -del_v, del_c, SizeFunctionModel::Svdw)
                .is_err()
        );
        assert!(
            cosmo
                .size_function(10.0, 0.0, del_v, -del_c, SizeFunctionModel::Svdw)
                .is_err()
        );
        assert!(
            cosmo
                .size_function(-10.0, 0.0, del_v, del_c, SizeFunctionModel::Svdw)
                .is_err()
        );
    }

    #[test]
    fn multiplicity_regimes_join_continuously() {
        // The closed form and the truncated series should agree near the
        // switch point x = 0.276.
        let (del_v, del_c) = (-2.71, 1.686);
        let dv: f64 = 2.71;
        let d_ratio = dv / (del_c + dv);
        let sigma_at = |x: f64| x * dv / d_ratio;
        let below = f_ln_sigma(sigma_at(0.2759), del_v, del_c);
        let above = f_ln_sigma(sigma_at(0.2761), del_v, del_c);
        assert!((below - above).abs() / above < 0.05, "{below} vs {above}");
    }
}

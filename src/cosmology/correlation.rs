//! Two-point correlation function of dark matter.
//!
//! xi(r) is the spherical Fourier transform of the power spectrum:
//!
//! ```text
//! xi(r) = 1/(2 pi^2) Int dk k^2 P(k) sin(kr)/(kr)
//! ```
//!
//! The integrand oscillates, so we evaluate it on a dense fixed log-k grid
//! with a Gaussian damping factor on the high-k tail. The damping scale is
//! far above every scale probed by the default sweep (r in [1, 100] Mpc/h),
//! where P(k) has already fallen by several orders of magnitude.

use std::f64::consts::PI;

use crate::cosmology::PkSource;
use crate::error::AppError;

/// Trapezoid nodes in ln k. Dense enough to resolve sin(kr) up to the
/// damping scale for r <= a few hundred Mpc/h.
const N_NODES: usize = 16384;

/// Gaussian damping scale in h/Mpc.
const K_DAMP: f64 = 20.0;

/// Integration bounds in h/Mpc, clipped to the source's own domain.
const K_BOUNDS: (f64, f64) = (1e-4, 1e2);

/// Two-point correlation function xi(r) at comoving separation `r` Mpc/h.
pub fn xi_dm(source: &PkSource<'_>, r: f64) -> Result<f64, AppError> {
    if !(r.is_finite() && r > 0.0) {
        return Err(AppError::domain(format!(
            "separation must be finite and positive, got {r}"
        )));
    }

    let (src_min, src_max) = source.k_domain();
    let k_min = K_BOUNDS.0.max(src_min);
    let k_max = K_BOUNDS.1.min(src_max);
    if !(k_max > k_min) {
        return Err(AppError::domain(
            "spectrum source covers no usable k-range for the xi(r) transform",
        ));
    }

    let ln_min = k_min.ln();
    let step = (k_max.ln() - ln_min) / (N_NODES as f64 - 1.0);

    // Trapezoid rule in ln k: dk = k dln k, so the integrand picks up k^3.
    let mut sum = 0.0;
    for i in 0..N_NODES {
        // exp/ln does not round-trip exactly; the edge nodes must not land
        // outside the source's tabulated range.
        let k = if i == 0 {
            k_min
        } else if i == N_NODES - 1 {
            k_max
        } else {
            (ln_min + step * i as f64).exp()
        };
        let kr = k * r;
        let sinc = if kr < 1e-8 { 1.0 } else { kr.sin() / kr };
        let damping = (-(k / K_DAMP).powi(2)).exp();
        let f = k.powi(3) * source.pk(k)? * sinc * damping;
        let weight = if i == 0 || i == N_NODES - 1 { 0.5 } else { 1.0 };
        sum += weight * f;
    }
    let xi = sum * step / (2.0 * PI * PI);

    if !xi.is_finite() {
        return Err(AppError::numeric(format!(
            "non-finite correlation function at r = {r} Mpc/h"
        )));
    }
    Ok(xi)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cosmology::Cosmology;
    use crate::domain::{Paths, PkMethod};

    fn default_source(cosmo: &Cosmology) -> PkSource<'_> {
        PkSource::new(cosmo, PkMethod::EisensteinHu, false, 0.0).unwrap()
    }

    #[test]
    fn positive_and_decreasing_on_intermediate_scales() {
        let cosmo = Cosmology::new(Paths::default()).unwrap();
        let source = default_source(&cosmo);
        let xi5 = xi_dm(&source, 5.0).unwrap();
        let xi20 = xi_dm(&source, 20.0).unwrap();
        let xi50 = xi_dm(&source, 50.0).unwrap();
        assert!(xi5 > 0.0);
        assert!(xi5 > xi20);
        assert!(xi20 > xi50);
    }

    #[test]
    fn amplitude_is_of_order_unity_at_the_correlation_length() {
        // By construction sigma8 ~ 0.83, so xi(~5 Mpc/h) should be O(1).
        let cosmo = Cosmology::new(Paths::default()).unwrap();
        let source = default_source(&cosmo);
        let xi5 = xi_dm(&source, 5.0).unwrap();
        assert!(xi5 > 0.3 && xi5 < 10.0, "xi(5) = {xi5}");
    }

    #[test]
    fn table_source_is_usable_up_to_its_exact_edges() {
        // A table spanning exactly [3e-3, 1.0]: the clipped integration
        // bounds coincide with the tabulated range, so the edge nodes must
        // not fall outside it.
        let dir = std::env::temp_dir().join("cosmo-xi-table-edges");
        std::fs::create_dir_all(dir.join("pk")).unwrap();
        let mut rows = String::from("# k  P(k)\n");
        for k in crate::math::log_space(3e-3, 1.0, 40).unwrap() {
            rows.push_str(&format!("{k:.12e} {:.12e}\n", 1e4 * k.powf(-1.5)));
        }
        std::fs::write(dir.join("pk/camb_linear_z0.20.dat"), rows).unwrap();

        let cosmo = Cosmology::new(Paths::new(&dir, ".")).unwrap();
        let source = PkSource::new(&cosmo, PkMethod::Camb, false, 0.2).unwrap();

        // Sweep edge queries hit the table endpoints bit for bit.
        let grid = crate::math::log_space(3e-3, 1.0, 100).unwrap();
        assert!(source.pk(grid[0]).is_ok());
        assert!(source.pk(grid[99]).is_ok());

        let xi = xi_dm(&source, 10.0).unwrap();
        assert!(xi.is_finite());

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn rejects_nonpositive_separation() {
        let cosmo = Cosmology::new(Paths::default()).unwrap();
        let source = default_source(&cosmo);
        assert_eq!(xi_dm(&source, 0.0).unwrap_err().exit_code(), 3);
        assert!(xi_dm(&source, -3.0).is_err());
    }
}

//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the cosmology code stays clean and testable
//! - output changes are localized (important for future snapshot tests)

use crate::app::pipeline::{SizeFunctionOutput, SpectrumOutput};
use crate::domain::{SizeFunctionConfig, SpectrumConfig, linearity_label};

/// Summary header for a `cosmo spectrum` run.
pub fn format_spectrum_summary(config: &SpectrumConfig, output: &SpectrumOutput) -> String {
    let mut out = String::new();

    out.push_str("=== cosmo - dark matter model curves ===\n");
    out.push_str(&format!("Model : {}\n", config.model.display_name()));
    out.push_str(&format!(
        "Method: {} ({}) at z = {}\n",
        config.method.display_name(),
        linearity_label(config.nonlinear),
        config.redshift
    ));
    out.push_str(&format!(
        "P(k)  : {} points, k = [{:.0e}, {:.0e}] h/Mpc (log)\n",
        output.k.len(),
        config.k_min,
        config.k_max
    ));
    out.push_str(&format!(
        "xi(r) : {} points, r = [{}, {}] Mpc/h (linear)\n",
        output.r.len(),
        config.r_min,
        config.r_max
    ));
    out
}

/// The single result sentence for a `cosmo size-function` run.
///
/// Mirrors the classic demo output, e.g.:
/// `the size function at R = 10.0 Mpc/h and at z = 0.0 is 2e-05 (h/Mpc)^3`
pub fn format_size_function_line(config: &SizeFunctionConfig, output: &SizeFunctionOutput) -> String {
    format!(
        "the size function at R = {:.1} Mpc/h and at z = {:.1} is {} (h/Mpc)^3",
        config.radius,
        config.redshift,
        scientific(output.value)
    )
}

/// C-style `%.e` notation: signed, zero-padded two-digit exponent.
fn scientific(value: f64) -> String {
    let s = format!("{value:.0e}");
    match s.split_once('e') {
        Some((mantissa, exp)) => {
            let (sign, digits) = match exp.strip_prefix('-') {
                Some(d) => ("-", d),
                None => ("+", exp),
            };
            format!("{mantissa}e{sign}{digits:0>2}")
        }
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CosmologicalModel, Paths, PkMethod, SizeFunctionModel};

    fn sf_config() -> SizeFunctionConfig {
        SizeFunctionConfig {
            model: CosmologicalModel::Default,
            sf_model: SizeFunctionModel::Svdw,
            radius: 10.0,
            redshift: 0.0,
            threshold_redshift: 0.0,
            paths: Paths::default(),
        }
    }

    #[test]
    fn size_function_line_uses_scientific_notation() {
        let output = SizeFunctionOutput {
            delta_v: -2.71,
            delta_c: 1.674,
            value: 2.34e-5,
        };
        let line = format_size_function_line(&sf_config(), &output);
        assert_eq!(
            line,
            "the size function at R = 10.0 Mpc/h and at z = 0.0 is 2e-05 (h/Mpc)^3"
        );
    }

    #[test]
    fn scientific_notation_pads_the_exponent() {
        assert_eq!(scientific(2.34e-5), "2e-05");
        assert_eq!(scientific(8.7e-9), "9e-09");
        assert_eq!(scientific(1.0e3), "1e+03");
        assert_eq!(scientific(4.2e-123), "4e-123");
    }

    #[test]
    fn size_function_line_preserves_the_magnitude() {
        let output = SizeFunctionOutput {
            delta_v: -2.71,
            delta_c: 1.674,
            value: 8.7e-9,
        };
        let line = format_size_function_line(&sf_config(), &output);
        assert!(line.contains("9e-09"), "{line}");
    }

    #[test]
    fn spectrum_summary_names_method_and_grid_sizes() {
        let config = SpectrumConfig {
            model: CosmologicalModel::Planck15,
            method: PkMethod::EisensteinHu,
            nonlinear: false,
            redshift: 0.2,
            k_min: 1e-3,
            k_max: 1.0,
            k_points: 100,
            r_min: 1.0,
            r_max: 100.0,
            r_points: 50,
            label: "test".to_string(),
            plot: false,
            plot_width: 100,
            plot_height: 25,
            svg: false,
            export_results: None,
            export_grids: None,
            paths: Paths::default(),
        };
        let output = SpectrumOutput {
            k: vec![0.0; 100],
            pk: vec![0.0; 100],
            r: vec![0.0; 50],
            xi: vec![0.0; 50],
        };
        let text = format_spectrum_summary(&config, &output);
        assert!(text.contains("Planck 2015"));
        assert!(text.contains("EisensteinHu (linear) at z = 0.2"));
        assert!(text.contains("100 points"));
        assert!(text.contains("50 points"));
    }
}

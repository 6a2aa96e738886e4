//! Command-line parsing for the cosmology demo toolkit.
//!
//! The goal of this module is to keep **argument parsing** and **command
//! dispatch** separate from the cosmology/math code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::{CosmologicalModel, PkMethod, SizeFunctionModel};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "cosmo", version, about = "Dark matter model curves and void statistics")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sweep P(k) and xi(r) for a cosmological model, plot and optionally export.
    Spectrum(SpectrumArgs),
    /// Evaluate the cosmic void size function at one radius and redshift.
    SizeFunction(SizeFunctionArgs),
}

/// Options for the spectrum/correlation sweeps.
#[derive(Debug, Parser, Clone)]
pub struct SpectrumArgs {
    /// Cosmological parameter set.
    #[arg(short = 'm', long, value_enum, default_value_t = CosmologicalModel::Default)]
    pub model: CosmologicalModel,

    /// Power spectrum method.
    #[arg(long, value_enum, default_value_t = PkMethod::EisensteinHu)]
    pub method: PkMethod,

    /// Use the non-linear spectrum (tabulated methods only).
    #[arg(long)]
    pub nonlinear: bool,

    /// Redshift of the sweeps.
    #[arg(short = 'z', long, default_value_t = 0.2)]
    pub redshift: f64,

    /// Minimum wavenumber (h/Mpc).
    #[arg(long, default_value_t = 1e-3)]
    pub k_min: f64,

    /// Maximum wavenumber (h/Mpc).
    #[arg(long, default_value_t = 1.0)]
    pub k_max: f64,

    /// Number of log-spaced wavenumbers.
    #[arg(long, default_value_t = 100)]
    pub k_points: usize,

    /// Minimum separation (Mpc/h).
    #[arg(long, default_value_t = 1.0)]
    pub r_min: f64,

    /// Maximum separation (Mpc/h).
    #[arg(long, default_value_t = 100.0)]
    pub r_max: f64,

    /// Number of linearly spaced separations.
    #[arg(long, default_value_t = 50)]
    pub r_points: usize,

    /// Label used in plot legends and export metadata.
    #[arg(long, default_value = "matter")]
    pub label: String,

    /// Render ASCII plots in the terminal (enabled by default).
    #[arg(long, default_value_t = true)]
    pub plot: bool,

    /// Disable the terminal plots.
    #[arg(long)]
    pub no_plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,

    /// Write SVG figures of both sweeps into the working directory.
    #[arg(long)]
    pub svg: bool,

    /// Export both sweeps to CSV.
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Export grids (model + method + both sweeps) to JSON.
    #[arg(long = "export-grids")]
    pub export_grids: Option<PathBuf>,

    /// Directory holding tabulated spectra (overrides COSMO_DATA_DIR).
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Directory for generated figures (overrides COSMO_WORK_DIR).
    #[arg(long)]
    pub work_dir: Option<PathBuf>,
}

/// Options for the void size function.
#[derive(Debug, Parser, Clone)]
pub struct SizeFunctionArgs {
    /// Cosmological parameter set.
    #[arg(short = 'm', long, value_enum, default_value_t = CosmologicalModel::Default)]
    pub model: CosmologicalModel,

    /// Size function flavour.
    #[arg(long, value_enum, default_value_t = SizeFunctionModel::Svdw)]
    pub sf_model: SizeFunctionModel,

    /// Void radius (Mpc/h).
    #[arg(short = 'r', long, default_value_t = 10.0)]
    pub radius: f64,

    /// Redshift of the evaluation.
    #[arg(short = 'z', long, default_value_t = 0.0)]
    pub redshift: f64,

    /// Redshift at which the density thresholds are evaluated.
    #[arg(long, default_value_t = 0.0)]
    pub threshold_redshift: f64,

    /// Directory holding tabulated spectra (overrides COSMO_DATA_DIR).
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Directory for generated output (overrides COSMO_WORK_DIR).
    #[arg(long)]
    pub work_dir: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spectrum_defaults_match_the_demo_sweeps() {
        let cli = Cli::parse_from(["cosmo", "spectrum"]);
        let Command::Spectrum(args) = cli.command else {
            panic!("expected spectrum subcommand");
        };
        assert_eq!(args.model, CosmologicalModel::Default);
        assert_eq!(args.method, PkMethod::EisensteinHu);
        assert!(!args.nonlinear);
        assert_eq!(args.redshift, 0.2);
        assert_eq!((args.k_min, args.k_max, args.k_points), (1e-3, 1.0, 100));
        assert_eq!((args.r_min, args.r_max, args.r_points), (1.0, 100.0, 50));
    }

    #[test]
    fn size_function_defaults_match_the_demo_call() {
        let cli = Cli::parse_from(["cosmo", "size-function"]);
        let Command::SizeFunction(args) = cli.command else {
            panic!("expected size-function subcommand");
        };
        assert_eq!(args.sf_model, SizeFunctionModel::Svdw);
        assert_eq!(args.radius, 10.0);
        assert_eq!(args.redshift, 0.0);
        assert_eq!(args.threshold_redshift, 0.0);
    }

    #[test]
    fn value_enums_parse_from_kebab_case() {
        let cli = Cli::parse_from([
            "cosmo",
            "spectrum",
            "--method",
            "camb",
            "--nonlinear",
            "-m",
            "planck18",
        ]);
        let Command::Spectrum(args) = cli.command else {
            panic!("expected spectrum subcommand");
        };
        assert_eq!(args.method, PkMethod::Camb);
        assert_eq!(args.model, CosmologicalModel::Planck18);
        assert!(args.nonlinear);
    }
}

//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - builds the strongly-typed run configuration
//! - runs the sweeps / evaluations
//! - prints reports and plots
//! - writes optional exports and figures

use clap::Parser;

use crate::cli::{Command, SizeFunctionArgs, SpectrumArgs};
use crate::domain::{Paths, SizeFunctionConfig, SpectrumConfig, linearity_label};
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `cosmo` binary.
pub fn run() -> Result<(), AppError> {
    let cli = crate::cli::Cli::parse();

    match cli.command {
        Command::Spectrum(args) => handle_spectrum(args),
        Command::SizeFunction(args) => handle_size_function(args),
    }
}

fn handle_spectrum(args: SpectrumArgs) -> Result<(), AppError> {
    let config = spectrum_config_from_args(&args);
    let output = pipeline::run_spectrum(&config)?;

    println!("{}", crate::report::format_spectrum_summary(&config, &output));

    let legend = format!(
        "{} {} ({}) z={}",
        config.label,
        config.method.display_name(),
        linearity_label(config.nonlinear),
        config.redshift
    );

    if config.plot {
        let pk_plot = crate::plot::render_loglog_ascii(
            &pairs(&output.k, &output.pk),
            "k [h/Mpc]",
            "P(k) [(Mpc/h)^3]",
            &legend,
            config.plot_width,
            config.plot_height,
        )?;
        println!("{pk_plot}");

        let xi_plot = crate::plot::render_loglog_ascii(
            &pairs(&output.r, &output.xi),
            "r [Mpc/h]",
            "xi(r)",
            &legend,
            config.plot_width,
            config.plot_height,
        )?;
        println!("{xi_plot}");
    }

    if config.svg {
        std::fs::create_dir_all(&config.paths.work_dir).map_err(|e| {
            AppError::config(format!(
                "cannot create working directory '{}': {e}",
                config.paths.work_dir.display()
            ))
        })?;

        let pk_path = crate::plot::figure_path(&config.paths.work_dir, &config.label, "pk");
        crate::plot::write_loglog_svg(
            &pk_path,
            &pairs(&output.k, &output.pk),
            "Dark matter power spectrum",
            "k [h/Mpc]",
            "P(k) [(Mpc/h)^3]",
            &legend,
        )?;
        println!("wrote {}", pk_path.display());

        let xi_path = crate::plot::figure_path(&config.paths.work_dir, &config.label, "xi");
        crate::plot::write_loglog_svg(
            &xi_path,
            &pairs(&output.r, &output.xi),
            "Dark matter two-point correlation function",
            "r [Mpc/h]",
            "xi(r)",
            &legend,
        )?;
        println!("wrote {}", xi_path.display());
    }

    // Optional exports.
    if let Some(path) = &config.export_results {
        crate::io::export::write_sweep_csv(path, &output)?;
        println!("wrote {}", path.display());
    }
    if let Some(path) = &config.export_grids {
        crate::io::export::write_grids_json(path, &config, &output)?;
        println!("wrote {}", path.display());
    }

    Ok(())
}

fn handle_size_function(args: SizeFunctionArgs) -> Result<(), AppError> {
    let config = size_function_config_from_args(&args);
    let output = pipeline::run_size_function(&config)?;

    println!(
        "{}",
        crate::report::format_size_function_line(&config, &output)
    );
    Ok(())
}

pub fn spectrum_config_from_args(args: &SpectrumArgs) -> SpectrumConfig {
    SpectrumConfig {
        model: args.model,
        method: args.method,
        nonlinear: args.nonlinear,
        redshift: args.redshift,
        k_min: args.k_min,
        k_max: args.k_max,
        k_points: args.k_points,
        r_min: args.r_min,
        r_max: args.r_max,
        r_points: args.r_points,
        label: args.label.clone(),
        plot: args.plot && !args.no_plot,
        plot_width: args.width,
        plot_height: args.height,
        svg: args.svg,
        export_results: args.export.clone(),
        export_grids: args.export_grids.clone(),
        paths: Paths::resolve(args.data_dir.clone(), args.work_dir.clone()),
    }
}

pub fn size_function_config_from_args(args: &SizeFunctionArgs) -> SizeFunctionConfig {
    SizeFunctionConfig {
        model: args.model,
        sf_model: args.sf_model,
        radius: args.radius,
        redshift: args.redshift,
        threshold_redshift: args.threshold_redshift,
        paths: Paths::resolve(args.data_dir.clone(), args.work_dir.clone()),
    }
}

fn pairs(x: &[f64], y: &[f64]) -> Vec<(f64, f64)> {
    x.iter().copied().zip(y.iter().copied()).collect()
}

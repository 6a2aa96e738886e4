//! Export sweep results to CSV and JSON.
//!
//! The CSV is long-format (`quantity,x,value`) so both sweeps fit one file
//! that is easy to consume in spreadsheets or downstream scripts; the JSON
//! grids file (`domain::GridsFile`) is the portable representation for
//! replotting or comparisons.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::app::pipeline::SpectrumOutput;
use crate::domain::{GridsFile, SpectrumConfig};
use crate::error::AppError;

/// Render the long-format CSV for both sweeps.
///
/// Row order follows grid order, so the file preserves the index alignment
/// of the sweeps.
pub fn format_sweep_csv(output: &SpectrumOutput) -> String {
    let mut out = String::new();
    out.push_str("quantity,x,value\n");
    for (k, pk) in output.k.iter().zip(&output.pk) {
        out.push_str(&format!("pk,{k:.10e},{pk:.10e}\n"));
    }
    for (r, xi) in output.r.iter().zip(&output.xi) {
        out.push_str(&format!("xi,{r:.10e},{xi:.10e}\n"));
    }
    out
}

/// Write the sweep CSV to `path`.
pub fn write_sweep_csv(path: &Path, output: &SpectrumOutput) -> Result<(), AppError> {
    let mut file = File::create(path).map_err(|e| {
        AppError::config(format!(
            "failed to create export CSV '{}': {e}",
            path.display()
        ))
    })?;
    file.write_all(format_sweep_csv(output).as_bytes())
        .map_err(|e| AppError::config(format!("failed to write export CSV: {e}")))?;
    Ok(())
}

/// Write the grids JSON to `path`.
pub fn write_grids_json(
    path: &Path,
    config: &SpectrumConfig,
    output: &SpectrumOutput,
) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| {
        AppError::config(format!(
            "failed to create grids JSON '{}': {e}",
            path.display()
        ))
    })?;

    let grids = GridsFile {
        tool: "cosmo".to_string(),
        model: config.model,
        method: config.method,
        nonlinear: config.nonlinear,
        redshift: config.redshift,
        label: config.label.clone(),
        k: output.k.clone(),
        pk: output.pk.clone(),
        r: output.r.clone(),
        xi: output.xi.clone(),
    };

    serde_json::to_writer_pretty(file, &grids)
        .map_err(|e| AppError::config(format!("failed to write grids JSON: {e}")))?;
    Ok(())
}

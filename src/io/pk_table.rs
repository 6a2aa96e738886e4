//! Tabulated power spectra.
//!
//! External Boltzmann codes (CAMB) are not shelled out to; instead their
//! output is consumed as plain two-column tables (`k  P(k)`, `#` comments
//! allowed) living under `<data_dir>/pk/`. The file name encodes method,
//! linearity and redshift, so a missing combination fails with the exact
//! path that was expected rather than a silently wrong spectrum.

use std::io::BufRead;
use std::path::{Path, PathBuf};

use crate::domain::{Paths, PkMethod, linearity_label};
use crate::error::AppError;
use crate::math::interp_loglog;

/// An in-memory tabulated spectrum, interpolated in log-log space.
#[derive(Debug, Clone)]
pub struct PkTable {
    path: PathBuf,
    k: Vec<f64>,
    pk: Vec<f64>,
}

impl PkTable {
    /// Expected file location for a method/linearity/redshift combination.
    pub fn table_path(paths: &Paths, method: PkMethod, nonlinear: bool, redshift: f64) -> PathBuf {
        paths.data_dir.join("pk").join(format!(
            "{}_{}_z{redshift:.2}.dat",
            method.table_stem(),
            linearity_label(nonlinear)
        ))
    }

    /// Load the table for the given combination from `data_dir`.
    pub fn load(
        paths: &Paths,
        method: PkMethod,
        nonlinear: bool,
        redshift: f64,
    ) -> Result<Self, AppError> {
        let path = Self::table_path(paths, method, nonlinear, redshift);
        let file = std::fs::File::open(&path).map_err(|e| {
            AppError::domain(format!(
                "no {} {} spectrum table at z = {redshift}: cannot open '{}': {e}",
                method.display_name(),
                linearity_label(nonlinear),
                path.display()
            ))
        })?;
        Self::parse(std::io::BufReader::new(file), &path)
    }

    /// Parse a two-column table from any reader.
    fn parse(reader: impl BufRead, path: &Path) -> Result<Self, AppError> {
        let mut k = Vec::new();
        let mut pk = Vec::new();

        for (lineno, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| {
                AppError::config(format!("failed reading '{}': {e}", path.display()))
            })?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut cols = line.split_whitespace();
            let (Some(kv), Some(pv)) = (cols.next(), cols.next()) else {
                return Err(AppError::config(format!(
                    "'{}' line {}: expected two columns (k, P)",
                    path.display(),
                    lineno + 1
                )));
            };
            let kv: f64 = kv.parse().map_err(|_| {
                AppError::config(format!(
                    "'{}' line {}: invalid wavenumber '{kv}'",
                    path.display(),
                    lineno + 1
                ))
            })?;
            let pv: f64 = pv.parse().map_err(|_| {
                AppError::config(format!(
                    "'{}' line {}: invalid power value '{pv}'",
                    path.display(),
                    lineno + 1
                ))
            })?;
            if !(kv.is_finite() && kv > 0.0 && pv.is_finite() && pv > 0.0) {
                return Err(AppError::config(format!(
                    "'{}' line {}: k and P must be positive and finite",
                    path.display(),
                    lineno + 1
                )));
            }
            if let Some(&prev) = k.last()
                && kv <= prev
            {
                return Err(AppError::config(format!(
                    "'{}' line {}: wavenumbers must be strictly increasing",
                    path.display(),
                    lineno + 1
                )));
            }
            k.push(kv);
            pk.push(pv);
        }

        if k.len() < 2 {
            return Err(AppError::config(format!(
                "'{}': spectrum table needs at least 2 rows",
                path.display()
            )));
        }

        Ok(Self {
            path: path.to_path_buf(),
            k,
            pk,
        })
    }

    /// Interpolated P(k); wavenumbers outside the table are an explicit error.
    pub fn pk(&self, k: f64) -> Result<f64, AppError> {
        interp_loglog(k, &self.k, &self.pk).map_err(|e| {
            AppError::new(
                e.exit_code(),
                format!("{e} (table '{}')", self.path.display()),
            )
        })
    }

    /// Tabulated k-range (h/Mpc).
    pub fn k_range(&self) -> (f64, f64) {
        (self.k[0], self.k[self.k.len() - 1])
    }
}

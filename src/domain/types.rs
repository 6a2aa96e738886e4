//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during sweeps
//! - exported to JSON/CSV
//! - reloaded later for plotting or comparisons

use std::path::PathBuf;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Named cosmological parameter presets.
///
/// `Default` reproduces the library's historical default parameter set; the
/// others are the published best-fit parameters of the named CMB analyses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum CosmologicalModel {
    Default,
    Planck15,
    Planck18,
    Wmap7,
    Wmap9,
}

impl CosmologicalModel {
    pub const ALL: [CosmologicalModel; 5] = [
        CosmologicalModel::Default,
        CosmologicalModel::Planck15,
        CosmologicalModel::Planck18,
        CosmologicalModel::Wmap7,
        CosmologicalModel::Wmap9,
    ];

    /// Human-readable label for terminal output.
    pub fn display_name(self) -> &'static str {
        match self {
            CosmologicalModel::Default => "default parameters",
            CosmologicalModel::Planck15 => "Planck 2015",
            CosmologicalModel::Planck18 => "Planck 2018",
            CosmologicalModel::Wmap7 => "WMAP 7-year",
            CosmologicalModel::Wmap9 => "WMAP 9-year",
        }
    }

    /// The parameter set selected by this preset.
    pub fn parameters(self) -> CosmologicalParameters {
        match self {
            CosmologicalModel::Default => CosmologicalParameters::default(),
            // Presets assume flatness, so ΩDE follows Ωm.
            CosmologicalModel::Planck15 => CosmologicalParameters {
                omega_matter: 0.3089,
                omega_baryon: 0.0486,
                omega_de: 1.0 - 0.3089,
                hh: 0.6774,
                n_spec: 0.9667,
                sigma8: 0.8159,
                ..CosmologicalParameters::default()
            },
            CosmologicalModel::Planck18 => CosmologicalParameters {
                omega_matter: 0.3153,
                omega_baryon: 0.0493,
                omega_de: 1.0 - 0.3153,
                hh: 0.6736,
                n_spec: 0.9649,
                sigma8: 0.8111,
                ..CosmologicalParameters::default()
            },
            CosmologicalModel::Wmap7 => CosmologicalParameters {
                omega_matter: 0.272,
                omega_baryon: 0.0455,
                omega_de: 1.0 - 0.272,
                hh: 0.702,
                n_spec: 0.961,
                sigma8: 0.807,
                ..CosmologicalParameters::default()
            },
            CosmologicalModel::Wmap9 => CosmologicalParameters {
                omega_matter: 0.2821,
                omega_baryon: 0.0463,
                omega_de: 1.0 - 0.2821,
                hh: 0.697,
                n_spec: 0.9646,
                sigma8: 0.817,
                ..CosmologicalParameters::default()
            },
        }
    }
}

impl FromStr for CosmologicalModel {
    type Err = AppError;

    /// Parse a model tag, failing fast on unrecognized names.
    ///
    /// Unknown tags are a hard error here rather than a silent fallback to
    /// defaults: a typo in a preset name must not masquerade as a valid run.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "default" => Ok(CosmologicalModel::Default),
            "planck15" => Ok(CosmologicalModel::Planck15),
            "planck18" => Ok(CosmologicalModel::Planck18),
            "wmap7" => Ok(CosmologicalModel::Wmap7),
            "wmap9" => Ok(CosmologicalModel::Wmap9),
            other => Err(AppError::domain(format!(
                "unknown cosmological model '{other}' (expected one of: default, planck15, planck18, wmap7, wmap9)"
            ))),
        }
    }
}

/// A fixed set of cosmological parameters.
///
/// Densities are present-day density parameters; `hh` is H0/100; the spectrum
/// is described by its tilt `n_spec` and normalization `sigma8`; `w0`/`wa`
/// are the CPL dark-energy equation-of-state coefficients.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CosmologicalParameters {
    pub omega_matter: f64,
    pub omega_baryon: f64,
    pub omega_radiation: f64,
    /// Curvature density; derived as 1 - Ωm - Ωr - ΩDE.
    pub omega_k: f64,
    pub omega_de: f64,
    pub hh: f64,
    pub n_spec: f64,
    pub sigma8: f64,
    pub w0: f64,
    pub wa: f64,
    /// CMB temperature in Kelvin (enters the transfer function).
    pub t_cmb: f64,
}

impl Default for CosmologicalParameters {
    fn default() -> Self {
        let omega_matter = 0.27;
        let omega_radiation = 0.0;
        let omega_de = 0.73;
        Self {
            omega_matter,
            omega_baryon: 0.046,
            omega_radiation,
            omega_k: 1.0 - omega_matter - omega_radiation - omega_de,
            omega_de,
            hh: 0.7,
            n_spec: 0.96,
            sigma8: 0.83,
            w0: -1.0,
            wa: 0.0,
            t_cmb: 2.726,
        }
    }
}

/// How the linear matter power spectrum is obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum PkMethod {
    /// Eisenstein & Hu (1998) analytic transfer function (built-in).
    EisensteinHu,
    /// Precomputed CAMB table read from `data_dir` (see `io::pk_table`).
    Camb,
}

impl PkMethod {
    /// Human-readable label for legends and summaries.
    pub fn display_name(self) -> &'static str {
        match self {
            PkMethod::EisensteinHu => "EisensteinHu",
            PkMethod::Camb => "CAMB",
        }
    }

    /// File-name stem for tabulated spectra.
    pub fn table_stem(self) -> &'static str {
        match self {
            PkMethod::EisensteinHu => "eisenstein_hu",
            PkMethod::Camb => "camb",
        }
    }
}

/// Theoretical void size-function convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SizeFunctionModel {
    /// Count voids at their linear-theory radius.
    Linear,
    /// Sheth & van de Weygaert: voids expand by (1+δv_NL)^(-1/3) ≈ 1.7.
    Svdw,
    /// Volume-conserving variant of SvdW (Jennings, Li & Hu 2013).
    Vdn,
}

impl SizeFunctionModel {
    pub fn display_name(self) -> &'static str {
        match self {
            SizeFunctionModel::Linear => "linear",
            SizeFunctionModel::Svdw => "SvdW",
            SizeFunctionModel::Vdn => "Vdn",
        }
    }
}

/// Label for the linear/nonlinear flag, used in legends and table names.
pub fn linearity_label(nonlinear: bool) -> &'static str {
    if nonlinear { "nonlinear" } else { "linear" }
}

/// Explicit directory configuration.
///
/// The two directories the original scripts installed as process-global state
/// are an ordinary value here, passed into the `Cosmology` constructor:
///
/// - `data_dir`: where tabulated-spectrum resource files live
/// - `work_dir`: where plots and exports are written
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paths {
    pub data_dir: PathBuf,
    pub work_dir: PathBuf,
}

impl Paths {
    pub fn new(data_dir: impl Into<PathBuf>, work_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            work_dir: work_dir.into(),
        }
    }

    /// Resolve directories from CLI flags with environment fallback.
    ///
    /// Flags win over `COSMO_DATA_DIR` / `COSMO_WORK_DIR`; both default to the
    /// current directory. Invalid paths are not checked here; the first
    /// operation that actually needs the directory reports the error.
    pub fn resolve(data_dir: Option<PathBuf>, work_dir: Option<PathBuf>) -> Self {
        dotenvy::dotenv().ok();
        let data_dir = data_dir
            .or_else(|| std::env::var_os("COSMO_DATA_DIR").map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from("."));
        let work_dir = work_dir
            .or_else(|| std::env::var_os("COSMO_WORK_DIR").map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from("."));
        Self { data_dir, work_dir }
    }
}

impl Default for Paths {
    fn default() -> Self {
        Self::new(".", ".")
    }
}

/// Configuration of a `cosmo spectrum` run.
#[derive(Debug, Clone)]
pub struct SpectrumConfig {
    pub model: CosmologicalModel,
    pub method: PkMethod,
    pub nonlinear: bool,
    pub redshift: f64,

    pub k_min: f64,
    pub k_max: f64,
    pub k_points: usize,

    pub r_min: f64,
    pub r_max: f64,
    pub r_points: usize,

    /// Free-form label carried into legends and exports.
    pub label: String,

    pub plot: bool,
    pub plot_width: usize,
    pub plot_height: usize,
    /// Write SVG figures into `work_dir` when set.
    pub svg: bool,

    pub export_results: Option<PathBuf>,
    pub export_grids: Option<PathBuf>,

    pub paths: Paths,
}

/// Configuration of a `cosmo size-function` run.
#[derive(Debug, Clone)]
pub struct SizeFunctionConfig {
    pub model: CosmologicalModel,
    pub sf_model: SizeFunctionModel,
    /// Effective void radius in Mpc/h.
    pub radius: f64,
    pub redshift: f64,
    /// Redshift at which the overdensity threshold δc is evaluated.
    ///
    /// The original example hardcodes 0 here regardless of the void redshift;
    /// we keep that as the default but expose it as a parameter.
    pub threshold_redshift: f64,
    pub paths: Paths,
}

/// A saved grids file (JSON): both sweeps plus enough metadata to replot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridsFile {
    pub tool: String,
    pub model: CosmologicalModel,
    pub method: PkMethod,
    pub nonlinear: bool,
    pub redshift: f64,
    pub label: String,
    pub k: Vec<f64>,
    pub pk: Vec<f64>,
    pub r: Vec<f64>,
    pub xi: Vec<f64>,
}

//! Plot rendering.
//!
//! - `ascii`: deterministic log-log terminal plots (quick sanity checks)
//! - `svg`: Plotters-backed log-log figures written into `work_dir`

pub mod ascii;
pub mod svg;

pub use ascii::*;
pub use svg::*;

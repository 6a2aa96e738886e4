//! Input/output helpers.
//!
//! - tabulated power spectra read from `data_dir` (`pk_table`)
//! - sweep exports (CSV, grids JSON) written to user-chosen paths (`export`)

pub mod export;
pub mod pk_table;

pub use export::*;
pub use pk_table::*;

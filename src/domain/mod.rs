//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - input configuration enums (`CosmologicalModel`, `PkMethod`, `SizeFunctionModel`)
//! - the explicit path configuration (`Paths`)
//! - per-run configuration structs (`SpectrumConfig`, `SizeFunctionConfig`)
//! - the exported grids schema (`GridsFile`)

pub mod types;

pub use types::*;

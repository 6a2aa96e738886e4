//! Mathematical utilities: sweep grids and table interpolation.

pub mod grid;
pub mod interp;

pub use grid::*;
pub use interp::*;

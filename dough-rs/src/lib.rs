//! The base `dough-rs` crate: everything needed to describe and evaluate placements of items
//! on a one-dimensional strip carrying point defects.

/// Entities to model the strip, its defects, the items and their placements
pub mod entities;

/// Validity and fitness computation of placements and solutions
pub mod eval;

/// Importing problem instances into and exporting solutions out of this library
pub mod io;

/// Helper functions which do not belong to any specific module
pub mod util;

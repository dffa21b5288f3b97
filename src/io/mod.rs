//! I/O helpers for exporting panel data.

pub mod csv;

pub use csv::*;

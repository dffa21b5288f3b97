#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![warn(clippy::all, clippy::cargo, clippy::nursery, missing_docs)]
#![doc = include_str!("../README.md")]

/// Fundamental physical constants and unit prefixes.
pub mod constants;
/// Shared mathematical utilities (vectors, differentiation, projection).
pub mod math;
/// Electrostatic and magnetostatic field formulas and sampling meshes.
pub mod fields;
/// Lumped components and the series RLC solver.
pub mod circuits;
/// Waveguide modes and fiber ray tracing.
pub mod waves;
/// Sample spacing builders and post-processing helpers.
pub mod sweep;
/// Per-topic parameters and scene computation.
pub mod panels;
/// SVG rendering of every scene.
pub mod render;
/// CSV export of every scene.
pub mod io;
/// Sections, topics and the dispatch shell.
pub mod simulation;
/// Layered configuration.
pub mod config;
/// Error types shared between modules.
pub mod errors;

/// Common exports for downstream crates.
pub mod prelude;

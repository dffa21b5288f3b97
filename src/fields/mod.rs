//! Electrostatic and magnetostatic field formulas and the meshes they are sampled on.

mod conductor;
mod electrostatic;
mod grid;
mod loop_field;
mod magnetic;
mod ring;

pub use conductor::ConductingSphere;
pub use electrostatic::{
    coulomb_force, electric_field_from_point_charges, potential_from_point_charges, PointCharge,
};
pub use grid::{Grid2, ScalarField2, VectorField2};
pub use loop_field::{ellipe, ellipk, trace_field_line, CurrentLoop, FieldLine};
pub use magnetic::{
    flux_density_from_wires, infinite_wire_flux_density, magnetic_field_segment,
    magnetic_field_segment_exact, InfiniteWire, LineCurrent, WireSegment3D,
};
pub use ring::{dipole_torque, SinusoidalRing};

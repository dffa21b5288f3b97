//! Convenience re-exports for driving the lab from code.

pub use crate::circuits::{
    Capacitor, Characteristics, Component, DampingRegime, Excitation, ExcitationKind, Inductor,
    Resistor, SeriesNetwork, SeriesRlc,
};
pub use crate::config::{LabConfig, OutputConfig};
pub use crate::constants::*;
pub use crate::errors::{EmLabError, ParameterError};
pub use crate::fields::{
    coulomb_force, electric_field_from_point_charges, potential_from_point_charges, ConductingSphere,
    CurrentLoop, Grid2, InfiniteWire, LineCurrent, PointCharge, ScalarField2, SinusoidalRing,
    VectorField2,
};
pub use crate::math::{Scalar, R2, R3};
pub use crate::panels::{PanelParams, Slider};
pub use crate::simulation::{run_all, run_topic, PanelReport, Section, SimulationError, Topic};
pub use crate::sweep::{linspace, logspace_hz};
pub use crate::waves::{ModeKind, RectangularWaveguide, StepIndexFiber, WaveguideMode};

//! Guided waves: rectangular metallic waveguides and step-index optical fibers.

mod fiber;
mod waveguide;

pub use fiber::{
    acceptance_angle_deg, critical_angle_deg, numerical_aperture, RayPath, StepIndexFiber,
    Termination,
};
pub use waveguide::{Guidance, ModeKind, RectangularWaveguide, TransverseFields, WaveguideMode};

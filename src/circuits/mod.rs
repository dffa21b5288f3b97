//! Lumped circuit components and the series RLC solver.

/// Lumped component definitions and traits.
pub mod component;
/// Series composition of components.
pub mod network;
/// Fixed-step ODE integration.
pub mod ode;
/// Series RLC transient and frequency response.
pub mod rlc;

pub use component::{Capacitor, Component, Inductor, Resistor};
pub use network::SeriesNetwork;
pub use ode::{OdeSystem, RungeKuttaFourthOrder, State2};
pub use rlc::{
    Characteristics, DampingRegime, Excitation, ExcitationKind, FrequencyResponse, SeriesRlc,
    TransientResponse,
};

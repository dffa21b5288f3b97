//! Torque on a ring with a sinusoidal charge density in a uniform field.

use serde::{Deserialize, Serialize};

use crate::fields::{dipole_torque, SinusoidalRing};
use crate::math::{Scalar, R3};
use crate::sweep::linspace;

use super::{slider, PanelParams, Slider};

/// Number of samples drawn on the ring.
pub const RING_SAMPLES: usize = 100;
/// Tail x-coordinate of the uniform-field arrows (m).
const FIELD_TAIL_X: Scalar = -1.0;
/// Half-width of the field arrow lattice in y and z (m).
const FIELD_SPAN: Scalar = 0.75;

/// Ring radius, charge amplitude and applied field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RingTorqueParams {
    /// Ring radius (m).
    pub radius: Scalar,
    /// Charge density amplitude λ0 (C/m).
    pub lambda0: Scalar,
    /// Applied field along x̂ (N/C).
    pub field: Scalar,
}

impl Default for RingTorqueParams {
    fn default() -> Self {
        Self {
            radius: 0.1,
            lambda0: 1.0,
            field: 0.5,
        }
    }
}

impl PanelParams for RingTorqueParams {
    const SLIDERS: &'static [Slider] = &[
        slider("radius", "Ring radius", "m", (0.05, 0.5), 0.1, 0.01),
        slider("lambda0", "Charge amplitude λ0", "C/m", (0.1, 5.0), 1.0, 0.1),
        slider("field", "External field", "N/C", (0.1, 2.0), 0.5, 0.1),
    ];

    fn slider_values(&self) -> Vec<Scalar> {
        vec![self.radius, self.lambda0, self.field]
    }
}

/// Ring samples, dipole, torque and the applied-field lattice.
#[derive(Debug, Clone)]
pub struct RingTorqueScene {
    /// The ring.
    pub ring: SinusoidalRing,
    /// Sample points with their charge density.
    pub samples: Vec<(R3, Scalar)>,
    /// Applied field (N/C).
    pub field: R3,
    /// Closed-form dipole moment (C·m).
    pub dipole: R3,
    /// Dipole moment by quadrature (C·m).
    pub dipole_numeric: R3,
    /// Torque `p × E` (N·m).
    pub torque: R3,
    /// Tail and display vector of each uniform-field arrow.
    pub field_arrows: Vec<(R3, R3)>,
}

/// Builds the ring and evaluates its dipole torque.
#[must_use]
pub fn compute(p: &RingTorqueParams) -> RingTorqueScene {
    let ring = SinusoidalRing::new(p.radius, p.lambda0);
    let field = R3::new(p.field, 0.0, 0.0);
    let dipole = ring.dipole_moment();
    let dipole_numeric = ring.dipole_moment_numeric(RING_SAMPLES);
    let torque = dipole_torque(dipole, field);

    let offsets = linspace(-FIELD_SPAN, FIELD_SPAN, 5);
    let field_arrows = offsets
        .iter()
        .flat_map(|&y| offsets.iter().map(move |&z| (y, z)))
        .map(|(y, z)| (R3::new(FIELD_TAIL_X, y, z), R3::new(p.radius, 0.0, 0.0)))
        .collect();

    log::debug!(
        "ring torque: p = {:.4e} C·m, tau_z = {:.4e} N·m, quadrature error {:.2e}",
        dipole.y,
        torque.z,
        (dipole_numeric - dipole).norm()
    );

    RingTorqueScene {
        ring,
        samples: ring.sample(RING_SAMPLES),
        field,
        dipole,
        dipole_numeric,
        torque,
        field_arrows,
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::PI;

    use approx::assert_relative_eq;

    use super::*;
    use crate::panels::test_support::assert_defaults_match_sliders;

    #[test]
    fn defaults_match_sliders() {
        assert_defaults_match_sliders::<RingTorqueParams>();
    }

    #[test]
    fn torque_points_down_z() {
        let scene = compute(&RingTorqueParams::default());
        let p_y = PI * 1.0 * 0.01;
        assert_relative_eq!(scene.dipole.y, p_y, max_relative = 1e-12);
        assert_relative_eq!(scene.torque.z, -p_y * 0.5, max_relative = 1e-12);
        assert_relative_eq!(scene.torque.x, 0.0);
        assert_relative_eq!(scene.torque.y, 0.0);
    }

    #[test]
    fn quadrature_dipole_matches_closed_form() {
        let scene = compute(&RingTorqueParams { radius: 0.3, lambda0: 2.5, field: 1.0 });
        assert_relative_eq!((scene.dipole_numeric - scene.dipole).norm(), 0.0, epsilon = 1e-12);
        assert_eq!(scene.samples.len(), RING_SAMPLES);
        assert_eq!(scene.field_arrows.len(), 25);
    }
}

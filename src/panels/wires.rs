//! Two long parallel wires perpendicular to the plane.

use serde::{Deserialize, Serialize};

use crate::constants::TESLA_TO_MICROTESLA;
use crate::fields::{flux_density_from_wires, Grid2, InfiniteWire, VectorField2};
use crate::math::{Scalar, R2};

use super::{slider, PanelParams, Slider};

/// Separation and the two currents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WiresParams {
    /// Distance between the wires (m).
    pub separation: Scalar,
    /// Current in the left wire (A), positive out of the plane.
    pub current1: Scalar,
    /// Current in the right wire (A).
    pub current2: Scalar,
}

impl Default for WiresParams {
    fn default() -> Self {
        Self {
            separation: 1.0,
            current1: 1.0,
            current2: 1.0,
        }
    }
}

impl PanelParams for WiresParams {
    const SLIDERS: &'static [Slider] = &[
        slider("separation", "Wire separation", "m", (0.5, 3.0), 1.0, 0.1),
        slider("current1", "Current 1", "A", (-5.0, 5.0), 1.0, 0.1),
        slider("current2", "Current 2", "A", (-5.0, 5.0), 1.0, 0.1),
    ];

    fn slider_values(&self) -> Vec<Scalar> {
        vec![self.separation, self.current1, self.current2]
    }
}

/// Superposed flux density of the pair.
#[derive(Debug, Clone)]
pub struct WiresScene {
    /// Left and right wire.
    pub wires: [InfiniteWire; 2],
    /// Flux density (μT) on a 20×20 mesh over `[-2, 2] × [-1.5, 1.5]`.
    pub field: VectorField2,
}

/// Evaluates the superposed field.
#[must_use]
pub fn compute(p: &WiresParams) -> WiresScene {
    let half = 0.5 * p.separation;
    let wires = [
        InfiniteWire::new(R2::new(-half, 0.0), p.current1),
        InfiniteWire::new(R2::new(half, 0.0), p.current2),
    ];
    let field = Grid2::new((-2.0, 2.0), (-1.5, 1.5), 20, 20)
        .map_vector(|q| flux_density_from_wires(q, &wires) * TESLA_TO_MICROTESLA);
    log::debug!(
        "wires: d = {} m, I1 = {} A, I2 = {} A",
        p.separation,
        p.current1,
        p.current2
    );
    WiresScene { wires, field }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::fields::infinite_wire_flux_density;
    use crate::panels::test_support::assert_defaults_match_sliders;

    #[test]
    fn defaults_match_sliders() {
        assert_defaults_match_sliders::<WiresParams>();
    }

    #[test]
    fn field_is_reported_in_microtesla() {
        let scene = compute(&WiresParams { separation: 3.0, current1: 2.0, current2: 0.0 });
        // corner (-2, -1.5) against the left wire at (-1.5, 0)
        let k = scene.field.grid.index(0, 0);
        let rho = 0.5f64.hypot(1.5);
        assert_relative_eq!(
            scene.field.vector(k).norm(),
            infinite_wire_flux_density(2.0, rho) * 1.0e6,
            max_relative = 1e-8
        );
    }
}

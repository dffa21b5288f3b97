//! Force between two point charges in the plane.

use serde::{Deserialize, Serialize};

use crate::constants::MICRO;
use crate::fields::{coulomb_force, PointCharge};
use crate::math::{Scalar, R3};

use super::{slider, PanelParams, Slider};

/// Display length of a force arrow per newton (m/N).
pub const ARROW_SCALE: Scalar = 10.0;

/// Charges in μC and positions in meters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoulombParams {
    /// First charge (μC).
    pub q1: Scalar,
    /// First charge x (m).
    pub x1: Scalar,
    /// First charge y (m).
    pub y1: Scalar,
    /// Second charge (μC).
    pub q2: Scalar,
    /// Second charge x (m).
    pub x2: Scalar,
    /// Second charge y (m).
    pub y2: Scalar,
}

impl Default for CoulombParams {
    fn default() -> Self {
        Self {
            q1: 1.0,
            x1: -2.0,
            y1: 0.0,
            q2: -1.0,
            x2: 2.0,
            y2: 0.0,
        }
    }
}

impl PanelParams for CoulombParams {
    const SLIDERS: &'static [Slider] = &[
        slider("q1", "Charge 1", "μC", (-5.0, 5.0), 1.0, 0.1),
        slider("x1", "Charge 1 x", "m", (-4.5, 4.5), -2.0, 0.1),
        slider("y1", "Charge 1 y", "m", (-4.5, 4.5), 0.0, 0.1),
        slider("q2", "Charge 2", "μC", (-5.0, 5.0), -1.0, 0.1),
        slider("x2", "Charge 2 x", "m", (-4.5, 4.5), 2.0, 0.1),
        slider("y2", "Charge 2 y", "m", (-4.5, 4.5), 0.0, 0.1),
    ];

    fn slider_values(&self) -> Vec<Scalar> {
        vec![self.q1, self.x1, self.y1, self.q2, self.x2, self.y2]
    }
}

/// Two charges and the force on each.
#[derive(Debug, Clone)]
pub struct CoulombScene {
    /// The charges in SI units.
    pub charges: [PointCharge; 2],
    /// Force on each charge (N).
    pub forces: [R3; 2],
    /// Separation (m).
    pub distance: Scalar,
}

impl CoulombScene {
    /// Common force magnitude (N).
    #[must_use]
    pub fn magnitude(&self) -> Scalar {
        self.forces[0].norm()
    }

    /// Whether the charges repel.
    #[must_use]
    pub fn repulsive(&self) -> bool {
        self.charges[0].charge_c * self.charges[1].charge_c > 0.0
    }
}

/// Evaluates Coulomb's law for the configured pair.
#[must_use]
pub fn compute(p: &CoulombParams) -> CoulombScene {
    let first = PointCharge::new(R3::new(p.x1, p.y1, 0.0), p.q1 * MICRO);
    let second = PointCharge::new(R3::new(p.x2, p.y2, 0.0), p.q2 * MICRO);
    let force = coulomb_force(&first, &second);
    let distance = (first.position - second.position).norm();
    if distance == 0.0 {
        log::warn!("coulomb: charges coincide, force set to zero");
    }
    log::debug!("coulomb: |F| = {:.4e} N at r = {distance:.3} m", force.norm());
    CoulombScene {
        charges: [first, second],
        forces: [force, -force],
        distance,
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::constants::COULOMB_CONSTANT;
    use crate::panels::test_support::assert_defaults_match_sliders;

    #[test]
    fn defaults_match_sliders() {
        assert_defaults_match_sliders::<CoulombParams>();
    }

    #[test]
    fn default_pair_attracts() {
        let scene = compute(&CoulombParams::default());
        assert!(!scene.repulsive());
        assert!(scene.forces[0].x > 0.0);
        assert_relative_eq!((scene.forces[0] + scene.forces[1]).norm(), 0.0);
        assert_relative_eq!(
            scene.magnitude(),
            COULOMB_CONSTANT * 1.0e-12 / 16.0,
            max_relative = 1e-12
        );
    }

    #[test]
    fn coincident_charges_feel_no_force() {
        let p = CoulombParams { x2: -2.0, ..CoulombParams::default() };
        let scene = compute(&p);
        assert_eq!(scene.magnitude(), 0.0);
    }
}

//! Ray bouncing along a step-index optical fiber.

use serde::{Deserialize, Serialize};

use crate::math::Scalar;
use crate::waves::{acceptance_angle_deg, numerical_aperture, RayPath, StepIndexFiber, Termination};

use super::{slider, PanelParams, Slider};

/// Wall hits followed before the trace gives up.
pub const MAX_HITS: usize = 20;

/// Refractive indices, launch angle and geometry in micrometers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FiberParams {
    /// Core index n1.
    pub n_core: Scalar,
    /// Cladding index n2.
    pub n_cladding: Scalar,
    /// Launch angle from the fiber axis (degrees).
    pub angle_deg: Scalar,
    /// Core radius (μm).
    pub core_radius_um: Scalar,
    /// Fiber length (μm).
    pub length_um: Scalar,
}

impl Default for FiberParams {
    fn default() -> Self {
        Self {
            n_core: 1.5,
            n_cladding: 1.4,
            angle_deg: 45.0,
            core_radius_um: 5.0,
            length_um: 20.0,
        }
    }
}

impl PanelParams for FiberParams {
    const SLIDERS: &'static [Slider] = &[
        slider("n_core", "Core index n1", "", (1.4, 1.6), 1.5, 0.01),
        slider("n_cladding", "Cladding index n2", "", (1.3, 1.5), 1.4, 0.01),
        slider("angle_deg", "Launch angle", "°", (0.0, 89.0), 45.0, 1.0),
        slider("core_radius_um", "Core radius", "μm", (3.0, 8.0), 5.0, 0.5),
        slider("length_um", "Fiber length", "μm", (10.0, 30.0), 20.0, 2.0),
    ];

    fn slider_values(&self) -> Vec<Scalar> {
        vec![
            self.n_core,
            self.n_cladding,
            self.angle_deg,
            self.core_radius_um,
            self.length_um,
        ]
    }
}

/// Traced ray and the fiber's acceptance figures.
#[derive(Debug, Clone)]
pub struct FiberScene {
    /// Fiber geometry in μm.
    pub fiber: StepIndexFiber,
    /// Launch angle (degrees).
    pub angle_deg: Scalar,
    /// Traced ray.
    pub path: RayPath,
    /// Critical angle (degrees).
    pub critical_angle_deg: Scalar,
    /// Numerical aperture.
    pub numerical_aperture: Scalar,
    /// Acceptance half-angle from air (degrees).
    pub acceptance_angle_deg: Scalar,
}

impl FiberScene {
    /// Whether every wall hit reflected totally.
    #[must_use]
    pub fn confined(&self) -> bool {
        self.path.termination != Termination::Refracted
    }
}

/// Traces the configured ray.
#[must_use]
pub fn compute(p: &FiberParams) -> FiberScene {
    let fiber = StepIndexFiber {
        n_core: p.n_core,
        n_cladding: p.n_cladding,
        core_radius: p.core_radius_um,
        length: p.length_um,
    };
    if p.n_core <= p.n_cladding {
        log::warn!("fiber: core index {} does not exceed cladding {}", p.n_core, p.n_cladding);
    }
    let path = fiber.trace(p.angle_deg, MAX_HITS);
    log::debug!(
        "fiber: {} reflections, {:?}",
        path.reflections.len(),
        path.termination
    );
    FiberScene {
        fiber,
        angle_deg: p.angle_deg,
        critical_angle_deg: fiber.critical_angle_deg(),
        numerical_aperture: numerical_aperture(p.n_core, p.n_cladding),
        acceptance_angle_deg: acceptance_angle_deg(p.n_core, p.n_cladding),
        path,
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::panels::test_support::assert_defaults_match_sliders;

    #[test]
    fn defaults_match_sliders() {
        assert_defaults_match_sliders::<FiberParams>();
    }

    #[test]
    fn default_launch_escapes() {
        let scene = compute(&FiberParams::default());
        assert!(!scene.confined());
        assert_relative_eq!(scene.critical_angle_deg, 68.9605, epsilon = 1e-3);
        assert_relative_eq!(scene.numerical_aperture, 0.29f64.sqrt(), max_relative = 1e-12);
    }

    #[test]
    fn shallow_launch_escapes() {
        let scene = compute(&FiberParams { angle_deg: 10.0, ..Default::default() });
        assert!(!scene.confined());
        assert_eq!(scene.path.termination, Termination::Refracted);
    }

    #[test]
    fn launch_above_critical_angle_is_reflected() {
        for angle_deg in [70.0, 80.0, 89.0] {
            let scene = compute(&FiberParams { angle_deg, ..Default::default() });
            assert_ne!(scene.path.termination, Termination::Refracted, "{angle_deg}°");
            assert!(scene.confined());
            assert!(!scene.path.reflections.is_empty());
        }
    }
}

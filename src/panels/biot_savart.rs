//! Biot-Savart field around a finite straight wire along z.

use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};

use crate::fields::{
    infinite_wire_flux_density, magnetic_field_segment, magnetic_field_segment_exact,
    LineCurrent, WireSegment3D,
};
use crate::math::{normalize_or_zero, Scalar, R3};
use crate::sweep::linspace;

use super::{slider, PanelParams, Slider};

/// Current elements along the wire.
pub const SEGMENTS: usize = 30;
/// Compass needle position (m).
pub const NEEDLE_POSITION: [Scalar; 3] = [2.5, 2.5, 0.0];

/// Current and wire length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BiotSavartParams {
    /// Current along +z (A).
    pub current: Scalar,
    /// Wire length (m).
    pub length: Scalar,
}

impl Default for BiotSavartParams {
    fn default() -> Self {
        Self {
            current: 1.0,
            length: 10.0,
        }
    }
}

impl PanelParams for BiotSavartParams {
    const SLIDERS: &'static [Slider] = &[
        slider("current", "Current", "A", (0.1, 5.0), 1.0, 0.1),
        slider("length", "Wire length", "m", (5.0, 20.0), 10.0, 1.0),
    ];

    fn slider_values(&self) -> Vec<Scalar> {
        vec![self.current, self.length]
    }
}

/// Field sample on the observation ring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    /// Observation point (m).
    pub position: R3,
    /// Flux density (T).
    pub field: R3,
    /// Unit direction of the field, zero where it vanishes.
    pub direction: R3,
}

/// Radial profile in the mid-plane comparing three models of the field magnitude.
#[derive(Debug, Clone, Default)]
pub struct RadialProfile {
    /// Distance from the wire (m).
    pub rho: Vec<Scalar>,
    /// Discretized Biot-Savart sum (T).
    pub discrete: Vec<Scalar>,
    /// Closed-form finite segment (T).
    pub exact: Vec<Scalar>,
    /// Infinite wire `μ0 I / 2πρ` (T).
    pub infinite: Vec<Scalar>,
}

/// Wire, observation ring, compass and radial profile.
#[derive(Debug, Clone)]
pub struct BiotSavartScene {
    /// The wire carrying the current.
    pub line: LineCurrent,
    /// 12 angles × 3 radii at z = 0.
    pub observations: Vec<Observation>,
    /// Compass position (m).
    pub needle_position: R3,
    /// Unit direction the needle points (+x when the field vanishes).
    pub needle_direction: R3,
    /// Field magnitude versus distance.
    pub profile: RadialProfile,
}

/// Sums the current elements at every observation point.
#[must_use]
pub fn compute(p: &BiotSavartParams) -> BiotSavartScene {
    let line = LineCurrent {
        segment: WireSegment3D::along_z(p.length),
        current: p.current,
    };

    let mut observations = Vec::with_capacity(36);
    for theta in linspace(0.0, TAU, 12) {
        let (s, c) = theta.sin_cos();
        for r in linspace(0.5, 3.0, 3) {
            let position = R3::new(r * c, r * s, 0.0);
            let field = magnetic_field_segment(position, &line, SEGMENTS);
            observations.push(Observation {
                position,
                field,
                direction: normalize_or_zero(field),
            });
        }
    }

    let needle_position = R3::from(NEEDLE_POSITION);
    let needle_field = magnetic_field_segment(needle_position, &line, SEGMENTS);
    let needle_direction = if needle_field.norm() > 0.0 {
        needle_field.normalize()
    } else {
        log::warn!("biot-savart: field vanishes at the compass, pointing it along +x");
        R3::x()
    };

    let rho = linspace(0.25, 4.0, 60);
    let mut profile = RadialProfile {
        rho: rho.clone(),
        ..RadialProfile::default()
    };
    for &r in &rho {
        let point = R3::new(r, 0.0, 0.0);
        profile.discrete.push(magnetic_field_segment(point, &line, SEGMENTS).norm());
        profile.exact.push(magnetic_field_segment_exact(point, &line).norm());
        profile.infinite.push(infinite_wire_flux_density(p.current, r));
    }

    log::debug!(
        "biot-savart: I = {} A, L = {} m, |B| at needle = {:.4e} T",
        p.current,
        p.length,
        needle_field.norm()
    );

    BiotSavartScene {
        line,
        observations,
        needle_position,
        needle_direction,
        profile,
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::panels::test_support::assert_defaults_match_sliders;

    #[test]
    fn defaults_match_sliders() {
        assert_defaults_match_sliders::<BiotSavartParams>();
    }

    #[test]
    fn field_circulates_around_the_wire() {
        let scene = compute(&BiotSavartParams::default());
        assert_eq!(scene.observations.len(), 36);
        for obs in &scene.observations {
            let radial = R3::new(obs.position.x, obs.position.y, 0.0).normalize();
            assert!(obs.direction.dot(&radial).abs() < 1e-12);
            assert!(obs.direction.z.abs() < 1e-12);
            // right-hand rule about +z
            assert!(radial.cross(&obs.direction).z > 0.0);
        }
        assert_relative_eq!(scene.needle_direction.norm(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn coarse_sum_converges_away_from_the_wire() {
        let scene = compute(&BiotSavartParams { current: 2.0, length: 20.0 });
        let prof = &scene.profile;
        for k in 0..prof.rho.len() {
            assert!(prof.exact[k] <= prof.infinite[k]);
            if prof.rho[k] >= 1.0 {
                assert_relative_eq!(prof.discrete[k], prof.exact[k], max_relative = 1e-3);
            }
        }
        // 30 elements cannot resolve the field 0.25 m from a 20 m wire
        assert!(prof.discrete[0] < 0.9 * prof.exact[0]);
    }
}

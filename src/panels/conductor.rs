//! Grounded conducting sphere in a uniform field, x–z section.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::fields::{ConductingSphere, Grid2, ScalarField2, VectorField2};
use crate::math::{Scalar, R2, R3};
use crate::sweep::linspace;

use super::{slider, PanelParams, Slider};

/// Half-width of the plotted square (m).
pub const EXTENT: Scalar = 3.0;
/// Samples per axis.
pub const GRID_SIZE: usize = 50;

/// Sphere radius and applied field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConductorParams {
    /// Sphere radius (m).
    pub radius: Scalar,
    /// Applied field along +z (V/m).
    pub field: Scalar,
}

impl Default for ConductorParams {
    fn default() -> Self {
        Self {
            radius: 1.0,
            field: 1.0,
        }
    }
}

impl PanelParams for ConductorParams {
    const SLIDERS: &'static [Slider] = &[
        slider("radius", "Sphere radius", "m", (0.5, 2.0), 1.0, 0.1),
        slider("field", "External field", "V/m", (0.1, 5.0), 1.0, 0.1),
    ];

    fn slider_values(&self) -> Vec<Scalar> {
        vec![self.radius, self.field]
    }
}

/// Potential map, field and induced surface charge.
#[derive(Debug, Clone)]
pub struct ConductorScene {
    /// The configuration.
    pub sphere: ConductingSphere,
    /// Potential (V) over the x–z plane; rows are z.
    pub potential: ScalarField2,
    /// In-plane field `(E_x, E_z)` (V/m).
    pub field: VectorField2,
    /// Equipotential levels `linspace(-2.5 E0, 2.5 E0, 20)`.
    pub levels: Vec<Scalar>,
    /// Polar angles for the surface charge profile (rad).
    pub theta: Vec<Scalar>,
    /// Surface charge density at each angle (C/m²).
    pub surface_charge: Vec<Scalar>,
}

impl ConductorScene {
    /// Peak `|σ|`, reached at the poles (C/m²).
    #[must_use]
    pub fn peak_surface_charge(&self) -> Scalar {
        self.sphere.surface_charge_density(0.0).abs()
    }
}

/// Evaluates the analytic solution on a 50×50 mesh over `[-3, 3]²`.
#[must_use]
pub fn compute(p: &ConductorParams) -> ConductorScene {
    let sphere = ConductingSphere::new(p.radius, p.field);
    let grid = Grid2::square(-EXTENT, EXTENT, GRID_SIZE);
    let potential = grid.map_scalar(|q| sphere.potential(R3::new(q.x, 0.0, q.y)));
    let field = grid.map_vector(|q| {
        let e = sphere.electric_field(R3::new(q.x, 0.0, q.y));
        R2::new(e.x, e.z)
    });
    let theta = linspace(0.0, PI, 91);
    let surface_charge = theta.iter().map(|&t| sphere.surface_charge_density(t)).collect();
    log::debug!("conductor: R = {} m, E0 = {} V/m", p.radius, p.field);
    ConductorScene {
        sphere,
        potential,
        field,
        levels: linspace(-2.5 * p.field, 2.5 * p.field, 20),
        theta,
        surface_charge,
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::constants::VACUUM_PERMITTIVITY;
    use crate::panels::test_support::assert_defaults_match_sliders;

    #[test]
    fn defaults_match_sliders() {
        assert_defaults_match_sliders::<ConductorParams>();
    }

    #[test]
    fn inside_is_equipotential_and_field_free() {
        let scene = compute(&ConductorParams { radius: 2.0, field: 3.0 });
        for (k, q) in scene.potential.grid.points() {
            if q.norm() < 2.0 {
                assert_eq!(scene.potential.values[k], 0.0);
                assert_eq!(scene.field.vector(k), R2::zeros());
            }
        }
        assert_relative_eq!(
            scene.peak_surface_charge(),
            3.0 * VACUUM_PERMITTIVITY * 3.0,
            max_relative = 1e-12
        );
        assert_eq!(scene.levels.len(), 20);
    }
}

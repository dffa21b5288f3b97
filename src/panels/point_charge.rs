//! Electric field of a single point charge at the origin.

use serde::{Deserialize, Serialize};

use crate::constants::NANO;
use crate::fields::{
    electric_field_from_point_charges, potential_from_point_charges, Grid2, PointCharge,
    ScalarField2, VectorField2,
};
use crate::math::{Scalar, R2, R3};
use crate::sweep::linspace;

use super::{slider, PanelParams, Slider};

/// Half-width of the plotted square (m).
pub const EXTENT: Scalar = 2.0;

/// Charge in nC and mesh resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PointChargeParams {
    /// Charge (nC).
    pub charge_nc: Scalar,
    /// Samples per axis.
    pub grid_size: u32,
}

impl Default for PointChargeParams {
    fn default() -> Self {
        Self {
            charge_nc: 5.0,
            grid_size: 40,
        }
    }
}

impl PanelParams for PointChargeParams {
    const SLIDERS: &'static [Slider] = &[
        slider("charge_nc", "Charge", "nC", (-20.0, 20.0), 5.0, 0.1),
        slider("grid_size", "Mesh resolution", "", (20.0, 100.0), 40.0, 5.0),
    ];

    fn slider_values(&self) -> Vec<Scalar> {
        vec![self.charge_nc, Scalar::from(self.grid_size)]
    }
}

/// Field arrows, equipotentials and the color scale of the arrows.
#[derive(Debug, Clone)]
pub struct PointChargeScene {
    /// The source charge.
    pub charge: PointCharge,
    /// Electric field (N/C); zero at the charge itself.
    pub field: VectorField2,
    /// Potential (V) for the equipotential contours.
    pub potential: ScalarField2,
    /// Contour levels (V).
    pub levels: Vec<Scalar>,
    /// Smallest and largest |E| (N/C) on the mesh.
    pub magnitude_range: (Scalar, Scalar),
    /// Logarithmic color range `(1.5·min, 0.8·max)` of the nonzero magnitudes.
    pub color_range: (Scalar, Scalar),
}

/// Samples the field and potential on the configured mesh.
#[must_use]
pub fn compute(p: &PointChargeParams) -> PointChargeScene {
    let charge = PointCharge::new(R3::zeros(), p.charge_nc * NANO);
    let sources = [charge];
    let grid = Grid2::square(-EXTENT, EXTENT, p.grid_size as usize);
    let field = grid.map_vector(|q| {
        let e = electric_field_from_point_charges(R3::new(q.x, q.y, 0.0), &sources);
        R2::new(e.x, e.y)
    });
    let potential = grid.map_scalar(|q| potential_from_point_charges(R3::new(q.x, q.y, 0.0), &sources));
    let levels = linspace(0.2, EXTENT, 12)
        .into_iter()
        .map(|r| potential_from_point_charges(R3::new(r, 0.0, 0.0), &sources))
        .collect();

    let magnitude = field.magnitude();
    let magnitude_range = magnitude.finite_range().unwrap_or_default();
    let (lo, hi) = magnitude
        .values
        .iter()
        .filter(|m| **m > 0.0)
        .fold((Scalar::INFINITY, 0.0), |(lo, hi): (Scalar, Scalar), &m| (lo.min(m), hi.max(m)));
    let color_range = if hi > 0.0 {
        let (vmin, vmax) = (1.5 * lo, 0.8 * hi);
        if vmin < vmax { (vmin, vmax) } else { (lo, hi.max(lo * 10.0)) }
    } else {
        log::warn!("point charge: zero charge, field vanishes everywhere");
        (1.0, 10.0)
    };

    log::debug!(
        "point charge: {}x{} mesh, |E| in [{:.3e}, {:.3e}] N/C",
        p.grid_size,
        p.grid_size,
        lo,
        hi
    );

    PointChargeScene {
        charge,
        field,
        potential,
        levels,
        magnitude_range,
        color_range,
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
        assert_defaults_match_sliders::<PointChargeParams>();
    }

    #[test]
    fn field_at_mesh_corner_follows_inverse_square() {
        let scene = compute(&PointChargeParams::default());
        let mag = scene.field.magnitude();
        let r2 = 2.0 * EXTENT * EXTENT;
        assert_relative_eq!(mag.values[0], COULOMB_CONSTANT * 5.0e-9 / r2, max_relative = 1e-12);
        assert_eq!(scene.levels.len(), 12);
        assert!(scene.color_range.0 < scene.color_range.1);
        let (lo, hi) = scene.magnitude_range;
        assert_relative_eq!(lo, mag.values[0], max_relative = 1e-12);
        assert!(hi > scene.color_range.1);
    }

    #[test]
    fn zero_charge_reports_a_vanishing_field() {
        let scene = compute(&PointChargeParams { charge_nc: 0.0, ..Default::default() });
        assert_eq!(scene.magnitude_range, (0.0, 0.0));
    }

    #[test]
    fn odd_mesh_puts_a_sample_on_the_charge() {
        let scene = compute(&PointChargeParams { grid_size: 21, ..Default::default() });
        let centre = scene.field.grid.index(10, 10);
        assert_eq!(scene.field.vector(centre), R2::zeros());
        assert!(scene.potential.values[centre].is_finite());
    }
}

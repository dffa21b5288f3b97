//! Electrostatic potential map of a point charge at the origin.

use serde::{Deserialize, Serialize};

use crate::constants::NANO;
use crate::fields::{potential_from_point_charges, Grid2, PointCharge, ScalarField2};
use crate::math::{Scalar, R3};
use crate::sweep::linspace;

use super::{slider, PanelParams, Slider};

/// Half-width of the plotted square (m).
pub const EXTENT: Scalar = 2.0;

/// Charge in nC and mesh resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PotentialParams {
    /// Charge (nC).
    pub charge_nc: Scalar,
    /// Samples per axis.
    pub resolution: u32,
}

impl Default for PotentialParams {
    fn default() -> Self {
        Self {
            charge_nc: 10.0,
            resolution: 500,
        }
    }
}

impl PanelParams for PotentialParams {
    const SLIDERS: &'static [Slider] = &[
        slider("charge_nc", "Charge", "nC", (-20.0, 20.0), 10.0, 0.1),
        slider("resolution", "Resolution", "", (100.0, 1000.0), 500.0, 50.0),
    ];

    fn slider_values(&self) -> Vec<Scalar> {
        vec![self.charge_nc, Scalar::from(self.resolution)]
    }
}

/// Potential samples with the symmetric-log color scale.
#[derive(Debug, Clone)]
pub struct PotentialScene {
    /// The source charge.
    pub charge: PointCharge,
    /// Potential (V).
    pub potential: ScalarField2,
    /// Largest `|V|` on the mesh; the color scale spans `[-vmax, vmax]`.
    pub vmax: Scalar,
    /// Half-width of the linear region of the color scale, `0.1 · vmax`.
    pub linthresh: Scalar,
    /// Equipotential levels (V).
    pub levels: Vec<Scalar>,
}

/// Samples `V = k q / r` with `r` clamped away from zero.
#[must_use]
pub fn compute(p: &PotentialParams) -> PotentialScene {
    let charge = PointCharge::new(R3::zeros(), p.charge_nc * NANO);
    let sources = [charge];
    let n = p.resolution as usize;
    let potential = Grid2::square(-EXTENT, EXTENT, n)
        .map_scalar(|q| potential_from_point_charges(R3::new(q.x, q.y, 0.0), &sources));
    let vmax = potential.max_abs();
    let levels = linspace(0.2, EXTENT, 12)
        .into_iter()
        .map(|r| potential_from_point_charges(R3::new(r, 0.0, 0.0), &sources))
        .collect();
    log::debug!("potential: {n}x{n} mesh, max |V| = {vmax:.4e} V");
    PotentialScene {
        charge,
        potential,
        vmax,
        linthresh: 0.1 * vmax,
        levels,
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
        assert_defaults_match_sliders::<PotentialParams>();
    }

    #[test]
    fn potential_is_coulombic_and_signed() {
        let scene = compute(&PotentialParams { charge_nc: -4.0, resolution: 100 });
        let corner = scene.potential.values[0];
        assert_relative_eq!(
            corner,
            -COULOMB_CONSTANT * 4.0e-9 / (2.0f64.sqrt() * EXTENT),
            max_relative = 1e-12
        );
        assert!(scene.vmax > corner.abs());
        assert_relative_eq!(scene.linthresh, 0.1 * scene.vmax);
    }
}

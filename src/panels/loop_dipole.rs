//! Field lines of a small current loop: no magnetic monopoles.

use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};

use crate::constants::TESLA_TO_MICROTESLA;
use crate::fields::{trace_field_line, CurrentLoop, FieldLine, Grid2, VectorField2};
use crate::math::{divergence, Scalar, R2, R3};
use crate::sweep::{linspace, linspace_open};

use super::{slider, PanelParams, Slider};

/// Steps traced in each direction from a seed.
pub const LINE_STEPS: usize = 25;
/// Step length along a field line (m).
pub const STEP_SIZE: Scalar = 0.1;
/// Height of the seed ring above the loop plane (m).
pub const SEED_HEIGHT: Scalar = 0.15;
/// Upper end of the logarithmic color scale (μT).
pub const COLOR_MAX: Scalar = 13.0;
/// Half-width of the x–z section (m).
pub const SECTION_EXTENT: Scalar = 1.5;

/// Loop current, radius and number of traced lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoopDipoleParams {
    /// Loop current (A).
    pub current: Scalar,
    /// Loop radius (m).
    pub radius: Scalar,
    /// Number of traced field lines.
    pub field_lines: u32,
}

impl Default for LoopDipoleParams {
    fn default() -> Self {
        Self {
            current: 1.0,
            radius: 0.1,
            field_lines: 12,
        }
    }
}

impl PanelParams for LoopDipoleParams {
    const SLIDERS: &'static [Slider] = &[
        slider("current", "Current", "A", (0.1, 5.0), 1.0, 0.1),
        slider("radius", "Loop radius", "m", (0.05, 0.5), 0.1, 0.01),
        slider("field_lines", "Field lines", "", (8.0, 20.0), 12.0, 2.0),
    ];

    fn slider_values(&self) -> Vec<Scalar> {
        vec![self.current, self.radius, Scalar::from(self.field_lines)]
    }
}

/// On-axis comparison of the dipole approximation with the exact loop field.
#[derive(Debug, Clone, Default)]
pub struct AxisProfile {
    /// Height above the loop (m).
    pub z: Vec<Scalar>,
    /// Dipole approximation (μT).
    pub dipole: Vec<Scalar>,
    /// Exact loop field (μT).
    pub exact: Vec<Scalar>,
}

/// Field lines, x–z section and diagnostics.
#[derive(Debug, Clone)]
pub struct LoopDipoleScene {
    /// The loop.
    pub current_loop: CurrentLoop,
    /// Traced lines with magnitudes in μT.
    pub lines: Vec<FieldLine>,
    /// Dipole field `(B_x, B_z)` in μT on a 30×30 mesh of the y = 0 plane.
    pub section: VectorField2,
    /// Exact loop field `(B_x, B_z)` in μT on the same mesh.
    pub section_exact: VectorField2,
    /// Logarithmic color range in μT.
    pub color_range: (Scalar, Scalar),
    /// Largest `|∇·B| r / |B|` over the traced vertices.
    pub max_relative_divergence: Scalar,
    /// Dipole versus exact field on the axis.
    pub axis: AxisProfile,
}

/// Dipole field of `lp` in μT.
fn dipole_microtesla(lp: &CurrentLoop, p: R3) -> R3 {
    lp.dipole_field(p) * TESLA_TO_MICROTESLA
}

/// Traces the field lines and samples the section.
#[must_use]
pub fn compute(p: &LoopDipoleParams) -> LoopDipoleScene {
    let lp = CurrentLoop::new(p.current, p.radius);
    let field = |x: R3| dipole_microtesla(&lp, x);

    let lines: Vec<FieldLine> = linspace_open(0.0, TAU, p.field_lines as usize)
        .into_iter()
        .map(|phi| {
            let (s, c) = phi.sin_cos();
            let seed = R3::new(1.2 * p.radius * c, 1.2 * p.radius * s, SEED_HEIGHT);
            trace_field_line(field, seed, STEP_SIZE, LINE_STEPS)
        })
        .collect();

    let smallest = lines
        .iter()
        .flat_map(|l| l.magnitudes.iter().copied())
        .filter(|m| *m > 0.0)
        .fold(Scalar::INFINITY, Scalar::min);
    let mut vmin = if smallest.is_finite() { (0.8 * smallest).max(0.05) } else { 0.05 };
    if vmin >= COLOR_MAX {
        vmin = COLOR_MAX / 10.0;
    }

    let grid = Grid2::square(-SECTION_EXTENT, SECTION_EXTENT, 30);
    let section = grid.map_vector(|q| {
        let b = field(R3::new(q.x, 0.0, q.y));
        R2::new(b.x, b.z)
    });
    let section_exact = grid.map_vector(|q| {
        let b = lp.exact_field_cartesian(R3::new(q.x, 0.0, q.y)) * TESLA_TO_MICROTESLA;
        R2::new(b.x, b.z)
    });

    let max_relative_divergence = lines
        .iter()
        .flat_map(|l| l.points.iter().copied())
        .filter(|x| x.norm() > 0.5 * p.radius)
        .map(|x| {
            let r = x.norm();
            let b = field(x).norm();
            let div = divergence(field, x, 1.0e-4 * r);
            if b > 0.0 { div.abs() * r / b } else { 0.0 }
        })
        .fold(0.0, Scalar::max);

    let mut axis = AxisProfile::default();
    for z in linspace(2.0 * p.radius, SECTION_EXTENT, 40) {
        axis.z.push(z);
        axis.dipole.push(field(R3::new(0.0, 0.0, z)).z);
        axis.exact.push(lp.on_axis_field(z) * TESLA_TO_MICROTESLA);
    }

    log::debug!(
        "loop dipole: m = {:.4e} A·m², {} lines, max |div B| r/|B| = {:.2e}",
        lp.dipole_moment(),
        lines.len(),
        max_relative_divergence
    );

    LoopDipoleScene {
        current_loop: lp,
        lines,
        section,
        section_exact,
        color_range: (vmin, COLOR_MAX),
        max_relative_divergence,
        axis,
    }
}

//! SVG rendering of panel scenes with `plotters`.
//!
//! Each `draw_*` function writes one image. Drawing code works with
//! `Box<dyn Error>` internally so plotters' backend errors propagate with `?`;
//! the public entry points map them onto [`EmLabError::Render`].

use std::error::Error;

use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::prelude::*;

use crate::errors::EmLabError;
use crate::fields::ScalarField2;
use crate::math::{project_orthographic, Scalar, R3};

pub mod colormap;
pub mod contour;

mod circuits;
mod electrostatics;
mod magnetostatics;
mod waves;

pub use circuits::draw_rlc;
pub use colormap::{Colormap, Scale};
pub use electrostatics::{draw_conductor, draw_coulomb, draw_point_charge, draw_potential, draw_ring_torque};
pub use magnetostatics::{draw_biot_savart, draw_loop_dipole, draw_wires};
pub use waves::{draw_fiber, draw_waveguide};

pub(crate) type DrawResult<T = ()> = Result<T, Box<dyn Error>>;
pub(crate) type Area<'a> = DrawingArea<SVGBackend<'a>, Shift>;
pub(crate) type Pt = (Scalar, Scalar);
pub(crate) type Chart<'a, 'b> = ChartContext<'a, SVGBackend<'b>, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

/// Default image size in pixels.
pub const IMAGE_SIZE: (u32, u32) = (1100, 760);
/// Largest number of heat-map cells drawn per axis.
pub const MAX_CELLS: usize = 160;

pub(crate) const FONT: &str = "sans-serif";
pub(crate) const POSITIVE: RGBColor = RGBColor(214, 39, 40);
pub(crate) const NEGATIVE: RGBColor = RGBColor(31, 119, 180);
pub(crate) const FIELD_GREEN: RGBColor = RGBColor(144, 238, 144);
pub(crate) const GOLD: RGBColor = RGBColor(218, 165, 32);

pub(crate) fn finish(result: DrawResult) -> Result<(), EmLabError> {
    result.map_err(|e| EmLabError::Render(e.to_string()))
}

/// Red for positive charge, blue otherwise.
pub(crate) const fn charge_color(q: Scalar) -> RGBColor {
    if q > 0.0 {
        POSITIVE
    } else {
        NEGATIVE
    }
}

/// Shaft plus a two-barbed head from `from` to `to`; `head` is the barb length in data units.
pub(crate) fn arrow(from: Pt, to: Pt, head: Scalar, style: ShapeStyle) -> Vec<PathElement<Pt>> {
    let (dx, dy) = (to.0 - from.0, to.1 - from.1);
    let len = dx.hypot(dy);
    if len == 0.0 {
        return Vec::new();
    }
    let (ux, uy) = (dx / len, dy / len);
    let h = head.min(0.5 * len);
    let (s, c) = 25.0_f64.to_radians().sin_cos();
    let barb = |sign: Scalar| {
        let bx = -ux * c - sign * uy * s;
        let by = -uy * c + sign * ux * s;
        (to.0 + h * bx, to.1 + h * by)
    };
    vec![
        PathElement::new(vec![from, to], style),
        PathElement::new(vec![barb(1.0), to, barb(-1.0)], style),
    ]
}

/// Arrow of length `length` centred on `at` pointing along the unit vector `(u, v)`.
pub(crate) fn centred_arrow(at: Pt, u: Scalar, v: Scalar, length: Scalar, style: ShapeStyle) -> Vec<PathElement<Pt>> {
    let half = 0.5 * length;
    arrow(
        (at.0 - half * u, at.1 - half * v),
        (at.0 + half * u, at.1 + half * v),
        0.35 * length,
        style,
    )
}

/// Filled cells of `field`, at most [`MAX_CELLS`] per axis, colored by `color`.
pub(crate) fn heat_cells<F>(field: &ScalarField2, color: F) -> Vec<Rectangle<Pt>>
where
    F: Fn(Scalar) -> RGBColor,
{
    let grid = &field.grid;
    let (nx, ny) = (grid.xs.len(), grid.ys.len());
    let stride = nx.max(ny).div_ceil(MAX_CELLS).max(1);
    let (hx, hy) = grid.half_cell();
    let (hx, hy) = (hx * stride as Scalar, hy * stride as Scalar);
    let mut cells = Vec::new();
    for j in (0..ny).step_by(stride) {
        for i in (0..nx).step_by(stride) {
            let v = field.at(i, j);
            if !v.is_finite() {
                continue;
            }
            let (x, y) = (grid.xs[i], grid.ys[j]);
            cells.push(Rectangle::new(
                [(x - hx, y - hy), (x + hx, y + hy)],
                color(v).filled(),
            ));
        }
    }
    cells
}

/// Vertical color bar in its own drawing area.
pub(crate) fn colorbar(area: &Area<'_>, label: &str, cmap: Colormap, scale: Scale) -> DrawResult {
    let mut chart = ChartBuilder::on(area)
        .margin_top(40)
        .margin_bottom(50)
        .margin_right(10)
        .y_label_area_size(70)
        .build_cartesian_2d(0.0..1.0, 0.0..1.0)?;
    let format = move |t: &Scalar| format!("{:.3e}", scale.value(*t));
    chart
        .configure_mesh()
        .disable_x_mesh()
        .disable_y_mesh()
        .disable_x_axis()
        .y_labels(6)
        .y_label_formatter(&format)
        .y_desc(label)
        .draw()?;
    let steps = 100;
    chart.draw_series((0..steps).map(|k| {
        let lo = k as Scalar / steps as Scalar;
        let hi = (k + 1) as Scalar / steps as Scalar;
        Rectangle::new([(0.0, lo), (1.0, hi)], cmap.at(0.5 * (lo + hi)).filled())
    }))?;
    Ok(())
}

/// Text lines stacked from `origin` in pixel coordinates.
pub(crate) fn text_block(area: &Area<'_>, origin: (i32, i32), lines: &[String]) -> DrawResult {
    let style = TextStyle::from((FONT, 15).into_font()).color(&BLACK);
    for (k, line) in lines.iter().enumerate() {
        area.draw_text(line, &style, (origin.0, origin.1 + 20 * k as i32))?;
    }
    Ok(())
}

/// Orthographic camera for the three-dimensional panels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct View {
    pub elev_deg: Scalar,
    pub azim_deg: Scalar,
}

impl View {
    pub(crate) fn project(&self, p: R3) -> Pt {
        let q = project_orthographic(p, self.elev_deg, self.azim_deg);
        (q.x, q.y)
    }

    pub(crate) fn path(&self, points: impl IntoIterator<Item = R3>) -> Vec<Pt> {
        points.into_iter().map(|p| self.project(p)).collect()
    }

    /// Screen-plane half-width that contains the box `[-h, h]³` from any angle.
    pub(crate) fn half_extent(h: Scalar) -> Scalar {
        h * 3.0_f64.sqrt()
    }

    /// Projected x, y and z axes of length `len` from the origin, labeled.
    pub(crate) fn axes(&self, len: Scalar) -> [(Pt, Pt, &'static str); 3] {
        let o = self.project(R3::zeros());
        [
            (o, self.project(R3::new(len, 0.0, 0.0)), "x"),
            (o, self.project(R3::new(0.0, len, 0.0)), "y"),
            (o, self.project(R3::new(0.0, 0.0, len)), "z"),
        ]
    }
}

/// Draws projected coordinate axes onto a 3D chart.
pub(crate) fn draw_axes_3d(chart: &mut Chart<'_, '_>, view: &View, len: Scalar) -> DrawResult {
    let grey = RGBColor(120, 120, 120);
    for (from, to, name) in view.axes(len) {
        chart.draw_series(arrow(from, to, 0.06 * len, grey.stroke_width(1)))?;
        chart.draw_series(std::iter::once(Text::new(
            name.to_string(),
            to,
            (FONT, 16).into_font().color(&grey),
        )))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn arrow_head_meets_the_tip() {
        let parts = arrow((0.0, 0.0), (1.0, 0.0), 0.2, BLACK.stroke_width(1));
        assert_eq!(parts.len(), 2);
        assert!(arrow((1.0, 1.0), (1.0, 1.0), 0.2, BLACK.stroke_width(1)).is_empty());
    }

    #[test]
    fn view_from_above_is_plan() {
        let view = View { elev_deg: 90.0, azim_deg: -90.0 };
        let (x, y) = view.project(R3::new(1.0, 2.0, 5.0));
        assert_relative_eq!(x, 1.0, epsilon = 1e-12);
        assert_relative_eq!(y, 2.0, epsilon = 1e-12);
    }
}

use std::path::Path;

use plotters::prelude::*;

use crate::constants::TESLA_TO_MICROTESLA;
use crate::errors::EmLabError;
use crate::math::{Scalar, R3};
use crate::panels::biot_savart::{BiotSavartScene, SEGMENTS};
use crate::panels::loop_dipole::LoopDipoleScene;
use crate::panels::wires::WiresScene;
use crate::sweep::linspace;

use super::{
    arrow, centred_arrow, charge_color, colorbar, draw_axes_3d, finish, text_block, Colormap,
    DrawResult, Scale, View, FONT, IMAGE_SIZE,
};

const BAR_WIDTH: u32 = 170;
/// Half-size of the cube shown in the Biot-Savart view (m).
const BIOT_VIEW: Scalar = 3.5;
/// Half-size of the cube shown in the field-line view (m).
const LOOP_VIEW: Scalar = 0.8;

/// Writes the two-wire panel.
///
/// # Errors
///
/// Returns [`EmLabError::Render`] when the SVG cannot be drawn or written.
pub fn draw_wires(scene: &WiresScene, path: &Path) -> Result<(), EmLabError> {
    finish(plot_wires(scene, path))
}

fn plot_wires(scene: &WiresScene, path: &Path) -> DrawResult {
    let root = SVGBackend::new(path, IMAGE_SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    let (main, bar) = root.split_horizontally(IMAGE_SIZE.0 - BAR_WIDTH);
    let [w1, w2] = &scene.wires;
    let mut chart = ChartBuilder::on(&main)
        .caption(
            format!("Total magnetic field: I1 = {} A, I2 = {} A", w1.current, w2.current),
            (FONT, 22),
        )
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(-2.2..2.2, -1.7..1.7)?;
    chart.configure_mesh().x_desc("x (m)").y_desc("y (m)").draw()?;

    let grid = &scene.field.grid;
    let magnitude = scene.field.magnitude();
    let unit = scene.field.normalized(0.0);
    let shown: Vec<usize> = grid
        .points()
        .filter(|(k, _)| (k % grid.xs.len()) % 2 == 0 && (k / grid.xs.len()) % 2 == 0)
        .map(|(k, _)| k)
        .collect();
    let (lo, hi) = shown
        .iter()
        .map(|&k| magnitude.values[k])
        .fold((Scalar::INFINITY, 0.0), |(lo, hi): (Scalar, Scalar), m| (lo.min(m), hi.max(m)));
    let scale = if hi > lo { Scale::Linear { lo, hi } } else { Scale::Linear { lo: 0.0, hi: 1.0 } };
    let spacing = 2.0 * (grid.xs[1] - grid.xs[0]);
    for &k in &shown {
        let dir = unit.vector(k);
        if dir.x == 0.0 && dir.y == 0.0 {
            continue;
        }
        let (x, y) = (grid.xs[k % grid.xs.len()], grid.ys[k / grid.xs.len()]);
        let color = Colormap::Viridis.at(scale.unit(magnitude.values[k]));
        chart.draw_series(centred_arrow((x, y), dir.x, dir.y, 0.75 * spacing, color.stroke_width(2)))?;
    }

    for (k, wire) in scene.wires.iter().enumerate() {
        let at = (wire.position.x, wire.position.y);
        let color = charge_color(wire.current);
        chart.draw_series(std::iter::once(Circle::new(at, 12, color.filled())))?;
        let sense = if wire.current >= 0.0 { "out of page" } else { "into page" };
        chart.draw_series(std::iter::once(Text::new(
            format!("wire {} ({sense})", k + 1),
            (at.0 - 0.35, at.1 - 0.2),
            (FONT, 14).into_font(),
        )))?;
    }

    colorbar(&bar, "|B| (μT)", Colormap::Viridis, scale)?;
    root.present()?;
    Ok(())
}

/// Writes the finite-wire Biot-Savart panel.
///
/// # Errors
///
/// Returns [`EmLabError::Render`] when the SVG cannot be drawn or written.
pub fn draw_biot_savart(scene: &BiotSavartScene, path: &Path) -> Result<(), EmLabError> {
    finish(plot_biot_savart(scene, path))
}

fn plot_biot_savart(scene: &BiotSavartScene, path: &Path) -> DrawResult {
    let root = SVGBackend::new(path, IMAGE_SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    let (left, right) = root.split_horizontally(IMAGE_SIZE.0 / 2 + 80);
    let view = View { elev_deg: 25.0, azim_deg: -60.0 };
    let half = View::half_extent(BIOT_VIEW);
    let mut chart = ChartBuilder::on(&left)
        .caption("Biot-Savart field of a finite wire", (FONT, 20))
        .margin(15)
        .build_cartesian_2d(-half..half, -half..half)?;
    draw_axes_3d(&mut chart, &view, BIOT_VIEW)?;

    let seg = &scene.line.segment;
    let clip = |p: R3| R3::new(p.x, p.y, p.z.clamp(-BIOT_VIEW, BIOT_VIEW));
    let orange = RGBColor(255, 140, 0);
    chart
        .draw_series(std::iter::once(PathElement::new(
            view.path([clip(seg.start), clip(seg.end)]),
            orange.stroke_width(3),
        )))?
        .label(format!("wire, I = {} A", scene.line.current))
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], orange.stroke_width(3)));
    let mids = (0..SEGMENTS).map(|k| {
        let t = (k as Scalar + 0.5) / SEGMENTS as Scalar;
        seg.start + (seg.end - seg.start) * t
    });
    chart.draw_series(
        mids.filter(|m| m.z.abs() <= BIOT_VIEW)
            .map(|m| Circle::new(view.project(m), 2, orange.filled())),
    )?;

    let blue = RGBColor(31, 119, 180);
    chart
        .draw_series(scene.observations.iter().flat_map(|o| {
            let tip = o.position + o.direction * 0.45;
            arrow(view.project(o.position), view.project(tip), 0.12, blue.stroke_width(1))
        }))?
        .label("B direction")
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], blue.stroke_width(2)));
    let red = RGBColor(200, 0, 0);
    let needle_tip = scene.needle_position + scene.needle_direction * 0.8;
    chart
        .draw_series(arrow(
            view.project(scene.needle_position),
            view.project(needle_tip),
            0.25,
            red.stroke_width(3),
        ))?
        .label("compass needle")
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], red.stroke_width(3)));
    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    let profile = &scene.profile;
    let to_ut = |v: &[Scalar]| v.iter().map(|b| b * TESLA_TO_MICROTESLA).collect::<Vec<_>>();
    let (discrete, exact, infinite) = (to_ut(&profile.discrete), to_ut(&profile.exact), to_ut(&profile.infinite));
    let top = infinite.iter().chain(&exact).chain(&discrete).fold(0.0, |a: Scalar, b| a.max(*b));
    let rho_max = profile.rho.last().copied().unwrap_or(4.0);
    let mut radial = ChartBuilder::on(&right)
        .caption("|B| versus distance from the wire", (FONT, 18))
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0.0..rho_max, 0.0..1.05 * top.max(Scalar::MIN_POSITIVE))?;
    radial.configure_mesh().x_desc("ρ (m)").y_desc("|B| (μT)").draw()?;
    let series: [(&str, &[Scalar], RGBColor); 3] = [
        ("discrete sum", &discrete, blue),
        ("finite segment, exact", &exact, BLACK),
        ("infinite wire", &infinite, red),
    ];
    for (label, values, color) in series {
        radial
            .draw_series(LineSeries::new(
                profile.rho.iter().copied().zip(values.iter().copied()),
                color.stroke_width(2),
            ))?
            .label(label)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));
    }
    radial
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    let b = scene
        .observations
        .iter()
        .map(|o| o.field.norm())
        .fold(0.0, Scalar::max);
    text_block(
        &left,
        (20, IMAGE_SIZE.1 as i32 - 60),
        &[format!("largest |B| on the observation ring: {:.3} μT", b * TESLA_TO_MICROTESLA)],
    )?;
    root.present()?;
    Ok(())
}

/// Writes the loop field-line panel.
///
/// # Errors
///
/// Returns [`EmLabError::Render`] when the SVG cannot be drawn or written.
pub fn draw_loop_dipole(scene: &LoopDipoleScene, path: &Path) -> Result<(), EmLabError> {
    finish(plot_loop_dipole(scene, path))
}

fn plot_loop_dipole(scene: &LoopDipoleScene, path: &Path) -> DrawResult {
    let root = SVGBackend::new(path, IMAGE_SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    let (plots, bar) = root.split_horizontally(IMAGE_SIZE.0 - BAR_WIDTH);
    let (left, right) = plots.split_horizontally((IMAGE_SIZE.0 - BAR_WIDTH) / 2);
    let (lo, hi) = scene.color_range;
    let scale = Scale::Log { lo, hi };
    let color = |b: Scalar| Colormap::Viridis.at(scale.unit(b.clamp(lo, hi)));

    let view = View { elev_deg: 30.0, azim_deg: 45.0 };
    let half = View::half_extent(LOOP_VIEW);
    let mut chart = ChartBuilder::on(&left)
        .caption("Field lines of a current loop", (FONT, 20))
        .margin(15)
        .build_cartesian_2d(-half..half, -half..half)?;
    draw_axes_3d(&mut chart, &view, LOOP_VIEW)?;
    let inside = |p: &R3| p.iter().all(|c| c.abs() <= LOOP_VIEW);
    for line in &scene.lines {
        let pieces = line
            .points
            .windows(2)
            .zip(line.magnitudes.windows(2))
            .filter(|(p, _)| inside(&p[0]) && inside(&p[1]))
            .map(|(p, m)| {
                PathElement::new(
                    view.path([p[0], p[1]]),
                    color(0.5 * (m[0] + m[1])).stroke_width(2),
                )
            });
        chart.draw_series(pieces)?;
    }
    let radius = scene.current_loop.radius;
    let ring: Vec<R3> = linspace(0.0, std::f64::consts::TAU, 100)
        .into_iter()
        .map(|phi| R3::new(radius * phi.cos(), radius * phi.sin(), 0.0))
        .collect();
    chart.draw_series(std::iter::once(PathElement::new(
        view.path(ring),
        RGBColor(200, 0, 0).stroke_width(3),
    )))?;

    let grid = &scene.section.grid;
    let extent = grid.xs.last().copied().unwrap_or(1.5);
    let mut section = ChartBuilder::on(&right)
        .caption("Section y = 0", (FONT, 20))
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(-extent..extent, -extent..extent)?;
    section.configure_mesh().x_desc("x (m)").y_desc("z (m)").draw()?;
    let magnitude = scene.section.magnitude();
    let unit = scene.section.normalized(0.0);
    let spacing = 2.0 * extent / (grid.xs.len().max(2) - 1) as Scalar;
    for (k, p) in grid.points() {
        let dir = unit.vector(k);
        if dir.x == 0.0 && dir.y == 0.0 {
            continue;
        }
        section.draw_series(centred_arrow(
            (p.x, p.y),
            dir.x,
            dir.y,
            0.8 * spacing,
            color(magnitude.values[k]).stroke_width(1),
        ))?;
    }
    section.draw_series(std::iter::once(PathElement::new(
        vec![(-radius, 0.0), (radius, 0.0)],
        RGBColor(200, 0, 0).stroke_width(4),
    )))?;

    text_block(
        &left,
        (20, IMAGE_SIZE.1 as i32 - 80),
        &[
            format!("m = I π R² = {:.4e} A·m²", scene.current_loop.dipole_moment()),
            format!("max |∇·B| r / |B| = {:.1e}", scene.max_relative_divergence),
        ],
    )?;
    colorbar(&bar, "|B| (μT)", Colormap::Viridis, scale)?;
    root.present()?;
    Ok(())
}

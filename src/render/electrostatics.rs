use std::path::Path;

use plotters::prelude::*;

use crate::errors::EmLabError;
use crate::math::{Scalar, R3};
use crate::panels::conductor::{ConductorScene, EXTENT as CONDUCTOR_EXTENT};
use crate::panels::coulomb::{CoulombScene, ARROW_SCALE};
use crate::panels::point_charge::{PointChargeScene, EXTENT as POINT_EXTENT};
use crate::panels::potential::{PotentialScene, EXTENT as POTENTIAL_EXTENT};
use crate::panels::ring_torque::RingTorqueScene;

use super::contour::iso_segments;
use super::{
    arrow, centred_arrow, charge_color, colorbar, draw_axes_3d, finish, heat_cells, text_block,
    Colormap, DrawResult, Scale, View, FIELD_GREEN, FONT, IMAGE_SIZE,
};

/// Shortest force arrow drawn, so the direction stays visible (m).
const MIN_ARROW: Scalar = 0.5;
const BAR_WIDTH: u32 = 170;

/// Writes the Coulomb panel.
///
/// # Errors
///
/// Returns [`EmLabError::Render`] when the SVG cannot be drawn or written.
pub fn draw_coulomb(scene: &CoulombScene, path: &Path) -> Result<(), EmLabError> {
    finish(plot_coulomb(scene, path))
}

fn plot_coulomb(scene: &CoulombScene, path: &Path) -> DrawResult {
    let root = SVGBackend::new(path, IMAGE_SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    let (main, side) = root.split_horizontally(IMAGE_SIZE.0 - 300);
    let mut chart = ChartBuilder::on(&main)
        .caption("Coulomb's law: electrostatic force", (FONT, 22))
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(-5.0..5.0, -5.0..5.0)?;
    chart.configure_mesh().x_desc("x (m)").y_desc("y (m)").draw()?;

    let green = RGBColor(0, 100, 0);
    for (charge, force) in scene.charges.iter().zip(&scene.forces) {
        let from = (charge.position.x, charge.position.y);
        let mut shaft = force * ARROW_SCALE;
        let len = shaft.norm();
        if len > 0.0 && len < MIN_ARROW {
            shaft *= MIN_ARROW / len;
        }
        chart.draw_series(arrow(
            from,
            (from.0 + shaft.x, from.1 + shaft.y),
            0.3,
            green.stroke_width(3),
        ))?;
    }
    for (k, charge) in scene.charges.iter().enumerate() {
        let at = (charge.position.x, charge.position.y);
        let color = charge_color(charge.charge_c);
        chart.draw_series(std::iter::once(Circle::new(at, 14, color.filled())))?;
        chart.draw_series(std::iter::once(Text::new(
            format!("q{} = {:.1e} C", k + 1, charge.charge_c),
            (at.0 - 0.8, at.1 - 0.45),
            (FONT, 14).into_font(),
        )))?;
    }

    let kind = if scene.repulsive() { "repulsive" } else { "attractive" };
    text_block(
        &side,
        (10, 80),
        &[
            format!("|F| = {:.4e} N", scene.magnitude()),
            format!("r = {:.3} m", scene.distance),
            format!("force is {kind}"),
            format!("arrow scale {ARROW_SCALE} m/N"),
        ],
    )?;
    root.present()?;
    Ok(())
}

/// Writes the point-charge field panel.
///
/// # Errors
///
/// Returns [`EmLabError::Render`] when the SVG cannot be drawn or written.
pub fn draw_point_charge(scene: &PointChargeScene, path: &Path) -> Result<(), EmLabError> {
    finish(plot_point_charge(scene, path))
}

fn plot_point_charge(scene: &PointChargeScene, path: &Path) -> DrawResult {
    let root = SVGBackend::new(path, IMAGE_SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    let (main, bar) = root.split_horizontally(IMAGE_SIZE.0 - BAR_WIDTH);
    let lim = POINT_EXTENT + 0.1;
    let sign = if scene.charge.charge_c > 0.0 { "positive" } else { "negative" };
    let mut chart = ChartBuilder::on(&main)
        .caption(format!("Electric field of a {sign} point charge"), (FONT, 22))
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(-lim..lim, -lim..lim)?;
    chart.configure_mesh().x_desc("x (m)").y_desc("y (m)").draw()?;

    let grey = RGBColor(150, 150, 150);
    for level in &scene.levels {
        let segments = iso_segments(&scene.potential, *level);
        chart.draw_series(segments.into_iter().map(|s| PathElement::new(s.to_vec(), grey.stroke_width(1))))?;
    }

    let (lo, hi) = scene.color_range;
    let scale = Scale::Log { lo, hi };
    let magnitude = scene.field.magnitude();
    let unit = scene.field.normalized(0.0);
    let spacing = 2.0 * POINT_EXTENT / (scene.field.grid.xs.len().max(2) - 1) as Scalar;
    for (k, p) in scene.field.grid.points() {
        let dir = unit.vector(k);
        if dir.x == 0.0 && dir.y == 0.0 {
            continue;
        }
        let color = Colormap::Viridis.at(scale.unit(magnitude.values[k]));
        chart.draw_series(centred_arrow((p.x, p.y), dir.x, dir.y, 0.8 * spacing, color.stroke_width(1)))?;
    }
    chart.draw_series(std::iter::once(Circle::new(
        (scene.charge.position.x, scene.charge.position.y),
        10,
        charge_color(scene.charge.charge_c).filled(),
    )))?;

    colorbar(&bar, "|E| (N/C)", Colormap::Viridis, scale)?;
    root.present()?;
    Ok(())
}

/// Writes the potential map panel.
///
/// # Errors
///
/// Returns [`EmLabError::Render`] when the SVG cannot be drawn or written.
pub fn draw_potential(scene: &PotentialScene, path: &Path) -> Result<(), EmLabError> {
    finish(plot_potential(scene, path))
}

fn plot_potential(scene: &PotentialScene, path: &Path) -> DrawResult {
    let root = SVGBackend::new(path, IMAGE_SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    let (main, bar) = root.split_horizontally(IMAGE_SIZE.0 - BAR_WIDTH);
    let lim = POTENTIAL_EXTENT;
    let sign = if scene.charge.charge_c > 0.0 { "positive" } else { "negative" };
    let mut chart = ChartBuilder::on(&main)
        .caption(format!("Potential of a {sign} point charge"), (FONT, 22))
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(-lim..lim, -lim..lim)?;
    chart.configure_mesh().x_desc("x (m)").y_desc("y (m)").draw()?;

    let vmax = if scene.vmax > 0.0 { scene.vmax } else { 1.0 };
    let linthresh = if scene.linthresh > 0.0 { scene.linthresh } else { 0.1 };
    let scale = Scale::SymLog { linthresh, vmax };
    chart.draw_series(heat_cells(&scene.potential, |v| Colormap::Diverging.at(scale.unit(v))))?;
    for level in &scene.levels {
        let segments = iso_segments(&scene.potential, *level);
        chart.draw_series(segments.into_iter().map(|s| PathElement::new(s.to_vec(), BLACK.stroke_width(1))))?;
    }
    chart.draw_series(std::iter::once(Circle::new(
        (scene.charge.position.x, scene.charge.position.y),
        8,
        charge_color(scene.charge.charge_c).filled(),
    )))?;

    colorbar(&bar, "V (volts)", Colormap::Diverging, scale)?;
    root.present()?;
    Ok(())
}

/// Writes the conductor-in-a-field panel.
///
/// # Errors
///
/// Returns [`EmLabError::Render`] when the SVG cannot be drawn or written.
pub fn draw_conductor(scene: &ConductorScene, path: &Path) -> Result<(), EmLabError> {
    finish(plot_conductor(scene, path))
}

fn plot_conductor(scene: &ConductorScene, path: &Path) -> DrawResult {
    let root = SVGBackend::new(path, IMAGE_SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    let (main, side) = root.split_horizontally(720);
    let (profile, info) = side.split_vertically(420);
    let lim = CONDUCTOR_EXTENT;
    let mut chart = ChartBuilder::on(&main)
        .caption("Conducting sphere in a uniform field", (FONT, 22))
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(-lim..lim, -lim..lim)?;
    chart.configure_mesh().x_desc("x (m)").y_desc("z (m)").draw()?;

    let lo = scene.levels.first().copied().unwrap_or(-1.0);
    let hi = scene.levels.last().copied().unwrap_or(1.0);
    let scale = Scale::Linear { lo, hi };
    chart.draw_series(heat_cells(&scene.potential, |v| Colormap::Diverging.at(scale.unit(v))))?;
    for level in &scene.levels {
        let segments = iso_segments(&scene.potential, *level);
        chart.draw_series(segments.into_iter().map(|s| PathElement::new(s.to_vec(), BLACK.mix(0.6).stroke_width(1))))?;
    }

    let unit = scene.field.normalized(0.0);
    let grid = &scene.field.grid;
    let spacing = 2.0 * lim / (grid.xs.len().max(2) - 1) as Scalar;
    for (k, p) in grid.points() {
        let (i, j) = (k % grid.xs.len(), k / grid.xs.len());
        if i % 3 != 0 || j % 3 != 0 {
            continue;
        }
        let dir = unit.vector(k);
        if dir.x == 0.0 && dir.y == 0.0 {
            continue;
        }
        chart.draw_series(centred_arrow((p.x, p.y), dir.x, dir.y, 2.2 * spacing, RGBColor(60, 60, 60).stroke_width(1)))?;
    }
    let r = scene.sphere.radius;
    let disc: Vec<(Scalar, Scalar)> = (0..=120)
        .map(|k| {
            let t = std::f64::consts::TAU * Scalar::from(k) / 120.0;
            (r * t.cos(), r * t.sin())
        })
        .collect();
    chart.draw_series(std::iter::once(Polygon::new(disc, RGBColor(170, 170, 170).filled())))?;

    let sigma_max = scene.peak_surface_charge().max(Scalar::MIN_POSITIVE);
    let mut sigma_chart = ChartBuilder::on(&profile)
        .caption("Induced surface charge", (FONT, 16))
        .margin(10)
        .x_label_area_size(35)
        .y_label_area_size(70)
        .build_cartesian_2d(0.0..180.0, -1.1 * sigma_max..1.1 * sigma_max)?;
    sigma_chart
        .configure_mesh()
        .x_desc("θ (deg)")
        .y_desc("σ (C/m²)")
        .y_label_formatter(&|v| format!("{v:.1e}"))
        .draw()?;
    sigma_chart.draw_series(LineSeries::new(
        scene
            .theta
            .iter()
            .zip(&scene.surface_charge)
            .map(|(t, s)| (t.to_degrees(), *s)),
        super::NEGATIVE.stroke_width(2),
    ))?;

    text_block(
        &info,
        (10, 30),
        &[
            format!("R = {:.2} m", r),
            format!("E0 = {:.2} V/m", scene.sphere.external_field),
            format!("peak σ = {:.3e} C/m²", scene.peak_surface_charge()),
            "V = 0 on and inside the sphere".to_string(),
        ],
    )?;
    root.present()?;
    Ok(())
}

/// Writes the ring-dipole torque panel.
///
/// # Errors
///
/// Returns [`EmLabError::Render`] when the SVG cannot be drawn or written.
pub fn draw_ring_torque(scene: &RingTorqueScene, path: &Path) -> Result<(), EmLabError> {
    finish(plot_ring_torque(scene, path))
}

fn plot_ring_torque(scene: &RingTorqueScene, path: &Path) -> DrawResult {
    let root = SVGBackend::new(path, IMAGE_SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    let (main, bar) = root.split_horizontally(IMAGE_SIZE.0 - BAR_WIDTH);
    let view = View { elev_deg: 30.0, azim_deg: -60.0 };
    let half = View::half_extent(1.0);
    let mut chart = ChartBuilder::on(&main)
        .caption("Ring with λ(φ) = λ0 sin φ in a uniform field: τ = p × E", (FONT, 20))
        .margin(20)
        .build_cartesian_2d(-half..half, -half..half)?;
    draw_axes_3d(&mut chart, &view, 0.9)?;

    let lambda0 = scene.ring.lambda0;
    let density = Scale::Linear { lo: -lambda0, hi: lambda0 };
    chart
        .draw_series(scene.field_arrows.iter().flat_map(|(tail, vec)| {
            arrow(view.project(*tail), view.project(tail + vec), 0.03, FIELD_GREEN.stroke_width(2))
        }))?
        .label("electric field E")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], FIELD_GREEN.stroke_width(2)));
    chart.draw_series(scene.samples.iter().map(|(p, lambda)| {
        Circle::new(view.project(*p), 3, Colormap::BlueWhiteRed.at(density.unit(*lambda)).filled())
    }))?;

    let display = 3.0 * scene.ring.radius;
    let scaled = |v: R3| if v.norm() > 0.0 { v * (display / v.norm()) } else { v };
    let origin = view.project(R3::zeros());
    let red = RGBColor(200, 0, 0);
    let magenta = RGBColor(200, 0, 200);
    chart
        .draw_series(arrow(origin, view.project(scaled(scene.dipole)), 0.05, red.stroke_width(3)))?
        .label(format!("dipole p = {:.4} C·m", scene.dipole.norm()))
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], red.stroke_width(3)));
    chart
        .draw_series(arrow(origin, view.project(scaled(scene.torque)), 0.05, magenta.stroke_width(3)))?
        .label(format!("torque τ = {:.4} N·m", scene.torque.norm()))
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], magenta.stroke_width(3)));
    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    text_block(
        &main,
        (30, 60),
        &[
            format!("|E| = {:.1} N/C", scene.field.norm()),
            format!("|p| = π λ0 R² = {:.4} C·m", scene.dipole.norm()),
            format!("|p| by quadrature = {:.4} C·m", scene.dipole_numeric.norm()),
            format!("|τ| = {:.4} N·m", scene.torque.norm()),
            format!("R = {:.2} m", scene.ring.radius),
        ],
    )?;
    colorbar(&bar, "λ(φ) (C/m)", Colormap::BlueWhiteRed, density)?;
    root.present()?;
    Ok(())
}

use std::path::Path;

use plotters::prelude::*;

use crate::constants::{wavelength_from_frequency, CENTI, GIGA};
use crate::errors::EmLabError;
use crate::fields::ScalarField2;
use crate::math::{Scalar, R3};
use crate::panels::fiber::FiberScene;
use crate::panels::waveguide::{WaveguideScene, ARROW_THRESHOLD};
use crate::sweep::linspace;
use crate::waves::{Guidance, ModeKind, Termination};

use super::{
    centred_arrow, draw_axes_3d, finish, heat_cells, text_block, Colormap, DrawResult, Pt, Scale, View,
    FONT, GOLD, IMAGE_SIZE,
};

/// Writes the waveguide mode panel.
///
/// # Errors
///
/// Returns [`EmLabError::Render`] when the SVG cannot be drawn or written.
pub fn draw_waveguide(scene: &WaveguideScene, path: &Path) -> Result<(), EmLabError> {
    finish(plot_waveguide(scene, path))
}

fn plot_waveguide(scene: &WaveguideScene, path: &Path) -> DrawResult {
    let root = SVGBackend::new(path, IMAGE_SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    let (plots, info) = root.split_vertically(IMAGE_SIZE.1 - 130);
    let (left, right) = plots.split_horizontally(IMAGE_SIZE.0 / 2);
    let fields = &scene.fields;
    let (a, b) = (scene.guide.width_cm, scene.guide.height_cm);

    let transverse = ScalarField2 {
        grid: fields.grid.clone(),
        values: scene.transverse_magnitude.clone(),
    };
    let peak = transverse.max_abs();
    let scale = Scale::Linear { lo: 0.0, hi: if peak > 0.0 { peak } else { 1.0 } };
    let mut chart = ChartBuilder::on(&left)
        .caption(format!("Transverse E, mode {}", scene.mode), (FONT, 20))
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(0.0..a, 0.0..b)?;
    chart.configure_mesh().x_desc("x (cm)").y_desc("y (cm)").draw()?;
    chart.draw_series(heat_cells(&transverse, |v| Colormap::Plasma.at(scale.unit(v))))?;
    let nx = fields.grid.xs.len();
    let spacing = 3.0 * a / (nx.max(2) - 1) as Scalar;
    for (k, p) in fields.grid.points() {
        if (k % nx) % 3 != 0 || (k / nx) % 3 != 0 {
            continue;
        }
        let m = transverse.values[k];
        if m <= ARROW_THRESHOLD {
            continue;
        }
        chart.draw_series(centred_arrow(
            (p.x, p.y),
            fields.ex[k] / m,
            fields.ey[k] / m,
            0.7 * spacing,
            WHITE.stroke_width(1),
        ))?;
    }

    let longitudinal = ScalarField2 {
        grid: fields.grid.clone(),
        values: fields.ez.clone(),
    };
    let mut chart = ChartBuilder::on(&right)
        .caption(format!("Longitudinal E_z, mode {}", scene.mode), (FONT, 20))
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(0.0..a, 0.0..b)?;
    chart.configure_mesh().x_desc("x (cm)").y_desc("y (cm)").draw()?;
    match scene.mode.kind {
        ModeKind::Tm => {
            let ez_scale = Scale::Linear { lo: -1.0, hi: 1.0 };
            chart.draw_series(heat_cells(&longitudinal, |v| Colormap::Diverging.at(ez_scale.unit(v))))?;
        }
        ModeKind::Te => {
            chart.draw_series(std::iter::once(Rectangle::new(
                [(0.0, 0.0), (a, b)],
                RGBColor(225, 225, 225).filled(),
            )))?;
            chart.draw_series(std::iter::once(Text::new(
                "E_z = 0 (TE mode)".to_string(),
                (0.35 * a, 0.5 * b),
                (FONT, 20).into_font(),
            )))?;
        }
    }

    let state = match scene.guidance {
        Guidance::Propagating { beta, guide_wavelength } => format!(
            "propagating: β = {beta:.1} rad/m, guide wavelength = {:.2} cm",
            guide_wavelength * 100.0
        ),
        Guidance::Evanescent { attenuation } => {
            format!("below cutoff: evanescent, α = {attenuation:.1} Np/m")
        }
    };
    text_block(
        &info,
        (30, 15),
        &[
            format!(
                "guide {a} × {b} cm, f = {:.1} GHz, free-space λ = {:.2} cm",
                scene.frequency_ghz,
                wavelength_from_frequency(scene.frequency_ghz * GIGA) / CENTI
            ),
            format!("cutoff f_c = {:.2} GHz", scene.cutoff_ghz),
            state,
        ],
    )?;
    root.present()?;
    Ok(())
}

/// Writes the fiber ray-trace panel.
///
/// # Errors
///
/// Returns [`EmLabError::Render`] when the SVG cannot be drawn or written.
pub fn draw_fiber(scene: &FiberScene, path: &Path) -> Result<(), EmLabError> {
    finish(plot_fiber(scene, path))
}

fn circle_at(radius: Scalar, z: Scalar) -> Vec<R3> {
    linspace(0.0, std::f64::consts::TAU, 60)
        .into_iter()
        .map(|t| R3::new(radius * t.cos(), radius * t.sin(), z))
        .collect()
}

fn plot_fiber(scene: &FiberScene, path: &Path) -> DrawResult {
    let root = SVGBackend::new(path, IMAGE_SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    let (main, side) = root.split_horizontally(IMAGE_SIZE.0 - 300);
    let fiber = &scene.fiber;
    let (r, len) = (fiber.core_radius, fiber.length);
    let view = View { elev_deg: 20.0, azim_deg: 45.0 };

    let lim = 2.0 * r;
    let corners: Vec<Pt> = [-lim, lim]
        .iter()
        .flat_map(|&x| [-lim, lim].map(move |y| (x, y)))
        .flat_map(|(x, y)| [0.0, len].map(move |z| R3::new(x, y, z)))
        .map(|p| view.project(p))
        .collect();
    let span = |f: fn(&Pt) -> Scalar| {
        corners.iter().map(f).fold((Scalar::INFINITY, Scalar::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)))
    };
    let (x0, x1) = span(|p| p.0);
    let (y0, y1) = span(|p| p.1);
    let pad = 0.05 * (x1 - x0).max(y1 - y0);
    let mut chart = ChartBuilder::on(&main)
        .caption("Total internal reflection in an optical fiber", (FONT, 20))
        .margin(15)
        .build_cartesian_2d(x0 - pad..x1 + pad, y0 - pad..y1 + pad)?;
    draw_axes_3d(&mut chart, &view, r)?;

    let cladding = RGBColor(135, 206, 235);
    for z in linspace(0.0, len, 6) {
        chart.draw_series(std::iter::once(PathElement::new(
            view.path(circle_at(1.5 * r, z)),
            cladding.mix(0.6).stroke_width(1),
        )))?;
    }
    for z in linspace(0.0, len, 6) {
        chart.draw_series(std::iter::once(PathElement::new(
            view.path(circle_at(r, z)),
            GOLD.mix(0.7).stroke_width(1),
        )))?;
    }
    for phi in linspace(0.0, std::f64::consts::TAU, 13) {
        let (s, c) = phi.sin_cos();
        chart.draw_series(std::iter::once(PathElement::new(
            view.path([R3::new(r * c, r * s, 0.0), R3::new(r * c, r * s, len)]),
            GOLD.mix(0.4).stroke_width(1),
        )))?;
    }
    let blue = RGBColor(0, 0, 255);
    chart
        .draw_series([0.0, len].map(|z| PathElement::new(view.path(circle_at(r, z)), blue.stroke_width(2))))?
        .label("core/cladding interface")
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], blue.stroke_width(2)));

    let red = RGBColor(220, 0, 0);
    chart
        .draw_series(std::iter::once(PathElement::new(
            view.path(scene.path.points.iter().copied()),
            red.stroke_width(3),
        )))?
        .label("ray")
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], red.stroke_width(3)));
    chart
        .draw_series(
            scene
                .path
                .reflections
                .iter()
                .map(|p| Circle::new(view.project(*p), 5, red.filled())),
        )?
        .label("total reflection")
        .legend(move |(x, y)| Circle::new((x + 10, y), 4, red.filled()));
    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::LowerRight)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    let outcome = match scene.path.termination {
        Termination::ReachedEnd => format!("confined: {} reflections to the end", scene.path.reflections.len()),
        Termination::MaxBounces => format!("confined: stopped after {} reflections", scene.path.reflections.len()),
        Termination::Refracted => "refracted: ray leaves the core".to_string(),
    };
    let mut lines = vec![
        format!("n1 = {:.3}, n2 = {:.3}", fiber.n_core, fiber.n_cladding),
        format!("critical angle = {:.1}°", scene.critical_angle_deg),
        format!("launch angle = {:.0}°", scene.angle_deg),
        format!("NA = {:.3}", scene.numerical_aperture),
        format!("acceptance = {:.1}°", scene.acceptance_angle_deg),
    ];
    if let Some(first) = scene.path.incidence_deg.first() {
        lines.push(format!("first wall incidence = {first:.1}°"));
    }
    lines.push(outcome);
    text_block(&side, (10, 80), &lines)?;
    root.present()?;
    Ok(())
}

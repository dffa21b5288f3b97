use std::path::Path;

use plotters::prelude::*;

use crate::circuits::rlc::{DampingRegime, ExcitationKind};
use crate::constants::MILLI;
use crate::errors::EmLabError;
use crate::math::Scalar;
use crate::panels::rlc::RlcScene;

use super::{finish, text_block, Area, DrawResult, FONT, IMAGE_SIZE};

const MILLI_PER_UNIT: Scalar = 1.0 / MILLI;

/// Writes the RLC transient panel.
///
/// # Errors
///
/// Returns [`EmLabError::Render`] when the SVG cannot be drawn or written.
pub fn draw_rlc(scene: &RlcScene, path: &Path) -> Result<(), EmLabError> {
    finish(plot_rlc(scene, path))
}

fn bounds<'a>(series: impl IntoIterator<Item = &'a [Scalar]>) -> (Scalar, Scalar) {
    let (lo, hi) = series
        .into_iter()
        .flatten()
        .filter(|v| v.is_finite())
        .fold((0.0, 0.0), |(lo, hi): (Scalar, Scalar), &v| (lo.min(v), hi.max(v)));
    let pad = 0.05 * (hi - lo).max(1.0e-9);
    (lo - pad, hi + pad)
}

fn time_chart(
    area: &Area<'_>,
    title: &str,
    y_desc: &str,
    t_ms: &[Scalar],
    series: &[(&str, Vec<Scalar>, RGBColor)],
) -> DrawResult {
    let (lo, hi) = bounds(series.iter().map(|(_, v, _)| v.as_slice()));
    let t_end = t_ms.last().copied().unwrap_or(1.0);
    let mut chart = ChartBuilder::on(area)
        .caption(title, (FONT, 18))
        .margin(12)
        .x_label_area_size(35)
        .y_label_area_size(55)
        .build_cartesian_2d(0.0..t_end, lo..hi)?;
    chart.configure_mesh().x_desc("time (ms)").y_desc(y_desc).draw()?;
    for (label, values, color) in series {
        let color = *color;
        chart
            .draw_series(LineSeries::new(
                t_ms.iter().copied().zip(values.iter().copied()),
                color.stroke_width(2),
            ))?
            .label(*label)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));
    }
    if series.len() > 1 {
        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;
    }
    Ok(())
}

fn plot_rlc(scene: &RlcScene, path: &Path) -> DrawResult {
    let root = SVGBackend::new(path, IMAGE_SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    let panels = root.split_evenly((2, 2));
    let tr = &scene.transient;
    let t_ms: Vec<Scalar> = tr.time.iter().map(|t| t * MILLI_PER_UNIT).collect();
    let milli = |v: &[Scalar]| v.iter().map(|x| x * MILLI_PER_UNIT).collect::<Vec<_>>();

    time_chart(
        &panels[0],
        "Current response i(t)",
        "current (mA)",
        &t_ms,
        &[("i(t)", milli(&tr.current), RGBColor(31, 119, 180))],
    )?;
    time_chart(
        &panels[1],
        "Component voltages",
        "voltage (V)",
        &t_ms,
        &[
            ("v_C(t)", tr.capacitor_voltage.clone(), RGBColor(214, 39, 40)),
            ("v_R(t)", tr.resistor_voltage.clone(), RGBColor(44, 160, 44)),
            ("v_L(t)", tr.inductor_voltage.clone(), RGBColor(200, 0, 200)),
        ],
    )?;
    time_chart(
        &panels[2],
        "Stored energy",
        "energy (mJ)",
        &t_ms,
        &[
            ("inductor", milli(&tr.inductor_energy), RGBColor(0, 190, 190)),
            ("capacitor", milli(&tr.capacitor_energy), RGBColor(200, 180, 0)),
            ("total", milli(&tr.total_energy), BLACK),
        ],
    )?;

    let (info, sweep) = panels[3].split_vertically(IMAGE_SIZE.1 / 4);
    let ch = &scene.characteristics;
    let source = &scene.excitation;
    let drive = match source.kind {
        ExcitationKind::Step => format!("step: V_in = {:.1} V", source.amplitude),
        ExcitationKind::Sine => format!(
            "sine: V_in = {:.1} sin(2π·{} Hz·t) V",
            source.amplitude, source.frequency_hz
        ),
        ExcitationKind::Impulse => format!("impulse: {:.1} V for 0.1 ms", source.amplitude),
    };
    let mut lines = vec![
        drive,
        format!("f0 = {:.1} Hz, α = {:.1} 1/s, ζ = {:.3}", ch.f0, ch.alpha, ch.zeta),
        format!("response: {}", ch.regime),
    ];
    if ch.regime == DampingRegime::Underdamped {
        lines.push(format!("f_d = {:.1} Hz", ch.omega_d / std::f64::consts::TAU));
    }
    text_block(&info, (20, 20), &lines)?;

    let fr = &scene.frequency_response;
    let f_lo = fr.frequency_hz.first().copied().unwrap_or(1.0);
    let f_hi = fr.frequency_hz.last().copied().unwrap_or(10.0).max(f_lo * 10.0);
    let i_max = fr.current_magnitude.iter().fold(0.0, |a: Scalar, b| a.max(*b));
    let mut chart = ChartBuilder::on(&sweep)
        .caption("Steady-state current amplitude", (FONT, 16))
        .margin(12)
        .x_label_area_size(35)
        .y_label_area_size(55)
        .build_cartesian_2d((f_lo..f_hi).log_scale(), 0.0..1.05 * (i_max * MILLI_PER_UNIT).max(1.0e-9))?;
    chart
        .configure_mesh()
        .x_desc("frequency (Hz)")
        .y_desc("|I| (mA)")
        .draw()?;
    chart.draw_series(LineSeries::new(
        fr.frequency_hz
            .iter()
            .copied()
            .zip(fr.current_magnitude.iter().map(|i| i * MILLI_PER_UNIT)),
        RGBColor(31, 119, 180).stroke_width(2),
    ))?;
    root.present()?;
    Ok(())
}

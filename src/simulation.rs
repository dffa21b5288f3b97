//! Sections, topics and the dispatch shell that turns a topic plus configuration into files.

use std::fmt;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use figment::providers::Serialized;
use figment::Figment;

use crate::errors::{EmLabError, ParameterError};
use crate::math::Scalar;
use crate::panels::{self, PanelParams};
use crate::waves::{Guidance, Termination};
use crate::{config::LabConfig, fields, io, render};

/// Errors that can occur while executing a panel.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SimulationError {
    /// The integrated state stopped being finite.
    #[error("integration diverged at t = {time:.6e} s")]
    Diverged {
        /// Time of the first non-finite state (s).
        time: Scalar,
    },
    /// A topic name did not match any panel.
    #[error("unknown topic '{0}' (try `em-lab list`)")]
    UnknownTopic(String),
}

/// Top-level menu groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    /// Charges, fields, potentials and conductors.
    Electrostatics,
    /// Currents and their fields.
    Magnetostatics,
    /// Guided waves.
    Waves,
    /// Lumped circuits.
    Circuits,
}

impl Section {
    /// Every section in menu order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Electrostatics, Self::Magnetostatics, Self::Waves, Self::Circuits]
    }

    /// Menu title.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Electrostatics => "Electrostatics",
            Self::Magnetostatics => "Magnetostatics",
            Self::Waves => "Electromagnetic Waves",
            Self::Circuits => "Electric Circuits",
        }
    }

    /// Topics of this section in menu order.
    pub fn topics(self) -> impl Iterator<Item = Topic> {
        Topic::all().iter().copied().filter(move |t| t.section() == self)
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// One panel of the lab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    /// Force between two point charges.
    Coulomb,
    /// Field of a point charge.
    PointCharge,
    /// Potential of a point charge.
    Potential,
    /// Grounded sphere in a uniform field.
    Conductor,
    /// Torque on a sinusoidally charged ring.
    RingTorque,
    /// Two parallel wires.
    Wires,
    /// Finite straight wire.
    BiotSavart,
    /// Current loop and its field lines.
    LoopDipole,
    /// Series RLC transient.
    Rlc,
    /// Rectangular waveguide mode.
    Waveguide,
    /// Step-index fiber ray.
    Fiber,
}

impl Topic {
    /// Every topic in menu order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Coulomb,
            Self::PointCharge,
            Self::Potential,
            Self::Conductor,
            Self::RingTorque,
            Self::Wires,
            Self::BiotSavart,
            Self::LoopDipole,
            Self::Waveguide,
            Self::Fiber,
            Self::Rlc,
        ]
    }

    /// Command-line name, also the stem of the output files.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Coulomb => "coulomb",
            Self::PointCharge => "point-charge",
            Self::Potential => "potential",
            Self::Conductor => "conductor",
            Self::RingTorque => "ring-torque",
            Self::Wires => "wires",
            Self::BiotSavart => "biot-savart",
            Self::LoopDipole => "loop-dipole",
            Self::Rlc => "rlc",
            Self::Waveguide => "waveguide",
            Self::Fiber => "fiber",
        }
    }

    /// Configuration section holding this topic's parameters.
    #[must_use]
    pub const fn config_section(self) -> &'static str {
        match self {
            Self::PointCharge => "point_charge",
            Self::RingTorque => "ring_torque",
            Self::BiotSavart => "biot_savart",
            Self::LoopDipole => "loop_dipole",
            other => other.slug(),
        }
    }

    /// Menu title.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Coulomb => "Coulomb's law",
            Self::PointCharge => "Electric field of a point charge",
            Self::Potential => "Electric potential of a point charge",
            Self::Conductor => "Conducting sphere in a uniform field",
            Self::RingTorque => "Torque on a charged ring",
            Self::Wires => "Magnetic field of two wires",
            Self::BiotSavart => "Biot-Savart law for a finite wire",
            Self::LoopDipole => "No magnetic monopoles: current loop",
            Self::Rlc => "Series RLC transient",
            Self::Waveguide => "Rectangular waveguide modes",
            Self::Fiber => "Total internal reflection in a fiber",
        }
    }

    /// Section the topic belongs to.
    #[must_use]
    pub const fn section(self) -> Section {
        match self {
            Self::Coulomb | Self::PointCharge | Self::Potential | Self::Conductor | Self::RingTorque => {
                Section::Electrostatics
            }
            Self::Wires | Self::BiotSavart | Self::LoopDipole => Section::Magnetostatics,
            Self::Waveguide | Self::Fiber => Section::Waves,
            Self::Rlc => Section::Circuits,
        }
    }

    /// Whether `key` is a parameter of this topic.
    #[must_use]
    pub fn knows(self, key: &str) -> bool {
        match self {
            Self::Coulomb => panels::coulomb::CoulombParams::knows(key),
            Self::PointCharge => panels::point_charge::PointChargeParams::knows(key),
            Self::Potential => panels::potential::PotentialParams::knows(key),
            Self::Conductor => panels::conductor::ConductorParams::knows(key),
            Self::RingTorque => panels::ring_torque::RingTorqueParams::knows(key),
            Self::Wires => panels::wires::WiresParams::knows(key),
            Self::BiotSavart => panels::biot_savart::BiotSavartParams::knows(key),
            Self::LoopDipole => panels::loop_dipole::LoopDipoleParams::knows(key),
            Self::Rlc => panels::rlc::RlcParams::knows(key),
            Self::Waveguide => panels::waveguide::WaveguideParams::knows(key),
            Self::Fiber => panels::fiber::FiberParams::knows(key),
        }
    }

    /// Validates this topic's section of `config`.
    ///
    /// # Errors
    ///
    /// Returns the first out-of-range or non-finite slider.
    pub fn validate(self, config: &LabConfig) -> Result<(), ParameterError> {
        match self {
            Self::Coulomb => config.coulomb.validate(),
            Self::PointCharge => config.point_charge.validate(),
            Self::Potential => config.potential.validate(),
            Self::Conductor => config.conductor.validate(),
            Self::RingTorque => config.ring_torque.validate(),
            Self::Wires => config.wires.validate(),
            Self::BiotSavart => config.biot_savart.validate(),
            Self::LoopDipole => config.loop_dipole.validate(),
            Self::Rlc => config.rlc.validate(),
            Self::Waveguide => config.waveguide.validate(),
            Self::Fiber => config.fiber.validate(),
        }
    }

    /// Parameter table with the effective values from `config`.
    #[must_use]
    pub fn parameters(self, config: &LabConfig) -> Vec<ParameterRow> {
        match self {
            Self::Coulomb => parameter_rows(&config.coulomb),
            Self::PointCharge => parameter_rows(&config.point_charge),
            Self::Potential => parameter_rows(&config.potential),
            Self::Conductor => parameter_rows(&config.conductor),
            Self::RingTorque => parameter_rows(&config.ring_torque),
            Self::Wires => parameter_rows(&config.wires),
            Self::BiotSavart => parameter_rows(&config.biot_savart),
            Self::LoopDipole => parameter_rows(&config.loop_dipole),
            Self::Rlc => parameter_rows(&config.rlc),
            Self::Waveguide => parameter_rows(&config.waveguide),
            Self::Fiber => parameter_rows(&config.fiber),
        }
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for Topic {
    type Err = SimulationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        Self::all()
            .iter()
            .copied()
            .find(|t| t.slug() == wanted)
            .ok_or_else(|| SimulationError::UnknownTopic(s.to_owned()))
    }
}

/// One line of the `params` table.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterRow {
    /// Configuration key.
    pub key: &'static str,
    /// Human-readable label.
    pub label: &'static str,
    /// Unit, empty for dimensionless values and choices.
    pub unit: &'static str,
    /// `[min, max] step s` for sliders, the allowed values for choices.
    pub range: String,
    /// Default value.
    pub default: String,
    /// Value after configuration layering.
    pub value: String,
}

fn parameter_rows<P: PanelParams>(params: &P) -> Vec<ParameterRow> {
    let mut rows: Vec<ParameterRow> = P::SLIDERS
        .iter()
        .zip(params.slider_values())
        .map(|(s, value)| ParameterRow {
            key: s.key,
            label: s.label,
            unit: s.unit,
            range: format!("[{}, {}] step {}", s.min, s.max, s.step),
            default: s.default.to_string(),
            value: value.to_string(),
        })
        .collect();

    let current = Figment::from(Serialized::defaults(params));
    let defaults = Figment::from(Serialized::defaults(P::default()));
    for &(key, allowed) in P::CHOICES {
        let read = |f: &Figment| f.extract_inner::<String>(key).unwrap_or_default();
        rows.push(ParameterRow {
            key,
            label: key,
            unit: "",
            range: allowed.join(" | "),
            default: read(&defaults),
            value: read(&current),
        });
    }
    rows
}

/// Files written for one topic and a few headline numbers.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelReport {
    /// Topic that was rendered.
    pub topic: Topic,
    /// SVG image.
    pub image: PathBuf,
    /// CSV export, when enabled.
    pub data: Option<PathBuf>,
    /// Human-readable result lines.
    pub summary: Vec<String>,
}

fn export<F>(path: Option<&Path>, write: F) -> Result<(), EmLabError>
where
    F: FnOnce(&mut BufWriter<File>) -> std::io::Result<()>,
{
    if let Some(path) = path {
        let mut w = BufWriter::new(File::create(path)?);
        write(&mut w)?;
        w.flush()?;
        log::info!("wrote {}", path.display());
    }
    Ok(())
}

fn force_kind(magnitude: Scalar, repulsive: bool) -> &'static str {
    if magnitude == 0.0 {
        "no force"
    } else if repulsive {
        "repulsive"
    } else {
        "attractive"
    }
}

/// Validates, computes, renders and optionally exports one topic into `config.output.dir`.
///
/// # Errors
///
/// Returns [`EmLabError::Parameter`] for invalid parameters, [`EmLabError::Simulation`] when
/// the RLC integration diverges, and render or I/O errors while writing.
pub fn run_topic(topic: Topic, config: &LabConfig) -> Result<PanelReport, EmLabError> {
    topic.validate(config)?;
    let out = &config.output;
    fs::create_dir_all(&out.dir)?;
    let image = out.dir.join(format!("{}.svg", topic.slug()));
    let data = out.csv.then(|| out.dir.join(format!("{}.csv", topic.slug())));
    let csv = data.as_deref();

    let summary = match topic {
        Topic::Coulomb => {
            let scene = panels::coulomb::compute(&config.coulomb);
            render::draw_coulomb(&scene, &image)?;
            export(csv, |w| io::write_coulomb_csv(w, &scene))?;
            vec![
                format!("r = {:.3} m", scene.distance),
                format!(
                    "|F| = {:.4e} N ({})",
                    scene.magnitude(),
                    force_kind(scene.magnitude(), scene.repulsive())
                ),
            ]
        }
        Topic::PointCharge => {
            let scene = panels::point_charge::compute(&config.point_charge);
            render::draw_point_charge(&scene, &image)?;
            export(csv, |w| io::write_point_charge_csv(w, &scene))?;
            let (lo, hi) = scene.magnitude_range;
            vec![
                format!("q = {:.2} nC", config.point_charge.charge_nc),
                format!("|E| on the mesh spans {lo:.3e} to {hi:.3e} N/C"),
            ]
        }
        Topic::Potential => {
            let scene = panels::potential::compute(&config.potential);
            render::draw_potential(&scene, &image)?;
            export(csv, |w| io::write_potential_csv(w, &scene))?;
            let (lo, hi) = scene.potential.finite_range().unwrap_or_default();
            vec![
                format!("q = {:.2} nC", config.potential.charge_nc),
                format!("V spans {lo:.3e} to {hi:.3e} V, {} equipotentials", scene.levels.len()),
            ]
        }
        Topic::Conductor => {
            let scene = panels::conductor::compute(&config.conductor);
            render::draw_conductor(&scene, &image)?;
            export(csv, |w| io::write_conductor_csv(w, &scene))?;
            vec![
                format!("R = {:.2} m, E0 = {:.2} V/m", scene.sphere.radius, scene.sphere.external_field),
                format!("peak |σ| = {:.4e} C/m² at the poles", scene.peak_surface_charge()),
            ]
        }
        Topic::RingTorque => {
            let scene = panels::ring_torque::compute(&config.ring_torque);
            render::draw_ring_torque(&scene, &image)?;
            export(csv, |w| io::write_ring_torque_csv(w, &scene))?;
            vec![
                format!("p = ({:.4e}, {:.4e}, {:.4e}) C·m", scene.dipole.x, scene.dipole.y, scene.dipole.z),
                format!("τ = ({:.4e}, {:.4e}, {:.4e}) N·m", scene.torque.x, scene.torque.y, scene.torque.z),
            ]
        }
        Topic::Wires => {
            let p = &config.wires;
            let scene = panels::wires::compute(p);
            render::draw_wires(&scene, &image)?;
            export(csv, |w| io::write_wires_csv(w, &scene))?;
            let force = fields::infinite_wire_flux_density(p.current1, p.separation) * p.current2;
            vec![
                format!("max |B| on the mesh = {:.3} μT", scene.field.magnitude().max_abs()),
                format!(
                    "force per length = {:.4e} N/m ({})",
                    force.abs(),
                    force_kind(force.abs(), force < 0.0)
                ),
            ]
        }
        Topic::BiotSavart => {
            let scene = panels::biot_savart::compute(&config.biot_savart);
            render::draw_biot_savart(&scene, &image)?;
            export(csv, |w| io::write_biot_savart_csv(w, &scene))?;
            let prof = &scene.profile;
            let worst = prof
                .discrete
                .iter()
                .zip(&prof.exact)
                .filter(|(_, e)| **e > 0.0)
                .fold(0.0, |m: Scalar, (d, e)| m.max((d - e).abs() / e));
            vec![
                format!("{} observation points", scene.observations.len()),
                format!("segment sum vs exact: worst relative error {:.2}%", 100.0 * worst),
            ]
        }
        Topic::LoopDipole => {
            let scene = panels::loop_dipole::compute(&config.loop_dipole);
            render::draw_loop_dipole(&scene, &image)?;
            export(csv, |w| io::write_loop_dipole_csv(w, &scene))?;
            vec![
                format!("{} field lines traced", scene.lines.len()),
                format!("max relative |∇·B| = {:.2e}", scene.max_relative_divergence),
            ]
        }
        Topic::Rlc => {
            let scene = panels::rlc::compute(&config.rlc)?;
            render::draw_rlc(&scene, &image)?;
            export(csv, |w| io::write_rlc_csv(w, &scene))?;
            let ch = &scene.characteristics;
            let mut lines = vec![
                format!("{} excitation, {}", scene.excitation.kind, ch.regime),
                format!("f0 = {:.2} Hz, ζ = {:.4}", ch.f0, ch.zeta),
            ];
            if let Some(peak) = scene.frequency_response.peak_frequency() {
                lines.push(format!("current amplitude peaks near {peak:.2} Hz"));
            }
            lines
        }
        Topic::Waveguide => {
            let scene = panels::waveguide::compute(&config.waveguide);
            render::draw_waveguide(&scene, &image)?;
            export(csv, |w| io::write_waveguide_csv(w, &scene))?;
            let state = match scene.guidance {
                Guidance::Propagating { beta, .. } => format!("propagating, β = {beta:.2} rad/m"),
                Guidance::Evanescent { attenuation } => format!("evanescent, α = {attenuation:.2} Np/m"),
            };
            vec![format!("{}: cutoff {:.3} GHz", scene.mode, scene.cutoff_ghz), state]
        }
        Topic::Fiber => {
            let scene = panels::fiber::compute(&config.fiber);
            render::draw_fiber(&scene, &image)?;
            export(csv, |w| io::write_fiber_csv(w, &scene))?;
            let outcome = match scene.path.termination {
                Termination::ReachedEnd => "reaches the far end",
                Termination::MaxBounces => "still confined at the bounce limit",
                Termination::Refracted => "refracts into the cladding",
            };
            vec![
                format!("critical angle {:.2}°, NA = {:.3}", scene.critical_angle_deg, scene.numerical_aperture),
                format!("ray {outcome} after {} reflections", scene.path.reflections.len()),
            ]
        }
    };

    log::info!("{topic}: wrote {}", image.display());
    Ok(PanelReport {
        topic,
        image,
        data,
        summary,
    })
}

/// Renders every topic in menu order, stopping at the first failure.
///
/// # Errors
///
/// Propagates the first error from [`run_topic`].
pub fn run_all(config: &LabConfig) -> Result<Vec<PanelReport>, EmLabError> {
    Topic::all().iter().map(|&t| run_topic(t, config)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugs_round_trip_and_accept_config_names() {
        for &topic in Topic::all() {
            assert_eq!(topic.slug().parse::<Topic>(), Ok(topic));
            assert_eq!(topic.config_section().parse::<Topic>(), Ok(topic));
        }
        assert_eq!("Loop_Dipole".parse::<Topic>(), Ok(Topic::LoopDipole));
        assert!(matches!("maxwell".parse::<Topic>(), Err(SimulationError::UnknownTopic(_))));
    }

    #[test]
    fn every_topic_is_in_exactly_one_section() {
        let listed: usize = Section::all().iter().map(|s| s.topics().count()).sum();
        assert_eq!(listed, Topic::all().len());
        assert_eq!(
            Section::Magnetostatics.topics().collect::<Vec<_>>(),
            vec![Topic::Wires, Topic::BiotSavart, Topic::LoopDipole]
        );
    }

    #[test]
    fn parameter_table_lists_sliders_then_choices() {
        let mut config = LabConfig::default();
        config.rlc.resistance = 42.0;
        let rows = Topic::Rlc.parameters(&config);
        assert_eq!(rows.len(), 6);
        assert_eq!(rows[0].key, "resistance");
        assert_eq!(rows[0].value, "42");
        assert_eq!(rows[0].default, "10");
        let choice = rows.last().expect("choice row");
        assert_eq!(choice.key, "excitation");
        assert_eq!(choice.range, "step | sine | impulse");
        assert_eq!(choice.value, "step");
    }

    #[test]
    fn out_of_range_topic_is_rejected_before_rendering() {
        let mut config = LabConfig::default();
        config.output.dir = std::env::temp_dir().join("em-lab-rejected");
        config.fiber.n_core = 3.0;
        let err = run_topic(Topic::Fiber, &config).unwrap_err();
        assert!(matches!(err, EmLabError::Parameter(ParameterError::OutOfRange { key: "n_core", .. })));
        assert!(!config.output.dir.join("fiber.svg").exists());
    }

    #[test]
    fn renders_svg_and_csv() {
        let mut config = LabConfig::default();
        config.output.dir = std::env::temp_dir().join("em-lab-simulation-test");
        config.output.csv = true;
        let report = run_topic(Topic::Coulomb, &config).expect("render");
        assert!(report.image.exists());
        let data = report.data.expect("csv enabled");
        assert_eq!(fs::read_to_string(data).expect("csv").lines().count(), 3);
        assert_eq!(report.summary.len(), 2);
    }

    #[test]
    fn vanishing_forces_are_not_called_attractive() {
        assert_eq!(force_kind(0.0, false), "no force");
        assert_eq!(force_kind(1.0e-3, true), "repulsive");

        let mut config = LabConfig::default();
        config.output.dir = std::env::temp_dir().join("em-lab-no-force");
        config.coulomb.q1 = 0.0;
        config.wires.current1 = 0.0;
        config.wires.current2 = 0.0;
        for topic in [Topic::Coulomb, Topic::Wires] {
            let report = run_topic(topic, &config).expect("render");
            assert!(report.summary[1].ends_with("(no force)"), "{topic}: {}", report.summary[1]);
        }
    }

    #[test]
    fn zero_charge_summary_reports_the_actual_field() {
        let mut config = LabConfig::default();
        config.output.dir = std::env::temp_dir().join("em-lab-zero-charge");
        config.point_charge.charge_nc = 0.0;
        let report = run_topic(Topic::PointCharge, &config).expect("render");
        assert!(report.summary[1].contains("0.000e0 to 0.000e0"), "{}", report.summary[1]);
    }
}

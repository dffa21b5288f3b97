//! Series RLC circuit driven by a voltage source.
//!
//! The transient is the first-order system
//!
//! ```text
//! di/dt   = (V_in(t) - R i - v_C) / L
//! dv_C/dt = i / C
//! ```
//!
//! started from rest and integrated with RK4 onto a fixed output grid.

use std::f64::consts::TAU;
use std::fmt;
use std::str::FromStr;

use num_complex::Complex;
use serde::{Deserialize, Serialize};

use crate::constants::angular_frequency;
use crate::math::Scalar;
use crate::simulation::SimulationError;
use crate::sweep::{gradient, linspace, logspace_hz, mag, phase_deg};

use super::component::{Capacitor, Inductor, Resistor};
use super::network::SeriesNetwork;
use super::ode::{OdeSystem, RungeKuttaFourthOrder, State2};

/// Duration of the rectangular pulse used for the impulse excitation (s).
pub const IMPULSE_WIDTH: Scalar = 1.0e-4;

/// Source waveform shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExcitationKind {
    /// Constant `V0` from `t = 0`.
    #[default]
    Step,
    /// `V0 sin(2π f t)`.
    Sine,
    /// `V0` for the first [`IMPULSE_WIDTH`] seconds, then zero.
    Impulse,
}

impl ExcitationKind {
    /// Lowercase name used in configuration.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Step => "step",
            Self::Sine => "sine",
            Self::Impulse => "impulse",
        }
    }

    /// Simulated time span in seconds for this excitation.
    #[must_use]
    pub fn duration(self) -> Scalar {
        match self {
            Self::Step => 0.1,
            Self::Sine => 0.05,
            Self::Impulse => 0.02,
        }
    }
}

impl fmt::Display for ExcitationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExcitationKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "step" => Ok(Self::Step),
            "sine" => Ok(Self::Sine),
            "impulse" => Ok(Self::Impulse),
            other => Err(format!("unknown excitation '{other}' (expected step, sine or impulse)")),
        }
    }
}

/// Source waveform with amplitude and (for the sine) frequency.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Excitation {
    /// Waveform shape.
    pub kind: ExcitationKind,
    /// Amplitude `V0` in volts.
    pub amplitude: Scalar,
    /// Sine frequency in hertz; ignored by the other shapes.
    pub frequency_hz: Scalar,
}

impl Excitation {
    /// Source voltage at time `t`.
    #[must_use]
    pub fn voltage(&self, t: Scalar) -> Scalar {
        match self.kind {
            ExcitationKind::Step => self.amplitude,
            ExcitationKind::Sine => self.amplitude * (TAU * self.frequency_hz * t).sin(),
            ExcitationKind::Impulse => {
                if t < IMPULSE_WIDTH {
                    self.amplitude
                } else {
                    0.0
                }
            }
        }
    }
}

/// Damping classification of the natural response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DampingRegime {
    /// `ζ < 1`: decaying oscillation.
    Underdamped,
    /// `|ζ - 1| < 0.01`.
    CriticallyDamped,
    /// Otherwise.
    Overdamped,
}

impl fmt::Display for DampingRegime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Underdamped => "underdamped",
            Self::CriticallyDamped => "critically damped",
            Self::Overdamped => "overdamped",
        })
    }
}

/// Natural frequency, damping and regime of a series RLC.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Characteristics {
    /// `ω0 = 1/√(LC)` in rad/s.
    pub omega0: Scalar,
    /// `f0 = ω0 / 2π` in Hz.
    pub f0: Scalar,
    /// `α = R / 2L` in 1/s.
    pub alpha: Scalar,
    /// `ζ = α / ω0`.
    pub zeta: Scalar,
    /// `ω_d = ω0 √(1 - ζ²)` when underdamped, zero otherwise.
    pub omega_d: Scalar,
    /// Damping classification.
    pub regime: DampingRegime,
}

/// Sampled transient of the series circuit.
#[derive(Debug, Clone, Default)]
pub struct TransientResponse {
    /// Sample times (s).
    pub time: Vec<Scalar>,
    /// Source voltage (V).
    pub input_voltage: Vec<Scalar>,
    /// Loop current (A).
    pub current: Vec<Scalar>,
    /// Capacitor voltage (V).
    pub capacitor_voltage: Vec<Scalar>,
    /// Resistor voltage `R i` (V).
    pub resistor_voltage: Vec<Scalar>,
    /// Inductor voltage `L di/dt` from the sampled current (V).
    pub inductor_voltage: Vec<Scalar>,
    /// `½ L i²` (J).
    pub inductor_energy: Vec<Scalar>,
    /// `½ C v_C²` (J).
    pub capacitor_energy: Vec<Scalar>,
    /// Sum of the stored energies (J).
    pub total_energy: Vec<Scalar>,
}

impl TransientResponse {
    /// Number of samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.time.len()
    }

    /// True if nothing was sampled.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }
}

/// Steady-state sinusoidal response over a frequency sweep.
#[derive(Debug, Clone, Default)]
pub struct FrequencyResponse {
    /// Sweep frequencies (Hz).
    pub frequency_hz: Vec<Scalar>,
    /// Series impedance at each frequency (Ω).
    pub impedance: Vec<Complex<Scalar>>,
    /// Current amplitude `|V0 / Z|` (A).
    pub current_magnitude: Vec<Scalar>,
    /// Current phase relative to the source (degrees).
    pub current_phase_deg: Vec<Scalar>,
}

impl FrequencyResponse {
    /// Frequency of the largest current amplitude.
    #[must_use]
    pub fn peak_frequency(&self) -> Option<Scalar> {
        self.current_magnitude
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(k, _)| self.frequency_hz[k])
    }
}

/// Series RLC circuit.
#[derive(Debug, Clone)]
pub struct SeriesRlc {
    resistor: Resistor,
    inductor: Inductor,
    capacitor: Capacitor,
}

impl SeriesRlc {
    /// Creates the circuit from R (Ω), L (H) and C (F).
    #[must_use]
    pub fn new(resistance: Scalar, inductance: Scalar, capacitance: Scalar) -> Self {
        Self {
            resistor: Resistor::new("R", resistance),
            inductor: Inductor::new("L", inductance),
            capacitor: Capacitor::new("C", capacitance),
        }
    }

    /// Resistance (Ω).
    #[must_use]
    pub fn resistance(&self) -> Scalar {
        self.resistor.resistance()
    }

    /// Inductance (H).
    #[must_use]
    pub fn inductance(&self) -> Scalar {
        self.inductor.inductance()
    }

    /// Capacitance (F).
    #[must_use]
    pub fn capacitance(&self) -> Scalar {
        self.capacitor.capacitance()
    }

    /// Natural frequency, damping and regime.
    #[must_use]
    pub fn characteristics(&self) -> Characteristics {
        let omega0 = 1.0 / (self.inductance() * self.capacitance()).sqrt();
        let alpha = self.resistance() / (2.0 * self.inductance());
        let zeta = alpha / omega0;
        let omega_d = if zeta < 1.0 {
            omega0 * (1.0 - zeta * zeta).sqrt()
        } else {
            0.0
        };
        let regime = if zeta < 1.0 {
            DampingRegime::Underdamped
        } else if (zeta - 1.0).abs() < 0.01 {
            DampingRegime::CriticallyDamped
        } else {
            DampingRegime::Overdamped
        };
        Characteristics {
            omega0,
            f0: omega0 / TAU,
            alpha,
            zeta,
            omega_d,
            regime,
        }
    }

    /// The three components as a series network.
    #[must_use]
    pub fn network(&self) -> SeriesNetwork {
        SeriesNetwork::new("series RLC")
            .with(self.resistor.clone())
            .with(self.inductor.clone())
            .with(self.capacitor.clone())
    }

    /// Integrates the transient over `samples` equally spaced times spanning the
    /// excitation's duration.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::Diverged`] if the integration produces non-finite values.
    pub fn transient(
        &self,
        excitation: &Excitation,
        samples: usize,
    ) -> Result<TransientResponse, SimulationError> {
        let time = linspace(0.0, excitation.kind.duration(), samples);
        let driven = DrivenRlc {
            circuit: self,
            excitation,
        };
        let states = RungeKuttaFourthOrder::default().integrate(&driven, State2::zeros(), &time)?;

        let current: Vec<Scalar> = states.iter().map(|y| y.x).collect();
        let capacitor_voltage: Vec<Scalar> = states.iter().map(|y| y.y).collect();
        let resistor_voltage = current.iter().map(|&i| self.resistor.voltage(i)).collect();
        let inductor_voltage = gradient(&current, &time)
            .into_iter()
            .map(|di| self.inductance() * di)
            .collect();
        let inductor_energy: Vec<Scalar> = current.iter().map(|&i| self.inductor.energy(i)).collect();
        let capacitor_energy: Vec<Scalar> = capacitor_voltage
            .iter()
            .map(|&v| self.capacitor.energy(v))
            .collect();
        let total_energy = inductor_energy
            .iter()
            .zip(&capacitor_energy)
            .map(|(a, b)| a + b)
            .collect();
        let input_voltage = time.iter().map(|&t| excitation.voltage(t)).collect();

        log::debug!(
            "rlc transient: {} samples over {:.3} s ({})",
            time.len(),
            excitation.kind.duration(),
            excitation.kind
        );

        Ok(TransientResponse {
            time,
            input_voltage,
            current,
            capacitor_voltage,
            resistor_voltage,
            inductor_voltage,
            inductor_energy,
            capacitor_energy,
            total_energy,
        })
    }

    /// Sinusoidal steady-state current for a source of amplitude `amplitude` over a log
    /// sweep from `f0/100` to `100 f0`.
    #[must_use]
    pub fn frequency_response(&self, amplitude: Scalar, points: usize) -> FrequencyResponse {
        let f0 = self.characteristics().f0;
        let network = self.network();
        let frequency_hz = logspace_hz(f0 / 100.0, f0 * 100.0, points);
        let impedance: Vec<Complex<Scalar>> = frequency_hz
            .iter()
            .map(|&f| network.impedance(angular_frequency(f)))
            .collect();
        let currents: Vec<Complex<Scalar>> = impedance
            .iter()
            .map(|z| Complex::new(amplitude, 0.0) / z)
            .collect();
        FrequencyResponse {
            frequency_hz,
            impedance,
            current_magnitude: mag(currents.iter().copied()),
            current_phase_deg: phase_deg(currents),
        }
    }
}

struct DrivenRlc<'a> {
    circuit: &'a SeriesRlc,
    excitation: &'a Excitation,
}

impl OdeSystem for DrivenRlc<'_> {
    fn derivative(&self, t: Scalar, y: &State2) -> State2 {
        let (i, vc) = (y.x, y.y);
        let l = self.circuit.inductance();
        let di = (self.excitation.voltage(t) - self.circuit.resistance() * i - vc) / l;
        State2::new(di, i / self.circuit.capacitance())
    }

    fn characteristic_rate(&self) -> Scalar {
        let ch = self.circuit.characteristics();
        let mut rate = (self.circuit.resistance() / self.circuit.inductance()).max(ch.omega0);
        if self.excitation.kind == ExcitationKind::Sine {
            rate = rate.max(TAU * self.excitation.frequency_hz);
        }
        rate
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn step(v0: Scalar) -> Excitation {
        Excitation {
            kind: ExcitationKind::Step,
            amplitude: v0,
            frequency_hz: 60.0,
        }
    }

    #[test]
    fn characteristics_of_default_circuit() {
        let ch = SeriesRlc::new(10.0, 0.1, 10.0e-6).characteristics();
        assert_relative_eq!(ch.omega0, 1000.0, max_relative = 1e-12);
        assert_relative_eq!(ch.alpha, 50.0);
        assert_relative_eq!(ch.zeta, 0.05, max_relative = 1e-12);
        assert_eq!(ch.regime, DampingRegime::Underdamped);
        assert!(ch.omega_d > 0.0);
    }

    #[test]
    fn regimes_follow_zeta() {
        // ζ = R/2 · √(C/L) with L = 0.1, C = 10 μF → ζ = R / 200
        let crit = SeriesRlc::new(200.5, 0.1, 10.0e-6).characteristics();
        assert_eq!(crit.regime, DampingRegime::CriticallyDamped);
        assert_eq!(crit.omega_d, 0.0);
        let over = SeriesRlc::new(400.0, 0.1, 10.0e-6).characteristics();
        assert_eq!(over.regime, DampingRegime::Overdamped);
    }

    #[test]
    fn step_response_matches_underdamped_solution() {
        let circuit = SeriesRlc::new(10.0, 0.1, 10.0e-6);
        let ch = circuit.characteristics();
        let resp = circuit.transient(&step(12.0), 1000).expect("solves");
        assert_eq!(resp.len(), 1000);
        for (t, i) in resp.time.iter().zip(&resp.current) {
            let exact = 12.0 / (0.1 * ch.omega_d) * (-ch.alpha * t).exp() * (ch.omega_d * t).sin();
            assert_relative_eq!(*i, exact, epsilon = 1e-4);
        }
    }

    #[test]
    fn capacitor_charges_to_source_voltage() {
        let circuit = SeriesRlc::new(100.0, 0.1, 10.0e-6);
        let resp = circuit.transient(&step(12.0), 1000).expect("solves");
        let last = *resp.capacitor_voltage.last().expect("samples");
        assert_relative_eq!(last, 12.0, epsilon = 1e-3);
        assert_relative_eq!(*resp.current.last().expect("samples"), 0.0, epsilon = 1e-4);
    }

    #[test]
    fn derived_voltages_satisfy_kvl() {
        let circuit = SeriesRlc::new(10.0, 0.1, 10.0e-6);
        let resp = circuit.transient(&step(12.0), 1000).expect("solves");
        for k in 1..resp.len() - 1 {
            let sum = resp.resistor_voltage[k] + resp.inductor_voltage[k] + resp.capacitor_voltage[k];
            assert_relative_eq!(sum, resp.input_voltage[k], epsilon = 0.1);
        }
    }

    #[test]
    fn impulse_releases_stored_energy() {
        let circuit = SeriesRlc::new(10.0, 0.1, 10.0e-6);
        let pulse = Excitation {
            kind: ExcitationKind::Impulse,
            ..step(12.0)
        };
        let resp = circuit.transient(&pulse, 1000).expect("solves");
        let peak = resp.total_energy.iter().copied().fold(0.0, f64::max);
        assert!(peak > 0.0);
        assert!(*resp.total_energy.last().expect("samples") < peak);
    }

    #[test]
    fn frequency_response_peaks_at_resonance() {
        let circuit = SeriesRlc::new(10.0, 0.1, 10.0e-6);
        let f0 = circuit.characteristics().f0;
        let resp = circuit.frequency_response(12.0, 200);
        assert_eq!(resp.frequency_hz.len(), 200);
        let peak = resp.peak_frequency().expect("non-empty");
        // one log-spaced bin is a factor of 10^(4/199)
        assert!((peak / f0).log10().abs() < 4.0 / 199.0);
        let max_i = resp.current_magnitude.iter().copied().fold(0.0, f64::max);
        assert!(max_i <= 12.0 / 10.0 + 1e-12);
        assert!(max_i > 0.85 * 12.0 / 10.0);
    }

    #[test]
    fn excitation_names_parse() {
        assert_eq!("Sine".parse::<ExcitationKind>(), Ok(ExcitationKind::Sine));
        assert!("square".parse::<ExcitationKind>().is_err());
    }
}

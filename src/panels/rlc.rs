//! Series RLC transient with step, sine or impulse drive.

use serde::{Deserialize, Serialize};

use crate::circuits::rlc::{
    Characteristics, Excitation, ExcitationKind, FrequencyResponse, SeriesRlc, TransientResponse,
};
use crate::constants::MICRO;
use crate::math::Scalar;
use crate::simulation::SimulationError;

use super::{slider, PanelParams, Slider};

/// Output samples of the transient.
pub const TIME_SAMPLES: usize = 1000;
/// Points of the frequency sweep.
pub const SWEEP_POINTS: usize = 200;

/// Circuit values and drive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RlcParams {
    /// Resistance (Ω).
    pub resistance: Scalar,
    /// Inductance (H).
    pub inductance: Scalar,
    /// Capacitance (μF).
    pub capacitance_uf: Scalar,
    /// Source amplitude (V).
    pub voltage: Scalar,
    /// Source waveform.
    pub excitation: ExcitationKind,
    /// Sine frequency (Hz); only used by the sine drive.
    pub frequency: Scalar,
}

impl Default for RlcParams {
    fn default() -> Self {
        Self {
            resistance: 10.0,
            inductance: 0.1,
            capacitance_uf: 10.0,
            voltage: 12.0,
            excitation: ExcitationKind::Step,
            frequency: 60.0,
        }
    }
}

impl PanelParams for RlcParams {
    const SLIDERS: &'static [Slider] = &[
        slider("resistance", "Resistance R", "Ω", (1.0, 100.0), 10.0, 1.0),
        slider("inductance", "Inductance L", "H", (0.01, 1.0), 0.1, 0.01),
        slider("capacitance_uf", "Capacitance C", "μF", (1.0, 100.0), 10.0, 1.0),
        slider("voltage", "Voltage V0", "V", (1.0, 24.0), 12.0, 0.5),
        slider("frequency", "Frequency", "Hz", (1.0, 1000.0), 60.0, 10.0),
    ];
    const CHOICES: &'static [(&'static str, &'static [&'static str])] =
        &[("excitation", &["step", "sine", "impulse"])];

    fn slider_values(&self) -> Vec<Scalar> {
        vec![
            self.resistance,
            self.inductance,
            self.capacitance_uf,
            self.voltage,
            self.frequency,
        ]
    }
}

impl RlcParams {
    /// The circuit in SI units.
    #[must_use]
    pub fn circuit(&self) -> SeriesRlc {
        SeriesRlc::new(self.resistance, self.inductance, self.capacitance_uf * MICRO)
    }

    /// The configured source.
    #[must_use]
    pub fn source(&self) -> Excitation {
        Excitation {
            kind: self.excitation,
            amplitude: self.voltage,
            frequency_hz: self.frequency,
        }
    }
}

/// Transient, characteristics and frequency response.
#[derive(Debug, Clone)]
pub struct RlcScene {
    /// The source used.
    pub excitation: Excitation,
    /// Sampled transient.
    pub transient: TransientResponse,
    /// Natural frequency and damping.
    pub characteristics: Characteristics,
    /// Current versus drive frequency.
    pub frequency_response: FrequencyResponse,
}

/// Integrates the transient and sweeps the steady-state response.
///
/// # Errors
///
/// Returns [`SimulationError::Diverged`] when the integration blows up.
pub fn compute(p: &RlcParams) -> Result<RlcScene, SimulationError> {
    let circuit = p.circuit();
    let excitation = p.source();
    let characteristics = circuit.characteristics();
    let transient = circuit.transient(&excitation, TIME_SAMPLES)?;
    let frequency_response = circuit.frequency_response(p.voltage, SWEEP_POINTS);
    log::debug!(
        "rlc: f0 = {:.2} Hz, zeta = {:.3} ({})",
        characteristics.f0,
        characteristics.zeta,
        characteristics.regime
    );
    Ok(RlcScene {
        excitation,
        transient,
        characteristics,
        frequency_response,
    })
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::circuits::rlc::DampingRegime;
    use crate::panels::test_support::assert_defaults_match_sliders;

    #[test]
    fn defaults_match_sliders() {
        assert_defaults_match_sliders::<RlcParams>();
        assert!(RlcParams::knows("excitation"));
        assert!(!RlcParams::knows("capacitance"));
    }

    #[test]
    fn default_circuit_rings() {
        let scene = compute(&RlcParams::default()).expect("default circuit integrates");
        assert_eq!(scene.transient.len(), TIME_SAMPLES);
        assert_eq!(scene.characteristics.regime, DampingRegime::Underdamped);
        assert_relative_eq!(scene.characteristics.omega0, 1000.0, max_relative = 1e-12);
        assert_relative_eq!(scene.transient.time[TIME_SAMPLES - 1], 0.1);
    }

    #[test]
    fn excitation_selects_time_span() {
        let p = RlcParams { excitation: ExcitationKind::Impulse, ..RlcParams::default() };
        let scene = compute(&p).expect("impulse integrates");
        assert_relative_eq!(scene.transient.time[TIME_SAMPLES - 1], 0.02);
        assert_eq!(scene.transient.input_voltage[TIME_SAMPLES - 1], 0.0);
    }

    #[test]
    fn excitation_deserializes_from_lowercase() {
        let p: RlcParams = params_from_toml("sine");
        assert_eq!(p.excitation, ExcitationKind::Sine);
        assert_relative_eq!(p.resistance, 10.0);
    }

    fn params_from_toml(kind: &str) -> RlcParams {
        toml::from_str(&format!("excitation = \"{kind}\"")).expect("valid toml")
    }
}

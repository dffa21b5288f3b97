//! One module per topic: its parameters, their slider ranges, and the computed scene.
//!
//! Every parameter struct deserializes with per-field defaults equal to its slider
//! defaults, so a partial configuration section only overrides what it names.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::errors::ParameterError;
use crate::math::Scalar;

pub mod biot_savart;
pub mod conductor;
pub mod coulomb;
pub mod fiber;
pub mod loop_dipole;
pub mod point_charge;
pub mod potential;
pub mod rlc;
pub mod ring_torque;
pub mod waveguide;
pub mod wires;

/// Range-checked numeric control of a panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Slider {
    /// Configuration key.
    pub key: &'static str,
    /// Human-readable label.
    pub label: &'static str,
    /// Unit shown next to the value.
    pub unit: &'static str,
    /// Smallest accepted value.
    pub min: Scalar,
    /// Largest accepted value.
    pub max: Scalar,
    /// Value used when the configuration does not set one.
    pub default: Scalar,
    /// Display granularity of the control. Configured values between steps are accepted.
    pub step: Scalar,
}

impl Slider {
    /// Checks that `value` is finite and within `[min, max]`; `step` is not enforced.
    ///
    /// # Errors
    ///
    /// Returns [`ParameterError::NotFinite`] or [`ParameterError::OutOfRange`].
    pub fn check(&self, value: Scalar) -> Result<(), ParameterError> {
        if !value.is_finite() {
            return Err(ParameterError::NotFinite { key: self.key, value });
        }
        if value < self.min || value > self.max {
            return Err(ParameterError::OutOfRange {
                key: self.key,
                value,
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}

/// Parameters of one panel.
pub trait PanelParams: Default + Serialize + DeserializeOwned {
    /// Slider table in display order.
    const SLIDERS: &'static [Slider];
    /// Non-slider choices as `(key, allowed values)`.
    const CHOICES: &'static [(&'static str, &'static [&'static str])] = &[];

    /// Current slider values in the order of [`PanelParams::SLIDERS`].
    fn slider_values(&self) -> Vec<Scalar>;

    /// Validates every slider value.
    ///
    /// # Errors
    ///
    /// Returns the first [`ParameterError`] encountered.
    fn validate(&self) -> Result<(), ParameterError> {
        Self::SLIDERS
            .iter()
            .zip(self.slider_values())
            .try_for_each(|(slider, value)| slider.check(value))
    }

    /// Whether `key` names a slider or a choice of this panel.
    fn knows(key: &str) -> bool {
        Self::SLIDERS.iter().any(|s| s.key == key) || Self::CHOICES.iter().any(|(k, _)| *k == key)
    }
}

/// Shorthand for building slider tables.
pub(crate) const fn slider(
    key: &'static str,
    label: &'static str,
    unit: &'static str,
    range: (Scalar, Scalar),
    default: Scalar,
    step: Scalar,
) -> Slider {
    Slider {
        key,
        label,
        unit,
        min: range.0,
        max: range.1,
        default,
        step,
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::PanelParams;

    /// Asserts that `P::default()` reports exactly the slider defaults and validates.
    pub fn assert_defaults_match_sliders<P: PanelParams>() {
        let params = P::default();
        let values = params.slider_values();
        assert_eq!(values.len(), P::SLIDERS.len());
        for (slider, value) in P::SLIDERS.iter().zip(values) {
            assert_eq!(value, slider.default, "default of {}", slider.key);
        }
        params.validate().expect("defaults validate");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slider_rejects_out_of_range_and_nan() {
        let s = slider("q", "charge", "nC", (-1.0, 1.0), 0.0, 0.1);
        assert!(s.check(0.5).is_ok());
        assert!(matches!(s.check(2.0), Err(ParameterError::OutOfRange { .. })));
        assert!(matches!(s.check(f64::NAN), Err(ParameterError::NotFinite { .. })));
    }

    #[test]
    fn values_between_steps_are_accepted() {
        let s = slider("n", "lines", "", (8.0, 20.0), 12.0, 2.0);
        assert!(s.check(9.0).is_ok());
        let params = loop_dipole::LoopDipoleParams { field_lines: 9, ..Default::default() };
        assert!(params.validate().is_ok());
        assert_eq!(loop_dipole::compute(&params).lines.len(), 9);
    }
}

//! Layered configuration.
//!
//! Sources, lowest to highest priority:
//! 1. built-in slider defaults
//! 2. `config/default.toml` (when present)
//! 3. the file given with `--config`
//! 4. environment variables (`EMLAB_SECTION__KEY`)
//! 5. `--set section.key=value` overrides

use std::path::{Path, PathBuf};

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::errors::{EmLabError, ParameterError};
use crate::panels::biot_savart::BiotSavartParams;
use crate::panels::conductor::ConductorParams;
use crate::panels::coulomb::CoulombParams;
use crate::panels::fiber::FiberParams;
use crate::panels::loop_dipole::LoopDipoleParams;
use crate::panels::point_charge::PointChargeParams;
use crate::panels::potential::PotentialParams;
use crate::panels::rlc::RlcParams;
use crate::panels::ring_torque::RingTorqueParams;
use crate::panels::waveguide::WaveguideParams;
use crate::panels::wires::WiresParams;
use crate::simulation::Topic;

/// Checked-in defaults, merged first when the file exists.
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Prefix of environment overrides.
pub const ENV_PREFIX: &str = "EMLAB_";

/// Where rendered panels go.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output directory for SVG and CSV files.
    pub dir: PathBuf,
    /// Whether to export each scene as CSV next to its image.
    pub csv: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("output"),
            csv: false,
        }
    }
}

/// Full configuration: output settings plus one section per topic.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LabConfig {
    /// Output settings
    #[serde(default)]
    pub output: OutputConfig,
    /// Coulomb's law
    #[serde(default)]
    pub coulomb: CoulombParams,
    /// Point-charge field
    #[serde(default)]
    pub point_charge: PointChargeParams,
    /// Point-charge potential
    #[serde(default)]
    pub potential: PotentialParams,
    /// Conducting sphere
    #[serde(default)]
    pub conductor: ConductorParams,
    /// Ring torque
    #[serde(default)]
    pub ring_torque: RingTorqueParams,
    /// Two wires
    #[serde(default)]
    pub wires: WiresParams,
    /// Finite wire
    #[serde(default)]
    pub biot_savart: BiotSavartParams,
    /// Current loop
    #[serde(default)]
    pub loop_dipole: LoopDipoleParams,
    /// Series RLC
    #[serde(default)]
    pub rlc: RlcParams,
    /// Rectangular waveguide
    #[serde(default)]
    pub waveguide: WaveguideParams,
    /// Optical fiber
    #[serde(default)]
    pub fiber: FiberParams,
}

impl LabConfig {
    /// Loads from the default locations, an optional extra file and `section.key` overrides.
    ///
    /// # Errors
    ///
    /// Returns [`EmLabError::Config`] when a file is missing or a value has the wrong type,
    /// and [`EmLabError::Parameter`] for unknown keys or out-of-range values.
    pub fn load(config_file: Option<&Path>, overrides: &[(String, String)]) -> Result<Self, EmLabError> {
        Self::load_from(Path::new(DEFAULT_CONFIG_PATH), config_file, overrides)
    }

    /// Same as [`LabConfig::load`] with an explicit base file.
    ///
    /// # Errors
    ///
    /// See [`LabConfig::load`].
    pub fn load_from(
        base: &Path,
        config_file: Option<&Path>,
        overrides: &[(String, String)],
    ) -> Result<Self, EmLabError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if base.exists() {
            log::debug!("merging {}", base.display());
            figment = figment.merge(Toml::file(base));
        }

        if let Some(path) = config_file {
            if !path.exists() {
                return Err(EmLabError::Config(format!("{} not found", path.display())));
            }
            log::debug!("merging {}", path.display());
            figment = figment.merge(Toml::file(path));
        }

        // EMLAB_RLC__RESISTANCE=50 -> rlc.resistance = 50
        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

        for (key, raw) in overrides {
            let key = canonical_key(key)?;
            figment = match parse_value(raw) {
                OverrideValue::Int(v) => figment.merge((key.as_str(), v)),
                OverrideValue::Float(v) => figment.merge((key.as_str(), v)),
                OverrideValue::Bool(v) => figment.merge((key.as_str(), v)),
                OverrideValue::Text(v) => figment.merge((key.as_str(), v)),
            };
        }

        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Validates every section's sliders.
    ///
    /// # Errors
    ///
    /// Returns the first out-of-range or non-finite value.
    pub fn validate(&self) -> Result<(), ParameterError> {
        Topic::all().iter().try_for_each(|topic| topic.validate(self))
    }
}

/// Splits `key=value`.
///
/// # Errors
///
/// Returns [`ParameterError::MalformedOverride`] when there is no `=` or either side is empty.
pub fn parse_override(arg: &str) -> Result<(String, String), ParameterError> {
    match arg.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() && !value.trim().is_empty() => {
            Ok((key.trim().to_owned(), value.trim().to_owned()))
        }
        _ => Err(ParameterError::MalformedOverride(arg.to_owned())),
    }
}

/// Checks `section.key` and rewrites the section to its config name (`point-charge` -> `point_charge`).
fn canonical_key(key: &str) -> Result<String, ParameterError> {
    let unknown = || ParameterError::UnknownKey {
        topic: key.split('.').next().unwrap_or_default().to_owned(),
        key: key.to_owned(),
    };
    let (section, field) = key.split_once('.').ok_or_else(unknown)?;
    if section == "output" {
        return matches!(field, "dir" | "csv")
            .then(|| key.to_owned())
            .ok_or_else(unknown);
    }
    let topic: Topic = section.parse().map_err(|_| unknown())?;
    if topic.knows(field) {
        Ok(format!("{}.{field}", topic.config_section()))
    } else {
        Err(ParameterError::UnknownKey {
            topic: topic.slug().to_owned(),
            key: field.to_owned(),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
enum OverrideValue {
    Int(i64),
    Float(f64),
    Bool(bool),
    Text(String),
}

fn parse_value(raw: &str) -> OverrideValue {
    if let Ok(v) = raw.parse::<i64>() {
        OverrideValue::Int(v)
    } else if let Ok(v) = raw.parse::<f64>() {
        OverrideValue::Float(v)
    } else if let Ok(v) = raw.parse::<bool>() {
        OverrideValue::Bool(v)
    } else {
        OverrideValue::Text(raw.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::circuits::ExcitationKind;
    use crate::waves::ModeKind;

    fn no_base() -> PathBuf {
        std::env::temp_dir().join("em-lab-no-such-base.toml")
    }

    fn overrides(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect()
    }

    #[test]
    fn defaults_validate() {
        let config = LabConfig::default();
        config.validate().expect("defaults are in range");
        assert_eq!(config.output.dir, PathBuf::from("output"));
        assert_eq!(config.rlc.resistance, 10.0);
    }

    #[test]
    fn serializes_every_section() {
        let text = toml::to_string(&LabConfig::default()).expect("serialize");
        for section in ["[output]", "[coulomb]", "[loop_dipole]", "[rlc]", "[waveguide]", "[fiber]"] {
            assert!(text.contains(section), "missing {section}");
        }
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config: LabConfig = toml::from_str("[wires]\ncurrent2 = -2.0\n").expect("parse");
        assert_eq!(config.wires.current2, -2.0);
        assert_eq!(config.wires.separation, 1.0);
        assert_eq!(config.coulomb, CoulombParams::default());
    }

    #[test]
    fn overrides_are_typed() {
        let config = LabConfig::load_from(
            &no_base(),
            None,
            &overrides(&[
                ("rlc.resistance", "25"),
                ("rlc.excitation", "sine"),
                ("waveguide.mode", "tm"),
                ("waveguide.m", "2"),
                ("waveguide.n", "1"),
                ("output.csv", "true"),
            ]),
        )
        .expect("load");
        assert_eq!(config.rlc.resistance, 25.0);
        assert_eq!(config.rlc.excitation, ExcitationKind::Sine);
        assert_eq!(config.waveguide.mode, ModeKind::Tm);
        assert_eq!((config.waveguide.m, config.waveguide.n), (2, 1));
        assert!(config.output.csv);
    }

    #[test]
    fn topic_slugs_name_their_section() {
        let config = LabConfig::load_from(
            &no_base(),
            None,
            &overrides(&[
                ("point-charge.charge_nc", "-7"),
                ("Loop-Dipole.radius", "0.2"),
                ("ring-torque.field", "2"),
            ]),
        )
        .expect("load");
        assert_eq!(config.point_charge.charge_nc, -7.0);
        assert_eq!(config.loop_dipole.radius, 0.2);
        assert_eq!(config.ring_torque.field, 2.0);
        assert_eq!(
            canonical_key("biot-savart.length").expect("known"),
            "biot_savart.length"
        );
    }

    #[test]
    fn file_then_override() {
        let path = std::env::temp_dir().join("em-lab-config-file-then-override.toml");
        fs::write(&path, "[fiber]\nangle_deg = 10.0\nn_core = 1.6\n").expect("write");
        let config = LabConfig::load_from(&no_base(), Some(&path), &overrides(&[("fiber.angle_deg", "5.5")]))
            .expect("load");
        let _ = fs::remove_file(&path);
        assert_eq!(config.fiber.angle_deg, 5.5);
        assert_eq!(config.fiber.n_core, 1.6);
    }

    #[test]
    fn missing_file_is_an_error() {
        let missing = std::env::temp_dir().join("em-lab-definitely-missing.toml");
        let err = LabConfig::load_from(&no_base(), Some(&missing), &[]).unwrap_err();
        assert!(matches!(err, EmLabError::Config(_)));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        for key in ["rlc.capacitance", "nowhere.q", "coulomb", "output.format"] {
            let err = LabConfig::load_from(&no_base(), None, &overrides(&[(key, "1")])).unwrap_err();
            assert!(
                matches!(err, EmLabError::Parameter(ParameterError::UnknownKey { .. })),
                "{key}: {err}"
            );
        }
    }

    #[test]
    fn out_of_range_is_rejected() {
        let err = LabConfig::load_from(&no_base(), None, &overrides(&[("conductor.radius", "100")])).unwrap_err();
        assert!(matches!(
            err,
            EmLabError::Parameter(ParameterError::OutOfRange { key: "radius", .. })
        ));
    }

    #[test]
    fn parse_override_splits_once() {
        assert_eq!(
            parse_override("output.dir=a=b").expect("valid"),
            ("output.dir".to_owned(), "a=b".to_owned())
        );
        assert!(parse_override("rlc.resistance").is_err());
        assert!(parse_override("=3").is_err());
    }

    #[test]
    fn values_parse_in_order() {
        assert_eq!(parse_value("3"), OverrideValue::Int(3));
        assert_eq!(parse_value("3.5"), OverrideValue::Float(3.5));
        assert_eq!(parse_value("false"), OverrideValue::Bool(false));
        assert_eq!(parse_value("step"), OverrideValue::Text("step".to_owned()));
    }
}

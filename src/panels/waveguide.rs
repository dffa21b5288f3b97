//! Transverse field pattern and cutoff of a rectangular waveguide mode.

use serde::{Deserialize, Serialize};

use crate::math::Scalar;
use crate::waves::{Guidance, ModeKind, RectangularWaveguide, TransverseFields, WaveguideMode};

use super::{slider, PanelParams, Slider};

/// Samples per axis of the cross-section mesh.
pub const MESH_SAMPLES: usize = 40;
/// Transverse magnitude below which an arrow is not drawn.
pub const ARROW_THRESHOLD: Scalar = 1.0e-10;

/// Guide dimensions, mode indices and operating frequency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveguideParams {
    /// Width `a` (cm).
    pub width_cm: Scalar,
    /// Height `b` (cm).
    pub height_cm: Scalar,
    /// Mode index m.
    pub m: u32,
    /// Mode index n.
    pub n: u32,
    /// TE or TM.
    pub mode: ModeKind,
    /// Operating frequency (GHz).
    pub frequency_ghz: Scalar,
}

impl Default for WaveguideParams {
    fn default() -> Self {
        Self {
            width_cm: 2.0,
            height_cm: 1.0,
            m: 1,
            n: 0,
            mode: ModeKind::Te,
            frequency_ghz: 10.0,
        }
    }
}

impl PanelParams for WaveguideParams {
    const SLIDERS: &'static [Slider] = &[
        slider("width_cm", "Width a", "cm", (1.0, 5.0), 2.0, 0.1),
        slider("height_cm", "Height b", "cm", (0.5, 3.0), 1.0, 0.1),
        slider("m", "Mode index m", "", (0.0, 3.0), 1.0, 1.0),
        slider("n", "Mode index n", "", (0.0, 3.0), 0.0, 1.0),
        slider("frequency_ghz", "Frequency", "GHz", (1.0, 20.0), 10.0, 0.5),
    ];
    const CHOICES: &'static [(&'static str, &'static [&'static str])] = &[("mode", &["te", "tm"])];

    fn slider_values(&self) -> Vec<Scalar> {
        vec![
            self.width_cm,
            self.height_cm,
            Scalar::from(self.m),
            Scalar::from(self.n),
            self.frequency_ghz,
        ]
    }
}

/// Mode fields and propagation state.
#[derive(Debug, Clone)]
pub struct WaveguideScene {
    /// The guide.
    pub guide: RectangularWaveguide,
    /// The selected mode.
    pub mode: WaveguideMode,
    /// Operating frequency (GHz).
    pub frequency_ghz: Scalar,
    /// Field components over the cross-section.
    pub fields: TransverseFields,
    /// `√(Ex² + Ey²)` in storage order.
    pub transverse_magnitude: Vec<Scalar>,
    /// Cutoff frequency (GHz).
    pub cutoff_ghz: Scalar,
    /// Phase constant or attenuation at the operating frequency.
    pub guidance: Guidance,
}

impl WaveguideScene {
    /// Whether the mode propagates at the operating frequency.
    #[must_use]
    pub fn propagating(&self) -> bool {
        self.frequency_ghz > self.cutoff_ghz
    }
}

/// Samples the mode and evaluates its cutoff.
#[must_use]
pub fn compute(p: &WaveguideParams) -> WaveguideScene {
    let guide = RectangularWaveguide::new(p.width_cm, p.height_cm);
    let mode = WaveguideMode { kind: p.mode, m: p.m, n: p.n };
    if !mode.exists() {
        log::warn!("waveguide: {mode} carries no field");
    }
    let fields = guide.transverse_fields(&mode, MESH_SAMPLES);
    let cutoff_ghz = guide.cutoff_ghz(&mode);
    let guidance = guide.guidance(&mode, p.frequency_ghz);
    log::debug!("waveguide: {mode} cutoff {cutoff_ghz:.3} GHz at {:.1} GHz", p.frequency_ghz);
    WaveguideScene {
        guide,
        mode,
        frequency_ghz: p.frequency_ghz,
        transverse_magnitude: fields.transverse_magnitude(),
        fields,
        cutoff_ghz,
        guidance,
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::panels::test_support::assert_defaults_match_sliders;

    #[test]
    fn defaults_match_sliders() {
        assert_defaults_match_sliders::<WaveguideParams>();
    }

    #[test]
    fn default_te10_propagates() {
        let scene = compute(&WaveguideParams::default());
        assert!(scene.propagating());
        assert_relative_eq!(scene.cutoff_ghz, 7.494_811_45, max_relative = 1e-8);
        assert_eq!(scene.transverse_magnitude.len(), MESH_SAMPLES * MESH_SAMPLES);
        assert!(matches!(scene.guidance, Guidance::Propagating { .. }));
    }

    #[test]
    fn higher_mode_is_cut_off() {
        let p = WaveguideParams { m: 2, n: 1, mode: ModeKind::Tm, ..Default::default() };
        let scene = compute(&p);
        assert!(!scene.propagating());
        assert!(scene.fields.ez.iter().any(|v| v.abs() > 0.5));
    }
}

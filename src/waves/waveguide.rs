use std::f64::consts::{PI, TAU};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{CENTI, GIGA, SPEED_OF_LIGHT};
use crate::fields::Grid2;
use crate::math::Scalar;

/// Transverse-electric or transverse-magnetic family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModeKind {
    /// `E_z = 0`.
    #[default]
    Te,
    /// `H_z = 0`.
    Tm,
}

impl fmt::Display for ModeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Te => "TE",
            Self::Tm => "TM",
        })
    }
}

/// A mode `TE_mn` or `TM_mn`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaveguideMode {
    /// Family.
    pub kind: ModeKind,
    /// Half-wave count across the width.
    pub m: u32,
    /// Half-wave count across the height.
    pub n: u32,
}

impl WaveguideMode {
    /// Whether the mode carries a nonzero field (`TE00` and `TM` with a zero index do not).
    #[must_use]
    pub fn exists(&self) -> bool {
        match self.kind {
            ModeKind::Te => self.m != 0 || self.n != 0,
            ModeKind::Tm => self.m != 0 && self.n != 0,
        }
    }
}

impl fmt::Display for WaveguideMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.kind, self.m, self.n)
    }
}

/// Electric field components sampled over the guide cross-section (arbitrary amplitude).
#[derive(Debug, Clone)]
pub struct TransverseFields {
    /// Cross-section mesh in centimeters.
    pub grid: Grid2,
    /// `E_x` samples.
    pub ex: Vec<Scalar>,
    /// `E_y` samples.
    pub ey: Vec<Scalar>,
    /// `E_z` samples.
    pub ez: Vec<Scalar>,
}

impl TransverseFields {
    /// `√(E_x² + E_y²)` per sample.
    #[must_use]
    pub fn transverse_magnitude(&self) -> Vec<Scalar> {
        self.ex.iter().zip(&self.ey).map(|(x, y)| x.hypot(*y)).collect()
    }

    /// `|E|` per sample.
    #[must_use]
    pub fn total_magnitude(&self) -> Vec<Scalar> {
        self.ex
            .iter()
            .zip(&self.ey)
            .zip(&self.ez)
            .map(|((x, y), z)| (x * x + y * y + z * z).sqrt())
            .collect()
    }
}

/// Propagation state of a mode at a given frequency.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Guidance {
    /// Above cutoff.
    Propagating {
        /// Phase constant β in rad/m.
        beta: Scalar,
        /// Guide wavelength `2π/β` in meters.
        guide_wavelength: Scalar,
    },
    /// Below cutoff; the field decays as `e^{-α z}`.
    Evanescent {
        /// Attenuation constant α in Np/m.
        attenuation: Scalar,
    },
}

/// Air-filled rectangular guide with width `a` and height `b` in centimeters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectangularWaveguide {
    /// Broad-wall width `a` (cm).
    pub width_cm: Scalar,
    /// Narrow-wall height `b` (cm).
    pub height_cm: Scalar,
}

impl RectangularWaveguide {
    /// Creates a guide.
    #[must_use]
    pub fn new(width_cm: Scalar, height_cm: Scalar) -> Self {
        Self { width_cm, height_cm }
    }

    /// Cutoff frequency `f_c = (c/2) √((m/a)² + (n/b)²)` in GHz.
    #[must_use]
    pub fn cutoff_ghz(&self, mode: &WaveguideMode) -> Scalar {
        let a = self.width_cm * CENTI;
        let b = self.height_cm * CENTI;
        let kx = Scalar::from(mode.m) / a;
        let ky = Scalar::from(mode.n) / b;
        0.5 * SPEED_OF_LIGHT * kx.hypot(ky) / GIGA
    }

    /// True iff `frequency_ghz` is strictly above the mode's cutoff.
    #[must_use]
    pub fn propagates(&self, mode: &WaveguideMode, frequency_ghz: Scalar) -> bool {
        frequency_ghz > self.cutoff_ghz(mode)
    }

    /// Phase constant or attenuation of `mode` at `frequency_ghz`.
    #[must_use]
    pub fn guidance(&self, mode: &WaveguideMode, frequency_ghz: Scalar) -> Guidance {
        let k0 = TAU * frequency_ghz * GIGA / SPEED_OF_LIGHT;
        let ratio = self.cutoff_ghz(mode) / frequency_ghz;
        if ratio < 1.0 {
            let beta = k0 * (1.0 - ratio * ratio).sqrt();
            Guidance::Propagating {
                beta,
                guide_wavelength: TAU / beta,
            }
        } else {
            Guidance::Evanescent {
                attenuation: k0 * (ratio * ratio - 1.0).sqrt(),
            }
        }
    }

    /// Samples the mode's electric field on an `samples × samples` mesh over `[0, a] × [0, b]`.
    #[must_use]
    pub fn transverse_fields(&self, mode: &WaveguideMode, samples: usize) -> TransverseFields {
        let (a, b) = (self.width_cm, self.height_cm);
        let grid = Grid2::new((0.0, a), (0.0, b), samples, samples);
        let len = grid.len();
        let mut fields = TransverseFields {
            ex: vec![0.0; len],
            ey: vec![0.0; len],
            ez: vec![0.0; len],
            grid,
        };
        if !mode.exists() {
            return fields;
        }
        let (m, n) = (Scalar::from(mode.m), Scalar::from(mode.n));
        for (k, p) in fields.grid.points() {
            let (sx, cx) = (m * PI * p.x / a).sin_cos();
            let (sy, cy) = (n * PI * p.y / b).sin_cos();
            match mode.kind {
                ModeKind::Te => {
                    fields.ex[k] = (n / b) * cx * sy;
                    fields.ey[k] = -(m / a) * sx * cy;
                }
                ModeKind::Tm => {
                    fields.ex[k] = (m / a) * cx * sy;
                    fields.ey[k] = (n / b) * sx * cy;
                    fields.ez[k] = sx * sy;
                }
            }
        }
        fields
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    const TE10: WaveguideMode = WaveguideMode { kind: ModeKind::Te, m: 1, n: 0 };

    #[test]
    fn te10_cutoff_for_two_centimeter_guide() {
        let guide = RectangularWaveguide::new(2.0, 1.0);
        assert_relative_eq!(guide.cutoff_ghz(&TE10), 7.494_811_45, max_relative = 1e-8);
        assert!(guide.propagates(&TE10, 10.0));
        assert!(!guide.propagates(&TE10, 7.0));
    }

    #[test]
    fn guide_wavelength_exceeds_free_space() {
        let guide = RectangularWaveguide::new(2.0, 1.0);
        let Guidance::Propagating { guide_wavelength, .. } = guide.guidance(&TE10, 10.0) else {
            panic!("TE10 propagates at 10 GHz");
        };
        let free = SPEED_OF_LIGHT / 10.0e9;
        let ratio: f64 = 7.494_811_45 / 10.0;
        assert_relative_eq!(guide_wavelength, free / (1.0 - ratio * ratio).sqrt(), max_relative = 1e-6);
        assert!(matches!(guide.guidance(&TE10, 5.0), Guidance::Evanescent { .. }));
    }

    #[test]
    fn te00_and_tm_with_zero_index_are_empty() {
        let guide = RectangularWaveguide::new(2.0, 1.0);
        for mode in [
            WaveguideMode { kind: ModeKind::Te, m: 0, n: 0 },
            WaveguideMode { kind: ModeKind::Tm, m: 1, n: 0 },
        ] {
            assert!(!mode.exists());
            let f = guide.transverse_fields(&mode, 10);
            assert!(f.total_magnitude().iter().all(|&v| v == 0.0));
        }
    }

    #[test]
    fn te10_field_is_vertical_and_peaks_mid_guide() {
        let guide = RectangularWaveguide::new(2.0, 1.0);
        let f = guide.transverse_fields(&TE10, 41);
        assert!(f.ex.iter().all(|&v| v.abs() < 1e-12));
        let mid = f.grid.index(20, 5);
        assert_relative_eq!(f.ey[mid].abs(), 0.5, epsilon = 1e-12);
        assert_eq!(f.ez.iter().filter(|v| **v != 0.0).count(), 0);
    }

    #[test]
    fn tm11_has_longitudinal_field() {
        let guide = RectangularWaveguide::new(2.0, 1.0);
        let mode = WaveguideMode { kind: ModeKind::Tm, m: 1, n: 1 };
        let f = guide.transverse_fields(&mode, 41);
        let centre = f.grid.index(20, 20);
        assert_relative_eq!(f.ez[centre], 1.0, epsilon = 1e-12);
        assert_eq!(mode.to_string(), "TM11");
    }
}

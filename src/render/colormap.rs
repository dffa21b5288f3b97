//! Color maps and value-to-color normalizations.

use plotters::style::RGBColor;

use crate::math::Scalar;

/// Piecewise-linear color map over `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Colormap {
    /// Perceptually uniform dark blue → green → yellow.
    Viridis,
    /// Dark purple → orange → yellow.
    Plasma,
    /// Blue → white → red, for signed quantities.
    Diverging,
    /// Blue → white → red with saturated ends, for charge densities.
    BlueWhiteRed,
}

const VIRIDIS: [(u8, u8, u8); 9] = [
    (68, 1, 84),
    (71, 44, 122),
    (59, 81, 139),
    (44, 113, 142),
    (33, 144, 141),
    (39, 173, 129),
    (92, 200, 99),
    (170, 220, 50),
    (253, 231, 37),
];

const PLASMA: [(u8, u8, u8); 9] = [
    (13, 8, 135),
    (84, 2, 163),
    (139, 10, 165),
    (185, 50, 137),
    (219, 92, 104),
    (244, 136, 73),
    (254, 188, 43),
    (240, 227, 38),
    (240, 249, 33),
];

const DIVERGING: [(u8, u8, u8); 7] = [
    (5, 48, 97),
    (67, 147, 195),
    (209, 229, 240),
    (247, 247, 247),
    (253, 219, 199),
    (214, 96, 77),
    (103, 0, 31),
];

const BWR: [(u8, u8, u8); 3] = [(0, 0, 255), (255, 255, 255), (255, 0, 0)];

impl Colormap {
    fn anchors(self) -> &'static [(u8, u8, u8)] {
        match self {
            Self::Viridis => &VIRIDIS,
            Self::Plasma => &PLASMA,
            Self::Diverging => &DIVERGING,
            Self::BlueWhiteRed => &BWR,
        }
    }

    /// Color at `t`, clamped to `[0, 1]`; NaN maps to the low end.
    #[must_use]
    pub fn at(self, t: Scalar) -> RGBColor {
        let anchors = self.anchors();
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let pos = t * (anchors.len() - 1) as Scalar;
        let k = (pos.floor() as usize).min(anchors.len() - 2);
        let frac = pos - k as Scalar;
        let lerp = |a: u8, b: u8| (Scalar::from(b) - Scalar::from(a)).mul_add(frac, Scalar::from(a)).round() as u8;
        let (a, b) = (anchors[k], anchors[k + 1]);
        RGBColor(lerp(a.0, b.0), lerp(a.1, b.1), lerp(a.2, b.2))
    }
}

/// Mapping from data values onto `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scale {
    /// Affine between `lo` and `hi`.
    Linear {
        /// Value mapped to 0.
        lo: Scalar,
        /// Value mapped to 1.
        hi: Scalar,
    },
    /// Affine in `log10` between positive `lo` and `hi`.
    Log {
        /// Value mapped to 0.
        lo: Scalar,
        /// Value mapped to 1.
        hi: Scalar,
    },
    /// Linear within `±linthresh`, logarithmic outside, symmetric about zero.
    SymLog {
        /// Half-width of the linear region.
        linthresh: Scalar,
        /// Magnitude mapped to the ends.
        vmax: Scalar,
    },
}

impl Scale {
    fn symlog(v: Scalar, linthresh: Scalar) -> Scalar {
        let a = v.abs();
        if a <= linthresh {
            v / linthresh
        } else {
            v.signum() * (1.0 + (a / linthresh).log10())
        }
    }

    fn symlog_inverse(g: Scalar, linthresh: Scalar) -> Scalar {
        let a = g.abs();
        if a <= 1.0 {
            g * linthresh
        } else {
            g.signum() * linthresh * 10.0_f64.powf(a - 1.0)
        }
    }

    /// Position of `v` in `[0, 1]`, clamped.
    #[must_use]
    pub fn unit(&self, v: Scalar) -> Scalar {
        let t = match *self {
            Self::Linear { lo, hi } => (v - lo) / (hi - lo),
            Self::Log { lo, hi } => {
                if v <= 0.0 {
                    0.0
                } else {
                    (v / lo).log10() / (hi / lo).log10()
                }
            }
            Self::SymLog { linthresh, vmax } => {
                let g = Self::symlog(vmax, linthresh);
                0.5 + 0.5 * Self::symlog(v, linthresh) / g
            }
        };
        if t.is_finite() {
            t.clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// Data value at position `t` in `[0, 1]`.
    #[must_use]
    pub fn value(&self, t: Scalar) -> Scalar {
        match *self {
            Self::Linear { lo, hi } => (hi - lo).mul_add(t, lo),
            Self::Log { lo, hi } => lo * (hi / lo).powf(t),
            Self::SymLog { linthresh, vmax } => {
                let g = Self::symlog(vmax, linthresh);
                Self::symlog_inverse((2.0 * t - 1.0) * g, linthresh)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn colormap_hits_its_anchors() {
        assert_eq!(Colormap::Viridis.at(0.0), RGBColor(68, 1, 84));
        assert_eq!(Colormap::Viridis.at(1.0), RGBColor(253, 231, 37));
        assert_eq!(Colormap::BlueWhiteRed.at(0.5), RGBColor(255, 255, 255));
        assert_eq!(Colormap::Plasma.at(f64::NAN), RGBColor(13, 8, 135));
    }

    #[test]
    fn symlog_is_centred_and_saturates() {
        let s = Scale::SymLog { linthresh: 1.0, vmax: 100.0 };
        assert_relative_eq!(s.unit(0.0), 0.5);
        assert_relative_eq!(s.unit(100.0), 1.0);
        assert_relative_eq!(s.unit(-1.0e6), 0.0);
        assert_relative_eq!(s.value(s.unit(10.0)), 10.0, max_relative = 1e-12);
    }

    #[test]
    fn log_scale_spans_decades() {
        let s = Scale::Log { lo: 0.1, hi: 10.0 };
        assert_relative_eq!(s.unit(1.0), 0.5, epsilon = 1e-12);
        assert_eq!(s.unit(-3.0), 0.0);
    }
}

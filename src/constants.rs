//! Physical constants and unit prefixes used by the panels.
//!
//! ## Accuracy
//!
//! Constants marked "exact" have zero uncertainty by SI definition (2019 revision).
//! Measured constants (ε₀, μ₀) are provided with 11-12 significant figures, far beyond
//! what a classroom plot can resolve.
//!
//! ## References
//!
//! - NIST Reference on Constants, Units, and Uncertainty: <https://physics.nist.gov/cuu/Constants/>
//! - CODATA 2018 values published May 20, 2019 (following 2019 SI redefinition)

use std::f64::consts::PI;

/// Vacuum permittivity ε₀ in farads per meter (F/m).
pub const VACUUM_PERMITTIVITY: f64 = 8.854_187_812_8e-12;
/// Vacuum permeability μ₀ in henries per meter (H/m).
pub const VACUUM_PERMEABILITY: f64 = 1.256_637_062_12e-6;
/// Recurring multiple μ₀ / 4π in H/m.
pub const MU0_OVER_4PI: f64 = VACUUM_PERMEABILITY / (4.0 * PI);
/// Coulomb's constant k = 1 / (4π ε₀) in N·m²/C².
pub const COULOMB_CONSTANT: f64 = 1.0 / (4.0 * PI * VACUUM_PERMITTIVITY);
/// Speed of light in vacuum _c_ in meters per second (m/s). Exact.
pub const SPEED_OF_LIGHT: f64 = 299_792_458.0;

/// Nano prefix (10⁻⁹).
pub const NANO: f64 = 1.0e-9;
/// Micro prefix (10⁻⁶).
pub const MICRO: f64 = 1.0e-6;
/// Milli prefix (10⁻³).
pub const MILLI: f64 = 1.0e-3;
/// Centi prefix (10⁻²).
pub const CENTI: f64 = 1.0e-2;
/// Giga prefix (10⁹).
pub const GIGA: f64 = 1.0e9;
/// Tesla to microtesla.
pub const TESLA_TO_MICROTESLA: f64 = 1.0e6;

/// Returns the angular frequency corresponding to a linear frequency `hz`.
#[inline]
#[must_use]
pub fn angular_frequency(hz: f64) -> f64 {
    2.0 * PI * hz
}

/// Returns the free-space wavelength in meters for a given frequency in hertz.
#[inline]
#[must_use]
pub fn wavelength_from_frequency(hz: f64) -> f64 {
    SPEED_OF_LIGHT / hz
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn wavelength_matches_reference() {
        let lambda = wavelength_from_frequency(1.0e9);
        assert_relative_eq!(lambda, 0.299_792_458, max_relative = 1.0e-9);
    }

    #[test]
    fn coulomb_constant_matches_textbook_value() {
        assert_relative_eq!(COULOMB_CONSTANT, 8.987_551_8e9, max_relative = 1.0e-7);
    }
}

//! Ring carrying the line charge density λ(φ) = λ0 sin φ in a uniform external field.

use std::f64::consts::{PI, TAU};

use crate::math::{Scalar, R3};
use crate::sweep::linspace;

/// Charged ring of radius `radius` in the z = 0 plane, centred at the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SinusoidalRing {
    /// Ring radius in meters.
    pub radius: Scalar,
    /// Peak line charge density λ0 in C/m.
    pub lambda0: Scalar,
}

impl SinusoidalRing {
    /// Creates a ring.
    #[must_use]
    pub fn new(radius: Scalar, lambda0: Scalar) -> Self {
        Self { radius, lambda0 }
    }

    /// Line charge density at azimuth `phi`.
    #[must_use]
    pub fn charge_density(&self, phi: Scalar) -> Scalar {
        self.lambda0 * phi.sin()
    }

    /// `samples` points on the ring (φ from 0 to 2π inclusive) with their charge density.
    #[must_use]
    pub fn sample(&self, samples: usize) -> Vec<(R3, Scalar)> {
        linspace(0.0, TAU, samples)
            .into_iter()
            .map(|phi| {
                let (s, c) = phi.sin_cos();
                (R3::new(self.radius * c, self.radius * s, 0.0), self.charge_density(phi))
            })
            .collect()
    }

    /// Closed-form dipole moment `p = π λ0 R² ŷ` in C·m.
    #[must_use]
    pub fn dipole_moment(&self) -> R3 {
        R3::new(0.0, PI * self.lambda0 * self.radius * self.radius, 0.0)
    }

    /// Dipole moment by midpoint quadrature of `∮ λ(φ) r R dφ` over `samples` arcs.
    #[must_use]
    pub fn dipole_moment_numeric(&self, samples: usize) -> R3 {
        let n = samples.max(1);
        let dphi = TAU / n as Scalar;
        (0..n).fold(R3::zeros(), |acc, k| {
            let phi = (k as Scalar + 0.5) * dphi;
            let (s, c) = phi.sin_cos();
            let r = R3::new(self.radius * c, self.radius * s, 0.0);
            acc + r * (self.charge_density(phi) * self.radius * dphi)
        })
    }
}

/// Torque `τ = p × E` on a dipole in a uniform field, in N·m.
#[must_use]
pub fn dipole_torque(dipole: R3, field: R3) -> R3 {
    dipole.cross(&field)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn numeric_dipole_matches_closed_form() {
        let ring = SinusoidalRing::new(0.1, 1.0);
        let numeric = ring.dipole_moment_numeric(400);
        let exact = ring.dipole_moment();
        assert_relative_eq!(numeric.y, exact.y, max_relative = 1e-9);
        assert_relative_eq!(numeric.x, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn torque_along_minus_z_for_field_along_x() {
        let ring = SinusoidalRing::new(0.2, 2.0);
        let e0 = 0.5;
        let tau = dipole_torque(ring.dipole_moment(), R3::new(e0, 0.0, 0.0));
        assert_relative_eq!(tau.z, -PI * 2.0 * 0.04 * e0, max_relative = 1e-12);
        assert_relative_eq!(tau.x, 0.0);
        assert_relative_eq!(tau.y, 0.0);
    }

    #[test]
    fn samples_span_the_full_circle() {
        let ring = SinusoidalRing::new(0.1, 1.0);
        let pts = ring.sample(100);
        assert_eq!(pts.len(), 100);
        assert_relative_eq!(pts[0].0.x, 0.1);
        assert_relative_eq!(pts[99].0.x, 0.1, epsilon = 1e-12);
        assert!(pts.iter().all(|(p, _)| (p.norm() - 0.1).abs() < 1e-12));
    }
}

//! Grounded conducting sphere centred at the origin in a uniform external field `E0 ẑ`.

use crate::constants::VACUUM_PERMITTIVITY;
use crate::math::{Scalar, R3};

/// Grounded conducting sphere immersed in a uniform field along +z.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConductingSphere {
    /// Sphere radius in meters.
    pub radius: Scalar,
    /// External field magnitude in V/m.
    pub external_field: Scalar,
}

impl ConductingSphere {
    /// Creates the configuration.
    #[must_use]
    pub fn new(radius: Scalar, external_field: Scalar) -> Self {
        Self { radius, external_field }
    }

    /// Potential `V = -E0 z (1 - R³/r³)` outside the sphere, zero on and inside it.
    #[must_use]
    pub fn potential(&self, point: R3) -> Scalar {
        let r = point.norm();
        if r < self.radius {
            return 0.0;
        }
        let ratio = self.radius / r;
        -self.external_field * point.z * (1.0 - ratio * ratio * ratio)
    }

    /// Electric field `E = -∇V`; zero inside the conductor.
    #[must_use]
    pub fn electric_field(&self, point: R3) -> R3 {
        let r = point.norm();
        if r < self.radius {
            return R3::zeros();
        }
        let r3 = r * r * r;
        let r5 = r3 * r * r;
        let a3 = self.radius.powi(3);
        let z_hat = R3::z();
        // ∇(z/r³) = ẑ/r³ - 3 z r/r⁵
        let grad = z_hat / r3 - point * (3.0 * point.z / r5);
        (z_hat - grad * a3) * self.external_field
    }

    /// Induced surface charge density σ(θ) = 3 ε₀ E0 cos θ in C/m², θ measured from +z.
    #[must_use]
    pub fn surface_charge_density(&self, theta: Scalar) -> Scalar {
        3.0 * VACUUM_PERMITTIVITY * self.external_field * theta.cos()
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn potential_vanishes_on_the_surface_and_inside() {
        let sphere = ConductingSphere::new(1.0, 2.0);
        let surface = R3::new(0.6, 0.0, 0.8);
        assert_relative_eq!(sphere.potential(surface), 0.0, epsilon = 1e-12);
        assert_eq!(sphere.potential(R3::new(0.1, 0.0, 0.2)), 0.0);
    }

    #[test]
    fn far_field_recovers_uniform_field() {
        let sphere = ConductingSphere::new(1.0, 1.5);
        let far = R3::new(0.0, 0.0, 1.0e3);
        assert_relative_eq!(sphere.potential(far), -1.5 * 1.0e3, max_relative = 1e-8);
        let e = sphere.electric_field(R3::new(1.0e3, 0.0, 0.0));
        assert_relative_eq!(e.z, 1.5, max_relative = 1e-8);
    }

    #[test]
    fn field_at_the_pole_is_three_times_external() {
        let sphere = ConductingSphere::new(0.5, 1.0);
        let e = sphere.electric_field(R3::new(0.0, 0.0, 0.5));
        assert_relative_eq!(e.z, 3.0, max_relative = 1e-12);
        assert_relative_eq!(
            sphere.surface_charge_density(0.0),
            VACUUM_PERMITTIVITY * e.z,
            max_relative = 1e-12
        );
    }

    #[test]
    fn field_vanishes_on_the_equator() {
        let sphere = ConductingSphere::new(1.0, 1.0);
        let e = sphere.electric_field(R3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(e.norm(), 0.0, epsilon = 1e-12);
        assert_relative_eq!(
            sphere.surface_charge_density(std::f64::consts::FRAC_PI_2),
            0.0,
            epsilon = 1e-24
        );
    }
}

//! Magnetics of a circular current loop centred at the origin in the z = 0 plane.
use std::f64::consts::PI;

use crate::constants::{MU0_OVER_4PI, VACUUM_PERMEABILITY};
use crate::math::{normalize_or_zero, Scalar, MIN_DISTANCE, R3};

const AGM_TOL: Scalar = 1.0e-15;
const AGM_MAX_ITER: usize = 32;

/// Arithmetic-geometric mean of `1` and `√(1 - m)`, with `Σ 2^(n-1) c_n²` for E(m).
fn agm(m: Scalar) -> (Scalar, Scalar) {
    let (mut a, mut b) = (1.0, (1.0 - m).sqrt());
    let mut weight = 0.5;
    let mut sum = weight * m;
    for _ in 0..AGM_MAX_ITER {
        let c = 0.5 * (a - b);
        if c.abs() <= AGM_TOL * a {
            break;
        }
        (a, b) = (0.5 * (a + b), (a * b).sqrt());
        weight *= 2.0;
        sum += weight * c * c;
    }
    (a, sum)
}

/// Complete elliptic integral of the first kind K(m), parameter `m = k²`; infinite at `m = 1`.
#[must_use]
pub fn ellipk(m: Scalar) -> Scalar {
    if m >= 1.0 {
        return Scalar::INFINITY;
    }
    PI / (2.0 * agm(m).0)
}

/// Complete elliptic integral of the second kind E(m), parameter `m = k²`.
#[must_use]
pub fn ellipe(m: Scalar) -> Scalar {
    if m >= 1.0 {
        return 1.0;
    }
    let (mean, sum) = agm(m);
    PI / (2.0 * mean) * (1.0 - sum)
}

/// Circular loop of radius `radius` carrying `current`, counter-clockwise seen from +z.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurrentLoop {
    /// Current in amperes.
    pub current: Scalar,
    /// Loop radius in meters.
    pub radius: Scalar,
}

impl CurrentLoop {
    /// Creates a loop.
    #[must_use]
    pub fn new(current: Scalar, radius: Scalar) -> Self {
        Self { current, radius }
    }

    /// Magnetic dipole moment `m = I π R²` in A·m².
    #[must_use]
    pub fn dipole_moment(&self) -> Scalar {
        self.current * PI * self.radius * self.radius
    }

    /// Point-dipole approximation of the loop field in tesla.
    ///
    /// `B = μ0 m/(4π) (3xz, 3yz, 3z² - r²) / (r⁵ + ε)`; finite at the origin.
    #[must_use]
    pub fn dipole_field(&self, point: R3) -> R3 {
        let r2 = point.norm_squared();
        let r5 = r2 * r2 * r2.sqrt() + MIN_DISTANCE;
        let prefactor = MU0_OVER_4PI * self.dipole_moment() / r5;
        R3::new(
            3.0 * point.x * point.z,
            3.0 * point.y * point.z,
            3.0 * point.z * point.z - r2,
        ) * prefactor
    }

    /// Exact on-axis field `μ0 I R² / (2 (R² + z²)^{3/2})` along +z.
    #[must_use]
    pub fn on_axis_field(&self, z: Scalar) -> Scalar {
        let q = self.radius * self.radius + z * z;
        VACUUM_PERMEABILITY * self.current * self.radius * self.radius / (2.0 * q * q.sqrt())
    }

    /// Exact off-axis `(B_ρ, B_z)` in tesla at cylindrical coordinates `(rho, z)`.
    ///
    /// Complete elliptic integrals per Montgomery & Terrell (1961) eqns. 12-13 with the
    /// `z / ρ` correction on `B_ρ`. Points on the axis use the closed form; points on the
    /// wire itself are singular and return infinities.
    #[must_use]
    pub fn exact_field(&self, rho: Scalar, z: Scalar) -> (Scalar, Scalar) {
        if rho.abs() < MIN_DISTANCE {
            return (0.0, self.on_axis_field(z));
        }
        let a = self.radius;
        let z2 = z * z;
        let rpr = a + rho;
        let q = rpr.mul_add(rpr, z2);
        let k2 = 4.0 * a * rho / q;
        let a0 = 2.0 * self.current / q.sqrt();
        let f = ellipk(k2);
        let s_over_q = ellipe(k2) / (1.0 - k2) / q;
        let hr = (z / rho) * a0 * s_over_q.mul_add(a * a + rho * rho + z2, -f);
        let hz = a0 * s_over_q.mul_add(a * a - rho * rho - z2, f);
        (MU0_OVER_4PI * hr, MU0_OVER_4PI * hz)
    }

    /// Exact field as a Cartesian vector.
    #[must_use]
    pub fn exact_field_cartesian(&self, point: R3) -> R3 {
        let rho = point.x.hypot(point.y);
        let (br, bz) = self.exact_field(rho, point.z);
        if rho < MIN_DISTANCE {
            return R3::new(0.0, 0.0, bz);
        }
        R3::new(br * point.x / rho, br * point.y / rho, bz)
    }
}

/// Polyline following a vector field, with the field magnitude at each vertex.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldLine {
    /// Vertices in order along the line.
    pub points: Vec<R3>,
    /// Field magnitude at each vertex.
    pub magnitudes: Vec<Scalar>,
}

/// Traces a field line through `seed` by fixed steps along the normalized field, `steps`
/// vertices in each direction. The seed appears once.
#[must_use]
pub fn trace_field_line<F>(field: F, seed: R3, step: Scalar, steps: usize) -> FieldLine
where
    F: Fn(R3) -> R3,
{
    let walk = |sign: Scalar| {
        let mut pos = seed;
        let mut points = Vec::with_capacity(steps);
        let mut mags = Vec::with_capacity(steps);
        for _ in 0..steps {
            let b = field(pos);
            let m = b.norm();
            points.push(pos);
            mags.push(m);
            pos += normalize_or_zero(b) * (sign * step);
        }
        (points, mags)
    };

    let (fwd_pts, fwd_mags) = walk(1.0);
    let (bwd_pts, bwd_mags) = walk(-1.0);

    let mut line = FieldLine::default();
    // backward half reversed, skipping its copy of the seed
    line.points.extend(bwd_pts.iter().skip(1).rev());
    line.magnitudes.extend(bwd_mags.iter().skip(1).rev());
    line.points.extend(fwd_pts);
    line.magnitudes.extend(fwd_mags);
    line
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::math::divergence;

    #[test]
    fn elliptic_integrals_match_reference_values() {
        assert_relative_eq!(ellipk(0.0), PI / 2.0, epsilon = 1e-15);
        assert_relative_eq!(ellipe(0.0), PI / 2.0, epsilon = 1e-15);
        assert_relative_eq!(ellipk(0.5), 1.854_074_677_301_372, max_relative = 1e-13);
        assert_relative_eq!(ellipe(0.5), 1.350_643_881_047_675_5, max_relative = 1e-13);
        assert_relative_eq!(ellipk(0.99), 3.695_637_362_989_875, max_relative = 1e-12);
        assert_relative_eq!(ellipe(0.99), 1.015_993_545_025_223_8, max_relative = 1e-12);
        assert!(ellipk(1.0).is_infinite());
        assert_relative_eq!(ellipe(1.0), 1.0);
    }

    #[test]
    fn center_field_is_mu0_i_over_2r() {
        let lp = CurrentLoop::new(2.0, 0.1);
        assert_relative_eq!(
            lp.on_axis_field(0.0),
            VACUUM_PERMEABILITY * 2.0 / 0.2,
            max_relative = 1e-12
        );
    }

    #[test]
    fn on_axis_field_matches_dipole_far_away() {
        let lp = CurrentLoop::new(1.0, 0.1);
        let z = 50.0 * lp.radius;
        let exact = lp.on_axis_field(z);
        let dipole = lp.dipole_field(R3::new(0.0, 0.0, z)).z;
        assert_relative_eq!(exact, dipole, max_relative = 1e-3);
    }

    #[test]
    fn off_axis_exact_field_matches_dipole_far_away() {
        let lp = CurrentLoop::new(1.5, 0.2);
        let p = R3::new(12.0, 4.0, 14.0);
        let exact = lp.exact_field_cartesian(p);
        let dipole = lp.dipole_field(p);
        assert_relative_eq!((exact - dipole).norm() / dipole.norm(), 0.0, epsilon = 2e-3);
    }

    #[test]
    fn exact_field_near_axis_is_continuous() {
        let lp = CurrentLoop::new(1.0, 0.3);
        let (br, bz) = lp.exact_field(1.0e-4, 0.2);
        assert_relative_eq!(bz, lp.on_axis_field(0.2), max_relative = 1e-5);
        assert!(br.abs() < 1e-3 * bz.abs());
    }

    #[test]
    fn dipole_field_is_divergence_free() {
        let lp = CurrentLoop::new(1.0, 0.1);
        let p = R3::new(0.4, -0.3, 0.5);
        let scale = lp.dipole_field(p).norm() / p.norm();
        let div = divergence(|x| lp.dipole_field(x), p, 1.0e-4);
        assert!(div.abs() < 1e-5 * scale);
    }

    #[test]
    fn traced_line_has_seed_once_and_unit_steps() {
        let lp = CurrentLoop::new(1.0, 0.1);
        let seed = R3::new(0.12, 0.0, 0.15);
        let line = trace_field_line(|p| lp.dipole_field(p), seed, 0.1, 25);
        assert_eq!(line.points.len(), 49);
        assert_eq!(line.points[24], seed);
        let step = (line.points[25] - line.points[24]).norm();
        assert_relative_eq!(step, 0.1, max_relative = 1e-6);
    }
}

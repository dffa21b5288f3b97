use crate::constants::COULOMB_CONSTANT;
use crate::math::{Scalar, MIN_DISTANCE, R3};

/// Point charge in coulombs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointCharge {
    /// Position in meters.
    pub position: R3,
    /// Charge in coulombs.
    pub charge_c: Scalar,
}

impl PointCharge {
    /// Creates a charge at `position`.
    #[must_use]
    pub fn new(position: R3, charge_c: Scalar) -> Self {
        Self { position, charge_c }
    }
}

/// Electric potential φ at `point` due to discrete point charges.
///
/// Distances below [`MIN_DISTANCE`] are clamped to it, so the potential stays finite (but
/// very large) on top of a charge.
#[must_use]
pub fn potential_from_point_charges(point: R3, charges: &[PointCharge]) -> Scalar {
    let mut phi = 0.0;
    for c in charges {
        let r = (point - c.position).norm().max(MIN_DISTANCE);
        phi += COULOMB_CONSTANT * c.charge_c / r;
    }
    phi
}

/// Electric field E at `point` due to discrete point charges.
///
/// A charge coincident with `point` contributes nothing.
#[must_use]
pub fn electric_field_from_point_charges(point: R3, charges: &[PointCharge]) -> R3 {
    let mut e = R3::zeros();
    for c in charges {
        let r_vec = point - c.position;
        let r = r_vec.norm();
        if r > MIN_DISTANCE {
            e += r_vec * (COULOMB_CONSTANT * c.charge_c / (r * r * r));
        }
    }
    e
}

/// Coulomb force on `first` exerted by `second`, in newtons.
///
/// The force points away from `second` for like charges and toward it otherwise. Coincident
/// charges yield the zero vector.
#[must_use]
pub fn coulomb_force(first: &PointCharge, second: &PointCharge) -> R3 {
    let r_vec = first.position - second.position;
    let r = r_vec.norm();
    if r <= MIN_DISTANCE {
        return R3::zeros();
    }
    r_vec * (COULOMB_CONSTANT * first.charge_c * second.charge_c / (r * r * r))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn potential_of_single_point_charge_matches_reference_axis() {
        let q = PointCharge::new(R3::zeros(), 1.0e-9);
        let phi = potential_from_point_charges(R3::new(0.0, 0.0, 1.0), &[q]);
        assert_relative_eq!(phi, COULOMB_CONSTANT * 1.0e-9, max_relative = 1.0e-12);
    }

    #[test]
    fn unit_charges_at_unit_distance_feel_coulomb_constant() {
        let a = PointCharge::new(R3::zeros(), 1.0);
        let b = PointCharge::new(R3::new(1.0, 0.0, 0.0), 1.0);
        let f = coulomb_force(&a, &b);
        assert_relative_eq!(f.norm(), COULOMB_CONSTANT, max_relative = 1.0e-12);
        // repulsion pushes `a` toward -x
        assert!(f.x < 0.0);
    }

    #[test]
    fn opposite_charges_attract_with_equal_and_opposite_forces() {
        let a = PointCharge::new(R3::new(-2.0, 0.0, 0.0), 1.0e-6);
        let b = PointCharge::new(R3::new(2.0, 0.0, 0.0), -1.0e-6);
        let on_a = coulomb_force(&a, &b);
        let on_b = coulomb_force(&b, &a);
        assert!(on_a.x > 0.0);
        assert_relative_eq!((on_a + on_b).norm(), 0.0, epsilon = 1.0e-18);
        assert_relative_eq!(on_a.norm(), COULOMB_CONSTANT * 1.0e-12 / 16.0, max_relative = 1e-12);
    }

    #[test]
    fn coincident_charges_produce_no_force() {
        let a = PointCharge::new(R3::new(1.0, 1.0, 0.0), 1.0e-6);
        assert_eq!(coulomb_force(&a, &a), R3::zeros());
    }

    #[test]
    fn field_is_inverse_square_and_zero_at_the_charge() {
        let q = PointCharge::new(R3::zeros(), 5.0e-9);
        let e1 = electric_field_from_point_charges(R3::new(1.0, 0.0, 0.0), &[q]);
        let e2 = electric_field_from_point_charges(R3::new(2.0, 0.0, 0.0), &[q]);
        assert_relative_eq!(e1.x / e2.x, 4.0, max_relative = 1e-12);
        assert_eq!(electric_field_from_point_charges(R3::zeros(), &[q]), R3::zeros());
    }
}

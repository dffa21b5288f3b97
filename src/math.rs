//! Shared numerical primitives anchored on `nalgebra`.

use nalgebra::{Vector2, Vector3};

/// Primary scalar type used across the crate.
pub type Scalar = f64;
/// Convenient alias for two-dimensional real vectors (plot plane coordinates).
pub type R2 = Vector2<Scalar>;
/// Convenient alias for three-dimensional real vectors.
pub type R3 = Vector3<Scalar>;

/// Distance below which a source point is treated as coincident with the observer.
pub const MIN_DISTANCE: Scalar = 1.0e-10;

/// Returns `v / |v|`, or the zero vector when `|v|` vanishes.
#[must_use]
pub fn normalize_or_zero(v: R3) -> R3 {
    let n = v.norm();
    if n > 0.0 {
        v / n
    } else {
        R3::zeros()
    }
}

/// Central-difference divergence of a vector field at `point` with step `h`.
#[must_use]
pub fn divergence<F>(field: F, point: R3, h: Scalar) -> Scalar
where
    F: Fn(R3) -> R3,
{
    let mut div = 0.0;
    for axis in 0..3 {
        let mut offset = R3::zeros();
        offset[axis] = h;
        div += (field(point + offset)[axis] - field(point - offset)[axis]) / (2.0 * h);
    }
    div
}

/// Rotates `p` for an orthographic view at elevation `elev` and azimuth `azim` (degrees)
/// and returns the screen-plane coordinates.
#[must_use]
pub fn project_orthographic(p: R3, elev_deg: Scalar, azim_deg: Scalar) -> R2 {
    let (se, ce) = elev_deg.to_radians().sin_cos();
    let (sa, ca) = azim_deg.to_radians().sin_cos();
    let horizontal = -sa * p.x + ca * p.y;
    let vertical = -se * (ca * p.x + sa * p.y) + ce * p.z;
    R2::new(horizontal, vertical)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn normalize_or_zero_handles_zero() {
        assert_eq!(normalize_or_zero(R3::zeros()), R3::zeros());
        let v = normalize_or_zero(R3::new(0.0, 3.0, 4.0));
        assert_relative_eq!(v.norm(), 1.0, epsilon = 1.0e-12);
    }

    #[test]
    fn divergence_of_radial_field_is_three() {
        let div = divergence(|p| p, R3::new(0.3, -0.2, 1.1), 1.0e-4);
        assert_relative_eq!(div, 3.0, epsilon = 1.0e-8);
    }

    #[test]
    fn side_view_projection_keeps_height() {
        let p = project_orthographic(R3::new(0.0, 2.0, 5.0), 0.0, 0.0);
        assert_relative_eq!(p.x, 2.0, epsilon = 1.0e-12);
        assert_relative_eq!(p.y, 5.0, epsilon = 1.0e-12);
    }
}

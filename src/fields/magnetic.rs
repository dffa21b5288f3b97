use std::f64::consts::PI;

use crate::constants::{MU0_OVER_4PI, VACUUM_PERMEABILITY};
use crate::math::{Scalar, MIN_DISTANCE, R2, R3};

/// Infinitely long straight wire perpendicular to the plot plane, current along +z.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InfiniteWire {
    /// Position of the wire in the plane (m).
    pub position: R2,
    /// Current in amperes; positive flows out of the plane.
    pub current: Scalar,
}

impl InfiniteWire {
    /// Creates a wire.
    #[must_use]
    pub fn new(position: R2, current: Scalar) -> Self {
        Self { position, current }
    }

    /// In-plane flux density in tesla, `μ0 I (-Δy, Δx) / (2π r² + 1e-10)`.
    #[must_use]
    pub fn flux_density(&self, point: R2) -> R2 {
        let d = point - self.position;
        let denom = 2.0 * PI * d.norm_squared() + MIN_DISTANCE;
        R2::new(-d.y, d.x) * (VACUUM_PERMEABILITY * self.current / denom)
    }
}

/// Superposed flux density of several parallel wires.
#[must_use]
pub fn flux_density_from_wires(point: R2, wires: &[InfiniteWire]) -> R2 {
    wires
        .iter()
        .fold(R2::zeros(), |acc, w| acc + w.flux_density(point))
}

/// Magnitude `μ0 I / (2π ρ)` of the field of an infinite wire at distance `rho`.
#[must_use]
pub fn infinite_wire_flux_density(current: Scalar, rho: Scalar) -> Scalar {
    VACUUM_PERMEABILITY * current / (2.0 * PI * rho)
}

/// Straight wire segment in 3D.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WireSegment3D {
    /// Start point (m).
    pub start: R3,
    /// End point (m).
    pub end: R3,
}

impl WireSegment3D {
    /// Segment along z centred on the origin with total `length`.
    #[must_use]
    pub fn along_z(length: Scalar) -> Self {
        Self {
            start: R3::new(0.0, 0.0, -0.5 * length),
            end: R3::new(0.0, 0.0, 0.5 * length),
        }
    }
}

/// Steady current flowing from `segment.start` to `segment.end`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineCurrent {
    /// Wire geometry.
    pub segment: WireSegment3D,
    /// Current in amperes.
    pub current: Scalar,
}

/// Biot-Savart flux density of one line current, midpoint quadrature over `samples` elements.
///
/// `dB = μ0 I/(4π) · dl × r / (|r| + ε)³`.
#[must_use]
pub fn magnetic_field_segment(point: R3, line: &LineCurrent, samples: usize) -> R3 {
    let m = samples.max(1);
    let dl = (line.segment.end - line.segment.start) / m as Scalar;
    let mut b = R3::zeros();
    for k in 0..m {
        let mid = line.segment.start + dl * (k as Scalar + 0.5);
        let r_vec = point - mid;
        let r = r_vec.norm() + MIN_DISTANCE;
        b += dl.cross(&r_vec) * (MU0_OVER_4PI * line.current / (r * r * r));
    }
    b
}

/// Closed-form flux density of a finite straight segment.
///
/// Returns zero for points on the line through the segment.
#[must_use]
pub fn magnetic_field_segment_exact(point: R3, line: &LineCurrent) -> R3 {
    let axis = line.segment.end - line.segment.start;
    let length = axis.norm();
    if length <= MIN_DISTANCE {
        return R3::zeros();
    }
    let u = axis / length;
    let to_start = line.segment.start - point;
    let to_end = line.segment.end - point;
    // perpendicular offset from the line to the observer
    let rho_vec = -(to_start - u * to_start.dot(&u));
    let rho2 = rho_vec.norm_squared();
    if rho2 <= MIN_DISTANCE * MIN_DISTANCE {
        return R3::zeros();
    }
    let cos_end = to_end.dot(&u) / to_end.norm();
    let cos_start = to_start.dot(&u) / to_start.norm();
    u.cross(&rho_vec) * (MU0_OVER_4PI * line.current * (cos_end - cos_start) / rho2)
}

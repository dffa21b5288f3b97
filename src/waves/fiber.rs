//! Ray optics inside a straight step-index fiber.

use crate::math::{Scalar, R3};

const HIT_EPS: Scalar = 1.0e-9;

/// Critical angle `asin(n2/n1)` in degrees, or 90° when the core is not denser.
#[must_use]
pub fn critical_angle_deg(n_core: Scalar, n_cladding: Scalar) -> Scalar {
    if n_core <= n_cladding {
        return 90.0;
    }
    (n_cladding / n_core).asin().to_degrees()
}

/// Numerical aperture `√(n1² - n2²)`; zero when the core is not denser.
#[must_use]
pub fn numerical_aperture(n_core: Scalar, n_cladding: Scalar) -> Scalar {
    (n_core * n_core - n_cladding * n_cladding).max(0.0).sqrt()
}

/// Half-angle of the acceptance cone from air, in degrees.
#[must_use]
pub fn acceptance_angle_deg(n_core: Scalar, n_cladding: Scalar) -> Scalar {
    numerical_aperture(n_core, n_cladding).min(1.0).asin().to_degrees()
}

/// Why a trace stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// The ray reached the far end face.
    ReachedEnd,
    /// The launch angle was not above the critical angle, so the ray left the core.
    Refracted,
    /// The wall-hit budget ran out.
    MaxBounces,
}

/// Polyline of a traced ray.
#[derive(Debug, Clone, PartialEq)]
pub struct RayPath {
    /// Launch point, every wall hit, and the end point if reached.
    pub points: Vec<R3>,
    /// Wall hits where total internal reflection occurred.
    pub reflections: Vec<R3>,
    /// Angle of incidence from the wall normal at each hit, degrees.
    pub incidence_deg: Vec<Scalar>,
    /// Stop reason.
    pub termination: Termination,
}

/// Straight fiber along +z from `z = 0` to `z = length`; lengths in any consistent unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepIndexFiber {
    /// Core refractive index n1.
    pub n_core: Scalar,
    /// Cladding refractive index n2.
    pub n_cladding: Scalar,
    /// Core radius.
    pub core_radius: Scalar,
    /// Fiber length.
    pub length: Scalar,
}

impl StepIndexFiber {
    /// Critical angle of the core/cladding interface in degrees.
    #[must_use]
    pub fn critical_angle_deg(&self) -> Scalar {
        critical_angle_deg(self.n_core, self.n_cladding)
    }

    /// Launch point `(0, -0.8 R, 0)`.
    #[must_use]
    pub fn launch_point(&self) -> R3 {
        R3::new(0.0, -0.8 * self.core_radius, 0.0)
    }

    /// Traces a ray launched at `angle_deg` from the axis in the x–z plane, following at
    /// most `max_hits` wall hits.
    ///
    /// The ray stays in the core while the launch angle exceeds the critical angle; the
    /// local incidence at each hit is recorded in [`RayPath::incidence_deg`] only.
    #[must_use]
    pub fn trace(&self, angle_deg: Scalar, max_hits: usize) -> RayPath {
        let critical = self.critical_angle_deg();
        let (s, c) = angle_deg.to_radians().sin_cos();
        let mut dir = R3::new(s, 0.0, c);
        let mut pos = self.launch_point();
        let mut path = RayPath {
            points: vec![pos],
            reflections: Vec::new(),
            incidence_deg: Vec::new(),
            termination: Termination::MaxBounces,
        };

        for _ in 0..max_hits {
            if pos.z >= self.length {
                path.termination = Termination::ReachedEnd;
                return path;
            }
            let a = dir.x * dir.x + dir.y * dir.y;
            if a < HIT_EPS {
                path.points.push(self.clip_to_end(pos, dir));
                path.termination = Termination::ReachedEnd;
                return path;
            }
            let b = 2.0 * (pos.x * dir.x + pos.y * dir.y);
            let cc = pos.x * pos.x + pos.y * pos.y - self.core_radius * self.core_radius;
            let disc = (b * b - 4.0 * a * cc).max(0.0);
            // far root: the near one is the wall the ray is leaving
            let t = (-b + disc.sqrt()) / (2.0 * a);
            if t <= HIT_EPS {
                path.points.push(self.clip_to_end(pos, dir));
                path.termination = Termination::ReachedEnd;
                return path;
            }
            let hit = pos + dir * t;
            if hit.z > self.length {
                path.points.push(self.clip_to_end(pos, dir));
                path.termination = Termination::ReachedEnd;
                return path;
            }
            path.points.push(hit);

            let normal = R3::new(hit.x, hit.y, 0.0) / hit.x.hypot(hit.y);
            let cos_i = dir.dot(&normal);
            let incidence = cos_i.abs().min(1.0).acos().to_degrees();
            path.incidence_deg.push(incidence);
            if angle_deg > critical {
                dir -= normal * (2.0 * cos_i);
                path.reflections.push(hit);
                pos = hit;
            } else {
                path.termination = Termination::Refracted;
                return path;
            }
        }
        path
    }

    fn clip_to_end(&self, pos: R3, dir: R3) -> R3 {
        if dir.z <= 0.0 {
            return pos;
        }
        pos + dir * ((self.length - pos.z) / dir.z)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn fiber(length: Scalar) -> StepIndexFiber {
        StepIndexFiber {
            n_core: 1.5,
            n_cladding: 1.4,
            core_radius: 5.0,
            length,
        }
    }

    #[test]
    fn critical_angle_and_aperture() {
        assert_relative_eq!(critical_angle_deg(1.5, 1.4), 68.9605, epsilon = 1e-3);
        assert_relative_eq!(critical_angle_deg(1.4, 1.5), 90.0);
        assert_relative_eq!(numerical_aperture(1.5, 1.4), 0.29f64.sqrt(), max_relative = 1e-12);
        assert_relative_eq!(numerical_aperture(1.4, 1.5), 0.0);
        assert!(acceptance_angle_deg(1.5, 1.4) > 30.0);
    }

    #[test]
    fn axial_ray_goes_straight_to_the_end() {
        let path = fiber(20.0).trace(0.0, 20);
        assert_eq!(path.termination, Termination::ReachedEnd);
        assert_eq!(path.points.len(), 2);
        assert!(path.reflections.is_empty());
        assert_relative_eq!(path.points[1].z, 20.0);
        assert_relative_eq!(path.points[1].y, -4.0);
    }

    #[test]
    fn steep_launch_is_guided() {
        let f = fiber(20.0);
        let path = f.trace(80.0, 40);
        assert_eq!(path.termination, Termination::ReachedEnd);
        assert_eq!(path.reflections.len(), path.incidence_deg.len());
        assert!(path.reflections.len() > 10);
        for p in &path.points {
            assert!(p.x.hypot(p.y) <= f.core_radius + 1e-9);
            assert!(p.z <= f.length + 1e-9);
        }
        assert_relative_eq!(path.points.last().expect("points").z, 20.0, epsilon = 1e-9);
    }

    #[test]
    fn shallow_launch_escapes_at_first_hit() {
        let path = fiber(20.0).trace(10.0, 20);
        assert_eq!(path.termination, Termination::Refracted);
        assert_eq!(path.points.len(), 2);
        assert!(path.reflections.is_empty());
        assert_relative_eq!(path.points[1].x, 3.0, epsilon = 1e-9);
        assert_eq!(path.incidence_deg.len(), 1);
    }

    #[test]
    fn hit_budget_limits_long_fibers() {
        let path = fiber(5000.0).trace(80.0, 20);
        assert_eq!(path.termination, Termination::MaxBounces);
        assert_eq!(path.reflections.len(), 20);
        assert_eq!(path.points.len(), 21);
    }

    #[test]
    fn matched_indices_never_reflect() {
        let f = StepIndexFiber { n_cladding: 1.5, ..fiber(20.0) };
        let path = f.trace(10.0, 20);
        assert_eq!(path.termination, Termination::Refracted);
    }
}

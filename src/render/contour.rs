//! Marching-squares iso-lines over a sampled scalar field.

use crate::fields::ScalarField2;
use crate::math::Scalar;

/// One straight piece of an iso-line in data coordinates.
pub type Segment = [(Scalar, Scalar); 2];

/// Iso-line segments of `field` at `level`. Cells touching a non-finite sample are skipped.
#[must_use]
pub fn iso_segments(field: &ScalarField2, level: Scalar) -> Vec<Segment> {
    let grid = &field.grid;
    let (nx, ny) = (grid.xs.len(), grid.ys.len());
    let mut out = Vec::new();
    if nx < 2 || ny < 2 {
        return out;
    }
    for j in 0..ny - 1 {
        for i in 0..nx - 1 {
            let v00 = field.at(i, j);
            let v10 = field.at(i + 1, j);
            let v11 = field.at(i + 1, j + 1);
            let v01 = field.at(i, j + 1);
            if ![v00, v10, v11, v01].iter().all(|v| v.is_finite()) {
                continue;
            }
            let (x0, x1) = (grid.xs[i], grid.xs[i + 1]);
            let (y0, y1) = (grid.ys[j], grid.ys[j + 1]);
            let cross = |a: Scalar, b: Scalar| -> Option<Scalar> {
                ((a >= level) != (b >= level)).then(|| (level - a) / (b - a))
            };
            // edges in order: bottom, right, top, left
            let edges = [
                cross(v00, v10).map(|t| ((x1 - x0).mul_add(t, x0), y0)),
                cross(v10, v11).map(|t| (x1, (y1 - y0).mul_add(t, y0))),
                cross(v01, v11).map(|t| ((x1 - x0).mul_add(t, x0), y1)),
                cross(v00, v01).map(|t| (x0, (y1 - y0).mul_add(t, y0))),
            ];
            match edges {
                [Some(b), Some(r), Some(t), Some(l)] => {
                    let centre = 0.25 * (v00 + v10 + v11 + v01);
                    if (centre >= level) == (v10 >= level) {
                        out.push([l, b]);
                        out.push([r, t]);
                    } else {
                        out.push([b, r]);
                        out.push([t, l]);
                    }
                }
                _ => {
                    let mut hits = edges.into_iter().flatten();
                    if let (Some(p), Some(q)) = (hits.next(), hits.next()) {
                        out.push([p, q]);
                    }
                }
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::Grid2;

    #[test]
    fn circle_of_radius_one() {
        let field = Grid2::square(-2.0, 2.0, 41).map_scalar(|p| p.norm_squared());
        let segments = iso_segments(&field, 1.0);
        assert!(segments.len() > 20);
        for seg in &segments {
            for (x, y) in seg {
                assert!((x.hypot(*y) - 1.0).abs() < 5e-3);
            }
        }
    }

    #[test]
    fn out_of_range_level_and_nan_cells_give_nothing() {
        let field = Grid2::square(-1.0, 1.0, 5).map_scalar(|p| p.x);
        assert!(iso_segments(&field, 3.0).is_empty());
        let holes = Grid2::square(-1.0, 1.0, 5).map_scalar(|_| f64::NAN);
        assert!(iso_segments(&holes, 0.0).is_empty());
    }

    #[test]
    fn saddle_cell_yields_two_segments() {
        let field = Grid2::square(0.0, 1.0, 2).map_scalar(|p| (p.x - 0.5) * (p.y - 0.5));
        assert_eq!(iso_segments(&field, 0.0).len(), 2);
    }
}

//! Rectilinear sampling meshes and the fields sampled on them.

use crate::math::{Scalar, R2};
use crate::sweep::linspace;

/// Rectilinear mesh; samples are stored row-major with `ys` as the outer index.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid2 {
    /// Column coordinates.
    pub xs: Vec<Scalar>,
    /// Row coordinates.
    pub ys: Vec<Scalar>,
}

impl Grid2 {
    /// Mesh of `nx` × `ny` samples covering `[x0, x1] × [y0, y1]` with both endpoints.
    #[must_use]
    pub fn new(x: (Scalar, Scalar), y: (Scalar, Scalar), nx: usize, ny: usize) -> Self {
        Self {
            xs: linspace(x.0, x.1, nx),
            ys: linspace(y.0, y.1, ny),
        }
    }

    /// Square mesh with `n` samples per axis over `[lo, hi]²`.
    #[must_use]
    pub fn square(lo: Scalar, hi: Scalar, n: usize) -> Self {
        Self::new((lo, hi), (lo, hi), n, n)
    }

    /// Number of samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.xs.len() * self.ys.len()
    }

    /// True when the mesh holds no samples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Flat index of the sample at column `i`, row `j`.
    #[inline]
    #[must_use]
    pub fn index(&self, i: usize, j: usize) -> usize {
        j * self.xs.len() + i
    }

    /// Iterates over `(flat_index, point)` in storage order.
    pub fn points(&self) -> impl Iterator<Item = (usize, R2)> + '_ {
        self.ys.iter().enumerate().flat_map(move |(j, &y)| {
            self.xs
                .iter()
                .enumerate()
                .map(move |(i, &x)| (self.index(i, j), R2::new(x, y)))
        })
    }

    /// Half spacing between neighbouring columns and rows, used for cell extents.
    #[must_use]
    pub fn half_cell(&self) -> (Scalar, Scalar) {
        let half = |v: &[Scalar]| {
            if v.len() > 1 {
                0.5 * (v[v.len() - 1] - v[0]).abs() / (v.len() - 1) as Scalar
            } else {
                0.5
            }
        };
        (half(&self.xs), half(&self.ys))
    }

    /// Evaluates `f` at each sample.
    #[must_use]
    pub fn map_scalar<F>(&self, mut f: F) -> ScalarField2
    where
        F: FnMut(R2) -> Scalar,
    {
        let values = self.points().map(|(_, p)| f(p)).collect();
        ScalarField2 { grid: self.clone(), values }
    }

    /// Evaluates the vector-valued `f` at each sample.
    #[must_use]
    pub fn map_vector<F>(&self, mut f: F) -> VectorField2
    where
        F: FnMut(R2) -> R2,
    {
        let mut u = Vec::with_capacity(self.len());
        let mut v = Vec::with_capacity(self.len());
        for (_, p) in self.points() {
            let value = f(p);
            u.push(value.x);
            v.push(value.y);
        }
        VectorField2 { grid: self.clone(), u, v }
    }
}

/// Scalar quantity sampled on a [`Grid2`].
#[derive(Debug, Clone, PartialEq)]
pub struct ScalarField2 {
    /// Sampling mesh.
    pub grid: Grid2,
    /// Values in storage order.
    pub values: Vec<Scalar>,
}

impl ScalarField2 {
    /// Value at column `i`, row `j`.
    #[must_use]
    pub fn at(&self, i: usize, j: usize) -> Scalar {
        self.values[self.grid.index(i, j)]
    }

    /// Smallest and largest finite values, if any.
    #[must_use]
    pub fn finite_range(&self) -> Option<(Scalar, Scalar)> {
        self.values
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold(None::<(Scalar, Scalar)>, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }

    /// Largest finite absolute value, zero for an empty field.
    #[must_use]
    pub fn max_abs(&self) -> Scalar {
        self.values
            .iter()
            .filter(|v| v.is_finite())
            .fold(0.0, |acc: Scalar, v| acc.max(v.abs()))
    }
}

/// Planar vector quantity sampled on a [`Grid2`].
#[derive(Debug, Clone, PartialEq)]
pub struct VectorField2 {
    /// Sampling mesh.
    pub grid: Grid2,
    /// First component in storage order.
    pub u: Vec<Scalar>,
    /// Second component in storage order.
    pub v: Vec<Scalar>,
}

impl VectorField2 {
    /// Component vector at flat index `k`.
    #[must_use]
    pub fn vector(&self, k: usize) -> R2 {
        R2::new(self.u[k], self.v[k])
    }

    /// Euclidean magnitude at each sample.
    #[must_use]
    pub fn magnitude(&self) -> ScalarField2 {
        let values = self
            .u
            .iter()
            .zip(&self.v)
            .map(|(u, v)| u.hypot(*v))
            .collect();
        ScalarField2 { grid: self.grid.clone(), values }
    }

    /// Unit vectors; samples whose magnitude is at or below `threshold` become zero.
    #[must_use]
    pub fn normalized(&self, threshold: Scalar) -> Self {
        let mut u = Vec::with_capacity(self.u.len());
        let mut v = Vec::with_capacity(self.v.len());
        for (a, b) in self.u.iter().zip(&self.v) {
            let m = a.hypot(*b);
            if m > threshold {
                u.push(a / m);
                v.push(b / m);
            } else {
                u.push(0.0);
                v.push(0.0);
            }
        }
        Self { grid: self.grid.clone(), u, v }
    }
}

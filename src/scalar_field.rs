// src/scalar_field.rs

use crate::error::{Result, SimError};
use crate::grid::{Grid1D, Grid2D};

/// Scalar field sampled on a 1D grid.
#[derive(Debug, Clone, PartialEq)]
pub struct ScalarField1D {
    pub grid: Grid1D,
    pub data: Vec<f64>,
}

impl ScalarField1D {
    /// Create a zero field on the given grid.
    pub fn zeros(grid: Grid1D) -> Self {
        Self {
            grid,
            data: vec![0.0; grid.nx],
        }
    }

    /// Sample `f(x)` at every grid point.
    pub fn from_fn(grid: Grid1D, f: impl Fn(f64) -> f64) -> Self {
        let data = (0..grid.nx).map(|i| f(grid.x(i))).collect();
        Self { grid, data }
    }

    /// Wrap existing samples; length must match the grid.
    pub fn from_vec(grid: Grid1D, data: Vec<f64>) -> Result<Self> {
        if data.len() != grid.nx {
            return Err(SimError::ShapeMismatch {
                context: "ScalarField1D::from_vec",
                expected: grid.nx,
                found: data.len(),
            });
        }
        Ok(Self { grid, data })
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Sum of squared samples.
    pub fn sum_sq(&self) -> f64 {
        self.data.iter().map(|v| v * v).sum()
    }

    pub fn all_finite(&self) -> bool {
        self.data.iter().all(|v| v.is_finite())
    }
}

/// Scalar field on a periodic 2D grid (row-major, `idx = j*nx + i`).
#[derive(Debug, Clone, PartialEq)]
pub struct ScalarField2D {
    pub grid: Grid2D,
    pub data: Vec<f64>,
}

impl ScalarField2D {
    pub fn zeros(grid: Grid2D) -> Self {
        Self {
            grid,
            data: vec![0.0; grid.n_cells()],
        }
    }

    #[inline]
    pub fn idx(&self, i: usize, j: usize) -> usize {
        self.grid.idx(i, j)
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.data[self.idx(i, j)]
    }

    #[inline]
    pub fn set(&mut self, i: usize, j: usize, v: f64) {
        let idx = self.idx(i, j);
        self.data[idx] = v;
    }

    pub fn sum_sq(&self) -> f64 {
        self.data.iter().map(|v| v * v).sum()
    }

    pub fn all_finite(&self) -> bool {
        self.data.iter().all(|v| v.is_finite())
    }

    /// (min, max) over finite samples; `None` if there are none.
    pub fn finite_range(&self) -> Option<(f64, f64)> {
        let mut lo = f64::INFINITY;
        let mut hi = f64::NEG_INFINITY;
        for &v in self.data.iter().filter(|v| v.is_finite()) {
            lo = lo.min(v);
            hi = hi.max(v);
        }
        if lo.is_finite() && hi.is_finite() {
            Some((lo, hi))
        } else {
            None
        }
    }
}

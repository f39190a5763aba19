// src/grid.rs

use crate::error::{Result, SimError};

/// Uniform 1D grid with `nx` points spanning `[0, lx]` (both endpoints sampled).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Grid1D {
    pub nx: usize,
    pub lx: f64,
    pub dx: f64,
}

impl Grid1D {
    /// Create a grid of `nx` points over `[0, lx]`; spacing is `lx / (nx - 1)`.
    pub fn new(nx: usize, lx: f64) -> Result<Self> {
        if nx < 3 {
            return Err(SimError::InvalidGrid(format!(
                "1D grid needs at least 3 points for periodic ghost cells, got nx={nx}"
            )));
        }
        if !(lx.is_finite() && lx > 0.0) {
            return Err(SimError::InvalidGrid(format!(
                "1D extent must be positive and finite, got lx={lx}"
            )));
        }
        Ok(Self {
            nx,
            lx,
            dx: lx / (nx - 1) as f64,
        })
    }

    /// Coordinate of point `i`.
    #[inline]
    pub fn x(&self, i: usize) -> f64 {
        i as f64 * self.dx
    }
}

/// Square-cell 2D grid with periodic neighbours in both directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid2D {
    pub nx: usize,
    pub ny: usize,
}

impl Grid2D {
    pub fn new(nx: usize, ny: usize) -> Result<Self> {
        if nx == 0 || ny == 0 {
            return Err(SimError::InvalidGrid(format!(
                "2D grid must be non-empty, got {nx}x{ny}"
            )));
        }
        Ok(Self { nx, ny })
    }

    /// Total number of cells.
    pub fn n_cells(&self) -> usize {
        self.nx * self.ny
    }

    /// Convert (i, j) indices to a flat index into a 1D array.
    #[inline]
    pub fn idx(&self, i: usize, j: usize) -> usize {
        debug_assert!(i < self.nx && j < self.ny);
        j * self.nx + i
    }

    /// Flat index of (i + di, j + dj) with periodic wrap-around.
    #[inline]
    pub fn idx_wrapped(&self, i: usize, j: usize, di: isize, dj: isize) -> usize {
        let ii = (i as isize + di).rem_euclid(self.nx as isize) as usize;
        let jj = (j as isize + dj).rem_euclid(self.ny as isize) as usize;
        self.idx(ii, jj)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_indexing_is_consistent() {
        let g = Grid2D::new(4, 3).unwrap();
        // Check a few indices by hand
        assert_eq!(g.idx(0, 0), 0);
        assert_eq!(g.idx(1, 0), 1);
        assert_eq!(g.idx(0, 1), 4);
        assert_eq!(g.idx(3, 2), 11); // (j=2)*4 + i=3 = 11
        assert_eq!(g.n_cells(), 12);
    }

    #[test]
    fn wrapped_index_crosses_both_edges() {
        let g = Grid2D::new(4, 3).unwrap();
        assert_eq!(g.idx_wrapped(0, 0, -1, 0), g.idx(3, 0));
        assert_eq!(g.idx_wrapped(3, 2, 1, 1), g.idx(0, 0));
        assert_eq!(g.idx_wrapped(1, 0, 0, -1), g.idx(1, 2));
    }

    #[test]
    fn grid_1d_spacing_includes_endpoints() {
        let g = Grid1D::new(300, 10.0).unwrap();
        assert!((g.x(299) - 10.0).abs() < 1e-12);
        assert!((g.dx - 10.0 / 299.0).abs() < 1e-15);
    }

    #[test]
    fn degenerate_grids_are_rejected() {
        assert!(Grid1D::new(2, 1.0).is_err());
        assert!(Grid1D::new(10, 0.0).is_err());
        assert!(Grid2D::new(0, 5).is_err());
    }
}

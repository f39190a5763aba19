// src/finite_diff.rs
//
// Finite-difference operators used by the steppers and the energy diagnostic.
//
// - `gradient`: second-order central differences in the interior, first-order
//   one-sided differences at the two end points (no wrap-around).
// - `laplacian_periodic`: five-point stencil on a periodic 2D grid, unit spacing.

use crate::grid::Grid2D;

/// First derivative of `u` with spacing `dx`, written into `out`.
pub fn gradient(u: &[f64], dx: f64, out: &mut [f64]) {
    let n = u.len();
    assert_eq!(out.len(), n, "gradient: output length mismatch");
    if n < 2 {
        out.iter_mut().for_each(|v| *v = 0.0);
        return;
    }

    let inv_2dx = 0.5 / dx;
    for i in 1..n - 1 {
        out[i] = (u[i + 1] - u[i - 1]) * inv_2dx;
    }
    out[0] = (u[1] - u[0]) / dx;
    out[n - 1] = (u[n - 1] - u[n - 2]) / dx;
}

/// Second derivative as the gradient of the gradient.
///
/// `scratch` receives the first derivative and is left holding it.
pub fn second_derivative(u: &[f64], dx: f64, scratch: &mut [f64], out: &mut [f64]) {
    gradient(u, dx, scratch);
    gradient(scratch, dx, out);
}

/// Periodic five-point Laplacian of `f` (unit spacing), written into `out`.
pub fn laplacian_periodic(grid: &Grid2D, f: &[f64], out: &mut [f64]) {
    assert_eq!(f.len(), grid.n_cells(), "laplacian: input length mismatch");
    assert_eq!(out.len(), grid.n_cells(), "laplacian: output length mismatch");

    for j in 0..grid.ny {
        for i in 0..grid.nx {
            let idx = grid.idx(i, j);
            let right = f[grid.idx_wrapped(i, j, 1, 0)];
            let left = f[grid.idx_wrapped(i, j, -1, 0)];
            let up = f[grid.idx_wrapped(i, j, 0, 1)];
            let down = f[grid.idx_wrapped(i, j, 0, -1)];
            out[idx] = right + left + up + down - 4.0 * f[idx];
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn gradient_is_exact_on_linear_data() {
        let dx = 0.1;
        let u: Vec<f64> = (0..20).map(|i| 3.0 * i as f64 * dx + 1.0).collect();
        let mut du = vec![0.0; u.len()];
        gradient(&u, dx, &mut du);
        for v in du {
            assert_relative_eq!(v, 3.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn second_derivative_of_quadratic_in_interior() {
        // u = x^2 -> u'' = 2 away from the two cells next to each end
        let dx = 0.05;
        let u: Vec<f64> = (0..40).map(|i| (i as f64 * dx).powi(2)).collect();
        let mut scratch = vec![0.0; u.len()];
        let mut d2 = vec![0.0; u.len()];
        second_derivative(&u, dx, &mut scratch, &mut d2);
        for &v in &d2[2..u.len() - 2] {
            assert_relative_eq!(v, 2.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn laplacian_of_constant_is_zero() {
        let grid = Grid2D::new(5, 4).unwrap();
        let f = vec![1.5; grid.n_cells()];
        let mut lap = vec![9.0; grid.n_cells()];
        laplacian_periodic(&grid, &f, &mut lap);
        assert!(lap.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn laplacian_of_corner_spike_wraps() {
        let grid = Grid2D::new(4, 4).unwrap();
        let mut f = vec![0.0; grid.n_cells()];
        f[grid.idx(0, 0)] = 1.0;
        let mut lap = vec![0.0; grid.n_cells()];
        laplacian_periodic(&grid, &f, &mut lap);

        assert_eq!(lap[grid.idx(0, 0)], -4.0);
        assert_eq!(lap[grid.idx(3, 0)], 1.0);
        assert_eq!(lap[grid.idx(0, 3)], 1.0);
        assert_eq!(lap[grid.idx(1, 0)], 1.0);
        assert_eq!(lap[grid.idx(0, 1)], 1.0);
        // Stencil conserves the sum on a periodic grid
        assert_relative_eq!(lap.iter().sum::<f64>(), 0.0, epsilon = 1e-15);
    }
}

// src/initial_states.rs
//
// Initial conditions and the static curvature profile.
//
// Both solvers start at rest: the "previous" state is a copy of the initial
// state, so the first leapfrog step sees zero velocity.

use crate::grid::{Grid1D, Grid2D};
use crate::params::SineTerm;
use crate::scalar_field::{ScalarField1D, ScalarField2D};

/// Gaussian pulse `exp(-sharpness * (x - x0)^2)`.
pub fn gaussian_pulse(grid: Grid1D, x0: f64, sharpness: f64) -> ScalarField1D {
    ScalarField1D::from_fn(grid, |x| (-sharpness * (x - x0).powi(2)).exp())
}

/// Static coefficient field `sum_k a_k * sin(k_k * x)`.
pub fn curvature_profile(grid: Grid1D, terms: &[SineTerm]) -> ScalarField1D {
    ScalarField1D::from_fn(grid, |x| {
        terms
            .iter()
            .map(|t| t.amplitude * (t.wavenumber * x).sin())
            .sum()
    })
}

/// All zeros except `amplitude` at cell (i, j).
pub fn point_kick(grid: Grid2D, i: usize, j: usize, amplitude: f64) -> ScalarField2D {
    let mut f = ScalarField2D::zeros(grid);
    f.set(i, j, amplitude);
    f
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn gaussian_pulse_is_symmetric_about_center() {
        let grid = Grid1D::new(300, 10.0).unwrap();
        let u = gaussian_pulse(grid, 5.0, 100.0);

        // x = 5.0 sits halfway between indices 149 and 150
        let n = u.len();
        for i in 0..n / 2 {
            assert_relative_eq!(u.data[i], u.data[n - 1 - i], epsilon = 1e-12);
        }
        // Peak samples sit dx/2 either side of the centre, so neither reaches 1
        let peak = (-100.0 * (grid.x(149) - 5.0).powi(2)).exp();
        assert_relative_eq!(u.data[149], peak, epsilon = 1e-15);
        assert_relative_eq!(u.data[150], peak, epsilon = 1e-12);
        assert!(peak > 0.97 && peak < 1.0);
        assert!(u.data[0] < 1e-300);
    }

    #[test]
    fn curvature_profile_sums_two_sines() {
        let grid = Grid1D::new(11, 1.0).unwrap();
        let terms = [
            SineTerm {
                amplitude: 1.0,
                wavenumber: 1.0,
            },
            SineTerm {
                amplitude: 0.5,
                wavenumber: 2.0,
            },
        ];
        let c = curvature_profile(grid, &terms);
        for (i, &v) in c.data.iter().enumerate() {
            let x = grid.x(i);
            assert_relative_eq!(v, x.sin() + 0.5 * (2.0 * x).sin(), epsilon = 1e-15);
        }
    }

    #[test]
    fn point_kick_has_single_nonzero_cell() {
        let grid = Grid2D::new(8, 8).unwrap();
        let f = point_kick(grid, 3, 5, 2.0);
        assert_eq!(f.get(3, 5), 2.0);
        assert_eq!(f.data.iter().filter(|&&v| v != 0.0).count(), 1);
    }
}

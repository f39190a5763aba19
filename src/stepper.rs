// src/stepper.rs
//
// Explicit leapfrog updates for the two wave variants.
//
// 1D (curvature-resisted):
//   next = 2 u - u_prev + dt^2 * (u_xx - coupling * u_x * C_x)
//   followed by periodic ghost cells: next[0] = next[N-2], next[N-1] = next[1].
//
// 2D (damped, periodic five-point Laplacian):
//   next = (2 - d) u - (1 - d) u_prev + w * Lap(u)
//
// Neither update guards against instability; see `params::check_stability`.

use crate::finite_diff::{gradient, laplacian_periodic, second_derivative};
use crate::grid::{Grid1D, Grid2D};
use crate::params::{Wave1DParams, Wave2DParams};
use crate::scalar_field::{ScalarField1D, ScalarField2D};

/// Derivative buffers reused across 1D steps.
pub struct Wave1DScratch {
    pub du: Vec<f64>,
    pub d2u: Vec<f64>,
}

impl Wave1DScratch {
    pub fn new(grid: Grid1D) -> Self {
        Self {
            du: vec![0.0; grid.nx],
            d2u: vec![0.0; grid.nx],
        }
    }
}

/// Copy the second-from-last value into slot 0 and the second value into the last slot.
#[inline]
pub fn apply_periodic_ghosts(u: &mut [f64]) {
    let n = u.len();
    debug_assert!(n >= 3);
    u[0] = u[n - 2];
    u[n - 1] = u[1];
}

/// One 1D leapfrog step; writes the boundary-corrected state into `next`.
///
/// `dcurv` is the precomputed gradient of the static curvature field.
pub fn step_wave_1d(
    current: &ScalarField1D,
    previous: &ScalarField1D,
    dcurv: &[f64],
    params: &Wave1DParams,
    scratch: &mut Wave1DScratch,
    next: &mut ScalarField1D,
) {
    let dx = current.grid.dx;
    let dt2 = params.dt * params.dt;
    let k = params.coupling;

    // du is left holding the first derivative
    second_derivative(&current.data, dx, &mut scratch.du, &mut scratch.d2u);

    let u = &current.data;
    let u_prev = &previous.data;
    for (i, out) in next.data.iter_mut().enumerate() {
        let resistance = k * scratch.du[i] * dcurv[i];
        *out = 2.0 * u[i] - u_prev[i] + dt2 * (scratch.d2u[i] - resistance);
    }

    apply_periodic_ghosts(&mut next.data);
}

/// Gradient of the curvature field, computed once per run.
pub fn curvature_gradient(curvature: &ScalarField1D) -> Vec<f64> {
    let mut out = vec![0.0; curvature.len()];
    gradient(&curvature.data, curvature.grid.dx, &mut out);
    out
}

/// Laplacian buffer reused across 2D steps.
pub struct Wave2DScratch {
    pub lap: Vec<f64>,
}

impl Wave2DScratch {
    pub fn new(grid: Grid2D) -> Self {
        Self {
            lap: vec![0.0; grid.n_cells()],
        }
    }
}

/// One 2D damped leapfrog step. Periodicity lives in the Laplacian lookup,
/// so no post-update correction is applied.
pub fn step_wave_2d(
    current: &ScalarField2D,
    previous: &ScalarField2D,
    params: &Wave2DParams,
    scratch: &mut Wave2DScratch,
    next: &mut ScalarField2D,
) {
    laplacian_periodic(&current.grid, &current.data, &mut scratch.lap);

    let d = params.damping;
    let w = params.laplacian_weight;
    for (((out, &u), &u_prev), &lap) in next
        .data
        .iter_mut()
        .zip(&current.data)
        .zip(&previous.data)
        .zip(&scratch.lap)
    {
        *out = (2.0 - d) * u - (1.0 - d) * u_prev + w * lap;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::initial_states::{curvature_profile, gaussian_pulse, point_kick};

    #[test]
    fn ghost_cells_mirror_opposite_interior() {
        let mut u = vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0];
        apply_periodic_ghosts(&mut u);
        assert_eq!(u[0], 4.0);
        assert_eq!(u[5], 1.0);
    }

    #[test]
    fn uniform_field_at_rest_stays_at_rest_1d() {
        let params = Wave1DParams {
            nx: 50,
            ..Default::default()
        };
        let grid = params.grid().unwrap();
        let u = ScalarField1D::from_fn(grid, |_| 0.7);
        let c = curvature_profile(grid, &params.curvature);
        let dc = curvature_gradient(&c);
        let mut scratch = Wave1DScratch::new(grid);
        let mut next = ScalarField1D::zeros(grid);

        step_wave_1d(&u, &u, &dc, &params, &mut scratch, &mut next);
        for v in &next.data {
            assert!((v - 0.7).abs() < 1e-15);
        }
    }

    #[test]
    fn first_1d_step_from_rest_follows_curvature_only() {
        let params = Wave1DParams::default();
        let grid = params.grid().unwrap();
        let u = gaussian_pulse(grid, params.pulse_center, params.pulse_sharpness);
        let c = curvature_profile(grid, &params.curvature);
        let dc = curvature_gradient(&c);
        let mut scratch = Wave1DScratch::new(grid);
        let mut next = ScalarField1D::zeros(grid);

        step_wave_1d(&u, &u, &dc, &params, &mut scratch, &mut next);

        // Interior point: next = u + dt^2 (u_xx - k u_x C_x) when previous == current
        let i = 120;
        let expected = u.data[i]
            + params.dt * params.dt
                * (scratch.d2u[i] - params.coupling * scratch.du[i] * dc[i]);
        assert!((next.data[i] - expected).abs() < 1e-15);
        assert_eq!(next.data[0], next.data[grid.nx - 2]);
        assert_eq!(next.data[grid.nx - 1], next.data[1]);
    }

    #[test]
    fn first_2d_step_from_kick_matches_hand_values() {
        let params = Wave2DParams {
            n: 8,
            kick_at: (4, 4),
            ..Default::default()
        };
        let grid = params.grid().unwrap();
        let u = point_kick(grid, 4, 4, 2.0);
        let mut scratch = Wave2DScratch::new(grid);
        let mut next = ScalarField2D::zeros(grid);

        step_wave_2d(&u, &u, &params, &mut scratch, &mut next);

        // Centre: (2 - d)*2 - (1 - d)*2 + 0.25*(-8) = 2 - 2 = 0
        assert!(next.get(4, 4).abs() < 1e-15);
        // Neighbour: 0.25 * 2
        assert!((next.get(5, 4) - 0.5).abs() < 1e-15);
        assert!((next.get(4, 3) - 0.5).abs() < 1e-15);
        assert_eq!(next.get(0, 0), 0.0);
    }

    #[test]
    fn moving_1d_state_uses_previous_in_time_difference() {
        let params = Wave1DParams {
            nx: 50,
            ..Default::default()
        };
        let grid = params.grid().unwrap();
        let c = curvature_profile(grid, &params.curvature);
        let dc = curvature_gradient(&c);
        let mut scratch = Wave1DScratch::new(grid);
        let mut next = ScalarField1D::zeros(grid);

        // Flat states: no spatial terms, next = 2*0.7 - 0.4 everywhere
        let u = ScalarField1D::from_fn(grid, |_| 0.7);
        let u_prev = ScalarField1D::from_fn(grid, |_| 0.4);
        step_wave_1d(&u, &u_prev, &dc, &params, &mut scratch, &mut next);
        for v in &next.data {
            assert!((v - 1.0).abs() < 1e-15, "got {v}");
        }

        // Pulse over a zero previous state
        let u = gaussian_pulse(grid, params.pulse_center, 2.0);
        let zero = ScalarField1D::zeros(grid);
        step_wave_1d(&u, &zero, &dc, &params, &mut scratch, &mut next);
        let i = 20;
        let expected = 2.0 * u.data[i]
            + params.dt * params.dt
                * (scratch.d2u[i] - params.coupling * scratch.du[i] * dc[i]);
        assert!((next.data[i] - expected).abs() < 1e-14);
        assert!((next.data[i] - u.data[i]).abs() > 0.1);
    }

    #[test]
    fn moving_2d_state_damps_previous_term() {
        let params = Wave2DParams {
            n: 8,
            kick_at: (4, 4),
            ..Default::default()
        };
        let grid = params.grid().unwrap();
        let u = point_kick(grid, 4, 4, 2.0);
        let mut u_prev = point_kick(grid, 4, 4, 1.0);
        u_prev.set(1, 1, 1.0);
        let mut scratch = Wave2DScratch::new(grid);
        let mut next = ScalarField2D::zeros(grid);

        step_wave_2d(&u, &u_prev, &params, &mut scratch, &mut next);

        // Centre: 1.98*2 - 0.98*1 + 0.25*(-8) = 0.98
        assert!((next.get(4, 4) - 0.98).abs() < 1e-14);
        // Neighbour only sees the Laplacian: 0.25 * 2
        assert!((next.get(5, 4) - 0.5).abs() < 1e-15);
        // Only the previous state is non-zero here: -(1 - d) * 1
        assert!((next.get(1, 1) + 0.98).abs() < 1e-15);
        assert_eq!(next.get(0, 0), 0.0);
    }
}

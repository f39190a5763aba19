// src/energy.rs
//
// Energy diagnostics.
//
// 2D: E = sum over cells of 0.5*(u - u_prev)^2 + 0.5*(Lap u)^2, evaluated on the
// pre-step pair (current, previous). Kinetic uses the raw time difference, so it
// carries no dt factor; this is a proxy, not a conserved quantity.

use crate::finite_diff::{gradient, laplacian_periodic};
use crate::scalar_field::{ScalarField1D, ScalarField2D};

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EnergyBreakdown {
    pub kinetic: f64,
    pub potential: f64,
}

impl EnergyBreakdown {
    #[inline]
    pub fn total(&self) -> f64 {
        self.kinetic + self.potential
    }
}

/// Kinetic + potential proxy for the 2D field. `lap` is a scratch buffer.
pub fn compute_energy_2d(
    current: &ScalarField2D,
    previous: &ScalarField2D,
    lap: &mut [f64],
) -> EnergyBreakdown {
    laplacian_periodic(&current.grid, &current.data, lap);

    let mut kinetic = 0.0;
    let mut potential = 0.0;
    for ((&u, &u_prev), &l) in current.data.iter().zip(&previous.data).zip(lap.iter()) {
        let du = u - u_prev;
        kinetic += 0.5 * du * du;
        potential += 0.5 * l * l;
    }

    EnergyBreakdown {
        kinetic,
        potential,
    }
}

/// Allocating convenience wrapper around [`compute_energy_2d`].
pub fn total_energy_2d(current: &ScalarField2D, previous: &ScalarField2D) -> f64 {
    let mut lap = vec![0.0; current.grid.n_cells()];
    compute_energy_2d(current, previous, &mut lap).total()
}

/// Discrete wave energy for the 1D field:
/// sum of 0.5*((u - u_prev)/dt)^2 + 0.5*(u_x)^2, times dx.
///
/// Ignores the curvature term; used as a diagnostic next to the squared amplitude.
pub fn compute_energy_1d(
    current: &ScalarField1D,
    previous: &ScalarField1D,
    dt: f64,
) -> EnergyBreakdown {
    let dx = current.grid.dx;
    let mut du = vec![0.0; current.len()];
    gradient(&current.data, dx, &mut du);

    let mut kinetic = 0.0;
    let mut potential = 0.0;
    for ((&u, &u_prev), &g) in current.data.iter().zip(&previous.data).zip(&du) {
        let v = (u - u_prev) / dt;
        kinetic += 0.5 * v * v;
        potential += 0.5 * g * g;
    }

    EnergyBreakdown {
        kinetic: kinetic * dx,
        potential: potential * dx,
    }
}

/// Total squared amplitude, sum of u^2.
pub fn squared_amplitude(field: &ScalarField1D) -> f64 {
    field.sum_sq()
}

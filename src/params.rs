// src/params.rs
//
// Run parameters for the two solvers. `Default` reproduces the reference demo
// constants; the driver applies `key=value` overrides on top.

use serde::Serialize;

use crate::error::{Result, SimError};
use crate::grid::{Grid1D, Grid2D};

/// Largest CFL number the 1D leapfrog update tolerates (wave speed 1).
pub const CFL_LIMIT_1D: f64 = 1.0;

/// Largest CFL number for the 2D five-point leapfrog update: 1/sqrt(2).
pub const CFL_LIMIT_2D: f64 = std::f64::consts::FRAC_1_SQRT_2;

/// One term `amplitude * sin(wavenumber * x)` of the static curvature profile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SineTerm {
    pub amplitude: f64,
    pub wavenumber: f64,
}

/// 1D curvature-resisted wave.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Wave1DParams {
    pub nx: usize,
    pub lx: f64,
    pub dt: f64,
    pub n_steps: usize,
    /// Scale of the `du/dx * dC/dx` resistance term.
    pub coupling: f64,
    /// Record a frame every `snapshot_stride` steps.
    pub snapshot_stride: usize,
    /// Gaussian pulse `exp(-pulse_sharpness * (x - pulse_center)^2)`.
    pub pulse_center: f64,
    pub pulse_sharpness: f64,
    pub curvature: [SineTerm; 2],
    /// Refuse to run when the CFL estimate exceeds the limit.
    pub strict_stability: bool,
}

impl Default for Wave1DParams {
    fn default() -> Self {
        Self {
            nx: 300,
            lx: 10.0,
            dt: 0.01,
            n_steps: 1000,
            coupling: 0.8,
            snapshot_stride: 10,
            pulse_center: 5.0,
            pulse_sharpness: 100.0,
            curvature: [
                SineTerm {
                    amplitude: 1.0,
                    wavenumber: 1.0,
                },
                SineTerm {
                    amplitude: 0.5,
                    wavenumber: 2.0,
                },
            ],
            strict_stability: false,
        }
    }
}

impl Wave1DParams {
    pub fn grid(&self) -> Result<Grid1D> {
        Grid1D::new(self.nx, self.lx)
    }

    /// `dt / dx` for unit wave speed.
    pub fn cfl_number(&self) -> Result<f64> {
        Ok(self.dt / self.grid()?.dx)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.dt.is_finite() && self.dt > 0.0) {
            return Err(SimError::InvalidTimeStep(self.dt));
        }
        let cfl = self.cfl_number()?;
        if self.snapshot_stride == 0 {
            return Err(SimError::InvalidStride);
        }
        check_stability(cfl, CFL_LIMIT_1D, self.strict_stability)
    }
}

/// 2D damped Laplacian wave on a periodic square grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Wave2DParams {
    pub n: usize,
    pub n_steps: usize,
    pub damping: f64,
    /// Weight of the Laplacian in the update (`c^2 dt^2 / dx^2`).
    pub laplacian_weight: f64,
    pub kick_amplitude: f64,
    pub kick_at: (usize, usize),
    pub strict_stability: bool,
}

impl Default for Wave2DParams {
    fn default() -> Self {
        Self {
            n: 64,
            n_steps: 100,
            damping: 0.02,
            laplacian_weight: 0.25,
            kick_amplitude: 2.0,
            kick_at: (32, 32),
            strict_stability: false,
        }
    }
}

impl Wave2DParams {
    pub fn grid(&self) -> Result<Grid2D> {
        Grid2D::new(self.n, self.n)
    }

    pub fn cfl_number(&self) -> f64 {
        self.laplacian_weight.max(0.0).sqrt()
    }

    pub fn validate(&self) -> Result<()> {
        let grid = self.grid()?;
        let (i, j) = self.kick_at;
        if i >= grid.nx || j >= grid.ny {
            return Err(SimError::InvalidGrid(format!(
                "kick position ({i}, {j}) outside {}x{} grid",
                grid.nx, grid.ny
            )));
        }
        check_stability(self.cfl_number(), CFL_LIMIT_2D, self.strict_stability)
    }
}

fn check_stability(cfl: f64, limit: f64, strict: bool) -> Result<()> {
    if cfl <= limit {
        return Ok(());
    }
    if strict {
        return Err(SimError::Unstable { cfl, limit });
    }
    log::warn!(
        "CFL estimate {cfl:.3} exceeds {limit:.3}; the explicit update may grow without bound"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_within_stability_limits() {
        let p1 = Wave1DParams::default();
        let cfl1 = p1.cfl_number().unwrap();
        assert!(cfl1 < CFL_LIMIT_1D, "1D CFL {cfl1}");
        assert!(p1.validate().is_ok());

        let p2 = Wave2DParams::default();
        assert!((p2.cfl_number() - 0.5).abs() < 1e-15);
        assert!(p2.validate().is_ok());
    }

    #[test]
    fn strict_mode_rejects_large_dt() {
        let p = Wave1DParams {
            dt: 1.0,
            strict_stability: true,
            ..Default::default()
        };
        assert!(matches!(p.validate(), Err(SimError::Unstable { .. })));

        // Same parameters without strict mode only warn
        let lenient = Wave1DParams {
            strict_stability: false,
            ..p
        };
        assert!(lenient.validate().is_ok());
    }

    #[test]
    fn non_positive_dt_is_rejected() {
        for dt in [0.0, -0.01, f64::NAN, f64::INFINITY] {
            let p = Wave1DParams {
                dt,
                ..Default::default()
            };
            assert!(
                matches!(p.validate(), Err(SimError::InvalidTimeStep(_))),
                "dt={dt} accepted"
            );
        }
    }

    #[test]
    fn zero_stride_is_rejected() {
        let p = Wave1DParams {
            snapshot_stride: 0,
            ..Default::default()
        };
        assert!(matches!(p.validate(), Err(SimError::InvalidStride)));
    }

    #[test]
    fn kick_outside_grid_is_rejected() {
        let p = Wave2DParams {
            n: 8,
            kick_at: (8, 0),
            ..Default::default()
        };
        assert!(matches!(p.validate(), Err(SimError::InvalidGrid(_))));
    }
}

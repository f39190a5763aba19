// src/simulation.rs
//
// Fixed-length run loops for both variants.
//
// Each step: derivatives -> next state -> boundary fix -> bookkeeping -> rotation.
// `next` becomes `current` only after bookkeeping for the step has finished.
// Rotation swaps owned buffers, so previous/current/next never alias.

use std::mem;

use log::{debug, info, warn};

use crate::energy::{EnergyBreakdown, compute_energy_1d, compute_energy_2d, squared_amplitude};
use crate::error::Result;
use crate::initial_states::{curvature_profile, gaussian_pulse, point_kick};
use crate::params::{Wave1DParams, Wave2DParams};
use crate::recorder::{EnergyHistory, SnapshotRecorder};
use crate::scalar_field::{ScalarField1D, ScalarField2D};
use crate::stepper::{
    Wave1DScratch, Wave2DScratch, curvature_gradient, step_wave_1d, step_wave_2d,
};

// ------------------------------------------------------------
// 1D curvature-resisted wave
// ------------------------------------------------------------

/// Everything a 1D run produces.
#[derive(Debug, Clone)]
pub struct Wave1DOutput {
    pub initial: ScalarField1D,
    pub curvature: ScalarField1D,
    pub frames: SnapshotRecorder,
    /// Sum of u^2 for each recorded frame.
    pub frame_amplitude: Vec<f64>,
    /// Wave energy (kinetic + gradient) for each recorded frame.
    pub frame_energy: Vec<EnergyBreakdown>,
    pub final_field: ScalarField1D,
    pub steps_taken: usize,
}

pub struct Wave1DSim {
    params: Wave1DParams,
    current: ScalarField1D,
    previous: ScalarField1D,
    next: ScalarField1D,
    initial: ScalarField1D,
    curvature: ScalarField1D,
    dcurv: Vec<f64>,
    scratch: Wave1DScratch,
    frames: SnapshotRecorder,
    frame_amplitude: Vec<f64>,
    frame_energy: Vec<EnergyBreakdown>,
    steps_done: usize,
}

impl Wave1DSim {
    /// Start from the configured Gaussian pulse at rest.
    pub fn new(params: Wave1DParams) -> Result<Self> {
        params.validate()?;
        let grid = params.grid()?;
        let initial = gaussian_pulse(grid, params.pulse_center, params.pulse_sharpness);
        Self::from_initial(params, initial)
    }

    /// Start from caller-supplied samples at rest; length must equal `nx`.
    pub fn with_initial_state(params: Wave1DParams, data: Vec<f64>) -> Result<Self> {
        params.validate()?;
        let initial = ScalarField1D::from_vec(params.grid()?, data)?;
        Self::from_initial(params, initial)
    }

    fn from_initial(params: Wave1DParams, initial: ScalarField1D) -> Result<Self> {
        let grid = initial.grid;
        let curvature = curvature_profile(grid, &params.curvature);
        let dcurv = curvature_gradient(&curvature);
        let frames = SnapshotRecorder::new(params.snapshot_stride)?;
        let n_frames = params.n_steps / frames.stride();

        Ok(Self {
            current: initial.clone(),
            // zero initial velocity
            previous: initial.clone(),
            next: ScalarField1D::zeros(grid),
            initial,
            curvature,
            dcurv,
            scratch: Wave1DScratch::new(grid),
            frames,
            frame_amplitude: Vec::with_capacity(n_frames),
            frame_energy: Vec::with_capacity(n_frames),
            steps_done: 0,
            params,
        })
    }

    pub fn params(&self) -> &Wave1DParams {
        &self.params
    }

    pub fn current(&self) -> &ScalarField1D {
        &self.current
    }

    pub fn previous(&self) -> &ScalarField1D {
        &self.previous
    }

    pub fn curvature(&self) -> &ScalarField1D {
        &self.curvature
    }

    pub fn steps_taken(&self) -> usize {
        self.steps_done
    }

    /// Advance one step.
    pub fn step(&mut self) {
        step_wave_1d(
            &self.current,
            &self.previous,
            &self.dcurv,
            &self.params,
            &mut self.scratch,
            &mut self.next,
        );

        if self.frames.offer(self.steps_done, &self.next.data) {
            self.frame_amplitude.push(squared_amplitude(&self.next));
            self.frame_energy
                .push(compute_energy_1d(&self.next, &self.current, self.params.dt));
        }

        mem::swap(&mut self.previous, &mut self.current);
        mem::swap(&mut self.current, &mut self.next);
        self.steps_done += 1;
    }

    /// Run the remaining configured steps and hand back the recorded sequences.
    pub fn run(mut self) -> Wave1DOutput {
        let n_steps = self.params.n_steps;
        let print_every = (n_steps / 10).max(1);

        while self.steps_done < n_steps {
            self.step();
            if self.steps_done % print_every == 0 {
                debug!(
                    "1d step {:6}/{}, sum u^2 = {:.6e}",
                    self.steps_done,
                    n_steps,
                    self.current.sum_sq()
                );
            }
        }

        if !self.current.all_finite() {
            warn!(
                "1d field contains non-finite values after {} steps (dt={}, dx={:.4e})",
                self.steps_done, self.params.dt, self.current.grid.dx
            );
        }
        info!(
            "1d run done: {} steps, {} frames, final sum u^2 = {:.6e}",
            self.steps_done,
            self.frames.len(),
            self.current.sum_sq()
        );

        Wave1DOutput {
            initial: self.initial,
            curvature: self.curvature,
            frames: self.frames,
            frame_amplitude: self.frame_amplitude,
            frame_energy: self.frame_energy,
            final_field: self.current,
            steps_taken: self.steps_done,
        }
    }
}

// ------------------------------------------------------------
// 2D damped Laplacian wave
// ------------------------------------------------------------

/// Everything a 2D run produces.
#[derive(Debug, Clone)]
pub struct Wave2DOutput {
    pub initial: ScalarField2D,
    /// Total energy per step, evaluated before the step's update.
    pub energy: EnergyHistory,
    pub kinetic: Vec<f64>,
    pub potential: Vec<f64>,
    pub final_field: ScalarField2D,
    pub steps_taken: usize,
}

pub struct Wave2DSim {
    params: Wave2DParams,
    current: ScalarField2D,
    previous: ScalarField2D,
    next: ScalarField2D,
    initial: ScalarField2D,
    scratch: Wave2DScratch,
    energy: EnergyHistory,
    kinetic: Vec<f64>,
    potential: Vec<f64>,
    steps_done: usize,
}

impl Wave2DSim {
    pub fn new(params: Wave2DParams) -> Result<Self> {
        params.validate()?;
        let grid = params.grid()?;
        let (ki, kj) = params.kick_at;
        let initial = point_kick(grid, ki, kj, params.kick_amplitude);
        let n = params.n_steps;

        Ok(Self {
            current: initial.clone(),
            previous: initial.clone(),
            next: ScalarField2D::zeros(grid),
            initial,
            scratch: Wave2DScratch::new(grid),
            energy: EnergyHistory::with_capacity(n),
            kinetic: Vec::with_capacity(n),
            potential: Vec::with_capacity(n),
            steps_done: 0,
            params,
        })
    }

    pub fn params(&self) -> &Wave2DParams {
        &self.params
    }

    pub fn current(&self) -> &ScalarField2D {
        &self.current
    }

    pub fn steps_taken(&self) -> usize {
        self.steps_done
    }

    /// Record the energy of the current pair, then advance one step.
    pub fn step(&mut self) -> EnergyBreakdown {
        let e = compute_energy_2d(&self.current, &self.previous, &mut self.scratch.lap);
        self.energy.push(e.total());
        self.kinetic.push(e.kinetic);
        self.potential.push(e.potential);

        step_wave_2d(
            &self.current,
            &self.previous,
            &self.params,
            &mut self.scratch,
            &mut self.next,
        );

        mem::swap(&mut self.previous, &mut self.current);
        mem::swap(&mut self.current, &mut self.next);
        self.steps_done += 1;
        e
    }

    pub fn run(mut self) -> Wave2DOutput {
        let n_steps = self.params.n_steps;
        let print_every = (n_steps / 10).max(1);

        while self.steps_done < n_steps {
            let e = self.step();
            if self.steps_done % print_every == 0 {
                debug!("2d step {:6}/{}, E = {:.6e}", self.steps_done, n_steps, e.total());
            }
        }

        if !self.current.all_finite() {
            warn!(
                "2d field contains non-finite values after {} steps (laplacian_weight={})",
                self.steps_done, self.params.laplacian_weight
            );
        }
        match (self.energy.min(), self.energy.max()) {
            (Some(lo), Some(hi)) => info!(
                "2d run done: {} steps, energy min = {:.6e}, max = {:.6e}",
                self.steps_done, lo, hi
            ),
            _ => info!("2d run done: no steps taken"),
        }

        Wave2DOutput {
            initial: self.initial,
            energy: self.energy,
            kinetic: self.kinetic,
            potential: self.potential,
            final_field: self.current,
            steps_taken: self.steps_done,
        }
    }
}

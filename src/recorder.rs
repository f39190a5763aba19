// src/recorder.rs
//
// Append-only run histories: strided field snapshots and per-step energies.

use crate::error::{Result, SimError};

/// Copies of the field taken every `stride` steps.
#[derive(Debug, Clone, PartialEq)]
pub struct SnapshotRecorder {
    stride: usize,
    frames: Vec<Vec<f64>>,
    steps: Vec<usize>,
}

impl SnapshotRecorder {
    pub fn new(stride: usize) -> Result<Self> {
        if stride == 0 {
            return Err(SimError::InvalidStride);
        }
        Ok(Self {
            stride,
            frames: Vec::new(),
            steps: Vec::new(),
        })
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    /// True when the state produced by 0-based `step` should be kept.
    /// Gives `floor(n_steps / stride)` frames over a run.
    #[inline]
    pub fn is_due(&self, step: usize) -> bool {
        (step + 1) % self.stride == 0
    }

    /// Record a copy of `data` if `step` falls on the stride. Returns whether it did.
    pub fn offer(&mut self, step: usize, data: &[f64]) -> bool {
        if !self.is_due(step) {
            return false;
        }
        self.frames.push(data.to_vec());
        self.steps.push(step + 1);
        true
    }

    pub fn frames(&self) -> &[Vec<f64>] {
        &self.frames
    }

    /// Number of completed steps at which each frame was taken.
    pub fn frame_steps(&self) -> &[usize] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

/// One energy value per recorded step.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnergyHistory {
    values: Vec<f64>,
}

impl EnergyHistory {
    pub fn with_capacity(n: usize) -> Self {
        Self {
            values: Vec::with_capacity(n),
        }
    }

    pub fn push(&mut self, e: f64) {
        self.values.push(e);
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn min(&self) -> Option<f64> {
        self.values.iter().copied().reduce(f64::min)
    }

    pub fn max(&self) -> Option<f64> {
        self.values.iter().copied().reduce(f64::max)
    }

    pub fn last(&self) -> Option<f64> {
        self.values.last().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recorder_keeps_floor_of_steps_over_stride() {
        let mut rec = SnapshotRecorder::new(10).unwrap();
        for step in 0..95 {
            rec.offer(step, &[step as f64]);
        }
        assert_eq!(rec.len(), 9);
        assert_eq!(rec.frame_steps()[0], 10);
        assert_eq!(rec.frames()[0], vec![9.0]);
        assert_eq!(rec.frame_steps()[8], 90);
    }

    #[test]
    fn recorder_copies_data() {
        let mut rec = SnapshotRecorder::new(1).unwrap();
        let mut buf = vec![1.0, 2.0];
        rec.offer(0, &buf);
        buf[0] = 99.0;
        assert_eq!(rec.frames()[0], vec![1.0, 2.0]);
    }

    #[test]
    fn zero_stride_is_an_error() {
        assert!(SnapshotRecorder::new(0).is_err());
    }

    #[test]
    fn energy_history_extrema() {
        let mut h = EnergyHistory::default();
        assert_eq!(h.min(), None);
        for e in [3.0, 1.5, 4.0] {
            h.push(e);
        }
        assert_eq!(h.min(), Some(1.5));
        assert_eq!(h.max(), Some(4.0));
        assert_eq!(h.last(), Some(4.0));
        assert_eq!(h.len(), 3);
    }
}

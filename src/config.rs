// src/config.rs
//
// Run record written next to the outputs as `config.json`.

use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use crate::error::Result;
use crate::params::{CFL_LIMIT_1D, CFL_LIMIT_2D, Wave1DParams, Wave2DParams};

#[derive(Serialize)]
pub struct RunConfig {
    pub wave_1d: Option<Wave1DSection>,
    pub wave_2d: Option<Wave2DSection>,
    pub output: OutputConfig,
    pub run: RunInfo,
}

#[derive(Serialize)]
pub struct Wave1DSection {
    #[serde(flatten)]
    pub params: Wave1DParams,
    pub dx: f64,
    pub cfl: f64,
    pub cfl_limit: f64,
}

impl Wave1DSection {
    pub fn new(params: &Wave1DParams) -> Result<Self> {
        Ok(Self {
            dx: params.grid()?.dx,
            cfl: params.cfl_number()?,
            cfl_limit: CFL_LIMIT_1D,
            params: params.clone(),
        })
    }
}

#[derive(Serialize)]
pub struct Wave2DSection {
    #[serde(flatten)]
    pub params: Wave2DParams,
    pub cfl: f64,
    pub cfl_limit: f64,
}

impl Wave2DSection {
    pub fn new(params: &Wave2DParams) -> Self {
        Self {
            cfl: params.cfl_number(),
            cfl_limit: CFL_LIMIT_2D,
            params: params.clone(),
        }
    }
}

#[derive(Serialize)]
pub struct OutputConfig {
    pub plots: bool,
    /// Frame rate of the 1D animation.
    pub fps: u32,
}

#[derive(Serialize)]
pub struct RunInfo {
    pub binary: String,
    pub run_id: String,
    pub crate_version: String,
    pub timestamp_unix: Option<u64>,
}

impl RunConfig {
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn write_to_dir(&self, out_dir: &Path) -> Result<()> {
        let path = out_dir.join("config.json");
        let file = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }
}

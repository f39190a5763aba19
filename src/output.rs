// src/output.rs
//
// CSV writers for the recorded sequences.
//
//   energy_vs_step.csv      step,E_kin,E_pot,E_tot            (2D, one row per step)
//   amplitude_vs_frame.csv  step,sum_u2,E_kin,E_pot,E_tot     (1D, one row per frame)
//   frames_1d.csv           step,i,x,u                        (1D, long format)

use std::fs::{File, create_dir_all};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::Result;
use crate::simulation::{Wave1DOutput, Wave2DOutput};

fn create_writer(path: &Path) -> Result<BufWriter<File>> {
    if let Some(parent) = path.parent() {
        create_dir_all(parent)?;
    }
    Ok(BufWriter::new(File::create(path)?))
}

pub fn write_energy_csv<W: Write>(w: &mut W, out: &Wave2DOutput) -> Result<()> {
    writeln!(w, "step,E_kin,E_pot,E_tot")?;
    for (step, ((&k, &p), &e)) in out
        .kinetic
        .iter()
        .zip(&out.potential)
        .zip(out.energy.values())
        .enumerate()
    {
        writeln!(w, "{},{:.16e},{:.16e},{:.16e}", step, k, p, e)?;
    }
    Ok(())
}

pub fn write_amplitude_csv<W: Write>(w: &mut W, out: &Wave1DOutput) -> Result<()> {
    writeln!(w, "step,sum_u2,E_kin,E_pot,E_tot")?;
    for ((&step, &a), e) in out
        .frames
        .frame_steps()
        .iter()
        .zip(&out.frame_amplitude)
        .zip(&out.frame_energy)
    {
        writeln!(
            w,
            "{},{:.16e},{:.16e},{:.16e},{:.16e}",
            step,
            a,
            e.kinetic,
            e.potential,
            e.total()
        )?;
    }
    Ok(())
}

pub fn write_frames_csv<W: Write>(w: &mut W, out: &Wave1DOutput) -> Result<()> {
    let grid = out.initial.grid;
    writeln!(w, "step,i,x,u")?;
    for (&step, frame) in out.frames.frame_steps().iter().zip(out.frames.frames()) {
        for (i, &u) in frame.iter().enumerate() {
            writeln!(w, "{},{},{:.10e},{:.16e}", step, i, grid.x(i), u)?;
        }
    }
    Ok(())
}

/// Write all 1D CSV outputs into `dir`.
pub fn write_wave_1d_outputs(dir: &Path, out: &Wave1DOutput) -> Result<()> {
    let mut w = create_writer(&dir.join("amplitude_vs_frame.csv"))?;
    write_amplitude_csv(&mut w, out)?;
    w.flush()?;

    let mut w = create_writer(&dir.join("frames_1d.csv"))?;
    write_frames_csv(&mut w, out)?;
    w.flush()?;
    Ok(())
}

/// Write all 2D CSV outputs into `dir`.
pub fn write_wave_2d_outputs(dir: &Path, out: &Wave2DOutput) -> Result<()> {
    let mut w = create_writer(&dir.join("energy_vs_step.csv"))?;
    write_energy_csv(&mut w, out)?;
    w.flush()?;
    Ok(())
}

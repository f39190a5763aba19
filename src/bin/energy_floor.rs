// src/bin/energy_floor.rs
//
// Default 2D damped run (64x64, kick 2.0 at the centre, 100 steps) reporting
// how far the energy diagnostic drops over the run.
//
// Run:
//   cargo run --release --bin energy_floor
//
// Output:
//   out/energy_floor/
//     ├── energy_vs_step.csv
//     └── energy_vs_step.png

use std::path::Path;

use anyhow::{Context, Result, bail};

use wave_sim::output::write_wave_2d_outputs;
use wave_sim::params::Wave2DParams;
use wave_sim::simulation::Wave2DSim;
use wave_sim::visualisation::save_energy_plot;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let params = Wave2DParams::default();
    let out = Wave2DSim::new(params)?.run();

    let out_dir = Path::new("out").join("energy_floor");
    write_wave_2d_outputs(&out_dir, &out).context("writing energy CSV")?;
    save_energy_plot(&out, &out_dir.join("energy_vs_step.png")).context("plotting energy")?;

    let (Some(e0), Some(lo), Some(hi)) = (
        out.energy.values().first().copied(),
        out.energy.min(),
        out.energy.max(),
    ) else {
        bail!("no energy samples recorded");
    };

    if !lo.is_finite() || !hi.is_finite() {
        bail!("energy history contains non-finite values");
    }

    println!("steps      = {}", out.steps_taken);
    println!("E[0]       = {:.6e}", e0);
    println!("min E      = {:.6e} ({:.2}% of E[0])", lo, 100.0 * lo / e0);
    println!("max E      = {:.6e}", hi);
    println!("Wrote {}", out_dir.join("energy_vs_step.csv").display());
    Ok(())
}

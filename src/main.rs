// src/main.rs
//
// Driver for exploratory runs of both wave solvers. With no arguments it runs
// both variants with the default constants and writes everything under `runs/`.
//
// Examples:
//
//   cargo run --release
//       -> 1D (Nx=300, 1000 steps) and 2D (64x64, 100 steps) runs, plots + GIF.
//
//   cargo run --release -- 2d steps=500 damping=0.005 noplot
//       -> longer, lightly damped 2D run; CSV + config.json only.
//
//   cargo run --release -- 1d dt=0.05 strict
//       -> refuses to start if the CFL estimate exceeds the limit.
//
// Typical outputs (per run directory):
//   runs/<run_id>/
//     ├── config.json
//     ├── amplitude_vs_frame.csv   (1d)
//     ├── frames_1d.csv            (1d)
//     ├── wave1d_final.png         (1d)
//     ├── wave1d.gif               (1d)
//     ├── energy_vs_step.csv       (2d)
//     ├── energy_vs_step.png       (2d)
//     └── wave2d_final.png         (2d)
//
// Set RUST_LOG=debug for per-step progress.

use std::env;
use std::fs::create_dir_all;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use log::{info, warn};

use wave_sim::config::{OutputConfig, RunConfig, RunInfo, Wave1DSection, Wave2DSection};
use wave_sim::output::{write_wave_1d_outputs, write_wave_2d_outputs};
use wave_sim::params::{Wave1DParams, Wave2DParams};
use wave_sim::simulation::{Wave1DSim, Wave2DSim};
use wave_sim::visualisation::{
    save_animation_1d, save_energy_plot, save_field_1d_plot, save_field_2d_plot,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Variant {
    OneD,
    TwoD,
    Both,
}

impl Variant {
    fn from_arg(s: &str) -> Option<Self> {
        match s {
            "1d" => Some(Self::OneD),
            "2d" => Some(Self::TwoD),
            "both" | "all" => Some(Self::Both),
            _ => None,
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            Self::OneD => "1d",
            Self::TwoD => "2d",
            Self::Both => "both",
        }
    }

    fn runs_1d(&self) -> bool {
        matches!(self, Self::OneD | Self::Both)
    }

    fn runs_2d(&self) -> bool {
        matches!(self, Self::TwoD | Self::Both)
    }
}

fn print_usage() {
    eprintln!(
        r#"Usage:
  cargo run -- [1d|2d|both] [steps=N] [dt=VAL] [n=N] [damping=VAL]
             [coupling=VAL] [stride=N] [fps=N] [strict] [noplot]
             [out=DIR] [run=RUN_ID]

Notes:
  - steps= applies to whichever variants are run.
  - dt=, coupling=, stride= affect the 1D run; n= and damping= the 2D run.
  - strict refuses to start when the CFL estimate exceeds the stability limit.
"#
    );
}

fn sanitize_run_id(s: &str) -> String {
    s.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '.' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

fn unix_now() -> Option<u64> {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .ok()
        .map(|d| d.as_secs())
}

fn default_run_id(variant: Variant) -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_else(|_| std::time::Duration::from_secs(0));
    format!(
        "{}{:03}_{}",
        now.as_secs(),
        now.subsec_millis(),
        variant.as_str()
    )
}

fn unique_run_dir(out_root: &str, run_id: &str) -> PathBuf {
    let base = PathBuf::from(out_root);
    let mut dir = base.join(run_id);
    if !dir.exists() {
        return dir;
    }
    for k in 1..1000 {
        let cand = base.join(format!("{}_{}", run_id, k));
        if !cand.exists() {
            dir = cand;
            break;
        }
    }
    dir
}

fn parse_value<T: std::str::FromStr>(key: &str, v: &str) -> Option<T> {
    let parsed = v.trim().parse::<T>().ok();
    if parsed.is_none() {
        warn!("could not parse {key}='{v}', ignoring");
    }
    parsed
}

fn run_1d(params: Wave1DParams, run_dir: &Path, plots: bool, fps: u32) -> Result<()> {
    println!(
        "1d:     nx={} lx={} dt={} steps={} coupling={} stride={}",
        params.nx, params.lx, params.dt, params.n_steps, params.coupling, params.snapshot_stride
    );

    let out = Wave1DSim::new(params)
        .context("invalid 1D parameters")?
        .run();

    write_wave_1d_outputs(run_dir, &out).context("writing 1D CSV outputs")?;

    if let Some(&a) = out.frame_amplitude.last() {
        println!(
            "1d:     {} frames, final sum u^2 = {:.6e} (initial {:.6e})",
            out.frames.len(),
            a,
            out.initial.sum_sq()
        );
    }

    if plots {
        save_field_1d_plot(&out, &run_dir.join("wave1d_final.png"))
            .context("plotting 1D field")?;
        save_animation_1d(&out, &run_dir.join("wave1d.gif"), fps)
            .context("rendering 1D animation")?;
    }
    Ok(())
}

fn run_2d(params: Wave2DParams, run_dir: &Path, plots: bool) -> Result<()> {
    println!(
        "2d:     n={} steps={} damping={} weight={} kick={} at {:?}",
        params.n,
        params.n_steps,
        params.damping,
        params.laplacian_weight,
        params.kick_amplitude,
        params.kick_at
    );

    let out = Wave2DSim::new(params)
        .context("invalid 2D parameters")?
        .run();

    write_wave_2d_outputs(run_dir, &out).context("writing 2D CSV outputs")?;

    if let (Some(first), Some(lo), Some(last)) =
        (out.energy.values().first(), out.energy.min(), out.energy.last())
    {
        println!(
            "2d:     E[0] = {:.6e}, min E = {:.6e}, final E = {:.6e}",
            first, lo, last
        );
    }

    if plots {
        save_energy_plot(&out, &run_dir.join("energy_vs_step.png"))
            .context("plotting energy history")?;
        save_field_2d_plot(
            &out.final_field,
            &format!("2D field after {} steps", out.steps_taken),
            &run_dir.join("wave2d_final.png"),
        )
        .context("plotting 2D field")?;
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let argv: Vec<String> = env::args().collect();

    let mut variant = Variant::Both;
    let mut p1 = Wave1DParams::default();
    let mut p2 = Wave2DParams::default();
    let mut plots = true;
    let mut fps: u32 = 20;

    let mut steps_override: Option<usize> = None;
    let mut out_root_override: Option<String> = None;
    let mut run_id_override: Option<String> = None;

    for arg in argv.iter().skip(1) {
        if arg == "-h" || arg == "--help" || arg == "help" {
            print_usage();
            return Ok(());
        }

        if let Some(v) = Variant::from_arg(arg) {
            variant = v;
            continue;
        }
        if arg == "strict" {
            p1.strict_stability = true;
            p2.strict_stability = true;
            continue;
        }
        if arg == "noplot" {
            plots = false;
            continue;
        }

        if let Some(v) = arg.strip_prefix("steps=") {
            steps_override = parse_value("steps", v);
            continue;
        }
        if let Some(v) = arg.strip_prefix("dt=") {
            if let Some(dt) = parse_value("dt", v) {
                p1.dt = dt;
            }
            continue;
        }
        if let Some(v) = arg.strip_prefix("coupling=") {
            if let Some(k) = parse_value("coupling", v) {
                p1.coupling = k;
            }
            continue;
        }
        if let Some(v) = arg.strip_prefix("stride=") {
            if let Some(s) = parse_value::<usize>("stride", v) {
                p1.snapshot_stride = s;
            }
            continue;
        }
        if let Some(v) = arg.strip_prefix("n=") {
            if let Some(n) = parse_value::<usize>("n", v) {
                p2.n = n;
                p2.kick_at = (n / 2, n / 2);
            }
            continue;
        }
        if let Some(v) = arg.strip_prefix("damping=") {
            if let Some(d) = parse_value("damping", v) {
                p2.damping = d;
            }
            continue;
        }
        if let Some(v) = arg.strip_prefix("fps=") {
            if let Some(f) = parse_value::<u32>("fps", v) {
                fps = f.max(1);
            }
            continue;
        }
        if let Some(v) = arg.strip_prefix("out=") {
            out_root_override = Some(v.to_string());
            continue;
        }
        if let Some(v) = arg.strip_prefix("run=") {
            run_id_override = Some(v.to_string());
            continue;
        }

        warn!("ignoring unknown argument '{arg}'");
    }

    if let Some(n) = steps_override {
        p1.n_steps = n;
        p2.n_steps = n;
    }

    // -------- output directory setup --------
    let out_root = out_root_override.unwrap_or_else(|| "runs".to_string());
    let run_id = sanitize_run_id(&run_id_override.unwrap_or_else(|| default_run_id(variant)));
    let run_dir = unique_run_dir(&out_root, &run_id);
    create_dir_all(&run_dir)
        .with_context(|| format!("creating run directory {}", run_dir.display()))?;

    let run_config = RunConfig {
        wave_1d: if variant.runs_1d() {
            Some(Wave1DSection::new(&p1).context("invalid 1D parameters")?)
        } else {
            None
        },
        wave_2d: variant.runs_2d().then(|| Wave2DSection::new(&p2)),
        output: OutputConfig { plots, fps },
        run: RunInfo {
            binary: "wave-sim".to_string(),
            run_id: run_id.clone(),
            crate_version: env!("CARGO_PKG_VERSION").to_string(),
            timestamp_unix: unix_now(),
        },
    };
    run_config
        .write_to_dir(&run_dir)
        .context("writing config.json")?;

    println!("--- wave-sim run config ---");
    println!("run_dir: {}", run_dir.display());
    println!("variant: {}", variant.as_str());
    println!("---------------------------");

    if variant.runs_1d() {
        run_1d(p1, &run_dir, plots, fps)?;
    }
    if variant.runs_2d() {
        run_2d(p2, &run_dir, plots)?;
    }

    if !plots {
        println!("Plots skipped ('noplot').");
    }
    info!("outputs in {}", run_dir.display());
    println!("Done. Outputs in {}", run_dir.display());
    Ok(())
}

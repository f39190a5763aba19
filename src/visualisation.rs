// src/visualisation.rs
//
// PNG/GIF rendering of run outputs with plotters. Runs after the loop has
// finished, on already-materialised sequences.

use std::error::Error;
use std::path::Path;

use plotters::prelude::*;

use crate::error::{Result, SimError};
use crate::scalar_field::ScalarField2D;
use crate::simulation::{Wave1DOutput, Wave2DOutput};

type DrawResult = std::result::Result<(), Box<dyn Error>>;

fn plot_err(e: Box<dyn Error>) -> SimError {
    SimError::Plot(e.to_string())
}

/// Blue-white-red map, symmetric about zero: -lim -> blue, 0 -> white, +lim -> red.
fn signed_to_color(v: f64, lim: f64) -> RGBColor {
    let lim = if lim.is_finite() && lim > 1e-300 { lim } else { 1.0 };
    let x = (0.5 + 0.5 * v / lim).clamp(0.0, 1.0);

    let r = (255.0 * (2.0 * x).min(1.0)) as u8;
    let b = (255.0 * (2.0 * (1.0 - x)).min(1.0)) as u8;
    let g = (255.0 * (1.0 - 2.0 * (x - 0.5).abs())).clamp(0.0, 255.0) as u8;
    RGBColor(r, g, b)
}

/// Finite (min, max) with a 10% margin; falls back to [-1, 1].
fn padded_range<'a>(values: impl Iterator<Item = &'a f64>) -> (f64, f64) {
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for &v in values.filter(|v| v.is_finite()) {
        lo = lo.min(v);
        hi = hi.max(v);
    }

    if !lo.is_finite() || !hi.is_finite() {
        (-1.0, 1.0)
    } else if (hi - lo).abs() < 1e-30 {
        let delta = if hi.abs() < 1e-30 { 1.0 } else { 0.1 * hi.abs() };
        (lo - delta, hi + delta)
    } else {
        let margin = 0.1 * (hi - lo);
        (lo - margin, hi + margin)
    }
}

// ------------------------------------------------------------
// 1D
// ------------------------------------------------------------

fn draw_field_1d(out: &Wave1DOutput, filename: &Path) -> DrawResult {
    let grid = out.initial.grid;
    let root = BitMapBackend::new(filename, (1024, 600)).into_drawing_area();
    root.fill(&WHITE)?;

    let (y_min, y_max) = padded_range(
        out.initial
            .data
            .iter()
            .chain(&out.final_field.data)
            .chain(&out.curvature.data),
    );

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .caption(
            format!("1D curvature-resisted wave after {} steps", out.steps_taken),
            ("sans-serif", 26),
        )
        .set_left_and_bottom_label_area_size(50)
        .build_cartesian_2d(0.0..grid.lx, y_min..y_max)?;

    chart.configure_mesh().x_desc("x").y_desc("u(x)").draw()?;

    let xs = |data: &[f64]| {
        data.iter()
            .enumerate()
            .map(move |(i, &u)| (grid.x(i), u))
            .collect::<Vec<_>>()
    };

    chart
        .draw_series(LineSeries::new(xs(&out.initial.data), &BLACK.mix(0.4)))?
        .label("initial pulse")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLACK.mix(0.4)));

    chart
        .draw_series(LineSeries::new(xs(&out.final_field.data), &BLUE))?
        .label("final field")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE));

    chart
        .draw_series(LineSeries::new(xs(&out.curvature.data), &RED.mix(0.5)))?
        .label("curvature C(x)")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED.mix(0.5)));

    chart
        .configure_series_labels()
        .border_style(BLACK)
        .background_style(WHITE.mix(0.8))
        .draw()?;

    root.present()?;
    Ok(())
}

/// Initial pulse, final field and the curvature profile on one line plot.
pub fn save_field_1d_plot(out: &Wave1DOutput, filename: &Path) -> Result<()> {
    draw_field_1d(out, filename).map_err(plot_err)
}

fn draw_animation_1d(out: &Wave1DOutput, filename: &Path, fps: u32) -> DrawResult {
    let grid = out.initial.grid;
    let frame_delay_ms = 1000 / fps.max(1);
    let root = BitMapBackend::gif(filename, (800, 450), frame_delay_ms)?.into_drawing_area();

    // Fixed y-range across frames so the animation does not jump
    let (y_min, y_max) = padded_range(
        out.frames
            .frames()
            .iter()
            .flat_map(|f| f.iter())
            .chain(&out.initial.data),
    );

    for (&step, frame) in out.frames.frame_steps().iter().zip(out.frames.frames()) {
        root.fill(&WHITE)?;
        let mut chart = ChartBuilder::on(&root)
            .margin(15)
            .caption(format!("step {step}"), ("sans-serif", 22))
            .set_left_and_bottom_label_area_size(40)
            .build_cartesian_2d(0.0..grid.lx, y_min..y_max)?;

        chart.configure_mesh().x_desc("x").y_desc("u").draw()?;
        chart.draw_series(LineSeries::new(
            frame.iter().enumerate().map(|(i, &u)| (grid.x(i), u)),
            &BLUE,
        ))?;
        root.present()?;
    }
    Ok(())
}

/// Animated GIF over the recorded 1D frames.
pub fn save_animation_1d(out: &Wave1DOutput, filename: &Path, fps: u32) -> Result<()> {
    if out.frames.is_empty() {
        return Ok(()); // nothing to animate
    }
    draw_animation_1d(out, filename, fps).map_err(plot_err)
}

// ------------------------------------------------------------
// 2D
// ------------------------------------------------------------

fn draw_field_2d(field: &ScalarField2D, title: &str, filename: &Path) -> DrawResult {
    let nx = field.grid.nx as i32;
    let ny = field.grid.ny as i32;
    let lim = field
        .finite_range()
        .map(|(lo, hi)| lo.abs().max(hi.abs()))
        .unwrap_or(1.0);

    let root = BitMapBackend::new(filename, (800, 800)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .margin(40)
        .caption(
            format!("{title} (blue < 0 < red, |u| <= {lim:.3e})"),
            ("sans-serif", 20),
        )
        .x_label_area_size(40)
        .y_label_area_size(40)
        .build_cartesian_2d(0..nx, 0..ny)?;

    chart
        .configure_mesh()
        .x_desc("i (cell index)")
        .y_desc("j (cell index)")
        .axis_desc_style(("sans-serif", 15))
        .draw()?;

    // One coloured rectangle per cell
    chart.draw_series((0..nx).flat_map(|i| {
        (0..ny).map(move |j| {
            let v = field.get(i as usize, j as usize);
            Rectangle::new([(i, j), (i + 1, j + 1)], signed_to_color(v, lim).filled())
        })
    }))?;

    root.present()?;
    Ok(())
}

/// Heat map of a 2D field.
pub fn save_field_2d_plot(field: &ScalarField2D, title: &str, filename: &Path) -> Result<()> {
    draw_field_2d(field, title, filename).map_err(plot_err)
}

fn draw_energy(energy: &[f64], filename: &Path) -> DrawResult {
    let root = BitMapBackend::new(filename, (1024, 768)).into_drawing_area();
    root.fill(&WHITE)?;

    let (y_min, y_max) = padded_range(energy.iter());
    let y_min = y_min.min(0.0);
    let x_max = (energy.len().max(2) - 1) as f64;

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .caption("Total energy vs step", ("sans-serif", 30))
        .set_left_and_bottom_label_area_size(60)
        .build_cartesian_2d(0.0..x_max, y_min..y_max)?;

    chart
        .configure_mesh()
        .x_desc("step")
        .y_desc("E = sum 0.5 (du)^2 + 0.5 (Lap u)^2")
        .draw()?;

    chart.draw_series(LineSeries::new(
        energy.iter().enumerate().map(|(s, &e)| (s as f64, e)),
        &BLACK,
    ))?;

    root.present()?;
    Ok(())
}

/// Line plot of the per-step energy history.
pub fn save_energy_plot(out: &Wave2DOutput, filename: &Path) -> Result<()> {
    if out.energy.is_empty() {
        return Ok(()); // nothing to plot
    }
    draw_energy(out.energy.values(), filename).map_err(plot_err)
}

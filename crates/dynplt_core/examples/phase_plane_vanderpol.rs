//! Phase plane of the van der Pol oscillator at mu = 2, batch-solved over
//! t in [0, 100] from a ring of initial conditions.

use anyhow::Result;
use dynplt_core::portrait::phase_plane_batch;
use dynplt_core::render::MemorySurface;
use dynplt_core::solvers::Rk4BatchSolver;
use dynplt_core::window::{GridShape, Window};
use nalgebra::Vector2;

fn linspace(start: f64, stop: f64, count: usize) -> Vec<f64> {
    let step = (stop - start) / (count - 1) as f64;
    (0..count).map(|i| start + step * i as f64).collect()
}

fn main() -> Result<()> {
    let mu = 2.0;
    let vanderpol = move |_t: f64, x: Vector2<f64>| {
        Vector2::new(x.y, mu * (1.0 - x.x * x.x) * x.y - x.x)
    };

    let initial_conditions: Vec<Vector2<f64>> = [
        [0.1, 0.1],
        [-0.1, 0.1],
        [-0.1, -0.1],
        [0.1, -0.1],
        [0.2, 0.2],
        [-0.2, 0.2],
        [-0.2, -0.2],
        [0.2, -0.2],
        [0.4, 0.4],
        [-0.4, 0.4],
        [-0.4, -0.4],
        [0.4, -0.4],
        [2.0, -4.0],
        [-2.0, 4.0],
        [1.0, -4.0],
        [-1.0, 4.0],
        [2.0, -3.0],
        [-2.0, 3.0],
        [1.0, -3.0],
        [-1.0, 3.0],
    ]
    .iter()
    .map(|&[x, y]| Vector2::new(x, y))
    .collect();

    let time_grids = vec![linspace(0.0, 100.0, 10_000); initial_conditions.len()];
    let window = Window::new(-6.0, 6.0, -6.0, 6.0)?;
    let solver = Rk4BatchSolver { substeps: 1 };

    let mut surface = MemorySurface::new();
    phase_plane_batch(
        &vanderpol,
        &initial_conditions,
        &time_grids,
        window,
        &solver,
        GridShape::default(),
        &mut surface,
    )?;

    println!("Phase plane, van der Pol equation at mu = {mu}");
    println!("  field arrows: {}", surface.arrows.len());
    println!("  trajectories: {}", surface.polylines.len());
    for (x0, curve) in initial_conditions.iter().zip(&surface.polylines) {
        let end = curve.last().expect("trajectories are nonempty");
        println!(
            "  from ({:5.1}, {:5.1}) to ({:8.4}, {:8.4}) in {} samples",
            x0.x,
            x0.y,
            end.x,
            end.y,
            curve.len()
        );
    }

    Ok(())
}

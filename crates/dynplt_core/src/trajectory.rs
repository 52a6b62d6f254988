use crate::error::InputError;
use crate::traits::{BatchSolver, Stepper, VectorField};
use crate::window::{Direction, Window};
use anyhow::{bail, Result};
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

/// One solution curve through the phase plane.
///
/// `points` run chronologically from the earliest simulated time to the
/// latest and always contain `initial`. For Variant A runs every point lies
/// inside the truncation window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trajectory {
    pub initial: Vector2<f64>,
    pub points: Vec<Vector2<f64>>,
}

/// Time budget and step size for Variant A.
///
/// t1 = 100 * extent / mean_speed and dt = t1 / 10_000, so each direction
/// gets a fixed budget of 10,000 steps whose size scales with the system's
/// characteristic speed: fast systems get finer steps.
pub fn time_budget(window: &Window, mean_speed: f64) -> (f64, f64) {
    let t1 = 100.0 * window.extent() / mean_speed;
    (t1, t1 / 10_000.0)
}

fn run_branch(
    stepper: &mut dyn Stepper,
    initial: Vector2<f64>,
    bounds: &Window,
    t1: f64,
    dt: f64,
    forward: bool,
) -> Vec<Vector2<f64>> {
    let mut branch = Vec::new();
    stepper.set_initial_value(initial);

    loop {
        let within_budget = if forward {
            stepper.t() < t1
        } else {
            stepper.t() > -t1
        };
        if !stepper.successful() || !within_budget {
            break;
        }
        let target = if forward {
            stepper.t() + dt
        } else {
            stepper.t() - dt
        };
        let next = stepper.integrate(target);
        // A failed step and the first sample outside the window are both
        // dropped; the branch ends at the last accepted state.
        if !stepper.successful() || !bounds.contains(next) {
            break;
        }
        branch.push(next);
    }

    branch
}

/// Variant A: drive a stateful stepper from `initial` in the requested
/// directions until the time budget elapses, the trajectory leaves
/// `bounds`, or the stepper fails.
///
/// The result is the backward branch reversed into chronological order,
/// then the initial condition, then the forward branch.
pub fn simulate_stepper(
    stepper: &mut dyn Stepper,
    initial: Vector2<f64>,
    bounds: &Window,
    t1: f64,
    dt: f64,
    direction: Direction,
) -> Trajectory {
    let forward = if direction.wants_forward() {
        run_branch(stepper, initial, bounds, t1, dt, true)
    } else {
        Vec::new()
    };
    let backward = if direction.wants_backward() {
        run_branch(stepper, initial, bounds, t1, dt, false)
    } else {
        Vec::new()
    };

    let mut points = Vec::with_capacity(backward.len() + 1 + forward.len());
    points.extend(backward.iter().rev().copied());
    points.push(initial);
    points.extend(forward);

    Trajectory { initial, points }
}

/// Eager input check for Variant B, run before any derivative evaluation.
pub fn validate_batch_input(
    initial_conditions: &[Vector2<f64>],
    time_grids: &[Vec<f64>],
) -> Result<()> {
    if initial_conditions.len() != time_grids.len() {
        bail!(InputError::GridMismatch {
            initial_conditions: initial_conditions.len(),
            time_grids: time_grids.len(),
        });
    }
    Ok(())
}

/// Variant B: one batch-solver call per initial condition over its own time
/// grid. No domain-exit truncation; the full requested trajectory is
/// returned even where it leaves the display window.
pub fn simulate_batch(
    solver: &dyn BatchSolver,
    field: &dyn VectorField,
    initial_conditions: &[Vector2<f64>],
    time_grids: &[Vec<f64>],
) -> Result<Vec<Trajectory>> {
    validate_batch_input(initial_conditions, time_grids)?;

    initial_conditions
        .iter()
        .zip(time_grids)
        .map(|(&initial, times)| {
            let points = solver.solve(field, initial, times)?;
            Ok(Trajectory { initial, points })
        })
        .collect()
}

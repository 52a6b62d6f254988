use crate::error::InputError;
use crate::traits::{BatchSolver, Stepper, VectorField};
use anyhow::{bail, Result};
use nalgebra::Vector2;

/// One classic Runge-Kutta 4th order step from (t, state) over dt.
fn rk4_step(
    field: &dyn VectorField,
    t: f64,
    state: Vector2<f64>,
    dt: f64,
) -> Result<Vector2<f64>> {
    let half = 0.5 * dt;

    let k1 = field.eval(t, state)?;
    let k2 = field.eval(t + half, state + k1 * half)?;
    let k3 = field.eval(t + half, state + k2 * half)?;
    let k4 = field.eval(t + dt, state + k3 * dt)?;

    Ok(state + (k1 + k2 * 2.0 + k3 * 2.0 + k4) * (dt / 6.0))
}

/// Reference implementation of the stepper-object protocol, backed by a
/// fixed-step RK4 core.
///
/// The success flag drops when the field fails or a step produces a
/// non-finite state; the stepper then holds the last successful state and
/// time until `set_initial_value` raises the flag again.
pub struct Rk4Stepper<F: VectorField> {
    field: F,
    t: f64,
    state: Vector2<f64>,
    ok: bool,
}

impl<F: VectorField> Rk4Stepper<F> {
    pub fn new(field: F) -> Self {
        Self {
            field,
            t: 0.0,
            state: Vector2::new(0.0, 0.0),
            ok: true,
        }
    }
}

impl<F: VectorField> Stepper for Rk4Stepper<F> {
    fn set_initial_value(&mut self, state: Vector2<f64>) {
        self.state = state;
        self.t = 0.0;
        self.ok = true;
    }

    fn t(&self) -> f64 {
        self.t
    }

    fn successful(&self) -> bool {
        self.ok
    }

    fn integrate(&mut self, t_next: f64) -> Vector2<f64> {
        if !self.ok {
            return self.state;
        }
        match rk4_step(&self.field, self.t, self.state, t_next - self.t) {
            Ok(next) if next.x.is_finite() && next.y.is_finite() => {
                self.state = next;
                self.t = t_next;
            }
            _ => self.ok = false,
        }
        self.state
    }

    fn derivative(&self, t: f64, state: Vector2<f64>) -> Result<Vector2<f64>> {
        self.field.eval(t, state)
    }
}

/// Reference implementation of the batch-solve protocol: `substeps` RK4
/// steps per time-grid interval. This is the documented default solver for
/// `phase_plane_batch`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rk4BatchSolver {
    pub substeps: usize,
}

impl Default for Rk4BatchSolver {
    fn default() -> Self {
        Self { substeps: 4 }
    }
}

impl BatchSolver for Rk4BatchSolver {
    fn solve(
        &self,
        field: &dyn VectorField,
        initial: Vector2<f64>,
        times: &[f64],
    ) -> Result<Vec<Vector2<f64>>> {
        if times.is_empty() || times.windows(2).any(|pair| pair[1] <= pair[0]) {
            bail!(InputError::TimeGrid);
        }
        let substeps = self.substeps.max(1);

        let mut states = Vec::with_capacity(times.len());
        let mut state = initial;
        let mut t = times[0];
        states.push(state);

        for pair in times.windows(2) {
            let h = (pair[1] - pair[0]) / substeps as f64;
            for _ in 0..substeps {
                state = rk4_step(field, t, state, h)?;
                t += h;
            }
            states.push(state);
        }

        Ok(states)
    }
}

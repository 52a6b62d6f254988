use crate::cobweb::cobweb_diagram;
use crate::field::{sample_field, FieldGrid};
use crate::render::{Arrow, PlotSurface};
use crate::traits::{BatchSolver, ScalarMap, Stepper, VectorField};
use crate::trajectory::{simulate_batch, simulate_stepper, time_budget, validate_batch_input};
use crate::window::{Direction, GridShape, Window};
use anyhow::Result;
use nalgebra::Vector2;

/// Options for the stepper-protocol phase plane. A fresh `Default` value
/// per call; nothing is shared across invocations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhasePlaneSettings {
    /// Vector-field lattice shape.
    pub grid_shape: GridShape,
    /// Region to sample the field over. Defaults to the domain window
    /// scaled by 4 about its midpoints.
    pub calc_window: Option<Window>,
    /// Simulation time direction per initial condition.
    pub direction: Direction,
    /// Draw a marker at each initial condition.
    pub mark_initial: bool,
}

impl Default for PhasePlaneSettings {
    fn default() -> Self {
        Self {
            grid_shape: GridShape::default(),
            calc_window: None,
            direction: Direction::Both,
            mark_initial: false,
        }
    }
}

/// Adapter exposing a stepper's right-hand side as a `VectorField` for
/// grid sampling.
struct StepperField<'a>(&'a dyn Stepper);

impl VectorField for StepperField<'_> {
    fn eval(&self, t: f64, state: Vector2<f64>) -> Result<Vector2<f64>> {
        self.0.derivative(t, state)
    }
}

fn draw_field(grid: &FieldGrid, surface: &mut dyn PlotSurface) {
    for i in 0..grid.points.len() {
        surface.arrow(Arrow {
            base: grid.points[i],
            direction: grid.directions[i],
            intensity: grid.speeds[i],
        });
    }
}

/// Draw a cobweb diagram for the iterated map: identity line, map curve,
/// then `nsteps` right-angle connectors with vertex markers.
pub fn cobweb<M>(
    map: &M,
    initial_condition: f64,
    nsteps: usize,
    limits: (f64, f64),
    surface: &mut dyn PlotSurface,
) -> Result<()>
where
    M: ScalarMap<f64> + ?Sized,
{
    let diagram = cobweb_diagram(map, initial_condition, nsteps, limits)?;

    let (lo, hi) = diagram.limits;
    surface.polyline(&[Vector2::new(lo, lo), Vector2::new(hi, hi)]);

    let curve: Vec<Vector2<f64>> = diagram
        .curve
        .iter()
        .map(|&(x, y)| Vector2::new(x, y))
        .collect();
    surface.polyline(&curve);

    for step in &diagram.steps {
        let path: Vec<Vector2<f64>> = step
            .vertices()
            .iter()
            .map(|&(x, y)| Vector2::new(x, y))
            .collect();
        for &vertex in &path {
            surface.marker(vertex);
        }
        surface.polyline(&path);
    }

    Ok(())
}

/// Variant A phase plane: normalized vector field over the calculation
/// window plus one domain-truncated trajectory per initial condition,
/// driven by the supplied stepper object.
pub fn phase_plane_stepper(
    stepper: &mut dyn Stepper,
    initial_conditions: &[Vector2<f64>],
    domain_window: Window,
    settings: &PhasePlaneSettings,
    surface: &mut dyn PlotSurface,
) -> Result<()> {
    let calc_window = settings
        .calc_window
        .unwrap_or_else(|| domain_window.scaled(4.0));
    let grid = sample_field(&StepperField(&*stepper), &calc_window, settings.grid_shape)?;
    draw_field(&grid, surface);

    let (t1, dt) = time_budget(&domain_window, grid.mean_speed());
    for &initial in initial_conditions {
        let trajectory = simulate_stepper(
            stepper,
            initial,
            &domain_window,
            t1,
            dt,
            settings.direction,
        );
        if settings.mark_initial {
            surface.marker(initial);
        }
        surface.polyline(&trajectory.points);
    }

    surface.set_viewport(&domain_window);
    Ok(())
}

/// Variant B phase plane: normalized vector field over the domain window
/// plus one full batch-solved trajectory per initial condition. The grid
/// mismatch check runs first, before any derivative evaluation; no
/// domain-exit truncation is applied.
pub fn phase_plane_batch(
    field: &dyn VectorField,
    initial_conditions: &[Vector2<f64>],
    time_grids: &[Vec<f64>],
    domain_window: Window,
    solver: &dyn BatchSolver,
    grid_shape: GridShape,
    surface: &mut dyn PlotSurface,
) -> Result<()> {
    validate_batch_input(initial_conditions, time_grids)?;

    let grid = sample_field(field, &domain_window, grid_shape)?;
    draw_field(&grid, surface);

    for trajectory in simulate_batch(solver, field, initial_conditions, time_grids)? {
        surface.polyline(&trajectory.points);
    }

    surface.set_viewport(&domain_window);
    Ok(())
}

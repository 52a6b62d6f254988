use thiserror::Error;

/// Input-validation failures, detected eagerly before any simulation work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InputError {
    #[error(
        "Number of time grids ({time_grids}) does not match number of initial conditions ({initial_conditions})."
    )]
    GridMismatch {
        initial_conditions: usize,
        time_grids: usize,
    },
    #[error("Window bounds must be finite with xmin < xmax and ymin < ymax.")]
    WindowBounds,
    #[error("Vector field grid needs at least 2 samples per axis.")]
    GridShape,
    #[error("Simulation times must be a non-empty, strictly increasing sequence.")]
    TimeGrid,
    #[error("Cobweb limits must satisfy lower < upper.")]
    CobwebLimits,
}

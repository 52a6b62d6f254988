/// The `dynplt_core` crate computes cobweb diagrams for 1-D iterated maps
/// and phase-plane diagrams (normalized vector field plus trajectories) for
/// planar dynamical systems.
///
/// Key components:
/// - **Traits**: `VectorField`/`ScalarMap` (system dynamics), `Stepper`
///   (stateful integrator protocol), `BatchSolver` (whole-grid protocol),
///   `PlotSurface` (rendering boundary).
/// - **Engines**: vector-field sampler, Variant A stepper-driven and
///   Variant B batch-solved trajectory integrators, cobweb iterator.
/// - **Solvers**: reference RK4 implementations of both protocols.
pub mod cobweb;
pub mod error;
pub mod field;
pub mod portrait;
pub mod render;
pub mod solvers;
pub mod traits;
pub mod trajectory;
pub mod window;

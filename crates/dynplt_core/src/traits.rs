use anyhow::Result;
use nalgebra::Vector2;
use num_traits::{Float, FromPrimitive};
use std::fmt::Debug;

/// A trait for types that can be used as scalars in iterated maps.
/// Must support basic arithmetic, debug printing, and conversion from f64.
pub trait Scalar: Float + FromPrimitive + Debug + 'static {}

impl<T: Float + FromPrimitive + Debug + 'static> Scalar for T {}

/// Right-hand side of a planar system, dx/dt = f(t, x).
///
/// Implementations are expected to be stateless; the engine evaluates the
/// field many times per plot (once per grid point, four times per RK4 step).
/// A failure propagates unchanged to the caller.
pub trait VectorField {
    fn eval(&self, t: f64, state: Vector2<f64>) -> Result<Vector2<f64>>;
}

/// Infallible closures are vector fields. Parameters of the system live in
/// the closure's captures.
impl<F> VectorField for F
where
    F: Fn(f64, Vector2<f64>) -> Vector2<f64>,
{
    fn eval(&self, t: f64, state: Vector2<f64>) -> Result<Vector2<f64>> {
        Ok(self(t, state))
    }
}

/// A one-dimensional iterated map, x_{n+1} = f(x_n).
pub trait ScalarMap<T: Scalar> {
    fn apply(&self, x: T) -> Result<T>;
}

impl<T: Scalar, F> ScalarMap<T> for F
where
    F: Fn(T) -> T,
{
    fn apply(&self, x: T) -> Result<T> {
        Ok(self(x))
    }
}

/// The stepper-object protocol: a stateful integrator that advances one
/// time increment per call and reports success or failure through a flag.
///
/// After a failed `integrate` the flag stays down and the state stays at
/// the last successful value; callers truncate the affected branch there.
pub trait Stepper {
    /// Reset the integrator to `state` at time zero and raise the flag.
    fn set_initial_value(&mut self, state: Vector2<f64>);

    /// Current integration time.
    fn t(&self) -> f64;

    /// True while every step so far has succeeded.
    fn successful(&self) -> bool;

    /// Advance to `t_next` and return the state there. On failure the
    /// state at the last successful time is returned instead.
    fn integrate(&mut self, t_next: f64) -> Vector2<f64>;

    /// The right-hand side driving this stepper, used for vector-field
    /// sampling.
    fn derivative(&self, t: f64, state: Vector2<f64>) -> Result<Vector2<f64>>;
}

/// The batch-solve protocol: solve over a whole pre-specified time grid in
/// one call.
///
/// `times` must be strictly increasing. The returned states align with
/// `times` one to one, with the state at `times[0]` being `initial` itself.
pub trait BatchSolver {
    fn solve(
        &self,
        field: &dyn VectorField,
        initial: Vector2<f64>,
        times: &[f64],
    ) -> Result<Vec<Vector2<f64>>>;
}

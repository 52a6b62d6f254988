use crate::traits::VectorField;
use crate::window::{GridShape, Window};
use anyhow::Result;
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

/// Vector field sampled on a regular lattice, row-major from the bottom-left
/// corner of the window.
///
/// `directions` hold unit vectors, except at equilibria where the zero
/// vector is kept as-is. `speeds` hold the raw derivative norms and drive
/// arrow color intensity downstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldGrid {
    pub shape: GridShape,
    pub points: Vec<Vector2<f64>>,
    pub directions: Vec<Vector2<f64>>,
    pub speeds: Vec<f64>,
}

impl FieldGrid {
    /// Mean of the normalization divisors over the lattice. Zero norms
    /// count as 1, the same substitution the normalization applies, so an
    /// equilibrium-heavy grid still yields a usable time budget.
    pub fn mean_speed(&self) -> f64 {
        if self.speeds.is_empty() {
            return 1.0;
        }
        let sum: f64 = self
            .speeds
            .iter()
            .map(|&s| if s == 0.0 { 1.0 } else { s })
            .sum();
        sum / self.speeds.len() as f64
    }
}

/// Evaluate `field` at t = 0 on a `shape` lattice over `window` and
/// normalize each sample to unit length.
///
/// Zero vectors (equilibria) divide by 1 instead of 0, so the output never
/// contains NaN or infinities for a finite field. Field failures propagate.
pub fn sample_field(
    field: &dyn VectorField,
    window: &Window,
    shape: GridShape,
) -> Result<FieldGrid> {
    shape.validate()?;

    let dx = (window.xmax - window.xmin) / (shape.cols - 1) as f64;
    let dy = (window.ymax - window.ymin) / (shape.rows - 1) as f64;

    let mut points = Vec::with_capacity(shape.len());
    let mut directions = Vec::with_capacity(shape.len());
    let mut speeds = Vec::with_capacity(shape.len());

    for iy in 0..shape.rows {
        let y = window.ymin + dy * iy as f64;
        for ix in 0..shape.cols {
            let x = window.xmin + dx * ix as f64;
            let point = Vector2::new(x, y);
            let derivative = field.eval(0.0, point)?;
            let speed = derivative.norm();
            let divisor = if speed == 0.0 { 1.0 } else { speed };
            points.push(point);
            directions.push(derivative / divisor);
            speeds.push(speed);
        }
    }

    Ok(FieldGrid {
        shape,
        points,
        directions,
        speeds,
    })
}

#[cfg(test)]
mod tests {
    use super::sample_field;
    use crate::error::InputError;
    use crate::traits::VectorField;
    use crate::window::{GridShape, Window};
    use anyhow::{bail, Result};
    use nalgebra::Vector2;

    struct FailingField;

    impl VectorField for FailingField {
        fn eval(&self, _t: f64, _state: Vector2<f64>) -> Result<Vector2<f64>> {
            bail!("derivative evaluation failed")
        }
    }

    #[test]
    fn equilibrium_sample_stays_zero_without_nan() {
        // dx/dt = x, dy/dt = y has an equilibrium at the origin, which sits
        // on the 3x3 lattice over a symmetric window.
        let field = |_t: f64, state: Vector2<f64>| state;
        let window = Window::new(-1.0, 1.0, -1.0, 1.0).expect("window should build");
        let grid = sample_field(&field, &window, GridShape { cols: 3, rows: 3 })
            .expect("sampling should succeed");

        let center = 4; // row-major index of (0, 0)
        assert_eq!(grid.directions[center], Vector2::new(0.0, 0.0));
        assert_eq!(grid.speeds[center], 0.0);
        for direction in &grid.directions {
            assert!(direction.x.is_finite() && direction.y.is_finite());
        }
    }

    #[test]
    fn nonzero_samples_are_unit_length() {
        let field = |_t: f64, state: Vector2<f64>| Vector2::new(-state.y, state.x) * 3.0;
        let window = Window::new(1.0, 2.0, 1.0, 2.0).expect("window should build");
        let grid = sample_field(&field, &window, GridShape::default())
            .expect("sampling should succeed");

        assert_eq!(grid.points.len(), 400);
        for (direction, speed) in grid.directions.iter().zip(&grid.speeds) {
            assert!((direction.norm() - 1.0).abs() < 1e-12);
            assert!(*speed > 0.0);
        }
    }

    #[test]
    fn mean_speed_counts_equilibria_as_unit() {
        let field = |_t: f64, _state: Vector2<f64>| Vector2::new(0.0, 0.0);
        let window = Window::new(-1.0, 1.0, -1.0, 1.0).expect("window should build");
        let grid = sample_field(&field, &window, GridShape { cols: 4, rows: 4 })
            .expect("sampling should succeed");
        assert_eq!(grid.mean_speed(), 1.0);
    }

    #[test]
    fn rejects_degenerate_grid_shape() {
        let field = |_t: f64, state: Vector2<f64>| state;
        let window = Window::new(-1.0, 1.0, -1.0, 1.0).expect("window should build");
        let err = sample_field(&field, &window, GridShape { cols: 20, rows: 1 })
            .expect_err("single row should fail");
        assert_eq!(
            err.downcast_ref::<InputError>(),
            Some(&InputError::GridShape)
        );
    }

    #[test]
    fn field_failures_propagate() {
        let window = Window::new(-1.0, 1.0, -1.0, 1.0).expect("window should build");
        let err = sample_field(&FailingField, &window, GridShape::default())
            .expect_err("failing field should propagate");
        assert!(err.to_string().contains("derivative evaluation failed"));
    }
}

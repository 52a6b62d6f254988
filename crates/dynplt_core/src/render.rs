use crate::window::Window;
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

/// One arrow of the sampled vector field. `direction` is unit length (zero
/// at equilibria) and `intensity` is the raw derivative norm, intended for
/// color mapping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arrow {
    pub base: Vector2<f64>,
    pub direction: Vector2<f64>,
    pub intensity: f64,
}

/// Drawing surface boundary. The engine only ever hands over point
/// sequences, markers, arrows, and a viewport; everything about aesthetics
/// belongs to the implementation behind this trait.
pub trait PlotSurface {
    fn polyline(&mut self, points: &[Vector2<f64>]);
    fn marker(&mut self, point: Vector2<f64>);
    fn arrow(&mut self, arrow: Arrow);
    fn set_viewport(&mut self, window: &Window);
}

/// Surface that records every draw call. Used by the tests and the demo
/// programs, and convenient as a staging buffer for real backends.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct MemorySurface {
    pub polylines: Vec<Vec<Vector2<f64>>>,
    pub markers: Vec<Vector2<f64>>,
    pub arrows: Vec<Arrow>,
    pub viewport: Option<Window>,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PlotSurface for MemorySurface {
    fn polyline(&mut self, points: &[Vector2<f64>]) {
        self.polylines.push(points.to_vec());
    }

    fn marker(&mut self, point: Vector2<f64>) {
        self.markers.push(point);
    }

    fn arrow(&mut self, arrow: Arrow) {
        self.arrows.push(arrow);
    }

    fn set_viewport(&mut self, window: &Window) {
        self.viewport = Some(*window);
    }
}

#[cfg(test)]
mod tests {
    use super::{Arrow, MemorySurface, PlotSurface};
    use crate::window::Window;
    use nalgebra::Vector2;

    #[test]
    fn memory_surface_records_calls_in_order() {
        let mut surface = MemorySurface::new();
        surface.polyline(&[Vector2::new(0.0, 0.0), Vector2::new(1.0, 1.0)]);
        surface.marker(Vector2::new(0.5, 0.5));
        surface.arrow(Arrow {
            base: Vector2::new(0.0, 0.0),
            direction: Vector2::new(1.0, 0.0),
            intensity: 2.0,
        });
        let window = Window::new(-1.0, 1.0, -1.0, 1.0).expect("window should build");
        surface.set_viewport(&window);

        assert_eq!(surface.polylines.len(), 1);
        assert_eq!(surface.polylines[0].len(), 2);
        assert_eq!(surface.markers, vec![Vector2::new(0.5, 0.5)]);
        assert_eq!(surface.arrows[0].intensity, 2.0);
        assert_eq!(surface.viewport, Some(window));
    }
}

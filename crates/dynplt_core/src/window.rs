use crate::error::InputError;
use anyhow::{bail, Result};
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

/// Rectangular region of the phase plane.
///
/// Used both as the display window (which also bounds Variant A trajectory
/// truncation) and as the calculation window for vector-field sampling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Window {
    pub xmin: f64,
    pub xmax: f64,
    pub ymin: f64,
    pub ymax: f64,
}

impl Window {
    pub fn new(xmin: f64, xmax: f64, ymin: f64, ymax: f64) -> Result<Self> {
        let finite =
            xmin.is_finite() && xmax.is_finite() && ymin.is_finite() && ymax.is_finite();
        if !finite || xmin >= xmax || ymin >= ymax {
            bail!(InputError::WindowBounds);
        }
        Ok(Self {
            xmin,
            xmax,
            ymin,
            ymax,
        })
    }

    /// Whether `point` lies inside the window. Bounds are inclusive.
    pub fn contains(&self, point: Vector2<f64>) -> bool {
        point.x >= self.xmin
            && point.x <= self.xmax
            && point.y >= self.ymin
            && point.y <= self.ymax
    }

    /// Scale each axis by `factor` about its midpoint. With factor 4 this
    /// yields the default calculation window for a display window.
    pub fn scaled(&self, factor: f64) -> Self {
        let xmid = 0.5 * (self.xmin + self.xmax);
        let ymid = 0.5 * (self.ymin + self.ymax);
        Self {
            xmin: (self.xmin - xmid) * factor + xmid,
            xmax: (self.xmax - xmid) * factor + xmid,
            ymin: (self.ymin - ymid) * factor + ymid,
            ymax: (self.ymax - ymid) * factor + ymid,
        }
    }

    /// Characteristic length for the time budget: the distance between the
    /// largest upper bound and the smallest lower bound over both axes.
    pub fn extent(&self) -> f64 {
        self.xmax.max(self.ymax) - self.xmin.min(self.ymin)
    }
}

/// Shape of the vector-field sample lattice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridShape {
    pub cols: usize,
    pub rows: usize,
}

impl GridShape {
    pub fn validate(&self) -> Result<()> {
        if self.cols < 2 || self.rows < 2 {
            bail!(InputError::GridShape);
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.cols * self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for GridShape {
    fn default() -> Self {
        Self { cols: 20, rows: 20 }
    }
}

/// Which way to run Variant A simulation time from each initial condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Forward,
    Backward,
    Both,
}

impl Direction {
    pub fn wants_forward(&self) -> bool {
        matches!(self, Direction::Forward | Direction::Both)
    }

    pub fn wants_backward(&self) -> bool {
        matches!(self, Direction::Backward | Direction::Both)
    }
}

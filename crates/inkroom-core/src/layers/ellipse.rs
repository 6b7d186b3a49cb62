//! Ellipse layer.

use super::{Color, LayerBase};
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// An ellipse inscribed in the layer frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EllipseLayer {
    pub base: LayerBase,
}

impl EllipseLayer {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            base: LayerBase::new(x, y, width, height, Color::layer_default()),
        }
    }

    pub fn center(&self) -> Point {
        self.base.bounds().center()
    }

    pub fn radii(&self) -> (f64, f64) {
        (self.base.width / 2.0, self.base.height / 2.0)
    }
}

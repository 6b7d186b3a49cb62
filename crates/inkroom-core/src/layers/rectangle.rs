//! Rectangle layer.

use super::{Color, LayerBase};
use serde::{Deserialize, Serialize};

/// A rectangle with optional rounded corners.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RectangleLayer {
    pub base: LayerBase,
    /// Corner radius (0 = sharp corners).
    #[serde(default)]
    pub corner_radius: f64,
}

impl RectangleLayer {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            base: LayerBase::new(x, y, width, height, Color::layer_default()),
            corner_radius: 0.0,
        }
    }

    /// Build a rectangle spanning two corner points.
    pub fn from_corners(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self::new(x1.min(x2), y1.min(y2), (x2 - x1).abs(), (y2 - y1).abs())
    }
}

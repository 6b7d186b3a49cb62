//! Freehand path layer.

use super::{Color, LayerBase};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// A sampled pen position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrokePoint {
    pub x: f64,
    pub y: f64,
    /// Pen pressure in `[0, 1]`; 0.5 when the device does not report it.
    pub pressure: f64,
}

impl StrokePoint {
    pub const DEFAULT_PRESSURE: f64 = 0.5;

    pub fn new(x: f64, y: f64, pressure: f64) -> Self {
        Self { x, y, pressure }
    }

    pub fn at(point: Point) -> Self {
        Self::new(point.x, point.y, Self::DEFAULT_PRESSURE)
    }

    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// A freehand stroke. Points are stored relative to the layer origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathLayer {
    pub base: LayerBase,
    pub points: Vec<StrokePoint>,
}

impl PathLayer {
    /// Build a path layer from absolute pen samples.
    ///
    /// The layer frame is the bounding box of the samples and the stored points
    /// are rebased onto its top-left corner. Returns `None` for an empty stroke.
    pub fn from_stroke(points: &[StrokePoint], color: Color) -> Option<Self> {
        let bounds = stroke_bounds(points)?;
        let rebased = points
            .iter()
            .map(|p| StrokePoint::new(p.x - bounds.x0, p.y - bounds.y0, p.pressure))
            .collect();
        Some(Self {
            base: LayerBase::new(bounds.x0, bounds.y0, bounds.width(), bounds.height(), color),
            points: rebased,
        })
    }

    /// Points in document coordinates.
    pub fn absolute_points(&self) -> impl Iterator<Item = Point> + '_ {
        let origin = self.base.position().to_vec2();
        self.points.iter().map(move |p| p.point() + origin)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Bounding box of a set of samples, `None` when empty.
pub(crate) fn stroke_bounds(points: &[StrokePoint]) -> Option<Rect> {
    let first = points.first()?;
    Some(
        points
            .iter()
            .skip(1)
            .fold(Rect::from_points(first.point(), first.point()), |acc, p| {
                acc.union_pt(p.point())
            }),
    )
}

//! Layer definitions for the shared document.

mod color;
mod ellipse;
mod frame;
mod path;
mod rectangle;
mod text;
mod update;

pub use color::{Color, normalize_hex};
pub use ellipse::EllipseLayer;
pub use frame::FrameLayer;
pub use path::{PathLayer, StrokePoint};
pub use rectangle::RectangleLayer;
pub use text::TextLayer;
pub use update::{LayerUpdate, ShadowUpdate, clamp_opacity, parse_number};

use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of a layer inside a document.
pub type LayerId = String;

/// Mint a fresh, globally unique layer id.
pub fn new_layer_id() -> LayerId {
    Uuid::new_v4().to_string()
}

/// Upper bound of opacity-like fields (percent).
pub const MAX_OPACITY: f64 = 100.0;

fn full_opacity() -> f64 {
    MAX_OPACITY
}

fn default_stroke_width() -> f64 {
    1.0
}

/// Where a stroke sits relative to the layer outline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrokeAlign {
    Inside,
    #[default]
    Center,
    Outside,
}

/// Drop shadow settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shadow {
    pub enabled: bool,
    /// Horizontal offset.
    pub x: f64,
    /// Vertical offset.
    pub y: f64,
    /// Blur radius (>= 0).
    pub blur: f64,
    pub color: Color,
    /// Shadow opacity, 0-100.
    pub opacity: f64,
}

impl Default for Shadow {
    fn default() -> Self {
        Self {
            enabled: false,
            x: 0.0,
            y: 6.0,
            blur: 18.0,
            color: Color::black(),
            opacity: 24.0,
        }
    }
}

/// Fields shared by every layer kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerBase {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fill: Color,
    /// Fill opacity, 0-100.
    #[serde(default = "full_opacity")]
    pub fill_opacity: f64,
    pub stroke: Color,
    /// Stroke opacity, 0-100.
    #[serde(default = "full_opacity")]
    pub stroke_opacity: f64,
    #[serde(default = "default_stroke_width")]
    pub stroke_width: f64,
    #[serde(default)]
    pub stroke_align: StrokeAlign,
    /// Overall opacity, 0-100.
    pub opacity: f64,
    /// Rotation in degrees around the layer origin.
    #[serde(default)]
    pub rotation: f64,
    #[serde(default)]
    pub shadow: Option<Shadow>,
}

impl LayerBase {
    /// A fully opaque layer frame filled and stroked with `fill`.
    pub fn new(x: f64, y: f64, width: f64, height: f64, fill: Color) -> Self {
        Self {
            x,
            y,
            width,
            height,
            fill,
            fill_opacity: MAX_OPACITY,
            stroke: fill,
            stroke_opacity: MAX_OPACITY,
            stroke_width: default_stroke_width(),
            stroke_align: StrokeAlign::default(),
            opacity: MAX_OPACITY,
            rotation: 0.0,
            shadow: None,
        }
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Axis-aligned frame of the layer (rotation is not applied).
    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.x += delta.x;
        self.y += delta.y;
    }

    /// Whether every numeric visual field is finite.
    pub fn is_finite(&self) -> bool {
        let shadow_finite = self.shadow.as_ref().is_none_or(|s| {
            s.x.is_finite() && s.y.is_finite() && s.blur.is_finite() && s.opacity.is_finite()
        });
        [
            self.x,
            self.y,
            self.width,
            self.height,
            self.fill_opacity,
            self.stroke_opacity,
            self.stroke_width,
            self.opacity,
            self.rotation,
        ]
        .iter()
        .all(|v| v.is_finite())
            && shadow_finite
    }
}

/// Discriminator of a layer's kind. Fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LayerKind {
    Rectangle,
    Ellipse,
    Path,
    Text,
    Frame,
}

/// A layer of the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Layer {
    Rectangle(RectangleLayer),
    Ellipse(EllipseLayer),
    Path(PathLayer),
    Text(TextLayer),
    Frame(FrameLayer),
}

impl Layer {
    pub fn kind(&self) -> LayerKind {
        match self {
            Layer::Rectangle(_) => LayerKind::Rectangle,
            Layer::Ellipse(_) => LayerKind::Ellipse,
            Layer::Path(_) => LayerKind::Path,
            Layer::Text(_) => LayerKind::Text,
            Layer::Frame(_) => LayerKind::Frame,
        }
    }

    pub fn base(&self) -> &LayerBase {
        match self {
            Layer::Rectangle(l) => &l.base,
            Layer::Ellipse(l) => &l.base,
            Layer::Path(l) => &l.base,
            Layer::Text(l) => &l.base,
            Layer::Frame(l) => &l.base,
        }
    }

    pub fn base_mut(&mut self) -> &mut LayerBase {
        match self {
            Layer::Rectangle(l) => &mut l.base,
            Layer::Ellipse(l) => &mut l.base,
            Layer::Path(l) => &mut l.base,
            Layer::Text(l) => &mut l.base,
            Layer::Frame(l) => &mut l.base,
        }
    }

    pub fn bounds(&self) -> Rect {
        self.base().bounds()
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.base_mut().translate(delta);
    }

    /// Corner radius for kinds that have one.
    pub fn corner_radius(&self) -> Option<f64> {
        match self {
            Layer::Rectangle(r) => Some(r.corner_radius),
            Layer::Frame(f) => Some(f.corner_radius),
            Layer::Ellipse(_) | Layer::Path(_) | Layer::Text(_) => None,
        }
    }

    pub fn corner_radius_mut(&mut self) -> Option<&mut f64> {
        match self {
            Layer::Rectangle(r) => Some(&mut r.corner_radius),
            Layer::Frame(f) => Some(&mut f.corner_radius),
            Layer::Ellipse(_) | Layer::Path(_) | Layer::Text(_) => None,
        }
    }

    pub fn as_path(&self) -> Option<&PathLayer> {
        match self {
            Layer::Path(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&TextLayer> {
        match self {
            Layer::Text(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_frame(&self) -> Option<&FrameLayer> {
        match self {
            Layer::Frame(f) => Some(f),
            _ => None,
        }
    }

    /// Whether every numeric field of this layer is finite.
    pub fn is_finite(&self) -> bool {
        let own = match self {
            Layer::Rectangle(r) => r.corner_radius.is_finite(),
            Layer::Frame(f) => f.corner_radius.is_finite(),
            Layer::Path(p) => p
                .points
                .iter()
                .all(|pt| pt.x.is_finite() && pt.y.is_finite() && pt.pressure.is_finite()),
            Layer::Text(t) => t.font_size.is_finite(),
            Layer::Ellipse(_) => true,
        };
        own && self.base().is_finite()
    }
}

impl From<RectangleLayer> for Layer {
    fn from(layer: RectangleLayer) -> Self {
        Layer::Rectangle(layer)
    }
}

impl From<EllipseLayer> for Layer {
    fn from(layer: EllipseLayer) -> Self {
        Layer::Ellipse(layer)
    }
}

impl From<PathLayer> for Layer {
    fn from(layer: PathLayer) -> Self {
        Layer::Path(layer)
    }
}

impl From<TextLayer> for Layer {
    fn from(layer: TextLayer) -> Self {
        Layer::Text(layer)
    }
}

impl From<FrameLayer> for Layer {
    fn from(layer: FrameLayer) -> Self {
        Layer::Frame(layer)
    }
}

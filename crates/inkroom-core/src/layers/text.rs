//! Text layer.

use super::{Color, LayerBase};
use serde::{Deserialize, Serialize};

/// A block of text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextLayer {
    pub base: LayerBase,
    pub text: String,
    /// Font size in pixels (>= 1).
    pub font_size: f64,
    /// CSS-style numeric weight, 100-900.
    pub font_weight: u16,
    pub font_family: String,
}

impl TextLayer {
    pub const DEFAULT_FONT_SIZE: f64 = 16.0;
    pub const DEFAULT_FONT_WEIGHT: u16 = 400;
    pub const DEFAULT_FONT_FAMILY: &'static str = "Inter";
    pub const MIN_FONT_WEIGHT: u16 = 100;
    pub const MAX_FONT_WEIGHT: u16 = 900;

    pub fn new(x: f64, y: f64, text: impl Into<String>) -> Self {
        Self {
            base: LayerBase::new(x, y, 100.0, 100.0, Color::layer_default()),
            text: text.into(),
            font_size: Self::DEFAULT_FONT_SIZE,
            font_weight: Self::DEFAULT_FONT_WEIGHT,
            font_family: Self::DEFAULT_FONT_FAMILY.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_defaults() {
        let text = TextLayer::new(5.0, 5.0, "Text");
        assert_eq!(text.text, "Text");
        assert_eq!(text.font_weight, 400);
        assert_eq!(text.font_family, "Inter");
        assert!((text.font_size - 16.0).abs() < f64::EPSILON);
    }
}

//! Frame layer.

use super::{Color, LayerBase};
use serde::{Deserialize, Serialize};

/// A container frame. Frames are painted like rectangles and may clip content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameLayer {
    pub base: LayerBase,
    #[serde(default)]
    pub corner_radius: f64,
    /// Whether layers drawn inside the frame are clipped to it.
    #[serde(default)]
    pub clip_content: bool,
}

impl FrameLayer {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            base: LayerBase::new(x, y, width, height, Color::white()),
            corner_radius: 0.0,
            clip_content: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_defaults() {
        let frame = FrameLayer::new(0.0, 0.0, 200.0, 100.0);
        assert_eq!(frame.base.fill, Color::white());
        assert!(!frame.clip_content);
    }
}

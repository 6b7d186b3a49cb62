//! Property patches applied to layers, with input normalization.
//!
//! Out-of-range values are clamped and unparseable ones (bad hex, non-finite
//! numbers) are dropped so the previous value stays in place. Nothing here fails.

use super::{Color, Layer, LayerBase, MAX_OPACITY, Shadow, StrokeAlign, TextLayer};

/// Clamp an opacity-like value to `[0, 100]`.
pub fn clamp_opacity(value: f64) -> f64 {
    value.clamp(0.0, MAX_OPACITY)
}

fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

fn at_least(value: Option<f64>, min: f64) -> Option<f64> {
    finite(value).map(|v| v.max(min))
}

fn opacity(value: Option<f64>) -> Option<f64> {
    finite(value).map(clamp_opacity)
}

fn hex(value: Option<&str>) -> Option<Color> {
    let input = value?;
    let color = Color::from_hex(input);
    if color.is_none() {
        log::debug!("ignoring invalid hex color {input:?}");
    }
    color
}

/// Longest leading run of `input` that reads as a decimal number.
fn numeric_prefix(input: &str) -> &str {
    let bytes = input.as_bytes();
    let digits_from = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    let int_end = digits_from(end);
    let mut has_digits = int_end > end;
    end = int_end;
    if bytes.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        if has_digits || frac_end > end + 1 {
            has_digits = true;
            end = frac_end;
        }
    }
    if !has_digits {
        return "";
    }
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_end = digits_from(exp);
        if exp_end > exp {
            end = exp_end;
        }
    }
    &input[..end]
}

/// Parse a numeric field draft and clamp it to the optional bounds.
///
/// Leading whitespace is skipped and trailing text after the number is
/// ignored, so `"12px"` reads as 12. Returns `None` when the draft does not
/// start with a finite number.
pub fn parse_number(draft: &str, min: Option<f64>, max: Option<f64>) -> Option<f64> {
    let mut value = numeric_prefix(draft.trim_start())
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())?;
    if let Some(min) = min {
        value = value.max(min);
    }
    if let Some(max) = max {
        value = value.min(max);
    }
    Some(value)
}

/// Partial shadow settings merged onto a layer's shadow.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShadowUpdate {
    pub enabled: Option<bool>,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub blur: Option<f64>,
    /// Hex color input.
    pub color: Option<String>,
    pub opacity: Option<f64>,
}

impl ShadowUpdate {
    /// Merge the set fields into `shadow`.
    pub fn merge_into(&self, shadow: &mut Shadow) {
        if let Some(enabled) = self.enabled {
            shadow.enabled = enabled;
        }
        if let Some(x) = finite(self.x) {
            shadow.x = x;
        }
        if let Some(y) = finite(self.y) {
            shadow.y = y;
        }
        if let Some(blur) = at_least(self.blur, 0.0) {
            shadow.blur = blur;
        }
        if let Some(color) = hex(self.color.as_deref()) {
            shadow.color = color;
        }
        if let Some(value) = opacity(self.opacity) {
            shadow.opacity = value;
        }
    }
}

/// A set of property changes for a single layer.
///
/// Fields that the target layer's kind does not carry are ignored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayerUpdate {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub rotation: Option<f64>,
    pub opacity: Option<f64>,
    pub corner_radius: Option<f64>,
    pub clip_content: Option<bool>,
    /// Hex color input.
    pub fill: Option<String>,
    pub fill_opacity: Option<f64>,
    /// Hex color input.
    pub stroke: Option<String>,
    pub stroke_opacity: Option<f64>,
    pub stroke_width: Option<f64>,
    pub stroke_align: Option<StrokeAlign>,
    pub font_size: Option<f64>,
    pub font_weight: Option<f64>,
    pub font_family: Option<String>,
    pub text: Option<String>,
    pub shadow: Option<ShadowUpdate>,
}

impl LayerUpdate {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Apply the normalized patch to `layer`. The layer's kind never changes.
    pub fn apply_to(&self, layer: &mut Layer) {
        self.apply_base(layer.base_mut());

        if let (Some(radius), Some(slot)) =
            (at_least(self.corner_radius, 0.0), layer.corner_radius_mut())
        {
            *slot = radius;
        }

        match layer {
            Layer::Frame(frame) => {
                if let Some(clip) = self.clip_content {
                    frame.clip_content = clip;
                }
            }
            Layer::Text(text) => self.apply_text(text),
            Layer::Rectangle(_) | Layer::Ellipse(_) | Layer::Path(_) => {}
        }
    }

    fn apply_base(&self, base: &mut LayerBase) {
        if let Some(x) = finite(self.x) {
            base.x = x;
        }
        if let Some(y) = finite(self.y) {
            base.y = y;
        }
        if let Some(width) = at_least(self.width, 1.0) {
            base.width = width;
        }
        if let Some(height) = at_least(self.height, 1.0) {
            base.height = height;
        }
        if let Some(rotation) = finite(self.rotation) {
            base.rotation = rotation;
        }
        if let Some(value) = opacity(self.opacity) {
            base.opacity = value;
        }
        if let Some(fill) = hex(self.fill.as_deref()) {
            base.fill = fill;
        }
        if let Some(value) = opacity(self.fill_opacity) {
            base.fill_opacity = value;
        }
        if let Some(stroke) = hex(self.stroke.as_deref()) {
            base.stroke = stroke;
        }
        if let Some(value) = opacity(self.stroke_opacity) {
            base.stroke_opacity = value;
        }
        if let Some(width) = at_least(self.stroke_width, 0.0) {
            base.stroke_width = width;
        }
        if let Some(align) = self.stroke_align {
            base.stroke_align = align;
        }
        if let Some(patch) = &self.shadow {
            patch.merge_into(base.shadow.get_or_insert_with(Shadow::default));
        }
    }

    fn apply_text(&self, text: &mut TextLayer) {
        if let Some(size) = at_least(self.font_size, 1.0) {
            text.font_size = size;
        }
        if let Some(weight) = finite(self.font_weight) {
            let clamped = weight.clamp(
                f64::from(TextLayer::MIN_FONT_WEIGHT),
                f64::from(TextLayer::MAX_FONT_WEIGHT),
            );
            text.font_weight = clamped.round() as u16;
        }
        if let Some(family) = &self.font_family {
            text.font_family.clone_from(family);
        }
        if let Some(content) = &self.text {
            text.text.clone_from(content);
        }
    }
}

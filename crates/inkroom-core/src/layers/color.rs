//! RGB colors and hex input handling.

use peniko::Color as PenikoColor;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An opaque RGB color as stored in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn black() -> Self {
        Self::new(0, 0, 0)
    }

    pub const fn white() -> Self {
        Self::new(255, 255, 255)
    }

    /// Light gray used for freshly inserted layers.
    pub const fn layer_default() -> Self {
        Self::new(217, 217, 217)
    }

    /// Parse user hex input such as `#1e1e1e`, `1E1E1E` or `#abc`.
    ///
    /// Returns `None` for anything that is not a 3 or 6 digit hex color.
    pub fn from_hex(input: &str) -> Option<Self> {
        let normalized = normalize_hex(input)?;
        let digits = &normalized[1..];
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
        Some(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Canonical `#RRGGBB` form.
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl From<PenikoColor> for Color {
    fn from(color: PenikoColor) -> Self {
        let rgba = color.to_rgba8();
        Self::new(rgba.r, rgba.g, rgba.b)
    }
}

impl From<Color> for PenikoColor {
    fn from(color: Color) -> Self {
        PenikoColor::from_rgba8(color.r, color.g, color.b, 255)
    }
}

/// Normalize hex input to uppercase `#RRGGBB`, expanding the short `RGB` form.
///
/// Leading/trailing whitespace and a single leading `#` are accepted.
pub fn normalize_hex(input: &str) -> Option<String> {
    let trimmed = input.trim();
    let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let expanded: String = match digits.len() {
        3 => digits.chars().flat_map(|c| [c, c]).collect(),
        6 => digits.to_string(),
        _ => return None,
    };
    Some(format!("#{}", expanded.to_ascii_uppercase()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex_long_form() {
        assert_eq!(Color::from_hex("#1e1e1e"), Some(Color::new(30, 30, 30)));
        assert_eq!(Color::from_hex("FF8000"), Some(Color::new(255, 128, 0)));
    }

    #[test]
    fn test_from_hex_short_form() {
        assert_eq!(Color::from_hex("#abc"), Some(Color::new(0xAA, 0xBB, 0xCC)));
        assert_eq!(Color::from_hex("  fff "), Some(Color::white()));
    }

    #[test]
    fn test_from_hex_rejects_garbage() {
        assert_eq!(Color::from_hex(""), None);
        assert_eq!(Color::from_hex("#12345"), None);
        assert_eq!(Color::from_hex("#GGGGGG"), None);
        assert_eq!(Color::from_hex("##123456"), None);
        assert_eq!(Color::from_hex("#1234567"), None);
    }

    #[test]
    fn test_normalize_hex() {
        assert_eq!(normalize_hex("#a1b2c3").as_deref(), Some("#A1B2C3"));
        assert_eq!(normalize_hex("0f0").as_deref(), Some("#00FF00"));
        assert_eq!(normalize_hex("red"), None);
    }

    #[test]
    fn test_to_hex() {
        assert_eq!(Color::new(30, 30, 30).to_hex(), "#1E1E1E");
        assert_eq!(Color::black().to_string(), "#000000");
    }

    #[test]
    fn test_peniko_conversion() {
        let color = Color::new(12, 34, 56);
        let peniko: PenikoColor = color.into();
        assert_eq!(Color::from(peniko), color);
    }
}

//! Colour handling
//!
//! Colours given as hex codes (`0x00ff00`, `"#ffea00"`) are sRGB. Lighting
//! runs in linear space, so [`Color`] stores linear components and converts
//! at the edges.

use crate::error::ColorParseError;

/// Linear RGB colour
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const WHITE: Color = Color::linear(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::linear(0.0, 0.0, 0.0);

    pub const fn linear(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// From a packed sRGB hex value such as `0x333333`
    pub fn from_hex(hex: u32) -> Self {
        let r = ((hex >> 16) & 0xff) as f32 / 255.0;
        let g = ((hex >> 8) & 0xff) as f32 / 255.0;
        let b = (hex & 0xff) as f32 / 255.0;
        Self::from_srgb([r, g, b])
    }

    /// From a CSS style string, `#rrggbb` or `#rgb`
    pub fn from_css_hex(value: &str) -> Result<Self, ColorParseError> {
        let digits = value
            .trim()
            .strip_prefix('#')
            .ok_or_else(|| ColorParseError(value.to_string()))?;

        let expanded: String = match digits.len() {
            6 => digits.to_string(),
            3 => digits.chars().flat_map(|c| [c, c]).collect(),
            _ => return Err(ColorParseError(value.to_string())),
        };

        u32::from_str_radix(&expanded, 16)
            .map(Self::from_hex)
            .map_err(|_| ColorParseError(value.to_string()))
    }

    /// From gamma-encoded components in `[0, 1]`
    pub fn from_srgb(srgb: [f32; 3]) -> Self {
        Self {
            r: srgb_to_linear(srgb[0]),
            g: srgb_to_linear(srgb[1]),
            b: srgb_to_linear(srgb[2]),
        }
    }

    /// Gamma-encoded components, the form colour pickers edit
    pub fn to_srgb(self) -> [f32; 3] {
        [
            linear_to_srgb(self.r),
            linear_to_srgb(self.g),
            linear_to_srgb(self.b),
        ]
    }

    /// `#rrggbb` in sRGB
    pub fn to_css_hex(self) -> String {
        let [r, g, b] = self.to_srgb();
        let byte = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!("#{:02x}{:02x}{:02x}", byte(r), byte(g), byte(b))
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    pub fn scaled(self, factor: f32) -> Self {
        Self::linear(self.r * factor, self.g * factor, self.b * factor)
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::WHITE
    }
}

pub fn srgb_to_linear(c: f32) -> f32 {
    if c < 0.04045 {
        c * 0.0773993808
    } else {
        (c * 0.9478672986 + 0.0521327014).powf(2.4)
    }
}

pub fn linear_to_srgb(c: f32) -> f32 {
    if c < 0.0031308 {
        c * 12.92
    } else {
        1.055 * c.powf(0.41666) - 0.055
    }
}

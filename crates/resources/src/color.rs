//! RGB colors.

use std::fmt;
use std::str::FromStr;

use glam::Vec3;

use crate::{ResourceError, ResourceResult};

/// An RGB color with channels in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Build a color from a packed `0xRRGGBB` value.
    pub fn from_hex(hex: u32) -> Self {
        Self::from_rgb8(
            ((hex >> 16) & 0xff) as u8,
            ((hex >> 8) & 0xff) as u8,
            (hex & 0xff) as u8,
        )
    }

    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
    }

    /// Pack into `0xRRGGBB`, clamping each channel.
    pub fn to_hex(self) -> u32 {
        let [r, g, b] = self.to_rgb8();
        ((r as u32) << 16) | ((g as u32) << 8) | b as u32
    }

    /// Lowercase `#rrggbb` form, as edited by color pickers.
    pub fn to_hex_string(self) -> String {
        format!("#{:06x}", self.to_hex())
    }

    pub fn to_rgb8(self) -> [u8; 3] {
        let quantize = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [quantize(self.r), quantize(self.g), quantize(self.b)]
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    pub fn from_array(rgb: [f32; 3]) -> Self {
        Self::new(rgb[0], rgb[1], rgb[2])
    }

    pub fn to_vec3(self) -> Vec3 {
        Vec3::new(self.r, self.g, self.b)
    }

    pub fn from_vec3(v: Vec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }

    /// Parse `#rgb`, `#rrggbb` or `0xrrggbb`.
    pub fn parse(text: &str) -> ResourceResult<Self> {
        let invalid = || ResourceError::InvalidColor(text.to_string());
        let trimmed = text.trim();
        let digits = trimmed
            .strip_prefix('#')
            .or_else(|| trimmed.strip_prefix("0x"))
            .or_else(|| trimmed.strip_prefix("0X"))
            .ok_or_else(invalid)?;

        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        match digits.len() {
            3 => {
                let mut expanded = String::with_capacity(6);
                for c in digits.chars() {
                    expanded.push(c);
                    expanded.push(c);
                }
                let hex = u32::from_str_radix(&expanded, 16).map_err(|_| invalid())?;
                Ok(Self::from_hex(hex))
            }
            6 => {
                let hex = u32::from_str_radix(digits, 16).map_err(|_| invalid())?;
                Ok(Self::from_hex(hex))
            }
            _ => Err(invalid()),
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl FromStr for Color {
    type Err = ResourceError;

    fn from_str(s: &str) -> ResourceResult<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_hex_expands() {
        let color = Color::parse("#8AC").unwrap();
        assert_eq!(color.to_hex(), 0x88aacc);
        assert_eq!(color.to_hex_string(), "#88aacc");
    }

    #[test]
    fn test_long_and_prefixed_forms() {
        assert_eq!(Color::parse("#ffffff").unwrap(), Color::WHITE);
        assert_eq!(Color::parse("0xB1E1FF").unwrap().to_hex(), 0xb1e1ff);
        assert_eq!("#000000".parse::<Color>().unwrap(), Color::BLACK);
    }

    #[test]
    fn test_rejects_garbage() {
        for text in ["", "fff", "#ff", "#gggggg", "#1234567", "0x12"] {
            assert!(
                matches!(Color::parse(text), Err(ResourceError::InvalidColor(_))),
                "{text:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_hex_clamps_out_of_range_channels() {
        let color = Color::new(2.0, -1.0, 0.5);
        assert_eq!(color.to_rgb8(), [255, 0, 128]);
    }
}

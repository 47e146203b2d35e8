//! Colors and text styles for the prescription document design.
//!
//! The palette is fixed; both rendering backends read these constants so the
//! printed page and the captured page use the same ink.

use crate::font::{FontFamily, StandardFont};

/// An RGB color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f64, // 0.0 - 1.0
    pub g: f64,
    pub b: f64,
}

impl Color {
    pub const BLACK: Color = Color { r: 0.0, g: 0.0, b: 0.0 };
    pub const WHITE: Color = Color { r: 1.0, g: 1.0, b: 1.0 };

    pub fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    pub fn hex(hex: &str) -> Self {
        let hex = hex.trim_start_matches('#');
        let (r, g, b) = match hex.len() {
            3 => {
                let r = u8::from_str_radix(&hex[0..1].repeat(2), 16).unwrap_or(0);
                let g = u8::from_str_radix(&hex[1..2].repeat(2), 16).unwrap_or(0);
                let b = u8::from_str_radix(&hex[2..3].repeat(2), 16).unwrap_or(0);
                (r, g, b)
            }
            6 => {
                let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(0);
                let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(0);
                let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(0);
                (r, g, b)
            }
            _ => (0, 0, 0),
        };
        Self {
            r: r as f64 / 255.0,
            g: g as f64 / 255.0,
            b: b as f64 / 255.0,
        }
    }

    /// `rgb(...)` form for SVG attributes.
    pub fn svg(&self) -> String {
        format!(
            "rgb({},{},{})",
            (self.r * 255.0).round() as u8,
            (self.g * 255.0).round() as u8,
            (self.b * 255.0).round() as u8
        )
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

pub mod palette {
    use super::Color;

    /// Primary body text.
    pub const TEXT: Color = hex("#1f2937");
    /// Secondary text: qualifications, field values.
    pub const MUTED: Color = hex("#4b5563");
    /// Section headings.
    pub const HEADING: Color = hex("#374151");
    /// The rule under the document header.
    pub const RULE: Color = hex("#d1d5db");
    /// Hairlines between medicine table rows.
    pub const ROW_RULE: Color = hex("#e5e7eb");
    /// Medicine table header background.
    pub const TABLE_HEADER_BG: Color = hex("#f3f4f6");
    /// Footer disclaimer.
    pub const FOOTER: Color = hex("#9ca3af");

    const fn nibble(b: u8) -> f64 {
        (b as f64) / 255.0
    }

    const fn hex_byte(hi: u8, lo: u8) -> u8 {
        let hi = match hi {
            b'0'..=b'9' => hi - b'0',
            b'a'..=b'f' => hi - b'a' + 10,
            _ => 0,
        };
        let lo = match lo {
            b'0'..=b'9' => lo - b'0',
            b'a'..=b'f' => lo - b'a' + 10,
            _ => 0,
        };
        hi * 16 + lo
    }

    const fn hex(s: &str) -> Color {
        let b = s.as_bytes();
        Color {
            r: nibble(hex_byte(b[1], b[2])),
            g: nibble(hex_byte(b[3], b[4])),
            b: nibble(hex_byte(b[5], b[6])),
        }
    }
}

/// A fully-resolved text style: family, weight and size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub family: FontFamily,
    pub bold: bool,
    pub size: f64,
}

impl TextStyle {
    pub fn new(family: FontFamily, bold: bool, size: f64) -> Self {
        Self { family, bold, size }
    }

    pub fn font(&self) -> StandardFont {
        self.family.resolve(self.bold)
    }

    /// Line advance at the document's fixed 1.5 line-height.
    pub fn line_height(&self) -> f64 {
        self.size * 1.5
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_parsing() {
        let c = Color::hex("#1f2937");
        assert!((c.r - 31.0 / 255.0).abs() < 1e-9);
        assert!((c.g - 41.0 / 255.0).abs() < 1e-9);
        assert!((c.b - 55.0 / 255.0).abs() < 1e-9);
    }

    #[test]
    fn test_palette_matches_runtime_parse() {
        assert_eq!(palette::TEXT, Color::hex("#1f2937"));
        assert_eq!(palette::FOOTER, Color::hex("#9ca3af"));
        assert_eq!(palette::TABLE_HEADER_BG, Color::hex("#f3f4f6"));
    }

    #[test]
    fn test_svg_form() {
        assert_eq!(Color::WHITE.svg(), "rgb(255,255,255)");
        assert_eq!(Color::hex("#d1d5db").svg(), "rgb(209,213,219)");
    }
}

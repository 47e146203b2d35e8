//! Advance-width tables for the standard PDF fonts this crate uses.
//!
//! Widths are in 1/1000 em units per the Adobe AFM files, covering the
//! printable ASCII range (0x20..=0x7E). Characters outside the table fall
//! back to the font's default advance. Courier is monospaced at 600 units.

use super::StandardFont;

/// Metrics for one standard font: either a fixed advance for every glyph or
/// a per-character table.
pub enum StandardFontMetrics {
    Fixed { width: u16 },
    Proportional { widths: &'static [u16; 95], default: u16 },
}

impl StandardFontMetrics {
    /// Advance width of a character in points at the given size.
    pub fn char_width(&self, ch: char, font_size: f64) -> f64 {
        let units = match self {
            StandardFontMetrics::Fixed { width } => *width,
            StandardFontMetrics::Proportional { widths, default } => {
                let code = ch as u32;
                if (0x20..=0x7E).contains(&code) {
                    widths[(code - 0x20) as usize]
                } else {
                    *default
                }
            }
        };
        units as f64 / 1000.0 * font_size
    }

    /// Width of a string in points, including letter spacing between glyphs.
    pub fn measure_string(&self, text: &str, font_size: f64, letter_spacing: f64) -> f64 {
        let mut width = 0.0;
        let mut count = 0usize;
        for ch in text.chars() {
            width += self.char_width(ch, font_size);
            count += 1;
        }
        if count > 1 {
            width += letter_spacing * (count - 1) as f64;
        }
        width
    }
}

impl StandardFont {
    pub fn metrics(&self) -> StandardFontMetrics {
        match self {
            StandardFont::Courier | StandardFont::CourierBold => {
                StandardFontMetrics::Fixed { width: 600 }
            }
            StandardFont::Helvetica => StandardFontMetrics::Proportional {
                widths: &HELVETICA_WIDTHS,
                default: 556,
            },
            StandardFont::HelveticaBold => StandardFontMetrics::Proportional {
                widths: &HELVETICA_BOLD_WIDTHS,
                default: 556,
            },
        }
    }
}

/// Helvetica, chars 0x20..=0x7E.
#[rustfmt::skip]
static HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333,
    278, 278, 556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278,
    584, 584, 584, 556, 1015, 667, 667, 722, 722, 667, 611, 778, 722, 278,
    500, 667, 556, 833, 722, 778, 667, 778, 722, 667, 611, 722, 667, 944,
    667, 667, 611, 278, 278, 278, 469, 556, 333, 556, 556, 500, 556, 556,
    278, 556, 556, 222, 222, 500, 222, 833, 556, 556, 556, 556, 333, 500,
    278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

/// Helvetica-Bold, chars 0x20..=0x7E.
#[rustfmt::skip]
static HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333,
    278, 278, 556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333,
    584, 584, 584, 611, 975, 722, 722, 722, 722, 667, 611, 778, 722, 278,
    556, 722, 611, 833, 722, 778, 667, 778, 722, 667, 611, 722, 667, 944,
    667, 667, 611, 333, 278, 333, 584, 556, 333, 556, 611, 556, 611, 556,
    333, 611, 611, 278, 278, 556, 278, 889, 611, 611, 611, 611, 389, 556,
    333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_courier_is_monospaced() {
        let m = StandardFont::Courier.metrics();
        let i = m.char_width('i', 10.0);
        let w = m.char_width('W', 10.0);
        assert!((i - w).abs() < f64::EPSILON);
        assert!((i - 6.0).abs() < 0.001);
    }

    #[test]
    fn test_helvetica_space_width() {
        let m = StandardFont::Helvetica.metrics();
        let w = m.char_width(' ', 12.0);
        assert!((w - 3.336).abs() < 0.001);
    }

    #[test]
    fn test_measure_string_with_spacing() {
        let m = StandardFont::Courier.metrics();
        let plain = m.measure_string("abc", 10.0, 0.0);
        let spaced = m.measure_string("abc", 10.0, 1.0);
        assert!((plain - 18.0).abs() < 0.001);
        assert!((spaced - 20.0).abs() < 0.001);
    }

    #[test]
    fn test_non_ascii_uses_default() {
        let m = StandardFont::Helvetica.metrics();
        let w = m.char_width('é', 12.0);
        assert!((w - 556.0 / 1000.0 * 12.0).abs() < 0.001);
    }
}

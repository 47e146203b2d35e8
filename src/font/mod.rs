//! # Font Management
//!
//! Text measurement over the standard PDF fonts. Prescriptions render with
//! Courier for body text and Helvetica for the odd accent, so the four
//! regular/bold faces of those two families cover everything; none of them
//! require embedding.

pub mod metrics;

pub use metrics::StandardFontMetrics;

/// The standard PDF fonts the document design uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StandardFont {
    Helvetica,
    HelveticaBold,
    Courier,
    CourierBold,
}

impl StandardFont {
    /// The PDF BaseFont name for this font.
    pub fn pdf_name(&self) -> &'static str {
        match self {
            Self::Helvetica => "Helvetica",
            Self::HelveticaBold => "Helvetica-Bold",
            Self::Courier => "Courier",
            Self::CourierBold => "Courier-Bold",
        }
    }
}

/// The two font families the document design draws from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FontFamily {
    #[default]
    Courier,
    Helvetica,
}

impl FontFamily {
    pub fn resolve(&self, bold: bool) -> StandardFont {
        match (self, bold) {
            (FontFamily::Courier, false) => StandardFont::Courier,
            (FontFamily::Courier, true) => StandardFont::CourierBold,
            (FontFamily::Helvetica, false) => StandardFont::Helvetica,
            (FontFamily::Helvetica, true) => StandardFont::HelveticaBold,
        }
    }
}

/// Shared measurement context used by layout and both renderers.
#[derive(Default)]
pub struct FontContext;

impl FontContext {
    pub fn new() -> Self {
        FontContext
    }

    /// Advance width of a single character in points.
    pub fn char_width(&self, ch: char, font: StandardFont, font_size: f64) -> f64 {
        font.metrics().char_width(ch, font_size)
    }

    /// Width of a string in points.
    pub fn measure_string(&self, text: &str, font: StandardFont, font_size: f64) -> f64 {
        font.metrics().measure_string(text, font_size, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bold_helvetica_wider() {
        let ctx = FontContext::new();
        let regular = ctx.char_width('A', StandardFont::Helvetica, 12.0);
        let bold = ctx.char_width('A', StandardFont::HelveticaBold, 12.0);
        assert!(bold > regular, "Bold A should be wider than regular A");
    }

    #[test]
    fn test_family_bold_resolution() {
        assert_eq!(FontFamily::Courier.resolve(true), StandardFont::CourierBold);
        assert_eq!(
            FontFamily::Helvetica.resolve(false),
            StandardFont::Helvetica
        );
    }

    #[test]
    fn test_measure_string_positive() {
        let ctx = FontContext::new();
        let w = ctx.measure_string("Hello", StandardFont::Courier, 10.0);
        assert!((w - 30.0).abs() < 0.001);
    }
}

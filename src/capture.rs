//! # Capture Renderer
//!
//! The second rendering backend: instead of serializing text and vector
//! operators, it renders the document as a styled SVG visual tree, rasterizes
//! that tree at a fixed 2x device scale, and embeds the resulting raster into
//! an A4 PDF shell. The output is what the document *looks like*; text is
//! pixels, not selectable glyphs. Rasters taller than one page are tiled
//! across pages by offsetting the drawn image.
//!
//! Content and geometry come from the same layout engine as the print
//! backend, run in canvas mode (no page breaks), so the two backends always
//! agree on what the document says.

use std::fmt::Write as FmtWrite;

use resvg::{tiny_skia, usvg};
use tracing::debug;

use crate::assets::DEFAULT_LOGO;
use crate::document::{DocumentModel, Renderer};
use crate::error::Error;
use crate::font::FontFamily;
use crate::image_loader;
use crate::layout::{DrawCommand, LayoutElement, LayoutEngine, PAGE_HEIGHT, PAGE_WIDTH};
use crate::pdf::{Metadata, PdfWriter};

/// Fixed rasterization scale. 2x keeps small Courier text legible in print.
pub const CAPTURE_SCALE: f32 = 2.0;

pub struct CaptureRenderer {
    engine: LayoutEngine,
}

impl Default for CaptureRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl CaptureRenderer {
    pub fn new() -> Self {
        CaptureRenderer {
            engine: LayoutEngine::new(),
        }
    }

    fn build_svg(&self, elements: &[LayoutElement], width: f64, height: f64) -> String {
        let mut svg = String::new();
        let _ = write!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" width="{w:.2}" height="{h:.2}" viewBox="0 0 {w:.2} {h:.2}">"#,
            w = width,
            h = height
        );
        let _ = write!(
            svg,
            r##"<rect x="0" y="0" width="{:.2}" height="{:.2}" fill="#ffffff"/>"##,
            width, height
        );

        for element in elements {
            match &element.draw {
                DrawCommand::Rect { fill } => {
                    let _ = write!(
                        svg,
                        r#"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="{}"/>"#,
                        element.x,
                        element.y,
                        element.width,
                        element.height,
                        fill.svg()
                    );
                }
                DrawCommand::Line { color } => {
                    let _ = write!(
                        svg,
                        r#"<line x1="{:.2}" y1="{y:.2}" x2="{:.2}" y2="{y:.2}" stroke="{}" stroke-width="{:.2}"/>"#,
                        element.x,
                        element.x + element.width,
                        color.svg(),
                        element.height,
                        y = element.y
                    );
                }
                DrawCommand::Text { lines, color } => {
                    for line in lines {
                        let family = match line.style.family {
                            FontFamily::Courier => "Courier, monospace",
                            FontFamily::Helvetica => "Helvetica, sans-serif",
                        };
                        let weight = if line.style.bold { "bold" } else { "normal" };
                        let _ = write!(
                            svg,
                            r#"<text x="{:.2}" y="{:.2}" font-family="{}" font-size="{:.1}" font-weight="{}" fill="{}">{}</text>"#,
                            line.x,
                            line.y,
                            family,
                            line.style.size,
                            weight,
                            color.svg(),
                            escape_xml(&line.text)
                        );
                    }
                }
                DrawCommand::Image { image } => {
                    // Re-encode decoded pixels as PNG for the data URI; raw
                    // JPEG bytes pass through as-is.
                    if let Some((mime, bytes)) = encode_for_data_uri(image) {
                        use base64::Engine;
                        let b64 = base64::engine::general_purpose::STANDARD.encode(&bytes);
                        let _ = write!(
                            svg,
                            r#"<image x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" preserveAspectRatio="none" xlink:href="data:{};base64,{}"/>"#,
                            element.x, element.y, element.width, element.height, mime, b64
                        );
                    }
                }
            }
        }

        svg.push_str("</svg>");
        svg
    }

    fn rasterize(&self, svg: &str, width: f64, height: f64) -> Result<Vec<u8>, Error> {
        let mut opt = usvg::Options::default();
        opt.fontdb_mut().load_system_fonts();
        let tree = usvg::Tree::from_str(svg, &opt)
            .map_err(|e| Error::Render(format!("svg parse: {e}")))?;

        let scale = CAPTURE_SCALE;
        let px_w = (width as f32 * scale).ceil() as u32;
        let px_h = (height as f32 * scale).ceil() as u32;
        let mut pixmap = tiny_skia::Pixmap::new(px_w, px_h)
            .ok_or_else(|| Error::Render("capture canvas allocation failed".to_string()))?;
        pixmap.fill(tiny_skia::Color::WHITE);

        resvg::render(
            &tree,
            tiny_skia::Transform::from_scale(scale, scale),
            &mut pixmap.as_mut(),
        );

        pixmap
            .encode_png()
            .map_err(|e| Error::Render(format!("png encode: {e}")))
    }
}

impl Renderer for CaptureRenderer {
    fn render(&self, model: &DocumentModel) -> Result<Vec<u8>, Error> {
        // The capture look always shows a logo; missing resolutions fall
        // back to the bundled default.
        let mut model = model.clone();
        if model.header.logo.is_none() {
            model.header.logo = Some(DEFAULT_LOGO.to_vec());
        }

        let (elements, canvas_height) = self.engine.layout_canvas(&model);
        let svg = self.build_svg(&elements, PAGE_WIDTH, canvas_height);
        let png = self.rasterize(&svg, PAGE_WIDTH, canvas_height)?;

        let raster = image_loader::decode_image_bytes(&png)
            .map_err(|e| Error::Render(format!("raster decode: {e}")))?;

        // Tile the raster across A4 pages: full page width, aspect-preserving
        // height, each page shifting the image up by one page height.
        let draw_w = PAGE_WIDTH;
        let draw_h = draw_w * raster.height_px as f64 / raster.width_px as f64;
        let page_count = (draw_h / PAGE_HEIGHT).ceil().max(1.0) as usize;
        debug!(page_count, draw_h, "capture raster tiled into pages");

        let pages = (0..page_count)
            .map(|i| crate::layout::LayoutPage {
                width: PAGE_WIDTH,
                height: PAGE_HEIGHT,
                elements: vec![LayoutElement {
                    x: 0.0,
                    y: -(i as f64 * PAGE_HEIGHT),
                    width: draw_w,
                    height: draw_h,
                    draw: DrawCommand::Image {
                        image: raster.clone(),
                    },
                }],
            })
            .collect::<Vec<_>>();

        let metadata = Metadata {
            title: format!("Prescription {}", model.header.rx_id),
            author: model.header.doctor.name.clone(),
        };
        PdfWriter::new().write(&pages, &metadata)
    }
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn encode_for_data_uri(image: &image_loader::LoadedImage) -> Option<(&'static str, Vec<u8>)> {
    use crate::image_loader::ImagePixelData;
    match &image.pixel_data {
        ImagePixelData::Jpeg { data, .. } => Some(("image/jpeg", data.clone())),
        ImagePixelData::Decoded { rgb, alpha } => {
            let mut rgba = Vec::with_capacity(rgb.len() / 3 * 4);
            for (i, px) in rgb.chunks(3).enumerate() {
                rgba.extend_from_slice(px);
                rgba.push(alpha.as_ref().map(|a| a[i]).unwrap_or(255));
            }
            let mut out = Vec::new();
            let encoder = image::codecs::png::PngEncoder::new(&mut out);
            image::ImageEncoder::write_image(
                encoder,
                &rgba,
                image.width_px,
                image.height_px,
                image::ColorType::Rgba8,
            )
            .ok()?;
            Some(("image/png", out))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Field, Header};
    use crate::snapshot::DoctorIdentity;

    fn sample_model() -> DocumentModel {
        DocumentModel {
            header: Header {
                doctor: DoctorIdentity {
                    name: "Dr. A. Carter".into(),
                    qualifications: "MBBS".into(),
                    reg_id: "REG/42".into(),
                },
                rx_id: "RX-1700000000000".into(),
                logo: None,
            },
            patient: vec![
                Field { label: "Name", value: "Jane <Doe> & Co".into() },
                Field { label: "Date", value: "05/03/2024".into() },
                Field { label: "Age", value: "-".into() },
                Field { label: "Pat Id", value: "-".into() },
                Field { label: "Gender", value: "-".into() },
                Field { label: "Height", value: "-".into() },
                Field { label: "Weight", value: "-".into() },
            ],
            leading_sections: vec![],
            medicines: vec![],
            trailing_sections: vec![],
            footer: crate::document::FOOTER_DISCLAIMER.to_string(),
        }
    }

    #[test]
    fn test_svg_contains_escaped_text_and_background() {
        let renderer = CaptureRenderer::new();
        let mut model = sample_model();
        model.header.logo = Some(DEFAULT_LOGO.to_vec());
        let (elements, height) = renderer.engine.layout_canvas(&model);
        let svg = renderer.build_svg(&elements, PAGE_WIDTH, height);

        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("Jane &lt;Doe&gt; &amp; Co"));
        assert!(svg.contains(r##"fill="#ffffff""##), "white background present");
        assert!(svg.contains("data:image/png;base64,"), "logo embedded inline");
        assert!(svg.contains("Courier, monospace"));
    }

    #[test]
    fn test_capture_render_produces_image_backed_pdf() {
        let pdf = CaptureRenderer::new().render(&sample_model()).unwrap();
        assert!(pdf.starts_with(b"%PDF-1.7"));
        let text = String::from_utf8_lossy(&pdf);
        assert!(text.contains("/Subtype /Image"), "page content is a raster");
        assert!(
            !text.contains("/BaseFont /Courier"),
            "no text operators, only pixels"
        );
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("a<b>&c"), "a&lt;b&gt;&amp;c");
    }
}

//! # PDF Serializer
//!
//! Takes the laid-out pages from the layout engine and writes a valid PDF
//! file.
//!
//! This is a from-scratch PDF 1.7 writer. Writing the raw bytes ourselves
//! gives full control over the output and keeps the export pipeline
//! self-contained. The PDF spec is verbose but the subset a prescription
//! needs is manageable.
//!
//! ## PDF Structure (simplified)
//!
//! ```text
//! %PDF-1.7            <- header
//! 1 0 obj ... endobj  <- objects (fonts, pages, content streams, etc.)
//! 2 0 obj ... endobj
//! ...
//! xref                <- cross-reference table (byte offsets of each object)
//! trailer             <- points to the root object
//! %%EOF
//! ```
//!
//! Only the standard Type1 fonts are referenced (WinAnsiEncoding, no
//! embedding). Logos become image XObjects: JPEG bytes pass through with
//! DCTDecode, decoded pixels are Flate-compressed with an optional SMask.

use std::collections::HashMap;
use std::fmt::Write as FmtWrite; // for write! on String
use std::io::Write as IoWrite; // for write! on Vec<u8>

use miniz_oxide::deflate::compress_to_vec_zlib;

use crate::error::Error;
use crate::font::StandardFont;
use crate::layout::{DrawCommand, LayoutElement, LayoutPage};

/// Document information written to the Info dictionary.
#[derive(Debug, Clone, Default)]
pub struct Metadata {
    pub title: String,
    pub author: String,
}

pub struct PdfWriter;

/// Tracks allocated PDF objects during writing.
struct PdfBuilder {
    objects: Vec<PdfObject>,
    /// Fonts in /F{index} order.
    fonts: Vec<(StandardFont, usize)>,
    /// XObject obj IDs for images, indexed as /Im0, /Im1, ...
    image_objects: Vec<usize>,
    /// Maps (page_index, image_ordinal_on_page) to an index in image_objects.
    image_index_map: HashMap<(usize, usize), usize>,
}

struct PdfObject {
    data: Vec<u8>,
}

impl Default for PdfWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfWriter {
    pub fn new() -> Self {
        Self
    }

    /// Write laid-out pages to a PDF byte vector.
    pub fn write(&self, pages: &[LayoutPage], metadata: &Metadata) -> Result<Vec<u8>, Error> {
        let mut builder = PdfBuilder {
            objects: Vec::new(),
            fonts: Vec::new(),
            image_objects: Vec::new(),
            image_index_map: HashMap::new(),
        };

        // Reserve object IDs:
        // 0 = placeholder (PDF objects are 1-indexed)
        // 1 = Catalog
        // 2 = Pages (page tree root)
        // 3+ = fonts, images, then page objects and content streams
        builder.objects.push(PdfObject { data: vec![] });
        builder.objects.push(PdfObject { data: vec![] });
        builder.objects.push(PdfObject { data: vec![] });

        self.register_fonts(&mut builder, pages);
        self.register_images(&mut builder, pages);

        let mut page_obj_ids: Vec<usize> = Vec::new();

        for (page_idx, page) in pages.iter().enumerate() {
            let content = self.build_content_stream(page, page_idx, &builder);
            let compressed = compress_to_vec_zlib(content.as_bytes(), 6);

            let content_obj_id = builder.objects.len();
            let mut content_data: Vec<u8> = Vec::new();
            let _ = write!(
                content_data,
                "<< /Length {} /Filter /FlateDecode >>\nstream\n",
                compressed.len()
            );
            content_data.extend_from_slice(&compressed);
            content_data.extend_from_slice(b"\nendstream");
            builder.objects.push(PdfObject { data: content_data });

            let page_obj_id = builder.objects.len();
            let font_resources = self.build_font_resource_dict(&builder.fonts);
            let xobject_resources = self.build_xobject_resource_dict(page_idx, &builder);
            let mut resources = String::new();
            if !font_resources.is_empty() {
                let _ = write!(resources, "/Font << {} >>", font_resources);
            }
            if !xobject_resources.is_empty() {
                if !resources.is_empty() {
                    resources.push(' ');
                }
                let _ = write!(resources, "/XObject << {} >>", xobject_resources);
            }
            let page_dict = format!(
                "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {:.2} {:.2}] \
                 /Contents {} 0 R /Resources << {} >> >>",
                page.width, page.height, content_obj_id, resources
            );
            builder.objects.push(PdfObject {
                data: page_dict.into_bytes(),
            });
            page_obj_ids.push(page_obj_id);
        }

        // Catalog (object 1)
        builder.objects[1].data = b"<< /Type /Catalog /Pages 2 0 R >>".to_vec();

        // Pages tree (object 2)
        let kids: String = page_obj_ids
            .iter()
            .map(|id| format!("{} 0 R", id))
            .collect::<Vec<_>>()
            .join(" ");
        builder.objects[2].data = format!(
            "<< /Type /Pages /Kids [{}] /Count {} >>",
            kids,
            page_obj_ids.len()
        )
        .into_bytes();

        // Info dictionary
        let info_obj_id = builder.objects.len();
        let mut info = String::from("<< ");
        if !metadata.title.is_empty() {
            let _ = write!(info, "/Title ({}) ", Self::escape_pdf_string(&metadata.title));
        }
        if !metadata.author.is_empty() {
            let _ = write!(
                info,
                "/Author ({}) ",
                Self::escape_pdf_string(&metadata.author)
            );
        }
        let _ = write!(info, "/Producer (rxpad 0.1) /Creator (rxpad) >>");
        builder.objects.push(PdfObject {
            data: info.into_bytes(),
        });

        Ok(self.serialize(&builder, info_obj_id))
    }

    fn build_content_stream(
        &self,
        page: &LayoutPage,
        page_idx: usize,
        builder: &PdfBuilder,
    ) -> String {
        let mut stream = String::new();
        let mut image_counter = 0usize;
        for element in &page.elements {
            self.write_element(
                &mut stream,
                element,
                page.height,
                builder,
                page_idx,
                &mut image_counter,
            );
        }
        stream
    }

    /// Write a single layout element as PDF operators. Layout coordinates
    /// are top-left origin; PDF space is bottom-left, so y flips here.
    fn write_element(
        &self,
        stream: &mut String,
        element: &LayoutElement,
        page_height: f64,
        builder: &PdfBuilder,
        page_idx: usize,
        image_counter: &mut usize,
    ) {
        match &element.draw {
            DrawCommand::Rect { fill } => {
                let x = element.x;
                let y = page_height - element.y - element.height;
                let _ = write!(
                    stream,
                    "q\n{:.3} {:.3} {:.3} rg\n{:.2} {:.2} {:.2} {:.2} re\nf\nQ\n",
                    fill.r, fill.g, fill.b, x, y, element.width, element.height
                );
            }

            DrawCommand::Line { color } => {
                let y = page_height - element.y;
                let _ = write!(
                    stream,
                    "q\n{:.3} {:.3} {:.3} RG\n{:.2} w\n{:.2} {:.2} m\n{:.2} {:.2} l\nS\nQ\n",
                    color.r,
                    color.g,
                    color.b,
                    element.height,
                    element.x,
                    y,
                    element.x + element.width,
                    y
                );
            }

            DrawCommand::Text { lines, color } => {
                let _ = write!(
                    stream,
                    "BT\n{:.3} {:.3} {:.3} rg\n",
                    color.r, color.g, color.b
                );
                for line in lines {
                    let idx = self.font_index(line.style.font(), &builder.fonts);
                    let pdf_y = page_height - line.y;
                    let _ = write!(
                        stream,
                        "/F{} {:.1} Tf\n1 0 0 1 {:.2} {:.2} Tm\n",
                        idx, line.style.size, line.x, pdf_y
                    );

                    let mut text_str = String::new();
                    for ch in line.text.chars() {
                        let b = Self::unicode_to_winansi(ch).unwrap_or(b'?');
                        match b {
                            b'\\' => text_str.push_str("\\\\"),
                            b'(' => text_str.push_str("\\("),
                            b')' => text_str.push_str("\\)"),
                            0x20..=0x7E => text_str.push(b as char),
                            _ => {
                                // Octal escape for bytes outside ASCII printable range
                                let _ = write!(text_str, "\\{:03o}", b);
                            }
                        }
                    }
                    let _ = write!(stream, "({}) Tj\n", text_str);
                }
                let _ = write!(stream, "ET\n");
            }

            DrawCommand::Image { .. } => {
                let ordinal = *image_counter;
                *image_counter += 1;
                let x = element.x;
                let y = page_height - element.y - element.height;
                if let Some(&img_idx) = builder.image_index_map.get(&(page_idx, ordinal)) {
                    let _ = write!(
                        stream,
                        "q\n{:.4} 0 0 {:.4} {:.2} {:.2} cm\n/Im{} Do\nQ\n",
                        element.width, element.height, x, y, img_idx
                    );
                } else {
                    // Grey placeholder if the image index is missing
                    let _ = write!(
                        stream,
                        "q\n0.9 0.9 0.9 rg\n{:.2} {:.2} {:.2} {:.2} re\nf\nQ\n",
                        x, y, element.width, element.height
                    );
                }
            }
        }
    }

    /// Register the fonts actually used across all pages — each unique
    /// standard font gets its own PDF font object.
    fn register_fonts(&self, builder: &mut PdfBuilder, pages: &[LayoutPage]) {
        let mut used: Vec<StandardFont> = Vec::new();
        for page in pages {
            for element in &page.elements {
                if let DrawCommand::Text { lines, .. } = &element.draw {
                    for line in lines {
                        used.push(line.style.font());
                    }
                }
            }
        }
        used.sort();
        used.dedup();

        // A document with no text (the capture shell) needs no font objects.
        for font in used {
            let obj_id = builder.objects.len();
            let font_dict = format!(
                "<< /Type /Font /Subtype /Type1 /BaseFont /{} \
                 /Encoding /WinAnsiEncoding >>",
                font.pdf_name()
            );
            builder.objects.push(PdfObject {
                data: font_dict.into_bytes(),
            });
            builder.fonts.push((font, obj_id));
        }
    }

    /// Walk all pages, create XObject PDF objects for each image, and
    /// populate the image_index_map for content stream reference. Identical
    /// images (the capture raster drawn on every page) share one XObject.
    fn register_images(&self, builder: &mut PdfBuilder, pages: &[LayoutPage]) {
        let mut seen: Vec<(&crate::image_loader::LoadedImage, usize)> = Vec::new();
        for (page_idx, page) in pages.iter().enumerate() {
            let mut ordinal = 0usize;
            for element in &page.elements {
                if let DrawCommand::Image { image } = &element.draw {
                    let img_idx = match seen.iter().find(|(img, _)| *img == image) {
                        Some((_, idx)) => *idx,
                        None => {
                            let img_idx = builder.image_objects.len();
                            let xobj_id = Self::write_image_xobject(builder, image);
                            builder.image_objects.push(xobj_id);
                            seen.push((image, img_idx));
                            img_idx
                        }
                    };
                    builder.image_index_map.insert((page_idx, ordinal), img_idx);
                    ordinal += 1;
                }
            }
        }
    }

    /// Write a single image as one or two XObject PDF objects.
    /// Returns the main XObject ID.
    fn write_image_xobject(
        builder: &mut PdfBuilder,
        image: &crate::image_loader::LoadedImage,
    ) -> usize {
        use crate::image_loader::{ImagePixelData, JpegColorSpace};

        match &image.pixel_data {
            ImagePixelData::Jpeg { data, color_space } => {
                let color_space_str = match color_space {
                    JpegColorSpace::DeviceRGB => "/DeviceRGB",
                    JpegColorSpace::DeviceGray => "/DeviceGray",
                };

                let obj_id = builder.objects.len();
                let mut obj_data: Vec<u8> = Vec::new();
                let _ = write!(
                    obj_data,
                    "<< /Type /XObject /Subtype /Image \
                     /Width {} /Height {} \
                     /ColorSpace {} \
                     /BitsPerComponent 8 \
                     /Filter /DCTDecode \
                     /Length {} >>\nstream\n",
                    image.width_px,
                    image.height_px,
                    color_space_str,
                    data.len()
                );
                obj_data.extend_from_slice(data);
                obj_data.extend_from_slice(b"\nendstream");
                builder.objects.push(PdfObject { data: obj_data });
                obj_id
            }

            ImagePixelData::Decoded { rgb, alpha } => {
                // Write SMask first if an alpha channel exists
                let smask_id = alpha.as_ref().map(|alpha_data| {
                    let compressed_alpha = compress_to_vec_zlib(alpha_data, 6);
                    let smask_obj_id = builder.objects.len();
                    let mut smask_data: Vec<u8> = Vec::new();
                    let _ = write!(
                        smask_data,
                        "<< /Type /XObject /Subtype /Image \
                         /Width {} /Height {} \
                         /ColorSpace /DeviceGray \
                         /BitsPerComponent 8 \
                         /Filter /FlateDecode \
                         /Length {} >>\nstream\n",
                        image.width_px,
                        image.height_px,
                        compressed_alpha.len()
                    );
                    smask_data.extend_from_slice(&compressed_alpha);
                    smask_data.extend_from_slice(b"\nendstream");
                    builder.objects.push(PdfObject { data: smask_data });
                    smask_obj_id
                });

                let compressed_rgb = compress_to_vec_zlib(rgb, 6);
                let obj_id = builder.objects.len();
                let mut obj_data: Vec<u8> = Vec::new();

                let smask_ref = smask_id
                    .map(|id| format!(" /SMask {} 0 R", id))
                    .unwrap_or_default();

                let _ = write!(
                    obj_data,
                    "<< /Type /XObject /Subtype /Image \
                     /Width {} /Height {} \
                     /ColorSpace /DeviceRGB \
                     /BitsPerComponent 8 \
                     /Filter /FlateDecode \
                     /Length {}{} >>\nstream\n",
                    image.width_px,
                    image.height_px,
                    compressed_rgb.len(),
                    smask_ref
                );
                obj_data.extend_from_slice(&compressed_rgb);
                obj_data.extend_from_slice(b"\nendstream");
                builder.objects.push(PdfObject { data: obj_data });
                obj_id
            }
        }
    }

    fn build_font_resource_dict(&self, fonts: &[(StandardFont, usize)]) -> String {
        fonts
            .iter()
            .enumerate()
            .map(|(i, (_, obj_id))| format!("/F{} {} 0 R", i, obj_id))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Build the /XObject resource dict entries for a specific page.
    fn build_xobject_resource_dict(&self, page_idx: usize, builder: &PdfBuilder) -> String {
        let mut entries: Vec<(usize, usize)> = Vec::new();
        for (&(pidx, _), &img_idx) in &builder.image_index_map {
            if pidx == page_idx {
                let obj_id = builder.image_objects[img_idx];
                entries.push((img_idx, obj_id));
            }
        }
        if entries.is_empty() {
            return String::new();
        }
        entries.sort_by_key(|(idx, _)| *idx);
        entries.dedup();
        entries
            .iter()
            .map(|(idx, obj_id)| format!("/Im{} {} 0 R", idx, obj_id))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Look up the font index (/F0, /F1, etc.) for a standard font.
    fn font_index(&self, font: StandardFont, fonts: &[(StandardFont, usize)]) -> usize {
        fonts
            .iter()
            .position(|(f, _)| *f == font)
            .unwrap_or(0)
    }

    /// Escape special characters in a PDF string.
    fn escape_pdf_string(s: &str) -> String {
        s.replace('\\', "\\\\")
            .replace('(', "\\(")
            .replace(')', "\\)")
    }

    /// Map a Unicode codepoint to a WinAnsiEncoding byte value.
    ///
    /// WinAnsiEncoding is based on Windows-1252. Most codepoints in
    /// 0x20..=0x7E and 0xA0..=0xFF map directly. The 0x80..=0x9F range
    /// contains special mappings for smart quotes, bullets, dashes, etc.
    fn unicode_to_winansi(ch: char) -> Option<u8> {
        let cp = ch as u32;
        if (0x20..=0x7E).contains(&cp) || (0xA0..=0xFF).contains(&cp) {
            return Some(cp as u8);
        }
        // Windows-1252 special mappings (0x80-0x9F)
        match cp {
            0x20AC => Some(0x80), // Euro sign
            0x201A => Some(0x82), // Single low-9 quotation mark
            0x0192 => Some(0x83), // Latin small letter f with hook
            0x201E => Some(0x84), // Double low-9 quotation mark
            0x2026 => Some(0x85), // Horizontal ellipsis
            0x2020 => Some(0x86), // Dagger
            0x2021 => Some(0x87), // Double dagger
            0x02C6 => Some(0x88), // Modifier letter circumflex accent
            0x2030 => Some(0x89), // Per mille sign
            0x0160 => Some(0x8A), // Latin capital letter S with caron
            0x2039 => Some(0x8B), // Single left-pointing angle quotation
            0x0152 => Some(0x8C), // Latin capital ligature OE
            0x017D => Some(0x8E), // Latin capital letter Z with caron
            0x2018 => Some(0x91), // Left single quotation mark
            0x2019 => Some(0x92), // Right single quotation mark
            0x201C => Some(0x93), // Left double quotation mark
            0x201D => Some(0x94), // Right double quotation mark
            0x2022 => Some(0x95), // Bullet
            0x2013 => Some(0x96), // En dash
            0x2014 => Some(0x97), // Em dash
            0x02DC => Some(0x98), // Small tilde
            0x2122 => Some(0x99), // Trade mark sign
            0x0161 => Some(0x9A), // Latin small letter s with caron
            0x203A => Some(0x9B), // Single right-pointing angle quotation
            0x0153 => Some(0x9C), // Latin small ligature oe
            0x017E => Some(0x9E), // Latin small letter z with caron
            0x0178 => Some(0x9F), // Latin capital letter Y with diaeresis
            _ => None,
        }
    }

    /// Serialize all objects into the final PDF byte stream.
    fn serialize(&self, builder: &PdfBuilder, info_obj_id: usize) -> Vec<u8> {
        let mut output: Vec<u8> = Vec::new();
        let mut offsets: Vec<usize> = vec![0; builder.objects.len()];

        // Header
        output.extend_from_slice(b"%PDF-1.7\n");
        output.extend_from_slice(b"%\xe2\xe3\xcf\xd3\n");

        for (i, obj) in builder.objects.iter().enumerate().skip(1) {
            offsets[i] = output.len();
            let header = format!("{} 0 obj\n", i);
            output.extend_from_slice(header.as_bytes());
            output.extend_from_slice(&obj.data);
            output.extend_from_slice(b"\nendobj\n\n");
        }

        let xref_offset = output.len();
        let _ = write!(output, "xref\n0 {}\n", builder.objects.len());
        let _ = write!(output, "0000000000 65535 f \n");
        for i in 1..builder.objects.len() {
            let _ = write!(output, "{:010} 00000 n \n", offsets[i]);
        }

        let _ = write!(
            output,
            "trailer\n<< /Size {} /Root 1 0 R /Info {} 0 R >>\nstartxref\n{}\n%%EOF\n",
            builder.objects.len(),
            info_obj_id,
            xref_offset
        );

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::FontFamily;
    use crate::layout::TextLine;
    use crate::style::{Color, TextStyle};

    fn text_page(entries: &[(&str, bool)]) -> LayoutPage {
        let elements = entries
            .iter()
            .enumerate()
            .map(|(i, (text, bold))| {
                let style = TextStyle::new(FontFamily::Courier, *bold, 10.0);
                LayoutElement {
                    x: 40.0,
                    y: 40.0 + i as f64 * 15.0,
                    width: 200.0,
                    height: 15.0,
                    draw: DrawCommand::Text {
                        lines: vec![TextLine {
                            x: 40.0,
                            y: 50.0 + i as f64 * 15.0,
                            text: text.to_string(),
                            style,
                        }],
                        color: Color::BLACK,
                    },
                }
            })
            .collect();
        LayoutPage {
            width: 595.28,
            height: 841.89,
            elements,
        }
    }

    #[test]
    fn test_escape_pdf_string() {
        assert_eq!(
            PdfWriter::escape_pdf_string("Hello (World)"),
            "Hello \\(World\\)"
        );
        assert_eq!(PdfWriter::escape_pdf_string("back\\slash"), "back\\\\slash");
    }

    #[test]
    fn test_empty_document_produces_valid_pdf() {
        let writer = PdfWriter::new();
        let pages = vec![LayoutPage {
            width: 595.28,
            height: 841.89,
            elements: vec![],
        }];
        let bytes = writer.write(&pages, &Metadata::default()).unwrap();

        assert!(bytes.starts_with(b"%PDF-1.7"));
        assert!(bytes.windows(5).any(|w| w == b"%%EOF"));
        assert!(bytes.windows(4).any(|w| w == b"xref"));
        assert!(bytes.windows(7).any(|w| w == b"trailer"));
    }

    #[test]
    fn test_metadata_in_pdf() {
        let writer = PdfWriter::new();
        let pages = vec![text_page(&[("hello", false)])];
        let metadata = Metadata {
            title: "Prescription RX-1".to_string(),
            author: "Dr. A. Carter".to_string(),
        };
        let bytes = writer.write(&pages, &metadata).unwrap();
        let text = String::from_utf8_lossy(&bytes);

        assert!(text.contains("/Title (Prescription RX-1)"));
        assert!(text.contains("/Author (Dr. A. Carter)"));
    }

    #[test]
    fn test_bold_font_registered_separately() {
        let writer = PdfWriter::new();
        let pages = vec![text_page(&[("regular", false), ("bold", true)])];
        let bytes = writer.write(&pages, &Metadata::default()).unwrap();
        let text = String::from_utf8_lossy(&bytes);

        assert!(text.contains("/BaseFont /Courier"), "regular Courier registered");
        assert!(
            text.contains("/BaseFont /Courier-Bold"),
            "Courier-Bold registered"
        );
    }

    #[test]
    fn test_standard_fonts_use_winansi_type1() {
        let writer = PdfWriter::new();
        let pages = vec![text_page(&[("hello", false)])];
        let bytes = writer.write(&pages, &Metadata::default()).unwrap();
        let text = String::from_utf8_lossy(&bytes);

        assert!(text.contains("/Subtype /Type1"));
        assert!(text.contains("/Encoding /WinAnsiEncoding"));
    }

    #[test]
    fn test_winansi_mappings() {
        assert_eq!(PdfWriter::unicode_to_winansi('A'), Some(0x41));
        assert_eq!(PdfWriter::unicode_to_winansi('é'), Some(0xE9));
        assert_eq!(PdfWriter::unicode_to_winansi('\u{2013}'), Some(0x96));
        assert_eq!(PdfWriter::unicode_to_winansi('\u{4e2d}'), None);
    }

    #[test]
    fn test_image_xobject_written() {
        let image = crate::image_loader::LoadedImage {
            pixel_data: crate::image_loader::ImagePixelData::Decoded {
                rgb: vec![255, 0, 0],
                alpha: Some(vec![128]),
            },
            width_px: 1,
            height_px: 1,
        };
        let pages = vec![LayoutPage {
            width: 595.28,
            height: 841.89,
            elements: vec![LayoutElement {
                x: 400.0,
                y: 40.0,
                width: 120.0,
                height: 60.0,
                draw: DrawCommand::Image { image },
            }],
        }];
        let bytes = PdfWriter::new().write(&pages, &Metadata::default()).unwrap();
        let text = String::from_utf8_lossy(&bytes);

        assert!(text.contains("/Subtype /Image"));
        assert!(text.contains("/SMask"), "alpha channel produces an SMask");
        assert!(text.contains("/Im0 "), "page resources reference the image");
    }

    #[test]
    fn test_identical_images_share_one_xobject() {
        let image = crate::image_loader::LoadedImage {
            pixel_data: crate::image_loader::ImagePixelData::Decoded {
                rgb: vec![10, 20, 30],
                alpha: None,
            },
            width_px: 1,
            height_px: 1,
        };
        let image_page = |y: f64| LayoutPage {
            width: 595.28,
            height: 841.89,
            elements: vec![LayoutElement {
                x: 0.0,
                y,
                width: 595.28,
                height: 1683.78,
                draw: DrawCommand::Image {
                    image: image.clone(),
                },
            }],
        };
        let pages = vec![image_page(0.0), image_page(-841.89)];
        let bytes = PdfWriter::new().write(&pages, &Metadata::default()).unwrap();
        let text = String::from_utf8_lossy(&bytes);

        let xobject_count = text.matches("/Subtype /Image").count();
        assert_eq!(xobject_count, 1, "same raster is written once");
        assert_eq!(
            text.matches("/Im0 ").count(),
            2,
            "both pages reference the shared XObject"
        );
    }

    #[test]
    fn test_page_count_in_pages_tree() {
        let writer = PdfWriter::new();
        let pages = vec![
            text_page(&[("one", false)]),
            text_page(&[("two", false)]),
            text_page(&[("three", false)]),
        ];
        let bytes = writer.write(&pages, &Metadata::default()).unwrap();
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("/Count 3"));
    }
}

//! # Layout Engine
//!
//! Turns a composed `DocumentModel` into positioned elements ready for PDF
//! serialization. Coordinates are top-left origin, y growing downward; the
//! PDF writer flips into PDF space.
//!
//! Pagination works on a flow cursor: each block is measured first, and if it
//! does not fit in the space left above the footer band a new page is opened.
//! The medicine table repeats its header row on continuation pages, and the
//! disclaimer footer is pinned to the bottom of every page. A second entry
//! point lays the same content out on a single unbounded canvas for the
//! raster capture backend.

use tracing::warn;

use crate::document::{DocumentModel, MedicineRow, Section, TABLE_COLUMNS, TABLE_HEADERS};
use crate::error::Error;
use crate::font::{FontContext, FontFamily};
use crate::image_loader::{self, LoadedImage};
use crate::pdf::{Metadata, PdfWriter};
use crate::style::{palette, Color, TextStyle};

/// A4 in points.
pub const PAGE_WIDTH: f64 = 595.28;
pub const PAGE_HEIGHT: f64 = 841.89;
pub const MARGIN: f64 = 40.0;
pub const CONTENT_WIDTH: f64 = PAGE_WIDTH - 2.0 * MARGIN;

/// The clinic logo slot. Images are contain-fit into this box.
pub const LOGO_BOX_WIDTH: f64 = 120.0;
pub const LOGO_BOX_HEIGHT: f64 = 60.0;

const BODY: TextStyle = TextStyle { family: FontFamily::Courier, bold: false, size: 10.0 };
const BODY_BOLD: TextStyle = TextStyle { family: FontFamily::Courier, bold: true, size: 10.0 };
const DOCTOR_NAME: TextStyle = TextStyle { family: FontFamily::Courier, bold: true, size: 14.0 };
const DOCTOR_SUB: TextStyle = TextStyle { family: FontFamily::Courier, bold: false, size: 9.0 };
const SECTION_TITLE: TextStyle = TextStyle { family: FontFamily::Courier, bold: true, size: 11.0 };
const RX_SYMBOL: TextStyle = TextStyle { family: FontFamily::Helvetica, bold: true, size: 32.0 };
const FOOTER: TextStyle = TextStyle { family: FontFamily::Courier, bold: false, size: 8.0 };

const SECTION_GAP: f64 = 12.0;
const SECTION_INDENT: f64 = 10.0;
const CELL_PADDING: f64 = 4.0;
const FOOTER_BAND: f64 = 20.0;

/// A fully laid-out page ready for PDF serialization.
#[derive(Debug, Clone)]
pub struct LayoutPage {
    pub width: f64,
    pub height: f64,
    pub elements: Vec<LayoutElement>,
}

/// A positioned element on a page.
#[derive(Debug, Clone)]
pub struct LayoutElement {
    /// Absolute position on the page (top-left corner).
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub draw: DrawCommand,
}

/// What to actually draw for this element.
#[derive(Debug, Clone)]
pub enum DrawCommand {
    /// Filled rectangle.
    Rect { fill: Color },
    /// Horizontal rule from (x, y) to (x + width, y); `height` is the
    /// stroke width.
    Line { color: Color },
    /// Draw text.
    Text { lines: Vec<TextLine>, color: Color },
    /// Draw an image.
    Image { image: LoadedImage },
}

#[derive(Debug, Clone)]
pub struct TextLine {
    pub x: f64,
    /// Baseline position.
    pub y: f64,
    pub text: String,
    pub style: TextStyle,
}

/// Accumulates elements into pages. `limit` is the usable content height
/// above the footer band; an infinite limit produces a single canvas.
struct Flow {
    limit: f64,
    y: f64,
    pages: Vec<Vec<LayoutElement>>,
    current: Vec<LayoutElement>,
}

impl Flow {
    fn paged() -> Self {
        Flow {
            limit: PAGE_HEIGHT - 2.0 * MARGIN - FOOTER_BAND,
            y: 0.0,
            pages: Vec::new(),
            current: Vec::new(),
        }
    }

    fn canvas() -> Self {
        Flow {
            limit: f64::INFINITY,
            y: 0.0,
            pages: Vec::new(),
            current: Vec::new(),
        }
    }

    /// Open a new page if `height` does not fit in what remains. Returns
    /// true when a break happened.
    fn ensure(&mut self, height: f64) -> bool {
        if self.y + height > self.limit && self.y > 0.0 {
            self.break_page();
            return true;
        }
        false
    }

    fn break_page(&mut self) {
        self.pages.push(std::mem::take(&mut self.current));
        self.y = 0.0;
    }

    fn push(&mut self, element: LayoutElement) {
        self.current.push(element);
    }

    fn advance(&mut self, dy: f64) {
        self.y += dy;
    }

    /// Absolute page y for content placed at the cursor.
    fn page_y(&self) -> f64 {
        MARGIN + self.y
    }

    fn finish(mut self) -> Vec<Vec<LayoutElement>> {
        self.pages.push(self.current);
        self.pages
    }
}

pub struct LayoutEngine {
    fonts: FontContext,
}

impl Default for LayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutEngine {
    pub fn new() -> Self {
        LayoutEngine {
            fonts: FontContext::new(),
        }
    }

    /// Lay the document out into A4 pages with the footer pinned to the
    /// bottom of each.
    pub fn layout(&self, model: &DocumentModel) -> Vec<LayoutPage> {
        let mut flow = Flow::paged();
        self.place_document(model, &mut flow);

        flow.finish()
            .into_iter()
            .map(|mut elements| {
                elements.push(self.footer_element(&model.footer, PAGE_HEIGHT - MARGIN - FOOTER.line_height()));
                LayoutPage {
                    width: PAGE_WIDTH,
                    height: PAGE_HEIGHT,
                    elements,
                }
            })
            .collect()
    }

    /// Lay the document out on one unbounded canvas: page width, margins and
    /// typography as in print, but no page breaks. The footer follows the
    /// content instead of being pinned. Returns the elements and the total
    /// canvas height.
    pub fn layout_canvas(&self, model: &DocumentModel) -> (Vec<LayoutElement>, f64) {
        let mut flow = Flow::canvas();
        self.place_document(model, &mut flow);
        flow.advance(SECTION_GAP);
        let footer_y = flow.page_y();
        flow.advance(FOOTER.line_height());
        let height = flow.page_y() + MARGIN;

        let mut pages = flow.finish();
        let mut elements = pages.remove(0);
        elements.push(self.footer_element(&model.footer, footer_y));
        (elements, height)
    }

    fn place_document(&self, model: &DocumentModel, flow: &mut Flow) {
        self.place_header(model, flow);
        self.place_patient_grid(model, flow);
        for section in &model.leading_sections {
            self.place_section(section, flow);
        }
        self.place_table(&model.medicines, flow);
        for section in &model.trailing_sections {
            self.place_section(section, flow);
        }
    }

    fn place_header(&self, model: &DocumentModel, flow: &mut Flow) {
        let top = flow.page_y();

        // Big Rx marker at the left edge.
        let rx_width = self.fonts.measure_string("Rx", RX_SYMBOL.font(), RX_SYMBOL.size);
        flow.push(self.text_at(MARGIN, top, "Rx", RX_SYMBOL, palette::HEADING));
        let rx_height = RX_SYMBOL.line_height();

        // Doctor identity block to its right.
        let block_x = MARGIN + rx_width + 16.0;
        let mut y = top;
        flow.push(self.text_at(block_x, y, &model.header.doctor.name, DOCTOR_NAME, palette::TEXT));
        y += DOCTOR_NAME.line_height();
        flow.push(self.text_at(
            block_x,
            y,
            &model.header.doctor.qualifications,
            DOCTOR_SUB,
            palette::MUTED,
        ));
        y += DOCTOR_SUB.line_height();
        flow.push(self.text_at(
            block_x,
            y,
            &format!("Reg Id : {}", model.header.doctor.reg_id),
            DOCTOR_SUB,
            palette::MUTED,
        ));
        y += DOCTOR_SUB.line_height();
        flow.push(self.text_at(
            block_x,
            y,
            &format!("Rx ID : {}", model.header.rx_id),
            DOCTOR_SUB,
            palette::MUTED,
        ));
        y += DOCTOR_SUB.line_height();
        let block_height = y - top;

        // Logo slot, right aligned, contain-fit. A bad image drops the slot.
        let mut logo_height = 0.0;
        if let Some(bytes) = &model.header.logo {
            match image_loader::decode_image_bytes(bytes) {
                Ok(image) => {
                    let (w, h) = contain_fit(
                        image.width_px as f64,
                        image.height_px as f64,
                        LOGO_BOX_WIDTH,
                        LOGO_BOX_HEIGHT,
                    );
                    flow.push(LayoutElement {
                        x: PAGE_WIDTH - MARGIN - w,
                        y: top,
                        width: w,
                        height: h,
                        draw: DrawCommand::Image { image },
                    });
                    logo_height = h;
                }
                Err(reason) => {
                    warn!(reason, "skipping logo: image decode failed");
                }
            }
        }

        let header_height = rx_height.max(block_height).max(logo_height);
        flow.advance(header_height + 8.0);

        // Rule under the header.
        flow.push(LayoutElement {
            x: MARGIN,
            y: flow.page_y(),
            width: CONTENT_WIDTH,
            height: 2.0,
            draw: DrawCommand::Line { color: palette::RULE },
        });
        flow.advance(2.0 + SECTION_GAP);
    }

    fn place_patient_grid(&self, model: &DocumentModel, flow: &mut Flow) {
        let col_width = CONTENT_WIDTH / 2.0;
        let label_width = 70.0;
        let value_width = col_width - label_width - 10.0;

        for pair in model.patient.chunks(2) {
            let wrapped: Vec<Vec<String>> = pair
                .iter()
                .map(|f| self.wrap(&f.value, BODY, value_width))
                .collect();
            let row_lines = wrapped.iter().map(Vec::len).max().unwrap_or(1);
            let row_height = row_lines as f64 * BODY.line_height();
            flow.ensure(row_height);

            let top = flow.page_y();
            for (i, field) in pair.iter().enumerate() {
                let x = MARGIN + i as f64 * col_width;
                flow.push(self.text_at(x, top, field.label, BODY_BOLD, palette::HEADING));
                let lines = wrapped[i]
                    .iter()
                    .enumerate()
                    .map(|(n, line)| TextLine {
                        x: x + label_width,
                        y: top + n as f64 * BODY.line_height() + BODY.size,
                        text: if n == 0 {
                            format!(": {line}")
                        } else {
                            format!("  {line}")
                        },
                        style: BODY,
                    })
                    .collect::<Vec<_>>();
                flow.push(LayoutElement {
                    x: x + label_width,
                    y: top,
                    width: value_width,
                    height: lines.len() as f64 * BODY.line_height(),
                    draw: DrawCommand::Text { lines, color: palette::MUTED },
                });
            }
            flow.advance(row_height + 2.0);
        }
        flow.advance(SECTION_GAP);
    }

    fn place_section(&self, section: &Section, flow: &mut Flow) {
        let body_width = CONTENT_WIDTH - SECTION_INDENT;
        let lines = self.wrap(&section.body, BODY, body_width);

        // Keep the title and at least the first body line together.
        flow.ensure(SECTION_TITLE.line_height() + BODY.line_height());

        let title_y = flow.page_y();
        flow.push(self.text_at(MARGIN, title_y, section.title, SECTION_TITLE, palette::HEADING));
        let title_width = self
            .fonts
            .measure_string(section.title, SECTION_TITLE.font(), SECTION_TITLE.size);
        flow.push(LayoutElement {
            x: MARGIN,
            y: title_y + SECTION_TITLE.size + 2.0,
            width: title_width,
            height: 1.0,
            draw: DrawCommand::Line { color: palette::HEADING },
        });
        flow.advance(SECTION_TITLE.line_height() + 4.0);

        for line in lines {
            flow.ensure(BODY.line_height());
            flow.push(self.text_at(MARGIN + SECTION_INDENT, flow.page_y(), &line, BODY, palette::TEXT));
            flow.advance(BODY.line_height());
        }
        flow.advance(SECTION_GAP);
    }

    fn place_table(&self, medicines: &[MedicineRow], flow: &mut Flow) {
        if medicines.is_empty() {
            return;
        }

        let header_height = BODY_BOLD.line_height() + 2.0 * CELL_PADDING;
        flow.ensure(header_height + BODY.line_height());
        self.place_table_header(flow, header_height);

        for row in medicines {
            let cells = [&row.serial, &row.name, &row.dosage, &row.instructions];
            let wrapped: Vec<Vec<String>> = cells
                .iter()
                .zip(TABLE_COLUMNS)
                .map(|(cell, frac)| {
                    self.wrap(cell, BODY, frac * CONTENT_WIDTH - 2.0 * CELL_PADDING)
                })
                .collect();
            let row_lines = wrapped.iter().map(Vec::len).max().unwrap_or(1);
            let row_height = row_lines as f64 * BODY.line_height() + 2.0 * CELL_PADDING;

            // A row that breaks to a new page gets the header row again. A
            // row taller than a whole page is capped here so it starts on a
            // fresh page and then splits line by line below.
            if flow.ensure(row_height.min(flow.limit)) {
                self.place_table_header(flow, header_height);
            }

            // Place the wrapped lines in per-page slices so an oversized
            // cell never runs past the page bottom.
            let mut start = 0usize;
            while start < row_lines {
                let take = if flow.limit.is_finite() {
                    let room = flow.limit - flow.y - 2.0 * CELL_PADDING;
                    let fit = (room / BODY.line_height()).floor() as usize;
                    if fit == 0 {
                        flow.break_page();
                        self.place_table_header(flow, header_height);
                        continue;
                    }
                    fit.min(row_lines - start)
                } else {
                    row_lines
                };
                let slice_height = take as f64 * BODY.line_height() + 2.0 * CELL_PADDING;

                let top = flow.page_y();
                let mut x = MARGIN;
                for (lines, frac) in wrapped.iter().zip(TABLE_COLUMNS) {
                    let text_lines = lines
                        .iter()
                        .skip(start)
                        .take(take)
                        .enumerate()
                        .map(|(n, line)| TextLine {
                            x: x + CELL_PADDING,
                            y: top + CELL_PADDING + n as f64 * BODY.line_height() + BODY.size,
                            text: line.clone(),
                            style: BODY,
                        })
                        .collect::<Vec<_>>();
                    if !text_lines.is_empty() {
                        flow.push(LayoutElement {
                            x,
                            y: top,
                            width: frac * CONTENT_WIDTH,
                            height: slice_height,
                            draw: DrawCommand::Text { lines: text_lines, color: palette::TEXT },
                        });
                    }
                    x += frac * CONTENT_WIDTH;
                }

                start += take;
                if start < row_lines {
                    flow.advance(slice_height);
                    flow.break_page();
                    self.place_table_header(flow, header_height);
                } else {
                    flow.push(LayoutElement {
                        x: MARGIN,
                        y: top + slice_height,
                        width: CONTENT_WIDTH,
                        height: 0.5,
                        draw: DrawCommand::Line { color: palette::ROW_RULE },
                    });
                    flow.advance(slice_height + 0.5);
                }
            }
        }
        flow.advance(SECTION_GAP);
    }

    fn place_table_header(&self, flow: &mut Flow, header_height: f64) {
        let top = flow.page_y();
        flow.push(LayoutElement {
            x: MARGIN,
            y: top,
            width: CONTENT_WIDTH,
            height: header_height,
            draw: DrawCommand::Rect { fill: palette::TABLE_HEADER_BG },
        });
        let mut x = MARGIN;
        for (title, frac) in TABLE_HEADERS.iter().zip(TABLE_COLUMNS) {
            flow.push(self.text_at(
                x + CELL_PADDING,
                top + CELL_PADDING,
                title,
                BODY_BOLD,
                palette::HEADING,
            ));
            x += frac * CONTENT_WIDTH;
        }
        flow.advance(header_height);
    }

    fn footer_element(&self, text: &str, y: f64) -> LayoutElement {
        let width = self.fonts.measure_string(text, FOOTER.font(), FOOTER.size);
        let x = (PAGE_WIDTH - width) / 2.0;
        LayoutElement {
            x,
            y,
            width,
            height: FOOTER.line_height(),
            draw: DrawCommand::Text {
                lines: vec![TextLine {
                    x,
                    y: y + FOOTER.size,
                    text: text.to_string(),
                    style: FOOTER,
                }],
                color: palette::FOOTER,
            },
        }
    }

    fn text_at(&self, x: f64, y: f64, text: &str, style: TextStyle, color: Color) -> LayoutElement {
        let width = self.fonts.measure_string(text, style.font(), style.size);
        LayoutElement {
            x,
            y,
            width,
            height: style.line_height(),
            draw: DrawCommand::Text {
                lines: vec![TextLine {
                    x,
                    y: y + style.size,
                    text: text.to_string(),
                    style,
                }],
                color,
            },
        }
    }

    /// Greedy word wrap using real advance widths. Words wider than the
    /// available width are hard-broken. Embedded newlines are respected.
    fn wrap(&self, text: &str, style: TextStyle, max_width: f64) -> Vec<String> {
        let font = style.font();
        let mut lines = Vec::new();

        for paragraph in text.split('\n') {
            let mut line = String::new();
            for word in paragraph.split_whitespace() {
                let candidate = if line.is_empty() {
                    word.to_string()
                } else {
                    format!("{line} {word}")
                };
                if self.fonts.measure_string(&candidate, font, style.size) <= max_width {
                    line = candidate;
                    continue;
                }
                if !line.is_empty() {
                    lines.push(std::mem::take(&mut line));
                }
                // Word alone is too wide: break it by characters.
                if self.fonts.measure_string(word, font, style.size) > max_width {
                    let mut chunk = String::new();
                    for ch in word.chars() {
                        chunk.push(ch);
                        if self.fonts.measure_string(&chunk, font, style.size) > max_width
                            && chunk.chars().count() > 1
                        {
                            let last = chunk.pop();
                            lines.push(std::mem::take(&mut chunk));
                            if let Some(last) = last {
                                chunk.push(last);
                            }
                        }
                    }
                    line = chunk;
                } else {
                    line = word.to_string();
                }
            }
            if !line.is_empty() || paragraph.is_empty() {
                lines.push(line);
            }
        }

        if lines.is_empty() {
            lines.push(String::new());
        }
        lines
    }
}

/// Scale (w, h) to fit inside (box_w, box_h), preserving aspect ratio.
fn contain_fit(w: f64, h: f64, box_w: f64, box_h: f64) -> (f64, f64) {
    if w <= 0.0 || h <= 0.0 {
        return (box_w, box_h);
    }
    let scale = (box_w / w).min(box_h / h).min(1.0);
    (w * scale, h * scale)
}

/// Print-quality rendering backend: flow layout into A4 pages, then a
/// from-scratch PDF serialization with selectable text.
pub struct LayoutRenderer {
    engine: LayoutEngine,
}

impl Default for LayoutRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutRenderer {
    pub fn new() -> Self {
        LayoutRenderer {
            engine: LayoutEngine::new(),
        }
    }
}

impl crate::document::Renderer for LayoutRenderer {
    fn render(&self, model: &DocumentModel) -> Result<Vec<u8>, Error> {
        let pages = self.engine.layout(model);
        let metadata = Metadata {
            title: format!("Prescription {}", model.header.rx_id),
            author: model.header.doctor.name.clone(),
        };
        PdfWriter::new().write(&pages, &metadata)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Field, Header};
    use crate::snapshot::DoctorIdentity;

    fn sample_model(medicine_count: usize) -> DocumentModel {
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
                Field { label: "Name", value: "Jane Doe".into() },
                Field { label: "Date", value: "05/03/2024".into() },
                Field { label: "Age", value: "34 Years".into() },
                Field { label: "Pat Id", value: "-".into() },
                Field { label: "Gender", value: "-".into() },
                Field { label: "Height", value: "-".into() },
                Field { label: "Weight", value: "-".into() },
            ],
            leading_sections: vec![],
            medicines: (1..=medicine_count)
                .map(|n| MedicineRow {
                    serial: format!("{n}."),
                    name: format!("Medicine {n}"),
                    dosage: "1-0-1".into(),
                    instructions: "After food".into(),
                })
                .collect(),
            trailing_sections: vec![],
            footer: crate::document::FOOTER_DISCLAIMER.to_string(),
        }
    }

    fn page_text(page: &LayoutPage) -> String {
        let mut out = String::new();
        for el in &page.elements {
            if let DrawCommand::Text { lines, .. } = &el.draw {
                for line in lines {
                    out.push_str(&line.text);
                    out.push('\n');
                }
            }
        }
        out
    }

    #[test]
    fn test_single_page_document() {
        let pages = LayoutEngine::new().layout(&sample_model(3));
        assert_eq!(pages.len(), 1);
        assert!((pages[0].width - PAGE_WIDTH).abs() < 0.01);
        let text = page_text(&pages[0]);
        assert!(text.contains("Dr. A. Carter"));
        assert!(text.contains("Rx ID : RX-1700000000000"));
        assert!(text.contains("Jane Doe"));
    }

    #[test]
    fn test_long_table_paginates_and_repeats_header() {
        let pages = LayoutEngine::new().layout(&sample_model(60));
        assert!(pages.len() > 1, "60 rows should not fit on one page");
        for page in &pages {
            let text = page_text(page);
            // Continuation pages carry the table header again.
            assert!(text.contains("Medicine"), "every page shows the table header");
        }
    }

    #[test]
    fn test_oversized_row_splits_across_pages() {
        let mut model = sample_model(1);
        model.medicines[0].instructions = "word ".repeat(1200).trim_end().to_string();
        let pages = LayoutEngine::new().layout(&model);
        assert!(pages.len() > 1, "1200 words cannot fit on one page");

        let mut words = 0usize;
        for page in &pages {
            let text = page_text(page);
            assert!(text.contains("Instructions"), "every slice re-shows the header row");
            for el in &page.elements {
                if let DrawCommand::Text { lines, .. } = &el.draw {
                    for line in lines {
                        assert!(
                            line.y > 0.0 && line.y <= PAGE_HEIGHT,
                            "line baseline {} off the page",
                            line.y
                        );
                        words += line.text.matches("word").count();
                    }
                }
            }
        }
        assert_eq!(words, 1200, "no instruction text is dropped");
    }

    #[test]
    fn test_footer_on_every_page() {
        let pages = LayoutEngine::new().layout(&sample_model(60));
        for page in &pages {
            assert!(page_text(page).contains(crate::document::FOOTER_DISCLAIMER));
        }
    }

    #[test]
    fn test_header_only_on_first_page() {
        let pages = LayoutEngine::new().layout(&sample_model(60));
        assert!(page_text(&pages[0]).contains("Dr. A. Carter"));
        assert!(!page_text(&pages[1]).contains("Dr. A. Carter"));
    }

    #[test]
    fn test_canvas_has_no_page_breaks() {
        let engine = LayoutEngine::new();
        let (elements, height) = engine.layout_canvas(&sample_model(60));
        assert!(height > PAGE_HEIGHT, "60 rows overflow a single page height");
        assert!(!elements.is_empty());
        // The footer comes last, after all content.
        let footer = elements
            .iter()
            .filter_map(|el| match &el.draw {
                DrawCommand::Text { lines, .. } => lines.first(),
                _ => None,
            })
            .find(|l| l.text == crate::document::FOOTER_DISCLAIMER)
            .unwrap();
        assert!(footer.y > PAGE_HEIGHT);
    }

    #[test]
    fn test_wrap_breaks_long_words() {
        let engine = LayoutEngine::new();
        let lines = engine.wrap("Supercalifragilisticexpialidocious", BODY, 60.0);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(
                engine.fonts.measure_string(line, BODY.font(), BODY.size) <= 60.0 + 0.001
            );
        }
    }

    #[test]
    fn test_wrap_respects_newlines() {
        let engine = LayoutEngine::new();
        let lines = engine.wrap("one\ntwo", BODY, 500.0);
        assert_eq!(lines, vec!["one".to_string(), "two".to_string()]);
    }

    #[test]
    fn test_contain_fit() {
        let (w, h) = contain_fit(240.0, 60.0, 120.0, 60.0);
        assert!((w - 120.0).abs() < 0.001);
        assert!((h - 30.0).abs() < 0.001);
        let (w, h) = contain_fit(30.0, 30.0, 120.0, 60.0);
        assert!((w - 30.0).abs() < 0.001, "small images are not upscaled");
        assert!((h - 30.0).abs() < 0.001);
    }
}

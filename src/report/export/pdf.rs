// src/report/export/pdf.rs
//! Contract A: the paginated PDF artifact.
//!
//! One A4 PDF page per rendered page, in sequence; the first rendered page
//! lands on the document's initial page and every subsequent one adds a page
//! first. Pages are typeset strictly in order and the document is only
//! serialized after the last page succeeds, so a failure anywhere aborts the
//! whole export without a partial artifact.

use super::ExportError;
use crate::report::render::{Block, RenderedPage, PRODUCT_NAME};
use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfLayerReference};
use std::io::BufWriter;
use tracing::warn;

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 15.0;
const BODY_WRAP: usize = 95;

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

/// Produce the complete PDF as bytes.
pub fn export_pdf(pages: &[RenderedPage]) -> Result<Vec<u8>, ExportError> {
    let (doc, first_page, first_layer) = PdfDocument::new(
        PRODUCT_NAME,
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        "Layer 1",
    );

    let fonts = Fonts {
        regular: doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| ExportError::ExportFailed(format!("font error: {e}")))?,
        bold: doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| ExportError::ExportFailed(format!("font error: {e}")))?,
    };

    for (i, page) in pages.iter().enumerate() {
        let layer = if i == 0 {
            doc.get_page(first_page).get_layer(first_layer)
        } else {
            let (page_idx, layer_idx) =
                doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
            doc.get_page(page_idx).get_layer(layer_idx)
        };
        typeset_page(&layer, &fonts, page);
    }

    let mut buf = BufWriter::new(Vec::new());
    doc.save(&mut buf)
        .map_err(|e| ExportError::ExportFailed(format!("save error: {e}")))?;
    buf.into_inner()
        .map_err(|e| ExportError::ExportFailed(format!("buffer error: {e}")))
}

fn typeset_page(layer: &PdfLayerReference, fonts: &Fonts, page: &RenderedPage) {
    let mut cursor = Cursor::new(page.index);

    // Running header.
    layer.use_text(
        PRODUCT_NAME,
        9.0,
        Mm(MARGIN_MM),
        Mm(PAGE_HEIGHT_MM - 10.0),
        &fonts.regular,
    );

    for block in &page.blocks {
        match block {
            Block::Heading(text) => {
                cursor.lines(layer, &fonts.bold, 14.0, 6.5, text, 70);
                cursor.gap(3.0);
            }
            Block::SectionTitle(text) => {
                cursor.gap(3.0);
                cursor.lines(layer, &fonts.bold, 12.0, 6.0, text, 80);
                cursor.gap(1.5);
            }
            Block::SubsectionTitle(text) => {
                cursor.gap(2.0);
                cursor.lines(layer, &fonts.bold, 10.5, 5.5, text, 85);
                cursor.gap(1.0);
            }
            Block::Subtitle(text) => {
                cursor.lines(layer, &fonts.regular, 8.5, 4.0, text, 105);
                cursor.gap(1.5);
            }
            Block::Paragraph(text) => {
                cursor.lines(layer, &fonts.regular, 10.0, 4.8, text, BODY_WRAP);
                cursor.gap(2.0);
            }
            Block::LabelValue(label, value) => {
                cursor.lines(
                    layer,
                    &fonts.regular,
                    10.0,
                    4.8,
                    &format!("{}: {}", label, value),
                    BODY_WRAP,
                );
                cursor.gap(1.0);
            }
            Block::Bullets(items) => {
                for item in items {
                    cursor.lines(
                        layer,
                        &fonts.regular,
                        10.0,
                        4.8,
                        &format!("\u{2022}  {}", item),
                        BODY_WRAP,
                    );
                }
                cursor.gap(2.0);
            }
            Block::Table { headers, rows } => {
                cursor.lines(
                    layer,
                    &fonts.bold,
                    10.0,
                    5.0,
                    &format!("{}    |    {}", headers[0], headers[1]),
                    BODY_WRAP,
                );
                for row in rows {
                    cursor.lines(
                        layer,
                        &fonts.regular,
                        9.5,
                        4.6,
                        &format!("{}  \u{2013}  {}", row[0], row[1]),
                        BODY_WRAP,
                    );
                }
                cursor.gap(2.0);
            }
            Block::Rule => {
                cursor.lines(layer, &fonts.regular, 9.0, 4.0, &"_".repeat(60), 120);
                cursor.gap(2.0);
            }
        }
    }
}

/// Vertical layout cursor. Text past the bottom margin is dropped rather
/// than overflowing into the footer area; the first dropped line logs a
/// warning so truncation is visible in the service logs.
struct Cursor {
    y: f32,
    page_index: usize,
    truncated: bool,
}

impl Cursor {
    fn new(page_index: usize) -> Self {
        Self {
            y: PAGE_HEIGHT_MM - MARGIN_MM - 8.0,
            page_index,
            truncated: false,
        }
    }

    fn gap(&mut self, mm: f32) {
        self.y -= mm;
    }

    fn lines(
        &mut self,
        layer: &PdfLayerReference,
        font: &IndirectFontRef,
        size: f32,
        leading_mm: f32,
        text: &str,
        wrap: usize,
    ) {
        for line in wrap_text(text, wrap) {
            if self.y < MARGIN_MM {
                if !self.truncated {
                    self.truncated = true;
                    warn!(
                        "page {} content exceeds the bottom margin, remaining lines dropped",
                        self.page_index + 1
                    );
                }
                return;
            }
            layer.use_text(&line, size, Mm(MARGIN_MM), Mm(self.y), font);
            self.y -= leading_mm;
        }
    }
}

/// Simple word-wrap for fixed-pitch layout.
fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.len() + word.len() + 1 > max_chars && !current.is_empty() {
            lines.push(current.clone());
            current.clear();
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::catalog::SlotCatalog;
    use crate::report::model::ReportValues;
    use crate::report::render::render;

    #[test]
    fn test_export_produces_pdf_bytes() {
        let catalog = SlotCatalog::standard();
        let pages = render(&ReportValues::new(), &catalog);
        let bytes = export_pdf(&pages).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
        assert!(bytes.len() > 1000);
    }

    #[test]
    fn test_export_is_deterministic_per_input() {
        let catalog = SlotCatalog::standard();
        let mut values = ReportValues::new();
        values.set("full_name", "Jane Doe");
        let pages = render(&values, &catalog);
        // Same pages in, same page count out; byte identity is not promised
        // (the PDF carries metadata), structure is.
        let one = export_pdf(&pages).unwrap();
        let two = export_pdf(&pages).unwrap();
        assert!(one.starts_with(b"%PDF") && two.starts_with(b"%PDF"));
    }

    #[test]
    fn test_cursor_flags_overflow_past_bottom_margin() {
        let (doc, page_idx, layer_idx) = PdfDocument::new(
            PRODUCT_NAME,
            Mm(PAGE_WIDTH_MM),
            Mm(PAGE_HEIGHT_MM),
            "Layer 1",
        );
        let font = doc.add_builtin_font(BuiltinFont::Helvetica).unwrap();
        let layer = doc.get_page(page_idx).get_layer(layer_idx);

        let mut cursor = Cursor::new(0);
        cursor.lines(&layer, &font, 10.0, 4.8, "short line", BODY_WRAP);
        assert!(!cursor.truncated);

        let long_value = "overflowing model output ".repeat(500);
        cursor.lines(&layer, &font, 10.0, 4.8, &long_value, BODY_WRAP);
        assert!(cursor.truncated);
    }

    #[test]
    fn test_wrap_text() {
        let lines = wrap_text("one two three four five", 9);
        assert_eq!(lines, vec!["one two", "three", "four five"]);
        assert_eq!(wrap_text("", 10), vec![String::new()]);
    }
}

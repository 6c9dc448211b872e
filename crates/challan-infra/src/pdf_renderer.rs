//! PDF rendering of a challan print document
//!
//! Lays the blocks out top to bottom on A4 pages with the built-in Helvetica
//! fonts. Tables continue on a new page (with their column header repeated)
//! when the bottom margin is reached.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use printpdf::{
    BuiltinFont, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference,
    Point,
};
use tracing::debug;

use challan_domain::model::{Align, HeaderBlock, PrintBlock, PrintDocument, TableBlock, TableKind};
use challan_types::RenderError;

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 15.0;

const ORG_FONT_SIZE: f32 = 20.0;
const TITLE_FONT_SIZE: f32 = 14.0;
const NORMAL_FONT_SIZE: f32 = 9.0;

const LINE_HEIGHT_MM: f32 = 6.0;
const ROW_HEIGHT_MM: f32 = 7.0;
const CELL_PADDING_MM: f32 = 1.5;

/// Helvetica averages about half an em per glyph
const AVG_CHAR_EM: f32 = 0.5;
const PT_TO_MM: f32 = 0.3528;

const LEFT_LABEL_WIDTH_MM: f32 = 25.0;
const LEFT_VALUE_WIDTH_MM: f32 = 80.0;
const RIGHT_COLUMN_OFFSET_MM: f32 = 85.0;
const RIGHT_LABEL_WIDTH_MM: f32 = 28.0;

fn pdf_err(e: impl std::fmt::Display) -> RenderError {
    RenderError::Pdf(e.to_string())
}

/// Render the document and write it to `path`
pub fn render_pdf(document: &PrintDocument, path: &Path) -> Result<(), RenderError> {
    let title = document
        .header()
        .map(|h| h.title.clone())
        .unwrap_or_else(|| document.file_name.clone());
    let (doc, page1, layer1) =
        PdfDocument::new(title, Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");

    let regular = doc.add_builtin_font(BuiltinFont::Helvetica).map_err(pdf_err)?;
    let bold = doc.add_builtin_font(BuiltinFont::HelveticaBold).map_err(pdf_err)?;

    let mut canvas = Canvas {
        doc: &doc,
        layer: doc.get_page(page1).get_layer(layer1),
        regular,
        bold,
        y: PAGE_HEIGHT_MM - MARGIN_MM,
        pages: 1,
    };

    for block in &document.blocks {
        match block {
            PrintBlock::Header(header) => draw_header(&mut canvas, header),
            PrintBlock::Table(table) => draw_table(&mut canvas, table),
            PrintBlock::Signature(sig) => {
                canvas.ensure_space(20.0 + LINE_HEIGHT_MM);
                canvas.y -= 20.0;
                canvas.text_aligned(
                    &sig.label,
                    NORMAL_FONT_SIZE,
                    MARGIN_MM,
                    PAGE_WIDTH_MM - 2.0 * MARGIN_MM,
                    Align::Right,
                    true,
                );
            }
        }
    }
    let pages = canvas.pages;

    let file = File::create(path).map_err(pdf_err)?;
    let mut writer = BufWriter::new(file);
    doc.save(&mut writer).map_err(pdf_err)?;
    debug!(path = %path.display(), pages, "challan pdf written");
    Ok(())
}

struct Canvas<'a> {
    doc: &'a PdfDocumentReference,
    layer: PdfLayerReference,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    /// Baseline of the next line, from the page bottom
    y: f32,
    pages: usize,
}

impl Canvas<'_> {
    fn new_page(&mut self) {
        let (page, layer) = self
            .doc
            .add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.y = PAGE_HEIGHT_MM - MARGIN_MM;
        self.pages += 1;
    }

    /// Start a new page unless `height` still fits; true when a page was added
    fn ensure_space(&mut self, height: f32) -> bool {
        if self.y - height < MARGIN_MM {
            self.new_page();
            true
        } else {
            false
        }
    }

    fn text_at(&self, text: &str, size: f32, x: f32, bold: bool) {
        let font = if bold { &self.bold } else { &self.regular };
        self.layer.use_text(text, size, Mm(x), Mm(self.y), font);
    }

    fn text_aligned(&self, text: &str, size: f32, x: f32, width: f32, align: Align, bold: bool) {
        let text = fit_text(text, width, size);
        let used = text_width_mm(&text, size);
        let x = match align {
            Align::Left => x,
            Align::Center => x + (width - used).max(0.0) / 2.0,
            Align::Right => x + (width - used).max(0.0),
        };
        self.text_at(&text, size, x, bold);
    }

    fn rule(&self, x1: f32, x2: f32, y: f32) {
        self.layer.set_outline_thickness(0.4);
        self.layer.add_line(Line {
            points: vec![
                (Point::new(Mm(x1), Mm(y)), false),
                (Point::new(Mm(x2), Mm(y)), false),
            ],
            is_closed: false,
        });
    }
}

fn draw_header(canvas: &mut Canvas<'_>, header: &HeaderBlock) {
    let content_width = PAGE_WIDTH_MM - 2.0 * MARGIN_MM;

    canvas.y -= 4.0;
    canvas.text_aligned(&header.organization, ORG_FONT_SIZE, MARGIN_MM, content_width, Align::Center, true);
    canvas.y -= LINE_HEIGHT_MM;
    for line in wrap_text(&header.address, max_chars(content_width, NORMAL_FONT_SIZE)) {
        canvas.text_aligned(&line, NORMAL_FONT_SIZE, MARGIN_MM, content_width, Align::Center, false);
        canvas.y -= 4.0;
    }
    canvas.y -= 2.0;
    canvas.rule(MARGIN_MM, PAGE_WIDTH_MM - MARGIN_MM, canvas.y);
    canvas.y -= 8.0;
    canvas.text_aligned(&header.title, TITLE_FONT_SIZE, MARGIN_MM, content_width, Align::Center, true);
    canvas.y -= 8.0;

    let top = canvas.y;

    // Left column: labels with wrapped values
    let value_chars = max_chars(LEFT_VALUE_WIDTH_MM, NORMAL_FONT_SIZE);
    for field in &header.left {
        canvas.text_at(&format!("{}:", field.label), NORMAL_FONT_SIZE, MARGIN_MM, true);
        let lines = wrap_text(&field.value, value_chars);
        let count = lines.len().max(1);
        for (i, line) in lines.iter().enumerate() {
            canvas.text_at(line, NORMAL_FONT_SIZE, MARGIN_MM + LEFT_LABEL_WIDTH_MM, false);
            if i + 1 < count {
                canvas.y -= LINE_HEIGHT_MM;
            }
        }
        canvas.y -= LINE_HEIGHT_MM;
    }
    let left_bottom = canvas.y;

    // Right column
    canvas.y = top;
    let right_x = PAGE_WIDTH_MM - RIGHT_COLUMN_OFFSET_MM;
    for field in &header.right {
        canvas.text_at(&format!("{}:", field.label), NORMAL_FONT_SIZE, right_x, true);
        canvas.text_aligned(
            &field.value,
            NORMAL_FONT_SIZE,
            right_x + RIGHT_LABEL_WIDTH_MM,
            RIGHT_COLUMN_OFFSET_MM - RIGHT_LABEL_WIDTH_MM - MARGIN_MM,
            Align::Left,
            false,
        );
        canvas.y -= LINE_HEIGHT_MM;
    }

    canvas.y = canvas.y.min(left_bottom) - 2.0;
}

fn draw_table(canvas: &mut Canvas<'_>, table: &TableBlock) {
    let widths = column_widths(table.kind, PAGE_WIDTH_MM - 2.0 * MARGIN_MM);

    canvas.ensure_space(ROW_HEIGHT_MM * 3.0);
    draw_row_cells(canvas, table, &widths, &table.kind.header_row(), true, true);

    for row in &table.rows {
        if canvas.ensure_space(ROW_HEIGHT_MM * 2.0) {
            draw_row_cells(canvas, table, &widths, &table.kind.header_row(), true, true);
        }
        draw_row_cells(canvas, table, &widths, row, false, false);
    }

    canvas.ensure_space(ROW_HEIGHT_MM);
    draw_row_cells(canvas, table, &widths, &table.footer, true, true);
    canvas.y -= 8.0;
}

/// One table row; `ruled` draws lines above and below it
fn draw_row_cells(
    canvas: &mut Canvas<'_>,
    table: &TableBlock,
    widths: &[f32],
    cells: &[String],
    bold: bool,
    ruled: bool,
) {
    let top = canvas.y;
    let bottom = top - ROW_HEIGHT_MM;
    if ruled {
        canvas.rule(MARGIN_MM, PAGE_WIDTH_MM - MARGIN_MM, top);
    }

    canvas.y = bottom + 2.2;
    let mut x = MARGIN_MM;
    for (i, width) in widths.iter().enumerate() {
        let align = table.columns.get(i).map(|c| c.align).unwrap_or(Align::Center);
        if let Some(cell) = cells.get(i).filter(|c| !c.is_empty()) {
            canvas.text_aligned(
                cell,
                NORMAL_FONT_SIZE,
                x + CELL_PADDING_MM,
                width - 2.0 * CELL_PADDING_MM,
                align,
                bold,
            );
        }
        x += width;
    }

    if ruled {
        canvas.rule(MARGIN_MM, PAGE_WIDTH_MM - MARGIN_MM, bottom);
    }
    canvas.y = bottom;
}

fn column_widths(kind: TableKind, total: f32) -> Vec<f32> {
    let ratios: &[f32] = match kind {
        TableKind::RegularItems => &[0.08, 0.44, 0.16, 0.16, 0.16],
        TableKind::GradeItems => &[0.10, 0.30, 0.30, 0.30],
        TableKind::PolyItems => &[0.08, 0.44, 0.24, 0.24],
    };
    ratios.iter().map(|r| r * total).collect()
}

fn text_width_mm(text: &str, size: f32) -> f32 {
    text.chars().count() as f32 * size * AVG_CHAR_EM * PT_TO_MM
}

fn max_chars(width_mm: f32, size: f32) -> usize {
    ((width_mm / (size * AVG_CHAR_EM * PT_TO_MM)) as usize).max(1)
}

/// Shorten text that would overflow its cell, marking the cut with ".."
fn fit_text(text: &str, width_mm: f32, size: f32) -> String {
    let max_len = max_chars(width_mm, size);
    if text.chars().count() > max_len {
        let truncated: String = text.chars().take(max_len.saturating_sub(2)).collect();
        format!("{}..", truncated)
    } else {
        text.to_string()
    }
}

/// Greedy word wrap; words longer than a line are split
fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > max_chars {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            lines.push(word.drain(..max_chars).collect());
        }
        let word: String = word.into_iter().collect();
        if word.is_empty() {
            continue;
        }
        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if needed > max_chars && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(&word);
    }
    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use challan_domain::model::{CompanyProfile, LoadingSession, PolyItem, RegularItem};
    use challan_domain::service::project;
    use chrono::NaiveDate;
    use tempfile::tempdir;

    #[test]
    fn test_wrap_text() {
        assert_eq!(wrap_text("a bb ccc", 4), vec!["a bb", "ccc"]);
        assert_eq!(wrap_text("", 10), vec![""]);
        assert_eq!(wrap_text("abcdefgh", 3), vec!["abc", "def", "gh"]);
    }

    #[test]
    fn test_fit_text_truncates() {
        let cell = fit_text(&"x".repeat(200), 20.0, NORMAL_FONT_SIZE);
        assert!(cell.ends_with(".."));
        assert_eq!(cell.chars().count(), max_chars(20.0, NORMAL_FONT_SIZE));
        assert_eq!(fit_text("450", 20.0, NORMAL_FONT_SIZE), "450");
    }

    #[test]
    fn test_column_widths_fill_content() {
        for kind in [TableKind::RegularItems, TableKind::GradeItems, TableKind::PolyItems] {
            let widths = column_widths(kind, 180.0);
            assert_eq!(widths.len(), kind.columns().len());
            assert!((widths.iter().sum::<f32>() - 180.0).abs() < 0.01);
        }
    }

    #[test]
    fn test_renders_multi_page_pdf() {
        let mut session = LoadingSession::new("", NaiveDate::from_ymd_opt(2026, 1, 25).unwrap());
        session.header.challan_no = "CH-100".to_string();
        session.header.vehicle_no = "MH-18-BC-4412".to_string();
        session.items = (0..80)
            .map(|i| RegularItem {
                product: format!("Freshkins Std Pant {}", i),
                size: "L".to_string(),
                total_ctn: "10".to_string(),
                avg_weight_kg: "12".to_string(),
                ..Default::default()
            })
            .collect();
        session.poly_items = vec![PolyItem {
            name: "Outer Poly S".to_string(),
            size: "S-42".to_string(),
            kgs: "20".to_string(),
        }];
        let profile = CompanyProfile {
            name: "MUMUKSH IMPEX LLP".to_string(),
            address: "Ranala Shivar, Ranala, Nandurbar, Maharashtra-425411".to_string(),
        };
        let challan = project(&session, &profile).unwrap();

        let dir = tempdir().unwrap();
        let path = dir.path().join(&challan.print.file_name);
        render_pdf(&challan.print, &path).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }
}

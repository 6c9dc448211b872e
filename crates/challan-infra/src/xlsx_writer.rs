//! Excel export of the challan export table

use std::path::Path;

use rust_xlsxwriter::{Format, Workbook, Worksheet};
use tracing::debug;

use challan_domain::model::{ExportTable, TableKind};
use challan_types::RenderError;

const SHEET_NAME: &str = "Challan";

fn excel_err(e: impl std::fmt::Display) -> RenderError {
    RenderError::Excel(e.to_string())
}

/// Export the table to an .xlsx workbook with a single sheet
pub fn write_xlsx(table: &ExportTable, output_path: &Path) -> Result<(), RenderError> {
    let mut workbook = Workbook::new();

    let sheet = workbook.add_worksheet();
    write_challan_sheet(sheet, table)?;

    workbook.save(output_path).map_err(excel_err)?;
    debug!(path = %output_path.display(), rows = table.rows.len(), "challan workbook written");
    Ok(())
}

fn write_challan_sheet(sheet: &mut Worksheet, table: &ExportTable) -> Result<(), RenderError> {
    sheet.set_name(SHEET_NAME).map_err(excel_err)?;

    let bold = Format::new().set_bold();

    let tables_from = tables_start(table);
    for (r, cells) in table.rows.iter().enumerate() {
        let row = r as u32;
        let emphasized = r == 0 || is_table_header(cells) || is_footer(cells);
        for (c, cell) in cells.iter().enumerate() {
            let col = c as u16;
            if cell.is_empty() {
                continue;
            }
            match cell_value(cell, r >= tables_from) {
                CellValue::Number(n) if emphasized => sheet.write_number_with_format(row, col, n, &bold),
                CellValue::Number(n) => sheet.write_number(row, col, n),
                CellValue::Text(text) if emphasized => sheet.write_string_with_format(row, col, text, &bold),
                CellValue::Text(text) => sheet.write_string(row, col, text),
            }
            .map_err(excel_err)?;
        }
    }

    sheet.set_column_width(0, 28).map_err(excel_err)?;
    sheet.set_column_width(1, 36).map_err(excel_err)?;
    for col in 2..5u16 {
        sheet.set_column_width(col, 14).map_err(excel_err)?;
    }

    Ok(())
}

fn is_table_header(cells: &[String]) -> bool {
    [TableKind::RegularItems, TableKind::GradeItems, TableKind::PolyItems]
        .iter()
        .any(|kind| kind.header_row().as_slice() == cells)
}

/// Totals rows carry an empty first cell and a label in the second
fn is_footer(cells: &[String]) -> bool {
    cells.len() > 2 && cells[0].is_empty() && cells[1].chars().all(|c| !c.is_lowercase())
}

#[derive(Debug, PartialEq)]
enum CellValue<'a> {
    Number(f64),
    Text(&'a str),
}

/// Index of the first row after the label/value header (its blank separator)
fn tables_start(table: &ExportTable) -> usize {
    table
        .rows
        .iter()
        .position(|row| row.is_empty())
        .map_or(table.rows.len(), |i| i + 1)
}

/// Header values (phone, challan and LR numbers) always stay text
fn cell_value(cell: &str, in_tables: bool) -> CellValue<'_> {
    match numeric_cell(cell) {
        Some(n) if in_tables => CellValue::Number(n),
        _ => CellValue::Text(cell),
    }
}

/// Cells that are entirely a finite number become numeric cells.
/// A leading zero ("007") marks an identifier, not a quantity.
fn numeric_cell(cell: &str) -> Option<f64> {
    let trimmed = cell.trim();
    if trimmed.is_empty() || trimmed.starts_with('+') {
        return None;
    }
    let digits = trimmed.strip_prefix('-').unwrap_or(trimmed);
    if digits.len() > 1 && digits.starts_with('0') && !digits.starts_with("0.") {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

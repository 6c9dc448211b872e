//! Delimited text output for the challan export table
//!
//! Output starts with a UTF-8 byte-order mark so spreadsheet tools pick the
//! right encoding. Fields holding a comma, quote or line break are quoted with
//! embedded quotes doubled; empty rows become blank lines.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use challan_domain::model::ExportTable;
use challan_types::RenderError;

pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Write the table as CSV to any writer
pub fn write_csv<W: Write>(table: &ExportTable, mut out: W) -> Result<(), RenderError> {
    out.write_all(UTF8_BOM).map_err(csv::Error::from)?;

    let mut builder = csv::WriterBuilder::new();
    builder
        .flexible(true)
        .quote_style(csv::QuoteStyle::Necessary)
        .terminator(csv::Terminator::Any(b'\n'));

    for row in &table.rows {
        if row.is_empty() {
            // csv writes `""` for an empty record; a separator is a bare newline
            out.write_all(b"\n").map_err(csv::Error::from)?;
        } else {
            let mut writer = builder.from_writer(&mut out);
            writer.write_record(row)?;
            writer.flush().map_err(csv::Error::from)?;
        }
    }
    out.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// CSV bytes of the table, BOM included
pub fn csv_bytes(table: &ExportTable) -> Result<Vec<u8>, RenderError> {
    let mut buf = Vec::new();
    write_csv(table, &mut buf)?;
    Ok(buf)
}

/// Write the table to a CSV file
pub fn write_csv_file(table: &ExportTable, path: &Path) -> Result<(), RenderError> {
    let file = File::create(path).map_err(csv::Error::from)?;
    write_csv(table, BufWriter::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(rows: Vec<Vec<&str>>) -> ExportTable {
        ExportTable {
            file_name: "CHALLAN_T.csv".to_string(),
            rows: rows
                .into_iter()
                .map(|r| r.into_iter().map(String::from).collect())
                .collect(),
        }
    }

    fn text(bytes: &[u8]) -> &str {
        std::str::from_utf8(&bytes[UTF8_BOM.len()..]).unwrap()
    }

    #[test]
    fn test_starts_with_bom() {
        let bytes = csv_bytes(&table(vec![vec!["LOADING CHALLAN"]])).unwrap();
        assert!(bytes.starts_with(UTF8_BOM));
        assert_eq!(text(&bytes), "LOADING CHALLAN\n");
    }

    #[test]
    fn test_escaping() {
        let bytes = csv_bytes(&table(vec![
            vec!["Ship From", "Ranala Shivar, Nandurbar"],
            vec!["Dispatch To", "The \"Central\" Hub"],
            vec!["Note", "line one\nline two"],
            vec!["Plain", "value"],
        ]))
        .unwrap();
        assert_eq!(
            text(&bytes),
            "Ship From,\"Ranala Shivar, Nandurbar\"\n\
             Dispatch To,\"The \"\"Central\"\" Hub\"\n\
             Note,\"line one\nline two\"\n\
             Plain,value\n"
        );
    }

    #[test]
    fn test_blank_separator_and_ragged_rows() {
        let bytes = csv_bytes(&table(vec![
            vec!["LOADING CHALLAN"],
            vec![],
            vec!["Sr.", "Grade", "No. of Bags", "Total KGs"],
            vec!["", "GRAND TOTAL", "150", "1180"],
        ]))
        .unwrap();
        assert_eq!(
            text(&bytes),
            "LOADING CHALLAN\n\nSr.,Grade,No. of Bags,Total KGs\n,GRAND TOTAL,150,1180\n"
        );
    }
}

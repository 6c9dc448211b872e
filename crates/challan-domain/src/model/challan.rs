//! Output structures of the challan projector
//!
//! `PrintDocument` drives the document renderer, `ExportTable` drives the
//! delimited-file and spreadsheet writers. Neither carries any rendering
//! library types.

use serde::{Deserialize, Serialize};

use crate::service::totals::ChallanTotals;

/// Organization printed at the top of every challan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyProfile {
    pub name: String,
    pub address: String,
}

/// Result of a successful projection
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Challan {
    pub totals: ChallanTotals,
    pub print: PrintDocument,
    pub export: ExportTable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Column {
    pub title: &'static str,
    pub align: Align,
}

const fn col(title: &'static str, align: Align) -> Column {
    Column { title, align }
}

const REGULAR_COLUMNS: [Column; 5] = [
    col("Sr.", Align::Center),
    col("Item Description", Align::Left),
    col("Packs/Ctn", Align::Center),
    col("Total Ctn", Align::Center),
    col("Avg Wt (KG)", Align::Center),
];

const GRADE_COLUMNS: [Column; 4] = [
    col("Sr.", Align::Center),
    col("Grade", Align::Center),
    col("No. of Bags", Align::Center),
    col("Total KGs", Align::Center),
];

const POLY_COLUMNS: [Column; 4] = [
    col("Sr.", Align::Center),
    col("Poly Bag Name", Align::Left),
    col("Size", Align::Center),
    col("Total KGs", Align::Center),
];

/// Item table shapes a challan can contain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TableKind {
    RegularItems,
    GradeItems,
    PolyItems,
}

impl TableKind {
    pub fn columns(&self) -> &'static [Column] {
        match self {
            TableKind::RegularItems => &REGULAR_COLUMNS,
            TableKind::GradeItems => &GRADE_COLUMNS,
            TableKind::PolyItems => &POLY_COLUMNS,
        }
    }

    pub fn header_row(&self) -> Vec<String> {
        self.columns().iter().map(|c| c.title.to_string()).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderField {
    pub label: String,
    pub value: String,
}

impl HeaderField {
    pub fn new(label: &str, value: impl Into<String>) -> Self {
        Self {
            label: label.to_string(),
            value: value.into(),
        }
    }
}

/// Page header plus the two-column header field layout
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderBlock {
    pub organization: String,
    pub address: String,
    pub title: String,
    pub left: Vec<HeaderField>,
    pub right: Vec<HeaderField>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableBlock {
    pub kind: TableKind,
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<String>>,
    pub footer: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignatureBlock {
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "block", rename_all = "camelCase")]
pub enum PrintBlock {
    Header(HeaderBlock),
    Table(TableBlock),
    Signature(SignatureBlock),
}

/// Print-ready description of the challan, in page order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrintDocument {
    pub file_name: String,
    pub blocks: Vec<PrintBlock>,
}

impl PrintDocument {
    pub fn header(&self) -> Option<&HeaderBlock> {
        self.blocks.iter().find_map(|b| match b {
            PrintBlock::Header(h) => Some(h),
            _ => None,
        })
    }

    pub fn tables(&self) -> impl Iterator<Item = &TableBlock> {
        self.blocks.iter().filter_map(|b| match b {
            PrintBlock::Table(t) => Some(t),
            _ => None,
        })
    }

    pub fn table(&self, kind: TableKind) -> Option<&TableBlock> {
        self.tables().find(|t| t.kind == kind)
    }
}

/// Flat rows for a delimited text file. Empty rows are blank separators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportTable {
    pub file_name: String,
    pub rows: Vec<Vec<String>>,
}

impl ExportTable {
    /// Row whose second cell carries the given footer label
    pub fn footer_row(&self, label: &str) -> Option<&[String]> {
        self.rows
            .iter()
            .find(|row| row.get(1).map(String::as_str) == Some(label))
            .map(Vec::as_slice)
    }
}

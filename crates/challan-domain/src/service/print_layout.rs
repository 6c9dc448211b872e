//! Print document assembly

use chrono::{NaiveDate, NaiveDateTime};

use super::projector::{challan_file_name, ship_from};
use super::totals::{ChallanTotals, NOT_AVAILABLE};
use crate::model::{
    CompanyProfile, HeaderBlock, HeaderField, LoadingItems, LoadingSession, PrintBlock,
    PrintDocument, SignatureBlock, TableBlock, TableKind,
};

pub const DOCUMENT_TITLE: &str = "LOADING CHALLAN";
pub const SIGNATURE_LABEL: &str = "Authorized Signatory";

pub(crate) fn format_date(date: Option<NaiveDate>) -> Option<String> {
    date.map(|d| d.format("%d/%m/%Y").to_string())
}

pub(crate) fn format_timestamp(ts: Option<NaiveDateTime>) -> Option<String> {
    ts.map(|t| t.format("%d/%m/%Y, %H:%M").to_string())
}

/// Trimmed value, or `fallback` when blank
pub(crate) fn or_default(value: &str, fallback: &str) -> String {
    let v = value.trim();
    let chosen = if v.is_empty() { fallback } else { v };
    chosen.to_string()
}

pub(crate) fn format_print_document(
    session: &LoadingSession,
    profile: &CompanyProfile,
    totals: &ChallanTotals,
) -> PrintDocument {
    let mut blocks = vec![PrintBlock::Header(header_block(session, profile))];

    let primary = match session.active_items() {
        LoadingItems::Regular(items) => TableBlock {
            kind: TableKind::RegularItems,
            columns: TableKind::RegularItems.columns().to_vec(),
            rows: items
                .iter()
                .enumerate()
                .map(|(i, item)| {
                    vec![
                        (i + 1).to_string(),
                        item.description(),
                        or_default(&item.pack_per_ctn, ""),
                        or_default(&item.total_ctn, ""),
                        or_default(&item.avg_weight_kg, NOT_AVAILABLE),
                    ]
                })
                .collect(),
            footer: totals.primary.footer_cells(),
        },
        LoadingItems::Grade(items) => TableBlock {
            kind: TableKind::GradeItems,
            columns: TableKind::GradeItems.columns().to_vec(),
            rows: items
                .iter()
                .enumerate()
                .map(|(i, item)| {
                    vec![
                        (i + 1).to_string(),
                        item.grade.map(|g| g.label().to_string()).unwrap_or_default(),
                        or_default(&item.bags, "0"),
                        or_default(&item.kgs, "0"),
                    ]
                })
                .collect(),
            footer: totals.primary.footer_cells(),
        },
    };
    blocks.push(PrintBlock::Table(primary));

    if let Some(poly) = &totals.poly {
        blocks.push(PrintBlock::Table(TableBlock {
            kind: TableKind::PolyItems,
            columns: TableKind::PolyItems.columns().to_vec(),
            rows: poly
                .rows
                .iter()
                .enumerate()
                .map(|(i, p)| {
                    vec![
                        (i + 1).to_string(),
                        p.name.trim().to_string(),
                        p.size.trim().to_string(),
                        or_default(&p.kgs, "0"),
                    ]
                })
                .collect(),
            footer: poly.footer_cells(),
        }));
    }

    blocks.push(PrintBlock::Signature(SignatureBlock {
        label: SIGNATURE_LABEL.to_string(),
    }));

    PrintDocument {
        file_name: challan_file_name(&session.header.challan_no, "", "pdf"),
        blocks,
    }
}

fn header_block(session: &LoadingSession, profile: &CompanyProfile) -> HeaderBlock {
    let h = &session.header;
    let origin = ship_from(session, profile);

    let mut left = vec![
        HeaderField::new("Ship From", or_default(origin, NOT_AVAILABLE)),
        HeaderField::new("Dispatch To", or_default(&h.dispatch_to, NOT_AVAILABLE)),
        HeaderField::new("Vehicle No", or_default(&h.vehicle_no, NOT_AVAILABLE)),
        HeaderField::new("Driver Name", or_default(&h.driver_name, NOT_AVAILABLE)),
        HeaderField::new("Driver Phone", or_default(&h.driver_no, NOT_AVAILABLE)),
        HeaderField::new("Transporter", or_default(&h.transporter_name, NOT_AVAILABLE)),
        HeaderField::new("LR No", or_default(&h.lr_no, NOT_AVAILABLE)),
    ];
    if h.vehicle_in.is_some() || h.vehicle_out.is_some() {
        let stamp = |ts| format_timestamp(ts).unwrap_or_else(|| NOT_AVAILABLE.to_string());
        left.push(HeaderField::new("Vehicle In", stamp(h.vehicle_in)));
        left.push(HeaderField::new("Vehicle Out", stamp(h.vehicle_out)));
    }

    let right = vec![
        HeaderField::new("Challan No", or_default(&h.challan_no, NOT_AVAILABLE)),
        HeaderField::new(
            "Dispatch Date",
            format_date(h.date).unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        ),
        HeaderField::new("Loading Type", session.loading_type.label()),
    ];

    HeaderBlock {
        organization: profile.name.trim().to_string(),
        address: origin.to_string(),
        title: DOCUMENT_TITLE.to_string(),
        left,
        right,
    }
}

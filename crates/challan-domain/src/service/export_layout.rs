//! Flat export table assembly

use super::print_layout::{format_timestamp, or_default, DOCUMENT_TITLE};
use super::projector::{challan_file_name, ship_from, DRAFT_EXPORT_STEM};
use super::totals::ChallanTotals;
use crate::model::{CompanyProfile, ExportTable, LoadingItems, LoadingSession, TableKind};

fn pair(label: &str, value: impl Into<String>) -> Vec<String> {
    vec![label.to_string(), value.into()]
}

pub(crate) fn format_export_table(
    session: &LoadingSession,
    profile: &CompanyProfile,
    totals: &ChallanTotals,
) -> ExportTable {
    let h = &session.header;
    let mut rows = vec![
        vec![DOCUMENT_TITLE.to_string()],
        pair("Ship From", ship_from(session, profile)),
        pair("Challan No.", h.challan_no.trim()),
        pair(
            "Dispatch Date",
            h.date.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default(),
        ),
        pair("Dispatch To", h.dispatch_to.trim()),
        pair("Vehicle No.", h.vehicle_no.trim()),
        pair("Driver Name", h.driver_name.trim()),
        pair("Driver Phone", h.driver_no.trim()),
        pair("Transporter Name", h.transporter_name.trim()),
        pair("LR No.", h.lr_no.trim()),
        pair("Loading Type", session.loading_type.label()),
        pair(
            "Vehicle In (Date & Time)",
            format_timestamp(h.vehicle_in).unwrap_or_default(),
        ),
        pair(
            "Vehicle Out (Date & Time)",
            format_timestamp(h.vehicle_out).unwrap_or_default(),
        ),
        Vec::new(),
    ];

    match session.active_items() {
        LoadingItems::Regular(items) => {
            rows.push(TableKind::RegularItems.header_row());
            rows.extend(items.iter().enumerate().map(|(i, item)| {
                vec![
                    (i + 1).to_string(),
                    item.description(),
                    or_default(&item.pack_per_ctn, ""),
                    or_default(&item.total_ctn, ""),
                    or_default(&item.avg_weight_kg, ""),
                ]
            }));
        }
        LoadingItems::Grade(items) => {
            rows.push(TableKind::GradeItems.header_row());
            rows.extend(items.iter().enumerate().map(|(i, item)| {
                vec![
                    (i + 1).to_string(),
                    item.grade.map(|g| g.label().to_string()).unwrap_or_default(),
                    or_default(&item.bags, "0"),
                    or_default(&item.kgs, "0"),
                ]
            }));
        }
    }
    rows.push(totals.primary.footer_cells());

    if let Some(poly) = &totals.poly {
        rows.push(Vec::new());
        rows.push(TableKind::PolyItems.header_row());
        rows.extend(poly.rows.iter().enumerate().map(|(i, p)| {
            vec![
                (i + 1).to_string(),
                p.name.trim().to_string(),
                p.size.trim().to_string(),
                or_default(&p.kgs, "0"),
            ]
        }));
        rows.push(poly.footer_cells());
    }

    ExportTable {
        file_name: challan_file_name(&h.challan_no, DRAFT_EXPORT_STEM, "csv"),
        rows,
    }
}

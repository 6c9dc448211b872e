//! Challan projector: loading session -> print document + export table
//!
//! Totals are computed once and handed by reference to both formatters, so
//! the two outputs cannot disagree.

use tracing::debug;

use challan_types::{RequiredField, ValidationError};

use super::export_layout::format_export_table;
use super::print_layout::format_print_document;
use super::totals::compute_totals;
use crate::model::{Challan, CompanyProfile, ExportTable, LoadingSession};

/// File stem used by the export path when the challan number is blank
pub const DRAFT_EXPORT_STEM: &str = "export";

/// Check the fields a printed challan cannot go without
pub fn validate(session: &LoadingSession) -> Result<(), ValidationError> {
    let header = &session.header;
    let missing: Vec<RequiredField> = [
        (RequiredField::ChallanNo, &header.challan_no),
        (RequiredField::VehicleNo, &header.vehicle_no),
    ]
    .into_iter()
    .filter(|(_, value)| value.trim().is_empty())
    .map(|(field, _)| field)
    .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::MissingRequiredField(missing))
    }
}

/// Project a session into both challan renderings.
///
/// Fails only when the challan number or vehicle number is blank; malformed
/// quantities are read as zero.
pub fn project(session: &LoadingSession, profile: &CompanyProfile) -> Result<Challan, ValidationError> {
    validate(session)?;

    let totals = compute_totals(session);
    let print = format_print_document(session, profile, &totals);
    let export = format_export_table(session, profile, &totals);
    debug!(
        challan_no = %session.header.challan_no.trim(),
        tables = print.tables().count(),
        export_rows = export.rows.len(),
        "challan projected"
    );

    Ok(Challan {
        totals,
        print,
        export,
    })
}

/// Export table for a session that may still be a draft.
///
/// Unlike [`project`] this is not gated by required fields; a blank challan
/// number gives `CHALLAN_export.csv`.
pub fn export_draft(session: &LoadingSession, profile: &CompanyProfile) -> ExportTable {
    let totals = compute_totals(session);
    format_export_table(session, profile, &totals)
}

/// "Ship From" value: the session's origin, else the company address
pub(crate) fn ship_from<'a>(session: &'a LoadingSession, profile: &'a CompanyProfile) -> &'a str {
    let from = session.header.dispatch_from.trim();
    if from.is_empty() {
        profile.address.trim()
    } else {
        from
    }
}

/// `CHALLAN_<no>.<ext>`; path separators in the number are replaced
pub(crate) fn challan_file_name(challan_no: &str, fallback: &str, extension: &str) -> String {
    let number = challan_no.trim();
    let stem = if number.is_empty() { fallback } else { number };
    let safe: String = stem
        .chars()
        .map(|c| if matches!(c, '/' | '\\') { '-' } else { c })
        .collect();
    format!("CHALLAN_{}.{}", safe, extension)
}

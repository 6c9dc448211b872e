//! Loading summary of a session draft

use chrono::NaiveDate;
use serde::Serialize;

use challan_domain::model::{LoadingSession, LoadingType};
use challan_domain::service::{compute_totals, validate, ChallanTotals};
use challan_types::ValidationError;

/// Header facts, totals and readiness of one loading
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadingSummary {
    pub challan_no: String,
    pub date: Option<NaiveDate>,
    pub dispatch_from: String,
    pub dispatch_to: String,
    pub vehicle_no: String,
    pub loading_type: LoadingType,
    /// Rows in the active item list
    pub item_rows: usize,
    /// Poly rows that make it onto the challan
    pub poly_rows: usize,
    pub totals: ChallanTotals,
    /// Labels of required fields still blank; empty when printable
    pub missing: Vec<String>,
}

impl LoadingSummary {
    pub fn is_printable(&self) -> bool {
        self.missing.is_empty()
    }
}

pub fn summarize(session: &LoadingSession) -> LoadingSummary {
    let header = &session.header;
    let missing = match validate(session) {
        Ok(()) => Vec::new(),
        Err(ValidationError::MissingRequiredField(fields)) => {
            fields.iter().map(|f| f.label().to_string()).collect()
        }
    };

    let totals = compute_totals(session);
    LoadingSummary {
        challan_no: header.challan_no.trim().to_string(),
        date: header.date,
        dispatch_from: header.dispatch_from.trim().to_string(),
        dispatch_to: header.dispatch_to.trim().to_string(),
        vehicle_no: header.vehicle_no.trim().to_string(),
        loading_type: session.loading_type,
        item_rows: session.active_items().len(),
        poly_rows: totals.poly.as_ref().map_or(0, |p| p.rows.len()),
        totals,
        missing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use challan_domain::model::{ItemField, ItemKind};
    use challan_domain::service::PrimaryTotals;

    #[test]
    fn test_summary_of_grade_draft() {
        let mut s = LoadingSession::new("Ranala", NaiveDate::from_ymd_opt(2026, 1, 25).unwrap());
        s.header.challan_no = " CH-009 ".to_string();
        s.set_loading_type(LoadingType::Grade);
        s.update_item(ItemKind::Grade, 0, ItemField::Grade, "A");
        s.update_item(ItemKind::Grade, 0, ItemField::Bags, "40");
        s.update_item(ItemKind::Grade, 0, ItemField::Kgs, "1000");

        let summary = summarize(&s);
        assert_eq!(summary.challan_no, "CH-009");
        assert_eq!(summary.item_rows, 1);
        // the untouched poly row is left off the challan
        assert_eq!(summary.poly_rows, 0);
        assert_eq!(summary.totals.poly, None);
        assert_eq!(
            summary.totals.primary,
            PrimaryTotals::Grade {
                total_bags: 40.0,
                total_kgs: 1000.0
            }
        );
        assert_eq!(summary.missing, vec!["Vehicle No".to_string()]);
        assert!(!summary.is_printable());
    }

    #[test]
    fn test_poly_rows_count_included_rows_only() {
        let mut s = LoadingSession::new("Ranala", NaiveDate::from_ymd_opt(2026, 1, 25).unwrap());
        s.update_item(ItemKind::Poly, 0, ItemField::Name, "Outer Poly");
        s.add_item(ItemKind::Poly);
        let i = s.add_item(ItemKind::Poly);
        s.update_item(ItemKind::Poly, i, ItemField::Kgs, "5");

        let summary = summarize(&s);
        assert_eq!(summary.poly_rows, 2);
        assert_eq!(summary.totals.poly.map(|p| p.total_kgs), Some(5.0));
    }
}

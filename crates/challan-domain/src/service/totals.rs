//! Aggregate totals of a loading session
//!
//! This is the only place row quantities are summed. The print document, the
//! export table and the on-screen summary all read the same `ChallanTotals`.

use serde::Serialize;

use super::numeric::{format_quantity, parse_numeric_or_zero};
use crate::model::{LoadingItems, LoadingSession, PolyItem};

pub const GRAND_TOTAL_LABEL: &str = "GRAND TOTAL";
pub const POLY_TOTAL_LABEL: &str = "TOTAL POLY KGs";

/// Marker printed when an aggregate is not available
pub const NOT_AVAILABLE: &str = "-";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "mode", rename_all = "camelCase")]
pub enum PrimaryTotals {
    #[serde(rename_all = "camelCase")]
    Regular {
        total_cartons: f64,
        /// Sum of cartons x average weight; `None` unless strictly positive
        estimated_weight_kg: Option<f64>,
    },
    #[serde(rename_all = "camelCase")]
    Grade { total_bags: f64, total_kgs: f64 },
}

impl PrimaryTotals {
    /// Footer row of the primary item table
    pub fn footer_cells(&self) -> Vec<String> {
        match self {
            PrimaryTotals::Regular {
                total_cartons,
                estimated_weight_kg,
            } => vec![
                String::new(),
                GRAND_TOTAL_LABEL.to_string(),
                String::new(),
                format_quantity(*total_cartons),
                estimated_weight_kg
                    .map(|kg| format!("{} KG", format_quantity(kg)))
                    .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            ],
            PrimaryTotals::Grade {
                total_bags,
                total_kgs,
            } => vec![
                String::new(),
                GRAND_TOTAL_LABEL.to_string(),
                format_quantity(*total_bags),
                format_quantity(*total_kgs),
            ],
        }
    }
}

/// Poly rows that made it onto the challan, and their weight
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PolyTotals {
    pub rows: Vec<PolyItem>,
    pub total_kgs: f64,
}

impl PolyTotals {
    pub fn footer_cells(&self) -> Vec<String> {
        vec![
            String::new(),
            POLY_TOTAL_LABEL.to_string(),
            String::new(),
            format_quantity(self.total_kgs),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChallanTotals {
    pub primary: PrimaryTotals,
    pub poly: Option<PolyTotals>,
}

/// A poly row is printed when it has a name, a size or a positive weight
pub fn is_poly_row_included(item: &PolyItem) -> bool {
    !item.name.trim().is_empty()
        || !item.size.trim().is_empty()
        || parse_numeric_or_zero(&item.kgs) > 0.0
}

pub fn compute_totals(session: &LoadingSession) -> ChallanTotals {
    let primary = match session.active_items() {
        LoadingItems::Regular(items) => {
            let (total_cartons, estimated) = items.iter().fold((0.0, 0.0), |(ctn, kg), item| {
                let cartons = parse_numeric_or_zero(&item.total_ctn);
                (
                    ctn + cartons,
                    kg + cartons * parse_numeric_or_zero(&item.avg_weight_kg),
                )
            });
            PrimaryTotals::Regular {
                total_cartons,
                estimated_weight_kg: (estimated > 0.0).then_some(estimated),
            }
        }
        LoadingItems::Grade(items) => PrimaryTotals::Grade {
            total_bags: items.iter().map(|i| parse_numeric_or_zero(&i.bags)).sum(),
            total_kgs: items.iter().map(|i| parse_numeric_or_zero(&i.kgs)).sum(),
        },
    };

    let rows: Vec<PolyItem> = session
        .poly_items
        .iter()
        .filter(|p| is_poly_row_included(p))
        .cloned()
        .collect();
    let poly = if rows.is_empty() {
        None
    } else {
        let total_kgs = rows.iter().map(|p| parse_numeric_or_zero(&p.kgs)).sum();
        Some(PolyTotals { rows, total_kgs })
    };

    ChallanTotals { primary, poly }
}

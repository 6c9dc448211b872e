//! Domain services

mod export_layout;
mod print_layout;

pub mod numeric;
pub mod projector;
pub mod totals;

pub use numeric::{format_quantity, parse_numeric_or_zero};
pub use print_layout::{DOCUMENT_TITLE, SIGNATURE_LABEL};
pub use projector::{export_draft, project, validate};
pub use totals::{compute_totals, is_poly_row_included, ChallanTotals, PolyTotals, PrimaryTotals};

//! Domain model types

pub mod challan;
pub mod items;
pub mod loading_session;

pub use challan::{
    Align, Challan, Column, CompanyProfile, ExportTable, HeaderBlock, HeaderField, PrintBlock,
    PrintDocument, SignatureBlock, TableBlock, TableKind,
};
pub use items::{Grade, GradeItem, ItemField, ItemKind, PolyItem, RegularItem};
pub use loading_session::{
    parse_form_datetime, LoadingHeader, LoadingItems, LoadingSession, LoadingType,
};

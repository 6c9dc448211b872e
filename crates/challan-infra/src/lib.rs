//! Infrastructure layer - session draft files and challan output writers

pub mod csv_writer;
pub mod pdf_renderer;
pub mod persistence;
pub mod xlsx_writer;

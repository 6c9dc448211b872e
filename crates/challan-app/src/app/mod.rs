//! Application Layer
//!
//! Use cases the CLI drives:
//! - `dispatch_service`: print and export a challan
//! - `summary_service`: loading summary of a session draft

pub mod dispatch_service;
pub mod summary_service;

pub use dispatch_service::{DispatchService, OutputOutcome, PrintReport};
pub use summary_service::{summarize, LoadingSummary};

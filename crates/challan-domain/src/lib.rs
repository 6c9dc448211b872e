//! Domain layer for the loading challan console
//!
//! Holds the loading session model and the pure projection of a session into
//! its printable document and flat export table.

pub mod model;
pub mod repository;
pub mod service;

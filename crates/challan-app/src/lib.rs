//! Application service layer - config, logging, draft storage, dispatch outputs

pub mod app;
pub mod config;
pub mod logging;
pub mod repository;

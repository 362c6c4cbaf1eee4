//! Turnover analyzer - composition change between consecutive snapshots.

mod turnover_model;
mod turnover_service;

pub use turnover_model::*;
pub use turnover_service::*;

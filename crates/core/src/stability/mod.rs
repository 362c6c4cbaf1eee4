//! Asset stability classifier - core / stable / volatile tiers.

mod stability_model;
mod stability_service;

pub use stability_model::*;
pub use stability_service::*;

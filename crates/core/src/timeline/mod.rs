//! Timeline query engine - point-in-time composition over sparse snapshots.

mod timeline_model;
mod timeline_service;

pub use timeline_model::*;
pub use timeline_service::*;

//! Uniscope Core - temporal universe analytics.
//!
//! Pure, synchronous computation over immutable snapshot sequences:
//! point-in-time composition resolution, turnover analysis, and asset
//! stability classification. Snapshot retrieval is defined as a trait here
//! and implemented by the `uniscope-connect` crate.

pub mod constants;
pub mod errors;
pub mod import;
pub mod stability;
pub mod timeline;
pub mod turnover;
pub mod universes;

// Re-export common types from the domain modules
pub use stability::*;
pub use timeline::*;
pub use turnover::*;
pub use universes::*;

// Re-export error types
pub use errors::Error;
pub use errors::Result;

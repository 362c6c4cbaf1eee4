//! Provider traits for universe snapshots.

use async_trait::async_trait;

use super::{TimelineQuery, TimelineResponse};
use crate::errors::Result;

/// Read-only access to the external snapshot retrieval API.
///
/// The core never issues writes back to this collaborator; implementations
/// live outside this crate (the connect crate provides the HTTP one).
#[async_trait]
pub trait SnapshotProviderTrait: Send + Sync {
    /// Fetch the snapshot timeline for a universe over a date range.
    async fn get_timeline(&self, query: &TimelineQuery) -> Result<TimelineResponse>;
}

//! View models produced by timeline queries.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::turnover::TurnoverAnalysis;
use crate::universes::{TimelineStatistics, UniverseSnapshot};

/// Result of resolving universe composition as of an arbitrary date.
///
/// When no snapshot exists on the requested date, the nearest prior snapshot
/// is returned with `is_exact_match = false` and `as_of_date` reporting its
/// actual date, so callers can disclose "nearest snapshot" semantics.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AsOfResolution {
    pub snapshot: UniverseSnapshot,
    /// The actual date of the resolved snapshot.
    pub as_of_date: NaiveDate,
    pub is_exact_match: bool,
}

/// A fetched, range-filtered timeline with its derived analysis.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UniverseTimeline {
    pub universe_id: String,
    /// Snapshots in ascending date order.
    pub snapshots: Vec<UniverseSnapshot>,
    pub total_snapshots: usize,
    #[serde(default)]
    pub period_start: Option<NaiveDate>,
    #[serde(default)]
    pub period_end: Option<NaiveDate>,
    #[serde(default)]
    pub avg_turnover_rate: Option<Decimal>,
    #[serde(default)]
    pub statistics: Option<TimelineStatistics>,
    /// `None` when fewer than two snapshots fell inside the window or the
    /// caller did not request analysis; the UI renders an explicit empty
    /// state in that case.
    #[serde(default)]
    pub analysis: Option<TurnoverAnalysis>,
}

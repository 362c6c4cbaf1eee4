//! Timeline query engine - as-of-date resolution and range filtering over
//! sparse, irregularly dated snapshot sequences.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use log::debug;

use crate::errors::{AnalysisError, Result, TimelineError};
use crate::turnover::{self, AnalysisConfig};
use crate::universes::{
    DateRange, SnapshotProviderTrait, TimelineQuery, UniverseSnapshot,
};

use super::{AsOfResolution, UniverseTimeline};

/// Returns the input snapshots sorted ascending by date, rejecting
/// duplicate dates. The input sequence is never mutated.
fn sort_chronologically(
    snapshots: &[UniverseSnapshot],
) -> std::result::Result<Vec<&UniverseSnapshot>, TimelineError> {
    let mut sorted: Vec<&UniverseSnapshot> = snapshots.iter().collect();
    sorted.sort_by_key(|s| s.snapshot_date);
    for pair in sorted.windows(2) {
        if pair[0].snapshot_date == pair[1].snapshot_date {
            return Err(TimelineError::DuplicateSnapshotDate(pair[0].snapshot_date));
        }
    }
    Ok(sorted)
}

/// Resolves universe composition as of `target_date`.
///
/// Picks the snapshot with the latest date on or before the target. An exact
/// date match is flagged; a target earlier than every snapshot signals
/// [`TimelineError::NoDataBeforeDate`]. Deterministic for identical inputs.
pub fn resolve_as_of(
    snapshots: &[UniverseSnapshot],
    target_date: NaiveDate,
) -> std::result::Result<AsOfResolution, TimelineError> {
    let sorted = sort_chronologically(snapshots)?;
    let earliest = sorted.first().ok_or(TimelineError::NoSnapshots)?;

    let resolved = sorted
        .iter()
        .rev()
        .find(|s| s.snapshot_date <= target_date)
        .ok_or(TimelineError::NoDataBeforeDate {
            target: target_date,
            earliest: earliest.snapshot_date,
        })?;

    Ok(AsOfResolution {
        as_of_date: resolved.snapshot_date,
        is_exact_match: resolved.snapshot_date == target_date,
        snapshot: (*resolved).clone(),
    })
}

/// Filters snapshots to the inclusive `[start, end]` window, sorted
/// ascending. When `max_count` is given, only the most recent `max_count`
/// snapshots are kept (still returned in ascending order).
pub fn filter_by_range(
    snapshots: &[UniverseSnapshot],
    range: &DateRange,
    max_count: Option<usize>,
) -> Vec<UniverseSnapshot> {
    let mut filtered: Vec<UniverseSnapshot> = snapshots
        .iter()
        .filter(|s| range.contains(s.snapshot_date))
        .cloned()
        .collect();
    filtered.sort_by_key(|s| s.snapshot_date);

    if let Some(max) = max_count {
        if filtered.len() > max {
            filtered.drain(..filtered.len() - max);
        }
    }
    filtered
}

/// Trait for the timeline service.
#[async_trait]
pub trait TimelineServiceTrait: Send + Sync {
    /// Fetches a universe's snapshot timeline and derives turnover analysis
    /// when the window holds enough data.
    async fn get_universe_timeline(&self, query: &TimelineQuery) -> Result<UniverseTimeline>;

    /// Resolves the universe composition as of an arbitrary date.
    async fn get_composition_as_of(
        &self,
        universe_id: &str,
        target_date: NaiveDate,
    ) -> Result<AsOfResolution>;
}

/// Service composing the snapshot provider with the pure analytics.
pub struct TimelineService {
    provider: Arc<dyn SnapshotProviderTrait>,
    config: AnalysisConfig,
}

impl TimelineService {
    pub fn new(provider: Arc<dyn SnapshotProviderTrait>, config: AnalysisConfig) -> Self {
        Self { provider, config }
    }
}

#[async_trait]
impl TimelineServiceTrait for TimelineService {
    async fn get_universe_timeline(&self, query: &TimelineQuery) -> Result<UniverseTimeline> {
        let response = self.provider.get_timeline(query).await?;
        debug!(
            "Fetched {} snapshots for universe {} ({} total upstream)",
            response.snapshots.len(),
            query.universe_id,
            response.total_snapshots
        );

        // Providers are expected to pre-filter, but the window is enforced
        // client-side so the analysis never sees out-of-range snapshots.
        let snapshots = filter_by_range(&response.snapshots, &query.date_range, None);

        let analysis = if query.include_turnover_analysis {
            match turnover::analyze(&snapshots, &self.config) {
                Ok(analysis) => Some(analysis),
                Err(AnalysisError::InsufficientData { required, actual }) => {
                    debug!(
                        "Skipping turnover analysis for universe {}: {} of {} required snapshots",
                        query.universe_id, actual, required
                    );
                    None
                }
                Err(err) => return Err(err.into()),
            }
        } else {
            None
        };

        Ok(UniverseTimeline {
            universe_id: query.universe_id.clone(),
            snapshots,
            total_snapshots: response.total_snapshots,
            period_start: response.period_start,
            period_end: response.period_end,
            avg_turnover_rate: response.avg_turnover_rate,
            statistics: response.timeline_statistics,
            analysis,
        })
    }

    async fn get_composition_as_of(
        &self,
        universe_id: &str,
        target_date: NaiveDate,
    ) -> Result<AsOfResolution> {
        // Open-ended lower bound: nearest-prior resolution may need a
        // snapshot far older than any display window.
        let range = DateRange::new(NaiveDate::MIN, target_date)?;
        let mut query = TimelineQuery::new(universe_id, range);
        query.include_turnover_analysis = false;

        let response = self.provider.get_timeline(&query).await?;
        Ok(resolve_as_of(&response.snapshots, target_date)?)
    }
}

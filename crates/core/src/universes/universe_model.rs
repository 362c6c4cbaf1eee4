//! Universe snapshot domain models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::errors::{Result, ValidationError};

/// A single constituent of a universe at one point in time.
///
/// Owned by exactly one snapshot; assets carry no identity across snapshots
/// beyond symbol string equality.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AssetComposition {
    /// Unique key within a snapshot.
    pub symbol: String,
    pub name: String,
    #[serde(default)]
    pub sector: Option<String>,
    #[serde(default)]
    pub market_cap: Option<Decimal>,
    #[serde(default)]
    pub weight: Option<Decimal>,
    /// Free-text reason recorded when the asset entered the universe.
    #[serde(default)]
    pub reason_added: Option<String>,
}

impl AssetComposition {
    /// Builds a minimal composition from a bare symbol, as CSV imports do.
    pub fn from_symbol(symbol: impl Into<String>) -> Self {
        let symbol = symbol.into();
        Self {
            name: symbol.clone(),
            symbol,
            sector: None,
            market_cap: None,
            weight: None,
            reason_added: None,
        }
    }
}

/// The full composition of a universe at one calendar date.
///
/// Created externally by a screening or rebalancing process; immutable once
/// fetched. Snapshots for a given universe are totally ordered by
/// `snapshot_date` and no two share a date.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UniverseSnapshot {
    pub id: String,
    pub universe_id: String,
    pub snapshot_date: NaiveDate,
    #[serde(default)]
    pub assets: Vec<AssetComposition>,

    /// Precomputed two-sided turnover vs. the prior snapshot, in [0, 1].
    /// `None` on the first snapshot of a sequence or when the baseline was
    /// empty.
    #[serde(default)]
    pub turnover_rate: Option<Decimal>,

    /// Precomputed symbol deltas vs. the prior snapshot.
    #[serde(default)]
    pub assets_added: Option<Vec<String>>,
    #[serde(default)]
    pub assets_removed: Option<Vec<String>>,
}

impl UniverseSnapshot {
    /// The set of constituent symbols at this date.
    pub fn symbol_set(&self) -> HashSet<&str> {
        self.assets.iter().map(|a| a.symbol.as_str()).collect()
    }

    pub fn contains_symbol(&self, symbol: &str) -> bool {
        self.assets.iter().any(|a| a.symbol == symbol)
    }

    pub fn asset_count(&self) -> usize {
        self.assets.len()
    }
}

/// Inclusive calendar-date bounds for snapshot queries.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl DateRange {
    /// Builds a range, rejecting `start > end`.
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Result<Self> {
        if start_date > end_date {
            return Err(ValidationError::InvalidDateRange {
                start: start_date,
                end: end_date,
            }
            .into());
        }
        Ok(Self {
            start_date,
            end_date,
        })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }
}

/// Frequency hint passed to the snapshot retrieval API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SnapshotFrequency {
    Daily,
    Weekly,
    #[default]
    Monthly,
    Quarterly,
}

impl SnapshotFrequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            SnapshotFrequency::Daily => "daily",
            SnapshotFrequency::Weekly => "weekly",
            SnapshotFrequency::Monthly => "monthly",
            SnapshotFrequency::Quarterly => "quarterly",
        }
    }
}

/// Parameters for one snapshot-timeline fetch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TimelineQuery {
    pub universe_id: String,
    pub date_range: DateRange,
    #[serde(default)]
    pub frequency: SnapshotFrequency,
    #[serde(default)]
    pub show_empty_periods: bool,
    #[serde(default)]
    pub include_turnover_analysis: bool,
}

impl TimelineQuery {
    pub fn new(universe_id: impl Into<String>, date_range: DateRange) -> Self {
        Self {
            universe_id: universe_id.into(),
            date_range,
            frequency: SnapshotFrequency::default(),
            show_empty_periods: false,
            include_turnover_analysis: true,
        }
    }
}

/// Aggregate statistics the provider reports alongside a timeline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TimelineStatistics {
    pub min_asset_count: usize,
    pub max_asset_count: usize,
    pub avg_asset_count: Decimal,
    #[serde(default)]
    pub most_stable_assets: Vec<String>,
}

/// Response shape of the snapshot retrieval API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TimelineResponse {
    #[serde(default)]
    pub snapshots: Vec<UniverseSnapshot>,
    pub total_snapshots: usize,
    #[serde(default)]
    pub avg_turnover_rate: Option<Decimal>,
    #[serde(default)]
    pub period_start: Option<NaiveDate>,
    #[serde(default)]
    pub period_end: Option<NaiveDate>,
    #[serde(default)]
    pub timeline_statistics: Option<TimelineStatistics>,
}

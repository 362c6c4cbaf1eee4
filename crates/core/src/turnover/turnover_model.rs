//! Turnover analysis domain models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_CORE_HOLDING_THRESHOLD, DEFAULT_STABLE_ASSET_COUNT, DEFAULT_TREND_HYSTERESIS,
    DEFAULT_TREND_WINDOW,
};
use crate::errors::AnalysisError;
use crate::stability::AssetStability;

/// Composition change between one snapshot and its predecessor.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TurnoverPeriod {
    /// Date of the current (later) snapshot of the pair.
    pub date: NaiveDate,
    /// Two-sided turnover in [0, 1]. `None` marks a degenerate baseline
    /// (empty prior snapshot), where turnover is undefined rather than zero.
    pub turnover_rate: Option<Decimal>,
    /// Symbols entering the universe, alphabetical.
    pub assets_added: Vec<String>,
    /// Symbols leaving the universe, alphabetical.
    pub assets_removed: Vec<String>,
    /// Universe size after the change.
    pub total_assets: usize,
}

/// Direction of turnover over the analysis window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TurnoverTrend {
    Increasing,
    Decreasing,
    #[default]
    Stable,
}

/// Aggregate statistics over a window of turnover periods.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TurnoverSummary {
    pub average_turnover_rate: Decimal,
    /// Population standard deviation of the per-period rates.
    pub turnover_volatility: Decimal,
    pub turnover_trend: TurnoverTrend,
}

/// Full derived analysis for a snapshot window. Never persisted; a pure
/// function of its input snapshots, recomputed on demand.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TurnoverAnalysis {
    pub periods: Vec<TurnoverPeriod>,
    pub average_turnover_rate: Decimal,
    pub turnover_volatility: Decimal,
    pub turnover_trend: TurnoverTrend,
    pub asset_stability: AssetStability,
}

/// Tunable analysis thresholds.
///
/// The defaults mirror the values product currently ships with; they are
/// parameters, not invariants.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisConfig {
    /// Presence ratio above which an asset is a core holding, in (0, 1].
    pub core_holding_threshold: Decimal,
    /// Relative band around the older-window mean inside which the trend
    /// reads as stable.
    pub trend_hysteresis: Decimal,
    /// Periods per trend comparison sub-window.
    pub trend_window: usize,
    /// Length of the most-stable / most-volatile asset lists.
    pub stable_asset_count: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            core_holding_threshold: DEFAULT_CORE_HOLDING_THRESHOLD,
            trend_hysteresis: DEFAULT_TREND_HYSTERESIS,
            trend_window: DEFAULT_TREND_WINDOW,
            stable_asset_count: DEFAULT_STABLE_ASSET_COUNT,
        }
    }
}

impl AnalysisConfig {
    pub fn validate(&self) -> Result<(), AnalysisError> {
        if self.core_holding_threshold <= Decimal::ZERO
            || self.core_holding_threshold > Decimal::ONE
        {
            return Err(AnalysisError::InvalidConfig(format!(
                "core_holding_threshold must be in (0, 1], got {}",
                self.core_holding_threshold
            )));
        }
        if self.trend_hysteresis < Decimal::ZERO {
            return Err(AnalysisError::InvalidConfig(format!(
                "trend_hysteresis must be non-negative, got {}",
                self.trend_hysteresis
            )));
        }
        if self.trend_window == 0 {
            return Err(AnalysisError::InvalidConfig(
                "trend_window must be at least 1".to_string(),
            ));
        }
        if self.stable_asset_count == 0 {
            return Err(AnalysisError::InvalidConfig(
                "stable_asset_count must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

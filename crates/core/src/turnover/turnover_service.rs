//! Turnover analyzer - per-period composition deltas and windowed trend
//! statistics over chronological snapshot sequences.

use log::warn;
use rust_decimal::{Decimal, MathematicalOps};

use crate::constants::MIN_SNAPSHOTS_FOR_ANALYSIS;
use crate::errors::AnalysisError;
use crate::stability;
use crate::universes::UniverseSnapshot;

use super::{AnalysisConfig, TurnoverAnalysis, TurnoverPeriod, TurnoverSummary, TurnoverTrend};

type Result<T> = std::result::Result<T, AnalysisError>;

/// Symbol set differences between two snapshots, alphabetically sorted.
pub(crate) fn symbol_deltas(
    prior: &UniverseSnapshot,
    current: &UniverseSnapshot,
) -> (Vec<String>, Vec<String>) {
    let prior_set = prior.symbol_set();
    let current_set = current.symbol_set();

    let mut added: Vec<String> = current_set
        .difference(&prior_set)
        .map(|s| s.to_string())
        .collect();
    let mut removed: Vec<String> = prior_set
        .difference(&current_set)
        .map(|s| s.to_string())
        .collect();
    added.sort();
    removed.sort();
    (added, removed)
}

/// Two-sided turnover between two consecutive snapshots.
///
/// `rate = (|added| + |removed|) / (|prior| + |current|)` - the standard
/// two-sided convention, dividing by twice the average of the before and
/// after universe sizes so growth and shrinkage score symmetrically and the
/// rate stays within [0, 1]. An empty prior snapshot has no meaningful
/// turnover and signals [`AnalysisError::DegenerateBaseline`] instead of
/// zero.
pub fn compute_period_turnover(
    prior: &UniverseSnapshot,
    current: &UniverseSnapshot,
) -> Result<TurnoverPeriod> {
    if prior.snapshot_date >= current.snapshot_date {
        return Err(AnalysisError::NonChronologicalPair {
            prior: prior.snapshot_date,
            current: current.snapshot_date,
        });
    }
    if prior.assets.is_empty() {
        return Err(AnalysisError::DegenerateBaseline {
            date: prior.snapshot_date,
        });
    }

    let (added, removed) = symbol_deltas(prior, current);
    let changes = Decimal::from((added.len() + removed.len()) as u64);
    let rate = changes / Decimal::from((prior.assets.len() + current.assets.len()) as u64);

    Ok(TurnoverPeriod {
        date: current.snapshot_date,
        turnover_rate: Some(rate),
        assets_added: added,
        assets_removed: removed,
        total_assets: current.assets.len(),
    })
}

fn mean(values: &[Decimal]) -> Decimal {
    values.iter().sum::<Decimal>() / Decimal::from(values.len() as u64)
}

/// Aggregates a window of periods into mean, volatility, and trend.
///
/// Degenerate periods (no rate) are excluded from the statistics; a window
/// with no rated periods at all reports [`AnalysisError::InsufficientData`]
/// rather than fabricating zeros.
pub fn summarize(periods: &[TurnoverPeriod], config: &AnalysisConfig) -> Result<TurnoverSummary> {
    config.validate()?;

    let rates: Vec<Decimal> = periods.iter().filter_map(|p| p.turnover_rate).collect();
    if rates.is_empty() {
        return Err(AnalysisError::InsufficientData {
            required: 1,
            actual: 0,
        });
    }

    let average = mean(&rates);
    let variance = rates
        .iter()
        .map(|r| (*r - average) * (*r - average))
        .sum::<Decimal>()
        / Decimal::from(rates.len() as u64);
    let volatility = variance.sqrt().unwrap_or_default();

    Ok(TurnoverSummary {
        average_turnover_rate: average,
        turnover_volatility: volatility,
        turnover_trend: trend(&rates, config),
    })
}

/// Compares the mean of the most recent sub-window against the oldest one,
/// with a relative hysteresis band to keep noise from flapping the trend.
/// On short histories both windows shrink to `len / 2` so they never
/// overlap; a single rate is stable by definition.
fn trend(rates: &[Decimal], config: &AnalysisConfig) -> TurnoverTrend {
    if rates.len() < 2 {
        return TurnoverTrend::Stable;
    }
    let window = config.trend_window.min(rates.len() / 2).max(1);
    let older_mean = mean(&rates[..window]);
    let recent_mean = mean(&rates[rates.len() - window..]);

    if recent_mean > older_mean * (Decimal::ONE + config.trend_hysteresis) {
        TurnoverTrend::Increasing
    } else if recent_mean < older_mean * (Decimal::ONE - config.trend_hysteresis) {
        TurnoverTrend::Decreasing
    } else {
        TurnoverTrend::Stable
    }
}

/// Full turnover analysis over a snapshot window.
///
/// Requires at least two snapshots; the input sequence may arrive in any
/// order and is sorted chronologically before pairing. Duplicate dates in
/// one window violate the snapshot-store contract and fail the analysis.
pub fn analyze(
    snapshots: &[UniverseSnapshot],
    config: &AnalysisConfig,
) -> Result<TurnoverAnalysis> {
    config.validate()?;

    if snapshots.len() < MIN_SNAPSHOTS_FOR_ANALYSIS {
        return Err(AnalysisError::InsufficientData {
            required: MIN_SNAPSHOTS_FOR_ANALYSIS,
            actual: snapshots.len(),
        });
    }

    let mut sorted: Vec<&UniverseSnapshot> = snapshots.iter().collect();
    sorted.sort_by_key(|s| s.snapshot_date);
    for pair in sorted.windows(2) {
        if pair[0].snapshot_date == pair[1].snapshot_date {
            return Err(AnalysisError::DuplicateSnapshotDate(pair[0].snapshot_date));
        }
    }

    let mut periods = Vec::with_capacity(sorted.len() - 1);
    for pair in sorted.windows(2) {
        match compute_period_turnover(pair[0], pair[1]) {
            Ok(period) => periods.push(period),
            Err(AnalysisError::DegenerateBaseline { date }) => {
                warn!(
                    "Empty baseline snapshot dated {}; period turnover omitted",
                    date
                );
                let (added, removed) = symbol_deltas(pair[0], pair[1]);
                periods.push(TurnoverPeriod {
                    date: pair[1].snapshot_date,
                    turnover_rate: None,
                    assets_added: added,
                    assets_removed: removed,
                    total_assets: pair[1].assets.len(),
                });
            }
            Err(err) => return Err(err),
        }
    }

    let summary = summarize(&periods, config)?;
    let asset_stability = stability::classify(snapshots, config)?;

    Ok(TurnoverAnalysis {
        periods,
        average_turnover_rate: summary.average_turnover_rate,
        turnover_volatility: summary.turnover_volatility,
        turnover_trend: summary.turnover_trend,
        asset_stability,
    })
}

//! Asset stability classifier - presence-frequency buckets over a full
//! snapshot history.

use std::collections::{BTreeSet, HashSet};

use rust_decimal::Decimal;

use crate::constants::{MIN_SNAPSHOTS_FOR_ANALYSIS, MIN_VOLATILITY_TRANSITIONS};
use crate::errors::AnalysisError;
use crate::turnover::AnalysisConfig;
use crate::universes::UniverseSnapshot;

use super::AssetStability;

type Result<T> = std::result::Result<T, AnalysisError>;

/// Classifies every symbol ever observed into core / stable / volatile
/// buckets.
///
/// Core and stable rank by presence ratio. Volatile ranks by membership
/// transition count across consecutive snapshots, not by low presence
/// ratio: a symbol held for the recent half of the history and absent for
/// the older half is stable in a regime sense, while a symbol that keeps
/// entering and exiting is churn even at a 50% ratio. Ties break
/// alphabetically for determinism.
pub fn classify(
    snapshots: &[UniverseSnapshot],
    config: &AnalysisConfig,
) -> Result<AssetStability> {
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

    let memberships: Vec<HashSet<&str>> = sorted.iter().map(|s| s.symbol_set()).collect();
    let symbols: BTreeSet<&str> = memberships.iter().flatten().copied().collect();
    let total = Decimal::from(sorted.len() as u64);

    // (symbol, presence_ratio, transition_count)
    let mut observed: Vec<(String, Decimal, usize)> = symbols
        .into_iter()
        .map(|symbol| {
            let present: Vec<bool> = memberships.iter().map(|m| m.contains(symbol)).collect();
            let appearances = present.iter().filter(|p| **p).count();
            let transitions = present.windows(2).filter(|w| w[0] != w[1]).count();
            (
                symbol.to_string(),
                Decimal::from(appearances as u64) / total,
                transitions,
            )
        })
        .collect();

    observed.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    let core_holdings: Vec<String> = observed
        .iter()
        .filter(|(_, ratio, _)| *ratio > config.core_holding_threshold)
        .map(|(symbol, _, _)| symbol.clone())
        .collect();

    // Never truncate the stable list below the core set.
    let stable_count = config.stable_asset_count.max(core_holdings.len());
    let most_stable_assets: Vec<String> = observed
        .iter()
        .take(stable_count)
        .map(|(symbol, _, _)| symbol.clone())
        .collect();

    let mut churners: Vec<(&String, usize)> = observed
        .iter()
        .filter(|(_, _, transitions)| *transitions >= MIN_VOLATILITY_TRANSITIONS)
        .map(|(symbol, _, transitions)| (symbol, *transitions))
        .collect();
    churners.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    let most_volatile_assets: Vec<String> = churners
        .into_iter()
        .take(config.stable_asset_count)
        .map(|(symbol, _)| symbol.clone())
        .collect();

    Ok(AssetStability {
        core_holdings,
        most_stable_assets,
        most_volatile_assets,
    })
}

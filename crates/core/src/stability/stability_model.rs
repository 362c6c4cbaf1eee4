//! Asset stability domain models.

use serde::{Deserialize, Serialize};

/// Stability buckets derived from presence frequency across a snapshot
/// history. `core_holdings` is always a subset of `most_stable_assets`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct AssetStability {
    /// Symbols present in more than the core-holding share of snapshots.
    pub core_holdings: Vec<String>,
    /// Top symbols by presence ratio, core holdings included.
    pub most_stable_assets: Vec<String>,
    /// Symbols with the most membership churn (enter/exit transitions).
    pub most_volatile_assets: Vec<String>,
}

//! Property-based integration tests for the universe analytics core.
//!
//! These tests verify that universal properties hold across all valid
//! inputs, using the `proptest` crate for random test case generation.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;
use std::collections::HashSet;

use uniscope_core::stability::classify;
use uniscope_core::timeline::resolve_as_of;
use uniscope_core::turnover::{analyze, compute_period_turnover, AnalysisConfig};
use uniscope_core::universes::{AssetComposition, UniverseSnapshot};

const SYMBOL_POOL: [&str; 10] = [
    "AAPL", "AMZN", "GOOG", "JNJ", "JPM", "META", "MSFT", "NVDA", "TSLA", "XOM",
];

fn base_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
}

fn snapshot(index: usize, symbols: Vec<&'static str>) -> UniverseSnapshot {
    let snapshot_date = base_date() + chrono::Days::new((index * 30) as u64);
    UniverseSnapshot {
        id: format!("snap-{}", index),
        universe_id: "universe-1".to_string(),
        snapshot_date,
        assets: symbols
            .into_iter()
            .map(AssetComposition::from_symbol)
            .collect(),
        turnover_rate: None,
        assets_added: None,
        assets_removed: None,
    }
}

// =============================================================================
// Generators
// =============================================================================

/// Generates a random subset of the symbol pool.
fn arb_symbols(min: usize) -> impl Strategy<Value = Vec<&'static str>> {
    proptest::sample::subsequence(SYMBOL_POOL.to_vec(), min..=SYMBOL_POOL.len())
}

/// Generates a sequence of snapshots with distinct, ascending monthly dates.
fn arb_snapshots(min_count: usize) -> impl Strategy<Value = Vec<UniverseSnapshot>> {
    proptest::collection::vec(arb_symbols(0), min_count..10).prop_map(|sets| {
        sets.into_iter()
            .enumerate()
            .map(|(i, symbols)| snapshot(i, symbols))
            .collect()
    })
}

/// Generates a target date offset spanning before, inside, and after the
/// generated snapshot histories.
fn arb_target_date() -> impl Strategy<Value = NaiveDate> {
    (-60i64..400).prop_map(|offset| {
        if offset >= 0 {
            base_date() + chrono::Days::new(offset as u64)
        } else {
            base_date() - chrono::Days::new((-offset) as u64)
        }
    })
}

// =============================================================================
// Property Tests
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Resolving the same immutable inputs twice yields identical output.
    #[test]
    fn prop_resolve_as_of_is_idempotent(
        snapshots in arb_snapshots(1),
        target in arb_target_date(),
    ) {
        let first = resolve_as_of(&snapshots, target);
        let second = resolve_as_of(&snapshots, target);
        prop_assert_eq!(first, second);
    }

    /// For a fixed sequence, resolution is a non-decreasing step function of
    /// the target date: a later target never resolves to an earlier snapshot.
    #[test]
    fn prop_resolve_as_of_is_monotonic(
        snapshots in arb_snapshots(1),
        t1 in arb_target_date(),
        t2 in arb_target_date(),
    ) {
        let (earlier, later) = if t1 <= t2 { (t1, t2) } else { (t2, t1) };
        if let Ok(first) = resolve_as_of(&snapshots, earlier) {
            let second = resolve_as_of(&snapshots, later);
            prop_assert!(second.is_ok());
            prop_assert!(second.unwrap().as_of_date >= first.as_of_date);
        }
    }

    /// Non-degenerate turnover always lands in [0, 1].
    #[test]
    fn prop_turnover_rate_is_bounded(
        prior_symbols in arb_symbols(1),
        current_symbols in arb_symbols(0),
    ) {
        let prior = snapshot(0, prior_symbols);
        let current = snapshot(1, current_symbols);
        let period = compute_period_turnover(&prior, &current).unwrap();
        let rate = period.turnover_rate.unwrap();
        prop_assert!(rate >= Decimal::ZERO);
        prop_assert!(rate <= Decimal::ONE);
    }

    /// An asset can never be simultaneously added and removed.
    #[test]
    fn prop_added_and_removed_are_disjoint(
        prior_symbols in arb_symbols(1),
        current_symbols in arb_symbols(0),
    ) {
        let prior = snapshot(0, prior_symbols);
        let current = snapshot(1, current_symbols);
        let period = compute_period_turnover(&prior, &current).unwrap();

        let added: HashSet<&String> = period.assets_added.iter().collect();
        let removed: HashSet<&String> = period.assets_removed.iter().collect();
        prop_assert!(added.is_disjoint(&removed));
        for symbol in &period.assets_added {
            prop_assert!(current.contains_symbol(symbol));
            prop_assert!(!prior.contains_symbol(symbol));
        }
        for symbol in &period.assets_removed {
            prop_assert!(prior.contains_symbol(symbol));
            prop_assert!(!current.contains_symbol(symbol));
        }
    }

    /// Identical asset sets always score zero turnover.
    #[test]
    fn prop_identical_sets_score_zero(symbols in arb_symbols(1)) {
        let prior = snapshot(0, symbols.clone());
        let current = snapshot(1, symbols);
        let period = compute_period_turnover(&prior, &current).unwrap();
        prop_assert_eq!(period.turnover_rate, Some(Decimal::ZERO));
        prop_assert!(period.assets_added.is_empty());
        prop_assert!(period.assets_removed.is_empty());
    }

    /// Core holdings are always a subset of the most-stable list.
    #[test]
    fn prop_core_holdings_subset_of_most_stable(snapshots in arb_snapshots(2)) {
        let stability = classify(&snapshots, &AnalysisConfig::default()).unwrap();
        let stable: HashSet<&String> = stability.most_stable_assets.iter().collect();
        for symbol in &stability.core_holdings {
            prop_assert!(stable.contains(symbol));
        }
    }

    /// Analysis is a pure function: same window in, same analysis out, with
    /// one period per consecutive snapshot pair.
    #[test]
    fn prop_analyze_is_deterministic(snapshots in arb_snapshots(2)) {
        let config = AnalysisConfig::default();
        match (analyze(&snapshots, &config), analyze(&snapshots, &config)) {
            (Ok(first), Ok(second)) => {
                prop_assert_eq!(first.periods.len(), snapshots.len() - 1);
                prop_assert_eq!(first, second);
            }
            (Err(first), Err(second)) => prop_assert_eq!(first, second),
            (first, second) => {
                prop_assert!(false, "diverging outcomes: {:?} vs {:?}", first, second);
            }
        }
    }
}

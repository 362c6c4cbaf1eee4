use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Presence ratio above which an asset counts as a core holding
pub const DEFAULT_CORE_HOLDING_THRESHOLD: Decimal = dec!(0.80);

/// Hysteresis band applied when comparing trend sub-windows
pub const DEFAULT_TREND_HYSTERESIS: Decimal = dec!(0.10);

/// Number of periods in each trend comparison sub-window
pub const DEFAULT_TREND_WINDOW: usize = 3;

/// Size of the most-stable / most-volatile asset lists
pub const DEFAULT_STABLE_ASSET_COUNT: usize = 10;

/// Minimum snapshots required for turnover and stability analysis
pub const MIN_SNAPSHOTS_FOR_ANALYSIS: usize = 2;

/// Minimum membership transitions for an asset to rank as volatile
pub const MIN_VOLATILITY_TRANSITIONS: usize = 2;

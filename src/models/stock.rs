// ============================================================================
// Structure : StockEntry
// ============================================================================
// A tracked symbol paired with its fetched time series. Owned exclusively
// by the Watchlist; created on a successful fetch, removed on user delete,
// never mutated in place.
// ============================================================================

use crate::models::TimeSeries;

/// One watchlist entry.
#[derive(Debug, Clone, PartialEq)]
pub struct StockEntry {
    /// Ticker symbol, trimmed and uppercased (e.g. "AAPL").
    pub symbol: String,

    /// Fetched intraday series. `None` when the fetch has not resolved or
    /// failed; such an entry renders symbol-only.
    pub series: Option<TimeSeries>,
}

impl StockEntry {
    /// Creates an entry without data.
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            series: None,
        }
    }

    /// Creates an entry with a fetched series attached.
    pub fn with_series(symbol: impl Into<String>, series: TimeSeries) -> Self {
        Self {
            symbol: symbol.into(),
            series: Some(series),
        }
    }

    pub fn has_series(&self) -> bool {
        self.series.is_some()
    }
}

// ============================================================================
// Tests
// ============================================================================

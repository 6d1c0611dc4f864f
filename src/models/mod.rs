// ============================================================================
// Module : models
// ============================================================================
// Data structures: the raw time series, its chart-ready projection, and
// the watchlist entry pairing a symbol with its data.
// ============================================================================

pub mod chart_series;
pub mod stock;
pub mod time_series;

pub use chart_series::ChartSeries;
pub use stock::StockEntry;
pub use time_series::{FieldMap, TimeSeries, CLOSE_FIELD, OPEN_FIELD};

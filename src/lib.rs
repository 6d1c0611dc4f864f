// ============================================================================
// stockwatch - Library
// ============================================================================

pub mod api;    // Alpha Vantage quote fetcher
pub mod app;    // Application state
pub mod config; // Secrets file loading
pub mod error;  // Error taxonomy
pub mod models; // Data structures
pub mod store;  // Watchlist store with insert/remove events
pub mod ui;     // Terminal user interface

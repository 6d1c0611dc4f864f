// ============================================================================
// Module : api
// ============================================================================
// HTTP clients for external quote providers.
// ============================================================================

pub mod alphavantage;

pub use alphavantage::{build_client, fetch_time_series};

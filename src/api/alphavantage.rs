// ============================================================================
// API Client : Alpha Vantage
// ============================================================================
// Fetches intraday time-series data for one symbol per call. One GET per
// add action, no retries, no caching; a failed fetch is terminal for that
// action and the user re-adds the symbol.
// ============================================================================

use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, error, info, instrument};

use crate::error::FetchError;
use crate::models::TimeSeries;

/// Quotes API host.
pub const API_HOST: &str = "https://www.alphavantage.co";

/// Candle interval requested from the API.
pub const INTERVAL: &str = "5min";

/// Explicit request timeout. The API has no meaningful default; without a
/// bound a stalled connection would leave the add action hanging forever.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Response envelope for `TIME_SERIES_INTRADAY`.
///
/// The API reports symbol and rate-limit problems as HTTP 200 bodies with
/// an `Error Message` / `Note` key instead of the series container, so all
/// three keys are optional and checked after deserialization.
#[derive(Debug, Deserialize)]
struct IntradayResponse {
    #[serde(rename = "Time Series (5min)")]
    time_series: Option<TimeSeries>,

    #[serde(rename = "Error Message")]
    error_message: Option<String>,

    #[serde(rename = "Note")]
    note: Option<String>,
}

/// Builds the shared HTTP client used by the fetch worker.
pub fn build_client() -> Result<reqwest::Client, FetchError> {
    reqwest::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .user_agent(concat!("stockwatch/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(FetchError::Network)
}

/// Fetches the intraday time series for `symbol`.
///
/// Entry order in the returned series equals the JSON object's key order
/// (newest first as the API emits it).
#[instrument(skip(client, api_key))]
pub async fn fetch_time_series(
    client: &reqwest::Client,
    symbol: &str,
    api_key: &str,
) -> Result<TimeSeries, FetchError> {
    fetch_from(client, API_HOST, symbol, api_key).await
}

async fn fetch_from(
    client: &reqwest::Client,
    host: &str,
    symbol: &str,
    api_key: &str,
) -> Result<TimeSeries, FetchError> {
    let url = build_query_url(host, symbol, api_key);
    debug!("Sending intraday quote request");

    let response = client.get(&url).send().await.map_err(|e| {
        error!(error = %e, "Transport error reaching quotes API");
        FetchError::Network(e)
    })?;

    let status = response.status();
    debug!(status = %status, "Received HTTP response");

    if !status.is_success() {
        error!(status = %status, "Quotes API returned error status");
        return Err(FetchError::UnexpectedStatus(status));
    }

    let body = response.text().await.map_err(FetchError::Network)?;
    let series = parse_time_series(&body)?;

    info!(entries = series.len(), "Fetched intraday time series");
    Ok(series)
}

/// Builds the query URL for one symbol.
fn build_query_url(host: &str, symbol: &str, api_key: &str) -> String {
    format!(
        "{host}/query?function=TIME_SERIES_INTRADAY&symbol={symbol}&interval={INTERVAL}&apikey={api_key}"
    )
}

/// Parses a response body into a [`TimeSeries`].
///
/// A body that is not JSON, or that lacks the time-series container, is a
/// malformed response regardless of HTTP status.
fn parse_time_series(body: &str) -> Result<TimeSeries, FetchError> {
    let response: IntradayResponse = serde_json::from_str(body)
        .map_err(|e| FetchError::MalformedResponse(format!("invalid JSON: {e}")))?;

    if let Some(series) = response.time_series {
        return Ok(series);
    }

    // No container: prefer the API's own explanation when it gave one.
    let reason = response
        .error_message
        .or(response.note)
        .unwrap_or_else(|| format!("missing \"Time Series ({INTERVAL})\" key"));

    Err(FetchError::MalformedResponse(reason))
}

// ============================================================================
// Tests
// ============================================================================

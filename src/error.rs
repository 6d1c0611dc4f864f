// ============================================================================
// Error taxonomy
// ============================================================================
// Three failure families with different blast radii:
// - ConfigError    : secrets missing, fatal to fetch capability only
// - FetchError     : one add attempt fails, surfaced as a transient notice
// - TransformError : one row degrades to symbol-only, list keeps rendering
// ============================================================================

use std::path::PathBuf;

use reqwest::StatusCode;
use thiserror::Error;

/// Failure to load the API secrets at startup.
///
/// The process keeps running without fetch capability; every add attempt
/// surfaces this as a notice until the user provides a secrets file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read secrets file {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no `access_token` entry in {}", path.display())]
    MissingToken { path: PathBuf },
}

/// Failure of a single quote fetch. No retries; the user re-adds the symbol.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport-level failure: timeout, DNS, connection refused.
    #[error("network error reaching the quotes API")]
    Network(#[source] reqwest::Error),

    /// The API answered with a non-success HTTP status.
    #[error("quotes API returned HTTP {0}")]
    UnexpectedStatus(StatusCode),

    /// The body was not JSON, or the time-series container key is absent.
    #[error("malformed quotes response: {0}")]
    MalformedResponse(String),
}

/// Failure to turn a time series into chart points.
///
/// All-or-nothing: one bad entry fails the whole transformation, never a
/// partial series. The presenter degrades the row to symbol-only.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransformError {
    #[error("field `{field}` at {timestamp} is missing or not numeric")]
    FieldParse {
        timestamp: String,
        field: &'static str,
    },
}

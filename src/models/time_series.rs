// ============================================================================
// Structure : TimeSeries
// ============================================================================
// Intraday time series as returned by the quotes API: an ordered mapping
// from timestamp string to a record of named string-valued fields.
//
// The API emits newest-first; IndexMap preserves that order verbatim so
// chart point order always matches the response.
// ============================================================================

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Field name of the opening price in an intraday record.
pub const OPEN_FIELD: &str = "1. open";

/// Field name of the closing price in an intraday record.
pub const CLOSE_FIELD: &str = "4. close";

/// Named fields of a single time-series record, e.g. `"1. open" -> "185.5"`.
pub type FieldMap = IndexMap<String, String>;

/// Ordered timestamp → fields mapping for one symbol.
///
/// Values stay as strings exactly as the API sent them; numeric parsing is
/// deferred to [`ChartSeries`](crate::models::ChartSeries) so a malformed
/// field fails the affected row, not the fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimeSeries {
    pub entries: IndexMap<String, FieldMap>,
}

impl TimeSeries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates entries in source (insertion) order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &FieldMap)> {
        self.entries.iter()
    }

    /// Appends a record, used by tests and kept out of the fetch path.
    pub fn insert(&mut self, timestamp: impl Into<String>, fields: FieldMap) {
        self.entries.insert(timestamp.into(), fields);
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(open: &str, close: &str) -> FieldMap {
        let mut map = FieldMap::new();
        map.insert(OPEN_FIELD.to_string(), open.to_string());
        map.insert(CLOSE_FIELD.to_string(), close.to_string());
        map
    }

    #[test]
    fn test_preserves_insertion_order() {
        let mut series = TimeSeries::new();
        series.insert("2024-01-02 10:00:00", fields("186.0", "186.5"));
        series.insert("2024-01-02 09:55:00", fields("185.5", "186.0"));
        series.insert("2024-01-02 09:50:00", fields("185.0", "185.5"));

        let timestamps: Vec<&String> = series.iter().map(|(ts, _)| ts).collect();
        assert_eq!(
            timestamps,
            vec![
                "2024-01-02 10:00:00",
                "2024-01-02 09:55:00",
                "2024-01-02 09:50:00"
            ]
        );
    }

    #[test]
    fn test_deserializes_in_json_key_order() {
        let json = r#"{
            "2024-01-02 10:00:00": {"1. open": "186.0", "4. close": "186.5"},
            "2024-01-02 09:55:00": {"1. open": "185.5", "4. close": "186.0"}
        }"#;

        let series: TimeSeries = serde_json::from_str(json).unwrap();
        assert_eq!(series.len(), 2);

        let first = series.iter().next().unwrap();
        assert_eq!(first.0, "2024-01-02 10:00:00");
        assert_eq!(first.1.get(OPEN_FIELD).unwrap(), "186.0");
    }
}

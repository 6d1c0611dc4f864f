// ============================================================================
// Structure : ChartSeries
// ============================================================================
// Chart-ready view of a TimeSeries: two ordered (index, price) sequences
// for the open and close prices, plus the timestamp labels for the X axis.
// Recomputed from the TimeSeries whenever a row is built, never stored.
// ============================================================================

use crate::error::TransformError;
use crate::models::time_series::{FieldMap, TimeSeries, CLOSE_FIELD, OPEN_FIELD};

/// Open/close point series derived from one [`TimeSeries`].
///
/// Points are `(positional index, price)` pairs in the source's entry
/// order; `labels[i]` is the timestamp of both `open[i]` and `close[i]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub open: Vec<(f64, f64)>,
    pub close: Vec<(f64, f64)>,
    pub labels: Vec<String>,
}

impl ChartSeries {
    /// Transforms a time series into chart points.
    ///
    /// All-or-nothing: a single entry with a missing or non-numeric
    /// `"1. open"` / `"4. close"` field fails the whole transformation and
    /// yields no partial series.
    pub fn from_time_series(series: &TimeSeries) -> Result<Self, TransformError> {
        let mut open = Vec::with_capacity(series.len());
        let mut close = Vec::with_capacity(series.len());
        let mut labels = Vec::with_capacity(series.len());

        for (index, (timestamp, fields)) in series.iter().enumerate() {
            let open_price = parse_field(fields, timestamp, OPEN_FIELD)?;
            let close_price = parse_field(fields, timestamp, CLOSE_FIELD)?;

            open.push((index as f64, open_price));
            close.push((index as f64, close_price));
            labels.push(timestamp.clone());
        }

        Ok(Self { open, close, labels })
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Lowest and highest price across both series, for Y-axis bounds.
    pub fn price_bounds(&self) -> Option<(f64, f64)> {
        if self.is_empty() {
            return None;
        }

        let (min, max) = self
            .open
            .iter()
            .chain(self.close.iter())
            .fold((f64::MAX, f64::MIN), |(min, max), &(_x, y)| {
                (min.min(y), max.max(y))
            });

        Some((min, max))
    }

    /// Close price of the first entry (the API emits newest-first).
    pub fn latest_close(&self) -> Option<f64> {
        self.close.first().map(|&(_x, y)| y)
    }
}

fn parse_field(
    fields: &FieldMap,
    timestamp: &str,
    field: &'static str,
) -> Result<f64, TransformError> {
    fields
        .get(field)
        .and_then(|value| value.parse::<f64>().ok())
        .ok_or_else(|| TransformError::FieldParse {
            timestamp: timestamp.to_string(),
            field,
        })
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
    fn test_single_entry_scenario() {
        let mut series = TimeSeries::new();
        series.insert("2024-01-02 09:30:00", fields("185.5", "186.0"));

        let chart = ChartSeries::from_time_series(&series).unwrap();
        assert_eq!(chart.open, vec![(0.0, 185.5)]);
        assert_eq!(chart.close, vec![(0.0, 186.0)]);
        assert_eq!(chart.labels, vec!["2024-01-02 09:30:00"]);
    }

    #[test]
    fn test_lengths_and_order_match_source() {
        let mut series = TimeSeries::new();
        series.insert("2024-01-02 10:00:00", fields("186.0", "186.5"));
        series.insert("2024-01-02 09:55:00", fields("185.5", "186.0"));
        series.insert("2024-01-02 09:50:00", fields("185.0", "185.5"));

        let chart = ChartSeries::from_time_series(&series).unwrap();
        assert_eq!(chart.len(), 3);
        assert_eq!(chart.open.len(), 3);
        assert_eq!(chart.close.len(), 3);

        // Zero-based positional indices in source order.
        assert_eq!(chart.open[0], (0.0, 186.0));
        assert_eq!(chart.open[2], (2.0, 185.0));
        assert_eq!(chart.labels[0], "2024-01-02 10:00:00");
        assert_eq!(chart.labels[2], "2024-01-02 09:50:00");
    }

    #[test]
    fn test_missing_close_field_fails_whole_transform() {
        let mut series = TimeSeries::new();
        series.insert("2024-01-02 09:30:00", fields("185.5", "186.0"));

        let mut incomplete = FieldMap::new();
        incomplete.insert(OPEN_FIELD.to_string(), "186.0".to_string());
        series.insert("2024-01-02 09:35:00", incomplete);

        let err = ChartSeries::from_time_series(&series).expect_err("must fail");
        assert_eq!(
            err,
            TransformError::FieldParse {
                timestamp: "2024-01-02 09:35:00".to_string(),
                field: CLOSE_FIELD,
            }
        );
    }

    #[test]
    fn test_non_numeric_open_fails() {
        let mut series = TimeSeries::new();
        series.insert("2024-01-02 09:30:00", fields("not-a-price", "186.0"));

        let err = ChartSeries::from_time_series(&series).expect_err("must fail");
        assert!(matches!(
            err,
            TransformError::FieldParse {
                field: OPEN_FIELD,
                ..
            }
        ));
    }

    #[test]
    fn test_empty_series_yields_empty_chart() {
        let chart = ChartSeries::from_time_series(&TimeSeries::new()).unwrap();
        assert!(chart.is_empty());
        assert_eq!(chart.price_bounds(), None);
    }

    #[test]
    fn test_price_bounds_span_both_series() {
        let mut series = TimeSeries::new();
        series.insert("2024-01-02 09:30:00", fields("185.5", "186.0"));
        series.insert("2024-01-02 09:25:00", fields("184.0", "187.5"));

        let chart = ChartSeries::from_time_series(&series).unwrap();
        assert_eq!(chart.price_bounds(), Some((184.0, 187.5)));
    }

    #[test]
    fn test_latest_close_is_first_entry() {
        let mut series = TimeSeries::new();
        series.insert("2024-01-02 10:00:00", fields("186.0", "186.5"));
        series.insert("2024-01-02 09:55:00", fields("185.5", "186.0"));

        let chart = ChartSeries::from_time_series(&series).unwrap();
        assert_eq!(chart.latest_close(), Some(186.5));
    }
}

// ============================================================================
// List Presenter
// ============================================================================
// Keeps one renderable Row per watchlist entry. Store events update exactly
// the affected row; untouched rows keep their already-built chart series
// instead of being recomputed on every mutation.
// ============================================================================

use tracing::warn;

use crate::models::{ChartSeries, StockEntry};
use crate::store::{Watchlist, WatchlistEvent, WatchlistObserver};

/// What a row displays under its symbol label.
#[derive(Debug, Clone, PartialEq)]
pub enum RowContent {
    /// Chart-ready open/close series, handed to the chart widget at draw time.
    Chart(ChartSeries),

    /// Entry is not renderable as a chart; the reason is shown instead.
    Placeholder(String),
}

/// One visual row: symbol label plus chart or placeholder.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub symbol: String,
    pub content: RowContent,
}

impl Row {
    /// Builds the row for one entry, running the series transformation.
    ///
    /// A transformation failure degrades this row to symbol-only; it never
    /// propagates to the rest of the list.
    pub fn build(entry: &StockEntry) -> Self {
        let content = match &entry.series {
            None => RowContent::Placeholder("no data".to_string()),
            Some(series) => match ChartSeries::from_time_series(series) {
                Ok(chart) if chart.is_empty() => {
                    RowContent::Placeholder("empty series".to_string())
                }
                Ok(chart) => RowContent::Chart(chart),
                Err(e) => {
                    warn!(symbol = %entry.symbol, error = %e, "Row degraded to symbol-only");
                    RowContent::Placeholder("chart unavailable".to_string())
                }
            },
        };

        Self {
            symbol: entry.symbol.clone(),
            content,
        }
    }

    pub fn has_chart(&self) -> bool {
        matches!(self.content, RowContent::Chart(_))
    }
}

/// The presenter's row cache, kept in lockstep with the store by events.
#[derive(Debug, Default)]
pub struct RowSet {
    rows: Vec<Row>,
}

impl RowSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds all rows for an existing watchlist, for startup.
    pub fn from_watchlist(list: &Watchlist) -> Self {
        Self {
            rows: list.iter().map(Row::build).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Row> {
        self.rows.iter()
    }
}

impl WatchlistObserver for RowSet {
    fn notify(&mut self, list: &Watchlist, event: WatchlistEvent) {
        match event {
            WatchlistEvent::Inserted(index) => {
                // The event's index is authoritative; the entry must exist.
                if let Some(entry) = list.get(index) {
                    self.rows.insert(index.min(self.rows.len()), Row::build(entry));
                } else {
                    warn!(index, "Insert event without matching store entry");
                }
            }
            WatchlistEvent::Removed(index) => {
                if index < self.rows.len() {
                    self.rows.remove(index);
                } else {
                    warn!(index, rows = self.rows.len(), "Remove event out of row range");
                }
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FieldMap, TimeSeries, CLOSE_FIELD, OPEN_FIELD};

    fn series_with(open: &str, close: &str) -> TimeSeries {
        let mut fields = FieldMap::new();
        fields.insert(OPEN_FIELD.to_string(), open.to_string());
        fields.insert(CLOSE_FIELD.to_string(), close.to_string());

        let mut series = TimeSeries::new();
        series.insert("2024-01-02 09:30:00", fields);
        series
    }

    #[test]
    fn test_row_for_ready_entry_has_chart() {
        let entry = StockEntry::with_series("AAPL", series_with("185.5", "186.0"));
        let row = Row::build(&entry);

        assert_eq!(row.symbol, "AAPL");
        assert!(row.has_chart());
    }

    #[test]
    fn test_row_for_entry_without_series_is_placeholder() {
        let row = Row::build(&StockEntry::new("AAPL"));
        assert_eq!(row.content, RowContent::Placeholder("no data".to_string()));
    }

    #[test]
    fn test_row_degrades_on_malformed_field() {
        let entry = StockEntry::with_series("AAPL", series_with("not-a-price", "186.0"));
        let row = Row::build(&entry);

        assert_eq!(
            row.content,
            RowContent::Placeholder("chart unavailable".to_string())
        );
    }

    #[test]
    fn test_insert_event_builds_only_the_new_row() {
        let mut list = Watchlist::new();
        let event = list.append(StockEntry::with_series("AAPL", series_with("185.5", "186.0")));

        let mut rows = RowSet::new();
        rows.notify(&list, event);
        assert_eq!(rows.len(), 1);

        // Scribble on the existing row; a second insert must not rebuild it.
        rows.rows[0].content = RowContent::Placeholder("sentinel".to_string());

        let event = list.append(StockEntry::with_series("TSLA", series_with("250.0", "251.0")));
        rows.notify(&list, event);

        assert_eq!(rows.len(), 2);
        assert_eq!(
            rows.get(0).unwrap().content,
            RowContent::Placeholder("sentinel".to_string())
        );
        assert_eq!(rows.get(1).unwrap().symbol, "TSLA");
    }

    #[test]
    fn test_remove_event_drops_exactly_that_row() {
        let mut list = Watchlist::new();
        let mut rows = RowSet::new();
        for symbol in ["AAPL", "TSLA", "MSFT"] {
            let event = list.append(StockEntry::new(symbol));
            rows.notify(&list, event);
        }

        let event = list.remove_at(1).unwrap();
        rows.notify(&list, event);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows.get(0).unwrap().symbol, "AAPL");
        assert_eq!(rows.get(1).unwrap().symbol, "MSFT");
    }

    #[test]
    fn test_from_watchlist_builds_all_rows() {
        let mut list = Watchlist::new();
        list.append(StockEntry::new("AAPL"));
        list.append(StockEntry::with_series("TSLA", series_with("250.0", "251.0")));

        let rows = RowSet::from_watchlist(&list);
        assert_eq!(rows.len(), 2);
        assert!(!rows.get(0).unwrap().has_chart());
        assert!(rows.get(1).unwrap().has_chart());
    }
}

// ============================================================================
// Structure : Watchlist
// ============================================================================
// Ordered, mutable collection of stock entries. Every mutation produces a
// WatchlistEvent naming the affected position so an observer (the row
// presenter) can update exactly one row instead of rebuilding the list.
//
// Mutation happens only on the UI thread; background fetch results reach
// the store through the event-loop channel handoff.
// ============================================================================

use tracing::{debug, warn};

use crate::models::StockEntry;

/// A single store mutation, carrying the affected position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchlistEvent {
    /// An entry was inserted at this index.
    Inserted(usize),
    /// The entry at this index was removed.
    Removed(usize),
}

/// Reacts to store mutations. Implemented by the row presenter.
pub trait WatchlistObserver {
    fn notify(&mut self, list: &Watchlist, event: WatchlistEvent);
}

/// Ordered collection of tracked symbols.
///
/// Duplicates are allowed; two adds of the same symbol produce two
/// independent entries.
#[derive(Debug, Default)]
pub struct Watchlist {
    entries: Vec<StockEntry>,
}

impl Watchlist {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&StockEntry> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &StockEntry> {
        self.entries.iter()
    }

    /// Appends an entry and returns the insert event for the observer.
    pub fn append(&mut self, entry: StockEntry) -> WatchlistEvent {
        debug!(symbol = %entry.symbol, position = self.entries.len(), "Appending watchlist entry");
        self.entries.push(entry);
        WatchlistEvent::Inserted(self.entries.len() - 1)
    }

    /// Removes the entry at `index`.
    ///
    /// An out-of-range index is a no-op returning `None`: a delete gesture
    /// may race a previous removal and carry a stale index, which must not
    /// panic or disturb the remaining entries.
    pub fn remove_at(&mut self, index: usize) -> Option<WatchlistEvent> {
        if index >= self.entries.len() {
            warn!(index, len = self.entries.len(), "Ignoring out-of-range removal");
            return None;
        }

        let entry = self.entries.remove(index);
        debug!(symbol = %entry.symbol, index, "Removed watchlist entry");
        Some(WatchlistEvent::Removed(index))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn symbols(list: &Watchlist) -> Vec<&str> {
        list.iter().map(|e| e.symbol.as_str()).collect()
    }

    #[test]
    fn test_append_grows_by_one_and_preserves_order() {
        let mut list = Watchlist::new();

        assert_eq!(list.append(StockEntry::new("AAPL")), WatchlistEvent::Inserted(0));
        assert_eq!(list.append(StockEntry::new("TSLA")), WatchlistEvent::Inserted(1));
        assert_eq!(list.append(StockEntry::new("MSFT")), WatchlistEvent::Inserted(2));

        assert_eq!(list.len(), 3);
        assert_eq!(symbols(&list), vec!["AAPL", "TSLA", "MSFT"]);
    }

    #[test]
    fn test_duplicates_are_allowed() {
        let mut list = Watchlist::new();
        list.append(StockEntry::new("AAPL"));
        list.append(StockEntry::new("AAPL"));

        assert_eq!(list.len(), 2);
        assert_eq!(symbols(&list), vec!["AAPL", "AAPL"]);
    }

    #[test]
    fn test_remove_at_removes_exactly_that_entry() {
        let mut list = Watchlist::new();
        list.append(StockEntry::new("AAPL"));
        list.append(StockEntry::new("TSLA"));
        list.append(StockEntry::new("MSFT"));

        assert_eq!(list.remove_at(1), Some(WatchlistEvent::Removed(1)));
        assert_eq!(symbols(&list), vec!["AAPL", "MSFT"]);
    }

    #[test]
    fn test_remove_at_out_of_range_is_noop() {
        let mut list = Watchlist::new();
        list.append(StockEntry::new("AAPL"));

        assert_eq!(list.remove_at(5), None);
        assert_eq!(list.len(), 1);
        assert_eq!(symbols(&list), vec!["AAPL"]);
    }

    #[test]
    fn test_remove_at_on_empty_list_is_noop() {
        let mut list = Watchlist::new();
        assert_eq!(list.remove_at(0), None);
        assert!(list.is_empty());
    }
}

// ============================================================================
// Structure : App
// ============================================================================
// Central application state. All components read from App; every mutation
// goes through its methods, and only the UI thread calls the mutating ones
// that touch the watchlist.
// ============================================================================

use crate::models::StockEntry;
use crate::store::{Watchlist, WatchlistObserver};
use crate::ui::list::RowSet;

/// How long a transient notice stays visible, in ticks (~250ms each).
const NOTICE_TICKS: u8 = 20;

/// Active screen. One screen at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    /// The scrollable watchlist with per-row charts.
    Dashboard,

    /// Modal capture of an add-symbol input. Enter confirms, Esc cancels.
    InputMode,
}

/// A transient footer message, the TUI equivalent of a toast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub text: String,
    ticks_left: u8,
}

/// Application state.
pub struct App {
    /// False once the user confirms quit.
    pub running: bool,

    /// The tracked symbols, mutated only on the UI thread.
    pub watchlist: Watchlist,

    /// Presenter rows, kept in lockstep with the watchlist via events.
    pub rows: RowSet,

    /// Index of the selected row.
    pub selected_index: usize,

    pub current_screen: Screen,

    /// First 'q' arms this; the second quits, anything else disarms.
    pub confirm_quit: bool,

    /// First 'd' arms this; the second deletes, anything else disarms.
    pub confirm_delete: bool,

    /// True while a fetch is in flight on the worker.
    pub is_loading: bool,
    pub loading_message: Option<String>,

    /// Add-symbol input buffer and prompt.
    pub input_buffer: String,
    pub input_prompt: String,

    /// Transient message shown in the footer until its ticks run out.
    pub notice: Option<Notice>,
}

impl App {
    pub fn new() -> Self {
        Self {
            running: true,
            watchlist: Watchlist::new(),
            rows: RowSet::new(),
            selected_index: 0,
            current_screen: Screen::Dashboard,
            confirm_quit: false,
            confirm_delete: false,
            is_loading: false,
            loading_message: None,
            input_buffer: String::new(),
            input_prompt: String::new(),
            notice: None,
        }
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Called every loop iteration; ages out the current notice.
    pub fn tick(&mut self) {
        if let Some(notice) = &mut self.notice {
            notice.ticks_left = notice.ticks_left.saturating_sub(1);
            if notice.ticks_left == 0 {
                self.notice = None;
            }
        }
    }

    // ========================================================================
    // Watchlist mutation (UI thread only)
    // ========================================================================

    /// Appends a fetched entry and updates the presenter's rows.
    pub fn add_entry(&mut self, entry: StockEntry) {
        let event = self.watchlist.append(entry);
        self.rows.notify(&self.watchlist, event);
    }

    /// Deletes the selected row. A stale selection index is a no-op.
    pub fn delete_selected(&mut self) {
        if let Some(event) = self.watchlist.remove_at(self.selected_index) {
            self.rows.notify(&self.watchlist, event);

            // Keep the selection on a valid row after removing the last one.
            if self.selected_index >= self.watchlist.len() && self.selected_index > 0 {
                self.selected_index -= 1;
            }
        }
        self.confirm_delete = false;
    }

    pub fn selected_entry(&self) -> Option<&StockEntry> {
        self.watchlist.get(self.selected_index)
    }

    // ========================================================================
    // Navigation
    // ========================================================================

    pub fn navigate_up(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    pub fn navigate_down(&mut self) {
        let max_index = self.watchlist.len().saturating_sub(1);
        self.selected_index = (self.selected_index + 1).min(max_index);
    }

    pub fn is_on_dashboard(&self) -> bool {
        self.current_screen == Screen::Dashboard
    }

    // ========================================================================
    // Quit / delete confirmation
    // ========================================================================

    pub fn request_quit(&mut self) {
        self.confirm_quit = true;
    }

    pub fn cancel_quit(&mut self) {
        self.confirm_quit = false;
    }

    pub fn is_awaiting_quit_confirmation(&self) -> bool {
        self.confirm_quit
    }

    pub fn request_delete(&mut self) {
        self.confirm_delete = true;
    }

    pub fn cancel_delete(&mut self) {
        self.confirm_delete = false;
    }

    pub fn is_awaiting_delete_confirmation(&self) -> bool {
        self.confirm_delete
    }

    // ========================================================================
    // Loading indicator (set by the worker thread)
    // ========================================================================

    pub fn start_loading(&mut self, message: Option<String>) {
        self.is_loading = true;
        self.loading_message = message;
    }

    pub fn stop_loading(&mut self) {
        self.is_loading = false;
        self.loading_message = None;
    }

    pub fn is_loading_data(&self) -> bool {
        self.is_loading
    }

    // ========================================================================
    // Input mode
    // ========================================================================

    pub fn start_input(&mut self, prompt: String) {
        self.current_screen = Screen::InputMode;
        self.input_buffer.clear();
        self.input_prompt = prompt;
    }

    pub fn cancel_input(&mut self) {
        self.current_screen = Screen::Dashboard;
        self.input_buffer.clear();
        self.input_prompt.clear();
    }

    /// Consumes the buffer and returns to the dashboard.
    pub fn submit_input(&mut self) -> String {
        let value = self.input_buffer.clone();
        self.current_screen = Screen::Dashboard;
        self.input_buffer.clear();
        self.input_prompt.clear();
        value
    }

    /// Consumes the buffer as a ticker symbol: trimmed and uppercased.
    /// `None` for an empty-after-trim input, which must trigger no fetch.
    pub fn submit_symbol(&mut self) -> Option<String> {
        let symbol = self.submit_input().trim().to_uppercase();
        if symbol.is_empty() {
            None
        } else {
            Some(symbol)
        }
    }

    pub fn append_char(&mut self, c: char) {
        self.input_buffer.push(c);
    }

    pub fn backspace(&mut self) {
        self.input_buffer.pop();
    }

    pub fn is_in_input_mode(&self) -> bool {
        self.current_screen == Screen::InputMode
    }

    // ========================================================================
    // Notices
    // ========================================================================

    /// Shows a transient footer message.
    pub fn show_notice(&mut self, text: impl Into<String>) {
        self.notice = Some(Notice {
            text: text.into(),
            ticks_left: NOTICE_TICKS,
        });
    }

    pub fn notice_text(&self) -> Option<&str> {
        self.notice.as_ref().map(|n| n.text.as_str())
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_creation() {
        let app = App::new();
        assert!(app.is_running());
        assert!(app.watchlist.is_empty());
        assert!(app.rows.is_empty());
        assert_eq!(app.selected_index, 0);
    }

    #[test]
    fn test_quit() {
        let mut app = App::new();
        app.quit();
        assert!(!app.is_running());
    }

    #[test]
    fn test_add_entry_keeps_rows_in_sync() {
        let mut app = App::new();
        app.add_entry(StockEntry::new("AAPL"));
        app.add_entry(StockEntry::new("TSLA"));

        assert_eq!(app.watchlist.len(), 2);
        assert_eq!(app.rows.len(), 2);
        assert_eq!(app.rows.get(1).unwrap().symbol, "TSLA");
    }

    #[test]
    fn test_navigation_stays_in_bounds() {
        let mut app = App::new();
        app.add_entry(StockEntry::new("AAPL"));
        app.add_entry(StockEntry::new("TSLA"));
        app.add_entry(StockEntry::new("MSFT"));

        assert_eq!(app.selected_index, 0);
        app.navigate_up();
        assert_eq!(app.selected_index, 0);

        app.navigate_down();
        app.navigate_down();
        assert_eq!(app.selected_index, 2);
        app.navigate_down();
        assert_eq!(app.selected_index, 2);
    }

    #[test]
    fn test_delete_selected_adjusts_index() {
        let mut app = App::new();
        app.add_entry(StockEntry::new("AAPL"));
        app.add_entry(StockEntry::new("TSLA"));
        app.selected_index = 1;

        app.delete_selected();
        assert_eq!(app.watchlist.len(), 1);
        assert_eq!(app.rows.len(), 1);
        assert_eq!(app.selected_index, 0);
    }

    #[test]
    fn test_delete_on_empty_watchlist_is_noop() {
        let mut app = App::new();
        app.request_delete();
        app.delete_selected();

        assert!(app.watchlist.is_empty());
        assert!(!app.is_awaiting_delete_confirmation());
    }

    #[test]
    fn test_input_mode_flow() {
        let mut app = App::new();
        app.start_input("Add symbol: ".to_string());
        assert!(app.is_in_input_mode());

        app.append_char('a');
        app.append_char('x');
        app.backspace();
        app.append_char('a');
        app.append_char('p');
        app.append_char('l');
        assert_eq!(app.input_buffer, "aapl");

        let value = app.submit_input();
        assert_eq!(value, "aapl");
        assert!(app.is_on_dashboard());
        assert!(app.input_buffer.is_empty());
    }

    #[test]
    fn test_submit_symbol_trims_and_uppercases() {
        let mut app = App::new();
        app.start_input("Add symbol: ".to_string());
        for c in " aapl ".chars() {
            app.append_char(c);
        }

        assert_eq!(app.submit_symbol(), Some("AAPL".to_string()));
        assert!(app.is_on_dashboard());
    }

    #[test]
    fn test_submit_symbol_empty_after_trim_is_none() {
        let mut app = App::new();
        app.start_input("Add symbol: ".to_string());
        app.append_char(' ');

        assert_eq!(app.submit_symbol(), None);
        assert!(app.watchlist.is_empty());
    }

    #[test]
    fn test_cancel_input_discards_buffer() {
        let mut app = App::new();
        app.start_input("Add symbol: ".to_string());
        app.append_char('x');
        app.cancel_input();

        assert!(app.is_on_dashboard());
        assert!(app.input_buffer.is_empty());
    }

    #[test]
    fn test_notice_expires_after_ticks() {
        let mut app = App::new();
        app.show_notice("fetch failed");
        assert_eq!(app.notice_text(), Some("fetch failed"));

        for _ in 0..NOTICE_TICKS {
            app.tick();
        }
        assert_eq!(app.notice_text(), None);
    }

    #[test]
    fn test_quit_confirmation_two_step() {
        let mut app = App::new();
        assert!(!app.is_awaiting_quit_confirmation());

        app.request_quit();
        assert!(app.is_awaiting_quit_confirmation());
        assert!(app.is_running());

        app.cancel_quit();
        assert!(!app.is_awaiting_quit_confirmation());
    }
}

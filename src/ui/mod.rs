// ============================================================================
// Module : ui
// ============================================================================
// Terminal user interface: event polling, the row presenter, and rendering.
// ============================================================================

pub mod chart;     // Per-row open/close line chart
pub mod dashboard; // Main interface rendering
pub mod events;    // Keyboard events and ticks
pub mod list;      // Row presenter observing the watchlist

pub use dashboard::render;
pub use events::{Event, EventHandler};
pub use list::{Row, RowContent, RowSet};

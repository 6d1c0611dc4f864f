// ============================================================================
// Chart - Per-row open/close line chart
// ============================================================================
// Renders one watchlist row's ChartSeries with the ratatui Chart widget:
// two line datasets (open, close) over positional indices, timestamp
// labels on the X axis. The widget is the external charting collaborator;
// this module only feeds it point sequences and labels.
// ============================================================================

use chrono::NaiveDateTime;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    text::Span,
    widgets::{Axis, Chart, Dataset, GraphType},
    Frame,
};

use crate::models::ChartSeries;

/// Timestamp format the quotes API uses for intraday keys.
const API_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Draws the open/close chart for one row into `area`.
pub fn render_row_chart(frame: &mut Frame, chart: &ChartSeries, area: Rect) {
    let datasets = vec![
        Dataset::default()
            .name("open")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Blue))
            .data(&chart.open),
        Dataset::default()
            .name("close")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Red))
            .data(&chart.close),
    ];

    let x_max = chart.len().saturating_sub(1).max(1) as f64;
    let x_axis = Axis::default()
        .style(Style::default().fg(Color::Gray))
        .bounds([0.0, x_max])
        .labels(vec![
            Span::raw(short_label(chart.labels.first())),
            Span::raw(short_label(chart.labels.last())),
        ]);

    let (y_min, y_max) = padded_bounds(chart);
    let y_axis = Axis::default()
        .style(Style::default().fg(Color::Gray))
        .bounds([y_min, y_max])
        .labels(vec![
            Span::raw(format!("{y_min:.2}")),
            Span::raw(format!("{:.2}", (y_min + y_max) / 2.0)),
            Span::raw(format!("{y_max:.2}")),
        ]);

    let widget = Chart::new(datasets).x_axis(x_axis).y_axis(y_axis);
    frame.render_widget(widget, area);
}

/// Y bounds with a 5% margin so the lines do not hug the frame.
fn padded_bounds(chart: &ChartSeries) -> (f64, f64) {
    let (min, max) = chart.price_bounds().unwrap_or((0.0, 1.0));
    let margin = ((max - min) * 0.05).max(0.01);
    ((min - margin).max(0.0), max + margin)
}

/// Shortens an API timestamp to its time-of-day for the X axis.
/// Unparseable labels pass through unchanged.
fn short_label(label: Option<&String>) -> String {
    let Some(label) = label else {
        return String::new();
    };

    match NaiveDateTime::parse_from_str(label, API_TIMESTAMP_FORMAT) {
        Ok(dt) => dt.format("%H:%M").to_string(),
        Err(_) => label.clone(),
    }
}

// ============================================================================
// Tests
// ============================================================================

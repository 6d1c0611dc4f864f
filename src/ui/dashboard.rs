// ============================================================================
// Dashboard - Main interface rendering
// ============================================================================
// Draws the scrollable watchlist. Each entry is a fixed-height row with a
// bordered block: symbol (and latest close) in the title, the open/close
// chart or a placeholder inside. Header carries the version label, footer
// the shortcuts, confirmations, notices and the input line.
// ============================================================================

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::{App, Screen};
use crate::ui::chart::render_row_chart;
use crate::ui::list::{Row, RowContent};

/// Lines per watchlist row, borders included.
const ROW_HEIGHT: u16 = 9;

/// Draws the complete interface for the current screen.
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = create_layout(frame.size());

    render_header(frame, chunks[0]);
    render_rows(frame, app, chunks[1]);

    match app.current_screen {
        Screen::Dashboard => render_footer(frame, app, chunks[2]),
        Screen::InputMode => render_input_footer(frame, app, chunks[2]),
    }
}

/// Header, rows, footer.
fn create_layout(area: Rect) -> Vec<Rect> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(area)
        .to_vec()
}

fn render_header(frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" stockwatch ")
        .title_alignment(Alignment::Center);

    // Version label, the terminal rendition of the app's version text view.
    let text = vec![Line::from(Span::styled(
        concat!("Intraday watchlist v", env!("CARGO_PKG_VERSION")),
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
    ))];

    let paragraph = Paragraph::new(text)
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

// ============================================================================
// Watchlist rows
// ============================================================================

fn render_rows(frame: &mut Frame, app: &App, area: Rect) {
    if app.rows.is_empty() {
        render_empty_list(frame, area);
        return;
    }

    let visible = (area.height / ROW_HEIGHT).max(1) as usize;

    // Scroll so the selected row stays inside the window.
    let offset = app
        .selected_index
        .saturating_sub(visible.saturating_sub(1))
        .min(app.rows.len().saturating_sub(visible));

    for (slot, index) in (offset..app.rows.len()).take(visible).enumerate() {
        let row_area = Rect {
            x: area.x,
            y: area.y + (slot as u16) * ROW_HEIGHT,
            width: area.width,
            height: ROW_HEIGHT.min(area.height.saturating_sub((slot as u16) * ROW_HEIGHT)),
        };

        if let Some(row) = app.rows.get(index) {
            render_row(frame, row, index == app.selected_index, row_area);
        }
    }
}

fn render_row(frame: &mut Frame, row: &Row, selected: bool, area: Rect) {
    let title = match &row.content {
        RowContent::Chart(chart) => match chart.latest_close() {
            Some(close) => format!(" {} {:.2} ", row.symbol, close),
            None => format!(" {} ", row.symbol),
        },
        RowContent::Placeholder(_) => format!(" {} ", row.symbol),
    };

    let border_style = if selected {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(title);

    let inner = block.inner(area);
    frame.render_widget(block, area);

    match &row.content {
        RowContent::Chart(chart) => render_row_chart(frame, chart, inner),
        RowContent::Placeholder(reason) => {
            let paragraph = Paragraph::new(Line::from(Span::styled(
                reason.as_str(),
                Style::default().fg(Color::Gray),
            )))
            .alignment(Alignment::Center);
            frame.render_widget(paragraph, inner);
        }
    }
}

fn render_empty_list(frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Watchlist ");

    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Watchlist empty: press [a] to add a symbol",
            Style::default().fg(Color::Gray),
        )),
    ];

    let paragraph = Paragraph::new(text)
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

// ============================================================================
// Footer
// ============================================================================

fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let line = if app.is_awaiting_delete_confirmation() {
        let symbol = app
            .selected_entry()
            .map(|entry| entry.symbol.as_str())
            .unwrap_or("?");

        Line::from(vec![
            Span::styled("Press ", Style::default().fg(Color::Yellow)),
            Span::styled(
                "[d]",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!(" again to remove {symbol}, any other key to cancel"),
                Style::default().fg(Color::Yellow),
            ),
        ])
    } else if app.is_awaiting_quit_confirmation() {
        Line::from(vec![
            Span::styled("Press ", Style::default().fg(Color::Yellow)),
            Span::styled(
                "[q]",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                " again to quit, any other key to cancel",
                Style::default().fg(Color::Yellow),
            ),
        ])
    } else if let Some(notice) = app.notice_text() {
        Line::from(Span::styled(
            notice,
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ))
    } else if app.is_loading_data() {
        let message = app.loading_message.as_deref().unwrap_or("Loading…");
        Line::from(Span::styled(message, Style::default().fg(Color::Cyan)))
    } else {
        Line::from(vec![
            Span::styled("[q]", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
            Span::raw(" Quit  "),
            Span::styled("[↑↓ / j k]", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
            Span::raw(" Navigate  "),
            Span::styled("[a]", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
            Span::raw(" Add  "),
            Span::styled("[d]", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
            Span::raw(" Delete  "),
            Span::styled("[s]", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
            Span::raw(" Settings"),
        ])
    };

    let paragraph = Paragraph::new(vec![line])
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

fn render_input_footer(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));

    let input_line = Line::from(vec![
        Span::styled(
            &app.input_prompt,
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::styled(&app.input_buffer, Style::default().fg(Color::White)),
        Span::styled(
            "█",
            Style::default().fg(Color::White).add_modifier(Modifier::SLOW_BLINK),
        ),
    ]);

    let paragraph = Paragraph::new(vec![input_line])
        .block(block)
        .alignment(Alignment::Left);

    frame.render_widget(paragraph, area);
}

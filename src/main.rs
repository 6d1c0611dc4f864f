// ============================================================================
// stockwatch - Intraday watchlist TUI
// ============================================================================
// Event loop on the main thread, network fetches on a background worker.
// The worker never touches the watchlist: results come back over a channel
// and are applied between frames, so all store mutation stays on the UI
// thread.
// ============================================================================

use std::io;
use std::sync::{mpsc, Arc, Mutex};

use anyhow::{Context, Result};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{debug, error, info};

use stockwatch::api::{build_client, fetch_time_series};
use stockwatch::app::App;
use stockwatch::config::Secrets;
use stockwatch::models::{StockEntry, TimeSeries};
use stockwatch::ui::{events::EventHandler, render};

// ============================================================================
// Worker protocol
// ============================================================================

/// Commands sent from the event loop to the fetch worker.
#[derive(Debug, Clone)]
enum AppCommand {
    /// Fetch the intraday series for a symbol the user just confirmed.
    AddSymbol { symbol: String },
}

/// Results sent back from the worker to the event loop.
#[derive(Debug)]
enum AppResult {
    /// Fetch succeeded; the entry can be appended to the watchlist.
    SymbolAdded { symbol: String, series: TimeSeries },

    /// Fetch failed; shown as a transient notice, nothing is added.
    AddFailed { symbol: String, message: String },
}

// ============================================================================
// Logging
// ============================================================================

/// Initializes file logging with daily rotation.
///
/// Once the alternate screen is active stdout belongs to the TUI, so logs
/// go to `<data dir>/stockwatch/logs/stockwatch.log` (falling back to
/// `./logs`). Level control via `RUST_LOG`.
fn init_logging() -> Result<()> {
    use tracing_appender::rolling::{RollingFileAppender, Rotation};
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let log_dir = dirs::data_local_dir()
        .map(|dir| dir.join("stockwatch").join("logs"))
        .unwrap_or_else(|| std::path::PathBuf::from("./logs"));

    std::fs::create_dir_all(&log_dir).context("failed to create log directory")?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir.clone(), "stockwatch.log");

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_line_number(true),
        )
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stockwatch=debug,info".into()),
        )
        .init();

    info!(?log_dir, "Logging initialized");
    Ok(())
}

// ============================================================================
// Entry point
// ============================================================================

fn main() -> Result<()> {
    init_logging().unwrap_or_else(|e| {
        eprintln!("Warning: failed to initialize logging: {e}");
    });

    info!("stockwatch starting up");

    // Missing secrets are not fatal to the process: the UI runs and every
    // add attempt reports the configuration problem instead.
    let secrets = match Secrets::load() {
        Ok(secrets) => Some(secrets),
        Err(e) => {
            error!(error = %e, "Fetch capability disabled");
            None
        }
    };

    debug!("Setting up terminal");
    let mut terminal = setup_terminal()?;

    let app = Arc::new(Mutex::new(App::new()));

    let (command_tx, command_rx) = mpsc::channel::<AppCommand>();
    let (result_tx, result_rx) = mpsc::channel::<AppResult>();

    info!("Spawning background fetch worker");
    spawn_fetch_worker(command_rx, result_tx, app.clone(), secrets);

    let events = EventHandler::new();

    info!("Starting event loop");
    let result = run(&mut terminal, app, &events, command_tx, result_rx);

    debug!("Restoring terminal");
    restore_terminal(&mut terminal)?;

    match &result {
        Ok(_) => info!("Application exited normally"),
        Err(e) => error!(error = ?e, "Application exited with error"),
    }

    result
}

// ============================================================================
// Background fetch worker
// ============================================================================

/// Worker thread running a tokio runtime for the HTTP calls.
///
/// Exactly one fetch per AddSymbol command, processed in order; no retries,
/// no deduplication. Only the loading indicator is touched through the
/// shared state; watchlist mutation happens in the event loop.
fn spawn_fetch_worker(
    command_rx: mpsc::Receiver<AppCommand>,
    result_tx: mpsc::Sender<AppResult>,
    app: Arc<Mutex<App>>,
    secrets: Option<Secrets>,
) {
    std::thread::spawn(move || {
        let runtime = match tokio::runtime::Runtime::new() {
            Ok(runtime) => runtime,
            Err(e) => {
                error!(error = %e, "Failed to create worker runtime");
                return;
            }
        };

        let client = build_client();

        while let Ok(command) = command_rx.recv() {
            info!(?command, "Worker received command");

            match command {
                AppCommand::AddSymbol { symbol } => {
                    {
                        let mut app_lock = app.lock().unwrap();
                        app_lock.start_loading(Some(format!("Fetching {symbol}…")));
                    }

                    let outcome = match (&secrets, &client) {
                        (None, _) => Err("API key not configured (secrets.properties)".to_string()),
                        (_, Err(e)) => Err(format!("HTTP client unavailable: {e}")),
                        (Some(secrets), Ok(client)) => runtime
                            .block_on(fetch_time_series(client, &symbol, &secrets.access_token))
                            .map_err(|e| e.to_string()),
                    };

                    let result = match outcome {
                        Ok(series) => {
                            info!(symbol = %symbol, entries = series.len(), "Symbol fetched");
                            AppResult::SymbolAdded { symbol, series }
                        }
                        Err(message) => {
                            error!(symbol = %symbol, error = %message, "Add failed");
                            AppResult::AddFailed { symbol, message }
                        }
                    };

                    let _ = result_tx.send(result);

                    {
                        let mut app_lock = app.lock().unwrap();
                        app_lock.stop_loading();
                    }
                }
            }
        }

        info!("Worker thread exiting (channel closed)");
    });
}

// ============================================================================
// Event loop
// ============================================================================

fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: Arc<Mutex<App>>,
    events: &EventHandler,
    command_tx: mpsc::Sender<AppCommand>,
    result_rx: mpsc::Receiver<AppResult>,
) -> Result<()> {
    loop {
        {
            let app_lock = app.lock().unwrap();
            if !app_lock.is_running() {
                break;
            }
        }

        // Apply worker results before drawing; this is the only place
        // fetch outcomes reach the watchlist.
        match result_rx.try_recv() {
            Ok(AppResult::SymbolAdded { symbol, series }) => {
                let mut app_lock = app.lock().unwrap();
                info!(symbol = %symbol, "Appending fetched symbol to watchlist");
                app_lock.add_entry(StockEntry::with_series(symbol, series));
            }
            Ok(AppResult::AddFailed { symbol, message }) => {
                let mut app_lock = app.lock().unwrap();
                app_lock.show_notice(format!("{symbol}: {message}"));
            }
            Err(mpsc::TryRecvError::Empty) => {}
            Err(mpsc::TryRecvError::Disconnected) => {
                error!("Fetch worker disconnected");
            }
        }

        {
            let app_clone = app.clone();
            terminal.draw(|frame| {
                let app_lock = app_clone.lock().unwrap();
                render(frame, &app_lock);
            })?;
        }

        if let Ok(event) = events.next() {
            let mut app_lock = app.lock().unwrap();
            handle_event(&mut app_lock, event, &command_tx);
        }

        {
            let mut app_lock = app.lock().unwrap();
            app_lock.tick();
        }
    }

    Ok(())
}

// ============================================================================
// Event handling
// ============================================================================

fn handle_event(app: &mut App, event: stockwatch::ui::events::Event, command_tx: &mpsc::Sender<AppCommand>) {
    use stockwatch::ui::events::{
        get_char_from_event, is_add_event, is_backspace_event, is_delete_event, is_down_event,
        is_enter_event, is_escape_event, is_quit_event, is_settings_event, is_symbol_char_event,
        is_up_event, Event,
    };

    match event {
        // ========================================
        // Input mode first: typed characters must
        // never trigger dashboard shortcuts.
        // ========================================
        Event::Key(_) if is_escape_event(&event) && app.is_in_input_mode() => {
            info!("User cancelled input");
            app.cancel_input();
        }

        Event::Key(_) if is_enter_event(&event) && app.is_in_input_mode() => {
            match app.submit_symbol() {
                Some(symbol) => {
                    info!(symbol = %symbol, "User submitted symbol");
                    let _ = command_tx.send(AppCommand::AddSymbol { symbol });
                }
                // Empty after trim: no fetch, watchlist untouched.
                None => debug!("Empty symbol input, ignoring"),
            }
        }

        Event::Key(_) if is_backspace_event(&event) && app.is_in_input_mode() => {
            app.backspace();
        }

        Event::Key(_) if is_symbol_char_event(&event) && app.is_in_input_mode() => {
            if let Some(c) = get_char_from_event(&event) {
                app.append_char(c);
            }
        }

        // ========================================
        // Dashboard shortcuts
        // ========================================
        Event::Key(_) if is_quit_event(&event) => {
            if app.is_awaiting_quit_confirmation() {
                info!("User confirmed quit");
                app.quit();
            } else {
                app.request_quit();
            }
        }

        Event::Key(_) if is_delete_event(&event) && app.is_on_dashboard() => {
            if !app.watchlist.is_empty() {
                if app.is_awaiting_delete_confirmation() {
                    let symbol = app
                        .selected_entry()
                        .map(|entry| entry.symbol.clone())
                        .unwrap_or_default();
                    info!(symbol = %symbol, "User confirmed delete");
                    app.delete_selected();
                } else {
                    app.request_delete();
                }
            }
        }

        Event::Key(_) if is_add_event(&event) && app.is_on_dashboard() => {
            app.cancel_quit();
            app.cancel_delete();
            info!("User opened add-symbol input");
            app.start_input("Add symbol: ".to_string());
        }

        Event::Key(_) if is_up_event(&event) && app.is_on_dashboard() => {
            app.cancel_quit();
            app.cancel_delete();
            app.navigate_up();
        }

        Event::Key(_) if is_down_event(&event) && app.is_on_dashboard() => {
            app.cancel_quit();
            app.cancel_delete();
            app.navigate_down();
        }

        // Settings entry is a placeholder.
        Event::Key(_) if is_settings_event(&event) && app.is_on_dashboard() => {
            app.cancel_quit();
            app.cancel_delete();
            app.show_notice("Settings are not available yet");
        }

        Event::Tick => {}

        // Any other key disarms pending confirmations.
        Event::Key(_) => {
            app.cancel_quit();
            app.cancel_delete();
        }
    }
}

// ============================================================================
// Terminal setup / restore
// ============================================================================

fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend).map_err(|e| e.into())
}

/// Always called before exit, even on error, so the terminal is not left
/// in raw mode.
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    Ok(())
}

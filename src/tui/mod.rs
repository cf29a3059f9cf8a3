//! Terminal User Interface for quill.
//!
//! Shows the note list beside an add-note form, with search, view tabs and
//! single-key note commands. Rendering uses ratatui; crossterm manages the
//! terminal. Network calls run on a worker thread so drawing never waits on
//! the service.

use std::io;
use std::panic;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::{
    event::{self as crossterm_event, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{error, info};

use crate::api::{HttpNotesApi, NotesClient};
use crate::controller::Intent;
use crate::theme::ThemeStore;

mod app;
pub mod event;
mod ui;
mod worker;

pub use app::{App, Focus};
pub use worker::Worker;

/// How long the loop waits for a key before redrawing.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Initializes the terminal for TUI rendering.
///
/// Enables raw mode and enters the alternate screen.
///
/// # Errors
///
/// Returns an error if terminal initialization fails.
fn init_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("failed to create terminal")?;
    Ok(terminal)
}

/// Restores the terminal to its original state.
///
/// This should always be called before exiting the TUI, even in error cases,
/// to prevent terminal corruption.
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode().context("failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;
    terminal.show_cursor().context("failed to show cursor")?;
    Ok(())
}

/// Minimal terminal restoration for the panic hook. Errors are ignored.
fn restore_terminal_panic() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen);
}

/// Installs a panic hook that restores the terminal before the original hook runs.
fn init_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        restore_terminal_panic();
        original_hook(panic_info);
    }));
}

/// Hands queued requests to the worker.
fn flush_requests(app: &mut App, worker: &Worker) -> Result<()> {
    for request in app.take_requests() {
        worker.submit(request)?;
    }
    Ok(())
}

/// Applies every response the worker has finished.
fn drain_responses(app: &mut App, worker: &Worker) {
    while let Some(response) = worker.try_recv() {
        app.apply(response);
    }
}

/// Runs the main event loop.
///
/// # Errors
///
/// Returns an error if event polling, rendering, or terminal operations fail.
/// Terminal state is always restored, even on error.
pub fn run_event_loop(app: &mut App, worker: &Worker) -> Result<()> {
    let mut terminal = init_terminal()?;

    let result = run_event_loop_internal(app, worker, &mut terminal);

    if let Err(e) = restore_terminal(&mut terminal) {
        eprintln!("Error restoring terminal: {e}");
    }

    result
}

fn run_event_loop_internal(
    app: &mut App,
    worker: &Worker,
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
) -> Result<()> {
    loop {
        flush_requests(app, worker)?;
        drain_responses(app, worker);
        app.controller_mut().tick(Instant::now());

        terminal.draw(|frame| {
            ui::draw(frame, app);
        })?;

        if crossterm_event::poll(POLL_INTERVAL)?
            && let Event::Key(key) = crossterm_event::read()?
            && key.kind == KeyEventKind::Press
            && event::handle_key_event(app, key)
        {
            break;
        }
    }

    Ok(())
}

/// Entry point for the TUI application.
///
/// Starts the network worker, issues the first load, and runs the event loop
/// until the user quits.
///
/// # Errors
///
/// Returns an error if the worker cannot start or the terminal fails.
pub fn run(api: HttpNotesApi, theme_store: Box<dyn ThemeStore>) -> Result<()> {
    init_panic_hook();

    info!(base_url = api.base_url(), "starting TUI");
    let worker = Worker::spawn(NotesClient::new(api)).context("Failed to start notes worker")?;

    let mut app = App::new(theme_store);
    app.dispatch(Intent::Init);

    let result = run_event_loop(&mut app, &worker).context("TUI event loop failed");
    if let Err(err) = &result {
        error!(error = %err, "TUI exited with an error");
    }
    result
}

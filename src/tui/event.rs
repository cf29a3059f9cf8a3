//! Keyboard event handling for the TUI.
//!
//! Maps crossterm keyboard events to application state changes. Key
//! behaviour depends on focus, and an open confirmation dialog captures
//! everything except the global quit chords.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app::{App, Focus};
use crate::controller::Intent;
use crate::widgets::{CardAction, Dismissal};

/// Handles a keyboard event and updates the app state accordingly.
///
/// Returns `true` if the application should quit, `false` otherwise.
///
/// # Event Handling
///
/// - `Ctrl+C` / `Ctrl+Q`: quit from anywhere
/// - Dialog open: `y`/`Enter` confirm, `n`/`Esc` cancel
/// - `Tab` / `Shift+Tab`: cycle focus
/// - `Esc`: back to the note list
/// - `NoteList`: `q` quit, `j`/`k` move, `a` archive, `d` delete,
///   `v` switch view, `t` theme, `r` refresh
/// - `SearchInput`: typing filters as you go
/// - `TitleInput`: `Enter` moves to the body
/// - `BodyInput`: `Enter` or `Ctrl+S` saves
pub fn handle_key_event(app: &mut App, key: KeyEvent) -> bool {
    if key.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('q'))
    {
        return true;
    }

    if app.controller().modal().is_open() {
        handle_modal(app, key);
        return false;
    }

    match key.code {
        KeyCode::Tab => {
            app.next_focus();
            return false;
        }
        KeyCode::BackTab => {
            app.prev_focus();
            return false;
        }
        KeyCode::Esc => {
            app.set_focus(Focus::NoteList);
            return false;
        }
        _ => {}
    }

    match app.focus() {
        Focus::NoteList => return handle_note_list(app, key),
        Focus::SearchInput => handle_search_input(app, key),
        Focus::TitleInput => handle_title_input(app, key),
        Focus::BodyInput => handle_body_input(app, key),
    }

    false
}

fn is_plain(key: &KeyEvent) -> bool {
    key.modifiers.is_empty() || key.modifiers == KeyModifiers::SHIFT
}

fn handle_modal(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Enter => app.dispatch(Intent::ConfirmDelete),
        KeyCode::Char('n') => app.dispatch(Intent::CancelDelete(Dismissal::CancelButton)),
        KeyCode::Esc => app.dispatch(Intent::CancelDelete(Dismissal::Escape)),
        _ => {}
    }
}

/// Single-key commands on the note list. Returns `true` on quit.
fn handle_note_list(app: &mut App, key: KeyEvent) -> bool {
    if !key.modifiers.is_empty() {
        return false;
    }
    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Char('j') | KeyCode::Down => app.select_next(),
        KeyCode::Char('k') | KeyCode::Up => app.select_previous(),
        KeyCode::Char('a') => app.activate_selected(CardAction::ToggleArchive),
        KeyCode::Char('d') | KeyCode::Delete => app.activate_selected(CardAction::Delete),
        KeyCode::Char('v') => app.switch_view(),
        KeyCode::Char('t') => app.toggle_theme(),
        KeyCode::Char('r') => app.dispatch(Intent::Refresh),
        KeyCode::Char('/') => app.set_focus(Focus::SearchInput),
        KeyCode::Char('n') => app.set_focus(Focus::TitleInput),
        _ => {}
    }
    false
}

fn handle_search_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char(c) if is_plain(&key) => app.push_search_char(c),
        KeyCode::Backspace => app.pop_search_char(),
        KeyCode::Enter => app.set_focus(Focus::NoteList),
        _ => {}
    }
}

fn handle_title_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char(c) if is_plain(&key) => app.push_title_char(c),
        KeyCode::Backspace => app.pop_title_char(),
        KeyCode::Enter => app.set_focus(Focus::BodyInput),
        _ => {}
    }
}

fn handle_body_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('s') if key.modifiers == KeyModifiers::CONTROL => app.submit_draft(),
        KeyCode::Char(c) if is_plain(&key) => app.push_body_char(c),
        KeyCode::Backspace => app.pop_body_char(),
        KeyCode::Enter => app.submit_draft(),
        _ => {}
    }
}

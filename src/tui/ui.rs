//! UI rendering functions for the TUI.
//!
//! Layout: a header with the view tabs, the search bar, the note list beside
//! the add-note form, and a shortcut bar. Toast, loading overlay and the
//! confirmation dialog are drawn on top when visible.

use std::time::Instant;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
};

use super::app::{App, Focus};
use crate::controller::NoteListView;
use crate::models::{MAX_BODY_LENGTH, RemainingLevel, ViewMode};
use crate::theme::Theme;
use crate::widgets::{NoteCard, Severity};

/// Colours derived from the active theme.
#[derive(Debug, Clone, Copy)]
struct Palette {
    base: Style,
    accent: Color,
    muted: Color,
}

impl Palette {
    fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Self {
                base: Style::default(),
                accent: Color::Cyan,
                muted: Color::DarkGray,
            },
            Theme::Dark => Self {
                base: Style::default().bg(Color::Black).fg(Color::White),
                accent: Color::LightCyan,
                muted: Color::Gray,
            },
        }
    }

    fn border(&self, focused: bool) -> Style {
        if focused {
            self.base.fg(self.accent)
        } else {
            self.base
        }
    }
}

fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Success => Color::Green,
        Severity::Error => Color::Red,
        Severity::Warning => Color::Yellow,
        Severity::Info => Color::Blue,
    }
}

fn remaining_color(level: RemainingLevel) -> Color {
    match level {
        RemainingLevel::Normal => Color::Reset,
        RemainingLevel::Low => Color::Yellow,
        RemainingLevel::Over => Color::Red,
    }
}

/// Main rendering function for the TUI.
pub fn draw(frame: &mut Frame, app: &mut App) {
    let palette = Palette::for_theme(app.theme());
    let size = frame.area();
    frame.render_widget(Block::default().style(palette.base), size);

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Length(3), // Search
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Shortcut bar
        ])
        .split(size);

    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(main_chunks[2]);

    render_header(frame, app, &palette, main_chunks[0]);
    render_search_input(frame, app, &palette, main_chunks[1]);
    render_note_list(frame, app, &palette, content_chunks[0]);
    render_form(frame, app, &palette, content_chunks[1]);
    render_shortcut_bar(frame, app, &palette, main_chunks[3]);

    render_toast(frame, app, size);
    render_loading(frame, app, &palette, size);
    render_modal(frame, app, &palette, size);
}

fn render_header(frame: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let current = app.controller().state().mode();
    let mut spans = vec![Span::styled(
        "Quill ",
        palette.base.add_modifier(Modifier::BOLD),
    )];
    for mode in [ViewMode::Active, ViewMode::Archived] {
        let style = if mode == current {
            palette.base.fg(palette.accent).add_modifier(Modifier::REVERSED)
        } else {
            palette.base.fg(palette.muted)
        };
        spans.push(Span::styled(format!(" {} ", mode.label()), style));
        spans.push(Span::raw(" "));
    }
    let theme_icon = match app.theme() {
        Theme::Light => "🌙",
        Theme::Dark => "☀️",
    };
    spans.push(Span::raw(theme_icon));

    frame.render_widget(Paragraph::new(Line::from(spans)).style(palette.base), area);
}

fn render_search_input(frame: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let is_focused = app.focus() == Focus::SearchInput;
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Search")
        .border_style(palette.border(is_focused));

    let mut content = app.search_input().to_string();
    if is_focused {
        content.push('█');
    }

    frame.render_widget(Paragraph::new(content).block(block).style(palette.base), area);
}

fn card_item<'a>(card: &NoteCard, palette: &Palette) -> ListItem<'a> {
    let model = card.model();
    let affordance = card.affordance();

    let mut header = vec![Span::styled(
        model.title.clone(),
        palette.base.add_modifier(Modifier::BOLD),
    )];
    if let Some(badge) = card.badge() {
        header.push(Span::raw(" "));
        header.push(Span::styled(
            format!("[{badge}]"),
            palette.base.fg(Color::Yellow),
        ));
    }

    let lines = vec![
        Line::from(header),
        Line::from(Span::styled(
            model.date.clone(),
            palette.base.fg(palette.muted).add_modifier(Modifier::ITALIC),
        )),
        Line::from(model.content.clone()),
        Line::from(Span::styled(
            format!("{} {}  🗑 Delete note", affordance.icon, affordance.label),
            palette.base.fg(palette.muted),
        )),
        Line::from(""),
    ];
    ListItem::new(Text::from(lines))
}

fn render_note_list(frame: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let is_focused = app.focus() == Focus::NoteList;
    let mode = app.controller().state().mode();
    let block = Block::default()
        .borders(Borders::ALL)
        .title(mode.label())
        .border_style(palette.border(is_focused));

    match app.controller().view() {
        NoteListView::Notes(_) => {
            let items: Vec<ListItem> = app
                .cards()
                .iter()
                .map(|card| card_item(card, palette))
                .collect();

            let list = List::new(items)
                .block(block)
                .style(palette.base)
                .highlight_style(palette.base.add_modifier(Modifier::REVERSED));

            let mut list_state = ListState::default();
            list_state.select(app.selected_index());
            frame.render_stateful_widget(list, area, &mut list_state);
        }
        NoteListView::Empty(empty) => {
            let paragraph = Paragraph::new(empty.to_string())
                .block(block)
                .style(palette.base.fg(palette.muted))
                .wrap(Wrap { trim: true });
            frame.render_widget(paragraph, area);
        }
    }
}

fn render_form(frame: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Length(1), // Title validation
            Constraint::Min(3),    // Body
            Constraint::Length(1), // Counter
            Constraint::Length(1), // Body validation
        ])
        .split(area);

    let draft = app.draft();
    let validation = draft.validation();
    let error_style = palette.base.fg(Color::Red);

    let title_focused = app.focus() == Focus::TitleInput;
    let mut title = draft.title.clone();
    if title_focused {
        title.push('█');
    }
    let title_block = Block::default()
        .borders(Borders::ALL)
        .title("Title")
        .border_style(palette.border(title_focused));
    frame.render_widget(
        Paragraph::new(title).block(title_block).style(palette.base),
        chunks[0],
    );

    // Errors only show once the field has input
    if let Some(err) = validation.title.filter(|_| !draft.title.is_empty()) {
        frame.render_widget(Paragraph::new(err.to_string()).style(error_style), chunks[1]);
    }

    let body_focused = app.focus() == Focus::BodyInput;
    let mut body = draft.body.clone();
    if body_focused {
        body.push('█');
    }
    let body_block = Block::default()
        .borders(Borders::ALL)
        .title("Content")
        .border_style(palette.border(body_focused));
    frame.render_widget(
        Paragraph::new(body)
            .block(body_block)
            .style(palette.base)
            .wrap(Wrap { trim: false }),
        chunks[2],
    );

    let counter = format!(
        "{} / {MAX_BODY_LENGTH} characters remaining",
        draft.remaining_body_chars()
    );
    frame.render_widget(
        Paragraph::new(counter).style(palette.base.fg(remaining_color(draft.remaining_level()))),
        chunks[3],
    );

    if let Some(err) = validation.body.filter(|_| !draft.body.is_empty()) {
        frame.render_widget(Paragraph::new(err.to_string()).style(error_style), chunks[4]);
    }
}

fn render_shortcut_bar(frame: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let key_style = palette.base.fg(palette.accent);
    let sep_style = palette.base.fg(palette.muted);

    let shortcuts: &[(&str, &str)] = if app.controller().modal().is_open() {
        &[("y/Enter", "delete"), ("n/Esc", "cancel")]
    } else {
        match app.focus() {
            Focus::NoteList => &[
                ("q", "quit"),
                ("j/k", "navigate"),
                ("a", "archive"),
                ("d", "delete"),
                ("v", "switch view"),
                ("t", "theme"),
                ("r", "refresh"),
                ("Tab", "next panel"),
            ],
            Focus::SearchInput => &[("Enter/Esc", "back to list"), ("Tab", "next panel")],
            Focus::TitleInput => &[("Enter", "to content"), ("Esc", "back to list")],
            Focus::BodyInput => &[("Enter/Ctrl+S", "save"), ("Esc", "back to list")],
        }
    };

    let mut spans = Vec::new();
    for (i, (key, action)) in shortcuts.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" | ", sep_style));
        }
        spans.push(Span::styled(*key, key_style));
        spans.push(Span::raw(format!(": {action}")));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)).style(palette.base), area);
}

fn render_toast(frame: &mut Frame, app: &App, area: Rect) {
    let toast = app.controller().toast();
    if !toast.is_visible_at(Instant::now()) {
        return;
    }
    let (Some(message), Some(severity)) = (toast.message(), toast.severity()) else {
        return;
    };

    let text = format!("{} {message}", severity.icon());
    let width = (text.chars().count() as u16 + 4).min(area.width);
    let rect = Rect::new(area.right().saturating_sub(width), area.y + 1, width, 3).intersection(area);

    let style = Style::default().fg(severity_color(severity));
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(style);
    frame.render_widget(Clear, rect);
    frame.render_widget(Paragraph::new(text).block(block).style(style), rect);
}

fn render_loading(frame: &mut Frame, app: &mut App, palette: &Palette, area: Rect) {
    let loading = app.controller_mut().loading_mut();
    let Some(message) = loading.message().map(str::to_string) else {
        return;
    };
    let spinner = loading.spin();

    let rect = centered_rect(40, 5, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(palette.base.fg(palette.accent));
    frame.render_widget(Clear, rect);
    frame.render_widget(
        Paragraph::new(format!("{spinner} {message}"))
            .block(block)
            .style(palette.base),
        rect,
    );
}

fn render_modal(frame: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    if !app.controller().modal().is_open() {
        return;
    }

    let rect = centered_rect(50, 7, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Delete note")
        .border_style(palette.base.fg(Color::Red));
    let text = Text::from(vec![
        Line::from("Are you sure you want to delete this note?"),
        Line::from("This action cannot be undone."),
        Line::from(""),
        Line::from(vec![
            Span::styled("y", palette.base.fg(palette.accent)),
            Span::raw(": delete   "),
            Span::styled("n", palette.base.fg(palette.accent)),
            Span::raw(": cancel"),
        ]),
    ]);
    frame.render_widget(Clear, rect);
    frame.render_widget(
        Paragraph::new(text)
            .block(block)
            .style(palette.base)
            .wrap(Wrap { trim: true }),
        rect,
    );
}

/// A `width` x `height` rectangle centred in `area`, clipped to fit.
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

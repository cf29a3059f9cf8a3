use tracing::debug;

use crate::api::{Request, Response};
use crate::controller::{Controller, Intent, NoteListView, UiEvent};
use crate::models::NoteDraft;
use crate::theme::{self, Theme, ThemeStore};
use crate::widgets::{CardAction, CardIntent, NoteCard, Severity};

/// Application state for the TUI.
///
/// Wraps the controller with terminal concerns: which panel has focus, the
/// search and form buffers, the list selection, and requests waiting to be
/// handed to the network worker.
pub struct App {
    controller: Controller,
    /// Currently focused panel
    focus: Focus,
    /// Search input buffer, sent to the controller on every edit
    search_input: String,
    /// Add-note form
    draft: NoteDraft,
    /// Cards on screen, kept in step with the controller's view
    cards: Vec<NoteCard>,
    /// Selected index into the visible cards
    selected_index: Option<usize>,
    theme: Theme,
    theme_store: Box<dyn ThemeStore>,
    /// Requests produced but not yet submitted
    outbox: Vec<Request>,
}

/// Panel focus state for keyboard navigation.
///
/// Determines which panel receives keyboard input and how keys are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// Search bar; typing filters the list
    SearchInput,
    /// Note list; single-key commands act on the selected note
    NoteList,
    /// Title field of the add-note form
    TitleInput,
    /// Body field of the add-note form
    BodyInput,
}

impl App {
    /// Creates an app, reading the saved theme from `theme_store`.
    ///
    /// Focus starts on the note list.
    pub fn new(theme_store: Box<dyn ThemeStore>) -> Self {
        Self {
            controller: Controller::new(),
            focus: Focus::NoteList,
            search_input: String::new(),
            draft: NoteDraft::default(),
            cards: Vec::new(),
            selected_index: None,
            theme: theme_store.load(),
            theme_store,
            outbox: Vec::new(),
        }
    }

    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut Controller {
        &mut self.controller
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn search_input(&self) -> &str {
        &self.search_input
    }

    pub fn draft(&self) -> &NoteDraft {
        &self.draft
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected_index
    }

    /// Cards currently on screen, empty when the list shows an empty state.
    pub fn cards(&self) -> &[NoteCard] {
        &self.cards
    }

    pub fn selected_card(&self) -> Option<&NoteCard> {
        self.cards.get(self.selected_index?)
    }

    /// Hands an intent to the controller and queues whatever it asks for.
    pub fn dispatch(&mut self, intent: Intent) {
        let requests = self.controller.handle(intent);
        self.outbox.extend(requests);
        self.process_events();
    }

    /// Folds a worker response into state.
    pub fn apply(&mut self, response: Response) {
        let requests = self.controller.apply(response);
        self.outbox.extend(requests);
        self.process_events();
    }

    /// Drains requests for the worker.
    pub fn take_requests(&mut self) -> Vec<Request> {
        std::mem::take(&mut self.outbox)
    }

    fn process_events(&mut self) {
        for event in self.controller.take_events() {
            match event {
                UiEvent::NoteCreated(id) => {
                    debug!(%id, "resetting add-note form");
                    self.draft.clear();
                }
                UiEvent::ViewChanged(_) => self.selected_index = None,
                UiEvent::Notified { .. } | UiEvent::ModalOpened | UiEvent::ModalClosed => {}
            }
        }
        self.sync_cards();
        self.clamp_selection();
    }

    /// Brings the cards in line with the controller's view.
    ///
    /// Cards are matched by note id, so a note that stays on screen keeps its
    /// card and only the fields that changed are replaced.
    fn sync_cards(&mut self) {
        let models = match self.controller.view() {
            NoteListView::Notes(models) => models,
            NoteListView::Empty(_) => Vec::new(),
        };
        let mut previous = std::mem::take(&mut self.cards);
        self.cards = models
            .into_iter()
            .map(|model| {
                match previous.iter().position(|card| card.model().id == model.id) {
                    Some(i) => {
                        let mut card = previous.swap_remove(i);
                        let changed = card.update(model);
                        if !changed.is_empty() {
                            debug!(id = %card.model().id, ?changed, "note card updated");
                        }
                        card
                    }
                    None => NoteCard::new(model),
                }
            })
            .collect();
    }

    fn clamp_selection(&mut self) {
        let len = self.cards.len();
        self.selected_index = match self.selected_index {
            _ if len == 0 => None,
            Some(i) if i >= len => Some(len - 1),
            other => other,
        };
        if self.focus == Focus::NoteList && self.selected_index.is_none() && len > 0 {
            self.selected_index = Some(0);
        }
    }

    /// Cycles focus in Tab order.
    ///
    /// Order: `NoteList` -> `SearchInput` -> `TitleInput` -> `BodyInput` -> `NoteList`
    pub fn next_focus(&mut self) {
        self.focus = match self.focus {
            Focus::NoteList => Focus::SearchInput,
            Focus::SearchInput => Focus::TitleInput,
            Focus::TitleInput => Focus::BodyInput,
            Focus::BodyInput => Focus::NoteList,
        };
        self.clamp_selection();
    }

    /// Cycles focus in reverse Tab order.
    pub fn prev_focus(&mut self) {
        self.focus = match self.focus {
            Focus::NoteList => Focus::BodyInput,
            Focus::SearchInput => Focus::NoteList,
            Focus::TitleInput => Focus::SearchInput,
            Focus::BodyInput => Focus::TitleInput,
        };
        self.clamp_selection();
    }

    pub fn set_focus(&mut self, focus: Focus) {
        self.focus = focus;
        self.clamp_selection();
    }

    /// Moves selection down, wrapping to the top.
    ///
    /// The list stays put while the confirmation dialog holds the scroll lock.
    pub fn select_next(&mut self) {
        if self.controller.modal().scroll_locked() {
            return;
        }
        let len = self.cards.len();
        if len == 0 {
            self.selected_index = None;
            return;
        }
        self.selected_index = Some(match self.selected_index {
            None => 0,
            Some(i) if i + 1 >= len => 0,
            Some(i) => i + 1,
        });
    }

    /// Moves selection up, wrapping to the bottom.
    pub fn select_previous(&mut self) {
        if self.controller.modal().scroll_locked() {
            return;
        }
        let len = self.cards.len();
        if len == 0 {
            self.selected_index = None;
            return;
        }
        self.selected_index = Some(match self.selected_index {
            None | Some(0) => len - 1,
            Some(i) => i - 1,
        });
    }

    pub fn push_search_char(&mut self, c: char) {
        self.search_input.push(c);
        self.dispatch(Intent::Search(self.search_input.clone()));
    }

    pub fn pop_search_char(&mut self) {
        if self.search_input.pop().is_some() {
            self.dispatch(Intent::Search(self.search_input.clone()));
        }
    }

    pub fn push_title_char(&mut self, c: char) {
        self.draft.title.push(c);
    }

    pub fn pop_title_char(&mut self) {
        self.draft.title.pop();
    }

    pub fn push_body_char(&mut self, c: char) {
        self.draft.body.push(c);
    }

    pub fn pop_body_char(&mut self) {
        self.draft.body.pop();
    }

    /// Submits the form if it is valid; invalid forms stay as they are.
    pub fn submit_draft(&mut self) {
        if self.draft.validation().is_valid() {
            self.dispatch(Intent::Create(self.draft.clone()));
        }
    }

    /// Activates a control on the selected card.
    pub fn activate_selected(&mut self, action: CardAction) {
        let Some(card) = self.selected_card() else {
            return;
        };
        let intent = match card.activate(action) {
            CardIntent::RequestArchiveToggle(id) => Intent::ToggleArchive(id),
            CardIntent::RequestDelete(id) => Intent::RequestDelete(id),
        };
        self.dispatch(intent);
    }

    /// Switches to the other partition.
    ///
    /// Toggles from the partition last asked for, so pressing again while a
    /// switch is still loading changes the user's mind instead of repeating it.
    pub fn switch_view(&mut self) {
        let mode = self.controller.requested_mode().toggled();
        self.dispatch(Intent::SwitchView(mode));
    }

    /// Flips the theme, saves it, and announces the change.
    pub fn toggle_theme(&mut self) {
        self.theme = theme::toggle(self.theme_store.as_ref(), self.theme);
        self.controller
            .notify(self.theme.activated_message(), Severity::Info);
        self.process_events();
    }
}

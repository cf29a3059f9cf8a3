//! Application controller.
//!
//! The controller owns the view state and the widgets it drives. It never
//! performs I/O itself: `handle` turns a user intent into the network
//! `Request`s it needs, and `apply` folds a `Response` back into state,
//! possibly asking for follow-up requests. An executor sits in between:
//! `dispatch_blocking` for tests and one-shot use, or the TUI worker thread.

mod render;
mod state;

#[cfg(test)]
mod tests;

use std::collections::VecDeque;
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::api::{NotesApi, NotesClient, Request, Response, ServiceError};
use crate::models::{Note, NoteDraft, NoteId, ViewMode};
use crate::widgets::{
    ClickTarget, ConfirmModal, Dismissal, LoadingOverlay, ModalEvent, Severity, Toast,
};

pub use render::{EmptyState, NoteListView, render};
pub use state::ViewState;

/// Something the user asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// First load after startup.
    Init,
    /// Reload the current partition.
    Refresh,
    SwitchView(ViewMode),
    Search(String),
    Create(NoteDraft),
    ToggleArchive(NoteId),
    /// Stage a deletion and ask for confirmation.
    RequestDelete(NoteId),
    ConfirmDelete,
    CancelDelete(Dismissal),
}

/// Notifications for whoever presents the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// A note was created; forms should reset.
    NoteCreated(NoteId),
    ViewChanged(ViewMode),
    Notified { message: String, severity: Severity },
    ModalOpened,
    ModalClosed,
}

/// A confirmed deletion that has not finished yet.
#[derive(Debug, Clone)]
struct PendingDelete {
    id: NoteId,
    /// Captured before the request so the notification can name the note
    title: Option<String>,
    /// Set once the delete succeeded and its reload went out
    reload_seq: Option<u64>,
}

/// Owns view state and widget state, and sequences network work.
///
/// # Examples
///
/// ```
/// use quill::api::{InMemoryNotesApi, NotesClient};
/// use quill::controller::{Controller, Intent, NoteListView};
///
/// let api = InMemoryNotesApi::new();
/// api.insert("Groceries", "Milk and eggs", false);
/// let client = NotesClient::new(api);
///
/// let mut controller = Controller::new();
/// controller.dispatch_blocking(&client, Intent::Init);
///
/// match controller.view() {
///     NoteListView::Notes(cards) => assert_eq!(cards[0].title, "Groceries"),
///     NoteListView::Empty(empty) => panic!("unexpected empty state: {empty}"),
/// }
/// ```
#[derive(Debug, Default)]
pub struct Controller {
    state: ViewState,
    toast: Toast,
    loading: LoadingOverlay,
    modal: ConfirmModal,
    /// Partition of the newest load, which may not have landed yet
    requested_mode: ViewMode,
    next_seq: u64,
    in_flight: usize,
    pending_delete: Option<PendingDelete>,
    events: Vec<UiEvent>,
}

impl Controller {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// Partition of the newest load. Differs from the displayed mode while a
    /// view switch is loading.
    pub fn requested_mode(&self) -> ViewMode {
        self.requested_mode
    }

    pub fn toast(&self) -> &Toast {
        &self.toast
    }

    pub fn loading(&self) -> &LoadingOverlay {
        &self.loading
    }

    /// Mutable access for the spinner.
    pub fn loading_mut(&mut self) -> &mut LoadingOverlay {
        &mut self.loading
    }

    pub fn modal(&self) -> &ConfirmModal {
        &self.modal
    }

    /// Number of requests issued whose responses have not been applied.
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Whether a confirmed deletion is still running.
    pub fn delete_pending(&self) -> bool {
        self.pending_delete.is_some()
    }

    /// The note list as it should be displayed now.
    pub fn view(&self) -> NoteListView {
        render(&self.state)
    }

    /// Drains notifications emitted since the last call.
    pub fn take_events(&mut self) -> Vec<UiEvent> {
        std::mem::take(&mut self.events)
    }

    /// Shows a toast and reports it as an event.
    pub fn notify(&mut self, message: impl Into<String>, severity: Severity) {
        let message = message.into();
        self.toast.show(message.clone(), severity);
        self.events.push(UiEvent::Notified { message, severity });
    }

    /// Expires the toast once its time is up.
    pub fn tick(&mut self, now: Instant) {
        self.toast.tick(now);
    }

    /// Handles a user intent, returning the requests to execute.
    pub fn handle(&mut self, intent: Intent) -> Vec<Request> {
        let requests = match intent {
            Intent::Init | Intent::Refresh => vec![self.load(self.requested_mode)],
            Intent::SwitchView(mode) => self.switch_view(mode),
            Intent::Search(term) => {
                self.state.set_search_term(&term);
                Vec::new()
            }
            Intent::Create(draft) => self.create(&draft),
            Intent::ToggleArchive(id) => self.toggle_archive(&id),
            Intent::RequestDelete(id) => {
                self.request_delete(id);
                Vec::new()
            }
            Intent::ConfirmDelete => self.confirm_delete(),
            Intent::CancelDelete(how) => {
                self.cancel_delete(how);
                Vec::new()
            }
        };
        self.track(requests)
    }

    /// Applies the outcome of a request, returning any follow-up requests.
    pub fn apply(&mut self, response: Response) -> Vec<Request> {
        self.in_flight = self.in_flight.saturating_sub(1);
        let requests = match response {
            Response::Listed { seq, mode, result } => {
                self.loaded(seq, mode, result);
                Vec::new()
            }
            Response::Created(result) => self.created(result),
            Response::ArchiveSet {
                id,
                archive,
                result,
            } => self.archive_set(&id, archive, result),
            Response::Deleted { id, result } => self.deleted(&id, result),
        };
        self.track(requests)
    }

    /// Runs an intent to completion against `client` on the calling thread.
    pub fn dispatch_blocking<A: NotesApi>(&mut self, client: &NotesClient<A>, intent: Intent) {
        let mut queue: VecDeque<Request> = self.handle(intent).into();
        while let Some(request) = queue.pop_front() {
            let response = client.execute(request);
            queue.extend(self.apply(response));
        }
    }

    fn track(&mut self, requests: Vec<Request>) -> Vec<Request> {
        self.in_flight += requests.len();
        if self.in_flight == 0 {
            self.loading.hide();
        }
        self.forward_modal_events();
        requests
    }

    fn forward_modal_events(&mut self) {
        for event in self.modal.take_events() {
            self.events.push(match event {
                ModalEvent::Opened => UiEvent::ModalOpened,
                ModalEvent::Closed => UiEvent::ModalClosed,
            });
        }
    }

    fn load(&mut self, mode: ViewMode) -> Request {
        self.next_seq += 1;
        let seq = self.next_seq;
        self.state.latest_load_seq = seq;
        self.requested_mode = mode;
        self.loading.show("Loading notes...");
        debug!(seq, %mode, "loading notes");
        Request::List { seq, mode }
    }

    fn switch_view(&mut self, mode: ViewMode) -> Vec<Request> {
        if mode == self.requested_mode {
            return Vec::new();
        }
        vec![self.load(mode)]
    }

    fn loaded(&mut self, seq: u64, mode: ViewMode, result: Result<Vec<Note>, ServiceError>) {
        let completes_delete = self
            .pending_delete
            .as_ref()
            .and_then(|pending| pending.reload_seq)
            .is_some_and(|reload_seq| seq >= reload_seq);

        if seq < self.state.latest_load_seq {
            match &result {
                Ok(_) => {
                    debug!(seq, latest = self.state.latest_load_seq, "discarding superseded load");
                }
                Err(err) => warn!(
                    seq,
                    latest = self.state.latest_load_seq,
                    %mode,
                    error = %err,
                    "superseded load failed"
                ),
            }
        } else {
            match result {
                Ok(notes) => {
                    debug!(seq, %mode, count = notes.len(), "notes loaded");
                    self.state.notes = notes;
                    if self.state.mode != mode {
                        self.state.mode = mode;
                        info!(%mode, "view changed");
                        self.events.push(UiEvent::ViewChanged(mode));
                    }
                }
                Err(err) => {
                    warn!(seq, %mode, error = %err, "failed to load notes");
                    // the failed partition was never shown
                    self.requested_mode = self.state.mode;
                    self.notify(format!("Failed to load notes: {err}"), Severity::Error);
                }
            }
        }

        if completes_delete {
            self.finish_delete();
        }
    }

    fn create(&mut self, draft: &NoteDraft) -> Vec<Request> {
        if let Err(err) = draft.validate() {
            debug!(error = %err, "note draft rejected");
            return Vec::new();
        }
        self.loading.show("Saving note...");
        vec![Request::Create {
            title: draft.trimmed_title().to_string(),
            body: draft.trimmed_body().to_string(),
        }]
    }

    fn created(&mut self, result: Result<Note, ServiceError>) -> Vec<Request> {
        match result {
            Ok(note) => {
                let id = note.id.clone();
                let requests = if self.state.mode == ViewMode::Active
                    && self.requested_mode == ViewMode::Active
                {
                    self.state.notes.insert(0, note);
                    Vec::new()
                } else {
                    vec![self.load(ViewMode::Active)]
                };
                self.notify("Note added successfully!", Severity::Success);
                self.events.push(UiEvent::NoteCreated(id));
                requests
            }
            Err(err) => {
                self.notify(format!("Failed to add note: {err}"), Severity::Error);
                Vec::new()
            }
        }
    }

    fn toggle_archive(&mut self, id: &NoteId) -> Vec<Request> {
        let Some(note) = self.state.find(id) else {
            debug!(%id, "archive toggle for unknown note ignored");
            return Vec::new();
        };
        let archive = !note.archived;
        self.loading.show(if archive {
            "Archiving note..."
        } else {
            "Unarchiving note..."
        });
        vec![Request::SetArchived {
            id: id.clone(),
            archive,
        }]
    }

    fn archive_set(
        &mut self,
        id: &NoteId,
        archive: bool,
        result: Result<(), ServiceError>,
    ) -> Vec<Request> {
        let verb = if archive { "archive" } else { "unarchive" };
        match result {
            Ok(()) => self.notify(format!("Note {verb}d successfully!"), Severity::Success),
            Err(err) => {
                warn!(%id, error = %err, "failed to {verb} note");
                self.notify(format!("Failed to {verb} note: {err}"), Severity::Error);
            }
        }
        vec![self.load(self.requested_mode)]
    }

    fn request_delete(&mut self, id: NoteId) {
        if self.pending_delete.is_some() {
            debug!(%id, "delete already running; ignoring request");
            return;
        }
        self.state.staged_deletion = Some(id);
        self.modal.open();
    }

    fn confirm_delete(&mut self) -> Vec<Request> {
        if self.pending_delete.is_some() {
            return Vec::new();
        }
        let Some(id) = self.state.staged_deletion.clone() else {
            return Vec::new();
        };
        let title = self.state.find(&id).map(|note| note.title.clone());
        self.pending_delete = Some(PendingDelete {
            id: id.clone(),
            title,
            reload_seq: None,
        });
        self.loading.show("Deleting note...");
        vec![Request::Delete { id }]
    }

    fn cancel_delete(&mut self, how: Dismissal) {
        if self.pending_delete.is_some() {
            return;
        }
        let dismissed = match how {
            Dismissal::Escape => self.modal.handle_escape(),
            Dismissal::OverlayClick => self.modal.handle_click(ClickTarget::Overlay),
            Dismissal::CancelButton => self.modal.dismiss(how),
        };
        if dismissed {
            debug!(?how, "deletion cancelled");
        }
        self.state.staged_deletion = None;
    }

    fn deleted(&mut self, id: &NoteId, result: Result<(), ServiceError>) -> Vec<Request> {
        match result {
            Ok(()) => {
                let request = self.load(self.requested_mode);
                let seq = self.state.latest_load_seq;
                if let Some(pending) = self.pending_delete.as_mut() {
                    pending.reload_seq = Some(seq);
                }
                vec![request]
            }
            Err(err) => {
                warn!(%id, error = %err, "failed to delete note");
                self.notify(format!("Failed to delete note: {err}"), Severity::Error);
                self.close_delete();
                Vec::new()
            }
        }
    }

    fn finish_delete(&mut self) {
        let Some(pending) = self.pending_delete.take() else {
            return;
        };
        info!(id = %pending.id, "deletion complete");
        let message = match pending.title {
            Some(title) => format!("\"{title}\" has been deleted."),
            None => "Note has been deleted.".to_string(),
        };
        self.notify(message, Severity::Warning);
        self.close_delete();
    }

    fn close_delete(&mut self) {
        self.pending_delete = None;
        self.state.staged_deletion = None;
        self.modal.close();
    }
}

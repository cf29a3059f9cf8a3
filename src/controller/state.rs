use crate::models::{Note, NoteId, ViewMode};

/// Everything the note list is rendered from.
///
/// The cache holds the service's last known answer for `mode` and is only
/// ever replaced wholesale. Filtering never touches it.
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    pub(super) mode: ViewMode,
    pub(super) search_term: String,
    pub(super) notes: Vec<Note>,
    pub(super) staged_deletion: Option<NoteId>,
    pub(super) latest_load_seq: u64,
}

impl ViewState {
    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    /// The active search term, trimmed and lower-cased.
    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    /// The cached notes in service order, unfiltered.
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn staged_deletion(&self) -> Option<&NoteId> {
        self.staged_deletion.as_ref()
    }

    /// Sequence number of the newest load issued.
    pub fn latest_load_seq(&self) -> u64 {
        self.latest_load_seq
    }

    pub fn find(&self, id: &NoteId) -> Option<&Note> {
        self.notes.iter().find(|note| &note.id == id)
    }

    /// Notes matching the search term, in cache order.
    pub fn visible_notes(&self) -> impl Iterator<Item = &Note> {
        self.notes
            .iter()
            .filter(|note| note.matches(&self.search_term))
    }

    pub(super) fn set_search_term(&mut self, term: &str) {
        self.search_term = term.trim().to_lowercase();
    }
}

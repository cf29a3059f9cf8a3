//! Derives what the note list shows from the view state.

use std::fmt;

use super::ViewState;
use crate::models::ViewMode;
use crate::widgets::NoteCardModel;

/// Why the list is empty. Variants are listed in precedence order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmptyState {
    NoSearchMatch(String),
    NoArchivedNotes,
    NoActiveNotes,
}

impl fmt::Display for EmptyState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoSearchMatch(term) => write!(f, "No notes found matching \"{term}\""),
            Self::NoArchivedNotes => {
                write!(f, "No archived notes yet. Archive notes to see them here.")
            }
            Self::NoActiveNotes => write!(f, "No notes yet. Create your first note!"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteListView {
    Notes(Vec<NoteCardModel>),
    Empty(EmptyState),
}

pub fn render(state: &ViewState) -> NoteListView {
    let cards: Vec<NoteCardModel> = state.visible_notes().map(NoteCardModel::from).collect();
    if !cards.is_empty() {
        return NoteListView::Notes(cards);
    }

    let empty = if !state.search_term.is_empty() {
        EmptyState::NoSearchMatch(state.search_term.clone())
    } else if state.mode == ViewMode::Archived {
        EmptyState::NoArchivedNotes
    } else {
        EmptyState::NoActiveNotes
    };
    NoteListView::Empty(empty)
}

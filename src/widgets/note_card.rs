//! Single note display with archive and delete controls.

use time::OffsetDateTime;
use time::macros::format_description;

use crate::models::{Note, NoteId};

/// Renders a creation timestamp the way cards display it.
///
/// ```
/// use time::macros::datetime;
/// use quill::widgets::format_card_date;
///
/// assert_eq!(
///     format_card_date(datetime!(2022-07-28 10:03:12 UTC)),
///     "Thursday, 28 July 2022 10:03"
/// );
/// ```
pub fn format_card_date(created_at: OffsetDateTime) -> String {
    let format = format_description!(
        "[weekday], [day padding:none] [month repr:long] [year] [hour]:[minute]"
    );
    // every component in the description exists on OffsetDateTime
    created_at
        .format(format)
        .unwrap_or_else(|_| created_at.to_string())
}

/// Immutable inputs of a card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteCardModel {
    pub id: NoteId,
    pub title: String,
    pub date: String,
    pub content: String,
    pub archived: bool,
}

impl From<&Note> for NoteCardModel {
    fn from(note: &Note) -> Self {
        Self {
            id: note.id.clone(),
            title: note.title.clone(),
            date: format_card_date(note.created_at),
            content: note.body.clone(),
            archived: note.archived,
        }
    }
}

/// Fields a card redraws after an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardField {
    Title,
    Date,
    Content,
    /// Archive affordance and badge
    Archived,
}

/// Controls on a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardAction {
    ToggleArchive,
    Delete,
}

/// What a card asks of its owner when a control is activated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardIntent {
    RequestArchiveToggle(NoteId),
    RequestDelete(NoteId),
}

/// Icon and label of the archive control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Affordance {
    pub icon: &'static str,
    pub label: &'static str,
}

const ARCHIVE: Affordance = Affordance {
    icon: "📁",
    label: "Archive note",
};

const UNARCHIVE: Affordance = Affordance {
    icon: "📂",
    label: "Unarchive note",
};

pub const ARCHIVED_BADGE: &str = "Archived";

#[derive(Debug, Clone)]
pub struct NoteCard {
    model: NoteCardModel,
}

impl NoteCard {
    pub fn new(model: NoteCardModel) -> Self {
        Self { model }
    }

    pub fn model(&self) -> &NoteCardModel {
        &self.model
    }

    /// Replaces the inputs and reports which displayed fields changed.
    ///
    /// The id is identity, not display, so a changed id is not a field.
    pub fn update(&mut self, model: NoteCardModel) -> Vec<CardField> {
        let mut changed = Vec::new();
        if self.model.title != model.title {
            changed.push(CardField::Title);
        }
        if self.model.date != model.date {
            changed.push(CardField::Date);
        }
        if self.model.content != model.content {
            changed.push(CardField::Content);
        }
        if self.model.archived != model.archived {
            changed.push(CardField::Archived);
        }
        self.model = model;
        changed
    }

    pub fn affordance(&self) -> Affordance {
        if self.model.archived { UNARCHIVE } else { ARCHIVE }
    }

    pub fn badge(&self) -> Option<&'static str> {
        self.model.archived.then_some(ARCHIVED_BADGE)
    }

    pub fn activate(&self, action: CardAction) -> CardIntent {
        let id = self.model.id.clone();
        match action {
            CardAction::ToggleArchive => CardIntent::RequestArchiveToggle(id),
            CardAction::Delete => CardIntent::RequestDelete(id),
        }
    }
}

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::NoteId;

/// A note as reported by the notes service.
///
/// Every field is owned by the service: the id and creation timestamp are
/// assigned on create, and `archived` only changes through the archive and
/// unarchive endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Service-assigned identifier.
    pub id: NoteId,
    /// The note's title.
    pub title: String,
    /// The note's text content.
    pub body: String,
    /// When this note was created.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    /// Whether the note lives in the archived partition.
    #[serde(default)]
    pub archived: bool,
}

impl Note {
    /// Returns the note ID.
    pub fn id(&self) -> &NoteId {
        &self.id
    }

    /// Returns the note title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the note body.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Returns the creation timestamp.
    pub fn created_at(&self) -> OffsetDateTime {
        self.created_at
    }

    /// Returns whether the note is archived.
    pub fn is_archived(&self) -> bool {
        self.archived
    }

    /// Case-insensitive substring match against title or body.
    ///
    /// `term` must already be lower-cased. An empty term matches every note.
    pub fn matches(&self, term: &str) -> bool {
        term.is_empty()
            || self.title.to_lowercase().contains(term)
            || self.body.to_lowercase().contains(term)
    }
}

/// Builder for constructing `Note` instances with optional fields.
///
/// # Examples
///
/// ```
/// use quill::NoteBuilder;
///
/// let note = NoteBuilder::new()
///     .id("notes-1")
///     .title("Groceries")
///     .body("Milk and eggs")
///     .build();
///
/// assert_eq!(note.id.as_str(), "notes-1");
/// assert!(!note.archived);
/// ```
#[derive(Debug, Default)]
pub struct NoteBuilder {
    id: Option<NoteId>,
    title: Option<String>,
    body: Option<String>,
    created_at: Option<OffsetDateTime>,
    archived: bool,
}

impl NoteBuilder {
    /// Creates a new `NoteBuilder`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the note ID.
    pub fn id(mut self, id: impl Into<NoteId>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Sets the note title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the note body.
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Sets the created timestamp.
    pub fn created_at(mut self, created_at: OffsetDateTime) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Sets the archived flag.
    pub fn archived(mut self, archived: bool) -> Self {
        self.archived = archived;
        self
    }

    /// Builds the `Note`, using defaults for optional fields.
    ///
    /// # Panics
    ///
    /// Panics if `id` has not been set.
    pub fn build(self) -> Note {
        Note {
            id: self.id.expect("id is required"),
            title: self.title.unwrap_or_default(),
            body: self.body.unwrap_or_default(),
            created_at: self.created_at.unwrap_or_else(OffsetDateTime::now_utc),
            archived: self.archived,
        }
    }
}

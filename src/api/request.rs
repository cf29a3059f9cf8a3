//! Messages exchanged between the controller and whatever executes network calls.

use crate::models::{Note, NoteId, ViewMode};

use super::ServiceError;

/// A network call the controller wants performed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    /// Fetch one partition. `seq` orders loads so stale answers can be dropped.
    List { seq: u64, mode: ViewMode },
    /// Create a note from already-validated, trimmed fields.
    Create { title: String, body: String },
    /// Archive (`archive == true`) or unarchive a note.
    SetArchived { id: NoteId, archive: bool },
    /// Delete a note.
    Delete { id: NoteId },
}

/// The outcome of a `Request`, echoing the parameters the controller needs.
#[derive(Debug)]
pub enum Response {
    Listed {
        seq: u64,
        mode: ViewMode,
        result: Result<Vec<Note>, ServiceError>,
    },
    Created(Result<Note, ServiceError>),
    ArchiveSet {
        id: NoteId,
        archive: bool,
        result: Result<(), ServiceError>,
    },
    Deleted {
        id: NoteId,
        result: Result<(), ServiceError>,
    },
}

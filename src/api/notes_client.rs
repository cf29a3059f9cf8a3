//! Application-facing wrapper over a `NotesApi` transport.
//!
//! Reads degrade: a failed list becomes an empty list and a failed lookup
//! becomes "not found", so browsing keeps working through transient outages.
//! Writes propagate their `ServiceError` so callers never assume success.

use tracing::{info, warn};

use super::{HttpNotesApi, NotesApi, Request, Response, ServiceError};
use crate::models::{Note, NoteId, ViewMode};

/// One operation per notes service capability, with the read/write error policy applied.
pub struct NotesClient<A = HttpNotesApi> {
    api: A,
}

impl<A: NotesApi> NotesClient<A> {
    /// Wraps a transport.
    pub fn new(api: A) -> Self {
        Self { api }
    }

    /// Returns the underlying transport.
    pub fn api(&self) -> &A {
        &self.api
    }

    /// Lists active notes, or nothing if the service cannot be reached.
    pub fn list_active(&self) -> Vec<Note> {
        self.list(ViewMode::Active)
    }

    /// Lists archived notes, or nothing if the service cannot be reached.
    pub fn list_archived(&self) -> Vec<Note> {
        self.list(ViewMode::Archived)
    }

    /// Lists one partition, degrading failures to an empty list.
    pub fn list(&self, mode: ViewMode) -> Vec<Note> {
        self.try_list(mode).unwrap_or_else(|err| {
            warn!(%mode, error = %err, "failed to list notes; showing none");
            Vec::new()
        })
    }

    /// Lists one partition, reporting failures.
    ///
    /// Used where the caller must tell "empty" apart from "unknown", such as
    /// the controller keeping its previous cache when a reload fails.
    pub fn try_list(&self, mode: ViewMode) -> Result<Vec<Note>, ServiceError> {
        self.api.list_notes(mode)
    }

    /// Looks up a note; `None` covers both "does not exist" and "could not ask".
    pub fn get(&self, id: &NoteId) -> Option<Note> {
        match self.api.get_note(id) {
            Ok(note) => Some(note),
            Err(err) => {
                warn!(%id, error = %err, "failed to get note; treating as not found");
                None
            }
        }
    }

    /// Creates a note.
    pub fn create(&self, title: &str, body: &str) -> Result<Note, ServiceError> {
        let note = self.api.create_note(title, body)?;
        info!(id = %note.id, "note created");
        Ok(note)
    }

    /// Archives a note.
    pub fn archive(&self, id: &NoteId) -> Result<(), ServiceError> {
        self.api.archive_note(id)?;
        info!(%id, "note archived");
        Ok(())
    }

    /// Unarchives a note.
    pub fn unarchive(&self, id: &NoteId) -> Result<(), ServiceError> {
        self.api.unarchive_note(id)?;
        info!(%id, "note unarchived");
        Ok(())
    }

    /// Deletes a note.
    pub fn delete(&self, id: &NoteId) -> Result<(), ServiceError> {
        self.api.delete_note(id)?;
        info!(%id, "note deleted");
        Ok(())
    }

    /// Performs a controller request and packages the outcome.
    pub fn execute(&self, request: Request) -> Response {
        match request {
            Request::List { seq, mode } => Response::Listed {
                seq,
                mode,
                result: self.try_list(mode),
            },
            Request::Create { title, body } => Response::Created(self.create(&title, &body)),
            Request::SetArchived { id, archive } => {
                let result = if archive {
                    self.archive(&id)
                } else {
                    self.unarchive(&id)
                };
                Response::ArchiveSet {
                    id,
                    archive,
                    result,
                }
            }
            Request::Delete { id } => {
                let result = self.delete(&id);
                Response::Deleted { id, result }
            }
        }
    }
}

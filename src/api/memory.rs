//! In-process stand-in for the notes service.
//!
//! Keeps notes in memory, records every call, and can be told to fail
//! specific operations. Clones share the same store, so a test can keep one
//! handle while the client owns another.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use time::OffsetDateTime;

use super::{NotesApi, ServiceError};
use crate::models::{Note, NoteId, ViewMode};

/// Service capabilities, used to target injected failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    List,
    Get,
    Create,
    Archive,
    Unarchive,
    Delete,
}

/// A call received by `InMemoryNotesApi`, in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCall {
    List(ViewMode),
    Get(NoteId),
    Create { title: String, body: String },
    Archive(NoteId),
    Unarchive(NoteId),
    Delete(NoteId),
}

#[derive(Debug, Default)]
struct Store {
    notes: Vec<Note>,
    next_id: u64,
    calls: Vec<ApiCall>,
    /// One-shot failures, consumed by the next matching call
    pending_failures: HashMap<Operation, String>,
    /// When set, every call fails with this message
    outage: Option<String>,
}

impl Store {
    fn check(&mut self, op: Operation) -> Result<(), ServiceError> {
        if let Some(message) = &self.outage {
            return Err(ServiceError::Api {
                message: message.clone(),
            });
        }
        match self.pending_failures.remove(&op) {
            Some(message) => Err(ServiceError::Api { message }),
            None => Ok(()),
        }
    }

    fn position(&self, id: &NoteId) -> Result<usize, ServiceError> {
        self.notes
            .iter()
            .position(|note| &note.id == id)
            .ok_or_else(|| ServiceError::Api {
                message: "Note is not found".to_string(),
            })
    }
}

/// Notes service kept in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryNotesApi {
    store: Arc<Mutex<Store>>,
}

impl InMemoryNotesApi {
    /// Creates an empty service.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Store> {
        // A panicking test thread must not hide the store from the others
        self.store.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Seeds a note directly, without recording a call.
    pub fn insert(&self, title: &str, body: &str, archived: bool) -> Note {
        let mut store = self.lock();
        let note = Self::new_note(&mut store, title, body, archived);
        store.notes.push(note.clone());
        note
    }

    /// Makes the next call of `op` fail with `message`.
    pub fn fail(&self, op: Operation, message: &str) {
        self.lock().pending_failures.insert(op, message.to_string());
    }

    /// Makes every call fail until `restore` is called.
    pub fn fail_all(&self, message: &str) {
        self.lock().outage = Some(message.to_string());
    }

    /// Ends an outage started with `fail_all`.
    pub fn restore(&self) {
        self.lock().outage = None;
    }

    /// Returns all calls received so far.
    pub fn calls(&self) -> Vec<ApiCall> {
        self.lock().calls.clone()
    }

    /// Forgets recorded calls.
    pub fn clear_calls(&self) {
        self.lock().calls.clear();
    }

    /// Returns every stored note regardless of partition.
    pub fn snapshot(&self) -> Vec<Note> {
        self.lock().notes.clone()
    }

    fn new_note(store: &mut Store, title: &str, body: &str, archived: bool) -> Note {
        store.next_id += 1;
        Note {
            id: NoteId::new(format!("notes-{}", store.next_id)),
            title: title.to_string(),
            body: body.to_string(),
            created_at: OffsetDateTime::now_utc(),
            archived,
        }
    }

    fn set_archived(&self, id: &NoteId, op: Operation, archived: bool) -> Result<(), ServiceError> {
        let mut store = self.lock();
        store.calls.push(if archived {
            ApiCall::Archive(id.clone())
        } else {
            ApiCall::Unarchive(id.clone())
        });
        store.check(op)?;
        let index = store.position(id)?;
        store.notes[index].archived = archived;
        Ok(())
    }
}

impl NotesApi for InMemoryNotesApi {
    fn list_notes(&self, mode: ViewMode) -> Result<Vec<Note>, ServiceError> {
        let mut store = self.lock();
        store.calls.push(ApiCall::List(mode));
        store.check(Operation::List)?;
        Ok(store
            .notes
            .iter()
            .filter(|note| ViewMode::of(note.archived) == mode)
            .cloned()
            .collect())
    }

    fn get_note(&self, id: &NoteId) -> Result<Note, ServiceError> {
        let mut store = self.lock();
        store.calls.push(ApiCall::Get(id.clone()));
        store.check(Operation::Get)?;
        let index = store.position(id)?;
        Ok(store.notes[index].clone())
    }

    fn create_note(&self, title: &str, body: &str) -> Result<Note, ServiceError> {
        let mut store = self.lock();
        store.calls.push(ApiCall::Create {
            title: title.to_string(),
            body: body.to_string(),
        });
        store.check(Operation::Create)?;
        let note = Self::new_note(&mut store, title, body, false);
        store.notes.push(note.clone());
        Ok(note)
    }

    fn archive_note(&self, id: &NoteId) -> Result<(), ServiceError> {
        self.set_archived(id, Operation::Archive, true)
    }

    fn unarchive_note(&self, id: &NoteId) -> Result<(), ServiceError> {
        self.set_archived(id, Operation::Unarchive, false)
    }

    fn delete_note(&self, id: &NoteId) -> Result<(), ServiceError> {
        let mut store = self.lock();
        store.calls.push(ApiCall::Delete(id.clone()));
        store.check(Operation::Delete)?;
        let index = store.position(id)?;
        store.notes.remove(index);
        Ok(())
    }
}

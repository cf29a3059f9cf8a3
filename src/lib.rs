pub mod api;
pub mod cli;
pub mod controller;
pub mod logging;
pub mod models;
pub mod theme;
pub mod tui;
pub mod utils;
pub mod widgets;

pub use api::{HttpNotesApi, NotesApi, NotesClient, ServiceError};
pub use controller::{Controller, Intent, UiEvent};
pub use models::{Note, NoteBuilder, NoteDraft, NoteId, ViewMode};

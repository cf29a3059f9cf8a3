/// Notes service access.
///
/// This module provides the blocking HTTP transport for the notes REST API,
/// the response envelope decoding, the error-policy wrapper used by the rest of
/// the application, and an in-memory stand-in for tests.
mod client;
mod envelope;
mod memory;
mod notes_client;
mod request;

pub use client::{
    BASE_URL_ENV, DEFAULT_BASE_URL, HttpNotesApi, HttpNotesApiBuilder, NotesApi, ServiceError,
    TIMEOUT_ENV,
};
pub use envelope::{Envelope, SUCCESS_STATUS};
pub use memory::{ApiCall, InMemoryNotesApi, Operation};
pub use notes_client::NotesClient;
pub use request::{Request, Response};

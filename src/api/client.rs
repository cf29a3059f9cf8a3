/// Notes service HTTP client implementation.
///
/// This module provides `HttpNotesApi` for making synchronous HTTP requests to the
/// notes service, along with the `ServiceError` type and a builder for configuration.
use std::time::Duration;

use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

use super::envelope::{self, Envelope};
use crate::models::{Note, NoteId, ViewMode};

/// Default notes service endpoint.
pub const DEFAULT_BASE_URL: &str = "https://notes-api.dicoding.dev/v2";
/// Environment variable overriding the service endpoint.
pub const BASE_URL_ENV: &str = "NOTES_API_URL";
/// Environment variable overriding the request timeout, in whole seconds.
pub const TIMEOUT_ENV: &str = "NOTES_API_TIMEOUT_SECS";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Errors that can occur when talking to the notes service.
///
/// Every variant is a service error from the caller's point of view: either
/// the service answered with a non-success status or the exchange itself failed.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Network-related errors (connection failures, DNS resolution, etc.)
    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),

    /// Request or response timeout errors
    #[error("Request timed out")]
    Timeout(#[source] reqwest::Error),

    /// Non-success HTTP status with a body that is not a service envelope
    #[error("HTTP error: status {status}")]
    Http { status: u16 },

    /// Response body could not be decoded
    #[error("Malformed response: {0}")]
    Decode(#[source] serde_json::Error),

    /// The service reported a failure; the message is the service's own
    #[error("{message}")]
    Api { message: String },

    /// Invalid URL configuration error
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl ServiceError {
    /// Classifies a reqwest failure as timeout or general network error.
    fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err)
        } else {
            Self::Network(err)
        }
    }
}

/// Builder for constructing `HttpNotesApi` instances.
///
/// # Examples
///
/// ```
/// use quill::api::HttpNotesApiBuilder;
///
/// let api = HttpNotesApiBuilder::new()
///     .base_url("http://localhost:5000/v2")
///     .build()
///     .expect("Failed to create client");
/// assert_eq!(api.base_url(), "http://localhost:5000/v2");
/// ```
#[derive(Debug, Default)]
pub struct HttpNotesApiBuilder {
    base_url: Option<String>,
    timeout: Option<Duration>,
}

impl HttpNotesApiBuilder {
    /// Creates a new `HttpNotesApiBuilder` with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the base URL of the notes service.
    ///
    /// # Arguments
    ///
    /// * `url` - The base URL (e.g., "https://notes-api.dicoding.dev/v2")
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Sets the total per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the `HttpNotesApi` with the configured settings.
    ///
    /// # Environment Variables
    ///
    /// If `base_url()` was not called, this method will check the `NOTES_API_URL`
    /// environment variable. If not set, it defaults to `DEFAULT_BASE_URL`.
    ///
    /// If `timeout()` was not called, `NOTES_API_TIMEOUT_SECS` is consulted; an
    /// unset or unparsable value falls back to 30 seconds.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::InvalidUrl` if the base URL does not parse, or
    /// `ServiceError::Network` if the underlying HTTP client cannot be created.
    pub fn build(self) -> Result<HttpNotesApi, ServiceError> {
        // Builder value, then env var, then default
        let base_url = match self.base_url {
            Some(url) => url,
            None => std::env::var(BASE_URL_ENV).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
        };
        let base_url = base_url.trim_end_matches('/').to_string();

        let timeout = self.timeout.unwrap_or_else(|| {
            std::env::var(TIMEOUT_ENV)
                .ok()
                .and_then(|v| v.trim().parse::<u64>().ok())
                .map(Duration::from_secs)
                .unwrap_or(DEFAULT_TIMEOUT)
        });

        let endpoint = reqwest::Url::parse(&base_url)
            .map_err(|e| ServiceError::InvalidUrl(format!("{}: {}", base_url, e)))?;
        if endpoint.cannot_be_a_base() {
            return Err(ServiceError::InvalidUrl(format!(
                "{}: not a hierarchical URL",
                base_url
            )));
        }

        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .map_err(ServiceError::Network)?;

        Ok(HttpNotesApi {
            client,
            base_url,
            endpoint,
            timeout,
        })
    }
}

/// Transport-level operations of the notes service.
///
/// Every operation reports failures as `ServiceError`; deciding which failures
/// to swallow is left to `NotesClient`. This trait also enables mocking in tests.
pub trait NotesApi: Send + Sync {
    /// Lists the notes of one partition, in service order.
    fn list_notes(&self, mode: ViewMode) -> Result<Vec<Note>, ServiceError>;

    /// Fetches a single note.
    fn get_note(&self, id: &NoteId) -> Result<Note, ServiceError>;

    /// Creates a note and returns it with its service-assigned fields.
    fn create_note(&self, title: &str, body: &str) -> Result<Note, ServiceError>;

    /// Moves a note to the archived partition.
    fn archive_note(&self, id: &NoteId) -> Result<(), ServiceError>;

    /// Moves a note back to the active partition.
    fn unarchive_note(&self, id: &NoteId) -> Result<(), ServiceError>;

    /// Permanently removes a note.
    fn delete_note(&self, id: &NoteId) -> Result<(), ServiceError>;
}

/// Synchronous HTTP client for the notes service.
///
/// Holds no state between calls besides the connection pool. It should be
/// constructed using `HttpNotesApiBuilder`.
#[derive(Debug)]
pub struct HttpNotesApi {
    client: reqwest::blocking::Client,
    base_url: String,
    endpoint: reqwest::Url,
    timeout: Duration,
}

impl HttpNotesApi {
    /// Returns the base URL configured for this client.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the per-request timeout configured for this client.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Appends path segments to the base URL, percent-encoding each one.
    ///
    /// Ids go in as a single segment, so `/`, `?` or `#` inside an id can't
    /// change which endpoint is hit.
    fn url(&self, segments: &[&str]) -> Result<reqwest::Url, ServiceError> {
        let mut url = self.endpoint.clone();
        url.path_segments_mut()
            .map_err(|()| {
                ServiceError::InvalidUrl(format!("{}: cannot take a path", self.base_url))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Sends a request and decodes the envelope from the response body.
    fn send<T: DeserializeOwned>(
        &self,
        request: reqwest::blocking::RequestBuilder,
    ) -> Result<Envelope<T>, ServiceError> {
        let response = request.send().map_err(ServiceError::from_transport)?;
        let status = response.status().as_u16();
        let body = response.text().map_err(ServiceError::from_transport)?;

        debug!(status, bytes = body.len(), "notes service responded");
        envelope::decode(status, &body)
    }
}

impl NotesApi for HttpNotesApi {
    fn list_notes(&self, mode: ViewMode) -> Result<Vec<Note>, ServiceError> {
        let segments: &[&str] = match mode {
            ViewMode::Active => &["notes"],
            ViewMode::Archived => &["notes", "archived"],
        };
        let url = self.url(segments)?;
        debug!(%mode, "GET {}", url.path());
        self.send(self.client.get(url))?.into_data()
    }

    fn get_note(&self, id: &NoteId) -> Result<Note, ServiceError> {
        debug!(%id, "GET /notes/{{id}}");
        let url = self.url(&["notes", id.as_str()])?;
        self.send(self.client.get(url))?.into_data()
    }

    fn create_note(&self, title: &str, body: &str) -> Result<Note, ServiceError> {
        let request_body = serde_json::json!({
            "title": title,
            "body": body,
        });
        debug!("POST /notes");
        self.send(self.client.post(self.url(&["notes"])?).json(&request_body))?
            .into_data()
    }

    fn archive_note(&self, id: &NoteId) -> Result<(), ServiceError> {
        debug!(%id, "POST /notes/{{id}}/archive");
        let url = self.url(&["notes", id.as_str(), "archive"])?;
        self.send::<serde_json::Value>(self.client.post(url))?
            .into_ack()
    }

    fn unarchive_note(&self, id: &NoteId) -> Result<(), ServiceError> {
        debug!(%id, "POST /notes/{{id}}/unarchive");
        let url = self.url(&["notes", id.as_str(), "unarchive"])?;
        self.send::<serde_json::Value>(self.client.post(url))?
            .into_ack()
    }

    fn delete_note(&self, id: &NoteId) -> Result<(), ServiceError> {
        debug!(%id, "DELETE /notes/{{id}}");
        let url = self.url(&["notes", id.as_str()])?;
        self.send::<serde_json::Value>(self.client.delete(url))?
            .into_ack()
    }
}

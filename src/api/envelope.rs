//! Response envelope shared by every notes service endpoint.

use serde::Deserialize;
use serde::de::DeserializeOwned;

use super::ServiceError;

/// Discriminator value the service uses for successful responses.
pub const SUCCESS_STATUS: &str = "success";

/// `{"status": "...", "message": "...", "data": ...}`
///
/// `data` is absent on acknowledgements (archive, unarchive, delete) and on
/// failures; `message` is absent on most list responses.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub status: String,
    pub message: Option<String>,
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    /// Returns true when the discriminator reports success.
    pub fn is_success(&self) -> bool {
        self.status == SUCCESS_STATUS
    }

    /// Converts a failed envelope into the service's own error message.
    fn failure(self) -> ServiceError {
        let message = self
            .message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| format!("service responded with status \"{}\"", self.status));
        ServiceError::Api { message }
    }

    /// Unwraps the payload of a successful envelope.
    ///
    /// A successful envelope without `data` is a malformed response.
    pub fn into_data(self) -> Result<T, ServiceError> {
        if !self.is_success() {
            return Err(self.failure());
        }
        self.data.ok_or_else(|| ServiceError::Api {
            message: "Missing 'data' field in service response".to_string(),
        })
    }

    /// Checks an acknowledgement envelope, ignoring any payload.
    pub fn into_ack(self) -> Result<(), ServiceError> {
        if self.is_success() {
            Ok(())
        } else {
            Err(self.failure())
        }
    }
}

/// Decodes a raw response body into an envelope.
///
/// The body is decoded regardless of the HTTP status, since the service
/// reports failures (e.g. unknown ids) inside the envelope. Only when the body
/// is not an envelope does the HTTP status decide the error.
pub fn decode<T: DeserializeOwned>(status: u16, body: &str) -> Result<Envelope<T>, ServiceError> {
    match serde_json::from_str::<Envelope<T>>(body) {
        Ok(envelope) => Ok(envelope),
        Err(_) if !(200..300).contains(&status) => Err(ServiceError::Http { status }),
        Err(e) => Err(ServiceError::Decode(e)),
    }
}

//! The uniform response wrapper every DailyNeeds API call returns.
//!
//! ```json
//! {
//!   "isAutheticated": true,
//!   "messageType": 1,
//!   "statusCode": 200,
//!   "message": "Welcome",
//!   "result": { ... }
//! }
//! ```
//!
//! The server spells the flag `isAutheticated`. That spelling is kept on the
//! wire for compatibility; the correct spelling is also accepted when reading.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::enums::MessageType;

/// Message used by the placeholder envelope.
pub const NO_DATA_MESSAGE: &str = "No data available";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope<T> {
    #[serde(rename = "isAutheticated", alias = "isAuthenticated", default)]
    pub is_authenticated: bool,
    #[serde(default)]
    pub message_type: MessageType,
    #[serde(default = "default_status_code")]
    pub status_code: u16,
    #[serde(default)]
    pub message: String,
    pub result: Option<T>,
}

const fn default_status_code() -> u16 {
    200
}

/// Why an envelope could not be unwrapped into its payload.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EnvelopeError {
    /// The server answered with an error-level envelope.
    #[error("request rejected ({status_code}): {message}")]
    Rejected { status_code: u16, message: String },

    /// The envelope carried no `result`.
    #[error("response carried no result: {message}")]
    MissingResult { message: String },
}

impl<T> ResponseEnvelope<T> {
    /// A successful envelope around `result`.
    pub fn ok(result: T) -> Self {
        Self {
            is_authenticated: true,
            message_type: MessageType::Success,
            status_code: 200,
            message: String::new(),
            result: Some(result),
        }
    }

    /// Whether the envelope reports success at both the status and message level.
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code) && self.message_type != MessageType::Error
    }

    /// Unwrap the payload.
    ///
    /// # Errors
    ///
    /// Returns [`EnvelopeError::Rejected`] if the envelope signals failure and
    /// [`EnvelopeError::MissingResult`] if it carries no result.
    pub fn into_result(self) -> Result<T, EnvelopeError> {
        if !self.is_success() {
            return Err(EnvelopeError::Rejected {
                status_code: self.status_code,
                message: self.message,
            });
        }
        self.result.ok_or(EnvelopeError::MissingResult {
            message: self.message,
        })
    }

    /// Replace the payload, keeping the metadata.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ResponseEnvelope<U> {
        ResponseEnvelope {
            is_authenticated: self.is_authenticated,
            message_type: self.message_type,
            status_code: self.status_code,
            message: self.message,
            result: self.result.map(f),
        }
    }
}

impl<T: Default> ResponseEnvelope<T> {
    /// The well-formed placeholder shown when a call cannot be satisfied.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            is_authenticated: true,
            message_type: MessageType::Success,
            status_code: 200,
            message: NO_DATA_MESSAGE.to_string(),
            result: Some(T::default()),
        }
    }
}

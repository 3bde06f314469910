//! API client error types.

use dn_core::{CoreError, EnvelopeError};
use thiserror::Error;

const GENERIC_MESSAGE: &str = "An unexpected error occurred";

/// Broad failure category, for callers that branch on the kind of failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Host unreachable, connection refused, or timed out.
    Connectivity,
    /// The server answered with a non-2xx status.
    Http,
    /// The body was not valid JSON or did not match the expected shape.
    Deserialization,
    /// A well-formed envelope reported failure or carried no result.
    Envelope,
    /// The request could not be built.
    Validation,
}

/// Errors that can occur when talking to the DailyNeeds API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP transport error.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// API returned a non-success status code.
    #[error("HTTP error ({status}): {}", .message.as_deref().unwrap_or("no message"))]
    Status {
        /// HTTP status code.
        status: u16,
        /// Server-supplied `message` field, when the body carried one.
        message: Option<String>,
    },

    /// Failed to parse a response body.
    #[error("parse error: {0}")]
    Decode(String),

    /// The envelope reported failure.
    #[error("request rejected ({status_code}): {message}")]
    Rejected {
        /// `statusCode` from the envelope.
        status_code: u16,
        /// `message` from the envelope.
        message: String,
    },

    /// The envelope was successful but carried no result.
    #[error("response carried no result: {message}")]
    MissingResult {
        /// `message` from the envelope.
        message: String,
    },

    /// The request could not be built (bad input, bad URL, unserializable body).
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl ApiError {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Network(_) => ErrorKind::Connectivity,
            Self::Status { .. } => ErrorKind::Http,
            Self::Decode(_) => ErrorKind::Deserialization,
            Self::Rejected { .. } | Self::MissingResult { .. } => ErrorKind::Envelope,
            Self::InvalidRequest(_) => ErrorKind::Validation,
        }
    }

    /// HTTP status, for transport-level or envelope-level failures.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Network(error) => error.status().map(|s| s.as_u16()),
            Self::Status { status, .. } => Some(*status),
            Self::Rejected { status_code, .. } => Some(*status_code),
            Self::Decode(_) | Self::MissingResult { .. } | Self::InvalidRequest(_) => None,
        }
    }

    /// Message supplied by the server, if any.
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Status { message, .. } => message.as_deref(),
            Self::Rejected { message, .. } | Self::MissingResult { message } => {
                Some(message.as_str()).filter(|m| !m.trim().is_empty())
            }
            Self::Network(_) | Self::Decode(_) | Self::InvalidRequest(_) => None,
        }
    }

    /// Whether a retry could plausibly succeed (connect failure or timeout).
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Network(error) if error.is_connect() || error.is_timeout())
    }

    /// Text suitable for showing to an end user.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Network(error) if error.is_timeout() => {
                "Request timeout. Please try again.".to_string()
            }
            Self::Network(_) => {
                "Network error. Please check your internet connection and try again.".to_string()
            }
            Self::Status { status, message } => match status {
                400 => "Invalid request. Please check your input.".to_string(),
                401 => "Authentication failed. Please login again.".to_string(),
                403 => "Access denied. You do not have permission.".to_string(),
                404 => "Resource not found.".to_string(),
                408 => "Request timeout. Please try again.".to_string(),
                500 => "Server error. Please try again later.".to_string(),
                _ => message.clone().unwrap_or_else(|| GENERIC_MESSAGE.to_string()),
            },
            Self::Rejected { .. } | Self::MissingResult { .. } => self
                .server_message()
                .map_or_else(|| GENERIC_MESSAGE.to_string(), str::to_string),
            Self::Decode(_) => GENERIC_MESSAGE.to_string(),
            Self::InvalidRequest(reason) => reason.clone(),
        }
    }
}

impl From<EnvelopeError> for ApiError {
    fn from(error: EnvelopeError) -> Self {
        match error {
            EnvelopeError::Rejected {
                status_code,
                message,
            } => Self::Rejected {
                status_code,
                message,
            },
            EnvelopeError::MissingResult { message } => Self::MissingResult { message },
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(error: CoreError) -> Self {
        Self::InvalidRequest(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_exposes_code_and_message() {
        let error = ApiError::Status {
            status: 401,
            message: Some("invalid token".into()),
        };
        assert_eq!(error.kind(), ErrorKind::Http);
        assert_eq!(error.status(), Some(401));
        assert_eq!(error.server_message(), Some("invalid token"));
        assert_eq!(error.to_string(), "HTTP error (401): invalid token");
        assert_eq!(
            error.user_message(),
            "Authentication failed. Please login again."
        );
    }

    #[test]
    fn unmapped_status_uses_server_message() {
        let error = ApiError::Status {
            status: 409,
            message: Some("Customer already exists".into()),
        };
        assert_eq!(error.user_message(), "Customer already exists");

        let bare = ApiError::Status {
            status: 418,
            message: None,
        };
        assert_eq!(bare.user_message(), GENERIC_MESSAGE);
    }

    #[test]
    fn envelope_errors_convert() {
        let error = ApiError::from(EnvelopeError::Rejected {
            status_code: 200,
            message: "Invalid credentials".into(),
        });
        assert_eq!(error.kind(), ErrorKind::Envelope);
        assert_eq!(error.user_message(), "Invalid credentials");

        let empty = ApiError::from(EnvelopeError::MissingResult {
            message: String::new(),
        });
        assert_eq!(empty.server_message(), None);
        assert_eq!(empty.user_message(), GENERIC_MESSAGE);
    }

    #[test]
    fn core_errors_become_invalid_requests() {
        let error = ApiError::from(CoreError::MissingField { field: "address" });
        assert_eq!(error.kind(), ErrorKind::Validation);
        assert_eq!(error.user_message(), "address is required");
        assert!(!error.is_transient());
    }
}

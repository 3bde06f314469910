use std::path::PathBuf;

use dn_client::ApiError;
use thiserror::Error;

/// Failures of the persisted key-value store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("session store I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("session store at {} is corrupt: {reason}", path.display())]
    Corrupt { path: PathBuf, reason: String },
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("not authenticated: run `dailyneeds auth login`")]
    NotAuthenticated,

    #[error("{field} must not be empty")]
    EmptyCredential { field: &'static str },

    #[error("{0}")]
    InvalidCredentials(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("session serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Api(#[from] ApiError),
}

impl AuthError {
    /// Text suitable for showing to an end user.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Api(error) => error.user_message(),
            Self::InvalidCredentials(message) => message.clone(),
            other => other.to_string(),
        }
    }
}

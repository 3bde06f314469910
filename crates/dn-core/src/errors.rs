//! Cross-cutting error types for DailyNeeds.
//!
//! Transport and session errors live in their own crates (`ApiError` in
//! `dn-client`, `AuthError` in `dn-auth`). This module only covers failures
//! raised while building requests from user input.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// A required field was empty.
    #[error("{field} is required")]
    MissingField { field: &'static str },

    /// Data failed validation (format, range, constraints).
    #[error("Validation error: {0}")]
    Validation(String),

    /// A role code outside the legacy mapping table.
    #[error("unknown role code: {0}")]
    UnknownRole(String),
}

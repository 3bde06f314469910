//! Domain services: one per API area, each holding a shared [`ApiClient`].
//!
//! Services unwrap the response envelope and return typed results. They never
//! substitute placeholder data; that decision belongs to the caller.

mod agent;
mod auth;
mod customer;
mod items;
mod orders;

pub use agent::AgentService;
pub use auth::AuthService;
pub use customer::CustomerService;
pub use items::ItemService;
pub use orders::OrderService;

use dn_core::ResponseEnvelope;
use dn_core::entities::Ack;

use crate::error::ApiError;

/// Unwrap an envelope into its payload.
pub(crate) fn unwrap<T>(envelope: ResponseEnvelope<T>) -> Result<T, ApiError> {
    Ok(envelope.into_result()?)
}

/// Turn a write endpoint's envelope into an [`Ack`].
///
/// Write endpoints return arbitrary (often empty) results, so only the
/// envelope metadata decides success.
pub(crate) fn acknowledge(envelope: ResponseEnvelope<serde_json::Value>) -> Result<Ack, ApiError> {
    if !envelope.is_success() {
        return Err(ApiError::Rejected {
            status_code: envelope.status_code,
            message: envelope.message,
        });
    }
    Ok(Ack {
        success: true,
        message: envelope.message,
    })
}

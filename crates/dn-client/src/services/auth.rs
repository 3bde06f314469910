use std::sync::Arc;

use dn_core::ResponseEnvelope;
use dn_core::entities::{Ack, LoginRequest, LoginResult};
use serde_json::Value;

use super::acknowledge;
use crate::client::ApiClient;
use crate::endpoints;
use crate::error::ApiError;

/// Login and logout calls.
#[derive(Debug, Clone)]
pub struct AuthService {
    client: Arc<ApiClient>,
}

impl AuthService {
    #[must_use]
    pub const fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Post credentials. The envelope is returned whole so the caller can show
    /// the server's `message` when the login is refused.
    ///
    /// A refused envelope comes back with `result: None` whatever the server
    /// put there (`[]`, `{}`, `null`); only an accepted one has its result
    /// decoded as a [`LoginResult`].
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the call fails at the transport or HTTP level,
    /// or [`ApiError::Decode`] if an accepted login carries a malformed result.
    pub async fn login(
        &self,
        request: &LoginRequest,
    ) -> Result<ResponseEnvelope<LoginResult>, ApiError> {
        let raw: ResponseEnvelope<Value> =
            self.client.post(endpoints::auth::LOGIN, Some(request)).await?;
        let accepted = raw.is_success() && raw.is_authenticated;

        let result = match raw.result {
            Some(value) if accepted && !value.is_null() => Some(
                serde_json::from_value(value)
                    .map_err(|e| ApiError::Decode(format!("login result: {e}")))?,
            ),
            _ => None,
        };
        Ok(ResponseEnvelope {
            is_authenticated: raw.is_authenticated,
            message_type: raw.message_type,
            status_code: raw.status_code,
            message: raw.message,
            result,
        })
    }

    /// Tell the server the current token is done with.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the call fails or the server rejects it.
    pub async fn logout(&self) -> Result<Ack, ApiError> {
        let envelope = self
            .client
            .post::<_, ()>(endpoints::auth::LOGOUT, None)
            .await?;
        acknowledge(envelope)
    }
}

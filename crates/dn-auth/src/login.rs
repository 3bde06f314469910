//! Login and logout flows that combine the API call with the session
//! transition.

use dn_client::{ApiError, AuthService};
use dn_core::entities::{LoginRequest, LoginResult, User};

use crate::error::AuthError;
use crate::session::SessionManager;
use crate::store::KeyValueStore;

/// Shown when the server refuses a login without saying why.
pub const INVALID_CREDENTIALS: &str = "Invalid credentials";

/// Authenticate against the API and, on success, sign the session in.
///
/// # Errors
///
/// Returns [`AuthError::InvalidCredentials`] when the server refuses the
/// credentials (carrying the server's message when it sent one),
/// [`AuthError::Api`] for transport failures, and any error from
/// [`SessionManager::login`].
pub async fn sign_in<S: KeyValueStore>(
    manager: &SessionManager<S>,
    auth: &AuthService,
    request: &LoginRequest,
) -> Result<User, AuthError> {
    tracing::debug!(mobile = request.mobile(), role = %request.role(), "signing in");

    let envelope = auth.login(request).await.map_err(refused_or_failed)?;
    let accepted = envelope.is_success() && envelope.is_authenticated;
    let message = envelope.message.clone();

    let LoginResult { token, user } = match envelope.result {
        Some(result) if accepted && !result.token.trim().is_empty() => result,
        _ => return Err(invalid_credentials(Some(&message))),
    };

    manager.login(user.clone(), &token).await?;
    Ok(user)
}

/// Tell the server, then always clear the local session.
///
/// # Errors
///
/// Returns [`AuthError::Store`] only if the persisted session could not be
/// deleted; server-side failures are logged and ignored.
pub async fn sign_out<S: KeyValueStore>(
    manager: &SessionManager<S>,
    auth: &AuthService,
) -> Result<(), AuthError> {
    if manager.is_authenticated()
        && let Err(error) = auth.logout().await
    {
        tracing::warn!(%error, "server logout failed; clearing local session anyway");
    }
    manager.logout().await
}

fn refused_or_failed(error: ApiError) -> AuthError {
    match &error {
        ApiError::Status { status, message }
            if message.is_some() || matches!(status, 400 | 401 | 403) =>
        {
            invalid_credentials(message.as_deref())
        }
        _ => AuthError::Api(error),
    }
}

fn invalid_credentials(message: Option<&str>) -> AuthError {
    let message = message
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .unwrap_or(INVALID_CREDENTIALS);
    AuthError::InvalidCredentials(message.to_string())
}

//! The single source of truth for who is signed in.
//!
//! [`SessionManager`] owns the in-memory [`Session`], keeps it in step with
//! the persisted store, and pushes token changes to the HTTP client. All
//! transitions (`login`, `logout`, `restore`) are serialized; reads never
//! block and always see the last completed transition.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use dn_client::TokenSink;
use dn_core::entities::{Item, User};
use dn_core::enums::Role;
use tokio::sync::{Mutex, OnceCell, watch};

use crate::bootstrap::BootstrapOutcome;
use crate::error::{AuthError, StoreError};
use crate::store::{KeyValueStore, TOKEN_KEY, USER_KEY};

/// Snapshot of the session state.
#[derive(Clone, Default, PartialEq)]
pub struct Session {
    pub token: Option<String>,
    pub user: Option<User>,
    pub mobile_number: String,
    pub role: Role,
    pub selected_item: Option<Item>,
}

impl Session {
    /// Authenticated iff both a token and a user are present.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.token.is_some() && self.user.is_some()
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("user", &self.user)
            .field("mobile_number", &self.mobile_number)
            .field("role", &self.role)
            .field("selected_item", &self.selected_item)
            .finish()
    }
}

pub struct SessionManager<S> {
    store: S,
    sink: Arc<dyn TokenSink>,
    state: watch::Sender<Session>,
    pub(crate) transition: Mutex<()>,
    pub(crate) bootstrapped: OnceCell<BootstrapOutcome>,
}

impl<S: KeyValueStore> SessionManager<S> {
    /// Create an anonymous session backed by `store`, pushing token changes
    /// to `sink`.
    pub fn new(store: S, sink: Arc<dyn TokenSink>) -> Self {
        Self {
            store,
            sink,
            state: watch::Sender::new(Session::default()),
            transition: Mutex::new(()),
            bootstrapped: OnceCell::new(),
        }
    }

    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Anonymous -> Authenticated.
    ///
    /// Persists the token, then the user, then updates memory and the token
    /// sink. If persisting fails the previously stored values are put back
    /// and neither memory nor the sink is touched.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::EmptyCredential`] for a blank token or a user
    /// without a mobile number, and [`AuthError::Store`] if persisting fails.
    pub async fn login(&self, user: User, token: &str) -> Result<(), AuthError> {
        if token.trim().is_empty() {
            return Err(AuthError::EmptyCredential { field: "token" });
        }
        if user.is_empty() {
            return Err(AuthError::EmptyCredential {
                field: "user.mobile",
            });
        }
        let serialized = serde_json::to_string(&user)?;

        let _guard = self.transition.lock().await;
        let previous = match self.store.get_many(&[TOKEN_KEY, USER_KEY]).await {
            Ok(previous) => previous,
            Err(error) => {
                tracing::warn!(%error, "could not read persisted session before login");
                HashMap::new()
            }
        };

        if let Err(error) = self.persist(token, &serialized).await {
            tracing::warn!(%error, "persisting session failed; restoring previous values");
            self.put_back(&previous).await;
            return Err(error.into());
        }

        self.apply(user, token);
        Ok(())
    }

    async fn persist(&self, token: &str, user: &str) -> Result<(), StoreError> {
        self.store.set(TOKEN_KEY, token).await?;
        self.store.set(USER_KEY, user).await
    }

    async fn put_back(&self, previous: &HashMap<String, String>) {
        for key in [TOKEN_KEY, USER_KEY] {
            let result = match previous.get(key) {
                Some(value) => self.store.set(key, value).await,
                None => self.store.delete(&[key]).await,
            };
            if let Err(error) = result {
                tracing::warn!(%error, key, "could not restore persisted session value");
            }
        }
    }

    /// Authenticated -> Anonymous. Calling it while anonymous is a no-op.
    ///
    /// Memory and the token sink are always reset, even when the store
    /// cannot be cleared.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Store`] if the persisted keys could not be deleted.
    pub async fn logout(&self) -> Result<(), AuthError> {
        let _guard = self.transition.lock().await;
        let deleted = self.store.delete(&[TOKEN_KEY, USER_KEY]).await;

        let previous = self.state.send_replace(Session::default());
        self.sink.clear_token();
        if previous.is_authenticated() {
            tracing::info!("session cleared");
        }
        deleted.map_err(AuthError::from)
    }

    /// Adopt an already-persisted session. Used by bootstrap only, which
    /// holds `transition` for the whole read-and-adopt cycle.
    pub(crate) fn restore(&self, user: User, token: &str) -> Result<(), AuthError> {
        if token.trim().is_empty() {
            return Err(AuthError::EmptyCredential { field: "token" });
        }
        if user.is_empty() {
            return Err(AuthError::EmptyCredential {
                field: "user.mobile",
            });
        }
        self.apply(user, token);
        Ok(())
    }

    fn apply(&self, user: User, token: &str) {
        tracing::info!(user_id = %user.id, role = %user.user_type, "session authenticated");
        self.state.send_replace(Session {
            token: Some(token.to_string()),
            mobile_number: user.mobile.clone(),
            role: user.user_type,
            user: Some(user),
            selected_item: None,
        });
        self.sink.set_token(token);
    }

    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.state.borrow().token.clone()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_authenticated()
    }

    #[must_use]
    pub fn user(&self) -> Option<User> {
        self.state.borrow().user.clone()
    }

    #[must_use]
    pub fn mobile_number(&self) -> String {
        self.state.borrow().mobile_number.clone()
    }

    #[must_use]
    pub fn role(&self) -> Role {
        self.state.borrow().role
    }

    #[must_use]
    pub fn selected_item(&self) -> Option<Item> {
        self.state.borrow().selected_item.clone()
    }

    #[must_use]
    pub fn snapshot(&self) -> Session {
        self.state.borrow().clone()
    }

    /// Remember the item the user drilled into. Does not touch auth state.
    pub fn select_item(&self, item: Option<Item>) {
        self.state.send_modify(|session| session.selected_item = item);
    }

    /// Watch for session changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.state.subscribe()
    }

    /// Fail with [`AuthError::NotAuthenticated`] unless signed in.
    ///
    /// # Errors
    ///
    /// See above.
    pub fn require_authenticated(&self) -> Result<User, AuthError> {
        let session = self.state.borrow();
        match (&session.token, &session.user) {
            (Some(_), Some(user)) => Ok(user.clone()),
            _ => Err(AuthError::NotAuthenticated),
        }
    }
}

impl<S> fmt::Debug for SessionManager<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionManager")
            .field("session", &*self.state.borrow())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use dn_core::entities::RecordId;
    use pretty_assertions::assert_eq;
    use std::sync::Mutex as StdMutex;

    #[derive(Default)]
    struct RecordingSink {
        token: StdMutex<Option<String>>,
    }

    impl TokenSink for RecordingSink {
        fn set_token(&self, token: &str) {
            *self.token.lock().unwrap() = Some(token.to_string());
        }
        fn clear_token(&self) {
            *self.token.lock().unwrap() = None;
        }
        fn current_token(&self) -> Option<String> {
            self.token.lock().unwrap().clone()
        }
    }

    fn user(role: Role) -> User {
        User {
            id: RecordId::from(1),
            mobile: "9876543210".into(),
            user_type: role,
            name: Some("Amit Kumar".into()),
            address: None,
            is_active: true,
            created_at: "2024-01-01".into(),
        }
    }

    fn manager() -> (SessionManager<MemoryStore>, Arc<RecordingSink>) {
        let sink = Arc::new(RecordingSink::default());
        let manager = SessionManager::new(MemoryStore::new(), sink.clone());
        (manager, sink)
    }

    #[tokio::test]
    async fn starts_anonymous() {
        let (manager, _) = manager();
        assert!(!manager.is_authenticated());
        assert_eq!(manager.token(), None);
        assert_eq!(manager.role(), Role::Customer);
        assert!(matches!(
            manager.require_authenticated(),
            Err(AuthError::NotAuthenticated)
        ));
    }

    #[tokio::test]
    async fn login_derives_mobile_and_role_from_user() {
        let (manager, sink) = manager();
        manager.login(user(Role::Agent), "abc123").await.unwrap();

        let session = manager.snapshot();
        assert!(session.is_authenticated());
        assert_eq!(session.mobile_number, "9876543210");
        assert_eq!(session.role, Role::Agent);
        assert_eq!(sink.current_token().as_deref(), Some("abc123"));
    }

    #[tokio::test]
    async fn empty_credentials_leave_state_untouched() {
        let (manager, sink) = manager();
        let err = manager.login(user(Role::Customer), "  ").await.unwrap_err();
        assert!(matches!(err, AuthError::EmptyCredential { field: "token" }));

        let mut nobody = user(Role::Customer);
        nobody.mobile = String::new();
        assert!(manager.login(nobody, "abc123").await.is_err());

        assert!(!manager.is_authenticated());
        assert!(manager.store().is_empty());
        assert_eq!(sink.current_token(), None);
    }

    #[tokio::test]
    async fn subscribers_see_transitions() {
        let (manager, _) = manager();
        let mut rx = manager.subscribe();
        manager.login(user(Role::Customer), "abc123").await.unwrap();
        rx.changed().await.unwrap();
        assert!(rx.borrow_and_update().is_authenticated());

        manager.logout().await.unwrap();
        rx.changed().await.unwrap();
        assert!(!rx.borrow().is_authenticated());
    }

    #[tokio::test]
    async fn select_item_keeps_auth_state() {
        let (manager, _) = manager();
        manager.login(user(Role::Customer), "abc123").await.unwrap();
        let item = Item {
            id: RecordId::from(3),
            name: "Fresh Milk".into(),
            image_url: String::new(),
            price: 25.0,
            unit: "1L".into(),
            brand: "Amul".into(),
            description: None,
        };
        manager.select_item(Some(item.clone()));
        assert_eq!(manager.selected_item(), Some(item));
        assert!(manager.is_authenticated());
    }

    #[test]
    fn debug_redacts_token() {
        let session = Session {
            token: Some("abc123".into()),
            ..Session::default()
        };
        let debug = format!("{session:?}");
        assert!(!debug.contains("abc123"));
        assert!(debug.contains("<redacted>"));
    }
}

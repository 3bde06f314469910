//! One-time reconciliation of persisted session data at startup.

use dn_core::entities::{RecordId, User};

use crate::session::SessionManager;
use crate::store::{KeyValueStore, TOKEN_KEY, USER_KEY};

/// What startup made of the persisted session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BootstrapOutcome {
    /// A complete, parseable session was adopted.
    Restored { user_id: RecordId },
    /// Nothing was persisted.
    Anonymous,
    /// Partial or corrupt data was found and deleted.
    Cleared { reason: String },
}

impl BootstrapOutcome {
    #[must_use]
    pub const fn is_restored(&self) -> bool {
        matches!(self, Self::Restored { .. })
    }
}

impl<S: KeyValueStore> SessionManager<S> {
    /// Reconcile the persisted store into memory.
    ///
    /// Runs at most once per manager; concurrent and later callers get the
    /// outcome of that single run. Never fails: anything unexpected degrades
    /// to an anonymous session with the persisted keys removed.
    pub async fn bootstrap(&self) -> BootstrapOutcome {
        self.bootstrapped
            .get_or_init(|| self.reconcile())
            .await
            .clone()
    }

    async fn reconcile(&self) -> BootstrapOutcome {
        let _guard = self.transition.lock().await;

        let mut persisted = match self.store().get_many(&[TOKEN_KEY, USER_KEY]).await {
            Ok(persisted) => persisted,
            Err(error) => return self.discard(format!("session store unreadable: {error}")).await,
        };

        let (token, raw_user) = match (persisted.remove(TOKEN_KEY), persisted.remove(USER_KEY)) {
            (None, None) => {
                tracing::debug!("no persisted session");
                return BootstrapOutcome::Anonymous;
            }
            (Some(token), Some(raw_user)) => (token, raw_user),
            (Some(_), None) => return self.discard("token present without user".into()).await,
            (None, Some(_)) => return self.discard("user present without token".into()).await,
        };
        if token.trim().is_empty() {
            return self.discard("stored token is blank".into()).await;
        }

        let user: User = match serde_json::from_str(&raw_user) {
            Ok(user) => user,
            Err(error) => return self.discard(format!("stored user is corrupt: {error}")).await,
        };
        let user_id = user.id.clone();

        match self.restore(user, &token) {
            Ok(()) => BootstrapOutcome::Restored { user_id },
            Err(error) => self.discard(format!("stored session rejected: {error}")).await,
        }
    }

    async fn discard(&self, reason: String) -> BootstrapOutcome {
        tracing::warn!(%reason, "discarding persisted session");
        if let Err(error) = self.store().delete(&[TOKEN_KEY, USER_KEY]).await {
            tracing::warn!(%error, "could not delete persisted session");
        }
        BootstrapOutcome::Cleared { reason }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use dn_client::TokenSink;
    use std::sync::Arc;

    struct NullSink;

    impl TokenSink for NullSink {
        fn set_token(&self, _: &str) {}
        fn clear_token(&self) {}
        fn current_token(&self) -> Option<String> {
            None
        }
    }

    #[tokio::test]
    async fn empty_store_is_anonymous() {
        let manager = SessionManager::new(MemoryStore::new(), Arc::new(NullSink));
        assert_eq!(manager.bootstrap().await, BootstrapOutcome::Anonymous);
        assert!(!manager.is_authenticated());
    }

    #[tokio::test]
    async fn user_without_token_is_cleared() {
        let store = MemoryStore::with_entries([(USER_KEY, r#"{"id":1,"mobile":"9876543210"}"#)]);
        let manager = SessionManager::new(store, Arc::new(NullSink));

        let outcome = manager.bootstrap().await;
        assert!(matches!(outcome, BootstrapOutcome::Cleared { .. }));
        assert!(manager.store().is_empty());
    }

    #[tokio::test]
    async fn blank_token_alone_is_cleared() {
        let store = MemoryStore::with_entries([(TOKEN_KEY, "")]);
        let manager = SessionManager::new(store, Arc::new(NullSink));

        let outcome = manager.bootstrap().await;
        assert!(matches!(
            outcome,
            BootstrapOutcome::Cleared { ref reason } if reason.contains("without user")
        ));
        assert!(manager.store().is_empty());
    }

    #[tokio::test]
    async fn blank_token_with_user_is_cleared() {
        let store = MemoryStore::with_entries([
            (TOKEN_KEY, "   "),
            (USER_KEY, r#"{"id":1,"mobile":"9876543210"}"#),
        ]);
        let manager = SessionManager::new(store, Arc::new(NullSink));

        let outcome = manager.bootstrap().await;
        assert!(matches!(
            outcome,
            BootstrapOutcome::Cleared { ref reason } if reason.contains("blank")
        ));
        assert!(!manager.is_authenticated());
        assert!(manager.store().is_empty());
    }

    #[tokio::test]
    async fn blank_mobile_is_cleared() {
        let store = MemoryStore::with_entries([
            (TOKEN_KEY, "abc123"),
            (USER_KEY, r#"{"id":1,"mobile":""}"#),
        ]);
        let manager = SessionManager::new(store, Arc::new(NullSink));

        assert!(!manager.bootstrap().await.is_restored());
        assert!(!manager.is_authenticated());
        assert!(manager.store().is_empty());
    }

    #[tokio::test]
    async fn runs_only_once() {
        let store = MemoryStore::with_entries([
            (TOKEN_KEY, "abc123"),
            (USER_KEY, r#"{"id":1,"mobile":"9876543210","userType":2}"#),
        ]);
        let manager = SessionManager::new(store, Arc::new(NullSink));

        let first = manager.bootstrap().await;
        manager.logout().await.unwrap();
        let second = manager.bootstrap().await;

        assert_eq!(first, second);
        assert!(!manager.is_authenticated());
    }
}

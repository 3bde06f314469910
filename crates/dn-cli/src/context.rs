use std::sync::Arc;

use anyhow::Context;
use dn_auth::{AuthError, BootstrapOutcome, FileStore, SessionManager};
use dn_client::{AgentService, ApiClient, AuthService, CustomerService, ItemService, OrderService};
use dn_config::DnConfig;
use dn_core::{Role, User};

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub config: DnConfig,
    pub session: SessionManager<FileStore>,
    pub auth: AuthService,
    pub items: ItemService,
    pub customer: CustomerService,
    pub agent: AgentService,
    pub orders: OrderService,
    pub bootstrap: BootstrapOutcome,
}

impl AppContext {
    /// Build the client and session, then restore any persisted session.
    ///
    /// Bootstrap completes before this returns, so no command can issue an
    /// authorized call ahead of it.
    pub async fn init(config: DnConfig) -> anyhow::Result<Self> {
        let session_path = config
            .storage
            .resolved_session_path()
            .context("cannot locate the session file: set DAILYNEEDS_STORAGE__SESSION_PATH")?;
        let client = Arc::new(
            ApiClient::new(&config.api).context("failed to initialize the DailyNeeds API client")?,
        );
        let session = SessionManager::new(FileStore::new(session_path), client.clone());
        let bootstrap = session.bootstrap().await;
        tracing::debug!(?bootstrap, "session bootstrap finished");

        Ok(Self {
            auth: AuthService::new(Arc::clone(&client)),
            items: ItemService::new(Arc::clone(&client)),
            customer: CustomerService::new(Arc::clone(&client)),
            agent: AgentService::new(Arc::clone(&client)),
            orders: OrderService::new(client),
            config,
            session,
            bootstrap,
        })
    }

    /// The signed-in user.
    pub fn require_session(&self) -> Result<User, AuthError> {
        self.session.require_authenticated()
    }

    /// The signed-in user, who must be acting as `role`.
    pub fn require_role(&self, role: Role) -> anyhow::Result<User> {
        let user = self.require_session()?;
        let current = self.session.role();
        if current != role {
            anyhow::bail!("this command is for {role} accounts; you are signed in as {current}");
        }
        Ok(user)
    }
}

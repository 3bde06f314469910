//! # dn-auth
//!
//! Session lifecycle for the DailyNeeds client.
//!
//! - [`store`]: the persisted key-value store (`authToken`, `user`)
//! - [`session`]: the [`SessionManager`] and its Anonymous/Authenticated transitions
//! - [`bootstrap`]: one-time startup reconciliation of persisted state
//! - [`login`]: API-backed sign-in and sign-out flows

pub mod bootstrap;
pub mod error;
pub mod login;
pub mod session;
pub mod store;

pub use bootstrap::BootstrapOutcome;
pub use error::{AuthError, StoreError};
pub use login::{sign_in, sign_out};
pub use session::{Session, SessionManager};
pub use store::{FileStore, KeyValueStore, MemoryStore, TOKEN_KEY, USER_KEY};

//! General application configuration.

use dn_core::Role;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Role preselected on the login form (`customer` or `agent`).
    #[serde(default)]
    pub default_role: Role,
}

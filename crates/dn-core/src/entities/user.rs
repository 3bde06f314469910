use serde::{Deserialize, Serialize};

use crate::entities::RecordId;
use crate::enums::Role;

/// Server-issued identity record, immutable until the next login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: RecordId,
    pub mobile: String,
    #[serde(default)]
    pub user_type: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub created_at: String,
}

impl User {
    /// A record with no mobile number cannot identify anyone.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.mobile.trim().is_empty()
    }

    /// Name to greet the user with, falling back to the mobile number.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(&self.mobile)
    }
}

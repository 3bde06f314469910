//! Roles, envelope message types, and status enums for DailyNeeds.
//!
//! The API speaks two role dialects: numeric codes (`1`/`2`, sometimes as
//! strings) and lowercase names (`"customer"`/`"agent"`). Both collapse into
//! [`Role`] here and nowhere else.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::errors::CoreError;

// ---------------------------------------------------------------------------
// Role
// ---------------------------------------------------------------------------

/// Who is acting in the app.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Role {
    #[default]
    Customer,
    Agent,
}

/// Legacy numeric codes, in one table.
const LEGACY_CODES: [(u8, Role); 2] = [(1, Role::Customer), (2, Role::Agent)];

impl Role {
    /// Map a legacy numeric code (`1` customer, `2` agent).
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::UnknownRole`] for any other code.
    pub fn from_legacy_code(code: u8) -> Result<Self, CoreError> {
        LEGACY_CODES
            .iter()
            .find(|(c, _)| *c == code)
            .map(|(_, role)| *role)
            .ok_or_else(|| CoreError::UnknownRole(code.to_string()))
    }

    /// The numeric code the login endpoint expects.
    #[must_use]
    pub fn legacy_code(self) -> u8 {
        LEGACY_CODES
            .iter()
            .find(|(_, role)| *role == self)
            .map_or(1, |(code, _)| *code)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Customer => "customer",
            Self::Agent => "agent",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(code) = trimmed.parse::<u8>() {
            return Self::from_legacy_code(code);
        }
        match trimmed.to_ascii_lowercase().as_str() {
            "customer" => Ok(Self::Customer),
            "agent" => Ok(Self::Agent),
            _ => Err(CoreError::UnknownRole(trimmed.to_string())),
        }
    }
}

impl Serialize for Role {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RoleRepr {
    Code(u8),
    Text(String),
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let parsed = match RoleRepr::deserialize(deserializer)? {
            RoleRepr::Code(code) => Self::from_legacy_code(code),
            RoleRepr::Text(text) => text.parse(),
        };
        parsed.map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// MessageType
// ---------------------------------------------------------------------------

/// Severity carried by every response envelope (`1`, `2`, `3` on the wire).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum MessageType {
    #[default]
    Success,
    Warning,
    Error,
}

impl From<MessageType> for u8 {
    fn from(value: MessageType) -> Self {
        match value {
            MessageType::Success => 1,
            MessageType::Warning => 2,
            MessageType::Error => 3,
        }
    }
}

impl TryFrom<u8> for MessageType {
    type Error = CoreError;

    fn try_from(value: u8) -> Result<Self, CoreError> {
        match value {
            1 => Ok(Self::Success),
            2 => Ok(Self::Warning),
            3 => Ok(Self::Error),
            other => Err(CoreError::Validation(format!(
                "unknown message type {other}"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// PaymentStatus
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    Overdue,
    Paid,
}

impl PaymentStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Overdue => "overdue",
            Self::Paid => "paid",
        }
    }

    /// Whether an agent still has to chase this payment.
    #[must_use]
    pub const fn is_outstanding(self) -> bool {
        matches!(self, Self::Pending | Self::Overdue)
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// DeliveryStatus
// ---------------------------------------------------------------------------

/// Status of one day in a monthly delivery history.
///
/// The server sends these as free-form strings (`"Delivered"`, `"missed"`, ...),
/// so history entries keep the raw text and parse on demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeliveryStatus {
    Delivered,
    Pending,
    Vacation,
    Missed,
}

impl FromStr for DeliveryStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "delivered" => Ok(Self::Delivered),
            "pending" => Ok(Self::Pending),
            "vacation" => Ok(Self::Vacation),
            "missed" | "cancelled" => Ok(Self::Missed),
            other => Err(CoreError::Validation(format!(
                "unknown delivery status '{other}'"
            ))),
        }
    }
}

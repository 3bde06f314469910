use chrono::NaiveDate;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

use crate::entities::{RecordId, User};
use crate::enums::Role;
use crate::errors::CoreError;

const MOBILE_DIGITS: usize = 10;

/// Credentials posted to the login endpoint.
///
/// `userType` goes out as the legacy numeric code.
#[derive(Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    mobile: String,
    password: String,
    #[serde(serialize_with = "serialize_legacy_role")]
    user_type: Role,
}

fn serialize_legacy_role<S: Serializer>(role: &Role, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u8(role.legacy_code())
}

impl LoginRequest {
    /// Build a login request, applying the login form's checks.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::MissingField`] for an empty mobile or password and
    /// [`CoreError::Validation`] if the mobile is not exactly ten digits.
    pub fn new(
        mobile: impl Into<String>,
        password: impl Into<String>,
        role: Role,
    ) -> Result<Self, CoreError> {
        let mobile = mobile.into().trim().to_string();
        let password = password.into();

        if mobile.is_empty() {
            return Err(CoreError::MissingField { field: "mobile" });
        }
        if password.is_empty() {
            return Err(CoreError::MissingField { field: "password" });
        }
        if mobile.len() != MOBILE_DIGITS || !mobile.chars().all(|c| c.is_ascii_digit()) {
            return Err(CoreError::Validation(
                "enter a valid 10-digit mobile number".into(),
            ));
        }

        Ok(Self {
            mobile,
            password,
            user_type: role,
        })
    }

    #[must_use]
    pub fn mobile(&self) -> &str {
        &self.mobile
    }

    #[must_use]
    pub const fn role(&self) -> Role {
        self.user_type
    }
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("mobile", &self.mobile)
            .field("password", &"<redacted>")
            .field("user_type", &self.user_type)
            .finish()
    }
}

/// Payload of a successful login envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResult {
    pub token: String,
    pub user: User,
}

/// Customer request to change an existing subscription.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRequest {
    pub item_id: RecordId,
    pub brand: String,
    pub item_count: u32,
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alternate_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_instructions: Option<String>,
}

impl UpdateRequest {
    /// # Errors
    ///
    /// Returns [`CoreError`] if the address is blank or the count is zero.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.address.trim().is_empty() {
            return Err(CoreError::MissingField { field: "address" });
        }
        if self.item_count == 0 {
            return Err(CoreError::Validation("item count must be at least 1".into()));
        }
        Ok(())
    }
}

/// Customer request to pause deliveries over a date range (inclusive).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VacationRequest {
    pub from_date: NaiveDate,
    pub to_date: NaiveDate,
    pub item_id: RecordId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl VacationRequest {
    /// Number of paused days, both ends included.
    #[must_use]
    pub fn days(&self) -> i64 {
        (self.to_date - self.from_date).num_days() + 1
    }

    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] if the range ends before it starts.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.to_date < self.from_date {
            return Err(CoreError::Validation(format!(
                "vacation ends ({}) before it starts ({})",
                self.to_date, self.from_date
            )));
        }
        Ok(())
    }
}

/// Acknowledgement returned by write endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ack {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn login_request_serializes_numeric_user_type() {
        let request = LoginRequest::new("9876543210", "password", Role::Customer).unwrap();
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({ "mobile": "9876543210", "password": "password", "userType": 1 })
        );

        let agent = LoginRequest::new("9123456789", "secret", Role::Agent).unwrap();
        assert_eq!(serde_json::to_value(&agent).unwrap()["userType"], 2);
    }

    #[test]
    fn login_request_validates_form() {
        assert_eq!(
            LoginRequest::new("", "pw", Role::Customer).unwrap_err(),
            CoreError::MissingField { field: "mobile" }
        );
        assert_eq!(
            LoginRequest::new("9876543210", "", Role::Customer).unwrap_err(),
            CoreError::MissingField { field: "password" }
        );
        assert!(LoginRequest::new("98765", "pw", Role::Customer).is_err());
        assert!(LoginRequest::new("98765abcde", "pw", Role::Customer).is_err());
    }

    #[test]
    fn login_request_debug_hides_password() {
        let request = LoginRequest::new("9876543210", "hunter22", Role::Agent).unwrap();
        let debug = format!("{request:?}");
        assert!(!debug.contains("hunter22"));
        assert!(debug.contains("9876543210"));
    }

    #[test]
    fn vacation_range_is_inclusive_and_ordered() {
        let request = VacationRequest {
            from_date: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            to_date: NaiveDate::from_ymd_opt(2024, 1, 12).unwrap(),
            item_id: RecordId::from(3),
            reason: None,
        };
        assert!(request.validate().is_ok());
        assert_eq!(request.days(), 3);

        let inverted = VacationRequest {
            from_date: request.to_date,
            to_date: request.from_date,
            ..request
        };
        assert!(inverted.validate().is_err());
    }

    #[test]
    fn vacation_dates_serialize_as_iso() {
        let request = VacationRequest {
            from_date: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            to_date: NaiveDate::from_ymd_opt(2024, 2, 5).unwrap(),
            item_id: RecordId::from("milk-1"),
            reason: Some("travel".into()),
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["fromDate"], "2024-02-01");
        assert_eq!(value["toDate"], "2024-02-05");
        assert_eq!(value["itemId"], "milk-1");
    }

    #[test]
    fn update_request_requires_address_and_count() {
        let mut request = UpdateRequest {
            item_id: RecordId::from(1),
            brand: "Amul".into(),
            item_count: 2,
            address: "A-101 Merlion Apartments".into(),
            alternate_address: None,
            special_instructions: None,
        };
        assert!(request.validate().is_ok());
        request.item_count = 0;
        assert!(request.validate().is_err());
    }
}

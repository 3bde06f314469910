use serde::{Deserialize, Serialize};

use crate::entities::RecordId;
use crate::enums::PaymentStatus;

/// A customer on an agent's delivery roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentCustomer {
    pub id: RecordId,
    pub name: String,
    pub mobile: String,
    #[serde(default)]
    pub apartment: String,
    #[serde(default)]
    pub tower: String,
    #[serde(default)]
    pub flat: String,
    #[serde(default)]
    pub delivered: u32,
    #[serde(default)]
    pub pending: u32,
    #[serde(default)]
    pub total: f64,
}

/// Roster filter; unset fields are left out of the query string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerFilter {
    pub apartment: Option<String>,
    pub tower: Option<String>,
    pub flat: Option<String>,
}

impl CustomerFilter {
    /// Query pairs for the fields that are set.
    #[must_use]
    pub fn to_query(&self) -> Vec<(String, String)> {
        [
            ("apartment", &self.apartment),
            ("tower", &self.tower),
            ("flat", &self.flat),
        ]
        .into_iter()
        .filter_map(|(key, value)| {
            value
                .as_deref()
                .filter(|v| !v.trim().is_empty())
                .map(|v| (key.to_string(), v.to_string()))
        })
        .collect()
    }
}

/// Body for adjusting a customer's delivered count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryChange {
    pub change: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRecord {
    pub id: RecordId,
    pub customer_name: String,
    pub mobile: String,
    pub item: String,
    pub amount: f64,
    pub due_date: String,
    pub status: PaymentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub days_overdue: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_payment_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyReport {
    pub id: RecordId,
    pub customer_name: String,
    pub mobile: String,
    pub item: String,
    pub price: f64,
    pub delivery_charge: f64,
    pub delivered_count: u32,
    pub total_amount: f64,
    pub month: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_customers: u32,
    pub monthly_revenue: f64,
    pub pending_amount: f64,
    pub delivery_rate: f64,
}

/// Body for adding a catalog item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewItem {
    pub name: String,
    pub brand: String,
    pub price: f64,
    pub delivery_charge: f64,
}

/// Body for adding a customer to the agent's roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCustomer {
    pub name: String,
    pub mobile: String,
    pub apartment: String,
    pub tower: String,
    pub flat: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_id: Option<RecordId>,
}

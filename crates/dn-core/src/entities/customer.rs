use serde::{Deserialize, Serialize};

use crate::entities::RecordId;
use crate::enums::DeliveryStatus;

/// Flat per-delivery charge added to an item's price when the server omits a total.
pub const DELIVERY_CHARGE: f64 = 5.0;

/// A customer's linkage to one item: who delivers it and how the month stands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDetails {
    #[serde(default)]
    pub agent_name: String,
    #[serde(default)]
    pub agent_mobile: String,
    #[serde(default)]
    pub delivered: u32,
    #[serde(default)]
    pub pending: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_amount: Option<f64>,
}

impl CustomerDetails {
    /// Amount owed this month: the server total when present, otherwise
    /// `(price + delivery charge) * delivered`.
    #[must_use]
    pub fn amount_due(&self, item_price: f64) -> f64 {
        self.total_amount
            .unwrap_or_else(|| (item_price + DELIVERY_CHARGE) * f64::from(self.delivered))
    }
}

/// One month of deliveries for a customer and item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryDetails {
    pub history_id: RecordId,
    pub user_id: RecordId,
    pub item_id: RecordId,
    pub month_id: u32,
    pub year_id: i32,
    #[serde(default)]
    pub dates: Vec<HistoryDate>,
    #[serde(default)]
    pub summary: HistorySummary,
    #[serde(default)]
    pub comments: Vec<HistoryComment>,
    #[serde(default)]
    pub is_active: bool,
}

impl HistoryDetails {
    /// Days whose status matches `status`.
    pub fn days_with(&self, status: DeliveryStatus) -> impl Iterator<Item = &HistoryDate> {
        self.dates
            .iter()
            .filter(move |d| d.delivery_status() == Some(status))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryDate {
    pub date: String,
    pub status: String,
    #[serde(default)]
    pub quantity: u32,
    #[serde(default)]
    pub total_price: f64,
}

impl HistoryDate {
    #[must_use]
    pub fn delivery_status(&self) -> Option<DeliveryStatus> {
        self.status.parse().ok()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistorySummary {
    #[serde(default)]
    pub total_delivered: u32,
    #[serde(default)]
    pub total_pending: u32,
    #[serde(default)]
    pub total_vacation: u32,
    #[serde(default)]
    pub monthly_total_amount: f64,
}

/// A note exchanged between customer and agent on a history entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryComment {
    pub comment_id: RecordId,
    pub from_user_id: RecordId,
    #[serde(default)]
    pub from_role: String,
    pub message: String,
    #[serde(default)]
    pub created_at: String,
}

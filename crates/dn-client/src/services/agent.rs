use std::sync::Arc;

use dn_core::ResponseEnvelope;
use dn_core::entities::{
    Ack, AgentCustomer, CustomerFilter, DashboardStats, DeliveryChange, MonthlyReport,
    NewCustomer, NewItem, PaymentRecord,
};

use super::{acknowledge, unwrap};
use crate::client::ApiClient;
use crate::endpoints;
use crate::error::ApiError;
use crate::request::RequestDescriptor;

/// Agent roster, delivery, payment, and reporting calls.
#[derive(Debug, Clone)]
pub struct AgentService {
    client: Arc<ApiClient>,
}

impl AgentService {
    #[must_use]
    pub const fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// The agent's customers, narrowed by any filter fields that are set.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport, HTTP, or envelope failure.
    pub async fn customers(&self, filter: &CustomerFilter) -> Result<Vec<AgentCustomer>, ApiError> {
        let descriptor =
            RequestDescriptor::get(endpoints::agent::CUSTOMERS).with_query_pairs(filter.to_query());
        let envelope: ResponseEnvelope<Vec<AgentCustomer>> =
            self.client.execute(&descriptor).await?;
        unwrap(envelope)
    }

    /// Customers subscribed to one item.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport, HTTP, or envelope failure.
    pub async fn customers_for_item(&self, item_id: &str) -> Result<Vec<AgentCustomer>, ApiError> {
        let envelope: ResponseEnvelope<Vec<AgentCustomer>> = self
            .client
            .get(&endpoints::agent::customers_for_item(item_id))
            .await?;
        unwrap(envelope)
    }

    /// Adjust a customer's delivered count by `change` (may be negative).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidRequest`] for a zero change, otherwise any
    /// transport, HTTP, or envelope failure.
    pub async fn update_delivery_count(
        &self,
        customer_id: &str,
        change: i32,
    ) -> Result<Ack, ApiError> {
        if change == 0 {
            return Err(ApiError::InvalidRequest("delivery change must not be zero".into()));
        }
        let envelope = self
            .client
            .put(
                &endpoints::agent::delivery(customer_id),
                Some(&DeliveryChange { change }),
            )
            .await?;
        acknowledge(envelope)
    }

    /// # Errors
    ///
    /// Returns [`ApiError`] on transport, HTTP, or envelope failure.
    pub async fn pending_payments(&self) -> Result<Vec<PaymentRecord>, ApiError> {
        self.payments(endpoints::agent::PENDING_PAYMENTS).await
    }

    /// # Errors
    ///
    /// Returns [`ApiError`] on transport, HTTP, or envelope failure.
    pub async fn payment_history(&self) -> Result<Vec<PaymentRecord>, ApiError> {
        self.payments(endpoints::agent::PAYMENT_HISTORY).await
    }

    /// # Errors
    ///
    /// Returns [`ApiError`] on transport, HTTP, or envelope failure.
    pub async fn send_payment_reminder(&self, payment_id: &str) -> Result<Ack, ApiError> {
        let envelope = self
            .client
            .post::<_, ()>(&endpoints::agent::payment_reminder(payment_id), None)
            .await?;
        acknowledge(envelope)
    }

    /// # Errors
    ///
    /// Returns [`ApiError`] on transport, HTTP, or envelope failure.
    pub async fn mark_payment_paid(&self, payment_id: &str) -> Result<Ack, ApiError> {
        let envelope = self
            .client
            .put::<_, ()>(&endpoints::agent::mark_paid(payment_id), None)
            .await?;
        acknowledge(envelope)
    }

    /// Per-customer totals for `month`, optionally for one item only.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport, HTTP, or envelope failure.
    pub async fn monthly_reports(
        &self,
        month: &str,
        item: Option<&str>,
    ) -> Result<Vec<MonthlyReport>, ApiError> {
        let descriptor = RequestDescriptor::get(endpoints::agent::monthly_report(month))
            .with_optional_query("item", item);
        let envelope: ResponseEnvelope<Vec<MonthlyReport>> =
            self.client.execute(&descriptor).await?;
        unwrap(envelope)
    }

    /// # Errors
    ///
    /// Returns [`ApiError`] on transport, HTTP, or envelope failure.
    pub async fn dashboard_stats(&self) -> Result<DashboardStats, ApiError> {
        let envelope: ResponseEnvelope<DashboardStats> =
            self.client.get(endpoints::agent::DASHBOARD_STATS).await?;
        unwrap(envelope)
    }

    /// # Errors
    ///
    /// Returns [`ApiError::InvalidRequest`] for a blank name or negative
    /// price, otherwise any transport, HTTP, or envelope failure.
    pub async fn add_item(&self, item: &NewItem) -> Result<Ack, ApiError> {
        if item.name.trim().is_empty() {
            return Err(ApiError::InvalidRequest("item name is required".into()));
        }
        if item.price < 0.0 || item.delivery_charge < 0.0 {
            return Err(ApiError::InvalidRequest("prices must not be negative".into()));
        }
        let envelope = self.client.post(endpoints::agent::ITEMS, Some(item)).await?;
        acknowledge(envelope)
    }

    /// # Errors
    ///
    /// Returns [`ApiError::InvalidRequest`] for a blank name or mobile,
    /// otherwise any transport, HTTP, or envelope failure.
    pub async fn add_customer(&self, customer: &NewCustomer) -> Result<Ack, ApiError> {
        if customer.name.trim().is_empty() || customer.mobile.trim().is_empty() {
            return Err(ApiError::InvalidRequest(
                "customer name and mobile are required".into(),
            ));
        }
        let envelope = self
            .client
            .post(endpoints::agent::CUSTOMERS, Some(customer))
            .await?;
        acknowledge(envelope)
    }

    async fn payments(&self, path: &str) -> Result<Vec<PaymentRecord>, ApiError> {
        let envelope: ResponseEnvelope<Vec<PaymentRecord>> = self.client.get(path).await?;
        unwrap(envelope)
    }
}

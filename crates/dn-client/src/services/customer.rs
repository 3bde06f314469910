use std::sync::Arc;

use dn_core::ResponseEnvelope;
use dn_core::entities::{
    Ack, CustomerDetails, HistoryDetails, RecordId, UpdateRequest, VacationRequest,
};

use super::{acknowledge, unwrap};
use crate::client::ApiClient;
use crate::endpoints;
use crate::error::ApiError;
use crate::request::RequestDescriptor;

/// Customer-facing reads and requests.
#[derive(Debug, Clone)]
pub struct CustomerService {
    client: Arc<ApiClient>,
}

impl CustomerService {
    #[must_use]
    pub const fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Agent linkage and monthly totals for one subscribed item.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport, HTTP, or envelope failure.
    pub async fn details(&self, item_id: &RecordId) -> Result<CustomerDetails, ApiError> {
        let envelope: ResponseEnvelope<CustomerDetails> = self
            .client
            .get(&endpoints::customer::details(&item_id.to_string()))
            .await?;
        unwrap(envelope)
    }

    /// Day-by-day delivery history for an item.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport, HTTP, or envelope failure.
    pub async fn history(
        &self,
        item_id: &RecordId,
        user_id: &RecordId,
    ) -> Result<HistoryDetails, ApiError> {
        let descriptor = RequestDescriptor::get(endpoints::customer::HISTORY_DETAILS)
            .with_query("itemId", item_id)
            .with_query("userId", user_id);
        let envelope: ResponseEnvelope<HistoryDetails> = self.client.execute(&descriptor).await?;
        unwrap(envelope)
    }

    /// # Errors
    ///
    /// Returns [`ApiError::InvalidRequest`] if the request fails validation,
    /// otherwise any transport, HTTP, or envelope failure.
    pub async fn submit_update_request(&self, request: &UpdateRequest) -> Result<Ack, ApiError> {
        request.validate()?;
        let envelope = self
            .client
            .post(endpoints::requests::UPDATE, Some(request))
            .await?;
        acknowledge(envelope)
    }

    /// # Errors
    ///
    /// Returns [`ApiError::InvalidRequest`] if the range is inverted; nothing is
    /// sent in that case.
    pub async fn submit_vacation_request(
        &self,
        request: &VacationRequest,
    ) -> Result<Ack, ApiError> {
        request.validate()?;
        tracing::debug!(
            days = request.days(),
            item = %request.item_id,
            "submitting vacation request"
        );
        let envelope = self
            .client
            .post(endpoints::requests::VACATION, Some(request))
            .await?;
        acknowledge(envelope)
    }
}

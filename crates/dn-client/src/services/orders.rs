use std::sync::Arc;

use dn_core::ResponseEnvelope;
use dn_core::entities::Order;

use super::unwrap;
use crate::client::ApiClient;
use crate::endpoints;
use crate::error::ApiError;

#[derive(Debug, Clone)]
pub struct OrderService {
    client: Arc<ApiClient>,
}

impl OrderService {
    #[must_use]
    pub const fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Standing orders of the signed-in customer.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport, HTTP, or envelope failure.
    pub async fn mine(&self) -> Result<Vec<Order>, ApiError> {
        let envelope: ResponseEnvelope<Vec<Order>> =
            self.client.get(endpoints::orders::MINE).await?;
        unwrap(envelope)
    }

    /// # Errors
    ///
    /// Returns [`ApiError`] on transport, HTTP, or envelope failure.
    pub async fn by_id(&self, id: &str) -> Result<Order, ApiError> {
        let envelope: ResponseEnvelope<Order> =
            self.client.get(&endpoints::orders::by_id(id)).await?;
        unwrap(envelope)
    }
}

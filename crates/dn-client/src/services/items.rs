use std::sync::Arc;

use dn_core::ResponseEnvelope;
use dn_core::entities::{Item, Suggestion};

use super::unwrap;
use crate::client::ApiClient;
use crate::endpoints;
use crate::error::ApiError;
use crate::request::RequestDescriptor;

/// Item catalog reads.
#[derive(Debug, Clone)]
pub struct ItemService {
    client: Arc<ApiClient>,
}

impl ItemService {
    #[must_use]
    pub const fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// # Errors
    ///
    /// Returns [`ApiError`] on transport, HTTP, or envelope failure.
    pub async fn all(&self) -> Result<Vec<Item>, ApiError> {
        self.list(endpoints::items::ALL).await
    }

    /// # Errors
    ///
    /// Returns [`ApiError`] on transport, HTTP, or envelope failure.
    pub async fn active(&self) -> Result<Vec<Item>, ApiError> {
        self.list(endpoints::items::ACTIVE).await
    }

    /// # Errors
    ///
    /// Returns [`ApiError`] on transport, HTTP, or envelope failure.
    pub async fn by_category(&self, category: &str) -> Result<Vec<Item>, ApiError> {
        self.list(&endpoints::items::by_category(category)).await
    }

    /// # Errors
    ///
    /// Returns [`ApiError`] on transport, HTTP, or envelope failure.
    pub async fn by_id(&self, id: &str) -> Result<Item, ApiError> {
        let envelope: ResponseEnvelope<Item> =
            self.client.get(&endpoints::items::by_id(id)).await?;
        unwrap(envelope)
    }

    /// Search the catalog by free text.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidRequest`] for a blank query, otherwise as
    /// for any other read.
    pub async fn search(&self, query: &str) -> Result<Vec<Item>, ApiError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(ApiError::InvalidRequest("search query is empty".into()));
        }
        let descriptor = RequestDescriptor::get(endpoints::items::SEARCH).with_query("q", query);
        let envelope: ResponseEnvelope<Vec<Item>> = self.client.execute(&descriptor).await?;
        unwrap(envelope)
    }

    /// # Errors
    ///
    /// Returns [`ApiError`] on transport, HTTP, or envelope failure.
    pub async fn suggestions(&self) -> Result<Vec<Suggestion>, ApiError> {
        let envelope: ResponseEnvelope<Vec<Suggestion>> =
            self.client.get(endpoints::items::SUGGESTIONS).await?;
        unwrap(envelope)
    }

    async fn list(&self, path: &str) -> Result<Vec<Item>, ApiError> {
        let envelope: ResponseEnvelope<Vec<Item>> = self.client.get(path).await?;
        unwrap(envelope)
    }
}

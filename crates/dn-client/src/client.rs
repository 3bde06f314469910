//! The HTTP client every domain service goes through.

use std::sync::{PoisonError, RwLock};
use std::time::Duration;

use dn_config::ApiConfig;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::endpoints;
use crate::error::ApiError;
use crate::http::{check_response, decode_body};
use crate::request::RequestDescriptor;

const JSON: &str = "application/json";

/// Receiver of bearer-token changes pushed by the session layer.
pub trait TokenSink: Send + Sync {
    /// Attach `token` to every subsequent request except login.
    fn set_token(&self, token: &str);
    /// Stop attaching a token.
    fn clear_token(&self);
    /// The token currently attached, if any.
    fn current_token(&self) -> Option<String>;
}

/// Extra attempts for idempotent reads that fail to connect or time out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub delay: Duration,
}

impl RetryPolicy {
    #[must_use]
    pub const fn none() -> Self {
        Self {
            max_retries: 0,
            delay: Duration::ZERO,
        }
    }
}

/// JSON-over-HTTP client bound to one base URL.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    retry: RetryPolicy,
    token: RwLock<Option<String>>,
}

impl ApiClient {
    /// Create a client from API configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidRequest`] if the configuration is invalid
    /// and [`ApiError::Network`] if the underlying `reqwest::Client` fails to build.
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        config
            .validate()
            .map_err(|e| ApiError::InvalidRequest(e.to_string()))?;
        let http = reqwest::Client::builder()
            .user_agent(concat!("dailyneeds/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout())
            .build()?;
        Ok(Self {
            http,
            base_url: config.normalized_base_url().to_string(),
            retry: RetryPolicy {
                max_retries: config.max_retries,
                delay: config.retry_delay(),
            },
            token: RwLock::new(None),
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub const fn retry_policy(&self) -> RetryPolicy {
        self.retry
    }

    /// Build the wire request for `descriptor` using the given token snapshot.
    ///
    /// The login endpoint never carries an `Authorization` header.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidRequest`] if the URL or body is invalid.
    pub fn build_request(
        &self,
        descriptor: &RequestDescriptor,
        token: Option<&str>,
    ) -> Result<reqwest::Request, ApiError> {
        let url = format!("{}{}", self.base_url, descriptor.path_and_query());
        let mut builder = self
            .http
            .request(descriptor.method.clone(), url)
            .header(CONTENT_TYPE, JSON)
            .header(ACCEPT, JSON);

        let token = token.filter(|t| !t.is_empty());
        if let Some(token) = token.filter(|_| descriptor.path != endpoints::auth::LOGIN) {
            builder = builder.bearer_auth(token);
        }

        if let Some(body) = &descriptor.body {
            let bytes = serde_json::to_vec(body)
                .map_err(|e| ApiError::InvalidRequest(format!("cannot encode body: {e}")))?;
            builder = builder.body(bytes);
        }

        builder
            .build()
            .map_err(|e| ApiError::InvalidRequest(format!("cannot build request: {e}")))
    }

    /// Issue `descriptor` and decode the JSON response as `T`.
    ///
    /// The token is read once, before the first attempt, so a concurrent
    /// `clear_token` cannot change the headers of a call already in flight.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Network`] on connectivity failure (after retries for
    /// reads), [`ApiError::Status`] on a non-2xx response, and
    /// [`ApiError::Decode`] if the body is not the expected JSON.
    pub async fn execute<T: DeserializeOwned>(
        &self,
        descriptor: &RequestDescriptor,
    ) -> Result<T, ApiError> {
        let token = self.current_token();
        let max_attempts = if descriptor.is_idempotent_read() {
            self.retry.max_retries.saturating_add(1)
        } else {
            1
        };

        let mut attempt = 1;
        loop {
            let request = self.build_request(descriptor, token.as_deref())?;
            tracing::debug!(
                method = %descriptor.method,
                path = %descriptor.path,
                attempt,
                authorized = request.headers().contains_key(reqwest::header::AUTHORIZATION),
                "sending API request"
            );

            match self.send(request).await {
                Err(error) if error.is_transient() && attempt < max_attempts => {
                    tracing::warn!(
                        %error,
                        path = %descriptor.path,
                        attempt,
                        max_attempts,
                        "API request failed; retrying"
                    );
                    tokio::time::sleep(self.retry.delay).await;
                    attempt += 1;
                }
                result => return result,
            }
        }
    }

    async fn send<T: DeserializeOwned>(&self, request: reqwest::Request) -> Result<T, ApiError> {
        let resp = check_response(self.http.execute(request).await?).await?;
        let bytes = resp.bytes().await?;
        decode_body(&bytes)
    }

    /// `GET path`.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::execute`].
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.execute(&RequestDescriptor::get(path)).await
    }

    /// `POST path` with an optional JSON body.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::execute`].
    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: Option<&B>,
    ) -> Result<T, ApiError> {
        self.execute(&with_optional_body(RequestDescriptor::post(path), body)?)
            .await
    }

    /// `PUT path` with an optional JSON body.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::execute`].
    pub async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: Option<&B>,
    ) -> Result<T, ApiError> {
        self.execute(&with_optional_body(RequestDescriptor::put(path), body)?)
            .await
    }

    /// `DELETE path`.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::execute`].
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.execute(&RequestDescriptor::delete(path)).await
    }
}

fn with_optional_body<B: Serialize + ?Sized>(
    descriptor: RequestDescriptor,
    body: Option<&B>,
) -> Result<RequestDescriptor, ApiError> {
    match body {
        Some(body) => descriptor.with_body(body),
        None => Ok(descriptor),
    }
}

impl TokenSink for ApiClient {
    fn set_token(&self, token: &str) {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = Some(token.to_string());
    }

    fn clear_token(&self) {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    fn current_token(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("retry", &self.retry)
            .field("has_token", &self.current_token().is_some())
            .finish_non_exhaustive()
    }
}

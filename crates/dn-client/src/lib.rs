//! # dn-client
//!
//! HTTP client for the DailyNeeds API.
//!
//! [`ApiClient`] builds JSON requests against the configured base URL,
//! attaches the bearer token pushed to it through [`TokenSink`], enforces the
//! configured timeout, and retries idempotent reads on connectivity failure.
//! Non-2xx responses surface as [`ApiError::Status`] carrying the server's
//! `message` when one is present.
//!
//! The [`services`] module wraps each API area (items, customer, agent,
//! orders, auth) and unwraps the response envelope into typed results.

pub mod client;
pub mod endpoints;
pub mod error;
pub mod http;
pub mod request;
pub mod services;

pub use client::{ApiClient, RetryPolicy, TokenSink};
pub use error::{ApiError, ErrorKind};
pub use request::RequestDescriptor;
pub use services::{AgentService, AuthService, CustomerService, ItemService, OrderService};

//! # dn-core
//!
//! Core types shared across all DailyNeeds crates:
//! - The canonical [`Role`](enums::Role) with its legacy wire encodings
//! - Server-issued identity ([`User`](entities::User)) and identifiers
//! - The uniform [`ResponseEnvelope`](envelope::ResponseEnvelope) every API call returns
//! - Request/response DTOs for items, customers, agents, and orders
//! - Cross-cutting validation errors

pub mod entities;
pub mod enums;
pub mod envelope;
pub mod errors;

pub use entities::{RecordId, User};
pub use enums::{MessageType, Role};
pub use envelope::{EnvelopeError, ResponseEnvelope};
pub use errors::CoreError;

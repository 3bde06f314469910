//! Wire types for DailyNeeds API payloads.
//!
//! Field names follow the server's camelCase JSON. Identifiers may arrive as
//! numbers or strings and are kept as [`RecordId`].

mod agent;
mod customer;
mod id;
mod item;
mod order;
mod requests;
mod user;

pub use agent::{
    AgentCustomer, CustomerFilter, DashboardStats, DeliveryChange, MonthlyReport, NewCustomer,
    NewItem, PaymentRecord,
};
pub use customer::{
    CustomerDetails, DELIVERY_CHARGE, HistoryComment, HistoryDate, HistoryDetails, HistorySummary,
};
pub use id::RecordId;
pub use item::{Item, Suggestion};
pub use order::Order;
pub use requests::{Ack, LoginRequest, LoginResult, UpdateRequest, VacationRequest};
pub use user::User;

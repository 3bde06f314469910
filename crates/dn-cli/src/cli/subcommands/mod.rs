pub mod agent;
pub mod auth;
pub mod customer;
pub mod items;
pub mod orders;

pub use agent::AgentCommands;
pub use auth::AuthCommands;
pub use customer::CustomerCommands;
pub use items::ItemCommands;
pub use orders::OrderCommands;

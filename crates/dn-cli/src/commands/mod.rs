pub mod agent;
pub mod auth;
pub mod customer;
pub mod dispatch;
pub mod items;
pub mod orders;

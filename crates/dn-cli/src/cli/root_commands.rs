use clap::Subcommand;

use crate::cli::subcommands::{
    AgentCommands, AuthCommands, CustomerCommands, ItemCommands, OrderCommands,
};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Sign in, sign out, and inspect the session.
    Auth {
        #[command(subcommand)]
        action: AuthCommands,
    },
    /// Browse the item catalog.
    Items {
        #[command(subcommand)]
        action: ItemCommands,
    },
    /// Customer views and requests.
    Customer {
        #[command(subcommand)]
        action: CustomerCommands,
    },
    /// Delivery agent tools.
    Agent {
        #[command(subcommand)]
        action: AgentCommands,
    },
    /// Standing orders.
    Orders {
        #[command(subcommand)]
        action: OrderCommands,
    },
}

impl Commands {
    /// Whether the command needs a signed-in session.
    #[must_use]
    pub const fn requires_session(&self) -> bool {
        !matches!(self, Self::Auth { .. })
    }
}

use clap::Subcommand;

/// Standing order commands.
#[derive(Clone, Debug, Subcommand)]
pub enum OrderCommands {
    /// List your standing orders.
    Mine,
    /// Show one order.
    Get {
        /// Order ID.
        id: String,
    },
}

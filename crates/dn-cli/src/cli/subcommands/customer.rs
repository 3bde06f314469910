use chrono::NaiveDate;
use clap::{Args, Subcommand};

/// Customer commands.
#[derive(Clone, Debug, Subcommand)]
pub enum CustomerCommands {
    /// Delivery agent and monthly totals for a subscribed item.
    Details {
        /// Item ID.
        item_id: String,
    },
    /// Day-by-day delivery history for an item.
    History {
        /// Item ID.
        item_id: String,
        /// Whose history to show (defaults to the signed-in user).
        #[arg(long)]
        user_id: Option<String>,
    },
    /// Pause deliveries over a date range.
    Vacation(VacationArgs),
    /// Request a change to a subscription.
    Update(UpdateArgs),
}

#[derive(Clone, Debug, Args)]
pub struct VacationArgs {
    /// Item ID.
    pub item_id: String,
    /// First paused day (YYYY-MM-DD).
    #[arg(long)]
    pub from: NaiveDate,
    /// Last paused day (YYYY-MM-DD).
    #[arg(long)]
    pub to: NaiveDate,
    /// Reason shown to the agent.
    #[arg(long)]
    pub reason: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct UpdateArgs {
    /// Item ID.
    pub item_id: String,
    /// Preferred brand.
    #[arg(long)]
    pub brand: String,
    /// Units per delivery.
    #[arg(long)]
    pub count: u32,
    /// Delivery address.
    #[arg(long)]
    pub address: String,
    /// Alternate delivery address.
    #[arg(long)]
    pub alternate_address: Option<String>,
    /// Instructions for the agent.
    #[arg(long)]
    pub instructions: Option<String>,
}

use clap::{Args, Subcommand};

/// Delivery agent commands.
#[derive(Clone, Debug, Subcommand)]
pub enum AgentCommands {
    /// List your customers.
    Customers(CustomersArgs),
    /// Adjust a customer's delivered count.
    Delivery {
        /// Customer ID.
        customer_id: String,
        /// Amount to add (negative to subtract).
        #[arg(long, allow_negative_numbers = true)]
        change: i32,
    },
    /// Pending payments, or settled ones with --history.
    Payments {
        /// Show payment history instead of pending payments.
        #[arg(long)]
        history: bool,
    },
    /// Send a payment reminder.
    Remind {
        /// Payment ID.
        payment_id: String,
    },
    /// Mark a payment as paid.
    MarkPaid {
        /// Payment ID.
        payment_id: String,
    },
    /// Monthly per-customer report.
    Report {
        /// Month, e.g. 2024-01.
        month: String,
        /// Only this item.
        #[arg(long)]
        item: Option<String>,
    },
    /// Headline numbers for the dashboard.
    Dashboard,
    /// Add an item to the catalog.
    AddItem(AddItemArgs),
    /// Add a customer to your roster.
    AddCustomer(AddCustomerArgs),
}

#[derive(Clone, Debug, Args)]
pub struct CustomersArgs {
    /// Only customers subscribed to this item.
    #[arg(long, conflicts_with_all = ["apartment", "tower", "flat"])]
    pub item: Option<String>,
    #[arg(long)]
    pub apartment: Option<String>,
    #[arg(long)]
    pub tower: Option<String>,
    #[arg(long)]
    pub flat: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct AddItemArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub brand: String,
    #[arg(long)]
    pub price: f64,
    /// Per-delivery charge.
    #[arg(long, default_value_t = dn_core::entities::DELIVERY_CHARGE)]
    pub delivery_charge: f64,
}

#[derive(Clone, Debug, Args)]
pub struct AddCustomerArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub mobile: String,
    #[arg(long)]
    pub apartment: String,
    #[arg(long)]
    pub tower: String,
    #[arg(long)]
    pub flat: String,
    /// Item to subscribe the customer to.
    #[arg(long)]
    pub item_id: Option<String>,
}

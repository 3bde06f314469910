use clap::Subcommand;

/// Item catalog commands.
#[derive(Clone, Debug, Subcommand)]
pub enum ItemCommands {
    /// List catalog items.
    List {
        /// Only items currently offered.
        #[arg(long, conflicts_with = "category")]
        active: bool,
        /// Only items in this category.
        #[arg(long)]
        category: Option<String>,
    },
    /// Show one item.
    Get {
        /// Item ID.
        id: String,
    },
    /// Search items by name or brand.
    Search {
        /// Search text.
        query: String,
    },
    /// Show promotional suggestions.
    Suggestions,
}

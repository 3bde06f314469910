use crate::cli::GlobalFlags;
use crate::cli::subcommands::OrderCommands;
use crate::context::AppContext;
use crate::output::output_read;

/// Handle `dailyneeds orders <subcommand>`.
pub async fn handle(
    action: &OrderCommands,
    ctx: &AppContext,
    flags: GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        OrderCommands::Mine => output_read(ctx.orders.mine().await, "orders", flags),
        OrderCommands::Get { id } => {
            output_read(ctx.orders.by_id(id).await.map(Some), "order", flags)
        }
    }
}

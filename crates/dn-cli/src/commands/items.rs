use crate::cli::GlobalFlags;
use crate::cli::subcommands::ItemCommands;
use crate::context::AppContext;
use crate::output::output_read;

/// Handle `dailyneeds items <subcommand>`.
pub async fn handle(
    action: &ItemCommands,
    ctx: &AppContext,
    flags: GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        ItemCommands::List { active, category } => {
            let result = match (*active, category) {
                (_, Some(category)) => ctx.items.by_category(category).await,
                (true, None) => ctx.items.active().await,
                (false, None) => ctx.items.all().await,
            };
            output_read(result, "items", flags)
        }
        ItemCommands::Get { id } => {
            let result = ctx.items.by_id(id).await.map(Some);
            if let Ok(Some(item)) = &result {
                ctx.session.select_item(Some(item.clone()));
            }
            output_read(result, "item", flags)
        }
        ItemCommands::Search { query } => {
            output_read(ctx.items.search(query).await, "search results", flags)
        }
        ItemCommands::Suggestions => {
            output_read(ctx.items.suggestions().await, "suggestions", flags)
        }
    }
}

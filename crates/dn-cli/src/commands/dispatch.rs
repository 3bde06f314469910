use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(
    command: Commands,
    ctx: &AppContext,
    flags: GlobalFlags,
) -> anyhow::Result<()> {
    if command.requires_session() {
        ctx.require_session()?;
    }
    match command {
        Commands::Auth { action } => super::auth::handle(&action, ctx, flags).await,
        Commands::Items { action } => super::items::handle(&action, ctx, flags).await,
        Commands::Customer { action } => super::customer::handle(&action, ctx, flags).await,
        Commands::Agent { action } => super::agent::handle(&action, ctx, flags).await,
        Commands::Orders { action } => super::orders::handle(&action, ctx, flags).await,
    }
}

use dn_core::Role;
use dn_core::entities::{RecordId, UpdateRequest, VacationRequest};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::CustomerCommands;
use crate::cli::subcommands::customer::{UpdateArgs, VacationArgs};
use crate::context::AppContext;
use crate::output::{output, output_read, write_failure};

/// Handle `dailyneeds customer <subcommand>`.
pub async fn handle(
    action: &CustomerCommands,
    ctx: &AppContext,
    flags: GlobalFlags,
) -> anyhow::Result<()> {
    let user = ctx.require_role(Role::Customer)?;

    match action {
        CustomerCommands::Details { item_id } => {
            let result = ctx.customer.details(&RecordId::from(item_id.as_str())).await;
            output_read(result.map(Some), "customer details", flags)
        }
        CustomerCommands::History { item_id, user_id } => {
            let user_id = user_id
                .as_deref()
                .map_or_else(|| user.id.clone(), RecordId::from);
            let result = ctx
                .customer
                .history(&RecordId::from(item_id.as_str()), &user_id)
                .await;
            output_read(result.map(Some), "delivery history", flags)
        }
        CustomerCommands::Vacation(args) => vacation(args, ctx, flags).await,
        CustomerCommands::Update(args) => update(args, ctx, flags).await,
    }
}

async fn vacation(args: &VacationArgs, ctx: &AppContext, flags: GlobalFlags) -> anyhow::Result<()> {
    let request = VacationRequest {
        from_date: args.from,
        to_date: args.to,
        item_id: RecordId::from(args.item_id.as_str()),
        reason: args.reason.clone(),
    };
    let ack = ctx
        .customer
        .submit_vacation_request(&request)
        .await
        .map_err(write_failure)?;
    output(&ack, flags.format)
}

async fn update(args: &UpdateArgs, ctx: &AppContext, flags: GlobalFlags) -> anyhow::Result<()> {
    let request = UpdateRequest {
        item_id: RecordId::from(args.item_id.as_str()),
        brand: args.brand.clone(),
        item_count: args.count,
        address: args.address.clone(),
        alternate_address: args.alternate_address.clone(),
        special_instructions: args.instructions.clone(),
    };
    let ack = ctx
        .customer
        .submit_update_request(&request)
        .await
        .map_err(write_failure)?;
    output(&ack, flags.format)
}

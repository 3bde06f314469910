use dn_core::Role;
use dn_core::entities::{CustomerFilter, NewCustomer, NewItem, RecordId};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::AgentCommands;
use crate::cli::subcommands::agent::{AddCustomerArgs, AddItemArgs, CustomersArgs};
use crate::context::AppContext;
use crate::output::{output, output_read, write_failure};

/// Handle `dailyneeds agent <subcommand>`.
pub async fn handle(
    action: &AgentCommands,
    ctx: &AppContext,
    flags: GlobalFlags,
) -> anyhow::Result<()> {
    ctx.require_role(Role::Agent)?;
    let agent = &ctx.agent;

    match action {
        AgentCommands::Customers(args) => customers(args, ctx, flags).await,
        AgentCommands::Delivery {
            customer_id,
            change,
        } => {
            let ack = agent
                .update_delivery_count(customer_id, *change)
                .await
                .map_err(write_failure)?;
            output(&ack, flags.format)
        }
        AgentCommands::Payments { history } => {
            let result = if *history {
                agent.payment_history().await
            } else {
                agent.pending_payments().await
            };
            output_read(result, "payments", flags)
        }
        AgentCommands::Remind { payment_id } => {
            let ack = agent
                .send_payment_reminder(payment_id)
                .await
                .map_err(write_failure)?;
            output(&ack, flags.format)
        }
        AgentCommands::MarkPaid { payment_id } => {
            let ack = agent
                .mark_payment_paid(payment_id)
                .await
                .map_err(write_failure)?;
            output(&ack, flags.format)
        }
        AgentCommands::Report { month, item } => {
            let result = agent.monthly_reports(month, item.as_deref()).await;
            output_read(result, "monthly report", flags)
        }
        AgentCommands::Dashboard => {
            output_read(agent.dashboard_stats().await, "dashboard stats", flags)
        }
        AgentCommands::AddItem(args) => add_item(args, ctx, flags).await,
        AgentCommands::AddCustomer(args) => add_customer(args, ctx, flags).await,
    }
}

async fn customers(args: &CustomersArgs, ctx: &AppContext, flags: GlobalFlags) -> anyhow::Result<()> {
    let result = match &args.item {
        Some(item_id) => ctx.agent.customers_for_item(item_id).await,
        None => {
            let filter = CustomerFilter {
                apartment: args.apartment.clone(),
                tower: args.tower.clone(),
                flat: args.flat.clone(),
            };
            ctx.agent.customers(&filter).await
        }
    };
    output_read(result, "customers", flags)
}

async fn add_item(args: &AddItemArgs, ctx: &AppContext, flags: GlobalFlags) -> anyhow::Result<()> {
    let item = NewItem {
        name: args.name.clone(),
        brand: args.brand.clone(),
        price: args.price,
        delivery_charge: args.delivery_charge,
    };
    let ack = ctx.agent.add_item(&item).await.map_err(write_failure)?;
    output(&ack, flags.format)
}

async fn add_customer(
    args: &AddCustomerArgs,
    ctx: &AppContext,
    flags: GlobalFlags,
) -> anyhow::Result<()> {
    let customer = NewCustomer {
        name: args.name.clone(),
        mobile: args.mobile.clone(),
        apartment: args.apartment.clone(),
        tower: args.tower.clone(),
        flat: args.flat.clone(),
        item_id: args.item_id.as_deref().map(RecordId::from),
    };
    let ack = ctx
        .agent
        .add_customer(&customer)
        .await
        .map_err(write_failure)?;
    output(&ack, flags.format)
}

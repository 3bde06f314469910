use dn_core::entities::LoginRequest;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::auth::{AuthCommands, AuthLoginArgs};
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct AuthStatusResponse {
    authenticated: bool,
    user_id: Option<String>,
    name: Option<String>,
    mobile: Option<String>,
    role: Option<String>,
    note: Option<String>,
}

#[derive(Serialize)]
struct AuthLogoutResponse {
    cleared: bool,
}

/// Handle `dailyneeds auth <subcommand>`.
pub async fn handle(
    action: &AuthCommands,
    ctx: &AppContext,
    flags: GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        AuthCommands::Login(args) => login(args, ctx, flags).await,
        AuthCommands::Logout => {
            dn_auth::sign_out(&ctx.session, &ctx.auth).await?;
            output(&AuthLogoutResponse { cleared: true }, flags.format)
        }
        AuthCommands::Status => output(&status(ctx), flags.format),
    }
}

async fn login(args: &AuthLoginArgs, ctx: &AppContext, flags: GlobalFlags) -> anyhow::Result<()> {
    let role = args.role.unwrap_or(ctx.config.general.default_role);
    let request = LoginRequest::new(&args.mobile, &args.password, role)?;

    let user = dn_auth::sign_in(&ctx.session, &ctx.auth, &request)
        .await
        .map_err(|error| anyhow::anyhow!(error.user_message()))?;

    if user.user_type != role {
        tracing::warn!(
            requested = %role,
            actual = %user.user_type,
            "signed in with a different role than requested"
        );
    }
    output(&status(ctx), flags.format)
}

fn status(ctx: &AppContext) -> AuthStatusResponse {
    let session = ctx.session.snapshot();
    match session.user.as_ref().filter(|_| session.is_authenticated()) {
        Some(user) => AuthStatusResponse {
            authenticated: true,
            user_id: Some(user.id.to_string()),
            name: Some(user.display_name().to_string()),
            mobile: Some(session.mobile_number.clone()),
            role: Some(session.role.to_string()),
            note: None,
        },
        None => AuthStatusResponse {
            authenticated: false,
            user_id: None,
            name: None,
            mobile: None,
            role: None,
            note: match &ctx.bootstrap {
                dn_auth::BootstrapOutcome::Cleared { reason } => {
                    Some(format!("stored session discarded: {reason}"))
                }
                _ => Some("run `dailyneeds auth login`".into()),
            },
        },
    }
}

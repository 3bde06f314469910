use clap::{Args, Subcommand};
use dn_core::Role;

/// Authentication commands.
#[derive(Clone, Debug, Subcommand)]
pub enum AuthCommands {
    /// Sign in with a mobile number and password.
    Login(AuthLoginArgs),
    /// Sign out and clear the stored session.
    Logout,
    /// Show the current session.
    Status,
}

#[derive(Clone, Debug, Args)]
pub struct AuthLoginArgs {
    /// Ten-digit mobile number.
    #[arg(long)]
    pub mobile: String,
    /// Account password.
    #[arg(long)]
    pub password: String,
    /// Sign in as `customer` or `agent` (legacy codes 1/2 accepted).
    /// Defaults to `general.default_role` from config.
    #[arg(long)]
    pub role: Option<Role>,
}

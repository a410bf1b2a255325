use clap::{Args, Subcommand};

mod create_admin;
mod set_role;

#[derive(Debug, Args)]
pub(crate) struct UsersCommand {
    #[command(subcommand)]
    command: UsersSubcommand,
}

#[derive(Debug, Subcommand)]
enum UsersSubcommand {
    /// Create a verified admin account
    CreateAdmin(create_admin::CreateAdminArgs),

    /// Change the role of an existing account
    SetRole(set_role::SetRoleArgs),
}

pub(crate) async fn run(command: UsersCommand) -> Result<(), String> {
    match command.command {
        UsersSubcommand::CreateAdmin(args) => create_admin::run(args).await,
        UsersSubcommand::SetRole(args) => set_role::run(args).await,
    }
}

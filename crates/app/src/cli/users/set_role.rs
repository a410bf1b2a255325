use clap::Args;
use stylus_app::{
    database::{self, Db},
    domain::users::{PgUsersService, UsersService, records::Role},
};

#[derive(Debug, Args)]
pub(crate) struct SetRoleArgs {
    /// Email address of the account to change
    #[arg(long)]
    email: String,

    /// New role: customer, partner or admin
    #[arg(long)]
    role: Role,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: SetRoleArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let service = PgUsersService::new(Db::new(pool));

    let user = service
        .set_role(args.email.trim(), args.role)
        .await
        .map_err(|error| format!("failed to change role: {error}"))?;

    println!("user_uuid: {}", user.uuid);
    println!("role: {}", user.role);

    Ok(())
}

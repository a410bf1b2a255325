use clap::Args;
use rand::{Rng, distributions::Alphanumeric, thread_rng};
use stylus_app::{
    auth::{MIN_PASSWORD_LEN, hash_password},
    database::{self, Db},
    domain::users::{
        PgUsersService, UsersService,
        data::NewUser,
        records::{Role, UserUuid, VerificationStatus},
    },
};

const GENERATED_PASSWORD_LEN: usize = 24;

#[derive(Debug, Args)]
pub(crate) struct CreateAdminArgs {
    /// Admin email address
    #[arg(long)]
    email: String,

    /// Admin display name
    #[arg(long)]
    name: String,

    /// Optional password; generated and printed when omitted
    #[arg(long, env = "STYLUS_ADMIN_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

fn generate_password() -> String {
    thread_rng()
        .sample_iter(&Alphanumeric)
        .take(GENERATED_PASSWORD_LEN)
        .map(char::from)
        .collect()
}

pub(crate) async fn run(args: CreateAdminArgs) -> Result<(), String> {
    let generated = args.password.is_none();
    let password = args.password.unwrap_or_else(generate_password);

    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(format!(
            "password must be at least {MIN_PASSWORD_LEN} characters"
        ));
    }

    let password_hash =
        hash_password(&password).map_err(|error| format!("failed to hash password: {error}"))?;

    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let service = PgUsersService::new(Db::new(pool));

    let admin = service
        .create_user(NewUser {
            uuid: UserUuid::new(),
            email: args.email.trim().to_lowercase(),
            password_hash,
            name: args.name,
            phone: None,
            role: Role::Admin,
            verification_status: VerificationStatus::Verified,
        })
        .await
        .map_err(|error| format!("failed to create admin: {error}"))?;

    println!("user_uuid: {}", admin.uuid);
    println!("email: {}", admin.email);

    if generated {
        println!("password: {password}");
        println!("store this password now; it is only shown once");
    }

    Ok(())
}

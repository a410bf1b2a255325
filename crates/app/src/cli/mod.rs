use clap::{Parser, Subcommand};

mod db;
mod users;

#[derive(Debug, Parser)]
#[command(name = "stylus-app", about = "Stylus operator CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Db(db::DbCommand),
    Users(users::UsersCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Db(command) => db::run(command).await,
            Commands::Users(command) => users::run(command).await,
        }
    }
}

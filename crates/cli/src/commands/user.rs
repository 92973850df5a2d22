//! User commands
//!
//! `tb user add <name>` and `tb user ls`.

use crate::output::format_user_table;
use clap::{Args, Subcommand};
use taskboard_db::{Database, DbError, User};

/// User subcommands
#[derive(Debug, Subcommand)]
pub enum UserCommand {
    /// Create a user
    Add(UserAddCommand),
    /// List all users
    Ls(UserLsCommand),
}

impl UserCommand {
    pub async fn run(&self, db: &Database) -> Result<String, DbError> {
        match self {
            UserCommand::Add(cmd) => {
                let user = cmd.execute(db).await?;
                Ok(format!("Created user: {} ({})", user.id, user.name))
            }
            UserCommand::Ls(cmd) => Ok(format_user_table(&cmd.execute(db).await?)),
        }
    }
}

/// Create a user
#[derive(Debug, Args)]
pub struct UserAddCommand {
    /// Display name
    #[arg(required = true)]
    pub name: String,
}

impl UserAddCommand {
    pub async fn execute(&self, db: &Database) -> Result<User, DbError> {
        db.users().create(&self.name).await
    }
}

/// List all users
#[derive(Debug, Args)]
pub struct UserLsCommand {}

impl UserLsCommand {
    pub async fn execute(&self, db: &Database) -> Result<Vec<User>, DbError> {
        db.users().list_all().await
    }
}

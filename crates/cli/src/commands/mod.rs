//! CLI commands for Taskboard
//!
//! This module contains all subcommand implementations for the tb CLI.

pub mod list;
pub mod seed;
pub mod task;
pub mod user;

pub use list::{
    ListAddCommand, ListCommand, ListLsCommand, ListRmCommand, ListShowCommand,
    ListUpdateCommand,
};
pub use seed::SeedCommand;
pub use task::{
    TaskAddCommand, TaskCommand, TaskLsCommand, TaskRmCommand, TaskShowCommand,
    TaskUpdateCommand,
};
pub use user::{UserAddCommand, UserCommand, UserLsCommand};

use chrono::NaiveDate;
use clap::Subcommand;
use taskboard_db::{Database, DbError, Status};

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage users
    #[command(subcommand)]
    User(UserCommand),

    /// Manage task lists
    #[command(subcommand)]
    List(ListCommand),

    /// Manage and browse tasks
    #[command(subcommand)]
    Task(TaskCommand),

    /// Populate the database with demo users, lists and tasks
    Seed(SeedCommand),
}

impl Command {
    /// Execute the command and render its output.
    ///
    /// # Arguments
    ///
    /// * `db` - Reference to the database connection
    /// * `caller` - Identity given with `--as` / `TB_USER`, if any
    ///
    /// # Errors
    ///
    /// Returns `DbError` if the command execution fails.
    pub async fn execute(&self, db: &Database, caller: Option<&str>) -> Result<String, DbError> {
        match self {
            Command::User(cmd) => cmd.run(db).await,
            Command::List(cmd) => cmd.run(db, caller).await,
            Command::Task(cmd) => cmd.run(db, caller).await,
            Command::Seed(cmd) => cmd.run(db).await,
        }
    }
}

/// Parse a task status for create/update, rejecting unknown values
pub(crate) fn parse_status(s: &str) -> Result<Status, String> {
    Status::parse(&s.trim().to_lowercase()).ok_or_else(|| {
        format!(
            "invalid status '{}'. Valid values: pending, completed",
            s
        )
    })
}

/// Parse a due date in `YYYY-MM-DD` form
pub(crate) fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| format!("invalid date '{}'. Expected YYYY-MM-DD", s))
}

//! Seed command
//!
//! Implements `tb seed`, which fills the database with demo data and prints
//! the created users so one of them can be passed to `--as`.

use crate::output::format_user_table;
use clap::Args;
use taskboard_db::{Database, DbError, SeedSummary, seed_demo_data};

/// Populate the database with demo users, lists and tasks
#[derive(Debug, Args)]
pub struct SeedCommand {}

impl SeedCommand {
    pub async fn execute(&self, db: &Database) -> Result<SeedSummary, DbError> {
        seed_demo_data(db).await
    }

    pub async fn run(&self, db: &Database) -> Result<String, DbError> {
        let summary = self.execute(db).await?;
        let users = db.users().list_all().await?;
        Ok(format!(
            "Seeded {} users, {} lists, {} tasks\n\n{}",
            summary.users,
            summary.lists,
            summary.tasks,
            format_user_table(&users)
        ))
    }
}

//! Task list commands
//!
//! `tb list add|ls|show|update|rm`. Listing is limited to the caller's own
//! lists; a new list belongs to `--owner`, or to the caller when omitted.

use crate::output::{format_list_detail, format_list_table};
use clap::{Args, Subcommand};
use taskboard_db::{Database, DbError, ListUpdate, NewTaskList, OwnershipScope, TaskList};

/// Task list subcommands
#[derive(Debug, Subcommand)]
pub enum ListCommand {
    /// Create a list
    Add(ListAddCommand),
    /// Show the caller's lists
    Ls(ListLsCommand),
    /// Show one list
    Show(ListShowCommand),
    /// Change a list's title or description
    Update(ListUpdateCommand),
    /// Delete a list and all of its tasks
    Rm(ListRmCommand),
}

impl ListCommand {
    pub async fn run(&self, db: &Database, caller: Option<&str>) -> Result<String, DbError> {
        match self {
            ListCommand::Add(cmd) => {
                let list = cmd.execute(db, caller).await?;
                Ok(format!("Created list: {} ({})", list.id, list.title))
            }
            ListCommand::Ls(cmd) => Ok(format_list_table(&cmd.execute(db, caller).await?)),
            ListCommand::Show(cmd) => Ok(format_list_detail(&cmd.execute(db).await?)),
            ListCommand::Update(cmd) => {
                let list = cmd.execute(db).await?;
                Ok(format!("Updated list: {}", list.id))
            }
            ListCommand::Rm(cmd) => {
                cmd.execute(db).await?;
                Ok(format!("Deleted list: {}", cmd.id))
            }
        }
    }
}

/// Create a list
#[derive(Debug, Args)]
pub struct ListAddCommand {
    /// Title of the list
    #[arg(required = true)]
    pub title: String,

    /// Optional description
    #[arg(short, long)]
    pub description: Option<String>,

    /// Owning user id (defaults to the caller)
    #[arg(long)]
    pub owner: Option<String>,
}

impl ListAddCommand {
    pub async fn execute(&self, db: &Database, caller: Option<&str>) -> Result<TaskList, DbError> {
        let owner = match &self.owner {
            Some(owner) => owner.clone(),
            None => OwnershipScope::for_caller(caller)?.owner_id().to_string(),
        };

        let mut new = NewTaskList::new(&self.title, owner);
        if let Some(description) = &self.description {
            new = new.with_description(description);
        }
        db.lists().create(&new).await
    }
}

/// Show the caller's lists
#[derive(Debug, Args)]
pub struct ListLsCommand {}

impl ListLsCommand {
    pub async fn execute(
        &self,
        db: &Database,
        caller: Option<&str>,
    ) -> Result<Vec<TaskList>, DbError> {
        let scope = OwnershipScope::for_caller(caller)?;
        db.lists().list_by_owner(scope.owner_id()).await
    }
}

/// Show one list
#[derive(Debug, Args)]
pub struct ListShowCommand {
    /// List id
    #[arg(required = true)]
    pub id: String,
}

impl ListShowCommand {
    pub async fn execute(&self, db: &Database) -> Result<TaskList, DbError> {
        db.lists().get(&self.id).await
    }
}

/// Change a list's title or description
#[derive(Debug, Args)]
pub struct ListUpdateCommand {
    /// List id
    #[arg(required = true)]
    pub id: String,

    /// New title
    #[arg(long)]
    pub title: Option<String>,

    /// New description
    #[arg(short, long, conflicts_with = "clear_description")]
    pub description: Option<String>,

    /// Remove the description
    #[arg(long)]
    pub clear_description: bool,
}

impl ListUpdateCommand {
    fn build_update(&self) -> ListUpdate {
        let mut update = ListUpdate::new();
        if let Some(title) = &self.title {
            update = update.with_title(title);
        }
        if let Some(description) = &self.description {
            update = update.with_description(description);
        }
        if self.clear_description {
            update = update.clear_description();
        }
        update
    }

    pub async fn execute(&self, db: &Database) -> Result<TaskList, DbError> {
        db.lists().update(&self.id, &self.build_update()).await
    }
}

/// Delete a list and all of its tasks
#[derive(Debug, Args)]
pub struct ListRmCommand {
    /// List id
    #[arg(required = true)]
    pub id: String,
}

impl ListRmCommand {
    pub async fn execute(&self, db: &Database) -> Result<(), DbError> {
        db.lists().delete(&self.id).await
    }
}

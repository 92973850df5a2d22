//! Task commands
//!
//! `tb task add|ls|show|update|rm`. `task ls` is the scoped browse: it only
//! ever shows tasks in lists the caller owns, narrowed by the optional
//! search, status and owner filters, ten per page.

use crate::commands::{parse_date, parse_status};
use crate::output::{format_task_detail, format_task_page};
use chrono::NaiveDate;
use clap::{Args, Subcommand};
use taskboard_db::{
    Database, DbError, FilterSpec, NewTask, OwnershipScope, Status, Task, TaskOverview,
    TaskUpdate,
};

/// Task subcommands
#[derive(Debug, Subcommand)]
pub enum TaskCommand {
    /// Create a task in a list
    Add(TaskAddCommand),
    /// Browse the caller's tasks
    Ls(TaskLsCommand),
    /// Show one task
    Show(TaskShowCommand),
    /// Change a task
    Update(TaskUpdateCommand),
    /// Delete a task
    Rm(TaskRmCommand),
}

impl TaskCommand {
    pub async fn run(&self, db: &Database, caller: Option<&str>) -> Result<String, DbError> {
        match self {
            TaskCommand::Add(cmd) => {
                let task = cmd.execute(db).await?;
                Ok(format!("Created task: {} ({})", task.id, task.title))
            }
            TaskCommand::Ls(cmd) => {
                let overview = cmd.execute(db, caller).await?;
                if cmd.json {
                    Ok(serde_json::to_string_pretty(&overview)?)
                } else {
                    Ok(format_task_page(&overview.tasks))
                }
            }
            TaskCommand::Show(cmd) => Ok(format_task_detail(&cmd.execute(db).await?)),
            TaskCommand::Update(cmd) => {
                let task = cmd.execute(db).await?;
                Ok(format!("Updated task: {}", task.id))
            }
            TaskCommand::Rm(cmd) => {
                cmd.execute(db).await?;
                Ok(format!("Deleted task: {}", cmd.id))
            }
        }
    }
}

/// Create a task in a list
#[derive(Debug, Args)]
pub struct TaskAddCommand {
    /// Title of the task
    #[arg(required = true)]
    pub title: String,

    /// List the task belongs to
    #[arg(long = "list", required = true)]
    pub list_id: String,

    /// Optional description
    #[arg(short, long)]
    pub description: Option<String>,

    /// Due date (YYYY-MM-DD)
    #[arg(long = "due", value_parser = parse_date)]
    pub due_date: Option<NaiveDate>,

    /// Initial status: pending (default) or completed
    #[arg(long, value_parser = parse_status)]
    pub status: Option<Status>,
}

impl TaskAddCommand {
    pub async fn execute(&self, db: &Database) -> Result<Task, DbError> {
        let mut new = NewTask::new(&self.title, &self.list_id);
        if let Some(description) = &self.description {
            new = new.with_description(description);
        }
        if let Some(status) = self.status {
            new = new.with_status(status);
        }
        if let Some(due_date) = self.due_date {
            new = new.with_due_date(due_date);
        }
        db.tasks().create(&new).await
    }
}

/// Browse the caller's tasks
#[derive(Debug, Args)]
pub struct TaskLsCommand {
    /// Case-insensitive text to find in title or description
    #[arg(long)]
    pub search: Option<String>,

    /// Status filter: all, pending or completed (anything else means all)
    #[arg(long)]
    pub filter: Option<String>,

    /// Owner filter: all or a user id
    #[arg(long)]
    pub user_filter: Option<String>,

    /// Page number, starting at 1
    #[arg(long, allow_negative_numbers = true)]
    pub page: Option<i64>,

    /// Print the full overview as JSON
    #[arg(long)]
    pub json: bool,
}

impl TaskLsCommand {
    /// Build the filter from the raw options
    pub fn filter_spec(&self) -> FilterSpec {
        FilterSpec::from_raw(
            self.search.as_deref(),
            self.filter.as_deref(),
            self.user_filter.as_deref(),
            self.page,
        )
    }

    /// Execute the browse.
    ///
    /// # Errors
    ///
    /// Returns `DbError::Unauthorized` when no caller identity is available.
    pub async fn execute(
        &self,
        db: &Database,
        caller: Option<&str>,
    ) -> Result<TaskOverview, DbError> {
        let scope = OwnershipScope::for_caller(caller)?;
        db.browse().overview(scope, &self.filter_spec()).await
    }
}

/// Show one task
#[derive(Debug, Args)]
pub struct TaskShowCommand {
    /// Task id
    #[arg(required = true)]
    pub id: String,
}

impl TaskShowCommand {
    pub async fn execute(&self, db: &Database) -> Result<Task, DbError> {
        db.tasks().get(&self.id).await
    }
}

/// Change a task
#[derive(Debug, Args)]
pub struct TaskUpdateCommand {
    /// Task id
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

    /// New status: pending or completed
    #[arg(long, value_parser = parse_status)]
    pub status: Option<Status>,

    /// New due date (YYYY-MM-DD)
    #[arg(long = "due", value_parser = parse_date, conflicts_with = "clear_due")]
    pub due_date: Option<NaiveDate>,

    /// Remove the due date
    #[arg(long)]
    pub clear_due: bool,

    /// Move the task to another list
    #[arg(long = "list")]
    pub list_id: Option<String>,
}

impl TaskUpdateCommand {
    fn build_update(&self) -> TaskUpdate {
        let mut update = TaskUpdate::new();
        if let Some(title) = &self.title {
            update = update.with_title(title);
        }
        if let Some(description) = &self.description {
            update = update.with_description(description);
        }
        if self.clear_description {
            update = update.clear_description();
        }
        if let Some(status) = self.status {
            update = update.with_status(status);
        }
        if let Some(due_date) = self.due_date {
            update = update.with_due_date(due_date);
        }
        if self.clear_due {
            update = update.clear_due_date();
        }
        if let Some(list_id) = &self.list_id {
            update = update.with_list(list_id);
        }
        update
    }

    pub async fn execute(&self, db: &Database) -> Result<Task, DbError> {
        db.tasks().update(&self.id, &self.build_update()).await
    }
}

/// Delete a task
#[derive(Debug, Args)]
pub struct TaskRmCommand {
    /// Task id
    #[arg(required = true)]
    pub id: String,
}

impl TaskRmCommand {
    pub async fn execute(&self, db: &Database) -> Result<(), DbError> {
        db.tasks().delete(&self.id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskboard_db::{OwnerFilter, StatusFilter};

    fn ls_cmd() -> TaskLsCommand {
        TaskLsCommand {
            search: None,
            filter: None,
            user_filter: None,
            page: None,
            json: false,
        }
    }

    #[test]
    fn test_filter_spec_defaults() {
        assert_eq!(ls_cmd().filter_spec(), FilterSpec::new());
    }

    #[test]
    fn test_filter_spec_is_lenient() {
        let cmd = TaskLsCommand {
            search: Some("   ".to_string()),
            filter: Some("bogus".to_string()),
            user_filter: Some("all".to_string()),
            page: Some(-3),
            ..ls_cmd()
        };
        let spec = cmd.filter_spec();
        assert!(spec.search().is_none());
        assert_eq!(spec.status(), StatusFilter::All);
        assert_eq!(spec.owner(), &OwnerFilter::AllOwners);
        assert_eq!(spec.page(), 1);
    }

    #[test]
    fn test_filter_spec_does_not_normalise_case() {
        let cmd = TaskLsCommand {
            filter: Some("COMPLETED".to_string()),
            user_filter: Some("ALL".to_string()),
            ..ls_cmd()
        };
        let spec = cmd.filter_spec();
        assert_eq!(spec.status(), StatusFilter::All);
        assert_eq!(spec.owner(), &OwnerFilter::SpecificOwner("ALL".to_string()));
    }

    #[test]
    fn test_filter_spec_passes_values_through() {
        let cmd = TaskLsCommand {
            search: Some("Review".to_string()),
            filter: Some("completed".to_string()),
            user_filter: Some("u7".to_string()),
            page: Some(4),
            ..ls_cmd()
        };
        let spec = cmd.filter_spec();
        assert_eq!(spec.search(), Some("Review"));
        assert_eq!(spec.status(), StatusFilter::Completed);
        assert_eq!(spec.owner(), &OwnerFilter::SpecificOwner("u7".to_string()));
        assert_eq!(spec.page(), 4);
    }

    #[test]
    fn test_build_task_update() {
        let cmd = TaskUpdateCommand {
            id: "t1".to_string(),
            title: None,
            description: None,
            clear_description: true,
            status: Some(Status::Completed),
            due_date: None,
            clear_due: true,
            list_id: Some("l2".to_string()),
        };
        assert_eq!(
            cmd.build_update(),
            TaskUpdate::new()
                .clear_description()
                .with_status(Status::Completed)
                .clear_due_date()
                .with_list("l2")
        );
    }
}

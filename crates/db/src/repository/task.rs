//! Task repository for CRUD operations on tasks
//!
//! Provides a repository pattern implementation for task operations,
//! encapsulating SurrealDB queries and providing a clean API. Every task
//! references an existing list; the reference is checked on create and
//! whenever an update moves the task.

use crate::error::{DbError, DbResult};
use crate::models::{NewTask, Status, Task, record_key};
use crate::repository::{normalize_description, record_exists, unused_id, validate_title};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use surrealdb::sql::Thing;
use tracing::{debug, trace};

/// Repository for task CRUD operations
///
/// Encapsulates database queries for tasks, providing a clean API
/// that hides the underlying SurrealDB implementation details.
pub struct TaskRepository<'a> {
    client: &'a Surreal<Db>,
}

/// Update structure for partial task updates
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TaskUpdate {
    /// New title (if Some)
    pub title: Option<String>,
    /// New description; `Some(None)` clears it
    pub description: Option<Option<String>>,
    /// New status (if Some)
    pub status: Option<Status>,
    /// New due date; `Some(None)` clears it
    pub due_date: Option<Option<NaiveDate>>,
    /// Move the task to another list (if Some)
    pub list_id: Option<String>,
}

impl TaskUpdate {
    /// Create a new empty update
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a new title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set a new description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(Some(description.into()));
        self
    }

    /// Clear the description
    pub fn clear_description(mut self) -> Self {
        self.description = Some(None);
        self
    }

    /// Set the task status
    pub fn with_status(mut self, status: Status) -> Self {
        self.status = Some(status);
        self
    }

    /// Set a new due date
    pub fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(Some(due_date));
        self
    }

    /// Clear the due date
    pub fn clear_due_date(mut self) -> Self {
        self.due_date = Some(None);
        self
    }

    /// Move the task to another list
    pub fn with_list(mut self, list_id: impl Into<String>) -> Self {
        self.list_id = Some(list_id.into());
        self
    }

    /// Check if any updates are specified
    pub fn has_updates(&self) -> bool {
        self.title.is_some()
            || self.description.is_some()
            || self.status.is_some()
            || self.due_date.is_some()
            || self.list_id.is_some()
    }
}

#[derive(Debug, Deserialize)]
struct TaskRow {
    id: Thing,
    title: String,
    description: Option<String>,
    status: Status,
    due_date: Option<NaiveDate>,
    list: Thing,
    created_at: Option<DateTime<Utc>>,
}

impl From<TaskRow> for Task {
    fn from(row: TaskRow) -> Self {
        Task {
            id: record_key(&row.id),
            title: row.title,
            description: row.description,
            status: row.status,
            due_date: row.due_date,
            list_id: record_key(&row.list),
            created_at: row.created_at,
        }
    }
}

/// Render a due date the way it is stored
fn due_date_param(due_date: Option<NaiveDate>) -> Option<String> {
    due_date.map(|d| d.format("%Y-%m-%d").to_string())
}

impl<'a> TaskRepository<'a> {
    /// Create a new TaskRepository with the given database client
    pub fn new(client: &'a Surreal<Db>) -> Self {
        Self { client }
    }

    /// Check if a task with the given ID exists.
    pub async fn exists(&self, id: &str) -> DbResult<bool> {
        record_exists(self.client, "task", id).await
    }

    async fn require_list(&self, list_id: &str) -> DbResult<()> {
        if record_exists(self.client, "task_list", list_id).await? {
            Ok(())
        } else {
            Err(DbError::validation(
                "list_id",
                format!("list '{}' does not exist", list_id),
            ))
        }
    }

    /// Create a task in an existing list.
    ///
    /// # Errors
    ///
    /// Returns `DbError::ValidationError` if the title is blank or too long,
    /// or if the list does not exist.
    pub async fn create(&self, new: &NewTask) -> DbResult<Task> {
        let title = validate_title(&new.title)?;
        self.require_list(&new.list_id).await?;

        let id = unused_id(self.client, "task", &title).await?;
        debug!("Creating task: {} with title: {}", id, title);
        trace!("Task data: {:?}", new);

        let mut result = self
            .client
            .query(
                r#"CREATE type::thing("task", $id) SET
                    title = $title,
                    description = $description,
                    status = $status,
                    due_date = $due_date,
                    list = type::thing("task_list", $list)"#,
            )
            .bind(("id", id.clone()))
            .bind(("title", title))
            .bind((
                "description",
                normalize_description(new.description.as_deref()),
            ))
            .bind(("status", new.status.as_str()))
            .bind(("due_date", due_date_param(new.due_date)))
            .bind(("list", new.list_id.clone()))
            .await?
            .check()?;
        let row: Option<TaskRow> = result.take(0)?;

        row.map(Task::from)
            .ok_or_else(|| DbError::not_found("task", id))
    }

    /// Fetch a task, or `None` if it does not exist.
    pub async fn find(&self, id: &str) -> DbResult<Option<Task>> {
        debug!("Fetching task: {}", id);
        let mut result = self
            .client
            .query(r#"SELECT * FROM type::thing("task", $id)"#)
            .bind(("id", id.to_string()))
            .await?;
        let row: Option<TaskRow> = result.take(0)?;
        Ok(row.map(Task::from))
    }

    /// Fetch a task.
    ///
    /// # Errors
    ///
    /// Returns `DbError::NotFound` if the task does not exist.
    pub async fn get(&self, id: &str) -> DbResult<Task> {
        self.find(id)
            .await?
            .ok_or_else(|| DbError::not_found("task", id))
    }

    /// Apply partial updates to a task and return the updated task.
    ///
    /// # Errors
    ///
    /// Returns `DbError::NotFound` if the task does not exist.
    /// Returns `DbError::ValidationError` for an invalid title or a target
    /// list that does not exist.
    pub async fn update(&self, id: &str, updates: &TaskUpdate) -> DbResult<Task> {
        debug!("Updating task: {}", id);
        trace!("Updates: {:?}", updates);

        if !self.exists(id).await? {
            return Err(DbError::not_found("task", id));
        }
        if !updates.has_updates() {
            debug!("No updates specified for task: {}", id);
            return self.get(id).await;
        }

        let mut field_updates = Vec::new();
        let mut bindings: Vec<(&'static str, Option<String>)> = Vec::new();

        if let Some(title) = &updates.title {
            field_updates.push("title = $title");
            bindings.push(("title", Some(validate_title(title)?)));
        }

        if let Some(description) = &updates.description {
            field_updates.push("description = $description");
            bindings.push((
                "description",
                normalize_description(description.as_deref()),
            ));
        }

        if let Some(status) = updates.status {
            field_updates.push("status = $status");
            bindings.push(("status", Some(status.as_str().to_string())));
        }

        if let Some(due_date) = updates.due_date {
            field_updates.push("due_date = $due_date");
            bindings.push(("due_date", due_date_param(due_date)));
        }

        if let Some(list_id) = &updates.list_id {
            self.require_list(list_id).await?;
            field_updates.push(r#"list = type::thing("task_list", $list)"#);
            bindings.push(("list", Some(list_id.clone())));
        }

        field_updates.push("updated_at = time::now()");

        let query = format!(
            r#"UPDATE type::thing("task", $id) SET {}"#,
            field_updates.join(", ")
        );

        let mut request = self.client.query(&query).bind(("id", id.to_string()));
        for binding in bindings {
            request = request.bind(binding);
        }
        let mut result = request.await?.check()?;
        let row: Option<TaskRow> = result.take(0)?;

        row.map(Task::from)
            .ok_or_else(|| DbError::not_found("task", id))
    }

    /// Delete a task.
    ///
    /// # Errors
    ///
    /// Returns `DbError::NotFound` if the task does not exist.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        if !self.exists(id).await? {
            return Err(DbError::not_found("task", id));
        }

        debug!("Deleting task: {}", id);
        self.client
            .query(r#"DELETE type::thing("task", $id)"#)
            .bind(("id", id.to_string()))
            .await?
            .check()?;
        Ok(())
    }
}

//! Task list accessor
//!
//! Create, read, update and delete for task lists. A list always has exactly
//! one owner, fixed at creation. Deleting a list deletes its tasks in the
//! same transaction.

use crate::error::{DbError, DbResult};
use crate::models::{NewTaskList, TaskList, record_key};
use crate::repository::{normalize_description, record_exists, unused_id, validate_title};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use surrealdb::sql::Thing;
use tracing::{debug, trace};

/// Repository for task list CRUD operations
pub struct ListRepository<'a> {
    client: &'a Surreal<Db>,
}

/// Partial update for a task list
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ListUpdate {
    /// New title (if Some)
    pub title: Option<String>,
    /// New description; `Some(None)` clears it
    pub description: Option<Option<String>>,
}

impl ListUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(Some(description.into()));
        self
    }

    pub fn clear_description(mut self) -> Self {
        self.description = Some(None);
        self
    }

    /// Check if any updates are specified
    pub fn has_updates(&self) -> bool {
        self.title.is_some() || self.description.is_some()
    }
}

#[derive(Debug, Deserialize)]
struct ListRow {
    id: Thing,
    title: String,
    description: Option<String>,
    owner: Thing,
    created_at: Option<DateTime<Utc>>,
}

impl From<ListRow> for TaskList {
    fn from(row: ListRow) -> Self {
        TaskList {
            id: record_key(&row.id),
            title: row.title,
            description: row.description,
            owner_id: record_key(&row.owner),
            created_at: row.created_at,
        }
    }
}

impl<'a> ListRepository<'a> {
    pub fn new(client: &'a Surreal<Db>) -> Self {
        Self { client }
    }

    /// Check if a list with the given ID exists.
    pub async fn exists(&self, id: &str) -> DbResult<bool> {
        record_exists(self.client, "task_list", id).await
    }

    /// Create a list owned by `new.owner_id`.
    ///
    /// # Errors
    ///
    /// Returns `DbError::ValidationError` if the title is blank or too long,
    /// or if the owner does not exist.
    pub async fn create(&self, new: &NewTaskList) -> DbResult<TaskList> {
        let title = validate_title(&new.title)?;
        if !record_exists(self.client, "user", &new.owner_id).await? {
            return Err(DbError::validation(
                "user_id",
                format!("user '{}' does not exist", new.owner_id),
            ));
        }
        let description = normalize_description(new.description.as_deref());

        let id = unused_id(self.client, "task_list", &title).await?;
        debug!("Creating list: {} with title: {}", id, title);
        trace!("List data: {:?}", new);

        let mut result = self
            .client
            .query(
                r#"CREATE type::thing("task_list", $id) SET
                    title = $title,
                    description = $description,
                    owner = type::thing("user", $owner)"#,
            )
            .bind(("id", id.clone()))
            .bind(("title", title))
            .bind(("description", description))
            .bind(("owner", new.owner_id.clone()))
            .await?
            .check()?;
        let row: Option<ListRow> = result.take(0)?;

        row.map(TaskList::from)
            .ok_or_else(|| DbError::not_found("list", id))
    }

    /// Fetch a list, or `None` if it does not exist.
    pub async fn find(&self, id: &str) -> DbResult<Option<TaskList>> {
        let mut result = self
            .client
            .query(r#"SELECT * FROM type::thing("task_list", $id)"#)
            .bind(("id", id.to_string()))
            .await?;
        let row: Option<ListRow> = result.take(0)?;
        Ok(row.map(TaskList::from))
    }

    /// Fetch a list.
    ///
    /// # Errors
    ///
    /// Returns `DbError::NotFound` if the list does not exist.
    pub async fn get(&self, id: &str) -> DbResult<TaskList> {
        self.find(id)
            .await?
            .ok_or_else(|| DbError::not_found("list", id))
    }

    /// Lists owned by `owner_id`, newest first.
    pub async fn list_by_owner(&self, owner_id: &str) -> DbResult<Vec<TaskList>> {
        let mut result = self
            .client
            .query(
                r#"SELECT * FROM task_list
                    WHERE owner = type::thing("user", $owner)
                    ORDER BY created_at DESC, id DESC"#,
            )
            .bind(("owner", owner_id.to_string()))
            .await?;
        let rows: Vec<ListRow> = result.take(0)?;
        debug!("Fetched {} lists for owner {}", rows.len(), owner_id);
        Ok(rows.into_iter().map(TaskList::from).collect())
    }

    /// Apply a partial update and return the updated list.
    ///
    /// An update with no fields returns the list unchanged.
    ///
    /// # Errors
    ///
    /// Returns `DbError::NotFound` if the list does not exist and
    /// `DbError::ValidationError` for an invalid title.
    pub async fn update(&self, id: &str, updates: &ListUpdate) -> DbResult<TaskList> {
        debug!("Updating list: {}", id);
        trace!("Updates: {:?}", updates);

        if !self.exists(id).await? {
            return Err(DbError::not_found("list", id));
        }
        if !updates.has_updates() {
            debug!("No updates specified for list: {}", id);
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

        field_updates.push("updated_at = time::now()");

        let query = format!(
            r#"UPDATE type::thing("task_list", $id) SET {}"#,
            field_updates.join(", ")
        );

        let mut request = self.client.query(&query).bind(("id", id.to_string()));
        for binding in bindings {
            request = request.bind(binding);
        }
        let mut result = request.await?.check()?;
        let row: Option<ListRow> = result.take(0)?;

        row.map(TaskList::from)
            .ok_or_else(|| DbError::not_found("list", id))
    }

    /// Delete a list together with all of its tasks.
    ///
    /// # Errors
    ///
    /// Returns `DbError::NotFound` if the list does not exist.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        if !self.exists(id).await? {
            return Err(DbError::not_found("list", id));
        }

        debug!("Deleting list {} and its tasks", id);
        self.client
            .query(
                r#"BEGIN TRANSACTION;
                DELETE task WHERE list = type::thing("task_list", $id);
                DELETE type::thing("task_list", $id);
                COMMIT TRANSACTION;"#,
            )
            .bind(("id", id.to_string()))
            .await?
            .check()?;

        Ok(())
    }
}

//! Data models for Taskboard
//!
//! Defines Rust types that map to the SurrealDB schema for users, task lists
//! and tasks, plus the joined `TaskView` returned by browse queries.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::sql::{Id, Thing};

/// Maximum length of list and task titles
pub const MAX_TITLE_LEN: usize = 255;

/// Task status
///
/// A task is either still open or done.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Pending,
    Completed,
}

impl Status {
    /// Returns the string representation used in the database
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Pending => "pending",
            Status::Completed => "completed",
        }
    }

    /// Parse a status from its database representation.
    ///
    /// Returns `None` for anything other than `pending` or `completed`.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Status::Pending),
            "completed" => Some(Status::Completed),
            _ => None,
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Extract the plain key of a record id (`user:ab12cd` -> `ab12cd`).
///
/// String keys are returned verbatim; `Thing`'s `Display` would wrap keys
/// that look numeric in angle brackets.
pub(crate) fn record_key(thing: &Thing) -> String {
    match &thing.id {
        Id::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// A person who owns task lists
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
}

/// A named container of tasks, owned by exactly one user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskList {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub owner_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// A work item belonging to exactly one list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    pub list_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Input for creating a task list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTaskList {
    pub title: String,
    pub description: Option<String>,
    pub owner_id: String,
}

impl NewTaskList {
    /// Create a new list input with required fields
    pub fn new(title: impl Into<String>, owner_id: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            owner_id: owner_id.into(),
        }
    }

    /// Set the description of this list
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Input for creating a task
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub description: Option<String>,
    pub status: Status,
    pub due_date: Option<NaiveDate>,
    pub list_id: String,
}

impl NewTask {
    /// Create a new pending task input for the given list
    pub fn new(title: impl Into<String>, list_id: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            status: Status::Pending,
            due_date: None,
            list_id: list_id.into(),
        }
    }

    /// Set the description of this task
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the status of this task
    pub fn with_status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }

    /// Set the due date of this task
    pub fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }
}

/// Owner of a list, as shown alongside a task
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OwnerSummary {
    pub id: String,
    pub name: String,
}

/// The list a task belongs to, with its owner resolved
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListSummary {
    pub id: String,
    pub title: String,
    pub owner: OwnerSummary,
}

/// A task joined with its list and the list's owner
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskView {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub status: Status,
    pub due_date: Option<NaiveDate>,
    pub list_id: String,
    pub created_at: DateTime<Utc>,
    pub list: ListSummary,
}

impl TaskView {
    /// Id of the user owning this task's list
    pub fn owner_id(&self) -> &str {
        &self.list.owner.id
    }
}

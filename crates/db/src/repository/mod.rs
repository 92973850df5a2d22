//! Repository modules for database operations
//!
//! Provides accessor repositories for users, task lists and tasks, and the
//! browse pipeline: `FilterSpec` -> `TaskQuery` (inside an `OwnershipScope`)
//! -> `TaskLister` -> `Page`.

mod composer;
mod filter;
mod list;
mod lister;
mod page;
mod scope;
mod task;
mod user;

pub use composer::{Predicate, SurqlStatement, TaskQuery, newest_first};
pub use filter::{FilterSpec, OwnerFilter, StatusFilter};
pub use list::{ListRepository, ListUpdate};
pub use lister::{AppliedFilters, TaskLister, TaskOverview};
pub use page::{PAGE_SIZE, Page};
pub use scope::OwnershipScope;
pub use task::{TaskRepository, TaskUpdate};
pub use user::UserRepository;

use crate::error::{DbError, DbResult};
use crate::id::{IdGenerator, MAX_ATTEMPTS};
use crate::models::MAX_TITLE_LEN;
use serde::Deserialize;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

/// Minimal row for checking record existence
#[derive(Debug, Deserialize)]
struct IdOnly {
    #[allow(dead_code)]
    id: surrealdb::sql::Thing,
}

/// Check whether `table:id` exists.
pub(crate) async fn record_exists(
    client: &Surreal<Db>,
    table: &'static str,
    id: &str,
) -> DbResult<bool> {
    let mut result = client
        .query("SELECT id FROM type::thing($tb, $id)")
        .bind(("tb", table))
        .bind(("id", id.to_string()))
        .await?;
    let rows: Vec<IdOnly> = result.take(0)?;
    Ok(!rows.is_empty())
}

/// Pick an id for a new record in `table` that is not taken yet.
pub(crate) async fn unused_id(
    client: &Surreal<Db>,
    table: &'static str,
    seed: &str,
) -> DbResult<String> {
    let mut generator = IdGenerator::new(seed);

    while let Some(id) = generator.next_id() {
        if !record_exists(client, table, &id).await? {
            return Ok(id);
        }
    }

    Err(DbError::IdExhausted {
        entity: table,
        attempts: MAX_ATTEMPTS,
    })
}

/// Validate a list or task title and return it trimmed.
pub(crate) fn validate_title(title: &str) -> DbResult<String> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(DbError::validation("title", "title is required"));
    }
    if trimmed.chars().count() > MAX_TITLE_LEN {
        return Err(DbError::validation(
            "title",
            format!("title must be at most {} characters", MAX_TITLE_LEN),
        ));
    }
    Ok(trimmed.to_string())
}

/// Blank descriptions are stored as absent.
pub(crate) fn normalize_description(description: Option<&str>) -> Option<String> {
    description
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(String::from)
}

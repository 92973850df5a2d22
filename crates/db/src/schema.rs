//! Database schema initialization for Taskboard
//!
//! Defines the SurrealDB schema for users, task lists and tasks. Lists link
//! to their owning user and tasks link to their list, so a task's owner is
//! reached through `list.owner`.

use crate::error::DbError;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

/// SQL statements for schema initialization
mod sql {
    /// Define the user table
    pub const DEFINE_USER_TABLE: &str = r#"
        DEFINE TABLE IF NOT EXISTS user SCHEMAFULL;

        DEFINE FIELD IF NOT EXISTS name ON user TYPE string
            ASSERT string::len($value) > 0;

        DEFINE FIELD IF NOT EXISTS created_at ON user TYPE datetime DEFAULT time::now();
    "#;

    /// Define the task_list table, owned by a user
    pub const DEFINE_TASK_LIST_TABLE: &str = r#"
        DEFINE TABLE IF NOT EXISTS task_list SCHEMAFULL;

        DEFINE FIELD IF NOT EXISTS title ON task_list TYPE string
            ASSERT string::len($value) > 0 AND string::len($value) <= 255;

        DEFINE FIELD IF NOT EXISTS description ON task_list TYPE option<string>;

        DEFINE FIELD IF NOT EXISTS owner ON task_list TYPE record<user>;

        DEFINE FIELD IF NOT EXISTS created_at ON task_list TYPE datetime DEFAULT time::now();

        DEFINE FIELD IF NOT EXISTS updated_at ON task_list TYPE datetime DEFAULT time::now();

        DEFINE INDEX IF NOT EXISTS task_list_owner ON task_list FIELDS owner;
    "#;

    /// Define the task table, belonging to a task_list
    pub const DEFINE_TASK_TABLE: &str = r#"
        DEFINE TABLE IF NOT EXISTS task SCHEMAFULL;

        DEFINE FIELD IF NOT EXISTS title ON task TYPE string
            ASSERT string::len($value) > 0 AND string::len($value) <= 255;

        DEFINE FIELD IF NOT EXISTS description ON task TYPE option<string>;

        DEFINE FIELD IF NOT EXISTS status ON task TYPE string
            ASSERT $value IN ["pending", "completed"];

        DEFINE FIELD IF NOT EXISTS due_date ON task TYPE option<string>;

        DEFINE FIELD IF NOT EXISTS list ON task TYPE record<task_list>;

        DEFINE FIELD IF NOT EXISTS created_at ON task TYPE datetime DEFAULT time::now();

        DEFINE FIELD IF NOT EXISTS updated_at ON task TYPE datetime DEFAULT time::now();

        DEFINE INDEX IF NOT EXISTS task_list_ref ON task FIELDS list;
    "#;
}

/// Initialize the database schema.
///
/// Creates the user, task_list and task tables with all required fields,
/// assertions and indexes.
///
/// This function is idempotent - it can be called multiple times safely
/// as it uses `IF NOT EXISTS` clauses.
///
/// # Errors
///
/// Returns `DbError::Schema` if any schema definition fails.
pub async fn init_schema(client: &Surreal<Db>) -> Result<(), DbError> {
    for statements in [
        sql::DEFINE_USER_TABLE,
        sql::DEFINE_TASK_LIST_TABLE,
        sql::DEFINE_TASK_TABLE,
    ] {
        client
            .query(statements)
            .await
            .and_then(|response| response.check())
            .map_err(|e| DbError::Schema(Box::new(e)))?;
    }

    Ok(())
}

//! Test infrastructure for integration tests
//!
//! Provides isolated database setup/teardown and command builder helpers.
//! Each test gets its own database instance to ensure no shared state.

#![allow(dead_code)]

use std::path::PathBuf;
use taskboard_cli::commands::{TaskAddCommand, TaskLsCommand};
use taskboard_db::{Database, NewTaskList, Status, TaskList, User};

/// Test context containing an isolated database and temp directory
pub struct TestContext {
    pub db: Database,
    pub temp_dir: PathBuf,
}

impl TestContext {
    /// Create a new test context with an isolated database.
    ///
    /// Each call creates a uniquely named temp directory using process ID,
    /// thread ID, and nanosecond timestamp to guarantee isolation.
    pub async fn new() -> Self {
        let temp_dir = std::env::temp_dir().join(format!(
            "tb-integration-test-{}-{:?}-{}",
            std::process::id(),
            std::thread::current().id(),
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap()
                .as_nanos()
        ));

        let db = Database::connect(&temp_dir).await.unwrap();
        db.init().await.unwrap();

        Self { db, temp_dir }
    }

    /// Create a user and return it
    pub async fn user(&self, name: &str) -> User {
        self.db.users().create(name).await.unwrap()
    }

    /// Create a list owned by `owner` and return it
    pub async fn list(&self, title: &str, owner: &User) -> TaskList {
        self.db
            .lists()
            .create(&NewTaskList::new(title, &owner.id))
            .await
            .unwrap()
    }

    /// Create `count` tasks in `list`, titled "<prefix> <n>", and return their ids
    /// in creation order
    pub async fn tasks(&self, list: &TaskList, prefix: &str, count: usize) -> Vec<String> {
        let mut ids = Vec::with_capacity(count);
        for n in 1..=count {
            let task = add_cmd(&format!("{} {}", prefix, n), &list.id)
                .execute(&self.db)
                .await
                .unwrap();
            ids.push(task.id);
        }
        ids
    }
}

impl Drop for TestContext {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.temp_dir);
    }
}

// =============================================================================
// Command Builder Helpers
// =============================================================================

/// Create a TaskAddCommand with default optional fields filled in.
pub fn add_cmd(title: &str, list_id: &str) -> TaskAddCommand {
    TaskAddCommand {
        title: title.to_string(),
        list_id: list_id.to_string(),
        description: None,
        due_date: None,
        status: None,
    }
}

/// Create a TaskAddCommand with a status and description.
pub fn add_cmd_full(
    title: &str,
    list_id: &str,
    status: Status,
    description: Option<&str>,
) -> TaskAddCommand {
    TaskAddCommand {
        status: Some(status),
        description: description.map(String::from),
        ..add_cmd(title, list_id)
    }
}

/// Create a TaskLsCommand with no filters.
pub fn ls_cmd() -> TaskLsCommand {
    TaskLsCommand {
        search: None,
        filter: None,
        user_filter: None,
        page: None,
        json: false,
    }
}

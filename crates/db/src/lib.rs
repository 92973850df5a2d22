//! Database module for Taskboard
//!
//! Provides SurrealDB connection management with embedded RocksDB backend,
//! schema initialization, accessors for users, task lists and tasks, and the
//! scoped, filtered and paginated task browse.

pub mod error;
pub mod id;
pub mod models;
pub mod repository;
pub mod schema;
pub mod seed;

pub use error::{DbError, DbResult};
pub use models::{
    ListSummary, NewTask, NewTaskList, OwnerSummary, Status, Task, TaskList, TaskView, User,
};
pub use repository::{
    AppliedFilters, FilterSpec, ListRepository, ListUpdate, OwnerFilter, OwnershipScope,
    PAGE_SIZE, Page, Predicate, StatusFilter, TaskLister, TaskOverview, TaskQuery,
    TaskRepository, TaskUpdate, UserRepository,
};
pub use seed::{SeedSummary, seed_demo_data};

use std::path::{Path, PathBuf};
use std::process::Command;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, RocksDb};
use tracing::debug;

/// Default database path relative to project root or current working directory
pub const DEFAULT_DB_PATH: &str = ".taskboard/data";

/// Database wrapper providing connection management for SurrealDB
pub struct Database {
    /// The underlying SurrealDB client
    client: Surreal<Db>,
    /// Path where the database is stored
    path: PathBuf,
}

impl Database {
    /// Connect to a SurrealDB database at the specified path.
    ///
    /// Creates the database directory if it doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns `DbError::CreateDirectory` if directory creation fails.
    /// Returns `DbError::Connection` if database connection fails.
    pub async fn connect(path: &Path) -> DbResult<Self> {
        let path = Self::prepare_path(path)?;
        debug!("Opening database at {}", path.display());

        let client =
            Surreal::new::<RocksDb>(path.clone())
                .await
                .map_err(|e| DbError::Connection {
                    path: path.clone(),
                    source: Box::new(e),
                })?;

        Ok(Self { client, path })
    }

    /// Initialize the database schema.
    ///
    /// Selects the taskboard namespace and database, then defines the user,
    /// task_list and task tables.
    ///
    /// # Errors
    ///
    /// Returns `DbError::Schema` if schema initialization fails.
    pub async fn init(&self) -> DbResult<()> {
        self.client
            .use_ns("taskboard")
            .use_db("main")
            .await
            .map_err(|e| DbError::Schema(Box::new(e)))?;

        schema::init_schema(&self.client).await?;

        Ok(())
    }

    /// Get a reference to the underlying SurrealDB client.
    pub fn client(&self) -> &Surreal<Db> {
        &self.client
    }

    /// Get the path where the database is stored.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// User accessor
    pub fn users(&self) -> UserRepository<'_> {
        UserRepository::new(&self.client)
    }

    /// Task list accessor
    pub fn lists(&self) -> ListRepository<'_> {
        ListRepository::new(&self.client)
    }

    /// Task accessor
    pub fn tasks(&self) -> TaskRepository<'_> {
        TaskRepository::new(&self.client)
    }

    /// Scoped task browse
    pub fn browse(&self) -> TaskLister<'_> {
        TaskLister::new(&self.client)
    }

    /// Get the default database path based on project root.
    ///
    /// Uses `git rev-parse --show-toplevel` to find the project root and
    /// returns `<project_root>/.taskboard/data`. Outside a git repository it
    /// falls back to `.taskboard/data` relative to the current directory.
    pub fn default_path() -> PathBuf {
        let base_path = find_project_root().unwrap_or_else(|| PathBuf::from("."));
        base_path.join(DEFAULT_DB_PATH)
    }

    /// Prepare the database path by creating missing directories.
    fn prepare_path(path: &Path) -> DbResult<PathBuf> {
        let path = path.to_path_buf();

        if path.as_os_str().is_empty() {
            return Err(DbError::InvalidPath {
                path,
                reason: "path is empty".to_string(),
            });
        }

        if !path.exists() {
            std::fs::create_dir_all(&path).map_err(|e| DbError::CreateDirectory {
                path: path.clone(),
                source: e,
            })?;
        }

        Ok(path)
    }
}

static_assertions::assert_impl_all!(Database: Send, Sync);

/// Find the project root by running `git rev-parse --show-toplevel`.
///
/// Returns `None` if not in a git repository or the command fails.
pub fn find_project_root() -> Option<PathBuf> {
    let output = Command::new("git")
        .args(["rev-parse", "--show-toplevel"])
        .output()
        .ok()?;

    if output.status.success() {
        let path_str = String::from_utf8(output.stdout).ok()?;
        Some(PathBuf::from(path_str.trim()))
    } else {
        None
    }
}

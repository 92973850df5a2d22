//! User accessor

use crate::error::{DbError, DbResult};
use crate::models::{User, record_key};
use crate::repository::{record_exists, unused_id};
use serde::Deserialize;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use surrealdb::sql::Thing;
use tracing::debug;

/// Repository for users
pub struct UserRepository<'a> {
    client: &'a Surreal<Db>,
}

#[derive(Debug, Deserialize)]
struct UserRow {
    id: Thing,
    name: String,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: record_key(&row.id),
            name: row.name,
        }
    }
}

impl<'a> UserRepository<'a> {
    pub fn new(client: &'a Surreal<Db>) -> Self {
        Self { client }
    }

    /// Check if a user with the given ID exists.
    pub async fn exists(&self, id: &str) -> DbResult<bool> {
        record_exists(self.client, "user", id).await
    }

    /// Create a user with a generated id.
    ///
    /// # Errors
    ///
    /// Returns `DbError::ValidationError` if `name` is blank.
    pub async fn create(&self, name: &str) -> DbResult<User> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DbError::validation("name", "name is required"));
        }

        let id = unused_id(self.client, "user", name).await?;
        debug!("Creating user: {} with name: {}", id, name);

        let mut result = self
            .client
            .query(r#"CREATE type::thing("user", $id) SET name = $name"#)
            .bind(("id", id.clone()))
            .bind(("name", name.to_string()))
            .await?
            .check()?;
        let row: Option<UserRow> = result.take(0)?;

        row.map(User::from)
            .ok_or_else(|| DbError::not_found("user", id))
    }

    /// Fetch a user, or `None` if it does not exist.
    pub async fn find(&self, id: &str) -> DbResult<Option<User>> {
        let mut result = self
            .client
            .query(r#"SELECT id, name FROM type::thing("user", $id)"#)
            .bind(("id", id.to_string()))
            .await?;
        let row: Option<UserRow> = result.take(0)?;
        Ok(row.map(User::from))
    }

    /// Fetch a user.
    ///
    /// # Errors
    ///
    /// Returns `DbError::NotFound` if the user does not exist.
    pub async fn get(&self, id: &str) -> DbResult<User> {
        self.find(id)
            .await?
            .ok_or_else(|| DbError::not_found("user", id))
    }

    /// All users, ordered by name then id.
    pub async fn list_all(&self) -> DbResult<Vec<User>> {
        let mut result = self
            .client
            .query("SELECT id, name FROM user ORDER BY name ASC, id ASC")
            .await?;
        let rows: Vec<UserRow> = result.take(0)?;
        debug!("Fetched {} users", rows.len());
        Ok(rows.into_iter().map(User::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{cleanup, insert_user, setup_test_db};

    #[tokio::test]
    async fn test_create_and_get_user() {
        let (db, temp_dir) = setup_test_db().await;
        let repo = db.users();

        let created = repo.create("  Alice ").await.unwrap();
        assert_eq!(created.name, "Alice");
        assert_eq!(created.id.len(), crate::id::ID_LENGTH);

        let fetched = repo.get(&created.id).await.unwrap();
        assert_eq!(fetched, created);
        assert!(repo.exists(&created.id).await.unwrap());

        cleanup(&temp_dir);
    }

    #[tokio::test]
    async fn test_create_rejects_blank_name() {
        let (db, temp_dir) = setup_test_db().await;

        let err = db.users().create("   ").await.unwrap_err();
        assert!(matches!(err, DbError::ValidationError { field: "name", .. }));

        cleanup(&temp_dir);
    }

    #[tokio::test]
    async fn test_get_missing_user_is_not_found() {
        let (db, temp_dir) = setup_test_db().await;

        let err = db.users().get("nobody").await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { entity: "user", .. }));
        assert!(db.users().find("nobody").await.unwrap().is_none());

        cleanup(&temp_dir);
    }

    #[tokio::test]
    async fn test_list_all_orders_by_name_then_id() {
        let (db, temp_dir) = setup_test_db().await;
        insert_user(&db, "u3", "Carol").await;
        insert_user(&db, "u2", "Alice").await;
        insert_user(&db, "u1", "Alice").await;

        let users = db.users().list_all().await.unwrap();
        let ids: Vec<&str> = users.iter().map(|u| u.id.as_str()).collect();
        assert_eq!(ids, vec!["u1", "u2", "u3"]);

        cleanup(&temp_dir);
    }

    #[tokio::test]
    async fn test_numeric_looking_id_round_trips() {
        let (db, temp_dir) = setup_test_db().await;
        insert_user(&db, "123456", "Dana").await;

        let user = db.users().get("123456").await.unwrap();
        assert_eq!(user.id, "123456");

        cleanup(&temp_dir);
    }
}

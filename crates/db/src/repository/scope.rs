//! Caller ownership scope
//!
//! Every browse query is restricted to tasks whose list is owned by the
//! caller. The scope can only be built from an explicit identity.

use crate::error::{DbError, DbResult};

/// Restriction of a query to the caller's own lists
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnershipScope {
    owner_id: String,
}

impl OwnershipScope {
    /// Build the scope for the authenticated caller.
    ///
    /// # Errors
    ///
    /// Returns `DbError::Unauthorized` when no identity (or a blank one) is
    /// supplied.
    pub fn for_caller(caller: Option<&str>) -> DbResult<Self> {
        match caller.map(str::trim) {
            Some(id) if !id.is_empty() => Ok(Self {
                owner_id: id.to_string(),
            }),
            _ => Err(DbError::Unauthorized),
        }
    }

    /// Id of the user whose lists are visible
    pub fn owner_id(&self) -> &str {
        &self.owner_id
    }

    /// Whether a list owned by `owner_id` falls inside this scope
    pub fn admits(&self, owner_id: &str) -> bool {
        self.owner_id == owner_id
    }
}

//! Browse filter inputs
//!
//! `FilterSpec` is the validated, normalized form of the raw `search`,
//! `filter`, `user_filter` and `page` request parameters. Construction never
//! fails: unrecognised values degrade to the permissive default.

use crate::models::Status;
use serde::Serialize;

/// Status restriction applied to a browse query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusFilter {
    #[default]
    All,
    Pending,
    Completed,
}

impl StatusFilter {
    /// Decode a raw status parameter.
    ///
    /// Only the exact values `pending` and `completed` narrow the query;
    /// anything else, including other spellings, means `All`.
    pub fn from_raw(raw: Option<&str>) -> Self {
        match raw {
            Some("pending") => StatusFilter::Pending,
            Some("completed") => StatusFilter::Completed,
            _ => StatusFilter::All,
        }
    }

    /// The single status this filter keeps, or `None` for `All`
    pub fn status(&self) -> Option<Status> {
        match self {
            StatusFilter::All => None,
            StatusFilter::Pending => Some(Status::Pending),
            StatusFilter::Completed => Some(Status::Completed),
        }
    }

    /// Returns the parameter value for this filter
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusFilter::All => "all",
            StatusFilter::Pending => "pending",
            StatusFilter::Completed => "completed",
        }
    }
}

/// Owner restriction applied to a browse query
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum OwnerFilter {
    #[default]
    AllOwners,
    SpecificOwner(String),
}

impl OwnerFilter {
    /// Decode a raw owner parameter.
    ///
    /// A missing value or exactly `"all"` means every owner. Anything else is
    /// taken verbatim as a user id, without checking that the user exists.
    pub fn from_raw(raw: Option<&str>) -> Self {
        match raw {
            None | Some("all") => OwnerFilter::AllOwners,
            Some(value) => OwnerFilter::SpecificOwner(value.to_string()),
        }
    }

    /// Returns the parameter value for this filter
    pub fn as_param(&self) -> &str {
        match self {
            OwnerFilter::AllOwners => "all",
            OwnerFilter::SpecificOwner(id) => id,
        }
    }
}

/// Validated description of one browse request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSpec {
    search: Option<String>,
    status: StatusFilter,
    owner: OwnerFilter,
    page: u32,
}

impl Default for FilterSpec {
    fn default() -> Self {
        Self {
            search: None,
            status: StatusFilter::All,
            owner: OwnerFilter::AllOwners,
            page: 1,
        }
    }
}

impl FilterSpec {
    /// Create a filter with every default: no search, all statuses, all
    /// owners, first page
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a filter from raw request parameters.
    ///
    /// # Arguments
    ///
    /// * `search` - free text; blank input is treated as absent
    /// * `status` - `all`, `pending` or `completed`; anything else means `all`
    /// * `owner` - `all` or a user id
    /// * `page` - 1-based page number; values below 1 are clamped to 1
    pub fn from_raw(
        search: Option<&str>,
        status: Option<&str>,
        owner: Option<&str>,
        page: Option<i64>,
    ) -> Self {
        Self::new()
            .with_search(search.unwrap_or_default())
            .with_status(StatusFilter::from_raw(status))
            .with_owner(OwnerFilter::from_raw(owner))
            .with_page(page.unwrap_or(1))
    }

    /// Set the search text; blank text clears it
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        let search = search.into();
        self.search = if search.trim().is_empty() {
            None
        } else {
            Some(search)
        };
        self
    }

    /// Set the status restriction
    pub fn with_status(mut self, status: StatusFilter) -> Self {
        self.status = status;
        self
    }

    /// Set the owner restriction
    pub fn with_owner(mut self, owner: OwnerFilter) -> Self {
        self.owner = owner;
        self
    }

    /// Set the requested page, clamping to at least 1
    pub fn with_page(mut self, page: i64) -> Self {
        self.page = page.clamp(1, u32::MAX as i64) as u32;
        self
    }

    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    pub fn status(&self) -> StatusFilter {
        self.status
    }

    pub fn owner(&self) -> &OwnerFilter {
        &self.owner
    }

    pub fn page(&self) -> u32 {
        self.page
    }
}

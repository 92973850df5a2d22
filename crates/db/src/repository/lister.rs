//! Scoped task browse
//!
//! Runs a composed `TaskQuery` as one SELECT, so the total count and the page
//! contents come from the same snapshot, then slices the ordered rows into a
//! `Page`.

use crate::error::DbResult;
use crate::models::{
    ListSummary, OwnerSummary, Status, TaskList, TaskView, User, record_key,
};
use crate::repository::composer::TaskQuery;
use crate::repository::filter::{FilterSpec, StatusFilter};
use crate::repository::list::ListRepository;
use crate::repository::page::Page;
use crate::repository::scope::OwnershipScope;
use crate::repository::user::UserRepository;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use surrealdb::sql::Thing;
use tracing::{debug, trace, warn};

/// Lists tasks visible to a caller
pub struct TaskLister<'a> {
    client: &'a Surreal<Db>,
}

/// The filters a browse was run with, echoed back to the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppliedFilters {
    pub search: Option<String>,
    pub filter: StatusFilter,
    pub user_filter: String,
}

impl From<&FilterSpec> for AppliedFilters {
    fn from(spec: &FilterSpec) -> Self {
        Self {
            search: spec.search().map(str::to_string),
            filter: spec.status(),
            user_filter: spec.owner().as_param().to_string(),
        }
    }
}

/// Everything a task listing screen shows: the page of tasks, the caller's
/// lists, every user (for the owner picker) and the filters in effect
#[derive(Debug, Clone, Serialize)]
pub struct TaskOverview {
    pub tasks: Page<TaskView>,
    pub lists: Vec<TaskList>,
    pub users: Vec<User>,
    pub filters: AppliedFilters,
}

#[derive(Debug, Deserialize)]
struct FetchedOwner {
    id: Thing,
    name: String,
}

#[derive(Debug, Deserialize)]
struct FetchedList {
    id: Thing,
    title: String,
    owner: FetchedOwner,
}

#[derive(Debug, Deserialize)]
struct TaskViewRow {
    id: Thing,
    title: String,
    description: Option<String>,
    status: Status,
    due_date: Option<NaiveDate>,
    created_at: DateTime<Utc>,
    list: FetchedList,
}

impl From<TaskViewRow> for TaskView {
    fn from(row: TaskViewRow) -> Self {
        let list_id = record_key(&row.list.id);
        TaskView {
            id: record_key(&row.id),
            title: row.title,
            description: row.description,
            status: row.status,
            due_date: row.due_date,
            list_id: list_id.clone(),
            created_at: row.created_at,
            list: ListSummary {
                id: list_id,
                title: row.list.title,
                owner: OwnerSummary {
                    id: record_key(&row.list.owner.id),
                    name: row.list.owner.name,
                },
            },
        }
    }
}

impl<'a> TaskLister<'a> {
    pub fn new(client: &'a Surreal<Db>) -> Self {
        Self { client }
    }

    /// Every row matching `query`, in browse order.
    pub async fn fetch(&self, query: &TaskQuery) -> DbResult<Vec<TaskView>> {
        let statement = query.to_surql();
        trace!("Browse statement: {}", statement.text);

        let mut request = self.client.query(&statement.text);
        for binding in statement.bindings {
            request = request.bind(binding);
        }
        let mut result = request.await?.check()?;
        let rows: Vec<TaskViewRow> = result.take(0)?;

        let fetched = rows.len();
        let views = query.apply(rows.into_iter().map(TaskView::from));
        if views.len() != fetched {
            warn!(
                "Discarded {} browse rows outside the query",
                fetched - views.len()
            );
        }

        Ok(views)
    }

    /// One page of the caller's tasks matching `spec`.
    ///
    /// # Errors
    ///
    /// Returns `DbError::Query` if the statement fails.
    pub async fn browse(&self, scope: OwnershipScope, spec: &FilterSpec) -> DbResult<Page<TaskView>> {
        debug!(
            "Browsing tasks for {} (search={:?}, filter={}, user_filter={}, page={})",
            scope.owner_id(),
            spec.search(),
            spec.status().as_str(),
            spec.owner().as_param(),
            spec.page()
        );

        let query = TaskQuery::compose(scope, spec);
        let rows = self.fetch(&query).await?;
        let page = Page::paginate(rows, spec.page());

        debug!(
            "Page {}/{}: {} of {} tasks",
            page.page_number,
            page.total_pages,
            page.items.len(),
            page.total_count
        );
        Ok(page)
    }

    /// The browse page together with the caller's lists, all users and the
    /// applied filters.
    pub async fn overview(&self, scope: OwnershipScope, spec: &FilterSpec) -> DbResult<TaskOverview> {
        let lists = ListRepository::new(self.client)
            .list_by_owner(scope.owner_id())
            .await?;
        let users = UserRepository::new(self.client).list_all().await?;
        let tasks = self.browse(scope, spec).await?;

        Ok(TaskOverview {
            tasks,
            lists,
            users,
            filters: AppliedFilters::from(spec),
        })
    }
}

//! Browse query composition
//!
//! A `TaskQuery` is an immutable value built from an `OwnershipScope` and a
//! `FilterSpec`. The scope is a mandatory field that every evaluation starts
//! from; the optional filters are an ordered list of predicates combined with
//! AND. There is no way to build a query without a scope or to remove it
//! afterwards, so no filter combination can widen visibility.
//!
//! The same query can be rendered as one SurrealQL statement (user input is
//! always bound, never interpolated) or evaluated against rows in memory.

use crate::models::{Status, TaskView};
use crate::repository::filter::{FilterSpec, OwnerFilter};
use crate::repository::scope::OwnershipScope;
use std::cmp::Ordering;

/// Projection shared by every browse statement
const SELECT_TASK_VIEW: &str =
    "SELECT id, title, description, status, due_date, created_at, list FROM task";

/// Ordering and relation resolution shared by every browse statement
const ORDER_AND_FETCH: &str = "ORDER BY created_at DESC, id DESC FETCH list, list.owner";

/// Condition and binding name for the ownership scope
const SCOPE_CONDITION: &str = r#"list.owner = type::thing("user", $scope_owner)"#;
const SCOPE_PARAM: &str = "scope_owner";

/// A single optional restriction on browse results
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// Case-insensitive substring match on title or description.
    /// Holds the lowercased needle.
    Search(String),
    /// Exact status match
    Status(Status),
    /// The task's list is owned by this user
    ListOwner(String),
}

impl Predicate {
    /// Whether a row satisfies this predicate
    pub fn matches(&self, task: &TaskView) -> bool {
        match self {
            Predicate::Search(needle) => {
                task.title.to_lowercase().contains(needle.as_str())
                    || task
                        .description
                        .as_deref()
                        .is_some_and(|d| d.to_lowercase().contains(needle.as_str()))
            }
            Predicate::Status(status) => task.status == *status,
            Predicate::ListOwner(owner_id) => task.owner_id() == owner_id,
        }
    }

    /// SurrealQL condition for this predicate and the parameter it binds
    fn condition(&self) -> (&'static str, &'static str, String) {
        match self {
            Predicate::Search(needle) => (
                r#"(string::contains(string::lowercase(title), $search) OR string::contains(string::lowercase(description ?? ""), $search))"#,
                "search",
                needle.clone(),
            ),
            Predicate::Status(status) => ("status = $status", "status", status.as_str().to_string()),
            Predicate::ListOwner(owner_id) => (
                r#"list.owner = type::thing("user", $owner_filter)"#,
                "owner_filter",
                owner_id.clone(),
            ),
        }
    }
}

/// A rendered SurrealQL statement with its parameter bindings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurqlStatement {
    pub text: String,
    pub bindings: Vec<(&'static str, String)>,
}

/// A composed, ordered browse query over the caller's tasks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskQuery {
    scope: OwnershipScope,
    filters: Vec<Predicate>,
}

impl TaskQuery {
    /// Compose the query for `spec` inside `scope`.
    ///
    /// Filters are added in a fixed order: search, status, owner. Absent or
    /// `all` inputs add nothing.
    pub fn compose(scope: OwnershipScope, spec: &FilterSpec) -> Self {
        let mut filters = Vec::new();

        if let Some(search) = spec.search() {
            filters.push(Predicate::Search(search.to_lowercase()));
        }

        if let Some(status) = spec.status().status() {
            filters.push(Predicate::Status(status));
        }

        if let OwnerFilter::SpecificOwner(owner_id) = spec.owner() {
            filters.push(Predicate::ListOwner(owner_id.clone()));
        }

        Self { scope, filters }
    }

    /// The ownership scope every row must satisfy
    pub fn scope(&self) -> &OwnershipScope {
        &self.scope
    }

    /// Optional filters, in application order
    pub fn filters(&self) -> &[Predicate] {
        &self.filters
    }

    /// Whether a row is inside the scope and satisfies every filter
    pub fn matches(&self, task: &TaskView) -> bool {
        self.scope.admits(task.owner_id()) && self.filters.iter().all(|p| p.matches(task))
    }

    /// Filter and order rows in memory.
    ///
    /// Produces the same sequence the rendered statement returns for the same
    /// data.
    pub fn apply(&self, rows: impl IntoIterator<Item = TaskView>) -> Vec<TaskView> {
        let mut kept: Vec<TaskView> = rows.into_iter().filter(|t| self.matches(t)).collect();
        kept.sort_by(newest_first);
        kept
    }

    /// Render the query as a single SurrealQL SELECT.
    pub fn to_surql(&self) -> SurqlStatement {
        let mut conditions = vec![SCOPE_CONDITION.to_string()];
        let mut bindings = vec![(SCOPE_PARAM, self.scope.owner_id().to_string())];

        for predicate in &self.filters {
            let (condition, param, value) = predicate.condition();
            conditions.push(condition.to_string());
            bindings.push((param, value));
        }

        SurqlStatement {
            text: format!(
                "{} WHERE {} {}",
                SELECT_TASK_VIEW,
                conditions.join(" AND "),
                ORDER_AND_FETCH
            ),
            bindings,
        }
    }
}

/// Total order for browse results: `created_at` descending, then `id`
/// descending.
pub fn newest_first(a: &TaskView, b: &TaskView) -> Ordering {
    b.created_at
        .cmp(&a.created_at)
        .then_with(|| b.id.cmp(&a.id))
}

static_assertions::assert_impl_all!(TaskQuery: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ListSummary, OwnerSummary};
    use crate::repository::filter::StatusFilter;
    use chrono::{DateTime, TimeZone, Utc};
    use proptest::prelude::*;

    fn at(seconds: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + seconds, 0).unwrap()
    }

    fn view(
        id: &str,
        title: &str,
        description: Option<&str>,
        status: Status,
        owner: &str,
        created: i64,
    ) -> TaskView {
        TaskView {
            id: id.to_string(),
            title: title.to_string(),
            description: description.map(String::from),
            status,
            due_date: None,
            list_id: format!("list-{}", owner),
            created_at: at(created),
            list: ListSummary {
                id: format!("list-{}", owner),
                title: "Personal Tasks".to_string(),
                owner: OwnerSummary {
                    id: owner.to_string(),
                    name: owner.to_uppercase(),
                },
            },
        }
    }

    fn scope(owner: &str) -> OwnershipScope {
        OwnershipScope::for_caller(Some(owner)).unwrap()
    }

    // ========================================
    // Composition
    // ========================================

    #[test]
    fn test_default_spec_adds_no_filters() {
        let query = TaskQuery::compose(scope("a"), &FilterSpec::new());
        assert!(query.filters().is_empty());
        assert_eq!(query.scope().owner_id(), "a");
    }

    #[test]
    fn test_filters_added_in_fixed_order() {
        let spec = FilterSpec::new()
            .with_owner(OwnerFilter::SpecificOwner("a".to_string()))
            .with_status(StatusFilter::Pending)
            .with_search("Exer");
        let query = TaskQuery::compose(scope("a"), &spec);

        assert_eq!(
            query.filters(),
            &[
                Predicate::Search("exer".to_string()),
                Predicate::Status(Status::Pending),
                Predicate::ListOwner("a".to_string()),
            ]
        );
    }

    #[test]
    fn test_rendered_statement_starts_with_scope() {
        let spec = FilterSpec::new()
            .with_search("x")
            .with_status(StatusFilter::Completed);
        let statement = TaskQuery::compose(scope("a"), &spec).to_surql();

        assert!(statement.text.starts_with(SELECT_TASK_VIEW));
        let where_clause = statement.text.split(" WHERE ").nth(1).unwrap();
        assert!(where_clause.starts_with(SCOPE_CONDITION));
        assert!(statement.text.ends_with(ORDER_AND_FETCH));
        assert_eq!(statement.bindings[0], ("scope_owner", "a".to_string()));
        assert_eq!(statement.bindings[1], ("search", "x".to_string()));
        assert_eq!(statement.bindings[2], ("status", "completed".to_string()));
    }

    #[test]
    fn test_rendered_statement_combines_with_and_only() {
        let spec = FilterSpec::new()
            .with_search("x")
            .with_status(StatusFilter::Pending)
            .with_owner(OwnerFilter::SpecificOwner("b".to_string()));
        let statement = TaskQuery::compose(scope("a"), &spec).to_surql();

        let where_clause = statement
            .text
            .split(" WHERE ")
            .nth(1)
            .unwrap()
            .split(" ORDER BY ")
            .next()
            .unwrap();
        // The only OR lives inside the parenthesised search condition.
        assert_eq!(where_clause.matches(" AND ").count(), 3);
        assert_eq!(where_clause.matches(" OR ").count(), 1);
    }

    #[test]
    fn test_user_input_is_bound_not_interpolated() {
        let hostile = r#"" OR true OR ""#;
        let spec = FilterSpec::new()
            .with_search(hostile)
            .with_owner(OwnerFilter::SpecificOwner(hostile.to_string()));
        let statement = TaskQuery::compose(scope("a"), &spec).to_surql();

        assert!(!statement.text.contains("OR true"));
        assert!(
            statement
                .bindings
                .iter()
                .any(|(name, value)| *name == "owner_filter" && value == hostile)
        );
    }

    // ========================================
    // In-memory evaluation
    // ========================================

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let task = view("t1", "Morning Exercise", None, Status::Pending, "a", 0);
        for term in ["morning", "MORNING", "exer", "ning ex"] {
            let query = TaskQuery::compose(scope("a"), &FilterSpec::new().with_search(term));
            assert!(query.matches(&task), "'{}' should match", term);
        }

        let query = TaskQuery::compose(scope("a"), &FilterSpec::new().with_search("evening"));
        assert!(!query.matches(&task));
    }

    #[test]
    fn test_search_matches_description() {
        let task = view(
            "t1",
            "Workout",
            Some("30 minutes of Cardio"),
            Status::Pending,
            "a",
            0,
        );
        let query = TaskQuery::compose(scope("a"), &FilterSpec::new().with_search("cardio"));
        assert!(query.matches(&task));
    }

    #[test]
    fn test_search_ignores_missing_description() {
        let task = view("t1", "Workout", None, Status::Pending, "a", 0);
        let query = TaskQuery::compose(scope("a"), &FilterSpec::new().with_search("cardio"));
        assert!(!query.matches(&task));
    }

    #[test]
    fn test_status_filter_is_exact() {
        let pending = view("t1", "A", None, Status::Pending, "a", 0);
        let completed = view("t2", "B", None, Status::Completed, "a", 1);

        let only_pending = TaskQuery::compose(
            scope("a"),
            &FilterSpec::new().with_status(StatusFilter::Pending),
        );
        assert!(only_pending.matches(&pending));
        assert!(!only_pending.matches(&completed));

        let all = TaskQuery::compose(scope("a"), &FilterSpec::new());
        assert!(all.matches(&pending) && all.matches(&completed));
    }

    #[test]
    fn test_scope_excludes_other_owners() {
        let theirs = view("t1", "Theirs", None, Status::Pending, "b", 0);
        let query = TaskQuery::compose(scope("a"), &FilterSpec::new());
        assert!(!query.matches(&theirs));
    }

    #[test]
    fn test_owner_filter_for_other_user_cannot_widen_scope() {
        let theirs = view("t1", "Theirs", None, Status::Pending, "b", 0);
        let mine = view("t2", "Mine", None, Status::Pending, "a", 1);
        let spec = FilterSpec::new().with_owner(OwnerFilter::SpecificOwner("b".to_string()));
        let query = TaskQuery::compose(scope("a"), &spec);

        assert!(query.apply(vec![theirs, mine]).is_empty());
    }

    #[test]
    fn test_owner_filter_for_self_keeps_own_rows() {
        let mine = view("t1", "Mine", None, Status::Pending, "a", 0);
        let spec = FilterSpec::new().with_owner(OwnerFilter::SpecificOwner("a".to_string()));
        let query = TaskQuery::compose(scope("a"), &spec);
        assert_eq!(query.apply(vec![mine.clone()]), vec![mine]);
    }

    #[test]
    fn test_apply_orders_newest_first_then_id_descending() {
        let rows = vec![
            view("aaa", "old", None, Status::Pending, "a", 0),
            view("bbb", "tie low", None, Status::Pending, "a", 5),
            view("ccc", "tie high", None, Status::Pending, "a", 5),
            view("ddd", "new", None, Status::Pending, "a", 9),
        ];
        let query = TaskQuery::compose(scope("a"), &FilterSpec::new());
        let ids: Vec<String> = query.apply(rows).into_iter().map(|t| t.id).collect();
        assert_eq!(ids, vec!["ddd", "ccc", "bbb", "aaa"]);
    }

    // ========================================
    // Properties
    // ========================================

    fn arb_view() -> impl Strategy<Value = TaskView> {
        (
            "[a-f0-9]{6}",
            prop::sample::select(vec!["Morning Exercise", "Read a Book", "Code Review"]),
            prop::option::of(prop::sample::select(vec!["cardio", "Review PRs", "notes"])),
            prop::bool::ANY,
            prop::sample::select(vec!["a", "b", "c"]),
            0i64..50,
        )
            .prop_map(|(id, title, description, done, owner, created)| {
                let status = if done {
                    Status::Completed
                } else {
                    Status::Pending
                };
                view(&id, title, description, status, owner, created)
            })
    }

    fn arb_spec() -> impl Strategy<Value = FilterSpec> {
        (
            prop::option::of(prop::sample::select(vec!["review", "EXER", "o", "zzz"])),
            prop::sample::select(vec!["all", "pending", "completed", "bogus"]),
            prop::sample::select(vec!["all", "a", "b", "nobody"]),
        )
            .prop_map(|(search, status, owner)| {
                FilterSpec::from_raw(search, Some(status), Some(owner), None)
            })
    }

    proptest! {
        #[test]
        fn prop_results_stay_inside_scope(
            rows in prop::collection::vec(arb_view(), 0..40),
            spec in arb_spec(),
        ) {
            let query = TaskQuery::compose(scope("a"), &spec);
            for task in query.apply(rows) {
                prop_assert_eq!(task.owner_id(), "a");
            }
        }

        #[test]
        fn prop_filters_only_narrow(
            rows in prop::collection::vec(arb_view(), 0..40),
            spec in arb_spec(),
        ) {
            let unfiltered = TaskQuery::compose(scope("a"), &FilterSpec::new()).apply(rows.clone());
            let filtered = TaskQuery::compose(scope("a"), &spec).apply(rows);
            for task in &filtered {
                prop_assert!(unfiltered.contains(task));
            }
        }

        #[test]
        fn prop_apply_is_deterministic(
            rows in prop::collection::vec(arb_view(), 0..40),
            spec in arb_spec(),
        ) {
            let mut seen = std::collections::HashSet::new();
            let rows: Vec<TaskView> = rows.into_iter().filter(|t| seen.insert(t.id.clone())).collect();
            let query = TaskQuery::compose(scope("a"), &spec);
            let mut reversed = rows.clone();
            reversed.reverse();
            prop_assert_eq!(query.apply(rows), query.apply(reversed));
        }
    }
}

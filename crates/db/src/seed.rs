//! Demo data seeding
//!
//! Creates a handful of users, gives each one the same five lists, and fills
//! every list with three template tasks due 1 to 30 days from today.

use crate::Database;
use crate::error::DbResult;
use crate::models::{NewTask, NewTaskList, Status};
use chrono::{Days, NaiveDate, Utc};
use rand::Rng;
use serde::Serialize;
use tracing::{debug, info};

const DEMO_USERS: [&str; 5] = [
    "Alice Johnson",
    "Bob Smith",
    "Carol Davis",
    "Dan Miller",
    "Eve Wilson",
];

struct TaskTemplate {
    title: &'static str,
    description: &'static str,
    status: Status,
}

struct ListTemplate {
    title: &'static str,
    description: &'static str,
    tasks: [TaskTemplate; 3],
}

const fn task(title: &'static str, description: &'static str, status: Status) -> TaskTemplate {
    TaskTemplate {
        title,
        description,
        status,
    }
}

const LIST_TEMPLATES: [ListTemplate; 5] = [
    ListTemplate {
        title: "Personal Tasks",
        description: "Daily personal tasks and routines",
        tasks: [
            task("Morning Exercise", "30 minutes of cardio workout", Status::Pending),
            task("Read a Book", "Read for 1 hour", Status::Completed),
            task("Meditation", "15 minutes mindfulness practice", Status::Pending),
        ],
    },
    ListTemplate {
        title: "Work Projects",
        description: "Professional tasks and project management",
        tasks: [
            task("Client Meeting", "Discuss project requirements", Status::Pending),
            task("Project Documentation", "Update technical documentation", Status::Completed),
            task("Code Review", "Review team pull requests", Status::Pending),
        ],
    },
    ListTemplate {
        title: "Shopping List",
        description: "Items to buy and shopping reminders",
        tasks: [
            task("Grocery Shopping", "Buy weekly groceries", Status::Pending),
            task("Buy Office Supplies", "Restock office essentials", Status::Completed),
            task("Gift Shopping", "Buy birthday gifts", Status::Pending),
        ],
    },
    ListTemplate {
        title: "Study Goals",
        description: "Educational tasks and learning objectives",
        tasks: [
            task("Complete Online Course", "Finish course modules", Status::Pending),
            task("Practice Coding", "Solve programming challenges", Status::Completed),
            task("Watch Tutorial", "Study new framework features", Status::Pending),
        ],
    },
    ListTemplate {
        title: "Home Maintenance",
        description: "House chores and maintenance tasks",
        tasks: [
            task("Clean House", "Weekly house cleaning", Status::Pending),
            task("Garden Work", "Water plants and trim bushes", Status::Completed),
            task("Fix Leaky Faucet", "Repair bathroom faucet", Status::Pending),
        ],
    },
];

/// Counts of records created by `seed_demo_data`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeedSummary {
    pub users: usize,
    pub lists: usize,
    pub tasks: usize,
}

/// A due date between 1 and 30 days after `today`
fn random_due_date(today: NaiveDate, rng: &mut impl Rng) -> NaiveDate {
    let offset = rng.random_range(1..=30u64);
    today.checked_add_days(Days::new(offset)).unwrap_or(today)
}

/// Populate the database with demo users, lists and tasks.
///
/// Existing data is left in place; running it twice creates a second set.
pub async fn seed_demo_data(db: &Database) -> DbResult<SeedSummary> {
    let mut summary = SeedSummary::default();
    let today = Utc::now().date_naive();

    for name in DEMO_USERS {
        let user = db.users().create(name).await?;
        summary.users += 1;
        debug!("Seeded user {} ({})", user.name, user.id);

        for template in &LIST_TEMPLATES {
            let list = db
                .lists()
                .create(
                    &NewTaskList::new(template.title, &user.id)
                        .with_description(template.description),
                )
                .await?;
            summary.lists += 1;

            for task in &template.tasks {
                let due_date = random_due_date(today, &mut rand::rng());
                db.tasks()
                    .create(
                        &NewTask::new(task.title, &list.id)
                            .with_description(task.description)
                            .with_status(task.status)
                            .with_due_date(due_date),
                    )
                    .await?;
                summary.tasks += 1;
            }
        }
    }

    info!(
        "Seeded {} users, {} lists, {} tasks",
        summary.users, summary.lists, summary.tasks
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{FilterSpec, OwnershipScope, StatusFilter};
    use crate::test_utils::{cleanup, setup_test_db};

    #[test]
    fn test_random_due_date_range() {
        let today = NaiveDate::from_ymd_opt(2025, 12, 20).unwrap();
        let mut rng = rand::rng();
        for _ in 0..200 {
            let due = random_due_date(today, &mut rng);
            let days = (due - today).num_days();
            assert!((1..=30).contains(&days), "offset {} out of range", days);
        }
    }

    #[test]
    fn test_templates_mix_statuses() {
        for template in &LIST_TEMPLATES {
            let completed = template
                .tasks
                .iter()
                .filter(|t| t.status == Status::Completed)
                .count();
            assert_eq!(completed, 1, "{} should have one completed task", template.title);
        }
    }

    #[tokio::test]
    async fn test_seed_demo_data_counts() {
        let (db, temp_dir) = setup_test_db().await;

        let summary = seed_demo_data(&db).await.unwrap();
        assert_eq!(
            summary,
            SeedSummary {
                users: 5,
                lists: 25,
                tasks: 75,
            }
        );

        let users = db.users().list_all().await.unwrap();
        assert_eq!(users.len(), 5);

        let caller = &users[0];
        let lists = db.lists().list_by_owner(&caller.id).await.unwrap();
        assert_eq!(lists.len(), 5);

        let scope = OwnershipScope::for_caller(Some(caller.id.as_str())).unwrap();
        let page = db.browse().browse(scope.clone(), &FilterSpec::new()).await.unwrap();
        assert_eq!(page.total_count, 15);
        assert_eq!(page.total_pages, 2);

        let pending = FilterSpec::new().with_status(StatusFilter::Pending);
        let page = db.browse().browse(scope, &pending).await.unwrap();
        assert_eq!(page.total_count, 10);

        cleanup(&temp_dir);
    }
}

//! Output formatting module for Taskboard
//!
//! Provides table formatting and display utilities for CLI output.

use taskboard_db::{Page, Task, TaskList, TaskView, User};

/// Maximum width for title columns before truncation
const MAX_TITLE_WIDTH: usize = 30;

/// Maximum width for list and owner columns before truncation
const MAX_NAME_WIDTH: usize = 20;

/// Truncate a string to the specified maximum width, adding ellipsis if needed.
fn truncate(s: &str, max_width: usize) -> String {
    if s.chars().count() <= max_width {
        s.to_string()
    } else if max_width <= 3 {
        s.chars().take(max_width).collect()
    } else {
        let head: String = s.chars().take(max_width - 3).collect();
        format!("{}...", head)
    }
}

/// Render rows as left-aligned columns separated by two spaces, with a
/// dashed rule under the header.
fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, header)| {
            rows.iter()
                .map(|row| row[i].chars().count())
                .max()
                .unwrap_or(0)
                .max(header.chars().count())
        })
        .collect();

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(render_row(headers, &widths));
    lines.push(
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("  "),
    );
    for row in rows {
        let cells: Vec<&str> = row.iter().map(String::as_str).collect();
        lines.push(render_row(&cells, &widths));
    }

    lines.join("\n")
}

fn render_row(cells: &[&str], widths: &[usize]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = width))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

fn or_dash(value: Option<String>) -> String {
    value.unwrap_or_else(|| "-".to_string())
}

/// Format one page of browse results with a position footer.
///
/// Produces output in the format:
/// ```text
/// ID      Status     Due         Title             List            Owner
/// ------  ---------  ----------  ----------------  --------------  -------------
/// 3f9a1c  pending    2025-03-14  Morning Exercise  Personal Tasks  Alice Johnson
///
/// Showing 1 to 1 of 1 tasks (page 1 of 1)
/// ```
pub fn format_task_page(page: &Page<TaskView>) -> String {
    let footer = format_page_footer(page);
    if page.is_empty() {
        return format!("No tasks found.\n\n{}", footer);
    }

    let rows: Vec<Vec<String>> = page
        .items
        .iter()
        .map(|task| {
            vec![
                task.id.clone(),
                task.status.to_string(),
                or_dash(task.due_date.map(|d| d.to_string())),
                truncate(&task.title, MAX_TITLE_WIDTH),
                truncate(&task.list.title, MAX_NAME_WIDTH),
                truncate(&task.list.owner.name, MAX_NAME_WIDTH),
            ]
        })
        .collect();

    format!(
        "{}\n\n{}",
        render_table(&["ID", "Status", "Due", "Title", "List", "Owner"], &rows),
        footer
    )
}

/// Position summary for a page of tasks
pub fn format_page_footer<T>(page: &Page<T>) -> String {
    if page.is_empty() {
        format!(
            "Showing 0 of {} tasks (page {} of {})",
            page.total_count, page.page_number, page.total_pages
        )
    } else {
        format!(
            "Showing {} to {} of {} tasks (page {} of {})",
            page.first_index,
            page.last_index,
            page.total_count,
            page.page_number,
            page.total_pages
        )
    }
}

/// Format task lists into an aligned table string.
pub fn format_list_table(lists: &[TaskList]) -> String {
    if lists.is_empty() {
        return "No lists found.".to_string();
    }

    let rows: Vec<Vec<String>> = lists
        .iter()
        .map(|list| {
            vec![
                list.id.clone(),
                truncate(&list.title, MAX_TITLE_WIDTH),
                or_dash(list.description.as_deref().map(|d| truncate(d, MAX_TITLE_WIDTH))),
            ]
        })
        .collect();

    render_table(&["ID", "Title", "Description"], &rows)
}

/// Format users into an aligned table string.
pub fn format_user_table(users: &[User]) -> String {
    if users.is_empty() {
        return "No users found.".to_string();
    }

    let rows: Vec<Vec<String>> = users
        .iter()
        .map(|user| vec![user.id.clone(), user.name.clone()])
        .collect();

    render_table(&["ID", "Name"], &rows)
}

/// Format a single list as labelled fields
pub fn format_list_detail(list: &TaskList) -> String {
    let mut lines = vec![
        format!("ID:          {}", list.id),
        format!("Title:       {}", list.title),
        format!("Owner:       {}", list.owner_id),
    ];
    if let Some(description) = &list.description {
        lines.push(format!("Description: {}", description));
    }
    if let Some(created_at) = list.created_at {
        lines.push(format!("Created:     {}", created_at.format("%Y-%m-%d %H:%M")));
    }
    lines.join("\n")
}

/// Format a single task as labelled fields
pub fn format_task_detail(task: &Task) -> String {
    let mut lines = vec![
        format!("ID:          {}", task.id),
        format!("Title:       {}", task.title),
        format!("Status:      {}", task.status),
        format!("List:        {}", task.list_id),
        format!("Due:         {}", or_dash(task.due_date.map(|d| d.to_string()))),
    ];
    if let Some(description) = &task.description {
        lines.push(format!("Description: {}", description));
    }
    if let Some(created_at) = task.created_at {
        lines.push(format!("Created:     {}", created_at.format("%Y-%m-%d %H:%M")));
    }
    lines.join("\n")
}

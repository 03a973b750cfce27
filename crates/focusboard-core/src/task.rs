//! Task list with completion state.
//!
//! All operations take the collection by value and return the new one.
//! There are no cross-task invariants.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const DEFAULT_CATEGORY: &str = "general";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        };
        f.write_str(s)
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            other => Err(format!("unknown priority '{other}' (expected low, medium or high)")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub category: String,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

/// User input for a new task.
#[derive(Debug, Clone, Default)]
pub struct TaskDraft {
    pub title: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub priority: Priority,
    pub due_date: Option<NaiveDate>,
}

impl TaskDraft {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}

/// Where a task stands relative to its due date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DueStatus {
    NoDueDate,
    Completed,
    Overdue,
    DueToday,
    Upcoming,
}

impl Task {
    /// Build a task from a draft. Returns `None` when the title is blank.
    pub fn from_draft(draft: TaskDraft, id: impl Into<String>, created_at: DateTime<Utc>) -> Option<Self> {
        let title = draft.title.trim();
        if title.is_empty() {
            return None;
        }
        let category = draft
            .category
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| DEFAULT_CATEGORY.to_string());

        Some(Self {
            id: id.into(),
            title: title.to_string(),
            description: draft
                .description
                .map(|d| d.trim().to_string())
                .filter(|d| !d.is_empty()),
            category,
            priority: draft.priority,
            completed: false,
            completed_at: None,
            due_date: draft.due_date,
            created_at,
        })
    }

    pub fn due_status(&self, today: NaiveDate) -> DueStatus {
        let Some(due) = self.due_date else {
            return DueStatus::NoDueDate;
        };
        if self.completed {
            DueStatus::Completed
        } else if due < today {
            DueStatus::Overdue
        } else if due == today {
            DueStatus::DueToday
        } else {
            DueStatus::Upcoming
        }
    }
}

/// Append a task built from `draft`. A blank title leaves the list untouched.
pub fn add_task(
    mut tasks: Vec<Task>,
    draft: TaskDraft,
    id: impl Into<String>,
    created_at: DateTime<Utc>,
) -> Vec<Task> {
    match Task::from_draft(draft, id, created_at) {
        Some(task) => tasks.push(task),
        None => debug!("task with blank title ignored"),
    }
    tasks
}

/// Flip completion on the task with `id`, stamping or clearing `completed_at`.
pub fn toggle_task(tasks: Vec<Task>, id: &str, now: DateTime<Utc>) -> Vec<Task> {
    tasks
        .into_iter()
        .map(|mut task| {
            if task.id == id {
                task.completed = !task.completed;
                task.completed_at = task.completed.then_some(now);
            }
            task
        })
        .collect()
}

pub fn delete_task(tasks: Vec<Task>, id: &str) -> Vec<Task> {
    tasks.into_iter().filter(|task| task.id != id).collect()
}

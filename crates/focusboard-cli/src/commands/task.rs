//! Task management commands for CLI.

use chrono::NaiveDate;
use clap::Subcommand;
use focusboard_core::task::{Priority, TaskDraft};
use focusboard_core::Clock;
use serde::Serialize;

use super::{open_app, print_json, CliResult};

#[derive(Subcommand)]
pub enum TaskAction {
    /// Add a new task
    Add {
        /// Task title
        title: String,
        /// Task description
        #[arg(long)]
        description: Option<String>,
        /// Free-form category (default: general)
        #[arg(long)]
        category: Option<String>,
        /// low, medium or high
        #[arg(long, default_value = "medium")]
        priority: Priority,
        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        due: Option<NaiveDate>,
    },
    /// List tasks
    List {
        /// Only show tasks that are not completed
        #[arg(long)]
        pending: bool,
    },
    /// Flip a task between done and not done
    Toggle {
        /// Task ID
        id: String,
    },
    /// Delete a task
    Delete {
        /// Task ID
        id: String,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TaskRow<'a> {
    #[serde(flatten)]
    task: &'a focusboard_core::Task,
    due_status: focusboard_core::task::DueStatus,
}

pub fn run(action: TaskAction) -> CliResult {
    let mut app = open_app()?;

    match action {
        TaskAction::Add {
            title,
            description,
            category,
            priority,
            due,
        } => {
            let draft = TaskDraft {
                title,
                description,
                category,
                priority,
                due_date: due,
            };
            match app.add_task(draft)? {
                Some(task) => {
                    println!("Task created: {}", task.id);
                    print_json(&task)?;
                }
                None => println!("Nothing added: title is empty"),
            }
        }
        TaskAction::List { pending } => {
            let today = app.clock().today();
            let rows: Vec<_> = app
                .state()
                .tasks
                .iter()
                .filter(|task| !pending || !task.completed)
                .map(|task| TaskRow {
                    task,
                    due_status: task.due_status(today),
                })
                .collect();
            print_json(&rows)?;
        }
        TaskAction::Toggle { id } => match app.toggle_task(&id)? {
            Some(task) => print_json(&task)?,
            None => println!("Task not found: {id}"),
        },
        TaskAction::Delete { id } => {
            if app.delete_task(&id)? {
                println!("Task deleted: {id}");
            } else {
                println!("Task not found: {id}");
            }
        }
    }
    Ok(())
}

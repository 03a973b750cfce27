//! Habit tracking commands for CLI.

use clap::Subcommand;
use focusboard_core::habit::{consecutive_days, HabitDraft};
use focusboard_core::{Clock, Config};
use serde::Serialize;

use super::{open_app, print_json, CliResult};

#[derive(Subcommand)]
pub enum HabitAction {
    /// Add a new habit
    Add {
        /// Habit name
        name: String,
        /// Optional description
        #[arg(long)]
        description: Option<String>,
        /// Color token (default from config ui.default_color)
        #[arg(long)]
        color: Option<String>,
    },
    /// List habits
    List,
    /// Mark today done, or undo today's completion
    Toggle {
        /// Habit ID
        id: String,
    },
    /// Delete a habit
    Delete {
        /// Habit ID
        id: String,
    },
    /// Show the last seven days
    Week {
        /// Habit ID
        id: String,
    },
    /// Show a habit with its streak details
    Show {
        /// Habit ID
        id: String,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct HabitDetail<'a> {
    #[serde(flatten)]
    habit: &'a focusboard_core::Habit,
    completed_today: bool,
    /// Run of consecutive days ending today, derived from the history.
    consecutive_days: u32,
}

pub fn run(action: HabitAction) -> CliResult {
    let mut app = open_app()?;

    match action {
        HabitAction::Add {
            name,
            description,
            color,
        } => {
            let color = color.unwrap_or_else(|| Config::load_or_default().ui.default_color);
            let draft = HabitDraft {
                name,
                description,
                color,
            };
            match app.add_habit(draft)? {
                Some(habit) => {
                    println!("Habit created: {}", habit.id);
                    print_json(&habit)?;
                }
                None => println!("Nothing added: name is empty"),
            }
        }
        HabitAction::List => print_json(&app.state().habits)?,
        HabitAction::Toggle { id } => match app.toggle_habit(&id)? {
            Some(habit) => print_json(&habit)?,
            None => println!("Habit not found: {id}"),
        },
        HabitAction::Delete { id } => {
            if app.delete_habit(&id)? {
                println!("Habit deleted: {id}");
            } else {
                println!("Habit not found: {id}");
            }
        }
        HabitAction::Week { id } => match app.habit_week(&id) {
            Some(week) => print_json(&week)?,
            None => println!("Habit not found: {id}"),
        },
        HabitAction::Show { id } => {
            let today = app.clock().today();
            match app.habit(&id) {
                Some(habit) => {
                    let detail = HabitDetail {
                        habit,
                        completed_today: habit.is_completed_on(today),
                        consecutive_days: consecutive_days(habit, today),
                    };
                    if detail.consecutive_days != habit.streak {
                        eprintln!(
                            "note: stored streak {} differs from the {} consecutive day(s) in the history",
                            habit.streak, detail.consecutive_days
                        );
                    }
                    print_json(&detail)?;
                }
                None => println!("Habit not found: {id}"),
            }
        }
    }
    Ok(())
}

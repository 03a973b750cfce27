//! Summary statistics derived from the application state.
//!
//! Pure projection: recomputed from scratch whenever it is asked for.

use chrono::NaiveDate;
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub completed_tasks: usize,
    pub total_tasks: usize,
    pub habits_completed_today: usize,
    pub total_habits: usize,
    pub active_streaks: usize,
    pub note_count: usize,
    /// Completed over total tasks, 0.0 .. 1.0.
    pub task_progress: f64,
    /// Habits done today over all habits, 0.0 .. 1.0.
    pub habit_progress: f64,
}

/// `part / whole`, or 0 when there is nothing to divide by.
pub fn ratio(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    part as f64 / whole as f64
}

pub fn summarize(state: &AppState, today: NaiveDate) -> DashboardStats {
    let completed_tasks = state.tasks.iter().filter(|t| t.completed).count();
    let total_tasks = state.tasks.len();
    let habits_completed_today = state
        .habits
        .iter()
        .filter(|h| h.is_completed_on(today))
        .count();
    let total_habits = state.habits.len();

    DashboardStats {
        completed_tasks,
        total_tasks,
        habits_completed_today,
        total_habits,
        active_streaks: state.habits.iter().filter(|h| h.streak > 0).count(),
        note_count: state.notes.len(),
        task_progress: ratio(completed_tasks, total_tasks),
        habit_progress: ratio(habits_completed_today, total_habits),
    }
}

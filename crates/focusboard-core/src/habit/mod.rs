//! Habit tracking with streak counters.
//!
//! A habit records the calendar days it was completed and keeps a streak
//! counter that moves by one on every toggle of "today". The counter is
//! maintained by the toggles themselves and is not recomputed from the
//! completion history, so callers must only ever toggle the current day.
//! [`consecutive_days`] derives the run from the history for diagnostics.

mod week;

use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub use week::{week_window, DayCell, WeekWindow, WEEK_LEN};

/// Default color token offered when a habit is created without one.
pub const DEFAULT_COLOR: &str = "#3B82F6";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Habit {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub color: String,
    #[serde(default)]
    pub streak: u32,
    /// Days the habit was completed. A set, so a day can appear only once;
    /// serialized as an ascending list of `YYYY-MM-DD` strings.
    #[serde(default)]
    pub completed_dates: BTreeSet<NaiveDate>,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_completed: Option<DateTime<Utc>>,
}

/// User input for a new habit.
#[derive(Debug, Clone, Default)]
pub struct HabitDraft {
    pub name: String,
    pub description: Option<String>,
    pub color: String,
}

impl HabitDraft {
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            color: color.into(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl Habit {
    /// Build a habit from a draft. Returns `None` when the name is blank.
    pub fn from_draft(
        draft: HabitDraft,
        id: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Option<Self> {
        let name = draft.name.trim();
        if name.is_empty() {
            return None;
        }
        let description = draft
            .description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());
        let color = if draft.color.trim().is_empty() {
            DEFAULT_COLOR.to_string()
        } else {
            draft.color
        };

        Some(Self {
            id: id.into(),
            name: name.to_string(),
            description,
            color,
            streak: 0,
            completed_dates: BTreeSet::new(),
            created_at,
            last_completed: None,
        })
    }

    pub fn is_completed_on(&self, day: NaiveDate) -> bool {
        self.completed_dates.contains(&day)
    }

    /// Flip completion for `today`.
    ///
    /// Un-completing removes the day and decrements the streak (floored at
    /// zero) without touching `last_completed`. Completing inserts the day,
    /// increments the streak and stamps `last_completed` with `now`.
    pub fn toggled(mut self, today: NaiveDate, now: DateTime<Utc>) -> Self {
        if self.completed_dates.remove(&today) {
            self.streak = self.streak.saturating_sub(1);
        } else {
            self.completed_dates.insert(today);
            self.streak = self.streak.saturating_add(1);
            self.last_completed = Some(now);
        }
        self
    }
}

/// Append a habit built from `draft`. A blank name leaves the collection
/// untouched.
pub fn add_habit(
    mut habits: Vec<Habit>,
    draft: HabitDraft,
    id: impl Into<String>,
    created_at: DateTime<Utc>,
) -> Vec<Habit> {
    match Habit::from_draft(draft, id, created_at) {
        Some(habit) => habits.push(habit),
        None => debug!("habit with blank name ignored"),
    }
    habits
}

/// Toggle `today` on the habit with `id`. Every other habit is moved into
/// the result as-is; an unknown id returns the collection unchanged.
pub fn toggle_habit(
    habits: Vec<Habit>,
    id: &str,
    today: NaiveDate,
    now: DateTime<Utc>,
) -> Vec<Habit> {
    habits
        .into_iter()
        .map(|habit| {
            if habit.id == id {
                habit.toggled(today, now)
            } else {
                habit
            }
        })
        .collect()
}

pub fn delete_habit(habits: Vec<Habit>, id: &str) -> Vec<Habit> {
    habits.into_iter().filter(|habit| habit.id != id).collect()
}

/// Length of the run of completed days ending at `today`.
pub fn consecutive_days(habit: &Habit, today: NaiveDate) -> u32 {
    let mut count = 0;
    let mut day = Some(today);
    while let Some(d) = day {
        if !habit.completed_dates.contains(&d) {
            break;
        }
        count += 1;
        day = d.pred_opt();
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn at(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    fn read_habit() -> Vec<Habit> {
        add_habit(
            Vec::new(),
            HabitDraft::new("Read", "#3B82F6"),
            "h1",
            at("2024-01-01T08:00:00Z"),
        )
    }

    #[test]
    fn add_initializes_counters() {
        let habits = read_habit();
        assert_eq!(habits.len(), 1);
        assert_eq!(habits[0].streak, 0);
        assert!(habits[0].completed_dates.is_empty());
        assert!(habits[0].last_completed.is_none());
    }

    #[test]
    fn add_rejects_blank_name() {
        let habits = add_habit(
            read_habit(),
            HabitDraft::new("   ", "#10B981"),
            "h2",
            at("2024-01-01T08:00:00Z"),
        );
        assert_eq!(habits.len(), 1);
    }

    #[test]
    fn add_trims_name_and_drops_blank_description() {
        let draft = HabitDraft::new("  Stretch ", "").with_description("  ");
        let habit = Habit::from_draft(draft, "h", at("2024-01-01T08:00:00Z")).unwrap();
        assert_eq!(habit.name, "Stretch");
        assert_eq!(habit.description, None);
        assert_eq!(habit.color, DEFAULT_COLOR);
    }

    #[test]
    fn toggle_twice_round_trips() {
        let now = at("2024-01-01T09:00:00Z");
        let habits = toggle_habit(read_habit(), "h1", day("2024-01-01"), now);
        assert_eq!(habits[0].streak, 1);
        assert_eq!(
            habits[0].completed_dates.iter().copied().collect::<Vec<_>>(),
            vec![day("2024-01-01")]
        );
        assert_eq!(habits[0].last_completed, Some(now));

        let later = at("2024-01-01T10:00:00Z");
        let habits = toggle_habit(habits, "h1", day("2024-01-01"), later);
        assert_eq!(habits[0].streak, 0);
        assert!(habits[0].completed_dates.is_empty());
        // Un-completing leaves the stamp alone.
        assert_eq!(habits[0].last_completed, Some(now));
    }

    #[test]
    fn toggle_unknown_id_is_noop() {
        let before = read_habit();
        let after = toggle_habit(before.clone(), "missing", day("2024-01-01"), Utc::now());
        assert_eq!(before, after);
    }

    #[test]
    fn toggle_only_touches_matching_habit() {
        let habits = add_habit(
            read_habit(),
            HabitDraft::new("Run", "#EF4444"),
            "h2",
            at("2024-01-01T08:00:00Z"),
        );
        let habits = toggle_habit(habits, "h2", day("2024-01-02"), Utc::now());
        assert_eq!(habits[0].streak, 0);
        assert_eq!(habits[1].streak, 1);
    }

    #[test]
    fn streak_never_goes_negative() {
        let mut habits = read_habit();
        habits[0].completed_dates.insert(day("2024-01-05"));
        let habits = toggle_habit(habits, "h1", day("2024-01-05"), Utc::now());
        assert_eq!(habits[0].streak, 0);
    }

    #[test]
    fn dates_stay_sorted() {
        let mut habits = read_habit();
        for d in ["2024-01-03", "2024-01-01", "2024-01-02"] {
            habits = toggle_habit(habits, "h1", day(d), Utc::now());
        }
        let json = serde_json::to_value(&habits[0]).unwrap();
        assert_eq!(
            json["completedDates"],
            serde_json::json!(["2024-01-01", "2024-01-02", "2024-01-03"])
        );
    }

    #[test]
    fn delete_filters_by_id() {
        assert!(delete_habit(read_habit(), "h1").is_empty());
        assert_eq!(delete_habit(read_habit(), "nope").len(), 1);
    }

    #[test]
    fn consecutive_days_counts_back_from_today() {
        let mut habit = read_habit().remove(0);
        for d in ["2024-01-01", "2024-01-03", "2024-01-04", "2024-01-05"] {
            habit.completed_dates.insert(day(d));
        }
        assert_eq!(consecutive_days(&habit, day("2024-01-05")), 3);
        assert_eq!(consecutive_days(&habit, day("2024-01-06")), 0);
    }

    #[test]
    fn duplicate_dates_in_stored_json_collapse() {
        let json = r##"{
            "id": "h1", "name": "Read", "color": "#3B82F6", "streak": 2,
            "completedDates": ["2024-01-02", "2024-01-01", "2024-01-02"],
            "createdAt": "2024-01-01T08:00:00Z"
        }"##;
        let habit: Habit = serde_json::from_str(json).unwrap();
        assert_eq!(habit.completed_dates.len(), 2);
        // The stored counter is kept as-is.
        assert_eq!(habit.streak, 2);
    }
}

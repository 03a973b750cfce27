//! Property tests for habit toggling.

use chrono::{DateTime, NaiveDate, Utc};
use focusboard_core::habit::{add_habit, toggle_habit, Habit, HabitDraft};
use proptest::prelude::*;

fn created_at() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2024-01-01T08:00:00Z")
        .unwrap()
        .with_timezone(&Utc)
}

fn base_day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
}

fn habits() -> Vec<Habit> {
    let habits = add_habit(Vec::new(), HabitDraft::new("Read", "#3B82F6"), "a", created_at());
    add_habit(habits, HabitDraft::new("Run", "#EF4444"), "b", created_at())
}

/// A toggle of habit `a` or `b` on a day within the first two months.
fn toggle_op() -> impl Strategy<Value = (bool, u64)> {
    (any::<bool>(), 0u64..60)
}

fn apply(habits: Vec<Habit>, (first, offset): (bool, u64)) -> Vec<Habit> {
    let id = if first { "a" } else { "b" };
    let day = base_day() + chrono::Days::new(offset);
    toggle_habit(habits, id, day, created_at())
}

proptest! {
    #[test]
    fn double_toggle_restores_membership_and_streak(
        history in prop::collection::vec(toggle_op(), 0..40),
        op in toggle_op(),
    ) {
        let before = history.into_iter().fold(habits(), apply);
        let after = apply(apply(before.clone(), op), op);

        for (b, a) in before.iter().zip(after.iter()) {
            prop_assert_eq!(&b.completed_dates, &a.completed_dates);
            // The decrement floors at zero, so the round trip is exact only
            // when the completion being undone was counted.
            if !b.completed_dates.contains(&(base_day() + chrono::Days::new(op.1))) || b.streak > 0 {
                prop_assert_eq!(b.streak, a.streak);
            }
        }
    }

    #[test]
    fn dates_stay_unique_and_sorted(history in prop::collection::vec(toggle_op(), 0..80)) {
        let result = history.into_iter().fold(habits(), apply);
        for habit in &result {
            let days: Vec<_> = habit.completed_dates.iter().copied().collect();
            prop_assert!(days.windows(2).all(|w| w[0] < w[1]));

            let json = serde_json::to_value(habit).unwrap();
            let stored = json["completedDates"].as_array().unwrap();
            prop_assert_eq!(stored.len(), days.len());
        }
    }

    #[test]
    fn streak_matches_today_only_protocol(toggles in prop::collection::vec(any::<bool>(), 0..30)) {
        // Toggling only "today", one day after another, keeps the counter
        // equal to the number of completed days.
        let mut habits = habits();
        for (i, complete) in toggles.iter().enumerate() {
            let day = base_day() + chrono::Days::new(i as u64);
            if *complete {
                habits = toggle_habit(habits, "a", day, created_at());
            }
        }
        let a = &habits[0];
        prop_assert_eq!(a.streak as usize, a.completed_dates.len());
    }
}

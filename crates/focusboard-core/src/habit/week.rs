use std::iter::FusedIterator;

use chrono::{Days, NaiveDate};
use serde::Serialize;

use super::Habit;

pub const WEEK_LEN: u8 = 7;

/// One day of the seven-day strip shown next to a habit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayCell {
    pub day: NaiveDate,
    pub completed: bool,
    pub is_current_day: bool,
}

/// Lazy view over the six days before `today` plus `today`, oldest first.
///
/// Borrowing the habit keeps the window a pure read; cloning it restarts
/// the sequence. Near the start of the calendar the window is shorter
/// rather than repeating a day.
#[derive(Debug, Clone)]
pub struct WeekWindow<'a> {
    habit: &'a Habit,
    today: NaiveDate,
    len: u8,
    next: u8,
}

pub fn week_window(habit: &Habit, today: NaiveDate) -> WeekWindow<'_> {
    let available = (today - NaiveDate::MIN).num_days() + 1;
    let len = u8::try_from(available).map_or(WEEK_LEN, |n| n.min(WEEK_LEN));
    WeekWindow {
        habit,
        today,
        len,
        next: 0,
    }
}

impl Iterator for WeekWindow<'_> {
    type Item = DayCell;

    fn next(&mut self) -> Option<DayCell> {
        if self.next >= self.len {
            return None;
        }
        let back = u64::from(self.len - 1 - self.next);
        let day = self.today.checked_sub_days(Days::new(back))?;
        self.next += 1;

        Some(DayCell {
            day,
            completed: self.habit.is_completed_on(day),
            is_current_day: back == 0,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = usize::from(self.len.saturating_sub(self.next));
        (left, Some(left))
    }
}

impl ExactSizeIterator for WeekWindow<'_> {}

impl FusedIterator for WeekWindow<'_> {}

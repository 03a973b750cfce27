//! Persisted timer for short-lived processes.
//!
//! A CLI invocation cannot keep a tick task alive between commands, so the
//! session stores the engine together with the instant of the last applied
//! tick boundary. Loading the session applies the whole seconds that passed
//! since then and moves the boundary forward by exactly that many seconds;
//! the leftover fraction carries over to the next catch-up.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::engine::{PomodoroTimer, TimerDurations};
use crate::events::Event;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerSession {
    timer: PomodoroTimer,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    running_since: Option<DateTime<Utc>>,
}

impl Default for TimerSession {
    fn default() -> Self {
        Self::new(PomodoroTimer::new())
    }
}

impl TimerSession {
    pub fn new(timer: PomodoroTimer) -> Self {
        Self {
            timer,
            running_since: None,
        }
    }

    /// Resume tracking an engine that a tick driver was running until `now`.
    pub fn resumed(timer: PomodoroTimer, now: DateTime<Utc>) -> Self {
        let running_since = timer.is_active().then_some(now);
        Self {
            timer,
            running_since,
        }
    }

    pub fn timer(&self) -> &PomodoroTimer {
        &self.timer
    }

    pub fn running_since(&self) -> Option<DateTime<Utc>> {
        self.running_since
    }

    /// Apply the ticks owed since the last boundary.
    pub fn catch_up(&mut self, now: DateTime<Utc>) -> Vec<Event> {
        if !self.timer.is_active() {
            self.running_since = None;
            return Vec::new();
        }
        let Some(since) = self.running_since else {
            self.running_since = Some(now);
            return Vec::new();
        };
        let elapsed = (now - since).num_seconds();
        if elapsed <= 0 {
            return Vec::new();
        }
        self.running_since = Some(since + Duration::seconds(elapsed));
        self.timer.advance(elapsed.unsigned_abs())
    }

    pub fn start(&mut self, now: DateTime<Utc>) -> Vec<Event> {
        let mut events = self.catch_up(now);
        if let Some(event) = self.timer.start() {
            self.running_since = Some(now);
            events.push(event);
        }
        events
    }

    pub fn pause(&mut self, now: DateTime<Utc>) -> Vec<Event> {
        let mut events = self.catch_up(now);
        events.extend(self.timer.pause());
        self.running_since = None;
        events
    }

    pub fn reset(&mut self) -> Event {
        self.running_since = None;
        self.timer.reset()
    }

    /// Swap in new phase lengths. Resets the timer when they differ.
    pub fn apply_durations(&mut self, durations: TimerDurations) {
        if self.timer.durations() != durations {
            self.timer = PomodoroTimer::with_durations(durations);
            self.running_since = None;
        }
    }
}

//! Pomodoro timer engine.
//!
//! The engine is a tick-driven state machine. It has no notion of wall-clock
//! time: whoever owns it calls `tick()` once per elapsed second while the
//! timer is active (see [`super::TimerDriver`]).
//!
//! ## State Transitions
//!
//! ```text
//! Idle(Focus) -> Running(Focus) -> Running(Break) -> Running(Focus) -> ...
//!        ^            |  pause            |  pause
//!        |            v                   v
//!        +---- Idle(Focus)          Idle(Break)
//!           reset from anywhere
//! ```
//!
//! A phase that runs out rolls straight into the next one without pausing.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::events::Event;

/// Focus phase length: 25 minutes.
pub const FOCUS_DURATION_SECS: u32 = 25 * 60;
/// Break phase length: 5 minutes.
pub const BREAK_DURATION_SECS: u32 = 5 * 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Focus,
    Break,
}

impl Phase {
    pub fn label(self) -> &'static str {
        match self {
            Phase::Focus => "Focus Time",
            Phase::Break => "Break Time",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Phase lengths in seconds. Both are at least one second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerDurations {
    focus_secs: u32,
    break_secs: u32,
}

impl TimerDurations {
    pub fn new(focus_secs: u32, break_secs: u32) -> Self {
        Self {
            focus_secs: focus_secs.max(1),
            break_secs: break_secs.max(1),
        }
    }

    pub fn focus_secs(&self) -> u32 {
        self.focus_secs
    }

    pub fn break_secs(&self) -> u32 {
        self.break_secs
    }

    pub fn of(&self, phase: Phase) -> u32 {
        match phase {
            Phase::Focus => self.focus_secs,
            Phase::Break => self.break_secs,
        }
    }
}

impl Default for TimerDurations {
    fn default() -> Self {
        Self::new(FOCUS_DURATION_SECS, BREAK_DURATION_SECS)
    }
}

/// Point-in-time view for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerSnapshot {
    pub is_active: bool,
    pub is_break: bool,
    pub phase: Phase,
    pub time_left: u32,
    pub display: String,
    pub progress: f64,
}

/// Core timer engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PomodoroTimer {
    #[serde(default)]
    durations: TimerDurations,
    is_active: bool,
    is_break: bool,
    /// Seconds left in the current phase.
    time_left: u32,
}

impl Default for PomodoroTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl PomodoroTimer {
    /// Idle, in the focus phase, with the full focus duration left.
    pub fn new() -> Self {
        Self::with_durations(TimerDurations::default())
    }

    pub fn with_durations(durations: TimerDurations) -> Self {
        Self {
            durations,
            is_active: false,
            is_break: false,
            time_left: durations.focus_secs(),
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn is_break(&self) -> bool {
        self.is_break
    }

    pub fn time_left(&self) -> u32 {
        self.time_left
    }

    pub fn durations(&self) -> TimerDurations {
        self.durations
    }

    pub fn phase(&self) -> Phase {
        if self.is_break {
            Phase::Break
        } else {
            Phase::Focus
        }
    }

    pub fn phase_duration(&self) -> u32 {
        self.durations.of(self.phase())
    }

    /// 0.0 .. 1.0 progress within the current phase.
    pub fn progress(&self) -> f64 {
        let total = self.phase_duration();
        if total == 0 {
            return 0.0;
        }
        let elapsed = total.saturating_sub(self.time_left);
        f64::from(elapsed) / f64::from(total)
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            is_active: self.is_active,
            is_break: self.is_break,
            phase: self.phase(),
            time_left: self.time_left,
            display: format_time(self.time_left),
            progress: self.progress(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Start counting down. Does not touch `time_left`; no-op when running.
    pub fn start(&mut self) -> Option<Event> {
        if self.is_active {
            return None;
        }
        self.is_active = true;
        Some(Event::TimerStarted {
            phase: self.phase(),
            time_left_secs: self.time_left,
        })
    }

    /// Stop counting down. Always leaves the timer inactive; only reports an
    /// event when it was running.
    pub fn pause(&mut self) -> Option<Event> {
        let was_active = std::mem::replace(&mut self.is_active, false);
        was_active.then(|| Event::TimerPaused {
            phase: self.phase(),
            time_left_secs: self.time_left,
        })
    }

    pub fn reset(&mut self) -> Event {
        self.is_active = false;
        self.is_break = false;
        self.time_left = self.durations.focus_secs();
        Event::TimerReset {
            time_left_secs: self.time_left,
        }
    }

    /// One elapsed second. Ignored while inactive.
    pub fn tick(&mut self) -> Option<Event> {
        if !self.is_active {
            return None;
        }
        self.time_left = self.time_left.saturating_sub(1);
        if self.time_left == 0 {
            return Some(self.roll_over());
        }
        None
    }

    /// Apply `secs` ticks at once. Ends in the same state as calling
    /// `tick()` that many times, without iterating second by second.
    ///
    /// Whole focus+break cycles beyond the last one are skipped without
    /// reporting their rollovers, so at most five events come back however
    /// long the gap was.
    pub fn advance(&mut self, mut secs: u64) -> Vec<Event> {
        let mut events = Vec::new();
        while self.is_active && secs > 0 {
            let left = u64::from(self.time_left);
            if secs < left {
                // secs < time_left, so this fits in u32.
                self.time_left -= secs as u32;
                break;
            }
            secs -= left.max(1);
            self.time_left = 0;
            events.push(self.roll_over());

            // A fresh phase just began, so a full cycle lands back here.
            let cycle =
                u64::from(self.durations.focus_secs()) + u64::from(self.durations.break_secs());
            let cycles = secs / cycle;
            if cycles > 1 {
                secs -= (cycles - 1) * cycle;
                debug!(cycles = cycles - 1, "skipped whole timer cycles");
            }
        }
        events
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn roll_over(&mut self) -> Event {
        let completed = self.phase();
        self.is_break = !self.is_break;
        self.time_left = self.phase_duration();
        Event::PhaseCompleted {
            completed,
            next: self.phase(),
            next_duration_secs: self.time_left,
        }
    }
}

/// `MM:SS`. Minutes are not wrapped into hours.
pub fn format_time(secs: u32) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}
